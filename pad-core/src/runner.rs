//! CycleRunner: drives the pipeline between the capabilities.

use crate::config::{PipelineConfig, RuntimeConfig};
use crate::input::{Clock, InputError, RawInputSource};
use crate::output::{OutputError, StateSink};
use crate::pipeline::{CycleOutput, Pipeline};
use crate::state::LogicalState;
use crate::store::{ConfigStore, StoreError};

/// Reads a sample, runs one pipeline step, sends the state and persists
/// configuration changes.
///
/// The pipeline step itself never awaits; the runner only suspends at the
/// capability boundaries.
///
/// # Error Handling
///
/// On input errors the runner sends a neutral state, keeping the current
/// modes, so stale inputs never persist on the host. While the sink is not
/// ready the pipeline keeps stepping but nothing is sent.
pub struct CycleRunner<I, C, O, S> {
    input: I,
    clock: C,
    output: O,
    store: S,
    pipeline: Pipeline,
}

impl<I, C, O, S> CycleRunner<I, C, O, S>
where
    I: RawInputSource,
    C: Clock,
    O: StateSink,
    S: ConfigStore,
{
    /// Assemble a runner around an already configured pipeline.
    pub fn new(input: I, clock: C, output: O, store: S, pipeline: Pipeline) -> Self {
        Self {
            input,
            clock,
            output,
            store,
            pipeline,
        }
    }

    /// Set up the input and restore the persisted configuration.
    ///
    /// A missing or corrupt record falls back to the defaults with the
    /// interval from `settings`; a stored record brings its own interval.
    pub async fn start(
        mut input: I,
        clock: C,
        output: O,
        mut store: S,
        settings: PipelineConfig,
    ) -> Result<Self, CycleError> {
        input.setup().await?;

        let pipeline = match store.load().await {
            Ok(options) => Pipeline::from_options(&options, settings.hotkeys),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("no stored options ({:?}), using defaults", _e);
                Pipeline::new(RuntimeConfig::DEFAULT, settings)
            }
        };

        Ok(Self::new(input, clock, output, store, pipeline))
    }

    /// Run cycles indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            if let Err(_e) = self.process_one().await {
                #[cfg(feature = "defmt")]
                defmt::warn!("cycle error: {:?}", _e);
            }
        }
    }

    /// Process a single cycle.
    ///
    /// A failed send does not prevent a pending configuration save.
    pub async fn process_one(&mut self) -> Result<CycleOutput, CycleError> {
        let raw = match self.input.read().await {
            Ok(raw) => raw,
            Err(e) => {
                // Send neutral state to prevent stale inputs
                if self.output.is_ready() {
                    let neutral = LogicalState::neutral(&self.pipeline.config());
                    let _ = self.output.send(&neutral).await;
                }
                return Err(CycleError::Input(e));
            }
        };

        let output = self.pipeline.step(&raw, self.clock.now_ms());
        let sent = if self.output.is_ready() {
            self.output.send(&output.state).await
        } else {
            Err(OutputError::NotReady)
        };

        if output.config_changed {
            self.store.save(&self.pipeline.options()).await?;
        }

        sent?;
        Ok(output)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decompose the runner into its parts.
    pub fn into_parts(self) -> (I, C, O, S, Pipeline) {
        (self.input, self.clock, self.output, self.store, self.pipeline)
    }
}

/// Error type for runner operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// Error from the input source.
    Input(InputError),
    /// Error from the state sink.
    Output(OutputError),
    /// Error saving the configuration.
    Store(StoreError),
}

impl From<InputError> for CycleError {
    fn from(err: InputError) -> Self {
        CycleError::Input(err)
    }
}

impl From<OutputError> for CycleError {
    fn from(err: OutputError) -> Self {
        CycleError::Output(err)
    }
}

impl From<StoreError> for CycleError {
    fn from(err: StoreError) -> Self {
        CycleError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::{HOTKEY_F1, HOTKEY_F2};
    use crate::state::{InputSample, RawInputSample};
    use core::cell::Cell;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use pad_proto::{
        Buttons, Dpad, DpadMode, GamepadOptions, HotkeyAction, RecordError, SocdMode,
    };
    use std::vec;
    use std::vec::Vec;

    struct MockInput {
        samples: Vec<Result<RawInputSample, InputError>>,
        index: usize,
        setup_done: bool,
    }

    impl MockInput {
        fn new(samples: Vec<Result<RawInputSample, InputError>>) -> Self {
            Self {
                samples,
                index: 0,
                setup_done: false,
            }
        }
    }

    impl RawInputSource for MockInput {
        fn setup(&mut self) -> impl Future<Output = Result<(), InputError>> {
            self.setup_done = true;
            core::future::ready(Ok(()))
        }

        fn read(&mut self) -> impl Future<Output = Result<RawInputSample, InputError>> {
            let result = if !self.setup_done {
                Err(InputError::NotReady)
            } else if self.index < self.samples.len() {
                let r = self.samples[self.index];
                self.index += 1;
                r
            } else {
                Err(InputError::Disconnected)
            };
            core::future::ready(result)
        }
    }

    // Advances 1 ms per reading
    struct StepClock(Cell<u32>);

    impl Clock for StepClock {
        fn now_ms(&self) -> u32 {
            let now = self.0.get();
            self.0.set(now.wrapping_add(1));
            now
        }
    }

    struct MockOutput {
        sent: Vec<LogicalState>,
        ready: bool,
        fail: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                ready: true,
                fail: false,
            }
        }
    }

    impl StateSink for MockOutput {
        fn send(&mut self, state: &LogicalState) -> impl Future<Output = Result<(), OutputError>> {
            let result = if self.fail {
                Err(OutputError::Io)
            } else {
                self.sent.push(*state);
                Ok(())
            };
            core::future::ready(result)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    struct MockStore {
        stored: Option<[u8; pad_proto::RECORD_SIZE]>,
        saves: usize,
    }

    impl MockStore {
        fn empty() -> Self {
            Self {
                stored: None,
                saves: 0,
            }
        }

        fn holding(options: &GamepadOptions) -> Self {
            Self {
                stored: Some(options.to_bytes()),
                saves: 0,
            }
        }
    }

    impl ConfigStore for MockStore {
        fn load(&mut self) -> impl Future<Output = Result<GamepadOptions, StoreError>> {
            let result = match &self.stored {
                Some(bytes) => GamepadOptions::decode(bytes).map_err(StoreError::from),
                None => Err(StoreError::Record(RecordError::BadMagic)),
            };
            core::future::ready(result)
        }

        fn save(&mut self, options: &GamepadOptions) -> impl Future<Output = Result<(), StoreError>> {
            self.stored = Some(options.to_bytes());
            self.saves += 1;
            core::future::ready(Ok(()))
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    fn sample(buttons: Buttons, dpad: Dpad) -> Result<RawInputSample, InputError> {
        Ok(InputSample {
            buttons,
            dpad,
            ..InputSample::neutral()
        })
    }

    type Runner = CycleRunner<MockInput, StepClock, MockOutput, MockStore>;

    fn start(samples: Vec<Result<RawInputSample, InputError>>, store: MockStore) -> Runner {
        block_on(CycleRunner::start(
            MockInput::new(samples),
            StepClock(Cell::new(0)),
            MockOutput::new(),
            store,
            PipelineConfig::default(),
        ))
        .unwrap()
    }

    #[test]
    fn test_runner_forwards_state() {
        let mut runner = start(vec![sample(Buttons::A | Buttons::B, Dpad::UP)], MockStore::empty());

        let out = block_on(runner.process_one()).unwrap();
        assert_eq!(out.action, None);

        let sent = &runner.output().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].buttons, Buttons::A | Buttons::B);
        assert_eq!(sent[0].dpad, Dpad::UP);
        assert_eq!(runner.store().saves, 0);
    }

    #[test]
    fn test_runner_sends_neutral_on_error() {
        let options = GamepadOptions {
            dpad_mode: DpadMode::LeftAnalog,
            ..GamepadOptions::DEFAULT
        };
        let mut runner = start(vec![Err(InputError::Io)], MockStore::holding(&options));

        let result = block_on(runner.process_one());
        assert!(matches!(result, Err(CycleError::Input(InputError::Io))));

        let sent = &runner.output().sent;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].buttons.is_empty());
        assert_eq!(sent[0].dpad_mode, DpadMode::LeftAnalog);
    }

    #[test]
    fn test_start_restores_stored_options() {
        let options = GamepadOptions {
            socd_mode: SocdMode::XFirstInputYFirstInput,
            invert_x: true,
            debounce_ms: 12,
            ..GamepadOptions::DEFAULT
        };
        let runner = start(vec![], MockStore::holding(&options));
        assert_eq!(runner.pipeline().options(), options);
    }

    #[test]
    fn test_start_falls_back_on_corrupt_record() {
        let mut store = MockStore::holding(&GamepadOptions::DEFAULT);
        if let Some(bytes) = store.stored.as_mut() {
            bytes[5] ^= 0x01;
        }
        let runner = start(vec![], store);
        assert_eq!(runner.pipeline().config(), RuntimeConfig::DEFAULT);
    }

    #[test]
    fn test_hotkey_change_is_saved_once() {
        let mut runner = start(
            vec![
                sample(HOTKEY_F2, Dpad::LEFT),
                sample(HOTKEY_F2, Dpad::LEFT),
                sample(Buttons::NONE, Dpad::NONE),
            ],
            MockStore::empty(),
        );

        let out = block_on(runner.process_one()).unwrap();
        assert_eq!(out.action, Some(HotkeyAction::SOCD_LAST_INPUT));
        block_on(runner.process_one()).unwrap();
        block_on(runner.process_one()).unwrap();

        assert_eq!(runner.store().saves, 1);
        let (_, _, _, mut store, _) = runner.into_parts();
        let saved = block_on(store.load()).unwrap();
        assert_eq!(saved.socd_mode, SocdMode::SecondInputPriority);
    }

    #[test]
    fn test_home_hotkey_is_not_saved() {
        let mut runner = start(vec![sample(HOTKEY_F1, Dpad::LEFT)], MockStore::empty());
        let out = block_on(runner.process_one()).unwrap();
        assert_eq!(out.action, Some(HotkeyAction::HOME_BUTTON));
        assert!(!out.config_changed);
        assert_eq!(runner.store().saves, 0);
        assert_eq!(runner.output().sent[0].buttons, Buttons::GUIDE);
    }

    #[test]
    fn test_save_survives_send_failure() {
        let mut runner = start(vec![sample(HOTKEY_F1, Dpad::RIGHT)], MockStore::empty());
        let (input, clock, mut output, store, pipeline) = runner.into_parts();
        output.fail = true;
        runner = CycleRunner::new(input, clock, output, store, pipeline);

        let result = block_on(runner.process_one());
        assert!(matches!(result, Err(CycleError::Output(OutputError::Io))));
        assert_eq!(runner.store().saves, 1);
        assert_eq!(runner.pipeline().config().dpad_mode, DpadMode::RightAnalog);
    }

    #[test]
    fn test_unready_sink_is_skipped() {
        let mut runner = start(
            vec![sample(HOTKEY_F1, Dpad::RIGHT), Err(InputError::Io), sample(Buttons::A, Dpad::UP)],
            MockStore::empty(),
        );
        let (input, clock, mut output, store, pipeline) = runner.into_parts();
        output.ready = false;
        runner = CycleRunner::new(input, clock, output, store, pipeline);

        // Still steps and persists while the host is away
        let result = block_on(runner.process_one());
        assert!(matches!(result, Err(CycleError::Output(OutputError::NotReady))));
        assert_eq!(runner.store().saves, 1);
        assert_eq!(runner.pipeline().config().dpad_mode, DpadMode::RightAnalog);

        let result = block_on(runner.process_one());
        assert!(matches!(result, Err(CycleError::Input(InputError::Io))));
        assert!(runner.output().sent.is_empty());

        let (input, clock, mut output, store, pipeline) = runner.into_parts();
        output.ready = true;
        runner = CycleRunner::new(input, clock, output, store, pipeline);

        block_on(runner.process_one()).unwrap();
        assert_eq!(runner.output().sent.len(), 1);
        assert_eq!(runner.output().sent[0].buttons, Buttons::A);
    }

    #[test]
    fn test_end_of_input_reports_disconnect() {
        let mut runner = start(vec![], MockStore::empty());
        let result = block_on(runner.process_one());
        assert!(matches!(result, Err(CycleError::Input(InputError::Disconnected))));
    }
}

//! Persisted options record.
//!
//! The record is a fixed 10-byte little-endian layout, sized for a single
//! flash page write:
//!
//! ```text
//! offset  size  field
//! 0       2     magic "PC"
//! 2       1     record version
//! 3       1     input mode code
//! 4       1     dpad mode code
//! 5       1     SOCD mode code
//! 6       1     flags (bit0 invert X, bit1 invert Y)
//! 7       2     debounce interval in ms
//! 9       1     CRC-8/SMBUS of bytes 0..9
//! ```
//!
//! A record that fails the structural checks (magic, version, checksum) is
//! rejected. A structurally valid record carrying a mode code this build does
//! not know decodes with that field set to its default.

use crate::crc::calculate_crc8;
use crate::modes::{DpadMode, InputMode, SocdMode};

/// Size of an encoded record in bytes.
pub const RECORD_SIZE: usize = 10;

/// Leading bytes of every record.
pub const RECORD_MAGIC: [u8; 2] = *b"PC";

/// Current record layout version.
pub const RECORD_VERSION: u8 = 1;

const FLAG_INVERT_X: u8 = 1 << 0;
const FLAG_INVERT_Y: u8 = 1 << 1;

/// Error type for record decoding and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// The output buffer cannot hold a record.
    BufferTooSmall,
    /// The input is shorter than a record.
    Truncated,
    /// The magic bytes do not match (erased or foreign storage).
    BadMagic,
    /// The record was written by an incompatible layout version.
    UnsupportedVersion(u8),
    /// Checksum mismatch.
    Checksum,
}

impl core::fmt::Display for RecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::Truncated => write!(f, "record truncated"),
            Self::BadMagic => write!(f, "bad record magic"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported record version {}", v),
            Self::Checksum => write!(f, "record checksum mismatch"),
        }
    }
}

/// Every option that survives a power cycle.
///
/// # Example
///
/// ```
/// use pad_proto::{GamepadOptions, SocdMode};
///
/// let options = GamepadOptions {
///     socd_mode: SocdMode::SecondInputPriority,
///     debounce_ms: 5,
///     ..GamepadOptions::DEFAULT
/// };
///
/// let bytes = options.to_bytes();
/// assert_eq!(GamepadOptions::decode(&bytes), Ok(options));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadOptions {
    pub input_mode: InputMode,
    pub dpad_mode: DpadMode,
    pub socd_mode: SocdMode,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Debounce interval in milliseconds, 0 disables debouncing.
    pub debounce_ms: u16,
}

impl GamepadOptions {
    /// Factory defaults.
    pub const DEFAULT: Self = Self {
        input_mode: InputMode::XInput,
        dpad_mode: DpadMode::Digital,
        socd_mode: SocdMode::Neutral,
        invert_x: false,
        invert_y: false,
        debounce_ms: 0,
    };

    /// Encode into the provided buffer.
    ///
    /// Returns the number of bytes written ([`RECORD_SIZE`]).
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::BufferTooSmall`] if `buf` is shorter than a record.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, RecordError> {
        let out = buf
            .get_mut(..RECORD_SIZE)
            .ok_or(RecordError::BufferTooSmall)?;
        out.copy_from_slice(&self.to_bytes());
        Ok(RECORD_SIZE)
    }

    /// Encode into a fresh array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];

        let mut flags = 0;
        if self.invert_x {
            flags |= FLAG_INVERT_X;
        }
        if self.invert_y {
            flags |= FLAG_INVERT_Y;
        }
        let debounce = self.debounce_ms.to_le_bytes();

        out[0] = RECORD_MAGIC[0];
        out[1] = RECORD_MAGIC[1];
        out[2] = RECORD_VERSION;
        out[3] = self.input_mode.code();
        out[4] = self.dpad_mode.code();
        out[5] = self.socd_mode.code();
        out[6] = flags;
        out[7] = debounce[0];
        out[8] = debounce[1];
        out[9] = calculate_crc8(&out[..RECORD_SIZE - 1]);
        out
    }

    /// Decode a record.
    ///
    /// Bytes after the first [`RECORD_SIZE`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is truncated, has the wrong magic or
    /// version, or fails its checksum.
    pub fn decode(buf: &[u8]) -> Result<Self, RecordError> {
        let record = buf.get(..RECORD_SIZE).ok_or(RecordError::Truncated)?;

        if record[..2] != RECORD_MAGIC {
            return Err(RecordError::BadMagic);
        }
        if record[2] != RECORD_VERSION {
            return Err(RecordError::UnsupportedVersion(record[2]));
        }
        if calculate_crc8(&record[..RECORD_SIZE - 1]) != record[RECORD_SIZE - 1] {
            return Err(RecordError::Checksum);
        }

        let input_mode = InputMode::from_code(record[3]).unwrap_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::warn!("unknown input mode code {}, using default", record[3]);
            Self::DEFAULT.input_mode
        });
        let dpad_mode = DpadMode::from_code(record[4]).unwrap_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::warn!("unknown dpad mode code {}, using default", record[4]);
            Self::DEFAULT.dpad_mode
        });
        let socd_mode = SocdMode::from_code(record[5]).unwrap_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::warn!("unknown SOCD mode code {}, using default", record[5]);
            Self::DEFAULT.socd_mode
        });

        Ok(Self {
            input_mode,
            dpad_mode,
            socd_mode,
            invert_x: record[6] & FLAG_INVERT_X != 0,
            invert_y: record[6] & FLAG_INVERT_Y != 0,
            debounce_ms: u16::from_le_bytes([record[7], record[8]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_crc(mut bytes: [u8; RECORD_SIZE]) -> [u8; RECORD_SIZE] {
        bytes[RECORD_SIZE - 1] = calculate_crc8(&bytes[..RECORD_SIZE - 1]);
        bytes
    }

    #[test]
    fn test_default_layout() {
        let bytes = GamepadOptions::DEFAULT.to_bytes();
        assert_eq!(&bytes[..9], &[b'P', b'C', 1, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_encode_fields() {
        let options = GamepadOptions {
            input_mode: InputMode::Switch,
            dpad_mode: DpadMode::RightAnalog,
            socd_mode: SocdMode::XFirstInputYUp,
            invert_x: false,
            invert_y: true,
            debounce_ms: 0x0102,
        };
        let bytes = options.to_bytes();
        assert_eq!(bytes[3], 1);
        assert_eq!(bytes[4], 2);
        assert_eq!(bytes[5], 25);
        assert_eq!(bytes[6], FLAG_INVERT_Y);
        assert_eq!(&bytes[7..9], &[0x02, 0x01]);
        assert_eq!(GamepadOptions::decode(&bytes), Ok(options));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; RECORD_SIZE - 1];
        assert_eq!(
            GamepadOptions::DEFAULT.encode(&mut buf),
            Err(RecordError::BufferTooSmall)
        );
    }

    #[test]
    fn test_encode_matches_to_bytes() {
        let options = GamepadOptions {
            dpad_mode: DpadMode::RightAnalog,
            invert_y: true,
            debounce_ms: 300,
            ..GamepadOptions::DEFAULT
        };
        let mut buf = [0xAAu8; RECORD_SIZE + 2];
        assert_eq!(options.encode(&mut buf), Ok(RECORD_SIZE));
        assert_eq!(buf[..RECORD_SIZE], options.to_bytes());
        assert_eq!(buf[RECORD_SIZE..], [0xAA, 0xAA]);
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = GamepadOptions::DEFAULT.to_bytes();
        assert_eq!(
            GamepadOptions::decode(&bytes[..RECORD_SIZE - 1]),
            Err(RecordError::Truncated)
        );
    }

    #[test]
    fn test_decode_erased_flash() {
        assert_eq!(
            GamepadOptions::decode(&[0xFF; RECORD_SIZE]),
            Err(RecordError::BadMagic)
        );
    }

    #[test]
    fn test_decode_unknown_version() {
        let mut bytes = GamepadOptions::DEFAULT.to_bytes();
        bytes[2] = 9;
        let bytes = with_crc(bytes);
        assert_eq!(
            GamepadOptions::decode(&bytes),
            Err(RecordError::UnsupportedVersion(9))
        );
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let mut bytes = GamepadOptions::DEFAULT.to_bytes();
        bytes[5] = SocdMode::UpPriority.code();
        assert_eq!(GamepadOptions::decode(&bytes), Err(RecordError::Checksum));
    }

    #[test]
    fn test_decode_unknown_codes_fall_back() {
        let mut bytes = GamepadOptions {
            invert_x: true,
            debounce_ms: 8,
            ..GamepadOptions::DEFAULT
        }
        .to_bytes();
        bytes[3] = 7;
        bytes[4] = 42;
        bytes[5] = 200;
        let bytes = with_crc(bytes);

        let options = GamepadOptions::decode(&bytes).unwrap();
        assert_eq!(options.input_mode, InputMode::XInput);
        assert_eq!(options.dpad_mode, DpadMode::Digital);
        assert_eq!(options.socd_mode, SocdMode::Neutral);
        assert!(options.invert_x);
        assert_eq!(options.debounce_ms, 8);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = [0xAAu8; 32];
        GamepadOptions::DEFAULT.encode(&mut buf).unwrap();
        assert_eq!(GamepadOptions::decode(&buf), Ok(GamepadOptions::DEFAULT));
    }
}

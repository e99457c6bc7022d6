//! Frame layout configuration and validation.
//!
//! A [`Config`] pins down everything both ends of a link must agree on: the
//! delimiter byte, the widths of the two header fields, the payload size
//! limit, and whether CRC guards are present. A [`crate::Framer`] cannot be
//! built without one, so every framing operation runs against a layout that
//! has already been validated.

use crate::wire::FieldWidth;

/// Error type for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Message-type width is not 1, 2, or 4 bytes.
    InvalidMessageTypeWidth,
    /// Payload-size width is not 1, 2, or 4 bytes.
    InvalidPayloadSizeWidth,
    /// Maximum payload size is zero or does not fit in the payload-size field.
    InvalidMaxPayloadSize,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMessageTypeWidth => write!(f, "message-type width must be 1, 2, or 4"),
            Self::InvalidPayloadSizeWidth => write!(f, "payload-size width must be 1, 2, or 4"),
            Self::InvalidMaxPayloadSize => {
                write!(f, "max payload size must be nonzero and fit the size field")
            }
        }
    }
}

/// Number of bytes in each CRC guard.
pub const CRC_SIZE: usize = 2;

/// Number of bytes in the frame delimiter.
pub const DELIMITER_SIZE: usize = 1;

/// Immutable frame layout shared by both framing directions.
///
/// On the wire a frame is laid out as:
///
/// ```text
/// delimiter(1) | message_type(1|2|4) | payload_size(1|2|4)
///     | [header_crc(2)] | payload(payload_size) | [payload_crc(2)]
/// ```
///
/// The CRC guards are present when `use_crc` is set. The header guard
/// covers delimiter through payload-size; the payload guard covers the
/// payload bytes alone, so a corrupted length field is rejected before any
/// payload is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    delimiter: u8,
    message_type_width: FieldWidth,
    payload_size_width: FieldWidth,
    max_payload_size: usize,
    use_crc: bool,
}

impl Config {
    /// Validate and build a configuration from raw field sizes.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidMessageTypeWidth`] if `message_type_bytes`
    ///   is not 1, 2, or 4.
    /// - [`ConfigError::InvalidPayloadSizeWidth`] if `payload_size_bytes`
    ///   is not 1, 2, or 4.
    /// - [`ConfigError::InvalidMaxPayloadSize`] if `max_payload_size` is
    ///   zero or cannot be represented in `payload_size_bytes` bytes.
    pub fn new(
        delimiter: u8,
        message_type_bytes: u8,
        payload_size_bytes: u8,
        max_payload_size: usize,
        use_crc: bool,
    ) -> Result<Self, ConfigError> {
        let message_type_width = FieldWidth::from_bytes(message_type_bytes)
            .ok_or(ConfigError::InvalidMessageTypeWidth)?;
        let payload_size_width = FieldWidth::from_bytes(payload_size_bytes)
            .ok_or(ConfigError::InvalidPayloadSizeWidth)?;

        if max_payload_size == 0 || max_payload_size as u64 > payload_size_width.max_value() as u64
        {
            return Err(ConfigError::InvalidMaxPayloadSize);
        }

        Ok(Self {
            delimiter,
            message_type_width,
            payload_size_width,
            max_payload_size,
            use_crc,
        })
    }

    /// The frame delimiter byte.
    #[inline]
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Width of the message-type field.
    #[inline]
    #[must_use]
    pub fn message_type_width(&self) -> FieldWidth {
        self.message_type_width
    }

    /// Width of the payload-size field.
    #[inline]
    #[must_use]
    pub fn payload_size_width(&self) -> FieldWidth {
        self.payload_size_width
    }

    /// Largest payload this configuration accepts.
    #[inline]
    #[must_use]
    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    /// Whether frames carry header and payload CRC guards.
    #[inline]
    #[must_use]
    pub fn use_crc(&self) -> bool {
        self.use_crc
    }

    /// Largest message-type value representable in the configured width.
    #[inline]
    #[must_use]
    pub fn max_message_type(&self) -> u32 {
        self.message_type_width.max_value()
    }

    /// Size of the guarded header region: delimiter plus both fields.
    #[inline]
    #[must_use]
    pub fn header_size(&self) -> usize {
        DELIMITER_SIZE + self.message_type_width.bytes() + self.payload_size_width.bytes()
    }

    /// Bytes occupied by one CRC guard, zero when CRC is disabled.
    #[inline]
    #[must_use]
    pub fn crc_size(&self) -> usize {
        if self.use_crc {
            CRC_SIZE
        } else {
            0
        }
    }

    /// Offset of the payload within a frame.
    #[inline]
    #[must_use]
    pub fn payload_offset(&self) -> usize {
        self.header_size() + self.crc_size()
    }

    /// Total encoded size of a frame carrying `payload_size` bytes.
    #[inline]
    #[must_use]
    pub fn frame_size(&self, payload_size: usize) -> usize {
        self.header_size() + 2 * self.crc_size() + payload_size
    }

    /// Smallest well-formed frame: header, guards, one payload byte.
    #[inline]
    #[must_use]
    pub fn min_frame_size(&self) -> usize {
        self.frame_size(1)
    }
}

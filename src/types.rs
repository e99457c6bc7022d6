//! Core data types shared by the streaming and one-shot framing paths.

/// Decoded or to-be-encoded frame header contents.
///
/// Produced by the receive/decode paths, consumed by the send/encode paths.
/// The payload itself is an opaque byte blob carried alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadInfo {
    /// Application-defined message type, at most the configured width allows.
    pub message_type: u32,
    /// Number of payload bytes, 1..=`max_payload_size`.
    pub payload_size: usize,
}

/// Frame-level and transport errors.
///
/// Any of these reported from a streaming call means the in-flight frame
/// was abandoned and the affected cursor reset to delimiter search; the
/// framer itself remains usable and the next delimiter on the wire will be
/// found by a later call. Transient conditions ("no delimiter yet", "not
/// enough bytes") are not errors, see [`ReceiveStatus`] and [`SendStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Message type does not fit the configured field width.
    InvalidMessageType,
    /// Payload size is zero, over the configured limit, or over the
    /// capacity of the buffer in play.
    InvalidPayloadSize,
    /// Header CRC guard failed its residue check.
    HeaderCrcMismatch,
    /// Payload CRC guard failed its residue check.
    PayloadCrcMismatch,
    /// The stream reported readable bytes but failed to deliver them.
    ReadFailed,
    /// The stream reported writable capacity but failed to accept bytes.
    WriteFailed,
    /// One-shot encode: the destination cannot hold the whole frame.
    BufferTooSmall,
    /// One-shot decode: the source is smaller than any well-formed frame.
    TruncatedFrame,
    /// One-shot decode: the source does not start with the delimiter.
    MissingDelimiter,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMessageType => write!(f, "message type exceeds field width"),
            Self::InvalidPayloadSize => write!(f, "payload size out of range"),
            Self::HeaderCrcMismatch => write!(f, "header crc mismatch"),
            Self::PayloadCrcMismatch => write!(f, "payload crc mismatch"),
            Self::ReadFailed => write!(f, "stream read failed"),
            Self::WriteFailed => write!(f, "stream write failed"),
            Self::BufferTooSmall => write!(f, "destination buffer too small"),
            Self::TruncatedFrame => write!(f, "frame smaller than minimum"),
            Self::MissingDelimiter => write!(f, "frame does not start with delimiter"),
        }
    }
}

/// Progress of an incremental receive call.
///
/// All variants short of [`ReceiveStatus::Complete`] are steady-state
/// results of non-blocking polling: call again once the stream has more
/// bytes. `Complete` repeats until the read cursor is explicitly reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum ReceiveStatus {
    /// The stream has no bytes to read right now.
    NotAvailable,
    /// The bytes read in this call contained no delimiter.
    NoDelimiter,
    /// A fixed-width field needs more bytes than this call had available;
    /// nothing was consumed for it.
    NotEnoughAvailable,
    /// Mid-header, more bytes needed.
    HeaderInProgress,
    /// Mid-payload, more bytes needed.
    PayloadInProgress,
    /// A full frame was received and validated.
    Complete(PayloadInfo),
}

/// Progress of an incremental send call.
///
/// Mirrors [`ReceiveStatus`], driven by write capacity instead of read
/// availability. `Complete` repeats until the write cursor is explicitly
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum SendStatus {
    /// The stream cannot accept any bytes right now.
    NotAvailable,
    /// A fixed-width field needs more capacity than this call had; nothing
    /// was written for it.
    NotEnoughAvailable,
    /// Mid-header, more capacity needed.
    HeaderInProgress,
    /// Mid-payload, more capacity needed.
    PayloadInProgress,
    /// The full frame has been written.
    Complete,
}

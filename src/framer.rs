//! Incremental packet framing over a non-blocking byte stream.
//!
//! [`Framer`] holds one [`Config`] and two independent phased cursors, one
//! per direction. Each call to [`Framer::receive_payload`] or
//! [`Framer::send_payload`] drains whatever the stream reports as
//! transferable right now and then returns; nothing ever blocks. A frame
//! that cannot finish in one call is picked up where it left off on the
//! next call.
//!
//! Both directions walk the same phase sequence:
//!
//! ```text
//! Delimiter -> MessageType -> PayloadSize -> [HeaderCrc]
//!     -> Payload -> [PayloadCrc] -> Done
//! ```
//!
//! The CRC phases are skipped when the configuration disables guards.
//! Fixed-width fields are transferred atomically: if the stream cannot
//! supply (or accept) a whole field in the current call, the call returns
//! `NotEnoughAvailable` and the field is retried from scratch next time, so
//! a field value never has to be reassembled across calls. Only the payload
//! phase makes partial progress.
//!
//! Frame-level errors (bad length, CRC mismatch, transport fault) abandon
//! the in-flight frame and reset the affected cursor to delimiter search;
//! the next delimiter byte on the wire resynchronizes the stream.

use crate::config::{Config, CRC_SIZE};
use crate::crc::Crc16Digest;
use crate::oneshot;
use crate::stream::PacketStream;
use crate::types::{FrameError, PayloadInfo, ReceiveStatus, SendStatus};
use crate::wire::{decode_be, encode_be, FieldWidth};

/// One step of the framing sequence, shared by both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Delimiter,
    MessageType,
    PayloadSize,
    HeaderCrc,
    Payload,
    PayloadCrc,
    Done,
}

impl Phase {
    /// Successor phase in frame order, honoring the optional CRC guards.
    fn advance(self, use_crc: bool) -> Self {
        match self {
            Self::Delimiter => Self::MessageType,
            Self::MessageType => Self::PayloadSize,
            Self::PayloadSize => {
                if use_crc {
                    Self::HeaderCrc
                } else {
                    Self::Payload
                }
            }
            Self::HeaderCrc => Self::Payload,
            Self::Payload => {
                if use_crc {
                    Self::PayloadCrc
                } else {
                    Self::Done
                }
            }
            Self::PayloadCrc | Self::Done => Self::Done,
        }
    }
}

/// Per-direction framing state: current phase, payload cursor, the byte
/// budget granted by the stream for the current call, and the running CRC.
///
/// One cursor type serves both directions so the two state machines cannot
/// drift apart structurally.
struct Cursor {
    phase: Phase,
    payload_index: usize,
    budget: usize,
    crc: Crc16Digest,
    info: PayloadInfo,
}

impl Cursor {
    fn new() -> Self {
        Self {
            phase: Phase::Delimiter,
            payload_index: 0,
            budget: 0,
            crc: Crc16Digest::new(),
            info: PayloadInfo::default(),
        }
    }

    /// Back to delimiter search with a fresh CRC and payload cursor.
    fn reset(&mut self) {
        self.phase = Phase::Delimiter;
        self.payload_index = 0;
        self.budget = 0;
        self.crc = Crc16Digest::new();
        self.info = PayloadInfo::default();
    }

    fn advance(&mut self, use_crc: bool) {
        self.phase = self.phase.advance(use_crc);
    }

    /// Swap in a fresh digest and return the finished one. Used both to
    /// finalize a guard and to seed the next guarded region in one move.
    fn take_crc(&mut self) -> Crc16Digest {
        core::mem::replace(&mut self.crc, Crc16Digest::new())
    }

    /// Receive-side status for the phase the cursor now sits in.
    fn receive_progress(&self) -> ReceiveStatus {
        match self.phase {
            Phase::Delimiter => ReceiveStatus::NoDelimiter,
            Phase::MessageType | Phase::PayloadSize | Phase::HeaderCrc => {
                ReceiveStatus::HeaderInProgress
            }
            Phase::Payload | Phase::PayloadCrc => ReceiveStatus::PayloadInProgress,
            Phase::Done => ReceiveStatus::Complete(self.info),
        }
    }

    /// Send-side status for the phase the cursor now sits in.
    fn send_progress(&self) -> SendStatus {
        match self.phase {
            Phase::Delimiter | Phase::MessageType | Phase::PayloadSize | Phase::HeaderCrc => {
                SendStatus::HeaderInProgress
            }
            Phase::Payload | Phase::PayloadCrc => SendStatus::PayloadInProgress,
            Phase::Done => SendStatus::Complete,
        }
    }
}

/// Incremental framer and de-framer for one configured frame layout.
///
/// The read and write cursors are fully independent: receiving and sending
/// may be interleaved freely, even mid-frame on both sides. The framer owns
/// nothing beyond its configuration and cursors; the stream capability and
/// all payload/frame buffers are borrowed per call.
///
/// # Example
///
/// ```
/// use byteframe::{BufferStream, Config, Framer, PayloadInfo, ReceiveStatus};
///
/// let config = Config::new(b'|', 1, 2, 2048, true).unwrap();
/// let mut framer = Framer::new(config);
///
/// // Stage a frame in memory, then receive it through a buffered stream.
/// let payload = b"Hello World!\0";
/// let info = PayloadInfo { message_type: 1, payload_size: payload.len() };
/// let mut frame = [0u8; 64];
/// let len = framer.encode_to_buffer(info, payload, &mut frame).unwrap();
///
/// let mut sink = [0u8; 0];
/// let mut stream = BufferStream::new(&frame[..len], &mut sink);
/// let mut received = [0u8; 2048];
/// match framer.receive_payload(&mut stream, &mut received).unwrap() {
///     ReceiveStatus::Complete(decoded) => {
///         assert_eq!(decoded.message_type, 1);
///         assert_eq!(&received[..decoded.payload_size], payload);
///     }
///     other => panic!("frame should complete in one call: {:?}", other),
/// }
/// ```
pub struct Framer {
    config: Config,
    read: Cursor,
    write: Cursor,
}

impl Framer {
    /// Create a framer for the given (already validated) layout.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            read: Cursor::new(),
            write: Cursor::new(),
        }
    }

    /// The frame layout this framer operates under.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reset both cursors to delimiter search.
    pub fn reset(&mut self) {
        self.reset_read();
        self.reset_write();
    }

    /// Abandon any in-flight inbound frame and rearm for the next one.
    pub fn reset_read(&mut self) {
        self.read.reset();
    }

    /// Abandon any in-flight outbound frame.
    pub fn reset_write(&mut self) {
        self.write.reset();
    }

    /// Advance inbound framing with whatever the stream can deliver now.
    ///
    /// Consumes stream bytes, filling `payload` as the frame body arrives.
    /// Returns [`ReceiveStatus::Complete`] once a whole frame has been
    /// validated, and keeps returning it until [`Framer::reset_read`] is
    /// called. All other statuses mean "call again when more bytes arrive".
    ///
    /// # Errors
    ///
    /// Frame-level errors ([`FrameError::InvalidPayloadSize`],
    /// [`FrameError::HeaderCrcMismatch`], [`FrameError::PayloadCrcMismatch`],
    /// [`FrameError::ReadFailed`]) abandon the in-flight frame and reset the
    /// read cursor; the framer stays usable and resynchronizes on the next
    /// delimiter byte.
    pub fn receive_payload<S: PacketStream>(
        &mut self,
        stream: &mut S,
        payload: &mut [u8],
    ) -> Result<ReceiveStatus, FrameError> {
        if self.read.phase == Phase::Done {
            return Ok(ReceiveStatus::Complete(self.read.info));
        }

        let available = stream.read_available();
        if available == 0 {
            return Ok(ReceiveStatus::NotAvailable);
        }
        self.read.budget = available;

        loop {
            let status = match self.read_step(stream, payload) {
                Ok(status) => status,
                Err(err) => {
                    self.read.reset();
                    return Err(err);
                }
            };
            match status {
                ReceiveStatus::HeaderInProgress | ReceiveStatus::PayloadInProgress
                    if self.read.budget > 0 => {}
                _ => return Ok(status),
            }
        }
    }

    /// Advance outbound framing with whatever the stream can accept now.
    ///
    /// Pass the same `info` and `payload` on every call until
    /// [`SendStatus::Complete`] is returned; completion then repeats until
    /// [`Framer::reset_write`] rearms the cursor for the next frame.
    ///
    /// # Errors
    ///
    /// - [`FrameError::InvalidMessageType`] if the type does not fit the
    ///   configured width (an in-flight frame is left undisturbed).
    /// - [`FrameError::InvalidPayloadSize`] if `info.payload_size` is zero,
    ///   over the limit, or disagrees with `payload.len()`; the write cursor
    ///   is reset and no partial frame is emitted.
    /// - [`FrameError::WriteFailed`] if the stream accepts fewer bytes than
    ///   it advertised; the write cursor is reset.
    pub fn send_payload<S: PacketStream>(
        &mut self,
        stream: &mut S,
        info: PayloadInfo,
        payload: &[u8],
    ) -> Result<SendStatus, FrameError> {
        if info.message_type > self.config.max_message_type() {
            return Err(FrameError::InvalidMessageType);
        }
        if info.payload_size == 0
            || info.payload_size > self.config.max_payload_size()
            || info.payload_size != payload.len()
        {
            self.write.reset();
            return Err(FrameError::InvalidPayloadSize);
        }

        if self.write.phase == Phase::Done {
            return Ok(SendStatus::Complete);
        }

        let capacity = stream.write_available();
        if capacity == 0 {
            return Ok(SendStatus::NotAvailable);
        }
        self.write.budget = capacity;

        loop {
            let status = match self.write_step(stream, info, payload) {
                Ok(status) => status,
                Err(err) => {
                    self.write.reset();
                    return Err(err);
                }
            };
            match status {
                SendStatus::HeaderInProgress | SendStatus::PayloadInProgress
                    if self.write.budget > 0 => {}
                _ => return Ok(status),
            }
        }
    }

    /// One-shot encode under this framer's configuration.
    ///
    /// See [`oneshot::encode_to_buffer`].
    pub fn encode_to_buffer(
        &self,
        info: PayloadInfo,
        payload: &[u8],
        frame: &mut [u8],
    ) -> Result<usize, FrameError> {
        oneshot::encode_to_buffer(&self.config, info, payload, frame)
    }

    /// One-shot encode into a new `heapless::Vec`.
    #[cfg(feature = "heapless")]
    pub fn encode_to_vec<const N: usize>(
        &self,
        info: PayloadInfo,
        payload: &[u8],
    ) -> Result<heapless::Vec<u8, N>, FrameError> {
        oneshot::encode_to_vec(&self.config, info, payload)
    }

    /// One-shot decode under this framer's configuration.
    ///
    /// See [`oneshot::decode_from_buffer`].
    pub fn decode_from_buffer(&self, frame: &[u8]) -> Result<(PayloadInfo, usize), FrameError> {
        oneshot::decode_from_buffer(&self.config, frame)
    }

    // --- receive steps ---

    fn read_step<S: PacketStream>(
        &mut self,
        stream: &mut S,
        payload: &mut [u8],
    ) -> Result<ReceiveStatus, FrameError> {
        match self.read.phase {
            Phase::Delimiter => self.read_delimiter(stream),
            Phase::MessageType => self.read_message_type(stream),
            Phase::PayloadSize => self.read_payload_size(stream, payload.len()),
            Phase::HeaderCrc => self.read_header_crc(stream),
            Phase::Payload => self.read_payload(stream, payload),
            Phase::PayloadCrc => self.read_payload_crc(stream),
            Phase::Done => Ok(ReceiveStatus::Complete(self.read.info)),
        }
    }

    /// Scan the available budget one byte at a time for the delimiter.
    /// Inter-frame noise is discarded here; running out of budget without a
    /// hit is the steady-state `NoDelimiter` result, not an error.
    fn read_delimiter<S: PacketStream>(
        &mut self,
        stream: &mut S,
    ) -> Result<ReceiveStatus, FrameError> {
        while self.read.budget > 0 {
            self.read.budget -= 1;
            let byte = stream.read_byte().ok_or(FrameError::ReadFailed)?;
            if byte == self.config.delimiter() {
                // Seed the header guard with the delimiter itself.
                self.read.crc = Crc16Digest::new();
                if self.config.use_crc() {
                    self.read.crc.update(byte);
                }
                self.read.advance(self.config.use_crc());
                return Ok(self.read.receive_progress());
            }
        }
        Ok(ReceiveStatus::NoDelimiter)
    }

    fn read_field<S: PacketStream>(
        &mut self,
        stream: &mut S,
        width: FieldWidth,
    ) -> Result<Option<u32>, FrameError> {
        if self.read.budget < width.bytes() {
            return Ok(None);
        }
        let mut buf = [0u8; 4];
        let n = stream.read_bytes(&mut buf[..width.bytes()]);
        if n != width.bytes() {
            return Err(FrameError::ReadFailed);
        }
        self.read.budget -= n;
        if self.config.use_crc() {
            self.read.crc.update_slice(&buf[..n]);
        }
        Ok(Some(decode_be(&buf, width)))
    }

    fn read_message_type<S: PacketStream>(
        &mut self,
        stream: &mut S,
    ) -> Result<ReceiveStatus, FrameError> {
        match self.read_field(stream, self.config.message_type_width())? {
            None => Ok(ReceiveStatus::NotEnoughAvailable),
            Some(value) => {
                self.read.info.message_type = value;
                self.read.advance(self.config.use_crc());
                Ok(self.read.receive_progress())
            }
        }
    }

    fn read_payload_size<S: PacketStream>(
        &mut self,
        stream: &mut S,
        capacity: usize,
    ) -> Result<ReceiveStatus, FrameError> {
        match self.read_field(stream, self.config.payload_size_width())? {
            None => Ok(ReceiveStatus::NotEnoughAvailable),
            Some(value) => {
                let size = value as usize;
                // A length that cannot be honored means the rest of the
                // stream cannot be trusted as this frame's body.
                if size == 0 || size > self.config.max_payload_size() || size > capacity {
                    return Err(FrameError::InvalidPayloadSize);
                }
                self.read.info.payload_size = size;
                self.read.advance(self.config.use_crc());
                Ok(self.read.receive_progress())
            }
        }
    }

    fn read_guard<S: PacketStream>(&mut self, stream: &mut S) -> Result<Option<bool>, FrameError> {
        if self.read.budget < CRC_SIZE {
            return Ok(None);
        }
        let mut buf = [0u8; CRC_SIZE];
        let n = stream.read_bytes(&mut buf);
        if n != CRC_SIZE {
            return Err(FrameError::ReadFailed);
        }
        self.read.budget -= n;
        self.read.crc.update_slice(&buf);
        // take_crc both finalizes this guard and seeds the next region.
        Ok(Some(self.read.take_crc().finalize_residue()))
    }

    fn read_header_crc<S: PacketStream>(
        &mut self,
        stream: &mut S,
    ) -> Result<ReceiveStatus, FrameError> {
        match self.read_guard(stream)? {
            None => Ok(ReceiveStatus::NotEnoughAvailable),
            Some(false) => Err(FrameError::HeaderCrcMismatch),
            Some(true) => {
                self.read.advance(self.config.use_crc());
                Ok(self.read.receive_progress())
            }
        }
    }

    fn read_payload<S: PacketStream>(
        &mut self,
        stream: &mut S,
        payload: &mut [u8],
    ) -> Result<ReceiveStatus, FrameError> {
        let size = self.read.info.payload_size;
        let start = self.read.payload_index;
        let chunk = (size - start).min(self.read.budget);

        let n = stream.read_bytes(&mut payload[start..start + chunk]);
        if n == 0 {
            return Err(FrameError::ReadFailed);
        }
        if self.config.use_crc() {
            self.read.crc.update_slice(&payload[start..start + n]);
        }
        self.read.payload_index += n;
        self.read.budget -= n;

        if self.read.payload_index == size {
            self.read.advance(self.config.use_crc());
        }
        Ok(self.read.receive_progress())
    }

    fn read_payload_crc<S: PacketStream>(
        &mut self,
        stream: &mut S,
    ) -> Result<ReceiveStatus, FrameError> {
        match self.read_guard(stream)? {
            None => Ok(ReceiveStatus::NotEnoughAvailable),
            Some(false) => Err(FrameError::PayloadCrcMismatch),
            Some(true) => {
                self.read.advance(self.config.use_crc());
                Ok(self.read.receive_progress())
            }
        }
    }

    // --- send steps ---

    fn write_step<S: PacketStream>(
        &mut self,
        stream: &mut S,
        info: PayloadInfo,
        payload: &[u8],
    ) -> Result<SendStatus, FrameError> {
        match self.write.phase {
            Phase::Delimiter => self.write_delimiter(stream),
            Phase::MessageType => {
                self.write_field(stream, info.message_type, self.config.message_type_width())
            }
            Phase::PayloadSize => self.write_field(
                stream,
                info.payload_size as u32,
                self.config.payload_size_width(),
            ),
            Phase::HeaderCrc | Phase::PayloadCrc => self.write_guard(stream),
            Phase::Payload => self.write_payload(stream, info, payload),
            Phase::Done => Ok(SendStatus::Complete),
        }
    }

    fn write_delimiter<S: PacketStream>(
        &mut self,
        stream: &mut S,
    ) -> Result<SendStatus, FrameError> {
        let delimiter = self.config.delimiter();
        if stream.write_byte(delimiter) != 1 {
            return Err(FrameError::WriteFailed);
        }
        self.write.budget -= 1;
        self.write.crc = Crc16Digest::new();
        if self.config.use_crc() {
            self.write.crc.update(delimiter);
        }
        self.write.advance(self.config.use_crc());
        Ok(self.write.send_progress())
    }

    fn write_field<S: PacketStream>(
        &mut self,
        stream: &mut S,
        value: u32,
        width: FieldWidth,
    ) -> Result<SendStatus, FrameError> {
        if self.write.budget < width.bytes() {
            return Ok(SendStatus::NotEnoughAvailable);
        }
        let mut buf = [0u8; 4];
        let len = encode_be(value, width, &mut buf);
        if stream.write_bytes(&buf[..len]) != len {
            return Err(FrameError::WriteFailed);
        }
        self.write.budget -= len;
        if self.config.use_crc() {
            self.write.crc.update_slice(&buf[..len]);
        }
        self.write.advance(self.config.use_crc());
        Ok(self.write.send_progress())
    }

    fn write_guard<S: PacketStream>(&mut self, stream: &mut S) -> Result<SendStatus, FrameError> {
        if self.write.budget < CRC_SIZE {
            return Ok(SendStatus::NotEnoughAvailable);
        }
        // take_crc finalizes this guard and seeds the next region.
        let guard = self.write.take_crc().finalize_bytes();
        if stream.write_bytes(&guard) != CRC_SIZE {
            return Err(FrameError::WriteFailed);
        }
        self.write.budget -= CRC_SIZE;
        self.write.advance(self.config.use_crc());
        Ok(self.write.send_progress())
    }

    fn write_payload<S: PacketStream>(
        &mut self,
        stream: &mut S,
        info: PayloadInfo,
        payload: &[u8],
    ) -> Result<SendStatus, FrameError> {
        let start = self.write.payload_index;
        let chunk = (info.payload_size - start).min(self.write.budget);

        let n = stream.write_bytes(&payload[start..start + chunk]);
        if n == 0 {
            return Err(FrameError::WriteFailed);
        }
        if self.config.use_crc() {
            self.write.crc.update_slice(&payload[start..start + n]);
        }
        self.write.payload_index += n;
        self.write.budget -= n;

        if self.write.payload_index == info.payload_size {
            self.write.advance(self.config.use_crc());
        }
        Ok(self.write.send_progress())
    }
}

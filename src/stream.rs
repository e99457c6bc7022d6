//! Non-blocking byte stream capability consumed by the framer.
//!
//! The framer is transport-agnostic: serial links, sockets, and in-memory
//! buffers all drive it through this one trait. There is no default or
//! global stream; callers pass the capability explicitly on every framing
//! call and the framer never holds on to it.

/// A non-blocking byte source and sink.
///
/// Every method must return promptly. Reads and writes may move fewer bytes
/// than requested; the `*_available` methods report how many bytes the next
/// call can move without blocking. The framer only ever requests transfers
/// within the reported budget, so a short transfer signals a transport
/// fault rather than backpressure.
pub trait PacketStream {
    /// Number of bytes that can be read right now without blocking.
    fn read_available(&self) -> usize;

    /// Read a single byte, or `None` if nothing is available or the
    /// transport failed.
    fn read_byte(&mut self) -> Option<u8>;

    /// Read up to `buf.len()` bytes into `buf`, returning how many were
    /// actually read. Never blocks.
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize;

    /// Number of bytes that can be written right now without blocking.
    fn write_available(&self) -> usize;

    /// Write a single byte, returning 1 on success and 0 if the sink
    /// accepted nothing.
    fn write_byte(&mut self, byte: u8) -> usize;

    /// Write up to `bytes.len()` bytes, returning how many were actually
    /// written. Never blocks.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize;
}

//! In-memory [`PacketStream`] backed by two fixed byte slices.
//!
//! `BufferStream` reads from one borrowed slice and writes into another,
//! each behind its own cursor. It behaves exactly like a live transport as
//! far as the framer is concerned, which makes it both a deterministic test
//! vehicle and a way to frame into or out of pre-staged memory.

use crate::stream::PacketStream;

/// A packet stream over two fixed buffers with independent cursors.
pub struct BufferStream<'a> {
    source: &'a [u8],
    read_pos: usize,
    sink: &'a mut [u8],
    write_pos: usize,
}

impl<'a> BufferStream<'a> {
    /// Create a stream that reads from `source` and writes into `sink`.
    #[must_use]
    pub fn new(source: &'a [u8], sink: &'a mut [u8]) -> Self {
        Self {
            source,
            read_pos: 0,
            sink,
            write_pos: 0,
        }
    }

    /// Number of source bytes consumed so far.
    #[inline]
    #[must_use]
    pub fn read_consumed(&self) -> usize {
        self.read_pos
    }

    /// The bytes written into the sink so far.
    #[inline]
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.sink[..self.write_pos]
    }
}

impl PacketStream for BufferStream<'_> {
    #[inline]
    fn read_available(&self) -> usize {
        self.source.len() - self.read_pos
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.source.get(self.read_pos)?;
        self.read_pos += 1;
        Some(byte)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.read_available());
        buf[..n].copy_from_slice(&self.source[self.read_pos..self.read_pos + n]);
        self.read_pos += n;
        n
    }

    #[inline]
    fn write_available(&self) -> usize {
        self.sink.len() - self.write_pos
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        if self.write_pos < self.sink.len() {
            self.sink[self.write_pos] = byte;
            self.write_pos += 1;
            1
        } else {
            0
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.write_available());
        self.sink[self.write_pos..self.write_pos + n].copy_from_slice(&bytes[..n]);
        self.write_pos += n;
        n
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_read_cursor_advances() {
        let source = [1u8, 2, 3, 4, 5];
        let mut sink = [0u8; 0];
        let mut stream = BufferStream::new(&source, &mut sink);

        assert_eq!(stream.read_available(), 5);
        assert_eq!(stream.read_byte(), Some(1));
        assert_eq!(stream.read_available(), 4);

        let mut buf = [0u8; 3];
        assert_eq!(stream.read_bytes(&mut buf), 3);
        assert_eq!(buf, [2, 3, 4]);
        assert_eq!(stream.read_consumed(), 4);
    }

    #[test]
    fn test_read_exhaustion() {
        let source = [9u8];
        let mut sink = [0u8; 0];
        let mut stream = BufferStream::new(&source, &mut sink);

        assert_eq!(stream.read_byte(), Some(9));
        assert_eq!(stream.read_byte(), None);
        assert_eq!(stream.read_available(), 0);

        let mut buf = [0u8; 4];
        assert_eq!(stream.read_bytes(&mut buf), 0);
    }

    #[test]
    fn test_short_read_into_large_buffer() {
        let source = [1u8, 2];
        let mut sink = [0u8; 0];
        let mut stream = BufferStream::new(&source, &mut sink);

        let mut buf = [0u8; 8];
        assert_eq!(stream.read_bytes(&mut buf), 2);
        assert_eq!(&buf[..2], &[1, 2]);
    }

    #[test]
    fn test_write_cursor_advances() {
        let source = [0u8; 0];
        let mut sink = [0u8; 4];
        let mut stream = BufferStream::new(&source, &mut sink);

        assert_eq!(stream.write_available(), 4);
        assert_eq!(stream.write_byte(0xAA), 1);
        assert_eq!(stream.write_bytes(&[0xBB, 0xCC]), 2);
        assert_eq!(stream.written(), &[0xAA, 0xBB, 0xCC]);
        assert_eq!(stream.write_available(), 1);
    }

    #[test]
    fn test_short_write_when_sink_fills() {
        let source = [0u8; 0];
        let mut sink = [0u8; 2];
        let mut stream = BufferStream::new(&source, &mut sink);

        assert_eq!(stream.write_bytes(&[1, 2, 3, 4]), 2);
        assert_eq!(stream.write_byte(5), 0);
        assert_eq!(stream.written(), &[1, 2]);
    }

    #[test]
    fn test_read_and_write_cursors_are_independent() {
        let source = [10u8, 20];
        let mut sink = [0u8; 2];
        let mut stream = BufferStream::new(&source, &mut sink);

        assert_eq!(stream.write_byte(99), 1);
        assert_eq!(stream.read_byte(), Some(10));
        assert_eq!(stream.read_byte(), Some(20));
        assert_eq!(stream.written(), &[99]);
    }
}

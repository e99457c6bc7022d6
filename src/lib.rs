//! Delimited byte framing with CRC-16 guards over non-blocking streams.
//!
//! This crate frames opaque payloads for transport over byte-oriented links
//! (UART, sockets, in-memory buffers) and recovers them on the other side:
//!
//! - **Configuration**: Describe the frame layout once, up front
//!   - [`Config`] - Validated delimiter, field widths, payload limit, guards
//!
//! - **Streaming**: Incremental, non-blocking framing over any transport
//!   - [`Framer`] - Resumable receive/send state machines
//!   - [`PacketStream`] - The transport capability the framer drives
//!   - [`BufferStream`] - In-memory stream over two fixed slices
//!
//! - **One-shot**: Whole frames already materialized in memory
//!   - [`encode_to_buffer()`] / [`decode_from_buffer()`]
//!
//! # Frame Format
//!
//! ```text
//! | delimiter | message type | payload size | header CRC | payload | payload CRC |
//! |  1 byte   |  1/2/4 bytes |  1/2/4 bytes | 2 bytes    | N bytes | 2 bytes     |
//! ```
//!
//! - `delimiter` - Configured marker byte; receivers scan for it to find
//!   frame starts and to resynchronize after corruption
//! - `message type` - Application-defined tag, big-endian, configured width
//! - `payload size` - Payload byte count, big-endian, configured width
//! - `header CRC` - CRC-16/KERMIT of delimiter through payload size,
//!   transmitted least-significant byte first (present when guards are on)
//! - `payload CRC` - CRC-16/KERMIT of the payload bytes, same encoding
//!
//! Receivers verify each guard by folding the received CRC bytes into the
//! running checksum and checking for a zero residue, so the header's length
//! field is never trusted before it has been validated.
//!
//! # Examples
//!
//! ## One-shot encode and decode
//!
//! ```
//! use byteframe::{decode_from_buffer, encode_to_buffer, Config, PayloadInfo};
//!
//! let config = Config::new(b'|', 1, 2, 2048, true).unwrap();
//! let payload = b"Hello World!\0";
//! let info = PayloadInfo { message_type: 1, payload_size: payload.len() };
//!
//! let mut frame = [0u8; 64];
//! let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();
//! assert_eq!(len, 21);
//!
//! let (decoded, offset) = decode_from_buffer(&config, &frame[..len]).unwrap();
//! assert_eq!(decoded, info);
//! assert_eq!(&frame[offset..offset + decoded.payload_size], payload);
//! ```
//!
//! ## Incremental receive over a stream
//!
//! ```
//! use byteframe::{BufferStream, Config, Framer, PayloadInfo, ReceiveStatus};
//!
//! let config = Config::new(b'|', 1, 2, 2048, true).unwrap();
//! let mut framer = Framer::new(config);
//!
//! // Stage a frame, preceded by line noise the receiver must skip.
//! let payload = b"sensor reading";
//! let info = PayloadInfo { message_type: 4, payload_size: payload.len() };
//! let mut wire = [0u8; 64];
//! wire[..3].copy_from_slice(b"\xFF\x00\x42");
//! let len = 3 + framer.encode_to_buffer(info, payload, &mut wire[3..]).unwrap();
//!
//! let mut sink = [0u8; 0];
//! let mut stream = BufferStream::new(&wire[..len], &mut sink);
//! let mut received = [0u8; 2048];
//!
//! // One call suffices here because every byte is already available; over
//! // a live link the same call is simply repeated as bytes trickle in.
//! let status = framer.receive_payload(&mut stream, &mut received).unwrap();
//! assert_eq!(status, ReceiveStatus::Complete(info));
//! assert_eq!(&received[..info.payload_size], payload);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Derive defmt formatting on public types (for embedded logging)
//! - **`heapless`**: Enable `encode_to_vec()` helpers
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations; all
//! payload and frame buffers are borrowed from the caller.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod buffered;
pub mod config;
pub mod crc;
pub mod framer;
pub mod oneshot;
pub mod stream;
pub mod types;
pub mod wire;

// Re-export the working set at the crate root for convenience
pub use buffered::BufferStream;
pub use config::{Config, ConfigError, CRC_SIZE, DELIMITER_SIZE};
pub use crc::{calculate_crc16, verify_residue, Crc16Digest};
pub use framer::Framer;
pub use oneshot::{decode_from_buffer, encode_to_buffer};
pub use stream::PacketStream;
pub use types::{FrameError, PayloadInfo, ReceiveStatus, SendStatus};
pub use wire::FieldWidth;

#[cfg(feature = "heapless")]
pub use oneshot::encode_to_vec;

//! One-shot buffer-to-buffer frame encode and decode.
//!
//! These are pure functions of the configuration and their inputs: no
//! cursor, no partial progress, no stream. Use them when a whole frame is
//! already materialized in memory, for example when staging a frame before
//! a DMA transfer or validating one captured from a trace.
//!
//! The streaming equivalents live in [`crate::framer`].

use crate::config::{Config, CRC_SIZE};
use crate::crc::{calculate_crc16, verify_residue};
use crate::types::{FrameError, PayloadInfo};
use crate::wire::{decode_be, encode_be};

/// Encode a complete frame into `frame`, returning the encoded size.
///
/// The frame is rejected up front if it cannot fit: nothing is written on
/// error.
///
/// # Errors
///
/// - [`FrameError::InvalidMessageType`] if the message type exceeds the
///   configured field width.
/// - [`FrameError::InvalidPayloadSize`] if `info.payload_size` is zero,
///   over the configured limit, or disagrees with `payload.len()`.
/// - [`FrameError::BufferTooSmall`] if `frame` cannot hold the whole frame.
pub fn encode_to_buffer(
    config: &Config,
    info: PayloadInfo,
    payload: &[u8],
    frame: &mut [u8],
) -> Result<usize, FrameError> {
    if info.message_type > config.max_message_type() {
        return Err(FrameError::InvalidMessageType);
    }
    if info.payload_size == 0
        || info.payload_size > config.max_payload_size()
        || info.payload_size != payload.len()
    {
        return Err(FrameError::InvalidPayloadSize);
    }
    let total = config.frame_size(info.payload_size);
    if frame.len() < total {
        return Err(FrameError::BufferTooSmall);
    }

    let mut pos = 0;
    frame[pos] = config.delimiter();
    pos += 1;
    pos += encode_be(info.message_type, config.message_type_width(), &mut frame[pos..]);
    pos += encode_be(
        info.payload_size as u32,
        config.payload_size_width(),
        &mut frame[pos..],
    );

    if config.use_crc() {
        let crc = calculate_crc16(&frame[..config.header_size()]).to_le_bytes();
        frame[pos..pos + CRC_SIZE].copy_from_slice(&crc);
        pos += CRC_SIZE;
    }

    frame[pos..pos + info.payload_size].copy_from_slice(payload);
    pos += info.payload_size;

    if config.use_crc() {
        let crc = calculate_crc16(payload).to_le_bytes();
        frame[pos..pos + CRC_SIZE].copy_from_slice(&crc);
        pos += CRC_SIZE;
    }

    debug_assert_eq!(pos, total);
    Ok(pos)
}

/// Encode a complete frame into a new `heapless::Vec`.
#[cfg(feature = "heapless")]
pub fn encode_to_vec<const N: usize>(
    config: &Config,
    info: PayloadInfo,
    payload: &[u8],
) -> Result<heapless::Vec<u8, N>, FrameError> {
    let mut vec = heapless::Vec::new();
    // Resize to full capacity to give encode_to_buffer room to write.
    vec.resize(N, 0).map_err(|_| FrameError::BufferTooSmall)?;
    let len = encode_to_buffer(config, info, payload, &mut vec)?;
    vec.truncate(len);
    Ok(vec)
}

/// Decode and validate a complete frame, returning the header contents and
/// the offset of the payload within `frame`.
///
/// No bytes are copied: callers index into `frame` at the returned offset.
/// Bytes trailing the frame are ignored, so decoding straight out of a
/// larger receive buffer is fine.
///
/// # Errors
///
/// - [`FrameError::TruncatedFrame`] if `frame` is smaller than any
///   well-formed frame under this configuration.
/// - [`FrameError::MissingDelimiter`] if the first byte is not the
///   delimiter.
/// - [`FrameError::HeaderCrcMismatch`] if the header guard fails its
///   residue check (checked before the size field is trusted).
/// - [`FrameError::InvalidPayloadSize`] if the decoded size is zero, over
///   the configured limit, or larger than the bytes present.
/// - [`FrameError::PayloadCrcMismatch`] if the payload guard fails its
///   residue check.
pub fn decode_from_buffer(
    config: &Config,
    frame: &[u8],
) -> Result<(PayloadInfo, usize), FrameError> {
    if frame.len() < config.min_frame_size() {
        return Err(FrameError::TruncatedFrame);
    }
    if frame[0] != config.delimiter() {
        return Err(FrameError::MissingDelimiter);
    }

    let mut pos = 1;
    let message_type = decode_be(&frame[pos..], config.message_type_width());
    pos += config.message_type_width().bytes();
    let payload_size = decode_be(&frame[pos..], config.payload_size_width()) as usize;

    // Reject a corrupted header before trusting its length field.
    if config.use_crc() && !verify_residue(&frame[..config.header_size() + CRC_SIZE]) {
        return Err(FrameError::HeaderCrcMismatch);
    }

    let overhead = config.frame_size(0);
    if payload_size == 0
        || payload_size > config.max_payload_size()
        || payload_size > frame.len() - overhead
    {
        return Err(FrameError::InvalidPayloadSize);
    }

    let payload_offset = config.payload_offset();
    if config.use_crc()
        && !verify_residue(&frame[payload_offset..payload_offset + payload_size + CRC_SIZE])
    {
        return Err(FrameError::PayloadCrcMismatch);
    }

    Ok((
        PayloadInfo {
            message_type,
            payload_size,
        },
        payload_offset,
    ))
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    fn config_crc() -> Config {
        Config::new(b'|', 1, 2, 2048, true).unwrap()
    }

    fn config_plain() -> Config {
        Config::new(b'|', 1, 2, 2048, false).unwrap()
    }

    #[test]
    fn test_hello_world_frame_size() {
        let config = config_crc();
        let payload = b"Hello World!\0";
        assert_eq!(payload.len(), 13);

        let info = PayloadInfo {
            message_type: 1,
            payload_size: payload.len(),
        };
        let mut frame = [0u8; 64];
        let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();

        // delimiter + type + size + header crc + payload + payload crc
        assert_eq!(len, 1 + 1 + 2 + 2 + 13 + 2);
        assert_eq!(frame[0], b'|');
        assert_eq!(frame[1], 1);
        // 13 big-endian in two bytes
        assert_eq!(&frame[2..4], &[0x00, 0x0D]);

        let (decoded, offset) = decode_from_buffer(&config, &frame[..len]).unwrap();
        assert_eq!(decoded.message_type, 1);
        assert_eq!(decoded.payload_size, 13);
        assert_eq!(&frame[offset..offset + decoded.payload_size], payload);
    }

    #[test]
    fn test_round_trip_without_crc() {
        let config = config_plain();
        let payload = b"opaque bytes";
        let info = PayloadInfo {
            message_type: 0xAB,
            payload_size: payload.len(),
        };
        let mut frame = [0u8; 64];
        let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();
        assert_eq!(len, 1 + 1 + 2 + payload.len());

        let (decoded, offset) = decode_from_buffer(&config, &frame[..len]).unwrap();
        assert_eq!(decoded, info);
        assert_eq!(&frame[offset..offset + decoded.payload_size], payload);
    }

    #[test]
    fn test_round_trip_all_width_combinations() {
        let payload = b"W";
        for &mt_width in &[1u8, 2, 4] {
            for &ps_width in &[1u8, 2, 4] {
                for &use_crc in &[false, true] {
                    let config = Config::new(0x7E, mt_width, ps_width, 200, use_crc).unwrap();
                    let info = PayloadInfo {
                        message_type: config.max_message_type(),
                        payload_size: 1,
                    };
                    let mut frame = [0u8; 32];
                    let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();
                    let (decoded, offset) = decode_from_buffer(&config, &frame[..len]).unwrap();
                    assert_eq!(decoded, info);
                    assert_eq!(&frame[offset..offset + 1], payload);
                }
            }
        }
    }

    #[test]
    fn test_encode_rejects_oversized_message_type() {
        let config = config_crc();
        let info = PayloadInfo {
            message_type: 256,
            payload_size: 1,
        };
        let mut frame = [0u8; 32];
        assert_eq!(
            encode_to_buffer(&config, info, b"x", &mut frame),
            Err(FrameError::InvalidMessageType)
        );
    }

    #[test]
    fn test_encode_rejects_bad_payload_sizes() {
        let config = config_crc();
        let mut frame = [0u8; 4096];

        let zero = PayloadInfo {
            message_type: 1,
            payload_size: 0,
        };
        assert_eq!(
            encode_to_buffer(&config, zero, b"", &mut frame),
            Err(FrameError::InvalidPayloadSize)
        );

        let big = [0u8; 2049];
        let over = PayloadInfo {
            message_type: 1,
            payload_size: big.len(),
        };
        assert_eq!(
            encode_to_buffer(&config, over, &big, &mut frame),
            Err(FrameError::InvalidPayloadSize)
        );

        // Declared size must match the payload slice.
        let mismatched = PayloadInfo {
            message_type: 1,
            payload_size: 4,
        };
        assert_eq!(
            encode_to_buffer(&config, mismatched, b"xyz", &mut frame),
            Err(FrameError::InvalidPayloadSize)
        );
    }

    #[test]
    fn test_encode_rejects_small_destination() {
        let config = config_crc();
        let payload = b"twelve bytes";
        let info = PayloadInfo {
            message_type: 1,
            payload_size: payload.len(),
        };
        let needed = config.frame_size(payload.len());

        let mut frame = [0u8; 64];
        assert_eq!(
            encode_to_buffer(&config, info, payload, &mut frame[..needed - 1]),
            Err(FrameError::BufferTooSmall)
        );
        assert!(encode_to_buffer(&config, info, payload, &mut frame[..needed]).is_ok());
    }

    #[test]
    fn test_decode_rejects_truncated_source() {
        let config = config_crc();
        assert_eq!(
            decode_from_buffer(&config, &[b'|', 1, 0, 1]),
            Err(FrameError::TruncatedFrame)
        );
    }

    #[test]
    fn test_decode_rejects_wrong_delimiter() {
        let config = config_crc();
        let payload = b"payload";
        let info = PayloadInfo {
            message_type: 1,
            payload_size: payload.len(),
        };
        let mut frame = [0u8; 32];
        let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();
        frame[0] = b'#';
        assert_eq!(
            decode_from_buffer(&config, &frame[..len]),
            Err(FrameError::MissingDelimiter)
        );
    }

    #[test]
    fn test_decode_rejects_length_beyond_buffer() {
        // Without CRC the size field is the only defense; a frame whose
        // declared size exceeds the bytes present must be rejected.
        let config = config_plain();
        let payload = b"abcdef";
        let info = PayloadInfo {
            message_type: 1,
            payload_size: payload.len(),
        };
        let mut frame = [0u8; 32];
        let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();
        assert_eq!(
            decode_from_buffer(&config, &frame[..len - 1]),
            Err(FrameError::InvalidPayloadSize)
        );
    }

    #[test]
    fn test_decode_tolerates_trailing_slack() {
        let config = config_crc();
        let payload = b"short";
        let info = PayloadInfo {
            message_type: 7,
            payload_size: payload.len(),
        };
        let mut frame = [0u8; 64];
        encode_to_buffer(&config, info, payload, &mut frame).unwrap();

        // Decode from the whole receive buffer, not the exact frame.
        let (decoded, offset) = decode_from_buffer(&config, &frame).unwrap();
        assert_eq!(decoded, info);
        assert_eq!(&frame[offset..offset + decoded.payload_size], payload);
    }

    #[test]
    fn test_single_bit_corruption_always_detected() {
        let config = config_crc();
        let payload = b"integrity matters";
        let info = PayloadInfo {
            message_type: 42,
            payload_size: payload.len(),
        };
        let mut frame = [0u8; 64];
        let len = encode_to_buffer(&config, info, payload, &mut frame).unwrap();

        let header_region = config.header_size() + CRC_SIZE;
        let mut seen: Vec<FrameError> = Vec::new();
        for bit in 0..(len * 8) {
            let mut corrupted = [0u8; 64];
            corrupted[..len].copy_from_slice(&frame[..len]);
            corrupted[bit / 8] ^= 1 << (bit % 8);

            let err = decode_from_buffer(&config, &corrupted[..len])
                .expect_err("corrupted frame decoded");
            if bit / 8 >= header_region {
                assert_eq!(err, FrameError::PayloadCrcMismatch, "bit {}", bit);
            } else if bit / 8 == 0 {
                // Delimiter damage is caught before any CRC runs.
                assert_eq!(err, FrameError::MissingDelimiter, "bit {}", bit);
            } else {
                assert_eq!(err, FrameError::HeaderCrcMismatch, "bit {}", bit);
            }
            seen.push(err);
        }
        assert!(seen.contains(&FrameError::HeaderCrcMismatch));
        assert!(seen.contains(&FrameError::PayloadCrcMismatch));
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_encode_to_vec() {
        let config = config_crc();
        let payload = b"vec payload";
        let info = PayloadInfo {
            message_type: 3,
            payload_size: payload.len(),
        };
        let vec = encode_to_vec::<64>(&config, info, payload).unwrap();
        assert_eq!(vec.len(), config.frame_size(payload.len()));

        let (decoded, offset) = decode_from_buffer(&config, &vec).unwrap();
        assert_eq!(decoded, info);
        assert_eq!(&vec[offset..offset + decoded.payload_size], payload);
    }
}

//! Synthetic WAV bytes for tests.

use alloc::vec::Vec;

pub(crate) struct Spec {
    pub chunk_size: u32,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl Default for Spec {
    fn default() -> Self {
        Spec {
            chunk_size: 36,
            num_channels: 1,
            sample_rate: 44_100,
            byte_rate: 88_200,
            block_align: 2,
            bits_per_sample: 16,
            data_size: 0,
        }
    }
}

/// 44 byte canonical header
pub(crate) fn header(spec: &Spec) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(44);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&spec.chunk_size.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&spec.num_channels.to_le_bytes());
    bytes.extend_from_slice(&spec.sample_rate.to_le_bytes());
    bytes.extend_from_slice(&spec.byte_rate.to_le_bytes());
    bytes.extend_from_slice(&spec.block_align.to_le_bytes());
    bytes.extend_from_slice(&spec.bits_per_sample.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&spec.data_size.to_le_bytes());
    bytes
}

/// Complete 16 bit file with interleaved little-endian samples
pub(crate) fn pcm16(samples: &[i16], num_channels: u16) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;
    let spec = Spec {
        chunk_size: 36 + data_size,
        num_channels,
        byte_rate: 44_100 * 2 * num_channels as u32,
        block_align: 2 * num_channels,
        data_size,
        ..Spec::default()
    };

    let mut bytes = header(&spec);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Which byte-level behaviour the decoder follows.
///
/// `Standard` reads the canonical layout. `Legacy` matches files and callers
/// produced against the older decoder, which read the data size as a 16 bit
/// field, decoded samples big-endian and skipped the requested offset before
/// every sample.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Compatibility {
    /// 44 byte header, little-endian samples, sequential frames
    #[default]
    Standard,
    /// 42 byte header, big-endian samples, offset skipped per sample
    Legacy,
}

impl Compatibility {
    /// Number of bytes the data size field occupies
    pub fn data_size_width(self) -> usize {
        match self {
            Compatibility::Standard => 4,
            Compatibility::Legacy => 2,
        }
    }

    pub(crate) fn skips_per_sample(self) -> bool {
        self == Compatibility::Legacy
    }

    pub(crate) fn decode_i16(self, bytes: [u8; 2]) -> i16 {
        match self {
            Compatibility::Standard => i16::from_le_bytes(bytes),
            Compatibility::Legacy => i16::from_be_bytes(bytes),
        }
    }
}

/// Decoder configuration
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Options {
    /// byte-level behaviour, see [`Compatibility`]
    pub compatibility: Compatibility,
    /// size of the staging buffer used when copying a whole file into memory
    pub staging_buffer_size: usize,
}

impl Options {
    /// Options reproducing the older decoder
    pub fn legacy() -> Self {
        Options {
            compatibility: Compatibility::Legacy,
            ..Options::default()
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            compatibility: Compatibility::Standard,
            staging_buffer_size: 1024,
        }
    }
}

use crate::codec::{bytes_to_int, le_u16, le_u32};
use crate::error::Error;
use crate::options::{Compatibility, Options};
use core::fmt;

#[cfg(feature = "io")]
use crate::error::ReadError;

/// "RIFF" in ascii
pub const RIFF_CHUNK_ID: u32 = 0x5249_4646;
/// "WAVE" in ascii
pub const WAVE_FORMAT: u32 = 0x5741_5645;
/// "fmt " in ascii
pub const SUBCHUNK1_ID: u32 = 0x666d_7420;
/// Size of the fmt chunk body for plain PCM
pub const SUBCHUNK1_SIZE: u32 = 16;
/// Uncompressed PCM
pub const AUDIO_FORMAT_PCM: u32 = 1;
/// Mono or stereo
pub const MAX_CHANNELS: u32 = 2;
/// "data" in ascii
pub const SUBCHUNK2_ID: u32 = 0x6461_7461;
/// Sample data starts right after the canonical header
pub const HEADER_LEN: usize = 44;

/// Fields of the canonical header, in file order
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Field {
    /// "RIFF"
    ChunkId,
    /// size of everything after this field
    ChunkSize,
    /// "WAVE"
    Format,
    /// "fmt "
    Subchunk1Id,
    /// 16 for PCM
    Subchunk1Size,
    /// 1 for PCM
    AudioFormat,
    /// 1 or 2
    NumChannels,
    /// frames per second
    SampleRate,
    /// bytes per second
    ByteRate,
    /// bytes per frame
    BlockAlign,
    /// bits per sample
    BitsPerSample,
    /// "data"
    Subchunk2Id,
    /// number of sample bytes
    Subchunk2Size,
}

impl Field {
    /// Every field, in the order it is read
    pub const ALL: [Field; 13] = [
        Field::ChunkId,
        Field::ChunkSize,
        Field::Format,
        Field::Subchunk1Id,
        Field::Subchunk1Size,
        Field::AudioFormat,
        Field::NumChannels,
        Field::SampleRate,
        Field::ByteRate,
        Field::BlockAlign,
        Field::BitsPerSample,
        Field::Subchunk2Id,
        Field::Subchunk2Size,
    ];

    /// Number of bytes this field occupies in the input
    pub fn width(self, compatibility: Compatibility) -> usize {
        match self {
            Field::AudioFormat | Field::NumChannels | Field::BlockAlign | Field::BitsPerSample => 2,
            Field::Subchunk2Size => compatibility.data_size_width(),
            _ => 4,
        }
    }

    fn is_tag(self) -> bool {
        matches!(
            self,
            Field::ChunkId | Field::Format | Field::Subchunk1Id | Field::Subchunk2Id
        )
    }

    // Tags compare against their ascii constants, numbers are little-endian.
    fn decode(self, bytes: &[u8]) -> u32 {
        match *bytes {
            [a, b, c, d] if self.is_tag() => bytes_to_int([a, b, c, d]),
            [a, b, c, d] => le_u32([a, b, c, d]),
            [a, b] => le_u16([a, b]) as u32,
            _ => 0,
        }
    }

    fn check(self, value: u32) -> Result<u32, Error> {
        let valid = match self {
            Field::ChunkId => value == RIFF_CHUNK_ID,
            Field::Format => value == WAVE_FORMAT,
            Field::Subchunk1Id => value == SUBCHUNK1_ID,
            Field::Subchunk1Size => value == SUBCHUNK1_SIZE,
            Field::AudioFormat => value == AUDIO_FORMAT_PCM,
            Field::NumChannels => value <= MAX_CHANNELS,
            Field::Subchunk2Id => value == SUBCHUNK2_ID,
            _ => true,
        };

        if valid {
            Ok(value)
        } else {
            Err(Error::InvalidFormat { field: self, value })
        }
    }

    pub(crate) fn rejection(self) -> &'static str {
        match self {
            Field::ChunkId => "not a valid RIFF file",
            Field::Format => "invalid WAV format",
            Field::Subchunk1Id => "invalid subchunk 1 id",
            Field::Subchunk1Size => "non PCM files are not supported",
            Field::AudioFormat => "compressed wave files are not supported",
            Field::NumChannels => "invalid number of channels",
            Field::Subchunk2Id => "invalid data header",
            _ => "invalid field",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::ChunkId => "ChunkID",
            Field::ChunkSize => "ChunkSize",
            Field::Format => "Format",
            Field::Subchunk1Id => "Subchunk1ID",
            Field::Subchunk1Size => "Subchunk1Size",
            Field::AudioFormat => "AudioFormat",
            Field::NumChannels => "NumChannels",
            Field::SampleRate => "SampleRate",
            Field::ByteRate => "ByteRate",
            Field::BlockAlign => "BlockAlign",
            Field::BitsPerSample => "BitsPerSample",
            Field::Subchunk2Id => "Subchunk2ID",
            Field::Subchunk2Size => "Subchunk2Size",
        };
        f.write_str(name)
    }
}

/// Forward-only state machine over the header fields.
///
/// Each call to [`HeaderParser::feed`] consumes exactly the bytes of the field
/// returned by [`HeaderParser::expected`]. Nothing is kept when a field fails,
/// the caller drops the parser.
pub(crate) struct HeaderParser {
    compatibility: Compatibility,
    state: usize,
    values: [u32; 13],
}

impl HeaderParser {
    pub(crate) fn new(compatibility: Compatibility) -> Self {
        Self {
            compatibility,
            state: 0,
            values: [0; 13],
        }
    }

    /// The next field and its width, `None` once the header is complete
    pub(crate) fn expected(&self) -> Option<(Field, usize)> {
        Field::ALL
            .get(self.state)
            .map(|&field| (field, field.width(self.compatibility)))
    }

    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Some((field, width)) = self.expected() else {
            return Ok(());
        };
        if bytes.len() < width {
            return Err(Error::TruncatedHeader { field });
        }

        self.values[self.state] = field.check(field.decode(&bytes[..width]))?;
        self.state += 1;
        Ok(())
    }

    pub(crate) fn finish(self) -> WavHeader {
        let v = self.values;
        WavHeader {
            chunk_id: v[0],
            chunk_size: v[1],
            format: v[2],
            subchunk1_id: v[3],
            subchunk1_size: v[4],
            audio_format: v[5] as u16,
            num_channels: v[6] as u16,
            sample_rate: v[7],
            byte_rate: v[8],
            block_align: v[9] as u16,
            bits_per_sample: v[10] as u16,
            subchunk2_id: v[11],
            subchunk2_size: v[12],
            header_len: Field::ALL
                .iter()
                .map(|f| f.width(self.compatibility))
                .sum(),
        }
    }
}

/// Validated canonical WAV header
///
/// for more information see [`here`]
///
/// [`here`]: http://soundfile.sapp.org/doc/WaveFormat/
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct WavHeader {
    /// always [`RIFF_CHUNK_ID`]
    pub chunk_id: u32,
    /// size of the file minus the first 8 bytes
    pub chunk_size: u32,
    /// always [`WAVE_FORMAT`]
    pub format: u32,
    /// always [`SUBCHUNK1_ID`]
    pub subchunk1_id: u32,
    /// always [`SUBCHUNK1_SIZE`]
    pub subchunk1_size: u32,
    /// always [`AUDIO_FORMAT_PCM`]
    pub audio_format: u16,
    /// number of interleaved channels, at most 2
    pub num_channels: u16,
    /// sample rate, typical values are `44_100` or `48_000`
    pub sample_rate: u32,
    /// bytes per second
    pub byte_rate: u32,
    /// bytes per frame across all channels
    pub block_align: u16,
    /// bit depth for each sample, only 16 bit samples decode to non zero values
    pub bits_per_sample: u16,
    /// always [`SUBCHUNK2_ID`]
    pub subchunk2_id: u32,
    /// number of sample bytes
    pub subchunk2_size: u32,
    header_len: usize,
}

impl WavHeader {
    /// Parse the canonical header at the start of `bytes`.
    ///
    /// ```
    /// use wavfile::WavHeader;
    ///
    /// let bytes: [u8; 44] = [
    ///     0x52, 0x49, 0x46, 0x46, // RIFF
    ///     0x24, 0x00, 0x00, 0x00, // chunk size
    ///     0x57, 0x41, 0x56, 0x45, // WAVE
    ///     0x66, 0x6d, 0x74, 0x20, // fmt_
    ///     0x10, 0x00, 0x00, 0x00, // chunk size
    ///     0x01, 0x00, // audio format
    ///     0x01, 0x00, // num channels
    ///     0x80, 0xbb, 0x00, 0x00, // sample rate
    ///     0x00, 0x77, 0x01, 0x00, // byte rate
    ///     0x02, 0x00, // block align
    ///     0x10, 0x00, // bits per sample
    ///     0x64, 0x61, 0x74, 0x61, // data
    ///     0x00, 0x00, 0x00, 0x00, // chunk size
    /// ];
    ///
    /// let header = WavHeader::from_bytes(&bytes).unwrap();
    /// assert_eq!(header.sample_rate, 48_000);
    /// assert!(!header.is_stereo());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_bytes_with(bytes, &Options::default())
    }

    /// Parse the header at the start of `bytes` with explicit [`Options`]
    pub fn from_bytes_with(bytes: &[u8], options: &Options) -> Result<Self, Error> {
        let mut parser = HeaderParser::new(options.compatibility);
        let mut pos = 0;

        while let Some((field, width)) = parser.expected() {
            let chunk = bytes
                .get(pos..pos + width)
                .ok_or(Error::TruncatedHeader { field })?;
            parser.feed(chunk)?;
            pos += width;
        }

        Ok(parser.finish())
    }

    /// Parse the header from a reader, consuming exactly [`WavHeader::header_len`] bytes on success
    #[cfg(feature = "io")]
    pub fn from_reader<R: embedded_io::Read>(
        reader: &mut R,
        options: &Options,
    ) -> Result<Self, ReadError<R::Error>> {
        let mut parser = HeaderParser::new(options.compatibility);
        let mut buf = [0; 4];

        while let Some((field, width)) = parser.expected() {
            match reader.read_exact(&mut buf[..width]) {
                Ok(()) => {}
                Err(embedded_io::ReadExactError::UnexpectedEof) => {
                    return Err(ReadError::Parser(Error::TruncatedHeader { field }));
                }
                Err(embedded_io::ReadExactError::Other(e)) => return Err(ReadError::Reader(e)),
            }
            parser.feed(&buf[..width])?;
        }

        Ok(parser.finish())
    }

    /// Number of bytes the header occupied in the input
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// `true` for two channels
    pub fn is_stereo(&self) -> bool {
        self.num_channels == 2
    }

    /// Number of channels
    pub fn num_channels(&self) -> u16 {
        self.num_channels
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bits per sample
    pub fn bit_rate(&self) -> u16 {
        self.bits_per_sample
    }

    /// Bytes per second
    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    /// Bytes per frame
    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    /// Number of sample bytes declared by the data chunk
    pub fn data_size(&self) -> u32 {
        self.subchunk2_size
    }

    /// Size of the whole RIFF file, `chunk_size + 8`.
    ///
    /// The older decoder reported `subchunk1_size + 8` here, a constant 24 for
    /// every PCM file; this deliberately returns the real size instead.
    pub fn file_size(&self) -> u64 {
        self.chunk_size as u64 + 8
    }

    /// `chunk_size / block_align`, 0 when block align is 0
    pub fn num_frames(&self) -> u32 {
        self.chunk_size
            .checked_div(self.block_align as u32)
            .unwrap_or(0)
    }

    /// Bytes making up one sample of one channel
    pub fn bytes_per_sample(&self) -> usize {
        self.bits_per_sample as usize / 8
    }
}

impl fmt::Display for WavHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WavHeader {{")?;
        writeln!(f, "\tchunk_id={:#010x}", self.chunk_id)?;
        writeln!(f, "\tchunk_size={}", self.chunk_size)?;
        writeln!(f, "\tformat={:#010x}", self.format)?;
        writeln!(f, "\tsubchunk1_id={:#010x}", self.subchunk1_id)?;
        writeln!(f, "\tsubchunk1_size={}", self.subchunk1_size)?;
        writeln!(f, "\taudio_format={}", self.audio_format)?;
        writeln!(f, "\tnum_channels={}", self.num_channels)?;
        writeln!(f, "\tsample_rate={}", self.sample_rate)?;
        writeln!(f, "\tbyte_rate={}", self.byte_rate)?;
        writeln!(f, "\tblock_align={}", self.block_align)?;
        writeln!(f, "\tbits_per_sample={}", self.bits_per_sample)?;
        writeln!(f, "\tsubchunk2_id={:#010x}", self.subchunk2_id)?;
        writeln!(f, "\tsubchunk2_size={}", self.subchunk2_size)?;
        write!(f, "}}")
    }
}

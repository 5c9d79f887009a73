use crate::conversion::FromPcmSample;
use crate::header::WavHeader;
use crate::options::{Compatibility, Options};

/// Reads PCM samples from a reader positioned right after the header
pub struct FrameReader<R> {
    reader: R,
    header: WavHeader,
    compatibility: Compatibility,
    data_offset: u64,
}

impl<R> FrameReader<R>
where
    R: embedded_io::Read,
{
    /// Wrap `reader`, whose next byte is the first sample byte
    pub fn new(reader: R, header: WavHeader, options: &Options) -> Self {
        Self {
            reader,
            header,
            compatibility: options.compatibility,
            data_offset: 0,
        }
    }

    /// Header the samples are decoded against
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    /// Number of sample bytes read so far, skipped bytes excluded
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Give back the underlying reader at its current position
    pub fn into_inner(self) -> R {
        self.reader
    }

    // Reads and drops up to `count` bytes, returns how many were consumed.
    fn discard(&mut self, count: u64) -> Result<u64, R::Error> {
        let mut scratch = [0; 64];
        let mut consumed = 0;

        while consumed < count {
            let len = (count - consumed).min(scratch.len() as u64) as usize;
            match self.reader.read(&mut scratch[..len])? {
                0 => break,
                n => consumed += n as u64,
            }
        }

        Ok(consumed)
    }

    // Fills as much of `buf` as the reader has left.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, R::Error> {
        let mut filled = 0;

        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..])? {
                0 => break,
                n => filled += n,
            }
        }

        Ok(filled)
    }

    /// Skip `skip` bytes forward, then decode one sample.
    ///
    /// Only 16 bit samples decode, other depths consume their bytes and
    /// yield 0. Missing bytes at the end of the stream read as zero.
    pub fn read_sample(&mut self, skip: u64) -> Result<i64, R::Error> {
        let skipped = self.discard(skip)?;
        if skipped > 0 {
            log::trace!("skipped {} bytes of sample data", skipped);
        }

        if self.header.bits_per_sample == 16 {
            let mut buf = [0; 2];
            let read = self.fill(&mut buf)?;
            self.data_offset += read as u64;
            Ok(self.compatibility.decode_i16(buf) as i64)
        } else {
            let read = self.discard(self.header.bytes_per_sample() as u64)?;
            self.data_offset += read;
            Ok(0)
        }
    }

    /// Decode the first channel of the next frame and step over the rest of it.
    ///
    /// Advances `block_align` bytes (plus `skip`), or one sample when block
    /// align is smaller than a sample.
    pub fn read_frame(&mut self, skip: u64) -> Result<i64, R::Error> {
        let sample = self.read_sample(skip)?;

        let rest = (self.header.block_align as usize)
            .saturating_sub(self.header.bytes_per_sample());
        if rest > 0 {
            self.data_offset += self.discard(rest as u64)?;
        }

        Ok(sample)
    }

    /// Fill `buffer` with one normalized value per frame, starting at the current position.
    ///
    /// Returns how many of the produced values are non zero.
    pub fn read_frames<T>(&mut self, buffer: &mut [T]) -> Result<usize, R::Error>
    where
        T: FromPcmSample,
    {
        self.read_frames_with_offset(buffer, 0)
    }

    /// Like [`FrameReader::read_frames`], skipping `offset` bytes first.
    ///
    /// With [`Compatibility::Legacy`] each slot holds the next sample rather
    /// than the next frame, and the offset is skipped again before every sample.
    pub fn read_frames_with_offset<T>(
        &mut self,
        buffer: &mut [T],
        offset: u64,
    ) -> Result<usize, R::Error>
    where
        T: FromPcmSample,
    {
        let bits = self.header.bits_per_sample;
        let mut non_zero = 0;

        for (i, slot) in buffer.iter_mut().enumerate() {
            let sample = if self.compatibility.skips_per_sample() {
                self.read_sample(offset)?
            } else {
                self.read_frame(if i == 0 { offset } else { 0 })?
            };

            *slot = T::from_pcm(sample, bits);
            if !slot.is_zero() {
                non_zero += 1;
            }
        }

        Ok(non_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, Spec};
    use alloc::vec;

    fn reader_for<'a>(bytes: &'a [u8], options: &Options) -> FrameReader<&'a [u8]> {
        let mut reader = bytes;
        let header = WavHeader::from_reader(&mut reader, options).unwrap();
        FrameReader::new(reader, header, options)
    }

    #[test]
    fn test_incremental_reading() {
        let original_samples = vec![0, 16_384, -16_384, 32_767, -32_767, 1];
        let bytes = fixtures::pcm16(&original_samples, 1);
        let mut frames = reader_for(&bytes, &Options::default());

        let mut buffer = vec![0.0f64; original_samples.len()];
        let non_zero = frames.read_frames(&mut buffer).unwrap();

        assert_eq!(non_zero, 5);
        for (value, sample) in buffer.iter().zip(&original_samples) {
            assert!((value - *sample as f64 / 32_767.0).abs() < 1e-12);
        }
        assert_eq!(frames.data_offset(), 12);
    }

    #[test]
    fn stereo_slots_hold_one_frame_each() {
        let bytes = fixtures::pcm16(&[100, -100, 200, -200, 300, -300], 2);
        let mut frames = reader_for(&bytes, &Options::default());

        let mut buffer = [0.0f32; 2];
        assert_eq!(frames.read_frames(&mut buffer).unwrap(), 2);

        assert_eq!(buffer, [f32::from_pcm(100, 16), f32::from_pcm(200, 16)]);
        assert_eq!(frames.data_offset(), 8);

        // the next read starts on a frame boundary
        let mut next = [0.0f32; 1];
        frames.read_frames(&mut next).unwrap();
        assert_eq!(next, [f32::from_pcm(300, 16)]);
    }

    #[test]
    fn legacy_stereo_reads_every_sample() {
        let spec = Spec {
            num_channels: 2,
            block_align: 4,
            data_size: 8,
            ..Spec::default()
        };
        let mut bytes = fixtures::header(&spec);
        bytes.truncate(42);
        bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]);

        let options = Options::legacy();
        let mut frames = reader_for(&bytes, &options);

        let mut buffer = [0.0f64; 2];
        frames.read_frames(&mut buffer).unwrap();
        assert_eq!(buffer, [1.0 / 32_767.0, 2.0 / 32_767.0]);
    }

    #[test]
    fn frame_offset_is_skipped_once() {
        let bytes = fixtures::pcm16(&[1, -1, 2, -2, 3, -3], 2);
        let mut frames = reader_for(&bytes, &Options::default());

        let mut buffer = [0.0f64; 2];
        frames.read_frames_with_offset(&mut buffer, 4).unwrap();
        assert_eq!(buffer, [2.0 / 32_767.0, 3.0 / 32_767.0]);
    }

    #[test]
    fn offset_is_skipped_once() {
        let bytes = fixtures::pcm16(&[1, 2, 3, 4, 5], 1);
        let mut frames = reader_for(&bytes, &Options::default());

        let mut buffer = [0.0f64; 3];
        assert_eq!(frames.read_frames_with_offset(&mut buffer, 2).unwrap(), 3);

        assert_eq!(buffer, [2.0 / 32_767.0, 3.0 / 32_767.0, 4.0 / 32_767.0]);
        // skipped bytes do not count
        assert_eq!(frames.data_offset(), 6);
    }

    #[test]
    fn legacy_skips_before_every_sample() {
        let spec = Spec {
            data_size: 8,
            ..Spec::default()
        };
        let mut bytes = fixtures::header(&spec);
        bytes.truncate(42);
        bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]);

        let options = Options::legacy();
        let mut frames = reader_for(&bytes, &options);

        let mut buffer = [0.0f64; 2];
        frames.read_frames_with_offset(&mut buffer, 2).unwrap();

        assert_eq!(buffer, [2.0 / 32_767.0, 4.0 / 32_767.0]);
        assert_eq!(frames.data_offset(), 4);
    }

    #[test]
    fn reading_past_the_end_yields_silence() {
        let bytes = fixtures::pcm16(&[5], 1);
        let mut frames = reader_for(&bytes, &Options::default());

        let mut buffer = [1.0f64; 3];
        assert_eq!(frames.read_frames(&mut buffer).unwrap(), 1);
        assert_eq!(buffer[1..], [0.0, 0.0]);
        assert_eq!(frames.data_offset(), 2);
    }

    #[test]
    fn test_24bit_audio() {
        let spec = Spec {
            bits_per_sample: 24,
            block_align: 3,
            data_size: 6,
            ..Spec::default()
        };
        let mut bytes = fixtures::header(&spec);
        bytes.extend_from_slice(&[0x1e, 0xf3, 0x3c, 0x13, 0x3c, 0x14]);
        let mut frames = reader_for(&bytes, &Options::default());

        let mut buffer = [1.0f64; 2];
        assert_eq!(frames.read_frames(&mut buffer).unwrap(), 0);
        assert_eq!(buffer, [0.0, 0.0]);
        assert_eq!(frames.data_offset(), 6);
    }

    #[test]
    fn into_inner_keeps_position() {
        let bytes = fixtures::pcm16(&[7, 8], 1);
        let mut frames = reader_for(&bytes, &Options::default());

        assert_eq!(frames.read_sample(0).unwrap(), 7);
        let rest = frames.into_inner();
        assert_eq!(rest, &[8, 0]);
    }
}

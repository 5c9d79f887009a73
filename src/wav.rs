use crate::conversion::FromPcmSample;
use crate::error::{Error, ReadError};
use crate::frames::FrameReader;
use crate::header::WavHeader;
use crate::options::Options;
use crate::raw;
use alloc::vec::Vec;
use core::mem;
use std::path::{Path, PathBuf};

mod file_wrapper {
    use std::fs;
    use std::io::{self, BufReader, Read};
    use std::path::Path;
    use thiserror::Error;

    /// Buffered wrapper for std::fs::File, readable through `embedded_io`
    pub struct File(BufReader<fs::File>);

    impl File {
        /// Open `path` for buffered reading, e.g. to drive a
        /// [`FrameReader`](crate::FrameReader) without a [`WavFile`](crate::WavFile)
        pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
            fs::File::open(path).map(|f| File(BufReader::new(f)))
        }
    }

    /// I/O failure of the underlying file
    #[derive(Debug, Error)]
    #[error(transparent)]
    pub struct FileError(#[from] pub io::Error);

    impl embedded_io::Error for FileError {
        fn kind(&self) -> embedded_io::ErrorKind {
            match self.0.kind() {
                io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
                io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
                io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
                io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
                _ => embedded_io::ErrorKind::Other,
            }
        }
    }

    impl embedded_io::ErrorType for File {
        type Error = FileError;
    }

    impl embedded_io::Read for File {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            self.0.read(buf).map_err(FileError)
        }
    }
}

pub use file_wrapper::{File, FileError};

enum Input {
    Unopened(File),
    Opened(FrameReader<File>),
    Closed,
}

/// A WAV file on disk.
///
/// The input handle is opened by [`WavFile::new`], [`WavFile::open`] parses the
/// header from it and the frame readers continue from where the header ended.
pub struct WavFile {
    path: PathBuf,
    options: Options,
    input: Input,
}

impl WavFile {
    /// Open an input handle on `path` with default [`Options`]
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ReadError<FileError>> {
        Self::with_options(path, Options::default())
    }

    /// Open an input handle on `path`
    pub fn with_options(
        path: impl AsRef<Path>,
        options: Options,
    ) -> Result<Self, ReadError<FileError>> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| {
            log::warn!("failed to open {}: {}", path.display(), e);
            ReadError::Reader(FileError(e))
        })?;

        Ok(WavFile {
            path,
            options,
            input: Input::Unopened(file),
        })
    }

    /// Path this file was created with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the header from the current position of the input handle.
    ///
    /// On failure the file counts as never opened. Calling this again after a
    /// successful open reads from wherever the sample cursor stands.
    pub fn open(&mut self) -> Result<&WavHeader, ReadError<FileError>> {
        let mut file = match mem::replace(&mut self.input, Input::Closed) {
            Input::Unopened(file) => file,
            Input::Opened(frames) => frames.into_inner(),
            Input::Closed => return Err(Error::Closed.into()),
        };

        match WavHeader::from_reader(&mut file, &self.options) {
            Ok(header) => {
                log::debug!("opened {}: {}", self.path.display(), header);
                self.input = Input::Opened(FrameReader::new(file, header, &self.options));
            }
            Err(e) => {
                log::warn!("failed to read header of {}: {}", self.path.display(), e);
                self.input = Input::Unopened(file);
                return Err(e);
            }
        }

        self.header().ok_or(ReadError::Parser(Error::NotOpened))
    }

    /// Release the input handle
    pub fn close(&mut self) {
        if !matches!(self.input, Input::Closed) {
            log::debug!("closing {}", self.path.display());
        }
        self.input = Input::Closed;
    }

    /// `true` after a successful [`WavFile::open`] and before [`WavFile::close`]
    pub fn is_open(&self) -> bool {
        matches!(self.input, Input::Opened(_))
    }

    /// Parsed header, if open
    pub fn header(&self) -> Option<&WavHeader> {
        match &self.input {
            Input::Opened(frames) => Some(frames.header()),
            _ => None,
        }
    }

    /// `true` for two channels
    pub fn is_stereo(&self) -> Option<bool> {
        self.header().map(WavHeader::is_stereo)
    }

    /// Number of channels
    pub fn num_channels(&self) -> Option<u16> {
        self.header().map(WavHeader::num_channels)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> Option<u32> {
        self.header().map(WavHeader::sample_rate)
    }

    /// Bits per sample
    pub fn bit_rate(&self) -> Option<u16> {
        self.header().map(WavHeader::bit_rate)
    }

    /// RIFF chunk size plus the 8 bytes preceding it
    pub fn file_size(&self) -> Option<u64> {
        self.header().map(WavHeader::file_size)
    }

    /// `chunk_size / block_align`
    pub fn num_frames(&self) -> Option<u32> {
        self.header().map(WavHeader::num_frames)
    }

    /// Sample bytes read since the header
    pub fn data_offset(&self) -> u64 {
        match &self.input {
            Input::Opened(frames) => frames.data_offset(),
            _ => 0,
        }
    }

    fn frames(&mut self) -> Result<&mut FrameReader<File>, Error> {
        match &mut self.input {
            Input::Opened(frames) => Ok(frames),
            Input::Unopened(_) => Err(Error::NotOpened),
            Input::Closed => Err(Error::Closed),
        }
    }

    /// Fill `buffer` with one normalized value per frame (first channel),
    /// returns the number of non zero values
    pub fn read_frames<T>(&mut self, buffer: &mut [T]) -> Result<usize, ReadError<FileError>>
    where
        T: FromPcmSample,
    {
        self.read_frames_with_offset(buffer, 0)
    }

    /// Like [`WavFile::read_frames`], skipping `offset` bytes first
    pub fn read_frames_with_offset<T>(
        &mut self,
        buffer: &mut [T],
        offset: u64,
    ) -> Result<usize, ReadError<FileError>>
    where
        T: FromPcmSample,
    {
        self.frames()?
            .read_frames_with_offset(buffer, offset)
            .map_err(ReadError::Reader)
    }

    /// Strip the canonical header from an in-memory copy of a WAV file
    pub fn convert_wav_to_raw_all<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        raw::convert_wav_to_raw_all(data)
    }

    /// Read up to `length` audio bytes starting `start` bytes after the header.
    ///
    /// `None` for a zero length or when the file can't be read.
    pub fn audio_to_byte_partially(&self, start: u64, length: usize) -> Option<Vec<u8>> {
        if length == 0 {
            return None;
        }
        log::debug!("start: {}, length: {}", start, length);

        raw::read_range(&self.path, start, length)
            .inspect_err(|e| log::warn!("failed to read {}: {}", self.path.display(), e))
            .ok()
    }

    /// Read the whole file, header included. `None` when the file can't be read.
    pub fn audio_to_byte_all(&self) -> Option<Vec<u8>> {
        raw::read_all(&self.path, self.options.staging_buffer_size)
            .inspect_err(|e| log::warn!("failed to read {}: {}", self.path.display(), e))
            .ok()
    }
}

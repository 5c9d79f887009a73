use crate::header::HEADER_LEN;

#[cfg(feature = "std")]
use alloc::vec;
#[cfg(feature = "std")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::{
    fs,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::Path,
};

/// Strip the 44 byte canonical header from an in-memory WAV file.
///
/// Inputs shorter than the header give an empty slice.
///
/// ```
/// let mut bytes = vec![0; 44];
/// bytes.extend_from_slice(&[1, 2, 3]);
///
/// assert_eq!(wavfile::convert_wav_to_raw_all(&bytes), &[1, 2, 3]);
/// ```
pub fn convert_wav_to_raw_all(data: &[u8]) -> &[u8] {
    data.get(HEADER_LEN..).unwrap_or(&[])
}

/// Read up to `length` sample bytes starting `start` bytes into the audio data.
///
/// Opens its own handle on `path`, released before returning. Fewer bytes come
/// back when the file ends early. A `start` beyond `u64::MAX - 44` is
/// `InvalidInput`.
#[cfg(feature = "std")]
pub fn read_range(path: impl AsRef<Path>, start: u64, length: usize) -> io::Result<Vec<u8>> {
    let pos = (HEADER_LEN as u64)
        .checked_add(start)
        .ok_or_else(|| io::Error::from(io::ErrorKind::InvalidInput))?;

    let mut file = fs::File::open(path)?;
    file.seek(SeekFrom::Start(pos))?;

    // grows with what the file actually holds, `length` may be far larger
    let mut data = vec![];
    file.take(length as u64).read_to_end(&mut data)?;
    Ok(data)
}

/// Read the whole file at `path`, header included, through a staging buffer
#[cfg(feature = "std")]
pub fn read_all(path: impl AsRef<Path>, staging_buffer_size: usize) -> io::Result<Vec<u8>> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let mut staging = vec![0; staging_buffer_size.max(1)];
    let mut bytes = vec![];

    loop {
        match reader.read(&mut staging) {
            Ok(0) => break,
            Ok(n) => bytes.extend_from_slice(&staging[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(bytes)
}

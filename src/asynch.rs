//! Async versions of the header parser and whole-file extraction

use crate::error::{Error, ReadError};
use crate::header::{HeaderParser, WavHeader};
use crate::options::Options;

/// Parse the canonical header from an async reader.
///
/// Consumes exactly [`WavHeader::header_len`] bytes on success.
pub async fn read_header<R>(
    reader: &mut R,
    options: &Options,
) -> Result<WavHeader, ReadError<R::Error>>
where
    R: embedded_io_async::Read,
{
    let mut parser = HeaderParser::new(options.compatibility);
    let mut buf = [0; 4];

    while let Some((field, width)) = parser.expected() {
        match reader.read_exact(&mut buf[..width]).await {
            Ok(()) => {}
            Err(embedded_io_async::ReadExactError::UnexpectedEof) => {
                return Err(ReadError::Parser(Error::TruncatedHeader { field }));
            }
            Err(embedded_io_async::ReadExactError::Other(e)) => return Err(ReadError::Reader(e)),
        }
        parser.feed(&buf[..width])?;
    }

    Ok(parser.finish())
}

/// Read the whole file at `path`, header included, on the tokio runtime
#[cfg(feature = "std")]
pub async fn audio_to_byte_all(
    path: impl AsRef<std::path::Path>,
    options: &Options,
) -> std::io::Result<alloc::vec::Vec<u8>> {
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path).await?;
    let mut staging = alloc::vec![0; options.staging_buffer_size.max(1)];
    let mut bytes = alloc::vec![];

    loop {
        match file.read(&mut staging).await? {
            0 => break,
            n => bytes.extend_from_slice(&staging[..n]),
        }
    }

    Ok(bytes)
}

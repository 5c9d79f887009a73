//! Basic `no_std` library for validating and decoding canonical PCM WAV files.
//!
//! Only the fixed 44 byte layout is understood: `RIFF`, `WAVE`, a 16 byte `fmt `
//! chunk describing uncompressed PCM with at most two channels, then `data`.
//! Anything else is rejected while the header is read.
//!
//! Parsing a header from memory:
//! ```
//! use wavfile::{Error, Field, WavHeader};
//!
//! let bytes: [u8; 48] = [
//!     0x52, 0x49, 0x46, 0x46, // RIFF
//!     0x28, 0x00, 0x00, 0x00, // chunk size
//!     0x57, 0x41, 0x56, 0x45, // WAVE
//!     0x66, 0x6d, 0x74, 0x20, // fmt_
//!     0x10, 0x00, 0x00, 0x00, // chunk size
//!     0x01, 0x00, // audio format
//!     0x02, 0x00, // num channels
//!     0x80, 0xbb, 0x00, 0x00, // sample rate
//!     0x00, 0xee, 0x02, 0x00, // byte rate
//!     0x04, 0x00, // block align
//!     0x10, 0x00, // bits per sample
//!     0x64, 0x61, 0x74, 0x61, // data
//!     0x04, 0x00, 0x00, 0x00, // chunk size
//!     0x01, 0x00, 0xff, 0xff, // sample 1 L+R
//! ];
//!
//! let header = WavHeader::from_bytes(&bytes).unwrap();
//! assert!(header.is_stereo());
//! assert_eq!(header.sample_rate(), 48_000);
//! assert_eq!(header.num_frames(), 10);
//! assert_eq!(wavfile::convert_wav_to_raw_all(&bytes), &[0x01, 0x00, 0xff, 0xff]);
//!
//! // An extensible fmt chunk is not plain PCM
//! let mut extensible = bytes;
//! extensible[16] = 18;
//! assert_eq!(
//!     WavHeader::from_bytes(&extensible),
//!     Err(Error::InvalidFormat { field: Field::Subchunk1Size, value: 18 })
//! );
//! ```
//!
//! Reading samples from a file (requires the "std" feature):
//! ```no_run
//! use wavfile::WavFile;
//!
//! let mut wav = WavFile::new("./speech.wav").unwrap();
//! let header = wav.open().unwrap();
//! println!("{} Hz, {} channel(s)", header.sample_rate, header.num_channels);
//!
//! // Normalized to [-1.0, 1.0] against 32767
//! let mut frames = vec![0.0f64; 4096];
//! let non_silent = wav.read_frames(&mut frames).unwrap();
//! println!("{} non silent samples", non_silent);
//!
//! let audio = wav.audio_to_byte_partially(0, 1024).unwrap_or_default();
//! wav.close();
//! ```
//!
//! Files written for the older decoder (2 byte data size, big-endian samples)
//! open with [`Options::legacy`] through `WavFile::with_options`.

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod codec;
mod conversion;
mod error;
mod header;
mod options;
mod raw;

pub use codec::{bytes_to_int, bytes_to_long, bytes_to_short};
pub use conversion::{FromPcmSample, full_scale};
pub use error::Error;
pub use header::{
    AUDIO_FORMAT_PCM, Field, HEADER_LEN, MAX_CHANNELS, RIFF_CHUNK_ID, SUBCHUNK1_ID,
    SUBCHUNK1_SIZE, SUBCHUNK2_ID, WAVE_FORMAT, WavHeader,
};
pub use options::{Compatibility, Options};
pub use raw::convert_wav_to_raw_all;

#[cfg(feature = "io")]
pub mod asynch;
#[cfg(feature = "io")]
mod frames;
#[cfg(feature = "io")]
pub use error::ReadError;
#[cfg(feature = "io")]
pub use frames::FrameReader;

#[cfg(feature = "std")]
mod wav;
#[cfg(feature = "std")]
pub use raw::{read_all, read_range};
#[cfg(feature = "std")]
pub use wav::{File, FileError, WavFile};

#[cfg(test)]
mod fixtures;

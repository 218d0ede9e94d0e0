use std::{error, io, string::FromUtf8Error};
use thiserror::Error;

/// Internal `Result` type alias used by `bale`. Basically equal to: `Result<T, BaleError>`
pub type BaleResult<T = ()> = Result<T, BaleError>;

/// All errors manifestable within `bale` collected into a neat enum
#[derive(Debug, Error)]
pub enum BaleError {
	/// Generic error
	#[error("[BaleError::OtherError] {0}")]
	OtherError(Box<dyn error::Error + Send + Sync>),
	/// thin wrapper over [`io::Error`](std::io::Error), captures all IO errors: `NotFound`, `PermissionDenied` et al
	#[error("[BaleError::IOError] {0}")]
	IOError(#[from] io::Error),
	/// the stream ended inside a fixed-width header, or before a declared or delimited section was complete
	#[error("[BaleError::TruncatedArchive] Stream ended while reading {section}, {missing} byte(s) missing")]
	TruncatedArchive {
		/// which part of the frame was being read when the stream ran dry
		section: &'static str,
		/// how many more bytes were needed
		missing: u64,
	},
	/// an entry's name could not be decoded as UTF-8 text
	#[error("[BaleError::InvalidEncoding] {0}")]
	InvalidEncoding(#[from] FromUtf8Error),
	/// a delimited stream broke the escaping grammar: a lone `0x00` must be followed by `0x00` or `0x01`.
	/// There is no resync marker, so all subsequent frame boundaries are lost
	#[error("[BaleError::ProtocolDesync] Unescaped 0x00 followed by {0:#04x}, frame boundaries are lost")]
	ProtocolDesync(u8),
	/// an archive entry's name would resolve outside the extraction directory
	#[error("[BaleError::UnsafeEntryName] Entry name {0:?} points outside the extraction directory")]
	UnsafeEntryName(String),
	/// zero-length entry names are reserved as the delimited end-of-archive marker, for both framings
	#[error("[BaleError::UnnamedEntry] Entry names may not be empty")]
	UnnamedEntry,
	/// an entry's source yielded a different number of bytes than its declared size, which would silently
	/// desync every frame after it
	#[error("[BaleError::SizeMismatch] Entry {name} declared {declared} byte(s) but its source yielded {actual}")]
	SizeMismatch {
		/// name of the offending entry
		name: String,
		/// the size written into the frame header
		declared: u64,
		/// the number of bytes the source actually produced
		actual: u64,
	},
}

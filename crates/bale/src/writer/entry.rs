use std::{fs::File, io::Read, path::Path};

use crate::global::error::BaleResult;

/// A named [`Read`] handle queued for packing, with its size declared up front.
///
/// The out-of-band framing writes an entry's content length before the
/// content itself, so the size must be known when the frame starts;
/// [`from_path`](Entry::from_path) takes it from file metadata.
pub struct Entry<'a> {
	/// source data
	pub(crate) handle: Box<dyn Read + 'a>,
	/// The name recorded in the archive. Must not be empty, an empty name is
	/// reserved as the end-of-archive marker
	pub name: String,
	/// Declared content length in bytes
	pub size: u64,
}

impl<'a> Entry<'a> {
	/// Wraps an arbitrary [`Read`] handle.
	///
	/// `size` must match the number of bytes the handle will yield, else
	/// packing fails with [`SizeMismatch`](crate::builder::BaleError::SizeMismatch).
	pub fn new<S: AsRef<str>>(handle: impl Read + 'a, name: S, size: u64) -> Entry<'a> {
		Entry {
			handle: Box::new(handle),
			name: name.as_ref().to_string(),
			size,
		}
	}

	/// Queues a file from disk, named after its path. The size comes from the
	/// file's metadata.
	pub fn from_path(path: impl AsRef<Path>) -> BaleResult<Entry<'static>> {
		let path = path.as_ref();

		let file = File::open(path)?;
		let size = file.metadata()?.len();

		Ok(Entry {
			handle: Box::new(file),
			name: path.to_string_lossy().into_owned(),
			size,
		})
	}

	/// Queues an in-memory byte slice.
	pub fn from_bytes<S: AsRef<str>>(bytes: &'a [u8], name: S) -> Entry<'a> {
		Entry::new(bytes, name, bytes.len() as u64)
	}
}

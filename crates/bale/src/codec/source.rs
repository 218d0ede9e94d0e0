use std::io::{self, Read};

use crate::CHUNK_SIZE;

/// A pull-based buffered reader over the archive stream.
///
/// Refills an internal buffer from the underlying handle in [`CHUNK_SIZE`]
/// chunks, so single-byte pulls stay cheap. A short read is only ever
/// reported at genuine end-of-stream.
pub struct ByteSource<R> {
	handle: R,
	buffer: Vec<u8>,
	cursor: usize,
}

impl<R: Read> ByteSource<R> {
	/// Wraps the given read handle.
	pub fn new(handle: R) -> ByteSource<R> {
		ByteSource {
			handle,
			buffer: Vec::with_capacity(CHUNK_SIZE),
			cursor: 0,
		}
	}

	/// Pulls the next byte, `None` at end-of-stream.
	pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
		if self.cursor >= self.buffer.len() && !self.refill()? {
			return Ok(None);
		}

		let byte = self.buffer[self.cursor];
		self.cursor += 1;

		Ok(Some(byte))
	}

	/// Reads up to `n` bytes, returning fewer only at end-of-stream.
	pub fn read(&mut self, n: usize) -> io::Result<Vec<u8>> {
		// `n` comes straight from untrusted length fields, so no up-front allocation
		let mut out = Vec::new();

		while out.len() < n {
			match self.read_byte()? {
				Some(byte) => out.push(byte),
				None => break,
			}
		}

		Ok(out)
	}

	// Refills the buffer from the handle, false once the stream is exhausted
	fn refill(&mut self) -> io::Result<bool> {
		self.buffer.resize(CHUNK_SIZE, 0);
		self.cursor = 0;

		let read = loop {
			match self.handle.read(&mut self.buffer) {
				Ok(read) => break read,
				Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
				Err(err) => return Err(err),
			}
		};

		self.buffer.truncate(read);
		Ok(read != 0)
	}
}

#[cfg(test)]
mod tests {
	use super::ByteSource;
	use std::io::Cursor;

	#[test]
	fn reads_across_refill_boundaries() {
		let data = (0..=255u8).cycle().take(257).collect::<Vec<_>>();
		let mut source = ByteSource::new(Cursor::new(data.clone()));

		let mut out = Vec::new();
		while let Some(byte) = source.read_byte().unwrap() {
			out.push(byte);
		}

		assert_eq!(out, data);
	}

	#[test]
	fn short_read_only_at_end_of_stream() {
		let mut source = ByteSource::new(Cursor::new(vec![7u8; 250]));

		assert_eq!(source.read(120).unwrap().len(), 120);
		assert_eq!(source.read(200).unwrap().len(), 130);
		assert_eq!(source.read(8).unwrap().len(), 0);

		// the terminal state is sticky
		assert_eq!(source.read_byte().unwrap(), None);
		assert_eq!(source.read_byte().unwrap(), None);
	}
}

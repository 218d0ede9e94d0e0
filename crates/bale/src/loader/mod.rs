use std::{
	fs::{self, File},
	io::{Read, Write},
	path::{Component, Path},
};

use crate::codec::{inbound, out_of_band, ByteSource, Framing};
use crate::global::error::{BaleError, BaleResult};

/// A streaming decoder over an archive source.
///
/// Frames come out strictly in archive order. Each [`Frame`] returned by
/// [`next_frame`](Unpacker::next_frame) borrows the decoder, so the next
/// frame cannot be requested until the current one is gone; dropping a frame
/// without calling [`copy_to`](Frame::copy_to) leaves its content bytes in
/// the stream and desyncs everything after it, as the wire format carries no
/// resync marker.
pub struct Unpacker<R> {
	source: ByteSource<R>,
	framing: Framing,
}

impl<R: Read> Unpacker<R> {
	/// Wraps an archive source. `framing` must be the one the archive was
	/// packed with.
	pub fn new(handle: R, framing: Framing) -> Unpacker<R> {
		Unpacker {
			source: ByteSource::new(handle),
			framing,
		}
	}

	/// Decodes the next frame's name, `Ok(None)` once the archive is exhausted.
	pub fn next_frame(&mut self) -> BaleResult<Option<Frame<'_, R>>> {
		let (name, body) = match self.framing {
			Framing::OutOfBand => match out_of_band::decode_header(&mut self.source)? {
				Some((name, content_len)) => (name, Body::Declared(content_len)),
				None => return Ok(None),
			},
			Framing::Inbound => {
				// names are assumed short, accumulate in memory
				let name = inbound::read_section(&mut self.source, None)?;
				if name.is_empty() {
					// an empty name doubles as the end-of-archive marker
					return Ok(None);
				}

				(String::from_utf8(name)?, Body::Delimited)
			},
		};

		Ok(Some(Frame {
			name,
			body,
			source: &mut self.source,
		}))
	}
}

// How a frame's content ends
enum Body {
	// out-of-band: exactly this many raw bytes follow
	Declared(u64),
	// inbound: escaped content runs until the next terminator
	Delimited,
}

/// One decoded frame, holding the archive cursor until its content is consumed.
pub struct Frame<'u, R> {
	/// The entry's name, as recorded in the archive
	pub name: String,
	body: Body,
	source: &'u mut ByteSource<R>,
}

impl<'u, R: Read> Frame<'u, R> {
	/// Streams this frame's content into the sink, consuming the frame.
	/// Returns the number of content bytes (after unescaping).
	pub fn copy_to<W: Write>(self, sink: &mut W) -> BaleResult<u64> {
		match self.body {
			Body::Declared(content_len) => out_of_band::read_content(self.source, sink, content_len),
			Body::Delimited => {
				let mut counting = CountingSink { inner: sink, written: 0 };
				inbound::read_section(self.source, Some(&mut counting))?;

				Ok(counting.written)
			},
		}
	}
}

/// Extracts every frame into `target_dir`, creating parent directories as
/// needed. Returns the number of files restored.
///
/// Archive names are not trusted: a name with an absolute prefix or a `..`
/// component is rejected with [`UnsafeEntryName`](BaleError::UnsafeEntryName)
/// instead of being written outside `target_dir`.
///
/// Any failure aborts the run where it stands; for per-file error handling
/// drive an [`Unpacker`] directly.
pub fn unpack<R: Read>(handle: R, framing: Framing, target_dir: impl AsRef<Path>) -> BaleResult<u64> {
	let target_dir = target_dir.as_ref();
	let mut unpacker = Unpacker::new(handle, framing);
	let mut restored = 0;

	while let Some(frame) = unpacker.next_frame()? {
		if name_escapes_target(&frame.name) {
			return Err(BaleError::UnsafeEntryName(frame.name));
		}

		let path = target_dir.join(&frame.name);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}

		let mut file = File::create(&path)?;
		frame.copy_to(&mut file)?;

		restored += 1;
	}

	Ok(restored)
}

// True when joining this name onto a directory could land outside of it
fn name_escapes_target(name: &str) -> bool {
	let path = Path::new(name);
	path.is_absolute() || path.components().any(|c| matches!(c, Component::ParentDir))
}

// Write adaptor that tracks how many bytes passed through
struct CountingSink<'a, W> {
	inner: &'a mut W,
	written: u64,
}

impl<'a, W: Write> Write for CountingSink<'a, W> {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		let written = self.inner.write(buf)?;
		self.written += written as u64;

		Ok(written)
	}

	fn flush(&mut self) -> std::io::Result<()> {
		self.inner.flush()
	}
}

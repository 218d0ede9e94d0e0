use std::io::{self, Read, Write};

mod config;
mod entry;

pub use config::PackConfig;
pub use entry::Entry;

use crate::codec::{inbound, out_of_band, Framing};
use crate::global::error::{BaleError, BaleResult};
use crate::CHUNK_SIZE;

/// Encodes every [`Entry`] as one frame into the target, strictly in the
/// order given; one entry's frame completes before the next begins.
///
/// The optional callback is invoked once per finished frame with the entry's
/// name and the number of bytes its frame put on the wire. Returns the total
/// number of bytes written.
pub fn pack<'a, W: Write>(
	mut target: W, entries: &mut [Entry<'a>], config: &PackConfig,
	mut callback: Option<&mut dyn FnMut(&str, u64)>,
) -> BaleResult<u64> {
	let mut bytes_written = 0;

	for entry in entries {
		if entry.name.is_empty() {
			return Err(BaleError::UnnamedEntry);
		}

		let frame = match config.framing {
			Framing::OutOfBand => write_out_of_band(&mut target, entry)?,
			Framing::Inbound => write_inbound(&mut target, entry)?,
		};
		bytes_written += frame;

		if let Some(callback) = callback.as_mut() {
			callback(&entry.name, frame);
		}
	}

	target.flush()?;
	Ok(bytes_written)
}

fn write_out_of_band<W: Write>(target: &mut W, entry: &mut Entry<'_>) -> BaleResult<u64> {
	out_of_band::encode_header(target, &entry.name, entry.size)?;

	// identity copy, in bounded chunks
	let mut chunk = [0u8; CHUNK_SIZE];
	let mut copied = 0u64;

	loop {
		let read = read_chunk(entry.handle.as_mut(), &mut chunk)?;
		if read == 0 {
			break;
		}

		target.write_all(&chunk[..read])?;
		copied += read as u64;
	}

	// the header already declared `size`; a drifting source would desync
	// every frame after this one
	if copied != entry.size {
		return Err(BaleError::SizeMismatch {
			name: entry.name.clone(),
			declared: entry.size,
			actual: copied,
		});
	}

	Ok((2 * out_of_band::LENGTH_SIZE + entry.name.len()) as u64 + copied)
}

fn write_inbound<W: Write>(target: &mut W, entry: &mut Entry<'_>) -> BaleResult<u64> {
	let mut written = inbound::encode_section(target, entry.name.as_bytes())?;

	let mut chunk = [0u8; CHUNK_SIZE];
	loop {
		let read = read_chunk(entry.handle.as_mut(), &mut chunk)?;
		if read == 0 {
			break;
		}

		written += inbound::write_escaped(target, &chunk[..read])?;
	}

	target.write_all(&inbound::TERMINATOR)?;
	Ok(written + inbound::TERMINATOR.len() as u64)
}

fn read_chunk(handle: &mut dyn Read, chunk: &mut [u8]) -> io::Result<usize> {
	loop {
		match handle.read(chunk) {
			Ok(read) => return Ok(read),
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return Err(err),
		}
	}
}

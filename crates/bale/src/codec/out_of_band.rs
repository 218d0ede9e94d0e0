use std::io::{Read, Write};

use super::source::ByteSource;
use crate::global::error::{BaleError, BaleResult};
use crate::CHUNK_SIZE;

/// Width of the name-length and content-length fields, a `u64`
pub(crate) const LENGTH_SIZE: usize = 8;

/// Writes the fixed-width frame header: `{u64 name_len}{name bytes}{u64 content_len}`.
///
/// Both integers are little-endian, regardless of host platform.
pub(crate) fn encode_header<W: Write>(target: &mut W, name: &str, content_len: u64) -> BaleResult {
	target.write_all(&(name.len() as u64).to_le_bytes())?;
	target.write_all(name.as_bytes())?;
	target.write_all(&content_len.to_le_bytes())?;

	Ok(())
}

/// Decodes one frame header, `Ok(None)` on clean end-of-stream.
///
/// Content bytes are *not* consumed here. The caller must read exactly the
/// returned length before decoding the next header; the format carries no
/// resync marker, so anything less desyncs the stream permanently.
pub(crate) fn decode_header<R: Read>(source: &mut ByteSource<R>) -> BaleResult<Option<(String, u64)>> {
	let length_word = source.read(LENGTH_SIZE)?;
	if length_word.is_empty() {
		// no more frames
		return Ok(None);
	}
	let name_len = parse_length(&length_word, "name length")?;

	let name_bytes = source.read(name_len as usize)?;
	if (name_bytes.len() as u64) < name_len {
		return Err(BaleError::TruncatedArchive {
			section: "entry name",
			missing: name_len - name_bytes.len() as u64,
		});
	}
	let name = String::from_utf8(name_bytes)?;

	let length_word = source.read(LENGTH_SIZE)?;
	let content_len = parse_length(&length_word, "content length")?;

	Ok(Some((name, content_len)))
}

/// Copies exactly `content_len` raw bytes from the source into the sink.
pub(crate) fn read_content<R: Read, W: Write>(
	source: &mut ByteSource<R>, sink: &mut W, content_len: u64,
) -> BaleResult<u64> {
	let mut remaining = content_len;

	while remaining > 0 {
		let want = remaining.min(CHUNK_SIZE as u64) as usize;

		let chunk = source.read(want)?;
		if chunk.is_empty() {
			return Err(BaleError::TruncatedArchive {
				section: "entry content",
				missing: remaining,
			});
		}

		sink.write_all(&chunk)?;
		remaining -= chunk.len() as u64;
	}

	Ok(content_len)
}

fn parse_length(bytes: &[u8], section: &'static str) -> BaleResult<u64> {
	match <[u8; LENGTH_SIZE]>::try_from(bytes) {
		Ok(word) => Ok(u64::from_le_bytes(word)),
		Err(_) => Err(BaleError::TruncatedArchive {
			section,
			missing: (LENGTH_SIZE - bytes.len()) as u64,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn header_wire_layout() {
		let mut target = Vec::new();
		encode_header(&mut target, "hello.txt", 2).unwrap();

		let mut expected = vec![0x09, 0, 0, 0, 0, 0, 0, 0];
		expected.extend_from_slice(b"hello.txt");
		expected.extend_from_slice(&[0x02, 0, 0, 0, 0, 0, 0, 0]);

		assert_eq!(target, expected);
	}

	#[test]
	fn empty_stream_is_not_an_error() {
		let mut source = ByteSource::new(Cursor::new(Vec::new()));
		assert!(decode_header(&mut source).unwrap().is_none());
	}

	#[test]
	fn truncated_name_is_fatal() {
		// name length claims 10 bytes, only 3 are available
		let mut bytes = 10u64.to_le_bytes().to_vec();
		bytes.extend_from_slice(b"abc");

		let mut source = ByteSource::new(Cursor::new(bytes));
		let err = decode_header(&mut source).unwrap_err();

		assert!(matches!(
			err,
			BaleError::TruncatedArchive { section: "entry name", missing: 7 }
		));
	}

	#[test]
	fn truncated_length_word_is_fatal() {
		let mut source = ByteSource::new(Cursor::new(vec![0x04, 0, 0]));
		let err = decode_header(&mut source).unwrap_err();

		assert!(matches!(err, BaleError::TruncatedArchive { section: "name length", .. }));
	}
}

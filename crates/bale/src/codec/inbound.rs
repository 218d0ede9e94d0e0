use std::io::{Read, Write};

use super::source::ByteSource;
use crate::global::error::{BaleError, BaleResult};

/// The two-byte section terminator, written after the name and again after the content
pub(crate) const TERMINATOR: [u8; 2] = [0x00, 0x01];

/// Unescaped bytes buffered before an incremental flush to the sink
pub(crate) const FLUSH_THRESHOLD: usize = 100;

// Escape-pair bookkeeping while scanning for the terminator
#[derive(PartialEq)]
enum EscapeState {
	Normal,
	// the previous pair was `00 00`; the byte now under the cursor is the
	// second half of that escape and must not start a new one
	SawZero,
}

/// Writes `bytes` with every literal `0x00` doubled to `00 00`.
///
/// Returns the number of bytes put on the wire.
pub(crate) fn write_escaped<W: Write>(target: &mut W, bytes: &[u8]) -> BaleResult<u64> {
	let mut written = 0u64;

	for piece in bytes.split_inclusive(|&byte| byte == 0x00) {
		target.write_all(piece)?;
		written += piece.len() as u64;

		if piece.last() == Some(&0x00) {
			target.write_all(&[0x00])?;
			written += 1;
		}
	}

	Ok(written)
}

/// Writes one complete section: escaped payload followed by the terminator.
pub(crate) fn encode_section<W: Write>(target: &mut W, bytes: &[u8]) -> BaleResult<u64> {
	let written = write_escaped(target, bytes)?;
	target.write_all(&TERMINATOR)?;

	Ok(written + TERMINATOR.len() as u64)
}

/// Consumes exactly one delimited section, unescaping as it goes.
///
/// With no sink the unescaped bytes are accumulated and returned, which is
/// meant for short sections like entry names. With a sink they are flushed
/// out every [`FLUSH_THRESHOLD`] bytes and the returned buffer is empty, so
/// arbitrarily large content sections never sit in memory whole.
///
/// End-of-stream counts as a terminator; the caller decides whether that
/// also means end of archive.
pub(crate) fn read_section<R: Read>(
	source: &mut ByteSource<R>, mut sink: Option<&mut dyn Write>,
) -> BaleResult<Vec<u8>> {
	let mut pending = Vec::new();
	let mut state = EscapeState::Normal;
	let mut current = source.read_byte()?;

	loop {
		let lookahead = source.read_byte()?;

		match (current, lookahead) {
			// escape pair: one literal zero, the lookahead is its second half
			(Some(0x00), Some(0x00)) if state == EscapeState::Normal => {
				pending.push(0x00);
				state = EscapeState::SawZero;
			},
			// section terminator
			(Some(0x00), Some(0x01)) if state == EscapeState::Normal => break,
			// a lone zero is undefined by the escaping grammar
			(Some(0x00), Some(other)) if state == EscapeState::Normal => {
				return Err(BaleError::ProtocolDesync(other))
			},
			(Some(0x00), None) if state == EscapeState::Normal => {
				return Err(BaleError::TruncatedArchive {
					section: "delimited section",
					missing: 1,
				})
			},
			// stream ended cleanly, same as a terminator
			(None, _) => break,
			(Some(byte), _) => {
				// in SawZero the byte is the already-emitted second escape half
				if state == EscapeState::Normal {
					pending.push(byte);
				}
				state = EscapeState::Normal;
			},
		}

		if let Some(sink) = sink.as_mut() {
			if pending.len() >= FLUSH_THRESHOLD {
				sink.write_all(&pending)?;
				pending.clear();
			}
		}

		current = lookahead;
	}

	if let Some(sink) = sink.as_mut() {
		sink.write_all(&pending)?;
		pending.clear();
	}

	Ok(pending)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn section(bytes: &[u8]) -> BaleResult<Vec<u8>> {
		let mut source = ByteSource::new(Cursor::new(bytes.to_vec()));
		read_section(&mut source, None)
	}

	#[test]
	fn escaping_doubles_every_zero() {
		let mut target = Vec::new();
		write_escaped(&mut target, &[0x61, 0x00, 0x62, 0x00]).unwrap();

		assert_eq!(target, [0x61, 0x00, 0x00, 0x62, 0x00, 0x00]);
	}

	#[test]
	fn escaped_zero_does_not_open_a_new_escape() {
		// `a 00 00 b` + terminator decodes to a\0b, the second zero must not
		// pair up with `b`
		let decoded = section(&[0x61, 0x00, 0x00, 0x62, 0x00, 0x01]).unwrap();
		assert_eq!(decoded, [0x61, 0x00, 0x62]);
	}

	#[test]
	fn consecutive_escapes() {
		// two literal zeros, then the terminator
		let decoded = section(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x01]).unwrap();
		assert_eq!(decoded, [0x00, 0x00]);
	}

	#[test]
	fn end_of_stream_acts_as_terminator() {
		let decoded = section(&[0x61, 0x62]).unwrap();
		assert_eq!(decoded, [0x61, 0x62]);

		assert!(section(&[]).unwrap().is_empty());
	}

	#[test]
	fn lone_zero_is_a_desync() {
		let err = section(&[0x61, 0x00, 0x05]).unwrap_err();
		assert!(matches!(err, BaleError::ProtocolDesync(0x05)));
	}

	#[test]
	fn zero_at_end_of_stream_is_truncation() {
		let err = section(&[0x61, 0x00]).unwrap_err();
		assert!(matches!(err, BaleError::TruncatedArchive { .. }));
	}

	#[test]
	fn large_sections_stream_through_the_sink() {
		let payload = (0..=4u8).cycle().take(350).collect::<Vec<_>>();

		let mut wire = Vec::new();
		encode_section(&mut wire, &payload).unwrap();

		let mut source = ByteSource::new(Cursor::new(wire));
		let mut sink = Vec::new();
		let returned = read_section(&mut source, Some(&mut sink)).unwrap();

		// everything went through the sink, nothing was accumulated
		assert!(returned.is_empty());
		assert_eq!(sink, payload);
	}

	#[test]
	fn escaping_roundtrip_with_terminator_lookalikes() {
		// contains `00 00`, `00 01` and a sole trailing zero
		let payload = [0x00, 0x00, 0x00, 0x01, 0x41, 0x00];

		let mut wire = Vec::new();
		encode_section(&mut wire, &payload).unwrap();

		assert_eq!(section(&wire).unwrap(), payload);
	}
}

#![cfg(test)]
// This is meant to mirror as closely as possible, how users should use the crate

use std::io::Cursor;
use crate::prelude::*;

// Big enough to cross several chunk boundaries
const BIG_LEN: usize = 250;

fn big_payload() -> Vec<u8> {
	// every fifth byte is a zero, to keep the inbound escaper busy
	(0..BIG_LEN).map(|i| (i % 5) as u8).collect()
}

#[cfg(all(feature = "builder", feature = "archive"))]
fn roundtrip(framing: Framing, files: &[(&str, &[u8])]) {
	let mut entries = files
		.iter()
		.map(|(name, data)| Entry::from_bytes(data, *name))
		.collect::<Vec<_>>();

	let config = PackConfig::default().framing(framing);
	let mut target = Cursor::new(Vec::new());

	let written = pack(&mut target, &mut entries, &config, None).unwrap();
	assert_eq!(written, target.get_ref().len() as u64);

	target.set_position(0);
	let mut unpacker = Unpacker::new(target, framing);

	for (name, data) in files {
		let frame = unpacker.next_frame().unwrap().expect("frame missing");
		assert_eq!(&frame.name, name);

		let mut content = Vec::new();
		let copied = frame.copy_to(&mut content).unwrap();

		assert_eq!(content.as_slice(), *data);
		assert_eq!(copied, data.len() as u64);
	}

	assert!(unpacker.next_frame().unwrap().is_none());
}

#[test]
#[cfg(all(feature = "builder", feature = "archive"))]
fn roundtrip_out_of_band() {
	let big = big_payload();

	roundtrip(
		Framing::OutOfBand,
		&[
			("hello.txt", b"hi"),
			("empty.bin", b""),
			("nulls.bin", &[0x00, 0x00, 0x01, 0x00]),
			("big.bin", &big),
		],
	);
}

#[test]
#[cfg(all(feature = "builder", feature = "archive"))]
fn roundtrip_inbound() {
	let big = big_payload();

	roundtrip(
		Framing::Inbound,
		&[
			("hello.txt", b"hi"),
			("empty.bin", b""),
			// terminator lookalikes and a sole trailing zero
			("nulls.bin", &[0x00, 0x00, 0x01, 0x00]),
			("big.bin", &big),
		],
	);
}

#[test]
#[cfg(feature = "builder")]
fn out_of_band_wire_bytes() {
	let mut entries = [Entry::from_bytes(b"hi", "hello.txt")];
	let mut target = Cursor::new(Vec::new());

	pack(&mut target, &mut entries, &PackConfig::default(), None).unwrap();

	let mut expected = vec![0x09, 0, 0, 0, 0, 0, 0, 0];
	expected.extend_from_slice(b"hello.txt");
	expected.extend_from_slice(&[0x02, 0, 0, 0, 0, 0, 0, 0]);
	expected.extend_from_slice(b"hi");

	assert_eq!(target.get_ref().as_slice(), expected.as_slice());
}

#[test]
#[cfg(feature = "archive")]
fn empty_stream_has_no_frames() {
	let mut unpacker = Unpacker::new(Cursor::new(Vec::new()), Framing::OutOfBand);
	assert!(unpacker.next_frame().unwrap().is_none());

	let mut unpacker = Unpacker::new(Cursor::new(Vec::new()), Framing::Inbound);
	assert!(unpacker.next_frame().unwrap().is_none());
}

#[test]
#[cfg(feature = "archive")]
fn truncated_header_is_fatal() {
	// name length claims 10 bytes, only 3 follow
	let mut bytes = 10u64.to_le_bytes().to_vec();
	bytes.extend_from_slice(b"abc");

	let mut unpacker = Unpacker::new(Cursor::new(bytes), Framing::OutOfBand);
	let err = unpacker.next_frame().map(|_| ()).unwrap_err();

	assert!(matches!(err, BaleError::TruncatedArchive { .. }));
}

#[test]
#[cfg(feature = "archive")]
fn non_utf8_names_are_rejected() {
	// out-of-band: a two-byte name that is not valid UTF-8
	let mut bytes = 2u64.to_le_bytes().to_vec();
	bytes.extend_from_slice(&[0xFF, 0xFE]);
	bytes.extend_from_slice(&0u64.to_le_bytes());

	let mut unpacker = Unpacker::new(Cursor::new(bytes), Framing::OutOfBand);
	let err = unpacker.next_frame().map(|_| ()).unwrap_err();
	assert!(matches!(err, BaleError::InvalidEncoding(_)));

	// inbound: the same bytes as a delimited name section
	let bytes = vec![0xFF, 0xFE, 0x00, 0x01];

	let mut unpacker = Unpacker::new(Cursor::new(bytes), Framing::Inbound);
	let err = unpacker.next_frame().map(|_| ()).unwrap_err();
	assert!(matches!(err, BaleError::InvalidEncoding(_)));
}

#[test]
#[cfg(feature = "archive")]
fn truncated_content_is_fatal() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&4u64.to_le_bytes());
	bytes.extend_from_slice(b"clip");
	bytes.extend_from_slice(&100u64.to_le_bytes());
	bytes.extend_from_slice(&[1, 2, 3]);

	let mut unpacker = Unpacker::new(Cursor::new(bytes), Framing::OutOfBand);
	let frame = unpacker.next_frame().unwrap().unwrap();

	let err = frame.copy_to(&mut Vec::new()).unwrap_err();
	assert!(matches!(err, BaleError::TruncatedArchive { missing: 97, .. }));
}

#[test]
#[cfg(feature = "archive")]
fn inbound_name_unescapes() {
	// `a 00 00 b` + terminator, empty content section
	let bytes = vec![0x61, 0x00, 0x00, 0x62, 0x00, 0x01, 0x00, 0x01];

	let mut unpacker = Unpacker::new(Cursor::new(bytes), Framing::Inbound);
	let frame = unpacker.next_frame().unwrap().unwrap();
	assert_eq!(frame.name, "a\u{0}b");

	let mut content = Vec::new();
	assert_eq!(frame.copy_to(&mut content).unwrap(), 0);
	assert!(content.is_empty());

	assert!(unpacker.next_frame().unwrap().is_none());
}

#[test]
#[cfg(feature = "builder")]
fn empty_names_are_rejected() {
	let mut entries = [Entry::from_bytes(b"data", "")];
	let mut target = Cursor::new(Vec::new());

	let err = pack(&mut target, &mut entries, &PackConfig::default(), None).unwrap_err();
	assert!(matches!(err, BaleError::UnnamedEntry));
}

#[test]
#[cfg(feature = "builder")]
fn drifting_source_size_is_rejected() {
	// declares five bytes, yields two
	let mut entries = [Entry::new(b"hi".as_slice(), "drift.bin", 5)];
	let mut target = Cursor::new(Vec::new());

	let err = pack(&mut target, &mut entries, &PackConfig::default(), None).unwrap_err();
	assert!(matches!(
		err,
		BaleError::SizeMismatch { declared: 5, actual: 2, .. }
	));
}

#[test]
#[cfg(feature = "builder")]
fn pack_callback_reports_every_frame() {
	let mut entries = [
		Entry::from_bytes(b"hi", "hello.txt"),
		Entry::from_bytes(b"", "empty.bin"),
	];

	let mut seen = Vec::new();
	let mut callback = |name: &str, frame: u64| seen.push((name.to_string(), frame));

	let mut target = Cursor::new(Vec::new());
	let written = pack(&mut target, &mut entries, &PackConfig::default(), Some(&mut callback)).unwrap();

	assert_eq!(seen.len(), 2);
	assert_eq!(seen[0].0, "hello.txt");
	assert_eq!(seen.iter().map(|(_, frame)| frame).sum::<u64>(), written);
}

#[test]
#[cfg(all(feature = "builder", feature = "archive"))]
fn unpack_restores_files_on_disk() {
	let dir = tempfile::tempdir().unwrap();
	let big = big_payload();

	for framing in [Framing::OutOfBand, Framing::Inbound] {
		let mut entries = [
			Entry::from_bytes(b"hi", "hello.txt"),
			Entry::from_bytes(&big, "nested/big.bin"),
		];

		let config = PackConfig::default().framing(framing);
		let mut target = Cursor::new(Vec::new());
		pack(&mut target, &mut entries, &config, None).unwrap();

		target.set_position(0);
		let restored = unpack(target, framing, dir.path()).unwrap();
		assert_eq!(restored, 2);

		assert_eq!(std::fs::read(dir.path().join("hello.txt")).unwrap(), b"hi");
		assert_eq!(std::fs::read(dir.path().join("nested/big.bin")).unwrap(), big);
	}
}

#[test]
#[cfg(all(feature = "builder", feature = "archive"))]
fn traversing_names_do_not_escape_the_target() {
	let dir = tempfile::tempdir().unwrap();
	let inner = dir.path().join("inner");

	let mut entries = [Entry::from_bytes(b"gotcha", "../escape.txt")];
	let mut target = Cursor::new(Vec::new());
	pack(&mut target, &mut entries, &PackConfig::default(), None).unwrap();

	target.set_position(0);
	let err = unpack(target, Framing::OutOfBand, &inner).unwrap_err();

	assert!(matches!(err, BaleError::UnsafeEntryName(_)));
	assert!(!dir.path().join("escape.txt").exists());
}

#[test]
#[cfg(all(feature = "builder", feature = "archive"))]
fn mismatched_framings_do_not_interoperate() {
	let mut entries = [Entry::from_bytes(b"payload", "file.bin")];
	let config = PackConfig::default().framing(Framing::Inbound);

	let mut target = Cursor::new(Vec::new());
	pack(&mut target, &mut entries, &config, None).unwrap();

	// reading a delimited stream as length-prefixed yields nonsense, not files
	target.set_position(0);
	let mut unpacker = Unpacker::new(target, Framing::OutOfBand);

	match unpacker.next_frame() {
		Ok(Some(frame)) => assert_ne!(frame.name, "file.bin"),
		Ok(None) | Err(_) => (),
	}
}

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

/*!
A tiny streaming archiver: packs any number of named byte streams into one
archive stream and unpacks them again, with a small constant memory footprint.

Two wire framings are available, selected with [`Framing`](prelude::Framing):
- *Out-of-band*: every frame starts with fixed-width little-endian length
  fields for the name and the content.
- *Inbound*: frame sections end with the two-byte terminator `00 01`, and
  every literal `0x00` in the payload is doubled so the terminator can never
  occur inside escaped data.

The stream carries no self-describing tag, so packing and unpacking **must**
use the same framing.

### 🔫 Cargo Features
- `builder`: Enables [`pack`](builder::pack) and [`Entry`](builder::Entry).
- `archive`: Enables [`Unpacker`](archive::Unpacker) and [`unpack`](archive::unpack).
- `default`: Enables both of the above.

### 🀄 Show me some code _dang it!_

```
use std::io::Cursor;
use bale::prelude::*;

let mut entries = [
	Entry::from_bytes(b"hi", "hello.txt"),
	Entry::from_bytes(&[0, 0, 1, 0][..], "nulls.bin"),
];

let mut target = Cursor::new(Vec::new());
let config = PackConfig::default().framing(Framing::Inbound);
pack(&mut target, &mut entries, &config, None).unwrap();

// roundtrip
target.set_position(0);
let mut unpacker = Unpacker::new(target, config.framing);

let frame = unpacker.next_frame().unwrap().unwrap();
assert_eq!(frame.name, "hello.txt");

let mut content = Vec::new();
frame.copy_to(&mut content).unwrap();
assert_eq!(content.as_slice(), b"hi");
```
*/

/// All tests are included in this module.
mod tests;

pub(crate) mod codec;
pub(crate) mod global;

#[cfg(feature = "archive")]
#[cfg_attr(docsrs, doc(cfg(feature = "archive")))]
pub(crate) mod loader;

#[cfg(feature = "builder")]
#[cfg_attr(docsrs, doc(cfg(feature = "builder")))]
pub(crate) mod writer;

/// Unit of chunked IO: source files are read, and archive streams refilled,
/// this many bytes at a time. A tunable, not part of the wire format.
pub const CHUNK_SIZE: usize = 100;

/// Consolidated crate imports.
pub mod prelude {
	pub use crate::global::error::{BaleError, BaleResult};
	pub use crate::codec::Framing;

	#[cfg(feature = "archive")]
	pub use crate::archive::*;

	#[cfg(feature = "builder")]
	pub use crate::builder::*;
}

/// Archive creation logic, [`pack`](crate::builder::pack), [`Entry`](crate::builder::Entry) and [`PackConfig`](crate::builder::PackConfig)
#[cfg(feature = "builder")]
#[cfg_attr(docsrs, doc(cfg(feature = "builder")))]
pub mod builder {
	pub use crate::writer::{pack, Entry, PackConfig};
	pub use crate::codec::Framing;
	pub use crate::global::error::*;
}

/// Archive reading logic, [`Unpacker`](crate::archive::Unpacker), [`Frame`](crate::archive::Frame) and [`unpack`](crate::archive::unpack)
#[cfg(feature = "archive")]
#[cfg_attr(docsrs, doc(cfg(feature = "archive")))]
pub mod archive {
	pub use crate::loader::{unpack, Frame, Unpacker};
	pub use crate::codec::Framing;
	pub use crate::global::error::*;
}

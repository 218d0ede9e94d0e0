pub mod inbound;
pub mod out_of_band;
pub mod source;

pub use source::ByteSource;

/// Selects the wire framing used for frame boundaries.
///
/// The archive stream carries no self-describing tag, so the framing chosen
/// when packing **must** be used again when unpacking; mixing them produces
/// garbage, not an early error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
	/// Boundaries are explicit little-endian `u64` length fields written
	/// alongside the data. Content bytes pass through untransformed.
	#[default]
	OutOfBand,
	/// Boundaries are in-band `00 01` terminators; every literal `0x00` in
	/// the payload is doubled so the terminator never occurs in escaped data.
	Inbound,
}

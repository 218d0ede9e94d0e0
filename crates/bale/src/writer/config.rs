use crate::codec::Framing;

/// Settings for [`pack`](crate::writer::pack)
#[derive(Debug, Clone, Copy, Default)]
pub struct PackConfig {
	/// Which wire framing to emit. Extraction must use the same one, the
	/// stream carries no tag.
	pub framing: Framing,
}

impl PackConfig {
	///```
	/// use bale::prelude::{Framing, PackConfig};
	///
	/// let config = PackConfig::default().framing(Framing::Inbound);
	///```
	pub fn framing(mut self, framing: Framing) -> Self {
		self.framing = framing;
		self
	}
}

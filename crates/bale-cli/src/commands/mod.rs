use std::collections::HashMap;

use clap::ArgMatches;
use anyhow::Result;
use bale::prelude::Framing;

use crate::keys::key_names;

// A common progress bar style for all commands
const PROGRESS_BAR_STYLE: &str = "{wide_bar} {pos:>7}/{len:7} ETA {eta_precise}";

// Trait that must be implemented by all subcommands
pub trait CommandTrait: Sync {
	fn evaluate(&self, args: &ArgMatches) -> Result<()>;
}

// All sub-commands are defined in the below modules
pub mod list;
pub mod pack;
pub mod unpack;

pub fn build_commands() -> HashMap<&'static str, Box<dyn CommandTrait>> {
	let mut map: HashMap<&'static str, Box<dyn CommandTrait>> = HashMap::new();

	map.insert("pack", Box::new(pack::Evaluator));
	map.insert("unpack", Box::new(unpack::Evaluator));
	map.insert("list", Box::new(list::Evaluator));

	map
}

// The framing key is shared by every subcommand, the validator already
// limits the value to 'out' or 'in'
pub(crate) fn parse_framing(args: &ArgMatches) -> Framing {
	match args.value_of(key_names::FRAMING) {
		Some("in") => Framing::Inbound,
		_ => Framing::OutOfBand,
	}
}

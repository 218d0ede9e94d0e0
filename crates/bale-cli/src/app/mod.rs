use std::collections::HashMap;
use clap::{Command, Arg};

use crate::keys::key_names;
use crate::commands;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn build_app<'a>(key_map: HashMap<&'static str, Arg<'a>>) -> Command<'a> {
	Command::new("bale-cli")
		.about("A command-line interface for packing and unpacking bale archive streams")
		.version(self::VERSION)
		.subcommand(
			Command::new("pack")
				.version(commands::pack::VERSION)
				.about("Packs all input files into an archive stream, written to a file or stdout")
				// Output file
				.arg(key_map.get(key_names::OUTPUT).unwrap())
				// Data sources
				.arg(key_map.get(key_names::INPUT).unwrap())
				.arg(key_map.get(key_names::DIR_INPUT).unwrap())
				.arg(key_map.get(key_names::DIR_INPUT_REC).unwrap())
				.arg(key_map.get(key_names::EXCLUDE).unwrap())
				// Modifiers
				.arg(key_map.get(key_names::FRAMING).unwrap()),
		)
		.subcommand(
			Command::new("unpack")
				.version(commands::unpack::VERSION)
				.about("Unpacks an archive stream, read from a file or stdin")
				.arg(key_map.get(key_names::INPUT).unwrap())
				.arg(key_map.get(key_names::OUTPUT).unwrap())
				.arg(key_map.get(key_names::FRAMING).unwrap()),
		)
		.subcommand(
			Command::new("list")
				.version(commands::list::VERSION)
				.about("Lists all the entries in an archive stream and their sizes")
				.arg(key_map.get(key_names::INPUT).unwrap())
				.arg(key_map.get(key_names::FRAMING).unwrap())
				.arg(key_map.get(key_names::SORT).unwrap()),
		)
}

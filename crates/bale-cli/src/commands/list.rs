use std::{
	fs::File,
	io::{self, Read},
};

use tabled::{
	Table, Tabled,
	settings::{*, object::Columns},
};
use bale::prelude::*;
use indicatif::HumanBytes;

use super::CommandTrait;
use crate::keys::key_names;

pub const VERSION: &str = "0.1.0";

/// This command lists the entries in an archive stream in tabulated form
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let framing = super::parse_framing(args);

		let source: Box<dyn Read> = match args.value_of(key_names::INPUT) {
			Some(path) => Box::new(File::open(path)?),
			None => Box::new(io::stdin().lock()),
		};

		// Neither framing can seek past content, every frame is drained
		// through a counting sink to learn its size
		let mut unpacker = Unpacker::new(source, framing);
		let mut entries: Vec<(String, u64)> = Vec::new();

		while let Some(frame) = unpacker.next_frame()? {
			let name = frame.name.clone();
			let size = frame.copy_to(&mut io::sink())?;

			entries.push((name, size));
		}

		// Sort the entries accordingly
		match args.value_of(key_names::SORT) {
			Some("alphabetical") => entries.sort_by(|a, b| a.0.cmp(&b.0)),
			Some("alphabetical-reversed") => entries.sort_by(|a, b| b.0.cmp(&a.0)),
			Some("size-ascending") => entries.sort_by(|a, b| a.1.cmp(&b.1)),
			Some("size-descending") => entries.sort_by(|a, b| b.1.cmp(&a.1)),
			Some(sort) => anyhow::bail!("Unknown sort option provided: {}. Valid sort types are: 'alphabetical' 'alphabetical-reversed' 'size-ascending' 'size-descending'", sort),
			_ => (),
		};

		let table_entries: Vec<FileTableEntry> = entries
			.iter()
			.map(|(name, size)| FileTableEntry {
				name,
				size: HumanBytes(*size).to_string(),
			})
			.collect();

		let mut table = Table::new(table_entries);
		table
			.with(Style::rounded())
			.with(Modify::list(Columns::new(..1), Alignment::left()));

		println!("{}", table);

		Ok(())
	}
}

#[derive(Tabled)]
struct FileTableEntry<'a> {
	name: &'a str,
	size: String,
}

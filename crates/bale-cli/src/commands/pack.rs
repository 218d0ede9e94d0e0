use std::{
	collections::HashSet,
	io,
	path::PathBuf,
};

use anyhow::Context;
use bale::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use tempfile::NamedTempFile;
use walkdir;

use super::CommandTrait;
use crate::keys::key_names;

pub const VERSION: &str = "0.1.0";

/// This command packs all input files into one archive stream
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let framing = super::parse_framing(args);

		// Extract entries to be excluded
		let excludes = match args.values_of(key_names::EXCLUDE) {
			Some(val) => val
				.filter_map(|f| {
					let path = PathBuf::from(f);

					match path.canonicalize() {
						Ok(path) => Some(path),
						Err(err) => {
							eprintln!(
								"Failed to evaluate: {}. Skipping due to error: {}",
								path.to_string_lossy(),
								err
							);
							None
						},
					}
				})
				.filter(|v| v.is_file())
				.collect::<HashSet<PathBuf>>(),
			None => HashSet::new(),
		};

		// Used to filter invalid inputs and excluded inputs
		let path_filter = |path: &PathBuf| match path.canonicalize() {
			Ok(canonical) => !excludes.contains(&canonical) && canonical.is_file(),
			Err(err) => {
				eprintln!(
					"Failed to evaluate: {}. Skipping due to error: {}",
					path.to_string_lossy(),
					err
				);
				false
			},
		};

		// Extract the inputs
		let mut inputs = vec![];

		if let Some(val) = args.values_of(key_names::INPUT) {
			val.map(PathBuf::from).filter(|f| path_filter(f)).for_each(|p| inputs.push(p));
		};

		// Extract directory inputs
		if let Some(val) = args.values_of(key_names::DIR_INPUT) {
			val.for_each(|dir| {
				walkdir::WalkDir::new(dir)
					.max_depth(1)
					.into_iter()
					.map(|v| v.unwrap().into_path())
					.filter(|f| path_filter(f))
					.for_each(|p| inputs.push(p))
			});
		};

		// Extract recursive directory inputs
		if let Some(val) = args.values_of(key_names::DIR_INPUT_REC) {
			val.flat_map(|dir| walkdir::WalkDir::new(dir).into_iter())
				.map(|v| v.unwrap().into_path())
				.filter(|f| path_filter(f))
				.for_each(|p| inputs.push(p));
		}

		if inputs.is_empty() {
			anyhow::bail!("Please provide input files using -i, -d or -r");
		}

		// A missing or unreadable source is fatal, a partial frame would be
		// worse than no archive
		let mut entries = Vec::with_capacity(inputs.len());
		for path in &inputs {
			let entry = Entry::from_path(path).with_context(|| format!("failed to open {}", path.to_string_lossy()))?;
			entries.push(entry);
		}

		let progress = ProgressBar::new(entries.len() as u64);
		progress.set_style(
			ProgressStyle::default_bar()
				.template(super::PROGRESS_BAR_STYLE)?
				.progress_chars("█░-"),
		);

		let mut callback = |name: &str, _frame: u64| {
			progress.inc(1);
			progress.set_message(name.to_string());
		};

		let config = PackConfig::default().framing(framing);

		// Archives bound for a file go through a temporary first, so an
		// aborted run never leaves a half-written archive behind
		let bytes_written = match args.value_of(key_names::OUTPUT) {
			Some(path) => {
				let mut temporary_file = NamedTempFile::new()?;
				let bytes_written = pack(&mut temporary_file, &mut entries, &config, Some(&mut callback))?;
				temporary_file.persist(path)?;

				bytes_written
			},
			// stdout owns the archive bytes; all reporting goes to stderr
			None => pack(io::stdout().lock(), &mut entries, &config, Some(&mut callback))?,
		};

		progress.finish_and_clear();
		info!("Packed {} frame(s), {} bytes written", entries.len(), bytes_written);

		Ok(())
	}
}

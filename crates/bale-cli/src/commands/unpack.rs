use std::{
	fs::{self, File},
	io::{self, Read},
	path::{Component, Path, PathBuf},
	str::FromStr,
	time::Instant,
};

use bale::prelude::*;
use indicatif::ProgressBar;
use log::{info, warn};

use super::CommandTrait;
use crate::keys::key_names;

pub const VERSION: &str = "0.1.0";

/// This command unpacks an archive stream into the specified output folder
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let framing = super::parse_framing(args);

		let output_path = match args.value_of(key_names::OUTPUT) {
			Some(path) => PathBuf::from_str(path)?,
			None => Default::default(),
		};

		if output_path.is_file() {
			anyhow::bail!("Please provide a directory|folder path as the value of -o | --output")
		};

		// Archive bytes come from a file, or from stdin when no input is given
		let source: Box<dyn Read> = match args.value_of(key_names::INPUT) {
			Some(path) => match File::open(path) {
				Ok(it) => Box::new(it),
				Err(err) => anyhow::bail!("IOError: {} @ {}", err, path),
			},
			None => Box::new(io::stdin().lock()),
		};

		extract_archive(source, framing, output_path)
	}
}

fn extract_archive(source: Box<dyn Read>, framing: Framing, target_folder: PathBuf) -> anyhow::Result<()> {
	// For measuring the time difference
	let time = Instant::now();
	fs::create_dir_all(&target_folder)?;

	// The stream's total length is unknowable up front, so no bar
	let pbar = ProgressBar::new_spinner();

	let mut unpacker = Unpacker::new(source, framing);
	let mut restored: u64 = 0;
	let mut failed: u64 = 0;

	while let Some(frame) = unpacker.next_frame()? {
		pbar.set_message(frame.name.clone());

		// Archive names are untrusted, anything pointing above the output
		// folder is skipped rather than restored
		let name_path = Path::new(&frame.name);
		if name_path.is_absolute() || name_path.components().any(|c| matches!(c, Component::ParentDir)) {
			warn!("skipping {}: name points outside the output directory", frame.name);
			frame.copy_to(&mut io::sink())?;
			failed += 1;
			pbar.inc(1);

			continue;
		}

		let save_path = target_folder.join(name_path);

		// A file that cannot be restored still has its frame drained, so the
		// stream stays in sync for the frames after it
		let file = save_path
			.ancestors()
			.nth(1)
			.map_or(Ok(()), fs::create_dir_all)
			.and_then(|_| File::create(&save_path));

		match file {
			Ok(mut file) => {
				frame.copy_to(&mut file)?;
				restored += 1;
			},
			Err(err) => {
				warn!("skipping {}: {}", save_path.to_string_lossy(), err);
				frame.copy_to(&mut io::sink())?;
				failed += 1;
			},
		}

		pbar.inc(1);
	}

	// Finished extracting
	pbar.finish_and_clear();
	info!("Extracted {} file(s) in {}s", restored, time.elapsed().as_secs_f64());

	if failed > 0 {
		anyhow::bail!("failed to restore {} file(s)", failed);
	}

	Ok(())
}

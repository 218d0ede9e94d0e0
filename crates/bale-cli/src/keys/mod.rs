use clap::Arg;
use std::collections::HashMap;

pub mod key_names {
	pub(crate) const OUTPUT: &str = "OUTPUT";
	pub(crate) const INPUT: &str = "INPUT";

	pub(crate) const DIR_INPUT: &str = "DIR_INPUT";
	pub(crate) const DIR_INPUT_REC: &str = "DIR_INPUT_REC";

	pub(crate) const EXCLUDE: &str = "EXCLUDE";

	pub(crate) const FRAMING: &str = "FRAMING";
	pub(crate) const SORT: &str = "SORT";
}

pub fn build_keys<'a>() -> HashMap<&'static str, Arg<'a>> {
	/* please only use this function once during the lifecycle of the program */
	let mut map = HashMap::with_capacity(7);

	/* The various keys usable in the CLI */
	// A general output target
	map.insert(
		key_names::OUTPUT,
		Arg::new(key_names::OUTPUT)
			.short('o')
			.long("output")
			.value_name(key_names::OUTPUT)
			.help("A general output target, a file to write the archive to or a directory to unpack into")
			.required(false)
			.takes_value(true)
			.number_of_values(1),
	);

	// A general input source
	map.insert(
		key_names::INPUT,
		Arg::new(key_names::INPUT)
			.long("input")
			.short('i')
			.value_name(key_names::INPUT)
			.help("A general list of input sources, like paths to files")
			.required(false)
			.takes_value(true)
			.multiple_values(true),
	);

	// add all files in a directory into the input queue
	map.insert(
		key_names::DIR_INPUT,
		Arg::new(key_names::DIR_INPUT)
			.long("directory")
			.short('d')
			.value_name(key_names::DIR_INPUT)
			.help("Add all files in a directory into the input queue")
			.required(false)
			.takes_value(true)
			.multiple_values(true),
	);

	// same as above, only that it adds files from the directory recursively
	map.insert(
		key_names::DIR_INPUT_REC,
		Arg::new(key_names::DIR_INPUT_REC)
			.long("directory-r")
			.short('r')
			.value_name(key_names::DIR_INPUT_REC)
			.help("Recursively add all files in a directory into the input queue")
			.required(false)
			.takes_value(true)
			.multiple_values(true),
	);

	// exclude the given files from the write queue
	map.insert(
		key_names::EXCLUDE,
		Arg::new(key_names::EXCLUDE)
			.long("exclude")
			.short('x')
			.value_name(key_names::EXCLUDE)
			.help("Exclude the given paths from the input queue")
			.required(false)
			.takes_value(true)
			.multiple_values(true),
	);

	// which of the two wire framings to speak
	map.insert(
		key_names::FRAMING,
		Arg::new(key_names::FRAMING)
			.long("framing")
			.short('f')
			.value_name(key_names::FRAMING)
			.help("The wire framing to use: 'out' (length-prefixed) or 'in' (delimited). Both ends must agree, the stream carries no tag. Defaults to 'out'")
			.required(false)
			.takes_value(true)
			.number_of_values(1)
			.validator(|framing| {
				if framing != "out" && framing != "in" {
					return Err(format!(
						"Please provide a valid framing, either 'out' or 'in'. Not: {}",
						framing
					));
				};

				Ok(())
			}),
	);

	// how the list subcommand sorts its table
	map.insert(
		key_names::SORT,
		Arg::new(key_names::SORT)
			.long("sort")
			.value_name(key_names::SORT)
			.help("How to sort entries within the table, either based on size or alphabetically")
			.required(false)
			.takes_value(true)
			.number_of_values(1),
	);

	map
}

mod app;
mod commands;
mod keys;

use std::env;
use log::error;

fn main() {
	if env::var("RUST_LOG").is_err() {
		// log level not explicitly set by the user
		env::set_var("RUST_LOG", "info");
	}
	pretty_env_logger::init();

	let keys = keys::build_keys();
	let app = app::build_app(keys);
	let commands = commands::build_commands();

	let matches = app.get_matches();

	let (name, args) = match matches.subcommand() {
		Some(tuple) => tuple,
		None => {
			error!("No subcommand provided! Try: bale --help");
			std::process::exit(1);
		},
	};

	if let Some(command) = commands.get(name) {
		if let Err(err) = command.evaluate(args) {
			error!("An error occurred while executing the command: {}", err);
			std::process::exit(1);
		}
	};
}

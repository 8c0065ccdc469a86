mod args;
mod commands;

use args::{Args, Command};
use clap::Parser;
use colored::Colorize;
use std::process::exit;

fn main() {
    env_logger::init();

    let args = Args::parse();
    let options = args.options();
    let formatter = args.formatter();

    let result = match args.command {
        None | Some(Command::Repl) => commands::repl::run(options, formatter),
        Some(Command::Convert(params)) => commands::convert::run(params, options, formatter),
    };

    if let Err(error) = result {
        eprintln!("{intro}: {error}", intro = "error".bold().red());
        exit(1);
    }
}

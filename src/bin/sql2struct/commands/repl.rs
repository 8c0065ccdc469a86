use super::{export, presentable_code, print_diagnostics, Overwrite};
use colored::Colorize;
use sql2struct::{convert_with, Conversion, Error, Options};
use std::io::{stdin, BufRead};

const HELP: &str = "\
Paste a CREATE TABLE statement, then use one of:
  :p   print what was collected so far
  :r   reset the collected input
  :c   convert the collected input
  :cp  convert the collected input and export it to <table name>.go
  :q   quit
  :h   show this help";

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Print,
    Reset,
    Convert,
    ConvertAndExport,
    Quit,
    Help,
    Line(&'a str),
}

impl<'a> From<&'a str> for ReplCommand<'a> {
    fn from(line: &'a str) -> Self {
        match line.trim() {
            ":p" => ReplCommand::Print,
            ":r" => ReplCommand::Reset,
            ":c" => ReplCommand::Convert,
            ":cp" => ReplCommand::ConvertAndExport,
            ":q" => ReplCommand::Quit,
            ":h" => ReplCommand::Help,
            _ => ReplCommand::Line(line),
        }
    }
}

pub fn run(options: Options, formatter: Option<String>) -> Result<(), Error> {
    println!("{}", HELP.dimmed());

    let mut collected = String::new();

    for line in stdin().lock().lines() {
        let line = line?;

        match ReplCommand::from(line.as_str()) {
            ReplCommand::Line(line) => {
                collected.push_str(line);
                collected.push('\n');
            }
            ReplCommand::Print => println!("{collected}"),
            ReplCommand::Reset => {
                collected.clear();
                println!("{}", "Input cleared".green());
            }
            ReplCommand::Convert => {
                show(&collected, &options, formatter.as_deref(), false);
            }
            ReplCommand::ConvertAndExport => {
                show(&collected, &options, formatter.as_deref(), true);
            }
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", HELP.dimmed()),
        }
    }

    Ok(())
}

/// Errors here only concern the last command, the session keeps going.
fn show(input: &str, options: &Options, formatter: Option<&str>, export_it: bool) {
    let conversion = convert_with(input, options);
    let code = presentable_code(&conversion, formatter);

    println!("{}", "BEGIN".bold().blue());
    println!("{code}");
    println!("{}", "END".bold().blue());
    print_diagnostics(&conversion);

    if export_it {
        export_and_report(&conversion, &code);
    }
}

fn export_and_report(conversion: &Conversion, code: &str) {
    match export(conversion, code, Overwrite::Ask) {
        Ok(path) => println!("{} {}", "Exported to".green(), path.display()),
        Err(error) => eprintln!("{intro}: {error}", intro = "error".bold().red()),
    }
}

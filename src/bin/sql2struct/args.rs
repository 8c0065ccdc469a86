use clap::{Parser, Subcommand};
use sql2struct::Options;
use std::path::PathBuf;

/// Converts MySQL CREATE TABLE statements into Go structs with json and gorm tags.
///
/// Runs an interactive prompt when no command is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Package declared at the top of the generated code.
    #[arg(long, global = true, default_value = "table")]
    pub package: String,
    /// Command the generated code is piped through. It gets the code on stdin and must print the
    /// formatted code on stdout.
    #[arg(long, global = true, default_value = "gofmt -s")]
    pub formatter: String,
    /// Print the generated code without formatting it.
    #[arg(long, global = true)]
    pub no_format: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collects input line by line and converts it on demand. Type :h for the list of commands.
    Repl,
    /// Converts a single statement.
    Convert(ConvertParams),
}

#[derive(clap::Args, Debug)]
pub struct ConvertParams {
    /// File holding the CREATE TABLE statement. Read from stdin when missing.
    pub input: Option<PathBuf>,
    /// Also write the result to <table name>.go in the current directory.
    #[arg(short, long)]
    pub export: bool,
    /// Overwrite the exported file if it already exists.
    #[arg(short, long, requires = "export")]
    pub force: bool,
    /// Print the code, table name and diagnostics as JSON, without formatting.
    #[arg(long, conflicts_with = "export")]
    pub json: bool,
}

impl Args {
    pub fn options(&self) -> Options {
        Options {
            package: self.package.clone(),
        }
    }

    /// None when formatting is turned off.
    pub fn formatter(&self) -> Option<String> {
        if self.no_format || self.formatter.trim().is_empty() {
            None
        } else {
            Some(self.formatter.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sql2struct"]);

        assert!(args.command.is_none());
        assert_eq!(args.options(), Options::default());
        assert_eq!(args.formatter().as_deref(), Some("gofmt -s"));
    }

    #[test]
    fn test_convert() {
        let args = Args::parse_from([
            "sql2struct",
            "convert",
            "users.sql",
            "--export",
            "--force",
            "--package",
            "models",
            "--no-format",
        ]);

        assert_eq!(args.options().package, "models");
        assert_eq!(args.formatter(), None);

        match args.command {
            Some(Command::Convert(params)) => {
                assert_eq!(params.input, Some(PathBuf::from("users.sql")));
                assert!(params.export);
                assert!(params.force);
                assert!(!params.json);
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_json_and_export_conflict() {
        let result = Args::try_parse_from(["sql2struct", "convert", "--json", "--export"]);

        assert!(result.is_err());
    }
}

use colored::Colorize;
use dialoguer::Confirm;
use sql2struct::{Conversion, Error, ErrorKind, InternalError};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub mod convert;
pub mod repl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Ask,
    Always,
    Never,
}

/// Pipes the code through the formatter command, e.g. `gofmt -s`.
pub fn format_code(code: &str, formatter: &str) -> Result<String, Error> {
    let mut parts = formatter.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ErrorKind::FormatterError("Empty formatter command".to_string()))?;

    let mut child = Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // stdin is closed when dropped. A formatter that quits early shows up in its exit status.
    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(code.as_bytes()) {
            Err(error) if error.kind() != std::io::ErrorKind::BrokenPipe => Err(error)?,
            _ => {}
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(ErrorKind::FormatterError(format!(
            "{formatter} exited with {status}: {stderr}",
            status = output.status
        )))?;
    }

    String::from_utf8(output.stdout).map_err(|error| {
        ErrorKind::FormatterError(format!("{formatter} printed invalid UTF-8: {error}")).into()
    })
}

/// The code we show and export. Formatting problems are not fatal, we fall back to our own output.
pub fn presentable_code(conversion: &Conversion, formatter: Option<&str>) -> String {
    match formatter {
        Some(formatter) if conversion.found_table() => {
            match format_code(&conversion.code, formatter) {
                Ok(formatted) => formatted,
                Err(error) => {
                    log::warn!("Formatting failed: {error}");
                    eprintln!("{}", format!("Could not format the code: {error}").yellow());
                    conversion.code.clone()
                }
            }
        }
        _ => conversion.code.clone(),
    }
}

/// Writes `<table name>.go` to the current directory.
pub fn export(conversion: &Conversion, code: &str, overwrite: Overwrite) -> Result<PathBuf, Error> {
    let file_name = conversion.export_file_name().ok_or_else(|| {
        InternalError("No table was found, there is nothing to export".to_string())
    })?;
    let path = std::env::current_dir()?.join(file_name);

    if path.exists() {
        let replace = match overwrite {
            Overwrite::Always => true,
            Overwrite::Never => false,
            Overwrite::Ask => Confirm::new()
                .with_prompt(format!("{} already exists, overwrite it?", path.display()))
                .default(false)
                .interact()?,
        };

        if !replace {
            Err(InternalError(format!(
                "{} already exists, not overwriting it",
                path.display()
            )))?;
        }
    }

    std::fs::write(&path, code)?;
    log::info!("Exported {}", path.display());

    Ok(path)
}

/// Diagnostics go to stderr so they never end up mixed into the code.
pub fn print_diagnostics(conversion: &Conversion) {
    for diagnostic in &conversion.diagnostics {
        eprintln!("{} {}", "warning:".yellow().bold(), diagnostic.to_string().yellow());
    }
}

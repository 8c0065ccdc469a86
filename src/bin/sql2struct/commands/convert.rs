use super::{export, presentable_code, print_diagnostics, Overwrite};
use crate::args::ConvertParams;
use sql2struct::{convert_with, Error, InternalError, Options};
use std::io::Read;

pub fn run(params: ConvertParams, options: Options, formatter: Option<String>) -> Result<(), Error> {
    let input = match &params.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    if params.json {
        // Syntax error messages are coloured, which has no place in JSON.
        colored::control::set_override(false);
    }

    let conversion = convert_with(&input, &options);

    if params.json {
        println!("{}", serde_json::to_string_pretty(&conversion)?);
        return Ok(());
    }

    if !conversion.found_table() {
        print_diagnostics(&conversion);
        Err(InternalError(
            "No CREATE TABLE statement found in the input".to_string(),
        ))?;
    }

    let code = presentable_code(&conversion, formatter.as_deref());
    println!("{code}");
    print_diagnostics(&conversion);

    if params.export {
        let overwrite = if params.force {
            Overwrite::Always
        } else {
            Overwrite::Never
        };
        let path = export(&conversion, &code, overwrite)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

//! MySQL `CREATE TABLE` to Go struct conversion.
//!
//! Why are there so many stages?
//! -----------------------------
//!
//! Doing this with a handful of search and replace calls over the whole statement works, right up
//! until a comment contains `NOT NULL` or a default value contains a comma. Each stage here works
//! on the structured output of the previous one instead of re-scanning text:
//!
//! normalize -> tokenize -> header / footer -> column definitions -> modifiers -> fields -> Go code
mod columns;
mod diagnostics;
mod fields;
mod footer;
mod header;
mod modifiers;
/// Canonical whitespace and keyword casing.
mod normalize;
mod rendering;
/// Structs used to represent the parsed table.
pub mod structure;
/// Uses Pest to turn DDL text into tokens.
pub(crate) mod syntax;
pub mod types;


pub use diagnostics::Diagnostic;
pub use normalize::normalize;
pub use syntax::Rule;

use crate::engine::columns::{split_definitions, Definition};
use crate::engine::fields::generate_fields;
use crate::engine::footer::extract_footer;
use crate::engine::header::parse_header;
use crate::engine::modifiers::classify;
use crate::engine::rendering::GoFile;
use crate::engine::structure::{is_go_identifier, TableDefinition};
use crate::engine::syntax::{join_tokens, tokenize};
use crate::error::ErrorKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Go package the generated file declares.
    pub package: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            package: "table".to_string(),
        }
    }
}

/// Result of a single conversion.
///
/// There is no error case. Whatever we could make sense of ends up in `code`, and everything we
/// could not is listed in `diagnostics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub code: String,
    /// Empty when no table was found. Used to name the exported file.
    pub table_name: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Nothing to convert: the input goes back as it came.
    fn unchanged(input: &str, diagnostic: Diagnostic) -> Self {
        Conversion {
            code: input.to_string(),
            table_name: String::new(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn found_table(&self) -> bool {
        !self.table_name.is_empty()
    }

    /// `users.go` for the `users` table.
    pub fn export_file_name(&self) -> Option<String> {
        self.found_table().then(|| format!("{}.go", self.table_name))
    }
}

pub fn convert(input: &str) -> Conversion {
    convert_with(input, &Options::default())
}

pub fn convert_with(input: &str, options: &Options) -> Conversion {
    let conversion = run_stages(input, options);

    for diagnostic in &conversion.diagnostics {
        log::warn!("{diagnostic}");
    }

    conversion
}

fn run_stages(input: &str, options: &Options) -> Conversion {
    let normalized = normalize(input);
    log::debug!("Normalized input:\n{normalized}");

    let tokens = match tokenize(&normalized) {
        Ok(tokens) => tokens,
        Err(error) => {
            // Positions in the message refer to the normalized text, not the input.
            let message = match error.into_inner() {
                ErrorKind::SyntaxError(syntax_error) => syntax_error.to_string(),
                other => other.to_string(),
            };
            return Conversion::unchanged(input, Diagnostic::InvalidSyntax { message });
        }
    };
    log::debug!("Read {} tokens", tokens.len());

    let Some(header) = parse_header(&tokens) else {
        return Conversion::unchanged(input, Diagnostic::NoTableFound);
    };
    log::debug!(
        "Found table {} ({}), body starts at byte {}",
        header.table_name,
        header.model_name,
        tokens[header.body_start].position.start
    );

    let mut diagnostics = Vec::new();

    if !is_go_identifier(&header.model_name) {
        diagnostics.push(Diagnostic::InvalidIdentifier {
            name: header.table_name.to_string(),
            identifier: header.model_name.clone(),
        });
    }

    let footer = extract_footer(&tokens, header.body_start);
    if !footer.terminated {
        diagnostics.push(Diagnostic::UnterminatedTable {
            table: header.table_name.to_string(),
        });
    }

    let mut columns = Vec::new();
    for definition in split_definitions(&tokens[header.body_start + 1..footer.body_end]) {
        match definition {
            Definition::Column(column_tokens) => {
                let (column, column_diagnostics) = classify(&column_tokens);
                log::debug!("Column {}: {}", column.ordinal, column.raw_name);

                columns.push(column);
                diagnostics.extend(column_diagnostics);
            }
            Definition::Key(key) => log::debug!("Dropping key: {}", join_tokens(key)),
            Definition::Other(other) => diagnostics.push(Diagnostic::SkippedDefinition {
                definition: join_tokens(other),
            }),
        }
    }

    let table = TableDefinition {
        name: header.table_name.to_string(),
        comment: footer.table_comment,
        columns,
    };

    let (fields, field_diagnostics) = generate_fields(&table);
    diagnostics.extend(field_diagnostics);

    let code = GoFile {
        package: &options.package,
        model_name: &header.model_name,
        table_name: &table.name,
        table_comment: table.comment.as_deref(),
        fields: &fields,
        terminated: footer.terminated,
    }
    .to_string();

    Conversion {
        code,
        table_name: table.name,
        diagnostics,
    }
}

use serde::Serialize;
use thiserror::Error;

/// Something the user should look at before trusting the generated code.
///
/// None of these stop a conversion. The output is meant to be hand edited anyway, so we always
/// produce as much of it as we can and list what went wrong next to it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    #[error("No CREATE TABLE `table_name` statement found")]
    NoTableFound,
    #[error("Could not find the end of table `{table}` (expected `) ENGINE=...`), the struct is left open")]
    UnterminatedTable { table: String },
    #[error("Ignored `{modifier}` on column `{column}`")]
    UnrecognizedModifier { column: String, modifier: String },
    #[error("Column `{column}` has type `{sql_type}`, which has no Go equivalent, used `unknown` instead")]
    UnmappedType { column: String, sql_type: String },
    #[error("Columns `{first}` and `{second}` are both exported as `{exported_name}`")]
    DuplicateColumnName {
        first: String,
        second: String,
        exported_name: String,
    },
    #[error("`{name}` turns into `{identifier}`, which is not a valid Go identifier")]
    InvalidIdentifier { name: String, identifier: String },
    #[error("Skipped table definition `{definition}`")]
    SkippedDefinition { definition: String },
    #[error("Could not tokenize input:\n{message}")]
    InvalidSyntax { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::UnmappedType {
            column: "area".to_string(),
            sql_type: "geometry".to_string(),
        };

        assert_eq!(
            diagnostic.to_string(),
            "Column `area` has type `geometry`, which has no Go equivalent, used `unknown` instead"
        );
    }

    #[test]
    fn test_serialize() {
        let diagnostic = Diagnostic::UnrecognizedModifier {
            column: "id".to_string(),
            modifier: "GENERATED".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&diagnostic).unwrap(),
            r#"{"kind":"UnrecognizedModifier","column":"id","modifier":"GENERATED"}"#
        );
        assert_eq!(
            serde_json::to_string(&Diagnostic::NoTableFound).unwrap(),
            r#"{"kind":"NoTableFound"}"#
        );
    }
}

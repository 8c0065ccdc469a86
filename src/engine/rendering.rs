//! Writes out the Go file.
//!
//! ```go
//! package table
//!
//! import "time"
//!
//! const UsersTN = "users"
//!
//! type Users struct {
//! 	Id        int        `json:"id" gorm:"column:id;type:int(11);not null;primary_key;AUTO_INCREMENT"`
//! 	CreatedAt *time.Time `json:"created_at" gorm:"column:created_at;type:timestamp"` // signup
//! }
//! ```
//!
//! Columns are aligned the same way gofmt would, so the output reads fine even if nobody runs a
//! formatter on it.
use crate::engine::structure::GeneratedField;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub struct GoFile<'a> {
    pub package: &'a str,
    pub model_name: &'a str,
    pub table_name: &'a str,
    pub table_comment: Option<&'a str>,
    pub fields: &'a [GeneratedField],
    /// Whether to close the struct. We don't when we could not find the end of the table.
    pub terminated: bool,
}

impl Display for GoFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let GoFile {
            package,
            model_name,
            table_name,
            table_comment,
            fields,
            terminated,
        } = self;

        writeln!(f, "package {package}")?;
        writeln!(f)?;

        write!(f, "{}", Imports::for_fields(fields))?;

        writeln!(f, "const {model_name}TN = \"{table_name}\"")?;
        writeln!(f)?;

        if let Some(comment) = table_comment {
            let single_line: Vec<_> = comment.lines().map(str::trim).collect();
            writeln!(f, "// {model_name} {}", single_line.join(" "))?;
        }

        writeln!(f, "type {model_name} struct {{")?;
        write!(f, "{}", FieldList(fields))?;

        if *terminated {
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

struct Imports(BTreeSet<&'static str>);

impl Imports {
    fn for_fields(fields: &[GeneratedField]) -> Self {
        Imports(fields.iter().filter_map(|field| field.import).collect())
    }
}

/// Nothing at all when there's nothing to import, the single line form for one package and a
/// block for more.
impl Display for Imports {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut imports = self.0.iter();

        match (imports.next(), imports.next()) {
            (None, _) => return Ok(()),
            (Some(only), None) => writeln!(f, "import \"{only}\"")?,
            _ => {
                writeln!(f, "import (")?;
                for import in &self.0 {
                    writeln!(f, "\t\"{import}\"")?;
                }
                writeln!(f, ")")?;
            }
        }

        writeln!(f)
    }
}

struct FieldList<'a>(&'a [GeneratedField]);

impl Display for FieldList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self.0;
        let tags: Vec<String> = fields.iter().map(tag).collect();

        let name_width = max_width(fields.iter().map(|field| field.exported_name.as_str()));
        let type_width = max_width(fields.iter().map(|field| field.target_type.as_str()));
        let comment_columns = comment_columns(fields, &tags);

        for ((field, tag), comment_column) in fields.iter().zip(&tags).zip(comment_columns) {
            write!(
                f,
                "\t{name:<name_width$} {target_type:<type_width$} ",
                name = field.exported_name,
                target_type = field.target_type,
            )?;

            match &field.comment {
                Some(comment) => writeln!(f, "{tag:<comment_column$} // {comment}")?,
                None => writeln!(f, "{tag}")?,
            }
        }

        Ok(())
    }
}

fn tag(field: &GeneratedField) -> String {
    format!(
        "`json:\"{json}\" gorm:\"{orm}\"`",
        json = field.json_tag,
        orm = field.orm_tag
    )
}

fn max_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|value| value.chars().count()).max().unwrap_or(0)
}

/// Trailing comments are aligned within each run of consecutive commented fields, like gofmt
/// does. A field without a comment breaks the run.
fn comment_columns(fields: &[GeneratedField], tags: &[String]) -> Vec<usize> {
    let mut widths = vec![0; fields.len()];
    let mut run_start = 0;

    for index in 0..=fields.len() {
        let commented = fields.get(index).map_or(false, |field| field.comment.is_some());

        if !commented {
            let run = run_start..index;
            let width = max_width(tags[run.clone()].iter().map(String::as_str));
            widths[run].iter_mut().for_each(|slot| *slot = width);

            run_start = index + 1;
        }
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, target_type: &str, orm: &str, comment: Option<&str>) -> GeneratedField {
        GeneratedField {
            exported_name: name.to_string(),
            json_tag: name.to_lowercase(),
            orm_tag: orm.to_string(),
            target_type: target_type.to_string(),
            comment: comment.map(str::to_string),
            import: if target_type.contains("time.Time") {
                Some("time")
            } else {
                None
            },
        }
    }

    fn file<'a>(fields: &'a [GeneratedField], terminated: bool) -> GoFile<'a> {
        GoFile {
            package: "table",
            model_name: "Users",
            table_name: "users",
            table_comment: None,
            fields,
            terminated,
        }
    }

    #[test]
    fn test_render() {
        let fields = [
            field("Id", "int", "column:id", None),
            field("Name", "string", "column:name", Some("user name")),
        ];

        assert_eq!(
            file(&fields, true).to_string(),
            "package table\n\
             \n\
             const UsersTN = \"users\"\n\
             \n\
             type Users struct {\n\
             \tId   int    `json:\"id\" gorm:\"column:id\"`\n\
             \tName string `json:\"name\" gorm:\"column:name\"` // user name\n\
             }\n"
        );
    }

    #[test]
    fn test_time_import_and_comment_alignment() {
        let fields = [
            field("A", "*time.Time", "column:a", Some("first")),
            field("Bb", "int", "column:bb_long", Some("second")),
            field("C", "int", "column:c", None),
            field("D", "int", "column:d", Some("third")),
        ];

        assert_eq!(
            file(&fields, true).to_string(),
            "package table\n\
             \n\
             import \"time\"\n\
             \n\
             const UsersTN = \"users\"\n\
             \n\
             type Users struct {\n\
             \tA  *time.Time `json:\"a\" gorm:\"column:a\"`        // first\n\
             \tBb int        `json:\"bb\" gorm:\"column:bb_long\"` // second\n\
             \tC  int        `json:\"c\" gorm:\"column:c\"`\n\
             \tD  int        `json:\"d\" gorm:\"column:d\"` // third\n\
             }\n"
        );
    }

    #[test]
    fn test_unterminated_and_table_comment() {
        let fields = [field("Id", "int", "column:id", None)];
        let mut go_file = file(&fields, false);
        go_file.table_comment = Some("All the users\n  we know of");

        assert_eq!(
            go_file.to_string(),
            "package table\n\
             \n\
             const UsersTN = \"users\"\n\
             \n\
             // Users All the users we know of\n\
             type Users struct {\n\
             \tId int `json:\"id\" gorm:\"column:id\"`\n"
        );
    }

    #[test]
    fn test_import_block() {
        let mut imports = BTreeSet::new();
        imports.insert("time");
        imports.insert("database/sql");

        assert_eq!(
            Imports(imports).to_string(),
            "import (\n\t\"database/sql\"\n\t\"time\"\n)\n\n"
        );
        assert_eq!(Imports(BTreeSet::new()).to_string(), "");
    }
}

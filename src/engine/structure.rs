//! Structures used to represent the table we're converting.
//!
//! None of these outlive a single conversion, they're just a convenient hand-off format between
//! the parsing stages and the code emitter.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    /// Lower case table identifier, exactly as it was written between the backticks.
    pub name: String,
    /// Found in the table options: `) ENGINE=InnoDB COMMENT='...'`
    pub comment: Option<String>,
    /// In declaration order.
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub ordinal: usize,
    pub raw_name: String,
    /// Lower case type name, `double precision` for the only two word type we know of.
    pub sql_type: String,
    /// Whatever was between the parens after the type name: `11`, `10,2`, `'a','b'`.
    pub type_args: Option<String>,
    pub nullable: bool,
    pub unsigned: bool,
    pub auto_increment: bool,
    pub is_primary_key: bool,
    pub default_value: Option<DefaultValue>,
    /// Already escaped: commas are replaced with `|` and line breaks with spaces.
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DefaultValue {
    /// `DEFAULT 'abc'`, stored without quotes.
    Literal(String),
    /// `DEFAULT 12`, `DEFAULT -1.5e3`, `DEFAULT 0x1F`, `DEFAULT b'0'`. Kept exactly as written.
    Number(String),
    /// `DEFAULT CURRENT_TIMESTAMP`, `DEFAULT NULL`, `DEFAULT (uuid())`. Rendered as is.
    Keyword(String),
}

/// One line of the emitted struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedField {
    pub exported_name: String,
    /// Value of the `json:"..."` tag.
    pub json_tag: String,
    /// Value of the `gorm:"..."` tag.
    pub orm_tag: String,
    pub target_type: String,
    pub comment: Option<String>,
    /// Go package the target type needs, if any.
    #[serde(skip)]
    pub import: Option<&'static str>,
}

impl ColumnDefinition {
    /// Bare column, the way SQL sees a column with no modifiers at all.
    pub fn new(ordinal: usize, raw_name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        ColumnDefinition {
            ordinal,
            raw_name: raw_name.into(),
            sql_type: sql_type.into(),
            type_args: None,
            nullable: true,
            unsigned: false,
            auto_increment: false,
            is_primary_key: false,
            default_value: None,
            comment: None,
        }
    }

    /// `int(11)`, `varchar(64)`, `text`
    pub fn full_type(&self) -> String {
        match &self.type_args {
            Some(args) => format!("{}({})", self.sql_type, args),
            None => self.sql_type.clone(),
        }
    }
}

impl DefaultValue {
    pub fn value(&self) -> &str {
        match self {
            DefaultValue::Literal(value)
            | DefaultValue::Number(value)
            | DefaultValue::Keyword(value) => value,
        }
    }
}

/// `order_items` -> `OrderItems`, `parentId` -> `ParentId`.
///
/// Only the first letter of each underscore separated segment changes, the rest is kept as is.
pub fn exported_name(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Go identifiers start with a letter or underscore, then letters, digits and underscores.
pub fn is_go_identifier(name: &str) -> bool {
    static IDENTIFIER_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").unwrap());

    IDENTIFIER_REGEX.is_match(name)
}

//! SQL type to Go type lookup table.
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeFamily {
    Integer,
    Float,
    String,
    Temporal,
    Bool,
    Bytes,
}

#[derive(Debug)]
pub struct TypeMapping {
    pub sql_types: &'static [&'static str],
    pub family: TypeFamily,
    pub target_type: &'static str,
    /// Used for nullable columns. Only temporal types have a different one.
    pub nullable_target_type: &'static str,
    pub import: Option<&'static str>,
}

/// Emitted for columns whose type is not in the table. It won't compile, which is the point.
pub const UNKNOWN_TYPE: &str = "unknown";

static TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping {
        sql_types: &["tinyint", "smallint", "mediumint", "int", "integer", "bigint"],
        family: TypeFamily::Integer,
        target_type: "int",
        nullable_target_type: "int",
        import: None,
    },
    TypeMapping {
        sql_types: &[
            "decimal",
            "dec",
            "numeric",
            "fixed",
            "float",
            "double",
            "double precision",
            "real",
        ],
        family: TypeFamily::Float,
        target_type: "float64",
        nullable_target_type: "float64",
        import: None,
    },
    TypeMapping {
        sql_types: &["varchar", "char", "year", "enum"],
        family: TypeFamily::String,
        target_type: "string",
        nullable_target_type: "string",
        import: None,
    },
    TypeMapping {
        sql_types: &["text", "tinytext", "mediumtext", "longtext", "json", "set"],
        family: TypeFamily::String,
        target_type: "string",
        nullable_target_type: "string",
        import: None,
    },
    TypeMapping {
        sql_types: &["timestamp", "datetime", "date"],
        family: TypeFamily::Temporal,
        target_type: "time.Time",
        nullable_target_type: "*time.Time",
        import: Some("time"),
    },
    TypeMapping {
        sql_types: &["bool", "boolean"],
        family: TypeFamily::Bool,
        target_type: "bool",
        nullable_target_type: "bool",
        import: None,
    },
    TypeMapping {
        sql_types: &[
            "binary",
            "varbinary",
            "blob",
            "tinyblob",
            "mediumblob",
            "longblob",
            "bit",
        ],
        family: TypeFamily::Bytes,
        target_type: "[]byte",
        nullable_target_type: "[]byte",
        import: None,
    },
];

static MAPPINGS_BY_SQL_TYPE: Lazy<HashMap<&'static str, &'static TypeMapping>> = Lazy::new(|| {
    TYPE_MAPPINGS
        .iter()
        .flat_map(|mapping| mapping.sql_types.iter().map(move |sql_type| (*sql_type, mapping)))
        .collect()
});

/// Case insensitive.
pub fn lookup(sql_type: &str) -> Option<&'static TypeMapping> {
    MAPPINGS_BY_SQL_TYPE
        .get(sql_type.to_ascii_lowercase().as_str())
        .copied()
}

impl TypeMapping {
    pub fn target_for(&self, nullable: bool) -> &'static str {
        if nullable {
            self.nullable_target_type
        } else {
            self.target_type
        }
    }

    /// Numbers don't get quoted when used as defaults.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.family,
            TypeFamily::Integer | TypeFamily::Float | TypeFamily::Bool
        )
    }
}

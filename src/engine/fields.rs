//! Turns classified columns into struct fields: Go name, Go type and tags.
use crate::engine::diagnostics::Diagnostic;
use crate::engine::structure::{
    exported_name, is_go_identifier, ColumnDefinition, DefaultValue, GeneratedField,
    TableDefinition,
};
use crate::engine::types::{lookup, TypeMapping, UNKNOWN_TYPE};
use std::collections::HashMap;

pub fn generate_fields(table: &TableDefinition) -> (Vec<GeneratedField>, Vec<Diagnostic>) {
    assert!(
        table
            .columns
            .windows(2)
            .all(|pair| pair[0].ordinal < pair[1].ordinal),
        "Column ordinals of `{}` are not strictly increasing",
        table.name
    );

    let mut fields = Vec::with_capacity(table.columns.len());
    let mut diagnostics = Vec::new();
    let mut seen_names: HashMap<String, &str> = HashMap::new();

    for column in &table.columns {
        let mapping = lookup(&column.sql_type);
        if mapping.is_none() {
            diagnostics.push(Diagnostic::UnmappedType {
                column: column.raw_name.clone(),
                sql_type: column.sql_type.clone(),
            });
        }

        let field = generate_field(column, mapping);

        if !is_go_identifier(&field.exported_name) {
            diagnostics.push(Diagnostic::InvalidIdentifier {
                name: column.raw_name.clone(),
                identifier: field.exported_name.clone(),
            });
        }

        if let Some(first) = seen_names.get(&field.exported_name) {
            diagnostics.push(Diagnostic::DuplicateColumnName {
                first: first.to_string(),
                second: column.raw_name.clone(),
                exported_name: field.exported_name.clone(),
            });
        } else {
            seen_names.insert(field.exported_name.clone(), &column.raw_name);
        }

        fields.push(field);
    }

    (fields, diagnostics)
}

fn generate_field(column: &ColumnDefinition, mapping: Option<&TypeMapping>) -> GeneratedField {
    let target_type = mapping.map_or(UNKNOWN_TYPE, |mapping| mapping.target_for(column.nullable));

    GeneratedField {
        exported_name: exported_name(&column.raw_name),
        json_tag: escape_tag_value(&column.raw_name),
        orm_tag: escape_tag_value(&orm_tag(column, mapping)),
        target_type: target_type.to_string(),
        comment: column.comment.clone(),
        import: mapping.and_then(|mapping| mapping.import),
    }
}

/// `column:id;type:int(11);not null;unsigned;default:0;primary_key;AUTO_INCREMENT`
///
/// The order is always the same, no matter what order the modifiers were written in.
fn orm_tag(column: &ColumnDefinition, mapping: Option<&TypeMapping>) -> String {
    let mut parts = vec![
        format!("column:{}", column.raw_name),
        format!("type:{}", column.full_type()),
    ];

    if !column.nullable {
        parts.push("not null".to_string());
    }
    if column.unsigned {
        parts.push("unsigned".to_string());
    }
    if let Some(default_value) = &column.default_value {
        // gorm splits its tag on `;` unless it is escaped with a backslash
        let value = default_literal(default_value, mapping).replace(';', "\\;");
        parts.push(format!("default:{value}"));
    }
    if column.is_primary_key {
        parts.push("primary_key".to_string());
    }
    if column.auto_increment {
        parts.push("AUTO_INCREMENT".to_string());
    }

    parts.join(";")
}

/// Numbers go in as they are, even when the DDL quoted them. Everything else that was a string
/// literal gets single quotes.
fn default_literal(default_value: &DefaultValue, mapping: Option<&TypeMapping>) -> String {
    match default_value {
        DefaultValue::Literal(value) if !mapping.map_or(false, TypeMapping::is_numeric) => {
            format!("'{}'", value.replace('\'', "''"))
        }
        other => other.value().to_string(),
    }
}

/// Tags live inside a Go raw string, and each value inside double quotes. Go unquotes those
/// values, so backslashes have to be doubled.
fn escape_tag_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('`', "'")
}

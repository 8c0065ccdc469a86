//! Splits the table body into one token slice per definition.
//!
//! A definition is everything between two commas that are not inside parens. The comma in
//! `decimal(10,2)` or in `enum('a','b')` doesn't split anything.
use crate::engine::footer::is_key_definition;
use crate::engine::syntax::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition<'a> {
    Column(ColumnTokens<'a>),
    /// Keys and indexes. Recognized, but their content is not used.
    Key(&'a [Token<'a>]),
    /// Anything we don't know how to deal with, like CHECK constraints.
    Other(&'a [Token<'a>]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTokens<'a> {
    /// Position among the columns, starting at 1.
    pub ordinal: usize,
    pub name: &'a str,
    /// Type and modifiers: `int(11) NOT NULL AUTO_INCREMENT`
    pub rest: &'a [Token<'a>],
}

pub fn split_definitions<'a>(body: &'a [Token<'a>]) -> Vec<Definition<'a>> {
    let mut definitions = Vec::new();
    let mut ordinal = 0;

    for definition in split_top_level(body) {
        // Keys go first, so that no key line can ever be mistaken for a column.
        if is_key_definition(definition) {
            definitions.push(Definition::Key(definition));
            continue;
        }

        match definition.split_first() {
            Some((name, rest)) if name.kind == TokenKind::QuotedName => {
                ordinal += 1;
                definitions.push(Definition::Column(ColumnTokens {
                    ordinal,
                    name: name.inner,
                    rest,
                }));
            }
            _ => definitions.push(Definition::Other(definition)),
        }
    }

    definitions
}

fn split_top_level<'a>(body: &'a [Token<'a>]) -> Vec<&'a [Token<'a>]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, token) in body.iter().enumerate() {
        if token.is_symbol('(') {
            depth += 1;
        } else if token.is_symbol(')') {
            depth = depth.saturating_sub(1);
        } else if token.is_symbol(',') && depth == 0 {
            parts.push(&body[start..index]);
            start = index + 1;
        }
    }
    parts.push(&body[start..]);

    parts.retain(|part| !part.is_empty());

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::syntax::tokenize;

    #[test]
    fn test_split_definitions() {
        let tokens = tokenize(
            "`id` int(11) NOT NULL AUTO_INCREMENT,
             `price` decimal(10,2) DEFAULT '0.00' COMMENT 'a, b',
             `kind` enum('a','b'),
             PRIMARY KEY (`id`),
             KEY `idx_kind` (`kind`, `price`),
             CHECK (`price` > 0),",
        )
        .unwrap();

        let definitions = split_definitions(&tokens);
        assert_eq!(definitions.len(), 6);

        let columns: Vec<_> = definitions
            .iter()
            .filter_map(|definition| match definition {
                Definition::Column(column) => Some(column),
                _ => None,
            })
            .collect();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].ordinal, 1);
        assert_eq!(columns[0].rest.len(), 7);
        assert_eq!(columns[1].name, "price");
        assert_eq!(columns[1].ordinal, 2);
        assert_eq!(columns[2].name, "kind");
        assert_eq!(columns[2].ordinal, 3);

        assert!(matches!(definitions[3], Definition::Key(_)));
        assert!(matches!(definitions[4], Definition::Key(_)));
        assert!(matches!(definitions[5], Definition::Other(_)));
    }

    #[test]
    fn test_empty_body() {
        let tokens = tokenize("").unwrap();

        assert!(split_definitions(&tokens).is_empty());
    }
}

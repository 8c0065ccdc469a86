//! The end of the table: `) ENGINE=InnoDB AUTO_INCREMENT=3 DEFAULT CHARSET=utf8mb4 COMMENT='...'`
//!
//! Also knows which body lines are keys and indexes. We drop those entirely, but they have to be
//! recognized before the column tokenizer gets to them.
use crate::engine::syntax::{matching_paren, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// Index of the `)` closing the table body, or the token count if there isn't one.
    pub body_end: usize,
    /// Whether we found a table closing clause we know. Without one, the struct is left open.
    pub terminated: bool,
    pub table_comment: Option<String>,
}

/// Table options that mark the end of a CREATE TABLE statement.
fn is_closing_option(tokens: &[Token<'_>]) -> bool {
    match tokens {
        [first, ..] if first.is_word("ENGINE") || first.is_word("ROW_FORMAT") => true,
        [first, second, ..] => first.is_word("AUTO_INCREMENT") && second.is_symbol('='),
        _ => false,
    }
}

pub fn extract_footer(tokens: &[Token<'_>], body_start: usize) -> Footer {
    let Some(body_end) = matching_paren(tokens, body_start) else {
        return Footer {
            body_end: tokens.len(),
            terminated: false,
            table_comment: None,
        };
    };

    let options = &tokens[body_end + 1..];
    let options = match options.iter().position(|token| token.is_symbol(';')) {
        Some(end) => &options[..end],
        None => options,
    };

    Footer {
        body_end,
        terminated: is_closing_option(options),
        table_comment: table_comment(options),
    }
}

fn table_comment(options: &[Token<'_>]) -> Option<String> {
    let start = options.iter().position(|token| token.is_word("COMMENT"))?;
    let mut rest = &options[start + 1..];

    if rest.first().map_or(false, |token| token.is_symbol('=')) {
        rest = &rest[1..];
    }

    rest.first()
        .filter(|token| token.kind == TokenKind::StringLiteral)
        .map(|token| token.unescaped())
}

/// `PRIMARY KEY (...)`, `UNIQUE KEY ...`, `KEY ...`, `CONSTRAINT ... FOREIGN KEY ...` and friends.
///
/// `CONSTRAINT [name] CHECK (...)` is a check, not a key, same as a bare `CHECK (...)`.
pub fn is_key_definition(definition: &[Token<'_>]) -> bool {
    const KEY_STARTERS: &[&str] = &[
        "PRIMARY",
        "UNIQUE",
        "KEY",
        "INDEX",
        "FULLTEXT",
        "SPATIAL",
        "FOREIGN",
    ];

    match definition {
        [constraint, rest @ ..] if constraint.is_word("CONSTRAINT") => {
            !rest.iter().take(2).any(|token| token.is_word("CHECK"))
        }
        [first, ..] => KEY_STARTERS.iter().any(|keyword| first.is_word(keyword)),
        [] => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::syntax::tokenize;

    fn footer(input: &str) -> Footer {
        let tokens = tokenize(input).unwrap();

        extract_footer(&tokens, 0)
    }

    #[test]
    fn test_engine() {
        let footer = footer("( `a` int ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;");

        assert_eq!(footer.body_end, 3);
        assert!(footer.terminated);
        assert_eq!(footer.table_comment, None);
    }

    #[test]
    fn test_other_closing_options() {
        assert!(footer("( `a` int ) AUTO_INCREMENT=5 ENGINE=InnoDB").terminated);
        assert!(footer("( `a` int ) ROW_FORMAT=DYNAMIC").terminated);
    }

    #[test]
    fn test_unterminated() {
        let unclosed = footer("( `a` int, `b` varchar(2)");
        assert!(!unclosed.terminated);
        assert_eq!(unclosed.body_end, 9);

        assert!(!footer("( `a` int );").terminated);
        assert!(!footer("( `a` int ) DEFAULT CHARSET=utf8").terminated);
        assert!(!footer("( `a` int ) AUTO_INCREMENT 5").terminated);
    }

    #[test]
    fn test_nested_parens_in_body() {
        let footer = footer("( `a` decimal(10,2), PRIMARY KEY (`a`)) ENGINE=InnoDB");

        assert_eq!(footer.body_end, 14);
        assert!(footer.terminated);
    }

    #[test]
    fn test_table_comment() {
        let footer = footer("( `a` int ) ENGINE=InnoDB COMMENT='Users, and it''s data'; COMMENT 'x'");

        assert_eq!(footer.table_comment.as_deref(), Some("Users, and it's data"));
    }

    #[test]
    fn test_key_definitions() {
        let keys = [
            "PRIMARY KEY (`id`)",
            "UNIQUE KEY `uk_name` (`name`)",
            "KEY `idx_a` (`a`)",
            "INDEX `idx_b` (`b`)",
            "FULLTEXT KEY `ft` (`c`)",
            "CONSTRAINT `fk` FOREIGN KEY (`a`) REFERENCES `b` (`id`)",
        ];

        for key in keys {
            let tokens = tokenize(key).unwrap();
            assert!(is_key_definition(&tokens), "{key} should be a key");
        }

        let not_keys = [
            "`key` int",
            "CHECK (`a` > 0)",
            "CONSTRAINT `positive_a` CHECK (`a` > 0)",
            "CONSTRAINT CHECK (`a` > 0)",
        ];

        for not_key in not_keys {
            let tokens = tokenize(not_key).unwrap();
            assert!(!is_key_definition(&tokens), "{not_key} should not be a key");
        }
    }
}

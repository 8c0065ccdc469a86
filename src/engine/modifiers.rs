//! Reads the type and the modifiers of a single column.
//!
//! ```text
//! `id` int(11) unsigned NOT NULL AUTO_INCREMENT COMMENT 'Primary id',
//!      ^^^^^^^ type     ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ modifiers
//! ```
//!
//! Modifiers can come in any order. Each one is recognized by one of the [EXTRACTORS], which
//! either consumes some tokens from the front of the remaining input or declines. Tokens nobody
//! wants are reported and dropped.
use crate::engine::columns::ColumnTokens;
use crate::engine::diagnostics::Diagnostic;
use crate::engine::structure::{ColumnDefinition, DefaultValue};
use crate::engine::syntax::{join_tokens, matching_paren, Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Default)]
struct Modifiers {
    nullable: Option<bool>,
    unsigned: bool,
    auto_increment: bool,
    primary_key: bool,
    default_value: Option<DefaultValue>,
    comment: Option<String>,
}

/// Returns how many tokens were consumed, or None if the input does not start with the modifier.
/// Extractors must not touch the modifiers when they return None.
type Extractor = fn(&[Token<'_>], &mut Modifiers) -> Option<usize>;

const EXTRACTORS: &[Extractor] = &[
    not_null,
    null,
    unsigned,
    auto_increment,
    primary_key,
    default_value,
    comment,
    on_update,
    harmless,
];

pub fn classify(column: &ColumnTokens<'_>) -> (ColumnDefinition, Vec<Diagnostic>) {
    let tokens = column.rest;
    let (sql_type, type_args, mut position) = parse_type(tokens);

    let mut modifiers = Modifiers::default();
    let mut diagnostics = Vec::new();
    let mut unrecognized_from = None;

    let mut report = |unrecognized: &[Token<'_>]| {
        diagnostics.push(Diagnostic::UnrecognizedModifier {
            column: column.name.to_string(),
            modifier: join_tokens(unrecognized),
        })
    };

    while position < tokens.len() {
        let rest = &tokens[position..];

        match EXTRACTORS
            .iter()
            .find_map(|extract| extract(rest, &mut modifiers))
        {
            Some(consumed) => {
                if let Some(start) = unrecognized_from.take() {
                    report(&tokens[start..position]);
                }
                position += consumed;
            }
            None => {
                unrecognized_from.get_or_insert(position);
                position += skip_len(rest);
            }
        }
    }

    if let Some(start) = unrecognized_from {
        report(&tokens[start..]);
    }

    let column = ColumnDefinition {
        ordinal: column.ordinal,
        raw_name: column.name.to_string(),
        sql_type,
        type_args,
        nullable: modifiers.nullable.unwrap_or(true),
        unsigned: modifiers.unsigned,
        auto_increment: modifiers.auto_increment,
        // MySQL only allows AUTO_INCREMENT on key columns, and in practice that's the primary key.
        is_primary_key: modifiers.primary_key || modifiers.auto_increment,
        default_value: modifiers.default_value,
        comment: modifiers.comment,
    };

    (column, diagnostics)
}

/// The type name, the text between its parens (if any) and where the modifiers begin.
fn parse_type(tokens: &[Token<'_>]) -> (String, Option<String>, usize) {
    let (sql_type, mut position) = match tokens {
        [double, precision, ..] if double.is_word("double") && precision.is_word("precision") => {
            ("double precision".to_string(), 2)
        }
        [name, ..] if name.kind == TokenKind::Word => (name.text.to_ascii_lowercase(), 1),
        _ => (String::new(), 0),
    };

    let mut type_args = None;
    if position > 0 && tokens.get(position).map_or(false, |t| t.is_symbol('(')) {
        if let Some(close) = matching_paren(tokens, position) {
            type_args = Some(join_tokens(&tokens[position + 1..close]));
            position = close + 1;
        }
    }

    (sql_type, type_args, position)
}

/// Unknown tokens are skipped one at a time, except for paren groups which go as a whole.
fn skip_len(tokens: &[Token<'_>]) -> usize {
    if tokens.first().map_or(false, |t| t.is_symbol('(')) {
        matching_paren(tokens, 0).map_or(tokens.len(), |close| close + 1)
    } else {
        1
    }
}

/// Some(n) when the input starts with all of the keywords.
fn words(tokens: &[Token<'_>], keywords: &[&str]) -> Option<usize> {
    let matches = tokens.len() >= keywords.len()
        && tokens
            .iter()
            .zip(keywords)
            .all(|(token, keyword)| token.is_word(keyword));

    matches.then_some(keywords.len())
}

/// `COLLATE utf8mb4_bin`, `CHARACTER SET 'utf8'`
fn words_with_value(tokens: &[Token<'_>], keywords: &[&str]) -> Option<usize> {
    let consumed = words(tokens, keywords)?;

    tokens
        .get(consumed)
        .filter(|value| matches!(value.kind, TokenKind::Word | TokenKind::StringLiteral))
        .map(|_| consumed + 1)
}

fn not_null(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["NOT", "NULL"])?;
    modifiers.nullable = Some(false);

    Some(consumed)
}

fn null(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["NULL"])?;
    modifiers.nullable = Some(true);

    Some(consumed)
}

fn unsigned(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["UNSIGNED"])?;
    modifiers.unsigned = true;

    Some(consumed)
}

fn auto_increment(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["AUTO_INCREMENT"])?;
    modifiers.auto_increment = true;

    Some(consumed)
}

/// Inside a column definition, a lone `KEY` means the same thing as `PRIMARY KEY`.
fn primary_key(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["PRIMARY", "KEY"]).or_else(|| words(tokens, &["KEY"]))?;
    modifiers.primary_key = true;

    Some(consumed)
}

fn default_value(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["DEFAULT"])?;
    let (value, value_len) = parse_value(&tokens[consumed..])?;
    modifiers.default_value = Some(value);

    Some(consumed + value_len)
}

fn comment(tokens: &[Token<'_>], modifiers: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["COMMENT"])?;
    let text = tokens
        .get(consumed)
        .filter(|token| token.kind == TokenKind::StringLiteral)?;
    modifiers.comment = Some(escape_comment(&text.unescaped()));

    Some(consumed + 1)
}

/// `ON UPDATE CURRENT_TIMESTAMP` has no struct tag equivalent, so it is dropped.
fn on_update(tokens: &[Token<'_>], _: &mut Modifiers) -> Option<usize> {
    let consumed = words(tokens, &["ON", "UPDATE"])?;
    let (_, value_len) = parse_value(&tokens[consumed..])?;

    Some(consumed + value_len)
}

/// Modifiers that don't matter for the generated struct.
fn harmless(tokens: &[Token<'_>], _: &mut Modifiers) -> Option<usize> {
    words_with_value(tokens, &["CHARACTER", "SET"])
        .or_else(|| words_with_value(tokens, &["CHARSET"]))
        .or_else(|| words_with_value(tokens, &["COLLATE"]))
        .or_else(|| words_with_value(tokens, &["STORAGE"]))
        .or_else(|| words_with_value(tokens, &["COLUMN_FORMAT"]))
        .or_else(|| words(tokens, &["UNIQUE", "KEY"]))
        .or_else(|| {
            ["UNIQUE", "ZEROFILL", "SIGNED", "BINARY", "VISIBLE", "INVISIBLE"]
                .iter()
                .find_map(|keyword| words(tokens, &[*keyword]))
        })
}

/// Values as found after DEFAULT and ON UPDATE.
fn parse_value(tokens: &[Token<'_>]) -> Option<(DefaultValue, usize)> {
    let first = tokens.first()?;

    match first.kind {
        TokenKind::StringLiteral => Some((DefaultValue::Literal(first.unescaped()), 1)),
        TokenKind::Number => Some((DefaultValue::Number(first.text.to_string()), 1)),
        TokenKind::Symbol if first.is_symbol('-') || first.is_symbol('+') => {
            let number = tokens.get(1).filter(|t| t.kind == TokenKind::Number)?;
            let sign = if first.is_symbol('-') { "-" } else { "" };

            Some((DefaultValue::Number(format!("{sign}{}", number.text)), 2))
        }
        TokenKind::Symbol if first.is_symbol('(') => {
            let close = matching_paren(tokens, 0)?;

            Some((DefaultValue::Keyword(join_tokens(&tokens[..=close])), close + 1))
        }
        // CURRENT_TIMESTAMP, NULL, CURRENT_TIMESTAMP(3), now()
        TokenKind::Word => match tokens.get(1) {
            Some(next) if next.is_symbol('(') => {
                let close = matching_paren(tokens, 1)?;

                Some((DefaultValue::Keyword(join_tokens(&tokens[..=close])), close + 1))
            }
            _ => Some((DefaultValue::Keyword(first.text.to_string()), 1)),
        },
        _ => None,
    }
}

/// Struct tags use commas as separators, so comments can't keep theirs. Full width commas are
/// replaced as well, they look the same to whoever reads the code later. Line breaks are
/// flattened, the comment ends up on a single line.
///
/// This loses information: there's no way to tell a `|` that was in the comment from a comma.
pub fn escape_comment(comment: &str) -> String {
    static COMMA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("[,，]").unwrap());
    static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[\r\n]+\s*").unwrap());

    let single_line = LINE_BREAK_REGEX.replace_all(comment.trim(), " ");

    COMMA_REGEX.replace_all(&single_line, "|").into_owned()
}

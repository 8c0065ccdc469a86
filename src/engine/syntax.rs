//! Turns normalized DDL text into a flat list of tokens.
//!
//! Pest does the heavy lifting here. The grammar in `ddl.pest` is shallow: it only knows about
//! quoted names, string literals, numbers, words and "anything else". It fails on quotes and block
//! comments that are never closed. Recognizing the CREATE TABLE structure is done by the later
//! stages, which walk the token list instead of re-scanning text.
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// Pest parser
///
/// Pest will autogenerate all of the code needed, and will also give an enum called "Rule" that
/// will have all the rule names from the ddl.pest file.
#[derive(Parser)]
#[grammar = "engine/syntax/ddl.pest"]
struct DdlParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `name`
    QuotedName,
    /// 'text' or "text"
    StringLiteral,
    Number,
    /// Keywords, type names, unquoted identifiers.
    Word,
    /// Any single character that is not part of another token: parens, commas, equal signs...
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The token exactly as found in the input, quotes included.
    pub text: &'a str,
    /// Same as `text`, but without the surrounding quotes for names and string literals.
    pub inner: &'a str,
    pub position: Position,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, crate::error::Error> {
    let mut pairs = DdlParser::parse(Rule::ddl, input)?;

    let Some(root) = pairs.next() else {
        return Ok(Vec::new());
    };

    let tokens = root
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(Token::from_pair)
        .collect();

    Ok(tokens)
}

impl<'a> Token<'a> {
    fn from_pair(pair: Pair<'a, Rule>) -> Self {
        let span = pair.as_span();
        let kind = match pair.as_rule() {
            Rule::quoted_name => TokenKind::QuotedName,
            Rule::string_literal => TokenKind::StringLiteral,
            Rule::number => TokenKind::Number,
            Rule::word => TokenKind::Word,
            _ => TokenKind::Symbol,
        };

        let inner = match kind {
            TokenKind::QuotedName | TokenKind::StringLiteral => pair
                .into_inner()
                .next()
                .map(|inner| inner.as_str())
                .unwrap_or_default(),
            _ => span.as_str(),
        };

        Token {
            kind,
            text: span.as_str(),
            inner,
            position: (span.start()..span.end()).into(),
        }
    }

    /// Case insensitive keyword check.
    pub fn is_word(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.text.starts_with(symbol)
    }

    /// The value of a string literal with SQL escapes resolved.
    ///
    /// For anything else this is just the inner text.
    pub fn unescaped(&self) -> String {
        if self.kind != TokenKind::StringLiteral {
            return self.inner.to_string();
        }

        let quote = self.text.chars().next().unwrap_or('\'');
        let mut output = String::with_capacity(self.inner.len());
        let mut chars = self.inner.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => output.push('\n'),
                    Some('t') => output.push('\t'),
                    Some('r') => output.push('\r'),
                    Some('0') => output.push('\0'),
                    Some(escaped) => output.push(escaped),
                    None => output.push('\\'),
                },
                c if c == quote && chars.peek() == Some(&quote) => {
                    chars.next();
                    output.push(quote);
                }
                c => output.push(c),
            }
        }

        output
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Glues tokens back together, the way they would be written in a type argument list or an
/// expression: `decimal(10,2)`, `CURRENT_TIMESTAMP(3)`, `(`a` + 1)`.
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
    let mut output = String::new();
    let mut previous: Option<&Token<'_>> = None;

    for token in tokens {
        if let Some(previous) = previous {
            let tight = previous.is_symbol('(')
                || previous.is_symbol(',')
                || previous.is_symbol('.')
                || token.is_symbol('(')
                || token.is_symbol(')')
                || token.is_symbol(',')
                || token.is_symbol('.');

            if !tight {
                output.push(' ');
            }
        }

        output.push_str(token.text);
        previous = Some(token);
    }

    output
}

/// Index of the `)` closing the `(` found at `open`. Strings and names can't hide parens from us
/// since they are already single tokens.
pub fn matching_paren(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.is_symbol('(') {
            depth += 1;
        } else if token.is_symbol(')') {
            depth = depth.checked_sub(1)?;

            if depth == 0 {
                return Some(index);
            }
        }
    }

    None
}

impl From<Range<usize>> for Position {
    fn from(range: Range<usize>) -> Self {
        Position {
            start: range.start,
            end: range.end,
        }
    }
}

#[cfg(test)]
impl PartialEq<Position> for Range<usize> {
    fn eq(&self, other: &Position) -> bool {
        self.start == other.start && self.end == other.end
    }
}

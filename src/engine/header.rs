//! Finds `CREATE TABLE `name` (` and works out the struct name from it.
use crate::engine::structure::exported_name;
use crate::engine::syntax::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub table_name: &'a str,
    /// `order_items` -> `OrderItems`
    pub model_name: String,
    /// Index of the `(` that opens the table body.
    pub body_start: usize,
}

static TABLE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-z0-9_]+$").unwrap());

/// Looks for the first CREATE TABLE clause. Tables whose name does not fit the lower case naming
/// convention are not considered tables we can convert.
pub fn parse_header<'a>(tokens: &[Token<'a>]) -> Option<Header<'a>> {
    (0..tokens.len()).find_map(|start| parse_header_at(tokens, start))
}

fn parse_header_at<'a>(tokens: &[Token<'a>], start: usize) -> Option<Header<'a>> {
    let mut index = start;
    let word_at = |index: usize, keyword: &str| {
        tokens
            .get(index)
            .map_or(false, |token| token.is_word(keyword))
    };

    if !word_at(index, "CREATE") {
        return None;
    }
    index += 1;

    if word_at(index, "TEMPORARY") {
        index += 1;
    }

    if !word_at(index, "TABLE") {
        return None;
    }
    index += 1;

    if word_at(index, "IF") && word_at(index + 1, "NOT") && word_at(index + 2, "EXISTS") {
        index += 3;
    }

    let mut name = tokens.get(index).filter(|t| t.kind == TokenKind::QuotedName)?;
    index += 1;

    // `schema`.`table`: the last name is the one we want
    if tokens.get(index).map_or(false, |t| t.is_symbol('.')) {
        name = tokens
            .get(index + 1)
            .filter(|t| t.kind == TokenKind::QuotedName)?;
        index += 2;
    }

    if !tokens.get(index).map_or(false, |t| t.is_symbol('(')) {
        return None;
    }

    if !TABLE_NAME_REGEX.is_match(name.inner) {
        log::debug!("Ignoring table {}, its name is not lower snake case", name.text);
        return None;
    }

    Some(Header {
        table_name: name.inner,
        model_name: exported_name(name.inner),
        body_start: index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::syntax::tokenize;

    fn header(input: &str) -> Option<(String, String)> {
        let tokens = tokenize(input).unwrap();

        parse_header(&tokens).map(|header| (header.table_name.to_string(), header.model_name))
    }

    #[test]
    fn test_parse_header() {
        let tokens = tokenize("CREATE TABLE `order_items` (\n `id` int").unwrap();
        let header = parse_header(&tokens).unwrap();

        assert_eq!(header.table_name, "order_items");
        assert_eq!(header.model_name, "OrderItems");
        assert_eq!(header.body_start, 3);
    }

    #[test]
    fn test_optional_parts() {
        assert_eq!(
            header("CREATE TEMPORARY TABLE IF NOT EXISTS `shop`.`users` ("),
            Some(("users".to_string(), "Users".to_string()))
        );
    }

    #[test]
    fn test_skips_leading_statements() {
        assert_eq!(
            header("DROP TABLE IF EXISTS `a`; CREATE TABLE `b_c` ("),
            Some(("b_c".to_string(), "BC".to_string()))
        );
    }

    #[test]
    fn test_no_table() {
        assert_eq!(header("SELECT * FROM `users`"), None);
        assert_eq!(header("CREATE TABLE users ("), None);
        assert_eq!(header("CREATE TABLE `Users` ("), None);
        assert_eq!(header("CREATE TABLE `users`"), None);
    }
}

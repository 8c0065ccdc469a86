//! Canonical whitespace and keyword casing.
//!
//! Everything the later stages match on is upper-cased here, so they can compare keywords
//! directly. Quoted names, string literals and SQL comments are copied byte for byte: lower-casing
//! (or upper-casing) the whole statement would corrupt defaults like `'Pending'` and comments.

/// Words that get upper-cased when they appear outside of quotes.
///
/// Type names are not in here on purpose. The type mapper does its own case folding, and keeping
/// them as written makes the normalized text easier to read when debugging.
const KEYWORDS: &[&str] = &[
    "AUTO_INCREMENT",
    "BINARY",
    "CHARACTER",
    "CHARSET",
    "CHECK",
    "COLLATE",
    "COLUMN_FORMAT",
    "COMMENT",
    "CONSTRAINT",
    "CREATE",
    "CURRENT_TIMESTAMP",
    "DEFAULT",
    "ENGINE",
    "EXISTS",
    "FOREIGN",
    "FULLTEXT",
    "IF",
    "INDEX",
    "INVISIBLE",
    "KEY",
    "NOT",
    "NULL",
    "ON",
    "PRIMARY",
    "REFERENCES",
    "ROW_FORMAT",
    "SIGNED",
    "SPATIAL",
    "STORAGE",
    "TABLE",
    "TEMPORARY",
    "UNIQUE",
    "UNSIGNED",
    "UPDATE",
    "VISIBLE",
    "ZEROFILL",
];

pub fn normalize(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut pending_blank = false;
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];

        match c {
            ' ' | '\t' => {
                pending_blank = true;
                index += 1;
                continue;
            }
            '\r' | '\n' => {
                // CRLF and lone CR both become LF. Trailing blanks are dropped with the pending flag.
                if c == '\r' && chars.get(index + 1) == Some(&'\n') {
                    index += 1;
                }
                output.push('\n');
                pending_blank = false;
                index += 1;
                continue;
            }
            _ => {}
        }

        if pending_blank {
            output.push(' ');
            pending_blank = false;
        }

        index = match c {
            '`' | '\'' | '"' => copy_quoted(&chars, index, &mut output),
            '#' => copy_until_newline(&chars, index, &mut output),
            '-' if starts_line_comment(&chars, index) => {
                copy_until_newline(&chars, index, &mut output)
            }
            '/' if chars.get(index + 1) == Some(&'*') => copy_block_comment(&chars, index, &mut output),
            c if is_word_char(c) => copy_word(&chars, index, &mut output),
            c => {
                output.push(c);
                index + 1
            }
        };
    }

    output
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn starts_line_comment(chars: &[char], index: usize) -> bool {
    chars.get(index + 1) == Some(&'-')
        && matches!(chars.get(index + 2), None | Some(' ' | '\t' | '\r' | '\n'))
}

/// Copies a quoted section verbatim, returning the index right after the closing quote.
///
/// Backslash escapes are skipped over. Doubled quotes don't need special handling: the second
/// quote simply opens a new section.
fn copy_quoted(chars: &[char], start: usize, output: &mut String) -> usize {
    let quote = chars[start];
    output.push(quote);

    let mut index = start + 1;
    while let Some(&c) = chars.get(index) {
        output.push(c);
        index += 1;

        if c == '\\' && quote != '`' {
            if let Some(&escaped) = chars.get(index) {
                output.push(escaped);
                index += 1;
            }
        } else if c == quote {
            break;
        }
    }

    index
}

fn copy_until_newline(chars: &[char], start: usize, output: &mut String) -> usize {
    let mut index = start;

    while let Some(&c) = chars.get(index) {
        if c == '\n' || c == '\r' {
            break;
        }
        output.push(c);
        index += 1;
    }

    index
}

fn copy_block_comment(chars: &[char], start: usize, output: &mut String) -> usize {
    output.push_str("/*");

    let mut index = start + 2;
    while let Some(&c) = chars.get(index) {
        output.push(c);
        index += 1;

        if c == '*' && chars.get(index) == Some(&'/') {
            output.push('/');
            index += 1;
            break;
        }
    }

    index
}

fn copy_word(chars: &[char], start: usize, output: &mut String) -> usize {
    let end = chars[start..]
        .iter()
        .position(|c| !is_word_char(*c))
        .map_or(chars.len(), |offset| start + offset);

    let word: String = chars[start..end].iter().collect();
    let upper = word.to_ascii_uppercase();

    if KEYWORDS.binary_search(&upper.as_str()).is_ok() {
        output.push_str(&upper);
    } else {
        output.push_str(&word);
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_sorted() {
        // binary_search relies on it
        let mut sorted = KEYWORDS.to_vec();
        sorted.sort_unstable();

        assert_eq!(sorted, KEYWORDS);
    }

    #[test]
    fn test_keyword_case() {
        assert_eq!(
            normalize("create table `Users` (`id` int not null auto_increment,"),
            "CREATE TABLE `Users` (`id` int NOT NULL AUTO_INCREMENT,"
        );
    }

    #[test]
    fn test_quoted_text_is_untouched() {
        let input = "`name` varchar(10) default 'Not Null  Here' comment \"Default, Comment\"";

        assert_eq!(
            normalize(input),
            "`name` varchar(10) DEFAULT 'Not Null  Here' COMMENT \"Default, Comment\""
        );
    }

    #[test]
    fn test_escaped_quotes_stay_inside_the_literal() {
        let input = r"comment 'it\'s not null'  default";

        assert_eq!(normalize(input), r"COMMENT 'it\'s not null' DEFAULT");
    }

    #[test]
    fn test_whitespace() {
        let input = "CREATE\tTABLE  `t` (  \r\n    `a` int ,   \r\n)  ";

        assert_eq!(normalize(input), "CREATE TABLE `t` (\n `a` int ,\n)");
    }

    #[test]
    fn test_comments_are_untouched() {
        let input = "-- not null here\n`a` int /* default null */ # key  stuff";

        assert_eq!(
            normalize(input),
            "-- not null here\n`a` int /* default null */ # key  stuff"
        );
    }

    #[test]
    fn test_words_containing_keywords() {
        assert_eq!(
            normalize("collate utf8_unicode_ci not_null key_id"),
            "COLLATE utf8_unicode_ci not_null key_id"
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "create table `a` (\n  `b` int(11) unsigned not null default '0' comment 'B, c',\n  primary key (`b`)\n) engine=InnoDB auto_increment=3;",
            "  \t`x`   varchar(2)\r\n -- comment  \n/* a\n b */ 'unterminated",
            "",
        ];

        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);

            assert_eq!(once, twice, "normalizing twice changed {input:?}");
        }
    }
}

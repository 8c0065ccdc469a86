use super::{ErrorKind, PestError};
use colored::Colorize;
use pest::error::{InputLocation, LineColLocation};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error)]
pub struct WrappedPestError(PestError);

impl Display for WrappedPestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let error = &self.0;

        write!(
            f,
            "{line}\n\
             {underline} {message}\n\
             ",
            line = error.line(),
            underline = self.underline().red().bold(),
            message = error.variant.message().bold().red(),
        )?;

        Ok(())
    }
}

impl WrappedPestError {
    /// Pest reports locations relative to the whole input, but we only print the offending line.
    fn underline(&self) -> String {
        let (_, column) = match self.0.line_col {
            LineColLocation::Pos(position) => position,
            LineColLocation::Span(start, _) => start,
        };

        // Columns are 1 based.
        let line_until_pos = self
            .0
            .line()
            .get(..column.saturating_sub(1))
            .unwrap_or_else(|| self.0.line());

        let width = match self.0.location {
            InputLocation::Pos(_) => 1,
            InputLocation::Span((start, end)) => end.saturating_sub(start).max(1),
        };

        format!(
            "{blank_indent}{underline}",
            blank_indent = blank(line_until_pos),
            underline = "^".repeat(width),
        )
    }
}

fn blank(input: &str) -> String {
    input
        .chars()
        // If we just replace any char with a space, tabs will be much shorter.
        // So we have to preserve tabs.
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

impl From<PestError> for ErrorKind {
    fn from(value: PestError) -> Self {
        WrappedPestError(value).into()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::syntax::tokenize;
    use crate::error::ErrorKind;

    #[test]
    fn test_unclosed_string_is_underlined() {
        colored::control::set_override(false);

        let error = tokenize("`a` int DEFAULT 'abc").unwrap_err();
        let ErrorKind::SyntaxError(syntax_error) = error.into_inner() else {
            panic!("Expected a syntax error");
        };
        let rendered = syntax_error.to_string();
        let mut lines = rendered.lines();

        assert_eq!(lines.next(), Some("`a` int DEFAULT 'abc"));

        let underline = lines.next().unwrap_or_default();
        assert!(underline.trim_start().starts_with('^'), "{rendered}");
        assert!(underline.len() > underline.trim_start().len(), "{rendered}");
    }

    #[test]
    fn test_tabs_are_kept_in_the_indent() {
        assert_eq!(super::blank("\ta b"), "\t   ");
    }
}

mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::Definition;

/// Split a definitions file into its `<name> means <rule text>` lines.
///
/// Blank lines and lines starting with `#` are skipped. Rule text is kept
/// verbatim; compiling it is up to the caller.
///
/// # Errors
///
/// Returns [`ParseError`] for the first line that is not a definition.
pub fn parse_definitions(input: &str) -> Result<Vec<Definition>, ParseError> {
    parse_lines(input).collect()
}

/// Like [`parse_definitions`], yielding one result per non-skipped line so a
/// caller can step over bad lines.
pub(crate) fn parse_lines(input: &str) -> impl Iterator<Item = Result<Definition, ParseError>> + '_ {
    use winnow::Parser;

    input.lines().enumerate().filter_map(|(i, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let parsed = grammar::definition
            .parse(line)
            .map(|(name, body)| Definition {
                name: name.to_owned(),
                body: body.to_owned(),
                line: i + 1,
            })
            .map_err(|e| ParseError::new(i + 1, e.to_string()));
        Some(parsed)
    })
}

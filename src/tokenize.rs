/// Split one rule line into tokens.
///
/// Whitespace and commas separate tokens and are dropped. `{`, `}` and `)`
/// are single-character tokens, and so is `(` when no identifier is being
/// built. A `(` that follows identifier text is part of the identifier, and
/// its matching `)` is too, so `1.3s1(a)` stays one token. Separators end
/// the identifier but not the nesting, so `a( b)` gives `a(` and `b)`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    // Byte offset where the identifier in progress starts.
    let mut start: Option<usize> = None;
    let mut depth = 0_usize;

    for (i, c) in text.char_indices() {
        match c {
            c if c.is_whitespace() || c == ',' => flush(text, &mut start, i, &mut tokens),
            '(' if start.is_none() => tokens.push(&text[i..=i]),
            '(' => depth += 1,
            ')' if depth > 0 => {
                depth -= 1;
                start.get_or_insert(i);
            }
            '{' | '}' | ')' if depth == 0 => {
                flush(text, &mut start, i, &mut tokens);
                tokens.push(&text[i..=i]);
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    flush(text, &mut start, text.len(), &mut tokens);

    tokens
}

fn flush<'a>(text: &'a str, start: &mut Option<usize>, end: usize, tokens: &mut Vec<&'a str>) {
    if let Some(s) = start.take() {
        tokens.push(&text[s..end]);
    }
}

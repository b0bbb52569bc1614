use std::fmt;

/// Results of tracked role tests, in the order they were evaluated.
///
/// Filled by [`Rule::check_observed`](crate::Rule::check_observed). Only
/// role tests that carry a tag are recorded, and a list that short-circuits
/// records nothing for the children it skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observations {
    entries: Vec<(String, bool)>,
}

impl Observations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, tag: &str, result: bool) {
        self.entries.push((tag.to_owned(), result));
    }

    /// All `(tag, result)` pairs, in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    /// The most recent result recorded for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<bool> {
        self.entries
            .iter()
            .rev()
            .find(|(t, _)| t == tag)
            .map(|&(_, result)| result)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for Observations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (tag, result)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}={result}")?;
        }
        Ok(())
    }
}

use std::collections::HashMap;

use super::error::CompileError;
use super::rule::Rule;

/// Names visible to the rule compiler, in definition order.
///
/// Role abbreviations go in first (see [`define_role`](Self::define_role)),
/// then named auxiliary rules, which may refer to anything defined before
/// them. One namespace is shared by every rule of a subsystem.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: Vec<(String, Rule)>,
    index: HashMap<String, usize>,
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role abbreviation as a tracked test of `role`.
    pub fn define_role(&mut self, abbr: &str, role: &str) {
        self.insert(abbr, Rule::tracked_role(role, abbr));
    }

    /// Compile `text` against this namespace and register it as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if `text` does not compile; the namespace is
    /// left unchanged.
    pub fn define(&mut self, name: &str, text: &str) -> Result<&Rule, CompileError> {
        let rule = crate::compile::compile(text, self)?;
        let idx = self.insert(name, rule);
        Ok(&self.entries[idx].1)
    }

    /// Register `rule` under `name`, returning its position.
    ///
    /// A name that is already taken keeps its position and gets the new rule.
    pub fn insert(&mut self, name: &str, rule: Rule) -> usize {
        if let Some(&idx) = self.index.get(name) {
            tracing::warn!(name, "redefining namespace entry");
            self.entries[idx].1 = rule;
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push((name.to_owned(), rule));
        self.index.insert(name.to_owned(), idx);
        idx
    }

    /// Compile `text` against this namespace without registering it.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if `text` does not compile.
    pub fn compile(&self, text: &str) -> Result<Rule, CompileError> {
        crate::compile::compile(text, self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, rule)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.entries.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

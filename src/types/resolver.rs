use std::fmt;
use std::path::Path;
use std::time::Instant;

use super::namespace::Namespace;
use super::observations::Observations;
use super::resolution_report::ResolutionReport;
use super::role_set::RoleSet;
use super::rule::Rule;
use crate::parse::{parse_lines, Definition};
use crate::VarcodeError;

/// Variant code reported when no variant rule holds.
pub const UNREPRESENTED: &str = "unrepresented";

/// What [`VariantResolverBuilder::build()`] does with a rule or definition
/// line that fails to parse or compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Fail the whole build.
    #[default]
    Strict,
    /// Log a warning and leave the rule out.
    SkipInvalid,
}

#[derive(Debug)]
enum Step {
    Role { abbr: String, role: String },
    Definition(Definition),
    DefinitionsText(String),
    Variant(Definition),
    VariantsText(String),
}

/// Builder for a [`VariantResolver`].
///
/// Steps run in the order they were added, so a rule can refer to any role
/// or definition added before it.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use varcode::VariantResolver;
///
/// let resolver = VariantResolver::builder()
///     .role("mcm", "MethCoaMuta")
///     .role("epi", "MethCoaEpim")
///     .definition("core", "mcm and epi")
///     .variant("1", "core")
///     .variant("0.1", "mcm or epi")
///     .build()
///     .unwrap();
///
/// let genome: HashSet<&str> = ["MethCoaMuta"].into_iter().collect();
/// assert_eq!(resolver.resolve(&genome), "0.1");
/// ```
#[derive(Debug, Default)]
pub struct VariantResolverBuilder {
    steps: Vec<Step>,
    policy: LoadPolicy,
}

impl VariantResolverBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role abbreviation usable in later rules.
    #[must_use]
    pub fn role(mut self, abbr: &str, role: &str) -> Self {
        self.steps.push(Step::Role {
            abbr: abbr.to_owned(),
            role: role.to_owned(),
        });
        self
    }

    /// Define a named auxiliary rule.
    #[must_use]
    pub fn definition(mut self, name: &str, text: &str) -> Self {
        self.steps.push(Step::Definition(untracked_line(name, text)));
        self
    }

    /// Add every `<name> means <rule>` line of `text` as a definition.
    #[must_use]
    pub fn definitions_text(mut self, text: &str) -> Self {
        self.steps.push(Step::DefinitionsText(text.to_owned()));
        self
    }

    /// Append a variant rule. Variants are tried in the order they are added.
    #[must_use]
    pub fn variant(mut self, code: &str, text: &str) -> Self {
        self.steps.push(Step::Variant(untracked_line(code, text)));
        self
    }

    /// Append every `<code> means <rule>` line of `text` as a variant.
    #[must_use]
    pub fn variants_text(mut self, text: &str) -> Self {
        self.steps.push(Step::VariantsText(text.to_owned()));
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compile every step into an immutable `VariantResolver`.
    ///
    /// # Errors
    ///
    /// Under [`LoadPolicy::Strict`], returns [`VarcodeError`] for the first
    /// line that fails to parse or compile.
    pub fn build(self) -> Result<VariantResolver, VarcodeError> {
        let mut loader = Loader {
            resolver: VariantResolver::default(),
            policy: self.policy,
        };

        for step in self.steps {
            match step {
                Step::Role { abbr, role } => loader.resolver.namespace.define_role(&abbr, &role),
                Step::Definition(def) => loader.definition(&def)?,
                Step::DefinitionsText(text) => {
                    for line in parse_lines(&text) {
                        if let Some(def) = loader.parsed(line)? {
                            loader.definition(&def)?;
                        }
                    }
                }
                Step::Variant(def) => loader.variant(&def)?,
                Step::VariantsText(text) => {
                    for line in parse_lines(&text) {
                        if let Some(def) = loader.parsed(line)? {
                            loader.variant(&def)?;
                        }
                    }
                }
            }
        }

        let resolver = loader.resolver;
        tracing::debug!(
            names = resolver.namespace.len(),
            variants = resolver.variants.len(),
            "built variant resolver"
        );
        Ok(resolver)
    }
}

fn untracked_line(name: &str, text: &str) -> Definition {
    Definition {
        name: name.to_owned(),
        body: text.to_owned(),
        line: 0,
    }
}

struct Loader {
    resolver: VariantResolver,
    policy: LoadPolicy,
}

impl Loader {
    fn parsed(
        &self,
        line: Result<Definition, crate::parse::ParseError>,
    ) -> Result<Option<Definition>, VarcodeError> {
        match line {
            Ok(def) => Ok(Some(def)),
            Err(e) if self.policy == LoadPolicy::SkipInvalid => {
                tracing::warn!(line = e.line(), error = %e, "skipping unparsable line");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn compile(&self, def: &Definition) -> Result<Option<Rule>, VarcodeError> {
        match self.resolver.namespace.compile(&def.body) {
            Ok(rule) => Ok(Some(rule)),
            Err(e) if self.policy == LoadPolicy::SkipInvalid => {
                tracing::warn!(name = %def.name, line = def.line, error = %e, "skipping invalid rule");
                Ok(None)
            }
            Err(source) => Err(VarcodeError::Rule {
                name: def.name.clone(),
                line: (def.line > 0).then_some(def.line),
                source,
            }),
        }
    }

    fn definition(&mut self, def: &Definition) -> Result<(), VarcodeError> {
        if let Some(rule) = self.compile(def)? {
            self.resolver.namespace.insert(&def.name, rule);
        }
        Ok(())
    }

    fn variant(&mut self, def: &Definition) -> Result<(), VarcodeError> {
        let Some(rule) = self.compile(def)? else {
            return Ok(());
        };
        let variants = &mut self.resolver.variants;
        if let Some(slot) = variants.iter_mut().find(|(code, _)| *code == def.name) {
            tracing::warn!(code = %def.name, "redefining variant rule");
            slot.1 = rule;
        } else {
            variants.push((def.name.clone(), rule));
        }
        Ok(())
    }
}

/// An ordered table of variant rules for one subsystem.
///
/// Immutable once built and safe to share across threads; tracked role
/// observations go to a per-call [`Observations`] log, never into the table.
#[derive(Debug, Default)]
pub struct VariantResolver {
    pub(crate) namespace: Namespace,
    pub(crate) variants: Vec<(String, Rule)>,
}

impl VariantResolver {
    #[must_use]
    pub fn builder() -> VariantResolverBuilder {
        VariantResolverBuilder::new()
    }

    /// The first variant code, in table order, whose rule holds for `roles`.
    #[must_use]
    pub fn find<R: RoleSet + ?Sized>(&self, roles: &R) -> Option<&str> {
        for (code, rule) in &self.variants {
            let result = rule.check(roles);
            tracing::trace!(code = %code, result, "tested variant");
            if result {
                return Some(code.as_str());
            }
        }
        None
    }

    /// The variant code for `roles`, or [`UNREPRESENTED`] if no rule holds.
    #[must_use]
    pub fn resolve<R: RoleSet + ?Sized>(&self, roles: &R) -> &str {
        let code = self.find(roles).unwrap_or(UNREPRESENTED);
        tracing::debug!(code, "resolved variant");
        code
    }

    /// Resolve with diagnostics: which codes were tested and what every
    /// tracked role test returned along the way.
    pub fn resolve_detailed<R: RoleSet + ?Sized>(&self, roles: &R) -> ResolutionReport {
        let start = Instant::now();
        let mut observations = Observations::new();
        let mut tested = Vec::new();
        let mut matched = None;

        for (code, rule) in &self.variants {
            tested.push(code.clone());
            if rule.check_observed(roles, &mut observations) {
                matched = Some(code.clone());
                break;
            }
        }

        ResolutionReport::new(matched, tested, observations, start.elapsed())
    }

    /// The rule for variant `code`.
    #[must_use]
    pub fn variant(&self, code: &str) -> Option<&Rule> {
        self.variants
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, rule)| rule)
    }

    /// Variant codes and rules in resolution order.
    pub fn variants(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.variants.iter().map(|(code, rule)| (code.as_str(), rule))
    }

    /// Roles and named definitions the variant rules were compiled against.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Build a resolver from role abbreviations and the text of a
    /// definitions file and a variant rules file.
    ///
    /// # Errors
    ///
    /// Returns [`VarcodeError`] on parse or compile failure.
    pub fn from_texts<'a>(
        roles: impl IntoIterator<Item = (&'a str, &'a str)>,
        definitions: &str,
        variants: &str,
    ) -> Result<Self, VarcodeError> {
        let mut builder = Self::builder();
        for (abbr, role) in roles {
            builder = builder.role(abbr, role);
        }
        builder
            .definitions_text(definitions)
            .variants_text(variants)
            .build()
    }

    /// Read a definitions file and a variant rules file and build a resolver.
    ///
    /// # Errors
    ///
    /// Returns [`VarcodeError`] on I/O, parse, or compile failure.
    pub fn from_files<'a>(
        roles: impl IntoIterator<Item = (&'a str, &'a str)>,
        definitions: impl AsRef<Path>,
        variants: impl AsRef<Path>,
    ) -> Result<Self, VarcodeError> {
        let definitions = std::fs::read_to_string(definitions)?;
        let variants = std::fs::read_to_string(variants)?;
        Self::from_texts(roles, &definitions, &variants)
    }
}

impl fmt::Display for VariantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VariantResolver({} variants, {} names)",
            self.variants.len(),
            self.namespace.len(),
        )
    }
}

use std::fmt;
use std::time::Duration;

use super::observations::Observations;
use super::resolver::UNREPRESENTED;

/// Detailed resolution result returned by
/// [`VariantResolver::resolve_detailed()`](super::resolver::VariantResolver::resolve_detailed).
///
/// Records the winning variant code, every code tested on the way to it,
/// what each tracked role test returned, and how long the resolution took.
#[derive(Debug, Clone)]
#[must_use]
pub struct ResolutionReport {
    matched: Option<String>,
    tested: Vec<String>,
    observations: Observations,
    duration: Duration,
}

impl ResolutionReport {
    pub(crate) fn new(
        matched: Option<String>,
        tested: Vec<String>,
        observations: Observations,
        duration: Duration,
    ) -> Self {
        Self {
            matched,
            tested,
            observations,
            duration,
        }
    }

    /// The first variant whose rule held, if any.
    #[must_use]
    pub fn matched(&self) -> Option<&str> {
        self.matched.as_deref()
    }

    /// Same as [`VariantResolver::resolve()`](super::resolver::VariantResolver::resolve).
    #[must_use]
    pub fn code(&self) -> &str {
        self.matched().unwrap_or(UNREPRESENTED)
    }

    /// Variant codes tested, in table order, ending with the match.
    #[must_use]
    pub fn tested(&self) -> &[String] {
        &self.tested
    }

    #[must_use]
    pub fn observations(&self) -> &Observations {
        &self.observations
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variant: {}", self.code())?;
        write!(f, ", tested: [{}]", self.tested.join(", "))?;
        write!(f, ", roles: [{}]", self.observations)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

use std::fmt;
use std::ops::Not;

/// How many children of a [`Rule::List`] must hold for the list to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Every child (`a and b and c`).
    All,
    /// At least one child (`a or b or c`).
    Any,
    /// At least `n` children (`n of {a, b, c}`).
    AtLeast(usize),
}

/// A compiled variant rule.
///
/// Trees are immutable once built and can be shared freely across threads.
/// Evaluation lives in [`Rule::check`](crate::Rule::check) and
/// [`Rule::check_observed`](crate::Rule::check_observed).
#[derive(Debug, Clone)]
pub enum Rule {
    /// Holds when `role` is in the tested role set.
    ///
    /// A `tag` (normally the role's abbreviation) makes the test show up in
    /// [`Observations`](crate::Observations) and is what the rule prints as.
    Primitive { role: String, tag: Option<String> },
    Not(Box<Rule>),
    List { mode: ListMode, children: Vec<Rule> },
    /// Never holds.
    Fail,
}

impl Rule {
    /// An untracked role test.
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Rule::Primitive {
            role: role.into(),
            tag: None,
        }
    }

    /// A role test reported under `tag` when observed.
    #[must_use]
    pub fn tracked_role(role: impl Into<String>, tag: impl Into<String>) -> Self {
        Rule::Primitive {
            role: role.into(),
            tag: Some(tag.into()),
        }
    }

    #[must_use]
    pub fn all(children: Vec<Rule>) -> Self {
        Rule::List {
            mode: ListMode::All,
            children,
        }
    }

    #[must_use]
    pub fn any(children: Vec<Rule>) -> Self {
        Rule::List {
            mode: ListMode::Any,
            children,
        }
    }

    #[must_use]
    pub fn at_least(n: usize, children: Vec<Rule>) -> Self {
        Rule::List {
            mode: ListMode::AtLeast(n),
            children,
        }
    }

    /// Number of true children a list needs, or `None` for other nodes.
    ///
    /// For [`ListMode::All`] this is the current child count, so an empty
    /// AND-list needs zero and holds vacuously.
    #[must_use]
    pub fn required_count(&self) -> Option<usize> {
        match self {
            Rule::List { mode, children } => Some(match mode {
                ListMode::All => children.len(),
                ListMode::Any => 1,
                ListMode::AtLeast(n) => *n,
            }),
            _ => None,
        }
    }

    /// Role ids tested by this rule, in leaf order. Repeats are kept.
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_roles(self, &mut out);
        out
    }

    /// Height of the tree; a single role test has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Rule::Primitive { .. } | Rule::Fail => 1,
            Rule::Not(child) => 1 + child.depth(),
            Rule::List { children, .. } => 1 + children.iter().map(Rule::depth).max().unwrap_or(0),
        }
    }

    fn is_connective_list(&self) -> bool {
        matches!(
            self,
            Rule::List {
                mode: ListMode::All | ListMode::Any,
                ..
            }
        )
    }
}

fn collect_roles<'a>(rule: &'a Rule, out: &mut Vec<&'a str>) {
    match rule {
        Rule::Primitive { role, .. } => out.push(role),
        Rule::Not(child) => collect_roles(child, out),
        Rule::List { children, .. } => {
            for child in children {
                collect_roles(child, out);
            }
        }
        Rule::Fail => {}
    }
}

// Tags are an observation channel; only the role id decides what a leaf means.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Rule::Primitive { role: a, .. }, Rule::Primitive { role: b, .. }) => a == b,
            (Rule::Not(a), Rule::Not(b)) => a == b,
            (
                Rule::List {
                    mode: ma,
                    children: ca,
                },
                Rule::List {
                    mode: mb,
                    children: cb,
                },
            ) => ma == mb && ca == cb,
            (Rule::Fail, Rule::Fail) => true,
            _ => false,
        }
    }
}

impl Eq for Rule {}

impl Not for Rule {
    type Output = Rule;

    fn not(self) -> Rule {
        Rule::Not(Box::new(self))
    }
}

/// Writes `rule`, parenthesised when it is an AND/OR list used as an operand.
struct Operand<'a>(&'a Rule);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_connective_list() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Primitive { role, tag } => write!(f, "{}", tag.as_deref().unwrap_or(role)),
            Rule::Not(child) => write!(f, "not {}", Operand(child)),
            Rule::List { mode, children } => {
                let sep = match mode {
                    ListMode::All => " and ",
                    ListMode::Any => " or ",
                    ListMode::AtLeast(n) => {
                        write!(f, "{n} of {{ ")?;
                        write_joined(f, children, ", ")?;
                        return write!(f, " }}");
                    }
                };
                write_joined(f, children, sep)
            }
            Rule::Fail => write!(f, "FAIL"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Rule], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", Operand(child))?;
    }
    Ok(())
}

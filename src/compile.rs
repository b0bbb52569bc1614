use crate::tokenize::tokenize;
use crate::{CompileError, ListMode, Namespace, Rule};

/// Compile one line of rule text against `namespace`.
///
/// Every identifier must name an entry of `namespace`; the entry's rule is
/// copied into the result. `and`/`or` chains fold into flat lists, and a
/// change of connective wraps everything to its left as a single operand,
/// so `a and b or c` is `(a and b) or c` and `a or b and c` is
/// `(a or b) and c`.
///
/// # Errors
///
/// Returns [`CompileError`] on any grammar violation or unknown identifier.
pub fn compile(text: &str, namespace: &Namespace) -> Result<Rule, CompileError> {
    let mut tokens = tokenize(text).into_iter();
    let mut machine = Machine::new(namespace);
    while let Some(token) = tokens.next() {
        machine.step(token, &mut tokens)?;
    }
    let rule = machine.finish()?;
    tracing::trace!(text, depth = rule.depth(), "compiled rule");
    Ok(rule)
}

/// A node still under construction.
#[derive(Debug)]
enum Frame {
    /// Placeholder for a parenthesised group or the whole expression.
    Group(Option<Rule>),
    /// A `not` waiting for its operand.
    Negation,
    List { mode: ListMode, children: Vec<Rule> },
}

impl Frame {
    fn into_rule(self) -> Result<Rule, CompileError> {
        match self {
            Frame::Group(Some(rule)) => Ok(rule),
            Frame::Group(None) => Err(CompileError::MissingOperand { keyword: "(" }),
            Frame::Negation => Err(CompileError::MissingOperand { keyword: "not" }),
            Frame::List { mode, children } => Ok(Rule::List { mode, children }),
        }
    }
}

struct Machine<'n> {
    namespace: &'n Namespace,
    stack: Vec<Frame>,
    /// Set by a token that must be followed by an operand.
    pending: Option<&'static str>,
}

impl<'n> Machine<'n> {
    fn new(namespace: &'n Namespace) -> Self {
        Self {
            namespace,
            stack: vec![Frame::Group(None)],
            pending: None,
        }
    }

    fn step<'t>(
        &mut self,
        token: &'t str,
        rest: &mut impl Iterator<Item = &'t str>,
    ) -> Result<(), CompileError> {
        match token {
            "{" => Err(CompileError::UnexpectedOpenBrace),
            "}" => self.close_threshold(),
            "(" => {
                self.stack.push(Frame::Group(None));
                self.pending = Some("(");
                Ok(())
            }
            ")" => self.close_group(),
            "and" => self.connective(ListMode::All, "and"),
            "or" => self.connective(ListMode::Any, "or"),
            "not" => {
                self.stack.push(Frame::Negation);
                self.pending = Some("not");
                Ok(())
            }
            "of" => Err(CompileError::UnexpectedKeyword { keyword: "of" }),
            t if t.bytes().all(|b| b.is_ascii_digit()) => self.open_threshold(t, rest),
            name => {
                let rule = self.namespace.get(name).cloned().ok_or_else(|| {
                    CompileError::UnresolvedIdentifier {
                        name: name.to_owned(),
                    }
                })?;
                self.attach(rule, Some(name))
            }
        }
    }

    fn open_threshold<'t>(
        &mut self,
        count: &str,
        rest: &mut impl Iterator<Item = &'t str>,
    ) -> Result<(), CompileError> {
        let count: usize = count
            .parse()
            .map_err(|_| CompileError::ThresholdTooLarge {
                token: count.to_owned(),
            })?;
        for expected in ["of", "{"] {
            match rest.next() {
                Some(t) if t == expected => {}
                found => {
                    let found = match found {
                        Some(t) => format!("'{t}'"),
                        None => "end of rule".to_owned(),
                    };
                    return Err(CompileError::MalformedThreshold {
                        count,
                        expected,
                        found,
                    });
                }
            }
        }
        self.stack.push(Frame::List {
            mode: ListMode::AtLeast(count),
            children: Vec::new(),
        });
        self.pending = None;
        Ok(())
    }

    fn close_threshold(&mut self) -> Result<(), CompileError> {
        if !matches!(
            self.stack.last(),
            Some(Frame::List {
                mode: ListMode::AtLeast(_),
                ..
            })
        ) {
            return Err(CompileError::UnexpectedCloseBrace);
        }
        self.check_pending()?;
        self.unroll()
    }

    fn close_group(&mut self) -> Result<(), CompileError> {
        if self.stack.len() < 2 {
            return Err(CompileError::UnbalancedClose);
        }
        if matches!(
            self.stack.last(),
            Some(Frame::List {
                mode: ListMode::AtLeast(_),
                ..
            })
        ) {
            return Err(CompileError::MismatchedClose);
        }
        self.check_pending()?;
        self.unroll()
    }

    /// Pop the top frame and hand the finished node to the frame beneath.
    fn unroll(&mut self) -> Result<(), CompileError> {
        let Some(frame) = self.stack.pop() else {
            return Err(CompileError::UnbalancedClose);
        };
        let rule = frame.into_rule()?;
        self.attach(rule, None)
    }

    fn connective(&mut self, mode: ListMode, keyword: &'static str) -> Result<(), CompileError> {
        self.check_pending()?;
        match self.stack.last() {
            Some(Frame::List { mode: current, .. }) if *current == mode => {
                self.pending = Some(keyword);
                return Ok(());
            }
            Some(Frame::List {
                mode: ListMode::AtLeast(_),
                ..
            }) => return Err(CompileError::UnexpectedKeyword { keyword }),
            Some(Frame::Group(None)) | None => {
                return Err(CompileError::MissingOperand { keyword });
            }
            _ => {}
        }
        let Some(frame) = self.stack.pop() else {
            return Err(CompileError::MissingOperand { keyword });
        };
        let first = frame.into_rule()?;
        self.stack.push(Frame::List {
            mode,
            children: vec![first],
        });
        self.pending = Some(keyword);
        Ok(())
    }

    /// Add `param` to the top frame. A `not` closes as soon as it gets its
    /// operand, so the negated node falls through to the frame below it.
    ///
    /// `name` is the identifier `param` was looked up under; closed groups
    /// have none and are reported by their printed form.
    fn attach(&mut self, mut param: Rule, name: Option<&str>) -> Result<(), CompileError> {
        self.pending = None;
        while matches!(self.stack.last(), Some(Frame::Negation)) {
            self.stack.pop();
            param = !param;
        }
        match self.stack.last_mut() {
            Some(Frame::Group(slot)) => {
                if slot.is_some() {
                    return Err(CompileError::IllegalParameter {
                        node: "a group that already holds an operand",
                        param: name.map_or_else(|| param.to_string(), str::to_owned),
                    });
                }
                *slot = Some(param);
                Ok(())
            }
            Some(Frame::List { children, .. }) => {
                children.push(param);
                Ok(())
            }
            Some(Frame::Negation) | None => Err(CompileError::UnbalancedClose),
        }
    }

    fn check_pending(&self) -> Result<(), CompileError> {
        match self.pending {
            Some(keyword) => Err(CompileError::MissingOperand { keyword }),
            None => Ok(()),
        }
    }

    fn finish(mut self) -> Result<Rule, CompileError> {
        self.check_pending()?;
        if self.stack.len() > 1 {
            return Err(CompileError::UnclosedGroup {
                count: self.stack.len() - 1,
            });
        }
        match self.stack.pop() {
            Some(Frame::Group(None)) | None => Err(CompileError::EmptyRule),
            Some(frame) => frame.into_rule(),
        }
    }
}

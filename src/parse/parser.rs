/// One `<name> means <rule text>` line of a definitions file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub body: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

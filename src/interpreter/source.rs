/// The front end's source-line service.
///
/// Diagnostics quote the literal line of source a fault points at. The
/// front end hands the evaluator a snapshot of the raw source text; this
/// type splits it once and serves per-line lookups. Programs evaluated
/// without source text (trees built programmatically) simply render
/// diagnostics without the quoted line.
#[derive(Debug, Clone, Default)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    /// Snapshots source text, splitting it into lines.
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::source::SourceText;
    ///
    /// let source = SourceText::new("set x = 1\ndisplay x");
    /// assert_eq!(source.line_text(2), Some("display x"));
    /// assert_eq!(source.line_text(3), None);
    /// ```
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { lines: source.lines().map(str::to_string).collect(), }
    }

    /// An empty service for programs without retained source text.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The literal text of the 1-based `line`, if it exists.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
    }
}

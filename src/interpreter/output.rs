/// The live output sink.
///
/// Display statements have two required effects: the line is appended to
/// the evaluator's internal output log, and it is emitted immediately to
/// an external sink. The sink is an enum rather than a trait object so
/// the common path stays statically dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSink {
    /// Write each displayed line to stdout as it is produced.
    #[default]
    Stdout,
    /// Emit nothing; the internal log still accumulates. Used by tests
    /// and embedders that only consume the returned log.
    Silent,
}

impl OutputSink {
    /// Emits one finished display line.
    pub fn emit(self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Silent => {},
        }
    }
}

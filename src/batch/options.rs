use serde::Deserialize;

/// What to do with a row that does not parse into (id, lat, lon)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Abort the batch, naming the offending line
    #[default]
    Fail,
    /// Log a warning and continue with the next row
    Skip,
}

/// Output row terminator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\r\n`, as existing classification outputs were written
    #[default]
    Crlf,
    Lf,
}

impl From<LineTerminator> for csv::Terminator {
    fn from(value: LineTerminator) -> Self {
        match value {
            LineTerminator::Crlf => csv::Terminator::CRLF,
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub on_malformed_row: MalformedRowPolicy,
    /// Classify rows on the rayon pool; output order is unchanged
    pub parallel: bool,
    pub line_terminator: LineTerminator,
}

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// A required column is absent from a supplied table.
    MissingColumn { table: String, column: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty concept set, blank total label, etc.).
    ConfigValidation(String),
    /// Reference period outside the calendar (month not in 1..=12).
    InvalidPeriod { year: i32, month: u32 },
    /// Reference period text not in `YYYY-MM` form.
    PeriodParse(String),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { table, column } => {
                write!(f, "table '{table}': missing column '{column}'")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidPeriod { year, month } => {
                write!(f, "invalid period {year}-{month:02}: month must be 1..=12")
            }
            Self::PeriodParse(value) => {
                write!(f, "cannot parse period '{value}' (expected YYYY-MM)")
            }
        }
    }
}

impl std::error::Error for MetricsError {}

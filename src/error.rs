use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot process records of {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("line {line}: expected 4 fields, found {found}")]
    FieldCount { line: u64, found: usize },
    #[error("line {line}: invalid UTF-8 data")]
    Encoding { line: u64 },
    #[error("line {line}: invalid score {value:?}")]
    Parse { line: u64, value: String },
    #[error("student {id} would end up with out of range score {score}")]
    ScoreOutOfRange { id: String, score: f64 },
    #[error("cannot read configuration file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse configuration file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Attach the 1-based line number of the offending record.
    #[must_use]
    pub fn at_line(self, line: u64) -> Self {
        match self {
            Self::FieldCount { found, .. } => Self::FieldCount { line, found },
            Self::Parse { value, .. } => Self::Parse { line, value },
            other => other,
        }
    }

    /// Data errors come from the file contents, not from the file itself.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::FieldCount { .. } | Self::Parse { .. } | Self::Encoding { .. }
        )
    }
}

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Marker characters of the grid text format that a strategy may require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Start,
    Goal,
}

impl Marker {
    pub fn symbol(&self) -> char {
        match self {
            Marker::Start => 'S',
            Marker::Goal => 'G',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Start => write!(f, "start ('S')"),
            Marker::Goal => write!(f, "goal ('G')"),
        }
    }
}

/// Failures that stop planning before any search is run. Not finding a path is not one of
/// them: it is reported as a [PlanReport](crate::PlanReport) without a path.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("malformed grid at line {line}: {reason}")]
    MalformedGrid { line: usize, reason: String },

    #[error("grid has no {0} marker")]
    MissingMarker(Marker),

    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),

    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlanningError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        PlanningError::MalformedGrid {
            line,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlanningError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanningError>;

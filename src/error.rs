use std::error::Error;
use std::fmt;

/// Everything that can go wrong between receiving lanes and producing a report.
#[derive(Debug)]
pub enum ProcessError {
    NoLanes,
    TooManyLanes { count: usize, max: usize },
    DuplicateLaneId(String),
    UnreadableReport { lane_id: String },
    InvalidConfig(String),
    LaneIndexOutOfRange { index: usize, lanes: usize },
    TimingOverflow { lane_index: usize },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::NoLanes => write!(f, "No lanes provided"),
            ProcessError::TooManyLanes { count, max } => {
                write!(f, "{} lanes provided, at most {} are supported", count, max)
            }
            ProcessError::DuplicateLaneId(id) => write!(f, "Lane id {:?} appears more than once", id),
            ProcessError::UnreadableReport { lane_id } => {
                write!(f, "Detector report for lane {:?} has no vehicle total", lane_id)
            }
            ProcessError::InvalidConfig(reason) => write!(f, "Invalid signal config: {}", reason),
            ProcessError::LaneIndexOutOfRange { index, lanes } => {
                write!(f, "Lane index {} is out of range for {} lanes", index, lanes)
            }
            ProcessError::TimingOverflow { lane_index } => {
                write!(f, "Timing override for lane {} overflows the signal cycle", lane_index)
            }
            ProcessError::Io(e) => write!(f, "I/O error: {}", e),
            ProcessError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl Error for ProcessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProcessError::Io(e) => Some(e),
            ProcessError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl From<serde_json::Error> for ProcessError {
    fn from(e: serde_json::Error) -> Self {
        ProcessError::Json(e)
    }
}

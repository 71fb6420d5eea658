use crate::people::InfectionStatus;
use crate::{GroupId, PersonId};
use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `EpidemicError` and maps other errors to
/// convert to an `EpidemicError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpidemicError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// A parameter is outside its allowed range.
    InvalidParameter(String),
    /// A city has children to place but too few of them to open a single school.
    NoSchools { city: String, children: usize },
    /// Removal of a person from a group they do not belong to.
    NotAMember { group: String, person: PersonId },
    /// Infection of a person whose status is terminal.
    InvalidTransition { person: PersonId, from: InfectionStatus },
    UnknownGroup(GroupId),
    UnknownPerson(PersonId),
    /// A failure while advancing the given day.
    DayFailed { day: usize, source: Box<EpidemicError> },
    EpidemicError(String),
}

impl From<io::Error> for EpidemicError {
    fn from(error: io::Error) -> Self {
        EpidemicError::IoError(error)
    }
}

impl From<serde_json::Error> for EpidemicError {
    fn from(error: serde_json::Error) -> Self {
        EpidemicError::JsonError(error)
    }
}

impl From<csv::Error> for EpidemicError {
    fn from(error: csv::Error) -> Self {
        EpidemicError::CsvError(error)
    }
}

impl From<String> for EpidemicError {
    fn from(error: String) -> Self {
        EpidemicError::EpidemicError(error)
    }
}

impl From<&str> for EpidemicError {
    fn from(error: &str) -> Self {
        EpidemicError::EpidemicError(error.to_string())
    }
}

impl std::error::Error for EpidemicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EpidemicError::IoError(e) => Some(e),
            EpidemicError::JsonError(e) => Some(e),
            EpidemicError::CsvError(e) => Some(e),
            EpidemicError::DayFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl Display for EpidemicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpidemicError::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            EpidemicError::NoSchools { city, children } => write!(
                f,
                "{city} has {children} children but not enough to fill a single school"
            ),
            EpidemicError::NotAMember { group, person } => {
                write!(f, "{person:?} is not a member of {group}")
            }
            EpidemicError::InvalidTransition { person, from } => {
                write!(f, "{person:?} cannot be infected from status {from:?}")
            }
            EpidemicError::DayFailed { day, source } => write!(f, "Day {day}: {source}"),
            _ => write!(f, "Error: {self:?}"),
        }
    }
}

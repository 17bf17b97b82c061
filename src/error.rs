//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    GlobPattern(glob::PatternError),
    Serde(serde_json::Error),
    Reqwest(reqwest::Error),
    Zip(zip::result::ZipError),
    Regex(regex::Error),
    /// A required column is absent from the input header.
    MissingColumn(String),
    /// The output file already exists with another header.
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    /// Invalid or incomplete run configuration.
    Config(String),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::GlobPattern(e) => write!(f, "glob pattern error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Reqwest(e) => write!(f, "http error: {}", e),
            Error::Zip(e) => write!(f, "zip error: {}", e),
            Error::Regex(e) => write!(f, "regex error: {}", e),
            Error::MissingColumn(c) => write!(f, "missing required column in input: {:?}", c),
            Error::HeaderMismatch { expected, found } => write!(
                f,
                "output exists with a different header. Expected {:?}, found {:?}",
                expected, found
            ),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Error {
        Error::Zip(e)
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Error {
        Error::Regex(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

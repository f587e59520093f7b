use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while drawing label boxes.
///
/// Only [`Error::MissingImage`] and [`Error::MalformedLabelLine`] are recovered
/// by the batch driver; every other variant aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    /// The class configuration file does not exist.
    #[error("class config file not found: {}", path.display())]
    MissingClassFile { path: PathBuf },

    /// The image paired with a label file is missing or could not be decoded.
    #[error("no loadable image {} for label {}", image.display(), label.display())]
    MissingImage {
        label: PathBuf,
        image: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A line of a label file could not be parsed.
    #[error("malformed label line {line} in {}: {reason}", path.display())]
    MalformedLabelLine {
        path: PathBuf,
        line: usize,
        reason: LabelLineError,
    },

    /// A label refers to a class id the registry does not have.
    #[error(
        "class id {class_id} in {} is out of range for {class_count} class(es)",
        label.display()
    )]
    InvalidClassId {
        class_id: usize,
        class_count: usize,
        label: PathBuf,
    },

    /// A normalized box does not fit into pixel coordinates.
    #[error("box ({cx}, {cy}, {w}, {h}) cannot be mapped onto a {width}x{height} image")]
    CoordinateOverflow {
        cx: f64,
        cy: f64,
        w: f64,
        h: f64,
        width: u32,
        height: u32,
    },

    /// The annotated copy could not be written.
    #[error("failed to write {}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single label line was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelLineError {
    #[error("expected 5 fields, found {0}")]
    TooFewFields(usize),
    #[error("class id '{0}' is not an integer")]
    InvalidClassId(String),
    #[error("{field} '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

//! Draws the boxes of normalized `<class> <cx> <cy> <w> <h>` label files onto
//! copies of their images, for checking object detection datasets by eye.
//!
//! The modules follow the order of a run: load the [classes], [scan] the
//! directory, parse each [label] file, pair it with its image ([pairing]),
//! map boxes to pixels ([rect]), pick [colors] and [render]. [run] drives the
//! whole batch.

pub mod classes;
pub mod colors;
mod error;
pub mod label;
pub mod pairing;
pub mod rect;
pub mod render;
pub mod run;
pub mod scan;

pub use error::{Error, LabelLineError, Result};
pub use run::{RenderConfig, RunSummary, run, run_with_output};

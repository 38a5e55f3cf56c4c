//! File I/O, resampling, and serialization for the shapematch pipeline.

mod domain;
mod error;
mod reader;
mod resample;
mod writer;

pub use domain::{CurveTable, ExperimentName};
pub use error::IoError;
pub use reader::CurveReader;
pub use resample::{Resampled, resample};
pub use writer::ResultWriter;

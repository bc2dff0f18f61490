//! `rsim-output` — fix-trace output for the rsim route simulator.
//!
//! | Type              | Role                                                        |
//! |-------------------|-------------------------------------------------------------|
//! | [`FixWriter`]     | backend trait: write one [`FixRow`], flush on `finish`      |
//! | [`CsvFixWriter`]  | CSV backend, creates `fixes.csv`                            |
//! | [`TracePublisher`]| `StatePublisher` adapter numbering fixes into any backend   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rsim_output::TracePublisher;
//!
//! let trace = Arc::new(TracePublisher::csv(Path::new("./output"))?);
//! let mut engine = SimulationEngine::new(Arc::clone(&trace), config)?;
//! engine.start(route).await?;
//! engine.wait().await?;
//! trace.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod publisher;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvFixWriter;
pub use error::{OutputError, OutputResult};
pub use publisher::TracePublisher;
pub use row::FixRow;
pub use writer::FixWriter;

//! Core of a 2D seismic line viewer: read a SEG-Y file, assemble its
//! traces into a samples x traces section, pick amplitude display
//! bounds and compute the trace-averaged amplitude spectrum.
pub mod config;
pub mod seismic;
pub use config::{AxisField, HeaderBytes, PlotSize, ViewerConfig};
pub use seismic::*;

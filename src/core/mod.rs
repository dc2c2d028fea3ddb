//! Core liftover functionality
//!
//! This module contains the interval and rule value types, the
//! conversion map splitting algorithm, the stage pipeline, and the
//! remap file parser.

mod error;
mod interval;
mod map;
mod pipeline;
mod remap;

pub use error::{
    BuildError, BuildResult, RangeliftError, RemapParseError, RemapResult, Result,
};
pub use interval::Interval;
pub use map::{ConversionMap, Rule, RuleParts};
pub use pipeline::{seed_intervals, Pipeline, RunOutcome};
pub use remap::{
    detect_compression, parse_remap_bytes, parse_remap_file, parse_remap_reader,
    CompressionFormat, RemapFile, StageSpec,
};

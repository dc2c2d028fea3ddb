//! Rangelift - staged piecewise liftover of integer values and ranges
//!
//! Pushes sets of integers and inclusive integer ranges through an
//! ordered chain of piecewise-offset translation tables. Ranges that
//! straddle table boundaries are split, partially translated, and
//! partially passed through, so the output set is exactly the image of
//! the input set, with total length conserved.
//!
//! # Example
//!
//! ```
//! use rangelift::{ConversionMap, Interval, Pipeline};
//!
//! // one stage: [98, 99] -> -48, [50, 97] -> +2
//! let stage = ConversionMap::from_triples("demo", [(50, 98, 2), (52, 50, 48)])?;
//! let pipeline = Pipeline::new(vec![stage]);
//!
//! // seeds pair up as (start, length)
//! let outcome = pipeline.run(&[79, 14, 55, 13])?;
//! assert_eq!(outcome.intervals, vec![Interval::new(57, 69), Interval::new(81, 94)]);
//! assert_eq!(outcome.min_interval_start(), Some(57));
//! # Ok::<(), rangelift::BuildError>(())
//! ```

pub mod core;

// Re-export commonly used types
pub use core::{
    detect_compression, parse_remap_bytes, parse_remap_file, parse_remap_reader, seed_intervals,
    BuildError, CompressionFormat, ConversionMap, Interval, Pipeline, RangeliftError, RemapFile,
    RemapParseError, Rule, RuleParts, RunOutcome, StageSpec,
};

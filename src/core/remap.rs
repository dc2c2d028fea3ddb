//! Remap file parsing
//!
//! Parses the staged translation-table format that drives a run.
//!
//! # Remap File Format
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//! ```
//!
//! - The first content line holds the seed values, after an optional
//!   `name:` prefix
//! - A line whose first token is not an integer opens a new stage; the
//!   stage name is the line with a trailing `map:` marker trimmed
//! - Stage data lines hold exactly three integers:
//!   `destination_start source_start length`
//! - Blank lines and `#` comments are skipped

use crate::core::error::{BuildResult, RemapParseError, RemapResult};
use crate::core::map::ConversionMap;
use crate::core::pipeline::Pipeline;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One stage block as read from a remap file
///
/// Raw `(destination_start, source_start, length)` triples, unvalidated
/// and unsorted; validation happens when the stage becomes a
/// [`ConversionMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    /// Stage name from the header line
    pub name: String,
    /// Raw rule triples in file order
    pub triples: Vec<(i64, i64, i64)>,
}

/// Result of parsing a remap file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapFile {
    /// Seed values from the first content line
    pub seeds: Vec<i64>,
    /// Stage blocks in application order
    pub stages: Vec<StageSpec>,
}

impl RemapFile {
    /// Build the pipeline described by the stage blocks
    ///
    /// Surfaces configuration errors with the stage name and rule index
    /// attached.
    pub fn build_pipeline(&self) -> BuildResult<Pipeline> {
        let stages = self
            .stages
            .iter()
            .map(|stage| ConversionMap::from_triples(&stage.name, stage.triples.iter().copied()))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Pipeline::new(stages))
    }
}

/// Parse every whitespace-separated token on `s` as an integer
fn parse_integers(s: &str, line: usize) -> RemapResult<Vec<i64>> {
    s.split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| RemapParseError::InvalidNumber {
                    line,
                    value: token.to_string(),
                })
        })
        .collect()
}

/// Whether a content line opens a stage block
///
/// Data lines always lead with an integer, so the first token decides.
fn is_stage_header(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map(|token| token.parse::<i64>().is_err())
        .unwrap_or(false)
}

/// Stage name from a header line: the trailing `map:` marker trimmed
fn stage_name(line: &str) -> String {
    line.strip_suffix("map:").unwrap_or(line).trim().to_string()
}

/// Parse a remap file from a reader
///
/// This function handles the core parsing logic, supporting any
/// `BufRead` source.
pub fn parse_remap_reader<R: BufRead>(reader: R) -> RemapResult<RemapFile> {
    let mut seeds: Option<Vec<i64>> = None;
    let mut stages: Vec<StageSpec> = Vec::new();
    let mut line_number: usize = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if seeds.is_none() {
            let tail = trimmed
                .split_once(':')
                .map(|(_, tail)| tail)
                .unwrap_or(trimmed);
            seeds = Some(parse_integers(tail, line_number)?);
            continue;
        }

        if is_stage_header(trimmed) {
            stages.push(StageSpec {
                name: stage_name(trimmed),
                triples: Vec::new(),
            });
        } else {
            let stage = stages
                .last_mut()
                .ok_or(RemapParseError::RuleOutsideStage { line: line_number })?;
            let values = parse_integers(trimmed, line_number)?;
            if values.len() != 3 {
                return Err(RemapParseError::BadRuleArity {
                    line: line_number,
                    count: values.len(),
                });
            }
            stage.triples.push((values[0], values[1], values[2]));
        }
    }

    let seeds = seeds.ok_or(RemapParseError::MissingSeeds)?;
    log::debug!(
        "parsed remap file: {} seed value(s), {} stage(s)",
        seeds.len(),
        stages.len()
    );
    Ok(RemapFile { seeds, stages })
}

/// Parse a remap file from a path
///
/// Automatically detects and handles compression:
/// - `.gz` extension or gzip magic bytes (1f 8b)
/// - `.bz2` extension or bzip2 magic bytes (42 5a 68)
/// - Plain text otherwise
pub fn parse_remap_file(path: &Path) -> RemapResult<RemapFile> {
    use std::fs::File;

    let format = detect_compression(path)?;
    let file = File::open(path)?;

    match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::GzDecoder::new(file);
            let reader = BufReader::with_capacity(128 * 1024, decoder);
            parse_remap_reader(reader)
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(file);
            let reader = BufReader::with_capacity(128 * 1024, decoder);
            parse_remap_reader(reader)
        }
        CompressionFormat::Plain => {
            let reader = BufReader::with_capacity(128 * 1024, file);
            parse_remap_reader(reader)
        }
    }
}

/// Compression format for remap files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> RemapResult<CompressionFormat> {
    use std::fs::File;
    use std::io::Read;

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // First check by extension
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Parse a remap file from bytes (for testing)
pub fn parse_remap_bytes(data: &[u8]) -> RemapResult<RemapFile> {
    parse_remap_reader(BufReader::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let data = b"\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48
";
        let remap = parse_remap_bytes(data).unwrap();
        assert_eq!(remap.seeds, vec![79, 14, 55, 13]);
        assert_eq!(remap.stages.len(), 1);
        assert_eq!(remap.stages[0].name, "seed-to-soil");
        assert_eq!(remap.stages[0].triples, vec![(50, 98, 2), (52, 50, 48)]);
    }

    #[test]
    fn test_parse_multiple_stages() {
        let data = b"\
seeds: 1 2

first map:
10 0 5

second map:
0 10 5
20 30 2
";
        let remap = parse_remap_bytes(data).unwrap();
        assert_eq!(remap.stages.len(), 2);
        assert_eq!(remap.stages[0].name, "first");
        assert_eq!(remap.stages[1].name, "second");
        assert_eq!(remap.stages[1].triples.len(), 2);
    }

    #[test]
    fn test_parse_with_comments() {
        let data = b"\
# staged tables
seeds: 5 1

# identity-ish stage
shift map:
100 0 10
";
        let remap = parse_remap_bytes(data).unwrap();
        assert_eq!(remap.seeds, vec![5, 1]);
        assert_eq!(remap.stages.len(), 1);
    }

    #[test]
    fn test_parse_header_without_map_marker() {
        let data = b"\
seeds: 1 2

lift
10 0 5
";
        let remap = parse_remap_bytes(data).unwrap();
        assert_eq!(remap.stages[0].name, "lift");
    }

    #[test]
    fn test_error_invalid_number_has_line() {
        let data = b"\
seeds: 1 2

broken map:
50 9x8 2
";
        let err = parse_remap_bytes(data).unwrap_err();
        match err {
            RemapParseError::InvalidNumber { line, value } => {
                assert_eq!(line, 4);
                assert_eq!(value, "9x8");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_bad_arity() {
        let data = b"\
seeds: 1 2

broken map:
50 98
";
        let err = parse_remap_bytes(data).unwrap_err();
        assert!(matches!(
            err,
            RemapParseError::BadRuleArity { line: 4, count: 2 }
        ));
    }

    #[test]
    fn test_error_missing_seeds() {
        let err = parse_remap_bytes(b"").unwrap_err();
        assert!(matches!(err, RemapParseError::MissingSeeds));
    }

    #[test]
    fn test_no_stages_is_valid() {
        let remap = parse_remap_bytes(b"seeds: 10 3\n").unwrap();
        assert!(remap.stages.is_empty());
        let pipeline = remap.build_pipeline().unwrap();
        assert_eq!(pipeline.stage_count(), 0);
    }

    #[test]
    fn test_build_pipeline_surfaces_stage_name() {
        let data = b"\
seeds: 1 2

soil map:
10 0 0
";
        let remap = parse_remap_bytes(data).unwrap();
        let err = remap.build_pipeline().unwrap_err();
        assert!(err.to_string().contains("soil"));
        assert!(err.to_string().contains("rule 0"));
    }
}

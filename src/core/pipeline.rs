//! Stage chaining
//!
//! A [`Pipeline`] owns an ordered sequence of conversion maps and pushes
//! a working collection of values and intervals through them, stage by
//! stage. Each stage's output is the next stage's only input; no stage
//! observes another's intermediate state.

use crate::core::error::{BuildError, BuildResult};
use crate::core::interval::Interval;
use crate::core::map::ConversionMap;
use rayon::prelude::*;

/// Working sets at or above this size fan out across the rayon pool
///
/// Intervals translate independently within one stage, so the split is
/// safe; the final sort restores the set-wise contract.
const PARALLEL_THRESHOLD: usize = 64;

/// Build seed intervals from a flat list of alternating
/// `(start, length)` values
///
/// # Examples
/// ```
/// use rangelift::{seed_intervals, Interval};
///
/// let seeds = seed_intervals(&[79, 14, 55, 13]).unwrap();
/// assert_eq!(seeds, vec![Interval::new(79, 92), Interval::new(55, 67)]);
/// ```
pub fn seed_intervals(values: &[i64]) -> BuildResult<Vec<Interval>> {
    if values.len() % 2 != 0 {
        return Err(BuildError::OddSeedCount {
            count: values.len(),
        });
    }
    values
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            let (start, length) = (pair[0], pair[1]);
            if length <= 0 {
                return Err(BuildError::NonPositiveSeedLength { index, length });
            }
            Ok(Interval::from_start_len(start, length))
        })
        .collect()
}

/// An ordered chain of conversion maps
///
/// Constructed once from the full staged input and consumed
/// top-to-bottom. Stages execute strictly sequentially; only the work
/// within one stage may run in parallel.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<ConversionMap>,
}

impl Pipeline {
    /// Create a pipeline from its stages, in application order
    pub fn new(stages: Vec<ConversionMap>) -> Self {
        Self { stages }
    }

    /// The stages, in application order
    pub fn stages(&self) -> &[ConversionMap] {
        &self.stages
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Total number of rules across all stages
    pub fn rule_count(&self) -> usize {
        self.stages.iter().map(ConversionMap::rule_count).sum()
    }

    /// Push a collection of scalar values through every stage
    pub fn translate_values(&self, seed: Vec<i64>) -> Vec<i64> {
        self.stages.iter().fold(seed, |values, stage| {
            values
                .into_iter()
                .map(|v| stage.translate_value(v))
                .collect()
        })
    }

    /// Push a collection of intervals through every stage
    ///
    /// The result is always sorted, including for a stage-less
    /// pipeline. Large working sets are translated in parallel; the
    /// output is re-sorted afterwards, so the result set is identical
    /// either way.
    pub fn translate_intervals(&self, mut seed: Vec<Interval>) -> Vec<Interval> {
        seed.sort_unstable();
        self.stages.iter().fold(seed, |intervals, stage| {
            if intervals.len() >= PARALLEL_THRESHOLD {
                let mut out: Vec<Interval> = intervals
                    .par_iter()
                    .flat_map_iter(|&iv| stage.translate_interval(iv))
                    .collect();
                out.sort_unstable();
                out
            } else {
                stage.translate_intervals(&intervals)
            }
        })
    }

    /// Run both modes from one flat seed list
    ///
    /// The seed values feed the scalar path as-is and the interval path
    /// as `(start, length)` pairs. Seeding errors are configuration
    /// errors; translation itself cannot fail.
    pub fn run(&self, seed_values: &[i64]) -> BuildResult<RunOutcome> {
        let seeds = seed_intervals(seed_values)?;
        log::debug!(
            "running {} stage(s) over {} value(s) / {} interval(s)",
            self.stage_count(),
            seed_values.len(),
            seeds.len()
        );
        Ok(RunOutcome {
            values: self.translate_values(seed_values.to_vec()),
            intervals: self.translate_intervals(seeds),
        })
    }
}

/// Final collections after the last stage
///
/// The answers are read-only reductions over these collections and are
/// not part of the translation engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Scalar results, one per seed value, in seed order
    pub values: Vec<i64>,
    /// Interval results, sorted
    pub intervals: Vec<Interval>,
}

impl RunOutcome {
    /// Minimum scalar result
    pub fn min_value(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    /// Minimum lower bound across the interval results
    pub fn min_interval_start(&self) -> Option<i64> {
        self.intervals.iter().map(|iv| iv.first).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_intervals_pairs() {
        let seeds = seed_intervals(&[0, 5, 100, 1]).unwrap();
        assert_eq!(seeds, vec![Interval::new(0, 4), Interval::new(100, 100)]);
    }

    #[test]
    fn test_seed_intervals_odd_count() {
        let err = seed_intervals(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, BuildError::OddSeedCount { count: 3 });
    }

    #[test]
    fn test_seed_intervals_bad_length() {
        let err = seed_intervals(&[1, 2, 3, -1]).unwrap_err();
        assert_eq!(
            err,
            BuildError::NonPositiveSeedLength {
                index: 1,
                length: -1,
            }
        );
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::default();
        let outcome = pipeline.run(&[79, 14, 55, 13]).unwrap();
        assert_eq!(outcome.values, vec![79, 14, 55, 13]);
        assert_eq!(
            outcome.intervals,
            vec![Interval::new(55, 67), Interval::new(79, 92)]
        );
        assert_eq!(outcome.min_value(), Some(13));
        assert_eq!(outcome.min_interval_start(), Some(55));
    }

    #[test]
    fn test_two_stage_partial_passthrough() {
        // stage 1 lifts [0, 10] by +100; stage 2 drops [105, 115] by
        // -100, so only part of the lifted range comes back down
        let stage1 = ConversionMap::from_triples("up", [(100, 0, 11)]).unwrap();
        let stage2 = ConversionMap::from_triples("down", [(5, 105, 11)]).unwrap();
        let pipeline = Pipeline::new(vec![stage1, stage2]);

        let outcome = pipeline.run(&[0, 11]).unwrap();
        assert_eq!(
            outcome.intervals,
            vec![Interval::new(5, 10), Interval::new(100, 104)]
        );
        assert_eq!(outcome.min_interval_start(), Some(5));

        // length is conserved through both stages
        let total: u64 = outcome.intervals.iter().map(Interval::len).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn test_scalar_and_interval_paths_agree() {
        let stage = ConversionMap::from_triples("demo", [(50, 98, 2), (52, 50, 48)]).unwrap();
        let pipeline = Pipeline::new(vec![stage]);
        let outcome = pipeline.run(&[79, 1, 98, 1]).unwrap();

        // each singleton seed interval lands where the scalar does
        assert_eq!(outcome.values, vec![81, 1, 50, 1]);
        assert_eq!(
            outcome.intervals,
            vec![Interval::new(50, 50), Interval::new(81, 81)]
        );
    }

    #[test]
    fn test_parallel_path_matches_serial() {
        let stage = ConversionMap::from_triples("wide", [(1000, 100, 50), (5000, 300, 100)])
            .unwrap();
        let pipeline = Pipeline::new(vec![stage.clone()]);

        // enough intervals to cross the parallel threshold
        let seeds: Vec<Interval> = (0..200)
            .map(|i| Interval::from_start_len(i * 7, 5))
            .collect();

        let parallel = pipeline.translate_intervals(seeds.clone());
        let serial = stage.translate_intervals(&seeds);
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_empty_seed_list() {
        let pipeline = Pipeline::default();
        let outcome = pipeline.run(&[]).unwrap();
        assert_eq!(outcome.min_value(), None);
        assert_eq!(outcome.min_interval_start(), None);
    }
}

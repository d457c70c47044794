use std::collections::HashMap;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::estimators::errors::{MicrostateError, Result};
use crate::estimators::recurrence::EuclideanThreshold;
use crate::estimators::sampling::SamplePlan;
use crate::estimators::settings::{Settings, Strategy};
use crate::estimators::tensor::Tensor;
use crate::estimators::traits::RecurrencePredicate;

/// Default fraction of the recurrence space visited by a run.
pub const DEFAULT_SAMPLE_RATE: f64 = 0.2;

/// Estimated probability table over microstate pattern codes.
///
/// Produced once per run and immutable afterwards. In dense form the table
/// holds one probability per pattern code in `[0, 2^hypervolume)`; in sparse
/// form only observed codes are stored and absent codes are implicitly zero.
/// With at least one valid sample the probabilities sum to one within
/// floating-point tolerance.
#[derive(Debug, Clone)]
pub enum ProbabilityTable {
    Dense(Vec<f64>),
    Sparse(HashMap<u64, f64>),
}

impl ProbabilityTable {
    /// Probability of one pattern code; zero for codes never observed.
    pub fn probability(&self, code: u64) -> f64 {
        match self {
            Self::Dense(table) => table.get(code as usize).copied().unwrap_or(0.0),
            Self::Sparse(table) => table.get(&code).copied().unwrap_or(0.0),
        }
    }

    /// Number of pattern codes with non-zero probability.
    pub fn observed(&self) -> usize {
        match self {
            Self::Dense(table) => table.iter().filter(|&&p| p > 0.0).count(),
            Self::Sparse(table) => table.values().filter(|&&p| p > 0.0).count(),
        }
    }

    /// Shannon entropy of the microstate distribution in nats.
    pub fn entropy(&self) -> f64 {
        let mut h = 0.0f64;
        match self {
            Self::Dense(table) => {
                for &p in table {
                    h -= if p > 0.0 { p * p.ln() } else { 0.0 };
                }
            }
            Self::Sparse(table) => {
                for &p in table.values() {
                    h -= if p > 0.0 { p * p.ln() } else { 0.0 };
                }
            }
        }
        h
    }

    /// The dense table, if this run used the vector strategy.
    pub fn as_dense(&self) -> Option<&[f64]> {
        match self {
            Self::Dense(table) => Some(table),
            Self::Sparse(_) => None,
        }
    }

    /// The sparse table, if this run used the dictionary strategy.
    pub fn as_sparse(&self) -> Option<&HashMap<u64, f64>> {
        match self {
            Self::Dense(_) => None,
            Self::Sparse(table) => Some(table),
        }
    }
}

/// Per-worker histogram of pattern codes.
enum Histogram {
    Dense(Vec<u64>),
    Sparse(HashMap<u64, u64>),
}

impl Histogram {
    fn for_settings(settings: &Settings) -> Self {
        match settings.strategy() {
            Strategy::Dense => Histogram::Dense(vec![0; 1usize << settings.hypervolume()]),
            Strategy::Sparse => Histogram::Sparse(HashMap::new()),
        }
    }

    fn record(&mut self, code: u64) {
        match self {
            Histogram::Dense(counts) => counts[code as usize] += 1,
            Histogram::Sparse(counts) => *counts.entry(code).or_insert(0) += 1,
        }
    }

    fn merge(&mut self, other: Histogram) {
        match (self, other) {
            (Histogram::Dense(into), Histogram::Dense(from)) => {
                for (bucket, count) in into.iter_mut().zip(from) {
                    *bucket += count;
                }
            }
            (Histogram::Sparse(into), Histogram::Sparse(from)) => {
                for (code, count) in from {
                    *into.entry(code).or_insert(0) += count;
                }
            }
            _ => unreachable!("workers share one storage strategy per run"),
        }
    }

    fn normalize(self, total_valid: u64) -> ProbabilityTable {
        let total = total_valid as f64;
        match self {
            Histogram::Dense(counts) => ProbabilityTable::Dense(
                counts.into_iter().map(|count| count as f64 / total).collect(),
            ),
            Histogram::Sparse(counts) => ProbabilityTable::Sparse(
                counts
                    .into_iter()
                    .map(|(code, count)| (code, count as f64 / total))
                    .collect(),
            ),
        }
    }
}

/// Microstate distribution estimation
///
/// This struct provides static methods for estimating the probability
/// distribution of recurrence microstates between two datasets. Each call is
/// one fork/join episode: anchors are drawn, dispatched to
/// `settings.threads()` workers, and the partial histograms are reduced and
/// normalized after all workers return.
pub struct Distribution;

impl Distribution {
    /// Estimate with the default sample rate, the Euclidean threshold test,
    /// and an entropy-seeded random source.
    ///
    /// # Arguments
    ///
    /// * `settings` - Validated window geometry
    /// * `data_x`, `data_y` - The two datasets being compared
    /// * `params` - Parameters forwarded to the recurrence test; the default
    ///   test reads the threshold from `params[0]`
    pub fn estimate(
        settings: &Settings,
        data_x: &Tensor<f64>,
        data_y: &Tensor<f64>,
        params: &[f64],
    ) -> Result<ProbabilityTable> {
        Self::estimate_with(
            settings,
            data_x,
            data_y,
            params,
            DEFAULT_SAMPLE_RATE,
            &EuclideanThreshold,
            &mut StdRng::from_entropy(),
        )
    }

    /// Estimate with an explicit sample rate.
    pub fn estimate_with_rate(
        settings: &Settings,
        data_x: &Tensor<f64>,
        data_y: &Tensor<f64>,
        params: &[f64],
        sample_rate: f64,
    ) -> Result<ProbabilityTable> {
        Self::estimate_with(
            settings,
            data_x,
            data_y,
            params,
            sample_rate,
            &EuclideanThreshold,
            &mut StdRng::from_entropy(),
        )
    }

    /// Estimate with an explicit sample rate, recurrence test, and random
    /// source. All other entry points delegate here.
    ///
    /// Passing a seeded `rng` makes the run reproducible: the anchor set, and
    /// with it the returned table, depend only on the seed and the inputs.
    pub fn estimate_with<P, R>(
        settings: &Settings,
        data_x: &Tensor<f64>,
        data_y: &Tensor<f64>,
        params: &[f64],
        sample_rate: f64,
        predicate: &P,
        rng: &mut R,
    ) -> Result<ProbabilityTable>
    where
        P: RecurrencePredicate,
        R: Rng + ?Sized,
    {
        validate_datasets(settings, data_x, data_y)?;
        let plan = SamplePlan::draw(settings, data_x.shape(), data_y.shape(), sample_rate, rng)?;

        let workers = settings.threads();
        let results: Vec<Result<(Histogram, u64)>> = thread::scope(|scope| {
            let plan = &plan;
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || {
                        compute_share(settings, data_x, data_y, params, predicate, plan.share(worker))
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("worker thread panicked"))
                .collect()
        });

        let mut merged = Histogram::for_settings(settings);
        let mut total_valid = 0u64;
        for result in results {
            let (histogram, counter) = result?;
            total_valid += counter;
            merged.merge(histogram);
        }
        if total_valid == 0 {
            return Err(MicrostateError::Estimation(
                "no valid samples were collected; raise the sample rate or supply more data",
            ));
        }
        Ok(merged.normalize(total_valid))
    }
}

fn validate_datasets(
    settings: &Settings,
    data_x: &Tensor<f64>,
    data_y: &Tensor<f64>,
) -> Result<()> {
    if data_x.axes() < 2 {
        return Err(MicrostateError::DimensionMismatch(format!(
            "datasets need a state axis and at least one coordinate axis, got {} axes",
            data_x.axes()
        )));
    }
    if data_x.axes() != data_y.axes() {
        return Err(MicrostateError::DimensionMismatch(format!(
            "data x has {} axes but data y has {}",
            data_x.axes(),
            data_y.axes()
        )));
    }
    if data_x.extent(0) != data_y.extent(0) {
        return Err(MicrostateError::DimensionMismatch(format!(
            "data x and data y must share the state dimension along axis 0, got {} and {}",
            data_x.extent(0),
            data_y.extent(0)
        )));
    }
    let required = 2 * (data_x.axes() - 1);
    if settings.dimensions() != required {
        return Err(MicrostateError::DimensionMismatch(format!(
            "the configured window has {} axes but this data requires {required}",
            settings.dimensions()
        )));
    }
    Ok(())
}

/// Tally the pattern codes of one worker's anchor share.
///
/// Per anchor, the window hyper-rectangle is enumerated with a mixed-radix
/// counter (axis 0 fastest, each axis covering `[0, extent)`, exactly
/// `hypervolume` cells in total). Every cell whose recurrence test passes
/// contributes its bit weight to the anchor's pattern code.
fn compute_share<'a, P>(
    settings: &Settings,
    data_x: &Tensor<f64>,
    data_y: &Tensor<f64>,
    params: &[f64],
    predicate: &P,
    anchors: impl Iterator<Item = &'a [usize]>,
) -> Result<(Histogram, u64)>
where
    P: RecurrencePredicate,
{
    let dimensions = settings.dimensions();
    let half = settings.half_dimensions();
    let hypervolume = settings.hypervolume();

    let mut histogram = Histogram::for_settings(settings);
    let mut counter = 0u64;

    let mut offsets = vec![0usize; dimensions];
    let mut coords_x = vec![0usize; half];
    let mut coords_y = vec![0usize; half];

    for anchor in anchors {
        let (anchor_x, anchor_y) = anchor.split_at(half);
        offsets.fill(0);
        let mut code = 0u64;

        for cell in 0..hypervolume {
            for axis in 0..half {
                coords_x[axis] = anchor_x[axis] + offsets[axis];
                coords_y[axis] = anchor_y[axis] + offsets[half + axis];
            }
            let x = data_x.column(&coords_x)?;
            let y = data_y.column(&coords_y)?;
            if predicate.recurs(x, y, params)? {
                code += settings.weight(cell);
            }

            // Mixed-radix increment, carrying once an axis has covered its
            // full extent.
            offsets[0] += 1;
            for axis in 0..dimensions - 1 {
                if offsets[axis] >= settings.extent(axis) {
                    offsets[axis] = 0;
                    offsets[axis + 1] += 1;
                } else {
                    break;
                }
            }
        }

        histogram.record(code);
        counter += 1;
    }

    Ok((histogram, counter))
}

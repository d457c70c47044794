use rand::Rng;

use crate::estimators::errors::{MicrostateError, Result};
use crate::estimators::settings::Settings;

/// Randomly drawn anchor positions, split into balanced per-worker shares.
///
/// An anchor is a tuple of `settings.dimensions()` coordinates: the first
/// half positions the window inside dataset X, the second half inside
/// dataset Y. Anchors are stored flat and shares are contiguous ranges, so
/// the partition is exact: every anchor belongs to exactly one share.
#[derive(Debug)]
pub struct SamplePlan {
    dimensions: usize,
    count: usize,
    anchors: Vec<usize>,
    shares: Vec<std::ops::Range<usize>>,
}

impl SamplePlan {
    /// Draw anchors for one estimator run.
    ///
    /// `x_shape` and `y_shape` are the dataset shapes (axis 0 is the state
    /// dimension). Each anchor coordinate is drawn uniformly from
    /// `[0, data_extent - window_extent]`, inclusive, so the whole window
    /// stays inside the data; a window extent exceeding the data extent is a
    /// configuration error, never clamped. All randomness comes from the
    /// caller's `rng`.
    pub fn draw<R: Rng + ?Sized>(
        settings: &Settings,
        x_shape: &[usize],
        y_shape: &[usize],
        sample_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if !(sample_rate > 0.0 && sample_rate <= 1.0) {
            return Err(MicrostateError::Configuration(format!(
                "the sample rate must lie in (0, 1], got {sample_rate}"
            )));
        }

        let dimensions = settings.dimensions();
        let half = settings.half_dimensions();

        let search_volume: usize = x_shape[1..].iter().product::<usize>()
            * y_shape[1..].iter().product::<usize>();
        let count = (search_volume as f64 * sample_rate).floor() as usize;

        let mut anchors = vec![0usize; count * dimensions];
        for axis in 0..half {
            let max_x = anchor_bound(x_shape[axis + 1], settings.extent(axis), axis, "x")?;
            let max_y = anchor_bound(y_shape[axis + 1], settings.extent(half + axis), axis, "y")?;
            for sample in 0..count {
                let tuple = &mut anchors[sample * dimensions..(sample + 1) * dimensions];
                tuple[axis] = rng.gen_range(0..=max_x);
                tuple[half + axis] = rng.gen_range(0..=max_y);
            }
        }

        Ok(Self {
            dimensions,
            count,
            anchors,
            shares: partition(count, settings.threads()),
        })
    }

    /// Total number of anchors drawn.
    pub fn sample_count(&self) -> usize {
        self.count
    }

    /// Number of worker shares.
    pub fn shares(&self) -> usize {
        self.shares.len()
    }

    /// Number of anchors assigned to one worker.
    pub fn share_len(&self, worker: usize) -> usize {
        self.shares[worker].len()
    }

    /// The anchor tuples assigned to one worker.
    pub fn share(&self, worker: usize) -> impl Iterator<Item = &[usize]> {
        let range = &self.shares[worker];
        self.anchors[range.start * self.dimensions..range.end * self.dimensions]
            .chunks_exact(self.dimensions)
    }
}

fn anchor_bound(
    data_extent: usize,
    window_extent: usize,
    axis: usize,
    side: &str,
) -> Result<usize> {
    data_extent.checked_sub(window_extent).ok_or_else(|| {
        MicrostateError::Configuration(format!(
            "the window extent {window_extent} exceeds the data {side} extent \
             {data_extent} along coordinate axis {axis}"
        ))
    })
}

/// Split `count` anchors into `threads` contiguous shares whose sizes differ
/// by at most one, larger shares first.
fn partition(count: usize, threads: usize) -> Vec<std::ops::Range<usize>> {
    let base = count / threads;
    let mut rest = count % threads;
    let mut shares = Vec::with_capacity(threads);
    let mut start = 0;
    for _ in 0..threads {
        let len = base + if rest > 0 { rest -= 1; 1 } else { 0 };
        shares.push(start..start + len);
        start += len;
    }
    shares
}

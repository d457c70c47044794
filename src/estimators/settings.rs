// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::estimators::errors::{MicrostateError, Result};

/// Automatic mode switches to dictionary storage above this hypervolume.
const HYPERVOLUME_TO_DICTIONARY: usize = 26;

/// A pattern code must fit a 64-bit integer.
const MAX_HYPERVOLUME: usize = 64;

/// Fallback worker count when the requested number is unusable.
const DEFAULT_THREADS: usize = 1;

/// Caller override for the probability-table storage strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Pick from the hypervolume: dictionary above 26 cells, vector otherwise.
    Auto,
    /// Always use the dense vector representation.
    ForceVector,
    /// Always use the sparse dictionary representation.
    ForceDictionary,
}

/// Resolved storage strategy for histogram accumulation and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Dense,
    Sparse,
}

/// Validated microstate geometry shared by one or more estimator runs.
///
/// A `Settings` value fixes the window shape, the worker count, and the
/// storage strategy. Construction performs all validation; the value is
/// immutable afterwards and can be borrowed by any number of runs.
///
/// The window axes split into an X half and a Y half: for a window of `2d`
/// axes, axes `0..d` sweep dataset X and axes `d..2d` sweep dataset Y.
#[derive(Debug, Clone)]
pub struct Settings {
    shape: Vec<usize>,
    weights: Vec<u64>,
    hypervolume: usize,
    threads: usize,
    strategy: Strategy,
}

impl Settings {
    /// Build settings with hardware-concurrency workers and automatic
    /// storage-strategy selection.
    pub fn new(shape: Vec<usize>) -> Result<Self> {
        Self::new_with_threads_and_mode(shape, hardware_threads(), StorageMode::Auto)
    }

    /// Build settings with an explicit worker count.
    pub fn new_with_threads(shape: Vec<usize>, threads: usize) -> Result<Self> {
        Self::new_with_threads_and_mode(shape, threads, StorageMode::Auto)
    }

    /// Build settings with an explicit worker count and storage mode.
    ///
    /// A zero thread count falls back to one worker with a warning; a count
    /// above the available hardware parallelism warns but is honored.
    pub fn new_with_threads_and_mode(
        shape: Vec<usize>,
        threads: usize,
        mode: StorageMode,
    ) -> Result<Self> {
        if shape.len() < 2 {
            return Err(MicrostateError::Configuration(
                "the microstate structure requires at least two axes".into(),
            ));
        }
        if shape.len() % 2 != 0 {
            return Err(MicrostateError::Configuration(format!(
                "the microstate structure must pair an X side and a Y side, got {} axes",
                shape.len()
            )));
        }
        if let Some(axis) = shape.iter().position(|&extent| extent == 0) {
            return Err(MicrostateError::Configuration(format!(
                "window extents must be positive, axis {axis} is zero"
            )));
        }

        let hypervolume: usize = shape.iter().product();
        if hypervolume > MAX_HYPERVOLUME {
            return Err(MicrostateError::Configuration(format!(
                "the microstate hypervolume is {hypervolume}, but patterns must fit 64 bits"
            )));
        }

        let threads = resolve_threads(threads);
        let strategy = resolve_strategy(hypervolume, mode);
        if strategy == Strategy::Dense && hypervolume == MAX_HYPERVOLUME {
            return Err(MicrostateError::Configuration(
                "a dense table over 2^64 pattern codes is not addressable; \
                 use the dictionary strategy"
                    .into(),
            ));
        }

        let weights = (0..hypervolume).map(|cell| 1u64 << cell).collect();

        Ok(Self {
            shape,
            weights,
            hypervolume,
            threads,
            strategy,
        })
    }

    /// Number of window axes.
    pub fn dimensions(&self) -> usize {
        self.shape.len()
    }

    /// Number of shared coordinate axes per side (half the window axes).
    pub fn half_dimensions(&self) -> usize {
        self.shape.len() / 2
    }

    /// Window extent along one axis.
    pub fn extent(&self, axis: usize) -> usize {
        self.shape[axis]
    }

    /// The full window shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of window cells; also the bit width of a pattern code.
    pub fn hypervolume(&self) -> usize {
        self.hypervolume
    }

    /// Bit weight `2^cell` contributed by a recurring window cell.
    pub fn weight(&self, cell: usize) -> u64 {
        self.weights[cell]
    }

    /// Number of distinct pattern codes, `2^hypervolume`.
    pub fn possibilities(&self) -> u128 {
        1u128 << self.hypervolume
    }

    /// Worker count used by the estimator's fork/join phase.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Resolved storage strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

fn hardware_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_THREADS)
}

fn resolve_threads(requested: usize) -> usize {
    let available = hardware_threads();
    if requested < 1 {
        eprintln!(
            "[WARNING] recurrence microstates: the requested thread count is zero, \
             falling back to {DEFAULT_THREADS} worker"
        );
        return DEFAULT_THREADS;
    }
    if requested > available {
        eprintln!(
            "[WARNING] recurrence microstates: {requested} worker threads requested \
             but only {available} available; performance may degrade"
        );
    }
    requested
}

fn resolve_strategy(hypervolume: usize, mode: StorageMode) -> Strategy {
    let mut dictionary = mode == StorageMode::ForceDictionary;
    if hypervolume > HYPERVOLUME_TO_DICTIONARY {
        dictionary = true;
    }
    if mode == StorageMode::ForceVector {
        dictionary = false;
    }
    if dictionary { Strategy::Sparse } else { Strategy::Dense }
}

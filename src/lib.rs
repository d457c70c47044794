// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # recurrence-microstates
//!
//! High-performance Rust library for estimating recurrence microstate
//! distributions of multidimensional datasets by parallel stochastic sampling.
//!
//! A *microstate* is the binary pattern produced by sweeping a fixed-size
//! window over paired neighborhoods of two datasets and evaluating a
//! recurrence test at every window cell. Tallying the integer codes of these
//! patterns over many randomly drawn anchor positions yields a probability
//! table over all `2^hypervolume` possible microstates.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::array;
//! use recurrence_microstates::estimators::{Distribution, Settings, Tensor};
//!
//! // Two scalar time series compared through a 2x2 microstate window.
//! let x = Tensor::from_array1(array![0.1, 0.8, 0.2, 0.9, 0.15, 0.85]);
//! let y = Tensor::from_array1(array![0.12, 0.78, 0.22, 0.88, 0.14, 0.86]);
//!
//! let settings = Settings::new(vec![2, 2]).unwrap();
//! let table = Distribution::estimate_with_rate(&settings, &x, &y, &[0.3], 1.0).unwrap();
//!
//! // Probabilities over the 16 possible 2x2 patterns sum to one.
//! let total: f64 = (0..16).map(|code| table.probability(code)).sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`estimators::Settings`] validates the window geometry, resolves the
//!    worker count and the storage strategy, and derives the bit weights used
//!    to encode window outcomes into pattern codes.
//! 2. [`estimators::Tensor`] addresses each dataset through a fixed stride
//!    scheme and extracts state vectors as contiguous columns.
//! 3. [`estimators::SamplePlan`] draws anchor positions inside the valid
//!    recurrence space from a caller-supplied random source and splits them
//!    into balanced per-worker shares.
//! 4. [`estimators::Distribution`] fans the shares out to one thread per
//!    worker, reduces the partial histograms, and normalizes them into a
//!    [`estimators::ProbabilityTable`].
//!
//! ## Recurrence tests
//!
//! The default test accepts a pair of state vectors whose Euclidean distance
//! stays within a threshold; a supremum-norm variant and arbitrary
//! `Fn(&[f64], &[f64], &[f64]) -> bool` closures are supported through the
//! [`estimators::RecurrencePredicate`] trait.
//!
//! ## Determinism
//!
//! Anchor sampling reads from an explicit `rand::Rng`. The convenience entry
//! points seed from system entropy; pass a seeded `StdRng` to
//! [`estimators::Distribution::estimate_with`] for reproducible runs.
//!
//! ## Host-language bindings
//!
//! This crate is designed as a high-performance backend for host-language
//! binding layers: datasets enter through the `ndarray` and row-major buffer
//! constructors on [`estimators::Tensor`], and caller-supplied recurrence
//! functions enter as closures.

pub mod estimators;

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::estimators::errors::Result;

/// Boolean recurrence test between two state vectors.
///
/// Implementations are invoked once per window cell, concurrently from all
/// worker threads with disjoint inputs, so they must be `Sync` and keep no
/// mutable state. `params` is the caller-supplied parameter list forwarded
/// unchanged through the estimator.
pub trait RecurrencePredicate: Sync {
    /// Decide whether the state vectors `x` and `y` recur.
    fn recurs(&self, x: &[f64], y: &[f64], params: &[f64]) -> Result<bool>;
}

/// Any plain boolean function over two state vectors is a predicate; this is
/// the form in which binding layers hand over caller-supplied tests.
impl<F> RecurrencePredicate for F
where
    F: Fn(&[f64], &[f64], &[f64]) -> bool + Sync,
{
    fn recurs(&self, x: &[f64], y: &[f64], params: &[f64]) -> Result<bool> {
        Ok(self(x, y, params))
    }
}

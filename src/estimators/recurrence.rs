use crate::estimators::errors::{MicrostateError, Result};
use crate::estimators::traits::RecurrencePredicate;

/// Default recurrence test: Euclidean distance within a threshold.
///
/// Two state vectors recur when their Euclidean distance is at most
/// `params[0]`; the boundary is inclusive. An empty parameter list is an
/// error, not a silent `false`.
pub struct EuclideanThreshold;

impl RecurrencePredicate for EuclideanThreshold {
    fn recurs(&self, x: &[f64], y: &[f64], params: &[f64]) -> Result<bool> {
        let Some(&threshold) = params.first() else {
            return Err(MicrostateError::MissingParameter(
                "the Euclidean recurrence test requires a threshold parameter",
            ));
        };
        let mut distance = 0.0;
        for (a, b) in x.iter().zip(y.iter()) {
            let diff = a - b;
            distance += diff * diff;
        }
        Ok(distance.sqrt() <= threshold)
    }
}

/// Supremum-norm recurrence test.
///
/// Recurs when the largest per-component deviation is at most `params[0]`.
pub struct ChebyshevThreshold;

impl RecurrencePredicate for ChebyshevThreshold {
    fn recurs(&self, x: &[f64], y: &[f64], params: &[f64]) -> Result<bool> {
        let Some(&threshold) = params.first() else {
            return Err(MicrostateError::MissingParameter(
                "the supremum-norm recurrence test requires a threshold parameter",
            ));
        };
        let mut max = 0.0f64;
        for (a, b) in x.iter().zip(y.iter()) {
            let diff = (a - b).abs();
            if diff > max {
                max = diff;
            }
        }
        Ok(max <= threshold)
    }
}

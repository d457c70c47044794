pub mod distribution;
pub mod errors;
pub mod recurrence;
pub mod sampling;
pub mod settings;
pub mod tensor;
pub mod traits;

// Unified re-exports so users can import
// recurrence_microstates::estimators::* ergonomically.
pub use distribution::{DEFAULT_SAMPLE_RATE, Distribution, ProbabilityTable};
pub use errors::{MicrostateError, Result};
pub use recurrence::{ChebyshevThreshold, EuclideanThreshold};
pub use sampling::SamplePlan;
pub use settings::{Settings, StorageMode, Strategy};
pub use tensor::Tensor;
pub use traits::RecurrencePredicate;

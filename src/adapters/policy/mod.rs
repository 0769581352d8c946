//! Policy source adapters.
//!
//! - `EnvPolicySource` - re-reads thresholds from the environment per call
//! - `StaticPolicySource` - fixed thresholds (tests, dry runs)

mod env;
mod fixed;

pub use env::EnvPolicySource;
pub use fixed::StaticPolicySource;

//! Settler client and its request pipeline.
//!
//! Keep the public surface small and predictable. Implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod dedup;
pub mod error_classification;
pub mod execution;
pub mod policy;

pub use builder::SettlerClientBuilder;
pub use core::SettlerClient;
pub use dedup::{fingerprint, DedupCache};
pub use error_classification::{classify, ErrorBody};
pub use execution::ApiResponse;
pub use policy::RetryPolicy;

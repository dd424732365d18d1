//! Parley ABI crate: contracts shared by the context manager and completion providers.

pub mod backend;
pub mod sampling;

pub use backend::*;
pub use sampling::*;

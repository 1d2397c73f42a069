//! Precondition checks and the external-tar extraction delegate.
//!
//! # Architecture
//!
//! - `validate.rs` - argument and filesystem preconditions
//! - `runner.rs` - child-process construction and exit-status capture

pub use error::{Error, Result};
pub use runner::{Invocation, TarRunner};
pub use validate::{ensure_destination, ensure_readable_archive, resolve_strip_components};

mod error;
mod runner;
mod validate;

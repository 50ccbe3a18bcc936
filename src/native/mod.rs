//! The executable path: projects assembled into compile, archive and link
//! jobs for an external job runner.

pub mod features;
pub mod project;
pub mod toolchain;
pub mod tools;

pub use crate::core::config::Dialect;

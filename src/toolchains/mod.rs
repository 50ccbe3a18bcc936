//! Built-in toolchain definitions.

pub mod windows;

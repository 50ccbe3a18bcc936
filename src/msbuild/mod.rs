//! The declarative path: C/C++ projects rendered as MSBuild `.vcxproj` files.

pub mod features;
pub mod project;
pub mod schema;
pub mod toolchain;
pub mod tools;

//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! Renders C/C++ project models into MSBuild `.vcxproj` documents or into
//! compile, archive and link job graphs.

pub mod util;

pub mod core;
pub mod error;
pub mod msbuild;
pub mod native;
pub mod toolchain;
pub mod toolchains;

pub use crate::core::config::{Backend, Dialect, ToolchainConfig};
pub use crate::core::job::{Job, JobGraph};
pub use crate::core::model::{
    FeatureFlag, IncPath, LibPath, Macro, Project, ProjectKind, Scoped, Source, SourceGroup,
};
pub use crate::error::{Error, Result};
pub use crate::toolchain::{Toolchain, ToolchainRegistry};
pub use crate::util::environment::{EnvVar, Environment};

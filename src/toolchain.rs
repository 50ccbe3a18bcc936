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

//! Toolchains of either backend, and the table a driver picks them from.

use crate::core::config::{Backend, ToolchainConfig};
use crate::core::requirement::HostRequirement;
use crate::error::{Error, Hint, Result};
use crate::msbuild::features::Optimize;
use crate::msbuild::toolchain::MsBuildToolchain;
use crate::native::toolchain::NativeToolchain;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone)]
pub enum Toolchain {
    MsBuild(MsBuildToolchain),
    Native(NativeToolchain),
}

impl Toolchain {
    /// Creates a toolchain of the configured backend with the C/C++ tools
    /// and the `optimize` feature registered.
    pub fn from_config(config: ToolchainConfig) -> Result<Self> {
        Ok(match config.get_backend() {
            Backend::Msbuild => {
                let mut tc = MsBuildToolchain::new(config)?.with_cxx_tools();
                tc.add_feature("optimize", Arc::new(Optimize));
                Self::MsBuild(tc)
            }
            Backend::Native => Self::Native(NativeToolchain::from_config(config)),
        })
    }

    pub fn get_name(&self) -> &str {
        match self {
            Self::MsBuild(tc) => tc.get_name(),
            Self::Native(tc) => tc.get_name(),
        }
    }

    pub fn get_requirements(&self) -> &Vec<HostRequirement> {
        match self {
            Self::MsBuild(tc) => tc.get_requirements(),
            Self::Native(tc) => tc.get_requirements(),
        }
    }

    /// Checks if every host requirement is met.
    pub fn is_available(&self) -> bool {
        self.get_requirements().iter().all(|r| r.is_satisfied())
    }

    pub fn as_msbuild(&self) -> Option<&MsBuildToolchain> {
        match self {
            Self::MsBuild(tc) => Some(tc),
            Self::Native(_) => None,
        }
    }

    pub fn as_native(&self) -> Option<&NativeToolchain> {
        match self {
            Self::MsBuild(_) => None,
            Self::Native(tc) => Some(tc),
        }
    }
}

impl From<MsBuildToolchain> for Toolchain {
    fn from(tc: MsBuildToolchain) -> Self {
        Self::MsBuild(tc)
    }
}

impl From<NativeToolchain> for Toolchain {
    fn from(tc: NativeToolchain) -> Self {
        Self::Native(tc)
    }
}

impl FromStr for Toolchain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_config(ToolchainConfig::from_str(s)?)
    }
}

/// Toolchains keyed by name.
#[derive(Clone, Default)]
pub struct ToolchainRegistry {
    toolchains: BTreeMap<String, Toolchain>,
}

impl ToolchainRegistry {
    pub fn new() -> Self {
        Self {
            toolchains: BTreeMap::new(),
        }
    }

    /// Registers `tc` under its name, replacing any toolchain of the same name.
    pub fn add<T: Into<Toolchain>>(&mut self, tc: T) {
        let tc = tc.into();
        if self.toolchains.contains_key(tc.get_name()) == true {
            tracing::warn!("Replacing toolchain {}", tc.get_name());
        }
        self.toolchains.insert(tc.get_name().to_string(), tc);
    }

    pub fn find(&self, name: &str) -> Result<&Toolchain> {
        self.toolchains
            .get(name)
            .ok_or_else(|| Error::UnknownToolchain(name.to_string(), Hint::ToolchainsList))
    }

    /// Finds the toolchain `name` and checks that it can run on this host.
    pub fn select(&self, name: &str) -> Result<&Toolchain> {
        let tc = self.find(name)?;
        match tc.is_available() {
            true => Ok(tc),
            false => Err(Error::UnsupportedHost(name.to_string())),
        }
    }

    /// Lists every registered toolchain name in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.toolchains.keys().map(|k| k.as_str()).collect()
    }

    /// Iterates the toolchains whose host requirements are met.
    pub fn available(&self) -> impl Iterator<Item = &Toolchain> {
        self.toolchains.values().filter(|tc| tc.is_available())
    }

    pub fn len(&self) -> usize {
        self.toolchains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolchains.is_empty()
    }
}

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

use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{value:?} is not a legal value for {field:?}: expected one of {allowed:?}")]
    InvalidValue {
        value: String,
        field: String,
        allowed: Vec<String>,
    },
    #[error("element {element:?} does not declare a field named {field:?}")]
    UnknownField { element: String, field: String },
    #[error("could not find tool for {0:?} extension{1}")]
    NoToolForExtension(String, Hint),
    #[error("toolchain {0:?} has no {1} registered")]
    MissingTool(String, String),
    #[error("no feature named {0:?}{1}")]
    UnknownFeature(String, Hint),
    #[error("feature {0:?} is not supported: {1}")]
    UnsupportedFeature(String, String),
    #[error("failed to build project {0:?}: exited with error code: {1}")]
    BuildFailed(String, i32),
    #[error("process {0:?} was terminated by signal")]
    ChildProcTerminated(String),
    #[error("failed to execute process {0:?}: {1}")]
    ChildProcFailed(String, LastError),
    #[error("failed to write file {0:?}: {1}")]
    FileWrite(PathBuf, LastError),
    #[error("product {0:?} is already produced by a different job")]
    ConflictingJob(String),
    #[error("job {product:?} requires {prerequisite:?} but no job produces it")]
    MissingPrerequisite {
        product: String,
        prerequisite: String,
    },
    #[error("dependency declared for {0:?} but no job produces it")]
    UnknownJob(String),
    #[error("job graph contains a cycle through {0:?}")]
    CyclicJobGraph(Vec<String>),
    #[error("no toolchain named {0:?}{1}")]
    UnknownToolchain(String, Hint),
    #[error("invalid toolchain configuration: {0}")]
    ToolchainConfig(LastError),
    #[error("toolchain {0:?} cannot run on this host")]
    UnsupportedHost(String),
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = match s.split_whitespace().next() {
            Some(w) => w,
            None => return s,
        };
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    RegisterTool,
    RegisterFeature,
    ToolchainsList,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::RegisterTool => "register a tool for the extension with the selected toolchain",
            Self::RegisterFeature => {
                "features must be registered with the toolchain before a project can request them"
            }
            Self::ToolchainsList => "use `ToolchainRegistry::names` to see the list of known toolchains",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}

use serde_derive::{Deserialize, Serialize};
use std::fmt::Display;

/// A condition the host must meet for a toolchain to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostRequirement {
    Windows,
    Linux,
    Macos,
}

impl HostRequirement {
    /// Checks the requirement against the operating system this crate was built for.
    pub fn is_satisfied(&self) -> bool {
        match self {
            Self::Windows => cfg!(windows),
            Self::Linux => cfg!(target_os = "linux"),
            Self::Macos => cfg!(target_os = "macos"),
        }
    }
}

impl Display for HostRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Linux => write!(f, "linux"),
            Self::Macos => write!(f, "macos"),
        }
    }
}

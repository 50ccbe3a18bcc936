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

use std::collections::btree_set::BTreeSet;
use std::collections::btree_set::Iter;

/// The name of the variable the Visual Studio command prompt uses to report
/// its version.
pub const VISUAL_STUDIO_VERSION: &str = "VisualStudioVersion";

/// A single environment variable.
///
/// Keys compare without regard to ASCII case, matching how the Windows
/// process environment resolves names.
#[derive(Eq, Clone)]
pub struct EnvVar {
    key: String,
    value: String,
}

impl PartialEq for EnvVar {
    fn eq(&self, other: &Self) -> bool {
        self.key.eq_ignore_ascii_case(&other.key)
    }
}

impl Ord for EnvVar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key
            .to_ascii_lowercase()
            .cmp(&other.key.to_ascii_lowercase())
    }
}

impl PartialOrd for EnvVar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl EnvVar {
    pub fn with(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    pub fn get_key(&self) -> &str {
        &self.key
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.key, self.value)
    }
}

impl std::fmt::Display for EnvVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An ordered set of environment variables handed to child processes.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Environment(BTreeSet<EnvVar>);

impl Environment {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds `var` to the set, replacing any previous entry with the same key.
    pub fn add(mut self, var: EnvVar) -> Self {
        self.insert(var);
        self
    }

    pub fn insert(&mut self, var: EnvVar) {
        // `BTreeSet::insert` keeps the stale value on a key collision
        self.0.replace(var);
    }

    /// Looks up the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.key.eq_ignore_ascii_case(key))
            .map(|v| v.get_value())
    }

    pub fn iter(&self) -> Iter<'_, EnvVar> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Environment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut env = Environment::new();
        iter.into_iter()
            .for_each(|(k, v)| env.insert(EnvVar::with(k.as_ref(), v.as_ref())));
        env
    }
}

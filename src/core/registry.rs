//! Lookup tables a toolchain resolves its tools and features through.

use crate::error::{Error, Hint, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Tools keyed by the source-file extension they consume (`.cpp`, `.c`, ...).
pub struct ToolRegistry<T: ?Sized> {
    tools: HashMap<String, Arc<T>>,
}

impl<T: ?Sized> ToolRegistry<T> {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers `tool` for `extension`, replacing any previous tool.
    pub fn add(&mut self, extension: &str, tool: Arc<T>) {
        self.tools.insert(extension.to_string(), tool);
    }

    /// Resolves the tool for `extension`.
    ///
    /// An unregistered extension is an error rather than a skipped source.
    pub fn find(&self, extension: &str) -> Result<&Arc<T>> {
        self.tools
            .get(extension)
            .ok_or_else(|| Error::NoToolForExtension(extension.to_string(), Hint::RegisterTool))
    }

    /// Lists the registered extensions in sorted order.
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.tools.keys().map(|k| k.as_str()).collect();
        exts.sort();
        exts
    }
}

impl<T: ?Sized> Default for ToolRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for ToolRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            tools: self.tools.clone(),
        }
    }
}

/// Features keyed by the name a project requests them with.
///
/// Default features have no name and are applied to every project.
pub struct FeatureRegistry<F: ?Sized> {
    named: HashMap<String, Arc<F>>,
    defaults: Vec<Arc<F>>,
}

impl<F: ?Sized> FeatureRegistry<F> {
    pub fn new() -> Self {
        Self {
            named: HashMap::new(),
            defaults: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str, feature: Arc<F>) {
        self.named.insert(name.to_string(), feature);
    }

    pub fn add_default(&mut self, feature: Arc<F>) {
        self.defaults.push(feature);
    }

    pub fn find(&self, name: &str) -> Result<&Arc<F>> {
        self.named
            .get(name)
            .ok_or_else(|| Error::UnknownFeature(name.to_string(), Hint::RegisterFeature))
    }

    pub fn defaults(&self) -> &[Arc<F>] {
        &self.defaults
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.named.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }
}

impl<F: ?Sized> Default for FeatureRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> Clone for FeatureRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            named: self.named.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

/// A feature a toolchain honors without changing any settings, such as a
/// language standard its compiler uses by default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Builtin;

/// A feature registered only to refuse the projects that request it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reject {
    name: String,
    reason: String,
}

impl Reject {
    pub fn new(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn to_error(&self) -> Error {
        Error::UnsupportedFeature(self.name.clone(), self.reason.clone())
    }
}

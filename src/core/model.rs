//! The language-agnostic project model consumed by every toolchain.
//!
//! Projects are assembled by an outside loader and are never modified by a
//! toolchain transform.

use glob::{Pattern, PatternError};
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Library,
    Executable,
}

/// Visibility of a setting: whether dependents inherit it, and which
/// toolchains it applies to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scope {
    publish: bool,
    toolchain: Option<Pattern>,
}

impl Scope {
    /// Checks if the setting applies to the toolchain named `toolchain`.
    ///
    /// A scope without a toolchain pattern applies to every toolchain.
    pub fn matches(&self, toolchain: &str) -> bool {
        match &self.toolchain {
            Some(p) => p.matches(toolchain),
            None => true,
        }
    }

    pub fn is_published(&self) -> bool {
        self.publish
    }
}

/// Shared builder methods for anything carrying a [Scope].
pub trait Scoped: Sized {
    fn scope(&self) -> &Scope;

    fn scope_mut(&mut self) -> &mut Scope;

    /// Marks the setting as inherited by dependent projects.
    fn publish(mut self) -> Self {
        self.scope_mut().publish = true;
        self
    }

    /// Restricts the setting to toolchains whose name matches the glob `pattern`.
    fn toolchain(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.scope_mut().toolchain = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    fn matches(&self, toolchain: &str) -> bool {
        self.scope().matches(toolchain)
    }

    fn is_published(&self) -> bool {
        self.scope().is_published()
    }
}

macro_rules! impl_scoped {
    ($($t:ty),*) => {
        $(impl Scoped for $t {
            fn scope(&self) -> &Scope {
                &self.scope
            }

            fn scope_mut(&mut self) -> &mut Scope {
                &mut self.scope
            }
        })*
    };
}

impl_scoped!(Macro, IncPath, LibPath, FeatureFlag);

/// A preprocessor definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Macro {
    key: String,
    value: Option<String>,
    scope: Scope,
}

impl Macro {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
            scope: Scope::default(),
        }
    }

    pub fn with(key: &str, value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(key)
        }
    }

    pub fn get_key(&self) -> &str {
        &self.key
    }

    pub fn get_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Formats the definition as `KEY` or `KEY=VALUE`.
    pub fn define(&self) -> String {
        match &self.value {
            Some(v) => format!("{}={}", self.key, v),
            None => self.key.clone(),
        }
    }
}

/// A header search directory.
#[derive(Debug, Clone, PartialEq)]
pub struct IncPath {
    path: String,
    scope: Scope,
}

impl IncPath {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            scope: Scope::default(),
        }
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }
}

/// A library search directory.
#[derive(Debug, Clone, PartialEq)]
pub struct LibPath {
    path: String,
    scope: Scope,
}

impl LibPath {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            scope: Scope::default(),
        }
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }
}

/// A named feature a project requests from its toolchain.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFlag {
    name: String,
    scope: Scope,
}

impl FeatureFlag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scope: Scope::default(),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
}

/// A source file and the extension of the tool that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    path: String,
    tool: String,
}

impl Source {
    /// Creates a source whose tool is selected by the file's extension
    /// (including the leading dot, e.g. `.cpp`).
    pub fn new(path: &str) -> Self {
        let tool = match Path::new(path).extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy()),
            None => String::new(),
        };
        Self {
            path: path.to_string(),
            tool: tool,
        }
    }

    /// Creates a source consumed by the tool registered for `tool`.
    pub fn with_tool(path: &str, tool: &str) -> Self {
        Self {
            path: path.to_string(),
            tool: tool.to_string(),
        }
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }

    pub fn get_tool(&self) -> &str {
        &self.tool
    }
}

/// A named collection of sources inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceGroup {
    name: String,
    sources: Vec<Source>,
}

impl SourceGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sources: Vec::new(),
        }
    }

    pub fn source(mut self, path: &str) -> Self {
        self.sources.push(Source::new(path));
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_sources(&self) -> &Vec<Source> {
        &self.sources
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    uuid: Uuid,
    kind: ProjectKind,
    sources: Vec<Source>,
    source_groups: Vec<SourceGroup>,
    macros: Vec<Macro>,
    incpaths: Vec<IncPath>,
    libpaths: Vec<LibPath>,
    features: Vec<FeatureFlag>,
    dependencies: Vec<Rc<Project>>,
}

impl Project {
    pub fn new(name: &str, kind: ProjectKind) -> Self {
        Self {
            name: name.to_string(),
            uuid: Uuid::new_v4(),
            kind: kind,
            sources: Vec::new(),
            source_groups: Vec::new(),
            macros: Vec::new(),
            incpaths: Vec::new(),
            libpaths: Vec::new(),
            features: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn library(name: &str) -> Self {
        Self::new(name, ProjectKind::Library)
    }

    pub fn executable(name: &str) -> Self {
        Self::new(name, ProjectKind::Executable)
    }

    pub fn uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    pub fn source(mut self, path: &str) -> Self {
        self.sources.push(Source::new(path));
        self
    }

    pub fn add_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn source_group(mut self, group: SourceGroup) -> Self {
        self.source_groups.push(group);
        self
    }

    pub fn macro_def(mut self, m: Macro) -> Self {
        self.macros.push(m);
        self
    }

    pub fn incpath(mut self, p: IncPath) -> Self {
        self.incpaths.push(p);
        self
    }

    pub fn libpath(mut self, p: LibPath) -> Self {
        self.libpaths.push(p);
        self
    }

    pub fn feature(mut self, f: FeatureFlag) -> Self {
        self.features.push(f);
        self
    }

    pub fn dependency(mut self, dep: Rc<Project>) -> Self {
        self.dependencies.push(dep);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn get_kind(&self) -> ProjectKind {
        self.kind
    }

    pub fn is_library(&self) -> bool {
        self.kind == ProjectKind::Library
    }

    pub fn is_executable(&self) -> bool {
        self.kind == ProjectKind::Executable
    }

    pub fn get_macros(&self) -> &Vec<Macro> {
        &self.macros
    }

    pub fn get_incpaths(&self) -> &Vec<IncPath> {
        &self.incpaths
    }

    pub fn get_libpaths(&self) -> &Vec<LibPath> {
        &self.libpaths
    }

    pub fn get_features(&self) -> &Vec<FeatureFlag> {
        &self.features
    }

    pub fn get_dependencies(&self) -> &Vec<Rc<Project>> {
        &self.dependencies
    }

    /// Iterates the sources of every source group followed by the project's
    /// own sources.
    pub fn all_sources(&self) -> impl Iterator<Item = &Source> {
        self.source_groups
            .iter()
            .flat_map(|g| g.get_sources().iter())
            .chain(self.sources.iter())
    }

    /// Collects every direct and indirect dependency once, in the order they
    /// are first reached walking depth-first through the dependency lists.
    pub fn dependency_closure(&self) -> Vec<&Project> {
        let mut visited = HashSet::<&str>::new();
        let mut order = Vec::new();
        let mut stack: Vec<&Project> = self.dependencies.iter().rev().map(|d| d.as_ref()).collect();
        while let Some(dep) = stack.pop() {
            if visited.insert(dep.get_name()) == false {
                continue;
            }
            order.push(dep);
            stack.extend(dep.dependencies.iter().rev().map(|d| d.as_ref()));
        }
        order
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn source_tool_from_extension() {
        assert_eq!(Source::new("src/main.cpp").get_tool(), ".cpp");
        assert_eq!(Source::new("asm/start.S").get_tool(), ".S");
        assert_eq!(Source::new("Makefile").get_tool(), "");
        assert_eq!(Source::with_tool("gen/table", ".c").get_tool(), ".c");
    }

    #[test]
    fn macro_define() {
        assert_eq!(Macro::new("NDEBUG").define(), "NDEBUG");
        assert_eq!(Macro::with("VERSION", "3").define(), "VERSION=3");
    }

    #[test]
    fn scope_matching() {
        let any = IncPath::new("include");
        assert_eq!(any.matches("windows-x64-msbuild-vs14"), true);
        assert_eq!(any.is_published(), false);

        let msbuild_only = IncPath::new("include")
            .publish()
            .toolchain("windows-*-msbuild-*")
            .unwrap();
        assert_eq!(msbuild_only.is_published(), true);
        assert_eq!(msbuild_only.matches("windows-x64-msbuild-vs14"), true);
        assert_eq!(msbuild_only.matches("windows-x64-pam-vs14"), false);

        assert_eq!(FeatureFlag::new("optimize").toolchain("[").is_err(), true);
    }

    #[test]
    fn all_sources_puts_groups_first() {
        let p = Project::library("util")
            .source("util.cpp")
            .source_group(SourceGroup::new("extra").source("a.c").source("b.c"));
        assert_eq!(
            p.all_sources().map(|s| s.get_path()).collect::<Vec<&str>>(),
            vec!["a.c", "b.c", "util.cpp"]
        );
    }

    #[test]
    fn dependency_closure_visits_once() {
        let base = Rc::new(Project::library("base"));
        let util = Rc::new(Project::library("util").dependency(base.clone()));
        let net = Rc::new(Project::library("net").dependency(base.clone()));
        let app = Project::executable("app")
            .dependency(util.clone())
            .dependency(net.clone());
        assert_eq!(app.get_kind(), ProjectKind::Executable);
        assert_eq!(app.get_dependencies().len(), 2);
        assert_eq!(
            app.dependency_closure()
                .iter()
                .map(|p| p.get_name())
                .collect::<Vec<&str>>(),
            vec!["util", "base", "net"]
        );
        assert_eq!(base.dependency_closure().len(), 0);
    }
}

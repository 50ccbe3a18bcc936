//! Toolchain settings loaded from TOML.

use crate::core::requirement::HostRequirement;
use crate::error::{Error, LastError};
use crate::util::environment::Environment;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The kind of output a toolchain produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// A `.vcxproj` document built by an external orchestrator.
    #[default]
    Msbuild,
    /// A compile/archive/link job graph.
    Native,
}

/// The command-line convention of the native tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Msvc,
    Gnu,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ToolchainConfig {
    name: String,
    #[serde(default)]
    backend: Backend,
    #[serde(default = "ToolchainConfig::default_platform")]
    platform: String,
    #[serde(default = "ToolchainConfig::default_configuration")]
    configuration: String,
    toolset: Option<String>,
    charset: Option<String>,
    #[serde(default = "ToolchainConfig::default_subsystem")]
    subsystem: String,
    output: Option<String>,
    tools_version: Option<String>,
    orchestrator: Option<String>,
    #[serde(default)]
    requires: Vec<HostRequirement>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    #[serde(default)]
    globals: BTreeMap<String, String>,
    #[serde(default)]
    compile: BTreeMap<String, String>,
    #[serde(default)]
    dialect: Dialect,
    #[serde(default)]
    cflags: Vec<String>,
    #[serde(default)]
    cxxflags: Vec<String>,
    #[serde(default)]
    linkflags: Vec<String>,
}

impl ToolchainConfig {
    pub const DEFAULT_TOOLSET: &'static str = "v140";
    pub const DEFAULT_ORCHESTRATOR: &'static str = "MSBuild.exe";

    fn default_platform() -> String {
        String::from("x64")
    }

    fn default_configuration() -> String {
        String::from("Default")
    }

    fn default_subsystem() -> String {
        String::from("Console")
    }

    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            backend: Backend::default(),
            platform: Self::default_platform(),
            configuration: Self::default_configuration(),
            toolset: None,
            charset: None,
            subsystem: Self::default_subsystem(),
            output: None,
            tools_version: None,
            orchestrator: None,
            requires: Vec::new(),
            env: BTreeMap::new(),
            globals: BTreeMap::new(),
            compile: BTreeMap::new(),
            dialect: Dialect::default(),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            linkflags: Vec::new(),
        }
    }

    /// Renames the toolchain, keeping every other setting.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    pub fn configuration(mut self, configuration: &str) -> Self {
        self.configuration = configuration.to_string();
        self
    }

    pub fn toolset(mut self, toolset: &str) -> Self {
        self.toolset = Some(toolset.to_string());
        self
    }

    pub fn output(mut self, output: &str) -> Self {
        self.output = Some(output.to_string());
        self
    }

    pub fn orchestrator(mut self, program: &str) -> Self {
        self.orchestrator = Some(program.to_string());
        self
    }

    pub fn require(mut self, req: HostRequirement) -> Self {
        if self.requires.contains(&req) == false {
            self.requires.push(req);
        }
        self
    }

    pub fn env(mut self, env: &Environment) -> Self {
        self.env = env
            .iter()
            .map(|v| (v.get_key().to_string(), v.get_value().to_string()))
            .collect();
        self
    }

    pub fn global(mut self, name: &str, value: &str) -> Self {
        self.globals.insert(name.to_string(), value.to_string());
        self
    }

    pub fn compile_default(mut self, name: &str, value: &str) -> Self {
        self.compile.insert(name.to_string(), value.to_string());
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn cflag(mut self, flag: &str) -> Self {
        self.cflags.push(flag.to_string());
        self
    }

    pub fn cxxflag(mut self, flag: &str) -> Self {
        self.cxxflags.push(flag.to_string());
        self
    }

    pub fn linkflag(mut self, flag: &str) -> Self {
        self.linkflags.push(flag.to_string());
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_backend(&self) -> Backend {
        self.backend
    }

    pub fn get_platform(&self) -> &str {
        &self.platform
    }

    pub fn get_configuration(&self) -> &str {
        &self.configuration
    }

    pub fn get_toolset(&self) -> &str {
        self.toolset.as_deref().unwrap_or(Self::DEFAULT_TOOLSET)
    }

    pub fn get_charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn get_subsystem(&self) -> &str {
        &self.subsystem
    }

    /// Returns the output root, `output/<name>` unless configured.
    pub fn get_output(&self) -> String {
        match &self.output {
            Some(o) => o.clone(),
            None => format!("output/{}", self.name),
        }
    }

    pub fn get_tools_version(&self) -> Option<&str> {
        self.tools_version.as_deref()
    }

    pub fn get_orchestrator(&self) -> &str {
        self.orchestrator
            .as_deref()
            .unwrap_or(Self::DEFAULT_ORCHESTRATOR)
    }

    pub fn get_requirements(&self) -> &Vec<HostRequirement> {
        &self.requires
    }

    pub fn get_env(&self) -> Environment {
        self.env.iter().collect()
    }

    pub fn get_globals(&self) -> &BTreeMap<String, String> {
        &self.globals
    }

    pub fn get_compile_defaults(&self) -> &BTreeMap<String, String> {
        &self.compile
    }

    pub fn get_dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn get_cflags(&self) -> &Vec<String> {
        &self.cflags
    }

    pub fn get_cxxflags(&self) -> &Vec<String> {
        &self.cxxflags
    }

    pub fn get_linkflags(&self) -> &Vec<String> {
        &self.linkflags
    }
}

impl FromStr for ToolchainConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| Error::ToolchainConfig(LastError(e.to_string())))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MSBUILD: &str = r#"
name = "windows-x64-msbuild-vs14"
platform = "x64"
toolset = "v140"
tools-version = "14.0"
requires = ["windows"]

[env]
VisualStudioVersion = "14.0"

[globals]
Keyword = "Win32Proj"

[compile]
WarningLevel = "Level3"
"#;

    const NATIVE: &str = r#"
name = "linux-x64-clang"
backend = "native"
dialect = "gnu"
output = "build"
cxxflags = ["-std=c++14"]
"#;

    #[test]
    fn from_str_msbuild() {
        let cfg = ToolchainConfig::from_str(MSBUILD).unwrap();
        assert_eq!(cfg.get_name(), "windows-x64-msbuild-vs14");
        assert_eq!(cfg.get_backend(), Backend::Msbuild);
        assert_eq!(cfg.get_configuration(), "Default");
        assert_eq!(cfg.get_subsystem(), "Console");
        assert_eq!(cfg.get_tools_version(), Some("14.0"));
        assert_eq!(cfg.get_orchestrator(), "MSBuild.exe");
        assert_eq!(cfg.get_output(), "output/windows-x64-msbuild-vs14");
        assert_eq!(cfg.get_requirements(), &vec![HostRequirement::Windows]);
        assert_eq!(cfg.get_env().get("VisualStudioVersion"), Some("14.0"));
        assert_eq!(cfg.get_globals().get("Keyword").unwrap(), "Win32Proj");
        assert_eq!(cfg.get_compile_defaults().len(), 1);
    }

    #[test]
    fn from_str_native() {
        let cfg = ToolchainConfig::from_str(NATIVE).unwrap();
        assert_eq!(cfg.get_backend(), Backend::Native);
        assert_eq!(cfg.get_dialect(), Dialect::Gnu);
        assert_eq!(cfg.get_output(), "build");
        assert_eq!(cfg.get_cxxflags(), &vec![String::from("-std=c++14")]);
        assert_eq!(cfg.get_cflags().len(), 0);
        assert_eq!(cfg.get_toolset(), "v140");
    }

    #[test]
    fn from_str_rejects_unknown_keys() {
        let result = ToolchainConfig::from_str("name = \"x\"\ncolour = \"red\"\n");
        assert!(matches!(result, Err(Error::ToolchainConfig(_))));
        let result = ToolchainConfig::from_str("name = \"x\"\nbackend = \"make\"\n");
        assert!(matches!(result, Err(Error::ToolchainConfig(_))));
    }

    #[test]
    fn builder_matches_parsed() {
        let env: Environment = vec![("VisualStudioVersion", "14.0")].into_iter().collect();
        let built = ToolchainConfig::new("windows-x64-msbuild-vs14")
            .platform("x64")
            .toolset("v140")
            .require(HostRequirement::Windows)
            .require(HostRequirement::Windows)
            .env(&env)
            .global("Keyword", "Win32Proj")
            .compile_default("WarningLevel", "Level3");
        let mut parsed = ToolchainConfig::from_str(MSBUILD).unwrap();
        parsed.tools_version = None;
        assert_eq!(built, parsed);
    }
}

use super::features::MsBuildFeature;
use super::project::CxxProject;
use super::tools::{MsBuildCompiler, MsBuildTool};
use crate::core::config::ToolchainConfig;
use crate::core::model::{Project, Scoped};
use crate::core::registry::{FeatureRegistry, ToolRegistry};
use crate::core::requirement::HostRequirement;
use crate::core::schema::set_by_name;
use crate::error::{Error, Result};
use crate::util::environment::VISUAL_STUDIO_VERSION;
use crate::util::filesystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tools version used when neither the configuration nor the environment
/// names one.
pub const FALLBACK_TOOLS_VERSION: &str = "12.0";

/// Renders projects into `.vcxproj` files and builds them with MSBuild.
#[derive(Clone)]
pub struct MsBuildToolchain {
    config: ToolchainConfig,
    tools: ToolRegistry<dyn MsBuildTool>,
    features: FeatureRegistry<dyn MsBuildFeature>,
}

impl MsBuildToolchain {
    /// Creates a toolchain without tools or features.
    ///
    /// The configured globals and compiler defaults are validated against
    /// the element schema here, before any project is assembled.
    pub fn new(config: ToolchainConfig) -> Result<Self> {
        let tc = Self {
            config: config,
            tools: ToolRegistry::new(),
            features: FeatureRegistry::new(),
        };
        tc.apply_defaults(&mut tc.skeleton()?)?;
        Ok(tc)
    }

    /// Registers the C and C++ compilers for their usual extensions.
    pub fn with_cxx_tools(mut self) -> Self {
        let c: Arc<dyn MsBuildTool> = Arc::new(MsBuildCompiler::c());
        let cxx: Arc<dyn MsBuildTool> = Arc::new(MsBuildCompiler::cxx());
        self.tools.add(".c", c);
        for ext in [".cc", ".cpp", ".cxx"] {
            self.tools.add(ext, cxx.clone());
        }
        self
    }

    pub fn add_tool(&mut self, extension: &str, tool: Arc<dyn MsBuildTool>) {
        self.tools.add(extension, tool);
    }

    pub fn add_feature(&mut self, name: &str, feature: Arc<dyn MsBuildFeature>) {
        self.features.add(name, feature);
    }

    /// Registers a feature applied to every project.
    pub fn add_default_feature(&mut self, feature: Arc<dyn MsBuildFeature>) {
        self.features.add_default(feature);
    }

    pub fn get_name(&self) -> &str {
        self.config.get_name()
    }

    pub fn get_config(&self) -> &ToolchainConfig {
        &self.config
    }

    pub fn get_requirements(&self) -> &Vec<HostRequirement> {
        self.config.get_requirements()
    }

    /// Returns the configured tools version, else the Visual Studio version
    /// of the toolchain environment.
    pub fn tools_version(&self) -> String {
        match self.config.get_tools_version() {
            Some(v) => v.to_string(),
            None => self
                .config
                .get_env()
                .get(VISUAL_STUDIO_VERSION)
                .unwrap_or(FALLBACK_TOOLS_VERSION)
                .to_string(),
        }
    }

    /// Returns the expected archive of the library named `lib`.
    pub fn library_path(&self, lib: &str) -> String {
        format!("{}/{}/{}.lib", self.config.get_output(), lib, lib)
    }

    fn skeleton(&self) -> Result<CxxProject> {
        CxxProject::new(
            &self.tools_version(),
            self.config.get_configuration(),
            self.config.get_platform(),
        )
    }

    fn apply_defaults(&self, cxx: &mut CxxProject) -> Result<()> {
        let globals = cxx.globals();
        for (name, value) in self.config.get_globals() {
            set_by_name(cxx.doc_mut(), &globals, name, Some(value))?;
        }
        let cl = cxx.clcompile();
        for (name, value) in self.config.get_compile_defaults() {
            set_by_name(cxx.doc_mut(), &cl, name, Some(value))?;
        }
        Ok(())
    }

    /// Builds the project document for `project` without touching the file system.
    pub fn assemble(&self, project: &Project) -> Result<CxxProject> {
        let name = self.get_name();
        let mut cxx = self.skeleton()?;
        self.apply_defaults(&mut cxx)?;

        let globals = cxx.globals();
        let doc = cxx.doc_mut();
        globals.set_project_name(doc, Some(project.get_name()))?;
        globals.set_project_guid(doc, Some(&format!("{{{}}}", project.get_uuid())))?;
        globals.set_platform(doc, Some(self.config.get_platform()))?;

        let mut macros: Vec<String> = project
            .get_macros()
            .iter()
            .filter(|m| m.matches(name))
            .map(|m| m.define())
            .collect();
        let mut incpaths: Vec<&str> = project
            .get_incpaths()
            .iter()
            .filter(|p| p.matches(name))
            .map(|p| p.get_path())
            .collect();
        let mut libpaths: Vec<&str> = project
            .get_libpaths()
            .iter()
            .filter(|p| p.matches(name))
            .map(|p| p.get_path())
            .collect();

        let (config_props, lib, link) = (cxx.config_props(), cxx.lib(), cxx.link());
        if project.is_library() == true {
            config_props.set_configuration_type(cxx.doc_mut(), Some("StaticLibrary"))?;
            lib.set_sub_system(cxx.doc_mut(), Some(self.config.get_subsystem()))?;
        } else {
            config_props.set_configuration_type(cxx.doc_mut(), Some("Application"))?;
            let deps = project.dependency_closure();
            for dep in &deps {
                macros.extend(
                    dep.get_macros()
                        .iter()
                        .filter(|m| m.is_published() && m.matches(name))
                        .map(|m| m.define()),
                );
                incpaths.extend(
                    dep.get_incpaths()
                        .iter()
                        .filter(|p| p.is_published() && p.matches(name))
                        .map(|p| p.get_path()),
                );
                libpaths.extend(
                    dep.get_libpaths()
                        .iter()
                        .filter(|p| p.is_published() && p.matches(name))
                        .map(|p| p.get_path()),
                );
            }
            let libraries: Vec<String> = deps
                .iter()
                .filter(|d| d.is_library())
                .map(|d| self.library_path(d.get_name()))
                .collect();
            link.set_additional_dependencies(cxx.doc_mut(), Some(&libraries.join(";")))?;
            link.set_additional_library_directories(cxx.doc_mut(), Some(&libpaths.join(";")))?;
            link.set_sub_system(cxx.doc_mut(), Some(self.config.get_subsystem()))?;
        }

        let cl = cxx.clcompile();
        cl.set_additional_include_directories(cxx.doc_mut(), Some(&incpaths.join(";")))?;
        cl.set_preprocessor_definitions(cxx.doc_mut(), Some(&macros.join(";")))?;
        cl.set_tracker_log_directory(cxx.doc_mut(), Some("$(IntDir)"))?;

        config_props.set_platform_toolset(cxx.doc_mut(), Some(self.config.get_toolset()))?;
        config_props.set_character_set(cxx.doc_mut(), self.config.get_charset())?;

        let props = cxx.properties();
        let dir = format!("{}/{}/", self.config.get_output(), project.get_name());
        props.set_int_dir(cxx.doc_mut(), Some(&dir))?;
        props.set_out_dir(cxx.doc_mut(), Some(&dir))?;
        props.set_target_path(cxx.doc_mut(), Some("$(OutDir)$(TargetName)$(TargetExt)"))?;

        for source in project.all_sources() {
            tracing::debug!("Dispatching {} to the {} tool", source.get_path(), source.get_tool());
            self.tools
                .find(source.get_tool())?
                .transform(&mut cxx, source)?;
        }

        for feature in self.features.defaults() {
            feature.transform(project, &mut cxx)?;
        }
        for flag in project.get_features().iter().filter(|f| f.matches(name)) {
            tracing::debug!("Applying feature {} to {}", flag.get_name(), project.get_name());
            self.features
                .find(flag.get_name())?
                .transform(project, &mut cxx)?;
        }
        Ok(cxx)
    }

    /// Writes `<work_dir>/<project>.vcxproj` and builds it with the orchestrator.
    ///
    /// Returns the path of the written project file. The file is left in place
    /// when the build fails.
    pub fn transform(&self, project: &Project, work_dir: &Path) -> Result<PathBuf> {
        let cxx = self.assemble(project)?;
        let file_name = format!("{}.vcxproj", project.get_name());
        let path = work_dir.join(&file_name);
        cxx.write(&path)?;
        tracing::info!("Wrote {}", path.display());

        let args = vec![
            file_name,
            String::from("/m"),
            String::from("/nologo"),
            format!("/p:Configuration={}", self.config.get_configuration()),
            format!("/p:Platform={}", self.config.get_platform()),
        ];
        let orchestrator = self.config.get_orchestrator();
        tracing::info!("Running {} {}", orchestrator, args.join(" "));
        let code = filesystem::execute(orchestrator, &args, work_dir, &self.config.get_env())?;
        match code {
            0 => Ok(path),
            _ => Err(Error::BuildFailed(project.get_name().to_string(), code)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::model::{FeatureFlag, IncPath, LibPath, Macro, Source, SourceGroup};
    use crate::msbuild::features::{Optimize, Reject};
    use crate::util::environment::Environment;
    use std::rc::Rc;

    const NAME: &str = "windows-x64-msbuild-vs14";

    fn toolchain() -> MsBuildToolchain {
        let env: Environment = vec![(VISUAL_STUDIO_VERSION, "14.0")].into_iter().collect();
        let mut tc = MsBuildToolchain::new(ToolchainConfig::new(NAME).env(&env))
            .unwrap()
            .with_cxx_tools();
        tc.add_feature("optimize", Arc::new(Optimize));
        tc.add_feature(
            "language-c++17",
            Arc::new(Reject::new("language-c++17", "c++17 is not supported by vs14")),
        );
        tc
    }

    #[test]
    fn demo_project() {
        let tc = toolchain();
        let project = Project::executable("demo").source("main.cpp");
        let cxx = tc.assemble(&project).unwrap();
        assert_eq!(
            cxx.condition(),
            "'$(Configuration)|$(Platform)' == 'Default|x64'"
        );
        assert_eq!(cxx.compile_items(), vec!["main.cpp"]);
        assert_eq!(cxx.root().tools_version(cxx.doc()), "14.0");
        assert_eq!(cxx.globals().project_name(cxx.doc()), "demo");
        assert_eq!(
            cxx.globals().project_guid(cxx.doc()),
            format!("{{{}}}", project.get_uuid())
        );
        assert_eq!(cxx.config_props().configuration_type(cxx.doc()), "Application");
        assert_eq!(cxx.config_props().platform_toolset(cxx.doc()), "v140");
        assert_eq!(cxx.link().sub_system(cxx.doc()), "Console");
        assert_eq!(cxx.clcompile().tracker_log_directory(cxx.doc()), "$(IntDir)");
        assert_eq!(
            cxx.properties().int_dir(cxx.doc()),
            "output/windows-x64-msbuild-vs14/demo/"
        );
        // no dependencies leaves the link lists out entirely
        assert_eq!(cxx.link().additional_dependencies(cxx.doc()), "");
        assert_eq!(cxx.serialize().contains("AdditionalDependencies"), false);
    }

    #[test]
    fn executable_links_published_library() {
        let tc = toolchain();
        let util = Rc::new(
            Project::library("util")
                .source("util.cpp")
                .incpath(IncPath::new("./util/include").publish())
                .incpath(IncPath::new("./util/src"))
                .macro_def(Macro::with("UTIL_API", "1").publish())
                .libpath(LibPath::new("./util/vendor").publish()),
        );
        let app = Project::executable("app")
            .source("main.cpp")
            .incpath(IncPath::new("./app/include"))
            .dependency(util);
        let cxx = tc.assemble(&app).unwrap();
        let doc = cxx.doc();
        assert_eq!(
            cxx.clcompile().additional_include_directories(doc),
            "./app/include;./util/include"
        );
        assert_eq!(cxx.clcompile().preprocessor_definitions(doc), "UTIL_API=1");
        assert_eq!(
            cxx.link().additional_dependencies(doc),
            "output/windows-x64-msbuild-vs14/util/util.lib"
        );
        assert_eq!(cxx.link().additional_library_directories(doc), "./util/vendor");
    }

    #[test]
    fn transitive_libraries_are_linked_once() {
        let tc = toolchain();
        let base = Rc::new(Project::library("base").incpath(IncPath::new("base/inc").publish()));
        let util = Rc::new(Project::library("util").dependency(base.clone()));
        let net = Rc::new(Project::library("net").dependency(base.clone()));
        let app = Project::executable("app").dependency(util).dependency(net);
        let cxx = tc.assemble(&app).unwrap();
        assert_eq!(
            cxx.link().additional_dependencies(cxx.doc()),
            [
                "output/windows-x64-msbuild-vs14/util/util.lib",
                "output/windows-x64-msbuild-vs14/base/base.lib",
                "output/windows-x64-msbuild-vs14/net/net.lib",
            ]
            .join(";")
        );
        assert_eq!(
            cxx.clcompile().additional_include_directories(cxx.doc()),
            "base/inc"
        );
    }

    #[test]
    fn library_configures_archiver() {
        let tc = toolchain();
        let lib = Project::library("util")
            .source_group(SourceGroup::new("core").source("a.c"))
            .source("b.cpp")
            .macro_def(Macro::new("NDEBUG"));
        let cxx = tc.assemble(&lib).unwrap();
        assert_eq!(cxx.config_props().configuration_type(cxx.doc()), "StaticLibrary");
        assert_eq!(cxx.lib().sub_system(cxx.doc()), "Console");
        assert_eq!(cxx.link().sub_system(cxx.doc()), "");
        assert_eq!(cxx.compile_items(), vec!["a.c", "b.cpp"]);
        assert_eq!(cxx.clcompile().preprocessor_definitions(cxx.doc()), "NDEBUG");
    }

    #[test]
    fn scoped_settings_follow_toolchain_name() {
        let tc = toolchain();
        let p = Project::executable("demo")
            .incpath(IncPath::new("msbuild/inc").toolchain("windows-*-msbuild-*").unwrap())
            .incpath(IncPath::new("clang/inc").toolchain("*-clang-*").unwrap())
            .feature(FeatureFlag::new("optimize").toolchain("linux-*").unwrap());
        let cxx = tc.assemble(&p).unwrap();
        assert_eq!(
            cxx.clcompile().additional_include_directories(cxx.doc()),
            "msbuild/inc"
        );
        assert_eq!(cxx.clcompile().optimization(cxx.doc()), "");
    }

    #[test]
    fn features_are_applied_or_rejected() {
        let tc = toolchain();
        let p = Project::executable("demo").feature(FeatureFlag::new("optimize"));
        let cxx = tc.assemble(&p).unwrap();
        assert_eq!(cxx.clcompile().optimization(cxx.doc()), "MaxSpeed");

        let p = Project::executable("demo").feature(FeatureFlag::new("language-c++17"));
        assert!(matches!(
            tc.assemble(&p),
            Err(Error::UnsupportedFeature(..))
        ));
        let p = Project::executable("demo").feature(FeatureFlag::new("lto"));
        assert!(matches!(tc.assemble(&p), Err(Error::UnknownFeature(..))));
    }

    #[test]
    fn unknown_extension_aborts() {
        let tc = toolchain();
        let p = Project::executable("demo")
            .source("main.cpp")
            .add_source(Source::new("boot.S"));
        match tc.assemble(&p) {
            Err(Error::NoToolForExtension(ext, _)) => assert_eq!(ext, ".S"),
            _ => panic!("expected a missing tool"),
        }
    }

    #[test]
    fn configured_defaults_are_validated() {
        let cfg = ToolchainConfig::new(NAME).compile_default("WarningLevel", "Level3");
        let tc = MsBuildToolchain::new(cfg).unwrap().with_cxx_tools();
        let cxx = tc.assemble(&Project::library("util")).unwrap();
        assert_eq!(cxx.clcompile().warning_level(cxx.doc()), "Level3");

        let cfg = ToolchainConfig::new(NAME).compile_default("WarningLevel", "Level9");
        assert!(matches!(
            MsBuildToolchain::new(cfg),
            Err(Error::InvalidValue { .. })
        ));
        let cfg = ToolchainConfig::new(NAME).global("Colour", "red");
        assert!(matches!(
            MsBuildToolchain::new(cfg),
            Err(Error::UnknownField { .. })
        ));
    }

    #[test]
    fn tools_version_fallbacks() {
        let tc = MsBuildToolchain::new(ToolchainConfig::new(NAME)).unwrap();
        assert_eq!(tc.tools_version(), FALLBACK_TOOLS_VERSION);
        assert_eq!(toolchain().tools_version(), "14.0");
    }

    #[cfg(unix)]
    #[test]
    fn transform_writes_and_builds() {
        let dir = tempfile::tempdir().unwrap();
        let p = Project::executable("demo").source("main.cpp");

        let cfg = ToolchainConfig::new(NAME).orchestrator("true");
        let tc = MsBuildToolchain::new(cfg).unwrap().with_cxx_tools();
        let path = tc.transform(&p, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("demo.vcxproj"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            tc.assemble(&p).unwrap().serialize()
        );

        let cfg = ToolchainConfig::new(NAME).orchestrator("false");
        let tc = MsBuildToolchain::new(cfg).unwrap().with_cxx_tools();
        assert_eq!(
            tc.transform(&p, dir.path()),
            Err(Error::BuildFailed(String::from("demo"), 1))
        );
        // the document is kept for inspection
        assert_eq!(path.exists(), true);
    }
}

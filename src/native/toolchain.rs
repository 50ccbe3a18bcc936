use super::features::{NativeFeature, Optimize};
use super::project::NativeProject;
use super::tools::{Archiver, Compiler, DirectoryCreator, Linker, NativeTool};
use crate::core::config::ToolchainConfig;
use crate::core::job::JobGraph;
use crate::core::model::{Project, Scoped};
use crate::core::registry::{FeatureRegistry, ToolRegistry};
use crate::core::requirement::HostRequirement;
use crate::error::{Error, Result};
use crate::util::environment::Environment;
use std::sync::Arc;

/// Turns projects into compile, archive and link jobs for an external runner.
#[derive(Clone)]
pub struct NativeToolchain {
    config: ToolchainConfig,
    tools: ToolRegistry<dyn NativeTool>,
    features: FeatureRegistry<dyn NativeFeature>,
    archiver: Option<Arc<Archiver>>,
    linker: Option<Arc<Linker>>,
}

impl NativeToolchain {
    /// Creates a toolchain without tools or features.
    pub fn new(config: ToolchainConfig) -> Self {
        Self {
            config: config,
            tools: ToolRegistry::new(),
            features: FeatureRegistry::new(),
            archiver: None,
            linker: None,
        }
    }

    /// Creates a complete toolchain whose tools all follow the configured
    /// dialect and run with the configured environment.
    pub fn from_config(config: ToolchainConfig) -> Self {
        let dialect = config.get_dialect();
        let env = environment(&config);
        let mut tc = Self::new(config)
            .with_compilers(
                Compiler::c(dialect).env(env.clone()),
                Compiler::cxx(dialect).env(env.clone()),
            )
            .archiver(Archiver::new(dialect).env(env.clone()))
            .linker(Linker::new(dialect).env(env));
        tc.add_feature("optimize", Arc::new(Optimize::new(dialect)));
        tc
    }

    /// Registers `c` for `.S` and `.c` sources and `cxx` for C++ sources.
    pub fn with_compilers(mut self, c: Compiler, cxx: Compiler) -> Self {
        let c: Arc<dyn NativeTool> = Arc::new(c);
        let cxx: Arc<dyn NativeTool> = Arc::new(cxx);
        for ext in [".S", ".c"] {
            self.tools.add(ext, c.clone());
        }
        for ext in [".cc", ".cpp", ".cxx"] {
            self.tools.add(ext, cxx.clone());
        }
        self
    }

    pub fn archiver(mut self, archiver: Archiver) -> Self {
        self.archiver = Some(Arc::new(archiver));
        self
    }

    pub fn linker(mut self, linker: Linker) -> Self {
        self.linker = Some(Arc::new(linker));
        self
    }

    /// Derives a toolchain named `name` that starts with this toolchain's
    /// tools, features and settings.
    pub fn extend(&self, name: &str) -> Self {
        let mut tc = self.clone();
        tc.config = tc.config.name(name);
        tc
    }

    pub fn add_tool(&mut self, extension: &str, tool: Arc<dyn NativeTool>) {
        self.tools.add(extension, tool);
    }

    pub fn add_feature(&mut self, name: &str, feature: Arc<dyn NativeFeature>) {
        self.features.add(name, feature);
    }

    /// Registers a feature applied to every project.
    pub fn add_default_feature(&mut self, feature: Arc<dyn NativeFeature>) {
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

    fn get_archiver(&self) -> Result<&Archiver> {
        match &self.archiver {
            Some(a) => Ok(a),
            None => Err(Error::MissingTool(
                self.get_name().to_string(),
                String::from("archiver"),
            )),
        }
    }

    fn get_linker(&self) -> Result<&Linker> {
        match &self.linker {
            Some(l) => Ok(l),
            None => Err(Error::MissingTool(
                self.get_name().to_string(),
                String::from("linker"),
            )),
        }
    }

    fn directories(&self) -> DirectoryCreator {
        DirectoryCreator::new(self.config.get_dialect()).env(environment(&self.config))
    }

    /// Collects the settings `project` compiles and links with.
    fn prepare(&self, project: &Project) -> Result<NativeProject> {
        let name = self.get_name();
        let root = self.config.get_output();
        let mut native = NativeProject::new(project.get_name(), &root, self.directories());

        for m in project.get_macros().iter().filter(|m| m.matches(name)) {
            native.add_define(m.define());
        }
        for p in project.get_incpaths().iter().filter(|p| p.matches(name)) {
            native.add_incpath(p.get_path());
        }
        for p in project.get_libpaths().iter().filter(|p| p.matches(name)) {
            native.add_libpath(p.get_path());
        }
        if project.is_executable() == true {
            for dep in project.dependency_closure() {
                for m in dep.get_macros().iter().filter(|m| m.is_published() && m.matches(name)) {
                    native.add_define(m.define());
                }
                for p in dep.get_incpaths().iter().filter(|p| p.is_published() && p.matches(name)) {
                    native.add_incpath(p.get_path());
                }
                for p in dep.get_libpaths().iter().filter(|p| p.is_published() && p.matches(name)) {
                    native.add_libpath(p.get_path());
                }
                if dep.is_library() == true {
                    native.add_library(self.get_archiver()?.library_path(&root, dep.get_name()));
                }
            }
        }

        self.config.get_cflags().iter().for_each(|f| native.add_cflag(f));
        self.config.get_cxxflags().iter().for_each(|f| native.add_cxxflag(f));
        self.config.get_linkflags().iter().for_each(|f| native.add_linkflag(f));

        for feature in self.features.defaults() {
            feature.transform(project, &mut native)?;
        }
        for flag in project.get_features().iter().filter(|f| f.matches(name)) {
            tracing::debug!("Applying feature {} to {}", flag.get_name(), project.get_name());
            self.features
                .find(flag.get_name())?
                .transform(project, &mut native)?;
        }
        Ok(native)
    }

    /// Adds the jobs building `project` to `graph` and returns the product
    /// of its archive or link job.
    ///
    /// Archives the project links against may be assembled into the same
    /// graph afterwards.
    pub fn assemble(&self, project: &Project, graph: &mut JobGraph) -> Result<String> {
        let native = self.prepare(project)?;
        let mut objects = Vec::new();
        for source in project.all_sources() {
            tracing::debug!("Dispatching {} to the {} tool", source.get_path(), source.get_tool());
            let tool = self.tools.find(source.get_tool())?;
            objects.push(tool.transform(&native, graph, source)?);
        }
        match project.is_library() {
            true => self.get_archiver()?.transform(&native, graph, &objects),
            false => self.get_linker()?.transform(&native, graph, &objects),
        }
    }

    /// Builds the validated job graph for `project` and every project it
    /// depends on.
    pub fn transform(&self, project: &Project) -> Result<JobGraph> {
        let mut graph = JobGraph::new();
        let product = self.assemble(project, &mut graph)?;
        for dep in project.dependency_closure() {
            self.assemble(dep, &mut graph)?;
        }
        let jobs = graph.schedule()?.len();
        tracing::info!("Assembled {} jobs for {}", jobs, product);
        Ok(graph)
    }
}

/// The environment a toolchain's tools run with, if any is configured.
fn environment(config: &ToolchainConfig) -> Option<Environment> {
    let env = config.get_env();
    match env.is_empty() {
        true => None,
        false => Some(env),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::config::Dialect;
    use crate::core::model::{FeatureFlag, IncPath, Macro};
    use crate::native::features::Reject;
    use std::rc::Rc;

    fn msvc() -> NativeToolchain {
        let mut tc = NativeToolchain::from_config(ToolchainConfig::new("windows-x64-vs14").output("out"));
        tc.add_feature(
            "language-c++17",
            Arc::new(Reject::new("language-c++17", "c++17 is not supported by vs14")),
        );
        tc
    }

    fn gnu() -> NativeToolchain {
        NativeToolchain::from_config(
            ToolchainConfig::new("linux-x64-clang")
                .output("out")
                .dialect(Dialect::Gnu)
                .cflag("-std=c99")
                .cxxflag("-std=c++14")
                .linkflag("-lm"),
        )
    }

    #[test]
    fn library_archives_its_objects() {
        let tc = msvc();
        let lib = Project::library("util").source("a.cpp").source("b.cpp");
        let mut g = JobGraph::new();
        let product = tc.assemble(&lib, &mut g).unwrap();
        assert_eq!(product, "out/util/util.lib");

        let prereqs = g.prerequisites(&product);
        assert_eq!(prereqs.len(), 3);
        let compiles = prereqs
            .iter()
            .filter_map(|p| g.get(p))
            .filter(|j| j.get_info().unwrap_or_default().starts_with(" [CL.EXE]"))
            .count();
        assert_eq!(compiles, 2);
        assert_eq!(prereqs.contains(&"out/util"), true);
        assert_eq!(g.schedule().is_ok(), true);
    }

    #[test]
    fn executable_waits_for_libraries() {
        let tc = gnu();
        let util = Rc::new(
            Project::library("util")
                .source("util.cpp")
                .incpath(IncPath::new("util/include").publish())
                .macro_def(Macro::with("UTIL_API", "1").publish()),
        );
        let app = Project::executable("app").source("main.cpp").dependency(util);
        let g = tc.transform(&app).unwrap();

        let link = g.get("out/app/app").unwrap();
        assert_eq!(
            link.get_command(),
            Some("clang out/app/app.dir/main.cpp.o out/util/libutil.a -lm -o out/app/app")
        );
        assert_eq!(
            g.get("out/app/app.dir/main.cpp.o").unwrap().get_command(),
            Some("clang -std=c++14 -DUTIL_API=1 -Iutil/include -c -x c++ main.cpp -o out/app/app.dir/main.cpp.o")
        );
        let order: Vec<&str> = g.schedule().unwrap().iter().map(|j| j.get_product()).collect();
        let at = |p: &str| order.iter().position(|o| *o == p).unwrap();
        assert_eq!(at("out/util/libutil.a") < at("out/app/app"), true);
        assert_eq!(at("out/app/app.dir/main.cpp.o") < at("out/app/app"), true);
    }

    #[test]
    fn projects_share_one_graph() {
        let tc = msvc();
        let util = Rc::new(Project::library("util").source("util.cpp"));
        let app = Project::executable("app").source("main.cpp").dependency(util.clone());
        let mut g = JobGraph::new();
        tc.assemble(&app, &mut g).unwrap();
        assert!(matches!(
            g.schedule(),
            Err(Error::MissingPrerequisite { .. })
        ));
        tc.assemble(&util, &mut g).unwrap();
        assert_eq!(g.schedule().is_ok(), true);
        // sources, objects, product and object directories, the archive
        // and the executable
        assert_eq!(g.len(), 10);
        // the shared output root is only created once
        assert_eq!(g.get("out").is_none(), true);
    }

    /// Assembles projects whose source directories are named after projects
    /// and checks that every product keeps a path of its own.
    fn assert_products_are_distinct(tc: &NativeToolchain, exe: &str, lib: &str, obj: &str) {
        let util = Rc::new(
            Project::library("util")
                .source("util/util.cpp")
                .source("app/util.c"),
        );
        let app = Project::executable("app")
            .source("app/main.cpp")
            .source("util/util.cpp")
            .dependency(util);
        let g = tc.transform(&app).unwrap();
        let jobs = g.schedule().unwrap();

        let dirs: Vec<&str> = jobs
            .iter()
            .filter(|j| j.get_command().unwrap_or_default().starts_with("mkdir"))
            .map(|j| j.get_product())
            .collect();
        let objects: Vec<&str> = jobs
            .iter()
            .map(|j| j.get_product())
            .filter(|p| p.ends_with(obj))
            .collect();
        assert_eq!(objects.len(), 4);
        for product in objects.iter().chain([&exe, &lib]) {
            assert_eq!(dirs.contains(product), false);
            let command = g.get(*product).unwrap().get_command().unwrap_or_default();
            assert_eq!(command.contains(*product), true);
        }
        // each project compiles into its own object directory
        for o in g.prerequisites(exe).into_iter().filter(|p| p.ends_with(obj)) {
            assert_eq!(o.starts_with("out/app/app.dir/"), true);
        }
        for o in g.prerequisites(lib).into_iter().filter(|p| p.ends_with(obj)) {
            assert_eq!(o.starts_with("out/util/util.dir/"), true);
        }
        let mkdir = g.get("out/app/app.dir/app").unwrap().get_command();
        assert_eq!(mkdir.unwrap_or_default().starts_with("mkdir"), true);
        // util/util.cpp is compiled by both projects but exists once
        assert_eq!(g.get("util/util.cpp").unwrap().is_marker(), true);
    }

    #[test]
    fn gnu_products_never_collide() {
        assert_products_are_distinct(&gnu(), "out/app/app", "out/util/libutil.a", ".o");
    }

    #[test]
    fn msvc_products_never_collide() {
        assert_products_are_distinct(&msvc(), "out/app/app.exe", "out/util/util.lib", ".obj");
    }

    #[test]
    fn source_directory_named_after_project() {
        let g = gnu()
            .transform(&Project::executable("demo").source("demo/main.cpp"))
            .unwrap();
        assert_eq!(
            g.get("out/demo/demo").unwrap().get_command(),
            Some("clang out/demo/demo.dir/demo/main.cpp.o -lm -o out/demo/demo")
        );
        assert_eq!(
            g.prerequisites("out/demo/demo.dir/demo/main.cpp.o"),
            vec!["demo/main.cpp", "out/demo/demo.dir/demo"]
        );
        assert_eq!(g.schedule().is_ok(), true);
    }

    #[test]
    fn features_adjust_command_lines() {
        let tc = msvc();
        let p = Project::executable("demo")
            .source("main.c")
            .feature(FeatureFlag::new("optimize"));
        let mut g = JobGraph::new();
        tc.assemble(&p, &mut g).unwrap();
        assert_eq!(
            g.get("out/demo/demo.dir/main.c.obj").unwrap().get_command(),
            Some("cl.exe /nologo /O2 /c /Tcmain.c /Foout/demo/demo.dir/main.c.obj")
        );

        let p = Project::executable("demo").feature(FeatureFlag::new("language-c++17"));
        assert!(matches!(
            tc.assemble(&p, &mut JobGraph::new()),
            Err(Error::UnsupportedFeature(..))
        ));
    }

    #[test]
    fn extended_toolchain_needs_archiver() {
        let base = NativeToolchain::new(ToolchainConfig::new("pam-vs14"))
            .with_compilers(Compiler::c(Dialect::Msvc), Compiler::cxx(Dialect::Msvc));
        let lib = Project::library("util").source("util.cpp");
        assert_eq!(
            base.assemble(&lib, &mut JobGraph::new()).err(),
            Some(Error::MissingTool(
                String::from("pam-vs14"),
                String::from("archiver")
            ))
        );
        let x64 = base.extend("pam-x64-vs14").archiver(Archiver::new(Dialect::Msvc));
        assert_eq!(x64.get_name(), "pam-x64-vs14");
        assert_eq!(
            x64.assemble(&lib, &mut JobGraph::new()).unwrap(),
            "output/pam-x64-vs14/util/util.lib"
        );
        // the base is left untouched
        assert_eq!(base.get_name(), "pam-vs14");
    }

    #[test]
    fn unknown_extension_aborts() {
        let p = Project::executable("demo").source("boot.asm");
        assert!(matches!(
            gnu().transform(&p),
            Err(Error::NoToolForExtension(..))
        ));
    }
}

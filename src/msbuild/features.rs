use super::project::CxxProject;
use crate::core::model::Project;
use crate::core::schema::set_by_name;
use crate::error::Result;

pub use crate::core::registry::{Builtin, Reject};

/// A named adjustment applied to an assembled project document.
pub trait MsBuildFeature {
    fn transform(&self, project: &Project, cxx: &mut CxxProject) -> Result<()>;
}

/// Compiles for speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimize;

impl MsBuildFeature for Optimize {
    fn transform(&self, _: &Project, cxx: &mut CxxProject) -> Result<()> {
        let cl = cxx.clcompile();
        cl.set_optimization(cxx.doc_mut(), Some("MaxSpeed"))
    }
}

/// Builds with a different platform toolset than the toolchain's own.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformToolset {
    toolset: String,
}

impl PlatformToolset {
    pub fn new(toolset: &str) -> Self {
        Self {
            toolset: toolset.to_string(),
        }
    }
}

impl MsBuildFeature for PlatformToolset {
    fn transform(&self, _: &Project, cxx: &mut CxxProject) -> Result<()> {
        let group = cxx.config_props();
        group.set_platform_toolset(cxx.doc_mut(), Some(&self.toolset))
    }
}

/// Sets one compiler setting by its MSBuild name.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileSetting {
    name: String,
    value: String,
}

impl CompileSetting {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl MsBuildFeature for CompileSetting {
    fn transform(&self, _: &Project, cxx: &mut CxxProject) -> Result<()> {
        let cl = cxx.clcompile();
        set_by_name(cxx.doc_mut(), &cl, &self.name, Some(&self.value))
    }
}

impl MsBuildFeature for Builtin {
    fn transform(&self, _: &Project, _: &mut CxxProject) -> Result<()> {
        Ok(())
    }
}

impl MsBuildFeature for Reject {
    fn transform(&self, _: &Project, _: &mut CxxProject) -> Result<()> {
        Err(self.to_error())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    fn assembled() -> (Project, CxxProject) {
        (
            Project::executable("demo"),
            CxxProject::new("14.0", "Default", "x64").unwrap(),
        )
    }

    #[test]
    fn optimize_sets_max_speed() {
        let (p, mut cxx) = assembled();
        Optimize.transform(&p, &mut cxx).unwrap();
        assert_eq!(cxx.clcompile().optimization(cxx.doc()), "MaxSpeed");
    }

    #[test]
    fn toolset_override_is_validated() {
        let (p, mut cxx) = assembled();
        PlatformToolset::new("v140_xp").transform(&p, &mut cxx).unwrap();
        assert_eq!(cxx.config_props().platform_toolset(cxx.doc()), "v140_xp");
        assert_eq!(
            PlatformToolset::new("v90").transform(&p, &mut cxx).is_err(),
            true
        );
        assert_eq!(cxx.config_props().platform_toolset(cxx.doc()), "v140_xp");
    }

    #[test]
    fn compile_setting_by_name() {
        let (p, mut cxx) = assembled();
        CompileSetting::new("RuntimeLibrary", "MultiThreaded")
            .transform(&p, &mut cxx)
            .unwrap();
        assert_eq!(cxx.clcompile().runtime_library(cxx.doc()), "MultiThreaded");
        assert!(matches!(
            CompileSetting::new("Colour", "red").transform(&p, &mut cxx),
            Err(Error::UnknownField { .. })
        ));
    }

    #[test]
    fn builtin_leaves_document_alone() {
        let (p, mut cxx) = assembled();
        let before = cxx.clone();
        Builtin.transform(&p, &mut cxx).unwrap();
        assert_eq!(cxx, before);
    }

    #[test]
    fn reject_fails() {
        let (p, mut cxx) = assembled();
        let before = cxx.clone();
        assert_eq!(
            Reject::new("language-c++17", "c++17 is not supported by vs14").transform(&p, &mut cxx),
            Err(Error::UnsupportedFeature(
                String::from("language-c++17"),
                String::from("c++17 is not supported by vs14")
            ))
        );
        assert_eq!(cxx, before);
    }
}

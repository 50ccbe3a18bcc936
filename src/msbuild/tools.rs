use super::project::CxxProject;
use crate::core::model::Source;
use crate::error::Result;

/// Consumes one source file into a project document.
pub trait MsBuildTool {
    fn transform(&self, project: &mut CxxProject, source: &Source) -> Result<()>;
}

/// Adds sources as `ClCompile` items, compiled as C++ or as C.
#[derive(Debug, Clone, PartialEq)]
pub struct MsBuildCompiler {
    cxx: bool,
}

impl MsBuildCompiler {
    pub fn c() -> Self {
        Self { cxx: false }
    }

    pub fn cxx() -> Self {
        Self { cxx: true }
    }
}

impl MsBuildTool for MsBuildCompiler {
    fn transform(&self, project: &mut CxxProject, source: &Source) -> Result<()> {
        let cl = project.add_compile_item(source.get_path())?;
        if self.cxx == false {
            cl.set_compile_as(project.doc_mut(), Some("CompileAsC"))?;
            cl.set_compile_as_winrt(project.doc_mut(), Some("false"))?;
        }
        Ok(())
    }
}

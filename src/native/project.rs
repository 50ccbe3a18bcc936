//! Per-project state read by the native tools and adjusted by features.

use super::tools::DirectoryCreator;
use crate::core::job::JobGraph;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct NativeProject {
    name: String,
    root: String,
    directories: DirectoryCreator,
    defines: Vec<String>,
    incpaths: Vec<String>,
    libpaths: Vec<String>,
    libraries: Vec<String>,
    cflags: Vec<String>,
    cxxflags: Vec<String>,
    linkflags: Vec<String>,
}

impl NativeProject {
    /// Creates the state for project `name` building under the output `root`.
    pub fn new(name: &str, root: &str, directories: DirectoryCreator) -> Self {
        Self {
            name: name.to_string(),
            root: root.trim_end_matches('/').to_string(),
            directories: directories,
            defines: Vec::new(),
            incpaths: Vec::new(),
            libpaths: Vec::new(),
            libraries: Vec::new(),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            linkflags: Vec::new(),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns the toolchain's output root shared by every project.
    pub fn get_root(&self) -> &str {
        &self.root
    }

    /// Returns the directory this project's products are written to.
    pub fn get_output(&self) -> String {
        format!("{}/{}", self.root, self.name)
    }

    /// Returns the directory objects are compiled into. It is named after
    /// the project so that no archive or executable can share its path.
    pub fn get_object_dir(&self) -> String {
        format!("{}/{}.dir", self.get_output(), self.name)
    }

    /// Returns the object product for `source`.
    pub fn object_path(&self, source: &str, extension: &str) -> String {
        format!(
            "{}/{}{}",
            self.get_object_dir(),
            source.trim_start_matches("./"),
            extension
        )
    }

    /// Registers the job creating `dir` unless the graph already has one.
    pub fn directory(&self, graph: &mut JobGraph, dir: &str) -> Result<()> {
        self.directories.transform(graph, dir)
    }

    pub fn add_define(&mut self, define: String) {
        self.defines.push(define);
    }

    pub fn add_incpath(&mut self, path: &str) {
        self.incpaths.push(path.to_string());
    }

    pub fn add_libpath(&mut self, path: &str) {
        self.libpaths.push(path.to_string());
    }

    /// Adds an archive to link, ignoring one already listed.
    pub fn add_library(&mut self, archive: String) {
        if self.libraries.contains(&archive) == false {
            self.libraries.push(archive);
        }
    }

    pub fn add_cflag(&mut self, flag: &str) {
        self.cflags.push(flag.to_string());
    }

    pub fn add_cxxflag(&mut self, flag: &str) {
        self.cxxflags.push(flag.to_string());
    }

    pub fn add_linkflag(&mut self, flag: &str) {
        self.linkflags.push(flag.to_string());
    }

    pub fn get_defines(&self) -> &Vec<String> {
        &self.defines
    }

    pub fn get_incpaths(&self) -> &Vec<String> {
        &self.incpaths
    }

    pub fn get_libpaths(&self) -> &Vec<String> {
        &self.libpaths
    }

    pub fn get_libraries(&self) -> &Vec<String> {
        &self.libraries
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::config::Dialect;

    #[test]
    fn paths_live_under_project_output() {
        let p = NativeProject::new("util", "output/linux-clang/", DirectoryCreator::new(Dialect::Gnu));
        assert_eq!(p.get_output(), "output/linux-clang/util");
        assert_eq!(
            p.object_path("./src/a.cpp", ".o"),
            "output/linux-clang/util/util.dir/src/a.cpp.o"
        );
    }

    #[test]
    fn objects_never_land_on_products() {
        let p = NativeProject::new("demo", "out", DirectoryCreator::new(Dialect::Gnu));
        // a source directory named after the project
        assert_eq!(
            p.object_path("demo/main.cpp", ".o"),
            "out/demo/demo.dir/demo/main.cpp.o"
        );
        assert_eq!(p.get_object_dir().starts_with("out/demo/demo.dir"), true);
    }

    #[test]
    fn libraries_are_listed_once() {
        let mut p = NativeProject::new("app", "out", DirectoryCreator::new(Dialect::Msvc));
        p.add_library(String::from("out/util/util.lib"));
        p.add_library(String::from("out/base/base.lib"));
        p.add_library(String::from("out/util/util.lib"));
        assert_eq!(
            p.get_libraries(),
            &vec![
                String::from("out/util/util.lib"),
                String::from("out/base/base.lib")
            ]
        );
    }
}

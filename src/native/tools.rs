//! Tools that turn sources and objects into compile, archive and link jobs.

use super::project::NativeProject;
use crate::core::config::Dialect;
use crate::core::job::{Job, JobGraph};
use crate::core::model::Source;
use crate::error::Result;
use crate::util::environment::Environment;
use std::path::Path;

/// Consumes one source file into jobs, returning the product it registered.
pub trait NativeTool {
    fn transform(
        &self,
        project: &NativeProject,
        graph: &mut JobGraph,
        source: &Source,
    ) -> Result<String>;
}

/// Joins the non-empty parts of a command line with single spaces.
fn command_line(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|p| p.is_empty() == false)
        .collect::<Vec<String>>()
        .join(" ")
}

fn info(program: &str, subject: &str) -> String {
    format!(" [{}] {}", program.to_uppercase(), subject)
}

fn dirname(product: &str) -> String {
    match Path::new(product).parent() {
        Some(p) => p.to_string_lossy().to_string(),
        None => String::new(),
    }
}

/// Registers a job creating `dir` unless one already exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryCreator {
    dialect: Dialect,
    env: Option<Environment>,
}

impl DirectoryCreator {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect: dialect,
            env: None,
        }
    }

    pub fn env(mut self, env: Option<Environment>) -> Self {
        self.env = env;
        self
    }

    pub fn transform(&self, graph: &mut JobGraph, dir: &str) -> Result<()> {
        // every tool writing into the same directory asks for it
        if graph.contains(dir) == true {
            return Ok(());
        }
        let command = match self.dialect {
            Dialect::Msvc => format!("mkdir {}", dir.replace('/', "\\")),
            Dialect::Gnu => format!("mkdir -p {}", dir),
        };
        graph.add_job(
            Job::new(dir, &command)
                .info(&info("mkdir", dir))
                .env(self.env.clone()),
        )
    }
}

/// Compiles one C or C++ source into an object file.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiler {
    dialect: Dialect,
    program: String,
    cxx: bool,
    env: Option<Environment>,
}

impl Compiler {
    fn new(dialect: Dialect, cxx: bool) -> Self {
        let program = match dialect {
            Dialect::Msvc => "cl.exe",
            Dialect::Gnu => "clang",
        };
        Self {
            dialect: dialect,
            program: program.to_string(),
            cxx: cxx,
            env: None,
        }
    }

    pub fn c(dialect: Dialect) -> Self {
        Self::new(dialect, false)
    }

    pub fn cxx(dialect: Dialect) -> Self {
        Self::new(dialect, true)
    }

    /// Replaces the compiler executable, keeping the dialect's arguments.
    pub fn program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn env(mut self, env: Option<Environment>) -> Self {
        self.env = env;
        self
    }

    fn object_extension(&self) -> &str {
        match self.dialect {
            Dialect::Msvc => ".obj",
            Dialect::Gnu => ".o",
        }
    }

    fn command(&self, project: &NativeProject, source: &str, object: &str) -> String {
        let flags = match self.cxx {
            true => project.get_cxxflags(),
            false => project.get_cflags(),
        };
        let mut parts = vec![self.program.clone()];
        match self.dialect {
            Dialect::Msvc => {
                parts.push(String::from("/nologo"));
                parts.extend(flags.iter().cloned());
                parts.extend(project.get_defines().iter().map(|d| format!("/D{}", d)));
                parts.extend(project.get_incpaths().iter().map(|i| format!("/I{}", i)));
                parts.push(String::from("/c"));
                parts.push(format!("/T{}{}", if self.cxx { "p" } else { "c" }, source));
                parts.push(format!("/Fo{}", object));
            }
            Dialect::Gnu => {
                parts.extend(flags.iter().cloned());
                parts.extend(project.get_defines().iter().map(|d| format!("-D{}", d)));
                parts.extend(project.get_incpaths().iter().map(|i| format!("-I{}", i)));
                parts.push(String::from("-c"));
                parts.push(String::from("-x"));
                parts.push(String::from(if self.cxx { "c++" } else { "c" }));
                parts.push(source.to_string());
                parts.push(String::from("-o"));
                parts.push(object.to_string());
            }
        }
        command_line(parts)
    }
}

impl NativeTool for Compiler {
    fn transform(
        &self,
        project: &NativeProject,
        graph: &mut JobGraph,
        source: &Source,
    ) -> Result<String> {
        let src = source.get_path();
        let object = project.object_path(src, self.object_extension());
        let dir = dirname(&object);
        project.directory(graph, &dir)?;
        if graph.contains(src) == false {
            graph.add_job(Job::marker(src))?;
        }
        graph.add_job(
            Job::new(&object, &self.command(project, src, &object))
                .info(&info(&self.program, src))
                .env(self.env.clone()),
        )?;
        graph.add_dependency(&object, src);
        graph.add_dependency(&object, &dir);
        Ok(object)
    }
}

/// Bundles a library's objects into a static archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Archiver {
    dialect: Dialect,
    env: Option<Environment>,
}

impl Archiver {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect: dialect,
            env: None,
        }
    }

    pub fn env(mut self, env: Option<Environment>) -> Self {
        self.env = env;
        self
    }

    fn program(&self) -> &str {
        match self.dialect {
            Dialect::Msvc => "lib.exe",
            Dialect::Gnu => "ar",
        }
    }

    /// Returns the archive of library `name` under the output `root`.
    pub fn library_path(&self, root: &str, name: &str) -> String {
        let root = root.trim_end_matches('/');
        match self.dialect {
            Dialect::Msvc => format!("{}/{}/{}.lib", root, name, name),
            Dialect::Gnu => format!("{}/{}/lib{}.a", root, name, name),
        }
    }

    pub fn transform(
        &self,
        project: &NativeProject,
        graph: &mut JobGraph,
        objects: &[String],
    ) -> Result<String> {
        let product = self.library_path(project.get_root(), project.get_name());
        let dir = dirname(&product);
        project.directory(graph, &dir)?;

        let mut parts = vec![self.program().to_string()];
        match self.dialect {
            Dialect::Msvc => {
                parts.push(String::from("/nologo"));
                parts.push(format!("/out:{}", product));
            }
            Dialect::Gnu => {
                parts.push(String::from("rcs"));
                parts.push(product.clone());
            }
        }
        parts.extend(objects.iter().cloned());

        graph.add_job(
            Job::new(&product, &command_line(parts))
                .info(&info(self.program(), project.get_name()))
                .env(self.env.clone()),
        )?;
        graph.add_dependency(&product, &dir);
        for obj in objects {
            graph.add_dependency(&product, obj);
        }
        Ok(product)
    }
}

/// Links objects and library archives into an executable.
#[derive(Debug, Clone, PartialEq)]
pub struct Linker {
    dialect: Dialect,
    program: String,
    env: Option<Environment>,
}

impl Linker {
    pub fn new(dialect: Dialect) -> Self {
        let program = match dialect {
            Dialect::Msvc => "link.exe",
            Dialect::Gnu => "clang",
        };
        Self {
            dialect: dialect,
            program: program.to_string(),
            env: None,
        }
    }

    /// Replaces the linker executable, keeping the dialect's arguments.
    pub fn program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn env(mut self, env: Option<Environment>) -> Self {
        self.env = env;
        self
    }

    fn product(&self, project: &NativeProject) -> String {
        match self.dialect {
            Dialect::Msvc => format!("{}/{}.exe", project.get_output(), project.get_name()),
            Dialect::Gnu => format!("{}/{}", project.get_output(), project.get_name()),
        }
    }

    pub fn transform(
        &self,
        project: &NativeProject,
        graph: &mut JobGraph,
        objects: &[String],
    ) -> Result<String> {
        let product = self.product(project);
        let dir = dirname(&product);
        project.directory(graph, &dir)?;

        let mut parts = vec![self.program.clone()];
        match self.dialect {
            Dialect::Msvc => {
                parts.push(String::from("/nologo"));
                parts.extend(project.get_libpaths().iter().map(|p| format!("/libpath:{}", p)));
                parts.extend(project.get_libraries().iter().cloned());
                parts.extend(project.get_linkflags().iter().cloned());
                parts.extend(objects.iter().cloned());
                parts.push(format!("/out:{}", product));
            }
            Dialect::Gnu => {
                parts.extend(objects.iter().cloned());
                parts.extend(project.get_libpaths().iter().map(|p| format!("-L{}", p)));
                parts.extend(project.get_libraries().iter().cloned());
                parts.extend(project.get_linkflags().iter().cloned());
                parts.push(String::from("-o"));
                parts.push(product.clone());
            }
        }

        graph.add_job(
            Job::new(&product, &command_line(parts))
                .info(&info(&self.program, project.get_name()))
                .env(self.env.clone()),
        )?;
        graph.add_dependency(&product, &dir);
        for obj in objects {
            graph.add_dependency(&product, obj);
        }
        // archives may be registered by a later assembly into the same graph
        for lib in project.get_libraries() {
            graph.add_dependency(&product, lib);
        }
        Ok(product)
    }
}

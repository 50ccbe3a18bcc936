use super::project::NativeProject;
use crate::core::config::Dialect;
use crate::core::model::Project;
use crate::error::Result;

pub use crate::core::registry::{Builtin, Reject};

/// A named adjustment applied to a project before its jobs are created.
pub trait NativeFeature {
    fn transform(&self, project: &Project, native: &mut NativeProject) -> Result<()>;
}

/// Compiles C and C++ sources for speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimize {
    dialect: Dialect,
}

impl Optimize {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect: dialect }
    }
}

impl NativeFeature for Optimize {
    fn transform(&self, _: &Project, native: &mut NativeProject) -> Result<()> {
        let flag = match self.dialect {
            Dialect::Msvc => "/O2",
            Dialect::Gnu => "-O3",
        };
        native.add_cflag(flag);
        native.add_cxxflag(flag);
        Ok(())
    }
}

/// The command lines a custom flag is added to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlagKind {
    C,
    Cxx,
    Link,
}

/// Appends fixed flags to the C compiler, C++ compiler or linker.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFlags {
    kind: FlagKind,
    flags: Vec<String>,
}

impl CustomFlags {
    pub fn new(kind: FlagKind, flags: &[&str]) -> Self {
        Self {
            kind: kind,
            flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl NativeFeature for CustomFlags {
    fn transform(&self, _: &Project, native: &mut NativeProject) -> Result<()> {
        for flag in &self.flags {
            match self.kind {
                FlagKind::C => native.add_cflag(flag),
                FlagKind::Cxx => native.add_cxxflag(flag),
                FlagKind::Link => native.add_linkflag(flag),
            }
        }
        Ok(())
    }
}

impl NativeFeature for Builtin {
    fn transform(&self, _: &Project, _: &mut NativeProject) -> Result<()> {
        Ok(())
    }
}

impl NativeFeature for Reject {
    fn transform(&self, _: &Project, _: &mut NativeProject) -> Result<()> {
        Err(self.to_error())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::native::tools::DirectoryCreator;

    fn native(dialect: Dialect) -> NativeProject {
        NativeProject::new("demo", "out", DirectoryCreator::new(dialect))
    }

    #[test]
    fn optimize_per_dialect() {
        let p = Project::executable("demo");
        let mut n = native(Dialect::Msvc);
        Optimize::new(Dialect::Msvc).transform(&p, &mut n).unwrap();
        assert_eq!(n.get_cflags(), &vec![String::from("/O2")]);
        assert_eq!(n.get_cxxflags(), &vec![String::from("/O2")]);

        let mut n = native(Dialect::Gnu);
        Optimize::new(Dialect::Gnu).transform(&p, &mut n).unwrap();
        assert_eq!(n.get_cxxflags(), &vec![String::from("-O3")]);
        assert_eq!(n.get_linkflags().len(), 0);
    }

    #[test]
    fn custom_flags_target_one_tool() {
        let p = Project::executable("demo");
        let mut n = native(Dialect::Gnu);
        CustomFlags::new(FlagKind::Cxx, &["-std=c++14"])
            .transform(&p, &mut n)
            .unwrap();
        CustomFlags::new(FlagKind::Link, &["-m32", "-static"])
            .transform(&p, &mut n)
            .unwrap();
        assert_eq!(n.get_cflags().len(), 0);
        assert_eq!(n.get_cxxflags(), &vec![String::from("-std=c++14")]);
        assert_eq!(
            n.get_linkflags(),
            &vec![String::from("-m32"), String::from("-static")]
        );
    }

    #[test]
    fn builtin_changes_nothing() {
        let p = Project::executable("demo");
        let mut n = native(Dialect::Msvc);
        Builtin.transform(&p, &mut n).unwrap();
        assert_eq!(n, native(Dialect::Msvc));
    }

    #[test]
    fn reject_fails() {
        let p = Project::executable("demo");
        let mut n = native(Dialect::Msvc);
        assert_eq!(
            Reject::new("language-c++14", "c++14 is not supported by vs12").transform(&p, &mut n),
            Err(Error::UnsupportedFeature(
                String::from("language-c++14"),
                String::from("c++14 is not supported by vs12")
            ))
        );
    }
}

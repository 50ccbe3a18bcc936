//! Toolchains for Visual Studio 2013 (vs12) and Visual Studio 2015 (vs14).
//!
//! Every definition runs its tools with the environment `vcvarsall.bat`
//! produces for the matching Visual Studio version and target, which the
//! caller discovers and hands in through [VcVars].

use crate::core::config::{Dialect, ToolchainConfig};
use crate::core::registry::{Builtin, Reject};
use crate::core::requirement::HostRequirement;
use crate::error::Result;
use crate::msbuild::features::Optimize as MsBuildOptimize;
use crate::msbuild::toolchain::MsBuildToolchain;
use crate::native::features::{CustomFlags, FlagKind, Optimize};
use crate::native::toolchain::NativeToolchain;
use crate::native::tools::{Archiver, Compiler, Linker};
use crate::toolchain::ToolchainRegistry;
use crate::util::environment::Environment;
use std::sync::Arc;

/// The developer command prompt environments, per version and target.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VcVars {
    pub x86_vs12: Environment,
    pub x64_vs12: Environment,
    pub x86_vs14: Environment,
    pub x64_vs14: Environment,
}

/// The language standards a project may request.
const LANGUAGES: [&str; 6] = ["c89", "c99", "c11", "c++11", "c++14", "c++17"];

/// The language standards a Visual Studio version cannot compile.
fn unsupported_languages(version: &str) -> &'static [&'static str] {
    match version {
        "vs12" => &["c++11", "c++14", "c++17"],
        _ => &["c++14", "c++17"],
    }
}

/// Registers every language standard on `add`, refusing the ones `version`
/// cannot compile and accepting the rest as the compiler's own default.
fn languages<F>(version: &str, mut add: F)
where
    F: FnMut(&str, Option<Reject>),
{
    for lang in LANGUAGES {
        let feature = format!("language-{}", lang);
        match unsupported_languages(version).contains(&lang) {
            true => {
                let reason = format!("{} is not supported by {}", lang, version);
                add(&feature, Some(Reject::new(&feature, &reason)))
            }
            false => add(&feature, None),
        }
    }
}

fn msbuild(
    name: &str,
    platform: &str,
    toolset: &str,
    version: &str,
    env: &Environment,
) -> Result<MsBuildToolchain> {
    let config = ToolchainConfig::new(name)
        .platform(platform)
        .toolset(toolset)
        .env(env)
        .require(HostRequirement::Windows);
    let mut tc = MsBuildToolchain::new(config)?.with_cxx_tools();
    languages(version, |name, reject| match reject {
        Some(r) => tc.add_feature(name, Arc::new(r)),
        None => tc.add_feature(name, Arc::new(Builtin)),
    });
    tc.add_feature("optimize", Arc::new(MsBuildOptimize));
    Ok(tc)
}

/// Returns the MSBuild toolchains for both versions and targets.
pub fn msbuild_toolchains(vcvars: &VcVars) -> Result<Vec<MsBuildToolchain>> {
    Ok(vec![
        msbuild("windows-x86-msbuild-vs12", "Win32", "v120", "vs12", &vcvars.x86_vs12)?,
        msbuild("windows-x64-msbuild-vs12", "x64", "v120", "vs12", &vcvars.x64_vs12)?,
        msbuild("windows-x86-msbuild-vs14", "Win32", "v140", "vs14", &vcvars.x86_vs14)?,
        msbuild("windows-x64-msbuild-vs14", "x64", "v140", "vs14", &vcvars.x64_vs14)?,
    ])
}

/// Creates the target-independent base of a native MSVC toolchain.
fn pam(version: &str) -> NativeToolchain {
    let config = ToolchainConfig::new(&format!("pam-{}", version))
        .require(HostRequirement::Windows);
    let mut tc = NativeToolchain::new(config);
    languages(version, |name, reject| match reject {
        Some(r) => tc.add_feature(name, Arc::new(r)),
        None => tc.add_feature(name, Arc::new(Builtin)),
    });
    tc.add_feature("optimize", Arc::new(Optimize::new(Dialect::Msvc)));
    tc
}

/// Derives the target toolchain `name` from `base` with MSVC tools.
fn msvc_target(base: &NativeToolchain, name: &str, env: &Environment) -> NativeToolchain {
    let env = Some(env.clone());
    base.extend(name)
        .with_compilers(
            Compiler::c(Dialect::Msvc).env(env.clone()),
            Compiler::cxx(Dialect::Msvc).env(env.clone()),
        )
        .archiver(Archiver::new(Dialect::Msvc).env(env.clone()))
        .linker(Linker::new(Dialect::Msvc).env(env))
}

/// Returns the native MSVC toolchains for both versions and targets.
pub fn pam_toolchains(vcvars: &VcVars) -> Vec<NativeToolchain> {
    let vs12 = pam("vs12");
    let vs14 = pam("vs14");
    vec![
        msvc_target(&vs12, "windows-x86-pam-vs12", &vcvars.x86_vs12),
        msvc_target(&vs12, "windows-x64-pam-vs12", &vcvars.x64_vs12),
        msvc_target(&vs14, "windows-x86-pam-vs14", &vcvars.x86_vs14),
        msvc_target(&vs14, "windows-x64-pam-vs14", &vcvars.x64_vs14),
    ]
}

/// Returns the toolchains compiling with clang and archiving and linking
/// with the vs14 tools.
pub fn pam_clang_toolchains(vcvars: &VcVars) -> Vec<NativeToolchain> {
    let config = ToolchainConfig::new("pam-clang-vs14").require(HostRequirement::Windows);
    let mut base = NativeToolchain::new(config)
        .with_compilers(Compiler::c(Dialect::Gnu), Compiler::cxx(Dialect::Gnu));
    for lang in ["c89", "c99", "c11"] {
        let flag = format!("-std={}", lang);
        base.add_feature(
            &format!("language-{}", lang),
            Arc::new(CustomFlags::new(FlagKind::C, &[&flag])),
        );
    }
    for lang in ["c++11", "c++14", "c++17"] {
        let flag = format!("-std={}", lang);
        base.add_feature(
            &format!("language-{}", lang),
            Arc::new(CustomFlags::new(FlagKind::Cxx, &[&flag])),
        );
    }
    base.add_feature("optimize", Arc::new(Optimize::new(Dialect::Gnu)));

    let target = |name: &str, env: &Environment| {
        let env = Some(env.clone());
        base.extend(name)
            .archiver(Archiver::new(Dialect::Msvc).env(env.clone()))
            .linker(Linker::new(Dialect::Msvc).env(env))
    };
    let mut x86 = target("windows-x86-pam-clang-vs14", &vcvars.x86_vs14);
    x86.add_default_feature(Arc::new(CustomFlags::new(FlagKind::C, &["-m32"])));
    x86.add_default_feature(Arc::new(CustomFlags::new(FlagKind::Cxx, &["-m32"])));
    vec![x86, target("windows-x64-pam-clang-vs14", &vcvars.x64_vs14)]
}

/// Registers every Windows toolchain with `registry`.
pub fn register(registry: &mut ToolchainRegistry, vcvars: &VcVars) -> Result<()> {
    for tc in msbuild_toolchains(vcvars)? {
        registry.add(tc);
    }
    for tc in pam_toolchains(vcvars)
        .into_iter()
        .chain(pam_clang_toolchains(vcvars))
    {
        registry.add(tc);
    }
    Ok(())
}

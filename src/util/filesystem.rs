use crate::error::{Error, LastError, Result};
use crate::util::environment::Environment;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::Command;

/// Writes `contents` to the file at `path`, replacing any existing file.
///
/// The file handle is released when this function returns, whether or not
/// the write succeeded.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let to_err = |e: std::io::Error| Error::FileWrite(path.to_path_buf(), LastError(e.to_string()));
    let file = File::create(path).map_err(to_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes()).map_err(to_err)?;
    writer.flush().map_err(to_err)
}

/// Runs `program` with `args` from the `cwd` directory and waits for it to exit.
///
/// Variables in `envs` are layered on top of the inherited environment.
/// Returns the exit code; a process stopped by a signal is an error.
pub fn execute(program: &str, args: &[String], cwd: &Path, envs: &Environment) -> Result<i32> {
    let mut proc = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .envs(envs.iter().map(|v| (v.get_key(), v.get_value())))
        .spawn()
        .map_err(|e| Error::ChildProcFailed(program.to_string(), LastError(e.to_string())))?;
    let exit_code = proc
        .wait()
        .map_err(|e| Error::ChildProcFailed(program.to_string(), LastError(e.to_string())))?;
    match exit_code.code() {
        Some(num) => Ok(num),
        None => Err(Error::ChildProcTerminated(program.to_string())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_file_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("demo.vcxproj");
        write_file(&path, "first version of the file").unwrap();
        write_file(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("demo.vcxproj");
        match write_file(&path, "data") {
            Err(Error::FileWrite(p, _)) => assert_eq!(p, path),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn execute_reports_exit_code() {
        let dir = tempdir().unwrap();
        let env = Environment::new();
        assert_eq!(execute("true", &[], dir.path(), &env), Ok(0));
        assert_eq!(execute("false", &[], dir.path(), &env), Ok(1));
    }

    #[test]
    fn execute_missing_program() {
        let dir = tempdir().unwrap();
        let result = execute(
            "vcxgen-no-such-program",
            &[],
            dir.path(),
            &Environment::new(),
        );
        match result {
            Err(Error::ChildProcFailed(p, _)) => assert_eq!(p, "vcxgen-no-such-program"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

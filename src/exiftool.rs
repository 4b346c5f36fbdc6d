use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::tags::TagMapping;

/// Modify files in place, no _original backup copy
const OVERWRITE_FLAG: &str = "-overwrite_original";

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("reported diagnostics: {stderr}")]
    Diagnostics { stderr: String },
}

/// One exiftool invocation: the program, its tag-assignment arguments, and
/// the target file as the final positional argument. Arguments are kept as a
/// discrete list and handed straight to the process API, so values with
/// colons and spaces need no shell quoting.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    target: PathBuf,
}

impl Invocation {
    /// Pure construction: identical inputs always yield an identical
    /// command, with tags in mapping order.
    pub fn build(program: &str, tags: &TagMapping, target: &Path) -> Self {
        let mut args = Vec::with_capacity(tags.len() + 1);
        args.push(OVERWRITE_FLAG.to_string());
        for (tag, value) in tags.entries() {
            args.push(format!("-{tag}={value}"));
        }

        Invocation {
            program: program.to_string(),
            args,
            target: target.to_path_buf(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command and wait for it to exit. exiftool signals warnings on
    /// stderr with a zero exit status, so any diagnostic output counts as
    /// failure.
    pub fn run(&self) -> Result<(), InvokeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.target)
            .output()
            .map_err(|source| InvokeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(InvokeError::Failed {
                status: output.status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            return Err(InvokeError::Diagnostics { stderr });
        }

        Ok(())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, " {}", self.target.display())
    }
}

//! Detached launching of the preview server process.
//!
//! Spawning sits behind the [`ProcessLauncher`] trait so discovery tests can
//! assert on (or fake) the spawn instead of forking a real process.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// What to launch: program, arguments and extra environment variables.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: Vec<(OsString, OsString)>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Handle to a launched process. The launch is fire-and-forget; the handle
/// only carries the pid for logging.
#[derive(Debug, Clone, Copy)]
pub struct ProcessHandle {
    pub pid: u32,
}

pub trait ProcessLauncher {
    fn launch(&self, spec: &LaunchSpec) -> std::io::Result<ProcessHandle>;
}

/// Launches the server as a detached background process with stdio discarded.
///
/// The child is never waited on; it is expected to outlive the launching
/// client.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl ProcessLauncher for DetachedLauncher {
    fn launch(&self, spec: &LaunchSpec) -> std::io::Result<ProcessHandle> {
        let child = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let pid = child.id();
        tracing::debug!(pid, program = ?spec.program, "Launched preview server process");
        Ok(ProcessHandle { pid })
    }
}

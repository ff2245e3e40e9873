//! Toolchain invocation
//!
//! Runs `go install` in shared linking mode for one build task and classifies
//! the result.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::config::{EnvPolicy, RunConfig};
use crate::core::builder::{BuildExecutor, BuildOutcome, BuildTask};
use crate::error::{TaskError, TaskFailure};

const READ_CHUNK: usize = 8192;

/// Go toolchain wrapper
#[derive(Debug, Clone)]
pub struct GoToolchain {
    /// Path to go binary
    program: PathBuf,
    /// Value of `-ldflags`
    ldflags: String,
    /// Environment handed to the process
    env: EnvPolicy,
}

impl GoToolchain {
    /// Create a new toolchain wrapper with empty linker flags
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ldflags: String::new(),
            env: EnvPolicy::default(),
        }
    }

    /// Create the toolchain described by a run configuration
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.resolve_toolchain())
            .with_ldflags(config.ldflags.clone())
            .with_env(config.env)
    }

    /// Set the linker flags forwarded to every build
    #[must_use]
    pub fn with_ldflags(mut self, ldflags: impl Into<String>) -> Self {
        self.ldflags = ldflags.into();
        self
    }

    /// Set the environment policy
    #[must_use]
    pub fn with_env(mut self, env: EnvPolicy) -> Self {
        self.env = env;
        self
    }

    /// Get the path to the go binary
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for one `go install` invocation
    pub fn install_args(&self, extra_args: &[String]) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "install".into(),
            "-ldflags".into(),
            self.ldflags.clone(),
            "-buildmode".into(),
            "shared".into(),
            "-linkshared".into(),
            "-v".into(),
        ];
        args.extend(extra_args.iter().cloned());
        args
    }

    fn command(&self, task: &BuildTask) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.install_args(&task.extra_args))
            .current_dir(&task.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if self.env == EnvPolicy::Clear {
            cmd.env_clear();
        }
        cmd
    }
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::new(PathBuf::from(crate::config::defaults::DEFAULT_TOOLCHAIN))
    }
}

#[async_trait]
impl BuildExecutor for GoToolchain {
    async fn execute(&self, task: &BuildTask) -> BuildOutcome {
        tracing::debug!(
            "{} {} (in {})",
            self.program.display(),
            self.install_args(&task.extra_args).join(" "),
            task.working_dir.display()
        );

        let mut child = self.command(task).spawn().map_err(|e| {
            TaskFailure::new(
                "",
                TaskError::Spawn {
                    program: self.program.display().to_string(),
                    error: e.to_string(),
                },
            )
        })?;

        let mut combined = Vec::new();
        let waited =
            tokio::time::timeout_at(task.deadline, collect(&mut child, &mut combined)).await;
        let output = String::from_utf8_lossy(&combined).into_owned();

        match waited {
            Ok(Ok(status)) if status.success() => Ok(output),
            Ok(Ok(status)) => Err(TaskFailure::new(
                output,
                TaskError::Exit {
                    status: status.to_string(),
                },
            )),
            Ok(Err(e)) => Err(TaskFailure::new(
                output,
                TaskError::Io {
                    error: e.to_string(),
                },
            )),
            Err(_) => {
                if let Err(e) = child.start_kill() {
                    tracing::debug!("kill after timeout failed: {e}");
                }
                if let Err(e) = child.wait().await {
                    tracing::debug!("reaping timed out process failed: {e}");
                }
                Err(TaskFailure::new(
                    output,
                    TaskError::TimedOut {
                        timeout: task.timeout,
                    },
                ))
            }
        }
    }
}

/// Drain stdout and stderr into one buffer in arrival order, then wait
async fn collect(child: &mut Child, combined: &mut Vec<u8>) -> io::Result<ExitStatus> {
    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let mut out_buf = [0u8; READ_CHUNK];
    let mut err_buf = [0u8; READ_CHUNK];

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_some(&mut stdout, &mut out_buf) => match read? {
                0 => stdout = None,
                n => combined.extend_from_slice(&out_buf[..n]),
            },
            read = read_some(&mut stderr, &mut err_buf) => match read? {
                0 => stderr = None,
                n => combined.extend_from_slice(&err_buf[..n]),
            },
        }
    }

    child.wait().await
}

async fn read_some<R: AsyncRead + Unpin>(pipe: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize> {
    match pipe {
        Some(pipe) => pipe.read(buf).await,
        None => std::future::pending().await,
    }
}

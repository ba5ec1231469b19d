//! Graphviz adapter for the engine's image-renderer port.
//!
//! Runs the external `dot` binary with the DOT text on stdin, under an
//! explicit deadline. The three failure modes stay distinguishable:
//! binary missing, non-zero exit (with captured stderr), and timeout.

use std::io::{self, Read as _, Write as _};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use strata_core::error::CommandError;
use strata_core::ports::{ImageFormat, ImageRenderer};

/// How often the child is polled while waiting for it to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Renders DOT text by invoking Graphviz.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    tool: String,
    timeout: Duration,
}

impl GraphvizRenderer {
    /// Use the standard `dot` binary with the given deadline.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self::with_tool("dot", timeout)
    }

    /// Use a specific layout binary (`dot`, `neato`, ...).
    #[must_use]
    pub fn with_tool(tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            timeout,
        }
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<std::process::ExitStatus, CommandError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(CommandError::Timeout {
                            tool: self.tool.clone(),
                            timeout_secs: self.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(err) => {
                    return Err(CommandError::NonZeroExit {
                        tool: self.tool.clone(),
                        code: -1,
                        stderr: err.to_string(),
                    });
                }
            }
        }
    }
}

impl ImageRenderer for GraphvizRenderer {
    fn render(
        &self,
        graph_text: &str,
        format: ImageFormat,
        output: &Path,
    ) -> Result<(), CommandError> {
        debug!(tool = %self.tool, format = format.as_str(), output = %output.display(), "invoking renderer");

        let mut child = Command::new(&self.tool)
            .arg(format!("-T{}", format.as_str()))
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    CommandError::NotFound {
                        tool: self.tool.clone(),
                    }
                } else {
                    CommandError::NonZeroExit {
                        tool: self.tool.clone(),
                        code: -1,
                        stderr: err.to_string(),
                    }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A write failure here means the child already exited; the exit
            // status below carries the real diagnosis.
            let _ = stdin.write_all(graph_text.as_bytes());
        }

        let status = self.wait_with_deadline(&mut child)?;

        if status.success() {
            return Ok(());
        }

        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }
        Err(CommandError::NonZeroExit {
            tool: self.tool.clone(),
            code: status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        })
    }
}

use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::{info, warn};

use super::{ByteSource, ReaderSource, SourceError, layout};

/// Standard output of a spawned command, e.g. `gpspipe -R`.
///
/// End of output waits for the child; a non-zero exit status is reported as
/// `SourceError::Command`. Dropping the source early kills the child.
pub struct CommandSource {
    command: String,
    child: Child,
    stdout: ReaderSource<ChildStdout>,
    finished: bool,
}

impl CommandSource {
    pub fn spawn(program: &str, args: &[&str]) -> Result<Self, SourceError> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| SourceError::Command {
                command: command.clone(),
                message: err.to_string(),
            })?;
        let stdout = child.stdout.take().ok_or_else(|| SourceError::Command {
            command: command.clone(),
            message: "stdout was not captured".to_string(),
        })?;
        info!(%command, pid = child.id(), "reading TSIP from command");

        Ok(Self {
            command,
            child,
            stdout: ReaderSource::new(stdout),
            finished: false,
        })
    }

    /// `gpspipe -R`: raw receiver bytes relayed by gpsd.
    pub fn gpspipe() -> Result<Self, SourceError> {
        Self::spawn(layout::GPSPIPE_PROGRAM, layout::GPSPIPE_ARGS)
    }
}

impl ByteSource for CommandSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        if self.finished {
            return Ok(None);
        }
        if let Some(chunk) = self.stdout.next_chunk()? {
            return Ok(Some(chunk));
        }

        self.finished = true;
        let status = self.child.wait()?;
        if !status.success() {
            return Err(SourceError::Command {
                command: self.command.clone(),
                message: format!("exited with {status}"),
            });
        }
        info!(command = %self.command, "command output ended");
        Ok(None)
    }
}

impl Drop for CommandSource {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.child.kill() {
            warn!(command = %self.command, error = %err, "failed to stop command");
        }
        let _ = self.child.wait();
    }
}

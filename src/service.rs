use crate::error::{NasConfigError, Result};
use std::process::{Command, Stdio};

/// Systemd unit of the background monitor
pub const MONITOR_UNIT: &str = "nas-monitor.service";

/// Restarts the monitor through the service manager
///
/// Runs `systemctl --user restart <unit>` and judges the outcome by exit
/// status alone. Output is discarded.
#[derive(Debug, Clone)]
pub struct ServiceController {
    program: String,
    args: Vec<String>,
}

impl ServiceController {
    /// Controller for a systemd user unit
    #[must_use]
    pub fn systemd_user(unit: &str) -> Self {
        Self {
            program: "systemctl".to_string(),
            args: vec!["--user".to_string(), "restart".to_string(), unit.to_string()],
        }
    }

    /// Override the program invoked (for testing)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Restart the service
    ///
    /// # Errors
    /// - Returns error if the program is not in PATH
    /// - Returns error if the process can't be spawned
    /// - Returns error if it exits unsuccessfully
    pub fn restart(&self) -> Result<()> {
        let program = which::which(&self.program).map_err(|_| {
            NasConfigError::Service(format!("{} binary not found in PATH", self.program))
        })?;

        tracing::info!("Running {} {}", self.program, self.args.join(" "));

        let status = Command::new(program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NasConfigError::Service(format!("Failed to run {}: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(NasConfigError::Service(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

impl Default for ServiceController {
    fn default() -> Self {
        Self::systemd_user(MONITOR_UNIT)
    }
}

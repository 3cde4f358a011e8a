use std::path::Path;
use std::process::{Command, Stdio};

use log::{info, warn};

use crate::error::{RamdiskError, Result};

/// Captured outcome of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the command exited with status zero
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// The seam between the platform drivers and the host system.
///
/// Every OS/database command goes through this trait as a structured
/// argument list, never as a shell string. Tests substitute a scripted
/// implementation to verify command sequences without touching the host.
pub trait CommandRunner {
    /// Run a command to completion with the caller's own privileges.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a command that needs elevated privileges to completion.
    fn run_privileged(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Launch a long-running process and return without waiting on it.
    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Launch a long-running process with elevated privileges, detached.
    fn spawn_detached_privileged(&self, program: &str, args: &[&str]) -> Result<()>;
}

/// Runs commands against the host system.
///
/// Privileged invocation follows an escalation ladder: plain invocation
/// first, then non-interactive `sudo -n`, then interactive sudo. Root
/// skips the ladder entirely.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn is_root() -> bool {
        #[cfg(target_os = "linux")]
        {
            nix::unistd::geteuid().is_root()
        }
        #[cfg(not(target_os = "linux"))]
        {
            false
        }
    }

    fn capture(output: std::process::Output) -> CommandOutput {
        CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    fn exec(program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program).args(args).output().map_err(|e| {
            RamdiskError::CommandFailed {
                command: display_command(program, args),
                details: e.to_string(),
            }
        })?;
        Ok(Self::capture(output))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        Self::exec(program, args)
    }

    fn run_privileged(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        if Self::is_root() {
            return Self::exec(program, args);
        }

        let full_cmd = display_command(program, args);

        // First try running without sudo
        if let Ok(output) = Self::exec(program, args) {
            if output.success {
                return Ok(output);
            }
        }

        // Check if we can use sudo non-interactively
        let sudo_available = Command::new("sudo")
            .args(["-n", "true"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);

        if sudo_available {
            let mut sudo_args = vec!["-n", program];
            sudo_args.extend_from_slice(args);
            let output = Self::exec("sudo", &sudo_args)?;
            if output.success {
                return Ok(output);
            }
            warn!("command failed under sudo: {}", output.stderr.trim_end());
            return Ok(output);
        }

        // Going to need an interactive sudo prompt
        info!("elevated privileges are required to run:");
        info!("    sudo {full_cmd}");

        let mut sudo_args = vec![program];
        sudo_args.extend_from_slice(args);
        let output = Self::exec("sudo", &sudo_args)?;
        if !output.success {
            warn!("command failed with interactive sudo: {full_cmd}");
        }
        Ok(output)
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<()> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RamdiskError::CommandFailed {
                command: display_command(program, args),
                details: e.to_string(),
            })?;
        Ok(())
    }

    fn spawn_detached_privileged(&self, program: &str, args: &[&str]) -> Result<()> {
        if Self::is_root() {
            return self.spawn_detached(program, args);
        }
        let mut sudo_args = vec![program];
        sudo_args.extend_from_slice(args);
        self.spawn_detached("sudo", &sudo_args)
    }
}

/// Render a program and its argument list the way a user would type it.
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Safe path to string conversion for building argument lists.
///
/// Command argv entries must be UTF-8; a path that is not gets rejected
/// up front rather than lossily mangled into a different path.
pub fn path_to_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| RamdiskError::PathInvalid {
        path: path.to_string_lossy().into_owned(),
    })
}

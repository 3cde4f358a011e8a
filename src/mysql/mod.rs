use std::path::Path;

use log::{info, warn};

use crate::config::MysqlConfig;
use crate::error::Result;
use crate::runner::{path_to_str, CommandRunner};

#[cfg(test)]
mod tests;

/// Optional hook for callers that want to wait on the freshly launched
/// server. The launch itself stays fire-and-forget; the CLI passes no
/// probe and returns immediately.
pub trait ReadinessProbe {
    /// Return true once the server is considered up, false on give-up.
    fn wait_ready(&self, config: &MysqlConfig) -> bool;
}

/// Installs and starts a MySQL instance on the ramdisk.
///
/// Install and start failures are logged, not escalated: setup keeps
/// going the way it always has, and the error log under the data
/// directory is where the real diagnosis happens.
pub struct MysqlProvisioner<'r> {
    runner: &'r dyn CommandRunner,
    config: &'r MysqlConfig,
}

impl<'r> MysqlProvisioner<'r> {
    pub fn new(runner: &'r dyn CommandRunner, config: &'r MysqlConfig) -> Self {
        Self { runner, config }
    }

    /// Put the mysqld AppArmor profile into complain (non-enforcing)
    /// mode so the server can use the ramdisk as its data directory.
    /// Harmless no-op where AppArmor or its tooling is absent.
    pub fn disable_apparmor(&self) -> Result<()> {
        let result = self.runner.run_privileged("aa-complain", &["mysqld"]);
        match result {
            Ok(output) if output.success => {
                info!("mysqld AppArmor profile set to complain mode");
            }
            Ok(output) => {
                warn!(
                    "could not set mysqld AppArmor profile to complain mode: {}",
                    output.stderr.trim_end()
                );
            }
            Err(e) => {
                warn!("AppArmor tooling unavailable: {e}");
            }
        }
        Ok(())
    }

    /// Initialize a fresh data directory on the ramdisk with the
    /// vendor's install tool, then relax its permissions where the
    /// platform needs that for the service account to write it.
    pub fn install_db(&self, datadir: &Path) -> Result<()> {
        info!("Installing new db...");

        let datadir_str = path_to_str(datadir)?;
        let user_arg = format!("--user={}", self.config.user);
        let basedir_arg = format!("--basedir={}", path_to_str(&self.config.basedir)?);
        let datadir_arg = format!("--datadir={datadir_str}");

        let install_tool = path_to_str(&self.config.install_tool)?;
        let install = self
            .runner
            .run(
                install_tool,
                &[user_arg.as_str(), basedir_arg.as_str(), datadir_arg.as_str()],
            )?;
        if !install.success {
            warn!(
                "{install_tool} exited with an error: {}",
                install.stderr.trim_end()
            );
        }

        if self.config.relax_permissions {
            let chmod = self
                .runner
                .run_privileged("chmod", &["777", "-R", datadir_str])?;
            if !chmod.success {
                warn!(
                    "could not relax permissions on {datadir_str}: {}",
                    chmod.stderr.trim_end()
                );
            }
        }

        info!("Done installing db.");
        Ok(())
    }

    /// Launch the server against the ramdisk data directory, detached.
    ///
    /// The server binds the alternate port and socket from the config so
    /// it never collides with a system-installed instance. Nothing waits
    /// on it unless the caller supplies a readiness probe.
    pub fn start_db(&self, datadir: &Path, probe: Option<&dyn ReadinessProbe>) -> Result<()> {
        info!("Starting db...");

        let basedir_arg = format!("--basedir={}", path_to_str(&self.config.basedir)?);
        let datadir_arg = format!("--datadir={}", path_to_str(datadir)?);
        let user_arg = format!("--user={}", self.config.user);
        let error_log = self.config.error_log(datadir);
        let pid_file = self.config.pid_file(datadir);
        let log_arg = format!("--log-error={}", path_to_str(&error_log)?);
        let pid_arg = format!("--pid-file={}", path_to_str(&pid_file)?);
        let port_arg = format!("--port={}", self.config.port);
        let socket_str = path_to_str(&self.config.socket)?;
        let socket_arg = format!("--socket={socket_str}");

        let server_bin = path_to_str(&self.config.server_bin)?;
        let args = [
            basedir_arg.as_str(),
            datadir_arg.as_str(),
            user_arg.as_str(),
            log_arg.as_str(),
            pid_arg.as_str(),
            port_arg.as_str(),
            socket_arg.as_str(),
        ];

        if self.config.start_as_root {
            self.runner.spawn_detached_privileged(server_bin, &args)?;
        } else {
            self.runner.spawn_detached(server_bin, &args)?;
        }

        info!("To log into mysql use: 'mysql --socket={socket_str} [OPTIONS]'");

        if let Some(probe) = probe {
            if !probe.wait_ready(self.config) {
                warn!("mysqld did not report ready; continuing anyway");
            }
        }

        info!("Done starting db.");
        Ok(())
    }
}

// ============================================================================
// File: src/cli.rs
// ----------------------------------------------------------------------------
// Command-line surface and the dispatcher that turns a resolved Settings
// value into platform-driver calls.
// ============================================================================

use std::path::PathBuf;

use clap::Parser;
use log::warn;

use crate::config::{CliOverrides, Settings};
use crate::error::Result;
use crate::linux::LinuxRamdisk;
use crate::macos::MacRamdisk;
use crate::mysql::MysqlProvisioner;
use crate::platform::Platform;
use crate::runner::CommandRunner;

/// Manage the birth, life, and death of a MySQL ramdisk.
#[derive(Debug, Parser)]
#[command(
    name = "mysql-ramdisk",
    version,
    about = "Provision a RAM-backed filesystem, optionally with a throwaway MySQL instance on it"
)]
pub struct Cli {
    /// Create the ramdisk
    #[arg(short = 'c', long = "create-ramdisk")]
    pub create_ramdisk: bool,

    /// Unmount and remove the ramdisk
    #[arg(short = 'k', long = "kill-ramdisk")]
    pub kill_ramdisk: bool,

    /// Ramdisk size in megabytes
    #[arg(short = 's', long = "ramdisk-size", value_name = "MB")]
    pub ramdisk_size: Option<u64>,

    /// Mount directory (Linux) or device node (macOS)
    #[arg(short = 'p', long = "path-to-ramdisk", value_name = "PATH")]
    pub path_to_ramdisk: Option<PathBuf>,

    /// Put the mysqld AppArmor profile into complain mode before starting
    /// the server (Linux only)
    #[arg(short = 'a', long = "disable-apparmor")]
    pub disable_apparmor: bool,

    /// After creating the ramdisk, install and start MySQL on it
    #[arg(short = 'm', long = "with-mysql")]
    pub with_mysql: bool,

    /// Print the resolved configuration as JSON and exit
    #[arg(long = "dump-config")]
    pub dump_config: bool,
}

impl Cli {
    /// Which action, if any, this invocation selects.
    ///
    /// Passing both or neither action flag selects nothing; the program
    /// then exits successfully without touching the host.
    pub fn action(&self) -> Action {
        match (self.create_ramdisk, self.kill_ramdisk) {
            (true, false) => Action::Create,
            (false, true) => Action::Kill,
            _ => Action::None,
        }
    }

    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            size_mb: self.ramdisk_size,
            mount_path: self.path_to_ramdisk.clone(),
            disable_apparmor: self.disable_apparmor,
            with_mysql: self.with_mysql,
        }
    }
}

/// The two meaningful things this tool can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Kill,
    None,
}

/// Run the selected action against the host through `runner`.
pub fn dispatch(settings: &Settings, action: Action, runner: &dyn CommandRunner) -> Result<()> {
    match action {
        Action::Create => create(settings, runner),
        Action::Kill => kill(settings, runner),
        Action::None => {
            warn!("nothing to do: pass exactly one of --create-ramdisk or --kill-ramdisk");
            Ok(())
        }
    }
}

fn create(settings: &Settings, runner: &dyn CommandRunner) -> Result<()> {
    match settings.platform {
        Platform::Linux => {
            let disk = LinuxRamdisk::new(runner);
            disk.create(&settings.ramdisk)?;

            if settings.ramdisk.with_mysql {
                let mysql = MysqlProvisioner::new(runner, &settings.mysql);
                if settings.ramdisk.disable_apparmor {
                    mysql.disable_apparmor()?;
                }
                mysql.install_db(&settings.ramdisk.mount_path)?;
                mysql.start_db(&settings.ramdisk.mount_path, None)?;
            }
        }
        Platform::MacOs => {
            let disk = MacRamdisk::new(runner);
            disk.create(settings.ramdisk.size_mb)?;

            if settings.ramdisk.with_mysql {
                // AppArmor is a Linux mechanism; -a is inert here.
                let mysql = MysqlProvisioner::new(runner, &settings.mysql);
                let datadir = MacRamdisk::volume_path();
                mysql.install_db(&datadir)?;
                mysql.start_db(&datadir, None)?;
            }
        }
    }
    Ok(())
}

fn kill(settings: &Settings, runner: &dyn CommandRunner) -> Result<()> {
    match settings.platform {
        Platform::Linux => LinuxRamdisk::new(runner).destroy(&settings.ramdisk.mount_path),
        Platform::MacOs => MacRamdisk::new(runner).destroy(&settings.ramdisk.mount_path),
    }
}

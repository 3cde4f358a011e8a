// ============================================================================
// File: src/config.rs
// ----------------------------------------------------------------------------
// Configuration model: ramdisk settings, MySQL settings, and the layered
// resolution that builds them.
//
// One immutable Settings value is assembled at startup, precedence
// lowest-to-highest: platform defaults, optional config file, CLI flags.
// There are no module-level mutable defaults.
// ============================================================================

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RamdiskError, Result};
use crate::platform::Platform;

/// MySQL's stock port; the ramdisk instance deliberately binds elsewhere.
pub const MYSQL_DEFAULT_PORT: u16 = 3306;

/// Port the ramdisk-hosted server listens on, off the stock port so it
/// never collides with a system-installed instance.
pub const RAMDISK_MYSQL_PORT: u16 = 3308;

/// What kind of ramdisk to build and whether to load MySQL onto it.
#[derive(Debug, Clone, Serialize)]
pub struct RamdiskConfig {
    /// Ramdisk size in megabytes
    pub size_mb: u64,
    /// Mount directory (Linux) or device node (macOS)
    pub mount_path: PathBuf,
    /// Put the mysqld AppArmor profile into complain mode before starting
    /// the server. Linux only; ignored elsewhere.
    pub disable_apparmor: bool,
    /// Install and start MySQL on the ramdisk after creating it
    pub with_mysql: bool,
}

/// Where the MySQL executables live and how the ramdisk instance is
/// addressed. All historical literals, lifted into named fields so a
/// second instance could coexist if anyone ever needs one.
#[derive(Debug, Clone, Serialize)]
pub struct MysqlConfig {
    /// Service account the server drops to
    pub user: String,
    /// MySQL installation prefix
    pub basedir: PathBuf,
    /// Path to the vendor's mysql_install_db tool
    pub install_tool: PathBuf,
    /// Server daemon binary (bare name resolves through PATH)
    pub server_bin: PathBuf,
    /// TCP port for the ramdisk instance
    pub port: u16,
    /// Unix domain socket for the ramdisk instance
    pub socket: PathBuf,
    /// Error-log filename, placed under the data directory
    pub error_log_name: String,
    /// Pid-file filename, placed under the data directory
    pub pid_file_name: String,
    /// Recursively open up the data directory after install so the
    /// service account can write it (Linux behavior)
    pub relax_permissions: bool,
    /// Launch the server through the privilege-elevation mechanism so it
    /// can switch to the service account (Linux behavior)
    pub start_as_root: bool,
}

impl MysqlConfig {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Linux => Self {
                user: "mysql".to_string(),
                basedir: PathBuf::from("/usr"),
                install_tool: PathBuf::from("/usr/bin/mysql_install_db"),
                server_bin: PathBuf::from("mysqld"),
                port: RAMDISK_MYSQL_PORT,
                socket: PathBuf::from("/tmp/mysql.ramdisk.sock"),
                error_log_name: "mysql.ramdisk.err".to_string(),
                pid_file_name: "mysql.ramdisk.pid".to_string(),
                relax_permissions: true,
                start_as_root: true,
            },
            Platform::MacOs => Self {
                user: "mysql".to_string(),
                basedir: PathBuf::from("/usr/local/mysql"),
                install_tool: PathBuf::from("/usr/local/mysql/scripts/mysql_install_db"),
                server_bin: PathBuf::from("/usr/local/mysql/bin/mysqld"),
                port: RAMDISK_MYSQL_PORT,
                socket: PathBuf::from("/tmp/mysql.sock"),
                error_log_name: "mysql.ramdisk.err".to_string(),
                pid_file_name: "mysql.ramdisk.pid".to_string(),
                relax_permissions: false,
                start_as_root: false,
            },
        }
    }

    /// Error-log location for a given data directory.
    pub fn error_log(&self, datadir: &Path) -> PathBuf {
        datadir.join(&self.error_log_name)
    }

    /// Pid-file location for a given data directory.
    pub fn pid_file(&self, datadir: &Path) -> PathBuf {
        datadir.join(&self.pid_file_name)
    }
}

/// Overrides read from the optional config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileOverrides {
    pub ramdisk_size: Option<u64>,
    pub ramdisk_path: Option<PathBuf>,
    pub mysql_port: Option<u16>,
    pub mysql_socket: Option<PathBuf>,
}

impl FileOverrides {
    /// Load overrides from the user's config directory, if the file exists.
    pub fn load() -> Result<Self> {
        match Self::default_location() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The conventional location: `<config dir>/mysql-ramdisk/config.toml`.
    pub fn default_location() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mysql-ramdisk").join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| RamdiskError::ConfigFile {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| RamdiskError::ConfigFile {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }
}

/// Overrides taken from the command line. Highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub size_mb: Option<u64>,
    pub mount_path: Option<PathBuf>,
    pub disable_apparmor: bool,
    pub with_mysql: bool,
}

/// Everything the dispatcher needs, resolved once.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub platform: Platform,
    pub ramdisk: RamdiskConfig,
    pub mysql: MysqlConfig,
}

impl Settings {
    /// Assemble settings from the three layers, lowest precedence first:
    /// platform defaults, config file, CLI flags.
    pub fn resolve(platform: Platform, file: &FileOverrides, cli: &CliOverrides) -> Result<Self> {
        let size_mb = cli
            .size_mb
            .or(file.ramdisk_size)
            .unwrap_or_else(|| platform.default_size_mb());
        if size_mb == 0 {
            return Err(RamdiskError::Usage {
                details: "ramdisk size must be a positive number of megabytes".to_string(),
            });
        }

        let mount_path = cli
            .mount_path
            .clone()
            .or_else(|| file.ramdisk_path.clone())
            .unwrap_or_else(|| PathBuf::from(platform.default_mount_path()));

        let mut mysql = MysqlConfig::for_platform(platform);
        if let Some(port) = file.mysql_port {
            mysql.port = port;
        }
        if let Some(socket) = &file.mysql_socket {
            mysql.socket = socket.clone();
        }

        Ok(Self {
            platform,
            ramdisk: RamdiskConfig {
                size_mb,
                mount_path,
                disable_apparmor: cli.disable_apparmor,
                with_mysql: cli.with_mysql,
            },
            mysql,
        })
    }
}

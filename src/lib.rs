// ============================================================================
// File: src/lib.rs
// ----------------------------------------------------------------------------
// mysql-ramdisk: provision and tear down a RAM-backed filesystem volume,
// optionally loading a throwaway MySQL instance onto it.
//
// A thin orchestration layer over the host's volume-management commands
// and the MySQL executables. The library side exists so every external
// command sequence is testable through the CommandRunner seam; the
// binary in main.rs is a small shell around dispatch().
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod linux;
pub mod macos;
pub mod mysql;
pub mod platform;
pub mod runner;

pub use cli::{dispatch, Action, Cli};
pub use config::{CliOverrides, FileOverrides, MysqlConfig, RamdiskConfig, Settings};
pub use error::{RamdiskError, Result};
pub use platform::Platform;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};

// ============================================================================
// File: src/error.rs
// ----------------------------------------------------------------------------
// Error types for ramdisk provisioning
// ============================================================================

/// Errors that can occur while provisioning or tearing down a ramdisk.
///
/// Covers malformed user input, the unmount-guard failure on the destroy
/// path, and exec-level failures of the external commands this tool drives.
#[derive(Debug, thiserror::Error)]
pub enum RamdiskError {
    /// Malformed CLI or config-file input
    #[error("invalid usage: {details}")]
    Usage { details: String },

    /// The unmount/detach step reported failure on the destroy path.
    ///
    /// Fatal by design: the recursive delete that normally follows must
    /// never run against a path that is still (or was never) a mount.
    #[error("unmounting of ramdisk at '{path}' failed: {details}")]
    Unmount { path: String, details: String },

    /// An external command could not be run or reported failure where
    /// failure cannot be tolerated
    #[error("command `{command}` failed: {details}")]
    CommandFailed { command: String, details: String },

    /// A path needed as a command argument is not valid UTF-8
    #[error("path contains invalid UTF-8 characters: {path}")]
    PathInvalid { path: String },

    /// The optional config file exists but could not be read or parsed
    #[error("config file {path}: {details}")]
    ConfigFile { path: String, details: String },

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ramdisk operations
pub type Result<T> = std::result::Result<T, RamdiskError>;

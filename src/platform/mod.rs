// ============================================================================
// File: src/platform/mod.rs
// ----------------------------------------------------------------------------
// Host platform detection and per-platform defaults.
//
// The platform is identified once at startup and is immutable for the
// process lifetime. Anything that is not Linux gets the Darwin-style
// treatment, mirroring the posix-and-not-linux split this tool has
// always used.
// ============================================================================

use std::sync::OnceLock;

use serde::Serialize;

/// Global platform cache
static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Which family of volume-management commands applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
    /// tmpfs mounts via mount/umount
    Linux,
    /// RAM block devices via hdiutil/diskutil (macOS and anything else)
    MacOs,
}

impl Platform {
    /// Get the detected host platform, detecting on first use.
    pub fn get() -> Platform {
        *PLATFORM.get_or_init(Self::detect)
    }

    /// Identify the host platform.
    pub fn detect() -> Platform {
        Self::from_os(std::env::consts::OS)
    }

    pub(crate) fn from_os(os: &str) -> Platform {
        if os == "linux" {
            Platform::Linux
        } else {
            Platform::MacOs
        }
    }

    /// Default ramdisk location: a mount directory on Linux, a device
    /// node on macOS.
    pub fn default_mount_path(self) -> &'static str {
        match self {
            Platform::Linux => "/mnt/ramdisk",
            Platform::MacOs => "/dev/disk1",
        }
    }

    /// Default ramdisk size in megabytes.
    pub fn default_size_mb(self) -> u64 {
        match self {
            Platform::Linux => 256,
            Platform::MacOs => 128,
        }
    }
}

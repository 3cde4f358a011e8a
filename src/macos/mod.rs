use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{RamdiskError, Result};
use crate::runner::{path_to_str, CommandRunner};

mod units;


pub use units::{mb_to_sectors, sectors_to_mb};

/// Volume name the RAM device is formatted under; it surfaces at
/// /Volumes/<name> once diskutil mounts it.
pub const VOLUME_NAME: &str = "ramdisk";

/// macOS-style platform driver: RAM-backed block devices allocated with
/// hdiutil and formatted with diskutil.
pub struct MacRamdisk<'r> {
    runner: &'r dyn CommandRunner,
}

impl<'r> MacRamdisk<'r> {
    pub fn new(runner: &'r dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Allocate a RAM-backed block device of `size_mb` megabytes and
    /// format it as journaled HFS+ under [`VOLUME_NAME`].
    ///
    /// Returns the device path reported by the attach command.
    pub fn create(&self, size_mb: u64) -> Result<PathBuf> {
        info!("Creating ramdisk...");

        let ram_spec = format!("ram://{}", mb_to_sectors(size_mb));
        let attach = self
            .runner
            .run("hdiutil", &["attach", "-nomount", ram_spec.as_str()])?;
        if !attach.success {
            return Err(RamdiskError::CommandFailed {
                command: format!("hdiutil attach -nomount {ram_spec}"),
                details: attach.stderr.trim_end().to_string(),
            });
        }

        let device = attach.stdout.trim().to_string();
        if device.is_empty() {
            return Err(RamdiskError::CommandFailed {
                command: format!("hdiutil attach -nomount {ram_spec}"),
                details: "attach reported no device path".to_string(),
            });
        }

        let erase = self
            .runner
            .run("diskutil", &["eraseVolume", "HFS+", VOLUME_NAME, device.as_str()])?;
        if !erase.success {
            warn!("formatting {device} failed: {}", erase.stderr.trim_end());
        }

        info!("Done creating ramdisk: {device}");
        Ok(PathBuf::from(device))
    }

    /// Where the formatted volume's contents surface.
    pub fn volume_path() -> PathBuf {
        PathBuf::from("/Volumes").join(VOLUME_NAME)
    }

    /// Detach the RAM-backed block device.
    ///
    /// The detach tool's own output is reported verbatim; a non-zero
    /// exit is fatal, same as an unmount failure on Linux.
    pub fn destroy(&self, device: &Path) -> Result<()> {
        let device_str = path_to_str(device)?;
        info!("Unmounting ramdisk '{device_str}'.");

        let detach = self.runner.run("hdiutil", &["detach", device_str])?;
        if !detach.stdout.is_empty() {
            info!("{}", detach.stdout.trim_end());
        }
        if !detach.success {
            return Err(RamdiskError::Unmount {
                path: device_str.to_string(),
                details: detach.stderr.trim_end().to_string(),
            });
        }
        Ok(())
    }
}

use std::path::Path;

use log::{info, warn};

use crate::config::RamdiskConfig;
use crate::error::{RamdiskError, Result};
use crate::runner::{path_to_str, CommandRunner};

mod mount;

#[cfg(test)]
mod tests;

pub use mount::MountDetector;

/// Linux platform driver: tmpfs mounts under a directory, managed with
/// the stock mount/umount utilities through the privilege-elevation
/// mechanism.
pub struct LinuxRamdisk<'r> {
    runner: &'r dyn CommandRunner,
}

impl<'r> LinuxRamdisk<'r> {
    pub fn new(runner: &'r dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Create the mount directory if absent and mount a tmpfs of the
    /// configured size over it.
    pub fn create(&self, config: &RamdiskConfig) -> Result<()> {
        let path = path_to_str(&config.mount_path)?;
        info!("Creating ramdisk...");

        if MountDetector::is_mount_point(&config.mount_path).unwrap_or(false) {
            warn!("something is already mounted at {path}; mounting over it");
        }

        let mkdir = self.runner.run_privileged("mkdir", &["-p", path])?;
        if !mkdir.success {
            warn!("could not create {path}: {}", mkdir.stderr.trim_end());
        }

        let size_opt = format!("size={}M", config.size_mb);
        let mount = self
            .runner
            .run_privileged("mount", &["-t", "tmpfs", "-o", size_opt.as_str(), "tmpfs", path])?;
        if !mount.success {
            return Err(RamdiskError::CommandFailed {
                command: format!("mount -t tmpfs -o {size_opt} tmpfs {path}"),
                details: mount.stderr.trim_end().to_string(),
            });
        }

        info!("Done creating ramdisk: {path}");
        Ok(())
    }

    /// Unmount the tmpfs and remove its mount directory.
    ///
    /// The removal only runs after the unmount reports success. A failed
    /// unmount aborts here: recursively deleting a directory that is
    /// still mounted (or was never the ramdisk) is the one catastrophic
    /// failure mode this tool has.
    pub fn destroy(&self, mount_path: &Path) -> Result<()> {
        let path = path_to_str(mount_path)?;
        info!("Unmounting ramdisk '{path}'.");

        let umount = self.runner.run_privileged("umount", &[path])?;
        if !umount.success {
            return Err(RamdiskError::Unmount {
                path: path.to_string(),
                details: umount.stderr.trim_end().to_string(),
            });
        }

        info!("Deleting ramdisk '{path}'.");
        let rm = self.runner.run_privileged("rm", &["-rf", path])?;
        if !rm.success {
            warn!("could not remove {path}: {}", rm.stderr.trim_end());
        }
        Ok(())
    }
}

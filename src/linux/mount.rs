use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use crate::error::Result;

/// Utilities for detecting mount points.
pub struct MountDetector;

impl MountDetector {
    /// Check if a path is a mount point by comparing device IDs.
    ///
    /// A directory is a mount point if its device ID differs from its
    /// parent's device ID.
    pub fn is_mount_point(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        let metadata = fs::metadata(path)?;
        let parent_metadata = fs::metadata(path.parent().unwrap_or(Path::new("/")))?;
        Ok(metadata.dev() != parent_metadata.dev())
    }
}

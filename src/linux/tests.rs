use std::path::Path;

use crate::config::RamdiskConfig;
use crate::error::RamdiskError;
use crate::runner::testing::ScriptedRunner;

use super::{LinuxRamdisk, MountDetector};

fn config(size_mb: u64, path: &str) -> RamdiskConfig {
    RamdiskConfig {
        size_mb,
        mount_path: path.into(),
        disable_apparmor: false,
        with_mysql: false,
    }
}

#[test]
fn create_issues_mkdir_then_tmpfs_mount() {
    let runner = ScriptedRunner::new();
    let disk = LinuxRamdisk::new(&runner);

    disk.create(&config(256, "/mnt/test")).unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            "mkdir -p /mnt/test".to_string(),
            "mount -t tmpfs -o size=256M tmpfs /mnt/test".to_string(),
        ]
    );
}

#[test]
fn create_size_flows_into_mount_options() {
    let runner = ScriptedRunner::new();
    let disk = LinuxRamdisk::new(&runner);

    disk.create(&config(64, "/mnt/small")).unwrap();

    assert!(runner
        .calls()
        .iter()
        .any(|c| c == "mount -t tmpfs -o size=64M tmpfs /mnt/small"));
}

#[test]
fn failed_mount_is_fatal() {
    let runner = ScriptedRunner::new();
    runner.fail_matching("mount ");
    let disk = LinuxRamdisk::new(&runner);

    let err = disk.create(&config(256, "/mnt/test")).unwrap_err();
    assert!(matches!(err, RamdiskError::CommandFailed { .. }));
}

#[test]
fn destroy_unmounts_then_deletes() {
    let runner = ScriptedRunner::new();
    let disk = LinuxRamdisk::new(&runner);

    disk.destroy(Path::new("/mnt/test")).unwrap();

    assert_eq!(
        runner.calls(),
        vec!["umount /mnt/test".to_string(), "rm -rf /mnt/test".to_string()]
    );
}

#[test]
fn failed_unmount_never_reaches_the_delete() {
    let runner = ScriptedRunner::new();
    runner.fail_matching("umount");
    let disk = LinuxRamdisk::new(&runner);

    let err = disk.destroy(Path::new("/mnt/test")).unwrap_err();

    assert!(matches!(err, RamdiskError::Unmount { .. }));
    // The one safety-critical invariant: no rm after a failed umount.
    assert_eq!(runner.calls(), vec!["umount /mnt/test".to_string()]);
}

#[test]
fn nonexistent_path_is_not_a_mount_point() {
    let missing = Path::new("/definitely/not/a/mount/point/4871");
    assert!(!MountDetector::is_mount_point(missing).unwrap());
}

#[test]
fn tmpdir_is_not_reported_as_its_own_mount_point() {
    // A freshly created directory shares its parent's device.
    let dir = tempfile::tempdir().unwrap();
    let inner = dir.path().join("inner");
    std::fs::create_dir(&inner).unwrap();
    assert!(!MountDetector::is_mount_point(&inner).unwrap());
}

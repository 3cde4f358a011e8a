use std::cell::Cell;
use std::path::Path;

use crate::config::MysqlConfig;
use crate::platform::Platform;
use crate::runner::testing::ScriptedRunner;

use super::{MysqlProvisioner, ReadinessProbe};

#[test]
fn install_runs_the_vendor_tool_then_relaxes_permissions() {
    let runner = ScriptedRunner::new();
    let config = MysqlConfig::for_platform(Platform::Linux);
    let mysql = MysqlProvisioner::new(&runner, &config);

    mysql.install_db(Path::new("/mnt/ramdisk")).unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            "/usr/bin/mysql_install_db --user=mysql --basedir=/usr --datadir=/mnt/ramdisk"
                .to_string(),
            "chmod 777 -R /mnt/ramdisk".to_string(),
        ]
    );
}

#[test]
fn macos_install_skips_the_permission_relaxation() {
    let runner = ScriptedRunner::new();
    let config = MysqlConfig::for_platform(Platform::MacOs);
    let mysql = MysqlProvisioner::new(&runner, &config);

    mysql.install_db(Path::new("/Volumes/ramdisk")).unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            "/usr/local/mysql/scripts/mysql_install_db --user=mysql \
             --basedir=/usr/local/mysql --datadir=/Volumes/ramdisk"
                .to_string(),
        ]
    );
}

#[test]
fn start_spawns_mysqld_detached_with_the_ramdisk_locations() {
    let runner = ScriptedRunner::new();
    let config = MysqlConfig::for_platform(Platform::Linux);
    let mysql = MysqlProvisioner::new(&runner, &config);

    mysql.start_db(Path::new("/mnt/ramdisk"), None).unwrap();

    assert_eq!(
        runner.spawned(),
        vec![
            "mysqld --basedir=/usr --datadir=/mnt/ramdisk --user=mysql \
             --log-error=/mnt/ramdisk/mysql.ramdisk.err \
             --pid-file=/mnt/ramdisk/mysql.ramdisk.pid \
             --port=3308 --socket=/tmp/mysql.ramdisk.sock"
                .to_string(),
        ]
    );
}

#[test]
fn install_happens_before_start_exactly_once_each() {
    let runner = ScriptedRunner::new();
    let config = MysqlConfig::for_platform(Platform::Linux);
    let mysql = MysqlProvisioner::new(&runner, &config);

    mysql.install_db(Path::new("/mnt/ramdisk")).unwrap();
    mysql.start_db(Path::new("/mnt/ramdisk"), None).unwrap();

    let calls = runner.calls();
    let installs: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| c.contains("mysql_install_db"))
        .map(|(i, _)| i)
        .collect();
    let starts: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| c.starts_with("mysqld"))
        .map(|(i, _)| i)
        .collect();

    assert_eq!(installs.len(), 1);
    assert_eq!(starts.len(), 1);
    assert!(installs[0] < starts[0]);
}

#[test]
fn install_failure_does_not_abort_the_sequence() {
    let runner = ScriptedRunner::new();
    runner.fail_matching("/usr/bin/mysql_install_db");
    let config = MysqlConfig::for_platform(Platform::Linux);
    let mysql = MysqlProvisioner::new(&runner, &config);

    // Inherited behavior: a failed install is logged, not raised.
    mysql.install_db(Path::new("/mnt/ramdisk")).unwrap();
    mysql.start_db(Path::new("/mnt/ramdisk"), None).unwrap();

    assert_eq!(runner.spawned().len(), 1);
}

#[test]
fn apparmor_complain_mode_goes_through_aa_complain() {
    let runner = ScriptedRunner::new();
    let config = MysqlConfig::for_platform(Platform::Linux);
    let mysql = MysqlProvisioner::new(&runner, &config);

    mysql.disable_apparmor().unwrap();

    assert_eq!(runner.calls(), vec!["aa-complain mysqld".to_string()]);
}

struct CountingProbe {
    called: Cell<bool>,
}

impl ReadinessProbe for CountingProbe {
    fn wait_ready(&self, config: &MysqlConfig) -> bool {
        self.called.set(true);
        config.port == 3308
    }
}

#[test]
fn caller_supplied_probe_is_invoked_after_launch() {
    let runner = ScriptedRunner::new();
    let config = MysqlConfig::for_platform(Platform::Linux);
    let mysql = MysqlProvisioner::new(&runner, &config);

    let probe = CountingProbe {
        called: Cell::new(false),
    };
    mysql
        .start_db(Path::new("/mnt/ramdisk"), Some(&probe))
        .unwrap();

    assert!(probe.called.get());
}

use anyhow::Result;
use clap::Parser;
use log::error;

use mysql_ramdisk::{dispatch, Cli, FileOverrides, Platform, Settings, SystemRunner};

fn main() {
    // Progress lines are info-level; show them unless the user says otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let platform = Platform::get();
    let file = FileOverrides::load()?;
    let settings = Settings::resolve(platform, &file, &cli.overrides())?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let runner = SystemRunner::new();
    dispatch(&settings, cli.action(), &runner)?;
    Ok(())
}

mod app;
mod assets;
mod cli;
mod config;
mod garden;
mod input;
mod logging;
mod render;
mod scene;

use crate::app::App;
use crate::assets::AssetReport;
use crate::cli::{Cli, Command};
use crate::config::Config;
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Some(Command::Check) => {
            let report = AssetReport::build(&config.assets);
            print!("{report}");
            if report.is_ok() {
                return Ok(ExitCode::SUCCESS);
            }
            return Ok(ExitCode::FAILURE);
        }
        Some(Command::Config { dump }) => {
            if dump {
                let yaml = serde_yaml::to_string(&config).context("serializing configuration")?;
                print!("{yaml}");
            } else {
                match Config::default_path() {
                    Some(path) => println!("{}", path.display()),
                    None => println!("no configuration directory available"),
                }
            }
            return Ok(ExitCode::SUCCESS);
        }
        None => (),
    }

    let log_path = logging::init(cli.verbose);
    let result = App::new(config).and_then(|app| app.run(cli.mode));
    if let (Err(e), Some(path)) = (&result, &log_path) {
        tracing::error!("exiting with error: {e:#}");
        eprintln!("see {} for details", path.display());
    }
    result.map(|()| ExitCode::SUCCESS)
}

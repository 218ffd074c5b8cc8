use clap::Parser;
use lpa_solver::{Environment, Model, io::Instance};
use std::{io::Write as _, path::PathBuf};
use tracing::{Level, event};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::AppConfig;

// The top-level arguments: an optional config file and the subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// A TOML file with solver settings
    #[arg(short, long, global = true, env = "LPALLOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub async fn evaluate(self) -> anyhow::Result<()> {
        let AppConfig { mut solver } = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Solve { io, lib } => {
                if let Some(lib) = lib {
                    solver.engine = lib.into();
                }
                let env = Environment::new(solver)?;

                let input = io.read()?;
                let instance = serde_json::from_reader::<_, Instance>(input)?;
                event!(
                    Level::INFO,
                    problem = instance.kind(),
                    engine = env.engine_name(),
                    "solving"
                );

                let report = instance.solve(&env).await?;
                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &report)?;
                writeln!(output)?;
                output.flush()?;
            }
            Commands::Export { io, format } => {
                let input = io.read()?;
                let instance = serde_json::from_reader::<_, Instance>(input)?;

                let format = if let Some(format) = format {
                    format
                } else if let Some(ext) = io.extension() {
                    ext.parse()?
                } else {
                    return Err(CliError::ExportInference)?;
                };

                let mut model = Model::new(instance.kind());
                instance.populate(&mut model)?;

                let mut output = io.write()?;
                format.export(&model, &mut output)?;
                output.flush()?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Unable to infer export format, please specify a valid format")]
    ExportInference,
}

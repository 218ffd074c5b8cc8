use super::IOArgs;
use clap::Subcommand;

mod export;
mod solve;

pub use export::{ExportFormat, ExportFormatError};
pub use solve::EngineLib;

#[derive(Subcommand)]
pub enum Commands {
    /// Solve the instance and report the allocation
    Solve {
        #[command(flatten)]
        io: IOArgs,

        /// Request a specific engine (overrides the configured one)
        #[arg(short, long)]
        lib: Option<EngineLib>,
    },

    /// Build the instance's linear model and export it to a standard format
    Export {
        #[command(flatten)]
        io: IOArgs,

        /// The file format to use (if omitted, will infer based on filename)
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
}

use clap::ValueEnum;
use lpa_solver::{Model, export::export_lp};
use std::{io::Write, str::FromStr};

// Only the LP format is written; it is the one that carries multi-objective
// sections.
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Lp,
}

impl ExportFormat {
    pub fn export<W: Write>(&self, model: &Model, buffer: &mut W) -> anyhow::Result<()> {
        match self {
            Self::Lp => export_lp(model, buffer)?,
        };
        Ok(())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lp" | "LP" => Ok(Self::Lp),
            _ => Err(Self::Err::ExportExtension(s.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportFormatError {
    #[error("Unknown export format: {0}")]
    ExportExtension(String),
}

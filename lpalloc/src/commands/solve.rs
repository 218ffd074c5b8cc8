use clap::ValueEnum;
use lpa_core::models::EngineKind;

// This explicitly articulates the available engines for the `solve` subcommand
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EngineLib {
    Microlp,
    Clarabel,
}

impl From<EngineLib> for EngineKind {
    fn from(lib: EngineLib) -> Self {
        match lib {
            EngineLib::Microlp => EngineKind::Microlp,
            EngineLib::Clarabel => EngineKind::Clarabel,
        }
    }
}

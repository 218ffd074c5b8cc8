mod config;
mod ids;
mod item;
mod map;

pub use config::{EngineKind, SolveConfig};
pub use ids::{AccountId, SecurityId, TradeId};
pub use item::{Account, AllocatableItem, RatedItem, Security, Trade};
pub use map::Map;

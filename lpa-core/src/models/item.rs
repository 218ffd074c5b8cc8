use super::{AccountId, SecurityId, TradeId};
use std::{fmt::Display, hash::Hash};

/// Anything that can receive a share of an allocation.
///
/// The formulations only ever look at three things: a stable identity, the
/// most that may be allocated to the item, and the coefficient the item
/// contributes to the objective per allocated unit.
pub trait AllocatableItem {
    /// The identity of the item. Must be unique among the items of one problem.
    type Key: Display + Clone + Eq + Hash;

    /// The identity key used to name this item's decision variables
    fn key(&self) -> &Self::Key;

    /// The maximum allocatable quantity; must be non-negative
    fn capacity(&self) -> f64;

    /// The per-unit cost (or benefit) of allocating to this item
    fn cost_coefficient(&self) -> f64;
}

/// An item with a second, independent per-unit coefficient.
///
/// Used by the tiered formulation, which optimizes the cost coefficient and
/// the rate coefficient at different priorities.
pub trait RatedItem: AllocatableItem {
    /// The per-unit rate of allocating to this item
    fn rate_coefficient(&self) -> f64;
}

/// A trade that can be (partially) returned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    /// The trade identifier
    pub id: TradeId,
    /// The open quantity of the trade, bounding how much can be returned
    pub quantity: f64,
    /// The per-unit fee
    pub fee: f64,
    /// The dividend rate
    pub div_rate: f64,
}

impl Trade {
    /// Convenience constructor
    pub fn new(id: impl Into<TradeId>, quantity: f64, fee: f64, div_rate: f64) -> Self {
        Self {
            id: id.into(),
            quantity,
            fee,
            div_rate,
        }
    }
}

impl AllocatableItem for Trade {
    type Key = TradeId;

    fn key(&self) -> &TradeId {
        &self.id
    }

    fn capacity(&self) -> f64 {
        self.quantity
    }

    fn cost_coefficient(&self) -> f64 {
        self.fee
    }
}

impl RatedItem for Trade {
    fn rate_coefficient(&self) -> f64 {
        self.div_rate
    }
}

/// A security with an aggregate demand that must be booked across accounts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Security {
    /// The security identifier
    pub id: SecurityId,
    /// The unit price, used to convert booked quantity into balance
    pub price: f64,
    /// The exact quantity that must be booked
    pub need: f64,
}

impl Security {
    /// Convenience constructor
    pub fn new(id: impl Into<SecurityId>, price: f64, need: f64) -> Self {
        Self {
            id: id.into(),
            price,
            need,
        }
    }
}

impl AllocatableItem for Security {
    type Key = SecurityId;

    fn key(&self) -> &SecurityId {
        &self.id
    }

    fn capacity(&self) -> f64 {
        self.need
    }

    fn cost_coefficient(&self) -> f64 {
        self.price
    }
}

/// An account holding balance that securities may be booked against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    /// The account identifier
    pub id: AccountId,
    /// The balance available for inbound bookings
    pub balance: f64,
    /// The per-unit cost of booking against this account
    pub cost: f64,
}

impl Account {
    /// Convenience constructor
    pub fn new(id: impl Into<AccountId>, balance: f64, cost: f64) -> Self {
        Self {
            id: id.into(),
            balance,
            cost,
        }
    }
}

impl AllocatableItem for Account {
    type Key = AccountId;

    fn key(&self) -> &AccountId {
        &self.id
    }

    fn capacity(&self) -> f64 {
        self.balance
    }

    fn cost_coefficient(&self) -> f64 {
        self.cost
    }
}

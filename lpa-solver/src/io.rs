use crate::{
    AllocError, ConstructionError, Environment, Model, Sense,
    formulations::{BalanceOutcome, BalanceProblem, PrioritizedProblem, PriorityScheme, ReturnsProblem},
};
use lpa_core::models::{Account, Map, Security, Trade, TradeId};
use serde::{Deserialize, Serialize};

/// A self-contained problem instance, as read from a JSON file.
///
/// The `problem` field selects the formulation:
///
/// ```json
/// { "problem": "returns", "total_return": 2000, "trades": [ ... ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum Instance {
    /// Maximize the fee-weighted quantity returned under a total cap
    Returns {
        total_return: f64,
        trades: Vec<Trade>,
    },
    /// Allocate under tiered fee and rate objectives
    Prioritized {
        needs: f64,
        #[serde(default = "maximize")]
        sense: Sense,
        #[serde(default)]
        scheme: PriorityScheme,
        trades: Vec<Trade>,
    },
    /// Book securities across account balances at minimum cost
    Balance {
        securities: Vec<Security>,
        accounts: Vec<Account>,
    },
}

fn maximize() -> Sense {
    Sense::Maximize
}

/// The solution of an [`Instance`], keyed by item identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum Report {
    Returns {
        quantities: Map<TradeId, u64>,
    },
    Prioritized {
        quantities: Map<TradeId, f64>,
        cost: f64,
        rate: f64,
    },
    Balance(BalanceOutcome),
}

impl Instance {
    /// The formulation name, also used as the model label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Returns { .. } => "returns",
            Self::Prioritized { .. } => "prioritized",
            Self::Balance { .. } => "balance",
        }
    }

    /// Build the instance's model without solving it
    pub fn populate(&self, model: &mut Model) -> Result<(), ConstructionError> {
        match self {
            Self::Returns {
                total_return,
                trades,
            } => ReturnsProblem::new(trades, *total_return)
                .build(model)
                .map(|_| ()),
            Self::Prioritized {
                needs,
                sense,
                scheme,
                trades,
            } => PrioritizedProblem::new(trades, *needs, *sense)
                .with_scheme(*scheme)
                .build(model)
                .map(|_| ()),
            Self::Balance {
                securities,
                accounts,
            } => BalanceProblem::new(securities, accounts).populate(model),
        }
    }

    /// Solve the instance
    pub async fn solve(&self, env: &Environment) -> Result<Report, AllocError> {
        let label = self.kind();
        match self {
            Self::Returns {
                total_return,
                trades,
            } => {
                let quantities = ReturnsProblem::new(trades, *total_return)
                    .solve(env, label)
                    .await?;
                Ok(Report::Returns {
                    quantities: keyed(trades, quantities),
                })
            }
            Self::Prioritized {
                needs,
                sense,
                scheme,
                trades,
            } => {
                let allocation = PrioritizedProblem::new(trades, *needs, *sense)
                    .with_scheme(*scheme)
                    .solve(env, label)
                    .await?;
                Ok(Report::Prioritized {
                    quantities: keyed(trades, allocation.quantities),
                    cost: allocation.cost,
                    rate: allocation.rate,
                })
            }
            Self::Balance {
                securities,
                accounts,
            } => {
                let outcome = BalanceProblem::new(securities, accounts)
                    .solve(env, label)
                    .await?;
                Ok(Report::Balance(outcome))
            }
        }
    }
}

fn keyed<T>(trades: &[Trade], values: Vec<T>) -> Map<TradeId, T> {
    trades
        .iter()
        .map(|trade| trade.id.clone())
        .zip(values)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_tagged_instances() {
        let instance: Instance = serde_json::from_str(
            r#"{
                "problem": "prioritized",
                "needs": 100,
                "trades": [{ "id": "T1", "quantity": 10, "fee": 0.4, "div_rate": 70 }]
            }"#,
        )
        .unwrap();

        let Instance::Prioritized {
            needs,
            sense,
            scheme,
            trades,
        } = instance
        else {
            panic!("wrong problem kind");
        };
        assert_eq!(needs, 100.0);
        assert_eq!(sense, Sense::Maximize);
        assert_eq!(scheme, PriorityScheme::default());
        assert_eq!(trades, vec![Trade::new("T1", 10.0, 0.4, 70.0)]);
    }

    #[test]
    fn populates_balance_models() {
        let instance: Instance = serde_json::from_str(
            r#"{
                "problem": "balance",
                "securities": [{ "id": "1", "price": 50, "need": 100 }],
                "accounts": [{ "id": "A", "balance": 500, "cost": 0.5 }]
            }"#,
        )
        .unwrap();
        assert_eq!(instance.kind(), "balance");

        let mut model = Model::new(instance.kind());
        instance.populate(&mut model).unwrap();
        assert_eq!(model.variables().len(), 2);
        assert_eq!(model.constraints().len(), 2);
    }
}

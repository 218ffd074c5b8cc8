use crate::{
    AllocError, ConstructionError, Domain, Environment, LinearExpr, Model, Relation, Sense, Var,
};
use lpa_core::models::{Account, AccountId, Security, SecurityId};
use tracing::{Level, event};

/// How much of one security is booked against one account.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceLeg {
    /// The security being booked
    pub security: SecurityId,
    /// The account it is booked against
    pub account: AccountId,
    /// Quantity booked inside the account's balance
    pub inbound: u64,
    /// Quantity sourced outside the account's balance
    pub outbound: u64,
}

/// One complete booking of every security.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalancePlan {
    /// The system cost of the plan
    pub cost: f64,
    /// One leg per (account, security) pair, accounts outermost
    pub legs: Vec<BalanceLeg>,
}

/// Every optimal plan the engine retained, best first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceOutcome {
    /// At least one plan whenever the solve succeeded
    pub plans: Vec<BalancePlan>,
}

/// The variables of one (account, security) pair
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairVars {
    security: usize,
    account: usize,
    inbound: Var,
    outbound: Var,
}

/// Book each security's exact need across accounts at minimum system cost.
///
/// For every (account, security) pair there is an *inbound* quantity, which
/// consumes `price × quantity` of the account's balance, and an *outbound*
/// quantity, which is sourced externally and consumes no balance. Both are
/// integers bounded by the security's need.
///
/// Inbound units cost the account's unit cost. Outbound units cost the
/// account's unit cost plus the highest unit cost of any account, so that
/// booking inside some balance is always preferred when there is room.
#[derive(Debug, Clone)]
pub struct BalanceProblem<'a> {
    securities: &'a [Security],
    accounts: &'a [Account],
}

impl<'a> BalanceProblem<'a> {
    /// Book every security in `securities` across `accounts`
    pub fn new(securities: &'a [Security], accounts: &'a [Account]) -> Self {
        Self {
            securities,
            accounts,
        }
    }

    /// Populate `model`, returning the pair variables, accounts outermost
    pub(crate) fn build(&self, model: &mut Model) -> Result<Vec<PairVars>, ConstructionError> {
        for account in self.accounts.iter() {
            if !(account.balance >= 0.0) {
                return Err(ConstructionError::NegativeBound {
                    name: format!("balance[{}]", account.id),
                    bound: account.balance,
                });
            }
        }
        for security in self.securities.iter() {
            if !(security.need >= 0.0) {
                return Err(ConstructionError::NegativeBound {
                    name: format!("demand[{}]", security.id),
                    bound: security.need,
                });
            }
        }

        let premium = self
            .accounts
            .iter()
            .map(|account| account.cost)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut booked = vec![LinearExpr::new(); self.securities.len()];
        let mut cost = LinearExpr::new();
        let mut pairs = Vec::with_capacity(self.accounts.len() * self.securities.len());

        for (a, account) in self.accounts.iter().enumerate() {
            let mut balance = LinearExpr::new();

            for (s, security) in self.securities.iter().enumerate() {
                let inbound = model.add_var(
                    pair_name("in", account, security),
                    Domain::Integer,
                    security.need,
                )?;
                let outbound = model.add_var(
                    pair_name("out", account, security),
                    Domain::Integer,
                    security.need,
                )?;

                // only inbound bookings consume the account's balance
                balance.add_term(security.price, inbound);

                booked[s].add_term(1.0, inbound).add_term(1.0, outbound);

                cost.add_term(account.cost, inbound)
                    .add_term(account.cost + premium, outbound);

                pairs.push(PairVars {
                    security: s,
                    account: a,
                    inbound,
                    outbound,
                });
            }

            model.add_constraint(
                format!("balance[{}]", account.id),
                balance,
                Relation::Le,
                account.balance,
            )?;
        }

        // every need is met exactly, not merely capped
        for (security, expr) in self.securities.iter().zip(booked) {
            model.add_constraint(
                format!("demand[{}]", security.id),
                expr,
                Relation::Eq,
                security.need,
            )?;
        }

        model.set_objective(cost, Sense::Minimize)?;

        Ok(pairs)
    }

    /// Populate `model` without keeping the variable handles, e.g. for export
    pub fn populate(&self, model: &mut Model) -> Result<(), ConstructionError> {
        self.build(model).map(|_| ())
    }

    /// Build, solve and extract every pooled plan
    pub async fn solve(&self, env: &Environment, name: &str) -> Result<BalanceOutcome, AllocError> {
        let mut model = env.model(name);
        let pairs = self.build(&mut model)?;

        let mut solved = env.optimize(model).await?.into_optimal()?;
        event!(
            Level::DEBUG,
            solutions = solved.solution_count(),
            "extracting balance plans"
        );

        let mut plans = Vec::with_capacity(solved.solution_count());
        for index in 0..solved.solution_count() {
            solved.select(index)?;

            let legs = pairs
                .iter()
                .map(|pair| {
                    Ok(BalanceLeg {
                        security: self.securities[pair.security].id.clone(),
                        account: self.accounts[pair.account].id.clone(),
                        inbound: solved.value(pair.inbound)? as u64,
                        outbound: solved.value(pair.outbound)? as u64,
                    })
                })
                .collect::<Result<Vec<_>, AllocError>>()?;

            plans.push(BalancePlan {
                cost: solved.objective_value()?,
                legs,
            });
        }

        Ok(BalanceOutcome { plans })
    }
}

// Ids are quoted and escaped, so no pair of ids can render to the same name
fn pair_name(flow: &str, account: &Account, security: &Security) -> String {
    format!("{flow}[{:?},{:?}]", account.id.as_str(), security.id.as_str())
}

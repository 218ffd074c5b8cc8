mod balance;
pub use balance::{BalanceLeg, BalanceOutcome, BalancePlan, BalanceProblem};

mod prioritized;
pub use prioritized::{PrioritizedProblem, PriorityScheme, TierSpec, TieredAllocation};

mod returns;
pub use returns::ReturnsProblem;

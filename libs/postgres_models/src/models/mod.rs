mod account;
mod budget;
mod transaction;

pub use account::{Account, NewAccount};
pub use budget::{Budget, BudgetChanges, NewBudget};
pub use transaction::{NewTransaction, Transaction, TransactionKind, UnknownKind, DEFAULT_CATEGORY};

//! Records and result models shared by the store, services and commands.

pub mod balance;
pub mod catalog;
pub mod esim;
pub mod purchase;
pub mod referral;
pub mod transaction;
pub mod user;

pub use balance::TopUpResult;
pub use catalog::{Country, Package};
pub use esim::{ActivationResult, Esim, EsimStatus};
pub use purchase::{ProfileResult, PurchaseResult};
pub use referral::{RedeemResult, Referral, ReferralStatus, ReferralSummary};
pub use transaction::{PaymentMethod, Transaction, TransactionKind};
pub use user::{UserCreditProfile, UserRecord, UserSettings};

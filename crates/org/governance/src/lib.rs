//! # org-governance
//!
//! Access-control and membership-governance engine for one org:
//!
//! - **RoleHierarchy** — the strictly ordered role chain and per-role
//!   permission bit-sets
//! - **MembershipStore** — per-member state: current role, pending invite,
//!   pending promotion, joined flag
//! - **DelegationRegistry** — resource-instance-scoped admin grants for
//!   tokens, campaigns, and exchanges
//! - **AccessGovernor** — the orchestrator exposing every mutating operation
//!   (invite, join, accept/refuse, modify rank, kick, delegate/revoke)
//!
//! Two properties hold under adversarial input: no member ever acts with
//! privilege above its current rank, and no delegated grant is created,
//! used, or revoked except by a caller already holding the authority to do
//! so. Every failed call leaves all stores unchanged.

pub mod delegation;
pub mod error;
pub mod event;
pub mod governor;
pub mod hierarchy;
pub mod membership;

pub use delegation::DelegationRegistry;
pub use error::GovernanceError;
pub use event::GovernanceEvent;
pub use governor::AccessGovernor;
pub use hierarchy::RoleHierarchy;
pub use membership::{MemberRecord, MembershipStore, PendingInvite};

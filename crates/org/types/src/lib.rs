//! # org-types
//!
//! Core type definitions shared across the org governance engine:
//!
//! - **Identifiers** — strong-typed ids for members, orgs, and managed
//!   resources ([`MemberId`], [`OrgId`], [`ResourceId`], [`ResourceKind`])
//! - **Role tags** — 32-byte role identifiers derived from human-readable
//!   role names ([`RoleId`])
//! - **Permissions** — the fixed enumeration of privileged-operation
//!   categories and the bit-set over it ([`Permission`], [`PermissionSet`])
//!
//! These types carry no behavior beyond identity and membership tests; all
//! governance rules live in `org-governance`.

pub mod ids;
pub mod permission;
pub mod role;

pub use ids::{MemberId, OrgId, ResourceId, ResourceKind};
pub use permission::{Permission, PermissionSet};
pub use role::RoleId;

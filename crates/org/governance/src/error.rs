use org_types::RoleId;
use thiserror::Error;

/// Errors produced by the governance engine.
///
/// Every error aborts the whole operation with no partial state mutation.
/// The specific kind is always surfaced to the caller — there is no generic
/// denial and no best-effort path.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("parent role {0} does not exist in the hierarchy")]
    UnknownParent(RoleId),

    #[error("role {0} already exists in the hierarchy")]
    RoleAlreadyExists(RoleId),

    #[error("role {0} does not exist in the hierarchy")]
    UnknownRole(RoleId),

    #[error("member is already joined")]
    AlreadyJoined,

    #[error("org is invite-only and the caller holds no pending invite")]
    InviteRequired,

    #[error("caller rank is insufficient for the requested operation")]
    InsufficientRank,

    #[error("caller has no pending invite")]
    NoPendingInvite,

    #[error("caller has no pending promotion")]
    NoPendingPromotion,

    #[error("caller lacks the permission required for the requested operation")]
    PermissionDenied,
}

use org_types::{MemberId, ResourceId, ResourceKind, RoleId};
use serde::{Deserialize, Serialize};

/// Notification emitted after every committed state transition.
///
/// The org keeps these in an append-only log in operation order; external
/// collaborators read the log, the engine itself never replays it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    RoleAdded {
        role: RoleId,
        parent: RoleId,
    },
    InviteOnlyChanged {
        by: MemberId,
        invite_only: bool,
    },
    MemberJoined {
        member: MemberId,
        role: RoleId,
    },
    InviteIssued {
        issuer: MemberId,
        invitee: MemberId,
        role: RoleId,
    },
    InviteAccepted {
        member: MemberId,
        role: RoleId,
    },
    PromotionProposed {
        by: MemberId,
        target: MemberId,
        role: RoleId,
    },
    PromotionAccepted {
        member: MemberId,
        role: RoleId,
    },
    PromotionRefused {
        member: MemberId,
        role: RoleId,
    },
    MemberDemoted {
        by: MemberId,
        target: MemberId,
        role: RoleId,
    },
    MemberKicked {
        by: MemberId,
        target: MemberId,
    },
    AdminGranted {
        by: MemberId,
        grantee: MemberId,
        kind: ResourceKind,
        resource: ResourceId,
    },
    AdminRevoked {
        by: MemberId,
        grantee: MemberId,
        kind: ResourceKind,
        resource: ResourceId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_roundtrip() {
        let event = GovernanceEvent::InviteIssued {
            issuer: MemberId::new("owner"),
            invitee: MemberId::new("bob"),
            role: RoleId::derive("ADMIN_ROLE"),
        };
        let json = serde_json::to_string(&event).unwrap();
        let restored: GovernanceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, restored);
    }
}

use std::collections::HashMap;

use org_types::{MemberId, RoleId};
use serde::{Deserialize, Serialize};

/// A pending invite: who issued it and the role it proposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInvite {
    pub issuer: MemberId,
    pub role: RoleId,
}

/// Per-member governance state.
///
/// A record exists once an identity is invited or joins; it is removed
/// entirely on kick, so a kicked identity re-enters with no history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Current role — meaningful only while `joined`
    pub role: RoleId,
    pub joined: bool,
    pub pending_invite: Option<PendingInvite>,
    /// Proposed elevation awaiting the member's acceptance
    pub pending_promotion: Option<RoleId>,
}

impl MemberRecord {
    /// Fresh record for an identity that has not joined yet.
    pub fn non_member() -> Self {
        Self {
            role: RoleId::user(),
            joined: false,
            pending_invite: None,
            pending_promotion: None,
        }
    }

    /// Record for a joined member holding `role`.
    pub fn joined(role: RoleId) -> Self {
        Self {
            role,
            joined: true,
            pending_invite: None,
            pending_promotion: None,
        }
    }
}

/// MembershipStore — owns every member record of one org.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MembershipStore {
    members: HashMap<MemberId, MemberRecord>,
}

impl MembershipStore {
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
        }
    }

    pub fn get(&self, id: &MemberId) -> Option<&MemberRecord> {
        self.members.get(id)
    }

    pub fn get_mut(&mut self, id: &MemberId) -> Option<&mut MemberRecord> {
        self.members.get_mut(id)
    }

    /// Record for `id`, created as a non-member if absent.
    pub fn entry(&mut self, id: &MemberId) -> &mut MemberRecord {
        self.members
            .entry(id.clone())
            .or_insert_with(MemberRecord::non_member)
    }

    pub fn insert(&mut self, id: MemberId, record: MemberRecord) {
        self.members.insert(id, record);
    }

    /// Drop the record entirely (kick). No memory survives.
    pub fn remove(&mut self, id: &MemberId) -> Option<MemberRecord> {
        self.members.remove(id)
    }

    pub fn is_joined(&self, id: &MemberId) -> bool {
        self.members.get(id).map(|m| m.joined).unwrap_or(false)
    }

    /// Current role of a joined member.
    pub fn role_of(&self, id: &MemberId) -> Option<RoleId> {
        self.members
            .get(id)
            .filter(|m| m.joined)
            .map(|m| m.role)
    }

    /// Identities of all joined members.
    pub fn joined_members(&self) -> impl Iterator<Item = &MemberId> {
        self.members
            .iter()
            .filter(|(_, m)| m.joined)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

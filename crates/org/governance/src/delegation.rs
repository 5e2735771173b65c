use std::collections::HashSet;

use org_types::{MemberId, ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// DelegationRegistry — resource-instance-scoped admin grants.
///
/// One logical set per resource kind; each entry marks one grantee as a
/// delegated admin of one resource instance. Eligibility checks (who may
/// grant, who may receive) are the governor's job — this store only records
/// decided grants.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DelegationRegistry {
    grants: HashSet<(ResourceKind, ResourceId, MemberId)>,
}

impl DelegationRegistry {
    pub fn new() -> Self {
        Self {
            grants: HashSet::new(),
        }
    }

    /// Record a grant. Granting twice is a no-op.
    pub fn grant(&mut self, kind: ResourceKind, resource: ResourceId, grantee: MemberId) {
        info!(kind = %kind, resource = %resource, grantee = %grantee, "Delegated admin granted");
        self.grants.insert((kind, resource, grantee));
    }

    /// Remove a grant. Idempotent: revoking a non-existent grant is not an
    /// error. Returns whether a grant was actually removed.
    pub fn revoke(&mut self, kind: ResourceKind, resource: &ResourceId, grantee: &MemberId) -> bool {
        let removed = self
            .grants
            .remove(&(kind, resource.clone(), grantee.clone()));
        if removed {
            warn!(kind = %kind, resource = %resource, grantee = %grantee, "Delegated admin revoked");
        }
        removed
    }

    pub fn is_admin(&self, kind: ResourceKind, resource: &ResourceId, grantee: &MemberId) -> bool {
        self.grants
            .contains(&(kind, resource.clone(), grantee.clone()))
    }

    /// Drop every grant held by `grantee`, across all kinds and resources.
    /// Used on kick: a removed member keeps no delegated authority.
    pub fn purge_grantee(&mut self, grantee: &MemberId) {
        let before = self.grants.len();
        self.grants.retain(|(_, _, g)| g != grantee);
        let purged = before - self.grants.len();
        if purged > 0 {
            warn!(grantee = %grantee, purged, "Delegated grants purged");
        }
    }

    /// Delegated admins of one resource instance.
    pub fn admins_of(&self, kind: ResourceKind, resource: &ResourceId) -> Vec<&MemberId> {
        self.grants
            .iter()
            .filter(|(k, r, _)| *k == kind && r == resource)
            .map(|(_, _, g)| g)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

use std::collections::HashMap;

use org_types::{Permission, PermissionSet, RoleId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GovernanceError;

/// RoleHierarchy — the org's strictly ordered set of roles.
///
/// Roles form a single linear chain from the base `User` role (rank 0) to
/// the top `Owner` role. The order is an explicit list: rank is the position
/// in that list, and `add_role` splices the new role directly below its
/// parent (the role immediately above it). Roles are never removed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleHierarchy {
    /// Role tags ordered from lowest to highest rank
    order: Vec<RoleId>,
    /// Permission bit-set per role
    permissions: HashMap<RoleId, PermissionSet>,
}

impl RoleHierarchy {
    /// Build the two built-in roles: `User` with the given base permissions
    /// and `Owner` holding the full permission set.
    pub fn new(user_permissions: PermissionSet) -> Self {
        let mut permissions = HashMap::new();
        permissions.insert(RoleId::user(), user_permissions);
        permissions.insert(RoleId::owner(), PermissionSet::all());
        Self {
            order: vec![RoleId::user(), RoleId::owner()],
            permissions,
        }
    }

    /// Insert a new role immediately below `parent`.
    ///
    /// The parent keeps its position relative to everything above it; the
    /// new role takes the rank directly beneath. Building Owner → Admin
    /// (under Owner) → Supervisor (under Admin) therefore yields the
    /// sequence `[User, Supervisor, Admin, Owner]`.
    pub fn add_role(
        &mut self,
        role: RoleId,
        parent: RoleId,
        permissions: PermissionSet,
    ) -> Result<(), GovernanceError> {
        if self.permissions.contains_key(&role) {
            return Err(GovernanceError::RoleAlreadyExists(role));
        }
        let parent_rank = self
            .rank_of(&parent)
            .ok_or(GovernanceError::UnknownParent(parent))?;

        self.order.insert(parent_rank, role);
        self.permissions.insert(role, permissions);

        info!(role = %role, parent = %parent, rank = parent_rank, "Role added");
        Ok(())
    }

    /// Rank of a role: its index in the total order, 0 = lowest.
    pub fn rank_of(&self, role: &RoleId) -> Option<usize> {
        self.order.iter().position(|r| r == role)
    }

    /// Whether a role exists in this hierarchy.
    pub fn contains(&self, role: &RoleId) -> bool {
        self.permissions.contains_key(role)
    }

    /// Bit test against a role's permission set. `false` for unknown roles.
    pub fn has_permission(&self, role: &RoleId, permission: Permission) -> bool {
        self.permissions
            .get(role)
            .map(|set| set.contains(permission))
            .unwrap_or(false)
    }

    /// Permission set of a role, if the role exists.
    pub fn permissions_of(&self, role: &RoleId) -> Option<PermissionSet> {
        self.permissions.get(role).copied()
    }

    /// The ordered role sequence from lowest to highest rank.
    pub fn sequence(&self) -> &[RoleId] {
        &self.order
    }

    /// The top role of the hierarchy.
    pub fn top(&self) -> RoleId {
        // The order is never empty: new() seeds User and Owner.
        *self.order.last().expect("hierarchy holds built-in roles")
    }

    /// Number of roles in the chain.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

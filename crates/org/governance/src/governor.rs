use org_types::{MemberId, Permission, PermissionSet, ResourceId, ResourceKind, RoleId};
use tracing::{info, warn};

use crate::delegation::DelegationRegistry;
use crate::error::GovernanceError;
use crate::event::GovernanceEvent;
use crate::hierarchy::RoleHierarchy;
use crate::membership::{MembershipStore, PendingInvite};

/// AccessGovernor — the single entry point for every mutating governance
/// operation of one org.
///
/// The governor resolves the caller's current role, consults the hierarchy
/// for rank and permission bits, optionally consults the delegation registry,
/// then commits the transition and appends a notification event. Every
/// operation validates completely before mutating anything: a failed call
/// leaves all stores unchanged.
///
/// One org = one governor. Governors share no state, so hosting many orgs
/// needs no locking beyond owning each instance.
pub struct AccessGovernor {
    /// Org owner — always holds the top role, set at construction
    owner: MemberId,
    invite_only: bool,
    hierarchy: RoleHierarchy,
    members: MembershipStore,
    delegation: DelegationRegistry,
    /// Append-only notification log, in operation order
    events: Vec<GovernanceEvent>,
}

impl AccessGovernor {
    /// Create an org with the two built-in roles. The owner joins
    /// immediately at the top role; the base `User` role carries
    /// `user_permissions`.
    pub fn new(owner: MemberId, invite_only: bool, user_permissions: PermissionSet) -> Self {
        let hierarchy = RoleHierarchy::new(user_permissions);
        let mut members = MembershipStore::new();
        members.insert(
            owner.clone(),
            crate::membership::MemberRecord::joined(hierarchy.top()),
        );
        info!(owner = %owner, invite_only, "Org created");
        Self {
            owner,
            invite_only,
            hierarchy,
            members,
            delegation: DelegationRegistry::new(),
            events: Vec::new(),
        }
    }

    // =========================================================================
    // ROLE HIERARCHY OPERATIONS
    // =========================================================================

    /// Insert a new role immediately below `parent`.
    ///
    /// Only a member holding the top role may reshape the hierarchy.
    pub fn add_role(
        &mut self,
        caller: &MemberId,
        role: RoleId,
        parent: RoleId,
        permissions: PermissionSet,
    ) -> Result<(), GovernanceError> {
        let caller_rank = self.rank_of_caller(caller)?;
        if caller_rank + 1 != self.hierarchy.len() {
            return Err(GovernanceError::InsufficientRank);
        }

        self.hierarchy.add_role(role, parent, permissions)?;
        self.events.push(GovernanceEvent::RoleAdded { role, parent });
        Ok(())
    }

    // =========================================================================
    // MEMBERSHIP WORKFLOW
    // =========================================================================

    /// Toggle the invite-only flag. Requires the `InviteSwitch` permission.
    pub fn set_invite_only(
        &mut self,
        caller: &MemberId,
        invite_only: bool,
    ) -> Result<(), GovernanceError> {
        if !self.has_permission(caller, Permission::InviteSwitch) {
            return Err(GovernanceError::PermissionDenied);
        }

        self.invite_only = invite_only;
        info!(by = %caller, invite_only, "Invite-only flag changed");
        self.events.push(GovernanceEvent::InviteOnlyChanged {
            by: caller.clone(),
            invite_only,
        });
        Ok(())
    }

    /// Join the org as a base `User`.
    ///
    /// Under invite-only, joining requires a pending invite; the invite is
    /// not consumed — accepting it is a separate path that still upgrades
    /// the member to the invited role.
    pub fn join(&mut self, caller: &MemberId) -> Result<(), GovernanceError> {
        if self.members.is_joined(caller) {
            return Err(GovernanceError::AlreadyJoined);
        }
        let has_invite = self
            .members
            .get(caller)
            .map(|m| m.pending_invite.is_some())
            .unwrap_or(false);
        if self.invite_only && !has_invite {
            return Err(GovernanceError::InviteRequired);
        }

        let record = self.members.entry(caller);
        record.joined = true;
        record.role = RoleId::user();

        info!(member = %caller, "Member joined");
        self.events.push(GovernanceEvent::MemberJoined {
            member: caller.clone(),
            role: RoleId::user(),
        });
        Ok(())
    }

    /// Invite an identity at a proposed role.
    ///
    /// The caller's rank must be strictly above the proposed role's rank, so
    /// nobody can invite at or above their own rank — in particular nobody
    /// may invite at the top role. A prior pending invite for the same
    /// identity is overwritten.
    pub fn invite(
        &mut self,
        caller: &MemberId,
        invitee: &MemberId,
        role: RoleId,
    ) -> Result<(), GovernanceError> {
        let proposed_rank = self
            .hierarchy
            .rank_of(&role)
            .ok_or(GovernanceError::UnknownRole(role))?;
        let caller_rank = self.rank_of_caller(caller)?;
        if caller_rank <= proposed_rank {
            return Err(GovernanceError::InsufficientRank);
        }
        if self.members.is_joined(invitee) {
            return Err(GovernanceError::AlreadyJoined);
        }

        self.members.entry(invitee).pending_invite = Some(PendingInvite {
            issuer: caller.clone(),
            role,
        });

        info!(issuer = %caller, invitee = %invitee, role = %role, "Invite issued");
        self.events.push(GovernanceEvent::InviteIssued {
            issuer: caller.clone(),
            invitee: invitee.clone(),
            role,
        });
        Ok(())
    }

    /// Accept a pending invite: join at the invited role.
    pub fn accept_invite(&mut self, caller: &MemberId) -> Result<(), GovernanceError> {
        let record = self
            .members
            .get_mut(caller)
            .ok_or(GovernanceError::NoPendingInvite)?;
        let invite = record
            .pending_invite
            .take()
            .ok_or(GovernanceError::NoPendingInvite)?;

        record.role = invite.role;
        record.joined = true;

        info!(member = %caller, role = %invite.role, "Invite accepted");
        self.events.push(GovernanceEvent::InviteAccepted {
            member: caller.clone(),
            role: invite.role,
        });
        Ok(())
    }

    /// Change a member's rank.
    ///
    /// The caller must outrank the target's *current* role, and may never
    /// propose a role above their own rank. Promotions are two-phase: the
    /// target's effective role is unchanged until it accepts. Demotions
    /// (including multi-level) apply immediately and clear any pending
    /// promotion.
    pub fn modify_rank(
        &mut self,
        caller: &MemberId,
        target: &MemberId,
        role: RoleId,
    ) -> Result<(), GovernanceError> {
        let proposed_rank = self
            .hierarchy
            .rank_of(&role)
            .ok_or(GovernanceError::UnknownRole(role))?;
        let caller_rank = self.rank_of_caller(caller)?;
        let target_rank = self.rank_of_caller(target)?;
        if caller_rank <= target_rank || proposed_rank > caller_rank {
            return Err(GovernanceError::InsufficientRank);
        }

        let record = self
            .members
            .get_mut(target)
            .expect("target rank implies a joined record");
        if proposed_rank > target_rank {
            record.pending_promotion = Some(role);
            info!(by = %caller, target = %target, role = %role, "Promotion proposed");
            self.events.push(GovernanceEvent::PromotionProposed {
                by: caller.clone(),
                target: target.clone(),
                role,
            });
        } else {
            record.role = role;
            record.pending_promotion = None;
            warn!(by = %caller, target = %target, role = %role, "Member demoted");
            self.events.push(GovernanceEvent::MemberDemoted {
                by: caller.clone(),
                target: target.clone(),
                role,
            });
        }
        Ok(())
    }

    /// Accept an outstanding promotion: the proposed role takes effect.
    pub fn accept_promotion(&mut self, caller: &MemberId) -> Result<(), GovernanceError> {
        let record = self
            .members
            .get_mut(caller)
            .ok_or(GovernanceError::NoPendingPromotion)?;
        let role = record
            .pending_promotion
            .take()
            .ok_or(GovernanceError::NoPendingPromotion)?;

        record.role = role;

        info!(member = %caller, role = %role, "Promotion accepted");
        self.events.push(GovernanceEvent::PromotionAccepted {
            member: caller.clone(),
            role,
        });
        Ok(())
    }

    /// Refuse an outstanding promotion: the current role is kept.
    pub fn refuse_promotion(&mut self, caller: &MemberId) -> Result<(), GovernanceError> {
        let record = self
            .members
            .get_mut(caller)
            .ok_or(GovernanceError::NoPendingPromotion)?;
        let role = record
            .pending_promotion
            .take()
            .ok_or(GovernanceError::NoPendingPromotion)?;

        info!(member = %caller, role = %role, "Promotion refused");
        self.events.push(GovernanceEvent::PromotionRefused {
            member: caller.clone(),
            role,
        });
        Ok(())
    }

    /// Remove a member. The caller must outrank the target.
    ///
    /// The member record and every delegated grant the target held are
    /// dropped; the identity may join again immediately as a fresh `User`.
    pub fn kick_member(
        &mut self,
        caller: &MemberId,
        target: &MemberId,
    ) -> Result<(), GovernanceError> {
        let caller_rank = self.rank_of_caller(caller)?;
        let target_rank = self.rank_of_caller(target)?;
        if caller_rank <= target_rank {
            return Err(GovernanceError::InsufficientRank);
        }

        self.members.remove(target);
        self.delegation.purge_grantee(target);

        warn!(by = %caller, target = %target, "Member kicked");
        self.events.push(GovernanceEvent::MemberKicked {
            by: caller.clone(),
            target: target.clone(),
        });
        Ok(())
    }

    // =========================================================================
    // DELEGATION OPERATIONS
    // =========================================================================

    /// Delegate admin rights over one resource instance.
    ///
    /// The caller must hold the kind's set-admin permission, the grantee
    /// must hold the kind's can-manage permission, and self-grants are
    /// always denied.
    pub fn grant_admin(
        &mut self,
        caller: &MemberId,
        kind: ResourceKind,
        resource: ResourceId,
        grantee: &MemberId,
    ) -> Result<(), GovernanceError> {
        self.check_delegation_authority(caller, kind)?;
        if grantee == caller {
            return Err(GovernanceError::PermissionDenied);
        }
        if !self.has_permission(grantee, Permission::canmanage_for(kind)) {
            return Err(GovernanceError::PermissionDenied);
        }

        self.delegation.grant(kind, resource.clone(), grantee.clone());
        self.events.push(GovernanceEvent::AdminGranted {
            by: caller.clone(),
            grantee: grantee.clone(),
            kind,
            resource,
        });
        Ok(())
    }

    /// Revoke a delegated grant. Idempotent: revoking a grant that does not
    /// exist succeeds without effect.
    pub fn revoke_admin(
        &mut self,
        caller: &MemberId,
        kind: ResourceKind,
        resource: &ResourceId,
        grantee: &MemberId,
    ) -> Result<(), GovernanceError> {
        self.check_delegation_authority(caller, kind)?;

        if self.delegation.revoke(kind, resource, grantee) {
            self.events.push(GovernanceEvent::AdminRevoked {
                by: caller.clone(),
                grantee: grantee.clone(),
                kind,
                resource: resource.clone(),
            });
        }
        Ok(())
    }

    fn check_delegation_authority(
        &self,
        caller: &MemberId,
        kind: ResourceKind,
    ) -> Result<(), GovernanceError> {
        if !self.has_permission(caller, Permission::setadmin_for(kind)) {
            return Err(GovernanceError::PermissionDenied);
        }
        Ok(())
    }

    // =========================================================================
    // QUERY OPERATIONS (side-effect-free, any caller)
    // =========================================================================

    /// Current role of a joined member.
    pub fn role_of(&self, member: &MemberId) -> Option<RoleId> {
        self.members.role_of(member)
    }

    /// Rank of a joined member's current role.
    pub fn rank_of(&self, member: &MemberId) -> Option<usize> {
        self.members
            .role_of(member)
            .and_then(|role| self.hierarchy.rank_of(&role))
    }

    /// Whether a joined member's role grants `permission`. Non-members hold
    /// nothing.
    pub fn has_permission(&self, member: &MemberId, permission: Permission) -> bool {
        self.members
            .role_of(member)
            .map(|role| self.hierarchy.has_permission(&role, permission))
            .unwrap_or(false)
    }

    /// Whether `member` holds a delegated admin grant for one resource.
    pub fn is_admin(&self, kind: ResourceKind, resource: &ResourceId, member: &MemberId) -> bool {
        self.delegation.is_admin(kind, resource, member)
    }

    /// The combined authorization rule used by resource collaborators for
    /// instance-scoped privileged operations: blanket role authority over
    /// the kind, or a delegated grant backed by the can-manage and action
    /// permissions.
    pub fn is_authorized(
        &self,
        caller: &MemberId,
        kind: ResourceKind,
        resource: &ResourceId,
        action: Permission,
    ) -> bool {
        let Some(role) = self.members.role_of(caller) else {
            return false;
        };
        if self
            .hierarchy
            .has_permission(&role, Permission::blanket_for(kind))
        {
            return true;
        }
        self.delegation.is_admin(kind, resource, caller)
            && self.hierarchy.has_permission(&role, action)
            && self
                .hierarchy
                .has_permission(&role, Permission::canmanage_for(kind))
    }

    /// The org owner, set at construction.
    pub fn owner(&self) -> &MemberId {
        &self.owner
    }

    pub fn is_invite_only(&self) -> bool {
        self.invite_only
    }

    /// Ordered role sequence from lowest to highest rank.
    pub fn role_hierarchy(&self) -> &[RoleId] {
        self.hierarchy.sequence()
    }

    /// Rank of a role in this org's hierarchy.
    pub fn rank_of_role(&self, role: &RoleId) -> Option<usize> {
        self.hierarchy.rank_of(role)
    }

    /// Size of the permission enumeration.
    pub fn permissions_count(&self) -> usize {
        Permission::COUNT
    }

    /// Identities of all joined members.
    pub fn members(&self) -> impl Iterator<Item = &MemberId> {
        self.members.joined_members()
    }

    /// The append-only notification log.
    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    /// Rank of a joined caller, or `InsufficientRank` for non-members.
    fn rank_of_caller(&self, caller: &MemberId) -> Result<usize, GovernanceError> {
        let role = self
            .members
            .role_of(caller)
            .ok_or(GovernanceError::InsufficientRank)?;
        // A joined member's role always exists in the hierarchy.
        Ok(self
            .hierarchy
            .rank_of(&role)
            .expect("joined member holds a hierarchy role"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> MemberId {
        MemberId::new("owner")
    }

    fn admin_role() -> RoleId {
        RoleId::derive("ADMIN_ROLE")
    }

    fn supervisor_role() -> RoleId {
        RoleId::derive("SUPERVISOR_ROLE")
    }

    fn supervisor_permissions() -> PermissionSet {
        [
            Permission::TokenTransfer,
            Permission::TokenCanManage,
            Permission::CampaignJoin,
            Permission::CampaignRefund,
            Permission::CampaignCanManage,
            Permission::ExchangeAccept,
            Permission::ExchangeRefill,
            Permission::ExchangeCanManage,
        ]
        .into_iter()
        .collect()
    }

    /// Org with the four-role hierarchy from the governance scenario.
    fn org_with_roles() -> AccessGovernor {
        let mut org = AccessGovernor::new(owner(), false, PermissionSet::empty());
        org.add_role(&owner(), admin_role(), RoleId::owner(), PermissionSet::all())
            .unwrap();
        org.add_role(&owner(), supervisor_role(), admin_role(), supervisor_permissions())
            .unwrap();
        org
    }

    /// Org with a joined admin, supervisor, and plain user.
    fn populated_org() -> AccessGovernor {
        let mut org = org_with_roles();
        org.invite(&owner(), &MemberId::new("admin"), admin_role())
            .unwrap();
        org.accept_invite(&MemberId::new("admin")).unwrap();
        org.invite(&MemberId::new("admin"), &MemberId::new("supervisor"), supervisor_role())
            .unwrap();
        org.accept_invite(&MemberId::new("supervisor")).unwrap();
        org.join(&MemberId::new("user")).unwrap();
        org
    }

    #[test]
    fn owner_is_joined_at_top_role_on_creation() {
        let org = AccessGovernor::new(owner(), false, PermissionSet::empty());
        assert_eq!(org.owner(), &owner());
        assert_eq!(org.role_of(&owner()), Some(RoleId::owner()));
        assert_eq!(org.rank_of(&owner()), Some(1));
    }

    #[test]
    fn permissions_count_is_fixed() {
        let org = AccessGovernor::new(owner(), false, PermissionSet::empty());
        assert_eq!(org.permissions_count(), 22);
    }

    #[test]
    fn hierarchy_after_adding_roles() {
        let org = org_with_roles();
        assert_eq!(
            org.role_hierarchy(),
            &[RoleId::user(), supervisor_role(), admin_role(), RoleId::owner()]
        );
    }

    #[test]
    fn only_top_role_may_add_roles() {
        let mut org = populated_org();
        let err = org
            .add_role(
                &MemberId::new("admin"),
                RoleId::derive("MODERATOR_ROLE"),
                supervisor_role(),
                PermissionSet::empty(),
            )
            .unwrap_err();
        assert_eq!(err, GovernanceError::InsufficientRank);
    }

    #[test]
    fn join_rejects_already_joined() {
        let mut org = AccessGovernor::new(owner(), false, PermissionSet::empty());
        assert_eq!(org.join(&owner()).unwrap_err(), GovernanceError::AlreadyJoined);
        org.join(&MemberId::new("user")).unwrap();
        assert_eq!(
            org.join(&MemberId::new("user")).unwrap_err(),
            GovernanceError::AlreadyJoined
        );
    }

    #[test]
    fn invite_only_blocks_plain_join() {
        let mut org = AccessGovernor::new(owner(), false, PermissionSet::empty());
        org.set_invite_only(&owner(), true).unwrap();
        assert_eq!(
            org.join(&MemberId::new("user")).unwrap_err(),
            GovernanceError::InviteRequired
        );
        org.set_invite_only(&owner(), false).unwrap();
        org.join(&MemberId::new("user")).unwrap();
    }

    #[test]
    fn invite_only_allows_join_with_pending_invite() {
        let mut org = org_with_roles();
        org.set_invite_only(&owner(), true).unwrap();
        let bob = MemberId::new("bob");
        org.invite(&owner(), &bob, supervisor_role()).unwrap();
        // Plain join under invite-only: allowed with a pending invite,
        // assigns the base role, invite stays usable.
        org.join(&bob).unwrap();
        assert_eq!(org.role_of(&bob), Some(RoleId::user()));
        org.accept_invite(&bob).unwrap();
        assert_eq!(org.role_of(&bob), Some(supervisor_role()));
    }

    #[test]
    fn set_invite_only_requires_permission() {
        let mut org = AccessGovernor::new(owner(), false, PermissionSet::empty());
        org.join(&MemberId::new("user")).unwrap();
        assert_eq!(
            org.set_invite_only(&MemberId::new("user"), true).unwrap_err(),
            GovernanceError::PermissionDenied
        );
        // Non-members are denied too
        assert_eq!(
            org.set_invite_only(&MemberId::new("stranger"), true).unwrap_err(),
            GovernanceError::PermissionDenied
        );
    }

    #[test]
    fn nobody_may_invite_at_the_top_role() {
        let mut org = org_with_roles();
        let err = org
            .invite(&owner(), &MemberId::new("bob"), RoleId::owner())
            .unwrap_err();
        assert_eq!(err, GovernanceError::InsufficientRank);
        // The reverted invite left nothing to accept
        assert_eq!(
            org.accept_invite(&MemberId::new("bob")).unwrap_err(),
            GovernanceError::NoPendingInvite
        );
    }

    #[test]
    fn invite_requires_rank_strictly_above_proposed_role() {
        let mut org = populated_org();
        // User (rank 0) cannot invite at Supervisor
        assert_eq!(
            org.invite(&MemberId::new("user"), &MemberId::new("bob"), supervisor_role())
                .unwrap_err(),
            GovernanceError::InsufficientRank
        );
        // Admin cannot invite at its own rank
        assert_eq!(
            org.invite(&MemberId::new("admin"), &MemberId::new("bob"), admin_role())
                .unwrap_err(),
            GovernanceError::InsufficientRank
        );
        // Admin can invite below its rank
        org.invite(&MemberId::new("admin"), &MemberId::new("bob"), supervisor_role())
            .unwrap();
    }

    #[test]
    fn invite_rejects_joined_members() {
        let mut org = populated_org();
        assert_eq!(
            org.invite(&owner(), &MemberId::new("user"), supervisor_role())
                .unwrap_err(),
            GovernanceError::AlreadyJoined
        );
    }

    #[test]
    fn invite_overwrites_prior_pending_invite() {
        let mut org = populated_org();
        let bob = MemberId::new("bob");
        org.invite(&MemberId::new("admin"), &bob, supervisor_role())
            .unwrap();
        org.invite(&owner(), &bob, admin_role()).unwrap();
        org.accept_invite(&bob).unwrap();
        assert_eq!(org.role_of(&bob), Some(admin_role()));
    }

    #[test]
    fn invite_with_unknown_role_fails() {
        let mut org = org_with_roles();
        let ghost = RoleId::derive("GHOST_ROLE");
        assert_eq!(
            org.invite(&owner(), &MemberId::new("bob"), ghost).unwrap_err(),
            GovernanceError::UnknownRole(ghost)
        );
    }

    #[test]
    fn promotion_is_two_phase() {
        let mut org = populated_org();
        let user = MemberId::new("user");

        org.modify_rank(&owner(), &user, supervisor_role()).unwrap();
        // Effective role unchanged until acceptance
        assert_eq!(org.role_of(&user), Some(RoleId::user()));
        org.accept_promotion(&user).unwrap();
        assert_eq!(org.role_of(&user), Some(supervisor_role()));

        org.modify_rank(&owner(), &user, admin_role()).unwrap();
        assert_eq!(org.role_of(&user), Some(supervisor_role()));
        org.accept_promotion(&user).unwrap();
        assert_eq!(org.role_of(&user), Some(admin_role()));
    }

    #[test]
    fn refusing_promotion_keeps_current_role() {
        let mut org = populated_org();
        let user = MemberId::new("user");
        org.modify_rank(&owner(), &user, supervisor_role()).unwrap();
        org.refuse_promotion(&user).unwrap();
        assert_eq!(org.role_of(&user), Some(RoleId::user()));
        // Nothing left to accept
        assert_eq!(
            org.accept_promotion(&user).unwrap_err(),
            GovernanceError::NoPendingPromotion
        );
    }

    #[test]
    fn demotion_is_immediate() {
        let mut org = populated_org();
        let supervisor = MemberId::new("supervisor");
        // Multi-level demotion in one call
        org.modify_rank(&owner(), &supervisor, RoleId::user()).unwrap();
        assert_eq!(org.role_of(&supervisor), Some(RoleId::user()));
    }

    #[test]
    fn demotion_clears_pending_promotion() {
        let mut org = populated_org();
        let user = MemberId::new("user");
        org.modify_rank(&owner(), &user, supervisor_role()).unwrap();
        // Demote (same-rank proposal counts as the one-phase path)
        org.modify_rank(&owner(), &user, RoleId::user()).unwrap();
        assert_eq!(
            org.accept_promotion(&user).unwrap_err(),
            GovernanceError::NoPendingPromotion
        );
    }

    #[test]
    fn equal_rank_members_cannot_modify_each_other() {
        let mut org = populated_org();
        let user = MemberId::new("user");
        // Elevate user to admin so it matches the admin's rank
        org.modify_rank(&owner(), &user, admin_role()).unwrap();
        org.accept_promotion(&user).unwrap();

        assert_eq!(
            org.modify_rank(&MemberId::new("admin"), &user, RoleId::user())
                .unwrap_err(),
            GovernanceError::InsufficientRank
        );
        assert_eq!(
            org.kick_member(&MemberId::new("admin"), &user).unwrap_err(),
            GovernanceError::InsufficientRank
        );
    }

    #[test]
    fn proposed_role_may_not_exceed_caller_rank() {
        let mut org = populated_org();
        // Admin (rank 2) cannot propose Owner (rank 3) for anyone
        assert_eq!(
            org.modify_rank(&MemberId::new("admin"), &MemberId::new("user"), RoleId::owner())
                .unwrap_err(),
            GovernanceError::InsufficientRank
        );
    }

    #[test]
    fn accept_refuse_without_pending_promotion_fail() {
        let mut org = populated_org();
        let user = MemberId::new("user");
        assert_eq!(
            org.accept_promotion(&user).unwrap_err(),
            GovernanceError::NoPendingPromotion
        );
        assert_eq!(
            org.refuse_promotion(&user).unwrap_err(),
            GovernanceError::NoPendingPromotion
        );
    }

    #[test]
    fn kicked_member_can_rejoin_as_fresh_user() {
        let mut org = populated_org();
        let supervisor = MemberId::new("supervisor");
        org.kick_member(&owner(), &supervisor).unwrap();
        assert_eq!(org.role_of(&supervisor), None);

        org.join(&supervisor).unwrap();
        assert_eq!(org.role_of(&supervisor), Some(RoleId::user()));
    }

    #[test]
    fn kick_purges_delegated_grants() {
        let mut org = populated_org();
        let supervisor = MemberId::new("supervisor");
        let token = ResourceId::new("token-1");
        org.grant_admin(&owner(), ResourceKind::Token, token.clone(), &supervisor)
            .unwrap();
        assert!(org.is_admin(ResourceKind::Token, &token, &supervisor));

        org.kick_member(&owner(), &supervisor).unwrap();
        org.join(&supervisor).unwrap();
        assert!(!org.is_admin(ResourceKind::Token, &token, &supervisor));
    }

    #[test]
    fn failed_modify_rank_mutates_nothing() {
        let mut org = populated_org();
        let user = MemberId::new("user");
        let events_before = org.events().len();
        let _ = org.modify_rank(&MemberId::new("supervisor"), &MemberId::new("admin"), RoleId::user());
        assert_eq!(org.role_of(&MemberId::new("admin")), Some(admin_role()));
        assert_eq!(org.role_of(&user), Some(RoleId::user()));
        assert_eq!(org.events().len(), events_before);
    }

    #[test]
    fn grant_admin_requires_setadmin_permission() {
        let mut org = populated_org();
        let supervisor = MemberId::new("supervisor");
        // Supervisor holds no setadmin permission for tokens
        assert_eq!(
            org.grant_admin(&supervisor, ResourceKind::Token, ResourceId::new("t"), &supervisor)
                .unwrap_err(),
            GovernanceError::PermissionDenied
        );
        // Neither do plain users
        assert_eq!(
            org.grant_admin(
                &MemberId::new("user"),
                ResourceKind::Exchange,
                ResourceId::new("ex"),
                &supervisor
            )
            .unwrap_err(),
            GovernanceError::PermissionDenied
        );
    }

    #[test]
    fn grant_admin_requires_eligible_grantee() {
        let mut org = populated_org();
        // Plain user lacks TokenCanManage, whoever grants
        assert_eq!(
            org.grant_admin(
                &owner(),
                ResourceKind::Token,
                ResourceId::new("t"),
                &MemberId::new("user")
            )
            .unwrap_err(),
            GovernanceError::PermissionDenied
        );
    }

    #[test]
    fn self_grant_is_always_denied() {
        let mut org = populated_org();
        // Owner holds both setadmin and canmanage, still may not self-grant
        assert_eq!(
            org.grant_admin(&owner(), ResourceKind::Token, ResourceId::new("t"), &owner())
                .unwrap_err(),
            GovernanceError::PermissionDenied
        );
    }

    #[test]
    fn revoke_admin_is_idempotent() {
        let mut org = populated_org();
        let supervisor = MemberId::new("supervisor");
        let ex = ResourceId::new("ex-1");
        org.grant_admin(&owner(), ResourceKind::Exchange, ex.clone(), &supervisor)
            .unwrap();
        org.revoke_admin(&owner(), ResourceKind::Exchange, &ex, &supervisor)
            .unwrap();
        assert!(!org.is_admin(ResourceKind::Exchange, &ex, &supervisor));
        // Revoking again succeeds without effect
        org.revoke_admin(&owner(), ResourceKind::Exchange, &ex, &supervisor)
            .unwrap();
    }

    #[test]
    fn blanket_authority_bypasses_delegation() {
        let org = populated_org();
        let token = ResourceId::new("token-1");
        // Owner and admin hold TokenAll
        assert!(org.is_authorized(&owner(), ResourceKind::Token, &token, Permission::TokenTransfer));
        assert!(org.is_authorized(
            &MemberId::new("admin"),
            ResourceKind::Token,
            &token,
            Permission::TokenTransfer
        ));
        // Supervisor holds the action permission but no grant
        assert!(!org.is_authorized(
            &MemberId::new("supervisor"),
            ResourceKind::Token,
            &token,
            Permission::TokenTransfer
        ));
    }

    #[test]
    fn delegated_grant_authorizes_permitted_actions_only() {
        let mut org = populated_org();
        let supervisor = MemberId::new("supervisor");
        let ex = ResourceId::new("ex-1");
        org.grant_admin(&owner(), ResourceKind::Exchange, ex.clone(), &supervisor)
            .unwrap();

        // Supervisor's role set carries ExchangeAccept and ExchangeRefill
        assert!(org.is_authorized(&supervisor, ResourceKind::Exchange, &ex, Permission::ExchangeAccept));
        assert!(org.is_authorized(&supervisor, ResourceKind::Exchange, &ex, Permission::ExchangeRefill));
        // But not ExchangeCancel — the role permission decides
        assert!(!org.is_authorized(&supervisor, ResourceKind::Exchange, &ex, Permission::ExchangeCancel));
        // And only for the granted instance
        assert!(!org.is_authorized(
            &supervisor,
            ResourceKind::Exchange,
            &ResourceId::new("ex-2"),
            Permission::ExchangeAccept
        ));
    }

    #[test]
    fn non_members_are_never_authorized() {
        let org = populated_org();
        let stranger = MemberId::new("stranger");
        assert!(!org.has_permission(&stranger, Permission::CampaignJoin));
        assert!(!org.is_authorized(
            &stranger,
            ResourceKind::Token,
            &ResourceId::new("t"),
            Permission::TokenTransfer
        ));
        assert_eq!(org.rank_of(&stranger), None);
    }

    #[test]
    fn events_record_operation_order() {
        let mut org = org_with_roles();
        let bob = MemberId::new("bob");
        org.invite(&owner(), &bob, admin_role()).unwrap();
        org.accept_invite(&bob).unwrap();

        let events = org.events();
        assert!(matches!(events[0], GovernanceEvent::RoleAdded { .. }));
        assert!(matches!(events[1], GovernanceEvent::RoleAdded { .. }));
        assert!(matches!(
            events[2],
            GovernanceEvent::InviteIssued { ref invitee, .. } if *invitee == bob
        ));
        assert!(matches!(
            events[3],
            GovernanceEvent::InviteAccepted { ref member, .. } if *member == bob
        ));
    }

    #[test]
    fn orgs_are_fully_isolated() {
        let mut a = AccessGovernor::new(owner(), false, PermissionSet::empty());
        let b = AccessGovernor::new(owner(), true, PermissionSet::empty());
        a.join(&MemberId::new("user")).unwrap();
        assert!(a.role_of(&MemberId::new("user")).is_some());
        assert!(b.role_of(&MemberId::new("user")).is_none());
        assert!(!a.is_invite_only());
        assert!(b.is_invite_only());
    }
}

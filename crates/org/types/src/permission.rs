use serde::{Deserialize, Serialize};

use crate::ids::ResourceKind;

/// One category of privileged operation a role may be allowed to perform.
///
/// The enumeration is fixed: every role carries a bit-set sized
/// [`Permission::COUNT`] over these ordinals, and the operation catalog maps
/// each installed operation name to exactly one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Permission {
    /// Alter the invite-only flag of the org
    InviteSwitch = 0,
    /// Manage all tokens
    TokenAll = 1,
    /// Manage only specific tokens
    TokenSpecific = 2,
    /// Transfer manageable tokens
    TokenTransfer = 3,
    /// Create tokens
    TokenCreate = 4,
    /// Mint manageable tokens
    TokenMint = 5,
    /// Authorize others to use a specific token
    TokenAuth = 6,
    /// Be set as authorized to manage specific tokens
    TokenCanManage = 7,
    /// Create a campaign
    CampaignCreate = 8,
    /// Join a campaign
    CampaignJoin = 9,
    /// Unlock a campaign
    CampaignUnlock = 10,
    /// Refund a campaign
    CampaignRefund = 11,
    /// Stop a campaign
    CampaignStop = 12,
    /// Offer / revoke campaign management privileges to members holding
    /// `CampaignCanManage`
    CampaignSetAdmin = 13,
    /// Be set as campaign manager by members with `CampaignSetAdmin`
    CampaignCanManage = 14,
    /// Create an exchange
    ExchangeCreate = 15,
    /// Cancel an exchange
    ExchangeCancel = 16,
    /// Renew an exchange
    ExchangeRenew = 17,
    /// Accept an exchange
    ExchangeAccept = 18,
    /// Refill an exchange
    ExchangeRefill = 19,
    /// Offer / revoke exchange management privileges to members holding
    /// `ExchangeCanManage`
    ExchangeSetAdmin = 20,
    /// Be set as exchange manager by members with `ExchangeSetAdmin`
    ExchangeCanManage = 21,
}

impl Permission {
    /// Number of permission kinds (the counting-enum pattern).
    pub const COUNT: usize = 22;

    /// All permission kinds in ordinal order.
    pub const ALL: [Permission; Permission::COUNT] = [
        Permission::InviteSwitch,
        Permission::TokenAll,
        Permission::TokenSpecific,
        Permission::TokenTransfer,
        Permission::TokenCreate,
        Permission::TokenMint,
        Permission::TokenAuth,
        Permission::TokenCanManage,
        Permission::CampaignCreate,
        Permission::CampaignJoin,
        Permission::CampaignUnlock,
        Permission::CampaignRefund,
        Permission::CampaignStop,
        Permission::CampaignSetAdmin,
        Permission::CampaignCanManage,
        Permission::ExchangeCreate,
        Permission::ExchangeCancel,
        Permission::ExchangeRenew,
        Permission::ExchangeAccept,
        Permission::ExchangeRefill,
        Permission::ExchangeSetAdmin,
        Permission::ExchangeCanManage,
    ];

    /// Position of this permission in the bit-set.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Blanket role permission granting authority over every instance of a
    /// resource kind. Tokens have a dedicated `TokenAll`; for campaigns and
    /// exchanges the admin-appointment permission doubles as the
    /// owner-tier blanket.
    pub fn blanket_for(kind: ResourceKind) -> Permission {
        match kind {
            ResourceKind::Token => Permission::TokenAll,
            ResourceKind::Campaign => Permission::CampaignSetAdmin,
            ResourceKind::Exchange => Permission::ExchangeSetAdmin,
        }
    }

    /// Role permission required to *receive* a delegated grant for a kind.
    pub fn canmanage_for(kind: ResourceKind) -> Permission {
        match kind {
            ResourceKind::Token => Permission::TokenCanManage,
            ResourceKind::Campaign => Permission::CampaignCanManage,
            ResourceKind::Exchange => Permission::ExchangeCanManage,
        }
    }

    /// Role permission required to *create or revoke* a delegated grant.
    pub fn setadmin_for(kind: ResourceKind) -> Permission {
        match kind {
            ResourceKind::Token => Permission::TokenAuth,
            ResourceKind::Campaign => Permission::CampaignSetAdmin,
            ResourceKind::Exchange => Permission::ExchangeSetAdmin,
        }
    }

    /// Static operation catalog: the permission an installed operation
    /// requires, by operation name. Pure data — the engine itself never
    /// dispatches on operation names.
    pub fn required_for(operation: &str) -> Option<Permission> {
        let permission = match operation {
            "set_invite_only" => Permission::InviteSwitch,
            "create_token" => Permission::TokenCreate,
            "mint_token" => Permission::TokenMint,
            "transfer_token" => Permission::TokenTransfer,
            "authorize_token" => Permission::TokenAuth,
            "create_crowdsale" => Permission::CampaignCreate,
            "join_crowdsale" => Permission::CampaignJoin,
            "unlock_crowdsale" => Permission::CampaignUnlock,
            "refund_crowdsale" => Permission::CampaignRefund,
            "stop_crowdsale" => Permission::CampaignStop,
            "set_crowdsale_admin" => Permission::CampaignSetAdmin,
            "create_exchange" => Permission::ExchangeCreate,
            "cancel_exchange" => Permission::ExchangeCancel,
            "renew_exchange" => Permission::ExchangeRenew,
            "accept_exchange" => Permission::ExchangeAccept,
            "refill_exchange" => Permission::ExchangeRefill,
            "set_exchange_admin" => Permission::ExchangeSetAdmin,
            _ => return None,
        };
        Some(permission)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Fixed-size bit-set over [`Permission`] ordinals.
///
/// O(1) membership tests; exactly [`Permission::COUNT`] meaningful bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(u32);

impl PermissionSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// The set holding every permission kind.
    pub fn all() -> Self {
        Self((1u32 << Permission::COUNT) - 1)
    }

    pub fn insert(&mut self, permission: Permission) {
        self.0 |= 1 << permission.ordinal();
    }

    pub fn remove(&mut self, permission: Permission) {
        self.0 &= !(1 << permission.ordinal());
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0 & (1 << permission.ordinal()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of permissions held.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate held permissions in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

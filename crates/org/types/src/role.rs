use serde::{Deserialize, Serialize};

/// RoleId — 32-byte role tag derived from a human-readable role name.
///
/// The tag, not the name, is the identity: two orgs deriving "ADMIN_ROLE"
/// get the same tag, but each org keeps its own rank and permission set for
/// it. Rank lives in the hierarchy, never in the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId {
    /// Tag bytes — blake3 of the domain-separated role name
    tag: [u8; 32],
}

/// Name of the built-in base role every plain joiner receives.
pub const USER_ROLE: &str = "USER_ROLE";

/// Name of the built-in top role held by the org owner.
pub const OWNER_ROLE: &str = "OWNER_ROLE";

impl RoleId {
    /// Derive a RoleId from a role name.
    pub fn derive(name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        // Domain separation tag
        hasher.update(b"org-role-v1:");
        hasher.update(name.as_bytes());
        Self {
            tag: *hasher.finalize().as_bytes(),
        }
    }

    /// The built-in base role tag.
    pub fn user() -> Self {
        Self::derive(USER_ROLE)
    }

    /// The built-in top role tag.
    pub fn owner() -> Self {
        Self::derive(OWNER_ROLE)
    }

    /// Access the raw tag bytes.
    pub fn tag(&self) -> &[u8; 32] {
        &self.tag
    }

    /// Short display form (first 8 bytes hex).
    pub fn short_tag(&self) -> String {
        hex::encode(&self.tag[..8])
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role:{}", self.short_tag())
    }
}

/// Hex encoding helper (no external dep needed — small utility).
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: &[u8]) -> String {
        let mut s = String::with_capacity(bytes.len() * 2);
        for &b in bytes {
            s.push(HEX_CHARS[(b >> 4) as usize] as char);
            s.push(HEX_CHARS[(b & 0xf) as usize] as char);
        }
        s
    }
}

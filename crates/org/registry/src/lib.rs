//! # org-registry
//!
//! Hosts many independent orgs in one installation. Each org owns its own
//! governor — hierarchy, membership, delegation, event log — and shares no
//! state with any other org.

use std::collections::HashMap;

use org_governance::AccessGovernor;
use org_types::{MemberId, OrgId, PermissionSet};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Construction arguments for one org.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrgConfig {
    /// Identity that receives the top role
    pub owner: MemberId,
    /// Realm label of the hosting installation
    pub realm: String,
    /// Human-readable org name
    pub name: String,
    /// Opaque reference to the physical place the org is anchored to
    pub place_id: String,
    /// Content id of the org description document
    pub description_cid: String,
    pub invite_only: bool,
}

/// One hosted org: its descriptive metadata plus its governor.
pub struct Org {
    config: OrgConfig,
    governor: AccessGovernor,
}

impl Org {
    fn new(config: OrgConfig) -> Self {
        let governor = AccessGovernor::new(
            config.owner.clone(),
            config.invite_only,
            PermissionSet::empty(),
        );
        Self { config, governor }
    }

    pub fn config(&self) -> &OrgConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Read-only access to the governance engine.
    pub fn governor(&self) -> &AccessGovernor {
        &self.governor
    }

    /// Mutating access to the governance engine.
    pub fn governor_mut(&mut self) -> &mut AccessGovernor {
        &mut self.governor
    }
}

/// OrgRegistry — the factory and directory of hosted orgs.
pub struct OrgRegistry {
    name: String,
    realm: String,
    orgs: HashMap<OrgId, Org>,
}

impl OrgRegistry {
    pub fn new(name: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            realm: realm.into(),
            orgs: HashMap::new(),
        }
    }

    /// Create a new isolated org. The configured owner joins immediately at
    /// the top role.
    pub fn create_org(&mut self, config: OrgConfig) -> OrgId {
        let id = OrgId::new();
        info!(org = %id, name = %config.name, owner = %config.owner, "Org registered");
        self.orgs.insert(id, Org::new(config));
        id
    }

    pub fn get(&self, id: &OrgId) -> Option<&Org> {
        self.orgs.get(id)
    }

    pub fn get_mut(&mut self, id: &OrgId) -> Option<&mut Org> {
        self.orgs.get_mut(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn len(&self) -> usize {
        self.orgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orgs.is_empty()
    }
}

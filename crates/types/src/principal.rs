use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Role;

/// The verified identity the edge hands to the core: `{id, email, roles}`.
/// The core never re-validates the token that produced this — only its
/// claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

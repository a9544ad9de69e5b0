use uuid::Uuid;

use super::{evaluate, Action, ResourceOwner, Role};

/// The authenticated identity making a request. The role is loaded fresh
/// from storage for every request, never cached in the token.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Convenience wrapper over [`evaluate`] for this actor.
    pub fn can(&self, action: Action, owner: ResourceOwner) -> bool {
        evaluate(self.role, self.id, action, owner)
    }
}

use uuid::Uuid;

use super::{Action, Role};

/// The user identity a resource is attributed to, as seen by the decision
/// engine. `Unspecified` is a first-class value: a create request with no
/// explicit target owner evaluates differently from one that names an
/// owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOwner {
    Unspecified,
    User(Uuid),
}

impl ResourceOwner {
    pub fn is(&self, id: Uuid) -> bool {
        matches!(self, ResourceOwner::User(owner) if *owner == id)
    }
}

impl From<Option<Uuid>> for ResourceOwner {
    fn from(value: Option<Uuid>) -> Self {
        match value {
            Some(id) => ResourceOwner::User(id),
            None => ResourceOwner::Unspecified,
        }
    }
}

/// Decide whether `actor_id` acting as `role` may perform `action` on a
/// resource attributed to `owner`.
///
/// Decision table:
///
/// | Role   | Create          | Read  | Update       | Delete       |
/// |--------|-----------------|-------|--------------|--------------|
/// | Admin  | allow           | allow | allow        | allow        |
/// | Editor | deny            | allow | allow        | deny         |
/// | Viewer | self/unspecified| allow | owner == self| owner == self|
///
/// Editor's inability to delete even its own articles is intentional
/// policy, not an oversight. Every arm is explicit; there is no fallback
/// allow branch.
pub fn evaluate(role: Role, actor_id: Uuid, action: Action, owner: ResourceOwner) -> bool {
    let allowed = match role {
        Role::Admin => true,
        Role::Editor => matches!(action, Action::Read | Action::Update),
        Role::Viewer => match action {
            Action::Read => true,
            Action::Create => matches!(owner, ResourceOwner::Unspecified) || owner.is(actor_id),
            Action::Update | Action::Delete => owner.is(actor_id),
        },
    };

    tracing::debug!(
        role = %role,
        actor_id = %actor_id,
        action = ?action,
        owner = ?owner,
        allowed,
        "permission evaluated"
    );

    allowed
}

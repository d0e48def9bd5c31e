//! Record-level authorization.
//!
//! Seniority alone is never sufficient: actions across different agent
//! affiliations are denied regardless of role, and a non-active actor
//! cannot act on anyone but themselves.

use super::hierarchy::RoleHierarchy;
use crate::domain::user::{User, UserStatus};

pub struct AccessPolicy;

impl AccessPolicy {
    /// Whether `actor` may perform a record-scoped action on `target`.
    ///
    /// Self-access is always allowed. Otherwise the actor must be senior,
    /// active, and share the target's agent affiliation (two unset agent
    /// ids count as the same affiliation).
    pub fn can_access(actor: &User, target: &User) -> bool {
        if actor.id == target.id {
            return true;
        }

        let senior = RoleHierarchy::is_senior(actor.role_id, target.role_id);

        if actor.agent_id == target.agent_id {
            return senior && actor.status == UserStatus::Active;
        }

        false
    }

    /// Whether an actor may assign `new_role_id` to a user. Prevents
    /// escalation at or above the actor's own seniority; there is no
    /// self-assignment special case.
    pub fn can_assign_role(actor_role_id: i32, new_role_id: i32) -> bool {
        RoleHierarchy::is_senior(actor_role_id, new_role_id)
    }

    // Per-action hooks. All four currently collapse to `can_access`;
    // they are kept separate so per-action rules can diverge without
    // touching callers.

    pub fn can_view(actor: &User, target: &User) -> bool {
        Self::can_access(actor, target)
    }

    pub fn can_edit(actor: &User, target: &User) -> bool {
        Self::can_access(actor, target)
    }

    pub fn can_delete(actor: &User, target: &User) -> bool {
        Self::can_access(actor, target)
    }

    pub fn can_approve(actor: &User, target: &User) -> bool {
        Self::can_access(actor, target)
    }
}

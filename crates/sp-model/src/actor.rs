// actor.rs — Actor identity as resolved by the portal's auth layer.
//
// The core never authenticates anyone. The surrounding portal resolves the
// session to an actor id plus exactly one role and passes both into every
// call, so the core is testable without a simulated session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The single role an actor holds for workflow purposes.
///
/// The portal's richer permission matrix collapses to three tiers here:
/// whoever can file entries, whoever owns the director review queue, and
/// whoever holds admin-or-above authority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Files entries; owns no review queue.
    Submitter,
    /// Owns the director review queue (first approval gate).
    Director,
    /// Admin or above; owns the final approval gate.
    Admin,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRole::Submitter => write!(f, "submitter"),
            ActorRole::Director => write!(f, "director"),
            ActorRole::Admin => write!(f, "admin"),
        }
    }
}

/// An already-authenticated actor: identity for audit stamps, role for
/// transition gating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Opaque identity reference (stamped into audit fields).
    pub actor_id: String,
    /// The actor's resolved role.
    pub role: ActorRole,
}

impl Actor {
    pub fn new(actor_id: impl Into<String>, role: ActorRole) -> Self {
        Self {
            actor_id: actor_id.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_uses_snake_case_names() {
        assert_eq!(ActorRole::Submitter.to_string(), "submitter");
        assert_eq!(ActorRole::Director.to_string(), "director");
        assert_eq!(ActorRole::Admin.to_string(), "admin");
    }

    #[test]
    fn role_serialization_matches_display() {
        let json = serde_json::to_string(&ActorRole::Director).unwrap();
        assert_eq!(json, "\"director\"");
        let restored: ActorRole = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ActorRole::Director);
    }
}

//! Player actions and the action history.
//!
//! A `PlayerAction` is the verb plus its entity pointers: the card being
//! played, the enemy being targeted, the resource being spent. Automated
//! drivers enumerate them through `RulesEngine::legal_actions`.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::resources::ResourceType;

/// A complete player action.
///
/// ```
/// use longwar_combat::core::{EntityId, PlayerAction};
///
/// let strike = PlayerAction::play(EntityId(12), Some(EntityId(3)));
/// assert_eq!(strike.card(), Some(EntityId(12)));
/// assert_eq!(PlayerAction::EndTurn.card(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Play a card from hand, optionally at a chosen enemy.
    PlayCard {
        card: EntityId,
        target: Option<EntityId>,
    },

    /// Spend energy and resource on a baseline ability.
    UseBaseline {
        resource: ResourceType,
        target: Option<EntityId>,
    },

    /// End the player turn; the enemy turn resolves immediately.
    EndTurn,

    /// Withdraw from combat.
    Retreat,
}

impl PlayerAction {
    /// Play a card.
    #[must_use]
    pub fn play(card: EntityId, target: Option<EntityId>) -> Self {
        Self::PlayCard { card, target }
    }

    /// Use a baseline ability.
    #[must_use]
    pub fn baseline(resource: ResourceType, target: Option<EntityId>) -> Self {
        Self::UseBaseline { resource, target }
    }

    /// The card pointer, if this action plays one.
    #[must_use]
    pub fn card(&self) -> Option<EntityId> {
        match self {
            Self::PlayCard { card, .. } => Some(*card),
            _ => None,
        }
    }

    /// The target pointer, if any.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Self::PlayCard { target, .. } | Self::UseBaseline { target, .. } => *target,
            _ => None,
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging: feeding the recorded actions back into a
/// session built from the same seed reproduces the encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: PlayerAction,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: PlayerAction, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            turn,
            sequence,
        }
    }
}

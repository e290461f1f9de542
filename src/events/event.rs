//! Combat events.
//!
//! Every observable mutation appends a `CombatEvent` to the session log.
//! Presentation layers drain the log to drive animation and floating text;
//! tests read it to check ordering. Events are data only and never feed
//! back into the rules.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::combatants::IntentKind;
use crate::core::entity::EntityId;
use crate::core::resources::ResourceType;
use crate::core::state::CombatPhase;
use crate::effects::status::StatusKind;

/// Why HP was lost outside the damage primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HpLossCause {
    Poison,
    SelfDamage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    // === Lifecycle ===
    CombatStarted {
        heroes: usize,
        enemies: usize,
        cards: usize,
    },
    TurnStarted {
        turn: u32,
    },
    PhaseChanged {
        from: CombatPhase,
        to: CombatPhase,
    },
    RetreatBegan,

    // === Piles ===
    Reshuffled {
        cards: usize,
    },
    CardDrawn {
        card: EntityId,
        owner: EntityId,
    },
    /// A dead hero's card skipped the hand.
    CardRedirected {
        card: EntityId,
        owner: EntityId,
    },
    CardPlayed {
        card: EntityId,
        card_id: CardId,
        owner: EntityId,
        energy_spent: u32,
    },
    CardDiscarded {
        card: EntityId,
    },
    CardExhausted {
        card: EntityId,
    },
    HandDiscarded {
        cards: usize,
    },

    // === Combatants ===
    Damaged {
        source: Option<EntityId>,
        target: EntityId,
        blocked: i64,
        hp_lost: i64,
        lethal: bool,
    },
    HpLost {
        target: EntityId,
        amount: i64,
        cause: HpLossCause,
    },
    Healed {
        target: EntityId,
        amount: i64,
    },
    BlockGained {
        target: EntityId,
        amount: i64,
    },
    StatusApplied {
        target: EntityId,
        kind: StatusKind,
        stacks: i64,
        duration: Option<u32>,
    },
    StatusRemoved {
        target: EntityId,
        kind: StatusKind,
    },

    // === Economy ===
    EnergySpent {
        amount: u32,
        remaining: u32,
    },
    ResourceChanged {
        resource: ResourceType,
        delta: i64,
        total: u32,
    },
    BaselineUsed {
        resource: ResourceType,
    },
    DiscountGranted {
        amount: u32,
    },

    // === Gadgets ===
    GadgetDeployed {
        name: String,
        owner: EntityId,
        turns: u32,
    },
    GadgetExpired {
        name: String,
    },

    // === Enemies ===
    EnemyActed {
        enemy: EntityId,
        ability: String,
        kind: IntentKind,
    },
    IntentDeclared {
        enemy: EntityId,
        kind: IntentKind,
        value: Option<i64>,
    },
    Summoned {
        summoner: EntityId,
        enemy: EntityId,
    },
}

impl CombatEvent {
    /// The combatant this event happened to, if any.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        match self {
            Self::Damaged { target, .. }
            | Self::HpLost { target, .. }
            | Self::Healed { target, .. }
            | Self::BlockGained { target, .. }
            | Self::StatusApplied { target, .. }
            | Self::StatusRemoved { target, .. } => Some(*target),
            Self::EnemyActed { enemy, .. }
            | Self::IntentDeclared { enemy, .. }
            | Self::Summoned { enemy, .. } => Some(*enemy),
            _ => None,
        }
    }
}

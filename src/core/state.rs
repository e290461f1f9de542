//! Combat session: the aggregate that owns an encounter.
//!
//! ## CombatSession
//!
//! Owns everything a single encounter mutates:
//! - Heroes and enemies in list order
//! - The four card piles
//! - Resource pool, energy, turn counter and phase
//! - Active gadgets and the next-card discount
//! - The seeded RNG and the id allocator
//! - The event log and the player action history
//!
//! Operations live next to the rules they implement (`effects::resolver`,
//! `rules::scheduler`, `rules::baseline`) as `impl CombatSession` blocks.
//! This module holds construction, queries and the shared mutation
//! primitives those operations build on.
//!
//! ## Snapshots
//!
//! The session is `Clone` (persistent piles and logs make this cheap) and
//! `snapshot_bytes` gives a canonical bincode encoding. A rejected action
//! leaves the snapshot unchanged.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::CombatConfig;
use super::entity::{EntityAllocator, EntityId};
use super::resources::{ResourcePool, ResourceType};
use super::rng::CombatRng;
use crate::cards::CardInstance;
use crate::combatants::{Combatant, DamageReport, Enemy, Hero};
use crate::effects::status::{DecayPass, StatusEffect};
use crate::effects::{CardEffect, GadgetSpec};
use crate::events::{CombatEvent, HpLossCause};
use crate::zones::{CardPiles, DrawStep};

/// Turn phase. `Victory`, `Defeat` and `Retreat` are absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatPhase {
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
    Retreat,
}

impl CombatPhase {
    /// Whether the encounter is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Retreat)
    }
}

impl std::fmt::Display for CombatPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Why an action was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    WrongPhase,
    CardNotInHand,
    InsufficientEnergy,
    InsufficientResource,
    OwnerDefeated,
    PlayGuardUnmet,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::WrongPhase => "not the player turn",
            Self::CardNotInHand => "card is not in hand",
            Self::InsufficientEnergy => "not enough energy",
            Self::InsufficientResource => "not enough resource",
            Self::OwnerDefeated => "card owner is defeated",
            Self::PlayGuardUnmet => "play condition not met",
        };
        f.write_str(reason)
    }
}

/// Result of a player operation.
///
/// A rejected action changed nothing: no RNG draw, no event, no history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Applied { phase: CombatPhase },
    Rejected(Rejection),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            Self::Applied { .. } => None,
        }
    }
}

/// A deployed gadget ticking on the player's side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GadgetInstance {
    pub name: String,
    pub owner: EntityId,
    pub turns_remaining: u32,
    /// Block is granted at player turn start, damage fires at player turn end.
    pub per_turn: CardEffect,
}

impl GadgetInstance {
    #[must_use]
    pub fn deploy(spec: &GadgetSpec, owner: EntityId) -> Self {
        Self {
            name: spec.name.clone(),
            owner,
            turns_remaining: spec.duration,
            per_turn: spec.per_turn.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatSession {
    // === Combatants ===
    pub(crate) heroes: Vec<Hero>,
    pub(crate) enemies: Vec<Enemy>,

    // === Cards ===
    pub(crate) piles: CardPiles,

    // === Economy ===
    pub(crate) resources: ResourcePool,
    pub(crate) energy: u32,
    pub(crate) next_card_discount: u32,

    // === Progression ===
    pub(crate) turn: u32,
    pub(crate) phase: CombatPhase,
    pub(crate) cards_played_this_turn: u32,
    pub(crate) gadgets: Vec<GadgetInstance>,

    pub(crate) config: CombatConfig,
    pub(crate) rng: CombatRng,
    pub(crate) ids: EntityAllocator,

    // === Records ===
    pub(crate) events: Vector<CombatEvent>,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) sequence: u32,
}

impl CombatSession {
    /// Set up an encounter.
    ///
    /// Every hero's deck and trauma cards are merged into one shuffled draw
    /// pile and all statuses are cleared. The session starts in `PlayerTurn`
    /// at turn 0 with an empty hand; call `start_player_turn` to deal the
    /// first hand.
    ///
    /// Panics if either side is empty.
    #[must_use]
    pub fn new(mut heroes: Vec<Hero>, mut enemies: Vec<Enemy>, config: CombatConfig, mut rng: CombatRng) -> Self {
        assert!(!heroes.is_empty(), "Combat needs at least one hero");
        assert!(!enemies.is_empty(), "Combat needs at least one enemy");

        for hero in &mut heroes {
            hero.combatant.statuses.clear();
        }
        for enemy in &mut enemies {
            enemy.combatant.statuses.clear();
        }

        let mut deck: Vec<CardInstance> = heroes.iter().flat_map(|h| h.all_cards().cloned()).collect();
        rng.shuffle(&mut deck);

        let ids = EntityAllocator::after(
            heroes
                .iter()
                .map(Hero::id)
                .chain(enemies.iter().map(Enemy::id))
                .chain(deck.iter().map(|c| c.instance_id)),
        );

        let started = CombatEvent::CombatStarted {
            heroes: heroes.len(),
            enemies: enemies.len(),
            cards: deck.len(),
        };

        let mut session = Self {
            heroes,
            enemies,
            piles: CardPiles::new(deck),
            resources: ResourcePool::new(),
            energy: config.max_energy,
            next_card_discount: 0,
            turn: 0,
            phase: CombatPhase::PlayerTurn,
            cards_played_this_turn: 0,
            gadgets: Vec::new(),
            config,
            rng,
            ids,
            events: Vector::new(),
            history: Vector::new(),
            sequence: 0,
        };
        session.emit(started);
        session
    }

    /// Start from a pre-filled pool (the mission layer carries resources
    /// between encounters).
    #[must_use]
    pub fn with_resources(mut self, resources: ResourcePool) -> Self {
        self.resources = resources;
        self
    }

    // === Queries ===

    #[must_use]
    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[must_use]
    pub fn hero(&self, id: EntityId) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id() == id)
    }

    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    /// Look up a hero or enemy.
    #[must_use]
    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.hero(id)
            .map(|h| &h.combatant)
            .or_else(|| self.enemy(id).map(|e| &e.combatant))
    }

    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        self.piles.hand()
    }

    #[must_use]
    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    #[must_use]
    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Cost reduction waiting for the next card played this turn.
    #[must_use]
    pub fn next_card_discount(&self) -> u32 {
        self.next_card_discount
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    #[must_use]
    pub fn cards_played_this_turn(&self) -> u32 {
        self.cards_played_this_turn
    }

    #[must_use]
    pub fn gadgets(&self) -> &[GadgetInstance] {
        &self.gadgets
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &CombatRng {
        &self.rng
    }

    /// Everything that happened so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &Vector<CombatEvent> {
        &self.events
    }

    /// Take the event log, leaving it empty.
    pub fn drain_events(&mut self) -> Vector<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Applied player actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Ids of living heroes in list order.
    #[must_use]
    pub fn living_heroes(&self) -> Vec<EntityId> {
        self.heroes.iter().filter(|h| h.is_alive()).map(Hero::id).collect()
    }

    /// Ids of living enemies in list order.
    #[must_use]
    pub fn living_enemies(&self) -> Vec<EntityId> {
        self.enemies.iter().filter(|e| e.is_alive()).map(Enemy::id).collect()
    }

    /// Canonical encoding of the whole session.
    pub fn snapshot_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Evaluate the end conditions and move to a terminal phase if one holds.
    ///
    /// Victory is checked before Defeat. Terminal phases never change.
    pub fn check_combat_end(&mut self) -> CombatPhase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        if self.enemies.iter().all(|e| !e.is_alive()) {
            self.set_phase(CombatPhase::Victory);
        } else if self.heroes.iter().all(|h| !h.is_alive()) {
            self.set_phase(CombatPhase::Defeat);
        }
        self.phase
    }

    // === Shared mutation primitives ===

    pub(crate) fn emit(&mut self, event: CombatEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn record(&mut self, action: super::action::PlayerAction) {
        let record = ActionRecord::new(action, self.turn, self.sequence);
        self.sequence += 1;
        self.history.push_back(record);
    }

    pub(crate) fn set_phase(&mut self, to: CombatPhase) {
        if self.phase != to {
            let from = std::mem::replace(&mut self.phase, to);
            self.emit(CombatEvent::PhaseChanged { from, to });
        }
    }

    pub(crate) fn hero_mut(&mut self, id: EntityId) -> Option<&mut Hero> {
        self.heroes.iter_mut().find(|h| h.id() == id)
    }

    pub(crate) fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id() == id)
    }

    pub(crate) fn combatant_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        if let Some(pos) = self.heroes.iter().position(|h| h.id() == id) {
            return Some(&mut self.heroes[pos].combatant);
        }
        self.enemy_mut(id).map(|e| &mut e.combatant)
    }

    /// Run the shared damage primitive against a combatant.
    pub(crate) fn deal_damage(&mut self, source: Option<EntityId>, target: EntityId, amount: i64) -> DamageReport {
        let vulnerable = self.config.vulnerable;
        let Some(combatant) = self.combatant_mut(target) else {
            return DamageReport::default();
        };
        let report = combatant.take_damage(amount, vulnerable);
        self.emit(CombatEvent::Damaged {
            source,
            target,
            blocked: report.blocked,
            hp_lost: report.hp_lost,
            lethal: report.lethal,
        });
        report
    }

    /// Remove HP directly (poison, self-damage).
    pub(crate) fn lose_hp(&mut self, target: EntityId, amount: i64, cause: HpLossCause) -> i64 {
        let lost = self.combatant_mut(target).map_or(0, |c| c.lose_hp(amount));
        if lost > 0 {
            self.emit(CombatEvent::HpLost { target, amount: lost, cause });
        }
        lost
    }

    pub(crate) fn heal(&mut self, target: EntityId, amount: i64) -> i64 {
        let healed = self.combatant_mut(target).map_or(0, |c| c.heal(amount));
        if healed > 0 {
            self.emit(CombatEvent::Healed { target, amount: healed });
        }
        healed
    }

    pub(crate) fn grant_block(&mut self, target: EntityId, amount: i64) -> i64 {
        let gained = self.combatant_mut(target).map_or(0, |c| c.gain_block(amount));
        if gained > 0 {
            self.emit(CombatEvent::BlockGained { target, amount: gained });
        }
        gained
    }

    pub(crate) fn apply_status(&mut self, target: EntityId, status: StatusEffect) {
        if status.stacks < 1 {
            return;
        }
        let Some(combatant) = self.combatant_mut(target) else {
            return;
        };
        combatant.statuses.apply(status);
        self.emit(CombatEvent::StatusApplied {
            target,
            kind: status.kind,
            stacks: status.stacks,
            duration: status.duration,
        });
    }

    pub(crate) fn remove_status(&mut self, target: EntityId, kind: crate::effects::status::StatusKind) {
        let removed = self
            .combatant_mut(target)
            .and_then(|c| c.statuses.remove(kind))
            .is_some();
        if removed {
            self.emit(CombatEvent::StatusRemoved { target, kind });
        }
    }

    /// Decay every status on a combatant, logging removals.
    pub(crate) fn decay_statuses(&mut self, target: EntityId, pass: DecayPass) {
        let removed = self.combatant_mut(target).map(|c| c.statuses.decay(pass)).unwrap_or_default();
        for kind in removed {
            self.emit(CombatEvent::StatusRemoved { target, kind });
        }
    }

    /// Apply a signed resource change; consumption stops at zero.
    pub(crate) fn change_resource(&mut self, resource: ResourceType, delta: i64) -> i64 {
        let applied = self.resources.apply_delta(resource, delta);
        if applied != 0 {
            self.emit(CombatEvent::ResourceChanged {
                resource,
                delta: applied,
                total: self.resources.get(resource),
            });
        }
        applied
    }

    pub(crate) fn spend_energy(&mut self, amount: u32) {
        debug_assert!(amount <= self.energy, "Energy debit exceeds balance");
        self.energy = self.energy.saturating_sub(amount);
        if amount > 0 {
            self.emit(CombatEvent::EnergySpent {
                amount,
                remaining: self.energy,
            });
        }
    }

    /// Draw cards into hand, reshuffling discard as needed.
    pub(crate) fn draw_cards(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let heroes = &self.heroes;
        let steps = self.piles.draw(count, &mut self.rng, |owner| {
            heroes.iter().any(|h| h.id() == owner && h.is_alive())
        });

        let mut drawn = 0;
        for step in steps {
            let event = match step {
                DrawStep::Reshuffled { cards } => CombatEvent::Reshuffled { cards },
                DrawStep::Drawn { card, owner } => {
                    drawn += 1;
                    CombatEvent::CardDrawn { card, owner }
                }
                DrawStep::Redirected { card, owner } => CombatEvent::CardRedirected { card, owner },
            };
            self.emit(event);
        }
        drawn
    }

    /// Allocate an id for a combatant or card created mid-combat.
    pub(crate) fn alloc_id(&mut self) -> EntityId {
        self.ids.alloc()
    }

    /// Check that every structural invariant holds.
    pub fn debug_check(&self) {
        if cfg!(debug_assertions) {
            self.piles.debug_check();
            for combatant in self
                .heroes
                .iter()
                .map(|h| &h.combatant)
                .chain(self.enemies.iter().map(|e| &e.combatant))
            {
                assert!(
                    (0..=combatant.max_hp()).contains(&combatant.hp()),
                    "{} has HP outside [0, max]",
                    combatant.name
                );
                assert!(
                    combatant.statuses.iter().all(|s| s.stacks >= 1),
                    "{} carries an empty status entry",
                    combatant.name
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardRarity, CardType, HeroClass};
    use crate::combatants::{EnemyAbility, Faction, IntentKind};
    use crate::effects::status::StatusKind;
    use crate::effects::DamageSpec;

    fn session() -> CombatSession {
        let mut rng = CombatRng::new(7);
        let mut hero = Hero::new(EntityId(1), "Titan", HeroClass::Brute, 90);
        for i in 0..6 {
            hero.add_card(CardInstance::new(
                EntityId(10 + i),
                EntityId(1),
                CardDefinition::new("strike", "Strike", CardType::Attack, CardRarity::Basic, 1),
            ));
        }
        let enemy = Enemy::new(
            Combatant::new(EntityId(2), "Drone", 10),
            Faction::Swarm,
            false,
            vec![EnemyAbility::new("Bite", IntentKind::Attack, 1, CardEffect::new().damage(DamageSpec::flat(4)))],
            &mut rng,
        );
        CombatSession::new(vec![hero], vec![enemy], CombatConfig::default(), rng)
    }

    #[test]
    fn test_new_session() {
        let session = session();

        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(session.turn(), 0);
        assert_eq!(session.piles().draw_pile().len(), 6);
        assert!(session.hand().is_empty());
        assert_eq!(session.events().len(), 1);
    }

    #[test]
    fn test_allocator_continues_after_existing_ids() {
        let mut session = session();
        assert_eq!(session.alloc_id(), EntityId(16));
    }

    #[test]
    fn test_phase_terminal() {
        assert!(!CombatPhase::PlayerTurn.is_terminal());
        assert!(!CombatPhase::EnemyTurn.is_terminal());
        assert!(CombatPhase::Victory.is_terminal());
        assert!(CombatPhase::Defeat.is_terminal());
        assert!(CombatPhase::Retreat.is_terminal());
    }

    #[test]
    fn test_combat_end_check() {
        let mut session = session();
        assert_eq!(session.check_combat_end(), CombatPhase::PlayerTurn);

        session.deal_damage(None, EntityId(2), 50);
        assert_eq!(session.check_combat_end(), CombatPhase::Victory);

        // Absorbing
        session.deal_damage(None, EntityId(1), 500);
        assert_eq!(session.check_combat_end(), CombatPhase::Victory);
    }

    #[test]
    fn test_defeat_when_heroes_fall() {
        let mut session = session();
        session.lose_hp(EntityId(1), 90, HpLossCause::SelfDamage);
        assert_eq!(session.check_combat_end(), CombatPhase::Defeat);
    }

    #[test]
    fn test_status_and_block_primitives() {
        let mut session = session();
        session.grant_block(EntityId(1), 5);
        session.apply_status(EntityId(1), StatusEffect::new(StatusKind::Weak, 0));

        let hero = session.combatant(EntityId(1)).unwrap();
        assert_eq!(hero.block(), 5);
        assert!(!hero.statuses.has(StatusKind::Weak));

        let report = session.deal_damage(Some(EntityId(2)), EntityId(1), 9);
        assert_eq!(report.blocked, 5);
        assert_eq!(report.hp_lost, 4);
        assert_eq!(session.combatant(EntityId(1)).unwrap().block(), 0);
    }

    #[test]
    fn test_drain_events() {
        let mut session = session();
        let drained = session.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_snapshot_is_stable() {
        let session = session();
        let copy = session.clone();
        assert_eq!(session.snapshot_bytes().unwrap(), copy.snapshot_bytes().unwrap());
    }
}

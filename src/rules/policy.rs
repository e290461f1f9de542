//! Automated play.
//!
//! A `PlayPolicy` picks one of the legal actions; `play_out` drives a
//! session with it until the encounter ends or an action budget runs out.
//! Policies draw from their own RNG so the session's stream only moves
//! with the rules.

use crate::core::{CombatRng, CombatSession, PlayerAction};

use super::engine::{CombatOutcome, RulesEngine};

/// Chooses among legal actions.
pub trait PlayPolicy {
    /// Index into `actions`, which is never empty.
    fn choose(&self, session: &CombatSession, actions: &[PlayerAction], rng: &mut CombatRng) -> usize;
}

/// Uniformly random action selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl PlayPolicy for RandomPolicy {
    fn choose(&self, _session: &CombatSession, actions: &[PlayerAction], rng: &mut CombatRng) -> usize {
        rng.gen_index(actions.len())
    }
}

/// Play every card it can, then end the turn. Never retreats.
#[derive(Clone, Copy, Debug, Default)]
pub struct AggressivePolicy;

impl PlayPolicy for AggressivePolicy {
    fn choose(&self, _session: &CombatSession, actions: &[PlayerAction], rng: &mut CombatRng) -> usize {
        let plays: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, a)| matches!(a, PlayerAction::PlayCard { .. } | PlayerAction::UseBaseline { .. }))
            .map(|(i, _)| i)
            .collect();
        match rng.choose(&plays) {
            Some(&index) => index,
            None => actions
                .iter()
                .position(|a| *a == PlayerAction::EndTurn)
                .unwrap_or(0),
        }
    }
}

/// Drive a session until it ends or `max_actions` actions were applied.
///
/// Starts the opening turn if it has not been dealt yet.
pub fn play_out<E: RulesEngine, P: PlayPolicy>(
    engine: &mut E,
    session: &mut CombatSession,
    policy: &P,
    rng: &mut CombatRng,
    max_actions: usize,
) -> Option<CombatOutcome> {
    if session.turn() == 0 {
        session.start_player_turn();
    }

    for _ in 0..max_actions {
        if let Some(outcome) = engine.is_terminal(session) {
            return Some(outcome);
        }

        let actions = engine.legal_actions(session);
        if actions.is_empty() {
            return None;
        }

        let index = policy.choose(session, &actions, rng);
        engine.apply_action(session, &actions[index]);
    }

    engine.is_terminal(session)
}

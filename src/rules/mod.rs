//! Combat rules.
//!
//! - `scheduler`: turn start, turn end, the enemy turn, retreat
//! - `enemy_ai`: how a declared enemy intent resolves
//! - `baseline`: resource-for-effect abilities outside the card system
//! - `engine`: the `RulesEngine` trait for automated drivers
//! - `policy`: action selection and whole-encounter playouts
//!
//! Card resolution lives in `effects::resolver`.

mod baseline;
mod enemy_ai;
pub mod engine;
pub mod policy;
mod scheduler;

pub use engine::{CombatOutcome, CombatRules, RulesEngine};
pub use policy::{play_out, AggressivePolicy, PlayPolicy, RandomPolicy};

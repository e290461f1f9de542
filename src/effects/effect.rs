//! Effect definitions.
//!
//! A `CardEffect` is an ordered pipeline of `EffectPrimitive`s plus an
//! exhaust flag. Each primitive belongs to a resolution `Stage`; the resolver
//! walks the stages in a fixed order, so the order primitives are listed in
//! only matters between primitives of the same stage.
//!
//! The same shape is reused for gadget per-turn effects and enemy abilities.

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::status::StatusEffect;
use crate::core::{ResourcePool, ResourceType};

/// `pool[resource] * multiplier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scaling {
    pub resource: ResourceType,
    pub multiplier: i64,
}

impl Scaling {
    /// Bonus for the current pool.
    #[must_use]
    pub fn amount(&self, pool: &ResourcePool) -> i64 {
        i64::from(pool.get(self.resource)) * self.multiplier
    }
}

/// Per-card conditional damage adjustment.
///
/// Add and Replace are separate variants because cards disagree on whether a
/// conditional damage value stacks with the base or overrides it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModifier {
    /// `+ amount` if the condition holds.
    Add { condition: Condition, amount: i64 },

    /// The pre-Strength value becomes `amount` if the condition holds.
    Replace { condition: Condition, amount: i64 },

    /// `+ amount * (cards played this turn - 1)`.
    PerCardPlayedBefore(i64),

    /// Multiplies the pre-Strength value by the active gadget count.
    PerActiveGadget,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageSpec {
    pub base: i64,
    pub scaling: Option<Scaling>,
    /// Hit every living enemy instead of one target.
    pub area: bool,
    pub modifier: Option<DamageModifier>,
}

impl DamageSpec {
    #[must_use]
    pub fn flat(base: i64) -> Self {
        Self {
            base,
            scaling: None,
            area: false,
            modifier: None,
        }
    }

    #[must_use]
    pub fn scaled(mut self, resource: ResourceType, multiplier: i64) -> Self {
        self.scaling = Some(Scaling { resource, multiplier });
        self
    }

    #[must_use]
    pub fn to_all(mut self) -> Self {
        self.area = true;
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: DamageModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Flat plus scaling, ignoring modifiers. Used for gadget volleys.
    #[must_use]
    pub fn unmodified(&self, pool: &ResourcePool) -> i64 {
        self.base + self.scaling.map_or(0, |s| s.amount(pool))
    }
}

/// An amount granted only when a condition holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionalBonus {
    pub condition: Condition,
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockSpec {
    pub base: i64,
    pub scaling: Option<Scaling>,
    pub bonus: Option<ConditionalBonus>,
}

impl BlockSpec {
    #[must_use]
    pub fn flat(base: i64) -> Self {
        Self {
            base,
            scaling: None,
            bonus: None,
        }
    }

    #[must_use]
    pub fn scaled(mut self, resource: ResourceType, multiplier: i64) -> Self {
        self.scaling = Some(Scaling { resource, multiplier });
        self
    }

    #[must_use]
    pub fn with_bonus(mut self, condition: Condition, amount: i64) -> Self {
        self.bonus = Some(ConditionalBonus { condition, amount });
        self
    }

    /// Flat plus scaling, ignoring the conditional bonus.
    #[must_use]
    pub fn unmodified(&self, pool: &ResourcePool) -> i64 {
        self.base + self.scaling.map_or(0, |s| s.amount(pool))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawSpec {
    pub base: usize,
    pub scaling: Option<Scaling>,
    /// Cap on the scaled bonus. `None` uses the configured default.
    pub cap: Option<usize>,
}

impl DrawSpec {
    #[must_use]
    pub fn flat(base: usize) -> Self {
        Self {
            base,
            scaling: None,
            cap: None,
        }
    }

    #[must_use]
    pub fn scaled(mut self, resource: ResourceType, multiplier: i64, cap: Option<usize>) -> Self {
        self.scaling = Some(Scaling { resource, multiplier });
        self.cap = cap;
        self
    }

    /// Total cards to draw.
    #[must_use]
    pub fn count(&self, pool: &ResourcePool, default_cap: usize) -> usize {
        let bonus = self.scaling.map_or(0, |s| s.amount(pool).max(0));
        let bonus = usize::try_from(bonus).unwrap_or(usize::MAX);
        self.base + bonus.min(self.cap.unwrap_or(default_cap))
    }
}

/// Who a status application lands on, from the acting side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTarget {
    /// The acting combatant.
    Owner,
    /// The resolved single target, if still alive.
    Target,
    /// Every living member of the opposing side.
    AllEnemies,
    /// Every living member of the acting side.
    AllAllies,
}

/// Guarded secondary effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payoff {
    pub resources: Vec<(ResourceType, i64)>,
    pub statuses: Vec<StatusEffect>,
    pub draw: usize,
    pub become_hidden: bool,
}

impl Payoff {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gain(mut self, resource: ResourceType, amount: i64) -> Self {
        self.resources.push((resource, amount));
        self
    }

    #[must_use]
    pub fn status(mut self, status: StatusEffect) -> Self {
        self.statuses.push(status);
        self
    }

    #[must_use]
    pub fn draw(mut self, count: usize) -> Self {
        self.draw += count;
        self
    }

    #[must_use]
    pub fn hide(mut self) -> Self {
        self.become_hidden = true;
        self
    }
}

/// A persistent effect source deployed by a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GadgetSpec {
    pub name: String,
    /// Turns the gadget stays active.
    pub duration: u32,
    /// Damage fires at end of player turn, block at start of player turn.
    pub per_turn: CardEffect,
}

impl GadgetSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: u32, per_turn: CardEffect) -> Self {
        Self {
            name: name.into(),
            duration,
            per_turn,
        }
    }
}

/// One typed step of an effect pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectPrimitive {
    Damage(DamageSpec),
    Block(BlockSpec),
    /// Positive deltas generate, negative deltas consume (stopping at zero).
    Resource { resource: ResourceType, delta: i64 },
    Draw(DrawSpec),
    ApplyStatus { target: StatusTarget, status: StatusEffect },
    /// Fires after statuses if the condition holds. `KillsEnemy` payoffs
    /// fire during the damage stage instead.
    Conditional { condition: Condition, payoff: Payoff },
    BecomeHidden,
    SelfDamage(i64),
    DeployGadget(GadgetSpec),
    /// The next card played this turn costs this much less.
    DiscountNextCard(u32),
}

/// Resolution stages in the order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Damage,
    Block,
    Resources,
    Draw,
    Statuses,
    Payoff,
    Hide,
    SelfDamage,
    Gadget,
    Discount,
}

impl Stage {
    /// Every stage, in resolution order.
    pub const ORDER: [Stage; 10] = [
        Stage::Damage,
        Stage::Block,
        Stage::Resources,
        Stage::Draw,
        Stage::Statuses,
        Stage::Payoff,
        Stage::Hide,
        Stage::SelfDamage,
        Stage::Gadget,
        Stage::Discount,
    ];
}

impl EffectPrimitive {
    /// The stage this primitive resolves in.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Damage(_) => Stage::Damage,
            Self::Block(_) => Stage::Block,
            Self::Resource { .. } => Stage::Resources,
            Self::Draw(_) => Stage::Draw,
            Self::ApplyStatus { .. } => Stage::Statuses,
            Self::Conditional { .. } => Stage::Payoff,
            Self::BecomeHidden => Stage::Hide,
            Self::SelfDamage(_) => Stage::SelfDamage,
            Self::DeployGadget(_) => Stage::Gadget,
            Self::DiscountNextCard(_) => Stage::Discount,
        }
    }
}

/// An effect pipeline.
///
/// ```
/// use longwar_combat::core::ResourceType;
/// use longwar_combat::effects::{CardEffect, Condition, DamageModifier, DamageSpec, Payoff};
/// use longwar_combat::effects::status::StatusKind;
///
/// let hidden = Condition::HasStatus(StatusKind::Hidden);
/// let ambush = CardEffect::new()
///     .damage(DamageSpec::flat(6).with_modifier(DamageModifier::Replace { condition: hidden.clone(), amount: 18 }))
///     .when(hidden, Payoff::new().gain(ResourceType::Ashes, 3));
///
/// assert!(ambush.has_damage());
/// assert!(!ambush.exhaust);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardEffect {
    pub primitives: Vec<EffectPrimitive>,
    pub exhaust: bool,
}

impl CardEffect {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive (builder pattern).
    #[must_use]
    pub fn with(mut self, primitive: EffectPrimitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    #[must_use]
    pub fn damage(self, spec: DamageSpec) -> Self {
        self.with(EffectPrimitive::Damage(spec))
    }

    #[must_use]
    pub fn block(self, spec: BlockSpec) -> Self {
        self.with(EffectPrimitive::Block(spec))
    }

    #[must_use]
    pub fn gain(self, resource: ResourceType, amount: i64) -> Self {
        self.with(EffectPrimitive::Resource { resource, delta: amount })
    }

    #[must_use]
    pub fn consume(self, resource: ResourceType, amount: i64) -> Self {
        self.with(EffectPrimitive::Resource { resource, delta: -amount })
    }

    #[must_use]
    pub fn draw(self, spec: DrawSpec) -> Self {
        self.with(EffectPrimitive::Draw(spec))
    }

    #[must_use]
    pub fn apply(self, target: StatusTarget, status: StatusEffect) -> Self {
        self.with(EffectPrimitive::ApplyStatus { target, status })
    }

    #[must_use]
    pub fn when(self, condition: Condition, payoff: Payoff) -> Self {
        self.with(EffectPrimitive::Conditional { condition, payoff })
    }

    #[must_use]
    pub fn hide(self) -> Self {
        self.with(EffectPrimitive::BecomeHidden)
    }

    #[must_use]
    pub fn self_damage(self, amount: i64) -> Self {
        self.with(EffectPrimitive::SelfDamage(amount))
    }

    #[must_use]
    pub fn deploy(self, gadget: GadgetSpec) -> Self {
        self.with(EffectPrimitive::DeployGadget(gadget))
    }

    #[must_use]
    pub fn discount(self, amount: u32) -> Self {
        self.with(EffectPrimitive::DiscountNextCard(amount))
    }

    /// Mark the card to exhaust after resolving.
    #[must_use]
    pub fn exhausting(mut self) -> Self {
        self.exhaust = true;
        self
    }

    /// Primitives of one stage, in listed order.
    pub fn in_stage(&self, stage: Stage) -> impl Iterator<Item = &EffectPrimitive> {
        self.primitives.iter().filter(move |p| p.stage() == stage)
    }

    /// Check if the pipeline deals damage.
    #[must_use]
    pub fn has_damage(&self) -> bool {
        self.damage_specs().next().is_some()
    }

    pub fn damage_specs(&self) -> impl Iterator<Item = &DamageSpec> {
        self.primitives.iter().filter_map(|p| match p {
            EffectPrimitive::Damage(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn block_specs(&self) -> impl Iterator<Item = &BlockSpec> {
        self.primitives.iter().filter_map(|p| match p {
            EffectPrimitive::Block(spec) => Some(spec),
            _ => None,
        })
    }

    /// Check if the pipeline is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

//! The card catalog: every class card plus the trauma cards.
//!
//! Keys follow `class_name` (`brute_haymaker`, `trauma_guilt`). Trauma cards
//! have no class and never appear in starter decks.

use crate::cards::{CardCatalog, CardDefinition, CardInstance, CardRarity, CardType, HeroClass};
use crate::core::{CombatRng, EntityAllocator, EntityId, ResourceType};
use crate::effects::status::{StatusEffect, StatusKind};
use crate::effects::{
    BlockSpec, CardEffect, Condition, DamageModifier, DamageSpec, DrawSpec, GadgetSpec, Payoff,
    StatusTarget,
};

use CardRarity::{Basic, Common, Rare, Uncommon};
use CardType::{Attack, Power, Skill};
use ResourceType::{Ashes, Blood, Glint, Iron, Pages};

#[allow(clippy::too_many_arguments)]
fn card(
    class: HeroClass,
    key: &str,
    name: &str,
    card_type: CardType,
    rarity: CardRarity,
    cost: u32,
    effect: CardEffect,
    description: &str,
) -> CardDefinition {
    CardDefinition::new(key, name, card_type, rarity, cost)
        .with_class(class)
        .with_effect(effect)
        .with_description(description)
}

fn hidden() -> Condition {
    Condition::HasStatus(StatusKind::Hidden)
}

fn brute() -> Vec<CardDefinition> {
    let class = HeroClass::Brute;
    vec![
        card(
            class,
            "brute_haymaker",
            "Haymaker",
            Attack,
            Basic,
            1,
            CardEffect::new().damage(DamageSpec::flat(6).scaled(Blood, 1)),
            "Deal 6 damage. Deal +[Blood] additional damage.",
        ),
        card(
            class,
            "brute_brace",
            "Brace",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(5).scaled(Iron, 1)),
            "Gain 5 block. Gain +[Iron] additional block.",
        ),
        card(
            class,
            "brute_retaliate",
            "Retaliate",
            Skill,
            Basic,
            1,
            CardEffect::new()
                .block(BlockSpec::flat(3))
                .gain(Blood, 1)
                .apply(StatusTarget::Owner, StatusEffect::timed(StatusKind::Thorns, 1, 1)),
            "Gain 3 block. When you take damage this turn, generate 1 Blood.",
        ),
        card(
            class,
            "brute_bulk_up",
            "Bulk Up",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(4)).gain(Iron, 1),
            "Gain 4 block. Generate 1 Iron.",
        ),
        card(
            class,
            "brute_reckless_charge",
            "Reckless Charge",
            Attack,
            Common,
            2,
            CardEffect::new().damage(DamageSpec::flat(10)).gain(Blood, 2).self_damage(3),
            "Deal 10 damage. Take 3 damage. Generate 2 Blood.",
        ),
        card(
            class,
            "brute_immovable",
            "Immovable",
            Skill,
            Common,
            2,
            CardEffect::new().block(BlockSpec::flat(12).with_bonus(Condition::at_least(Iron, 4), 6)),
            "Gain 12 block. If you have 4+ Iron, gain 6 additional block.",
        ),
        card(
            class,
            "brute_bloodletting",
            "Bloodletting",
            Skill,
            Uncommon,
            0,
            CardEffect::new().gain(Blood, 3).self_damage(5),
            "Take 5 damage. Generate 3 Blood.",
        ),
        card(
            class,
            "brute_rampage",
            "Rampage",
            Attack,
            Rare,
            3,
            CardEffect::new().damage(DamageSpec::flat(8).scaled(Blood, 2).to_all()),
            "Deal 8 + Blood x2 damage to ALL enemies.",
        ),
    ]
}

fn blaster() -> Vec<CardDefinition> {
    let class = HeroClass::Blaster;
    vec![
        card(
            class,
            "blaster_energy_bolt",
            "Energy Bolt",
            Attack,
            Basic,
            1,
            CardEffect::new().damage(DamageSpec::flat(7).scaled(Ashes, 1)),
            "Deal 7 damage. Deal +[Ashes] additional damage.",
        ),
        card(
            class,
            "blaster_energy_shield",
            "Energy Shield",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(4)).gain(Ashes, 1),
            "Gain 4 block. Generate 1 Ashes.",
        ),
        card(
            class,
            "blaster_searing_ray",
            "Searing Ray",
            Attack,
            Basic,
            1,
            CardEffect::new()
                .damage(DamageSpec::flat(5))
                .when(Condition::KillsEnemy, Payoff::new().gain(Ashes, 2)),
            "Deal 5 damage. If this kills an enemy, generate 2 Ashes.",
        ),
        card(
            class,
            "blaster_charge_shot",
            "Charge Shot",
            Attack,
            Basic,
            1,
            CardEffect::new().damage(DamageSpec::flat(4)).gain(Blood, 1),
            "Deal 4 damage. Generate 1 Blood.",
        ),
        card(
            class,
            "blaster_scatter_blast",
            "Scatter Blast",
            Attack,
            Common,
            2,
            CardEffect::new().damage(DamageSpec::flat(4).to_all()).gain(Ashes, 1),
            "Deal 4 damage to ALL enemies. Generate 1 Ashes.",
        ),
        card(
            class,
            "blaster_nova_burst",
            "Nova Burst",
            Attack,
            Common,
            3,
            CardEffect::new().damage(DamageSpec::flat(8).with_modifier(DamageModifier::Add {
                condition: Condition::at_least(Ashes, 5),
                amount: 8,
            })),
            "Deal 8 damage. If you have 5+ Ashes, deal 16 damage instead.",
        ),
        card(
            class,
            "blaster_inferno",
            "Inferno",
            Attack,
            Uncommon,
            2,
            CardEffect::new()
                .damage(DamageSpec::flat(6).to_all())
                .apply(StatusTarget::AllEnemies, StatusEffect::new(StatusKind::Vulnerable, 2)),
            "Deal 6 damage to ALL enemies. Apply 2 Vulnerable to ALL enemies.",
        ),
        card(
            class,
            "blaster_supernova",
            "Supernova",
            Attack,
            Rare,
            4,
            CardEffect::new()
                .damage(DamageSpec::flat(15).scaled(Ashes, 3).to_all())
                .exhausting(),
            "Deal 15 + Ashes x3 damage to ALL enemies. Exhaust.",
        ),
    ]
}

fn tinker() -> Vec<CardDefinition> {
    let class = HeroClass::Tinker;
    vec![
        card(
            class,
            "tinker_jury_rig",
            "Jury-Rig",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(4)).gain(Pages, 1),
            "Gain 4 block. Generate 1 Pages.",
        ),
        card(
            class,
            "tinker_zap_gun",
            "Zap Gun",
            Attack,
            Basic,
            1,
            CardEffect::new().damage(DamageSpec::flat(5).scaled(Pages, 1)),
            "Deal 5 damage. Deal +[Pages] additional damage.",
        ),
        card(
            class,
            "tinker_deploy_turret",
            "Deploy Turret",
            Skill,
            Basic,
            1,
            CardEffect::new().deploy(GadgetSpec::new("Turret", 3, CardEffect::new().damage(DamageSpec::flat(2)))),
            "At the end of your turn, deal 2 damage to a random enemy. (Lasts 3 turns)",
        ),
        card(
            class,
            "tinker_analyze",
            "Analyze",
            Skill,
            Basic,
            0,
            CardEffect::new().gain(Glint, 1).gain(Pages, 1).draw(DrawSpec::flat(1)),
            "Generate 1 Glint and 1 Pages. Draw 1 card.",
        ),
        card(
            class,
            "tinker_shield_generator",
            "Shield Generator",
            Skill,
            Common,
            2,
            CardEffect::new().deploy(GadgetSpec::new(
                "Shield Generator",
                3,
                CardEffect::new().block(BlockSpec::flat(3).scaled(Pages, 1)),
            )),
            "At the start of each turn, gain 3 block. Gain +1 block per Pages. (Lasts 3 turns)",
        ),
        card(
            class,
            "tinker_overload",
            "Overload",
            Attack,
            Common,
            2,
            CardEffect::new()
                .damage(DamageSpec::flat(3).with_modifier(DamageModifier::PerActiveGadget))
                .gain(Ashes, 2),
            "Deal 3 damage for each gadget you have deployed. Generate 2 Ashes.",
        ),
        card(
            class,
            "tinker_drone_swarm",
            "Drone Swarm",
            Skill,
            Uncommon,
            3,
            CardEffect::new()
                .gain(Pages, 2)
                .deploy(GadgetSpec::new("Attack Drone", 4, CardEffect::new().damage(DamageSpec::flat(4)))),
            "Deploy an Attack Drone that deals 4 damage each turn for 4 turns. Generate 2 Pages.",
        ),
        card(
            class,
            "tinker_masterwork",
            "Masterwork",
            Power,
            Rare,
            3,
            CardEffect::new()
                .gain(Pages, 3)
                .apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Strength, 1)),
            "Gain 1 Strength. Generate 3 Pages.",
        ),
    ]
}

fn thinker() -> Vec<CardDefinition> {
    let class = HeroClass::Thinker;
    vec![
        card(
            class,
            "thinker_insight",
            "Insight",
            Skill,
            Basic,
            1,
            CardEffect::new().gain(Glint, 1).draw(DrawSpec::flat(2)),
            "Draw 2 cards. Generate 1 Glint.",
        ),
        card(
            class,
            "thinker_calculated_strike",
            "Calculated Strike",
            Attack,
            Basic,
            1,
            CardEffect::new().damage(DamageSpec::flat(4).scaled(Glint, 2)),
            "Deal 4 damage. Deal +[Glint] x2 additional damage.",
        ),
        card(
            class,
            "thinker_precognition",
            "Precognition",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(3)),
            "Gain 3 block.",
        ),
        card(
            class,
            "thinker_coordinate",
            "Coordinate",
            Skill,
            Basic,
            0,
            CardEffect::new().gain(Pages, 1).discount(1),
            "The next card you play this turn costs 1 less. Generate 1 Pages.",
        ),
        card(
            class,
            "thinker_perfect_timing",
            "Perfect Timing",
            Skill,
            Common,
            1,
            CardEffect::new().draw(DrawSpec::flat(1).scaled(Glint, 1, Some(4))),
            "Draw 1 card. +1 card per Glint (max 4).",
        ),
        card(
            class,
            "thinker_tactical_analysis",
            "Tactical Analysis",
            Skill,
            Common,
            2,
            CardEffect::new()
                .gain(Glint, 2)
                .apply(StatusTarget::AllAllies, StatusEffect::timed(StatusKind::Strength, 2, 1)),
            "Generate 2 Glint. All allies deal +2 damage this turn.",
        ),
        card(
            class,
            "thinker_mind_over_matter",
            "Mind Over Matter",
            Skill,
            Uncommon,
            1,
            CardEffect::new().block(BlockSpec::flat(0).scaled(Glint, 3)).gain(Iron, 1),
            "Gain block equal to Glint x3. Generate 1 Iron.",
        ),
        card(
            class,
            "thinker_master_plan",
            "Master Plan",
            Power,
            Rare,
            2,
            CardEffect::new().gain(Glint, 5).draw(DrawSpec::flat(3)),
            "Draw 3 cards. Generate 5 Glint.",
        ),
    ]
}

fn mover() -> Vec<CardDefinition> {
    let class = HeroClass::Mover;
    vec![
        card(
            class,
            "mover_dash",
            "Dash",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(5)).gain(Glint, 1),
            "Gain 5 block. Generate 1 Glint.",
        ),
        card(
            class,
            "mover_hit_and_run",
            "Hit and Run",
            Attack,
            Basic,
            1,
            CardEffect::new()
                .damage(DamageSpec::flat(5).scaled(Glint, 1))
                .block(BlockSpec::flat(3)),
            "Deal 5 damage. Gain 3 block. Deal +[Glint] additional damage.",
        ),
        card(
            class,
            "mover_sidestep",
            "Sidestep",
            Skill,
            Basic,
            0,
            CardEffect::new().block(BlockSpec::flat(2)).draw(DrawSpec::flat(1)),
            "Gain 2 block. Draw 1 card.",
        ),
        card(
            class,
            "mover_redirect",
            "Redirect",
            Skill,
            Basic,
            1,
            CardEffect::new().gain(Iron, 1),
            "Generate 1 Iron.",
        ),
        card(
            class,
            "mover_blur",
            "Blur",
            Skill,
            Common,
            2,
            CardEffect::new().block(BlockSpec::flat(8)).when(
                Condition::at_least(Glint, 3),
                Payoff::new().status(StatusEffect::timed(StatusKind::Untargetable, 1, 1)),
            ),
            "Gain 8 block. If you have 3+ Glint, become Untargetable until your next turn.",
        ),
        card(
            class,
            "mover_momentum_strike",
            "Momentum Strike",
            Attack,
            Common,
            2,
            CardEffect::new().damage(DamageSpec::flat(6).with_modifier(DamageModifier::PerCardPlayedBefore(2))),
            "Deal 6 damage. Deal +2 damage for each card played this turn before this one.",
        ),
        card(
            class,
            "mover_afterimage",
            "Afterimage",
            Skill,
            Uncommon,
            1,
            CardEffect::new()
                .block(BlockSpec::flat(4))
                .gain(Glint, 2)
                .draw(DrawSpec::flat(2)),
            "Gain 4 block. Draw 2 cards. Generate 2 Glint.",
        ),
        card(
            class,
            "mover_lightspeed",
            "Lightspeed",
            Power,
            Rare,
            3,
            CardEffect::new()
                .gain(Glint, 4)
                .apply(StatusTarget::Owner, StatusEffect::timed(StatusKind::Untargetable, 1, 2)),
            "Become Untargetable for 2 turns. Generate 4 Glint.",
        ),
    ]
}

fn stranger() -> Vec<CardDefinition> {
    let class = HeroClass::Stranger;
    vec![
        card(
            class,
            "stranger_backstab",
            "Backstab",
            Attack,
            Basic,
            1,
            CardEffect::new().damage(DamageSpec::flat(5).with_modifier(DamageModifier::Replace {
                condition: hidden(),
                amount: 10,
            })),
            "Deal 5 damage. If you are Hidden, deal 10 damage instead.",
        ),
        card(
            class,
            "stranger_fade",
            "Fade",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(3)).gain(Glint, 1).hide(),
            "Gain 3 block. Become Hidden. Generate 1 Glint.",
        ),
        card(
            class,
            "stranger_misdirect",
            "Misdirect",
            Skill,
            Basic,
            1,
            CardEffect::new().block(BlockSpec::flat(4)).gain(Ashes, 1),
            "Gain 4 block. Generate 1 Ashes.",
        ),
        card(
            class,
            "stranger_slip_away",
            "Slip Away",
            Skill,
            Basic,
            0,
            CardEffect::new()
                .block(BlockSpec::flat(2))
                .when(hidden(), Payoff::new().draw(1)),
            "Gain 2 block. If you are Hidden, draw 1 card.",
        ),
        card(
            class,
            "stranger_shadow_strike",
            "Shadow Strike",
            Attack,
            Common,
            2,
            CardEffect::new()
                .damage(DamageSpec::flat(8).scaled(Ashes, 1))
                .when(Condition::KillsEnemy, Payoff::new().hide()),
            "Deal 8 damage. Deal +[Ashes] additional damage. If this kills, become Hidden.",
        ),
        card(
            class,
            "stranger_ambush",
            "Ambush",
            Attack,
            Common,
            3,
            CardEffect::new()
                .damage(DamageSpec::flat(6).with_modifier(DamageModifier::Replace {
                    condition: hidden(),
                    amount: 18,
                }))
                .when(hidden(), Payoff::new().gain(Ashes, 3)),
            "Deal 6 damage. If you are Hidden: deal 18 damage instead and generate 3 Ashes.",
        ),
        card(
            class,
            "stranger_vanish",
            "Vanish",
            Skill,
            Uncommon,
            1,
            CardEffect::new()
                .gain(Glint, 2)
                .apply(StatusTarget::Owner, StatusEffect::timed(StatusKind::Untargetable, 1, 1))
                .hide(),
            "Become Hidden and Untargetable until your next turn. Generate 2 Glint.",
        ),
        card(
            class,
            "stranger_assassination",
            "Assassination",
            Attack,
            Rare,
            4,
            CardEffect::new().damage(DamageSpec::flat(50)).exhausting(),
            "Can only be played while Hidden. Deal 50 damage. Exhaust.",
        )
        .with_guard(hidden()),
    ]
}

fn trauma() -> Vec<CardDefinition> {
    let trauma = |key: &str, name: &str, cost: u32, effect: CardEffect, description: &str| {
        CardDefinition::new(key, name, Skill, Basic, cost)
            .with_effect(effect)
            .with_description(description)
    };
    vec![
        trauma(
            "trauma_flashback",
            "Flashback",
            0,
            CardEffect::new().self_damage(3),
            "Take 3 damage.",
        ),
        trauma("trauma_hesitation", "Hesitation", 1, CardEffect::new(), "Does nothing."),
        trauma("trauma_paranoia", "Paranoia", 0, CardEffect::new(), "Does nothing."),
        trauma(
            "trauma_guilt",
            "Guilt",
            2,
            CardEffect::new().draw(DrawSpec::flat(1)),
            "Draw 1 card. (This card exists only to waste energy)",
        ),
    ]
}

/// Class cards in a stable order.
#[must_use]
pub fn class_cards(class: HeroClass) -> Vec<CardDefinition> {
    match class {
        HeroClass::Brute => brute(),
        HeroClass::Blaster => blaster(),
        HeroClass::Tinker => tinker(),
        HeroClass::Thinker => thinker(),
        HeroClass::Mover => mover(),
        HeroClass::Stranger => stranger(),
    }
}

/// Every card of the game, class cards first, then trauma.
#[must_use]
pub fn catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();
    for class in HeroClass::ALL {
        for card in class_cards(class) {
            catalog.register(card);
        }
    }
    for card in trauma() {
        catalog.register(card);
    }
    catalog
}

/// Keys of the trauma cards.
pub const TRAUMA_KEYS: [&str; 4] = ["trauma_flashback", "trauma_hesitation", "trauma_paranoia", "trauma_guilt"];

/// A class's starter deck: every Basic card plus one random Common.
pub fn starter_deck(
    class: HeroClass,
    catalog: &CardCatalog,
    owner: EntityId,
    ids: &mut EntityAllocator,
    rng: &mut CombatRng,
) -> Vec<CardInstance> {
    let mut picks: Vec<&CardDefinition> = catalog.find_by_class(class, Basic).collect();
    let commons: Vec<&CardDefinition> = catalog.find_by_class(class, Common).collect();
    if let Some(&common) = rng.choose(&commons) {
        picks.push(common);
    }

    picks
        .into_iter()
        .map(|definition| CardInstance::new(ids.alloc(), owner, definition.clone()))
        .collect()
}

/// Instantiate a trauma card for a hero. `None` for an unknown key.
pub fn trauma_card(
    key: &str,
    catalog: &CardCatalog,
    owner: EntityId,
    ids: &mut EntityAllocator,
) -> Option<CardInstance> {
    if !TRAUMA_KEYS.contains(&key) {
        return None;
    }
    catalog
        .by_key(key)
        .map(|definition| CardInstance::new(ids.alloc(), owner, definition.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 52);

        for class in HeroClass::ALL {
            assert_eq!(catalog.find_by_class(class, Basic).count(), 4, "{class:?}");
            assert_eq!(catalog.find_by_class(class, Common).count(), 2, "{class:?}");
            assert_eq!(catalog.find_by_class(class, Uncommon).count(), 1, "{class:?}");
            assert_eq!(catalog.find_by_class(class, Rare).count(), 1, "{class:?}");
        }

        for key in TRAUMA_KEYS {
            assert!(catalog.by_key(key).unwrap().class.is_none());
        }
    }

    #[test]
    fn test_keys_carry_class_prefix() {
        let catalog = catalog();
        for card in catalog.iter() {
            let prefix = match card.class {
                Some(class) => format!("{}_", class.to_string().to_lowercase()),
                None => "trauma_".to_string(),
            };
            assert!(card.key.starts_with(&prefix), "{}", card.key);
            assert!(!card.description.is_empty());
        }
    }

    #[test]
    fn test_card_data() {
        let catalog = catalog();

        let supernova = catalog.by_key("blaster_supernova").unwrap();
        assert_eq!(supernova.cost, 4);
        assert!(supernova.effect.exhaust);

        let assassination = catalog.by_key("stranger_assassination").unwrap();
        assert_eq!(assassination.play_guard, Some(hidden()));

        assert_eq!(catalog.by_key("thinker_coordinate").unwrap().cost, 0);
        assert_eq!(catalog.by_key("trauma_guilt").unwrap().cost, 2);
    }

    #[test]
    fn test_starter_deck() {
        let catalog = catalog();
        let mut ids = EntityAllocator::after([EntityId(1)]);
        let mut rng = CombatRng::new(4);

        let deck = starter_deck(HeroClass::Tinker, &catalog, EntityId(1), &mut ids, &mut rng);

        assert_eq!(deck.len(), 5);
        assert_eq!(deck.iter().filter(|c| c.definition.rarity == Basic).count(), 4);
        assert_eq!(deck[4].definition.rarity, Common);
        assert!(deck.iter().all(|c| c.owner == EntityId(1)));

        let mut instance_ids: Vec<_> = deck.iter().map(|c| c.instance_id).collect();
        instance_ids.dedup();
        assert_eq!(instance_ids.len(), 5);
    }

    #[test]
    fn test_trauma_card() {
        let catalog = catalog();
        let mut ids = EntityAllocator::new();

        let flashback = trauma_card("trauma_flashback", &catalog, EntityId(3), &mut ids).unwrap();
        assert_eq!(flashback.name(), "Flashback");
        assert_eq!(flashback.owner, EntityId(3));

        assert!(trauma_card("brute_haymaker", &catalog, EntityId(3), &mut ids).is_none());
    }
}

//! Enemy templates and encounter generation.
//!
//! Each faction fields three regular enemies and one boss. A template's HP
//! is `base_hp + hp_scaling * difficulty`.

use crate::combatants::{Combatant, Enemy, EnemyAbility, Faction, IntentKind};
use crate::core::{CombatRng, EntityAllocator, EntityId};
use crate::effects::status::{StatusEffect, StatusKind};
use crate::effects::{BlockSpec, CardEffect, DamageSpec, StatusTarget};

use IntentKind::{Attack, Block, Buff, Debuff, Summon};

/// Blueprint for an enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub faction: Faction,
    pub base_hp: i64,
    /// HP added per difficulty tier.
    pub hp_scaling: i64,
    pub is_boss: bool,
    pub abilities: Vec<EnemyAbility>,
}

impl EnemyTemplate {
    /// HP at a difficulty tier.
    #[must_use]
    pub fn hp_at(&self, difficulty: u32) -> i64 {
        self.base_hp + self.hp_scaling * i64::from(difficulty)
    }
}

fn template(
    name: &'static str,
    faction: Faction,
    base_hp: i64,
    hp_scaling: i64,
    is_boss: bool,
    abilities: Vec<EnemyAbility>,
) -> EnemyTemplate {
    EnemyTemplate {
        name,
        faction,
        base_hp,
        hp_scaling,
        is_boss,
        abilities,
    }
}

fn strike(name: &str, weight: u32, damage: i64) -> EnemyAbility {
    EnemyAbility::new(name, Attack, weight, CardEffect::new().damage(DamageSpec::flat(damage))).showing(damage)
}

fn sweep(name: &str, weight: u32, damage: i64) -> EnemyAbility {
    EnemyAbility::new(name, Attack, weight, CardEffect::new().damage(DamageSpec::flat(damage).to_all()))
        .showing(damage)
}

fn hits(damage: i64) -> CardEffect {
    CardEffect::new().damage(DamageSpec::flat(damage))
}

fn cult() -> Vec<EnemyTemplate> {
    let faction = Faction::Cult;
    vec![
        template(
            "Cultist",
            faction,
            20,
            5,
            false,
            vec![
                strike("Dark Ritual", 50, 6),
                EnemyAbility::new("Summon", Summon, 30, CardEffect::new()),
                EnemyAbility::new(
                    "Curse",
                    Debuff,
                    20,
                    CardEffect::new().apply(StatusTarget::Target, StatusEffect::new(StatusKind::Weak, 2)),
                ),
            ],
        ),
        template(
            "Void Spawn",
            faction,
            30,
            8,
            false,
            vec![
                strike("Tentacle Lash", 60, 8),
                EnemyAbility::new(
                    "Mind Flay",
                    Attack,
                    40,
                    hits(5).apply(StatusTarget::Target, StatusEffect::new(StatusKind::Vulnerable, 1)),
                )
                .showing(5),
            ],
        ),
        template(
            "Eldritch Horror",
            faction,
            45,
            12,
            false,
            vec![
                strike("Reality Tear", 40, 12),
                sweep("Psychic Scream", 30, 6),
                EnemyAbility::new(
                    "Madness",
                    Debuff,
                    30,
                    CardEffect::new()
                        .apply(StatusTarget::Target, StatusEffect::new(StatusKind::Weak, 2))
                        .apply(StatusTarget::Target, StatusEffect::new(StatusKind::Vulnerable, 2)),
                ),
            ],
        ),
        template(
            "High Priest of the Veil",
            faction,
            150,
            30,
            true,
            vec![
                strike("Dark Invocation", 30, 15),
                EnemyAbility::new(
                    "Mass Hysteria",
                    Attack,
                    25,
                    CardEffect::new()
                        .damage(DamageSpec::flat(8).to_all())
                        .apply(StatusTarget::AllEnemies, StatusEffect::new(StatusKind::Weak, 1)),
                )
                .showing(8),
                EnemyAbility::new("Summon the Faithful", Summon, 25, CardEffect::new()),
                EnemyAbility::new(
                    "Veil's Embrace",
                    Buff,
                    20,
                    CardEffect::new()
                        .block(BlockSpec::flat(15))
                        .apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Strength, 3)),
                ),
            ],
        ),
    ]
}

fn undead() -> Vec<EnemyTemplate> {
    let faction = Faction::Undead;
    vec![
        template(
            "Skeleton",
            faction,
            15,
            4,
            false,
            vec![
                strike("Bone Strike", 70, 5),
                EnemyAbility::new(
                    "Reassemble",
                    Buff,
                    30,
                    CardEffect::new().apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Regeneration, 3)),
                ),
            ],
        ),
        template(
            "Zombie",
            faction,
            35,
            8,
            false,
            vec![
                strike("Slam", 60, 10),
                EnemyAbility::new(
                    "Infectious Bite",
                    Attack,
                    40,
                    hits(7).apply(StatusTarget::Target, StatusEffect::new(StatusKind::Poison, 3)),
                )
                .showing(7),
            ],
        ),
        template(
            "Death Knight",
            faction,
            50,
            15,
            false,
            vec![
                strike("Soul Reaver", 40, 14),
                EnemyAbility::new(
                    "Life Drain",
                    Attack,
                    35,
                    hits(8).apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Regeneration, 5)),
                )
                .showing(8),
                EnemyAbility::new("Dark Aegis", Block, 25, CardEffect::new().block(BlockSpec::flat(12))),
            ],
        ),
        template(
            "Lich King",
            faction,
            180,
            40,
            true,
            vec![
                strike("Death Coil", 25, 18),
                EnemyAbility::new("Army of the Dead", Summon, 25, CardEffect::new()),
                EnemyAbility::new(
                    "Soul Harvest",
                    Attack,
                    25,
                    CardEffect::new()
                        .damage(DamageSpec::flat(10).to_all())
                        .apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Regeneration, 10)),
                )
                .showing(10),
                EnemyAbility::new(
                    "Phylactery Shield",
                    Block,
                    25,
                    CardEffect::new()
                        .block(BlockSpec::flat(25))
                        .apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Thorns, 5)),
                ),
            ],
        ),
    ]
}

fn swarm() -> Vec<EnemyTemplate> {
    let faction = Faction::Swarm;
    vec![
        template(
            "Drone",
            faction,
            10,
            3,
            false,
            vec![
                strike("Bite", 70, 4),
                EnemyAbility::new(
                    "Toxic Spit",
                    Debuff,
                    30,
                    CardEffect::new().apply(StatusTarget::Target, StatusEffect::new(StatusKind::Poison, 2)),
                ),
            ],
        ),
        template(
            "Spitter",
            faction,
            25,
            6,
            false,
            vec![
                EnemyAbility::new(
                    "Acid Spray",
                    Attack,
                    50,
                    hits(6).apply(StatusTarget::Target, StatusEffect::new(StatusKind::Poison, 3)),
                )
                .showing(6),
                EnemyAbility::new(
                    "Corrosive Cloud",
                    Debuff,
                    50,
                    CardEffect::new().apply(StatusTarget::AllEnemies, StatusEffect::new(StatusKind::Poison, 2)),
                ),
            ],
        ),
        template(
            "Warrior",
            faction,
            40,
            10,
            false,
            vec![
                strike("Rending Claws", 50, 11),
                EnemyAbility::new(
                    "Frenzy",
                    Attack,
                    30,
                    hits(6).apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Strength, 2)),
                )
                .showing(6),
                EnemyAbility::new("Carapace", Block, 20, CardEffect::new().block(BlockSpec::flat(10))),
            ],
        ),
        template(
            "Hive Queen",
            faction,
            200,
            50,
            true,
            vec![
                strike("Royal Strike", 20, 20),
                EnemyAbility::new("Spawn Brood", Summon, 30, CardEffect::new()),
                EnemyAbility::new(
                    "Toxic Nova",
                    Attack,
                    25,
                    CardEffect::new()
                        .damage(DamageSpec::flat(8).to_all())
                        .apply(StatusTarget::AllEnemies, StatusEffect::new(StatusKind::Poison, 4)),
                )
                .showing(8),
                EnemyAbility::new(
                    "Hive Mind",
                    Buff,
                    25,
                    CardEffect::new().apply(StatusTarget::Owner, StatusEffect::new(StatusKind::Strength, 5)),
                ),
            ],
        ),
    ]
}

/// A faction's templates: three regulars, then the boss.
#[must_use]
pub fn templates(faction: Faction) -> Vec<EnemyTemplate> {
    match faction {
        Faction::Cult => cult(),
        Faction::Undead => undead(),
        Faction::Swarm => swarm(),
    }
}

/// Instantiate a template with its first intent declared.
pub fn create_enemy(template: &EnemyTemplate, difficulty: u32, id: EntityId, rng: &mut CombatRng) -> Enemy {
    let hp = template.hp_at(difficulty);
    Enemy::new(
        Combatant::new(id, template.name, hp),
        template.faction,
        template.is_boss,
        template.abilities.clone(),
        rng,
    )
}

/// Enemies for one encounter.
///
/// Regular encounters field 2 to 4 random regulars. Boss encounters field
/// the boss plus up to two random regulars.
pub fn encounter(
    faction: Faction,
    difficulty: u32,
    boss: bool,
    ids: &mut EntityAllocator,
    rng: &mut CombatRng,
) -> Vec<Enemy> {
    let (bosses, regulars): (Vec<EnemyTemplate>, Vec<EnemyTemplate>) =
        templates(faction).into_iter().partition(|t| t.is_boss);
    let mut enemies = Vec::new();

    let count = if boss {
        if let Some(template) = bosses.first() {
            enemies.push(create_enemy(template, difficulty, ids.alloc(), rng));
        }
        regulars.len().min(2)
    } else {
        2 + rng.gen_index(3)
    };

    for _ in 0..count {
        if let Some(template) = rng.choose(&regulars) {
            enemies.push(create_enemy(template, difficulty, ids.alloc(), rng));
        }
    }
    enemies
}

/// The weakest regular of a faction, for mid-combat summons.
pub fn summon(faction: Faction, difficulty: u32, id: EntityId, rng: &mut CombatRng) -> Option<Enemy> {
    let weakest = templates(faction)
        .into_iter()
        .filter(|t| !t.is_boss)
        .min_by_key(|t| t.base_hp)?;
    Some(create_enemy(&weakest, difficulty, id, rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_faction_has_one_boss() {
        for faction in Faction::ALL {
            let templates = templates(faction);
            assert_eq!(templates.len(), 4);
            assert_eq!(templates.iter().filter(|t| t.is_boss).count(), 1);
            assert!(templates.iter().all(|t| t.faction == faction));
            assert!(templates.iter().all(|t| t.abilities.iter().map(|a| a.weight).sum::<u32>() == 100));
        }
    }

    #[test]
    fn test_hp_scales_with_difficulty() {
        let mut rng = CombatRng::new(1);
        let knight = templates(Faction::Undead).into_iter().find(|t| t.name == "Death Knight").unwrap();

        let enemy = create_enemy(&knight, 2, EntityId(7), &mut rng);

        assert_eq!(enemy.combatant.max_hp(), 80);
        assert_eq!(enemy.combatant.hp(), 80);
        assert_eq!(enemy.id(), EntityId(7));
        assert!(enemy.intent.ability < enemy.abilities.len());
    }

    #[test]
    fn test_regular_encounter_size() {
        let mut rng = CombatRng::new(8);
        let mut ids = EntityAllocator::new();

        for _ in 0..50 {
            let enemies = encounter(Faction::Swarm, 1, false, &mut ids, &mut rng);
            assert!((2..=4).contains(&enemies.len()));
            assert!(enemies.iter().all(|e| !e.is_boss));
        }
    }

    #[test]
    fn test_boss_encounter() {
        let mut rng = CombatRng::new(8);
        let mut ids = EntityAllocator::new();

        let enemies = encounter(Faction::Cult, 0, true, &mut ids, &mut rng);

        assert_eq!(enemies.len(), 3);
        assert!(enemies[0].is_boss);
        assert_eq!(enemies[0].combatant.name, "High Priest of the Veil");
        assert!(!enemies[1].is_boss && !enemies[2].is_boss);
        assert_eq!(ids.peek(), EntityId(4));
    }

    #[test]
    fn test_summon_picks_weakest_regular() {
        let mut rng = CombatRng::new(3);

        let drone = summon(Faction::Swarm, 0, EntityId(40), &mut rng).unwrap();
        assert_eq!(drone.combatant.name, "Drone");
        assert_eq!(drone.combatant.hp(), 10);

        let skeleton = summon(Faction::Undead, 2, EntityId(41), &mut rng).unwrap();
        assert_eq!(skeleton.combatant.name, "Skeleton");
        assert_eq!(skeleton.combatant.hp(), 23);
    }
}

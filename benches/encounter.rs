use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use longwar_combat::cards::HeroClass;
use longwar_combat::combatants::Faction;
use longwar_combat::content::{catalog, create_hero, encounter, NameAllocator};
use longwar_combat::core::{CombatConfig, CombatRng, CombatSession, EntityAllocator};
use longwar_combat::rules::{play_out, AggressivePolicy, CombatRules, RandomPolicy};

fn session(seed: u64) -> CombatSession {
    let catalog = catalog();
    let mut rng = CombatRng::new(seed);
    let mut ids = EntityAllocator::new();
    let mut names = NameAllocator::new();

    let heroes = [HeroClass::Brute, HeroClass::Tinker, HeroClass::Thinker, HeroClass::Stranger]
        .into_iter()
        .map(|class| create_hero(class, &catalog, &mut names, &mut ids, &mut rng))
        .collect();
    let enemies = encounter(Faction::Swarm, 1, false, &mut ids, &mut rng);
    CombatSession::new(heroes, enemies, CombatConfig::default(), rng)
}

fn bench_playouts(c: &mut Criterion) {
    c.bench_function("aggressive_playout", |b| {
        b.iter_batched(
            || session(7),
            |mut session| {
                let mut rng = CombatRng::new(1);
                black_box(play_out(&mut CombatRules::new(), &mut session, &AggressivePolicy, &mut rng, 5_000))
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("random_playout", |b| {
        b.iter_batched(
            || session(7),
            |mut session| {
                let mut rng = CombatRng::new(1);
                black_box(play_out(&mut CombatRules::new(), &mut session, &RandomPolicy, &mut rng, 5_000))
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_session_clone(c: &mut Criterion) {
    let mut base = session(7);
    base.start_player_turn();

    c.bench_function("session_clone", |b| b.iter(|| black_box(base.clone())));
    c.bench_function("snapshot_bytes", |b| b.iter(|| black_box(base.snapshot_bytes())));
}

criterion_group!(benches, bench_playouts, bench_session_clone);
criterion_main!(benches);

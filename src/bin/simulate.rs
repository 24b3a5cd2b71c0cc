//! Headless combat simulator.
//!
//! Drives a scripted duel through the melee, projectile, and AOE engines
//! at a fixed frame rate and prints the resulting event stream.
//!
//! Usage:
//!   cargo run --bin simulate              # random seed
//!   cargo run --bin simulate -- --seed 42 # reproducible run

use std::env;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wildfang::character::calculator::{apply_equipment_modifiers, final_stats};
use wildfang::combat::melee::AttackOutcome;
use wildfang::combat::types::{CombatTarget, Vec2};
use wildfang::items::catalog::starter_items;
use wildfang::{
    AreaEffectEngine, InventoryManager, MeleeCombatController, ProjectileEngine, StatBlock,
};

const FRAME_MS: f64 = 16.0;

fn main() {
    let seed = parse_seed(&env::args().collect::<Vec<_>>())
        .unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    println!("=== WILDFANG COMBAT SIMULATOR ===");
    println!("Seed: {seed}");
    println!();

    // Player: starter kit equipped, a few points into strength.
    let mut player = StatBlock::new();
    player.add_stat_points(5).expect("positive amount");
    for _ in 0..5 {
        player.allocate_stat_point(wildfang::character::stats::StatKind::Strength);
    }

    let mut inventory = InventoryManager::new();
    for item in starter_items() {
        inventory.add_item(item, 1);
    }
    let snapshot = player.effective_values();
    for id in ["worn-fang", "leather-cap", "padded-vest", "swift-paws"] {
        inventory.equip_item(id, &snapshot, 1);
    }
    apply_equipment_modifiers(&mut player, &inventory);
    let stats = final_stats(&player, &inventory);
    println!(
        "Player: {} HP, {} ATK, {:.1} DEF, {:.1}% crit",
        stats.derived.max_health,
        stats.derived.physical_damage,
        stats.derived.defense,
        stats.derived.crit_chance
    );

    let mut targets = vec![
        CombatTarget::new("dire-wolf", Vec2::new(460.0, 360.0), StatBlock::new()),
        CombatTarget::new("mire-toad", Vec2::new(540.0, 420.0), StatBlock::new()),
    ];

    let mut melee = MeleeCombatController::new(Vec2::new(400.0, 360.0));
    let mut projectiles = ProjectileEngine::with_default_types();
    let mut aoe = AreaEffectEngine::with_default_types();

    // Opening volley: one arced shot and a thorn field between the foes.
    if projectiles
        .fire_projectile_with_arc(
            "stone-shot",
            melee.position(),
            Vec2::new(540.0, 420.0),
            "player",
            player.derived(),
        )
        .is_some()
    {
        println!("[0ms] stone-shot lobbed at the toad");
    }
    if let Some(report) = aoe.create_area_effect(
        "thorn-field",
        Vec2::new(500.0, 390.0),
        "player",
        player.effective_stat(wildfang::character::stats::StatKind::Intelligence),
        &mut targets,
        &mut rng,
    ) {
        println!("[0ms] thorn-field opens for {} base damage, {} hit", report.damage, report.hits.len());
    }

    let mut elapsed = 0.0;
    for frame in 0..600 {
        elapsed = frame as f64 * FRAME_MS;

        // Swing whenever the cooldown allows.
        let outcome = melee.perform_attack(
            460.0,
            360.0,
            player.derived(),
            0,
            &mut targets,
            &mut rng,
        );
        if let AttackOutcome::Resolved(report) = outcome {
            let tag = if report.critical {
                "CRIT"
            } else if report.hit {
                "hit"
            } else {
                "miss"
            };
            println!(
                "[{elapsed:.0}ms] strike vs {}: {tag} for {}",
                report.target_id, report.damage
            );
            if report.target_died {
                println!("[{elapsed:.0}ms] {} dies", report.target_id);
            }
        }

        melee.update(FRAME_MS, player.derived(), 0, &mut targets, &mut rng);
        for event in projectiles.update(FRAME_MS, &mut targets, &mut rng) {
            println!("[{elapsed:.0}ms] projectile: {event:?}");
        }
        for event in aoe.update(FRAME_MS, &mut targets, &mut rng) {
            println!("[{elapsed:.0}ms] aoe: {event:?}");
        }
        player.update(FRAME_MS);

        if targets.iter().all(|t| !t.is_alive()) {
            println!("[{elapsed:.0}ms] all targets down");
            break;
        }
    }

    println!();
    println!("=== SUMMARY after {elapsed:.0}ms ===");
    for target in &targets {
        println!(
            "  {}: {}/{} HP{}",
            target.id,
            target.stat_block.current_health(),
            target.stat_block.derived().max_health,
            if target.is_alive() { "" } else { " (down)" }
        );
    }
}

fn parse_seed(args: &[String]) -> Option<u64> {
    let index = args.iter().position(|a| a == "--seed")?;
    args.get(index + 1)?.parse().ok()
}

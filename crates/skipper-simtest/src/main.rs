//! Little Skipper Headless Playthrough Harness
//!
//! Validates level data and scripts whole play sessions through the engine.
//! Runs entirely in-process without a renderer or audio device.
//!
//! Usage:
//!   cargo run -p skipper-simtest
//!   cargo run -p skipper-simtest -- --verbose

use skipper_core::engine::GameEngine;
use skipper_core::persistence::{load_file, save_file, SaveData};
use skipper_logic::assembly::{AssemblyEvent, BoatAssembly, Phase};
use skipper_logic::config::{validate_config, GameConfig};
use skipper_logic::drawing::{Template, Tool};
use skipper_logic::feedback::{NullSink, SoundEffect};
use skipper_logic::geometry::{Vec2, Viewport};
use skipper_logic::levels::{self, LEVEL_COUNT};
use skipper_logic::memory::{Difficulty, FlipOutcome, MemoryGame};
use skipper_logic::progress::{GameProgress, MAX_STARS};

// ── Shipped configuration (same JSON the app loads) ─────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/game_config.json");

/// Screens the layouts have to fit on.
const VIEWPORTS: [Viewport; 3] = [
    Viewport::new(1024.0, 768.0),
    Viewport::new(800.0, 600.0),
    Viewport::new(1366.0, 1024.0),
];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Little Skipper Playthrough Harness ===\n");

    let mut results = Vec::new();

    // 1. Shipped config
    let config = validate_shipped_config(&mut results).unwrap_or_default();

    // 2. Level table
    results.extend(validate_level_table(verbose));

    // 3. Snap rules
    results.extend(validate_snap_rules(&config));

    // 4. Full campaign through the engine
    results.extend(validate_campaign(&config, verbose));

    // 5. Memory match
    results.extend(validate_memory(verbose));

    // 6. Drawing
    results.extend(validate_drawing(&config));

    // 7. Persistence
    results.extend(validate_persistence());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_shipped_config(results: &mut Vec<TestResult>) -> Option<GameConfig> {
    println!("--- Config ---");

    let config: GameConfig = match serde_json::from_str(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("config_parse", false, format!("JSON parse error: {}", e)));
            return None;
        }
    };

    let errors = validate_config(&config);
    results.push(check(
        "config_valid",
        errors.is_empty(),
        if errors.is_empty() {
            format!(
                "snap {} / {} stars / {}x{}",
                config.snap_threshold,
                config.stars_per_level,
                config.viewport.width,
                config.viewport.height
            )
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    ));

    Some(config)
}

// ── 2. Level Table ──────────────────────────────────────────────────────

fn validate_level_table(verbose: bool) -> Vec<TestResult> {
    println!("--- Level Table ---");
    let mut results = Vec::new();

    let ids: Vec<u32> = levels::all_levels().map(|(id, _)| id).collect();
    results.push(check(
        "levels_count",
        ids.len() == LEVEL_COUNT as usize && ids == (1..=LEVEL_COUNT).collect::<Vec<_>>(),
        format!("{} levels, ids {:?}", ids.len(), ids),
    ));

    let counts: Vec<usize> = levels::all_levels().map(|(_, t)| t.parts.len()).collect();
    results.push(check(
        "levels_part_counts",
        counts == [3, 4, 5, 6, 6, 7, 8, 9, 8, 9],
        format!("{:?}", counts),
    ));

    let unlabeled: Vec<String> = levels::all_levels()
        .flat_map(|(id, t)| {
            t.parts
                .iter()
                .filter(|p| p.label().trim().is_empty())
                .map(move |p| format!("{}:{}", id, p.kind.key()))
        })
        .collect();
    results.push(check(
        "levels_labels",
        unlabeled.is_empty(),
        if unlabeled.is_empty() {
            "every part has a label".to_string()
        } else {
            format!("missing labels: {}", unlabeled.join(", "))
        },
    ));

    let targetless: usize = levels::all_levels()
        .map(|(_, t)| t.parts.iter().filter(|p| p.target.is_none()).count())
        .sum();
    results.push(check(
        "levels_all_snappable",
        targetless == 0,
        format!("{} parts without a target", targetless),
    ));

    // Everything lands on screen for each supported viewport
    let mut off_screen = Vec::new();
    for vp in VIEWPORTS {
        for (id, t) in levels::all_levels() {
            for p in t.parts {
                let points = std::iter::once(p.start.resolve(&vp))
                    .chain(p.target.map(|a| a.resolve(&vp)));
                for pt in points {
                    if pt.x < 0.0 || pt.x > vp.width || pt.y < 0.0 || pt.y > vp.height {
                        off_screen.push(format!(
                            "{}x{} level {} {} at ({:.0},{:.0})",
                            vp.width,
                            vp.height,
                            id,
                            p.kind.key(),
                            pt.x,
                            pt.y
                        ));
                    }
                }
            }
        }
    }
    results.push(check(
        "levels_on_screen",
        off_screen.is_empty(),
        if off_screen.is_empty() {
            format!("all positions inside {} viewports", VIEWPORTS.len())
        } else {
            off_screen.join("; ")
        },
    ));

    let reuse = levels::level_template(9).1.name == levels::level_template(7).1.name
        && levels::level_template(10).1.name == levels::level_template(8).1.name;
    results.push(check(
        "levels_reuse_large_ships",
        reuse,
        "levels 9/10 reuse Cargo/Cruise layouts",
    ));

    let fallback = levels::level_template(0).0 == 1 && levels::level_template(11).0 == 1;
    results.push(check("levels_fallback", fallback, "ids 0 and 11 resolve to 1"));

    if verbose {
        for (id, t) in levels::all_levels() {
            println!(
                "    {:>2}. {:<16} {:<10} {} parts",
                id,
                t.name,
                t.boat_type.tag(),
                t.parts.len()
            );
        }
    }

    results
}

// ── 3. Snap Rules ───────────────────────────────────────────────────────

fn validate_snap_rules(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Snap Rules ---");
    let mut results = Vec::new();
    let mut progress = GameProgress::new();
    let mut sink: Vec<SoundEffect> = Vec::new();

    let mut flow = BoatAssembly::new(config);
    flow.begin(1);
    let target = match flow.part(0).and_then(|p| p.target) {
        Some(t) => t,
        None => {
            results.push(check("snap_setup", false, "level 1 part 0 has no target"));
            return results;
        }
    };
    let t = config.snap_threshold;

    let at_threshold = flow.on_drag_release(0, Vec2::new(target.x + t, target.y), &mut sink, &mut progress);
    results.push(check(
        "snap_threshold_exclusive",
        matches!(at_threshold.as_slice(), [AssemblyEvent::PartDropped { .. }]),
        format!("release at exactly {} does not snap", t),
    ));

    let inside = flow.on_drag_release(
        0,
        Vec2::new(target.x + t - 1.0, target.y),
        &mut sink,
        &mut progress,
    );
    let snapped_pos = flow.part(0).map(|p| p.position);
    results.push(check(
        "snap_inside_threshold",
        matches!(inside.first(), Some(AssemblyEvent::PartSnapped { .. }))
            && snapped_pos == Some(target),
        format!("part moved to {:?}", snapped_pos),
    ));

    let again = flow.on_drag_release(0, Vec2::new(0.0, 0.0), &mut sink, &mut progress);
    results.push(check(
        "snap_idempotent",
        again.is_empty() && flow.snapped_count() == 1,
        format!("snapped count {}", flow.snapped_count()),
    ));

    results.push(check(
        "snap_cues",
        sink == [SoundEffect::Snap, SoundEffect::Ding],
        format!("{:?}", sink),
    ));

    results
}

// ── 4. Campaign ─────────────────────────────────────────────────────────

fn validate_campaign(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Campaign ---");
    let mut results = Vec::new();

    let mut engine = match GameEngine::new(config.clone(), Vec::<SoundEffect>::new()) {
        Ok(e) => e,
        Err(e) => {
            results.push(check("campaign_engine", false, e.to_string()));
            return results;
        }
    };

    let mut completions = 0;
    let mut stuck = Vec::new();
    engine.start_assembly(1);
    for expected in 1..=LEVEL_COUNT {
        let Some(flow) = engine.assembly() else {
            stuck.push(format!("level {}: no assembly running", expected));
            break;
        };
        if flow.current_level() != expected {
            stuck.push(format!("expected level {}, got {}", expected, flow.current_level()));
        }
        let targets: Vec<Option<Vec2>> = flow
            .level()
            .map(|l| l.parts.iter().map(|p| p.target).collect())
            .unwrap_or_default();

        for (id, target) in targets.into_iter().enumerate() {
            let Some(target) = target else { continue };
            engine.drag_start(id);
            engine.drag_move(id, Vec2::new(target.x + 30.0, target.y - 30.0));
            for event in engine.drag_release(id, target) {
                if let AssemblyEvent::LevelComplete { level_id, stars, .. } = event {
                    completions += 1;
                    if verbose {
                        println!("    level {} complete, {} stars", level_id, stars);
                    }
                }
            }
        }

        if engine.assembly().map(|a| a.phase()) != Some(Phase::Complete) {
            stuck.push(format!("level {} never completed", expected));
        }
        if expected < LEVEL_COUNT && engine.next_level().is_none() {
            stuck.push(format!("no advance offered after level {}", expected));
        }
    }

    results.push(check(
        "campaign_all_levels",
        stuck.is_empty() && completions == LEVEL_COUNT,
        if stuck.is_empty() {
            format!("{} boats built", completions)
        } else {
            stuck.join("; ")
        },
    ));

    results.push(check(
        "campaign_no_advance_past_last",
        engine.next_level().is_none(),
        "advance refused after level 10",
    ));

    let progress = engine.progress();
    let expected_stars = LEVEL_COUNT * u32::from(MAX_STARS);
    results.push(check(
        "campaign_stars",
        progress.total_stars == expected_stars && progress.all_boats_built(),
        format!("{} / {} stars", progress.total_stars, expected_stars),
    ));

    let missing: Vec<u32> = (1..=LEVEL_COUNT)
        .filter(|id| !progress.has_sticker(&format!("boat_{}", id)))
        .collect();
    results.push(check(
        "campaign_stickers",
        missing.is_empty(),
        format!("missing boat stickers: {:?}", missing),
    ));

    let cheers = engine.sink().iter().filter(|e| **e == SoundEffect::Cheer).count();
    results.push(check(
        "campaign_one_celebration_per_level",
        cheers == LEVEL_COUNT as usize,
        format!("{} cheers", cheers),
    ));

    results
}

// ── 5. Memory Match ─────────────────────────────────────────────────────

fn validate_memory(verbose: bool) -> Vec<TestResult> {
    println!("--- Memory Match ---");
    let mut results = Vec::new();

    for (difficulty, seed) in [
        (Difficulty::Easy, 1),
        (Difficulty::Medium, 2),
        (Difficulty::Hard, 3),
    ] {
        let mut progress = GameProgress::new();
        let mut game = MemoryGame::with_seed(difficulty, Some(seed));
        game.end_preview();

        // First pass: reveal each pair's partner the hard way, one miss per pair.
        let n = game.cards().len();
        let mut outcome = FlipOutcome::Refused;
        for i in 0..n {
            if game.cards()[i].matched {
                continue;
            }
            let icon = game.cards()[i].icon;
            if let Some(miss) = (0..n).find(|&j| !game.cards()[j].matched && game.cards()[j].icon != icon) {
                game.flip(i, &mut NullSink, &mut progress);
                game.flip(miss, &mut NullSink, &mut progress);
                game.hide_mismatch(&mut NullSink);
            }
            if let Some(j) = (i + 1..n).find(|&j| game.cards()[j].icon == icon) {
                game.flip(i, &mut NullSink, &mut progress);
                outcome = game.flip(j, &mut NullSink, &mut progress);
            }
        }

        let pairs = difficulty.pairs() as u32;
        let expected_moves = pairs * 2 - 1;
        let expected_score = (pairs * 3).saturating_sub(expected_moves);
        let name = format!("memory_{:?}", difficulty).to_lowercase();
        results.push(check(
            &name,
            outcome
                == FlipOutcome::Complete {
                    score: expected_score,
                    moves: expected_moves,
                }
                && progress.memory_high_score == expected_score,
            format!("{:?}", outcome),
        ));
        if verbose {
            println!(
                "    {:?}: {} cards, {} moves, score {}",
                difficulty,
                n,
                game.moves(),
                game.score()
            );
        }
    }

    results
}

// ── 6. Drawing ──────────────────────────────────────────────────────────

fn validate_drawing(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Drawing ---");
    let mut results = Vec::new();

    let mut engine = match GameEngine::new(config.clone(), Vec::<SoundEffect>::new()) {
        Ok(e) => e,
        Err(e) => {
            results.push(check("drawing_engine", false, e.to_string()));
            return results;
        }
    };
    engine.start_drawing();

    let templates: Vec<Template> = (0..5).filter_map(|_| engine.cycle_template()).collect();
    results.push(check(
        "drawing_templates_cycle",
        templates.last() == Some(&Template::None) && templates.len() == 5,
        format!("{:?}", templates),
    ));

    let canvas = engine.drawing().map(|d| d.canvas());
    let mut drawn = 0;
    for (i, tool) in Tool::ALL.into_iter().enumerate() {
        engine.select_tool(tool);
        let y = 150.0 + i as f32 * 20.0;
        if engine.pointer_down(Vec2::new(60.0, y)) {
            engine.pointer_move(Vec2::new(400.0, y + 10.0));
            engine.pointer_up();
            drawn += 1;
        }
    }
    let outside = engine.pointer_down(Vec2::new(10.0, 10.0));
    results.push(check(
        "drawing_strokes",
        drawn == Tool::ALL.len() && !outside,
        format!("{} strokes inside {:?}", drawn, canvas),
    ));

    for _ in 0..20 {
        engine.finish_drawing();
    }
    let p = engine.progress();
    results.push(check(
        "drawing_artist_stickers",
        p.drawing_count == 20 && p.has_sticker("artist_5") && p.has_sticker("artist_20"),
        format!("{} drawings, stickers {:?}", p.drawing_count, p.stickers_unlocked),
    ));

    results
}

// ── 7. Persistence ──────────────────────────────────────────────────────

fn validate_persistence() -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut progress = GameProgress::new();
    progress.complete_boat_level(1, 3);
    progress.complete_boat_level(2, 3);
    progress.update_memory_score(9);
    let data = SaveData::new(progress, Default::default());

    // Removed when `tmp` drops
    let tmp = match tempfile::tempdir() {
        Ok(t) => t,
        Err(e) => {
            results.push(check("persist_tempdir", false, e.to_string()));
            return results;
        }
    };
    let dir = tmp.path();

    for file in ["progress.json", "progress.bin"] {
        let path = dir.join(file);
        let outcome = save_file(&path, &data).and_then(|_| load_file(&path));
        let (passed, detail) = match outcome {
            Ok(Some(loaded)) => (
                loaded == data,
                format!("{} stars restored", loaded.progress.total_stars),
            ),
            Ok(None) => (false, "file vanished after save".to_string()),
            Err(e) => (false, e.to_string()),
        };
        results.push(check(&format!("persist_{}", file), passed, detail));
    }

    if let Ok(text) = std::fs::read_to_string(dir.join("progress.json")) {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&text);
        results.push(check(
            "persist_json_inspectable",
            parsed.map(|v| v["progress"]["memory_high_score"] == 9).unwrap_or(false),
            "memory_high_score readable from JSON",
        ));
    }

    let missing = load_file(&dir.join("never-written.bin"));
    results.push(check(
        "persist_missing_is_fresh",
        matches!(missing, Ok(None)),
        "missing save is not an error",
    ));

    results
}

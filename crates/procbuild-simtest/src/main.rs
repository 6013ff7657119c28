//! ProcBuild Headless Layout Harness
//!
//! Generates building layouts over a range of seeds and validates them.
//! Runs entirely in-process — no renderer, no engine.
//!
//! Usage:
//!   cargo run -p procbuild-simtest
//!   cargo run -p procbuild-simtest -- --verbose --seeds 64 --rooms 40
//!   cargo run -p procbuild-simtest -- --config layout.json --dump
//!   cargo run -p procbuild-simtest -- --json > summaries.json
//!
//! With `--json` the human-readable report goes to stderr and stdout carries
//! only the per-seed JSON array.

use clap::Parser;
use procbuild_logic::config::{validate_config, ConfigError, LayoutConfig};
use procbuild_logic::fit::{fit, Fit};
use procbuild_logic::floors::rasterize;
use procbuild_logic::grid::{to_world_offset, Point2, WorldOffset};
use procbuild_logic::layout::{GenerationReport, LayoutContext};
use procbuild_logic::present::{debug_marks, InstancePlan};
use procbuild_logic::room::{Room, RoomTheme};
use procbuild_logic::validation::{validate_layout, Severity};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by `--json` so stdout stays machine-readable.
static REPORT_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Human-readable report line: stdout normally, stderr under `--json`.
macro_rules! report {
    ($($arg:tt)*) => {
        if REPORT_TO_STDERR.load(Ordering::Relaxed) {
            eprintln!($($arg)*)
        } else {
            println!($($arg)*)
        }
    };
}

/// Generate and validate building layouts without a renderer
#[derive(Parser, Debug)]
#[command(name = "procbuild-simtest")]
#[command(version, about, long_about = None)]
struct Args {
    /// Print every check, not just failures, and enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Number of seeds to sweep (0..N)
    #[arg(long, default_value_t = 32)]
    seeds: u64,

    /// Room slots requested per layout
    #[arg(long, default_value_t = 24)]
    rooms: usize,

    /// JSON layout configuration (defaults apply to missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log an ASCII map of the seed-0 layout
    #[arg(long)]
    dump: bool,

    /// Print per-seed summaries as JSON on stdout
    #[arg(long)]
    json: bool,
}

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug)]
enum HarnessError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidConfig(Vec<ConfigError>),
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::Json(e)
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Io(e) => write!(f, "IO error: {}", e),
            HarnessError::Json(e) => write!(f, "Config parse error: {}", e),
            HarnessError::InvalidConfig(errors) => {
                let list: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Invalid config: {}", list.join("; "))
            }
        }
    }
}

impl std::error::Error for HarnessError {}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig, HarnessError> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => LayoutConfig::default(),
    };
    let errors = validate_config(&config);
    if !errors.is_empty() {
        return Err(HarnessError::InvalidConfig(errors));
    }
    Ok(config)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Debug, Serialize)]
struct SeedSummary {
    seed: u64,
    rooms: usize,
    skipped_slots: usize,
    attempts: u64,
    blocked_fits: u64,
    floors: usize,
    walls: usize,
    bounds_min: Point2,
    bounds_max: Point2,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_target_level(simplelog::LevelFilter::Off)
            .set_location_level(simplelog::LevelFilter::Off)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("logger init failed: {}", e);
    }

    REPORT_TO_STDERR.store(args.json, Ordering::Relaxed);

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    report!("=== ProcBuild Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Single-room primitives
    results.extend(validate_primitives(&config, args.verbose));

    // 2. Seed sweep
    let (sweep, summaries) = validate_seed_sweep(&config, args.seeds, args.rooms, args.verbose);
    results.extend(sweep);

    // 3. Presentation pass
    results.extend(validate_presentation(&config, args.rooms));

    if args.dump {
        let mut ctx = LayoutContext::new(config.clone());
        let rooms = ctx.generate_random_rooms(args.rooms, &mut StdRng::seed_from_u64(0));
        log::info!("{}", ascii_dump(&rooms));
    }

    if args.json {
        match summaries_json(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("failed to encode summaries: {}", e),
        }
    }

    // ── Summary ──
    report!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            report!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    report!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Primitives ───────────────────────────────────────────────────────

fn validate_primitives(config: &LayoutConfig, verbose: bool) -> Vec<TestResult> {
    report!("--- Primitives ---");
    let mut results = Vec::new();

    let mut ctx = LayoutContext::new(config.clone());
    let base = ctx.generate_room_struct(config.base_room.clone());
    let expected_floors = config.base_room.area() as usize;
    let expected_walls = 2 * (config.base_room.size.x + config.base_room.size.y) as usize;

    results.push(TestResult {
        name: "base_room_floors".into(),
        passed: base.floors.len() == expected_floors,
        detail: format!("{} floors (expected {})", base.floors.len(), expected_floors),
    });
    results.push(TestResult {
        name: "base_room_walls".into(),
        passed: base.walls.len() == expected_walls,
        detail: format!("{} walls (expected {})", base.walls.len(), expected_walls),
    });

    // Re-registering the same rectangle must not duplicate walls
    let again = ctx.generate_room_struct(config.base_room.clone());
    results.push(TestResult {
        name: "wall_registry_dedup".into(),
        passed: again.walls.is_empty(),
        detail: format!("{} walls re-emitted", again.walls.len()),
    });

    // Fit determinism around the base room
    let obstacles: HashSet<Point2> = base.floors.iter().copied().collect();
    let mut deterministic = true;
    let mut placed = 0;
    for y in -1..=config.base_room.size.y {
        for x in -1..=config.base_room.size.x {
            let candidate = RoomTheme::default().with_rect(
                Point2::new(x, y),
                Point2::new(config.room_size_max, config.room_size_min),
            );
            let first = fit(&candidate, &obstacles);
            deterministic &= fit(&candidate, &obstacles) == first;
            if let Fit::Placed { theme, .. } = &first {
                placed += 1;
                let tiles = rasterize(theme.size, theme.offset);
                deterministic &= tiles.iter().all(|t| !obstacles.contains(t));
            }
        }
    }
    results.push(TestResult {
        name: "fit_deterministic".into(),
        passed: deterministic,
        detail: format!("{} anchors fitted around base room", placed),
    });

    // Zero slots returns the base room only
    let only_base = ctx.generate_random_rooms(0, &mut StdRng::seed_from_u64(0));
    results.push(TestResult {
        name: "zero_rooms_base_only".into(),
        passed: only_base.len() == 1 && only_base[0] == base,
        detail: format!("{} rooms returned", only_base.len()),
    });

    if verbose {
        report!(
            "  Base room: {}×{} at ({},{})",
            config.base_room.size.x,
            config.base_room.size.y,
            config.base_room.offset.x,
            config.base_room.offset.y
        );
    }

    results
}

// ── 2. Seed Sweep ───────────────────────────────────────────────────────

fn validate_seed_sweep(
    config: &LayoutConfig,
    seeds: u64,
    rooms: usize,
    verbose: bool,
) -> (Vec<TestResult>, Vec<SeedSummary>) {
    report!("--- Seed Sweep ({} seeds × {} rooms) ---", seeds, rooms);
    let mut results = Vec::new();
    let mut summaries = Vec::new();

    let mut ctx = LayoutContext::new(config.clone());
    let mut total_errors = 0;
    let mut total_warnings = 0;
    let mut count_mismatch = 0;
    let mut nondeterministic = 0;
    let mut skipped = 0;
    let mut size_histogram: HashMap<(i32, i32), u32> = HashMap::new();

    for seed in 0..seeds {
        let report = ctx.generate(rooms, &mut StdRng::seed_from_u64(seed));

        for e in validate_layout(&report.rooms) {
            match e.severity {
                Severity::Error => {
                    total_errors += 1;
                    if verbose {
                        report!("  seed {}: [{}] {}", seed, e.category, e.message);
                    }
                }
                Severity::Warning => total_warnings += 1,
            }
        }

        if report.rooms.len() != 1 + report.placed() {
            count_mismatch += 1;
        }
        skipped += report.skipped_slots;

        let replay = ctx.generate(rooms, &mut StdRng::seed_from_u64(seed));
        if replay.rooms != report.rooms {
            nondeterministic += 1;
        }

        for room in &report.rooms[1..] {
            *size_histogram
                .entry((room.theme.size.x, room.theme.size.y))
                .or_default() += 1;
        }

        summaries.push(summarize(seed, &report));
    }

    results.push(TestResult {
        name: "sweep_layouts_valid".into(),
        passed: total_errors == 0,
        detail: format!("{} errors, {} warnings", total_errors, total_warnings),
    });
    results.push(TestResult {
        name: "sweep_room_counts".into(),
        passed: count_mismatch == 0,
        detail: format!(
            "{} layouts with a room count not matching their skip count ({} slots skipped overall)",
            count_mismatch, skipped
        ),
    });
    results.push(TestResult {
        name: "sweep_deterministic".into(),
        passed: nondeterministic == 0,
        detail: format!("{} seeds replayed differently", nondeterministic),
    });

    let out_of_range = size_histogram
        .keys()
        .filter(|(w, h)| {
            let range = config.room_size_min..=config.room_size_max;
            !range.contains(w) || !range.contains(h)
        })
        .count();
    results.push(TestResult {
        name: "sweep_room_sizes".into(),
        passed: out_of_range == 0,
        detail: format!(
            "{} distinct sizes, {} outside {}..={}",
            size_histogram.len(),
            out_of_range,
            config.room_size_min,
            config.room_size_max
        ),
    });

    if verbose {
        let mut sizes: Vec<_> = size_histogram.into_iter().collect();
        sizes.sort();
        report!("  Room size distribution:");
        for ((w, h), n) in sizes {
            report!("    {}×{}: {}", w, h, n);
        }
    }

    (results, summaries)
}

fn summaries_json(summaries: &[SeedSummary]) -> Result<String, HarnessError> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

fn summarize(seed: u64, report: &GenerationReport) -> SeedSummary {
    let floors: Vec<Point2> = report
        .rooms
        .iter()
        .flat_map(|r| r.floors.iter().copied())
        .collect();
    let (bounds_min, bounds_max) = bounds(floors.iter().copied()).unwrap_or_default();
    SeedSummary {
        seed,
        rooms: report.rooms.len(),
        skipped_slots: report.skipped_slots,
        attempts: report.attempts,
        blocked_fits: report.blocked_fits,
        floors: floors.len(),
        walls: report.rooms.iter().map(|r| r.walls.len()).sum(),
        bounds_min,
        bounds_max,
    }
}

// ── 3. Presentation ─────────────────────────────────────────────────────

fn validate_presentation(config: &LayoutConfig, rooms: usize) -> Vec<TestResult> {
    report!("--- Presentation ---");
    let mut results = Vec::new();

    let mut ctx = LayoutContext::new(config.clone());
    let layout = ctx.generate_random_rooms(rooms, &mut StdRng::seed_from_u64(1));
    let plan = InstancePlan::build(&layout, WorldOffset::default(), config.cell_size);

    results.push(TestResult {
        name: "present_instance_counts".into(),
        passed: plan.floors.len() == ctx.all_floors().len()
            && plan.walls.len() == ctx.all_walls().len(),
        detail: format!(
            "{} floor / {} wall instances",
            plan.floors.len(),
            plan.walls.len()
        ),
    });

    let on_grid = floors_on_grid(&plan, &layout, config.cell_size);
    results.push(TestResult {
        name: "present_on_grid".into(),
        passed: on_grid,
        detail: format!("cell size {}", config.cell_size),
    });

    let marks = debug_marks(&layout, config.cell_size);
    results.push(TestResult {
        name: "present_debug_marks".into(),
        passed: marks.len() + 1 == layout.len(),
        detail: format!("{} marks for {} rooms", marks.len(), layout.len()),
    });

    results
}

/// Each floor instance sits exactly on the world position of its tile.
fn floors_on_grid(plan: &InstancePlan, layout: &[Room], cell_size: f32) -> bool {
    let tiles = layout.iter().flat_map(|room| room.floors.iter());
    plan.floors.len() == layout.iter().map(|r| r.floors.len()).sum::<usize>()
        && plan
            .floors
            .iter()
            .zip(tiles)
            .all(|(f, &tile)| f.translation == to_world_offset(tile, cell_size))
}

// ── ASCII dump ──────────────────────────────────────────────────────────

fn bounds(points: impl Iterator<Item = Point2>) -> Option<(Point2, Point2)> {
    points.fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((lo, hi)) => Some((
            Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )),
    })
}

/// Rooms as letters, walls as `#`, north up.
fn ascii_dump(rooms: &[Room]) -> String {
    let mut cells: HashMap<Point2, char> = HashMap::new();
    for room in rooms {
        for wall in &room.walls {
            cells.entry(wall.position).or_insert('#');
        }
    }
    for (i, room) in rooms.iter().enumerate() {
        let ch = (b'A' + (i % 26) as u8) as char;
        for floor in &room.floors {
            cells.insert(*floor, ch);
        }
    }

    let Some((lo, hi)) = bounds(cells.keys().copied()) else {
        return "(empty layout)".to_string();
    };

    let mut dump = format!(
        "Layout ({} rooms, {}×{} cells):\n",
        rooms.len(),
        hi.x - lo.x + 1,
        hi.y - lo.y + 1
    );
    for y in (lo.y..=hi.y).rev() {
        for x in lo.x..=hi.x {
            dump.push(*cells.get(&Point2::new(x, y)).unwrap_or(&'.'));
        }
        dump.push('\n');
    }
    dump
}

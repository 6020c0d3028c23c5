//! Benchmark command - time route searches on random maps
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_workload(), run_queries(), report_results()
//! - Level 3: time_query()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use guildmap_core::{find_route_from_camp, region, Hex, HexMap, DEFAULT_MAP_RADIUS, MAX_MAP_RADIUS};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Map radius
    #[arg(long, default_value_t = DEFAULT_MAP_RADIUS)]
    pub radius: i32,

    /// Number of random maps
    #[arg(long, default_value = "20")]
    pub maps: usize,

    /// Route queries per map
    #[arg(long, default_value = "200")]
    pub queries: usize,

    /// Share of discovered cells that are mountains or lakes
    #[arg(long, default_value = "0.3")]
    pub obstacles: f64,

    /// Spread queries across threads
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One map plus the destinations queried on it
struct Workload {
    map: HexMap,
    targets: Vec<Hex>,
}

/// Timing of a single query
#[derive(Clone, Copy, Debug)]
struct QueryTiming {
    elapsed: Duration,
    reachable: bool,
    hops: usize,
}

#[derive(Clone, Debug, serde::Serialize)]
struct BenchmarkSummary {
    radius: i32,
    maps: usize,
    queries: usize,
    parallel: bool,
    #[serde(skip)]
    total_time: Duration,
    total_time_ms: f64,
    avg_query_us: f64,
    max_query_us: f64,
    queries_per_second: f64,
    reachable_ratio: f64,
    avg_hops: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Generate random maps and destinations
/// 2. Time every route query
/// 3. Report
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Benchmarking {} maps x {} queries at radius {}",
        args.maps,
        args.queries,
        args.radius
    );

    let mut rng = create_rng(seed);
    let workloads = build_workload(&args, &mut rng)?;
    let start = Instant::now();
    let timings = run_queries(&workloads, args.parallel);
    let summary = summarize(&args, &timings, start.elapsed());

    report_results(&summary, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_workload(args: &BenchmarkArgs, rng: &mut ChaCha8Rng) -> Result<Vec<Workload>> {
    if !(0..=MAX_MAP_RADIUS).contains(&args.radius) {
        anyhow::bail!(
            "Map radius must be between 0 and {}, got {}",
            MAX_MAP_RADIUS,
            args.radius
        );
    }
    let cells = region(args.radius);
    let mut workloads = Vec::with_capacity(args.maps);
    for _ in 0..args.maps {
        let map = HexMap::random(args.radius, args.obstacles, rng)?;
        let targets = (0..args.queries)
            .map(|_| cells[rng.gen_range(0..cells.len())])
            .collect();
        workloads.push(Workload { map, targets });
    }
    Ok(workloads)
}

fn run_queries(workloads: &[Workload], parallel: bool) -> Vec<QueryTiming> {
    let total: usize = workloads.iter().map(|w| w.targets.len()).sum();
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} queries ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let jobs: Vec<(&HexMap, Hex)> = workloads
        .iter()
        .flat_map(|w| w.targets.iter().map(move |&t| (&w.map, t)))
        .collect();

    let timings: Vec<QueryTiming> = if parallel {
        jobs.par_iter()
            .map(|&(map, target)| {
                let timing = time_query(map, target);
                progress.inc(1);
                timing
            })
            .collect()
    } else {
        jobs.iter()
            .map(|&(map, target)| {
                let timing = time_query(map, target);
                progress.inc(1);
                timing
            })
            .collect()
    };

    progress.finish_and_clear();
    timings
}

fn summarize(args: &BenchmarkArgs, timings: &[QueryTiming], total_time: Duration) -> BenchmarkSummary {
    let n = timings.len().max(1) as f64;
    let reachable: Vec<&QueryTiming> = timings.iter().filter(|t| t.reachable).collect();
    let sum_us: f64 = timings.iter().map(|t| micros(t.elapsed)).sum();
    let max_us = timings.iter().map(|t| micros(t.elapsed)).fold(0.0, f64::max);
    let avg_hops = if reachable.is_empty() {
        0.0
    } else {
        reachable.iter().map(|t| t.hops as f64).sum::<f64>() / reachable.len() as f64
    };

    BenchmarkSummary {
        radius: args.radius,
        maps: args.maps,
        queries: timings.len(),
        parallel: args.parallel,
        total_time,
        total_time_ms: total_time.as_secs_f64() * 1000.0,
        avg_query_us: sum_us / n,
        max_query_us: max_us,
        queries_per_second: timings.len() as f64 / total_time.as_secs_f64().max(f64::EPSILON),
        reachable_ratio: reachable.len() as f64 / n,
        avg_hops,
    }
}

fn report_results(summary: &BenchmarkSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\n=== Route Benchmark Results ===");
    println!("System: {}\n", get_system_info());
    println!("Radius:            {}", summary.radius);
    println!("Maps x queries:    {} x {}", summary.maps, summary.queries / summary.maps.max(1));
    println!("Mode:              {}", if summary.parallel { "parallel" } else { "sequential" });
    println!("Total time:        {}", format_duration(summary.total_time));
    println!("Avg per query:     {:.1}us", summary.avg_query_us);
    println!("Slowest query:     {:.1}us", summary.max_query_us);
    println!("Queries/s:         {:.0}", summary.queries_per_second);
    println!("Reachable:         {:.1}%", summary.reachable_ratio * 100.0);
    println!("Avg hops (found):  {:.2}", summary.avg_hops);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Time one route query from the camp. Targets come from the map's own
/// region, so the query can't fail.
fn time_query(map: &HexMap, target: Hex) -> QueryTiming {
    let start = Instant::now();
    let route = find_route_from_camp(map, target).unwrap_or_default();
    QueryTiming {
        elapsed: start.elapsed(),
        reachable: route.is_reachable(),
        hops: route.hops(),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}

/// Get system information string
fn get_system_info() -> String {
    format!(
        "guildmap {}, {} CPUs",
        env!("CARGO_PKG_VERSION"),
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1)
    )
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!("{}m {:.1}s", d.as_secs() / 60, (d.as_secs() % 60) as f64 + d.subsec_millis() as f64 / 1000.0)
    } else if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", micros(d))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parallel: bool) -> BenchmarkArgs {
        BenchmarkArgs {
            radius: 4,
            maps: 3,
            queries: 10,
            obstacles: 0.4,
            parallel,
            json: false,
        }
    }

    #[test]
    fn test_format_duration() {
        assert!(format_duration(Duration::from_millis(500)).contains("ms"));
        assert!(format_duration(Duration::from_secs(5)).contains("s"));
        assert!(format_duration(Duration::from_secs(90)).contains("m"));
        assert!(format_duration(Duration::from_micros(20)).contains("us"));
    }

    #[test]
    fn test_workload_is_seeded() {
        let a = build_workload(&args(false), &mut create_rng(Some(5))).unwrap();
        let b = build_workload(&args(false), &mut create_rng(Some(5))).unwrap();
        assert_eq!(a.len(), 3);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.map, y.map);
            assert_eq!(x.targets, y.targets);
            assert_eq!(x.targets.len(), 10);
        }
    }

    #[test]
    fn test_workload_rejects_bad_radius() {
        for radius in [-1, MAX_MAP_RADIUS + 1, i32::MAX] {
            let bad = BenchmarkArgs { radius, ..args(false) };
            assert!(build_workload(&bad, &mut create_rng(Some(1))).is_err());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let workloads = build_workload(&args(true), &mut create_rng(Some(11))).unwrap();
        let seq = run_queries(&workloads, false);
        let par = run_queries(&workloads, true);
        assert_eq!(seq.len(), 30);
        for (s, p) in seq.iter().zip(&par) {
            assert_eq!(s.reachable, p.reachable);
            assert_eq!(s.hops, p.hops);
        }

        let summary = summarize(&args(true), &seq, Duration::from_millis(3));
        assert_eq!(summary.queries, 30);
        assert!(summary.reachable_ratio > 0.0 && summary.reachable_ratio <= 1.0);
    }

    #[test]
    fn test_get_system_info() {
        let info = get_system_info();
        assert!(info.contains("guildmap"));
        assert!(info.contains("CPUs"));
    }
}

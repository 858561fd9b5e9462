use std::fs::File;
use std::io::Write;
use std::time::Instant;

use bf_sssp_core::generate::random_graph;
use bf_sssp_core::mtx::read_graph;
use bf_sssp_core::*;

fn arg<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1))
}

/// Times every strategy on one graph and checks each against the sequential run.
fn bench_graph(label: &str, edges: &EdgeStore, threads: &[usize], lanes: &[usize], tile: usize) -> serde_json::Value {
    let mut runs = Vec::new();
    let mut configs = vec![RunConfig::sequential()];
    for &t in threads {
        configs.push(RunConfig::partitioned(t));
        configs.push(RunConfig::partitioned(t).with_sync(SyncMode::Independent));
    }
    for &l in lanes {
        configs.push(RunConfig::vector(l));
        configs.push(RunConfig::vector(l).with_tile_size(tile));
    }

    let mut truth: Option<Vec<Distance>> = None;
    for cfg in &configs {
        let mut work = edges.clone();
        let t0 = Instant::now();
        let out = solve(&mut work, 0, cfg).expect("solve");
        let us = t0.elapsed().as_secs_f64() * 1e6;
        let matches = match &truth {
            None => { truth = Some(out.distances.as_slice().to_vec()); true }
            Some(t) => t.as_slice() == out.distances.as_slice(),
        };
        if !matches && cfg.sync == SyncMode::Lockstep {
            eprintln!("parity FAIL on {label}: {} {:?}", cfg.strategy, cfg);
        }
        runs.push(serde_json::json!({
            "strategy": cfg.strategy,
            "threads": (cfg.strategy == Strategy::Partitioned).then_some(cfg.threads),
            "sync": (cfg.strategy == Strategy::Partitioned).then_some(cfg.sync),
            "lanes": (cfg.strategy == Strategy::Vector).then_some(cfg.lanes),
            "elapsed_us": us,
            "matches_sequential": matches,
            "negative_cycle": out.negative_cycle,
            "stats": out.stats,
            "tiling": out.tiling,
        }));
    }
    serde_json::json!({ "graph": label, "n": edges.node_count(), "m": edges.len(), "runs": runs })
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") {
        eprintln!("Usage: bench_relaxers [--graph file.mtx [--one-based]] --sizes 10000,20000 --degrees 2,4,8 --seed 42 --threads 2,4,8 --lanes 4,16 --tile 1024 --out benchmarks/relaxers.json");
        return;
    }
    let list = |flag: &str, default: &str| -> Vec<usize> {
        arg(&args, flag).map(String::as_str).unwrap_or(default).split(',').filter_map(|s| s.parse().ok()).collect()
    };
    let sizes = list("--sizes", "10000,20000");
    let threads = list("--threads", "2,4,8");
    let lanes = list("--lanes", "4,16");
    let tile: usize = arg(&args, "--tile").and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_TILE_SIZE);
    let seed: u64 = arg(&args, "--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let degrees: Vec<f32> = arg(&args, "--degrees").map(String::as_str).unwrap_or("4").split(',').filter_map(|s| s.parse().ok()).collect();
    let out_path = arg(&args, "--out").cloned().unwrap_or_else(|| "benchmarks/relaxers.json".to_string());

    let mut results = Vec::new();
    if let Some(path) = arg(&args, "--graph") {
        let options = MtxOptions { one_based: args.iter().any(|a| a == "--one-based") };
        let edges = match read_graph(path, options) {
            Ok(g) => g,
            Err(e) => { eprintln!("{e}"); std::process::exit(1); }
        };
        results.push(bench_graph(path, &edges, &threads, &lanes, tile));
    } else {
        for &n in &sizes {
            for &deg in &degrees {
                let edges = random_graph(n, deg, 1..5, seed).expect("graph");
                results.push(bench_graph(&format!("random n={n} deg={deg}"), &edges, &threads, &lanes, tile));
            }
        }
    }

    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).expect("serialize").as_bytes()).expect("write out");
    eprintln!("wrote {out_path}");
}

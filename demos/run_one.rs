use bf_sssp_core::generate::random_graph;
use bf_sssp_core::*;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 { eprintln!("usage: run_one <n> <avg_degree> <seed> <mode: sequential|partitioned|vector>"); std::process::exit(1); }
    let n: usize = args[1].parse().expect("n");
    let degree: f32 = args[2].parse().expect("avg_degree");
    let seed: u64 = args[3].parse().expect("seed");
    let mode: Strategy = match args[4].parse() { Ok(m) => m, Err(e) => { eprintln!("{e}"); std::process::exit(1); } };

    let mut edges = random_graph(n, degree, 1..5, seed).expect("graph");
    // remaining knobs (threads, sync, lanes, tile size) come from SSSP_BF_*
    let config = RunConfig { strategy: mode, ..RunConfig::from_env() };
    let out = match solve(&mut edges, 0, &config) {
        Ok(out) => out,
        Err(e) => { eprintln!("error {}: {e}", e.code()); std::process::exit(1); }
    };
    print!(
        "mode={mode} n={n} m={} sweeps={} relax={} converged={} reached={} cycle={}",
        edges.len(), out.stats.sweeps, out.stats.relaxations, out.stats.converged, out.distances.reached_count(), out.negative_cycle
    );
    if let Some(t) = &out.tiling { print!(" tiles={} occupied={} moved={}", t.tiles, t.occupied_tiles, t.moved_edges); }
    if !out.stats.worker_sweeps.is_empty() { print!(" worker_sweeps={:?}", out.stats.worker_sweeps); }
    println!();
}

use bf_sssp_core::*;

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
    let graphs: [(&str, &[(NodeId, NodeId, Weight)]); 2] = [
        ("triangle", &[(0, 1, 5), (1, 2, -2), (0, 2, 10)]),
        ("negative_cycle", &[(0, 1, 1), (1, 2, -1), (2, 1, -1)]),
    ];
    for (name, triples) in graphs {
        for strategy in Strategy::ALL {
            let mut edges = EdgeStore::from_triples(3, triples).expect("valid edges");
            let config = RunConfig { strategy, threads: 2, lanes: 4, ..RunConfig::default() };
            let out = solve(&mut edges, 0, &config).expect("solve");
            println!("{name:<15} {strategy:<12} dist={:?} cycle={}", out.distances.as_slice(), out.negative_cycle);
        }
    }
}

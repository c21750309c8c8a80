#![no_main]

use libfuzzer_sys::fuzz_target;

use grove::{
    infra::{arbitrary::MutOpsSeq, testing::check_consistency},
    Graph, GraphConfig,
};

fuzz_target!(|input: (bool, bool, MutOpsSeq)| {
    let (multi_edges, self_loops, ops) = input;

    let mut config = GraphConfig::undirected();
    if multi_edges {
        config = config.allow_multi_edges();
    }
    if self_loops {
        config = config.allow_self_loops();
    }

    let mut graph = Graph::new(config);

    for op in ops {
        // Rejected operations must leave the graph intact.
        let _ = op.apply(&mut graph);
        check_consistency(&graph)
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});

//! Benchmarks for graph traversals.

use std::hint::black_box;

use arcstr::ArcStr;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use lexnet_core::execution::{QueryBudget, bidirectional_path};
use lexnet_core::graph::{Direction, GraphBuilder, LexicalGraph, SynsetDraft, UnitDraft};

/// A complete tree of synsets with `fanout` hyponyms per node, one unit each.
fn tree(depth: u32, fanout: u32) -> LexicalGraph {
    let mut builder = GraphBuilder::new();
    let mut levels: Vec<Vec<u32>> = vec![vec![0]];
    let mut next_id = 1;
    for _ in 0..depth {
        let mut level = Vec::new();
        for _ in levels.last().map_or(&[][..], Vec::as_slice) {
            for _ in 0..fanout {
                level.push(next_id);
                next_id += 1;
            }
        }
        levels.push(level);
    }

    for id in 0..next_id {
        builder
            .add_unit(UnitDraft {
                external_id: ArcStr::from(format!("u{id}")),
                lemma: ArcStr::from(format!("w{id}")),
                category: "noun".to_string(),
                sense: 1,
                count: Some(u64::from(id % 7)),
            })
            .expect("unique ids");
    }
    for id in 0..next_id {
        let parent = if id == 0 { None } else { Some((id - 1) / fanout) };
        builder.add_synset(SynsetDraft {
            external_id: ArcStr::from(format!("s{id}")),
            alias: None,
            members: vec![ArcStr::from(format!("u{id}"))],
            relations: parent
                .map(|p| vec![(ArcStr::from("HAS_HYPERONYM"), ArcStr::from(format!("s{p}")))])
                .unwrap_or_default(),
        });
    }
    builder.finish().0
}

fn bench_closure(c: &mut Criterion) {
    let graph = tree(6, 4);
    let root = graph.unit_by_external_id("u0").expect("root");
    let hyper = graph.relation_id("HAS_HYPERONYM").expect("relation");

    let mut group = c.benchmark_group("unit_closure");
    for depth in [1usize, 3, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let layers = graph
                    .unit_closure([root], Some(hyper), Direction::Incoming, depth)
                    .collect_layers();
                black_box(layers)
            });
        });
    }
    group.finish();
}

fn bench_path(c: &mut Criterion) {
    let graph = tree(6, 4);
    let leaf_a = graph.unit_by_external_id("u1365").expect("leaf");
    let leaf_b = graph.unit_by_external_id("u5460").expect("leaf");

    c.bench_function("bidirectional_path_leaf_to_leaf", |b| {
        b.iter(|| {
            black_box(bidirectional_path(
                &graph,
                &[leaf_a],
                &[leaf_b],
                None,
                12,
                &QueryBudget::unlimited(),
            ))
        });
    });
}

criterion_group!(benches, bench_closure, bench_path);
criterion_main!(benches);

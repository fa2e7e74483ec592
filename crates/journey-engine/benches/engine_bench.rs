//! Benchmarks for the selection engine.
//!
//! Run with: cargo bench -p journey-engine

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use journey_core::{Choice, ChoiceId, PathKey, SelectionSet, Stage};
use journey_engine::{PathIndex, StageRef, reconcile, resolve_default_path, set_selection};
use std::hint::black_box;

/// Uniform tree: every stage has `width` choices, the tree is `depth`
/// stages tall, and only the first choice at each stage descends further
/// beyond the uniform fan-out.
fn build_tree(depth: u32, width: u64, next_id: &mut u64) -> Stage {
    *next_id += 1;
    let stage_id = *next_id;
    let mut stage = Stage::new(stage_id, format!("stage-{stage_id}"));
    for _ in 0..width {
        *next_id += 1;
        let mut choice = Choice::new(*next_id, format!("choice-{}", *next_id));
        if depth > 0 {
            choice = choice.then(build_tree(depth - 1, width, next_id));
        }
        stage = stage.choice(choice);
    }
    stage
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/index_build");
    for (depth, width) in [(3, 3), (4, 4), (6, 2)] {
        let mut next_id = 0;
        let tree = build_tree(depth, width, &mut next_id);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("d{depth}w{width}")),
            &tree,
            |b, tree| {
                b.iter(|| black_box(PathIndex::build(tree).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_default_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/default_path");
    for (depth, width) in [(3, 3), (4, 4), (6, 2)] {
        let mut next_id = 0;
        let tree = build_tree(depth, width, &mut next_id);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("d{depth}w{width}")),
            &tree,
            |b, tree| {
                b.iter(|| black_box(resolve_default_path(tree)));
            },
        );
    }
    group.finish();
}

fn bench_select_and_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/select");

    let mut next_id = 0;
    let tree = build_tree(4, 4, &mut next_id);
    let index = PathIndex::build(&tree).unwrap();

    // Walk the default path once so the selection sits deep in the tree,
    // then re-select at the root: the worst case for pruning.
    let mut selected = SelectionSet::new();
    let mut current = tree.clone();
    for step in resolve_default_path(&tree) {
        current = set_selection(&current, &step.at, step.choice).unwrap();
        selected = reconcile(&index, &selected, &step.at, step.choice).unwrap();
    }
    let at = StageRef::new(current.id(), PathKey::root());
    let second_choice = current.choices()[1].id();

    group.bench_function("root_reselect", |b| {
        b.iter(|| {
            let next_tree = set_selection(&current, &at, second_choice).unwrap();
            let next_set = reconcile(&index, &selected, &at, second_choice).unwrap();
            black_box((next_tree, next_set));
        });
    });

    let deep_at = StageRef::new(
        current
            .stage_at(&PathKey::new([0, 0, 0]))
            .map(Stage::id)
            .unwrap_or_else(|| current.id()),
        PathKey::new([0, 0, 0]),
    );
    let deep_choice: ChoiceId = current
        .stage_at(&PathKey::new([0, 0, 0]))
        .map(|stage| stage.choices()[0].id())
        .unwrap_or(second_choice);

    group.bench_function("deep_select", |b| {
        b.iter(|| {
            let next_tree = set_selection(&current, &deep_at, deep_choice).unwrap();
            let next_set = reconcile(&index, &selected, &deep_at, deep_choice).unwrap();
            black_box((next_tree, next_set));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_index_build,
    bench_default_path,
    bench_select_and_reconcile
);
criterion_main!(benches);

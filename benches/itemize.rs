//! Reconciliation performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use specline::model::Model;
use specline::{Engine, Host, Mode, Options};
use std::hint::black_box;

fn residue_scene(residues: u32) -> Model {
    let mut builder = Model::builder().molecule(1).chain('A');
    for pos in 1..=residues {
        builder = builder
            .residue(pos, "GLY")
            .atom("N")
            .atom("CA")
            .atom("C")
            .atom("O");
    }
    builder.build()
}

fn document(tokens: u32) -> String {
    (1..=tokens)
        .map(|i| format!(":{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_itemize(c: &mut Criterion) {
    let mut group = c.benchmark_group("itemize");
    for tokens in [4u32, 16, 64] {
        let mut model = residue_scene(64);
        let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));
        let text = document(tokens);
        group.bench_function(format!("{tokens}_tokens"), |b| {
            b.iter(|| {
                engine.set_text(black_box(&text));
                engine.itemize();
            });
        });
    }
    group.finish();
}

fn bench_external_reconcile(c: &mut Criterion) {
    let mut model = residue_scene(64);
    let mut engine = Engine::new(&mut model, Options::new(Mode::Residues));
    engine.set_text(&document(16));
    engine.itemize();
    engine.settle();

    let extra = engine.host().resolve(":60", Mode::Residues).unwrap();
    let atoms = engine.host().expand_atoms(extra);

    c.bench_function("external_toggle_reconcile", |b| {
        b.iter(|| {
            engine.host_mut().select(&atoms);
            engine.on_selection_changed();
            engine.host_mut().deselect(&atoms);
            engine.on_selection_changed();
            black_box(engine.items().len())
        });
    });
}

criterion_group!(benches, bench_itemize, bench_external_reconcile);
criterion_main!(benches);

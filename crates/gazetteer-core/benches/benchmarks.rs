// crates/gazetteer-core/benches/benchmarks.rs
//
// Name-collection lookup across the three tiers (exact, case-folded,
// substring) and LPF serialization of a populated feature.
//
// Run with `cargo bench --bench benchmarks`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gazetteer_core::lpf::{dumps, DumpOptions};
use gazetteer_core::{CountryRegistry, Feature, NameCollection, PlaceDraft};

const TOPONYMS: &[&str] = &[
    "Zucchabar", "Miliana", "Emerita Augusta", "Mérida", "Oxyrhynchus", "Roma", "Ῥώμη", "Londinium",
    "Lutetia", "Eboracum", "Carthago", "Alexandria", "Antiochia", "Byzantion", "Κωνσταντινούπολις",
    "Aquincum", "Vindobona", "Colonia Agrippina", "Tarraco", "Hispalis",
];

fn collection() -> NameCollection {
    let mut names = NameCollection::new();
    for round in 0..25 {
        for t in TOPONYMS {
            names.add_name(format!("{t} {round}")).unwrap();
        }
    }
    names
}

fn bench_lookup(c: &mut Criterion) {
    let names = collection();
    let mut group = c.benchmark_group("name_lookup");
    group.bench_function("exact", |b| b.iter(|| names.get_names(black_box("Tarraco 7"))));
    group.bench_function("folded", |b| b.iter(|| names.get_names(black_box("tarraco 7"))));
    group.bench_function("substring", |b| b.iter(|| names.get_names(black_box("agrip"))));
    group.bench_function("miss", |b| b.iter(|| names.get_names(black_box("Atlantis"))));
    group.finish();
}

fn bench_dumps(c: &mut Criterion) {
    let registry = CountryRegistry::load_default().unwrap();
    let draft = PlaceDraft {
        id: Some("roma".into()),
        title: Some("Roma".into()),
        ccodes: Some(vec!["IT".into()]),
        names: TOPONYMS.iter().map(|t| (*t).into()).collect(),
        descriptions: vec!["Capital of the Roman world".into()],
        ..PlaceDraft::default()
    };
    let feature = Feature::from_draft(draft, &registry).unwrap();
    c.bench_function("lpf_dumps", |b| {
        b.iter(|| dumps([black_box(&feature)], &DumpOptions::default()).unwrap())
    });
}

criterion_group!(benches, bench_lookup, bench_dumps);
criterion_main!(benches);

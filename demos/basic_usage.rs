//! Basic usage example for gazetteer-rs
//!
//! This example demonstrates how to:
//! - Build a place from adapter fields
//! - Look up names and romanize them
//! - Keep places in a catalog
//! - Save to and load from Linked Places Format files

use gazetteer_rs::prelude::*;
use serde_json::json;

/// Stand-in for a real Ancient Greek transliteration engine.
fn greek(text: &str, _language: Option<&str>) -> Vec<String> {
    match text {
        "Ῥώμη" => vec!["Rhōmē".to_string()],
        _ => Vec::new(),
    }
}

fn main() -> Result<()> {
    println!("=== gazetteer-rs Basic Usage Example ===\n");

    let registry = CountryRegistry::load_default()?;
    println!("✓ Country table loaded: {} countries\n", registry.len());

    // Example 1: Build a feature from adapter output
    println!("--- Example 1: Build a feature ---");
    let draft = PlaceDraft::from_value(&json!({
        "id": "423025",
        "uri": "https://pleiades.stoa.org/places/423025",
        "title": "Roma",
        "ccodes": ["Italy"],
        "names": ["Roma", {"toponym": "Ῥώμη", "language_tag": "grc"}],
        "descriptions": ["The capital of the Roman Republic and Empire."],
        "geometry": {"type": "Point", "coordinates": [12.4853, 41.8919]}
    }))?;
    let mut roma = Feature::from_draft(draft, &registry)?;
    println!("{roma}");
    println!("ccodes: {:?}\n", roma.properties().ccodes());

    // Example 2: Name lookup
    println!("--- Example 2: Look up names ---");
    for query in ["Roma", "roma", "Ῥώ"] {
        let hits: Vec<_> = roma.names().get_names(query).iter().map(|n| n.toponym()).collect();
        println!("{query:>6} -> {hits:?}");
    }
    println!();

    // Example 3: Romanization
    println!("--- Example 3: Romanize names ---");
    let mut engines = Romanizers::new();
    engines.register("grc", greek);
    let added = roma.names_mut().romanize_all(&engines)?;
    println!("added {added} romanizations");
    for name in roma.names().iter() {
        println!("{:?} [{}] {:?}", name.toponym(), name.language(), name.romanizations());
    }
    println!();

    // Example 4: Catalog and files
    println!("--- Example 4: Save and load ---");
    let mut catalog = Catalog::new();
    catalog.insert(roma);
    let dir = std::env::temp_dir().join("gazetteer-rs-demo");
    catalog.save_each(&dir, &DumpOptions::pretty(4))?;
    let mut reloaded = Catalog::new();
    let n = reloaded.load_dir(&dir, &registry)?;
    println!("reloaded {n} place(s) from {}", dir.display());
    println!("{}", lpf::dumps(reloaded.iter().map(|(_, p)| p), &DumpOptions::pretty(2))?);

    Ok(())
}

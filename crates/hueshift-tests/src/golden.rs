//! Golden hash tests for the CPU kernel.
//!
//! `tests/golden/generate_golden.py` re-implements the kernel in Python and
//! records SHA-256 hashes of the RGBA output for fixed inputs. These tests
//! rebuild the same inputs and compare, on the reference kernel and on the
//! parallel CPU backend.
//!
//! Regenerate after an intentional kernel change:
//! ```bash
//! python tests/golden/generate_golden.py
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use hueshift_compute::CpuBackend;
use hueshift_core::{remap_with_stats, HueRemap, RasterImage};
use sha2::{Digest, Sha256};

use crate::fixtures;

#[derive(Debug, serde::Deserialize)]
struct GoldenData {
    version: String,
    tests: BTreeMap<String, GoldenEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct GoldenEntry {
    input: String,
    width: u32,
    height: u32,
    start: Option<f64>,
    end: Option<f64>,
    output: Option<f64>,
    remapped: Option<usize>,
    hash: String,
}

impl GoldenEntry {
    fn remap(&self) -> Option<HueRemap> {
        Some(HueRemap::new(self.start?, self.end?, self.output?))
    }
}

fn golden_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/golden/hue_remap.json")
}

fn load_golden() -> GoldenData {
    let path = golden_path();
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&content).expect("valid golden json")
}

fn hash(image: &RasterImage) -> String {
    hex::encode(Sha256::digest(image.data()))
}

fn input_for(name: &str, entry: &GoldenEntry) -> RasterImage {
    let image = fixtures::by_name(&entry.input).unwrap_or_else(|| panic!("{name}: unknown input {}", entry.input));
    assert_eq!(image.dimensions(), (entry.width, entry.height), "{name}: dimensions");
    image
}

#[test]
fn golden_file_is_current() {
    let golden = load_golden();
    assert_eq!(golden.version, "1");
    assert!(golden.tests.len() >= 10);
}

#[test]
fn fixtures_match_generator() {
    for (name, entry) in load_golden().tests.iter().filter(|(_, e)| e.remap().is_none()) {
        assert_eq!(hash(&input_for(name, entry)), entry.hash, "{name}");
    }
}

#[test]
fn reference_kernel_matches_golden() {
    for (name, entry) in &load_golden().tests {
        let Some(cfg) = entry.remap() else { continue };
        let (out, stats) = remap_with_stats(&input_for(name, entry), &cfg);
        assert_eq!(Some(stats.remapped), entry.remapped, "{name}: remapped count");
        assert_eq!(hash(&out), entry.hash, "{name}: output hash");
    }
}

#[test]
fn cpu_backend_matches_golden() {
    let backend = CpuBackend::new();
    for (name, entry) in &load_golden().tests {
        let Some(cfg) = entry.remap() else { continue };
        let (out, stats) = backend.remap_image(&input_for(name, entry), &cfg).unwrap();
        assert_eq!(Some(stats.remapped), entry.remapped, "{name}: remapped count");
        assert_eq!(hash(&out), entry.hash, "{name}: output hash");
    }
}

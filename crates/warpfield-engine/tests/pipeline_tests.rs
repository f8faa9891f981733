//! End-to-end pipeline tests.
//!
//! The full derivation runs once (shared across tests) and the pipeline's
//! guarantees are checked on the real output: flat-spacetime regression,
//! symmetry, document structure, and byte-identical idempotence across two
//! complete runs.

use std::sync::OnceLock;

use warpfield_engine::prelude::*;
use warpfield_geometry::prelude::*;
use warpfield_symbolic::prelude::*;

fn shared() -> &'static Derivation {
    static DERIVATION: OnceLock<Derivation> = OnceLock::new();
    DERIVATION.get_or_init(|| {
        derive(&SymbolContext::warp_bubble(), &PipelineConfig::default())
            .expect("the standard derivation succeeds")
    })
}

#[test]
fn full_run_produces_symmetric_tensors() {
    let d = shared();
    let opts = SimplifyOptions::default();
    assert!(d.ricci.require_symmetric(&opts).is_ok());
    assert!(d.einstein.require_symmetric(&opts).is_ok());
    assert!(d.stress_energy.require_symmetric(&opts).is_ok());
}

#[test]
fn flat_profile_zeroes_the_stress_energy_end_to_end() {
    let d = shared();
    let opts = SimplifyOptions::default();
    for mu in 0..DIM {
        for nu in 0..DIM {
            let flat = substitute_profile(
                d.stress_energy.entry(mu, nu),
                d.context.profile().name(),
                &Expr::zero(),
            );
            assert!(
                is_identically_zero(&flat, &opts).unwrap(),
                "T[{mu}][{nu}] nonzero for flat spacetime"
            );
        }
    }
}

#[test]
fn stress_energy_is_einstein_over_eight_pi() {
    let d = shared();
    let opts = SimplifyOptions::default();
    for mu in 0..DIM {
        for nu in 0..DIM {
            let scaled = d.stress_energy.entry(mu, nu).clone() * Expr::int(8) * Expr::pi();
            assert!(
                algebraically_equal(&scaled, d.einstein.entry(mu, nu), &opts).unwrap(),
                "8 pi T[{mu}][{nu}] != G[{mu}][{nu}]"
            );
        }
    }
}

#[test]
fn document_structure_holds_for_the_real_tensor() {
    let doc = render_document(&shared().stress_energy);

    // Exactly one field-equation block and one stress-energy block.
    assert_eq!(doc.matches("\\[").count(), 2);
    assert_eq!(doc.matches("\\]").count(), 2);

    // 4 rows x 4 entries, line breaks after every row but the last.
    let body = doc
        .split("\\begin{pmatrix}\n")
        .nth(1)
        .and_then(|rest| rest.split("\\end{pmatrix}").next())
        .expect("document contains a pmatrix");
    let rows: Vec<&str> = body.lines().collect();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.matches(" & ").count(), 3);
    }
    assert_eq!(body.matches(" \\\\").count(), 3);
}

#[test]
fn two_full_runs_are_byte_identical() {
    let first = shared();
    let second = derive(&SymbolContext::warp_bubble(), &PipelineConfig::default())
        .expect("the standard derivation succeeds");

    let doc_a = render_document(&first.stress_energy);
    let doc_b = render_document(&second.stress_energy);
    assert_eq!(doc_a, doc_b, "output documents diverged between runs");
    assert_eq!(document_hash(&doc_a), document_hash(&doc_b));
}

#[test]
fn report_round_trips_through_json() {
    let report = DerivationReport::new(shared());
    let json = report.to_json().unwrap();
    let back: DerivationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.document_hash, report.document_hash);
    assert_eq!(back.document, report.document);
    assert_eq!(back.stress_energy_latex, report.stress_energy_latex);
}

#[test]
fn report_hash_matches_document() {
    let report = DerivationReport::new(shared());
    assert_eq!(report.document_hash, document_hash(&report.document));
    assert_eq!(report.document_hash.len(), 64);
}

#[test]
fn write_document_persists_the_exact_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OUTPUT_FILE);
    let doc = render_document(&shared().stress_energy);
    write_document(&path, &doc).unwrap();
    let read_back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_back, doc);
}

//! The typeset output document and the serializable run record.
//!
//! [`render_document`] emits the fixed LaTeX skeleton around the computed
//! stress-energy tensor: document open, `amsmath` inclusion, a section
//! stating the field equation, a section presenting the tensor as a 4x4
//! `pmatrix` (entries separated by the alignment marker, rows separated by
//! the line-break marker after every row but the last), closing markers.
//! The skeleton is byte-for-byte stable; only the 16 entry expressions vary
//! with the computed tensor, and those render deterministically too -- two
//! runs with the same profile produce byte-identical documents.
//!
//! [`document_hash`] is the BLAKE3 hex fingerprint of the rendered bytes,
//! the handle the idempotence guarantee is checked through.
//!
//! [`write_document`] is a single whole-file write. Callers only reach it
//! after the entire derivation has succeeded, so a failed run never leaves
//! a partial document behind.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use warpfield_geometry::prelude::*;
use warpfield_symbolic::prelude::*;

use crate::pipeline::Derivation;

/// The fixed output file name.
pub const OUTPUT_FILE: &str = "stress_energy.tex";

/// Render the output document for a computed stress-energy tensor.
pub fn render_document(stress_energy: &Tensor2) -> String {
    let mut doc = String::new();
    doc.push_str("\\documentclass{article}\n");
    doc.push_str("\\usepackage{amsmath}\n");
    doc.push_str("\\begin{document}\n");
    doc.push('\n');
    doc.push_str("\\section*{Einstein Equations}\n");
    doc.push_str("\\[ G_{\\mu\\nu} = 8\\pi\\,T_{\\mu\\nu} \\]\n");
    doc.push('\n');
    doc.push_str("\\section*{Stress--Energy Tensor}\n");
    doc.push_str("\\[ T_{\\mu\\nu} = \\frac{1}{8\\pi} G_{\\mu\\nu} = \\begin{pmatrix}\n");
    for mu in 0..DIM {
        let row: Vec<String> = (0..DIM)
            .map(|nu| latex(stress_energy.entry(mu, nu)))
            .collect();
        let _ = write!(doc, "  {}", row.join(" & "));
        if mu + 1 < DIM {
            doc.push_str(" \\\\");
        }
        doc.push('\n');
    }
    doc.push_str("\\end{pmatrix} \\]\n");
    doc.push('\n');
    doc.push_str("\\end{document}\n");
    doc
}

/// BLAKE3 hex fingerprint (64 lowercase hex chars) of a rendered document.
pub fn document_hash(document: &str) -> String {
    blake3::hash(document.as_bytes()).to_hex().to_string()
}

/// Write the rendered document to `path` in one shot.
pub fn write_document(path: &Path, document: &str) -> io::Result<()> {
    std::fs::write(path, document)
}

// ---------------------------------------------------------------------------
// DerivationReport
// ---------------------------------------------------------------------------

/// A serializable record of a completed run: the rendered entries, the
/// scalar curvature, the document, and its fingerprint. Consumed by
/// downstream tooling and by determinism checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivationReport {
    /// LaTeX renderings of the 16 stress-energy entries, row-major.
    pub stress_energy_latex: [[String; DIM]; DIM],
    /// LaTeX rendering of the Ricci scalar.
    pub ricci_scalar_latex: String,
    /// The full rendered output document.
    pub document: String,
    /// BLAKE3 hex fingerprint of `document`.
    pub document_hash: String,
}

impl DerivationReport {
    /// Build the report for a completed derivation.
    pub fn new(derivation: &Derivation) -> Self {
        let document = render_document(&derivation.stress_energy);
        let hash = document_hash(&document);
        let entries = std::array::from_fn(|mu| {
            std::array::from_fn(|nu| latex(derivation.stress_energy.entry(mu, nu)))
        });
        DerivationReport {
            stress_energy_latex: entries,
            ricci_scalar_latex: latex(&derivation.ricci_scalar),
            document,
            document_hash: hash,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

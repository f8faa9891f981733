//! Warpfield Engine -- orchestration for the warp-bubble stress-energy
//! derivation.
//!
//! This crate ties the workspace together: it runs the symbolic pipeline
//! from [`warpfield_geometry`] in its fixed forward order, renders the
//! resulting stress-energy tensor as a LaTeX document, fingerprints the
//! output with BLAKE3 for determinism verification, and (optionally) fetches
//! the upstream reference document for human cross-checking.
//!
//! # Quick Start
//!
//! ```no_run
//! use warpfield_engine::prelude::*;
//!
//! let ctx = SymbolContext::warp_bubble();
//! let derivation = derive(&ctx, &PipelineConfig::default())?;
//! let document = render_document(&derivation.stress_energy);
//! write_document(std::path::Path::new(OUTPUT_FILE), &document)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The `stress-energy` binary does exactly the above: no flags, no
//! environment-dependent behavior beyond `RUST_LOG` filtering, one output
//! file, written only after the whole derivation succeeds.

#![deny(unsafe_code)]

pub mod pipeline;
pub mod reference;
pub mod report;

use warpfield_geometry::prelude::GeometryError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort a pipeline run.
///
/// Single-shot semantics: nothing is retried, and a failed run writes no
/// output.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A geometry stage failed (shape invariant, degenerate metric, or a
    /// simplification-budget overrun).
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Writing the output document failed.
    #[error("failed to write output document: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::pipeline::{derive, Derivation, PipelineConfig};
    pub use crate::reference::{
        extract_display_math, fetch_reference_blocks, reference_blocks, ReferenceBlocks,
        ReferenceError, EXPECTED_BLOCK_COUNT, REFERENCE_DOCUMENT_URL,
    };
    pub use crate::report::{
        document_hash, render_document, write_document, DerivationReport, OUTPUT_FILE,
    };
    pub use crate::PipelineError;
    pub use warpfield_geometry::prelude::SymbolContext;
}

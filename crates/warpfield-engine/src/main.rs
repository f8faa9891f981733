//! The `stress-energy` binary.
//!
//! Runs the full derivation for the warp-bubble ansatz and writes
//! `stress_energy.tex` to the working directory. No command-line flags and
//! no configuration: the computation is fixed and deterministic. `RUST_LOG`
//! controls log verbosity only.

use std::path::Path;

use warpfield_engine::prelude::*;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let ctx = SymbolContext::warp_bubble();
    let derivation = derive(&ctx, &PipelineConfig::default())?;

    let document = render_document(&derivation.stress_energy);
    write_document(Path::new(OUTPUT_FILE), &document)?;

    tracing::info!(
        path = OUTPUT_FILE,
        hash = %document_hash(&document),
        "stress-energy document written"
    );
    Ok(())
}

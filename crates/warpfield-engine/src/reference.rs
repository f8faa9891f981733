//! Optional reference-document retrieval (the "external reconstruction"
//! collaborator).
//!
//! The upstream connection/curvature note publishes the ansatz's metric,
//! Ricci tensor, and Ricci scalar as display-math blocks. This module can
//! fetch that document -- a single synchronous GET with no retry -- and
//! extract the blocks by position for *human cross-checking* of the locally
//! derived curvature.
//!
//! Deliberately not implemented: parsing the typeset blocks into symbolic
//! expressions. Typeset-to-symbolic conversion of arbitrary notation is not
//! reliably automatable and would need its own grammar contract; the
//! derivation therefore never depends on this module, keeping the pipeline
//! deterministic and network-free. The blocks come back as raw strings,
//! nothing more.

use std::sync::OnceLock;

use regex::Regex;

/// The fixed reference-document URL.
pub const REFERENCE_DOCUMENT_URL: &str = "https://raw.githubusercontent.com/arcticoder/warp-bubble-connection-curvature/refs/heads/main/connection_curvature.tex";

/// The number of leading display-math blocks the reference document must
/// provide: metric, Ricci tensor, Ricci scalar, in that order.
pub const EXPECTED_BLOCK_COUNT: usize = 3;

/// Errors from retrieval and block extraction.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// The fetch completed but did not return 200.
    #[error("reference document fetch returned status {status}")]
    Retrieval { status: u16 },

    /// The fetch itself failed (connection, TLS, ...).
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Fewer display-math blocks than the extraction requires.
    #[error("reference document has {found} display-math blocks, expected at least {expected}")]
    Format { expected: usize, found: usize },
}

/// The first three display-math blocks of the reference document, raw and
/// unparsed, in the document's positional order.
#[derive(Debug, Clone)]
pub struct ReferenceBlocks {
    /// The typeset metric tensor.
    pub metric: String,
    /// The typeset Ricci tensor.
    pub ricci_tensor: String,
    /// The typeset Ricci scalar.
    pub ricci_scalar: String,
}

/// Fetch the reference document; success requires status 200.
pub fn fetch_document(url: &str) -> Result<String, ReferenceError> {
    let response = reqwest::blocking::get(url)?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(ReferenceError::Retrieval {
            status: status.as_u16(),
        });
    }
    Ok(response.text()?)
}

/// Extract every `\[ ... \]` display-math segment, in order.
pub fn extract_display_math(text: &str) -> Vec<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\\\[(.*?)\\\]").expect("display-math pattern is valid")
    });
    re.captures_iter(text)
        .map(|c| c[1].to_owned())
        .collect()
}

/// Split a fetched document into its leading named blocks.
///
/// # Errors
///
/// [`ReferenceError::Format`] when fewer than
/// [`EXPECTED_BLOCK_COUNT`] blocks are present.
pub fn reference_blocks(text: &str) -> Result<ReferenceBlocks, ReferenceError> {
    let mut blocks = extract_display_math(text);
    if blocks.len() < EXPECTED_BLOCK_COUNT {
        return Err(ReferenceError::Format {
            expected: EXPECTED_BLOCK_COUNT,
            found: blocks.len(),
        });
    }
    blocks.truncate(EXPECTED_BLOCK_COUNT);
    let ricci_scalar = blocks.pop().unwrap_or_default();
    let ricci_tensor = blocks.pop().unwrap_or_default();
    let metric = blocks.pop().unwrap_or_default();
    Ok(ReferenceBlocks {
        metric,
        ricci_tensor,
        ricci_scalar,
    })
}

/// Fetch and split in one call.
pub fn fetch_reference_blocks(url: &str) -> Result<ReferenceBlocks, ReferenceError> {
    let text = fetch_document(url)?;
    reference_blocks(&text)
}

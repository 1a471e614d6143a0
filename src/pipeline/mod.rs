//! Pipeline stages for PDF-to-podcast processing.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and keeps the network
//! collaborators (narration, synthesis, storage) out of the pure text path.
//!
//! ## Data Flow
//!
//! ```text
//! decode ──▶ extract ──▶ truncate ──▶ (narrate) ──▶ truncate ──▶ (synthesize)
//! (data URL)  (pdf text)  (paper cut)              (script cut)
//! ```
//!
//! 1. [`decode`]   — strict data-URL parsing plus mime and size validation
//! 2. [`extract`]  — PDF text extraction; runs in `spawn_blocking` because
//!    parsing is CPU-bound
//! 3. [`truncate`] — sentence-preserving cuts to the paper and script budgets
//!
//! The network stages live behind the traits in [`crate::providers`] and are
//! sequenced by [`crate::process::process_pdf`].

pub mod decode;
pub mod extract;
pub mod truncate;

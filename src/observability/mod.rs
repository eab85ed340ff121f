//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers (request dumps) ─┐
//! tower-http TraceLayer ────┼─→ tracing → logging.rs subscriber → stdout
//! lifecycle / server ───────┘
//! ```

pub mod logging;

//! # folio-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `MessageRelay` — hand a validated contact message to an email relay
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ContactFormController` — field updates, validation, single in-flight
//!     submission, timed success reset
//! - Orchestrate domain objects without knowing *how* delivery works
//!
//! ## Dependency rule
//! Depends on `folio-domain` only (plus `tokio` for the reset timer).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

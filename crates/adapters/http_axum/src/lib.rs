//! # folio-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered portfolio page** that works with
//!   **zero JavaScript**: plain HTML forms plus `<meta http-equiv="refresh">`
//!   while the contact form is sending or showing its success message
//! - Serve a small **JSON API** for the contact form (`/api/contact`)
//! - Keep one `ContactFormController` per visitor, keyed by a cookie
//! - Map application outcomes into HTTP responses (HTML or JSON)
//!
//! ## No-JS approach
//! - The page is rendered server-side as complete HTML.
//! - The contact form and the theme switch are `<form>` elements that POST
//!   back to the server and redirect (PRG pattern).
//! - The mobile menu is driven by a `?menu=open` query string.
//! - The headline typewriter is a CSS `steps()` animation.
//!
//! ## Dependency rule
//! Depends on `folio-app` (for port traits and services) and `folio-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
#[allow(clippy::missing_errors_doc)]
pub mod contact;
pub mod error;
#[allow(clippy::missing_errors_doc)]
pub mod page;
pub mod router;
pub mod sessions;
pub mod state;

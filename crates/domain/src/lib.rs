//! # folio-domain
//!
//! Pure domain model for the folio portfolio site.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **contact form** (`FormState`, `Field`) and its validation
//!   into a [`ContactMessage`](contact::ContactMessage)
//! - Define the **submission status** state values and outcomes
//! - Define the **portfolio content** (`Profile`: experience, projects, skills, …)
//! - Define small **page state** values (sections, theme, mobile menu,
//!   headline typewriter)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod contact;
pub mod email;
pub mod page;
pub mod profile;
pub mod submission;

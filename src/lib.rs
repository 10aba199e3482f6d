//! Editable details for content items.
//!
//! A content type declares, per property, an editable that knows how to
//! build an editor control, load the stored detail into it and save the
//! control's value back. Editables can also render a stored value
//! read-only, and url editables rebase stored paths when content moves
//! between application roots.

pub mod components;
pub mod config;
pub mod controllers;
pub mod controls;
pub mod definitions;
pub mod details;
pub mod display;
pub mod edit;
pub mod editable;
pub mod errors;
pub mod extractors;
pub mod htmx;
pub mod middleware;
pub mod models;
pub mod relativity;
pub mod routes;
pub mod transfer;
pub mod url;

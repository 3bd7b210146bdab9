//! Content rendering core for a collaborative wiki.
//!
//! - [`text`] turns page markup into safe HTML: markdown conversion,
//!   whitelist sanitization and custom token replacement, run in that order
//!   by a [`Pipeline`](text::Pipeline) built once at startup.
//! - [`page`] derives the slug and tag list of a stored page.
//! - [`config`] loads the settings both are built from.

pub mod config;
pub mod page;
pub mod text;

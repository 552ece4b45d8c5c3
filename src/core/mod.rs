//! Core scroll machinery: frame clock, scroll surface, position sources,
//! the smoother, and the page model.
//!
//! Nothing in this module depends on any TUI or rendering crate, so all of
//! it can be driven from tests with a fake surface and synthetic frames.

pub mod clock;
pub mod ease;
pub mod page;
pub mod smoother;
pub mod source;
pub mod surface;
pub mod trigger;

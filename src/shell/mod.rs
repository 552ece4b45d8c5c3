//! Hand-off to the desktop once the TUI has exited.
//!
//! All TUI rendering goes to the alternate screen (stderr-backed), so stdout
//! is left for the one line reporting what happened to the resume.

pub mod open;

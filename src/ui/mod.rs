//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* page model and the viewport offset and turns
//! them into cells on the terminal.  Nothing here mutates scroll state.

pub mod indicator;
pub mod layout;
pub mod page_widget;
pub mod popup;
pub mod scenes;
pub mod theme;

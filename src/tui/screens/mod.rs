//! TUI screens

mod form;

pub use form::{FormScreen, FormView};

//! Common reusable UI components
//!
//! Presentational building blocks shared by the pages.

pub mod button;
pub mod form;
pub mod panel;

pub use button::{Button, ButtonType};
pub use form::{FormControl, FormLabel, Input};
pub use panel::Panel;

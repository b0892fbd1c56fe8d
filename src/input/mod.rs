//! Input module - edge-triggered action flags shared by UI and gameplay.

mod frame;
mod plugin;

pub use frame::{Action, InputFrame};
pub use plugin::{InputBindings, InputPlugin};

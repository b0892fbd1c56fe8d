//! Core game module - states, events, and frame phases.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod schedule;
mod states;

pub use events::*;
pub use plugin::CorePlugin;
pub use schedule::TickPhase;
pub use states::*;

//! Jump-mode engine for jumplabel.
//!
//! Owns the inactive/active state machine, dispatches typed characters
//! against the current label map, applies the resulting cursor or
//! selection mutation, and debounces viewport-driven rescans. The host
//! drives it: every handler takes the host by reference and returns
//! before the next event arrives.

mod action;
mod debounce;
mod engine;
mod state;

pub use debounce::RefreshDebounce;
pub use engine::JumpEngine;
pub use state::{JumpState, ModeFlags};

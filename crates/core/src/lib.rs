//! Core types and traits for jumplabel.
//!
//! This crate provides the foundational abstractions shared by the
//! scanner and the engine, without coupling them to any concrete host
//! editor: coordinate types, the visible-line snapshot, overlay
//! decorations, and the collaborator traits the host implements.

pub mod command;
pub mod editor;
pub mod line;
pub mod position;
pub mod subscription;

pub use command::{HostEvent, JumpCommand};
pub use editor::{Decoration, DecorationStyle, EditorId, EditorView, Nudge};
pub use line::{JumpHost, LineProvider, VisibleLine};
pub use position::{Position, Selection};
pub use subscription::Subscription;

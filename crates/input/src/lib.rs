//! Control surface: already-decoded commands consumed by the grid animator.
//!
//! # Invariants
//! - Commands are applied between frames, never during a grid update.
//! - Raw key codes never reach this crate; an upstream mapper decodes them.

pub mod action;
pub mod queue;

pub use action::Command;
pub use queue::CommandQueue;

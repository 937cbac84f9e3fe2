//! Terminal snake with a timed bonus food.
//!
//! The game core ([`game`], [`lifecycle`], [`scheduler`]) has no I/O; the
//! terminal front end ([`input`], [`renderer`], [`ui`], [`terminal_runtime`])
//! and the [`audio`] sink sit around it.

pub mod audio;
pub mod config;
pub mod error;
pub mod events;
pub mod food;
pub mod game;
pub mod input;
pub mod lifecycle;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

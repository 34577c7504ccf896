//! Snake Rival - a terminal snake game against a heuristic opponent
//!
//! This library provides:
//! - Core game logic and the rival's navigation heuristic (game module)
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Per-process play statistics (metrics module)
//! - Interactive and self-playing front ends (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

//! Snake Pilot - a grid Snake game with a route-finding autopilot
//!
//! This library provides:
//! - Core game logic: movement, growth and collisions (game module)
//! - Pluggable grid route search, BFS and DFS (pathfinding module)
//! - The autopilot that turns a route into a heading (autopilot module)
//! - The menu / playing / game-over state machine (session module)
//! - TUI rendering and key mapping (render, input modules)
//! - Interactive and headless benchmark front-ends (modes module)

pub mod autopilot;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod pathfinding;
pub mod render;
pub mod session;

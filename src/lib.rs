//! Nightfall Farm library crate: re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can import game types, systems, and resources without needing a
//! window or GPU.

pub mod shared;
pub mod config;
pub mod input;
pub mod data;
pub mod daynight;
pub mod health;
pub mod inventory;
pub mod player;
pub mod farming;
pub mod animals;
pub mod predators;
pub mod economy;
pub mod world;
pub mod game;
pub mod ui;

//! Catalogue of every Standard Algebraic Notation string a game on an 8×8
//! board can produce, and a small HTTP service that serves it.

pub mod api;
pub mod config;
pub mod engine;

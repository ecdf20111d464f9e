//! Core types and definitions for the BARRAGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, components, entity kinds, input snapshots, and
//! constants. It has no dependency on any runtime framework.

pub mod components;
pub mod constants;
pub mod input;
pub mod kind;
pub mod types;

//! # banter_core
//!
//! Core chat relay logic for Banter.

pub mod chat;
pub mod inference;
pub mod persona;
pub mod relay;

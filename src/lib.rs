//! Buddy - Employee Support Assistant
//!
//! A conversational assistant that answers policy questions from a knowledge
//! base and lets employees request leave and check its status through a
//! multi-turn dialogue.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

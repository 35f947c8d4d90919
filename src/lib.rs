//! Debate Practice - round-based debate sparring engine
//!
//! A user argues a proposition against a generated opponent. Every round is
//! scored with a text heuristic, and the debate ends with a closing analysis.
//! When no generation backend is reachable the debate keeps going on canned
//! fallback content.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

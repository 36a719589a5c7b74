//! Transit query server.
//!
//! Loads a bus network (stops, lines and road distances), builds a
//! travel-time graph from it and answers: "which lines serve this stop,
//! what does this line look like, and what is the fastest way from here
//! to there?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod network;
pub mod router;
pub mod web;

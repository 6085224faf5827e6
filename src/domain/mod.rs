//! Domain logic

pub mod graph;

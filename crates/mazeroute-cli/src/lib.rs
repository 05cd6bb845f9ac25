//! Maze route CLI library.
//!
//! This crate provides the command-line front end for the maze route
//! finder, including terminal styling and output formatting.

pub mod output;
pub mod terminal;

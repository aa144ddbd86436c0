//! Main module for cire library functionality
//!
//! Data flows through the submodules in this order:
//!
//!     loader -> partition -> assembling -> formats
//!
//! `ast` holds the shared data model and `text` the source buffer that every stage
//! reads from. `pipeline` runs the stages in sequence for a single file.

pub mod assembling;
pub mod ast;
pub mod config;
pub mod formats;
pub mod loader;
pub mod partition;
pub mod pipeline;
pub mod prose;
pub mod text;

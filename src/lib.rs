//! # cire
//!
//! Builds literate documents out of a source file: code annotations from any number of
//! analyzers are flattened into a non-overlapping partition, then interleaved with the
//! file's comments so that comments read as prose and everything else reads as code.
//!
//! The heavy lifting lives in [`cire::partition`] and [`cire::assembling`]; the rest of
//! the crate loads annotations, renders documents and wires it all together.

pub mod cire;

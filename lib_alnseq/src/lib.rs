#![forbid(clippy::mod_module_files)]

//! Pairwise sequence alignment: global (Needleman-Wunsch), local
//! (Smith-Waterman), a memory-efficient local variant returning
//! coordinates, and Hirschberg's divide-and-conquer global aligner, all
//! over byte sequences with a configurable substitution matrix, affine or
//! linear gap penalties, and a deterministic tie-break.

pub mod aligner;
pub mod alignment;
pub mod alignment_configuration;
pub mod alignment_matrix;
pub mod error;
pub mod hirschberg;
pub mod mem_waterman;
pub mod needleman;
pub mod scoring;
pub mod sequence;
pub mod traceback;
pub mod waterman;

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Scalar aliases, pruning tolerances and sentinels.
pub mod math;
/// Per-matrix configuration.
pub mod config;
/// Sparse entry store, block codec, logical matrices and CSC export.
pub mod sparse;
/// Dense vector buffers in the solver's block layout.
pub mod dense;
/// Factorization backend contract and the bundled dense reference backend.
pub mod backend;
/// One-shot solve and multiply helpers.
pub mod solve;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

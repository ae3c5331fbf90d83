//! Property-based tests for the static analyses.
//!
//! Random loop bodies are generated and feature extraction and the legality
//! gate are checked for their aggregate and purity invariants.

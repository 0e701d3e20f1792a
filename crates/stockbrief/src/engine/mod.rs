//! Analysis Engine
//!
//! Coordination layer running normalize, fetch, compose, request and
//! assembly for one instrument or the whole watchlist

pub mod analysis_engine;

pub use analysis_engine::AnalysisEngine;

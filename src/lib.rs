//! Word-frequency analysis behind a word-cloud front end.
//!
//! Text goes through [`analysis::Tokenizer`], is counted against the
//! [`core::StopwordStore`] and ranked into a top list and a weighted cloud
//! population. [`core::AnalysisSession`] ties these together with persisted
//! state and is driven by the front end through its `on_*` handlers.

pub mod analysis;
pub mod config;
pub mod core;
pub mod persistence;
pub mod render;

pub use crate::{
    config::AnalysisConfig,
    core::{
        AnalysisSession,
        RankedResult,
        SessionEvent,
        WordCloudError,
    },
};

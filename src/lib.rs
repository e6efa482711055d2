// Library exports for ribomerge
pub mod codon;
pub mod config;
pub mod expression;
pub mod io;
pub mod logging;
pub mod merge;
pub mod output;
pub mod pair_prob;

pub use config::{run, MergeConfig};

pub mod demo;
pub mod metrics;
pub mod normalizer;
pub mod prompt;
pub mod service;
pub mod validator;

pub use service::{AnalysisMode, AnalysisOutcome, Analyzer};

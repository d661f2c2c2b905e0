//! Terminal output: environment detection and progress reporting

pub mod context;
pub mod progress;

pub use context::UiContext;
pub use progress::{BatchProgress, TaskSpinner};

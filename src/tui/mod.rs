//! TUI module: Terminal User Interface using Ratatui.
//!
//! One screen: the health-metrics form, the result panel once a
//! prediction arrives, and a particle overlay on top.

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::CardioTheme;
pub use worker::{PredictionWorker, PredictionWorkerHandle, WorkerOutcome, WorkerPoll};

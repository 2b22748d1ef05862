//! Logging utilities for operations and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{
    kb_summary, log_batch_complete, log_batch_start, log_kb_load_complete, log_kb_load_start,
    log_kb_ready,
};
pub use self::progress::{create_main_progress_bar, finish_progress_bar};

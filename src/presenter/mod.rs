use anyhow::Result;

use crate::pipeline::SearchOutcome;

mod console;
#[cfg(feature = "gui")]
pub mod window;

pub use console::{render_table, ConsolePresenter, QuietPresenter};

/// Where results and messages end up; chosen once at startup
pub trait Presenter {
    /// Plain information, e.g. a job count
    fn notify(&mut self, message: &str) -> Result<()>;

    /// Non-fatal problem the user should know about
    fn warn(&mut self, message: &str) -> Result<()>;

    /// Show the search outcome: its warnings, then the filtered listings
    fn present(&mut self, outcome: &SearchOutcome) -> Result<()>;
}

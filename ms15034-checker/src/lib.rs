// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

pub mod commands;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_probe_config, load_targets_from_argument, report_format};

// Re-export batch functionality from ms15034-core
pub use ms15034_core::batch::{TargetSource, execute_batch_until_ctrl_c, load_targets};
pub use ms15034_core::report::{CheckEvent, ReportFormat};

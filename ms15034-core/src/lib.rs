pub mod batch;
pub mod check;
pub mod report;

pub use batch::{
    BatchSummary, SkippedLine, TargetList, TargetSource, execute_batch, execute_batch_until_ctrl_c,
    load_targets,
};
pub use check::{TargetOutcome, check_target};
pub use report::{CheckEvent, CheckEventCallback, ReportFormat};

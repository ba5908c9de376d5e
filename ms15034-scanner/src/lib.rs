pub mod config;
pub mod error;
pub mod probe;
pub mod result;
pub mod signature;
pub mod target;

pub use config::ProbeConfig;
pub use error::ScanError;
pub use probe::Prober;
pub use result::{ProbeResult, Verdict};
pub use signature::Signatures;
pub use target::Target;

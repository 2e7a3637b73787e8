/// Configuration subsystem - Editor settings and preferences
///
/// Loads `.noterrc` files into an `RcConfig` that the editor builder
/// consumes.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};

// Handler modules
pub mod catalog;
pub mod estimate;
pub mod status;
pub mod system;
pub mod wizard;

// Re-export all handler functions
pub use catalog::handle_catalog;
pub use estimate::{EstimateArgs, handle_estimate};
pub use status::{handle_deployments, handle_status};
pub use system::{handle_config, handle_health};
pub use wizard::handle_wizard;

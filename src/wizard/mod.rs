//! Interactive provisioning wizard
//!
//! Five steps: provider, credentials, architecture, review, monitor. The
//! [`WizardState`] holds the data and pure transitions, [`WizardController`]
//! performs backend calls and owns the status poll, and the prompt modules
//! render each step in the terminal.

pub mod controller;
pub mod orchestrator;
pub mod poller;
pub mod prompts;
pub mod render;
pub mod state;

pub use controller::{MonitorEvent, WizardController};
pub use orchestrator::{WizardResult, run_wizard};
pub use poller::{PollHandle, PollUpdate, spawn_status_poller};
pub use state::{
    EstimateRequest, LaunchRequest, Recalculate, RequestPurpose, Ticket, ValidationState,
    WizardState, WizardStep,
};

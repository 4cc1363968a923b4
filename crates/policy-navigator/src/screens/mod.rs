//! Screen controllers mediating between user actions and the remote service.
//!
//! All three screens are instances of one generic [`state::AsyncOperation`]
//! state machine. Each screen owns its state exclusively and issues at most
//! one request at a time; resolved entities live only as long as the screen
//! that requested them.

mod benefits;
mod eligibility;
mod interpret;
pub mod state;

#[cfg(test)]
mod tests;

pub use benefits::BenefitsScreen;
pub use eligibility::EligibilityScreen;
pub use interpret::InterpretScreen;
pub use state::{AsyncOperation, ViewState};

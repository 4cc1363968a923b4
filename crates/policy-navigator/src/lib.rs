//! Client-side orchestration for the policy navigator service.
//!
//! The backend interprets raw policy text into eligibility rules and matches
//! citizen profiles against its scheme catalog; this crate owns the typed
//! entities, the HTTP gateway that speaks the backend contract, the screen
//! state machines driving user-triggered requests, and the background
//! status poller.

pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod screens;
pub mod status;
pub mod telemetry;

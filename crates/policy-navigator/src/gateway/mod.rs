use crate::domain::{BenefitMatch, CitizenProfile, Policy, SystemStatus};
use async_trait::async_trait;

mod http;

pub use http::HttpBenefitsGateway;

/// Access to the remote interpretation and matching service.
///
/// Implementations issue exactly one network exchange per call and never
/// retry.
#[async_trait]
pub trait BenefitsGateway: Send + Sync {
    /// Fetch the backend's sample scheme catalog.
    async fn fetch_sample_policies(&self) -> Result<Vec<Policy>, GatewayError>;

    /// Submit raw policy text for rule extraction.
    async fn interpret_policy(
        &self,
        text: &str,
        name: Option<&str>,
    ) -> Result<Policy, GatewayError>;

    /// Match a citizen profile against the scheme catalog.
    async fn match_benefits(
        &self,
        profile: &CitizenProfile,
    ) -> Result<Vec<BenefitMatch>, GatewayError>;

    /// Probe backend connectivity and feature flags.
    async fn fetch_system_status(&self) -> Result<SystemStatus, GatewayError>;
}

/// Single undifferentiated remote-failure signal.
///
/// Non-success statuses, transport errors, and malformed bodies all collapse
/// here; callers cannot branch on the cause. The carried detail is for
/// diagnostics only and must never reach a user-facing surface.
#[derive(Debug, thiserror::Error)]
#[error("remote service failure: {0}")]
pub struct GatewayError(String);

impl GatewayError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

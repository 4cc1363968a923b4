use super::state::{AsyncOperation, ViewState};
use crate::domain::Policy;
use crate::gateway::BenefitsGateway;
use std::sync::Arc;
use tracing::warn;

const FAILURE_MESSAGE: &str = "Failed to load benefits. Please try again.";

/// Screen controller for the sample benefit catalog listing.
pub struct BenefitsScreen<G> {
    gateway: Arc<G>,
    operation: AsyncOperation<Vec<Policy>>,
}

impl<G> BenefitsScreen<G>
where
    G: BenefitsGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            operation: AsyncOperation::new(FAILURE_MESSAGE),
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Policy>> {
        self.operation.state()
    }

    /// Fetch the catalog. Returns `false` without issuing a request when one
    /// is already outstanding.
    pub async fn load(&mut self) -> bool {
        if !self.operation.begin() {
            return false;
        }

        match self.gateway.fetch_sample_policies().await {
            Ok(policies) => self.operation.succeed(policies),
            Err(err) => {
                warn!(error = %err, "benefit catalog fetch failed");
                self.operation.fail();
            }
        }

        true
    }
}

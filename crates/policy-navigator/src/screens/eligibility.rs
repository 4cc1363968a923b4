use super::state::{AsyncOperation, ViewState};
use crate::domain::{BenefitMatch, CitizenProfile};
use crate::gateway::BenefitsGateway;
use std::sync::Arc;
use tracing::warn;

const FAILURE_MESSAGE: &str = "Failed to check eligibility. Please try again.";

/// Screen controller for matching a citizen profile against the scheme
/// catalog.
///
/// Matches arrive already judged eligible by the backend; individual
/// reasons inside a match may still be unsatisfied and are carried as
/// given, with no overall flag derived on this side.
pub struct EligibilityScreen<G> {
    gateway: Arc<G>,
    operation: AsyncOperation<Vec<BenefitMatch>>,
}

impl<G> EligibilityScreen<G>
where
    G: BenefitsGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            operation: AsyncOperation::new(FAILURE_MESSAGE),
        }
    }

    pub fn state(&self) -> &ViewState<Vec<BenefitMatch>> {
        self.operation.state()
    }

    /// Submit a profile for matching. Returns `false` without issuing a
    /// request when one is already outstanding.
    pub async fn submit(&mut self, profile: &CitizenProfile) -> bool {
        if !self.operation.begin() {
            return false;
        }

        match self.gateway.match_benefits(profile).await {
            Ok(matches) => self.operation.succeed(matches),
            Err(err) => {
                warn!(error = %err, "eligibility check failed");
                self.operation.fail();
            }
        }

        true
    }
}

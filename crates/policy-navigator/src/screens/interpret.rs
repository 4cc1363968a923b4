use super::state::{AsyncOperation, ViewState};
use crate::domain::Policy;
use crate::gateway::BenefitsGateway;
use std::sync::Arc;
use tracing::warn;

const FAILURE_MESSAGE: &str = "Failed to interpret policy. Please try again.";

/// Screen controller for submitting raw policy text for rule extraction.
pub struct InterpretScreen<G> {
    gateway: Arc<G>,
    operation: AsyncOperation<Policy>,
}

impl<G> InterpretScreen<G>
where
    G: BenefitsGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            operation: AsyncOperation::new(FAILURE_MESSAGE),
        }
    }

    pub fn state(&self) -> &ViewState<Policy> {
        self.operation.state()
    }

    /// Submit policy text for interpretation. Returns `false` without
    /// issuing a request when one is already outstanding; exclusive
    /// ownership of the screen otherwise serializes submissions.
    pub async fn submit(&mut self, text: &str, name: Option<&str>) -> bool {
        if !self.operation.begin() {
            return false;
        }

        match self.gateway.interpret_policy(text, name).await {
            Ok(policy) => self.operation.succeed(policy),
            Err(err) => {
                warn!(error = %err, "policy interpretation failed");
                self.operation.fail();
            }
        }

        true
    }
}

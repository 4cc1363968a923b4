use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::{
    BenefitMatch, CitizenProfile, EligibilityReason, EligibilityResult, Policy, Rule,
    RuleOperator, SystemStatus,
};
use crate::gateway::{BenefitsGateway, GatewayError};

/// Calls observed by the scripted gateway, with the exact arguments given.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum RecordedCall {
    FetchSamplePolicies,
    InterpretPolicy {
        text: String,
        name: Option<String>,
    },
    MatchBenefits {
        profile: CitizenProfile,
    },
    FetchSystemStatus,
}

/// In-memory gateway returning canned fixtures and logging every call.
pub(super) struct ScriptedGateway {
    failures_remaining: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGateway {
    pub(super) fn healthy() -> Arc<Self> {
        Arc::new(Self::with_failures(0))
    }

    pub(super) fn failing() -> Arc<Self> {
        Arc::new(Self::with_failures(usize::MAX))
    }

    pub(super) fn failing_once() -> Arc<Self> {
        Arc::new(Self::with_failures(1))
    }

    fn with_failures(failures: usize) -> Self {
        Self {
            failures_remaining: AtomicUsize::new(failures),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log mutex poisoned").clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .expect("call log mutex poisoned")
            .push(call);
    }

    fn next_outcome(&self) -> Result<(), GatewayError> {
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining == 0 {
            return Ok(());
        }
        if remaining != usize::MAX {
            self.failures_remaining.fetch_sub(1, Ordering::SeqCst);
        }
        Err(GatewayError::new("scripted failure"))
    }
}

#[async_trait]
impl BenefitsGateway for ScriptedGateway {
    async fn fetch_sample_policies(&self) -> Result<Vec<Policy>, GatewayError> {
        self.record(RecordedCall::FetchSamplePolicies);
        self.next_outcome()?;
        Ok(sample_policies())
    }

    async fn interpret_policy(
        &self,
        text: &str,
        name: Option<&str>,
    ) -> Result<Policy, GatewayError> {
        self.record(RecordedCall::InterpretPolicy {
            text: text.to_string(),
            name: name.map(str::to_string),
        });
        self.next_outcome()?;
        Ok(scholarship_policy())
    }

    async fn match_benefits(
        &self,
        profile: &CitizenProfile,
    ) -> Result<Vec<BenefitMatch>, GatewayError> {
        self.record(RecordedCall::MatchBenefits {
            profile: profile.clone(),
        });
        self.next_outcome()?;
        Ok(vec![scholarship_match(), mixed_reason_match()])
    }

    async fn fetch_system_status(&self) -> Result<SystemStatus, GatewayError> {
        self.record(RecordedCall::FetchSystemStatus);
        self.next_outcome()?;
        Ok(SystemStatus {
            connected: true,
            ..SystemStatus::default()
        })
    }
}

pub(super) fn rule(key: &str, operator: RuleOperator, value: Value) -> Rule {
    Rule {
        key: key.to_string(),
        operator,
        value,
    }
}

pub(super) fn reason(satisfied: bool, message: &str) -> EligibilityReason {
    EligibilityReason {
        satisfied,
        message: message.to_string(),
    }
}

pub(super) fn scholarship_policy() -> Policy {
    Policy {
        id: Some("pol-001".to_string()),
        name: "Karnataka Education Scholarship".to_string(),
        description: Some(
            "Scholarship for students from low income families in Karnataka".to_string(),
        ),
        benefits: Some("Education scholarship up to 50000 INR per year".to_string()),
        raw_text: "Students residing in Karnataka with family income below 8 lakh per annum \
                   are eligible for the state education scholarship."
            .to_string(),
        rules: vec![
            rule("state", RuleOperator::Equals, json!("Karnataka")),
            rule("income", RuleOperator::LessOrEqual, json!(800000)),
            rule("is_student", RuleOperator::Equals, json!(true)),
        ],
    }
}

pub(super) fn housing_policy() -> Policy {
    Policy {
        id: Some("pol-002".to_string()),
        name: "Low Income Housing Subsidy".to_string(),
        description: Some("Housing support for households below the income ceiling".to_string()),
        benefits: Some("Rental subsidy for eligible households".to_string()),
        raw_text: "Households with annual income below 5 lakh qualify for the housing subsidy."
            .to_string(),
        rules: vec![rule("income", RuleOperator::LessOrEqual, json!(500000))],
    }
}

pub(super) fn sample_policies() -> Vec<Policy> {
    vec![scholarship_policy(), housing_policy()]
}

pub(super) fn scholarship_match() -> BenefitMatch {
    BenefitMatch {
        policy: scholarship_policy(),
        eligibility: EligibilityResult {
            reasons: vec![
                reason(true, "Requirement met: state == Karnataka (your value: Karnataka)"),
                reason(true, "Requirement met: income <= 800000 (your value: 350000)"),
                reason(true, "Requirement met: is_student == true (your value: true)"),
            ],
        },
        application_guidance: Some(
            "Apply through the state scholarship portal before March 31.".to_string(),
        ),
    }
}

/// A match the backend still delivered even though one reason is
/// unsatisfied. The client renders it as given.
pub(super) fn mixed_reason_match() -> BenefitMatch {
    BenefitMatch {
        policy: housing_policy(),
        eligibility: EligibilityResult {
            reasons: vec![
                reason(true, "Requirement met: income <= 500000 (your value: 350000)"),
                reason(false, "Missing required information: residency_years"),
            ],
        },
        application_guidance: None,
    }
}

pub(super) fn student_profile() -> CitizenProfile {
    CitizenProfile {
        income: 350000.0,
        state: "Karnataka".to_string(),
        is_student: true,
    }
}

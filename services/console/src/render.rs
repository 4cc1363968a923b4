use policy_navigator::domain::{
    BenefitMatch, CitizenProfile, EligibilityReason, FeatureMap, Policy, Rule,
};
use policy_navigator::status::StatusSnapshot;
use serde_json::Value;

/// Rule values keep their backend runtime type; strings render without
/// quotes, everything else renders as JSON.
pub(crate) fn rule_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// One numbered line per rule, in extraction order.
pub(crate) fn rule_lines(rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            format!(
                "{}. {} {} {}",
                index + 1,
                rule.key,
                rule.operator,
                rule_value_text(&rule.value)
            )
        })
        .collect()
}

/// One marker line per evaluation reason, in the backend's order. A match
/// delivered as eligible may still carry unsatisfied reasons; they are
/// rendered as given.
pub(crate) fn reason_lines(reasons: &[EligibilityReason]) -> Vec<String> {
    reasons
        .iter()
        .map(|reason| {
            let marker = if reason.satisfied { "✓" } else { "✗" };
            format!("{marker} {}", reason.message)
        })
        .collect()
}

/// One marker line per feature flag, in the backend's order.
pub(crate) fn feature_lines(features: &FeatureMap) -> Vec<String> {
    features
        .iter()
        .map(|(name, enabled)| {
            let marker = if enabled { "✓" } else { "○" };
            format!("{marker} {name}")
        })
        .collect()
}

pub(crate) fn status_line(snapshot: &StatusSnapshot) -> String {
    match snapshot {
        StatusSnapshot::Loading => "Checking system status...".to_string(),
        StatusSnapshot::Unavailable => "Offline: backend unreachable".to_string(),
        StatusSnapshot::Ready(status) => {
            let connectivity = if status.connected {
                "Connected"
            } else {
                "Offline"
            };
            let mode = status.mode.as_deref().unwrap_or("unknown mode");
            let enabled = status
                .features
                .iter()
                .filter(|(_, enabled)| *enabled)
                .count();
            format!(
                "{connectivity} | {mode} | {enabled}/{} features enabled",
                status.features.len()
            )
        }
    }
}

pub(crate) fn policy_details(policy: &Policy) {
    println!("Policy: {}", policy.name);
    if let Some(description) = &policy.description {
        println!("Description: {description}");
    }
    if let Some(benefits) = &policy.benefits {
        println!("Benefits: {benefits}");
    }

    if policy.rules.is_empty() {
        println!("Eligibility Rules: none extracted");
    } else {
        println!("Eligibility Rules ({})", policy.rules.len());
        for line in rule_lines(&policy.rules) {
            println!("  {line}");
        }
    }
}

pub(crate) fn benefit_matches(profile: &CitizenProfile, matches: &[BenefitMatch]) {
    println!(
        "Citizen profile: income {} INR | state {} | student {}",
        profile.income, profile.state, profile.is_student
    );

    if matches.is_empty() {
        println!("\nNo eligible benefits found");
        return;
    }

    println!("\nFound {} eligible benefit(s)", matches.len());
    for (index, benefit) in matches.iter().enumerate() {
        println!("\n{}. {} [✓ Eligible]", index + 1, benefit.policy.name);
        if let Some(benefits) = &benefit.policy.benefits {
            println!("   Benefits: {benefits}");
        }
        if !benefit.eligibility.reasons.is_empty() {
            println!("   Evaluation:");
            for line in reason_lines(&benefit.eligibility.reasons) {
                println!("     {line}");
            }
        }
        if let Some(guidance) = &benefit.application_guidance {
            println!("   How to apply: {guidance}");
        }
    }
}

pub(crate) fn policy_catalog(policies: &[Policy]) {
    if policies.is_empty() {
        println!("No benefits available at the moment.");
        return;
    }

    println!("Available benefit schemes ({})", policies.len());
    for (index, policy) in policies.iter().enumerate() {
        println!("\n{}. {}", index + 1, policy.name);
        if let Some(description) = &policy.description {
            println!("   {description}");
        }
        if let Some(benefits) = &policy.benefits {
            println!("   Benefits: {benefits}");
        }
        if !policy.rules.is_empty() {
            println!("   Eligibility Rules ({})", policy.rules.len());
            for line in rule_lines(&policy.rules) {
                println!("     {line}");
            }
        }
    }
}

pub(crate) fn status_snapshot(snapshot: &StatusSnapshot) {
    match snapshot {
        StatusSnapshot::Loading => println!("Checking system status..."),
        StatusSnapshot::Unavailable => {
            println!("System Status: Offline");
            println!("The policy navigation backend is unreachable.");
        }
        StatusSnapshot::Ready(status) => {
            println!(
                "System Status: {}",
                if status.connected { "Connected" } else { "Offline" }
            );
            if let Some(mode) = &status.mode {
                println!("Mode: {mode}");
            }
            if let Some(registry_url) = &status.registry_url {
                println!("Registry: {registry_url}");
            }
            if let Some(mqtt_broker) = &status.mqtt_broker {
                println!("MQTT broker: {mqtt_broker}");
            }
            if let Some(agent_did) = &status.agent_did {
                println!("Agent DID: {agent_did}");
            }
            if let Some(verified) = status.identity_verified {
                println!("Identity verified: {}", if verified { "yes" } else { "no" });
            }
            if !status.features.is_empty() {
                println!("Features:");
                for line in feature_lines(&status.features) {
                    println!("  {line}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_navigator::domain::{RuleOperator, SystemStatus};
    use serde_json::json;

    fn rule(key: &str, operator: RuleOperator, value: Value) -> Rule {
        Rule {
            key: key.to_string(),
            operator,
            value,
        }
    }

    #[test]
    fn rule_lines_number_rules_in_extraction_order() {
        let rules = vec![
            rule("state", RuleOperator::Equals, json!("Karnataka")),
            rule("income", RuleOperator::LessOrEqual, json!(800000)),
            rule("is_student", RuleOperator::Equals, json!(true)),
        ];

        assert_eq!(
            rule_lines(&rules),
            vec![
                "1. state == Karnataka",
                "2. income <= 800000",
                "3. is_student == true"
            ]
        );
    }

    #[test]
    fn rule_lines_are_empty_for_no_rules() {
        assert!(rule_lines(&[]).is_empty());
    }

    #[test]
    fn rule_value_text_renders_strings_without_quotes() {
        assert_eq!(rule_value_text(&json!("Karnataka")), "Karnataka");
        assert_eq!(rule_value_text(&json!(800000)), "800000");
        assert_eq!(rule_value_text(&json!(true)), "true");
        assert_eq!(
            rule_value_text(&json!(["Karnataka", "Kerala"])),
            r#"["Karnataka","Kerala"]"#
        );
    }

    #[test]
    fn reason_lines_mark_satisfaction_from_the_flag_not_the_message() {
        let reasons = vec![
            EligibilityReason {
                satisfied: true,
                message: "Requirement met: income <= 500000 (your value: 350000)".to_string(),
            },
            EligibilityReason {
                satisfied: false,
                message: "Missing required information: residency_years".to_string(),
            },
        ];

        assert_eq!(
            reason_lines(&reasons),
            vec![
                "✓ Requirement met: income <= 500000 (your value: 350000)",
                "✗ Missing required information: residency_years"
            ]
        );
    }

    #[test]
    fn feature_lines_keep_backend_order_and_mark_disabled_flags() {
        let features: FeatureMap = [
            ("policy_interpretation".to_string(), true),
            ("agent_registry".to_string(), false),
            ("did_identity".to_string(), true),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            feature_lines(&features),
            vec![
                "✓ policy_interpretation",
                "○ agent_registry",
                "✓ did_identity"
            ]
        );
    }

    #[test]
    fn status_line_summarizes_a_ready_snapshot() {
        let status = SystemStatus {
            connected: true,
            mode: Some("Real Network".to_string()),
            features: [
                ("policy_interpretation".to_string(), true),
                ("agent_registry".to_string(), false),
            ]
            .into_iter()
            .collect(),
            ..SystemStatus::default()
        };

        assert_eq!(
            status_line(&StatusSnapshot::Ready(status)),
            "Connected | Real Network | 1/2 features enabled"
        );
    }

    #[test]
    fn status_line_reports_unreachable_backend() {
        assert_eq!(
            status_line(&StatusSnapshot::Unavailable),
            "Offline: backend unreachable"
        );
    }
}

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Comparison vocabulary used by machine-extracted eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleOperator {
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "in")]
    Membership,
}

impl RuleOperator {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Equals,
            Self::NotEquals,
            Self::LessThan,
            Self::LessOrEqual,
            Self::GreaterThan,
            Self::GreaterOrEqual,
            Self::Membership,
        ]
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::Membership => "in",
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One eligibility condition as a (key, operator, value) triple.
///
/// `value` keeps whatever runtime type the backend extracted (string,
/// number, boolean, or a list for membership checks); the display layer
/// formats it from that runtime type alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    pub operator: RuleOperator,
    pub value: Value,
}

/// A government scheme description plus its extracted eligibility rules.
///
/// Rule order equals extraction order and is display-significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    pub raw_text: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// User-submitted attributes evaluated against scheme rules. Immutable once
/// submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenProfile {
    pub income: f64,
    pub state: String,
    pub is_student: bool,
}

/// One rule's evaluation outcome with a human-readable explanation.
///
/// The backend echoes the originating rule alongside each reason; the
/// client renders only the flag and message, so that echo is left to
/// serde's unknown-field handling rather than being decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReason {
    pub satisfied: bool,
    pub message: String,
}

/// Ordered per-rule reasons for one evaluated policy.
///
/// The backend sends additional summary fields alongside the reasons; the
/// client neither reads nor re-derives an overall eligibility flag, so only
/// the reasons are decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    #[serde(default)]
    pub reasons: Vec<EligibilityReason>,
}

/// A policy the backend judged eligible for a profile, with its evaluation
/// reasons and optional guidance text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitMatch {
    pub policy: Policy,
    pub eligibility: EligibilityResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_guidance: Option<String>,
}

/// Snapshot of backend network connectivity and enabled feature flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_broker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_did: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "FeatureMap::is_empty")]
    pub features: FeatureMap,
}

/// Ordered mapping from feature name to enabled flag.
///
/// The key set is open-ended and the backend's object order is meaningful
/// for display, so entries keep their wire order instead of being resorted
/// into a keyed map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureMap {
    entries: Vec<(String, bool)>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a feature, keeping the original position on update.
    pub fn insert(&mut self, name: impl Into<String>, enabled: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = enabled,
            None => self.entries.push((name, enabled)),
        }
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, enabled)| *enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(name, enabled)| (name.as_str(), *enabled))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, bool)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, enabled) in iter {
            map.insert(name, enabled);
        }
        map
    }
}

impl Serialize for FeatureMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, enabled) in &self.entries {
            map.serialize_entry(name, enabled)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FeatureMapVisitor;

        impl<'de> Visitor<'de> for FeatureMapVisitor {
            type Value = FeatureMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature names to booleans")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = FeatureMap::new();
                while let Some((name, enabled)) = access.next_entry::<String, bool>()? {
                    map.insert(name, enabled);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FeatureMapVisitor)
    }
}

use super::{BenefitsGateway, GatewayError};
use crate::config::BackendConfig;
use crate::domain::{BenefitMatch, CitizenProfile, Policy, SystemStatus};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SAMPLE_POLICIES_PATH: &str = "/api/policies/sample";
const INTERPRET_PATH: &str = "/api/policies/interpret";
const MATCH_PATH: &str = "/api/citizens/match";
const STATUS_PATH: &str = "/api/citizens/status";

/// Gateway speaking the backend's HTTP/JSON contract.
#[derive(Debug, Clone)]
pub struct HttpBenefitsGateway {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct InterpretRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct InterpretResponse {
    policy: Policy,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    matched_benefits: Vec<BenefitMatch>,
}

impl HttpBenefitsGateway {
    pub fn new(config: &BackendConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(format!("http client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let request = format!("GET {path}");
        debug!(%request, "issuing gateway request");
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|err| GatewayError::new(format!("{request}: {err}")))?;
        Self::decode(&request, response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = format!("POST {path}");
        debug!(%request, "issuing gateway request");
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|err| GatewayError::new(format!("{request}: {err}")))?;
        Self::decode(&request, response).await
    }

    async fn decode<T>(request: &str, response: Response) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::new(format!(
                "{request}: status {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::new(format!("{request}: {err}")))
    }
}

#[async_trait]
impl BenefitsGateway for HttpBenefitsGateway {
    async fn fetch_sample_policies(&self) -> Result<Vec<Policy>, GatewayError> {
        self.get_json(SAMPLE_POLICIES_PATH).await
    }

    async fn interpret_policy(
        &self,
        text: &str,
        name: Option<&str>,
    ) -> Result<Policy, GatewayError> {
        let body = InterpretRequest { text, name };
        let response: InterpretResponse = self.post_json(INTERPRET_PATH, &body).await?;
        Ok(response.policy)
    }

    async fn match_benefits(
        &self,
        profile: &CitizenProfile,
    ) -> Result<Vec<BenefitMatch>, GatewayError> {
        let response: MatchResponse = self.post_json(MATCH_PATH, profile).await?;
        Ok(response.matched_benefits)
    }

    async fn fetch_system_status(&self) -> Result<SystemStatus, GatewayError> {
        self.get_json(STATUS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interpret_request_omits_absent_name() {
        let body = InterpretRequest {
            text: "Students residing in Karnataka...",
            name: None,
        };
        let encoded = serde_json::to_value(&body).expect("request encodes");
        assert_eq!(encoded, json!({ "text": "Students residing in Karnataka..." }));
    }

    #[test]
    fn interpret_request_includes_name_hint() {
        let body = InterpretRequest {
            text: "Scheme text",
            name: Some("Education Scholarship"),
        };
        let encoded = serde_json::to_value(&body).expect("request encodes");
        assert_eq!(
            encoded,
            json!({ "text": "Scheme text", "name": "Education Scholarship" })
        );
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..BackendConfig::default()
        };
        let gateway = HttpBenefitsGateway::new(&config).expect("client builds");
        assert_eq!(
            gateway.endpoint(SAMPLE_POLICIES_PATH),
            "http://localhost:8000/api/policies/sample"
        );
    }
}

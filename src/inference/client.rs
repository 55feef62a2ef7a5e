use async_trait::async_trait;

use super::types::{ApiSymptom, DiagnosisRequest, DiagnosisResponse};
use super::InferenceError;

/// Seam between the diagnosis workflow and the external inference
/// service. Implemented by [`HttpInferenceClient`] for production and
/// [`MockInferenceClient`] for tests.
#[async_trait]
pub trait InferenceApi: Send + Sync {
    /// Score symptom evidence and return candidate conditions,
    /// pre-sorted by likelihood.
    async fn diagnosis(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<DiagnosisResponse, InferenceError>;

    /// The selectable symptom catalog.
    async fn symptoms(&self) -> Result<Vec<ApiSymptom>, InferenceError>;
}

/// HTTP client for the external inference service.
///
/// Every request carries the `App-Id`/`App-Key` credential pair and a
/// bounded timeout so a hung upstream cannot hang the caller.
pub struct HttpInferenceClient {
    base_url: String,
    app_id: String,
    app_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpInferenceClient {
    pub fn new(base_url: &str, app_id: &str, app_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            InferenceError::Connection(self.base_url.clone())
        } else {
            InferenceError::Request(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, InferenceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl InferenceApi for HttpInferenceClient {
    async fn diagnosis(
        &self,
        request: &DiagnosisRequest,
    ) -> Result<DiagnosisResponse, InferenceError> {
        let url = format!("{}/diagnosis", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("App-Id", &self.app_id)
            .header("App-Key", &self.app_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))
    }

    async fn symptoms(&self) -> Result<Vec<ApiSymptom>, InferenceError> {
        let url = format!("{}/symptoms", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("App-Id", &self.app_id)
            .header("App-Key", &self.app_key)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| InferenceError::ResponseParsing(e.to_string()))
    }
}

/// Mock inference client for tests — returns configurable responses or
/// a configurable failure.
pub struct MockInferenceClient {
    conditions: Vec<super::types::ApiCondition>,
    symptoms: Vec<ApiSymptom>,
    failure: Option<MockFailure>,
}

#[derive(Clone)]
enum MockFailure {
    Unreachable,
    Status(u16, String),
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            symptoms: Vec::new(),
            failure: None,
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<super::types::ApiCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_symptoms(mut self, symptoms: Vec<ApiSymptom>) -> Self {
        self.symptoms = symptoms;
        self
    }

    /// Simulate an unreachable service (connection error).
    pub fn unreachable(mut self) -> Self {
        self.failure = Some(MockFailure::Unreachable);
        self
    }

    /// Simulate a non-2xx answer from the service.
    pub fn failing_with_status(mut self, status: u16, body: &str) -> Self {
        self.failure = Some(MockFailure::Status(status, body.to_string()));
        self
    }

    fn fail(&self) -> Option<InferenceError> {
        match &self.failure {
            Some(MockFailure::Unreachable) => {
                Some(InferenceError::Connection("http://mock".into()))
            }
            Some(MockFailure::Status(status, body)) => Some(InferenceError::Http {
                status: *status,
                body: body.clone(),
            }),
            None => None,
        }
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceApi for MockInferenceClient {
    async fn diagnosis(
        &self,
        _request: &DiagnosisRequest,
    ) -> Result<DiagnosisResponse, InferenceError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        Ok(DiagnosisResponse {
            conditions: self.conditions.clone(),
        })
    }

    async fn symptoms(&self) -> Result<Vec<ApiSymptom>, InferenceError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }
        Ok(self.symptoms.clone())
    }
}

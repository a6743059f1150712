use crate::config::Config;
use crate::errors::{FetchError, FetchTarget};
use crate::models::{Answer, CalculationRequest, SchoolNames, SchoolId, SchoolInfo};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::debug;

pub trait SchoolDirectory {
    fn fetch_all(&self) -> impl Future<Output = Result<SchoolNames, FetchError>> + Send;
}

pub trait SchoolInfoProvider {
    fn fetch_info(
        &self,
        school_id: SchoolId,
    ) -> impl Future<Output = Result<SchoolInfo, FetchError>> + Send;
}

pub trait CalculationService {
    fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> impl Future<Output = Result<Vec<Answer>, FetchError>> + Send;
}

/// Talks to the statistics backend over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn endpoint(&self, target: FetchTarget, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|err| FetchError::new(target, err))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        target: FetchTarget,
        url: Url,
    ) -> Result<T, FetchError> {
        debug!(%url, "backend request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::new(target, err))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::new(target, format!("{status} {body}").trim_end()));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| FetchError::new(target, err))
    }
}

impl SchoolDirectory for HttpBackend {
    async fn fetch_all(&self) -> Result<SchoolNames, FetchError> {
        let url = self.endpoint(FetchTarget::Schools, "get_schools")?;
        self.get_json(FetchTarget::Schools, url).await
    }
}

impl SchoolInfoProvider for HttpBackend {
    async fn fetch_info(&self, school_id: SchoolId) -> Result<SchoolInfo, FetchError> {
        let url = self.endpoint(FetchTarget::SchoolInfo, &format!("get_school_info/{school_id}"))?;
        self.get_json(FetchTarget::SchoolInfo, url).await
    }
}

impl CalculationService for HttpBackend {
    async fn calculate(&self, request: &CalculationRequest) -> Result<Vec<Answer>, FetchError> {
        let target = FetchTarget::Calculation;
        let mut url = self.endpoint(target, "calculate")?;
        let encoded = serde_json::to_string(request).map_err(|err| FetchError::new(target, err))?;
        // The backend reads the whole question from the first query key.
        url.query_pairs_mut().append_key_only(&encoded);

        let body: serde_json::Value = self.get_json(target, url).await?;
        if body == serde_json::Value::Bool(false) {
            return Err(FetchError::new(target, "the backend rejected the question"));
        }
        serde_json::from_value(body).map_err(|err| FetchError::new(target, err))
    }
}

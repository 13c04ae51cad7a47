use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use shared::{ClassificationResult, DefectReport, ScoreResult, ScoringInput};
use url::Url;

use crate::config::ServiceEndpoints;
use crate::error::PipelineError;
use crate::image::Image;

const OPAQUE_MIME: &str = "application/octet-stream";

// Futures stay `?Send` so the same implementations run on the browser's single thread.

#[async_trait(?Send)]
pub trait Classifier {
    async fn classify(&self, image: &Image) -> Result<ClassificationResult, PipelineError>;
}

#[async_trait(?Send)]
pub trait DefectDetector {
    async fn detect(&self, image: &Image) -> Result<DefectReport, PipelineError>;
}

#[async_trait(?Send)]
pub trait Scorer {
    /// A business rejection comes back as `Ok(ScoreResult::Rejected { .. })`.
    async fn score(&self, input: &ScoringInput) -> Result<ScoreResult, PipelineError>;
}

/// `reqwest` client for the package inference and scoring services.
#[derive(Clone)]
pub struct HttpServiceClient {
    http: reqwest::Client,
    endpoints: ServiceEndpoints,
}

impl HttpServiceClient {
    pub fn new(endpoints: ServiceEndpoints) -> Result<Self, PipelineError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(endpoints.timeout());

        Ok(Self {
            http: builder.build()?,
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    async fn post_image<T: DeserializeOwned>(&self, url: Url, image: &Image) -> Result<T, PipelineError> {
        let form = Form::new().part("file", image_part(image));

        log::debug!("POST {} ({} bytes)", url, image.bytes.len());
        let response = self.http.post(url).multipart(form).send().await?;
        read_json(response).await
    }
}

// The services judge the content type; an unparseable one is sent as opaque bytes.
fn image_part(image: &Image) -> Part {
    let part = || Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
    part().mime_str(&image.mime_type).unwrap_or_else(|e| {
        log::debug!("Sending {} as {}: {}", image.file_name, OPAQUE_MIME, e);
        part().mime_str(OPAQUE_MIME).unwrap_or_else(|_| part())
    })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PipelineError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(PipelineError::Service {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| PipelineError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl Classifier for HttpServiceClient {
    async fn classify(&self, image: &Image) -> Result<ClassificationResult, PipelineError> {
        let url = self.endpoints.predict_url()?;
        self.post_image(url, image).await
    }
}

#[async_trait(?Send)]
impl DefectDetector for HttpServiceClient {
    async fn detect(&self, image: &Image) -> Result<DefectReport, PipelineError> {
        let url = self.endpoints.detect_url()?;
        self.post_image(url, image).await
    }
}

#[async_trait(?Send)]
impl Scorer for HttpServiceClient {
    async fn score(&self, input: &ScoringInput) -> Result<ScoreResult, PipelineError> {
        let url = self.endpoints.points_url()?;
        log::debug!("POST {} material={}", url, input.material);

        let response = self.http.post(url).json(input).send().await?;
        read_json(response).await
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::PipelineError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Where the three remote services live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoints {
    /// Inference host. Masked image paths are resolved against it.
    pub base_url: Url,
    /// Scoring host when it is deployed apart from the models.
    pub scoring_base_url: Option<Url>,
    pub predict_path: String,
    pub detect_path: String,
    pub points_path: String,
    /// Ignored on wasm32, where the browser owns request timeouts.
    pub timeout_secs: u64,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            scoring_base_url: None,
            predict_path: "predict".to_string(),
            detect_path: "detect_defects".to_string(),
            points_path: "calculate_points".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ServiceEndpoints {
    pub fn with_base(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(&with_trailing_slash(base_url))?,
            ..Self::default()
        })
    }

    pub fn predict_url(&self) -> Result<Url, PipelineError> {
        join(&self.base_url, &self.predict_path)
    }

    pub fn detect_url(&self) -> Result<Url, PipelineError> {
        join(&self.base_url, &self.detect_path)
    }

    pub fn points_url(&self) -> Result<Url, PipelineError> {
        join(self.scoring_base_url.as_ref().unwrap_or(&self.base_url), &self.points_path)
    }

    /// Absolute URL of an annotated image, optionally cache-busted with `?t=<millis>`.
    pub fn masked_image_url(&self, masked_image_path: &str, cache_bust: Option<i64>) -> Result<Url, PipelineError> {
        let mut url = join(&self.base_url, masked_image_path)?;
        if let Some(stamp) = cache_bust {
            url.query_pairs_mut().append_pair("t", &stamp.to_string());
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

fn join(base: &Url, path: &str) -> Result<Url, PipelineError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| PipelineError::Endpoint(format!("{}: {}", path, e)))
}

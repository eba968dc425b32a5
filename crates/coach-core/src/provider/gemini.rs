//! [`AnalysisProvider`] backed by Google's Generative Language API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

use super::{
    api::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        ImageOutputOptions, ImageParameters, ImagePrompt, Part, PredictRequest, PredictResponse,
    },
    prompts, AnalysisProvider, ProviderError, ProviderResult,
};
use crate::models::{BodyAnalysis, ExerciseDetail, Photo, UserGoals, WorkoutPlan};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_LANGUAGE: &str = "English";

const ILLUSTRATION_MIME_TYPE: &str = "image/jpeg";

/// Connection and model settings for [`GeminiProvider`].
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    /// Language every generated text should be written in
    pub language: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Transport` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> ProviderResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Creates a provider that reuses an existing HTTP client.
    pub fn with_client(config: GeminiConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.config.base_url, model, method)
    }

    async fn send_json<T: Serialize + Sync, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &T,
    ) -> ProviderResult<R> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::StatusCode(
                status,
                response.text().await.unwrap_or_default(),
            ));
        }
        Ok(response.json::<R>().await?)
    }

    /// Runs `generateContent` on the text model and returns the first
    /// candidate's text.
    async fn generate_text(&self, request: &GenerateContentRequest) -> ProviderResult<String> {
        let url = self.model_url(&self.config.text_model, "generateContent");
        let response: GenerateContentResponse = self.send_json(&url, request).await?;
        response
            .first_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::Invariant("No candidate text in response".to_string()))
    }

    async fn generate_json<R: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        schema: serde_json::Value,
    ) -> ProviderResult<R> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: Some(GenerationConfig::json(schema)),
        };
        let text = self.generate_text(&request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn exercise_guide(&self, name: &str) -> ProviderResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(
                prompts::exercise_guide_prompt(name, &self.config.language),
            )])],
            generation_config: None,
        };
        self.generate_text(&request).await
    }

    /// Generates one illustration and returns it as a data URI.
    async fn exercise_illustration(&self, name: &str) -> ProviderResult<String> {
        let url = self.model_url(&self.config.image_model, "predict");
        let request = PredictRequest {
            instances: vec![ImagePrompt {
                prompt: prompts::exercise_illustration_prompt(name),
            }],
            parameters: ImageParameters {
                sample_count: 1,
                aspect_ratio: "1:1".to_string(),
                output_options: ImageOutputOptions {
                    mime_type: ILLUSTRATION_MIME_TYPE.to_string(),
                },
            },
        };

        let response: PredictResponse = self.send_json(&url, &request).await?;
        let prediction = response
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Invariant("No generated image in response".to_string()))?;
        let bytes = prediction
            .bytes_base64_encoded
            .ok_or_else(|| ProviderError::Invariant("Generated image has no bytes".to_string()))?;
        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| ILLUSTRATION_MIME_TYPE.to_string());

        Ok(format!("data:{mime_type};base64,{bytes}"))
    }
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    async fn analyze_image(&self, photo: &Photo) -> ProviderResult<BodyAnalysis> {
        debug!("Requesting body analysis ({})", photo.mime_type);
        self.generate_json(
            vec![
                Part::text(prompts::analyze_image_prompt(&self.config.language)),
                Part::inline(photo.mime_type.clone(), photo.data.clone()),
            ],
            prompts::body_analysis_schema(),
        )
        .await
    }

    async fn generate_plan(
        &self,
        analysis: &str,
        goals: &UserGoals,
    ) -> ProviderResult<WorkoutPlan> {
        debug!(
            "Requesting workout plan (with analysis: {})",
            !analysis.is_empty()
        );
        self.generate_json(
            vec![Part::text(prompts::workout_plan_prompt(
                analysis,
                goals,
                &self.config.language,
            ))],
            prompts::workout_plan_schema(),
        )
        .await
    }

    async fn exercise_detail(&self, name: &str) -> ProviderResult<ExerciseDetail> {
        debug!("Requesting exercise details for '{name}'");
        let (description, image) =
            futures::try_join!(self.exercise_guide(name), self.exercise_illustration(name))?;
        Ok(ExerciseDetail { description, image })
    }
}

//! HTTP client for the generation oracle

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::application::dto::{
    GenerateErrors, GenerateForm, GeneratedChallenge, RerollCategoryRequest,
    RerollCategoryResponse, SaveTemplateRequest, SaveTemplateResponse,
};
use crate::application::ports::outbound::{GenerationOraclePort, OracleError};
use crate::domain::entities::ResultEntry;
use crate::domain::value_objects::TemplateOption;

/// Client for the oracle's generate, reroll and save endpoints
pub struct ChallengeOracleClient {
    client: Client,
    base_url: String,
}

impl ChallengeOracleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<(bool, R), OracleError>
    where
        B: serde::Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(unreachable)?;

        let ok = response.status().is_success();
        Ok((ok, decode(response).await?))
    }
}

fn unreachable(e: reqwest::Error) -> OracleError {
    OracleError::Unreachable(e.to_string())
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, OracleError> {
    let status = response.status();
    let text = response.text().await.map_err(unreachable)?;
    serde_json::from_str(&text)
        .map_err(|e| OracleError::InvalidResponse(format!("{} ({}): {}", status, e, text)))
}

/// Messages of a failed response; an empty list lets the caller pick its fallback
fn rejection(error: Option<String>) -> OracleError {
    OracleError::Rejected(error.into_iter().filter(|e| !e.is_empty()).collect())
}

#[async_trait]
impl GenerationOraclePort for ChallengeOracleClient {
    async fn generate(&self, form: &GenerateForm) -> Result<GeneratedChallenge, OracleError> {
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .form(&form.fields)
            .send()
            .await
            .map_err(unreachable)?;

        if response.status().is_success() {
            return decode(response).await;
        }

        // Error bodies that don't parse still count as a rejection
        let errors = decode::<GenerateErrors>(response)
            .await
            .map(|body| body.errors)
            .unwrap_or_default();
        Err(OracleError::Rejected(errors))
    }

    async fn reroll_category(
        &self,
        request: &RerollCategoryRequest,
    ) -> Result<Vec<ResultEntry>, OracleError> {
        let (ok, body) = match self
            .post_json::<_, RerollCategoryResponse>("/reroll_category", request)
            .await
        {
            Err(OracleError::InvalidResponse(_)) => return Err(OracleError::Rejected(Vec::new())),
            other => other?,
        };

        if ok && body.success {
            Ok(body.new_values)
        } else {
            Err(rejection(body.error))
        }
    }

    async fn save_template(
        &self,
        request: &SaveTemplateRequest,
    ) -> Result<TemplateOption, OracleError> {
        let (ok, body) = match self
            .post_json::<_, SaveTemplateResponse>("/save_template", request)
            .await
        {
            Err(OracleError::InvalidResponse(_)) => return Err(OracleError::Rejected(Vec::new())),
            other => other?,
        };

        match body.new_template {
            Some(template) if ok && body.success => Ok(template),
            None if ok && body.success => Err(OracleError::InvalidResponse(
                "save succeeded without a new template".to_string(),
            )),
            _ => Err(rejection(body.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use crate::domain::value_objects::CategoryRule;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn reroll_request() -> RerollCategoryRequest {
        RerollCategoryRequest::all("Champion", CategoryRule::random_from_list(["Jinx"], 1))
    }

    #[tokio::test]
    async fn test_reroll_returns_new_values() {
        let app = Router::new().route(
            "/reroll_category",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["reroll_type"], "all");
                Json(json!({"success": true, "new_values": [{"value": "Jinx", "description": null}]}))
            }),
        );
        let client = ChallengeOracleClient::new(&format!("{}/", serve(app).await));

        let values = client.reroll_category(&reroll_request()).await.unwrap();

        assert_eq!(values, vec![ResultEntry::new("Jinx")]);
    }

    #[tokio::test]
    async fn test_reroll_failure_carries_server_message() {
        let app = Router::new().route(
            "/reroll_category",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"success": false, "error": "Category 'Champion' not found."})),
                )
            }),
        );
        let client = ChallengeOracleClient::new(&serve(app).await);

        let err = client.reroll_category(&reroll_request()).await.unwrap_err();

        assert_eq!(
            err,
            OracleError::Rejected(vec!["Category 'Champion' not found.".to_string()])
        );
    }

    #[tokio::test]
    async fn test_reroll_with_success_false_is_rejected() {
        let app = Router::new().route(
            "/reroll_category",
            post(|| async { Json(json!({"success": false})) }),
        );
        let client = ChallengeOracleClient::new(&serve(app).await);

        let err = client.reroll_category(&reroll_request()).await.unwrap_err();

        assert_eq!(err, OracleError::Rejected(Vec::new()));
    }

    #[tokio::test]
    async fn test_generate_rejection_lists_errors() {
        let app = Router::new().route(
            "/generate",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"errors": ["Template not found", "Too many players"]})),
                )
            }),
        );
        let client = ChallengeOracleClient::new(&serve(app).await);

        let err = client.generate(&GenerateForm::default()).await.unwrap_err();

        assert_eq!(
            err,
            OracleError::Rejected(vec![
                "Template not found".to_string(),
                "Too many players".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_save_template_accepts_numeric_id() {
        let app = Router::new().route(
            "/save_template",
            post(|| async {
                Json(json!({"success": true, "new_template": {"id": 12, "name": "Budget run"}}))
            }),
        );
        let client = ChallengeOracleClient::new(&serve(app).await);
        let request = SaveTemplateRequest {
            name: "Budget run".to_string(),
            description: String::new(),
            config: Default::default(),
        };

        let template = client.save_template(&request).await.unwrap();

        assert_eq!(template, TemplateOption::new("12", "Budget run"));
    }

    #[tokio::test]
    async fn test_unreachable_oracle() {
        // Nothing listens on the discard port
        let client = ChallengeOracleClient::new("http://127.0.0.1:9");

        let err = client.reroll_category(&reroll_request()).await.unwrap_err();

        assert!(matches!(err, OracleError::Unreachable(_)));
    }
}

//! Route handlers.

use crate::{ApiError, AppState, ModelCatalog};
use axum::{
    Json,
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use pixagen_core::{GenerationKind, GenerationRequest, ProviderResult};
use pixagen_error::GenerationErrorKind;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

/// Request body parsed as loose JSON.
///
/// An empty body reads as `null`, which the normalizer treats like `{}`.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            (
                rejection.status(),
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response()
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Null));
        }
        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            ApiError::from(GenerationErrorKind::InvalidField {
                field: "body".to_string(),
                reason: e.to_string(),
            })
            .into_response()
        })
    }
}

/// Activity tag for one phase of an action, e.g. `FUSION_REQUEST`.
fn activity_tag(action: &str, phase: &str) -> String {
    format!("{}_{}", action, phase)
}

/// Resolves the key, normalizes, invokes and logs one generation job.
///
/// Writes `<ACTION>_REQUEST` before any work, then `<ACTION>_RESPONSE` or
/// `<ACTION>_ERROR`.
async fn run_job(
    state: &AppState,
    kind: GenerationKind,
    action: &str,
    headers: &HeaderMap,
    body: &Value,
) -> Result<(GenerationRequest, ProviderResult), ApiError> {
    state.activity.record(
        activity_tag(action, "REQUEST"),
        Some(json!({ "kind": kind.to_string() })),
    );

    let credential = state.credentials.resolve(kind, |name| {
        headers.get(name).and_then(|value| value.to_str().ok())
    });

    let outcome = match state.normalizer.normalize(kind, body, credential) {
        Ok(request) => match state.invoker.invoke(&request).await {
            Ok(result) => Ok((request, result)),
            Err(e) => Err(ApiError::from(e)),
        },
        Err(e) => Err(ApiError::from(e)),
    };

    match &outcome {
        Ok((request, _)) => state.activity.record(
            activity_tag(action, "RESPONSE"),
            Some(json!({
                "model": request.model_identifier(),
                "ratio": request.aspect_ratio(),
                "count": request.output_count(),
            })),
        ),
        Err(e) => state
            .activity
            .record_error(activity_tag(action, "ERROR"), e.message()),
    }
    outcome
}

/// Anything a route did not expect is still returned, tagged by type.
fn passthrough(result: ProviderResult) -> Value {
    json!({ "status": "ok", "result": result })
}

/// `GET /api/health`
#[instrument(skip_all)]
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "service": "pixagen-local" }))
}

/// `GET /api/models`
#[instrument(skip_all)]
pub async fn models(State(state): State<AppState>) -> Json<ModelCatalog> {
    Json(state.models.as_ref().clone())
}

/// `POST /api/gemini/generate`: images, or prompt enhancement when `mode` is
/// `enhance`.
#[instrument(skip_all)]
pub async fn generate_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let enhance = body.get("mode").and_then(Value::as_str) == Some("enhance");
    let (kind, action) = if enhance {
        (GenerationKind::EnhanceText, "ENHANCE")
    } else {
        (GenerationKind::Image, "IMAGE")
    };

    let (request, result) = run_job(&state, kind, action, &headers, &body).await?;
    let response = match result {
        ProviderResult::Text { text } => json!({ "status": "ok", "result": text }),
        ProviderResult::Images { images } => {
            info!(images = images.len(), "Image batch complete");
            json!({
                "status": "ok",
                "images": images,
                "meta": { "ratio": request.aspect_ratio(), "count": request.output_count() },
            })
        }
        other => passthrough(other),
    };
    Ok(Json(response))
}

/// `POST /api/veo/generate-video`
#[instrument(skip_all)]
pub async fn generate_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let (request, result) =
        run_job(&state, GenerationKind::Video, "VIDEO", &headers, &body).await?;

    let response = match result {
        ProviderResult::Video { videos } => json!({
            "status": "ok",
            "provider": "veo",
            "video": videos.first(),
            "videos": videos,
            "meta": {
                "modelId": request.model_identifier(),
                "ratio": request.aspect_ratio(),
                "durationSecs": request.duration_seconds(),
                "numberOfVideos": request.output_count(),
                "generatePeople": request.allow_people(),
            },
        }),
        ProviderResult::NoMedia { note, raw } => {
            debug!("Video response carried no clip");
            json!({
                "status": "ok",
                "note": note,
                "raw": raw,
                "meta": { "modelId": request.model_identifier() },
            })
        }
        other => passthrough(other),
    };
    Ok(Json(response))
}

/// `POST /api/vision/analyze-product`
#[instrument(skip_all)]
pub async fn analyze_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let (_, result) = run_job(
        &state,
        GenerationKind::VisionAnalyze,
        "VISION",
        &headers,
        &body,
    )
    .await?;

    let response = match result {
        ProviderResult::Insights { insights } => json!({ "ok": true, "insights": insights }),
        other => passthrough(other),
    };
    Ok(Json(response))
}

/// `POST /api/fusion/generate`
#[instrument(skip_all)]
pub async fn generate_composite(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let (_, result) = run_job(
        &state,
        GenerationKind::CompositeImage,
        "FUSION",
        &headers,
        &body,
    )
    .await?;

    let response = match result {
        ProviderResult::Images { images } => json!({ "ok": true, "images": images }),
        other => passthrough(other),
    };
    Ok(Json(response))
}

/// `POST /api/promo/script`: assembles a scene script; no provider call.
#[instrument(skip_all)]
pub async fn promo_script(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    state
        .activity
        .record(activity_tag("PROMO_SCRIPT", "REQUEST"), None);
    match state.normalizer.scene_script(&body) {
        Ok(script) => {
            state.activity.record(
                activity_tag("PROMO_SCRIPT", "RESPONSE"),
                Some(json!({ "shots": script.shots.len(), "overlays": script.overlays.len() })),
            );
            Ok(Json(json!({ "status": "ok", "script": script })))
        }
        Err(e) => {
            let err = ApiError::from(e);
            state
                .activity
                .record_error(activity_tag("PROMO_SCRIPT", "ERROR"), err.message());
            Err(err)
        }
    }
}

/// `GET /api/activity`
#[instrument(skip_all)]
pub async fn list_activity(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "entries": state.activity.entries() }))
}

/// `DELETE /api/activity`
#[instrument(skip_all)]
pub async fn clear_activity(State(state): State<AppState>) -> Json<Value> {
    state.activity.clear();
    Json(json!({ "ok": true }))
}

/// `PUT /api/settings/api-key` with `{"key": "..."}`
#[instrument(skip_all)]
pub async fn set_api_key(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    let key = body.get("key").and_then(Value::as_str).unwrap_or_default();
    if !state.credentials.set_runtime_key(key) {
        return Err(GenerationErrorKind::MissingRequiredField("key".to_string()).into());
    }
    state
        .activity
        .record("API_KEY_SET", Some(json!({ "key": "********" })));
    Ok(Json(json!({ "ok": true })))
}

/// `DELETE /api/settings/api-key`
#[instrument(skip_all)]
pub async fn clear_api_key(State(state): State<AppState>) -> Json<Value> {
    state.credentials.clear_runtime_key();
    state.activity.record("API_KEY_CLEAR", None);
    Json(json!({ "ok": true }))
}

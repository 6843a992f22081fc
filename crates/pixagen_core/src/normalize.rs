//! Request normalization.
//!
//! Callers have used several names for the same logical field over time
//! (`ratio` / `aspectRatio` / `ar`, `duration` / `durationSecs` / `length`, ...).
//! [`AliasTable`] lists, per canonical field, the accepted names in priority
//! order; [`Normalizer`] applies it to a raw JSON body and produces a
//! [`GenerationRequest`]. The table is data, so new aliases are a config change.

use crate::{
    Credential, DataUri, GenerationKind, GenerationRequest, GenerationRequestBuilder,
    PromptOrScript, SceneMeta, SceneScript,
};
use pixagen_error::{ConfigError, GenerationErrorKind, PixagenResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, instrument};

/// Version of the built-in alias table.
pub const ALIAS_TABLE_VERSION: u32 = 2;

/// Accepted request field names per canonical field, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasTable {
    /// Table revision, bumped whenever aliases are added or reordered
    pub version: u32,
    /// Structured script document
    pub script: Vec<String>,
    /// Free-text prompt
    pub prompt: Vec<String>,
    /// Aspect ratio token
    pub aspect_ratio: Vec<String>,
    /// Number of outputs
    pub output_count: Vec<String>,
    /// Video duration in seconds
    pub duration_seconds: Vec<String>,
    /// Whether people may appear in video
    pub allow_people: Vec<String>,
    /// Provider model variant
    pub model_identifier: Vec<String>,
    /// Target of a prompt enhancement
    pub enhance_target: Vec<String>,
    /// Product / analyzed image data URI
    pub primary_image: Vec<String>,
    /// Optional person image data URI
    pub secondary_image: Vec<String>,
    /// Promo brand name
    pub brand: Vec<String>,
    /// Promo product name
    pub product_name: Vec<String>,
    /// Promo mood descriptor
    pub vibe: Vec<String>,
    /// Promo call to action
    pub cta: Vec<String>,
    /// Promo shot list
    pub shots: Vec<String>,
    /// Promo overlays
    pub overlays: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            version: ALIAS_TABLE_VERSION,
            script: names(&["script", "scene", "payload"]),
            prompt: names(&["prompt", "text"]),
            aspect_ratio: names(&["aspectRatio", "ratio", "ar"]),
            output_count: names(&[
                "outputCount",
                "count",
                "numberOfVideos",
                "videoCount",
                "maxOutputs",
                "outputCountMax",
            ]),
            duration_seconds: names(&["durationSeconds", "durationSecs", "duration", "length"]),
            allow_people: names(&["allowPeople", "generatePeople"]),
            model_identifier: names(&["modelId", "model", "modelIdentifier"]),
            enhance_target: names(&["target"]),
            primary_image: names(&[
                "productDataURL",
                "productDataUrl",
                "imageDataURL",
                "imageDataUrl",
            ]),
            secondary_image: names(&["modelDataURL", "modelDataUrl", "personDataURL"]),
            brand: names(&["brand"]),
            product_name: names(&["productName", "product"]),
            vibe: names(&["vibe", "mood"]),
            cta: names(&["cta", "callToAction"]),
            shots: names(&["shots"]),
            overlays: names(&["overlays"]),
        }
    }
}

impl AliasTable {
    /// Parses a table from TOML; omitted fields keep their built-in aliases.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::new(format!("Failed to parse alias table: {}", e)))
    }

    /// Loads a table from a TOML file.
    #[tracing::instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read alias table {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }
}

/// First alias present in `body` with a non-null value.
fn first_present<'a>(
    body: &'a Map<String, Value>,
    aliases: &'a [String],
) -> Option<(&'a str, &'a Value)> {
    aliases.iter().find_map(|name| match body.get(name) {
        Some(Value::Null) | None => None,
        Some(value) => Some((name.as_str(), value)),
    })
}

/// Numbers and numeric strings, truncated toward zero.
fn coerce_integer(value: &Value) -> Option<i64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then(|| number.trunc() as i64)
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Strings pass through verbatim; numbers are rendered as text.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Turns raw request bodies into canonical requests.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
}

impl Normalizer {
    /// Creates a normalizer over the given alias table.
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// The alias table in use.
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Builds a [`GenerationRequest`] of `kind` from `body`.
    ///
    /// Never validates semantics: unknown aspect ratios and model names pass
    /// through. Numeric fields that cannot be coerced fall back to their
    /// defaults and `output_count` is clamped to the kind maximum. The only
    /// failure is a reference image that is present but not a valid data URI.
    #[instrument(skip(self, body, credential), fields(version = self.aliases.version))]
    pub fn normalize(
        &self,
        kind: GenerationKind,
        body: &Value,
        credential: Option<Credential>,
    ) -> PixagenResult<GenerationRequest> {
        let empty = Map::new();
        let body = body.as_object().unwrap_or(&empty);
        let aliases = &self.aliases;

        let output_count = first_present(body, &aliases.output_count)
            .and_then(|(_, v)| coerce_integer(v))
            .unwrap_or_else(|| i64::from(kind.default_output_count()))
            .clamp(1, i64::from(kind.max_output_count())) as u32;

        let duration_seconds = self.duration(body).unwrap_or(8);

        let allow_people = first_present(body, &aliases.allow_people)
            .and_then(|(_, v)| coerce_bool(v))
            .unwrap_or(false);

        let aspect_ratio = first_present(body, &aliases.aspect_ratio)
            .and_then(|(_, v)| coerce_string(v))
            .unwrap_or_else(|| kind.default_aspect_ratio().to_string());

        let model_identifier = first_present(body, &aliases.model_identifier)
            .and_then(|(_, v)| coerce_string(v))
            .unwrap_or_else(|| kind.default_model().to_string());

        let enhance_target = first_present(body, &aliases.enhance_target)
            .and_then(|(_, v)| coerce_string(v))
            .unwrap_or_else(|| "image".to_string());

        let mut reference_images = Vec::new();
        if let Some(image) = data_uri_field(body, &aliases.primary_image)? {
            reference_images.push(image);
        }
        if let Some(image) = data_uri_field(body, &aliases.secondary_image)? {
            reference_images.push(image);
        }

        let prompt_or_script = self.prompt_or_script(kind, body);

        debug!(
            %kind,
            output_count,
            aspect_ratio = %aspect_ratio,
            model = %model_identifier,
            reference_images = reference_images.len(),
            "Normalized request"
        );

        GenerationRequestBuilder::default()
            .kind(kind)
            .prompt_or_script(prompt_or_script)
            .aspect_ratio(aspect_ratio)
            .output_count(output_count)
            .duration_seconds(duration_seconds)
            .allow_people(allow_people)
            .model_identifier(model_identifier)
            .enhance_target(enhance_target)
            .reference_images(reference_images)
            .credential(credential)
            .build()
            .map_err(|e| {
                GenerationErrorKind::InvalidField {
                    field: "request".to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Builds a promo [`SceneScript`] from form fields.
    ///
    /// Missing shot and overlay lists become empty; lists that are present but
    /// malformed are rejected.
    #[instrument(skip(self, body))]
    pub fn scene_script(&self, body: &Value) -> PixagenResult<SceneScript> {
        let empty = Map::new();
        let body = body.as_object().unwrap_or(&empty);
        let aliases = &self.aliases;
        let text = |list: &[String]| first_present(body, list).and_then(|(_, v)| coerce_string(v));

        let meta = SceneMeta {
            version: 1,
            brand: text(&aliases.brand),
            product_name: text(&aliases.product_name),
            ratio: text(&aliases.aspect_ratio),
            duration: self.duration(body),
            vibe: text(&aliases.vibe),
        };

        Ok(SceneScript {
            meta,
            cta: text(&aliases.cta),
            shots: list_field(body, &aliases.shots)?,
            overlays: list_field(body, &aliases.overlays)?,
        })
    }

    fn duration(&self, body: &Map<String, Value>) -> Option<u32> {
        first_present(body, &self.aliases.duration_seconds)
            .and_then(|(_, v)| coerce_integer(v))
            .filter(|secs| *secs > 0)
            .map(|secs| secs.min(i64::from(u32::MAX)) as u32)
    }

    fn prompt_or_script(&self, kind: GenerationKind, body: &Map<String, Value>) -> PromptOrScript {
        if let Some((_, script)) = first_present(body, &self.aliases.script) {
            return PromptOrScript::Script(script.clone());
        }

        let prompt = first_present(body, &self.aliases.prompt).and_then(|(_, v)| coerce_string(v));

        match (kind, prompt) {
            (GenerationKind::Video, Some(text)) => match serde_json::from_str::<Value>(&text) {
                Ok(document @ Value::Object(_)) => PromptOrScript::Script(document),
                _ => PromptOrScript::Script(serde_json::json!({ "prompt": text })),
            },
            (GenerationKind::Video, None) => PromptOrScript::Script(Value::Object(Map::new())),
            (_, Some(text)) => PromptOrScript::Text(text),
            (_, None) => PromptOrScript::Text(String::new()),
        }
    }
}

/// Parses the first present alias as a data URI; empty strings count as absent.
fn data_uri_field(
    body: &Map<String, Value>,
    aliases: &[String],
) -> PixagenResult<Option<DataUri>> {
    match first_present(body, aliases) {
        None => Ok(None),
        Some((_, Value::String(s))) if s.trim().is_empty() => Ok(None),
        Some((field, Value::String(s))) => DataUri::parse(s).map(Some).map_err(|reason| {
            GenerationErrorKind::InvalidField {
                field: field.to_string(),
                reason,
            }
            .into()
        }),
        Some((field, _)) => Err(GenerationErrorKind::InvalidField {
            field: field.to_string(),
            reason: "expected a data URI string".to_string(),
        }
        .into()),
    }
}

fn list_field<T>(body: &Map<String, Value>, aliases: &[String]) -> PixagenResult<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    match first_present(body, aliases) {
        None => Ok(Vec::new()),
        Some((field, value)) => serde_json::from_value(value.clone()).map_err(|e| {
            GenerationErrorKind::InvalidField {
                field: field.to_string(),
                reason: e.to_string(),
            }
            .into()
        }),
    }
}

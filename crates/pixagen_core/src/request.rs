//! The canonical generation request.

use crate::{Credential, DataUri, GenerationKind, PromptOrScript};
use derive_getters::Getters;

/// One normalized generation job.
///
/// Built by [`crate::Normalizer`] from a raw request body, or directly through
/// [`GenerationRequestBuilder`]:
///
/// ```
/// use pixagen_core::{GenerationKind, GenerationRequestBuilder, PromptOrScript};
///
/// let request = GenerationRequestBuilder::default()
///     .kind(GenerationKind::Image)
///     .prompt_or_script(PromptOrScript::Text("red sneaker".into()))
///     .output_count(2u32)
///     .build()
///     .unwrap();
/// assert_eq!(*request.output_count(), 2);
/// assert_eq!(request.aspect_ratio(), "1:1");
/// ```
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GenerationRequest {
    /// Job kind
    kind: GenerationKind,
    /// Prompt text or structured scene document
    #[builder(default)]
    prompt_or_script: PromptOrScript,
    /// Aspect ratio token, passed through verbatim
    #[builder(default = "self.default_aspect_ratio()")]
    aspect_ratio: String,
    /// Number of provider calls, already clamped to the kind maximum
    #[builder(default = "self.default_output_count()")]
    output_count: u32,
    /// Clip length for video jobs
    #[builder(default = "8")]
    duration_seconds: u32,
    /// Whether video jobs may depict people
    #[builder(default)]
    allow_people: bool,
    /// Provider model variant
    #[builder(default = "self.default_model()")]
    model_identifier: String,
    /// What kind of prompt an enhancement job improves
    #[builder(default = "\"image\".to_string()")]
    enhance_target: String,
    /// Product image first, optional person image second
    #[builder(default)]
    reference_images: Vec<DataUri>,
    /// Resolved API key
    #[builder(default)]
    credential: Option<Credential>,
}

impl GenerationRequestBuilder {
    fn default_aspect_ratio(&self) -> String {
        self.kind
            .map(GenerationKind::default_aspect_ratio)
            .unwrap_or("1:1")
            .to_string()
    }

    fn default_output_count(&self) -> u32 {
        self.kind
            .map(GenerationKind::default_output_count)
            .unwrap_or(1)
    }

    fn default_model(&self) -> String {
        self.kind
            .map(GenerationKind::default_model)
            .unwrap_or("")
            .to_string()
    }

    fn validate(&self) -> Result<(), String> {
        if let (Some(kind), Some(count)) = (self.kind, self.output_count) {
            if count == 0 || count > kind.max_output_count() {
                return Err(format!(
                    "output_count {} outside 1..={} for {}",
                    count,
                    kind.max_output_count(),
                    kind
                ));
            }
        }
        match &self.reference_images {
            Some(images) if images.len() > 2 => {
                Err(format!("at most 2 reference images, got {}", images.len()))
            }
            _ => Ok(()),
        }
    }
}

impl GenerationRequest {
    /// The product (or analyzed) image.
    pub fn primary_image(&self) -> Option<&DataUri> {
        self.reference_images.first()
    }

    /// The optional person/model image.
    pub fn secondary_image(&self) -> Option<&DataUri> {
        self.reference_images.get(1)
    }

    /// Returns a copy of this request carrying the given credential.
    pub fn with_credential(self, credential: Option<Credential>) -> Self {
        Self { credential, ..self }
    }
}

//! API key resolution.
//!
//! A key may arrive in one of two request headers or come from a process-wide
//! default. The default is either set at runtime through the settings
//! endpoints or taken from the environment at startup.

use crate::GenerationKind;
use std::sync::RwLock;
use tracing::debug;

/// Header carrying the Gemini/Imagen key.
pub const GEMINI_KEY_HEADER: &str = "x-gemini-key";
/// Header carrying the Veo key.
pub const VEO_KEY_HEADER: &str = "x-veo-key";

/// An opaque provider API key.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wraps a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    /// The key itself, for the outbound request header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Resolves the credential for a request in a fixed priority order.
///
/// 1. Request headers (for video `x-veo-key` first, otherwise `x-gemini-key` first)
/// 2. The key stored through [`CredentialResolver::set_runtime_key`]
/// 3. Environment defaults (for video `VEO_API_KEY` then `GEMINI_API_KEY`)
#[derive(Debug, Default)]
pub struct CredentialResolver {
    gemini_default: Option<Credential>,
    veo_default: Option<Credential>,
    runtime_key: RwLock<Option<Credential>>,
}

impl CredentialResolver {
    /// Creates a resolver with the given environment defaults.
    pub fn new(gemini_default: Option<String>, veo_default: Option<String>) -> Self {
        Self {
            gemini_default: gemini_default.and_then(Credential::new),
            veo_default: veo_default.and_then(Credential::new),
            runtime_key: RwLock::new(None),
        }
    }

    /// Header names in lookup order for the given kind.
    pub fn header_order(kind: GenerationKind) -> [&'static str; 2] {
        match kind {
            GenerationKind::Video => [VEO_KEY_HEADER, GEMINI_KEY_HEADER],
            _ => [GEMINI_KEY_HEADER, VEO_KEY_HEADER],
        }
    }

    /// Resolves a credential; `header` looks up a request header by name.
    pub fn resolve<'a, F>(&self, kind: GenerationKind, header: F) -> Option<Credential>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        for name in Self::header_order(kind) {
            if let Some(credential) = header(name).and_then(Credential::new) {
                debug!(source = name, %kind, "Credential resolved from request header");
                return Some(credential);
            }
        }

        if let Some(credential) = self.runtime_key() {
            debug!(%kind, "Credential resolved from runtime setting");
            return Some(credential);
        }

        let env_default = match kind {
            GenerationKind::Video => self.veo_default.as_ref().or(self.gemini_default.as_ref()),
            _ => self.gemini_default.as_ref(),
        };
        if env_default.is_some() {
            debug!(%kind, "Credential resolved from environment default");
        }
        env_default.cloned()
    }

    /// Stores a process-wide key. A blank key is ignored and returns false.
    pub fn set_runtime_key(&self, key: &str) -> bool {
        match Credential::new(key) {
            Some(credential) => {
                *self.runtime_key.write().unwrap_or_else(|e| e.into_inner()) = Some(credential);
                debug!("Runtime credential stored");
                true
            }
            None => false,
        }
    }

    /// Forgets the runtime key; environment defaults still apply.
    pub fn clear_runtime_key(&self) {
        *self.runtime_key.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Whether a runtime key is currently stored.
    pub fn has_runtime_key(&self) -> bool {
        self.runtime_key().is_some()
    }

    fn runtime_key(&self) -> Option<Credential> {
        self.runtime_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

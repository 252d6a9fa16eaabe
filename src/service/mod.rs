//! Resolution service
//!
//! Wraps the resolver behind a validated, concurrency-safe boundary. Each call
//! runs the same sequential pipeline:
//!
//! 1. Structural validation of the request
//! 2. Trim and reject empty prompts
//! 3. Reject prompts longer than [`MAX_PROMPT_CHARS`]
//! 4. Dispatch to the resolver on the blocking worker pool
//! 5. Check the manifest shape
//!
//! The resolver runs through `spawn_blocking`, gated by a semaphore, so rule
//! evaluation never occupies the tasks that accept and answer requests.
//!
//! # Example
//!
//! ```no_run
//! use envzero::service::{ResolutionService, ResolveRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ResolutionService::new(16);
//! let manifest = service.resolve(ResolveRequest::new("Django with Postgres")).await?;
//! println!("{}", manifest.stack);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod routes;
pub mod server;
pub mod validation;

pub use error::ServiceError;
pub use routes::build_router;
pub use server::serve;
pub use validation::ManifestValidator;

use crate::resolver::{self, Manifest, ResolveError, RuleSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error};

/// Longest accepted prompt, in characters, after trimming
pub const MAX_PROMPT_CHARS: usize = 4096;

/// Seam between the service and the resolution engine
pub trait StackResolver: Send + Sync + 'static {
    fn resolve(&self, prompt: &str) -> Result<Manifest, ResolveError>;
}

/// Resolver backed by the built-in rule table
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinResolver;

impl StackResolver for BuiltinResolver {
    fn resolve(&self, prompt: &str) -> Result<Manifest, ResolveError> {
        resolver::detect_stack(prompt)
    }
}

impl StackResolver for RuleSet {
    fn resolve(&self, prompt: &str) -> Result<Manifest, ResolveError> {
        RuleSet::resolve(self, prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub prompt: String,
}

impl ResolveRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Decodes a request body, rejecting bodies without a textual `prompt`
    pub fn from_json(body: Value) -> Result<Self, ServiceError> {
        let Value::Object(mut fields) = body else {
            return Err(ServiceError::InvalidRequest(format!(
                "request body must be a JSON object, got {}",
                resolver::json_type_name(&body)
            )));
        };

        match fields.remove("prompt") {
            None => Err(ServiceError::InvalidRequest(
                "missing required field 'prompt'".to_string(),
            )),
            Some(Value::String(prompt)) => Ok(Self { prompt }),
            Some(other) => Err(ServiceError::Resolve(ResolveError::InvalidInputType {
                found: resolver::json_type_name(&other),
            })),
        }
    }
}

/// Envelope returned for every `/api/resolve` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Manifest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolveResponse {
    pub fn success(manifest: Manifest) -> Self {
        Self {
            ok: true,
            manifest: Some(manifest),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            manifest: None,
            error: Some(message.into()),
        }
    }
}

/// Validates requests and runs the resolver on a bounded worker pool
///
/// Stateless per request; share it across handlers with `Arc`.
pub struct ResolutionService {
    resolver: Arc<dyn StackResolver>,
    permits: Arc<Semaphore>,
    validator: ManifestValidator,
}

impl ResolutionService {
    /// Creates a service over the built-in rule table
    pub fn new(max_concurrent_resolutions: usize) -> Self {
        Self::with_resolver(Arc::new(BuiltinResolver), max_concurrent_resolutions)
    }

    pub fn with_resolver(
        resolver: Arc<dyn StackResolver>,
        max_concurrent_resolutions: usize,
    ) -> Self {
        Self {
            resolver,
            permits: Arc::new(Semaphore::new(max_concurrent_resolutions.max(1))),
            validator: ManifestValidator::default(),
        }
    }

    /// Resolutions that may start right now without waiting for a worker
    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn resolve(&self, request: ResolveRequest) -> Result<Manifest, ServiceError> {
        let start = Instant::now();
        let prompt = validate_prompt(&request.prompt)?;

        let manifest = self.dispatch(prompt).await?;

        if let Err(e) = self.validator.validate(&manifest) {
            error!(error = %e, stack = %manifest.stack, "Resolver returned an invalid manifest");
            return Err(ServiceError::ContractViolation(e.to_string()));
        }

        debug!(
            stack = %manifest.stack,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Prompt resolved"
        );
        Ok(manifest)
    }

    async fn dispatch(&self, prompt: String) -> Result<Manifest, ServiceError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| ServiceError::Internal(format!("worker pool closed: {}", e)))?;
        let resolver = Arc::clone(&self.resolver);

        let joined = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            resolver.resolve(&prompt)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(ServiceError::from),
            Err(e) => {
                error!(error = %e, "Resolver task failed");
                Err(ServiceError::Internal(format!("resolver task failed: {}", e)))
            }
        }
    }
}

impl Default for ResolutionService {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_CONCURRENT_RESOLUTIONS)
    }
}

/// Trims the prompt and enforces the emptiness and size bounds
pub fn validate_prompt(prompt: &str) -> Result<String, ServiceError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(ServiceError::Resolve(ResolveError::EmptyInput));
    }

    let length = prompt.chars().count();
    if length > MAX_PROMPT_CHARS {
        return Err(ServiceError::PromptTooLarge {
            length,
            max: MAX_PROMPT_CHARS,
        });
    }

    Ok(prompt.to_string())
}

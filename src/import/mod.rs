//! Document import pipeline
//!
//! A strictly sequential flow: credential check, text extraction, prompt
//! rendering, the generative structuring call, schema validation, and
//! normalization into a full replacement of the report store and stock
//! ledger. Any failure aborts the whole import before any state changes;
//! the caller commits the replacement in one step afterwards. A missing
//! credential is not a failure of the user flow: the embedded demo payload
//! loads instead.

pub mod extract;
pub mod generate;
pub mod normalize;
pub mod payload;

use thiserror::Error;

use crate::core::config::Config;
pub use extract::{PlainTextExtractor, TextExtractor};
pub use generate::{GeminiExtractor, StructuredExtractor};
pub use normalize::Replacement;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no text could be extracted from the document; it may be empty or corrupted")]
    NoText,

    #[error("the document processing service is not configured (set the {0} environment variable)")]
    ServiceUnavailable(String),

    #[error("extraction service request failed: {0}")]
    Http(String),

    #[error("the service response does not match the import schema: {0}")]
    InvalidPayload(String),

    #[error("failed to parse the service response: {0}")]
    Parse(String),

    #[error("failed to read the document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render the extraction prompt: {0}")]
    Template(#[from] tera::Error),

    #[error("embedded asset '{0}' is missing")]
    MissingAsset(&'static str),
}

/// Where an import's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    /// The configured extraction service processed the document
    Service,
    /// No credential was configured; the embedded demo payload was used
    DemoFallback,
}

/// The wired-together import flow
pub struct ImportPipeline<'a> {
    extractor: &'a dyn TextExtractor,
    service: Option<&'a dyn StructuredExtractor>,
    config: &'a Config,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(
        extractor: &'a dyn TextExtractor,
        service: Option<&'a dyn StructuredExtractor>,
        config: &'a Config,
    ) -> Self {
        Self {
            extractor,
            service,
            config,
        }
    }

    /// Run the pipeline over raw document bytes
    ///
    /// Returns the replacement state and where it came from. Nothing is
    /// committed here. `ServiceUnavailable` is the one failure that does
    /// not fail the user flow: it resolves to the demo payload instead.
    pub fn run(&self, document: &[u8]) -> Result<(Replacement, ImportSource), ImportError> {
        match self.run_service(document) {
            Ok(replacement) => Ok((replacement, ImportSource::Service)),
            Err(ImportError::ServiceUnavailable(_)) => {
                let replacement = normalize::demo_replacement(&self.config.catalog)?;
                Ok((replacement, ImportSource::DemoFallback))
            }
            Err(err) => Err(err),
        }
    }

    fn run_service(&self, document: &[u8]) -> Result<Replacement, ImportError> {
        // Credential check comes before any document work.
        let service = self.service.ok_or_else(|| {
            ImportError::ServiceUnavailable(self.config.extraction.api_key_env.clone())
        })?;

        let text = self.extractor.extract(document)?;
        let prompt = generate::render_prompt(&text, self.config)?;
        let value = service.extract(&prompt)?;
        let payload = payload::validate(value)?;
        Ok(normalize::replacement(payload, &self.config.catalog))
    }
}

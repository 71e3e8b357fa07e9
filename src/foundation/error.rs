/// Convenience result type used across shortsmith.
pub type ShortsResult<T> = Result<T, ShortsError>;

/// Top-level error taxonomy used by pipeline stages.
#[derive(thiserror::Error, Debug)]
pub enum ShortsError {
    /// Invalid configuration, arguments or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// Nothing to work with: zero frames to encode, empty narration text.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// An external tool was missing or failed.
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// The article collaborator could not produce a record.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// The narration collaborator could not produce audio.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// A pipeline stage produced no output; the run is aborted.
    #[error("pipeline stage '{stage}' failed: {source}")]
    Pipeline {
        /// Stage name (`script`, `video`, `voice`, `integrate`, ...).
        stage: &'static str,
        /// Underlying stage error.
        #[source]
        source: Box<ShortsError>,
    },

    /// Errors when serializing or deserializing records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShortsError {
    /// Build a [`ShortsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShortsError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`ShortsError::ExternalTool`] value.
    pub fn external_tool(msg: impl Into<String>) -> Self {
        Self::ExternalTool(msg.into())
    }

    /// Build a [`ShortsError::Extraction`] value.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Build a [`ShortsError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`ShortsError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Wrap a stage failure into a fatal [`ShortsError::Pipeline`].
    pub fn pipeline(stage: &'static str, source: ShortsError) -> Self {
        Self::Pipeline {
            stage,
            source: Box::new(source),
        }
    }

    /// `true` for errors that mean "there was nothing to process".
    pub fn is_empty_input(&self) -> bool {
        match self {
            Self::EmptyInput(_) => true,
            Self::Pipeline { source, .. } => source.is_empty_input(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for ShortsError {
    fn from(e: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Caller-visible error taxonomy.
///
/// Only collaborator failures and malformed configuration surface as errors. Everything the
/// engine can recover from on its own is reported as a [`Fallback`] instead.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The remote font-size suggestion lookup failed. Prior suggestion state is retained.
    #[error("suggestion fetch failed: {0}")]
    SuggestionFetch(String),

    /// A segmentation, rendering or compositing collaborator call failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing wire or config data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Build a [`EngineError::SuggestionFetch`] value.
    pub fn suggestion_fetch(msg: impl Into<String>) -> Self {
        Self::SuggestionFetch(msg.into())
    }

    /// Build a [`EngineError::Collaborator`] value.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Build a [`EngineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EngineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Non-fatal conditions the engine degrades through.
///
/// These never cross the API as `Err`; they are emitted as `tracing` events so hosts can observe
/// them without handling them.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum Fallback {
    /// Image or viewport dimensions are not known yet; transforms degrade to identity.
    #[error("transform unavailable, using identity")]
    TransformUnavailable,

    /// A mutation targeted an index outside the layer sequence; ignored.
    #[error("layer index {index} out of range (len {len})")]
    InvalidLayerIndex {
        /// Requested index.
        index: usize,
        /// Sequence length at the time of the request.
        len: usize,
    },

    /// An effect descriptor could not be resolved; rendered without decoration.
    #[error("effect '{kind}' resolved as none: {reason}")]
    EffectResolutionFallback {
        /// Effect type as written in the descriptor.
        kind: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A drag started while another was active; the earlier drag was ended.
    #[error("drag on layer {previous} ended by new drag on layer {next}")]
    ConcurrentDragConflict {
        /// Layer whose drag was ended.
        previous: usize,
        /// Layer now being dragged.
        next: usize,
    },
}

impl Fallback {
    pub(crate) fn report(&self) {
        match self {
            Self::TransformUnavailable => tracing::trace!(fallback = %self, "engine fallback"),
            Self::InvalidLayerIndex { .. } | Self::ConcurrentDragConflict { .. } => {
                tracing::debug!(fallback = %self, "engine fallback")
            }
            Self::EffectResolutionFallback { .. } => tracing::warn!(fallback = %self, "engine fallback"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

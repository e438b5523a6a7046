//! Contracts of the remote services the editor drives.
//!
//! Implementations live outside the crate (HTTP clients, test doubles). Request and response
//! types serialize to the JSON shapes the services accept.

use std::future::Future;

use crate::composition::model::WireTextLayer;
use crate::foundation::error::{EngineError, EngineResult};
use crate::suggest::session::{SuggestionKey, SuggestionResult};

/// Image file handed to the segmenter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name.
    pub file_name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// Subject/background split of an uploaded image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SegmentedImage {
    /// Cut-out subject, drawn above the text.
    pub foreground: String,
    /// Background the text is rendered onto.
    pub background: String,
    /// Subject mask.
    pub mask: String,
}

/// Multi-layer text rendering request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderTextLayersRequest {
    /// Background image reference.
    pub background_path: String,
    /// Layers in z-order.
    pub text_layers: Vec<WireTextLayer>,
}

/// Background with text rendered in.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderedImage {
    /// Rendered image reference.
    pub image_with_text: String,
}

/// Final composition request: subject pasted over the text layer image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComposeRequest {
    /// Output of [`TextRenderer::render_text_layers`].
    pub background_with_text_path: String,
    /// Segmented subject.
    pub foreground_path: String,
}

/// Finished image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComposedImage {
    /// Final image reference.
    pub final_image: String,
}

/// Splits an image into subject, background and mask.
pub trait Segmenter {
    /// Segment `upload`.
    fn segment(&self, upload: ImageUpload) -> impl Future<Output = EngineResult<SegmentedImage>>;
}

/// Rasterizes text layers onto a background.
pub trait TextRenderer {
    /// Render all layers of `request`.
    fn render_text_layers(
        &self,
        request: RenderTextLayersRequest,
    ) -> impl Future<Output = EngineResult<RenderedImage>>;
}

/// Pastes the subject back over rendered text.
pub trait Compositor {
    /// Produce the final image.
    fn compose_final(
        &self,
        request: ComposeRequest,
    ) -> impl Future<Output = EngineResult<ComposedImage>>;
}

/// Proposes font sizes (with previews) for a piece of text at a position.
pub trait FontSizeSuggester {
    /// Look up candidates for `key`.
    fn suggest(&self, key: &SuggestionKey)
    -> impl Future<Output = EngineResult<SuggestionResult>>;
}

pub(crate) fn collaborator_error(err: EngineError) -> EngineError {
    match err {
        EngineError::Collaborator(_) => err,
        other => EngineError::collaborator(other.to_string()),
    }
}

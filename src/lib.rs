//! Layerstage positions and styles text layers over a segmented photo.
//!
//! Layers live in the pixel space of the uploaded image ("canonical" space) and are shown in a
//! resizable viewport. The engine keeps the two spaces apart:
//!
//! - Build an [`EditorController`] from an [`EditorConfig`]
//! - Add, restyle, reorder and drag layers; read [`DisplayLayer`]s back for drawing
//! - Fetch font-size suggestions through a [`FontSizeSuggester`] (last request wins)
//! - Hand the canonical layers to a [`TextRenderer`] and [`Compositor`] for the final image
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod composition;
pub(crate) mod editor;
pub(crate) mod effects;
pub(crate) mod interact;
pub(crate) mod layout;
pub(crate) mod suggest;
pub(crate) mod transform;

pub use crate::foundation::core::{
    Affine, CanonicalImage, DisplayViewport, HexColor, Point, Rect, Size, Vec2,
};
pub use crate::foundation::error::{EngineError, EngineResult, Fallback};

pub use crate::composition::model::{
    DEFAULT_FONT_SIZE, EffectDescriptor, FontName, LayerDraft, LayerId, TextLayer, TextStyle,
    WirePoint, WireTextLayer,
};
pub use crate::composition::store::{LayerSeq, LayerStore, Reindex};
pub use crate::editor::collab::{
    ComposeRequest, ComposedImage, Compositor, FontSizeSuggester, ImageUpload,
    RenderTextLayersRequest, RenderedImage, SegmentedImage, Segmenter, TextRenderer,
};
pub use crate::editor::config::EditorConfig;
pub use crate::editor::controller::{DisplayLayer, EditorController};
pub use crate::effects::fx::{
    DepthStep, GLOW_MAX_RINGS, GLOW_SAMPLES_PER_RING, GlowRing, ResolvedDepth, ResolvedEffect,
    ResolvedGlow, ResolvedOutline, ResolvedShadow, resolve_effect,
};
pub use crate::interact::controller::{
    DragState, InteractionState, NoopObserver, SelectionDragController, ViewportObserver,
};
pub use crate::layout::anchor::{
    ApproxMetrics, TextMetrics, VERTICAL_ANCHOR_ADJUSTMENT, hit_test, text_bounds,
};
pub use crate::suggest::session::{
    AppliedSuggestion, SuggestionKey, SuggestionRequest, SuggestionResult, SuggestionSession,
};
pub use crate::transform::coords::CoordinateMapper;

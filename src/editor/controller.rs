use std::sync::Arc;

use crate::composition::model::{EffectDescriptor, FontName, LayerDraft, LayerId, TextLayer};
use crate::composition::store::{LayerSeq, LayerStore, Reindex};
use crate::editor::collab::{
    ComposeRequest, ComposedImage, Compositor, FontSizeSuggester, ImageUpload,
    RenderTextLayersRequest, RenderedImage, SegmentedImage, Segmenter, TextRenderer,
    collaborator_error,
};
use crate::editor::config::EditorConfig;
use crate::effects::fx::{ResolvedEffect, resolve_effect};
use crate::foundation::core::{CanonicalImage, DisplayViewport, HexColor, Point, Rect};
use crate::foundation::error::{EngineError, EngineResult};
use crate::interact::controller::{
    DragState, InteractionState, NoopObserver, SelectionDragController, ViewportObserver,
};
use crate::layout::anchor::{ApproxMetrics, TextMetrics, hit_test, text_bounds};
use crate::suggest::session::{
    AppliedSuggestion, SuggestionKey, SuggestionRequest, SuggestionResult, SuggestionSession,
};
use crate::transform::coords::CoordinateMapper;

/// A layer as the presentation layer draws it: display-space geometry, resolved effect.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayLayer {
    /// Layer identity.
    pub id: LayerId,
    /// Text content.
    pub text: String,
    /// Anchor position in display space.
    pub position: Point,
    /// Font size in display pixels.
    pub font_size: f64,
    /// Font.
    pub font_name: FontName,
    /// Fill colour.
    pub color: HexColor,
    /// Effect scaled to the current viewport.
    pub effect: ResolvedEffect,
    /// Approximate text box in display space.
    pub bounds: Rect,
    /// Whether this layer is selected.
    pub selected: bool,
}

/// Entry point for the presentation layer.
///
/// Owns the layer store, selection/drag state and suggestion session, keeps them consistent with
/// each other, and is the only thing that talks to the remote collaborators. Everything is
/// stored in canonical space; display values are recomputed from the current viewport on every
/// call.
pub struct EditorController<O: ViewportObserver = NoopObserver> {
    config: EditorConfig,
    image: Option<CanonicalImage>,
    viewport: Option<DisplayViewport>,
    background: Option<SegmentedImage>,
    store: LayerStore,
    interaction: SelectionDragController<O>,
    suggestions: SuggestionSession,
    metrics: Box<dyn TextMetrics>,
}

impl EditorController<NoopObserver> {
    /// Editor with default configuration and no pointer tracking.
    pub fn with_defaults() -> Self {
        Self::build(EditorConfig::default(), NoopObserver)
    }
}

impl<O: ViewportObserver> EditorController<O> {
    /// Build an editor from a validated configuration.
    pub fn new(config: EditorConfig, observer: O) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::build(config, observer))
    }

    fn build(config: EditorConfig, observer: O) -> Self {
        let metrics = ApproxMetrics {
            advance_ratio: config.advance_ratio,
        };
        Self {
            image: config.image,
            viewport: config.viewport,
            background: None,
            store: LayerStore::new(),
            interaction: SelectionDragController::new(observer),
            suggestions: SuggestionSession::new(),
            metrics: Box::new(metrics),
            config,
        }
    }

    /// Replace the metrics used for hit testing and display bounds.
    pub fn set_metrics(&mut self, metrics: impl TextMetrics + 'static) {
        self.metrics = Box::new(metrics);
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Canonical image dimensions became known (image loaded). Layers are kept as they are.
    pub fn set_image(&mut self, image: CanonicalImage) {
        tracing::debug!(width = image.width, height = image.height, "image dimensions set");
        self.image = Some(image);
    }

    /// Canonical image dimensions, if known.
    pub fn image(&self) -> Option<CanonicalImage> {
        self.image
    }

    /// The viewport changed size. An active drag keeps going at the new scale.
    pub fn resize_viewport(&mut self, viewport: DisplayViewport) {
        tracing::trace!(width = viewport.width, height = viewport.height, "viewport resized");
        self.viewport = Some(viewport);
    }

    /// The viewport went away (unmounted). Any drag is cancelled and the mapper falls back to
    /// identity until the next resize.
    pub fn detach_viewport(&mut self) {
        self.interaction.cancel_drag();
        self.viewport = None;
    }

    /// Current viewport, if known.
    pub fn viewport(&self) -> Option<DisplayViewport> {
        self.viewport
    }

    /// Mapper for the current dimensions.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.image, self.viewport)
    }

    /// Current layer snapshot.
    pub fn layers(&self) -> LayerSeq {
        self.store.snapshot()
    }

    /// Layer at `index`.
    pub fn layer(&self, index: usize) -> Option<&Arc<TextLayer>> {
        self.store.get(index)
    }

    /// Selection/drag state.
    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Selected index.
    pub fn selection(&self) -> Option<usize> {
        self.interaction.selection()
    }

    /// Selected layer.
    pub fn selected_layer(&self) -> Option<&Arc<TextLayer>> {
        self.selection().and_then(|i| self.store.get(i))
    }

    /// Borrow the viewport observer.
    pub fn observer(&self) -> &O {
        self.interaction.observer()
    }

    /// Add a layer on top. Without a position it goes to the image centre, or the configured
    /// fallback point while the image dimensions are unknown.
    pub fn add_layer(&mut self, draft: LayerDraft) -> usize {
        let position = draft.position.unwrap_or_else(|| match self.image {
            Some(img) if img.size().is_some() => img.center(),
            _ => self.config.fallback_position,
        });
        let style = draft
            .style
            .unwrap_or_else(|| self.config.default_style.clone());

        let index = self.store.add(draft.text, position, style);
        if self.config.select_on_add {
            self.interaction.select(index, self.store.len());
        }
        index
    }

    /// Remove the layer at `index`, keeping the selection on the same layer if it survives.
    pub fn remove_layer(&mut self, index: usize) -> bool {
        self.restructure(|s| s.remove(index))
    }

    /// Swap the layer at `index` one step towards the back.
    pub fn move_layer_up(&mut self, index: usize) -> bool {
        self.restructure(|s| s.move_up(index))
    }

    /// Swap the layer at `index` one step towards the front.
    pub fn move_layer_down(&mut self, index: usize) -> bool {
        self.restructure(|s| s.move_down(index))
    }

    fn restructure(&mut self, f: impl FnOnce(&mut LayerStore) -> Option<Reindex>) -> bool {
        match f(&mut self.store) {
            Some(reindex) => {
                self.interaction.apply_reindex(reindex);
                true
            }
            None => false,
        }
    }

    /// Replace a layer's text.
    pub fn update_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        self.store.update_text(index, text)
    }

    /// Move a layer to canonical `position`.
    pub fn update_position(&mut self, index: usize, position: Point) -> bool {
        self.store.update_position(index, position)
    }

    /// Replace a layer's canonical font size.
    pub fn update_font_size(&mut self, index: usize, font_size: f64) -> bool {
        self.store.update_font_size(index, font_size)
    }

    /// Replace a layer's font.
    pub fn update_font_name(&mut self, index: usize, font_name: FontName) -> bool {
        self.store.update_font_name(index, font_name)
    }

    /// Replace a layer's fill colour.
    pub fn update_color(&mut self, index: usize, color: HexColor) -> bool {
        self.store.update_color(index, color)
    }

    /// Replace a layer's effect.
    pub fn update_effect(&mut self, index: usize, effect: EffectDescriptor) -> bool {
        self.store.update_effect(index, effect)
    }

    /// Select the layer at `index`.
    pub fn select(&mut self, index: usize) {
        self.interaction.select(index, self.store.len());
    }

    /// Clear the selection.
    pub fn click_empty(&mut self) {
        self.interaction.click_empty();
    }

    /// Topmost layer under display-space `point`.
    pub fn layer_at(&self, point: Point) -> Option<usize> {
        let p = self.mapper().to_canonical(point);
        hit_test(
            self.store.layers(),
            p,
            self.metrics.as_ref(),
            self.config.vertical_anchor_adjustment,
        )
    }

    /// Pointer pressed at display-space `point`. Starts dragging the topmost layer there, or
    /// clears the selection when nothing is hit.
    pub fn pointer_down(&mut self, point: Point) -> Option<usize> {
        match self.layer_at(point) {
            Some(index) => {
                self.pointer_down_on(index, point);
                Some(index)
            }
            None => {
                self.interaction.click_empty();
                None
            }
        }
    }

    /// Pointer pressed on a known layer (the host did its own hit testing).
    pub fn pointer_down_on(&mut self, index: usize, point: Point) {
        let len = self.store.len();
        let Some(layer) = self.store.get(index) else {
            // Let the controller report the bad index.
            self.interaction.pointer_down(index, len, point, Point::ORIGIN);
            return;
        };
        let start = layer.position;
        self.interaction.pointer_down(index, len, point, start);
    }

    /// Pointer moved to display-space `point`. Returns the moved layer's index.
    pub fn pointer_move(&mut self, point: Point) -> Option<usize> {
        let (index, position) = self.interaction.pointer_move(point, &self.mapper())?;
        self.store.update_position(index, position).then_some(index)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> Option<DragState> {
        self.interaction.pointer_up()
    }

    /// Abandon the drag; the layer stays where it was last moved.
    pub fn cancel_drag(&mut self) -> Option<DragState> {
        self.interaction.cancel_drag()
    }

    /// Display-ready view of every layer, in z-order.
    pub fn display_layers(&self) -> Vec<DisplayLayer> {
        let mapper = self.mapper();
        let scale = mapper.scale_factor_y();
        let selected = self.selection();
        self.store
            .layers()
            .iter()
            .enumerate()
            .map(|(i, l)| {
                let b = text_bounds(
                    l,
                    self.metrics.as_ref(),
                    self.config.vertical_anchor_adjustment,
                );
                DisplayLayer {
                    id: l.id,
                    text: l.text.clone(),
                    position: mapper.to_display(l.position),
                    font_size: mapper.size_to_display(l.style.font_size),
                    font_name: l.style.font_name,
                    color: l.style.color,
                    effect: resolve_effect(&l.style.effect, scale),
                    bounds: Rect::from_points(
                        mapper.to_display(b.origin()),
                        mapper.to_display(Point::new(b.x1, b.y1)),
                    ),
                    selected: selected == Some(i),
                }
            })
            .collect()
    }

    /// Effect of the layer at `index`, scaled to the current viewport.
    pub fn resolved_effect(&self, index: usize) -> Option<ResolvedEffect> {
        let layer = self.store.get(index)?;
        Some(resolve_effect(
            &layer.style.effect,
            self.mapper().scale_factor_y(),
        ))
    }

    /// Install a segmentation result. Layers are left untouched.
    pub fn set_background(&mut self, background: SegmentedImage) {
        self.background = Some(background);
    }

    /// Current segmentation result.
    pub fn background(&self) -> Option<&SegmentedImage> {
        self.background.as_ref()
    }

    /// Segment `upload` and install the result as the background.
    #[tracing::instrument(skip(self, segmenter, upload), fields(file = %upload.file_name))]
    pub async fn segment<S: Segmenter>(
        &mut self,
        segmenter: &S,
        upload: ImageUpload,
    ) -> EngineResult<&SegmentedImage> {
        let seg = segmenter
            .segment(upload)
            .await
            .map_err(collaborator_error)?;
        Ok(self.background.insert(seg))
    }

    /// Suggestion lookup key for the layer at `index`. Needs a background.
    pub fn suggestion_key_for(&self, index: usize) -> Option<SuggestionKey> {
        let bg = self.background.as_ref()?;
        let wire = self.store.get(index)?.to_wire();
        Some(SuggestionKey {
            background_ref: bg.background.clone(),
            text: wire.text,
            position: wire.position,
            font_name: wire.style.font_name,
        })
    }

    /// Issue a suggestion request for the selected layer, unless the same question is already
    /// the latest one.
    pub fn request_suggestion(&mut self) -> Option<SuggestionRequest> {
        let index = self.selection()?;
        let key = self.suggestion_key_for(index)?;
        let id = self.store.get(index)?.id;
        self.suggestions.issue(id, key)
    }

    /// Issue the latest suggestion request again.
    pub fn retry_suggestion(&mut self) -> Option<SuggestionRequest> {
        self.suggestions.retry()
    }

    /// Run one suggestion request. Does not borrow the editor, so several can be in flight.
    #[tracing::instrument(skip(suggester, request), fields(seq = request.seq))]
    pub async fn fetch_suggestion<F: FontSizeSuggester>(
        suggester: &F,
        request: &SuggestionRequest,
    ) -> EngineResult<SuggestionResult> {
        suggester.suggest(&request.key).await
    }

    /// Reconcile a fetched outcome. When applied, the requesting layer (wherever it is now)
    /// takes the default suggested size.
    pub fn apply_suggestion(
        &mut self,
        request: &SuggestionRequest,
        outcome: EngineResult<SuggestionResult>,
    ) -> EngineResult<Option<u32>> {
        let size = self.suggestions.apply(request, outcome)?;
        if let Some(size) = size {
            self.resize_layer(request.layer, size);
        }
        Ok(size)
    }

    /// Issue, fetch and apply a suggestion for the selected layer in one go.
    pub async fn refresh_suggestion<F: FontSizeSuggester>(
        &mut self,
        suggester: &F,
    ) -> EngineResult<Option<u32>> {
        let Some(request) = self.request_suggestion() else {
            return Ok(None);
        };
        let outcome = Self::fetch_suggestion(suggester, &request).await;
        self.apply_suggestion(&request, outcome)
    }

    /// Pick another suggested size.
    pub fn select_suggestion(&mut self, index: usize) -> Option<u32> {
        let size = self.suggestions.select_index(index)?;
        if let Some(applied) = self.suggestions.current() {
            let layer = applied.layer;
            self.resize_layer(layer, size);
        }
        Some(size)
    }

    /// Applied suggestion, if any.
    pub fn suggestion(&self) -> Option<&AppliedSuggestion> {
        self.suggestions.current()
    }

    fn resize_layer(&mut self, id: LayerId, size: u32) {
        match self.store.index_of(id) {
            Some(i) => {
                self.store.update_font_size(i, f64::from(size));
            }
            None => tracing::debug!(%id, "suggested layer no longer exists"),
        }
    }

    /// Request for the text renderer built from the current layers. Needs a background.
    pub fn render_request(&self) -> Option<RenderTextLayersRequest> {
        let bg = self.background.as_ref()?;
        Some(RenderTextLayersRequest {
            background_path: bg.background.clone(),
            text_layers: self.store.layers().iter().map(|l| l.to_wire()).collect(),
        })
    }

    /// Render the current layers onto the background.
    #[tracing::instrument(skip(self, renderer), fields(layers = self.store.len()))]
    pub async fn render_text<R: TextRenderer>(&self, renderer: &R) -> EngineResult<RenderedImage> {
        let request = self
            .render_request()
            .ok_or_else(|| EngineError::validation("no background to render onto"))?;
        renderer
            .render_text_layers(request)
            .await
            .map_err(collaborator_error)
    }

    /// Paste the segmented subject over `rendered`.
    #[tracing::instrument(skip(self, compositor, rendered))]
    pub async fn compose<C: Compositor>(
        &self,
        compositor: &C,
        rendered: &RenderedImage,
    ) -> EngineResult<ComposedImage> {
        let bg = self
            .background
            .as_ref()
            .ok_or_else(|| EngineError::validation("no foreground to compose"))?;
        compositor
            .compose_final(ComposeRequest {
                background_with_text_path: rendered.image_with_text.clone(),
                foreground_path: bg.foreground.clone(),
            })
            .await
            .map_err(collaborator_error)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/controller.rs"]
mod tests;

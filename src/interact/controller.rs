use crate::composition::store::Reindex;
use crate::foundation::core::Point;
use crate::foundation::error::Fallback;
use crate::transform::coords::CoordinateMapper;

/// Host-side source of viewport and pointer events.
///
/// The engine never installs global listeners itself. While a drag is active it asks the
/// observer to deliver pointer events from anywhere on screen (the pointer routinely leaves the
/// dragged element), and it releases that request on every exit from the drag.
pub trait ViewportObserver {
    /// Begin delivering pointer move/up events globally.
    fn track_pointer(&mut self);
    /// Stop delivering global pointer events.
    fn release_pointer(&mut self);
}

/// Observer for hosts that deliver every pointer event unconditionally.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ViewportObserver for NoopObserver {
    fn track_pointer(&mut self) {}
    fn release_pointer(&mut self) {}
}

/// Captured at drag start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    /// Index of the dragged layer.
    pub layer_index: usize,
    /// Pointer position in display space when the drag began.
    pub pointer_start: Point,
    /// Layer position in canonical space when the drag began.
    pub layer_start: Point,
}

/// Selection/drag state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A layer is selected.
    Selected(usize),
    /// A layer is selected and being dragged.
    Dragging(DragState),
}

impl InteractionState {
    /// Selected layer index, including while dragging.
    pub fn selection(&self) -> Option<usize> {
        match *self {
            InteractionState::Idle => None,
            InteractionState::Selected(i) => Some(i),
            InteractionState::Dragging(d) => Some(d.layer_index),
        }
    }

    /// Active drag, if any.
    pub fn drag(&self) -> Option<&DragState> {
        match self {
            InteractionState::Dragging(d) => Some(d),
            _ => None,
        }
    }
}

/// Selection and drag state machine.
///
/// `Idle -> Selected(i) -> Dragging(i) -> Selected(i)`. Only one drag exists at a time: starting
/// a second one ends the first. Dragging is an absolute remap, each pointer move sets the layer
/// to `mapper.to_canonical(pointer)` using the mapper current at that moment.
///
/// The controller holds indices, not layers. Callers pass the layer count where an index needs
/// validating and forward store [`Reindex`] results through
/// [`SelectionDragController::apply_reindex`].
pub struct SelectionDragController<O: ViewportObserver> {
    state: InteractionState,
    observer: O,
}

impl<O: ViewportObserver> SelectionDragController<O> {
    /// Idle controller bound to `observer`.
    pub fn new(observer: O) -> Self {
        Self {
            state: InteractionState::Idle,
            observer,
        }
    }

    /// Current state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Selected layer index, including while dragging.
    pub fn selection(&self) -> Option<usize> {
        self.state.selection()
    }

    /// Borrow the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Select layer `index` of `len`. An active drag on another layer ends first.
    pub fn select(&mut self, index: usize, len: usize) {
        if !valid(index, len) {
            return;
        }
        if self.state.drag().is_some_and(|d| d.layer_index == index) {
            return;
        }
        self.end_drag();
        self.state = InteractionState::Selected(index);
    }

    /// Click or tap that hit no layer.
    pub fn click_empty(&mut self) {
        self.end_drag();
        self.state = InteractionState::Idle;
    }

    /// Pointer pressed on layer `index` of `len`, currently at canonical `layer_position`.
    pub fn pointer_down(&mut self, index: usize, len: usize, pointer: Point, layer_position: Point) {
        if !valid(index, len) {
            return;
        }
        if let Some(prev) = self.end_drag()
            && prev.layer_index != index
        {
            Fallback::ConcurrentDragConflict {
                previous: prev.layer_index,
                next: index,
            }
            .report();
        }

        self.observer.track_pointer();
        self.state = InteractionState::Dragging(DragState {
            layer_index: index,
            pointer_start: pointer,
            layer_start: layer_position,
        });
        tracing::trace!(index, ?pointer, "drag started");
    }

    /// Pointer moved to display-space `pointer`. Returns the dragged layer and its new canonical
    /// position, or `None` when not dragging.
    pub fn pointer_move(&self, pointer: Point, mapper: &CoordinateMapper) -> Option<(usize, Point)> {
        let d = self.state.drag()?;
        Some((d.layer_index, mapper.to_canonical(pointer)))
    }

    /// Pointer released. Returns the finished drag.
    pub fn pointer_up(&mut self) -> Option<DragState> {
        self.end_drag()
    }

    /// Abandon the drag (e.g. the viewport went away). The layer keeps its last position.
    pub fn cancel_drag(&mut self) -> Option<DragState> {
        self.end_drag()
    }

    /// Follow a structural store change so the state keeps pointing at the same layer.
    pub fn apply_reindex(&mut self, reindex: Reindex) {
        self.state = match self.state {
            InteractionState::Idle => InteractionState::Idle,
            InteractionState::Selected(i) => match reindex.remap(i) {
                Some(j) => InteractionState::Selected(j),
                None => InteractionState::Idle,
            },
            InteractionState::Dragging(d) => match reindex.remap(d.layer_index) {
                Some(j) => InteractionState::Dragging(DragState { layer_index: j, ..d }),
                None => {
                    self.observer.release_pointer();
                    InteractionState::Idle
                }
            },
        };
    }

    fn end_drag(&mut self) -> Option<DragState> {
        let InteractionState::Dragging(d) = self.state else {
            return None;
        };
        self.observer.release_pointer();
        self.state = InteractionState::Selected(d.layer_index);
        tracing::trace!(index = d.layer_index, "drag ended");
        Some(d)
    }
}

impl<O: ViewportObserver> Drop for SelectionDragController<O> {
    fn drop(&mut self) {
        self.end_drag();
    }
}

fn valid(index: usize, len: usize) -> bool {
    if index < len {
        return true;
    }
    Fallback::InvalidLayerIndex { index, len }.report();
    false
}

#[cfg(test)]
#[path = "../../tests/unit/interact/controller.rs"]
mod tests;

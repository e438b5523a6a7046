use std::sync::Arc;

use crate::composition::model::{EffectDescriptor, FontName, LayerId, TextLayer, TextStyle};
use crate::foundation::core::{HexColor, Point};
use crate::foundation::error::Fallback;

/// Immutable snapshot of the layer sequence. Index order is z-order (last is drawn on top).
pub type LayerSeq = Arc<[Arc<TextLayer>]>;

/// How indices moved as a result of a structural store mutation.
///
/// Index-holding state (selection, drag) applies this to keep pointing at the same layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reindex {
    /// The layer at this index was removed; later layers shifted down by one.
    Removed(usize),
    /// The layers at these two indices traded places.
    Swapped(usize, usize),
}

impl Reindex {
    /// New index of the layer that was at `index`, or `None` if it no longer exists.
    pub fn remap(self, index: usize) -> Option<usize> {
        match self {
            Reindex::Removed(r) if index == r => None,
            Reindex::Removed(r) if index > r => Some(index - 1),
            Reindex::Removed(_) => Some(index),
            Reindex::Swapped(a, b) if index == a => Some(b),
            Reindex::Swapped(a, b) if index == b => Some(a),
            Reindex::Swapped(..) => Some(index),
        }
    }
}

/// Ordered text layer collection with copy-on-write mutation.
///
/// Every mutation publishes a new [`LayerSeq`]; layers that were not touched keep their `Arc`
/// identity, so consumers can detect changes with [`Arc::ptr_eq`] and hold snapshots without
/// locking. Out-of-range indices are ignored.
#[derive(Clone, Debug)]
pub struct LayerStore {
    layers: LayerSeq,
    next_id: u64,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            layers: Arc::from(Vec::new()),
            next_id: 0,
        }
    }

    /// Current sequence, cheap to clone and safe to share.
    pub fn snapshot(&self) -> LayerSeq {
        Arc::clone(&self.layers)
    }

    /// Borrow the current sequence.
    pub fn layers(&self) -> &[Arc<TextLayer>] {
        &self.layers
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` when there are no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<TextLayer>> {
        self.layers.get(index)
    }

    /// Current index of the layer with `id`.
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Append a layer on top and return its index.
    pub fn add(&mut self, text: impl Into<String>, position: Point, style: TextStyle) -> usize {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let mut next = self.layers.to_vec();
        next.push(Arc::new(TextLayer {
            id,
            text: text.into(),
            position,
            style,
        }));
        self.publish(next);
        tracing::debug!(%id, index = self.len() - 1, "layer added");
        self.len() - 1
    }

    /// Remove the layer at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Reindex> {
        self.check_index(index)?;
        let mut next = self.layers.to_vec();
        let removed = next.remove(index);
        self.publish(next);
        tracing::debug!(id = %removed.id, index, "layer removed");
        Some(Reindex::Removed(index))
    }

    /// Swap the layer at `index` with the one below it (towards the back). No-op at index 0.
    pub fn move_up(&mut self, index: usize) -> Option<Reindex> {
        self.check_index(index)?;
        if index == 0 {
            return None;
        }
        Some(self.swap(index - 1, index))
    }

    /// Swap the layer at `index` with the one above it (towards the front). No-op at the end.
    pub fn move_down(&mut self, index: usize) -> Option<Reindex> {
        self.check_index(index)?;
        if index + 1 >= self.len() {
            return None;
        }
        Some(self.swap(index, index + 1))
    }

    /// Replace the text of one layer.
    pub fn update_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(index, |l| l.text = text)
    }

    /// Replace the canonical position of one layer.
    pub fn update_position(&mut self, index: usize, position: Point) -> bool {
        self.update(index, |l| l.position = position)
    }

    /// Replace the canonical font size of one layer.
    pub fn update_font_size(&mut self, index: usize, font_size: f64) -> bool {
        self.update(index, |l| l.style.font_size = font_size)
    }

    /// Replace the font of one layer.
    pub fn update_font_name(&mut self, index: usize, font_name: FontName) -> bool {
        self.update(index, |l| l.style.font_name = font_name)
    }

    /// Replace the fill colour of one layer.
    pub fn update_color(&mut self, index: usize, color: HexColor) -> bool {
        self.update(index, |l| l.style.color = color)
    }

    /// Replace the effect of one layer.
    pub fn update_effect(&mut self, index: usize, effect: EffectDescriptor) -> bool {
        self.update(index, |l| l.style.effect = effect)
    }

    fn update(&mut self, index: usize, f: impl FnOnce(&mut TextLayer)) -> bool {
        if self.check_index(index).is_none() {
            return false;
        }
        let mut layer = TextLayer::clone(&self.layers[index]);
        f(&mut layer);

        let mut next = self.layers.to_vec();
        next[index] = Arc::new(layer);
        self.publish(next);
        true
    }

    fn swap(&mut self, a: usize, b: usize) -> Reindex {
        let mut next = self.layers.to_vec();
        next.swap(a, b);
        self.publish(next);
        Reindex::Swapped(a, b)
    }

    fn publish(&mut self, next: Vec<Arc<TextLayer>>) {
        self.layers = Arc::from(next);
    }

    fn check_index(&self, index: usize) -> Option<usize> {
        if index < self.len() {
            return Some(index);
        }
        Fallback::InvalidLayerIndex {
            index,
            len: self.len(),
        }
        .report();
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/store.rs"]
mod tests;

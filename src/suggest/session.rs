use std::collections::BTreeMap;

use crate::composition::model::{FontName, LayerId, WirePoint};
use crate::foundation::error::{EngineError, EngineResult};
use crate::foundation::math::middle_index;

/// Inputs a font-size suggestion depends on. Two requests answer the same question iff their
/// keys are equal.
///
/// Positions are compared in whole canonical pixels, the precision the renderer works at.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SuggestionKey {
    /// Background image reference.
    #[serde(rename = "background_path")]
    pub background_ref: String,
    /// Layer text.
    pub text: String,
    /// Layer position, canonical pixels.
    pub position: WirePoint,
    /// Layer font.
    pub font_name: FontName,
}

/// One issued lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Issue order within the session, starting at 0.
    pub seq: u64,
    /// Layer the request was made for.
    pub layer: LayerId,
    /// What is being asked.
    pub key: SuggestionKey,
}

/// Candidate sizes and their preview thumbnails, as returned by the suggester.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SuggestionResult {
    /// Candidate font sizes.
    pub sizes: Vec<u32>,
    /// Preview image reference per candidate size.
    #[serde(default)]
    pub previews: BTreeMap<u32, String>,
}

/// Suggestion state visible to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedSuggestion {
    /// Key the suggestion answers.
    pub key: SuggestionKey,
    /// Layer it was requested for.
    pub layer: LayerId,
    /// Candidate sizes, ascending and without duplicates. Never empty.
    pub sizes: Vec<u32>,
    /// Preview image reference per size.
    pub previews: BTreeMap<u32, String>,
    /// Index into `sizes` of the chosen candidate.
    pub selected: usize,
}

impl AppliedSuggestion {
    /// Chosen size.
    pub fn selected_size(&self) -> u32 {
        self.sizes[self.selected]
    }

    /// Preview for the chosen size.
    pub fn selected_preview(&self) -> Option<&str> {
        self.previews.get(&self.selected_size()).map(String::as_str)
    }
}

/// Last-request-wins reconciliation of font-size suggestions.
///
/// Requests are issued here and resolved elsewhere; responses may come back in any order. A
/// response is applied only if its key equals the key of the most recently issued request, so a
/// slow answer to an old question can never overwrite the answer to the current one. There is
/// no cancellation and no automatic retry.
#[derive(Clone, Debug, Default)]
pub struct SuggestionSession {
    latest: Option<SuggestionRequest>,
    next_seq: u64,
    applied: Option<AppliedSuggestion>,
}

impl SuggestionSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `key` unless it equals the most recent one.
    pub fn issue(&mut self, layer: LayerId, key: SuggestionKey) -> Option<SuggestionRequest> {
        if self.latest.as_ref().is_some_and(|r| r.key == key) {
            return None;
        }
        Some(self.push(layer, key))
    }

    /// Issue the most recent request again, e.g. after a surfaced failure.
    pub fn retry(&mut self) -> Option<SuggestionRequest> {
        let prev = self.latest.clone()?;
        Some(self.push(prev.layer, prev.key))
    }

    /// Most recently issued request.
    pub fn latest(&self) -> Option<&SuggestionRequest> {
        self.latest.as_ref()
    }

    /// Applied suggestion, if any.
    pub fn current(&self) -> Option<&AppliedSuggestion> {
        self.applied.as_ref()
    }

    /// Reconcile the outcome of `request`.
    ///
    /// Returns `Ok(Some(size))` with the default (middle) candidate when applied, `Ok(None)` when
    /// the response is stale, and `Err(SuggestionFetch)` when the current request failed. Failures
    /// leave the previously applied suggestion untouched.
    pub fn apply(
        &mut self,
        request: &SuggestionRequest,
        outcome: EngineResult<SuggestionResult>,
    ) -> EngineResult<Option<u32>> {
        if self.latest.as_ref().is_none_or(|r| r.key != request.key) {
            tracing::debug!(seq = request.seq, "discarding stale suggestion response");
            return Ok(None);
        }

        let result = outcome.map_err(|e| match e {
            EngineError::SuggestionFetch(_) => e,
            other => EngineError::suggestion_fetch(other.to_string()),
        })?;

        let mut sizes = result.sizes;
        sizes.sort_unstable();
        sizes.dedup();
        let Some(selected) = middle_index(sizes.len()) else {
            return Err(EngineError::suggestion_fetch("suggester returned no sizes"));
        };

        let applied = AppliedSuggestion {
            key: request.key.clone(),
            layer: request.layer,
            sizes,
            previews: result.previews,
            selected,
        };
        let size = applied.selected_size();
        tracing::debug!(seq = request.seq, size, "suggestion applied");
        self.applied = Some(applied);
        Ok(Some(size))
    }

    /// Choose another candidate. Returns the newly chosen size.
    pub fn select_index(&mut self, index: usize) -> Option<u32> {
        let applied = self.applied.as_mut()?;
        if index >= applied.sizes.len() {
            return None;
        }
        applied.selected = index;
        Some(applied.selected_size())
    }

    fn push(&mut self, layer: LayerId, key: SuggestionKey) -> SuggestionRequest {
        let req = SuggestionRequest {
            seq: self.next_seq,
            layer,
            key,
        };
        self.next_seq += 1;
        self.latest = Some(req.clone());
        req
    }
}

#[cfg(test)]
#[path = "../../tests/unit/suggest/session.rs"]
mod tests;

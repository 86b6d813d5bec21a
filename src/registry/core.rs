use std::collections::{BTreeSet, HashMap};

use blake3::Hash;

use crate::error::{DashboardError, Result};
use crate::geometry::Rect;

pub type PaneId = String;

/// Title and body lines for one pane. The body is addressed row by row
/// within the pane's content area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneContent {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl PaneContent {
    pub fn new(title: Option<String>, lines: Vec<String>) -> Self {
        Self { title, lines }
    }

    fn digest(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        if let Some(title) = &self.title {
            hasher.update(&[1]);
            hasher.update(title.as_bytes());
        } else {
            hasher.update(&[0]);
        }
        for line in &self.lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize()
    }
}

/// Where a pane sits and whether it is drawn inside a box frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub rect: Rect,
    pub framed: bool,
}

impl PaneLayout {
    pub fn framed(rect: Rect) -> Self {
        Self { rect, framed: true }
    }

    pub fn bare(rect: Rect) -> Self {
        Self {
            rect,
            framed: false,
        }
    }

    /// Area available to the pane body.
    pub fn content_rect(&self) -> Rect {
        if self.framed {
            self.rect.inner()
        } else {
            self.rect
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaneState {
    pub layout: PaneLayout,
    pub content: PaneContent,
    hash: Option<Hash>,
    pub is_dirty: bool,
}

impl PaneState {
    fn new(layout: PaneLayout) -> Self {
        Self {
            layout,
            content: PaneContent::default(),
            hash: None,
            is_dirty: true,
        }
    }

    fn update_content(&mut self, content: PaneContent) {
        let new_hash = content.digest();
        if self.hash.map(|h| h != new_hash).unwrap_or(true) {
            self.content = content;
            self.hash = Some(new_hash);
            self.is_dirty = true;
        }
    }
}

/// Registry mapping panes to their last known states.
#[derive(Debug, Default)]
pub struct PaneRegistry {
    entries: HashMap<PaneId, PaneState>,
    dirty: BTreeSet<PaneId>,
    vacated: Vec<Rect>,
}

impl PaneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align the registry with a fresh layout pass. Panes whose placement
    /// changed are marked dirty; panes that no longer exist are dropped and
    /// their area queued for blanking.
    pub fn sync_layout(&mut self, solved: &HashMap<PaneId, PaneLayout>) {
        use std::collections::hash_map::Entry;

        for (id, layout) in solved {
            match self.entries.entry(id.clone()) {
                Entry::Occupied(mut entry) => {
                    let state = entry.get_mut();
                    if state.layout != *layout {
                        state.layout = *layout;
                        state.is_dirty = true;
                        self.dirty.insert(id.clone());
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(PaneState::new(*layout));
                    self.dirty.insert(id.clone());
                }
            }
        }

        let to_remove: Vec<_> = self
            .entries
            .keys()
            .filter(|id| !solved.contains_key(*id))
            .cloned()
            .collect();
        for id in to_remove {
            if let Some(state) = self.entries.remove(&id) {
                self.vacated.push(state.layout.rect);
            }
            self.dirty.remove(&id);
        }
    }

    pub fn apply_content(&mut self, pane_id: &str, content: PaneContent) -> Result<()> {
        let entry = self
            .entries
            .get_mut(pane_id)
            .ok_or_else(|| DashboardError::PaneNotFound(pane_id.to_string()))?;
        entry.update_content(content);
        if entry.is_dirty {
            self.dirty.insert(pane_id.to_string());
        }
        Ok(())
    }

    /// Mark every pane dirty, e.g. after the screen was cleared.
    pub fn invalidate_all(&mut self) {
        for (id, state) in self.entries.iter_mut() {
            state.is_dirty = true;
            self.dirty.insert(id.clone());
        }
    }

    /// Dirty panes in id order, clearing their dirty flags.
    pub fn take_dirty(&mut self) -> Vec<(PaneId, PaneState)> {
        let ids = std::mem::take(&mut self.dirty);
        ids.into_iter()
            .filter_map(|id| {
                self.entries.get_mut(&id).map(|state| {
                    state.is_dirty = false;
                    (id.clone(), state.clone())
                })
            })
            .collect()
    }

    pub fn take_vacated(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.vacated)
    }

    pub fn layout_of(&self, pane_id: &str) -> Option<PaneLayout> {
        self.entries.get(pane_id).map(|state| state.layout)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty() || !self.vacated.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn solved(entries: &[(&str, Rect)]) -> HashMap<PaneId, PaneLayout> {
        entries
            .iter()
            .map(|(id, rect)| (id.to_string(), PaneLayout::framed(*rect)))
            .collect()
    }

    fn content(line: &str) -> PaneContent {
        PaneContent::new(Some(" t ".into()), vec![line.to_string()])
    }

    #[test]
    fn sync_layout_flags_new_panes_as_dirty() {
        let mut registry = PaneRegistry::new();
        registry.sync_layout(&solved(&[("focus", Rect::new(0, 0, 10, 5))]));
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, "focus");
        assert!(!registry.has_dirty());
    }

    #[test]
    fn apply_content_detects_changes() {
        let mut registry = PaneRegistry::new();
        registry.sync_layout(&solved(&[("focus", Rect::new(0, 0, 10, 5))]));
        registry.take_dirty();

        registry.apply_content("focus", content("hello")).unwrap();
        assert_eq!(registry.take_dirty().len(), 1);

        registry.apply_content("focus", content("hello")).unwrap();
        assert!(registry.take_dirty().is_empty());
    }

    #[test]
    fn title_changes_count_as_content_changes() {
        let mut registry = PaneRegistry::new();
        registry.sync_layout(&solved(&[("focus", Rect::new(0, 0, 10, 5))]));
        registry.apply_content("focus", content("x")).unwrap();
        registry.take_dirty();

        let retitled = PaneContent::new(Some(" other ".into()), vec!["x".into()]);
        registry.apply_content("focus", retitled).unwrap();
        assert_eq!(registry.take_dirty().len(), 1);
    }

    #[test]
    fn moved_panes_redraw_and_removed_panes_vacate() {
        let mut registry = PaneRegistry::new();
        registry.sync_layout(&solved(&[
            ("focus", Rect::new(0, 0, 10, 5)),
            ("slot1", Rect::new(0, 5, 10, 5)),
        ]));
        registry.take_dirty();

        registry.sync_layout(&solved(&[("focus", Rect::new(0, 0, 10, 10))]));
        let dirty = registry.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].1.layout.rect.height, 10);
        assert_eq!(registry.take_vacated(), vec![Rect::new(0, 5, 10, 5)]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_pane_is_an_error() {
        let mut registry = PaneRegistry::new();
        let err = registry.apply_content("missing", content("x")).unwrap_err();
        assert!(matches!(err, DashboardError::PaneNotFound(id) if id == "missing"));
    }

    #[test]
    fn dirty_panes_come_out_in_id_order() {
        let mut registry = PaneRegistry::new();
        registry.sync_layout(&solved(&[
            ("slot2", Rect::new(0, 0, 1, 1)),
            ("focus", Rect::new(1, 0, 1, 1)),
            ("slot1", Rect::new(2, 0, 1, 1)),
        ]));
        let ids: Vec<_> = registry.take_dirty().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["focus", "slot1", "slot2"]);
    }
}

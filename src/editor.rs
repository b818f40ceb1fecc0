//! # Report Editor
//!
//! One editing session: the block store, the selection and the page
//! geometry, owned together so that every mutation keeps them consistent.
//! Deleting a block drops it from the selection in the same call, and batch
//! operations act on whatever is currently selected.
//!
//! Pages are recomputed on request and borrow the store, so a page view can
//! never outlive the edit that invalidates it. [`ReportEditor::revision`]
//! changes on every layout-affecting edit for callers that memoize.

use crate::error::Result;
use crate::layout::{page_of, LayoutInfo, Page, Paginator};
use crate::model::{Block, BlockId, BlockKind, ContentPatch, PageConfig, Report};
use crate::selection::Selection;
use crate::store::{BlockStore, Direction};
use crate::style::{BlockStyle, StylePatch};

#[derive(Debug, Clone, Default)]
pub struct ReportEditor {
    title: Option<String>,
    store: BlockStore,
    selection: Selection,
    paginator: Paginator,
    revision: u64,
}

impl ReportEditor {
    pub fn new(config: PageConfig) -> Self {
        Self {
            paginator: Paginator::new(config),
            ..Default::default()
        }
    }

    /// Open an existing report for editing.
    pub fn from_report(report: Report) -> Result<Self> {
        Ok(Self {
            title: report.title,
            store: BlockStore::from_blocks(report.blocks)?,
            selection: Selection::new(),
            paginator: Paginator::new(report.config),
            revision: 0,
        })
    }

    /// Snapshot the session back into a report document.
    pub fn to_report(&self) -> Report {
        Report {
            title: self.title.clone(),
            config: self.paginator.config,
            blocks: self.store.blocks().to_vec(),
        }
    }

    // ── Views ──────────────────────────────────────────────────

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn blocks(&self) -> &[Block] {
        self.store.blocks()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &PageConfig {
        &self.paginator.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn resolved_style(&self, id: &BlockId) -> Result<BlockStyle> {
        self.store.resolved_style(id)
    }

    /// Lay out the current blocks.
    pub fn pages(&self) -> Vec<Page<'_>> {
        self.paginator.paginate(self.store.blocks())
    }

    pub fn layout_info(&self) -> LayoutInfo {
        LayoutInfo::from_pages(&self.pages(), &self.paginator.config)
    }

    /// The page a block currently lands on.
    pub fn page_of(&self, id: &BlockId) -> Option<usize> {
        page_of(&self.pages(), id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // ── Block edits ────────────────────────────────────────────

    pub fn set_config(&mut self, config: PageConfig) {
        self.paginator.config = config;
        self.touch();
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Add a block and select it for immediate editing.
    pub fn add_block(&mut self, kind: BlockKind, after: Option<&BlockId>) -> BlockId {
        let id = self.store.add_block(kind, after);
        self.selection.select(id.clone(), false);
        self.touch();
        id
    }

    pub fn duplicate_block(&mut self, id: &BlockId) -> Result<BlockId> {
        let new_id = self.store.duplicate_block(id)?;
        self.touch();
        Ok(new_id)
    }

    /// Delete a block and evict it from the selection.
    pub fn delete_block(&mut self, id: &BlockId) -> Option<Block> {
        let removed = self.store.delete_block(id)?;
        self.selection.remove(id);
        self.touch();
        Some(removed)
    }

    pub fn update_block_content(&mut self, id: &BlockId, patch: ContentPatch) -> Result<()> {
        self.store.update_block_content(id, patch)?;
        self.touch();
        Ok(())
    }

    pub fn update_block_style(&mut self, id: &BlockId, patch: &StylePatch) -> Result<BlockStyle> {
        let style = self.store.update_block_style(id, patch)?;
        self.touch();
        Ok(style)
    }

    pub fn update_styles_for_ids(&mut self, ids: &[BlockId], patch: &StylePatch) -> usize {
        let updated = self.store.update_styles_for_ids(ids, patch);
        if updated > 0 {
            self.touch();
        }
        updated
    }

    pub fn reset_block_style(&mut self, id: &BlockId) -> Result<()> {
        self.store.reset_block_style(id)?;
        self.touch();
        Ok(())
    }

    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> bool {
        let moved = self.store.move_block(id, direction);
        if moved {
            self.touch();
        }
        moved
    }

    pub fn reorder_by_drag(&mut self, from: usize, to: usize) -> bool {
        let moved = self.store.reorder_by_drag(from, to);
        if moved {
            self.touch();
        }
        moved
    }

    // ── Selection ──────────────────────────────────────────────

    /// Select a block. Unknown ids are ignored so the selection never
    /// references a block that does not exist.
    pub fn select(&mut self, id: &BlockId, extend: bool) {
        if self.store.get(id).is_some() {
            self.selection.select(id.clone(), extend);
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.store.ids());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Batch operations ───────────────────────────────────────

    /// Apply one style change to every selected block.
    pub fn restyle_selected(&mut self, patch: &StylePatch) -> usize {
        let ids = self.selection.to_vec();
        self.update_styles_for_ids(&ids, patch)
    }

    /// Delete every selected block. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.store.len();
        for id in self.selection.to_vec() {
            self.store.delete_block(&id);
        }
        self.selection.clear();
        let removed = before - self.store.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(n: usize) -> ReportEditor {
        let mut editor = ReportEditor::new(PageConfig::default());
        for _ in 0..n {
            editor.add_block(BlockKind::Text, None);
        }
        editor.clear_selection();
        editor
    }

    fn id(s: &str) -> BlockId {
        BlockId::new(s)
    }

    #[test]
    fn new_block_is_selected() {
        let mut editor = editor_with(2);
        let new = editor.add_block(BlockKind::Stat, Some(&id("b1")));
        assert_eq!(editor.selection().to_vec(), vec![new]);
    }

    #[test]
    fn delete_evicts_from_selection() {
        let mut editor = editor_with(4);
        editor.select_all();
        assert_eq!(editor.selection().len(), 4);
        editor.delete_block(&id("b2"));
        assert_eq!(editor.selection().len(), 3);
        assert!(!editor.selection().contains(&id("b2")));
    }

    #[test]
    fn selecting_unknown_id_is_ignored() {
        let mut editor = editor_with(1);
        editor.select(&id("b9"), false);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn restyle_selected_targets_only_selection() {
        let mut editor = editor_with(3);
        editor.select(&id("b1"), true);
        editor.select(&id("b3"), true);
        assert_eq!(editor.restyle_selected(&StylePatch::font_size(20.0)), 2);
        assert_eq!(editor.resolved_style(&id("b1")).unwrap().font_size, 20.0);
        assert_eq!(editor.resolved_style(&id("b2")).unwrap().font_size, 14.0);
        assert_eq!(editor.resolved_style(&id("b3")).unwrap().font_size, 20.0);
    }

    #[test]
    fn delete_selected_clears_selection() {
        let mut editor = editor_with(4);
        editor.select(&id("b2"), true);
        editor.select(&id("b4"), true);
        assert_eq!(editor.delete_selected(), 2);
        assert!(editor.selection().is_empty());
        assert_eq!(editor.store().ids(), vec![id("b1"), id("b3")]);
    }

    #[test]
    fn revision_tracks_layout_edits_only() {
        let mut editor = editor_with(2);
        let r0 = editor.revision();
        editor.select(&id("b1"), false);
        assert_eq!(editor.revision(), r0);
        assert!(!editor.move_block(&id("b1"), Direction::Up));
        assert_eq!(editor.revision(), r0);
        assert!(editor.move_block(&id("b1"), Direction::Down));
        assert_eq!(editor.revision(), r0 + 1);
    }

    #[test]
    fn report_round_trip() {
        let mut editor = editor_with(2);
        editor.set_title(Some("Q3 Brand Visibility".to_string()));
        editor
            .update_block_style(&id("b2"), &StylePatch::line_height(2.0))
            .unwrap();
        let report = editor.to_report();
        let reopened = ReportEditor::from_report(report).unwrap();
        assert_eq!(reopened.blocks(), editor.blocks());
        assert_eq!(reopened.to_report().title.as_deref(), Some("Q3 Brand Visibility"));
    }

    #[test]
    fn empty_editor_has_one_page() {
        let editor = ReportEditor::new(PageConfig::default());
        let pages = editor.pages();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }
}

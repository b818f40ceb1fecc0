//! # Block Store
//!
//! The ordered list of blocks that makes up a report. The store owns block
//! lifecycle: it mints ids, fills in default content, and is the only place
//! blocks are inserted, removed or reordered.
//!
//! Single-target edits on a missing id return [`FolioError::NotFound`].
//! Everything else treats a missing id as a no-op: a batch restyle may
//! reference blocks that were deleted a moment earlier, and moving the first
//! block up simply does nothing.

use std::collections::HashSet;

use crate::error::{FolioError, Result};
use crate::model::{Block, BlockId, BlockKind, ContentPatch};
use crate::style::{BlockStyle, StyleOverride, StylePatch};

/// Direction for [`BlockStore::move_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Ordered, uniquely-identified list of blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
    next_seq: u64,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing block list. Ids must be unique; style overrides are
    /// clamped into their domains.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(blocks.len());
        let mut next_seq = 0;
        for block in &mut blocks {
            if !seen.insert(block.id.clone()) {
                return Err(FolioError::DuplicateId(block.id.clone()));
            }
            if let Some(seq) = block.id.sequence() {
                next_seq = next_seq.max(seq);
            }
            block.style = block.style.map(|s| s.clamped());
        }
        Ok(Self { blocks, next_seq })
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Block ids in document order.
    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    /// The effective style of a block: its override over the kind default.
    pub fn resolved_style(&self, id: &BlockId) -> Result<BlockStyle> {
        self.get(id)
            .map(BlockStyle::resolve)
            .ok_or_else(|| FolioError::NotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &BlockId) -> Result<&mut Block> {
        self.blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| FolioError::NotFound(id.clone()))
    }

    /// Next unused `b<N>`. When the counter is exhausted it restarts at 1
    /// and keeps skipping ids in use.
    fn fresh_id(&mut self) -> BlockId {
        loop {
            self.next_seq = self.next_seq.checked_add(1).unwrap_or_else(|| {
                log::debug!("block id sequence exhausted, searching from b1");
                1
            });
            let id = BlockId::generated(self.next_seq);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Insert directly after `after`, or at the end when `after` is `None`
    /// or not in the store.
    fn insert_after(&mut self, after: Option<&BlockId>, block: Block) {
        let at = match after.map(|id| (id, self.index_of(id))) {
            Some((_, Some(i))) => i + 1,
            Some((id, None)) => {
                log::debug!("insert anchor {id} not found, appending");
                self.blocks.len()
            }
            None => self.blocks.len(),
        };
        self.blocks.insert(at, block);
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Create a block of `kind` with default content and style, placed after
    /// `after` (or at the end). Returns the new id.
    pub fn add_block(&mut self, kind: BlockKind, after: Option<&BlockId>) -> BlockId {
        let id = self.fresh_id();
        self.insert_after(after, Block::new(id.clone(), kind));
        log::debug!("added {} block {id}", kind.name());
        id
    }

    /// Copy a block's content and style under a fresh id, directly after it.
    pub fn duplicate_block(&mut self, id: &BlockId) -> Result<BlockId> {
        let source = self
            .get(id)
            .cloned()
            .ok_or_else(|| FolioError::NotFound(id.clone()))?;
        let new_id = self.fresh_id();
        let copy = Block {
            id: new_id.clone(),
            ..source
        };
        self.insert_after(Some(id), copy);
        Ok(new_id)
    }

    /// Remove a block permanently. Returns it, or `None` if it was absent.
    pub fn delete_block(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.index_of(id)?;
        Some(self.blocks.remove(index))
    }

    /// Shallow-merge `patch` into a block's content.
    pub fn update_block_content(&mut self, id: &BlockId, patch: ContentPatch) -> Result<()> {
        self.get_mut(id)?.content.merge(patch);
        Ok(())
    }

    /// Shallow-merge `patch` into a block's style override, creating the
    /// override if needed. Returns the new resolved style.
    pub fn update_block_style(&mut self, id: &BlockId, patch: &StylePatch) -> Result<BlockStyle> {
        let block = self.get_mut(id)?;
        block
            .style
            .get_or_insert_with(StyleOverride::default)
            .merge(patch);
        Ok(BlockStyle::resolve(block))
    }

    /// Apply the same style merge to every listed block. Ids not in the
    /// store are skipped. Returns how many blocks were updated.
    pub fn update_styles_for_ids(&mut self, ids: &[BlockId], patch: &StylePatch) -> usize {
        let targets: HashSet<&BlockId> = ids.iter().collect();
        let mut updated = 0;
        for block in self.blocks.iter_mut().filter(|b| targets.contains(&b.id)) {
            block
                .style
                .get_or_insert_with(StyleOverride::default)
                .merge(patch);
            updated += 1;
        }
        if updated < targets.len() {
            log::debug!(
                "batch restyle skipped {} stale ids",
                targets.len() - updated
            );
        }
        updated
    }

    /// Drop a block's style override so the kind default applies again.
    pub fn reset_block_style(&mut self, id: &BlockId) -> Result<()> {
        self.get_mut(id)?.style = None;
        Ok(())
    }

    /// Swap a block with its neighbour. Returns false (and does nothing) at
    /// either end of the list or for an unknown id.
    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let j = match direction {
            Direction::Up if i > 0 => i - 1,
            Direction::Down if i + 1 < self.blocks.len() => i + 1,
            _ => return false,
        };
        self.blocks.swap(i, j);
        true
    }

    /// Move the block at `from` so it ends up at index `to`, shifting the
    /// blocks in between. Out-of-range indices are a no-op.
    pub fn reorder_by_drag(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }
}

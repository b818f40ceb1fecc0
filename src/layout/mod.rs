//! # Page Flow Engine
//!
//! Blocks flow INTO pages. There is no infinite canvas that gets sliced
//! afterwards: the engine keeps exactly one page open, and before placing a
//! block it asks whether the block still fits under the page's content
//! budget.
//!
//! 1. Open page 1. The report title region is already "used" on it.
//! 2. Estimate the next block's height from its content and resolved style.
//! 3. If it fits, place it and reduce the remaining space.
//! 4. If it doesn't fit and the page already holds blocks, close the page
//!    and open a new one starting with this block.
//! 5. If it doesn't fit on an empty page, place it anyway. Blocks are never
//!    split, so an oversized block sits alone on its page and overflows.
//!
//! Layout is a pure function of the block list. Nothing is cached between
//! calls, so running it after every edit always yields the same pages for
//! the same input.

pub mod estimate;
pub mod page_break;

use std::ops::Range;

use serde::Serialize;

use crate::model::{Block, BlockId, BlockKind, PageConfig};
use crate::style::BlockStyle;

use estimate::HeightModel;
use page_break::{decide_break, BreakDecision};

/// A laid-out page: a contiguous run of the document's blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// 1-based page number.
    pub page_number: usize,
    /// The blocks on this page, in document order.
    pub blocks: &'a [Block],
    /// Estimated height of each block, parallel to `blocks`.
    pub heights: Vec<f64>,
    /// Height used on the page, including any reserved title region.
    pub used_height: f64,
    /// Position of this page's blocks in the full block list.
    pub range: Range<usize>,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the page holds more than the budget allows. Only a lone
    /// oversized block can cause this.
    pub fn overflows(&self, budget: f64) -> bool {
        self.used_height > budget
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.iter().any(|b| &b.id == id)
    }
}

/// Tracks the single open page while blocks are placed.
struct PageCursor {
    page_number: usize,
    start: usize,
    heights: Vec<f64>,
    used: f64,
}

impl PageCursor {
    fn new(page_number: usize, start: usize, reserved: f64) -> Self {
        Self {
            page_number,
            start,
            heights: Vec::new(),
            used: reserved,
        }
    }

    fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    fn place(&mut self, height: f64) {
        self.heights.push(height);
        self.used += height;
    }

    fn finalize<'a>(&mut self, blocks: &'a [Block]) -> Page<'a> {
        let range = self.start..self.start + self.heights.len();
        Page {
            page_number: self.page_number,
            blocks: &blocks[range.clone()],
            heights: std::mem::take(&mut self.heights),
            used_height: self.used,
            range,
        }
    }

    fn new_page(&self) -> Self {
        PageCursor::new(self.page_number + 1, self.start + self.heights.len(), 0.0)
    }
}

/// Lays out block lists with a fixed height model and page geometry.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    pub model: HeightModel,
    pub config: PageConfig,
}

impl Paginator {
    pub fn new(config: PageConfig) -> Self {
        Self {
            model: HeightModel::default(),
            config,
        }
    }

    /// Lay out `blocks` under this paginator's page configuration.
    pub fn paginate<'a>(&self, blocks: &'a [Block]) -> Vec<Page<'a>> {
        paginate_with(
            &self.model,
            blocks,
            self.config.content_budget(),
            self.config.first_page_reserved(),
        )
    }
}

/// Partition `blocks` into pages using the default height model.
///
/// Greedy first-fit: a page takes blocks in order until the next one would
/// push it past `page_content_budget`. The first page starts with
/// `first_page_reserved_height` already used. An empty list yields exactly
/// one empty page.
pub fn paginate(
    blocks: &[Block],
    page_content_budget: f64,
    first_page_reserved_height: f64,
) -> Vec<Page<'_>> {
    paginate_with(
        &HeightModel::default(),
        blocks,
        page_content_budget,
        first_page_reserved_height,
    )
}

/// [`paginate`] with an explicit height model.
pub fn paginate_with<'a>(
    model: &HeightModel,
    blocks: &'a [Block],
    page_content_budget: f64,
    first_page_reserved_height: f64,
) -> Vec<Page<'a>> {
    let mut pages: Vec<Page<'a>> = Vec::new();
    let mut cursor = PageCursor::new(1, 0, first_page_reserved_height);

    for block in blocks {
        let height = model.estimate(block, &BlockStyle::resolve(block));

        match decide_break(cursor.used, height, page_content_budget, cursor.is_empty()) {
            BreakDecision::Place => {}
            BreakDecision::NewPage => {
                let next = cursor.new_page();
                pages.push(cursor.finalize(blocks));
                cursor = next;
                log::debug!("page break before block {} (page {})", block.id, cursor.page_number);
            }
            BreakDecision::Overflow => {
                log::debug!(
                    "block {} ({height:.1}) exceeds page budget {page_content_budget:.1}, \
                     placing alone on page {}",
                    block.id,
                    cursor.page_number
                );
            }
        }
        cursor.place(height);
    }

    if !cursor.is_empty() || pages.is_empty() {
        pages.push(cursor.finalize(blocks));
    }

    log::trace!("laid out {} blocks into {} pages", blocks.len(), pages.len());
    pages
}

/// The page number holding block `id`, if it is laid out at all.
pub fn page_of(pages: &[Page<'_>], id: &BlockId) -> Option<usize> {
    pages.iter().find(|p| p.contains(id)).map(|p| p.page_number)
}

// ── Serializable layout metadata (for renderers and dev tools) ───

/// Complete layout metadata for all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub content_budget: f64,
    pub first_page_reserved: f64,
    pub pages: Vec<PageInfo>,
}

/// Layout metadata for a single page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_number: usize,
    pub used_height: f64,
    pub overflow: bool,
    pub blocks: Vec<BlockInfo>,
}

/// Per-block placement: what a renderer needs to draw the block without
/// recomputing defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub height: f64,
    pub style: BlockStyle,
}

impl LayoutInfo {
    pub fn from_pages(pages: &[Page<'_>], config: &PageConfig) -> Self {
        let budget = config.content_budget();
        LayoutInfo {
            content_budget: budget,
            first_page_reserved: config.first_page_reserved(),
            pages: pages
                .iter()
                .map(|page| PageInfo {
                    page_number: page.page_number,
                    used_height: page.used_height,
                    overflow: page.overflows(budget),
                    blocks: page
                        .blocks
                        .iter()
                        .zip(&page.heights)
                        .map(|(block, &height)| BlockInfo {
                            id: block.id.clone(),
                            kind: block.kind,
                            height,
                            style: BlockStyle::resolve(block),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockContent, Edges, PageSize};
    use crate::style::StyleOverride;

    /// A text block estimated at exactly `20 + margin` units.
    fn sized(id: &str, margin: f64) -> Block {
        Block::new(BlockId::new(id), BlockKind::Text)
            .with_content(BlockContent {
                body: Some("x".repeat(10)),
                ..Default::default()
            })
            .with_style(StyleOverride {
                font_size: Some(20.0),
                line_height: Some(1.0),
                margin_bottom: Some(margin),
            })
    }

    fn ids<'a>(page: &Page<'a>) -> Vec<&'a str> {
        page.blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn empty_document_yields_one_empty_page() {
        let pages = paginate(&[], 250.0, 50.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].used_height, 50.0);
    }

    #[test]
    fn everything_fits_on_one_page() {
        let blocks = vec![sized("a", 30.0), sized("b", 30.0)];
        let pages = paginate(&blocks, 200.0, 0.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(ids(&pages[0]), vec!["a", "b"]);
        assert_eq!(pages[0].heights, vec![50.0, 50.0]);
        assert_eq!(pages[0].used_height, 100.0);
    }

    #[test]
    fn reserved_height_only_applies_to_first_page() {
        // 100-unit blocks, budget 250: page 1 has 60 reserved -> 1 block,
        // later pages take 2.
        let blocks: Vec<Block> = (1..=5).map(|i| sized(&format!("b{i}"), 80.0)).collect();
        let pages = paginate(&blocks, 250.0, 60.0);
        let layout: Vec<Vec<&str>> = pages.iter().map(ids).collect();
        assert_eq!(layout, vec![vec!["b1"], vec!["b2", "b3"], vec!["b4", "b5"]]);
        assert_eq!(pages[1].used_height, 200.0);
    }

    #[test]
    fn oversized_block_sits_alone() {
        let blocks = vec![sized("a", 30.0), sized("huge", 480.0), sized("c", 30.0)];
        let pages = paginate(&blocks, 200.0, 0.0);
        let layout: Vec<Vec<&str>> = pages.iter().map(ids).collect();
        assert_eq!(layout, vec![vec!["a"], vec!["huge"], vec!["c"]]);
        assert!(pages[1].overflows(200.0));
        assert!(!pages[2].overflows(200.0));
    }

    #[test]
    fn oversized_first_block_stays_on_page_one() {
        let blocks = vec![sized("huge", 480.0), sized("b", 30.0)];
        let pages = paginate(&blocks, 200.0, 50.0);
        assert_eq!(pages.len(), 2);
        assert_eq!(ids(&pages[0]), vec!["huge"]);
        assert_eq!(ids(&pages[1]), vec!["b"]);
    }

    #[test]
    fn ranges_tile_the_block_list() {
        let blocks: Vec<Block> = (0..9).map(|i| sized(&format!("b{i}"), 40.0)).collect();
        let pages = paginate(&blocks, 130.0, 0.0);
        let mut next = 0;
        for page in &pages {
            assert_eq!(page.range.start, next);
            next = page.range.end;
        }
        assert_eq!(next, blocks.len());
    }

    #[test]
    fn page_of_finds_block() {
        let blocks = vec![sized("a", 80.0), sized("b", 80.0)];
        let pages = paginate(&blocks, 150.0, 0.0);
        assert_eq!(page_of(&pages, &BlockId::new("b")), Some(2));
        assert_eq!(page_of(&pages, &BlockId::new("zz")), None);
    }

    #[test]
    fn paginator_uses_page_config() {
        let config = PageConfig {
            size: PageSize::Custom {
                width: 300.0,
                height: 300.0,
            },
            margin: Edges::uniform(25.0),
            title_height: 50.0,
        };
        let blocks: Vec<Block> = (1..=5).map(|i| sized(&format!("b{i}"), 60.0)).collect();
        let pages = Paginator::new(config).paginate(&blocks);
        // budget 250, 80-unit blocks, 50 reserved on page 1
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 2);
        assert_eq!(pages[1].len(), 3);
    }

    #[test]
    fn layout_info_reports_overflow_and_styles() {
        let blocks = vec![sized("a", 30.0), sized("huge", 480.0)];
        let config = PageConfig {
            size: PageSize::Custom {
                width: 300.0,
                height: 300.0,
            },
            margin: Edges::uniform(50.0),
            title_height: 0.0,
        };
        let pages = Paginator::new(config).paginate(&blocks);
        let info = LayoutInfo::from_pages(&pages, &config);
        assert_eq!(info.content_budget, 200.0);
        assert_eq!(info.pages.len(), 2);
        assert!(!info.pages[0].overflow);
        assert!(info.pages[1].overflow);
        assert_eq!(info.pages[1].blocks[0].height, 500.0);
        assert_eq!(info.pages[0].blocks[0].style.font_size, 20.0);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["pages"][1]["blocks"][0]["type"], "text");
        assert_eq!(json["pages"][0]["pageNumber"], 1);
    }
}

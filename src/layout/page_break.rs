//! # Page Break Decisions
//!
//! Logic for deciding, one block at a time, whether the open page can take
//! the next block. Blocks are atomic: they are never split, so the only
//! choices are to place the block here, start a new page with it, or, when
//! the page is still empty, place it even though it does not fit.

/// What to do with the next block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Place the block on the current page (it fits).
    Place,
    /// Close the current page and open a new one with this block.
    NewPage,
    /// The page is empty and the block is taller than the remaining budget.
    /// Place it anyway; it overflows the page rather than being split.
    Overflow,
}

/// Given the height already used on the open page, decide where a block of
/// `block_height` goes.
pub fn decide_break(
    used_height: f64,
    block_height: f64,
    budget: f64,
    page_is_empty: bool,
) -> BreakDecision {
    if used_height + block_height <= budget {
        return BreakDecision::Place;
    }

    if page_is_empty {
        return BreakDecision::Overflow;
    }

    BreakDecision::NewPage
}

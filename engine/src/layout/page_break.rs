//! # Page Break Decisions
//!
//! Pure functions deciding whether a block fits where the cursor is, and
//! what the cursor looks like afterwards. Nothing here draws; the composer
//! applies the decisions.
//!
//! The rule is check-then-draw: before drawing a block of known height, if
//! `cursor.y + height > page_height - bottom_margin`, advance to a new page
//! and reset `y` to the top margin. The height always comes from measuring,
//! never from drawing past the edge.

use crate::model::PageConfig;

/// Where the next block will be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// 1-based physical page number.
    pub page: usize,
    /// Absolute distance from the top edge of the page (mm).
    pub y: f64,
}

impl Cursor {
    /// The top-left of page 1's content area.
    pub fn start(page: &PageConfig) -> Self {
        Self {
            page: 1,
            y: page.margin.top,
        }
    }

    /// The same cursor moved to the top of the following page.
    pub fn next_page(&self, page: &PageConfig) -> Self {
        Self {
            page: self.page + 1,
            y: page.margin.top,
        }
    }

    /// Whether nothing has been placed below the top margin yet.
    pub fn at_page_top(&self, page: &PageConfig) -> bool {
        self.y <= page.margin.top + 1e-9
    }

    /// Space left before the bottom margin.
    pub fn remaining(&self, page: &PageConfig) -> f64 {
        (page.bottom_limit() - self.y).max(0.0)
    }
}

/// Decide what to do when a block doesn't fit on the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakDecision {
    /// Place the entire block on the current page (it fits).
    Place,
    /// Move the entire block to the next page.
    MoveToNextPage,
    /// Split the block between lines: some here, the rest on the next page.
    Split {
        /// How many lines fit on the current page.
        items_on_current_page: usize,
    },
}

/// Whether a block of `height` fits below the cursor.
pub fn fits(cursor: Cursor, height: f64, page: &PageConfig) -> bool {
    cursor.y + height <= page.bottom_limit()
}

/// The `(cursor, block) -> cursor` step for an unsplittable block.
///
/// Returns the cursor the block should be drawn at, and whether getting
/// there needed a new page. A block taller than a whole page is drawn at the
/// top of a fresh page rather than chasing another empty one.
pub fn advance(cursor: Cursor, height: f64, page: &PageConfig) -> (Cursor, BreakDecision) {
    if fits(cursor, height, page) || cursor.at_page_top(page) {
        (cursor, BreakDecision::Place)
    } else {
        (cursor.next_page(page), BreakDecision::MoveToNextPage)
    }
}

/// Given the remaining space on a page and a list of line heights,
/// decide how to break a multi-line block.
pub fn decide_break(
    remaining_height: f64,
    line_heights: &[f64],
    is_breakable: bool,
    min_orphan_lines: usize,
    min_widow_lines: usize,
) -> BreakDecision {
    let total: f64 = line_heights.iter().sum();

    if total <= remaining_height + 1e-9 {
        return BreakDecision::Place;
    }

    if !is_breakable {
        return BreakDecision::MoveToNextPage;
    }

    let mut running = 0.0;
    let mut fit_count = 0;
    for &h in line_heights {
        if running + h > remaining_height + 1e-9 {
            break;
        }
        running += h;
        fit_count += 1;
    }

    let total_lines = line_heights.len();

    // Too few lines would be left stranded at the bottom of this page.
    if fit_count < min_orphan_lines && fit_count < total_lines {
        return BreakDecision::MoveToNextPage;
    }

    // Too few lines would start the next page.
    let carried = total_lines - fit_count;
    if carried < min_widow_lines && carried > 0 {
        let adjusted = fit_count.saturating_sub(min_widow_lines - carried);
        if adjusted == 0 {
            return BreakDecision::MoveToNextPage;
        }
        return BreakDecision::Split {
            items_on_current_page: adjusted,
        };
    }

    if fit_count == 0 {
        return BreakDecision::MoveToNextPage;
    }

    BreakDecision::Split {
        items_on_current_page: fit_count,
    }
}

//! Which selections apply to which pages.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Policy deciding the pages a selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Every selection applies to every page.
    #[default]
    All,
    /// A selection applies to every second page, starting from its own.
    EvenOdd,
    /// A selection applies only to the page it was drawn on.
    Individual,
}

/// Decide whether a selection created on `creation_page` applies to `page_index`.
///
/// Pages listed in `exceptions` behave as if the mode were
/// [`SelectionMode::Individual`], both for the page being shown and for the
/// page a selection was created on.
pub fn is_visible(
    creation_page: usize,
    page_index: usize,
    mode: SelectionMode,
    exceptions: &BTreeSet<usize>,
) -> bool {
    if exceptions.contains(&page_index) || exceptions.contains(&creation_page) {
        return page_index == creation_page;
    }

    match mode {
        SelectionMode::All => true,
        SelectionMode::EvenOdd => page_index.abs_diff(creation_page) % 2 == 0,
        SelectionMode::Individual => page_index == creation_page,
    }
}

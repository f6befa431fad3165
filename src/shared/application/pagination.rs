/// Pagination support for upstream listings
///
/// Both providers page their listings; these types normalize the two styles
/// (TMDB `page/total_pages`, AniList `currentPage/lastPage`).
use serde::{Deserialize, Serialize};

pub const FIRST_PAGE: u32 = 1;

/// Requested page, clamped to the first page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: FIRST_PAGE }
    }
}

impl PageRequest {
    pub fn new(page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(FIRST_PAGE).max(FIRST_PAGE),
        }
    }

    pub fn is_first(&self) -> bool {
        self.page == FIRST_PAGE
    }
}

/// Upstream paging position after a fetch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

impl PageInfo {
    pub fn new(page: u32, total_pages: u32, total_results: u32) -> Self {
        Self {
            page,
            total_pages,
            total_results,
        }
    }

    /// Empty listing at the given page
    pub fn empty(page: u32) -> Self {
        Self::new(page, 0, 0)
    }

    /// Whether the upstream has pages beyond this one
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

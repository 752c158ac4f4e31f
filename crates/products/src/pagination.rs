//! Page requests and page formatting.
//!
//! `PageFormatter` is the pure half of listing: given the rows a repository
//! returned, the total number of matches and the page the caller asked for, it
//! produces the transport shape (`PageResult`) including a short navigation
//! descriptor for the rendering layer.

use serde::{Deserialize, Serialize};

use shopadmin_core::{DomainError, DomainResult};

/// A validated page request (1-based page number, positive page size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page_number: u64,
    page_size: u64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> DomainResult<Self> {
        if page_number < 1 {
            return Err(DomainError::validation(format!(
                "pageNumber must be >= 1, got {page_number}"
            )));
        }
        if page_size < 1 {
            return Err(DomainError::validation(format!(
                "pageSize must be >= 1, got {page_size}"
            )));
        }
        Ok(Self {
            page_number: page_number as u64,
            page_size: page_size as u64,
        })
    }

    /// Build a request from optional parts.
    ///
    /// Pagination needs both parts: if either is missing the listing is
    /// unpaginated (`Ok(None)`) and the other part is ignored.
    pub fn from_parts(page_number: Option<i64>, page_size: Option<i64>) -> DomainResult<Option<Self>> {
        match (page_number, page_size) {
            (Some(number), Some(size)) => Self::new(number, size).map(Some),
            _ => Ok(None),
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }
}

/// Structured navigation state for a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNavigation {
    /// Requested page clamped into `[1, total_pages]` (1 when there are no pages).
    pub current_page: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// One page of listing results, ready for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    /// Empty when the listing is unpaginated.
    pub page_descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<PageNavigation>,
}

/// Pure page formatting.
pub struct PageFormatter;

impl PageFormatter {
    pub fn format<T>(mut items: Vec<T>, total_count: u64, page: Option<PageRequest>) -> PageResult<T> {
        let Some(page) = page else {
            let total_count = total_count.max(items.len() as u64);
            return PageResult {
                items,
                total_count,
                page_descriptor: String::new(),
                navigation: None,
            };
        };

        // A repository must never hand back more than a page; clip if it does.
        let limit = usize::try_from(page.page_size()).unwrap_or(usize::MAX);
        items.truncate(limit);
        let total_count = total_count.max(items.len() as u64);

        let navigation = Self::navigation(page, total_count);
        PageResult {
            items,
            total_count,
            page_descriptor: Self::describe(&navigation),
            navigation: Some(navigation),
        }
    }

    pub fn navigation(page: PageRequest, total_count: u64) -> PageNavigation {
        let total_pages = total_count.div_ceil(page.page_size());
        let current_page = page.page_number().clamp(1, total_pages.max(1));
        PageNavigation {
            current_page,
            total_pages,
            page_size: page.page_size(),
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    pub fn describe(navigation: &PageNavigation) -> String {
        format!("page {} of {}", navigation.current_page, navigation.total_pages)
    }
}

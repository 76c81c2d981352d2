//! Request and response data transfer objects

pub mod item;
pub mod member;
pub mod team;

use directory_core::Page;
use serde::Serialize;

/// One page of response items plus navigation totals
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T: Serialize> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            page: page.number(),
            size: page.size(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            first: page.is_first(),
            last: page.is_last(),
            content: page.into_content(),
        }
    }
}

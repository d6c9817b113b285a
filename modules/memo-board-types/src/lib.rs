//! Shared types for the memo board service and its HTTP clients.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Page size used when the request does not carry a usable `size`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound on `size`; larger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 2000;

// =====================================================
// Domain Types
// =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A memo with its category resolved eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: i64,
    pub category: Option<Category>,
    pub name: String,
    pub content: Option<String>,
}

// =====================================================
// Request Types
// =====================================================

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Body of `POST /memos`. The category is referenced by id here but
/// embedded as a full object in the response.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateMemoRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i64>,
}

/// Body of `PUT /memos`. There is no way to move a memo to another category.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateMemoRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub content: Option<String>,
}

/// Query string accepted by the list endpoints.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

// =====================================================
// Pagination
// =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("Invalid sort direction '{}'", other)),
        }
    }
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

/// Zero-based page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: None,
        }
    }

    pub fn sorted_by(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(Sort {
            property: property.into(),
            direction,
        });
        self
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInfo {
    pub empty: bool,
    pub sorted: bool,
    pub unsorted: bool,
}

impl SortInfo {
    pub fn of(sort: Option<&Sort>) -> Self {
        let sorted = sort.is_some();
        Self {
            empty: !sorted,
            sorted,
            unsorted: !sorted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub sort: SortInfo,
    pub offset: u64,
    pub page_size: u32,
    pub page_number: u32,
    pub paged: bool,
    pub unpaged: bool,
}

/// Pagination envelope. Field names match what existing clients of the
/// memo board already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub last: bool,
    pub total_elements: i64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub sort: SortInfo,
    pub first: bool,
    pub number_of_elements: usize,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let size = request.size.max(1);
        let total = total_elements.max(0) as u64;
        let total_pages = total.div_ceil(size as u64) as u32;
        let sort = SortInfo::of(request.sort.as_ref());
        let number_of_elements = content.len();

        Self {
            pageable: Pageable {
                sort: sort.clone(),
                offset: request.offset(),
                page_size: size,
                page_number: request.page,
                paged: true,
                unpaged: false,
            },
            last: request.page.saturating_add(1) >= total_pages,
            total_elements: total as i64,
            total_pages,
            size,
            number: request.page,
            sort,
            first: request.page == 0,
            number_of_elements,
            empty: number_of_elements == 0,
            content,
        }
    }
}

// =====================================================
// Service Status
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub total_categories: i64,
    pub total_memos: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_envelope_counts() {
        let req = PageRequest::new(1, 2);
        let page = Page::new(vec![3, 4], &req, 5);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.pageable.offset, 2);
        assert!(!page.first);
        assert!(!page.last);
        assert_eq!(page.number_of_elements, 2);
        assert!(!page.empty);
    }

    #[test]
    fn test_empty_page_is_first_and_last() {
        let page: Page<i64> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
        assert!(page.sort.unsorted);
    }

    #[test]
    fn test_envelope_uses_camel_case() {
        let req = PageRequest::new(0, 10).sorted_by("name", Direction::Asc);
        let page = Page::new(
            vec![Category {
                id: 1,
                name: "newCategory1".to_string(),
            }],
            &req,
            1,
        );
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["numberOfElements"], 1);
        assert_eq!(json["pageable"]["pageSize"], 10);
        assert_eq!(json["pageable"]["pageNumber"], 0);
        assert_eq!(json["sort"]["sorted"], true);
        assert_eq!(json["content"][0]["name"], "newCategory1");
    }

    #[test]
    fn test_direction_parses_case_insensitively() {
        assert_eq!(" DESC".parse::<Direction>(), Ok(Direction::Desc));
        assert_eq!("asc".parse::<Direction>(), Ok(Direction::Asc));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 50_000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_memo_without_category_serializes_null() {
        let memo = Memo {
            id: 2,
            category: None,
            name: "memo2".to_string(),
            content: Some("content2".to_string()),
        };
        let json = serde_json::to_value(&memo).unwrap();
        assert!(json["category"].is_null());
        assert_eq!(json["content"], "content2");
    }
}

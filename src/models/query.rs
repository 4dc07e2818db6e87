use serde::Deserialize;
use uuid::Uuid;

/// Page sizes the source app defaults to per feed shape. Callers may
/// override them through the `limit` query parameter.
pub const FEED_PAGE_SIZE: u32 = 4;
pub const SEARCH_PAGE_SIZE: u32 = 8;
pub const OWN_POSTS_PAGE_SIZE: u32 = 2;

/// Query-string parameters shared by every paginated page.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedScope {
    Global,
    Category(String),
    Author(Uuid),
}

/// Fields a free-text search matches against. Which of them apply depends
/// on the feed scope; the selection mirrors the original queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchField {
    Title,
    Content,
    AccountName,
    Category,
}

/// Filter + sort + pagination plan for one post listing. All feeds sort
/// newest-first; ties fall back to natural store order.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub scope: FeedScope,
    /// `Some("")` is a real search that matches everything; `None` means
    /// the route had no search box at all.
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl FeedQuery {
    pub fn feed(scope: FeedScope, params: &PageParams) -> Self {
        Self::build(scope, None, params, FEED_PAGE_SIZE)
    }

    pub fn search(scope: FeedScope, params: &PageParams) -> Self {
        let term = params.search_term.clone().unwrap_or_default();
        Self::build(scope, Some(term), params, SEARCH_PAGE_SIZE)
    }

    pub fn own(author: Uuid, params: &PageParams) -> Self {
        Self::build(FeedScope::Author(author), None, params, OWN_POSTS_PAGE_SIZE)
    }

    pub fn own_search(author: Uuid, params: &PageParams) -> Self {
        let term = params.search_term.clone().unwrap_or_default();
        Self::build(
            FeedScope::Author(author),
            Some(term),
            params,
            OWN_POSTS_PAGE_SIZE,
        )
    }

    fn build(
        scope: FeedScope,
        search: Option<String>,
        params: &PageParams,
        default_limit: u32,
    ) -> Self {
        Self {
            scope,
            search,
            page: params.page.unwrap_or(1).max(1),
            limit: params.limit.unwrap_or(default_limit).max(1),
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.limit
    }

    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.limit as u64)
    }

    pub fn search_fields(&self) -> &'static [SearchField] {
        match self.scope {
            FeedScope::Global => &[
                SearchField::Title,
                SearchField::Content,
                SearchField::AccountName,
                SearchField::Category,
            ],
            FeedScope::Author(_) => &[
                SearchField::Title,
                SearchField::Content,
                SearchField::Category,
            ],
            FeedScope::Category(_) => &[
                SearchField::Title,
                SearchField::Content,
                SearchField::AccountName,
            ],
        }
    }
}

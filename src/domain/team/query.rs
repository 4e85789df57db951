//! Query parameters for listing teams

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Columns a listing may be sorted by, resolved through [`resolve_sort_field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Listing order: an explicit column, or the id-descending fallback used
/// whenever the request names no recognized sort field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamOrder {
    #[default]
    IdDesc,
    Field(SortField, SortDir),
}

/// Maps a requested sort field through the fixed alias table.
///
/// Unrecognized values resolve to `None` and are ignored by callers.
pub fn resolve_sort_field(requested: &str) -> Option<SortField> {
    match requested {
        "name" | "nombre" => Some(SortField::Name),
        "city" | "ciudad" => Some(SortField::City),
        _ => None,
    }
}

/// Parses a sort direction, defaulting to ascending
pub fn resolve_sort_dir(requested: Option<&str>) -> SortDir {
    match requested.map(str::to_ascii_lowercase).as_deref() {
        Some("desc") => SortDir::Desc,
        _ => SortDir::Asc,
    }
}

/// Filter, order and pagination window for team listings
#[derive(Debug, Clone, Default)]
pub struct TeamQuery {
    /// Case-insensitive substring match against name OR city
    pub search: Option<String>,
    /// Case-insensitive substring match against city, combined with AND
    pub city: Option<String>,
    pub order: TeamOrder,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TeamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_order(mut self, order: TeamOrder) -> Self {
        self.order = order;
        self
    }

    /// Constrains the query to one page; `page` is 1-based
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        self.limit = Some(i64::from(page_size));
        self.offset = Some(i64::from(page - 1) * i64::from(page_size));
        self
    }
}

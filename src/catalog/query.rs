//! Catalog browse pipeline: text search, category filter, sort, pagination.

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::{catalog::Catalog, products::Product};

/// Default number of products shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Category restriction applied to the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,

    /// Only products in this category.
    Only(String),
}

impl CategoryFilter {
    /// Sentinel name that disables category filtering.
    pub const ALL: &'static str = "All";

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// Unknown sort key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortOrder(String);

/// Product list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Cheapest first.
    #[value(name = "price-asc")]
    PriceAscending,

    /// Most expensive first.
    #[value(name = "price-desc")]
    PriceDescending,

    /// Best rated first.
    #[value(name = "rating-desc")]
    RatingDescending,

    /// Most recently listed first.
    #[default]
    #[value(name = "newest")]
    Newest,
}

impl SortOrder {
    /// Stable key used in query strings and the CLI.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::PriceAscending => "price-asc",
            Self::PriceDescending => "price-desc",
            Self::RatingDescending => "rating-desc",
            Self::Newest => "newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceAscending => a.price.to_minor_units().cmp(&b.price.to_minor_units()),
            Self::PriceDescending => b.price.to_minor_units().cmp(&a.price.to_minor_units()),
            Self::RatingDescending => b.rating.cmp(&a.rating),
            // Non-numeric ids sort after every numeric one.
            Self::Newest => match (a.id.sequence(), b.id.sequence()) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAscending),
            "price-desc" => Ok(Self::PriceDescending),
            "rating-desc" => Ok(Self::RatingDescending),
            "newest" => Ok(Self::Newest),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Browse controls for the product list.
///
/// Changing the search text or category returns to the first page; changing
/// the sort order keeps the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    search: String,
    category: CategoryFilter,
    sort: SortOrder,
    page: usize,
    page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogQuery {
    /// A query matching everything, newest first, on page 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// A query with a custom page size (minimum 1).
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            sort: SortOrder::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current category filter.
    #[must_use]
    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Current sort order.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Products per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search text and return to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Replace the category filter and return to page 1.
    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.category = category.into();
        self.page = 1;
    }

    /// Replace the sort order. The page is kept.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Move to a page (pages start at 1).
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Run the pipeline against a catalog.
    #[must_use]
    pub fn apply<'c>(&self, catalog: &'c Catalog) -> CatalogPage<'c> {
        let needle = self.search.to_lowercase();

        let mut matches: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .filter(|product| self.category.matches(product))
            .collect();

        matches.sort_by(|a, b| self.sort.compare(a, b));

        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(self.page_size);

        let products = matches
            .into_iter()
            .skip((self.page - 1).saturating_mul(self.page_size))
            .take(self.page_size)
            .collect();

        CatalogPage {
            products,
            page: self.page,
            total_pages,
            total_matches,
        }
    }
}

/// One page of pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'c> {
    /// Products visible on this page.
    pub products: Vec<&'c Product>,

    /// The 1-based page number shown.
    pub page: usize,

    /// Number of pages across all matches.
    pub total_pages: usize,

    /// Number of products matching the search and category.
    pub total_matches: usize,
}

impl CatalogPage<'_> {
    /// Whether nothing is visible ("no products found").
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether pagination controls are needed.
    #[must_use]
    pub fn has_multiple_pages(&self) -> bool {
        self.total_pages > 1
    }
}

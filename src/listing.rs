//! Text filtering and "load more" pagination over listings.
//!
//! Items are identified by their position in the source slice. Every filter
//! pass preserves source order, so a listing's visible items are always a
//! subsequence of the items it was built from.

/// A record that can be matched by free-text search.
pub trait Searchable {
    /// The text fields a query is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for String {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl Searchable for &str {
    fn search_fields(&self) -> Vec<&str> {
        vec![*self]
    }
}

/// Trimmed, lowercased search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    needle: String,
}

impl FilterQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        self.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Matches(usize),
    NoResults,
}

impl FilterOutcome {
    fn from_total(total: usize) -> Self {
        if total == 0 {
            FilterOutcome::NoResults
        } else {
            FilterOutcome::Matches(total)
        }
    }
}

/// Result of one filter pass.
#[derive(Debug, Clone)]
pub struct Filtered<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
}

impl<'a, T> Filtered<'a, T> {
    /// Matching items in source order.
    pub fn visible(&self) -> Vec<&'a T> {
        self.indices.iter().map(|&i| &self.items[i]).collect()
    }

    /// Source positions of the matching items.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn total(&self) -> usize {
        self.indices.len()
    }

    pub fn outcome(&self) -> FilterOutcome {
        FilterOutcome::from_total(self.total())
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}

/// Filters `items` by `query`. Never fails; an empty query keeps everything.
pub fn apply_filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Filtered<'a, T> {
    let query = FilterQuery::new(query);
    let indices = items
        .iter()
        .enumerate()
        .filter(|(_, item)| query.matches(*item))
        .map(|(i, _)| i)
        .collect();
    Filtered { items, indices }
}

/// How many of the current matches have been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    visible_count: usize,
    page_size: usize,
}

impl PaginationCursor {
    /// A zero page size is raised to one so every reveal makes progress.
    pub fn new(page_size: usize) -> Self {
        Self {
            visible_count: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(self) -> Self {
        Self::new(self.page_size)
    }

    pub fn is_exhausted(&self, total: usize) -> bool {
        self.visible_count >= total
    }

    /// Reveals `min(page_size, total - visible_count)` more items.
    pub fn reveal_next_page(self, total: usize) -> Self {
        let remaining = total.saturating_sub(self.visible_count);
        Self {
            visible_count: self.visible_count + self.page_size.min(remaining),
            ..self
        }
    }
}

/// Incrementally revealed listing; news-page behavior.
#[derive(Debug, Clone)]
pub struct PagedListing {
    matches: Vec<usize>,
    cursor: PaginationCursor,
    query: FilterQuery,
    filtered: bool,
}

impl PagedListing {
    pub fn new(page_size: usize) -> Self {
        Self {
            matches: Vec::new(),
            cursor: PaginationCursor::new(page_size),
            query: FilterQuery::default(),
            filtered: false,
        }
    }

    /// Recomputes matches for `query`, restarts pagination and reveals the
    /// first page.
    pub fn refilter<T: Searchable>(&mut self, items: &[T], query: &str) -> FilterOutcome {
        let filtered = apply_filter(items, query);
        let outcome = filtered.outcome();
        self.matches = filtered.into_indices();
        self.query = FilterQuery::new(query);
        self.filtered = true;
        self.cursor = self.cursor.reset().reveal_next_page(self.matches.len());
        log::debug!(
            "event=listing_refilter query={:?} total={} visible={}",
            self.query.as_str(),
            self.matches.len(),
            self.cursor.visible_count()
        );
        outcome
    }

    /// Reveals the next page. Returns how many items became visible; zero
    /// once every match is showing.
    pub fn reveal_next_page(&mut self) -> usize {
        let before = self.cursor.visible_count();
        self.cursor = self.cursor.reveal_next_page(self.matches.len());
        self.cursor.visible_count() - before
    }

    /// Source positions of the revealed items, in filtered order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.matches[..self.cursor.visible_count()]
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_indices().contains(&index)
    }

    pub fn total(&self) -> usize {
        self.matches.len()
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn can_load_more(&self) -> bool {
        !self.cursor.is_exhausted(self.matches.len())
    }

    /// `None` until the first filter pass.
    pub fn outcome(&self) -> Option<FilterOutcome> {
        self.filtered
            .then(|| FilterOutcome::from_total(self.matches.len()))
    }
}

/// Listing where every match is shown at once; careers-page behavior.
#[derive(Debug, Clone, Default)]
pub struct FilteredListing {
    visibility: Vec<bool>,
    query: FilterQuery,
    filtered: bool,
}

impl FilteredListing {
    /// Starts with every item visible.
    pub fn new(len: usize) -> Self {
        Self {
            visibility: vec![true; len],
            query: FilterQuery::default(),
            filtered: false,
        }
    }

    pub fn refilter<T: Searchable>(&mut self, items: &[T], query: &str) -> FilterOutcome {
        let query = FilterQuery::new(query);
        self.visibility = items.iter().map(|item| query.matches(item)).collect();
        self.query = query;
        self.filtered = true;
        FilterOutcome::from_total(self.visible_count())
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visibility.get(index).copied().unwrap_or(false)
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.visibility
            .iter()
            .enumerate()
            .filter_map(|(i, &shown)| shown.then_some(i))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|&&shown| shown).count()
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// `None` until the first filter pass.
    pub fn outcome(&self) -> Option<FilterOutcome> {
        self.filtered
            .then(|| FilterOutcome::from_total(self.visible_count()))
    }
}

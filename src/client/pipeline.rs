//! Turns fetched pages into the rows a renderer shows: accumulated infinite
//! feeds, and the in-memory filtering/paging of local mode.
use crate::client::store::{QueryKey, TableSettings};
use crate::models::review::{total_pages, Review, ReviewPage};

/// Pages accumulated for one query key, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfiniteFeed {
    key: Option<QueryKey>,
    pages: Vec<ReviewPage>,
}

impl InfiniteFeed {
    /// Starts over when `key` differs from the key the feed was built for.
    /// Returns true when the feed was reset.
    pub fn reset_if_changed(&mut self, key: &QueryKey) -> bool {
        if self.key.as_ref() == Some(key) {
            return false;
        }
        self.key = Some(key.clone());
        self.pages.clear();
        true
    }

    /// Appends `page` if it was fetched for the current key and is the
    /// expected next page. Stale or duplicate responses are dropped.
    pub fn push(&mut self, key: &QueryKey, page: ReviewPage) -> bool {
        if self.key.as_ref() != Some(key) || page.page != self.next_page() {
            return false;
        }
        self.pages.push(page);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn rows(&self) -> Vec<Review> {
        self.pages.iter().flat_map(|page| page.data.iter().cloned()).collect()
    }

    /// Total reported by the first page, like the counter above the table.
    pub fn total(&self) -> u64 {
        self.pages.first().map_or(0, |page| page.total)
    }

    pub fn has_next(&self) -> bool {
        self.pages.last().is_some_and(ReviewPage::has_next)
    }

    pub fn next_page(&self) -> u32 {
        self.pages.last().map_or(1, |page| page.page + 1)
    }
}

/// Result of filtering and paging the full dataset in memory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalView {
    pub rows: Vec<Review>,
    pub total: u64,
}

impl LocalView {
    pub fn total_pages(&self, limit: u32) -> u32 {
        total_pages(self.total, limit)
    }
}

/// Applies the settings' search and paging to `all`, keeping its order.
/// Infinite mode shows the prefix of the first `page` pages.
pub fn local_view(all: &[Review], settings: &TableSettings) -> LocalView {
    let matcher = settings.search_filter().matcher();
    let filtered: Vec<&Review> = all
        .iter()
        .filter(|review| matcher.as_ref().map_or(true, |m| m.matches(&review.text)))
        .collect();

    let limit = settings.limit as usize;
    let page = settings.page.max(1) as usize;
    let (start, end) = if settings.infinite {
        (0, page * limit)
    } else {
        ((page - 1) * limit, page * limit)
    };
    let start = start.min(filtered.len());
    let end = end.min(filtered.len());

    LocalView {
        rows: filtered[start..end].iter().map(|review| (*review).clone()).collect(),
        total: filtered.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::SearchMode;

    fn review(id: i64, text: &str) -> Review {
        Review { id, text: text.into(), rating: 4 }
    }

    fn page(number: u32, total: u64, limit: u32, ids: std::ops::Range<i64>) -> ReviewPage {
        ReviewPage {
            data: ids.map(|id| review(id, "x")).collect(),
            total,
            page: number,
            limit,
        }
    }

    fn key(search: &str) -> QueryKey {
        QueryKey {
            search: search.into(),
            mode: SearchMode::Partial,
            case_sensitive: false,
            limit: 5,
        }
    }

    #[test]
    fn test_infinite_feed_accumulates_until_exhausted() {
        let mut feed = InfiniteFeed::default();
        let k = key("");
        assert!(feed.reset_if_changed(&k));
        assert!(!feed.has_next());
        assert_eq!(feed.next_page(), 1);

        assert!(feed.push(&k, page(1, 12, 5, 0..5)));
        assert!(feed.has_next());
        assert!(feed.push(&k, page(2, 12, 5, 5..10)));
        assert!(feed.has_next());
        assert!(feed.push(&k, page(3, 12, 5, 10..12)));
        assert!(!feed.has_next());

        assert_eq!(feed.rows().len(), 12);
        assert_eq!(feed.total(), 12);
    }

    #[test]
    fn test_infinite_feed_drops_stale_pages() {
        let mut feed = InfiniteFeed::default();
        let old = key("old");
        let new = key("new");
        feed.reset_if_changed(&old);
        feed.push(&old, page(1, 10, 5, 0..5));

        assert!(feed.reset_if_changed(&new));
        assert!(feed.is_empty());
        assert!(!feed.push(&old, page(2, 10, 5, 5..10)), "response for the old key");
        assert!(!feed.push(&new, page(2, 10, 5, 5..10)), "out of order");
        assert!(feed.push(&new, page(1, 10, 5, 0..5)));
        assert!(!feed.push(&new, page(1, 10, 5, 0..5)), "duplicate");
        assert!(!feed.reset_if_changed(&new));
    }

    fn dataset() -> Vec<Review> {
        vec![
            review(6, "good"),
            review(5, "goodness"),
            review(4, "Good job"),
            review(3, "bad"),
            review(2, "very good"),
            review(1, ""),
        ]
    }

    #[test]
    fn test_local_paginated_view() {
        let settings = TableSettings { limit: 4, page: 2, ..TableSettings::default() };
        let view = local_view(&dataset(), &settings);
        assert_eq!(view.total, 6);
        assert_eq!(view.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(view.total_pages(settings.limit), 2);

        let past_end = TableSettings { limit: 4, page: 9, ..TableSettings::default() };
        assert!(local_view(&dataset(), &past_end).rows.is_empty());
    }

    #[test]
    fn test_local_infinite_view_is_prefix() {
        let settings = TableSettings { limit: 4, page: 2, infinite: true, ..TableSettings::default() };
        let view = local_view(&dataset(), &settings);
        assert_eq!(view.rows.len(), 6);
    }

    #[test]
    fn test_local_search_modes() {
        let mut settings = TableSettings { limit: 10, search: "good".into(), ..TableSettings::default() };
        assert_eq!(local_view(&dataset(), &settings).total, 4);

        settings.exact = true;
        let exact = local_view(&dataset(), &settings);
        assert_eq!(exact.rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![6, 4, 2]);

        settings.case_sensitive = true;
        assert_eq!(local_view(&dataset(), &settings).total, 2);
    }

    #[test]
    fn test_local_empty_result() {
        let settings = TableSettings { search: "nothing like this".into(), ..TableSettings::default() };
        let view = local_view(&dataset(), &settings);
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 0);
        assert_eq!(view.total_pages(settings.limit), 1);
    }
}

use leptos::logging::{error, log};
use leptos::*;

use crate::client::fetch::{fetch_all_reviews, fetch_reviews};
use crate::client::pipeline::{local_view, InfiniteFeed};
use crate::client::store::{DataSource, QueryKey, TableSettings};
use crate::models::review::{total_pages, Review, ReviewPage, ReviewQuery};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

/// Everything the table needs, whichever mode and source is active.
#[derive(Clone, Copy)]
pub struct ReviewData {
    pub rows: Signal<Vec<Review>>,
    pub total: Signal<u64>,
    pub total_pages: Signal<u32>,
    pub status: Signal<LoadStatus>,
    pub has_next_page: Signal<bool>,
    pub is_fetching_next_page: Signal<bool>,
    pub fetch_next: Callback<()>,
}

/// Wires the three data paths (server pages, server infinite feed, local
/// in-memory set) to the current settings.
pub fn use_review_data(settings: RwSignal<TableSettings>) -> ReviewData {
    let mode = create_memo(move |_| settings.with(|s| (s.source, s.infinite)));

    // --- Server, one page at a time ---
    let paged_query = create_memo(move |_| {
        settings.with(|s| (s.source == DataSource::Server && !s.infinite).then(|| s.server_query(s.page)))
    });
    let paged = create_local_resource(
        move || paged_query.get(),
        |query| async move {
            match query {
                Some(query) => fetch_reviews(&query).await.map(Some),
                None => Ok(None),
            }
        },
    );
    // The previous page stays on screen while the next one loads.
    let last_page = create_rw_signal(None::<ReviewPage>);
    let paged_failed = create_rw_signal(false);
    create_effect(move |_| match paged.get() {
        Some(Ok(Some(page))) => {
            last_page.set(Some(page));
            paged_failed.set(false);
        }
        Some(Err(err)) => {
            error!("[CLIENT] Failed to load page: {}", err);
            paged_failed.set(true);
        }
        _ => {}
    });

    // --- Server, infinite feed ---
    let feed = create_rw_signal(InfiniteFeed::default());
    let fetching_next = create_rw_signal(false);
    let feed_failed = create_rw_signal(false);

    let load_feed_page = move |key: QueryKey, query: ReviewQuery| {
        fetching_next.set(true);
        spawn_local(async move {
            match fetch_reviews(&query).await {
                Ok(page) => {
                    log!("[CLIENT] Feed page {} loaded ({} rows)", page.page, page.data.len());
                    feed.update(|feed| {
                        feed.push(&key, page);
                    });
                    feed_failed.set(false);
                }
                Err(err) => {
                    error!("[CLIENT] Failed to load feed page {}: {}", query.page, err);
                    feed_failed.set(true);
                }
            }
            fetching_next.set(false);
        });
    };

    create_effect(move |_| {
        let Some((key, first_page)) = settings.with(|s| {
            (s.source == DataSource::Server && s.infinite).then(|| (s.query_key(), s.server_query(1)))
        }) else {
            return;
        };
        let reset = feed.try_update(|feed| feed.reset_if_changed(&key)).unwrap_or(false);
        if reset {
            load_feed_page(key, first_page);
        }
    });

    // --- Local, whole set in memory ---
    let local_reviews = create_rw_signal(None::<Vec<Review>>);
    let local_status = create_rw_signal(LoadStatus::Ready);
    create_effect(move |_| {
        let wants_local = settings.with(|s| s.source == DataSource::Local);
        if !wants_local
            || local_reviews.with_untracked(Option::is_some)
            || local_status.get_untracked() == LoadStatus::Loading
        {
            return;
        }
        local_status.set(LoadStatus::Loading);
        spawn_local(async move {
            match fetch_all_reviews().await {
                Ok(all) => {
                    log!("[CLIENT] Loaded {} reviews for local mode", all.len());
                    local_reviews.set(Some(all));
                    local_status.set(LoadStatus::Ready);
                }
                Err(err) => {
                    error!("[CLIENT] Failed to load local dataset: {}", err);
                    local_status.set(LoadStatus::Failed);
                }
            }
        });
    });
    let local = create_memo(move |_| {
        local_reviews.with(|all| settings.with(|s| local_view(all.as_deref().unwrap_or(&[]), s)))
    });

    // --- Assembly ---
    let rows = Signal::derive(move || match mode.get() {
        (DataSource::Local, _) => local.with(|view| view.rows.clone()),
        (DataSource::Server, true) => feed.with(InfiniteFeed::rows),
        (DataSource::Server, false) => {
            last_page.with(|page| page.as_ref().map(|page| page.data.clone()).unwrap_or_default())
        }
    });

    let total = Signal::derive(move || match mode.get() {
        (DataSource::Local, _) => local.with(|view| view.total),
        (DataSource::Server, true) => feed.with(InfiniteFeed::total),
        (DataSource::Server, false) => last_page.with(|page| page.as_ref().map_or(0, |page| page.total)),
    });

    let pages = Signal::derive(move || total_pages(total.get(), settings.with(|s| s.limit)));

    let status = Signal::derive(move || match mode.get() {
        (DataSource::Local, _) => match local_status.get() {
            LoadStatus::Failed => LoadStatus::Failed,
            _ if local_reviews.with(Option::is_none) => LoadStatus::Loading,
            status => status,
        },
        (DataSource::Server, true) => {
            if feed_failed.get() {
                LoadStatus::Failed
            } else if feed.with(InfiniteFeed::is_empty) && fetching_next.get() {
                LoadStatus::Loading
            } else {
                LoadStatus::Ready
            }
        }
        (DataSource::Server, false) => {
            if paged_failed.get() {
                LoadStatus::Failed
            } else if last_page.with(Option::is_none) {
                LoadStatus::Loading
            } else {
                LoadStatus::Ready
            }
        }
    });

    let has_next_page = Signal::derive(move || match mode.get() {
        (DataSource::Local, _) => settings.with(|s| s.page) < pages.get(),
        (DataSource::Server, true) => feed.with(InfiniteFeed::has_next),
        (DataSource::Server, false) => last_page.with(|page| page.as_ref().is_some_and(ReviewPage::has_next)),
    });

    let is_fetching_next_page =
        Signal::derive(move || mode.get() == (DataSource::Server, true) && fetching_next.get());

    let fetch_next = Callback::new(move |_: ()| match mode.get_untracked() {
        (DataSource::Local, _) => {
            if has_next_page.get_untracked() {
                settings.update(|s| s.set_page(s.page + 1));
            }
        }
        (DataSource::Server, true) => {
            if fetching_next.get_untracked() || !feed.with_untracked(InfiniteFeed::has_next) {
                return;
            }
            let next = feed.with_untracked(InfiniteFeed::next_page);
            let (key, query) = settings.with_untracked(|s| (s.query_key(), s.server_query(next)));
            load_feed_page(key, query);
        }
        (DataSource::Server, false) => {}
    });

    ReviewData {
        rows,
        total,
        total_pages: pages,
        status,
        has_next_page,
        is_fetching_next_page,
        fetch_next,
    }
}

//! Table settings and the actions that change them. The table page keeps one
//! `RwSignal<TableSettings>` in context and mutates it through these methods.
use crate::models::review::{ReviewQuery, SearchMode, SortField, SortOrder, DEFAULT_PAGE_SIZE};
use crate::search::SearchFilter;

/// Smallest page size the auto-fit will ever pick.
pub const MIN_AUTO_LIMIT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataSource {
    /// Every page comes from the server.
    #[default]
    Server,
    /// The full set is fetched once, then filtered and paged in memory.
    Local,
}

/// Which of the four renderers the table shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Native,
    ColumnModel,
    ScrollCustom,
    ScrollVirtual,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSettings {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub exact: bool,
    pub case_sensitive: bool,
    pub infinite: bool,
    pub column_model: bool,
    pub virtualized: bool,
    pub source: DataSource,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            exact: false,
            case_sensitive: false,
            infinite: false,
            column_model: false,
            virtualized: false,
            source: DataSource::Server,
        }
    }
}

/// The parts of the settings that invalidate an accumulated infinite feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryKey {
    pub search: String,
    pub mode: SearchMode,
    pub case_sensitive: bool,
    pub limit: u32,
}

impl TableSettings {
    pub fn search_mode(&self) -> SearchMode {
        if self.exact {
            SearchMode::Exact
        } else {
            SearchMode::Partial
        }
    }

    pub fn search_filter(&self) -> SearchFilter {
        SearchFilter {
            query: self.search.clone(),
            mode: self.search_mode(),
            case_sensitive: self.case_sensitive,
        }
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey {
            search: self.search.clone(),
            mode: self.search_mode(),
            case_sensitive: self.case_sensitive,
            limit: self.limit,
        }
    }

    /// Server request for `page` under the current filters, newest first.
    pub fn server_query(&self, page: u32) -> ReviewQuery {
        ReviewQuery {
            page: page.max(1),
            limit: self.limit,
            search: self.search.trim().to_string(),
            mode: self.search_mode(),
            case_sensitive: self.case_sensitive,
            sort_by: SortField::Id,
            order: SortOrder::Desc,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match (self.infinite, self.virtualized, self.column_model) {
            (true, true, _) => ViewMode::ScrollVirtual,
            (true, false, _) => ViewMode::ScrollCustom,
            (false, _, true) => ViewMode::ColumnModel,
            (false, _, false) => ViewMode::Native,
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Applies an auto-fitted page size; a real change starts over at page 1.
    pub fn set_limit(&mut self, limit: u32) {
        let limit = limit.max(MIN_AUTO_LIMIT);
        if limit != self.limit {
            self.limit = limit;
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 1;
    }

    pub fn toggle_exact(&mut self) {
        self.exact = !self.exact;
        self.page = 1;
    }

    pub fn toggle_case_sensitive(&mut self) {
        self.case_sensitive = !self.case_sensitive;
        self.page = 1;
    }

    pub fn toggle_infinite(&mut self) {
        self.infinite = !self.infinite;
    }

    pub fn toggle_column_model(&mut self) {
        self.column_model = !self.column_model;
    }

    pub fn toggle_virtualized(&mut self) {
        self.virtualized = !self.virtualized;
    }

    pub fn toggle_source(&mut self) {
        self.source = match self.source {
            DataSource::Server => DataSource::Local,
            DataSource::Local => DataSource::Server,
        };
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.exact = false;
        self.case_sensitive = false;
        self.page = 1;
    }
}

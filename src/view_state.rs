use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ViewerConfig;
use crate::document::DocumentNode;
use crate::fetch::FetchError;
use crate::highlight::Highlighter;
use crate::pagination;
use crate::render::{self, RenderedItem};
use crate::search;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// What the body of the card shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Failed(String),
    EmptyDocument,
    NoMatches,
    Page,
}

/// Outcome of handing a fetch result to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// The view was torn down before the result arrived.
    Stale,
    /// A result was already applied.
    Duplicate,
}

/// Applies `result` only while `alive` is still set.
pub fn deliver(
    alive: &AtomicBool,
    state: &mut ViewState,
    result: Result<Vec<DocumentNode>, FetchError>,
) -> Delivery {
    if !alive.load(Ordering::Relaxed) {
        return Delivery::Stale;
    }
    if state.apply_fetch(result) {
        Delivery::Applied
    } else {
        Delivery::Duplicate
    }
}

/// Everything the view owns. Derived values are recomputed on each call.
#[derive(Clone, Debug)]
pub struct ViewState {
    nodes: Vec<DocumentNode>,
    status: LoadStatus,
    search_term: String,
    current_page: usize,
    items_per_page: usize,
}

impl ViewState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            nodes: Vec::new(),
            status: LoadStatus::Loading,
            search_term: String::new(),
            current_page: 1,
            items_per_page: config.items_per_page,
        }
    }

    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Stores the outcome of the mount-time fetch. Only the first outcome is kept.
    pub fn apply_fetch(&mut self, result: Result<Vec<DocumentNode>, FetchError>) -> bool {
        if self.status != LoadStatus::Loading {
            return false;
        }
        match result {
            Ok(nodes) => {
                self.nodes = nodes;
                self.status = LoadStatus::Loaded;
            }
            Err(err) => {
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
        true
    }

    /// Replaces the term as typed and pulls the current page back into range.
    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.current_page = pagination::clamp_page(self.current_page, self.page_count());
    }

    pub fn handle_page_change(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn previous_page(&mut self) {
        if self.can_go_previous() {
            self.handle_page_change(self.current_page - 1);
        }
    }

    pub fn next_page(&mut self) {
        if self.can_go_next() {
            self.handle_page_change(self.current_page + 1);
        }
    }

    pub fn filtered_nodes(&self) -> Vec<&DocumentNode> {
        search::filter_nodes(&self.nodes, &self.search_term)
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.filtered_nodes().len(), self.items_per_page)
    }

    pub fn current_page_nodes(&self) -> Vec<&DocumentNode> {
        let filtered = self.filtered_nodes();
        pagination::page_slice(&filtered, self.current_page, self.items_per_page).to_vec()
    }

    pub fn can_go_previous(&self) -> bool {
        pagination::can_go_previous(self.current_page)
    }

    pub fn can_go_next(&self) -> bool {
        pagination::can_go_next(self.current_page, self.page_count())
    }

    pub fn page_label(&self) -> String {
        pagination::page_label(self.current_page, self.page_count())
    }

    pub fn rendered_page(&self) -> Vec<RenderedItem> {
        let highlighter = Highlighter::new(&self.search_term);
        render::render_page(&self.current_page_nodes(), &highlighter)
    }

    pub fn shows_loading_indicator(&self) -> bool {
        self.nodes.is_empty() && self.status != LoadStatus::Loaded
    }

    pub fn body_state(&self) -> BodyState {
        match &self.status {
            LoadStatus::Loading => BodyState::Loading,
            LoadStatus::Failed(reason) => BodyState::Failed(reason.clone()),
            LoadStatus::Loaded if self.nodes.is_empty() => BodyState::EmptyDocument,
            LoadStatus::Loaded if self.filtered_nodes().is_empty() => BodyState::NoMatches,
            LoadStatus::Loaded => BodyState::Page,
        }
    }
}

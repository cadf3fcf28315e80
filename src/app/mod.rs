// src/app/mod.rs — UI-thread state + frame loop

// ---- Standard lib imports ----
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

// ---- Crates ----
use eframe::egui::{self as eg, TextureHandle};
use tracing::warn;

// ---- Local modules ----
pub mod browse;
pub mod detail;
pub mod filters;
pub mod posters;
pub mod search;
pub mod types;
pub mod ui;
pub mod utils;

use crate::catalog::{CancelToken, Genre, TmdbClient};
use crate::config::{load_config, AppConfig};
use browse::PageState;
use detail::DetailState;
use filters::FilterState;
use search::SearchDebounce;
use types::{BrowseMsg, DetailMsg, GenresMsg, PosterDone, PosterJob};

// ---- Tunables ----
pub(crate) const RELATED_LIMIT: usize = 5;
pub(crate) const POSTER_WORKERS: usize = 8;
pub(crate) const MAX_POSTERS_PER_FRAME: usize = 6;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) const FETCH_ERROR_MESSAGE: &str =
    "Failed to fetch movies. Please check your connection.";
pub(crate) const DETAIL_ERROR_MESSAGE: &str = "Failed to load movie details.";

pub struct CineApp {
    pub(crate) cfg: AppConfig,
    pub(crate) client: TmdbClient,

    // query state
    pub(crate) filters: FilterState,
    pub(crate) page: PageState,
    pub(crate) browse_generation: u64,
    pub(crate) browse_cancel: CancelToken,
    pub(crate) browse_dirty: bool,
    pub(crate) scroll_fired_len: usize,

    // search input
    pub(crate) search: SearchDebounce,

    // genre labels (fetched once per session)
    pub(crate) genres: Vec<Genre>,

    // detail panel
    pub(crate) detail: DetailState,
    pub(crate) detail_cancel: CancelToken,

    // channels back from worker threads
    pub(crate) browse_tx: Sender<BrowseMsg>,
    browse_rx: Receiver<BrowseMsg>,
    pub(crate) detail_tx: Sender<DetailMsg>,
    detail_rx: Receiver<DetailMsg>,
    genres_tx: Sender<GenresMsg>,
    genres_rx: Receiver<GenresMsg>,

    // poster plumbing
    pub(crate) poster_tx: Option<Sender<PosterJob>>,
    pub(crate) poster_rx: Option<Receiver<PosterDone>>,
    pub(crate) textures: HashMap<String, TextureHandle>,
    pub(crate) poster_pending: HashSet<String>,
    pub(crate) poster_failed: HashSet<String>,

    did_init: bool,
}

impl Default for CineApp {
    fn default() -> Self {
        let cfg = load_config();
        let client = TmdbClient::new(&cfg);

        let (browse_tx, browse_rx) = mpsc::channel();
        let (detail_tx, detail_rx) = mpsc::channel();
        let (genres_tx, genres_rx) = mpsc::channel();

        Self {
            cfg,
            client,

            filters: FilterState::default(),
            page: PageState::default(),
            browse_generation: 0,
            browse_cancel: CancelToken::default(),
            // fetch page 1 of Discover on the first frame
            browse_dirty: true,
            scroll_fired_len: 0,

            search: SearchDebounce::default(),

            genres: Vec::new(),

            detail: DetailState::default(),
            detail_cancel: CancelToken::default(),

            browse_tx,
            browse_rx,
            detail_tx,
            detail_rx,
            genres_tx,
            genres_rx,

            poster_tx: None,
            poster_rx: None,
            textures: HashMap::new(),
            poster_pending: HashSet::new(),
            poster_failed: HashSet::new(),

            did_init: false,
        }
    }
}

// ---------- methods ----------
impl CineApp {
    fn spawn_genre_fetch(&self) {
        let client = self.client.clone();
        let tx = self.genres_tx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(client.genres(&CancelToken::default()));
        });
    }

    fn poll_genres(&mut self) {
        while let Ok(result) = self.genres_rx.try_recv() {
            match result {
                Ok(genres) => self.genres = genres,
                Err(e) => warn!("genre list fetch failed: {e}"),
            }
        }
    }

    fn poll_browse(&mut self) {
        while let Ok(msg) = self.browse_rx.try_recv() {
            self.on_browse_msg(msg);
        }
    }

    fn poll_detail(&mut self) {
        while let Ok(msg) = self.detail_rx.try_recv() {
            self.on_detail_msg(msg);
        }
    }

    pub(crate) fn genre_name(&self, genre_id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == genre_id)
            .map(|g| g.name.as_str())
    }

    /// Heading over the grid, mirroring the active query mode.
    pub(crate) fn grid_title(&self) -> String {
        if self.filters.is_searching() {
            return format!("Search: {}", self.filters.search_query);
        }
        match self.filters.genre_id.and_then(|id| self.genre_name(id)) {
            Some(name) => format!("{name} Movies"),
            None => "Discover".to_string(),
        }
    }
}

// ========== App impl ==========
impl eframe::App for CineApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        // Keep frames coming so channel polls and the debounce deadline fire
        // even when the user is idle.
        ctx.request_repaint_after(POLL_INTERVAL);

        let now = Instant::now();

        if !self.did_init {
            self.did_init = true;
            self.spawn_genre_fetch();
        }

        // Drain worker results first so this frame renders fresh state.
        self.poll_genres();
        self.poll_browse();
        self.poll_detail();
        self.poll_posters(ctx);

        // Quiet-period search commit.
        let committed = self.filters.search_query.clone();
        if let Some(query) = self.search.poll(now, &committed) {
            self.change_filter(filters::FilterChange::SearchQuery(query));
        }

        // One authoritative browse fetch per state change.
        if self.browse_dirty {
            self.spawn_browse_fetch();
        }

        self.ui_render_topbar(ctx, now);
        self.ui_render_sidebar(ctx);
        if self.detail.selected.is_some() {
            self.ui_render_detail_panel(ctx);
        }
        self.ui_render_grid(ctx);
    }
}

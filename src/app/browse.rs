// src/app/browse.rs — pagination / accumulation controller
use tracing::{debug, warn};

use super::filters::FilterChange;
use super::types::BrowseMsg;
use super::{CineApp, FETCH_ERROR_MESSAGE};
use crate::catalog::{CancelToken, CatalogError, DiscoverQuery, Movie, MoviePage, SearchQuery};

/// Accumulated browse results for the current query generation.
#[derive(Clone, Debug)]
pub struct PageState {
    pub page: u32,
    pub movies: Vec<Movie>,
    pub has_more: bool,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            movies: Vec::new(),
            has_more: true,
            is_loading: true,
            last_error: None,
        }
    }
}

impl PageState {
    /// Back to page 1 with an empty accumulation, ready for a fresh fetch.
    pub fn begin(&mut self) {
        *self = Self::default();
    }

    /// Request the next page. Returns false (and changes nothing) while a
    /// fetch is in flight or the result set is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.is_loading || !self.has_more {
            return false;
        }
        self.page += 1;
        self.is_loading = true;
        true
    }

    /// Fold one resolved page in: replace on page 1, append afterwards.
    pub fn apply_page(&mut self, fetched: MoviePage) {
        if fetched.page <= 1 {
            self.movies = fetched.results;
        } else {
            self.movies.extend(fetched.results);
        }
        self.has_more = fetched.page < fetched.total_pages;
        self.is_loading = false;
        self.last_error = None;
    }

    pub fn fail(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
        self.is_loading = false;
    }
}

impl CineApp {
    /// Commit a filter mutation and invalidate everything fetched so far.
    pub(crate) fn change_filter(&mut self, change: FilterChange) {
        // leaving search mode also wipes the raw input buffer, un-debounced
        if matches!(change, FilterChange::Genre(_) | FilterChange::MinRating(_)) {
            self.search.clear_now();
        }
        self.filters.apply(change);
        self.reset_pagination();
    }

    /// Wholesale reset: title click, search clear button, sidebar reset.
    pub(crate) fn reset_all(&mut self) {
        self.search.clear_now();
        self.filters = Default::default();
        self.reset_pagination();
    }

    pub(crate) fn reset_pagination(&mut self) {
        // supersede any in-flight fetch for the old query
        self.browse_cancel.fire();
        self.browse_cancel = CancelToken::default();
        self.browse_generation += 1;
        self.page.begin();
        self.scroll_fired_len = 0;
        self.browse_dirty = true;
    }

    /// The infinite-scroll edge trigger: fires at most once per distinct
    /// accumulated-list length, and only when another page can actually load.
    pub(crate) fn on_last_card_visible(&mut self) {
        if self.page.is_loading || !self.page.has_more {
            return;
        }
        if self.page.movies.len() == self.scroll_fired_len {
            return;
        }
        self.scroll_fired_len = self.page.movies.len();
        if self.page.advance() {
            self.browse_dirty = true;
        }
    }

    /// Issue the authoritative fetch for the current FilterState + page.
    pub(crate) fn spawn_browse_fetch(&mut self) {
        self.browse_dirty = false;

        let client = self.client.clone();
        let tx = self.browse_tx.clone();
        let cancel = self.browse_cancel.clone();
        let generation = self.browse_generation;
        let page = self.page.page;
        let filters = self.filters.clone();

        debug!(generation, page, searching = filters.is_searching(), "browse fetch");

        std::thread::spawn(move || {
            let result = if filters.is_searching() {
                client.search(
                    &SearchQuery {
                        query: filters.search_query.trim().to_string(),
                        page,
                        year: filters.year,
                    },
                    &cancel,
                )
            } else {
                client.discover(
                    &DiscoverQuery {
                        page,
                        genre_id: filters.genre_id,
                        year: filters.year,
                        min_rating: filters.min_rating,
                        sort: filters.sort,
                    },
                    &cancel,
                )
            };
            let _ = tx.send(BrowseMsg {
                generation,
                page,
                result,
            });
        });
    }

    /// Fold one fetch outcome into state; anything from a superseded
    /// generation is dropped without touching the accumulation or the error.
    pub(crate) fn on_browse_msg(&mut self, msg: BrowseMsg) {
        if msg.generation != self.browse_generation {
            return;
        }
        match msg.result {
            Ok(fetched) => self.page.apply_page(fetched),
            Err(CatalogError::Cancelled) => {}
            Err(err) => {
                warn!("browse fetch for page {} failed: {err}", msg.page);
                self.page.fail(FETCH_ERROR_MESSAGE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::filters::FilterChange;
    use super::super::types::BrowseMsg;
    use super::super::CineApp;
    use super::PageState;
    use crate::catalog::{CatalogError, Movie, MoviePage};

    fn movie(id: u32) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: "1999-03-31".into(),
            vote_average: 7.5,
            genre_ids: vec![28],
            popularity: 10.0,
        }
    }

    fn envelope(page: u32, count: u32, total_pages: u32) -> MoviePage {
        MoviePage {
            page,
            results: (0..count).map(|i| movie(page * 100 + i)).collect(),
            total_pages,
            total_results: total_pages * count,
        }
    }

    #[test]
    fn page_one_replaces_later_pages_append() {
        let mut state = PageState::default();
        state.apply_page(envelope(1, 3, 5));
        assert_eq!(state.movies.len(), 3);
        assert!(state.has_more);
        assert!(!state.is_loading);

        assert!(state.advance());
        state.apply_page(envelope(2, 3, 5));
        assert_eq!(state.movies.len(), 6);
        assert!(state.has_more);
        // arrival order is preserved
        assert_eq!(state.movies[0].id, 100);
        assert_eq!(state.movies[3].id, 200);
    }

    #[test]
    fn has_more_is_strictly_less_than_total() {
        let mut state = PageState::default();
        state.apply_page(envelope(5, 3, 5));
        assert!(!state.has_more);

        state.begin();
        state.apply_page(envelope(1, 3, 1));
        assert!(!state.has_more);
    }

    #[test]
    fn advance_is_a_noop_while_loading_or_exhausted() {
        let mut state = PageState::default();
        // still loading page 1
        assert!(!state.advance());
        assert_eq!(state.page, 1);

        state.apply_page(envelope(1, 3, 1));
        // exhausted
        assert!(!state.advance());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn failure_sets_error_and_clears_loading() {
        let mut state = PageState::default();
        state.fail("boom");
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        assert!(!state.is_loading);
    }

    #[test]
    fn filter_change_resets_accumulation_and_generation() {
        let mut app = CineApp::default();
        let generation = app.browse_generation;
        app.on_browse_msg(BrowseMsg {
            generation,
            page: 1,
            result: Ok(envelope(1, 3, 5)),
        });
        assert_eq!(app.page.movies.len(), 3);

        app.change_filter(FilterChange::Genre(Some(28)));
        assert_eq!(app.page.page, 1);
        assert!(app.page.movies.is_empty());
        assert!(app.page.is_loading);
        assert!(app.browse_dirty);
        assert_eq!(app.browse_generation, generation + 1);
    }

    #[test]
    fn stale_generation_outcomes_are_discarded() {
        let mut app = CineApp::default();
        let stale = app.browse_generation;
        app.change_filter(FilterChange::Year(Some(1999)));

        // success under the old generation must not touch the accumulation
        app.on_browse_msg(BrowseMsg {
            generation: stale,
            page: 1,
            result: Ok(envelope(1, 3, 5)),
        });
        assert!(app.page.movies.is_empty());

        // nor may a stale error surface
        app.on_browse_msg(BrowseMsg {
            generation: stale,
            page: 1,
            result: Err(CatalogError::Lost),
        });
        assert_eq!(app.page.last_error, None);

        // the current generation still lands
        app.on_browse_msg(BrowseMsg {
            generation: app.browse_generation,
            page: 1,
            result: Ok(envelope(1, 2, 2)),
        });
        assert_eq!(app.page.movies.len(), 2);
    }

    #[test]
    fn cancelled_fetches_are_silently_ignored() {
        let mut app = CineApp::default();
        app.on_browse_msg(BrowseMsg {
            generation: app.browse_generation,
            page: 1,
            result: Err(CatalogError::Cancelled),
        });
        assert_eq!(app.page.last_error, None);
        // loading stays set; the superseding fetch owns the flag now
        assert!(app.page.is_loading);
    }

    #[test]
    fn scroll_trigger_fires_once_per_list_length() {
        let mut app = CineApp::default();
        app.on_browse_msg(BrowseMsg {
            generation: app.browse_generation,
            page: 1,
            result: Ok(envelope(1, 3, 5)),
        });

        app.on_last_card_visible();
        assert_eq!(app.page.page, 2);
        assert!(app.page.is_loading);

        // same transition reported again: no double advance
        app.on_last_card_visible();
        assert_eq!(app.page.page, 2);

        app.on_browse_msg(BrowseMsg {
            generation: app.browse_generation,
            page: 2,
            result: Ok(envelope(2, 3, 5)),
        });
        // list grew, a new last element exists
        app.on_last_card_visible();
        assert_eq!(app.page.page, 3);
    }

    #[test]
    fn scroll_trigger_respects_has_more() {
        let mut app = CineApp::default();
        app.on_browse_msg(BrowseMsg {
            generation: app.browse_generation,
            page: 1,
            result: Ok(envelope(1, 3, 1)),
        });
        assert!(!app.page.has_more);

        app.on_last_card_visible();
        assert_eq!(app.page.page, 1);
        assert!(!app.page.is_loading);
    }

    #[test]
    fn facet_change_leaves_search_mode_before_the_fetch() {
        let mut app = CineApp::default();
        app.change_filter(FilterChange::SearchQuery("matrix".into()));
        assert!(app.filters.is_searching());

        app.change_filter(FilterChange::Genre(Some(28)));
        assert!(!app.filters.is_searching());
        assert_eq!(app.filters.genre_id, Some(28));
        // page 1 of a discover query will be issued next frame
        assert!(app.browse_dirty);
        assert_eq!(app.page.page, 1);
    }
}

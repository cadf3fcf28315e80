// src/app/filters.rs — search/discover filter state machine
use crate::catalog::SortKey;

/// One user-facing filter mutation. `None` / empty text means "unset".
#[derive(Clone, Debug)]
pub enum FilterChange {
    Genre(Option<u32>),
    Year(Option<i32>),
    MinRating(Option<f32>),
    SearchQuery(String),
    Sort(SortKey),
}

/// The committed query state. Search text and the genre/rating facets are
/// mutually exclusive; year and sort are valid in both modes (sort is simply
/// not sent while searching).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub genre_id: Option<u32>,
    pub year: Option<i32>,
    pub min_rating: Option<f32>,
    pub search_query: String,
    pub sort: SortKey,
}

impl FilterState {
    /// Apply one change, re-deriving the mutual-exclusion invariant.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::SearchQuery(query) => {
                self.search_query = query.trim().to_string();
                // entering/staying in search mode: facets are incompatible
                self.genre_id = None;
                self.min_rating = None;
            }
            FilterChange::Genre(genre_id) => {
                self.genre_id = genre_id;
                self.search_query.clear();
            }
            FilterChange::MinRating(rating) => {
                self.min_rating = rating;
                self.search_query.clear();
            }
            FilterChange::Year(year) => self.year = year,
            FilterChange::Sort(sort) => self.sort = sort,
        }
    }

    /// Derived, never stored separately.
    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    pub fn any_active(&self) -> bool {
        self.genre_id.is_some()
            || self.year.is_some()
            || self.min_rating.is_some()
            || !self.search_query.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterChange, FilterState};
    use crate::catalog::SortKey;

    fn exclusive(state: &FilterState) -> bool {
        !(state.is_searching() && (state.genre_id.is_some() || state.min_rating.is_some()))
    }

    #[test]
    fn search_clears_facets() {
        let mut f = FilterState::default();
        f.apply(FilterChange::Genre(Some(28)));
        f.apply(FilterChange::MinRating(Some(7.0)));
        f.apply(FilterChange::SearchQuery("matrix".into()));

        assert_eq!(f.search_query, "matrix");
        assert_eq!(f.genre_id, None);
        assert_eq!(f.min_rating, None);
        assert!(f.is_searching());
    }

    #[test]
    fn facet_clears_search() {
        let mut f = FilterState::default();
        f.apply(FilterChange::SearchQuery("matrix".into()));
        f.apply(FilterChange::Genre(Some(28)));

        assert_eq!(f.search_query, "");
        assert_eq!(f.genre_id, Some(28));
        assert!(!f.is_searching());
    }

    #[test]
    fn year_and_sort_touch_nothing_else() {
        let mut f = FilterState::default();
        f.apply(FilterChange::SearchQuery("matrix".into()));
        f.apply(FilterChange::Year(Some(1999)));
        f.apply(FilterChange::Sort(SortKey::HighestRated));
        assert_eq!(f.search_query, "matrix");
        assert_eq!(f.year, Some(1999));
        assert_eq!(f.sort, SortKey::HighestRated);

        let mut f = FilterState::default();
        f.apply(FilterChange::Genre(Some(12)));
        f.apply(FilterChange::MinRating(Some(6.0)));
        f.apply(FilterChange::Year(Some(2005)));
        assert_eq!(f.genre_id, Some(12));
        assert_eq!(f.min_rating, Some(6.0));
    }

    #[test]
    fn exclusion_holds_across_arbitrary_sequences() {
        let changes = [
            FilterChange::SearchQuery("alien".into()),
            FilterChange::Year(Some(1979)),
            FilterChange::MinRating(Some(8.0)),
            FilterChange::Sort(SortKey::NewestFirst),
            FilterChange::SearchQuery("blade runner".into()),
            FilterChange::Genre(Some(878)),
            FilterChange::SearchQuery(String::new()),
            FilterChange::Genre(None),
        ];

        let mut f = FilterState::default();
        for change in changes {
            f.apply(change.clone());
            assert!(exclusive(&f), "invariant broken after {change:?}");
        }
    }

    #[test]
    fn search_commit_is_trimmed_and_blank_is_unset() {
        let mut f = FilterState::default();
        f.apply(FilterChange::SearchQuery("  matrix  ".into()));
        assert_eq!(f.search_query, "matrix");

        f.apply(FilterChange::SearchQuery("   ".into()));
        assert!(!f.is_searching());
    }

    #[test]
    fn default_is_the_reset_state() {
        let f = FilterState::default();
        assert_eq!(f.sort, SortKey::Popularity);
        assert!(!f.any_active());
        assert!(!f.is_searching());
    }
}

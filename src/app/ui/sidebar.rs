// src/app/ui/sidebar.rs
use eframe::egui as eg;

use crate::app::filters::FilterChange;
use crate::app::utils::YEAR_OPTIONS;
use crate::catalog::SortKey;

const RATING_FLOORS: [(f32, &str); 4] = [(8.0, "8+ ★"), (7.0, "7+ ★"), (6.0, "6+ ★"), (5.0, "5+ ★")];

const fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Popularity => "Most Popular",
        SortKey::NewestFirst => "Newest First",
        SortKey::HighestRated => "Highest Rated",
    }
}

fn rating_label(rating: Option<f32>) -> &'static str {
    match rating {
        None => "Any Rating",
        Some(r) => RATING_FLOORS
            .iter()
            .find(|(value, _)| *value == r)
            .map(|(_, label)| *label)
            .unwrap_or("Any Rating"),
    }
}

impl crate::app::CineApp {
    // ---------- FILTER SIDEBAR ----------
    pub(crate) fn ui_render_sidebar(&mut self, ctx: &eg::Context) {
        eg::SidePanel::left("filters_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(eg::RichText::new("Filters").strong());
                    if self.filters.any_active() && ui.small_button("Reset").clicked() {
                        self.reset_all();
                    }
                });
                ui.separator();

                let searching = self.filters.is_searching();

                // Sort (inert while searching; the endpoint ignores it)
                ui.label(eg::RichText::new("Sort by").weak());
                let mut sort = self.filters.sort;
                ui.add_enabled_ui(!searching, |ui| {
                    eg::ComboBox::from_id_source("sort_combo")
                        .selected_text(sort_label(sort))
                        .width(170.0)
                        .show_ui(ui, |ui| {
                            for key in
                                [SortKey::Popularity, SortKey::NewestFirst, SortKey::HighestRated]
                            {
                                ui.selectable_value(&mut sort, key, sort_label(key));
                            }
                        });
                });
                if sort != self.filters.sort {
                    self.change_filter(FilterChange::Sort(sort));
                }

                // Genre (picking one exits search mode)
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(eg::RichText::new("Genre").weak());
                    if searching {
                        ui.label(eg::RichText::new("discovery only").small().weak());
                    }
                });
                let mut genre = self.filters.genre_id;
                let genre_text = genre
                    .and_then(|id| self.genre_name(id))
                    .unwrap_or("All Genres")
                    .to_string();
                eg::ComboBox::from_id_source("genre_combo")
                    .selected_text(genre_text)
                    .width(170.0)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut genre, None, "All Genres");
                        for g in &self.genres {
                            ui.selectable_value(&mut genre, Some(g.id), &g.name);
                        }
                    });
                if genre != self.filters.genre_id {
                    self.change_filter(FilterChange::Genre(genre));
                }

                // Year (valid in both modes)
                ui.add_space(6.0);
                ui.label(eg::RichText::new("Year").weak());
                let mut year = self.filters.year;
                let year_text = year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "Any Year".to_string());
                eg::ComboBox::from_id_source("year_combo")
                    .selected_text(year_text)
                    .width(170.0)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut year, None, "Any Year");
                        for y in YEAR_OPTIONS.iter() {
                            ui.selectable_value(&mut year, Some(*y), y.to_string());
                        }
                    });
                if year != self.filters.year {
                    self.change_filter(FilterChange::Year(year));
                }

                // Minimum rating (picking one exits search mode)
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(eg::RichText::new("Min rating").weak());
                    if searching {
                        ui.label(eg::RichText::new("discovery only").small().weak());
                    }
                });
                let mut rating = self.filters.min_rating;
                eg::ComboBox::from_id_source("rating_combo")
                    .selected_text(rating_label(rating))
                    .width(170.0)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut rating, None, "Any Rating");
                        for (value, label) in RATING_FLOORS {
                            ui.selectable_value(&mut rating, Some(value), label);
                        }
                    });
                if rating != self.filters.min_rating {
                    self.change_filter(FilterChange::MinRating(rating));
                }

                // Mode explainer
                ui.add_space(12.0);
                ui.separator();
                ui.label(eg::RichText::new("Status").strong());
                let status = if searching {
                    format!(
                        "Filtering search results for \"{}\" by year.",
                        self.filters.search_query
                    )
                } else {
                    "Browsing categories with full filter capabilities.".to_string()
                };
                ui.add(eg::Label::new(eg::RichText::new(status).weak()).wrap());
                if searching {
                    ui.add(
                        eg::Label::new(
                            eg::RichText::new(
                                "Genre and rating filters reset the search and return to discovery.",
                            )
                            .italics()
                            .small()
                            .weak(),
                        )
                        .wrap(),
                    );
                }
            });
    }
}

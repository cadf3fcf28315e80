// src/app/detail.rs — detail panel loader + right-hand panel
use eframe::egui as eg;
use tracing::warn;

use super::types::DetailMsg;
use super::{CineApp, DETAIL_ERROR_MESSAGE, RELATED_LIMIT};
use crate::catalog::{CancelToken, CatalogError, Movie, MovieDetails};

/// Everything the detail panel shows for the currently selected movie.
/// Replaced wholesale whenever the selection changes; nothing is reused
/// across selections, not even when the next movie was in the related list.
#[derive(Clone, Debug, Default)]
pub struct DetailState {
    pub selected: Option<u32>,
    pub loading: bool,
    pub error: Option<String>,
    pub details: Option<MovieDetails>,
    pub related: Vec<Movie>,
}

impl CineApp {
    pub(crate) fn open_detail(&mut self, movie_id: u32) {
        if self.detail.selected == Some(movie_id) {
            return;
        }

        self.detail_cancel.fire();
        self.detail_cancel = CancelToken::default();
        self.detail = DetailState {
            selected: Some(movie_id),
            loading: true,
            ..Default::default()
        };

        let client = self.client.clone();
        let tx = self.detail_tx.clone();
        let cancel = self.detail_cancel.clone();

        std::thread::spawn(move || {
            // details + recommendations in parallel; both must land
            let related_client = client.clone();
            let related_cancel = cancel.clone();
            let related = std::thread::spawn(move || {
                related_client.recommendations(movie_id, &related_cancel)
            });

            let details = client.details(movie_id, &cancel);
            let related = related.join().unwrap_or(Err(CatalogError::Lost));

            let result = details.and_then(|d| related.map(|r| (d, r.results)));
            let _ = tx.send(DetailMsg { movie_id, result });
        });
    }

    pub(crate) fn close_detail(&mut self) {
        self.detail_cancel.fire();
        self.detail = DetailState::default();
    }

    /// Outcomes for anything but the current selection are dropped whole.
    pub(crate) fn on_detail_msg(&mut self, msg: DetailMsg) {
        if self.detail.selected != Some(msg.movie_id) {
            return;
        }
        match msg.result {
            Ok((details, mut related)) => {
                related.truncate(RELATED_LIMIT);
                self.detail.details = Some(details);
                self.detail.related = related;
                self.detail.loading = false;
                self.detail.error = None;
            }
            Err(CatalogError::Cancelled) => {}
            Err(err) => {
                warn!("detail fetch for movie {} failed: {err}", msg.movie_id);
                self.detail = DetailState {
                    selected: self.detail.selected,
                    error: Some(DETAIL_ERROR_MESSAGE.to_string()),
                    ..Default::default()
                };
            }
        }
    }

    pub(crate) fn ui_render_detail_panel(&mut self, ctx: &eg::Context) {
        let view = self.detail.clone();

        eg::SidePanel::right("detail_panel")
            .resizable(true)
            .default_width(360.0)
            .min_width(280.0)
            .max_width(520.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.heading("Details");
                    ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            self.close_detail();
                        }
                    });
                });
                ui.separator();

                if view.loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.add(eg::Spinner::new().size(18.0));
                        ui.label("Loading details…");
                    });
                    return;
                }

                if let Some(err) = &view.error {
                    ui.add_space(12.0);
                    ui.colored_label(eg::Color32::LIGHT_RED, err);
                    ui.label(
                        eg::RichText::new("Select the movie again to retry.").weak(),
                    );
                    return;
                }

                let Some(details) = &view.details else {
                    ui.label("Select a movie from the grid to see details.");
                    return;
                };

                eg::ScrollArea::vertical().show(ui, |ui| {
                    // Poster preview (shares the grid's texture cache)
                    ui.add_space(4.0);
                    let avail_w = ui.available_width().clamp(120.0, 480.0);
                    let poster_size = eg::vec2(avail_w, avail_w * 1.5);
                    match details
                        .poster_path
                        .as_ref()
                        .and_then(|p| self.textures.get(p))
                    {
                        Some(tex) => {
                            ui.image((tex.id(), poster_size));
                        }
                        None => {
                            if let Some(path) = details.poster_path.clone() {
                                self.request_poster(&path);
                            }
                            let (rect, _resp) =
                                ui.allocate_exact_size(poster_size, eg::Sense::hover());
                            ui.painter().rect_filled(rect, 8.0, eg::Color32::from_gray(40));
                            ui.painter().text(
                                rect.center(),
                                eg::Align2::CENTER_CENTER,
                                "Poster loading…",
                                eg::FontId::proportional(14.0),
                                eg::Color32::WHITE,
                            );
                        }
                    }

                    ui.add_space(8.0);

                    let title = match super::utils::release_year(&details.release_date) {
                        Some(y) => format!("{} ({})", details.title, y),
                        None => details.title.clone(),
                    };
                    ui.heading(title);

                    if let Some(tagline) = details.tagline.as_deref() {
                        if !tagline.is_empty() {
                            ui.label(eg::RichText::new(tagline).italics().weak());
                        }
                    }

                    // ★ rating · runtime · status
                    let mut meta = format!("★ {:.1}", details.vote_average);
                    if let Some(mins) = details.runtime {
                        meta.push_str(&format!(" · {}", super::utils::format_runtime(mins)));
                    }
                    if !details.status.is_empty() {
                        meta.push_str(&format!(" · {}", details.status));
                    }
                    ui.label(eg::RichText::new(meta).weak());

                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);

                    ui.label(eg::RichText::new("Genres").strong());
                    if details.genres.is_empty() {
                        ui.label("—");
                    } else {
                        let names: Vec<&str> =
                            details.genres.iter().map(|g| g.name.as_str()).collect();
                        ui.label(names.join(", "));
                    }
                    ui.add_space(6.0);

                    if !details.overview.is_empty() {
                        ui.label(eg::RichText::new("Overview").strong());
                        ui.add(eg::Label::new(&details.overview).wrap());
                        ui.add_space(6.0);
                    }

                    if details.budget > 0 {
                        ui.monospace(format!(
                            "Budget   {}",
                            super::utils::format_money(details.budget)
                        ));
                    }
                    if details.revenue > 0 {
                        ui.monospace(format!(
                            "Revenue  {}",
                            super::utils::format_money(details.revenue)
                        ));
                    }

                    if !view.related.is_empty() {
                        ui.add_space(8.0);
                        ui.separator();
                        ui.label(eg::RichText::new("More like this").strong());
                        ui.add_space(4.0);

                        for movie in &view.related {
                            let label = match super::utils::release_year(&movie.release_date) {
                                Some(y) => format!("{} ({})", movie.title, y),
                                None => movie.title.clone(),
                            };
                            // full reload on click, even though it came from
                            // this very list
                            if ui.button(label).clicked() {
                                self.open_detail(movie.id);
                            }
                        }
                    }
                });
            });
    }
}

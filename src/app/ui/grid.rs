// src/app/ui/grid.rs
use eframe::egui as eg;

use crate::app::utils;

pub const H_SPACING: f32 = 4.0;
pub const V_SPACING: f32 = 10.0;
pub const CARD_WIDTH: f32 = 140.0;

// Per-frame card snapshot so painting never borrows the accumulation.
struct Card {
    id: u32,
    title: String,
    year: Option<i32>,
    rating: f32,
    poster: Option<String>,
}

impl crate::app::CineApp {
    // ---------- RESULT GRID ----------
    pub(crate) fn ui_render_grid(&mut self, ctx: &eg::Context) {
        eg::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(self.grid_title());
                if self.page.is_loading {
                    ui.add(eg::Spinner::new().size(14.0));
                }
            });
            if let Some(err) = &self.page.last_error {
                ui.colored_label(eg::Color32::LIGHT_RED, err);
            }
            ui.separator();

            if self.page.movies.is_empty() {
                if !self.page.is_loading && self.page.last_error.is_none() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label("No movies found.");
                        if ui.button("Clear filters").clicked() {
                            self.reset_all();
                        }
                    });
                }
                return;
            }

            let cards: Vec<Card> = self
                .page
                .movies
                .iter()
                .map(|m| Card {
                    id: m.id,
                    title: m.title.clone(),
                    year: utils::release_year(&m.release_date),
                    rating: m.vote_average,
                    poster: m.poster_path.clone(),
                })
                .collect();
            let last = cards.len() - 1;

            let card_w = CARD_WIDTH;
            let text_h: f32 = 44.0;
            let card_h = card_w * 1.5 + text_h;

            let mut clicked: Option<u32> = None;
            let mut wanted: Vec<String> = Vec::new();
            let mut last_visible = false;

            eg::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let avail = ui.available_width();
                    let cols = ((avail + H_SPACING) / (card_w + H_SPACING))
                        .floor()
                        .max(1.0) as usize;

                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);

                        for (i, card) in cards.iter().enumerate() {
                            if i > 0 && i % cols == 0 {
                                ui.end_row();
                            }

                            ui.allocate_ui_with_layout(
                                eg::vec2(card_w, card_h),
                                eg::Layout::top_down(eg::Align::Min),
                                |ui| {
                                    ui.set_min_size(eg::vec2(card_w, card_h));
                                    let rect = ui.max_rect();

                                    // selection; ids stay unique even if the
                                    // API hands back a duplicate movie
                                    let id = eg::Id::new(("movie_card", card.id, i));
                                    if ui.interact(rect, id, eg::Sense::click()).clicked() {
                                        clicked = Some(card.id);
                                    }

                                    let poster_rect = eg::Rect::from_min_max(
                                        rect.min,
                                        eg::pos2(rect.min.x + card_w, rect.min.y + card_w * 1.5),
                                    );
                                    let text_rect = eg::Rect::from_min_max(
                                        eg::pos2(rect.min.x, poster_rect.max.y),
                                        rect.max,
                                    );

                                    match card.poster.as_ref().and_then(|p| self.textures.get(p)) {
                                        Some(tex) => {
                                            ui.painter().image(
                                                tex.id(),
                                                poster_rect,
                                                eg::Rect::from_min_max(
                                                    eg::pos2(0.0, 0.0),
                                                    eg::pos2(1.0, 1.0),
                                                ),
                                                eg::Color32::WHITE,
                                            );
                                        }
                                        None => {
                                            ui.painter().rect_filled(
                                                poster_rect,
                                                6.0,
                                                eg::Color32::from_gray(40),
                                            );
                                            if let Some(p) = &card.poster {
                                                wanted.push(p.clone());
                                            }
                                        }
                                    }

                                    let title_line = match card.year {
                                        Some(y) => format!("{} ({})", card.title, y),
                                        None => card.title.clone(),
                                    };
                                    let label = format!("{title_line}\n★ {:.1}", card.rating);
                                    ui.allocate_ui_at_rect(text_rect, |ui| {
                                        ui.add(
                                            eg::Label::new(eg::RichText::new(label).size(13.0))
                                                .wrap(),
                                        );
                                    });

                                    // the edge trigger watches the LAST card only
                                    if i == last && ui.is_rect_visible(rect) {
                                        last_visible = true;
                                    }
                                },
                            );
                        }
                        ui.end_row();
                    });

                    if self.page.is_loading {
                        ui.vertical_centered(|ui| {
                            ui.add_space(12.0);
                            ui.add(eg::Spinner::new().size(18.0));
                            ui.add_space(12.0);
                        });
                    }
                });

            for path in wanted {
                self.request_poster(&path);
            }
            if last_visible {
                self.on_last_card_visible();
            }
            if let Some(movie_id) = clicked {
                self.open_detail(movie_id);
            }
        });
    }
}

// src/app/ui/topbar.rs
use std::time::Instant;

use eframe::egui as eg;

impl crate::app::CineApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ctx: &eg::Context, now: Instant) {
        eg::TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                // App title doubles as "reset everything"
                let title = eg::RichText::new("CINEWAVE").heading().strong();
                if ui
                    .add(eg::Label::new(title).sense(eg::Sense::click()))
                    .on_hover_text("Reset all filters")
                    .clicked()
                {
                    self.reset_all();
                }

                ui.separator();

                // Search (raw buffer; commits after the quiet period)
                let resp = ui.add(
                    eg::TextEdit::singleline(self.search.buffer_mut())
                        .hint_text("Search movies by title…")
                        .desired_width(280.0),
                );
                if resp.changed() {
                    self.search.touch(now);
                }

                if !self.search.buffer().is_empty()
                    && ui
                        .small_button("✕")
                        .on_hover_text("Clear search and filters")
                        .clicked()
                {
                    self.reset_all();
                }

                // wake a frame exactly when the pending commit is due
                if let Some(remaining) = self.search.time_until_deadline(now) {
                    ctx.request_repaint_after(remaining);
                }
            });
            ui.add_space(6.0);
        });
    }
}

// src/app/posters.rs — artwork worker pool (in-memory textures only)
use std::sync::mpsc::{self, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui::{self as eg, ColorImage, TextureHandle};
use image::GenericImageView;
use tracing::warn;

use super::types::{PosterDone, PosterJob};
use super::{CineApp, MAX_POSTERS_PER_FRAME, POSTER_WORKERS};

fn fetch_poster(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<(u32, u32, Vec<u8>), String> {
    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("download {url}: {e}"))?;

    let img = image::load_from_memory(&bytes).map_err(|e| format!("decode {url}: {e}"))?;
    let (w, h) = img.dimensions();
    Ok((w, h, img.to_rgba8().into_raw()))
}

/// Upload an RGBA image to a GPU texture. (UI thread only)
fn upload_rgba(ctx: &eg::Context, w: u32, h: u32, bytes: &[u8], name: &str) -> TextureHandle {
    let img = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], bytes);
    ctx.load_texture(name.to_string(), img, eg::TextureOptions::LINEAR)
}

impl CineApp {
    /// Spawn the download pool on first use. One shared HTTP client.
    fn ensure_poster_workers(&mut self) {
        if self.poster_tx.is_some() {
            return;
        }

        let (work_tx, work_rx) = mpsc::channel::<PosterJob>();
        let (done_tx, done_rx) = mpsc::channel::<PosterDone>();
        self.poster_tx = Some(work_tx);
        self.poster_rx = Some(done_rx);

        let work_rx = Arc::new(Mutex::new(work_rx));

        let client = match reqwest::blocking::Client::builder()
            .user_agent("cinewave/posters")
            .timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(POSTER_WORKERS)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(
                    ACCEPT,
                    HeaderValue::from_static("image/avif,image/webp,image/*;q=0.8,*/*;q=0.5"),
                );
                h
            })
            .build()
        {
            Ok(c) => Arc::new(c),
            Err(e) => {
                warn!("poster http client build failed: {e}");
                return;
            }
        };

        for _ in 0..POSTER_WORKERS {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);

            std::thread::spawn(move || loop {
                let job = {
                    let rx = work_rx.lock().unwrap();
                    rx.recv()
                };
                let PosterJob { key, url } = match job {
                    Ok(j) => j,
                    Err(_) => break,
                };

                let result = fetch_poster(&client, &url);
                let _ = done_tx.send(PosterDone { key, result });
            });
        }
    }

    /// Queue one poster path for download unless it is already uploaded,
    /// queued, or known-bad.
    pub(crate) fn request_poster(&mut self, poster_path: &str) {
        if self.textures.contains_key(poster_path)
            || self.poster_pending.contains(poster_path)
            || self.poster_failed.contains(poster_path)
        {
            return;
        }

        self.ensure_poster_workers();
        let Some(tx) = &self.poster_tx else { return };

        let job = PosterJob {
            key: poster_path.to_string(),
            url: format!("{}{}", self.cfg.image_base, poster_path),
        };
        if tx.send(job).is_ok() {
            self.poster_pending.insert(poster_path.to_string());
        }
    }

    /// Drain decoded posters and upload a bounded number of textures per
    /// frame so large pages do not hitch the UI.
    pub(crate) fn poll_posters(&mut self, ctx: &eg::Context) {
        let mut uploaded = 0usize;

        while uploaded < MAX_POSTERS_PER_FRAME {
            let Some(rx) = &self.poster_rx else { break };

            match rx.try_recv() {
                Ok(done) => {
                    self.poster_pending.remove(&done.key);
                    match done.result {
                        Ok((w, h, bytes)) => {
                            let tex = upload_rgba(ctx, w, h, &bytes, &done.key);
                            self.textures.insert(done.key, tex);
                            uploaded += 1;
                        }
                        Err(e) => {
                            warn!("poster fetch failed: {e}");
                            self.poster_failed.insert(done.key);
                        }
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        if uploaded > 0 {
            ctx.request_repaint();
        }
    }
}

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::mpsc::Sender;

use eframe::egui;
use image::GenericImageView;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::app_state::Msg;

/// Decoded cover waiting for its texture upload on the UI thread.
pub struct DecodedCover {
    pub url: String,
    pub rgba: Vec<u8>,
    pub w: u32,
    pub h: u32,
}

/// Cover download, decode and texture manager. Each URL is fetched at most
/// once per session; failures are remembered and not retried.
pub struct CoverStore {
    http: reqwest::Client,
    textures: HashMap<String, egui::TextureHandle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
    uploads: VecDeque<DecodedCover>,
    fetch_sem: Arc<Semaphore>,
    uploads_per_frame: usize,
}

impl CoverStore {
    pub fn new(http: reqwest::Client, parallel: usize, uploads_per_frame: usize) -> Self {
        Self {
            http,
            textures: HashMap::new(),
            pending: HashSet::new(),
            failed: HashSet::new(),
            uploads: VecDeque::new(),
            fetch_sem: Arc::new(Semaphore::new(parallel.max(1))),
            uploads_per_frame: uploads_per_frame.max(1),
        }
    }

    pub fn texture(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(url)
    }

    /// Claims `url` for fetching. False when it is already loaded, in
    /// flight, or known bad.
    fn claim(&mut self, url: &str) -> bool {
        if url.is_empty()
            || self.textures.contains_key(url)
            || self.pending.contains(url)
            || self.failed.contains(url)
        {
            return false;
        }
        self.pending.insert(url.to_string());
        true
    }

    /// Starts loading `url` unless it is already known. `max_height` bounds
    /// the decoded size.
    pub fn request(&mut self, url: &str, max_height: u32, tx: &Sender<Msg>, ctx: &egui::Context) {
        if !self.claim(url) {
            return;
        }
        let tx = tx.clone();
        let ctx = ctx.clone();
        let http = self.http.clone();
        let sem = self.fetch_sem.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            let _permit = sem.acquire_owned().await.ok();
            let msg = match fetch_and_decode(&http, &url, max_height).await {
                Ok((rgba, w, h)) => Msg::CoverDecoded { url, rgba, w, h },
                Err(error) => Msg::CoverFailed { url, error },
            };
            let _ = tx.send(msg);
            ctx.request_repaint();
        });
    }

    pub fn on_decoded(&mut self, cover: DecodedCover) {
        if self.textures.contains_key(&cover.url) {
            self.pending.remove(&cover.url);
            return;
        }
        self.uploads.push_back(cover);
    }

    pub fn on_failed(&mut self, url: String, error: &str) {
        warn!(%url, error, "cover failed");
        self.pending.remove(&url);
        self.failed.insert(url);
    }

    /// Uploads a bounded number of decoded covers. Returns true if more are
    /// still queued.
    pub fn upload_pending(&mut self, ctx: &egui::Context) -> bool {
        for _ in 0..self.uploads_per_frame {
            let Some(cover) = self.uploads.pop_front() else { break };
            let image = egui::ColorImage::from_rgba_unmultiplied([cover.w as usize, cover.h as usize], &cover.rgba);
            let tex = ctx.load_texture(cover.url.clone(), image, egui::TextureOptions::LINEAR);
            debug!(url = %cover.url, w = cover.w, h = cover.h, "cover uploaded");
            self.pending.remove(&cover.url);
            self.textures.insert(cover.url, tex);
        }
        !self.uploads.is_empty()
    }
}

async fn fetch_and_decode(http: &reqwest::Client, url: &str, max_height: u32) -> Result<(Vec<u8>, u32, u32), String> {
    let res = http.get(url).send().await.map_err(|e| e.to_string())?;
    let res = res.error_for_status().map_err(|e| e.to_string())?;
    let bytes = res.bytes().await.map_err(|e| e.to_string())?;
    tokio::task::spawn_blocking(move || decode_cover(&bytes, max_height).map_err(|e| e.to_string()))
        .await
        .map_err(|e| e.to_string())?
}

/// Decodes and, when taller than `max_height`, downscales keeping the aspect.
pub fn decode_cover(bytes: &[u8], max_height: u32) -> Result<(Vec<u8>, u32, u32), image::ImageError> {
    let mut img = image::load_from_memory(bytes)?;
    let (w, h) = img.dimensions();
    if max_height > 0 && h > max_height {
        let new_w = ((w as f32) * (max_height as f32) / (h as f32)).round().max(1.0) as u32;
        img = img.resize_exact(new_w, max_height, image::imageops::FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((rgba.into_raw(), w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn tall_covers_are_downscaled() {
        let (rgba, w, h) = decode_cover(&png(100, 150), 60).unwrap();
        assert_eq!((w, h), (40, 60));
        assert_eq!(rgba.len(), (40 * 60 * 4) as usize);
    }

    #[test]
    fn small_covers_keep_their_size() {
        let (_, w, h) = decode_cover(&png(20, 30), 300).unwrap();
        assert_eq!((w, h), (20, 30));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_cover(b"not an image", 100).is_err());
    }

    #[test]
    fn each_url_is_claimed_once() {
        let mut store = CoverStore::new(reqwest::Client::new(), 2, 3);
        assert!(!store.claim(""));
        assert!(store.claim("https://img/a.jpg"));
        assert!(!store.claim("https://img/a.jpg"));
        store.on_failed("https://img/a.jpg".into(), "404");
        assert!(store.failed.contains("https://img/a.jpg"));
        assert!(!store.claim("https://img/a.jpg"));
        assert!(store.claim("https://img/b.jpg"));
    }
}

use std::sync::mpsc::{channel, Receiver, Sender};

use aniting_core::CatalogClient;
use eframe::egui;
use tracing::info;

mod app_state;
mod config;
mod download;
mod icon;
mod images;
mod landing;
mod logger;
mod models;
mod showcase;
mod ui_helpers;

use app_state::Msg;
use download::DownloadModal;
use images::{CoverStore, DecodedCover};
use landing::PageActions;
use models::Config;
use showcase::Showcase;
use ui_helpers::{with_alpha, ANITING_BLACK, ANITING_WHITE};

const MAX_MSGS_PER_FRAME: usize = 8;
const ICON_TEXTURE_SIZE: u32 = 64;

struct Aniting {
    config: Config,
    tx: Sender<Msg>,
    rx: Receiver<Msg>,
    showcase: Showcase,
    covers: CoverStore,
    icon: egui::TextureHandle,
    download: DownloadModal,
    style_applied: bool,
}

impl Aniting {
    fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let (tx, rx) = channel();
        let ctx = cc.egui_ctx.clone();
        let http = reqwest::Client::new();

        let client = CatalogClient::with_client(http.clone(), config.endpoint.clone());
        let showcase = Showcase::mount(client, tx.clone(), &ctx, config.reduce_motion);
        let covers = CoverStore::new(
            http,
            config.cover_parallel as usize,
            config.cover_uploads_per_frame as usize,
        );
        let icon = ctx.load_texture("app_icon", icon::icon_image(ICON_TEXTURE_SIZE), egui::TextureOptions::LINEAR);

        Self {
            config,
            tx,
            rx,
            showcase,
            covers,
            icon,
            download: DownloadModal::default(),
            style_applied: false,
        }
    }

    fn apply_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = ANITING_BLACK;
        visuals.window_fill = ANITING_BLACK;
        visuals.extreme_bg_color = ANITING_BLACK;
        visuals.override_text_color = Some(ANITING_WHITE);
        visuals.hyperlink_color = ANITING_WHITE;
        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        for font in style.text_styles.values_mut() {
            font.size *= self.config.font_scale;
        }
        ctx.set_style(style);
        self.style_applied = true;
    }

    fn drain_messages(&mut self) {
        for _ in 0..MAX_MSGS_PER_FRAME {
            let Ok(msg) = self.rx.try_recv() else { break };
            match msg {
                Msg::CatalogSettled(view) => self.showcase.on_catalog(view),
                Msg::CoverDecoded { url, rgba, w, h } => self.covers.on_decoded(DecodedCover { url, rgba, w, h }),
                Msg::CoverFailed { url, error } => self.covers.on_failed(url, &error),
            }
        }
    }
}

impl eframe::App for Aniting {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_style(ctx);
        self.drain_messages();
        if self.covers.upload_pending(ctx) {
            ctx.request_repaint();
        }

        let mut actions = PageActions::default();
        egui::TopBottomPanel::top("nav")
            .frame(
                egui::Frame::none()
                    .fill(with_alpha(egui::Color32::BLACK, 0.5))
                    .stroke(egui::Stroke::new(1.0, with_alpha(egui::Color32::WHITE, 0.1))),
            )
            .show(ctx, |ui| landing::nav_bar(ui, &self.icon, &mut actions));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(ANITING_BLACK))
            .show(ctx, |ui| {
                let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
                if actions.scroll_to_top {
                    scroll = scroll.vertical_scroll_offset(0.0);
                }
                scroll.show(ui, |ui| {
                    landing::page(ui, &self.icon, &mut actions, |ui| {
                        self.showcase.ui(ui, &mut self.covers, &self.tx, &self.icon)
                    });
                });
            });

        if actions.start_download {
            self.download.start_download();
        }
        if self.download.is_open() {
            self.download.show(ctx);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    let read = config::read_config();
    let level = read.as_ref().map(|(c, _)| c.log_level.clone()).unwrap_or_else(|_| "info".to_string());
    logger::init(&level);
    let config = config::or_init_defaults(read);
    info!(endpoint = %config.endpoint, log = %logger::log_path().display(), "starting Aniting");

    let viewport = egui::ViewportBuilder::default()
        .with_title("Aniting")
        .with_inner_size([1280.0, 860.0])
        .with_min_inner_size([420.0, 720.0])
        .with_icon(icon::generate_icon(256));
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Aniting",
        options,
        Box::new(move |cc| Box::new(Aniting::new(cc, config))),
    )
}

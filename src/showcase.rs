use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use aniting_core::display::{
    display_title, hero_description, hero_image_url, score_badge, tile_image_url, truncate_chars,
};
use aniting_core::query::HERO_SEARCH;
use aniting_core::{
    spawn_catalog_fetch, CatalogClient, CategoryKind, FetchHandle, MediaSummary, ShowcaseSession,
    ShowcaseViewModel,
};
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use egui::text::Galley;
use tracing::info;

use crate::app_state::Msg;
use crate::images::CoverStore;
use crate::ui_helpers::{
    paint_cover, vertical_gradient, with_alpha, ANITING_BLACK, GRAY_300, GRAY_400, GRAY_500, GRAY_600, GRAY_900,
    YELLOW_400,
};

pub const FRAME_SIZE: Vec2 = Vec2::new(320.0, 650.0);
const BEZEL: f32 = 8.0;
const FRAME_ROUNDING: f32 = 48.0;

const HERO_HEIGHT: f32 = 450.0;
const HERO_PADDING: f32 = 20.0;
const LETTERING_HEIGHT: f32 = 96.0;
const WATCH_BUTTON: Vec2 = Vec2::new(150.0, 44.0);

const SIDE_PADDING: f32 = 16.0;
const CATEGORIES_TOP_GAP: f32 = 16.0;
const HEADER_HEIGHT: f32 = 28.0;
const HEADER_GAP: f32 = 12.0;
const TILE_WIDTH: f32 = 100.0;
const TILE_COVER_HEIGHT: f32 = 150.0;
const TILE_CAPTION: f32 = 22.0;
const TILE_GAP: f32 = 12.0;
const CATEGORY_GAP: f32 = 24.0;
const BOTTOM_PADDING: f32 = 80.0;

const NAV_HEIGHT: f32 = 64.0;
const NAV_FADE: f32 = 40.0;

const HERO_COVER_MAX_HEIGHT: u32 = 900;
const TILE_COVER_MAX_HEIGHT: u32 = 300;

/// Screen-space placement of one category block. `tiles` are the cover
/// rects, one per item, left to right in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLayout {
    pub kind: CategoryKind,
    pub header: Rect,
    pub tiles: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentLayout {
    pub hero: Rect,
    pub categories: Vec<CategoryLayout>,
    pub height: f32,
}

/// Places the hero and the six category blocks below each other starting
/// at `origin`. Empty categories keep their header.
pub fn layout_content(view: &ShowcaseViewModel, origin: Pos2, width: f32) -> ContentLayout {
    let hero = Rect::from_min_size(origin, Vec2::new(width, HERO_HEIGHT));
    let left = origin.x + SIDE_PADDING;
    let mut y = hero.bottom() + CATEGORIES_TOP_GAP;
    let mut categories = Vec::with_capacity(CategoryKind::ALL.len());
    for (kind, items) in view.categories() {
        let header = Rect::from_min_size(Pos2::new(left, y), Vec2::new(width - 2.0 * SIDE_PADDING, HEADER_HEIGHT));
        let row_top = header.bottom() + HEADER_GAP;
        let tiles: Vec<Rect> = (0..items.len())
            .map(|i| {
                Rect::from_min_size(
                    Pos2::new(left + i as f32 * (TILE_WIDTH + TILE_GAP), row_top),
                    Vec2::new(TILE_WIDTH, TILE_COVER_HEIGHT),
                )
            })
            .collect();
        let row_height = if tiles.is_empty() { 0.0 } else { TILE_COVER_HEIGHT + TILE_CAPTION };
        y = row_top + row_height + CATEGORY_GAP;
        categories.push(CategoryLayout { kind, header, tiles });
    }
    ContentLayout { hero, categories, height: y + BOTTOM_PADDING - origin.y }
}

/// The phone mockup: owns the session and the in-flight catalog fetch.
/// Dropping it cancels a fetch that has not settled yet.
pub struct Showcase {
    session: ShowcaseSession,
    fetch: Option<FetchHandle>,
    reduce_motion: bool,
}

impl Showcase {
    pub fn mount(client: CatalogClient, tx: Sender<Msg>, ctx: &egui::Context, reduce_motion: bool) -> Self {
        info!(endpoint = client.endpoint(), "fetching showcase catalog");
        let repaint = ctx.clone();
        let fetch = spawn_catalog_fetch(client, move |view| {
            let _ = tx.send(Msg::CatalogSettled(view));
            repaint.request_repaint();
        });
        Self { session: ShowcaseSession::default(), fetch: Some(fetch), reduce_motion }
    }

    pub fn on_catalog(&mut self, view: ShowcaseViewModel) {
        if self.session.settle(view) {
            self.fetch.take();
        }
    }

    pub fn ui(&self, ui: &mut egui::Ui, covers: &mut CoverStore, tx: &Sender<Msg>, icon: &egui::TextureHandle) {
        let (frame, _) = ui.allocate_exact_size(FRAME_SIZE, Sense::hover());
        let ctx = ui.ctx().clone();
        let outer = ui.painter();
        outer.rect_stroke(frame.expand(4.0), FRAME_ROUNDING + 4.0, Stroke::new(4.0, with_alpha(GRAY_900, 0.5)));
        outer.rect_filled(frame, FRAME_ROUNDING, GRAY_900);

        let screen = frame.shrink(BEZEL);
        let painter = ui.painter_at(screen);
        painter.rect_filled(screen, FRAME_ROUNDING - BEZEL, ANITING_BLACK);

        if self.session.is_ready() {
            let offset = if self.reduce_motion { 0.0 } else { self.session.scroll_offset(Instant::now()) };
            let origin = screen.min + Vec2::new(0.0, offset);
            let view = self.session.view();
            let layout = layout_content(view, origin, screen.width());
            paint_hero(&painter, layout.hero, view.hero.as_ref(), covers, tx, &ctx);
            for block in &layout.categories {
                paint_category(&painter, screen, block, view.items(block.kind), covers, tx, &ctx);
            }
            if !self.reduce_motion {
                ctx.request_repaint();
            }
        } else {
            let t = ui.input(|i| i.time) as f32;
            let alpha = 0.75 + 0.25 * (t * std::f32::consts::PI).cos();
            painter.text(screen.center(), Align2::CENTER_CENTER, "Cargando...", FontId::proportional(14.0), with_alpha(GRAY_500, alpha));
            ctx.request_repaint();
        }

        paint_bottom_nav(&painter, screen);
        paint_status_bar(&painter, screen, icon);
    }
}

/// Lays out `text` wrapped to `width`, cutting it with an ellipsis so it
/// spans at most `max_rows` rows.
fn clamp_rows(painter: &Painter, text: &str, font: FontId, color: Color32, width: f32, max_rows: usize) -> Arc<Galley> {
    let galley = painter.layout(text.to_string(), font.clone(), color, width);
    if galley.rows.len() <= max_rows {
        return galley;
    }
    let mut keep: usize = galley.rows.iter().take(max_rows).map(|r| r.glyphs.len()).sum();
    loop {
        let galley = painter.layout(truncate_chars(text, keep), font.clone(), color, width);
        if galley.rows.len() <= max_rows || keep == 0 {
            return galley;
        }
        keep -= 1;
    }
}

fn paint_hero(
    painter: &Painter,
    rect: Rect,
    hero: Option<&MediaSummary>,
    covers: &mut CoverStore,
    tx: &Sender<Msg>,
    ctx: &egui::Context,
) {
    painter.rect_filled(rect, 0.0, Color32::from_gray(18));
    if let Some(url) = hero_image_url(hero) {
        covers.request(url, HERO_COVER_MAX_HEIGHT, tx, ctx);
        paint_cover(painter, rect, covers.texture(url), 0.0);
    }

    let top_shade = Rect::from_min_max(rect.min, Pos2::new(rect.max.x, rect.min.y + rect.height() * 0.4));
    vertical_gradient(painter, top_shade, with_alpha(Color32::BLACK, 0.4), Color32::TRANSPARENT);
    let mid = rect.center().y;
    vertical_gradient(painter, Rect::from_min_max(rect.min, Pos2::new(rect.max.x, mid)), Color32::TRANSPARENT, with_alpha(ANITING_BLACK, 0.2));
    vertical_gradient(painter, Rect::from_min_max(Pos2::new(rect.min.x, mid), rect.max), with_alpha(ANITING_BLACK, 0.2), ANITING_BLACK);

    let cx = rect.center().x;
    let inner_width = rect.width() - 2.0 * HERO_PADDING;
    let description_height = 32.0;
    let mut y = rect.bottom()
        - HERO_PADDING
        - (LETTERING_HEIGHT + 16.0 + description_height + 24.0 + WATCH_BUTTON.y + 24.0 + 4.0);

    // Title lettering stands in for the series logo.
    let lettering = painter.layout(HERO_SEARCH.to_uppercase(), FontId::proportional(34.0), Color32::WHITE, inner_width);
    let size = lettering.size();
    let pos = Pos2::new(cx - size.x * 0.5, y + (LETTERING_HEIGHT - size.y) * 0.5);
    painter.rect_filled(Rect::from_min_size(pos + Vec2::new(2.0, 3.0), size).shrink(2.0), 4.0, with_alpha(Color32::BLACK, 0.25));
    painter.galley(pos, lettering);
    y += LETTERING_HEIGHT + 16.0;

    let description = hero_description(hero);
    if !description.is_empty() {
        let galley = clamp_rows(painter, &description, FontId::proportional(12.0), GRAY_300, inner_width - 16.0, 2);
        let pos = Pos2::new(cx - galley.size().x * 0.5, y);
        painter.galley(pos, galley);
    }
    y += description_height + 24.0;

    let button = Rect::from_min_size(Pos2::new(cx - WATCH_BUTTON.x * 0.5, y), WATCH_BUTTON);
    painter.rect_filled(button, 8.0, Color32::WHITE);
    painter.text(button.center(), Align2::CENTER_CENTER, "▶ Ver ahora", FontId::proportional(15.0), Color32::BLACK);
    y += WATCH_BUTTON.y + 24.0;

    let widths = [16.0, 6.0, 6.0, 6.0];
    let total: f32 = widths.iter().sum::<f32>() + 6.0 * (widths.len() - 1) as f32;
    let mut x = cx - total * 0.5;
    for (i, w) in widths.iter().enumerate() {
        let color = if i == 0 { Color32::WHITE } else { GRAY_600 };
        painter.rect_filled(Rect::from_min_size(Pos2::new(x, y), Vec2::new(*w, 4.0)), 2.0, color);
        x += w + 6.0;
    }
}

fn paint_category(
    painter: &Painter,
    screen: Rect,
    block: &CategoryLayout,
    items: &[MediaSummary],
    covers: &mut CoverStore,
    tx: &Sender<Msg>,
    ctx: &egui::Context,
) {
    if block.header.intersects(screen) {
        painter.text(block.header.left_center(), Align2::LEFT_CENTER, block.kind.title(), FontId::proportional(18.0), Color32::WHITE);
        painter.text(block.header.right_center(), Align2::RIGHT_CENTER, "Ver más ›", FontId::proportional(12.0), GRAY_400);
    }

    for (rect, media) in block.tiles.iter().zip(items) {
        let tile = Rect::from_min_max(rect.min, rect.max + Vec2::new(0.0, TILE_CAPTION));
        if !tile.intersects(screen) {
            continue;
        }
        painter.rect_filled(*rect, 8.0, Color32::from_gray(28));
        if let Some(url) = tile_image_url(media) {
            covers.request(url, TILE_COVER_MAX_HEIGHT, tx, ctx);
            paint_cover(painter, *rect, covers.texture(url), 8.0);
        }
        paint_score_badge(painter, rect.right_top() + Vec2::new(-4.0, 4.0), media.average_score);

        let caption = clamp_rows(painter, display_title(media), FontId::proportional(10.0), GRAY_300, TILE_WIDTH, 1);
        painter.galley(Pos2::new(rect.left(), rect.bottom() + 8.0), caption);
    }
}

fn paint_score_badge(painter: &Painter, top_right: Pos2, average_score: Option<u8>) {
    let text = painter.layout_no_wrap(score_badge(average_score), FontId::proportional(9.0), Color32::WHITE);
    let star_width = 10.0;
    let size = Vec2::new(star_width + text.size().x + 8.0, text.size().y + 4.0);
    let bg = Rect::from_min_size(Pos2::new(top_right.x - size.x, top_right.y), size);
    painter.rect_filled(bg, 4.0, with_alpha(Color32::BLACK, 0.6));
    painter.text(Pos2::new(bg.left() + 4.0, bg.center().y), Align2::LEFT_CENTER, "★", FontId::proportional(8.0), YELLOW_400);
    painter.galley(Pos2::new(bg.left() + 4.0 + star_width, bg.top() + 2.0), text);
}

fn paint_bottom_nav(painter: &Painter, screen: Rect) {
    let nav = Rect::from_min_max(Pos2::new(screen.left(), screen.bottom() - NAV_HEIGHT), screen.max);
    let fade = Rect::from_min_max(Pos2::new(screen.left(), nav.top() - NAV_FADE), Pos2::new(screen.right(), nav.top()));
    vertical_gradient(painter, fade, Color32::TRANSPARENT, ANITING_BLACK);

    let bottom_round = FRAME_ROUNDING - BEZEL;
    painter.rect_filled(nav, Rounding { nw: 0.0, ne: 0.0, sw: bottom_round, se: bottom_round }, with_alpha(Color32::BLACK, 0.9));
    painter.hline(nav.x_range(), nav.top(), Stroke::new(1.0, with_alpha(Color32::WHITE, 0.1)));

    let tabs = [("🏠", "Inicio"), ("🧭", "Explorar"), ("👤", "Perfil")];
    let column = nav.width() / tabs.len() as f32;
    for (i, (glyph, label)) in tabs.iter().enumerate() {
        let color = if i == 0 { Color32::WHITE } else { GRAY_500 };
        let x = nav.left() + column * (i as f32 + 0.5);
        painter.text(Pos2::new(x, nav.top() + 22.0), Align2::CENTER_CENTER, *glyph, FontId::proportional(20.0), color);
        painter.text(Pos2::new(x, nav.top() + 44.0), Align2::CENTER_CENTER, *label, FontId::proportional(10.0), color);
    }
}

fn paint_status_bar(painter: &Painter, screen: Rect, icon: &egui::TextureHandle) {
    let notch = Rect::from_min_size(Pos2::new(screen.center().x - 64.0, screen.top()), Vec2::new(128.0, 28.0));
    painter.rect_filled(notch, Rounding { nw: 0.0, ne: 0.0, sw: 16.0, se: 16.0 }, Color32::BLACK);

    let icon_rect = Rect::from_min_size(Pos2::new(screen.left() + 24.0, screen.top() + 8.0), Vec2::splat(16.0));
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    painter.image(icon.id(), icon_rect, uv, Color32::WHITE);

    let battery = Rect::from_min_size(Pos2::new(screen.right() - 24.0 - 18.0, screen.top() + 11.0), Vec2::new(16.0, 10.0));
    painter.rect_filled(battery, 2.0, Color32::WHITE);
    let nub = Rect::from_min_size(Pos2::new(battery.right() + 1.0, battery.top() + 3.0), Vec2::new(2.0, 4.0));
    painter.rect_filled(nub, 1.0, Color32::WHITE);
}

use eframe::egui::{self, Color32, FontId, Pos2, Rect, Response, RichText, Sense, Stroke, Ui, Vec2};
use egui::text::{LayoutJob, TextFormat};
use tracing::warn;

pub const ANITING_BLACK: Color32 = Color32::from_rgb(0x0a, 0x0a, 0x0a);
pub const ANITING_WHITE: Color32 = Color32::from_rgb(0xf8, 0xf8, 0xf8);
pub const GRAY_300: Color32 = Color32::from_rgb(209, 213, 219);
pub const GRAY_400: Color32 = Color32::from_rgb(156, 163, 175);
pub const GRAY_500: Color32 = Color32::from_rgb(107, 114, 128);
pub const GRAY_600: Color32 = Color32::from_rgb(75, 85, 99);
pub const GRAY_700: Color32 = Color32::from_rgb(55, 65, 81);
pub const GRAY_900: Color32 = Color32::from_rgb(17, 24, 39);
pub const CYAN_400: Color32 = Color32::from_rgb(34, 211, 238);
pub const BLUE_500: Color32 = Color32::from_rgb(59, 130, 246);
pub const INDIGO_400: Color32 = Color32::from_rgb(129, 140, 248);
pub const INDIGO_500: Color32 = Color32::from_rgb(99, 102, 241);
pub const GREEN_400: Color32 = Color32::from_rgb(74, 222, 128);
pub const GREEN_500: Color32 = Color32::from_rgb(34, 197, 94);
pub const YELLOW_400: Color32 = Color32::from_rgb(250, 204, 21);
pub const DISCORD_BLURPLE: Color32 = Color32::from_rgb(0x58, 0x65, 0xf2);

/// Opens `url` in the system browser. Failure is logged, nothing else.
pub fn open_link(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        warn!(%url, error = %e, "could not open browser");
    }
}

pub fn with_alpha(c: Color32, alpha: f32) -> Color32 {
    let [r, g, b, _] = c.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let [ar, ag, ab, aa] = a.to_array();
    let [br, bg, bb, ba] = b.to_array();
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(mix(ar, br), mix(ag, bg), mix(ab, bb), mix(aa, ba))
}

/// Fills `rect` with a top-to-bottom gradient.
pub fn vertical_gradient(painter: &egui::Painter, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    painter.add(egui::Shape::mesh(mesh));
}

/// Text whose glyphs sweep through `stops` left to right.
pub fn gradient_text(text: &str, font: FontId, stops: &[Color32]) -> LayoutJob {
    let mut job = LayoutJob::default();
    let n = text.chars().count().max(1);
    for (i, ch) in text.chars().enumerate() {
        let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
        let color = sample_stops(stops, t);
        let mut buf = [0u8; 4];
        job.append(ch.encode_utf8(&mut buf), 0.0, TextFormat { font_id: font.clone(), color, ..Default::default() });
    }
    job
}

fn sample_stops(stops: &[Color32], t: f32) -> Color32 {
    match stops.len() {
        0 => Color32::WHITE,
        1 => stops[0],
        n => {
            let scaled = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (scaled.floor() as usize).min(n - 2);
            lerp_color(stops[i], stops[i + 1], scaled - i as f32)
        }
    }
}

/// UV sub-rectangle that makes an image of `image` size fill `target`
/// without distortion, cropping the overflow evenly (CSS `object-cover`).
pub fn cover_uv(image: Vec2, target: Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    }
    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let pad = (1.0 - visible) * 0.5;
        Rect::from_min_max(Pos2::new(pad, 0.0), Pos2::new(1.0 - pad, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let pad = (1.0 - visible) * 0.5;
        Rect::from_min_max(Pos2::new(0.0, pad), Pos2::new(1.0, 1.0 - pad))
    }
}

/// Draws `tex` cropped to fill `rect`, or a flat placeholder without one.
pub fn paint_cover(painter: &egui::Painter, rect: Rect, tex: Option<&egui::TextureHandle>, rounding: f32) {
    match tex {
        Some(tex) => {
            let uv = cover_uv(tex.size_vec2(), rect.size());
            painter.image(tex.id(), rect, uv, Color32::WHITE);
        }
        None => {
            painter.rect_filled(rect, rounding, Color32::from_gray(28));
        }
    }
}

/// Rounded, filled button with centered text.
pub fn pill_button(ui: &mut Ui, text: impl Into<String>, size: Vec2, fill: Color32, text_color: Color32) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let fill = if response.hovered() { lerp_color(fill, Color32::WHITE, 0.12) } else { fill };
    let painter = ui.painter();
    painter.rect_filled(rect, size.y * 0.5, fill);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text.into(),
        FontId::proportional(15.0),
        text_color,
    );
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Same shape as [`pill_button`] but inert, with a hover tooltip.
pub fn disabled_pill(ui: &mut Ui, text: &str, size: Vec2, tooltip: &str) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    painter.rect(rect, size.y * 0.5, with_alpha(Color32::WHITE, 0.05), Stroke::new(1.0, with_alpha(Color32::WHITE, 0.05)));
    painter.text(rect.center(), egui::Align2::CENTER_CENTER, text, FontId::proportional(15.0), with_alpha(GRAY_500, 0.6));
    response
        .on_hover_cursor(egui::CursorIcon::NotAllowed)
        .on_hover_text(RichText::new(tooltip).size(10.0))
}

/// Section heading with a colored leading glyph.
pub fn section_title(ui: &mut Ui, glyph: &str, glyph_color: Color32, text: &str) {
    let font = FontId::proportional(30.0);
    let mut job = LayoutJob::default();
    job.append(glyph, 0.0, TextFormat { font_id: font.clone(), color: glyph_color, ..Default::default() });
    job.append(text, 10.0, TextFormat { font_id: font, color: Color32::WHITE, ..Default::default() });
    ui.label(job);
}

/// Rounded card with the translucent glass look of the page.
pub fn glass_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(with_alpha(Color32::WHITE, 0.05))
        .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.10)))
        .rounding(16.0)
        .inner_margin(egui::Margin::same(24.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rect, b: Rect) -> bool {
        (a.min - b.min).length() < 1e-4 && (a.max - b.max).length() < 1e-4
    }

    #[test]
    fn wide_image_is_cropped_horizontally() {
        let uv = cover_uv(Vec2::new(200.0, 100.0), Vec2::new(100.0, 100.0));
        assert!(approx(uv, Rect::from_min_max(Pos2::new(0.25, 0.0), Pos2::new(0.75, 1.0))));
    }

    #[test]
    fn tall_image_is_cropped_vertically() {
        let uv = cover_uv(Vec2::new(100.0, 300.0), Vec2::new(100.0, 150.0));
        assert!(approx(uv, Rect::from_min_max(Pos2::new(0.0, 0.25), Pos2::new(1.0, 0.75))));
    }

    #[test]
    fn degenerate_sizes_use_the_whole_image() {
        let uv = cover_uv(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(approx(uv, Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))));
    }

    #[test]
    fn gradient_text_colors_each_glyph() {
        let job = gradient_text("SIN", FontId::proportional(20.0), &[CYAN_400, BLUE_500, INDIGO_500]);
        assert_eq!(job.text, "SIN");
        assert_eq!(job.sections.len(), 3);
        assert_eq!(job.sections[0].format.color, CYAN_400);
        assert_eq!(job.sections[1].format.color, BLUE_500);
        assert_eq!(job.sections[2].format.color, INDIGO_500);
    }
}

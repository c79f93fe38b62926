use eframe::egui::{self, viewport::IconData};

// Gradient stops of the brand wordmark: cyan-400, blue-500, indigo-500.
const STOPS: [(f32, f32, f32); 3] = [(34.0, 211.0, 238.0), (59.0, 130.0, 246.0), (99.0, 102.0, 241.0)];

/// Round app icon: diagonal brand gradient disc, white play triangle.
pub fn icon_rgba(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut rgba = vec![0u8; (size * size * 4) as usize];
    let c = s * 0.5;
    let radius = s * 0.48;

    let p1 = (s * 0.40, s * 0.30);
    let p2 = (s * 0.40, s * 0.70);
    let p3 = (s * 0.72, s * 0.50);

    for y in 0..size {
        for x in 0..size {
            let idx = ((y * size + x) * 4) as usize;
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let dist = ((px - c).powi(2) + (py - c).powi(2)).sqrt();
            // 1px soft edge
            let alpha = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if alpha == 0.0 {
                continue;
            }
            let (r, g, b) = if point_in_triangle(px, py, p1, p2, p3) {
                (255.0, 255.0, 255.0)
            } else {
                gradient((px + py) / (2.0 * s))
            };
            rgba[idx] = r as u8;
            rgba[idx + 1] = g as u8;
            rgba[idx + 2] = b as u8;
            rgba[idx + 3] = (alpha * 255.0) as u8;
        }
    }
    rgba
}

pub fn generate_icon(size: u32) -> IconData {
    IconData { rgba: icon_rgba(size), width: size, height: size }
}

/// Same artwork for use as an in-page texture (nav bar, status bar, footer).
pub fn icon_image(size: u32) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([size as usize, size as usize], &icon_rgba(size))
}

fn gradient(t: f32) -> (f32, f32, f32) {
    let t = t.clamp(0.0, 1.0) * 2.0;
    let (a, b, t) = if t < 1.0 { (STOPS[0], STOPS[1], t) } else { (STOPS[1], STOPS[2], t - 1.0) };
    (lerp(a.0, b.0, t), lerp(a.1, b.1, t), lerp(a.2, b.2, t))
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }

#[inline]
fn cross(ax: f32, ay: f32, bx: f32, by: f32) -> f32 { ax * by - ay * bx }

fn point_in_triangle(px: f32, py: f32, p1: (f32, f32), p2: (f32, f32), p3: (f32, f32)) -> bool {
    let c1 = cross(p2.0 - p1.0, p2.1 - p1.1, px - p1.0, py - p1.1);
    let c2 = cross(p3.0 - p2.0, p3.1 - p2.1, px - p2.0, py - p2.1);
    let c3 = cross(p1.0 - p3.0, p1.1 - p3.1, px - p3.0, py - p3.1);
    let has_neg = c1 < 0.0 || c2 < 0.0 || c3 < 0.0;
    let has_pos = c1 > 0.0 || c2 > 0.0 || c3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgba: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * size + x) * 4) as usize;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    #[test]
    fn corners_are_transparent_and_center_is_white() {
        let size = 64;
        let rgba = icon_rgba(size);
        assert_eq!(rgba.len(), (size * size * 4) as usize);
        assert_eq!(pixel(&rgba, size, 0, 0)[3], 0);
        assert_eq!(pixel(&rgba, size, 63, 63)[3], 0);
        assert_eq!(pixel(&rgba, size, 32, 32), [255, 255, 255, 255]);
    }

    #[test]
    fn disc_runs_from_cyan_to_indigo() {
        let size = 64;
        let rgba = icon_rgba(size);
        let top_left = pixel(&rgba, size, 14, 14);
        let bottom_right = pixel(&rgba, size, 50, 50);
        assert!(top_left[1] > bottom_right[1], "green channel fades toward indigo");
        assert_eq!(top_left[3], 255);
    }
}

use eframe::egui::{self, Align2, Color32, FontId, Order, RichText, Sense, Stroke, Vec2};
use tracing::info;

use crate::models::{ExternalLink, APK_DIRECT};
use crate::ui_helpers::{open_link, with_alpha, GRAY_400, GRAY_500, GREEN_400};

/// A download mirror offered once the direct download has been kicked off.
#[derive(Debug, Clone, Copy)]
pub struct Mirror {
    pub link: ExternalLink,
    pub hint: &'static str,
    pub accent: Color32,
}

pub const MIRRORS: [Mirror; 2] = [
    Mirror {
        link: ExternalLink {
            label: "Google Drive",
            url: "https://drive.google.com/file/d/1hwK4AIj8nGnbVSCEkqfHtSgfoKi4JruY/view?usp=sharing",
        },
        hint: "Opción Segura",
        accent: Color32::from_rgb(0x1d, 0xa4, 0x62),
    },
    Mirror {
        link: ExternalLink {
            label: "MediaFire",
            url: "https://www.mediafire.com/file/jsx45xaafh3ja4i/aniting-v0.1.apk/file",
        },
        hint: "Opción Rápida",
        accent: Color32::from_rgb(0x00, 0x70, 0xf0),
    },
];

/// "Descarga Iniciada" dialog.
#[derive(Debug, Default)]
pub struct DownloadModal {
    open: bool,
}

impl DownloadModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Starts the direct APK download in the browser and shows the mirrors.
    pub fn start_download(&mut self) {
        info!(url = APK_DIRECT.url, "starting direct download");
        open_link(APK_DIRECT.url);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let screen = ctx.screen_rect();
        let backdrop = egui::Area::new("download_backdrop")
            .order(Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(screen, 0.0, with_alpha(Color32::BLACK, 0.8));
                response.clicked()
            })
            .inner;

        let mut close = backdrop;
        egui::Area::new("download_modal")
            .order(Order::Foreground)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(Color32::from_gray(17))
                    .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.1)))
                    .rounding(24.0)
                    .inner_margin(egui::Margin::same(28.0))
                    .show(ui, |ui| {
                        ui.set_width(380.0);
                        ui.horizontal(|ui| {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                                if ui.add(egui::Button::new(RichText::new("✕").size(16.0).color(GRAY_500)).frame(false)).clicked() {
                                    close = true;
                                }
                            });
                        });
                        ui.vertical_centered(|ui| {
                            let (badge, _) = ui.allocate_exact_size(Vec2::splat(64.0), Sense::hover());
                            ui.painter().circle_filled(badge.center(), 32.0, with_alpha(GREEN_400, 0.15));
                            ui.painter().text(badge.center(), Align2::CENTER_CENTER, "⬇", FontId::proportional(28.0), GREEN_400);
                            ui.add_space(12.0);
                            ui.label(RichText::new("Descarga Iniciada").size(24.0).strong().color(Color32::WHITE));
                            ui.add_space(6.0);
                            ui.label(
                                RichText::new(
                                    "La descarga debería haber comenzado automáticamente. Si no es así, \
                                     utiliza una de las siguientes opciones:",
                                )
                                .size(13.0)
                                .color(GRAY_400),
                            );
                            ui.add_space(18.0);
                            for mirror in &MIRRORS {
                                mirror_row(ui, mirror);
                                ui.add_space(10.0);
                            }
                        });
                    });
            });

        if close {
            self.close();
        }
    }
}

fn mirror_row(ui: &mut egui::Ui, mirror: &Mirror) {
    let size = Vec2::new(ui.available_width(), 56.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let fill = if response.hovered() { with_alpha(Color32::WHITE, 0.1) } else { with_alpha(Color32::WHITE, 0.05) };
    let painter = ui.painter();
    painter.rect(rect, 12.0, fill, Stroke::new(1.0, with_alpha(Color32::WHITE, 0.1)));
    painter.circle_filled(rect.left_center() + Vec2::new(28.0, 0.0), 14.0, with_alpha(mirror.accent, 0.2));
    painter.text(rect.left_center() + Vec2::new(28.0, 0.0), Align2::CENTER_CENTER, "⬇", FontId::proportional(14.0), mirror.accent);
    painter.text(rect.left_center() + Vec2::new(54.0, -8.0), Align2::LEFT_CENTER, mirror.link.label, FontId::proportional(15.0), Color32::WHITE);
    painter.text(rect.left_center() + Vec2::new(54.0, 10.0), Align2::LEFT_CENTER, mirror.hint, FontId::proportional(11.0), GRAY_500);
    painter.text(rect.right_center() - Vec2::new(16.0, 0.0), Align2::RIGHT_CENTER, "↗", FontId::proportional(14.0), GRAY_500);
    if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
        info!(mirror = mirror.link.label, "opening download mirror");
        open_link(mirror.link.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_until_download_starts() {
        let mut modal = DownloadModal::default();
        assert!(!modal.is_open());
        modal.open = true;
        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn mirrors_are_drive_then_mediafire() {
        let labels: Vec<&str> = MIRRORS.iter().map(|m| m.link.label).collect();
        assert_eq!(labels, ["Google Drive", "MediaFire"]);
        assert!(MIRRORS.iter().all(|m| m.link.url.starts_with("https://")));
    }
}

use eframe::egui::{self, Align2, Color32, FontId, Margin, Pos2, RichText, Sense, Stroke, Ui, Vec2};
use egui::text::{LayoutJob, TextFormat};
use egui_extras::{Column, TableBuilder};

use crate::models::{ExternalLink, DISCORD, VIRUSTOTAL_REPORT};
use crate::showcase::FRAME_SIZE;
use crate::ui_helpers::{
    disabled_pill, glass_frame, gradient_text, open_link, pill_button, section_title, with_alpha, BLUE_500,
    CYAN_400, DISCORD_BLURPLE, GRAY_400, GRAY_500, GRAY_700, GREEN_400, GREEN_500, INDIGO_400, INDIGO_500,
};

const MAX_WIDTH: f32 = 1152.0;
const SIDE_GUTTER: f32 = 24.0;
const TWO_COLUMN_MIN: f32 = 960.0;

const APK_SHA256: &str = "58101235ff3f9748cd1e7387b67056f93448b0e109c1c73f922bdc22d425ae32";
const APK_FILE: &str = "aniting-v0.1.apk";
const ENGINES_TOTAL: u32 = 66;
const VENDORS: [&str; 8] = ["Acronis", "Alibaba", "Avast", "AVG", "BitDefender", "Google", "Kaspersky", "Microsoft"];

/// Things the page asks the app to do after this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageActions {
    pub scroll_to_top: bool,
    pub start_download: bool,
}

struct Feature {
    glyph: &'static str,
    title: &'static str,
    desc: &'static str,
    // trailing link appended to the description
    link: Option<ExternalLink>,
}

const FEATURES: [Feature; 3] = [
    Feature {
        glyph: "🛡",
        title: "Sin Anuncios",
        desc: "Olvídate de los pop-ups molestos. Experiencia pura de principio a fin.",
        link: None,
    },
    Feature {
        glyph: "∞",
        title: "Catálogo Infinito",
        desc: "Encuentra una gran cantidad de títulos, seguramente el que buscas está aquí. También puedes pedirlo en ",
        link: Some(DISCORD),
    },
    Feature {
        glyph: "⚡",
        title: "Sincronización Anilist",
        desc: "Tu progreso se guarda automáticamente. Cambia de dispositivo sin perder el hilo.",
        link: None,
    },
];

/// Centers `add` in a column no wider than the page maximum.
fn page_column(ui: &mut Ui, add: impl FnOnce(&mut Ui)) {
    let available = ui.available_width();
    let width = (available - 2.0 * SIDE_GUTTER).clamp(0.0, MAX_WIDTH);
    let margin = ((available - width) * 0.5).max(0.0);
    ui.horizontal(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            add(ui);
        });
    });
}

fn wordmark(ui: &mut Ui, icon: &egui::TextureHandle, icon_size: f32, text_size: f32) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add(egui::Image::new(icon).fit_to_exact_size(Vec2::splat(icon_size)));
        ui.add(egui::Label::new(RichText::new("ANITING").size(text_size).strong().color(Color32::WHITE)).sense(Sense::click()))
    })
    .inner
}

pub fn nav_bar(ui: &mut Ui, icon: &egui::TextureHandle, actions: &mut PageActions) {
    page_column(ui, |ui| {
        ui.horizontal(|ui| {
            ui.set_height(64.0);
            let mark = wordmark(ui, icon, 32.0, 24.0).on_hover_cursor(egui::CursorIcon::PointingHand);
            if mark.clicked() {
                actions.scroll_to_top = true;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = 20.0;
                // GitHub and donations have no destination yet; both land on the top of the page.
                if ui.link(RichText::new("♥ Donar").color(CYAN_400)).on_hover_text("Donar").clicked() {
                    actions.scroll_to_top = true;
                }
                if ui.link(RichText::new("GitHub").color(GRAY_400)).on_hover_text("GitHub").clicked() {
                    actions.scroll_to_top = true;
                }
                if ui.link(RichText::new(DISCORD.label).color(GRAY_400)).on_hover_text(DISCORD.label).clicked() {
                    open_link(DISCORD.url);
                }
            });
        });
    });
}

/// Everything below the nav bar. `phone` draws the showcase in the hero's
/// right column.
pub fn page(ui: &mut Ui, icon: &egui::TextureHandle, actions: &mut PageActions, phone: impl FnOnce(&mut Ui)) {
    page_column(ui, |ui| {
        ui.add_space(48.0);
        hero(ui, actions, phone);
        ui.add_space(96.0);
        features(ui);
        ui.add_space(96.0);
        security(ui);
        ui.add_space(96.0);
    });
    footer(ui, icon);
}

fn hero(ui: &mut Ui, actions: &mut PageActions, phone: impl FnOnce(&mut Ui)) {
    if ui.available_width() >= TWO_COLUMN_MIN {
        ui.columns(2, |cols| {
            cols[0].add_space(80.0);
            hero_text(&mut cols[0], actions);
            cols[1].vertical_centered(|ui| phone_with_glow(ui, phone));
        });
    } else {
        hero_text(ui, actions);
        ui.add_space(48.0);
        ui.vertical_centered(|ui| phone_with_glow(ui, phone));
    }
}

fn phone_with_glow(ui: &mut Ui, phone: impl FnOnce(&mut Ui)) {
    let center = Pos2::new(ui.max_rect().center().x, ui.cursor().top() + FRAME_SIZE.y * 0.5);
    let painter = ui.painter();
    for step in 0..8 {
        let radius = 120.0 + step as f32 * 30.0;
        painter.circle_filled(center, radius, with_alpha(CYAN_400, 0.025));
    }
    phone(ui);
}

fn hero_text(ui: &mut Ui, actions: &mut PageActions) {
    egui::Frame::none()
        .fill(with_alpha(CYAN_400, 0.1))
        .stroke(Stroke::new(1.0, with_alpha(CYAN_400, 0.3)))
        .rounding(999.0)
        .inner_margin(Margin::symmetric(12.0, 4.0))
        .show(ui, |ui| {
            ui.label(RichText::new("Aniting App v0.1").size(13.0).color(CYAN_400));
        });
    ui.add_space(16.0);

    ui.label(RichText::new("ANIME").size(72.0).strong().color(Color32::WHITE));
    ui.label(gradient_text("SIN LÍMITES", FontId::proportional(72.0), &[CYAN_400, BLUE_500, INDIGO_500]));
    ui.add_space(24.0);

    let body = FontId::proportional(18.0);
    let mut pitch = LayoutJob::default();
    let plain = TextFormat { font_id: body.clone(), color: GRAY_400, ..Default::default() };
    let strong = TextFormat { font_id: body, color: Color32::WHITE, ..Default::default() };
    pitch.append(
        "La plataforma definitiva para streaming de anime en Android. HD, Dub, Sub y conexión directa con ",
        0.0,
        plain.clone(),
    );
    pitch.append("Anilist", 0.0, strong);
    pitch.append(". Sin anuncios, sin registros molestos, solo tú y tu serie favorita.", 0.0, plain);
    pitch.wrap.max_width = ui.available_width().min(560.0);
    ui.label(pitch);
    ui.add_space(32.0);

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(16.0, 16.0);
        let download = pill_button(ui, "📱 Descargar para Android", Vec2::new(260.0, 54.0), Color32::WHITE, Color32::BLACK);
        if download.clicked() {
            actions.start_download = true;
        }
        disabled_pill(ui, "🖥 PC", Vec2::new(110.0, 54.0), "Próximamente");
        disabled_pill(ui, "📺 TV", Vec2::new(110.0, 54.0), "Próximamente");
    });
    ui.add_space(24.0);

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(RichText::new("Nota: ").strong().color(CYAN_400));
        ui.label(
            RichText::new("La app está en sus primeros pasos. Si encuentras errores, por favor repórtalos en nuestro ")
                .color(GRAY_500),
        );
        if ui.link(RichText::new(DISCORD.label).color(INDIGO_400)).clicked() {
            open_link(DISCORD.url);
        }
        ui.label(RichText::new(".").color(GRAY_500));
    });
}

fn feature_card(ui: &mut Ui, feature: &Feature) {
    glass_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(feature.glyph).size(32.0).color(Color32::WHITE));
        ui.add_space(12.0);
        ui.label(RichText::new(feature.title).size(20.0).strong().color(Color32::WHITE));
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(RichText::new(feature.desc).color(GRAY_400));
            if let Some(link) = feature.link {
                if ui.link(RichText::new(link.label).color(INDIGO_400)).clicked() {
                    open_link(link.url);
                }
                ui.label(RichText::new(".").color(GRAY_400));
            }
        });
    });
}

fn features(ui: &mut Ui) {
    if ui.available_width() >= TWO_COLUMN_MIN {
        ui.columns(FEATURES.len(), |cols| {
            for (col, feature) in cols.iter_mut().zip(FEATURES.iter()) {
                feature_card(col, feature);
            }
        });
    } else {
        for feature in &FEATURES {
            feature_card(ui, feature);
            ui.add_space(16.0);
        }
    }
}

fn score_ring(ui: &mut Ui, detected: u32, total: u32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(80.0), Sense::hover());
    let painter = ui.painter();
    let center = rect.center();
    painter.circle_stroke(center, 34.0, Stroke::new(6.0, GRAY_700));
    if detected == 0 {
        painter.circle_stroke(center, 34.0, Stroke::new(6.0, GREEN_500));
    }
    painter.text(center - Vec2::new(0.0, 6.0), Align2::CENTER_CENTER, detected.to_string(), FontId::proportional(24.0), Color32::WHITE);
    painter.text(center + Vec2::new(0.0, 14.0), Align2::CENTER_CENTER, format!("/ {total}"), FontId::proportional(11.0), GRAY_500);
}

fn security(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        section_title(ui, "🛡", GREEN_500, "Seguridad Garantizada");
        ui.add_space(8.0);
        ui.label(
            RichText::new(
                "Tu seguridad es nuestra prioridad. Nuestra APK es analizada constantemente para garantizar que esté libre de amenazas.",
            )
            .color(GRAY_400),
        );
    });
    ui.add_space(40.0);

    egui::Frame::none()
        .fill(Color32::from_rgb(0x1e, 0x1e, 0x2f))
        .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.1)))
        .rounding(12.0)
        .inner_margin(Margin::same(24.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                score_ring(ui, 0, ENGINES_TOTAL);
                ui.add_space(16.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new("✔ No security vendors flagged this file as malicious").strong().color(GREEN_400));
                    ui.add_space(4.0);
                    ui.label(RichText::new(APK_SHA256).monospace().size(11.0).color(GRAY_500));
                    ui.label(RichText::new(APK_FILE).strong().size(16.0).color(Color32::WHITE));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new(RichText::new(format!("↗ {}", VIRUSTOTAL_REPORT.label)).strong().size(12.0).color(Color32::from_rgb(0xae, 0xb6, 0xff)))
                        .fill(Color32::from_rgb(0x2d, 0x2d, 0x45))
                        .rounding(4.0);
                    if ui.add(button).clicked() {
                        open_link(VIRUSTOTAL_REPORT.url);
                    }
                });
            });
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);
            vendor_table(ui);
            ui.add_space(12.0);

            egui::Frame::none()
                .fill(with_alpha(GREEN_500, 0.1))
                .rounding(6.0)
                .inner_margin(Margin::same(10.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("COMMUNITY SCORE: CLEAN").monospace().strong().color(GREEN_400));
                    });
                });
        });
}

fn vendor_table(ui: &mut Ui) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(110.0))
        .body(|mut body| {
            for pair in VENDORS.chunks(2) {
                body.row(30.0, |mut row| {
                    for vendor in pair {
                        row.col(|ui| {
                            ui.label(RichText::new(*vendor).color(Color32::from_gray(200)));
                        });
                        row.col(|ui| {
                            ui.label(RichText::new("✔ Undetected").size(12.0).color(GREEN_400));
                        });
                    }
                });
            }
        });
}

fn footer(ui: &mut Ui, icon: &egui::TextureHandle) {
    let top = ui.cursor().top();
    ui.painter().hline(ui.max_rect().x_range(), top, Stroke::new(1.0, with_alpha(Color32::WHITE, 0.1)));
    ui.add_space(48.0);

    page_column(ui, |ui| {
        let two_columns = ui.available_width() >= TWO_COLUMN_MIN;
        let left = |ui: &mut Ui| {
            wordmark(ui, icon, 24.0, 20.0);
            ui.add_space(12.0);
            ui.label(
                RichText::new("El proyecto perfecto para los amantes del anime. Sin interrupciones, máxima calidad.")
                    .color(GRAY_500),
            );
            ui.add_space(16.0);
            egui::Frame::none()
                .fill(with_alpha(Color32::WHITE, 0.05))
                .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.05)))
                .rounding(8.0)
                .inner_margin(Margin::same(16.0))
                .show(ui, |ui| {
                    ui.label(RichText::new("Renuncia de Responsabilidad:").size(12.0).strong().color(GRAY_400));
                    ui.label(
                        RichText::new(
                            "Aniting no almacena ni distribuye ningún archivo de video en sus servidores. \
                             La aplicación funciona exclusivamente como un índice de contenido disponible públicamente en internet. \
                             No utilizamos reproductores propios ni alojamos material con derechos de autor.",
                        )
                        .size(12.0)
                        .color(GRAY_500),
                    );
                });
        };
        let right = |ui: &mut Ui| {
            ui.label(RichText::new("Soporte & Comunidad").strong().size(18.0).color(Color32::WHITE));
            ui.add_space(8.0);
            ui.label(
                RichText::new(
                    "¿Tienes preguntas, dudas o recomendaciones? Únete a nuestro servidor de Discord para estar al tanto de las novedades y reportar errores.",
                )
                .color(GRAY_400),
            );
            ui.add_space(16.0);
            if pill_button(ui, "Unirse al Discord", Vec2::new(200.0, 46.0), DISCORD_BLURPLE, Color32::WHITE).clicked() {
                open_link(DISCORD.url);
            }
        };
        if two_columns {
            ui.columns(2, |cols| {
                left(&mut cols[0]);
                right(&mut cols[1]);
            });
        } else {
            left(ui);
            ui.add_space(32.0);
            right(ui);
        }
        ui.add_space(48.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("PROYECTO ANITING // HECHO POR UN ESTUDIANTE CON MUCHO TIEMPO LIBRE")
                    .monospace()
                    .size(11.0)
                    .color(with_alpha(GRAY_500, 0.7)),
            );
        });
        ui.add_space(32.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_cards_in_page_order() {
        let titles: Vec<&str> = FEATURES.iter().map(|f| f.title).collect();
        assert_eq!(titles, ["Sin Anuncios", "Catálogo Infinito", "Sincronización Anilist"]);
        assert_eq!(FEATURES[1].link, Some(DISCORD));
    }

    #[test]
    fn security_mockup_lists_eight_clean_vendors() {
        assert_eq!(VENDORS.len(), 8);
        assert_eq!(APK_SHA256.len(), 64);
        assert!(APK_SHA256.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(VIRUSTOTAL_REPORT.url.contains(APK_SHA256));
    }
}

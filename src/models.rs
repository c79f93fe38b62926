use aniting_core::query::ANILIST_ENDPOINT;

pub const DEFAULT_FONT_SCALE: f32 = 1.0;
pub const DEFAULT_COVER_PARALLEL: u32 = 6;
pub const DEFAULT_UPLOADS_PER_FRAME: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub font_scale: f32,
    pub cover_parallel: u32,          // concurrent cover downloads
    pub cover_uploads_per_frame: u32, // texture uploads per frame
    pub reduce_motion: bool,          // freezes the showcase auto-scroll
    pub log_level: String,            // tracing filter, RUST_LOG wins
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: ANILIST_ENDPOINT.to_string(),
            font_scale: DEFAULT_FONT_SCALE,
            cover_parallel: DEFAULT_COVER_PARALLEL,
            cover_uploads_per_frame: DEFAULT_UPLOADS_PER_FRAME,
            reduce_motion: false,
            log_level: "info".to_string(),
        }
    }
}

/// A link on the page, opened in the system browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const DISCORD: ExternalLink = ExternalLink {
    label: "Discord",
    url: "https://discord.gg/3fAyERkNwn",
};

pub const APK_DIRECT: ExternalLink = ExternalLink {
    label: "aniting-v0.1.apk",
    url: "https://anime-app.nyc3.cdn.digitaloceanspaces.com/aniting-v0.1.apk",
};

pub const VIRUSTOTAL_REPORT: ExternalLink = ExternalLink {
    label: "Ver Análisis",
    url: "https://www.virustotal.com/gui/file/58101235ff3f9748cd1e7387b67056f93448b0e109c1c73f922bdc22d425ae32/detection",
};

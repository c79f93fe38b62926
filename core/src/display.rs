//! Formatting rules shared by every place a media summary is drawn.

use crate::models::MediaSummary;

pub const MISSING_SCORE: &str = "N/A";

/// Score badge text: the 0–100 average as a 0–10 value with one decimal.
pub fn score_badge(average_score: Option<u8>) -> String {
    match average_score {
        Some(score) => format!("{:.1}", f32::from(score) / 10.0),
        None => MISSING_SCORE.to_string(),
    }
}

/// Removes anything between `<` and `>`, the way AniList descriptions carry
/// `<br>` and `<i>` markup. A `<` that is never closed is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tag: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (c, tag) {
            ('<', None) => tag = Some(i),
            ('>', Some(_)) => tag = None,
            (_, Some(_)) => {}
            (c, None) => out.push(c),
        }
    }
    if let Some(start) = tag {
        out.push_str(&text[start..]);
    }
    out
}

/// Cuts `text` to at most `max_chars` characters, ending with an ellipsis
/// when anything was removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

fn non_empty(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|s| !s.trim().is_empty())
}

/// Hero backdrop: the extra-large cover, else the banner.
pub fn hero_image_url(hero: Option<&MediaSummary>) -> Option<&str> {
    let hero = hero?;
    non_empty(&hero.cover_image.extra_large).or_else(|| non_empty(&hero.banner_image))
}

pub fn tile_image_url(media: &MediaSummary) -> Option<&str> {
    non_empty(&media.cover_image.large)
}

/// Hero blurb as one paragraph: markup removed, whitespace runs folded.
pub fn hero_description(hero: Option<&MediaSummary>) -> String {
    hero.and_then(|h| h.description.as_deref())
        .map(|d| strip_markup(d).split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Title used on tiles and the hero lettering.
pub fn display_title(media: &MediaSummary) -> &str {
    if !media.title.romaji.is_empty() {
        media.title.romaji.as_str()
    } else {
        media.title.english.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoverImage, MediaTitle};

    #[test]
    fn score_badge_scales_to_ten() {
        assert_eq!(score_badge(Some(87)), "8.7");
        assert_eq!(score_badge(Some(100)), "10.0");
        assert_eq!(score_badge(Some(5)), "0.5");
        assert_eq!(score_badge(None), "N/A");
    }

    #[test]
    fn markup_is_stripped() {
        assert_eq!(
            strip_markup("Aqua <i>(voiced by x)</i><br><br>\nRuby"),
            "Aqua (voiced by x)\nRuby"
        );
        assert_eq!(strip_markup("plain"), "plain");
        assert_eq!(strip_markup("a > b"), "a > b");
        assert_eq!(strip_markup("cut <b"), "cut <b");
    }

    #[test]
    fn bare_angle_bracket_is_kept() {
        assert_eq!(
            strip_markup("I <3 this show. Season 2 soon"),
            "I <3 this show. Season 2 soon"
        );
        assert_eq!(strip_markup("a<br>b <3"), "ab <3");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("Shingeki", 20), "Shingeki");
        assert_eq!(truncate_chars("Kaguya-sama wa Kokurasetai", 10), "Kaguya-sa…");
        assert_eq!(truncate_chars("ドラゴンボール", 4), "ドラゴ…");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn hero_image_falls_back_to_banner() {
        let mut hero = MediaSummary {
            cover_image: CoverImage { large: Some("l".into()), extra_large: Some("xl".into()) },
            banner_image: Some("banner".into()),
            ..Default::default()
        };
        assert_eq!(hero_image_url(Some(&hero)), Some("xl"));
        hero.cover_image.extra_large = Some(String::new());
        assert_eq!(hero_image_url(Some(&hero)), Some("banner"));
        hero.cover_image.extra_large = None;
        hero.banner_image = None;
        assert_eq!(hero_image_url(Some(&hero)), None);
        assert_eq!(hero_image_url(None), None);
    }

    #[test]
    fn missing_hero_has_no_description() {
        assert_eq!(hero_description(None), "");
    }

    #[test]
    fn hero_description_is_one_paragraph() {
        let hero = MediaSummary {
            description: Some("First line.<br>\n<br>\nSecond  line.\n".into()),
            ..Default::default()
        };
        assert_eq!(hero_description(Some(&hero)), "First line. Second line.");
    }

    #[test]
    fn english_title_is_the_fallback() {
        let mut media = MediaSummary {
            title: MediaTitle { romaji: "Oshi no Ko".into(), english: Some("My Star".into()) },
            ..Default::default()
        };
        assert_eq!(display_title(&media), "Oshi no Ko");
        media.title.romaji.clear();
        assert_eq!(display_title(&media), "My Star");
    }
}

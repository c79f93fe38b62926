use std::fmt::Write as _;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::CategoryKind;

pub const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";
pub const HERO_SEARCH: &str = "Oshi no Ko";
pub const PAGE_SIZE: usize = 8;

const MEDIA_FIELDS: &str = "fragment MediaFields on Media {
    id
    title {
        romaji
        english
    }
    coverImage {
        large
        extraLarge
    }
    bannerImage
    averageScore
    description
    genres
    status
}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSort {
    Trending,
    Popularity,
}

impl ListingSort {
    fn as_graphql(&self) -> &'static str {
        match self {
            ListingSort::Trending => "TRENDING_DESC",
            ListingSort::Popularity => "POPULARITY_DESC",
        }
    }
}

/// One named result set of the composite query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultChannel {
    Hero { search: &'static str },
    Listing {
        category: CategoryKind,
        sort: ListingSort,
        genre: Option<&'static str>,
    },
}

impl ResultChannel {
    pub fn alias(&self) -> &'static str {
        match self {
            ResultChannel::Hero { .. } => "hero",
            ResultChannel::Listing { category, .. } => category.key(),
        }
    }

    fn write_selection(&self, out: &mut String) {
        match self {
            ResultChannel::Hero { search } => {
                let _ = writeln!(out, "    hero: Media(search: {:?}, type: ANIME) {{", search);
                out.push_str("        ...MediaFields\n    }\n");
            }
            ResultChannel::Listing { category, sort, genre } => {
                let _ = writeln!(out, "    {}: Page(page: 1, perPage: {}) {{", category.key(), PAGE_SIZE);
                out.push_str("        media(");
                if let Some(genre) = genre {
                    let _ = write!(out, "genre: {:?}, ", genre);
                }
                let _ = writeln!(out, "sort: {}, type: ANIME, isAdult: false) {{", sort.as_graphql());
                out.push_str("            ...MediaFields\n        }\n    }\n");
            }
        }
    }
}

pub fn listing_for(category: CategoryKind) -> ResultChannel {
    let (sort, genre) = match category {
        CategoryKind::Trending => (ListingSort::Trending, None),
        CategoryKind::Popular => (ListingSort::Popularity, None),
        CategoryKind::Action => (ListingSort::Popularity, Some("Action")),
        CategoryKind::Romance => (ListingSort::Popularity, Some("Romance")),
        CategoryKind::Fantasy => (ListingSort::Popularity, Some("Fantasy")),
        CategoryKind::SciFi => (ListingSort::Popularity, Some("Sci-Fi")),
    };
    ResultChannel::Listing { category, sort, genre }
}

/// The seven result sets requested in one round trip: the hero lookup first,
/// then one listing per category in display order.
pub static SHOWCASE_CHANNELS: Lazy<Vec<ResultChannel>> = Lazy::new(|| {
    std::iter::once(ResultChannel::Hero { search: HERO_SEARCH })
        .chain(CategoryKind::ALL.into_iter().map(listing_for))
        .collect()
});

static SHOWCASE_QUERY: Lazy<String> = Lazy::new(|| render_query(&SHOWCASE_CHANNELS));

pub fn render_query(channels: &[ResultChannel]) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(MEDIA_FIELDS);
    out.push_str("\n\nquery {\n");
    for channel in channels {
        channel.write_selection(&mut out);
    }
    out.push('}');
    out
}

/// Body of the single POST sent to the catalog endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ShowcaseQuery {
    pub query: &'static str,
}

impl Default for ShowcaseQuery {
    fn default() -> Self {
        Self { query: SHOWCASE_QUERY.as_str() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hero_and_six_listings() {
        let aliases: Vec<&str> = SHOWCASE_CHANNELS.iter().map(|c| c.alias()).collect();
        assert_eq!(aliases, ["hero", "trending", "popular", "action", "romance", "fantasy", "sciFi"]);
    }

    #[test]
    fn every_selection_uses_the_shared_fragment() {
        let q = ShowcaseQuery::default().query;
        assert!(q.starts_with("fragment MediaFields on Media {"));
        assert_eq!(q.matches("...MediaFields").count(), 7);
        assert_eq!(q.matches("perPage: 8").count(), 6);
        assert_eq!(q.matches("isAdult: false").count(), 6);
    }

    #[test]
    fn listing_filters() {
        let q = ShowcaseQuery::default().query;
        assert!(q.contains(r#"hero: Media(search: "Oshi no Ko", type: ANIME)"#));
        assert!(q.contains("media(sort: TRENDING_DESC, type: ANIME, isAdult: false)"));
        assert!(q.contains("media(sort: POPULARITY_DESC, type: ANIME, isAdult: false)"));
        assert!(q.contains(r#"sciFi: Page(page: 1, perPage: 8)"#));
        assert!(q.contains(r#"media(genre: "Sci-Fi", sort: POPULARITY_DESC, type: ANIME, isAdult: false)"#));
        for genre in ["Action", "Romance", "Fantasy"] {
            assert!(q.contains(&format!("genre: \"{genre}\"")), "missing {genre}");
        }
    }

    #[test]
    fn body_is_a_single_query_field() {
        let body = serde_json::to_value(ShowcaseQuery::default()).unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj["query"].as_str().unwrap().contains("query {"));
    }
}

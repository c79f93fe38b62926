use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTitle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub romaji: String,
    #[serde(default)]
    pub english: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
    #[serde(other)]
    Unknown,
}

/// One title as returned by the `MediaFields` fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: MediaTitle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_image: CoverImage,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub average_score: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: Option<MediaStatus>,
}

/// The six listing rows of the showcase, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Trending,
    Popular,
    Action,
    Romance,
    Fantasy,
    SciFi,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 6] = [
        CategoryKind::Trending,
        CategoryKind::Popular,
        CategoryKind::Action,
        CategoryKind::Romance,
        CategoryKind::Fantasy,
        CategoryKind::SciFi,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CategoryKind::Trending => "Tendencias",
            CategoryKind::Popular => "Más Populares",
            CategoryKind::Action => "Acción",
            CategoryKind::Romance => "Romance",
            CategoryKind::Fantasy => "Fantasía",
            CategoryKind::SciFi => "Ciencia Ficción",
        }
    }

    /// Alias of the result set in the composite query and its response.
    pub fn key(&self) -> &'static str {
        match self {
            CategoryKind::Trending => "trending",
            CategoryKind::Popular => "popular",
            CategoryKind::Action => "action",
            CategoryKind::Romance => "romance",
            CategoryKind::Fantasy => "fantasy",
            CategoryKind::SciFi => "sciFi",
        }
    }
}

/// Everything the showcase displays, filled from one composite response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowcaseViewModel {
    pub hero: Option<MediaSummary>,
    pub trending: Vec<MediaSummary>,
    pub popular: Vec<MediaSummary>,
    pub action: Vec<MediaSummary>,
    pub romance: Vec<MediaSummary>,
    pub fantasy: Vec<MediaSummary>,
    pub sci_fi: Vec<MediaSummary>,
}

impl ShowcaseViewModel {
    pub fn items(&self, kind: CategoryKind) -> &[MediaSummary] {
        match kind {
            CategoryKind::Trending => &self.trending,
            CategoryKind::Popular => &self.popular,
            CategoryKind::Action => &self.action,
            CategoryKind::Romance => &self.romance,
            CategoryKind::Fantasy => &self.fantasy,
            CategoryKind::SciFi => &self.sci_fi,
        }
    }

    /// Rows in display order. Empty rows are kept so their headers still render.
    pub fn categories(&self) -> impl Iterator<Item = (CategoryKind, &[MediaSummary])> + '_ {
        CategoryKind::ALL.into_iter().map(move |kind| (kind, self.items(kind)))
    }

    pub fn is_empty(&self) -> bool {
        self.hero.is_none() && self.categories().all(|(_, items)| items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_containers_decode_to_defaults() {
        let json = r#"{
            "id": 7,
            "title": null,
            "coverImage": null,
            "bannerImage": null,
            "averageScore": null,
            "description": null,
            "genres": null,
            "status": null
        }"#;
        let media: MediaSummary = serde_json::from_str(json).unwrap();
        assert_eq!(media.id, 7);
        assert_eq!(media.title, MediaTitle::default());
        assert_eq!(media.cover_image, CoverImage::default());
        assert!(media.genres.is_empty());
        assert_eq!(media.status, None);
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let media: MediaSummary =
            serde_json::from_str(r#"{"id": 1, "status": "SOMETHING_NEW"}"#).unwrap();
        assert_eq!(media.status, Some(MediaStatus::Unknown));

        let media: MediaSummary =
            serde_json::from_str(r#"{"id": 1, "status": "NOT_YET_RELEASED"}"#).unwrap();
        assert_eq!(media.status, Some(MediaStatus::NotYetReleased));
    }

    #[test]
    fn categories_keep_fixed_order_even_when_empty() {
        let vm = ShowcaseViewModel::default();
        let titles: Vec<&str> = vm.categories().map(|(kind, _)| kind.title()).collect();
        assert_eq!(
            titles,
            ["Tendencias", "Más Populares", "Acción", "Romance", "Fantasía", "Ciencia Ficción"]
        );
        assert!(vm.categories().all(|(_, items)| items.is_empty()));
        assert!(vm.is_empty());
    }
}

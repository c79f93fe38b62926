use aniting_core::ShowcaseViewModel;

/// Results delivered from background tasks to the UI thread.
#[derive(Debug, Clone)]
pub enum Msg {
    // The single catalog round trip settled (possibly to the empty model).
    CatalogSettled(ShowcaseViewModel),

    // Cover pipeline
    CoverDecoded {
        url: String,
        rgba: Vec<u8>,
        w: u32,
        h: u32,
    },
    CoverFailed {
        url: String,
        error: String,
    },
}

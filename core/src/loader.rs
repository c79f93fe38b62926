use futures::future::{AbortHandle, Abortable, Aborted};
use tracing::debug;

use crate::api::CatalogClient;
use crate::models::ShowcaseViewModel;

/// Owns the in-flight catalog request of one showcase mount. Dropping it
/// cancels the request, so nothing is delivered after teardown.
#[derive(Debug)]
pub struct FetchHandle {
    abort: AbortHandle,
}

impl FetchHandle {
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Spawns the single catalog round trip on the current Tokio runtime.
/// `on_settled` runs once with the (possibly empty) view-model, unless the
/// handle is dropped first.
pub fn spawn_catalog_fetch<F>(client: CatalogClient, on_settled: F) -> FetchHandle
where
    F: FnOnce(ShowcaseViewModel) + Send + 'static,
{
    let (abort, registration) = AbortHandle::new_pair();
    let fetch = Abortable::new(async move { client.fetch_catalog().await }, registration);
    tokio::spawn(async move {
        match fetch.await {
            Ok(view) => on_settled(view),
            Err(Aborted) => debug!("catalog fetch cancelled before it settled"),
        }
    });
    FetchHandle { abort }
}

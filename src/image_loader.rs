//! Image Load Coordinator
//!
//! Per-consumer cache-check, download, write-back pipeline for thumbnail
//! images. Each coordinator instance owns one single-flight slot, so a
//! consuming cell has at most one outstanding image request; a new request
//! supersedes the previous one. Failures never propagate past this module:
//! the caller either gets bytes or nothing.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::tasks::SingleFlight;
use crate::transport::DownloadService;

// == Coordinator ==
/// Loads image bytes through the shared cache, downloading on miss.
///
/// Cheap to clone; clones share the same slot and therefore the same
/// single-flight behavior.
#[derive(Clone)]
pub struct ImageLoadCoordinator {
    cache: SharedCache,
    downloader: Arc<dyn DownloadService>,
    flight: Arc<SingleFlight>,
}

impl ImageLoadCoordinator {
    // == Constructor ==
    /// Creates a coordinator over a shared cache and a download transport.
    pub fn new(cache: SharedCache, downloader: Arc<dyn DownloadService>) -> Self {
        Self {
            cache,
            downloader,
            flight: Arc::new(SingleFlight::new()),
        }
    }

    // == Load Image ==
    /// Returns the image bytes for `url`, consulting the cache first.
    ///
    /// On a miss the bytes are downloaded and written through to the cache;
    /// a rejected write-back is logged and ignored so the caller can still
    /// display the image once. Returns `None` on download failure, empty
    /// payload, or when superseded by a newer call on this coordinator.
    pub async fn load_image(&self, url: &str) -> Option<Bytes> {
        {
            let mut cache = self.cache.write().await;
            if let Ok(data) = cache.get(url) {
                return Some(data);
            }
        }

        let ticket = self.flight.begin();
        let cache = Arc::clone(&self.cache);
        let downloader = Arc::clone(&self.downloader);
        let flight = Arc::clone(&self.flight);
        let target = url.to_string();

        let task = tokio::spawn(async move {
            if !flight.is_live(ticket) {
                return None;
            }

            let data = match downloader.download(&target).await {
                Ok(data) => data,
                Err(err) => {
                    debug!(error = %err, url = %target, "image download failed");
                    return None;
                }
            };

            // Re-checked after the transport call: a superseded load must
            // neither write the cache nor hand back its payload.
            if !flight.is_live(ticket) {
                return None;
            }
            if data.is_empty() {
                debug!(url = %target, "empty image payload discarded");
                return None;
            }

            if let Err(err) = cache.write().await.put(&target, data.clone()) {
                warn!(error = %err, url = %target, "image cache write rejected");
            }

            Some(data)
        });
        self.flight.track(ticket, task.abort_handle());

        match task.await {
            Ok(result) => result,
            // Aborted by a newer request on this coordinator.
            Err(_) => None,
        }
    }

    // == Cancel ==
    /// Aborts any in-flight image load owned by this coordinator.
    pub fn cancel(&self) {
        self.flight.cancel();
    }
}

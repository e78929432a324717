use std::sync::Arc;

use laptop_store::StoreError;
use metrics::counter;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::{debug, error, info, warn};

use super::{
    convert,
    proto::{SearchLaptopRequest, SearchLaptopResponse},
    LaptopServiceImpl,
};

/// Stream every stored laptop that matches the request filter.
///
/// The store scan runs on the blocking pool and pushes matches into a
/// bounded channel, so a slow client stalls the scan instead of buffering
/// the whole result set. Once the client goes away the next send fails,
/// the scan stops and the store lock is released. Dropping the sender ends
/// the stream.
pub async fn search_laptop(
    service: &LaptopServiceImpl,
    request: Request<SearchLaptopRequest>,
) -> Result<
    Response<
        std::pin::Pin<
            Box<dyn futures::Stream<Item = Result<SearchLaptopResponse, Status>> + Send + 'static>,
        >,
    >,
    Status,
> {
    let filter = convert::filter_from_proto(request.into_inner().filter)?;

    info!(?filter, "Received search-laptop request");
    counter!("catalog_search_requests_total").increment(1);

    let (tx, rx) = mpsc::channel(service.state.config.search.stream_buffer);
    let store = Arc::clone(&service.state.store);

    tokio::task::spawn_blocking(move || {
        let mut matches = 0u64;

        let result = store.search(&filter, &mut |laptop| {
            debug!(id = %laptop.id, "Found laptop matching filter");

            let response = SearchLaptopResponse {
                laptop: Some(convert::laptop_to_proto(laptop)),
            };
            tx.blocking_send(Ok(response))
                .map_err(|_| StoreError::Aborted("client stopped receiving".to_string()))?;

            matches += 1;
            Ok(())
        });

        counter!("catalog_search_matches_total").increment(matches);

        match result {
            Ok(()) => info!(matches, "Search completed"),
            Err(StoreError::Aborted(reason)) => warn!(matches, %reason, "Search aborted"),
            Err(e) => {
                error!(error = %e, "Search failed");
                // Receiver may already be gone
                let _ = tx.blocking_send(Err(Status::internal(format!("Search failed: {}", e))));
            }
        }
    });

    Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
}

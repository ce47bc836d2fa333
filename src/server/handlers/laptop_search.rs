use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tonic::{Response, Status};
use tracing::{debug, info, warn, Span};

use crate::laptop::{LaptopStore, StoreError};
use crate::metrics::OperationTimer;
use crate::pb::{Filter, SearchLaptopRequest, SearchLaptopResponse};
use crate::server::error_mapping::ToStatus;

pub type SearchLaptopStream =
    Pin<Box<dyn Stream<Item = Result<SearchLaptopResponse, Status>> + Send + 'static>>;

type SearchSender = mpsc::Sender<Result<SearchLaptopResponse, Status>>;

/// Stream every laptop matching the request filter.
///
/// The scan runs on a blocking task and hands matches to the client through a
/// channel holding at most `buffer` responses. When the client goes away the
/// next send fails and the scan stops.
pub fn search_laptop(
    store: Arc<dyn LaptopStore>,
    req: SearchLaptopRequest,
    buffer: usize,
) -> Result<Response<SearchLaptopStream>, Status> {
    let filter = req.filter.unwrap_or_default();
    info!(?filter, "receive a search-laptop request");

    let (tx, rx) = mpsc::channel(buffer.max(1));
    let span = Span::current();
    tokio::task::spawn_blocking(move || {
        span.in_scope(|| run_search(store.as_ref(), &filter, &tx));
    });

    Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
}

/// Run the scan to completion and return how long it took, including the
/// time spent waiting for the client to make room in the channel.
fn run_search(store: &dyn LaptopStore, filter: &Filter, tx: &SearchSender) -> Duration {
    let timer = OperationTimer::new("search_laptop_scan");
    let mut sent: usize = 0;
    let result = store.search(filter, &mut |laptop| {
        let id = laptop.id.clone();
        tx.blocking_send(Ok(SearchLaptopResponse {
            laptop: Some(laptop),
        }))
        .map_err(|_| StoreError::cancelled("client stopped receiving"))?;
        debug!(id = %id, "sent laptop");
        sent = sent.saturating_add(1);
        Ok(())
    });

    match result {
        Ok(()) => info!(count = sent, "search-laptop finished"),
        Err(StoreError::Cancelled(reason)) => {
            info!(count = sent, %reason, "search-laptop stopped early");
        }
        Err(e) => {
            warn!(count = sent, code = e.error_code(), "search-laptop failed: {e}");
            if tx.blocking_send(Err(e.to_status("cannot search laptops"))).is_err() {
                debug!("client went away before the search error was delivered");
            }
        }
    }

    timer.elapsed()
}

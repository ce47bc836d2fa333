//! gRPC server for the laptop service.

pub mod error_mapping;
pub mod handlers;
mod trait_impl;

use std::sync::Arc;

use crate::laptop::{InMemoryLaptopStore, LaptopStore};
use crate::pb::LaptopServiceServer;
use crate::user_config::SearchConfig;

pub struct LaptopDaemonService {
    store: Arc<dyn LaptopStore>,
    search_buffer: usize,
}

impl LaptopDaemonService {
    #[must_use]
    pub fn new(store: Arc<dyn LaptopStore>, search: &SearchConfig) -> Self {
        Self {
            store,
            search_buffer: search.effective_stream_buffer(),
        }
    }

    /// Service backed by a fresh [`InMemoryLaptopStore`].
    #[must_use]
    pub fn in_memory(search: &SearchConfig) -> Self {
        Self::new(Arc::new(InMemoryLaptopStore::new()), search)
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn LaptopStore> {
        Arc::clone(&self.store)
    }

    /// Wrap the service in the generated tonic server.
    #[must_use]
    pub fn into_server(self) -> LaptopServiceServer<Self> {
        LaptopServiceServer::new(self)
    }
}

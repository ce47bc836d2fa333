use crate::metrics::{generate_request_id, OperationTimer};
use tokio::task::spawn_blocking;
use tonic::{Request, Response, Status};
use tracing::{instrument, Span};

use super::handlers;
use super::handlers::laptop_search::SearchLaptopStream;
use super::LaptopDaemonService;
use crate::pb::{
    CreateLaptopRequest, CreateLaptopResponse, FindLaptopRequest, FindLaptopResponse,
    LaptopService, SearchLaptopRequest,
};

#[tonic::async_trait]
impl LaptopService for LaptopDaemonService {
    #[instrument(
        name = "grpc.create_laptop",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn create_laptop(
        &self,
        request: Request<CreateLaptopRequest>,
    ) -> Result<Response<CreateLaptopResponse>, Status> {
        let _timer = OperationTimer::new("create_laptop");
        let store = self.store();
        let req = request.into_inner();
        let span = Span::current();
        spawn_blocking(move || {
            span.in_scope(|| handlers::laptop_create::create_laptop(store.as_ref(), req))
        })
        .await
        .map_err(|e| Status::internal(format!("create-laptop task failed: {e}")))?
    }

    #[instrument(
        name = "grpc.find_laptop",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn find_laptop(
        &self,
        request: Request<FindLaptopRequest>,
    ) -> Result<Response<FindLaptopResponse>, Status> {
        let _timer = OperationTimer::new("find_laptop");
        let store = self.store();
        let req = request.into_inner();
        let span = Span::current();
        spawn_blocking(move || {
            span.in_scope(|| handlers::laptop_find::find_laptop(store.as_ref(), req))
        })
        .await
        .map_err(|e| Status::internal(format!("find-laptop task failed: {e}")))?
    }

    type SearchLaptopStream = SearchLaptopStream;

    #[instrument(
        name = "grpc.search_laptop",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn search_laptop(
        &self,
        request: Request<SearchLaptopRequest>,
    ) -> Result<Response<Self::SearchLaptopStream>, Status> {
        handlers::laptop_search::search_laptop(
            self.store(),
            request.into_inner(),
            self.search_buffer,
        )
    }
}

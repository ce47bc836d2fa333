use tonic::{Response, Status};
use tracing::debug;

use crate::laptop::LaptopStore;
use crate::pb::{FindLaptopRequest, FindLaptopResponse};
use crate::server::error_mapping::ToStatus;

/// Look up a laptop by id. An unknown id yields an empty response rather than
/// an error.
pub fn find_laptop(
    store: &dyn LaptopStore,
    req: FindLaptopRequest,
) -> Result<Response<FindLaptopResponse>, Status> {
    if req.id.is_empty() {
        return Err(Status::invalid_argument("laptop ID is required"));
    }

    let laptop = store
        .find(&req.id)
        .map_err(|e| e.to_status("cannot find laptop in the store"))?;
    debug!(id = %req.id, found = laptop.is_some(), "find laptop");

    Ok(Response::new(FindLaptopResponse { laptop }))
}

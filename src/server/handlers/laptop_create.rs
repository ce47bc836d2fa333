use rand::rngs::OsRng;
use rand::RngCore;
use tonic::{Response, Status};
use tracing::{info, warn};
use uuid::{Builder, Uuid};

use crate::laptop::LaptopStore;
use crate::pb::{CreateLaptopRequest, CreateLaptopResponse};
use crate::server::error_mapping::ToStatus;

pub fn create_laptop(
    store: &dyn LaptopStore,
    req: CreateLaptopRequest,
) -> Result<Response<CreateLaptopResponse>, Status> {
    create_laptop_with_rng(store, req, &mut OsRng)
}

fn create_laptop_with_rng<R: RngCore + ?Sized>(
    store: &dyn LaptopStore,
    req: CreateLaptopRequest,
    rng: &mut R,
) -> Result<Response<CreateLaptopResponse>, Status> {
    let Some(mut laptop) = req.laptop else {
        return Err(Status::invalid_argument("laptop is required"));
    };
    info!(id = %laptop.id, "receive a create-laptop request");

    laptop.id = resolve_laptop_id(&laptop.id, rng)?;

    if let Err(e) = store.save(&laptop) {
        warn!(id = %laptop.id, code = e.error_code(), "cannot save laptop: {e}");
        return Err(e.to_status("cannot save laptop to the store"));
    }
    info!(id = %laptop.id, "saved laptop");

    Ok(Response::new(CreateLaptopResponse { id: laptop.id }))
}

/// Keep a client-supplied id if it is a well-formed UUID, or generate a new
/// random (v4) one from `rng` when the id is empty.
fn resolve_laptop_id<R: RngCore + ?Sized>(id: &str, rng: &mut R) -> Result<String, Status> {
    if id.is_empty() {
        let mut bytes = [0u8; 16];
        rng.try_fill_bytes(&mut bytes).map_err(|e| {
            warn!("cannot read random bytes for a laptop ID: {e}");
            Status::internal(format!("cannot generate a new laptop ID: {e}"))
        })?;
        return Ok(Builder::from_random_bytes(bytes).into_uuid().to_string());
    }

    Uuid::parse_str(id)
        .map(|_| id.to_string())
        .map_err(|e| Status::invalid_argument(format!("laptop ID is not a valid UUID: {e}")))
}

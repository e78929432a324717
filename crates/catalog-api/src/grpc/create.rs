use std::sync::Arc;

use laptop_store::StoreError;
use metrics::counter;
use tonic::{Request, Response, Status};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    convert,
    proto::{CreateLaptopRequest, CreateLaptopResponse},
    LaptopServiceImpl,
};

pub async fn create_laptop(
    service: &LaptopServiceImpl,
    request: Request<CreateLaptopRequest>,
) -> Result<Response<CreateLaptopResponse>, Status> {
    let req = request.into_inner();

    let Some(laptop) = req.laptop else {
        warn!("Rejected create-laptop request without a laptop");
        counter!("catalog_laptops_created_total", "status" => "invalid").increment(1);
        return Err(Status::invalid_argument("Laptop is required"));
    };

    info!(id = %laptop.id, "Received create-laptop request");

    let mut laptop = convert::laptop_from_proto(laptop).inspect_err(|_| {
        counter!("catalog_laptops_created_total", "status" => "invalid").increment(1);
    })?;

    if laptop.id.is_empty() {
        laptop.id = Uuid::new_v4().to_string();
    } else if let Err(e) = Uuid::parse_str(&laptop.id) {
        warn!(id = %laptop.id, "Rejected malformed laptop ID");
        counter!("catalog_laptops_created_total", "status" => "invalid").increment(1);
        return Err(Status::invalid_argument(format!(
            "Laptop ID is not a valid UUID: {}",
            e
        )));
    }

    // Saving may wait on the store lock held by a streaming search
    let store = Arc::clone(&service.state.store);
    let result = tokio::task::spawn_blocking(move || store.save(&laptop))
        .await
        .map_err(|e| Status::internal(format!("Save task failed: {}", e)))?;

    match result {
        Ok(id) => {
            info!(%id, "Saved laptop");
            counter!("catalog_laptops_created_total", "status" => "ok").increment(1);
            Ok(Response::new(CreateLaptopResponse { id }))
        }
        Err(StoreError::AlreadyExists(id)) => {
            warn!(%id, "Laptop already exists");
            counter!("catalog_laptops_created_total", "status" => "exists").increment(1);
            Err(Status::already_exists(format!(
                "Laptop with ID {} already exists",
                id
            )))
        }
        Err(e) => {
            error!(error = %e, "Cannot save laptop to the store");
            counter!("catalog_laptops_created_total", "status" => "error").increment(1);
            Err(Status::internal(format!(
                "Cannot save laptop to the store: {}",
                e
            )))
        }
    }
}

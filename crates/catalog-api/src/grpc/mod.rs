//! gRPC service implementation
//!
//! Server and client for the laptop catalog API.
//!
//! # Client Usage
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use catalog_api::grpc::LaptopServiceClient;
//! use catalog_api::grpc::proto::{Filter, SearchLaptopRequest};
//! use futures::StreamExt;
//!
//! let mut client = LaptopServiceClient::connect("http://localhost:8080").await?;
//!
//! let request = SearchLaptopRequest {
//!     filter: Some(Filter {
//!         max_price_usd: 2000.0,
//!         min_cpu_cores: 4,
//!         ..Default::default()
//!     }),
//! };
//!
//! // Search is server-streaming: one response per matching laptop
//! let mut stream = client.search_laptop(request).await?.into_inner();
//! while let Some(response) = stream.next().await {
//!     let laptop = response?.laptop;
//!     println!("Found: {:?}", laptop.map(|l| l.id));
//! }
//! # Ok(())
//! # }
//! ```

use tonic::{Request, Response, Status};

use crate::AppState;

// Include generated proto code
pub mod proto {
    tonic::include_proto!("catalog.v1");
}

pub mod convert;
mod create;
mod search;

pub use proto::laptop_service_client::LaptopServiceClient;
pub use proto::laptop_service_server::LaptopServiceServer;
use proto::{
    laptop_service_server::LaptopService, CreateLaptopRequest, CreateLaptopResponse,
    SearchLaptopRequest, SearchLaptopResponse,
};

pub struct LaptopServiceImpl {
    state: AppState,
}

impl LaptopServiceImpl {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Wrap in the generated tonic server
    pub fn into_server(self) -> LaptopServiceServer<Self> {
        LaptopServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl LaptopService for LaptopServiceImpl {
    async fn create_laptop(
        &self,
        request: Request<CreateLaptopRequest>,
    ) -> Result<Response<CreateLaptopResponse>, Status> {
        create::create_laptop(self, request).await
    }

    type SearchLaptopStream = std::pin::Pin<
        Box<dyn futures::Stream<Item = Result<SearchLaptopResponse, Status>> + Send + 'static>,
    >;

    async fn search_laptop(
        &self,
        request: Request<SearchLaptopRequest>,
    ) -> Result<Response<Self::SearchLaptopStream>, Status> {
        search::search_laptop(self, request).await
    }
}

//! Build script for the laptop catalog API
//!
//! Generates the tonic server and client from the protobuf definition.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/");

    tonic_build::configure()
        .build_server(true)
        .build_client(true) // Client is used by integration tests
        .compile_protos(&["proto/laptop_service.proto"], &["proto"])?;
    Ok(())
}

//! # Shopfront Host Entry Point
//!
//! Serves storefront cart commands as JSON lines on stdin/stdout.
//! All application logic lives in lib.rs.

#[tokio::main]
async fn main() -> std::io::Result<()> {
    shopfront_app::run().await
}

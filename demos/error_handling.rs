//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Inspect not-ok answers through `ClientError`
//! - Decode error bodies into your own type
//! - Deal with bodies that do not match the expected type
//!
//! Run with: `cargo run --example error_handling`

use fetchkit::{Client, Error, Request};
use http::Method;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    id: u32,
    title: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("fetchkit=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .build()?;

    println!("=== Example 1: Not-ok answers ===");
    match client.get::<Post>("/posts/999999").await {
        Ok(response) => println!("Success: {:?}", response.data),
        Err(Error::Http(err)) => {
            println!("{}", err.message);
            println!("  Status code: {}", err.status.as_u16());
            println!("  Is client error (4xx): {}", err.status.is_client_error());
            println!("  Error body: {}", err.body);
            println!("  Content-Type: {:?}", err.headers.get("content-type"));
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Typed error bodies ===");
    let request = Request::new(Method::GET, "/posts/999999");
    match client.send::<Post, ApiError>(request).await {
        Ok(response) => println!("Success: {:?}", response.data),
        Err(Error::Http(err)) => println!("  Decoded error body: {:?}", err.body),
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Decode failures ===");
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct WrongSchema {
        nonexistent_field: String,
    }

    match client.get::<WrongSchema>("/posts/1").await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::Decode {
            status,
            raw_response,
            source,
        }) => {
            println!("Decode failed (status {})", status);
            println!("  Serde error: {}", source);
            println!(
                "  Raw response (first 200 chars): {}",
                raw_response.chars().take(200).collect::<String>()
            );
        }
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}

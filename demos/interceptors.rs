//! Example demonstrating request and response interceptors.
//!
//! Run with: `cargo run --example interceptors`

use fetchkit::{Client, Request, Response};
use http::{header, HeaderValue};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), fetchkit::Error> {
    tracing_subscriber::fmt()
        .with_env_filter("fetchkit=debug")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .request_interceptor(|mut request: Request| {
            println!("-> {} {}", request.method, request.path);
            request.headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_static("Bearer demo-token"),
            );
            request
        })
        .response_interceptor(|mut response: Response<Value>| {
            println!("<- {} {}", response.status.as_u16(), response.url);
            if let Some(object) = response.data.as_object_mut() {
                object.insert("intercepted".to_string(), Value::Bool(true));
            }
            response
        })
        .build()?;

    let response = client.get::<Value>("/todos/1").await?;
    println!("{}", serde_json::to_string_pretty(&response.data).unwrap_or_default());

    Ok(())
}

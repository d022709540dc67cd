//! Basic example demonstrating GET, POST and DELETE requests.
//!
//! Run with: `cargo run --example basic_call`

use fetchkit::{Client, Error, RequestOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("fetchkit=debug,basic_call=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .build()?;

    println!("=== GET Request Example ===");
    let response = client.get::<Post>("/posts/1").await?;

    println!("Post ID: {}", response.data.id);
    println!("Title: {}", response.data.title);
    println!("Status: {} {}", response.status.as_u16(), response.status_text);
    println!("Request latency: {:?}", response.latency);
    println!();

    println!("=== GET With Query Parameters ===");
    let options = RequestOptions::new()
        .query("userId", 1)
        .query("title", None::<&str>);
    let posts = client.get_with::<Vec<Post>>("/posts", options).await?;
    println!("User 1 has {} posts", posts.data.len());
    println!("Requested URL: {}", posts.url);
    println!();

    println!("=== POST Request Example ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let response = client.post::<_, Post>("/posts", &new_post).await?;
    println!("Created post ID: {}", response.data.id);
    println!("Content-Type: {:?}", response.header("content-type"));
    println!();

    println!("=== DELETE Request Example ===");
    let response = client.delete::<serde_json::Value>("/posts/1").await?;
    println!("Deleted, status {}", response.status);

    Ok(())
}

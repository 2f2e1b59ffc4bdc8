use reddit_client::{select_post, RedditApiClient};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let subreddit = env::args().nth(1).unwrap_or_else(|| "memes".to_string());

    println!("=== Reddit Listing Live Test ===\n");

    let client = RedditApiClient::new("redditcord/live-test".to_string())?;
    println!("✅ Client created for {}\n", client.base_url());

    println!("🔍 Fetching r/{} ...", subreddit);
    match client.fetch_listing(&subreddit).await {
        Ok(listing) => {
            println!("✅ {} posts (next page: {:?})", listing.posts.len(), listing.after);
            for post in &listing.posts {
                println!(
                    "   - [{}] video={} gallery_items={} url={:?}",
                    post.id, post.is_video, post.gallery_item_count, post.url
                );
            }

            match select_post(&listing) {
                Some(post) => println!("\n🎯 Selected: {} ({})", post.title, post.url),
                None => println!("\n❌ Nothing embeddable in r/{}", subreddit),
            }
        }
        Err(e) => println!("❌ Fetch failed: {}", e),
    }

    let prefix: String = subreddit.chars().take(3).collect();
    println!("\n🔍 Searching subreddits for '{}' ...", prefix);
    for choice in client.search_subreddits(&prefix).await {
        println!("   - {} -> {}", choice.label, choice.value);
    }

    Ok(())
}

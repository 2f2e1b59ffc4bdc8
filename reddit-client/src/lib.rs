pub mod api;
pub mod selector;


pub use api::{RedditApiClient, REDDIT_BASE_URL};
pub use selector::{is_embeddable, select_post};

/// Subreddit used when an invocation names none.
pub const DEFAULT_SUBREDDIT: &str = "memes";

/// The subreddit a single `/reddit` invocation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    community: String,
}

impl ListingQuery {
    /// Builds the query from the raw option value, falling back to `default`
    /// when the option is missing or blank. A leading `r/` is dropped.
    pub fn new(requested: Option<&str>, default: &str) -> Self {
        let community = requested
            .map(str::trim)
            .map(|name| name.strip_prefix("r/").unwrap_or(name))
            .filter(|name| !name.is_empty())
            .unwrap_or(default);

        Self {
            community: community.to_string(),
        }
    }

    pub fn community(&self) -> &str {
        &self.community
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub permalink: String,
    pub subreddit_name_prefixed: String,
    pub author: String,
    pub url: String,
    pub ups: i32,
    pub upvote_ratio: f64,
    pub num_comments: i32,
    pub is_video: bool,
    pub gallery_item_count: usize,
    pub created_utc: f64,
    /// Passed through untouched; Reddit sends a number or `null`.
    pub view_count: Option<serde_json::Value>,
}

/// One decoded page of a subreddit listing, in the order Reddit returned it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub after: Option<String>,
    pub posts: Vec<PostRecord>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// An autocomplete suggestion for the `subreddit` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchChoice {
    /// Shown to the user, e.g. `r/rust`.
    pub label: String,
    /// Sent back as the option value, e.g. `rust`.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_query_defaults_when_missing() {
        let query = ListingQuery::new(None, DEFAULT_SUBREDDIT);
        assert_eq!(query.community(), "memes");
    }

    #[test]
    fn test_listing_query_defaults_when_blank() {
        assert_eq!(ListingQuery::new(Some(""), "memes").community(), "memes");
        assert_eq!(ListingQuery::new(Some("   "), "memes").community(), "memes");
        assert_eq!(ListingQuery::new(Some("r/"), "memes").community(), "memes");
    }

    #[test]
    fn test_listing_query_strips_prefix_and_whitespace() {
        assert_eq!(ListingQuery::new(Some(" rust "), "memes").community(), "rust");
        assert_eq!(ListingQuery::new(Some("r/aww"), "memes").community(), "aww");
    }
}

use redditcord_core::{
    ConfigError, CoreError, ErrorExt, Listing, PostRecord, RedditApiError, SearchChoice,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};
use url::Url;

pub const REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Reddit's `Listing` envelope.
///
/// Every level tolerates a missing or `null` value, including a child's
/// `data` and the body itself, so one odd entry never sinks the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct RedditListing<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: RedditListingData<T>,
}

impl<T> Default for RedditListing<T> {
    fn default() -> Self {
        Self {
            kind: String::new(),
            data: RedditListingData::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct RedditListingData<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
}

impl<T> Default for RedditListingData<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            after: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct RedditListingChild<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

/// A `t3` thing as it appears in `/r/<name>.json`.
///
/// Absent and `null` fields decode to their zero value; Reddit omits or
/// nulls plenty of these depending on the post type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_fullname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subreddit_name_prefixed: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ups: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub upvote_ratio: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_comments: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub num_crossposts: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_height: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub created_utc: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_video: bool,
    pub view_count: Option<serde_json::Value>,
    pub gallery_data: Option<RedditGalleryData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditGalleryData {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// A `t5` thing as it appears in `/subreddits/search.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RedditSubredditData {
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name_prefixed: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unauthenticated client for Reddit's public JSON endpoints.
///
/// Cloning is cheap and every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct RedditApiClient {
    http_client: Client,
    base_url: Url,
    user_agent: String,
}

impl RedditApiClient {
    pub fn new(user_agent: String) -> Result<Self, CoreError> {
        Self::with_base_url(REDDIT_BASE_URL, user_agent)
    }

    pub fn with_base_url(base_url: &str, user_agent: String) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "reddit_base_url".to_string(),
                value: base_url.to_string(),
            })?;

        let http_client = Client::builder().user_agent(&user_agent).build()?;

        Ok(Self {
            http_client,
            base_url,
            user_agent,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `GET /r/<subreddit>.json`, decoded into a [`Listing`].
    pub async fn fetch_listing(&self, subreddit: &str) -> Result<Listing, RedditApiError> {
        let url = self.endpoint(&["r", &format!("{}.json", subreddit)]);

        let listing: RedditListing<RedditPostData> = self
            .get_json::<Option<RedditListing<RedditPostData>>>(url)
            .await?
            .unwrap_or_default();
        let listing = Listing {
            after: listing.data.after,
            posts: listing
                .data
                .children
                .into_iter()
                .map(|child| PostRecord::from(child.data))
                .collect(),
        };

        info!("Retrieved {} posts from r/{}", listing.posts.len(), subreddit);
        Ok(listing)
    }

    /// `GET /subreddits/search.json?q=<query>`.
    ///
    /// Never fails: any problem yields an empty list so autocomplete keeps
    /// working while the user types.
    pub async fn search_subreddits(&self, query: &str) -> Vec<SearchChoice> {
        let mut url = self.endpoint(&["subreddits", "search.json"]);
        url.query_pairs_mut().append_pair("q", query);

        match self
            .get_json::<Option<RedditListing<RedditSubredditData>>>(url)
            .await
        {
            Ok(listing) => {
                let listing = listing.unwrap_or_default();
                let choices: Vec<SearchChoice> = listing
                    .data
                    .children
                    .into_iter()
                    .map(|child| SearchChoice::from(child.data))
                    .collect();
                debug!("Subreddit search '{}' returned {} results", query, choices.len());
                choices
            }
            // Reddit answers non-200 for a lot of partial queries; not worth a log line.
            Err(RedditApiError::NonOkStatus { .. }) => Vec::new(),
            Err(e) => {
                debug!("Subreddit search '{}' failed", query);
                e.log_warn();
                Vec::new()
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RedditApiError> {
        debug!("Making Reddit API request: GET {}", url);

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RedditApiError::Network {
                details: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            debug!("Request failed with status: {} for {}", response.status(), url);
            return Err(RedditApiError::NonOkStatus {
                status_code: response.status().as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("application/json") {
            return Err(RedditApiError::BadContentType { content_type });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RedditApiError::Network {
                details: e.to_string(),
            })?;

        decode_json(&body)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_base_url` rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Decodes a response body, separating type mismatches from every other
/// failure (syntax errors, truncated bodies).
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, RedditApiError> {
    serde_json::from_slice(body).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => RedditApiError::DecodeTypeMismatch {
            details: e.to_string(),
        },
        _ => RedditApiError::DecodeUnknown {
            details: e.to_string(),
        },
    })
}

impl From<RedditPostData> for PostRecord {
    fn from(post_data: RedditPostData) -> Self {
        Self {
            id: post_data.id,
            title: post_data.title,
            permalink: post_data.permalink,
            subreddit_name_prefixed: post_data.subreddit_name_prefixed,
            author: post_data.author,
            url: post_data.url,
            ups: post_data.ups,
            upvote_ratio: post_data.upvote_ratio,
            num_comments: post_data.num_comments,
            is_video: post_data.is_video,
            gallery_item_count: post_data
                .gallery_data
                .map_or(0, |gallery| gallery.items.len()),
            created_utc: post_data.created_utc,
            view_count: post_data.view_count,
        }
    }
}

impl From<RedditSubredditData> for SearchChoice {
    fn from(subreddit: RedditSubredditData) -> Self {
        Self {
            label: subreddit.display_name_prefixed,
            value: subreddit.display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = RedditApiClient::new("test-user-agent/1.0".to_string()).unwrap();
        assert_eq!(client.user_agent(), "test-user-agent/1.0");
        assert_eq!(client.base_url().as_str(), "https://www.reddit.com/");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let result = RedditApiClient::with_base_url("mailto:someone", "ua".to_string());
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_endpoint_building() {
        let client = RedditApiClient::new("ua".to_string()).unwrap();
        let url = client.endpoint(&["r", "memes.json"]);
        assert_eq!(url.as_str(), "https://www.reddit.com/r/memes.json");

        // Path separators typed by a user must not escape the segment.
        let url = client.endpoint(&["r", "a/b.json"]);
        assert_eq!(url.as_str(), "https://www.reddit.com/r/a%2Fb.json");
    }

    #[test]
    fn test_reddit_post_conversion() {
        let post_data: RedditPostData = serde_json::from_str(
            r#"{
                "id": "abc123",
                "title": "Test Post",
                "permalink": "/r/test/comments/abc123/test_post/",
                "subreddit_name_prefixed": "r/test",
                "author": "test_user",
                "url": "https://i.redd.it/abc123.png",
                "ups": 45,
                "upvote_ratio": 0.93,
                "num_comments": 5,
                "is_video": false,
                "thumbnail_height": null,
                "view_count": null,
                "gallery_data": {"items": [{"media_id": "x"}, {"media_id": "y"}]}
            }"#,
        )
        .unwrap();

        let post: PostRecord = post_data.into();
        assert_eq!(post.id, "abc123");
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.ups, 45);
        assert_eq!(post.gallery_item_count, 2);
        assert_eq!(post.view_count, None);
    }

    #[test]
    fn test_missing_and_null_fields_take_zero_values() {
        let post_data: RedditPostData =
            serde_json::from_str(r#"{"title": "only a title", "url": null, "ups": null}"#)
                .unwrap();

        let post: PostRecord = post_data.into();
        assert_eq!(post.title, "only a title");
        assert_eq!(post.url, "");
        assert_eq!(post.ups, 0);
        assert!(!post.is_video);
        assert_eq!(post.gallery_item_count, 0);
    }

    #[test]
    fn test_decode_json_classifies_errors() {
        let mismatch = decode_json::<RedditListing<RedditPostData>>(
            br#"{"data": {"children": [{"kind": "t3", "data": {"ups": "many"}}]}}"#,
        );
        assert!(matches!(
            mismatch,
            Err(RedditApiError::DecodeTypeMismatch { .. })
        ));

        let truncated = decode_json::<RedditListing<RedditPostData>>(br#"{"data": {"chil"#);
        assert!(matches!(truncated, Err(RedditApiError::DecodeUnknown { .. })));

        let syntax = decode_json::<RedditListing<RedditPostData>>(b"<html></html>");
        assert!(matches!(syntax, Err(RedditApiError::DecodeUnknown { .. })));
    }

    #[test]
    fn test_listing_tolerates_missing_and_null_child_data() {
        let listing = decode_json::<Option<RedditListing<RedditPostData>>>(
            br#"{"kind": "Listing", "data": {"children": [
                {"kind": "t3"},
                {"kind": "t3", "data": null},
                {"kind": "t3", "data": {"id": "ok", "url": "https://i.redd.it/ok.png"}}
            ]}}"#,
        )
        .unwrap()
        .unwrap_or_default();

        let posts: Vec<PostRecord> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into())
            .collect();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].url, "");
        assert_eq!(posts[1].url, "");
        assert_eq!(posts[2].id, "ok");
    }

    #[test]
    fn test_listing_tolerates_null_body_and_null_data() {
        let body = decode_json::<Option<RedditListing<RedditPostData>>>(b"null").unwrap();
        assert!(body.unwrap_or_default().data.children.is_empty());

        let listing = decode_json::<RedditListing<RedditPostData>>(
            br#"{"kind": null, "data": {"children": null, "after": null}}"#,
        )
        .unwrap();
        assert!(listing.data.children.is_empty());
        assert!(listing.data.after.is_none());

        let listing =
            decode_json::<RedditListing<RedditPostData>>(br#"{"data": null}"#).unwrap();
        assert!(listing.data.children.is_empty());
    }

    #[test]
    fn test_subreddit_conversion() {
        let choice = SearchChoice::from(RedditSubredditData {
            display_name: "rust".to_string(),
            display_name_prefixed: "r/rust".to_string(),
            title: "The Rust Programming Language".to_string(),
        });
        assert_eq!(choice.label, "r/rust");
        assert_eq!(choice.value, "rust");
    }
}

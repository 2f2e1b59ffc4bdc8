//! Rendering of a selected post into the embed sent back to Discord.

use redditcord_core::PostRecord;

pub const REDDIT_WEB_URL: &str = "https://www.reddit.com";
pub const EMBED_COLOUR: u32 = 0x000000;

/// Discord rejects embeds whose title exceeds this many characters.
const MAX_TITLE_CHARS: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct PostEmbed {
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub footer: String,
    pub colour: u32,
}

impl PostEmbed {
    pub fn from_post(post: &PostRecord) -> Self {
        Self {
            author: post.subreddit_name_prefixed.clone(),
            title: truncate_chars(&post.title, MAX_TITLE_CHARS),
            description: format!("Posted by u/{} • [i.redd.it]({})", post.author, post.url),
            url: format!("{}{}", REDDIT_WEB_URL, post.permalink),
            image_url: post.url.clone(),
            footer: format!(
                "⬆️ {} • ⬇️ {} • 💬 {}",
                post.ups,
                estimated_downvotes(post.ups, post.upvote_ratio),
                post.num_comments
            ),
            colour: EMBED_COLOUR,
        }
    }
}

/// `ups / (upvote_ratio * 100)`, truncated.
///
/// Reddit does not expose real downvote counts; this is the long-standing
/// footer approximation and is kept as is. A zero ratio renders as 0.
pub fn estimated_downvotes(ups: i32, upvote_ratio: f64) -> i64 {
    let estimate = f64::from(ups) / (upvote_ratio * 100.0);
    if estimate.is_finite() {
        estimate as i64
    } else {
        0
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> PostRecord {
        PostRecord {
            id: "abc123".to_string(),
            title: "When the code compiles first try".to_string(),
            permalink: "/r/memes/comments/abc123/when_the_code_compiles/".to_string(),
            subreddit_name_prefixed: "r/memes".to_string(),
            author: "ferris".to_string(),
            url: "https://i.redd.it/abc123.png".to_string(),
            ups: 100,
            upvote_ratio: 0.80,
            num_comments: 7,
            is_video: false,
            gallery_item_count: 0,
            created_utc: 1_700_000_000.0,
            view_count: None,
        }
    }

    #[test]
    fn test_downvote_estimate() {
        assert_eq!(estimated_downvotes(100, 0.80), 1);
        assert_eq!(estimated_downvotes(5000, 0.5), 100);
        assert_eq!(estimated_downvotes(0, 0.5), 0);
    }

    #[test]
    fn test_downvote_estimate_with_zero_ratio() {
        assert_eq!(estimated_downvotes(100, 0.0), 0);
        assert_eq!(estimated_downvotes(0, 0.0), 0);
    }

    #[test]
    fn test_embed_fields() {
        let embed = PostEmbed::from_post(&sample_post());

        assert_eq!(embed.author, "r/memes");
        assert_eq!(embed.title, "When the code compiles first try");
        assert_eq!(
            embed.description,
            "Posted by u/ferris • [i.redd.it](https://i.redd.it/abc123.png)"
        );
        assert_eq!(
            embed.url,
            "https://www.reddit.com/r/memes/comments/abc123/when_the_code_compiles/"
        );
        assert_eq!(embed.image_url, "https://i.redd.it/abc123.png");
        assert_eq!(embed.footer, "⬆️ 100 • ⬇️ 1 • 💬 7");
        assert_eq!(embed.colour, 0x000000);
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let mut post = sample_post();
        post.title = "x".repeat(300);

        let embed = PostEmbed::from_post(&post);
        assert_eq!(embed.title.chars().count(), 256);
        assert!(embed.title.ends_with('…'));
    }
}

use redditcord_core::{Listing, PostRecord};

/// Whether a post can be shown as an image embed.
///
/// Videos and galleries do not render from their `url`, and self posts
/// without a link have nothing to show.
pub fn is_embeddable(post: &PostRecord) -> bool {
    !post.is_video && !post.url.is_empty() && post.gallery_item_count == 0
}

/// The first embeddable post in listing order, if any.
pub fn select_post(listing: &Listing) -> Option<&PostRecord> {
    listing.posts.iter().find(|post| is_embeddable(post))
}

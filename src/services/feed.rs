//! RSS rendering for extracted posts.

use rss::{Channel, Guid, Item};

use crate::models::{PostRecord, Site};

const GENERATOR: &str = concat!("web2rss ", env!("CARGO_PKG_VERSION"));

/// Build an RSS channel for a site's posts, keeping post order.
///
/// Item titles carry the extra fields joined by `separator`; `pubDate` is
/// left out for posts without a parsed date.
pub fn build_channel(site: &Site, posts: &[PostRecord], separator: &str) -> Channel {
    let mut channel = Channel::default();
    channel.set_title(site.name.clone());
    channel.set_link(site.url.clone());
    channel.set_description(site.feed_description());
    channel.set_generator(Some(GENERATOR.to_string()));
    channel.set_items(
        posts
            .iter()
            .map(|post| build_item(post, separator))
            .collect::<Vec<_>>(),
    );
    channel
}

/// Render a site's posts as an RSS 2.0 document.
pub fn render_feed(site: &Site, posts: &[PostRecord], separator: &str) -> String {
    build_channel(site, posts, separator).to_string()
}

fn build_item(post: &PostRecord, separator: &str) -> Item {
    let mut guid = Guid::default();
    guid.set_value(post.link.clone());
    guid.set_permalink(true);

    let mut item = Item::default();
    item.set_title(Some(post.display_title(separator)));
    item.set_link(Some(post.link.clone()));
    item.set_description(Some(post.description.clone()));
    item.set_guid(Some(guid));
    item.set_pub_date(post.publication_date.map(|date| date.to_rfc2822()));
    item
}

//! RSS feed of the most recent posts.

use std::fs;
use std::path::Path;
use rss::{CategoryBuilder, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use rss::validation::Validate;
use url::Url;

use crate::builder::post::Post;
use crate::config::SiteConfig;
use crate::utils::error::{QuireError, QuireResult};

/// Build the feed channel: site name, tag line and base URL, one item per
/// post in the given order.
pub fn build_feed(config: &SiteConfig, posts: &[Post]) -> QuireResult<Channel> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| QuireError::Rss(format!("error parsing base URL: {}", e)))?;

    let items = posts
        .iter()
        .map(|post| feed_item(&base, post))
        .collect::<QuireResult<Vec<_>>>()?;

    let channel = ChannelBuilder::default()
        .title(config.site_name.clone())
        .link(config.base_url.clone())
        .description(config.tag_line.clone())
        .generator(Some(format!("quire {}", env!("CARGO_PKG_VERSION"))))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| QuireError::Rss(format!("feed validation failed: {}", e)))?;
    Ok(channel)
}

fn feed_item(base: &Url, post: &Post) -> QuireResult<Item> {
    let doc = post.document();
    let link = base
        .join(post.slug())
        .map_err(|e| QuireError::Rss(format!("error parsing post URL {}: {}", post.slug(), e)))?
        .to_string();

    let categories = doc
        .get("Category")
        .filter(|c| !c.is_empty())
        .map(|c| vec![CategoryBuilder::default().name(c.to_string()).build()])
        .unwrap_or_default();

    let guid = GuidBuilder::default()
        .value(link.clone())
        .permalink(true)
        .build();

    Ok(ItemBuilder::default()
        .title(Some(doc.get_or_empty("Title").to_string()))
        .link(Some(link))
        .description(Some(doc.get_or_empty("Description").to_string()))
        .author(Some(doc.get_or_empty("Author").to_string()))
        .categories(categories)
        .guid(Some(guid))
        .pub_date(Some(post.pub_time().to_rfc2822()))
        .build())
}

/// Serialize the channel to `path`
pub fn write_feed(channel: &Channel, path: &Path) -> QuireResult<()> {
    fs::write(path, channel.to_string())?;
    Ok(())
}

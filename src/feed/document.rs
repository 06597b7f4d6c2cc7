use crate::models::{ArticleFields, DEFAULT_MAIN_PICTURE};
use chrono::{NaiveDateTime, Weekday};
use serde_json::Value;
use thiserror::Error;

const PUB_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S";
const PUB_DATE_ZONES: [&str; 2] = ["GMT", "UTC"];

static NULL: Value = Value::Null;

#[derive(Debug, Error, PartialEq)]
pub enum FeedFormatError {
    #[error("missing rss.channel.item")]
    MissingItems,
    #[error("item {index} has no <{field}>")]
    MissingField { index: usize, field: &'static str },
    #[error("item {index} has markup inside <{field}>")]
    NestedMarkup { index: usize, field: &'static str },
    #[error("item {index} has an invalid pubDate {value:?}")]
    InvalidPubDate { index: usize, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub guid: String,
    pub title: String,
    pub description: String,
    pub pub_date: NaiveDateTime,
    pub link: String,
    pub enclosure_url: Option<String>,
}

impl FeedItem {
    pub fn main_picture(&self) -> &str {
        self.enclosure_url.as_deref().unwrap_or(DEFAULT_MAIN_PICTURE)
    }

    pub fn article_fields(&self) -> ArticleFields<'_> {
        ArticleFields {
            external_id: &self.guid,
            title: &self.title,
            description: &self.description,
            publication_date: self.pub_date,
            link: &self.link,
            main_picture: self.main_picture(),
        }
    }
}

/// The validated `rss/channel/item` view of a parsed feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub items: Vec<FeedItem>,
}

impl FeedDocument {
    /// Projects a tree produced by [`crate::feed::tree::parse`].
    ///
    /// A channel with a single `<item>` yields an object instead of an array,
    /// both shapes are accepted.
    pub fn from_tree(tree: &Value) -> Result<Self, FeedFormatError> {
        let items = tree
            .get("rss")
            .and_then(|rss| rss.get("channel"))
            .and_then(|channel| channel.get("item"))
            .ok_or(FeedFormatError::MissingItems)?;
        let items = match items {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            item => vec![item],
        };
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }
}

fn parse_item(index: usize, item: &Value) -> Result<FeedItem, FeedFormatError> {
    let field = |field: &'static str| -> Result<String, FeedFormatError> {
        let value = item
            .get(field)
            .ok_or(FeedFormatError::MissingField { index, field })?;
        text_of(value).ok_or(FeedFormatError::NestedMarkup { index, field })
    };
    let guid = field("guid")?;
    let title = field("title")?;
    let description = field("description")?;
    let pub_date = field("pubDate")?;
    let pub_date =
        parse_pub_date(&pub_date).ok_or_else(|| FeedFormatError::InvalidPubDate {
            index,
            value: pub_date.clone(),
        })?;
    Ok(FeedItem {
        guid,
        title,
        description,
        pub_date,
        link: field("link")?,
        enclosure_url: item
            .get("enclosure")
            .map(first)
            .and_then(|enclosure| enclosure.get("@url"))
            .and_then(text_of),
    })
}

fn first(value: &Value) -> &Value {
    match value {
        Value::Array(values) => values.first().unwrap_or(&NULL),
        value => value,
    }
}

/// The text content of a field, or `None` when it holds child elements.
fn text_of(value: &Value) -> Option<String> {
    match first(value) {
        Value::String(text) => Some(text.clone()),
        Value::Object(element) => {
            if element
                .keys()
                .any(|key| key != "#text" && !key.starts_with('@'))
            {
                return None;
            }
            Some(
                element
                    .get("#text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
            )
        }
        Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

/// Parses an RFC 822 style date such as `Mon, 02 Jan 2006 15:04:05 GMT`.
/// Only the GMT/UTC zone names are understood; the result is naive UTC.
///
/// The weekday must be a valid abbreviation but is not checked against the
/// date, feeds in the wild often get it wrong.
pub fn parse_pub_date(value: &str) -> Option<NaiveDateTime> {
    let (datetime, zone) = value.trim().rsplit_once(' ')?;
    if !PUB_DATE_ZONES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(zone))
    {
        return None;
    }
    let (weekday, datetime) = datetime.split_once(',')?;
    let weekday = weekday.trim();
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return None;
    }
    NaiveDateTime::parse_from_str(datetime.trim(), PUB_DATE_FORMAT).ok()
}

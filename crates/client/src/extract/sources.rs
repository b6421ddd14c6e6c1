//! Static source tables: where each metadata field may be found, in priority order.
//!
//! Open Graph comes first, then Twitter Card, then plain HTML. Open Graph keys are
//! looked up by `property` and then by `name`; Twitter keys the other way around,
//! since pages routinely mix the two attributes up.

/// How a source location selects its element and which value it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// `<meta property="{key}" content="...">`
    Property,
    /// `<meta name="{key}" content="...">`
    Name,
    /// Text content of the first `<{key}>` element.
    Tag,
    /// `<link rel="{key}" href="...">`, matched per rel token.
    Rel,
}

impl SelectorKind {
    /// Attribute compared against the source key, if any.
    pub fn selector_attribute(self) -> Option<&'static str> {
        match self {
            SelectorKind::Property => Some("property"),
            SelectorKind::Name => Some("name"),
            SelectorKind::Tag => None,
            SelectorKind::Rel => Some("rel"),
        }
    }

    /// Attribute holding the value, or `None` for element text.
    pub fn value_attribute(self) -> Option<&'static str> {
        match self {
            SelectorKind::Property | SelectorKind::Name => Some("content"),
            SelectorKind::Tag => None,
            SelectorKind::Rel => Some("href"),
        }
    }
}

/// One candidate location for a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    pub kind: SelectorKind,
    pub key: &'static str,
}

impl Source {
    pub const fn property(key: &'static str) -> Self {
        Self { kind: SelectorKind::Property, key }
    }

    pub const fn name(key: &'static str) -> Self {
        Self { kind: SelectorKind::Name, key }
    }

    pub const fn tag(key: &'static str) -> Self {
        Self { kind: SelectorKind::Tag, key }
    }

    pub const fn rel(key: &'static str) -> Self {
        Self { kind: SelectorKind::Rel, key }
    }

    /// Element name this source selects.
    pub fn tag_name(&self) -> &'static str {
        match self.kind {
            SelectorKind::Property | SelectorKind::Name => "meta",
            SelectorKind::Tag => self.key,
            SelectorKind::Rel => "link",
        }
    }
}

/// Logical metadata fields resolved from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Image,
    SiteName,
    Type,
    Locale,
    Author,
    Publisher,
    PublishedTime,
    ModifiedTime,
    VideoUrl,
    AudioUrl,
    Duration,
    TwitterHandle,
    TwitterCard,
    CanonicalUrl,
    Favicon,
    ThemeColor,
    Keywords,
}

const TITLE: &[Source] = &[
    Source::property("og:title"),
    Source::name("og:title"),
    Source::name("twitter:title"),
    Source::property("twitter:title"),
    Source::tag("title"),
];

const DESCRIPTION: &[Source] = &[
    Source::property("og:description"),
    Source::name("og:description"),
    Source::name("twitter:description"),
    Source::property("twitter:description"),
    Source::name("description"),
];

const IMAGE: &[Source] = &[
    Source::property("og:image"),
    Source::name("og:image"),
    Source::property("og:image:url"),
    Source::property("og:image:secure_url"),
    Source::name("twitter:image"),
    Source::property("twitter:image"),
    Source::name("twitter:image:src"),
];

const SITE_NAME: &[Source] = &[
    Source::property("og:site_name"),
    Source::name("og:site_name"),
    Source::name("application-name"),
];

const TYPE: &[Source] = &[Source::property("og:type"), Source::name("og:type")];

const LOCALE: &[Source] = &[Source::property("og:locale"), Source::name("og:locale")];

const AUTHOR: &[Source] = &[
    Source::property("article:author"),
    Source::name("article:author"),
    Source::name("author"),
];

const PUBLISHER: &[Source] = &[
    Source::property("article:publisher"),
    Source::name("article:publisher"),
    Source::name("publisher"),
];

const PUBLISHED_TIME: &[Source] = &[
    Source::property("article:published_time"),
    Source::name("article:published_time"),
    Source::name("date"),
];

const MODIFIED_TIME: &[Source] = &[
    Source::property("article:modified_time"),
    Source::name("article:modified_time"),
    Source::property("og:updated_time"),
    Source::name("last-modified"),
];

const VIDEO_URL: &[Source] = &[
    Source::property("og:video"),
    Source::property("og:video:url"),
    Source::property("og:video:secure_url"),
    Source::name("twitter:player"),
];

const AUDIO_URL: &[Source] = &[
    Source::property("og:audio"),
    Source::property("og:audio:url"),
    Source::property("og:audio:secure_url"),
];

const DURATION: &[Source] = &[
    Source::property("video:duration"),
    Source::property("music:duration"),
    Source::property("og:video:duration"),
];

const TWITTER_HANDLE: &[Source] = &[
    Source::name("twitter:site"),
    Source::property("twitter:site"),
    Source::name("twitter:creator"),
    Source::property("twitter:creator"),
];

const TWITTER_CARD: &[Source] = &[Source::name("twitter:card"), Source::property("twitter:card")];

const CANONICAL_URL: &[Source] = &[Source::property("og:url"), Source::name("og:url"), Source::rel("canonical")];

const FAVICON: &[Source] = &[Source::rel("icon"), Source::rel("apple-touch-icon")];

const THEME_COLOR: &[Source] = &[Source::name("theme-color"), Source::name("msapplication-TileColor")];

const KEYWORDS: &[Source] = &[Source::name("keywords")];

impl Field {
    /// Every field, in record order.
    pub const ALL: [Field; 19] = [
        Field::Title,
        Field::Description,
        Field::Image,
        Field::SiteName,
        Field::Type,
        Field::Locale,
        Field::Author,
        Field::Publisher,
        Field::PublishedTime,
        Field::ModifiedTime,
        Field::VideoUrl,
        Field::AudioUrl,
        Field::Duration,
        Field::TwitterHandle,
        Field::TwitterCard,
        Field::CanonicalUrl,
        Field::Favicon,
        Field::ThemeColor,
        Field::Keywords,
    ];

    /// Candidate sources for this field, highest priority first.
    pub fn sources(self) -> &'static [Source] {
        match self {
            Field::Title => TITLE,
            Field::Description => DESCRIPTION,
            Field::Image => IMAGE,
            Field::SiteName => SITE_NAME,
            Field::Type => TYPE,
            Field::Locale => LOCALE,
            Field::Author => AUTHOR,
            Field::Publisher => PUBLISHER,
            Field::PublishedTime => PUBLISHED_TIME,
            Field::ModifiedTime => MODIFIED_TIME,
            Field::VideoUrl => VIDEO_URL,
            Field::AudioUrl => AUDIO_URL,
            Field::Duration => DURATION,
            Field::TwitterHandle => TWITTER_HANDLE,
            Field::TwitterCard => TWITTER_CARD,
            Field::CanonicalUrl => CANONICAL_URL,
            Field::Favicon => FAVICON,
            Field::ThemeColor => THEME_COLOR,
            Field::Keywords => KEYWORDS,
        }
    }

    /// Whether resolved values are URLs to be made absolute.
    pub fn is_url(self) -> bool {
        matches!(
            self,
            Field::Image | Field::VideoUrl | Field::AudioUrl | Field::CanonicalUrl | Field::Favicon
        )
    }

    /// Name of the record field this resolves into.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Image => "image",
            Field::SiteName => "site_name",
            Field::Type => "type",
            Field::Locale => "locale",
            Field::Author => "author",
            Field::Publisher => "publisher",
            Field::PublishedTime => "published_time",
            Field::ModifiedTime => "modified_time",
            Field::VideoUrl => "video_url",
            Field::AudioUrl => "audio_url",
            Field::Duration => "duration",
            Field::TwitterHandle => "twitter_handle",
            Field::TwitterCard => "twitter_card",
            Field::CanonicalUrl => "canonical_url",
            Field::Favicon => "favicon",
            Field::ThemeColor => "theme_color",
            Field::Keywords => "keywords",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_sources() {
        for field in Field::ALL {
            assert!(!field.sources().is_empty(), "{} has no sources", field.name());
        }
    }

    #[test]
    fn test_open_graph_precedes_twitter_precedes_html() {
        let keys: Vec<_> = Field::Title.sources().iter().map(|s| s.key).collect();
        let og = keys.iter().position(|k| *k == "og:title").unwrap();
        let twitter = keys.iter().position(|k| *k == "twitter:title").unwrap();
        let html = keys.iter().position(|k| *k == "title").unwrap();
        assert!(og < twitter && twitter < html);

        let keys: Vec<_> = Field::Description.sources().iter().map(|s| s.key).collect();
        assert_eq!(keys.first(), Some(&"og:description"));
        assert_eq!(keys.last(), Some(&"description"));
    }

    #[test]
    fn test_image_open_graph_before_twitter() {
        let keys: Vec<_> = Field::Image.sources().iter().map(|s| s.key).collect();
        let og = keys.iter().position(|k| *k == "og:image").unwrap();
        let twitter = keys.iter().position(|k| *k == "twitter:image").unwrap();
        assert!(og < twitter);
        assert!(keys.iter().take(twitter).all(|k| k.starts_with("og:")));
    }

    #[test]
    fn test_twitter_keys_try_name_then_property() {
        let twitter: Vec<_> = Field::Title.sources().iter().filter(|s| s.key == "twitter:title").collect();
        assert_eq!(twitter, vec![&Source::name("twitter:title"), &Source::property("twitter:title")]);
    }

    #[test]
    fn test_title_element_is_last_resort() {
        assert_eq!(Field::Title.sources().last(), Some(&Source::tag("title")));
    }

    #[test]
    fn test_source_triples() {
        let triple = |s: Source| (s.tag_name(), s.kind.selector_attribute(), s.kind.value_attribute());

        assert_eq!(triple(Source::property("og:title")), ("meta", Some("property"), Some("content")));
        assert_eq!(triple(Source::name("description")), ("meta", Some("name"), Some("content")));
        assert_eq!(triple(Source::tag("title")), ("title", None, None));
        assert_eq!(triple(Source::rel("icon")), ("link", Some("rel"), Some("href")));
    }

    #[test]
    fn test_url_fields() {
        let url_fields: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_url()).map(Field::name).collect();
        assert_eq!(url_fields, vec!["image", "video_url", "audio_url", "canonical_url", "favicon"]);
    }
}

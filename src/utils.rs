use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;
use std::sync::LazyLock;

static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\s*<!--metadata(?P<toml>.*?)-->").expect("metadata pattern is valid")
});

static DATE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>\d{4}-\d{2}-\d{2})-(?P<slug>.+)$").expect("date prefix pattern is valid")
});

/// Splits a leading `<!--metadata ... -->` block off a post.
pub fn split_metadata(md_str: &str) -> (Option<&str>, &str) {
    match METADATA_RE.captures(md_str) {
        Some(caps) => {
            let (Some(block), Some(toml)) = (caps.get(0), caps.name("toml")) else {
                return (None, md_str);
            };
            (Some(toml.as_str()), &md_str[block.end()..])
        }
        None => (None, md_str),
    }
}

/// `2025-08-01-hello-world` -> (`Some("2025-08-01")`, `hello-world`)
pub fn split_date_prefix(stem: &str) -> (Option<&str>, &str) {
    match DATE_PREFIX_RE.captures(stem) {
        Some(caps) => match (caps.name("date"), caps.name("slug")) {
            (Some(date), Some(slug)) => (Some(date.as_str()), slug.as_str()),
            _ => (None, stem),
        },
        None => (None, stem),
    }
}

/// Renders markdown to HTML. The first level-1 heading is taken out of the
/// body and returned as the title.
pub fn md_to_html(md_str: &str) -> (String, String) {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let mut title = String::new();
    let mut inside_header = false;
    let mut seen_header = false;
    let events = Parser::new_ext(md_str, options).filter(|event| match event {
        Event::Start(Tag::Heading(HeadingLevel::H1, _, _)) if !seen_header => {
            inside_header = true;
            false
        }
        Event::End(Tag::Heading(HeadingLevel::H1, _, _)) if inside_header => {
            inside_header = false;
            seen_header = true;
            false
        }
        Event::Text(text) | Event::Code(text) if inside_header => {
            title.push_str(text);
            false
        }
        _ => !inside_header,
    });

    let mut html_str = String::new();
    html::push_html(&mut html_str, events);
    (title, html_str)
}

//! Projects a content item into its `Article` and the `Create` that publishes it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use inflector::Inflector;

use crate::errors::ProjectionError;
use crate::identity::Site;
use crate::types::{activitystreams_context, Article, ContentItem, Create, ObjectRef, PUBLIC};

/// Both documents for one item. They share derived ids, so they are only ever
/// built together.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub slug: String,
    pub article: Article,
    pub activity: Create,
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Normalizes an authored date to `YYYY-MM-DDTHH:MM:SSZ`.
pub fn iso8601(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        })?;
    Some(parsed.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn project(site: &Site, item: &ContentItem) -> Result<Projection, ProjectionError> {
    let slug = item.slug.trim();
    if slug.is_empty() {
        return Err(ProjectionError::EmptySlug {
            source_name: item.title.clone(),
        });
    }
    if slug.contains(['/', '\\']) || slug.contains("..") {
        return Err(ProjectionError::UnsafeSlug {
            source_name: item.title.clone(),
            slug: slug.to_string(),
        });
    }
    if item.published_at.trim().is_empty() {
        return Err(ProjectionError::MissingDate {
            source_name: slug.to_string(),
        });
    }
    let published = iso8601(&item.published_at).ok_or_else(|| ProjectionError::InvalidDate {
        source_name: slug.to_string(),
        raw: item.published_at.clone(),
    })?;
    let name = match item.title.trim() {
        "" => slug.to_title_case(),
        title => title.to_string(),
    };

    let actor_id = &site.identity.actor_id;
    let article = Article {
        context: activitystreams_context(),
        id: site.article_url(slug),
        kind: "Article",
        name: name.clone(),
        content: item.body.clone(),
        published: published.clone(),
        attributed_to: actor_id.clone(),
        to: PUBLIC,
    };
    let activity = Create {
        context: Some(activitystreams_context()),
        id: site.activity_url(slug),
        kind: "Create",
        actor: actor_id.clone(),
        object: ObjectRef {
            id: article.id.clone(),
            kind: "Article",
            name,
        },
        published,
        to: PUBLIC,
    };

    Ok(Projection {
        slug: slug.to_string(),
        article,
        activity,
    })
}

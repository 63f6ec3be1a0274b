use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use strum_macros::Display;

use crate::errors::GenerateError;

pub const ACTIVITYSTREAMS: &str = "https://www.w3.org/ns/activitystreams";
pub const PUBLIC: &str = "as:Public";
pub const ACTIVITY_JSON: &str = "application/activity+json";

pub fn activitystreams_context() -> Value {
    Value::String(ACTIVITYSTREAMS.to_string())
}

pub fn actor_context() -> Value {
    json!([
        ACTIVITYSTREAMS,
        {
            "pollOnly": {
                "@id": "https://purl.archive.org/socialweb/polling#pollOnly",
                "@type": "xsd:boolean"
            }
        }
    ])
}

pub fn collection_context() -> Value {
    json!([
        ACTIVITYSTREAMS,
        {
            "inboxOf": {
                "@id": "https://purl.archive.org/socialweb/owner#inboxOf",
                "@type": "@id"
            },
            "outboxOf": {
                "@id": "https://purl.archive.org/socialweb/owner#outboxOf",
                "@type": "@id"
            }
        }
    ])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CollectionKind {
    Inbox,
    Outbox,
}

/// One post as handed over by the content source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub slug: String,
    pub title: String,
    pub body: String,
    /// As authored; not yet validated.
    pub published_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "@context")]
    pub context: Value,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub preferred_username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub inbox: String,
    pub outbox: String,
    pub attributed_to: String,
    pub poll_only: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Webfinger {
    pub subject: String,
    pub links: Vec<WebfingerLink>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WebfingerLink {
    pub rel: &'static str,
    #[serde(rename = "type")]
    pub link_type: &'static str,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "@context")]
    pub context: Value,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub content: String,
    pub published: String,
    pub attributed_to: String,
    pub to: &'static str,
}

/// Reference to an [`Article`] embedded in a [`Create`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Create {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub actor: String,
    pub object: ObjectRef,
    pub published: String,
    pub to: &'static str,
}

impl Create {
    /// The form embedded in outbox pages.
    pub fn stub(&self) -> Create {
        Create {
            context: None,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedCollection {
    #[serde(rename = "@context")]
    pub context: Value,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbox_of: Option<String>,
    pub attributed_to: String,
    pub cc: &'static str,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_items: Option<Vec<Create>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedCollectionPage {
    #[serde(rename = "@context")]
    pub context: Value,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub part_of: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    pub ordered_items: Vec<Create>,
}

/// A document ready for the emitter. `path` is relative to the destination root.
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedDocument {
    pub path: PathBuf,
    pub document: Value,
}

impl EmittedDocument {
    pub fn new<T: Serialize>(path: PathBuf, document: &T) -> Result<Self, GenerateError> {
        match serde_json::to_value(document) {
            Ok(document) => Ok(EmittedDocument { path, document }),
            Err(source) => Err(GenerateError::Serialize { path, source }),
        }
    }
}

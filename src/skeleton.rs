//! Fixed-shape documents: actor, webfinger, inbox and the outbox root.

use crate::identity::Site;
use crate::types::{
    actor_context, collection_context, CollectionKind, OrderedCollection, Person, Webfinger,
    WebfingerLink, ACTIVITY_JSON, PUBLIC,
};

pub fn actor(site: &Site) -> Person {
    let identity = &site.identity;
    Person {
        context: actor_context(),
        id: identity.actor_id.clone(),
        kind: "Person",
        preferred_username: identity.preferred_username.clone(),
        name: identity.display_name.clone(),
        summary: site.summary.clone(),
        inbox: site.collection_url(CollectionKind::Inbox),
        outbox: site.collection_url(CollectionKind::Outbox),
        attributed_to: identity.actor_id.clone(),
        poll_only: true,
    }
}

pub fn webfinger(site: &Site) -> Webfinger {
    let identity = &site.identity;
    Webfinger {
        subject: format!("acct:{}@{}", identity.preferred_username, identity.host),
        links: vec![WebfingerLink {
            rel: "self",
            link_type: ACTIVITY_JSON,
            href: identity.actor_id.clone(),
        }],
    }
}

/// Publish-only: the inbox never has items.
pub fn inbox(site: &Site) -> OrderedCollection {
    OrderedCollection {
        context: collection_context(),
        id: site.collection_url(CollectionKind::Inbox),
        kind: "OrderedCollection",
        inbox_of: Some(site.identity.actor_id.clone()),
        outbox_of: None,
        attributed_to: site.identity.actor_id.clone(),
        cc: PUBLIC,
        total_items: 0,
        first: None,
        ordered_items: Some(Vec::new()),
    }
}

/// `first` points at the highest-numbered page, which holds the most recent
/// items when the source is oldest-first.
pub fn outbox(site: &Site, total_items: usize, page_count: usize) -> OrderedCollection {
    OrderedCollection {
        context: collection_context(),
        id: site.collection_url(CollectionKind::Outbox),
        kind: "OrderedCollection",
        inbox_of: None,
        outbox_of: Some(site.identity.actor_id.clone()),
        attributed_to: site.identity.actor_id.clone(),
        cc: PUBLIC,
        total_items,
        first: (page_count > 0).then(|| site.page_url(page_count)),
        ordered_items: None,
    }
}

//! One generation pass: content items and site config in, documents out.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::errors::{GenerateError, ProjectionError};
use crate::identity::Site;
use crate::paginate::paginate;
use crate::project::{project, Projection};
use crate::skeleton;
use crate::types::{CollectionKind, ContentItem, EmittedDocument};

#[derive(Debug, Default)]
pub struct Generation {
    pub documents: Vec<EmittedDocument>,
    pub skipped: Vec<ProjectionError>,
    pub total_items: usize,
    pub page_count: usize,
}

/// Projects each item, keeping source order and dropping items that cannot be
/// published, including any whose slug was already taken by an earlier item.
fn project_all(site: &Site, content: &[ContentItem]) -> (Vec<Projection>, Vec<ProjectionError>) {
    let mut slugs = HashSet::new();
    let mut projections = Vec::with_capacity(content.len());
    let mut skipped = Vec::new();
    for item in content {
        let result = project(site, item).and_then(|projection| {
            if slugs.insert(projection.slug.clone()) {
                Ok(projection)
            } else {
                Err(ProjectionError::DuplicateSlug {
                    source_name: item.title.clone(),
                    slug: projection.slug,
                })
            }
        });
        match result {
            Ok(projection) => projections.push(projection),
            Err(e) => {
                warn!(slug = %item.slug, error = %e, "skipping item");
                skipped.push(e);
            }
        }
    }
    (projections, skipped)
}

pub fn generate(content: &[ContentItem], config: &SiteConfig) -> Result<Generation, GenerateError> {
    let site = Site::resolve(config)?;
    let (projections, skipped) = project_all(&site, content);
    let pagination = paginate(&site, projections.iter().map(|p| &p.activity));

    let mut documents = vec![
        EmittedDocument::new(site.actor_path(), &skeleton::actor(&site))?,
        EmittedDocument::new(site.webfinger_path(), &skeleton::webfinger(&site))?,
        EmittedDocument::new(
            site.collection_path(CollectionKind::Inbox),
            &skeleton::inbox(&site),
        )?,
    ];
    for projection in &projections {
        documents.push(EmittedDocument::new(
            site.article_path(&projection.slug),
            &projection.article,
        )?);
        documents.push(EmittedDocument::new(
            site.activity_path(&projection.slug),
            &projection.activity,
        )?);
    }
    for (i, page) in pagination.pages.iter().enumerate() {
        documents.push(EmittedDocument::new(site.page_path(i + 1), page)?);
    }
    documents.push(EmittedDocument::new(
        site.collection_path(CollectionKind::Outbox),
        &skeleton::outbox(&site, pagination.total_items, pagination.page_count()),
    )?);

    info!(
        items = pagination.total_items,
        pages = pagination.page_count(),
        skipped = skipped.len(),
        "generated activitypub documents"
    );
    Ok(Generation {
        documents,
        skipped,
        total_items: pagination.total_items,
        page_count: pagination.page_count(),
    })
}

//! Chunks the outbox history into `OrderedCollectionPage`s.
//!
//! Pages are numbered from 1 in source order and hold at most `page_size`
//! items. Within a page each arriving item is put in front of the ones already
//! there, so an oldest-first source reads newest-first on every page. A page
//! links back to its predecessor through `prev`; there is no `next`.

use crate::identity::Site;
use crate::types::{activitystreams_context, CollectionKind, Create, OrderedCollectionPage};

#[derive(Clone, Debug, PartialEq)]
pub struct Pagination {
    pub pages: Vec<OrderedCollectionPage>,
    pub total_items: usize,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Running state of the reduction over the activity sequence.
struct PageFold {
    page_number: usize,
    items: Vec<Create>,
    written: Vec<OrderedCollectionPage>,
}

impl PageFold {
    fn new() -> PageFold {
        PageFold {
            page_number: 1,
            items: Vec::new(),
            written: Vec::new(),
        }
    }

    fn flush(mut self, site: &Site) -> PageFold {
        let n = self.page_number;
        self.written.push(OrderedCollectionPage {
            context: activitystreams_context(),
            id: site.page_url(n),
            kind: "OrderedCollectionPage",
            part_of: site.collection_url(CollectionKind::Outbox),
            prev: (n > 1).then(|| site.page_url(n - 1)),
            ordered_items: std::mem::take(&mut self.items),
        });
        self.page_number += 1;
        self
    }
}

pub fn paginate<'a, I>(site: &Site, activities: I) -> Pagination
where
    I: IntoIterator<Item = &'a Create>,
{
    let page_size = site.page_size.max(1);
    let mut state = activities
        .into_iter()
        .fold(PageFold::new(), |mut state, activity| {
            if state.items.len() == page_size {
                state = state.flush(site);
            }
            state.items.insert(0, activity.stub());
            state
        });
    if !state.items.is_empty() {
        state = state.flush(site);
    }

    let total_items = state.written.iter().map(|p| p.ordered_items.len()).sum();
    Pagination {
        pages: state.written,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::types::{ObjectRef, PUBLIC};

    fn site(page_size: usize) -> Site {
        let mut config = SiteConfig {
            url: Some("https://example.com".to_string()),
            ..Default::default()
        };
        config.activitypub.page_size = page_size;
        Site::resolve(&config).unwrap()
    }

    fn activities(site: &Site, count: usize) -> Vec<Create> {
        (1..=count)
            .map(|i| {
                let slug = format!("post-{i}");
                Create {
                    context: Some(activitystreams_context()),
                    id: site.activity_url(&slug),
                    kind: "Create",
                    actor: site.identity.actor_id.clone(),
                    object: ObjectRef {
                        id: site.article_url(&slug),
                        kind: "Article",
                        name: format!("Post {i}"),
                    },
                    published: format!("2025-08-{i:02}T00:00:00Z"),
                    to: PUBLIC,
                }
            })
            .collect()
    }

    fn sizes(pagination: &Pagination) -> Vec<usize> {
        pagination.pages.iter().map(|p| p.ordered_items.len()).collect()
    }

    #[test]
    fn five_items_two_per_page() {
        let site = site(2);
        let pagination = paginate(&site, &activities(&site, 5));
        assert_eq!(pagination.page_count(), 3);
        assert_eq!(pagination.total_items, 5);
        assert_eq!(sizes(&pagination), vec![2, 2, 1]);

        let ids: Vec<_> = pagination.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "https://example.com/activitypub/outbox/page-1.jsonld",
                "https://example.com/activitypub/outbox/page-2.jsonld",
                "https://example.com/activitypub/outbox/page-3.jsonld",
            ]
        );
        assert_eq!(pagination.pages[0].prev, None);
        assert_eq!(pagination.pages[1].prev.as_deref(), Some(ids[0]));
        assert_eq!(pagination.pages[2].prev.as_deref(), Some(ids[1]));
        for page in &pagination.pages {
            assert_eq!(page.kind, "OrderedCollectionPage");
            assert_eq!(page.part_of, "https://example.com/activitypub/outbox.jsonld");
        }
    }

    #[test]
    fn items_are_reversed_within_a_page() {
        let site = site(2);
        let pagination = paginate(&site, &activities(&site, 3));
        let names: Vec<Vec<&str>> = pagination
            .pages
            .iter()
            .map(|p| p.ordered_items.iter().map(|c| c.object.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["Post 2", "Post 1"], vec!["Post 3"]]);
    }

    #[test]
    fn page_items_are_stubs() {
        let site = site(10);
        let pagination = paginate(&site, &activities(&site, 1));
        let item = &pagination.pages[0].ordered_items[0];
        assert_eq!(item.context, None);
        assert!(item.id.contains("/activitypub/activities/"));
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let site = site(2);
        let pagination = paginate(&site, &activities(&site, 4));
        assert_eq!(sizes(&pagination), vec![2, 2]);
    }

    #[test]
    fn never_exceeds_page_size() {
        for count in 0..=25 {
            for page_size in 1..=6 {
                let site = site(page_size);
                let pagination = paginate(&site, &activities(&site, count));
                assert_eq!(pagination.page_count(), count.div_ceil(page_size));
                assert_eq!(pagination.total_items, count);
                let sizes = sizes(&pagination);
                assert!(sizes.iter().all(|&s| s <= page_size));
                if let Some((_, full)) = sizes.split_last() {
                    assert!(full.iter().all(|&s| s == page_size));
                }
            }
        }
    }

    #[test]
    fn no_items_no_pages() {
        let site = site(100);
        let pagination = paginate(&site, &Vec::<Create>::new());
        assert_eq!(pagination.page_count(), 0);
        assert_eq!(pagination.total_items, 0);
    }
}

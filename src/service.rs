//! Serving-side glue at the interface boundary.
//!
//! The HTTP plumbing, persisted storage, job scheduling and event
//! delivery are external collaborators; this module pins down the
//! contracts they meet: the request selector grammar, the storage file
//! naming scheme, the sitemap index composition and the collaborator
//! traits themselves.

use crate::builder::SitemapIndexWriter;
use crate::chain::ChainedIter;
use crate::datetime::W3cDateTime;
use crate::error::SitemapError;
use crate::selector::{find_sitemap_roots, sitemap_selector};
use crate::tree::TreeNode;
use std::io::Write;

/// Content type of every served sitemap document.
pub const CONTENT_TYPE: &str = "application/xml;charset=utf-8";

const INDEX_SELECTOR: &str = "sitemap-index";
const SITEMAP_SELECTOR: &str = "sitemap";

/// A parsed sitemap request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapRequest {
    /// The sitemap index of a top level root (`<root>.sitemap-index.xml`).
    Index,
    /// One sitemap document, addressed by its selector
    /// (`<root>.sitemap.xml` or `<root>.sitemap.<selector>.xml`).
    Sitemap { selector: String },
}

/// Parse the dot-separated request selectors. Returns `None` for
/// anything outside the grammar; the dispatch layer turns that into a
/// client error.
pub fn parse_request(selectors: &[&str]) -> Option<SitemapRequest> {
    match selectors {
        [INDEX_SELECTOR] => Some(SitemapRequest::Index),
        [SITEMAP_SELECTOR] => Some(SitemapRequest::Sitemap {
            selector: SITEMAP_SELECTOR.to_string(),
        }),
        [SITEMAP_SELECTOR, token] => Some(SitemapRequest::Sitemap {
            selector: (*token).to_string(),
        }),
        _ => None,
    }
}

/// The URL a sitemap file is served under.
///
/// The default sitemap's first file keeps the short `.sitemap.xml` form;
/// everything else carries its selector (with the `-<part>` suffix for
/// file parts beyond the first) as an extra token.
pub fn sitemap_location(base_url: &str, selector: &str, part: u32) -> String {
    let token = if part > 1 {
        format!("{selector}-{part}")
    } else {
        selector.to_string()
    };
    if token == SITEMAP_SELECTOR {
        format!("{base_url}.{SITEMAP_SELECTOR}.xml")
    } else {
        format!("{base_url}.{SITEMAP_SELECTOR}.{token}.xml")
    }
}

/// One persisted file part of a named sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSitemapPart {
    pub name: String,
    /// File part index, numbered from 1.
    pub part: u32,
    pub size: u64,
    pub entries: u64,
    pub last_modified: Option<W3cDateTime>,
}

/// Persisted storage of generated sitemap byte streams.
pub trait SitemapStorage {
    fn write(
        &mut self,
        root_path: &str,
        name: &str,
        data: &[u8],
        part: u32,
        entries: u64,
    ) -> Result<(), SitemapError>;

    /// All persisted file parts under a root, in storage order.
    fn list(&self, root_path: &str) -> Result<Vec<StoredSitemapPart>, SitemapError>;
}

/// Which sitemap names exist per root and which of them are generated
/// synchronously at request time instead of being read from storage.
pub trait GeneratorRegistry {
    fn names(&self, root_path: &str) -> Vec<String>;

    fn on_demand_names(&self, root_path: &str) -> Vec<String>;
}

/// Notification sink for storage mutations.
pub trait SitemapEventSink {
    fn updated(&self, root_path: &str, name: &str);

    fn purged(&self, root_path: &str, name: &str);
}

/// Render the sitemap index of a top level root.
///
/// On-demand sitemaps come first and carry no `<lastmod>`; persisted
/// file parts follow in storage order with their modification time.
/// On-demand roots are the descendants of `top_level_root` in discovery
/// order, then the root itself; a name that is also persisted is listed
/// from storage only.
pub fn write_index<N: TreeNode, W: Write>(
    out: W,
    base_url: &str,
    top_level_root: &N,
    storage: &dyn SitemapStorage,
    generators: &dyn GeneratorRegistry,
) -> Result<(), SitemapError> {
    let stored = storage.list(top_level_root.path())?;
    let mut index = SitemapIndexWriter::new(out)?;

    let roots = ChainedIter::pair(
        find_sitemap_roots(top_level_root),
        std::iter::once(top_level_root.clone()),
    );
    for root in roots {
        for name in generators.on_demand_names(root.path()) {
            if root.path() == top_level_root.path() && stored.iter().any(|p| p.name == name) {
                continue;
            }
            let selector = sitemap_selector(&root, top_level_root, &name);
            index.add_sitemap(&sitemap_location(base_url, &selector, 1), None)?;
        }
    }

    for part in &stored {
        let selector = sitemap_selector(top_level_root, top_level_root, &part.name);
        index.add_sitemap(
            &sitemap_location(base_url, &selector, part.part),
            part.last_modified.map(Into::into),
        )?;
    }

    index.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::DEFAULT_NAME;
    use crate::tree::MemoryTree;
    use std::collections::HashMap;

    const PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
    const INDEX: &str = "<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">";

    #[derive(Default)]
    struct FakeStorage {
        parts: Vec<StoredSitemapPart>,
    }

    impl SitemapStorage for FakeStorage {
        fn write(
            &mut self,
            _root_path: &str,
            name: &str,
            data: &[u8],
            part: u32,
            entries: u64,
        ) -> Result<(), SitemapError> {
            self.parts.push(StoredSitemapPart {
                name: name.to_string(),
                part,
                size: data.len() as u64,
                entries,
                last_modified: Some(W3cDateTime::from_unix_seconds(1_622_122_594)),
            });
            Ok(())
        }

        fn list(&self, _root_path: &str) -> Result<Vec<StoredSitemapPart>, SitemapError> {
            Ok(self.parts.clone())
        }
    }

    #[derive(Default)]
    struct FakeGenerators {
        on_demand: HashMap<String, Vec<String>>,
    }

    impl GeneratorRegistry for FakeGenerators {
        fn names(&self, root_path: &str) -> Vec<String> {
            self.on_demand_names(root_path)
        }

        fn on_demand_names(&self, root_path: &str) -> Vec<String> {
            self.on_demand.get(root_path).cloned().unwrap_or_default()
        }
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(parse_request(&["sitemap-index"]), Some(SitemapRequest::Index));
        assert_eq!(
            parse_request(&["sitemap"]),
            Some(SitemapRequest::Sitemap {
                selector: "sitemap".to_string()
            })
        );
        assert_eq!(
            parse_request(&["sitemap", "news-sitemap-2"]),
            Some(SitemapRequest::Sitemap {
                selector: "news-sitemap-2".to_string()
            })
        );
        assert_eq!(parse_request(&["sitemap-index", "somethingelse"]), None);
        assert_eq!(parse_request(&["sitemap", "something", "else"]), None);
        assert_eq!(parse_request(&["unknown"]), None);
        assert_eq!(parse_request(&[]), None);
    }

    #[test]
    fn test_sitemap_location() {
        assert_eq!(sitemap_location("/site/de", "sitemap", 1), "/site/de.sitemap.xml");
        assert_eq!(
            sitemap_location("/site/de", "sitemap", 2),
            "/site/de.sitemap.sitemap-2.xml"
        );
        assert_eq!(
            sitemap_location("/site/de", "news-sitemap", 1),
            "/site/de.sitemap.news-sitemap.xml"
        );
    }

    #[test]
    fn test_index_of_multi_file_sitemap() {
        // three persisted parts of one name share their lastmod and get
        // numbered locations from the second part on
        let mut tree = MemoryTree::new();
        tree.add_content_flagged("/content/site/de");
        let root = tree.node("/content/site/de").unwrap();

        let mut storage = FakeStorage::default();
        for part in 1..=3 {
            storage
                .write("/content/site/de", DEFAULT_NAME, &[], part, 0)
                .unwrap();
        }

        let mut out = Vec::new();
        write_index(&mut out, "/site/de", &root, &storage, &FakeGenerators::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{PROLOG}{INDEX}\
                <sitemap><loc>/site/de.sitemap.xml</loc><lastmod>2021-05-27T13:36:34Z</lastmod></sitemap>\
                <sitemap><loc>/site/de.sitemap.sitemap-2.xml</loc><lastmod>2021-05-27T13:36:34Z</lastmod></sitemap>\
                <sitemap><loc>/site/de.sitemap.sitemap-3.xml</loc><lastmod>2021-05-27T13:36:34Z</lastmod></sitemap>\
                </sitemapindex>"
            )
        );
    }

    #[test]
    fn test_index_mixes_on_demand_and_stored() {
        let mut tree = MemoryTree::new();
        tree.add_content_flagged("/content/site/de");
        let root = tree.node("/content/site/de").unwrap();

        let mut storage = FakeStorage::default();
        storage
            .write("/content/site/de", DEFAULT_NAME, &[], 1, 0)
            .unwrap();

        let mut generators = FakeGenerators::default();
        generators.on_demand.insert(
            "/content/site/de".to_string(),
            vec!["news".to_string(), DEFAULT_NAME.to_string()],
        );

        let mut out = Vec::new();
        write_index(&mut out, "/site/de", &root, &storage, &generators).unwrap();
        // the default sitemap is persisted, so it is listed from storage
        // and not again as on-demand
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{PROLOG}{INDEX}\
                <sitemap><loc>/site/de.sitemap.news-sitemap.xml</loc></sitemap>\
                <sitemap><loc>/site/de.sitemap.xml</loc><lastmod>2021-05-27T13:36:34Z</lastmod></sitemap>\
                </sitemapindex>"
            )
        );
    }

    #[test]
    fn test_index_lists_nested_on_demand_roots() {
        let mut tree = MemoryTree::new();
        tree.add_content_flagged("/content/site/de");
        tree.add_content_flagged("/content/site/de/products");
        tree.add_content_flagged("/content/site/de/categories");
        let root = tree.node("/content/site/de").unwrap();

        let mut generators = FakeGenerators::default();
        for path in [
            "/content/site/de/products",
            "/content/site/de/categories",
        ] {
            generators
                .on_demand
                .insert(path.to_string(), vec![DEFAULT_NAME.to_string()]);
        }
        generators.on_demand.insert(
            "/content/site/de".to_string(),
            vec!["news".to_string(), DEFAULT_NAME.to_string()],
        );

        let mut out = Vec::new();
        write_index(
            &mut out,
            "/site/de",
            &root,
            &FakeStorage::default(),
            &generators,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{PROLOG}{INDEX}\
                <sitemap><loc>/site/de.sitemap.categories-sitemap.xml</loc></sitemap>\
                <sitemap><loc>/site/de.sitemap.products-sitemap.xml</loc></sitemap>\
                <sitemap><loc>/site/de.sitemap.news-sitemap.xml</loc></sitemap>\
                <sitemap><loc>/site/de.sitemap.xml</loc></sitemap>\
                </sitemapindex>"
            )
        );
    }
}

//! Streaming sitemap and sitemap index generation.
//!
//! The crate maps content-tree locations to the request selectors that
//! address their sitemaps (and back), and serializes sitemap documents
//! incrementally with pluggable, namespaced url extensions (image,
//! video, news and alternate-language annotations).
//!
//! ```
//! use sitemapper::builder::SitemapWriter;
//! use sitemapper::extension::ExtensionRegistry;
//!
//! # fn main() -> Result<(), sitemapper::SitemapError> {
//! let registry = ExtensionRegistry::with_defaults();
//! let mut out = Vec::new();
//! let mut sitemap = SitemapWriter::new(&mut out, &registry)?;
//! sitemap.add_url("https://example.com/")?.priority(0.8);
//! sitemap.close()?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod chain;
pub mod datetime;
pub mod error;
pub mod extension;
pub mod selector;
pub mod service;
pub mod tree;
pub mod value;

pub use error::SitemapError;

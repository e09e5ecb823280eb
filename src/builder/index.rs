//! Streaming writer for `<sitemapindex>` documents.

use crate::builder::SITEMAP_NAMESPACE;
use crate::builder::xml::XmlWriter;
use crate::datetime::SitemapDate;
use crate::error::SitemapError;
use std::io::Write;

/// Streaming writer for one sitemap index document. Entries are plain
/// location/lastmod pairs and hit the sink immediately.
pub struct SitemapIndexWriter<W: Write> {
    xml: XmlWriter<W>,
    closed: bool,
}

impl<W: Write> SitemapIndexWriter<W> {
    pub fn new(out: W) -> Result<Self, SitemapError> {
        let mut xml = XmlWriter::new(out);
        xml.declaration()?;
        xml.start("sitemapindex")?;
        xml.attribute("xmlns", SITEMAP_NAMESPACE)?;
        xml.commit()?;
        Ok(Self { xml, closed: false })
    }

    pub fn add_sitemap(
        &mut self,
        location: &str,
        last_modified: Option<SitemapDate>,
    ) -> Result<(), SitemapError> {
        if self.closed {
            return Err(SitemapError::Closed);
        }
        self.xml.start("sitemap")?;
        self.xml.element("loc", location)?;
        if let Some(last_modified) = last_modified {
            self.xml.element("lastmod", &last_modified.to_string())?;
        }
        self.xml.end()
    }

    /// Finish the document: writes `</sitemapindex>` and flushes the
    /// sink. Any further write fails with [`SitemapError::Closed`].
    pub fn close(&mut self) -> Result<(), SitemapError> {
        if self.closed {
            return Err(SitemapError::Closed);
        }
        self.closed = true;
        self.xml.end()?;
        self.xml.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.xml.into_inner()
    }
}

//! Streaming sitemap document builders.
//!
//! [`SitemapWriter`] emits a `<urlset>` document url by url without
//! buffering it, so arbitrarily large sitemaps cost constant memory.
//! Url records are built lazily: the entry returned by
//! [`SitemapWriter::add_url`] stays open for decoration until the next
//! url is added or the document is closed, and only then hits the sink.
//! [`SitemapIndexWriter`] does the same for `<sitemapindex>` documents.

mod index;
pub(crate) mod xml;

pub use index::SitemapIndexWriter;
pub use xml::ScopedWriter;

use crate::datetime::SitemapDate;
use crate::error::SitemapError;
use crate::extension::{
    AlternateLanguageExtension, ExtensionData, ExtensionKind, ExtensionRegistry, ImageExtension,
    NewsExtension, VideoExtension,
};
use crate::value;
use std::fmt;
use std::io::Write;
use xml::XmlWriter;

/// The sitemap protocol namespace, bound to the default prefix.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// How frequently a page is likely to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pending `<url>` record.
///
/// The entry stays mutable until the enclosing writer moves on to the
/// next url or closes; nothing is written before that point.
pub struct UrlEntry<'r> {
    location: String,
    last_modified: Option<SitemapDate>,
    change_frequency: Option<ChangeFrequency>,
    priority: Option<f64>,
    extensions: Vec<ExtensionData>,
    registry: &'r ExtensionRegistry,
}

impl<'r> UrlEntry<'r> {
    fn new(location: String, registry: &'r ExtensionRegistry) -> Self {
        Self {
            location,
            last_modified: None,
            change_frequency: None,
            priority: None,
            extensions: Vec::new(),
            registry,
        }
    }

    pub fn last_modified(&mut self, date: impl Into<SitemapDate>) -> &mut Self {
        self.last_modified = Some(date.into());
        self
    }

    pub fn change_frequency(&mut self, frequency: ChangeFrequency) -> &mut Self {
        self.change_frequency = Some(frequency);
        self
    }

    /// Set the priority, clamped into `[0.0, 1.0]`.
    pub fn priority(&mut self, priority: f64) -> &mut Self {
        self.priority = Some(value::clamp_priority(priority));
        self
    }

    /// Attach a fresh extension record of the given kind, or `None` when
    /// no provider is registered for it. Each call creates a new record,
    /// so a url can carry several images or alternate links.
    pub fn extension(&mut self, kind: ExtensionKind) -> Option<&mut ExtensionData> {
        let data = self.registry.new_extension(kind)?;
        self.extensions.push(data);
        self.extensions.last_mut()
    }

    pub fn image(&mut self) -> Option<&mut ImageExtension> {
        self.extension(ExtensionKind::Image)?.as_image_mut()
    }

    pub fn video(&mut self) -> Option<&mut VideoExtension> {
        self.extension(ExtensionKind::Video)?.as_video_mut()
    }

    pub fn news(&mut self) -> Option<&mut NewsExtension> {
        self.extension(ExtensionKind::News)?.as_news_mut()
    }

    pub fn alternate_language(&mut self) -> Option<&mut AlternateLanguageExtension> {
        self.extension(ExtensionKind::AlternateLanguage)?.as_alternate_mut()
    }

    fn write<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<(), SitemapError> {
        xml.start("url")?;
        xml.element("loc", &self.location)?;
        if let Some(last_modified) = &self.last_modified {
            xml.element("lastmod", &last_modified.to_string())?;
        }
        if let Some(frequency) = self.change_frequency {
            xml.element("changefreq", frequency.as_str())?;
        }
        if let Some(priority) = self.priority {
            xml.element("priority", &value::format_priority(priority))?;
        }
        for data in &self.extensions {
            // extensions always come from the registry, so a descriptor
            // must exist for them
            if let Some(descriptor) = self.registry.descriptor(data.kind()) {
                let mut scoped =
                    ScopedWriter::new(xml, descriptor.prefix, descriptor.namespace);
                data.render(&mut scoped)?;
            }
        }
        xml.end()
    }
}

/// Streaming writer for one `<urlset>` document.
pub struct SitemapWriter<'r, W: Write> {
    xml: XmlWriter<W>,
    registry: &'r ExtensionRegistry,
    pending: Option<UrlEntry<'r>>,
    closed: bool,
}

impl<'r, W: Write> SitemapWriter<'r, W> {
    /// Start a new document: writes the XML prolog and the `<urlset>`
    /// start tag with the protocol namespace plus one declaration per
    /// registered extension namespace.
    pub fn new(out: W, registry: &'r ExtensionRegistry) -> Result<Self, SitemapError> {
        let mut xml = XmlWriter::new(out);
        xml.declaration()?;
        xml.start("urlset")?;
        xml.attribute("xmlns", SITEMAP_NAMESPACE)?;
        for (prefix, namespace) in registry.namespaces() {
            xml.attribute(&format!("xmlns:{prefix}"), namespace)?;
        }
        xml.commit()?;
        Ok(Self {
            xml,
            registry,
            pending: None,
            closed: false,
        })
    }

    /// Add a url and return its entry for decoration. The previous
    /// entry, if any, is flushed to the sink first.
    pub fn add_url(&mut self, location: impl Into<String>) -> Result<&mut UrlEntry<'r>, SitemapError> {
        if self.closed {
            return Err(SitemapError::Closed);
        }
        self.flush_pending()?;
        Ok(self
            .pending
            .insert(UrlEntry::new(location.into(), self.registry)))
    }

    /// Finish the document: flushes the last entry, writes `</urlset>`
    /// and flushes the sink. Any further write fails with
    /// [`SitemapError::Closed`].
    pub fn close(&mut self) -> Result<(), SitemapError> {
        if self.closed {
            return Err(SitemapError::Closed);
        }
        self.flush_pending()?;
        self.closed = true;
        self.xml.end()?;
        self.xml.flush()?;
        Ok(())
    }

    /// Consume the writer and hand back the sink.
    pub fn into_inner(self) -> W {
        self.xml.into_inner()
    }

    fn flush_pending(&mut self) -> Result<(), SitemapError> {
        if let Some(entry) = self.pending.take() {
            entry.write(&mut self.xml)?;
        }
        Ok(())
    }
}

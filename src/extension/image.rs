//! Google image sitemap extension records.

use crate::builder::xml::ScopedWriter;
use crate::error::SitemapError;
use std::io::Write;

pub(super) const NAMESPACE: &str = "http://www.google.com/schemas/sitemap-image/1.1";
pub(super) const PREFIX: &str = "image";
pub(super) const LOCAL_NAME: &str = "image";

/// One `<image:image>` record. The location is mandatory; a record
/// without one is dropped from the output.
#[derive(Debug, Default)]
pub struct ImageExtension {
    location: Option<String>,
    caption: Option<String>,
    geo_location: Option<String>,
    title: Option<String>,
    license: Option<String>,
}

impl ImageExtension {
    pub fn location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = Some(location.into());
        self
    }

    pub fn caption(&mut self, caption: impl Into<String>) -> &mut Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn geo_location(&mut self, geo_location: impl Into<String>) -> &mut Self {
        self.geo_location = Some(geo_location.into());
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn license(&mut self, license: impl Into<String>) -> &mut Self {
        self.license = Some(license.into());
        self
    }

    pub(crate) fn render<W: Write>(&self, xml: &mut ScopedWriter<'_, W>) -> Result<(), SitemapError> {
        let Some(location) = &self.location else {
            log::info!("skipping image without a location");
            return Ok(());
        };
        xml.start(LOCAL_NAME)?;
        xml.element("loc", location)?;
        if let Some(caption) = &self.caption {
            xml.element("caption", caption)?;
        }
        if let Some(geo_location) = &self.geo_location {
            xml.element("geo_location", geo_location)?;
        }
        if let Some(title) = &self.title {
            xml.element("title", title)?;
        }
        if let Some(license) = &self.license {
            xml.element("license", license)?;
        }
        xml.end()
    }
}

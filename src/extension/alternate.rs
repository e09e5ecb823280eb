//! Alternate-language link extension records.
//!
//! Renders the `<xhtml:link rel="alternate">` annotation that ties the
//! translations of a page together.

use crate::builder::xml::ScopedWriter;
use crate::error::SitemapError;
use crate::extension::Locale;
use std::io::Write;

pub(super) const NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
pub(super) const PREFIX: &str = "xhtml";
pub(super) const LOCAL_NAME: &str = "link";

/// The `hreflang` value of an alternate link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hreflang {
    /// The `x-default` fallback for unmatched languages.
    Default,
    Locale(Locale),
}

/// One `<xhtml:link rel="alternate" hreflang=".." href=".."/>` record.
/// Both the locale and the href are mandatory; a record missing either
/// is dropped.
#[derive(Debug, Default)]
pub struct AlternateLanguageExtension {
    hreflang: Option<Hreflang>,
    href: Option<String>,
}

impl AlternateLanguageExtension {
    pub fn locale(&mut self, locale: Locale) -> &mut Self {
        self.hreflang = Some(Hreflang::Locale(locale));
        self
    }

    /// Mark this link as the `x-default` fallback.
    pub fn default_locale(&mut self) -> &mut Self {
        self.hreflang = Some(Hreflang::Default);
        self
    }

    pub fn href(&mut self, href: impl Into<String>) -> &mut Self {
        self.href = Some(href.into());
        self
    }

    pub(crate) fn render<W: Write>(&self, xml: &mut ScopedWriter<'_, W>) -> Result<(), SitemapError> {
        let (Some(hreflang), Some(href)) = (&self.hreflang, &self.href) else {
            log::info!("skipping alternate link missing locale or href");
            return Ok(());
        };
        let hreflang = match hreflang {
            Hreflang::Default => "x-default".to_string(),
            Hreflang::Locale(locale) => locale.to_string(),
        };
        xml.start(LOCAL_NAME)?;
        xml.attribute("rel", "alternate")?;
        xml.attribute("hreflang", &hreflang)?;
        xml.attribute("href", href)?;
        xml.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::xml::XmlWriter;

    fn render(link: &AlternateLanguageExtension) -> String {
        let mut xml = XmlWriter::new(Vec::new());
        let mut scoped = ScopedWriter::new(&mut xml, PREFIX, NAMESPACE);
        link.render(&mut scoped).unwrap();
        String::from_utf8(xml.into_inner()).unwrap()
    }

    #[test]
    fn test_locale_link() {
        let mut link = AlternateLanguageExtension::default();
        link.locale(Locale::parse("fr-CH").unwrap())
            .href("https://example.com/fr-ch/page.html");
        assert_eq!(
            render(&link),
            "<xhtml:link rel=\"alternate\" hreflang=\"fr-CH\" \
             href=\"https://example.com/fr-ch/page.html\"/>"
        );
    }

    #[test]
    fn test_default_locale_link() {
        let mut link = AlternateLanguageExtension::default();
        link.default_locale().href("https://example.com/page.html");
        assert_eq!(
            render(&link),
            "<xhtml:link rel=\"alternate\" hreflang=\"x-default\" \
             href=\"https://example.com/page.html\"/>"
        );
    }

    #[test]
    fn test_incomplete_record_renders_nothing() {
        let mut link = AlternateLanguageExtension::default();
        link.href("https://example.com/page.html");
        assert_eq!(render(&link), "");
    }
}

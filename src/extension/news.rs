//! Google news sitemap extension records.

use crate::builder::xml::ScopedWriter;
use crate::datetime::SitemapDate;
use crate::error::SitemapError;
use crate::extension::Locale;
use regex::Regex;
use std::fmt;
use std::io::Write;
use std::sync::LazyLock;

pub(super) const NAMESPACE: &str = "http://www.google.com/schemas/sitemap-news/0.9";
pub(super) const PREFIX: &str = "news";
pub(super) const LOCAL_NAME: &str = "news";

/// Stock tickers must look like `EXCHANGE:SYMBOL`, ASCII word
/// characters only.
static STOCK_TICKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z_]+:[0-9A-Za-z_]+$").expect("stock ticker pattern")
});

const MAX_STOCK_TICKERS: usize = 5;

/// Access restriction of a news article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRestriction {
    Subscription,
    Registration,
}

impl AccessRestriction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subscription => "Subscription",
            Self::Registration => "Registration",
        }
    }
}

impl fmt::Display for AccessRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editorial genre of a news article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    PressRelease,
    Satire,
    Blog,
    OpEd,
    Opinion,
    UserGenerated,
}

impl Genre {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PressRelease => "PressRelease",
            Self::Satire => "Satire",
            Self::Blog => "Blog",
            Self::OpEd => "OpEd",
            Self::Opinion => "Opinion",
            Self::UserGenerated => "UserGenerated",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<news:news>` record. Publication name, language, date and title
/// are all mandatory; a record missing any of them is dropped.
#[derive(Debug, Default)]
pub struct NewsExtension {
    publication_name: Option<String>,
    publication_language: Option<Locale>,
    publication_date: Option<SitemapDate>,
    title: Option<String>,
    access: Option<AccessRestriction>,
    genres: Vec<Genre>,
    keywords: Vec<String>,
    stock_tickers: Vec<String>,
}

impl NewsExtension {
    pub fn publication(&mut self, name: impl Into<String>, language: Locale) -> &mut Self {
        self.publication_name = Some(name.into());
        self.publication_language = Some(language);
        self
    }

    pub fn publication_date(&mut self, date: impl Into<SitemapDate>) -> &mut Self {
        self.publication_date = Some(date.into());
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn access_restriction(&mut self, access: AccessRestriction) -> &mut Self {
        self.access = Some(access);
        self
    }

    pub fn genres(&mut self, genres: impl IntoIterator<Item = Genre>) -> &mut Self {
        self.genres = genres.into_iter().collect();
        self
    }

    pub fn keywords(&mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stock tickers. Entries that do not match the
    /// `EXCHANGE:SYMBOL` shape are dropped, and at most five are kept.
    pub fn stock_tickers(
        &mut self,
        tickers: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.stock_tickers = tickers
            .into_iter()
            .map(Into::into)
            .filter(|ticker| {
                let valid = STOCK_TICKER.is_match(ticker);
                if !valid {
                    log::warn!("dropping malformed stock ticker: {ticker}");
                }
                valid
            })
            .take(MAX_STOCK_TICKERS)
            .collect();
        self
    }

    pub(crate) fn render<W: Write>(&self, xml: &mut ScopedWriter<'_, W>) -> Result<(), SitemapError> {
        let (Some(name), Some(language), Some(date), Some(title)) = (
            &self.publication_name,
            &self.publication_language,
            &self.publication_date,
            &self.title,
        ) else {
            log::info!("skipping news missing publication, date or title");
            return Ok(());
        };
        xml.start(LOCAL_NAME)?;
        xml.start("publication")?;
        xml.element("name", name)?;
        xml.element("language", &language.news_language())?;
        xml.end()?;
        if let Some(access) = self.access {
            xml.element("access", access.as_str())?;
        }
        if !self.genres.is_empty() {
            let genres: Vec<&str> = self.genres.iter().map(|g| g.as_str()).collect();
            xml.element("genres", &genres.join(","))?;
        }
        xml.element("publication_date", &date.to_string())?;
        xml.element("title", title)?;
        if !self.keywords.is_empty() {
            xml.element("keywords", &self.keywords.join(","))?;
        }
        if !self.stock_tickers.is_empty() {
            xml.element("stock_tickers", &self.stock_tickers.join(","))?;
        }
        xml.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::xml::XmlWriter;
    use crate::datetime::W3cDateTime;

    fn render(news: &NewsExtension) -> String {
        let mut xml = XmlWriter::new(Vec::new());
        let mut scoped = ScopedWriter::new(&mut xml, PREFIX, NAMESPACE);
        news.render(&mut scoped).unwrap();
        String::from_utf8(xml.into_inner()).unwrap()
    }

    #[test]
    fn test_minimal_record() {
        let mut news = NewsExtension::default();
        news.publication("The Example Times", Locale::parse("en").unwrap())
            .publication_date(SitemapDate::parse("2021-05-27").unwrap())
            .title("More Examples Found");
        assert_eq!(
            render(&news),
            "<news:news>\
                <news:publication>\
                <news:name>The Example Times</news:name>\
                <news:language>en</news:language>\
                </news:publication>\
                <news:publication_date>2021-05-27</news:publication_date>\
                <news:title>More Examples Found</news:title>\
            </news:news>"
        );
    }

    #[test]
    fn test_full_record() {
        let mut news = NewsExtension::default();
        news.publication("Example", Locale::parse("en").unwrap())
            .publication_date(W3cDateTime::from_unix_seconds(1_622_122_594))
            .title("title")
            .access_restriction(AccessRestriction::Subscription)
            .genres([Genre::Blog, Genre::OpEd])
            .keywords(["foo", "bar"])
            .stock_tickers(["NASDAQ:EXMPL", "NYSE:EXM"]);
        assert_eq!(
            render(&news),
            "<news:news>\
                <news:publication>\
                <news:name>Example</news:name>\
                <news:language>en</news:language>\
                </news:publication>\
                <news:access>Subscription</news:access>\
                <news:genres>Blog,OpEd</news:genres>\
                <news:publication_date>2021-05-27T13:36:34Z</news:publication_date>\
                <news:title>title</news:title>\
                <news:keywords>foo,bar</news:keywords>\
                <news:stock_tickers>NASDAQ:EXMPL,NYSE:EXM</news:stock_tickers>\
            </news:news>"
        );
    }

    #[test]
    fn test_chinese_language_keeps_region() {
        let mut news = NewsExtension::default();
        news.publication("p", Locale::parse("zh-TW").unwrap())
            .publication_date(SitemapDate::parse("2021-05-27").unwrap())
            .title("t");
        assert!(render(&news).contains("<news:language>zh-tw</news:language>"));

        let mut news = NewsExtension::default();
        news.publication("p", Locale::parse("fr-CH").unwrap())
            .publication_date(SitemapDate::parse("2021-05-27").unwrap())
            .title("t");
        assert!(render(&news).contains("<news:language>fr</news:language>"));
    }

    #[test]
    fn test_malformed_stock_tickers_dropped_and_capped() {
        let mut news = NewsExtension::default();
        news.stock_tickers(["bad ticker", "A:1", "B:2", "C:3", "D:4", "E:5", "F:6"]);
        assert_eq!(news.stock_tickers, vec!["A:1", "B:2", "C:3", "D:4", "E:5"]);
    }

    #[test]
    fn test_stock_tickers_are_ascii_only() {
        let mut news = NewsExtension::default();
        news.stock_tickers(["NASDAQ:ÉXM", "BÖRSE:X", "NASDAQ:EXM"]);
        assert_eq!(news.stock_tickers, vec!["NASDAQ:EXM"]);
    }

    #[test]
    fn test_incomplete_record_renders_nothing() {
        let mut news = NewsExtension::default();
        news.title("title only");
        assert_eq!(render(&news), "");
    }
}

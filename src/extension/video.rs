//! Google video sitemap extension records.

use crate::builder::xml::ScopedWriter;
use crate::datetime::SitemapDate;
use crate::error::SitemapError;
use crate::value;
use std::fmt;
use std::io::Write;

pub(super) const NAMESPACE: &str = "http://www.google.com/schemas/sitemap-video/1.1";
pub(super) const PREFIX: &str = "video";
pub(super) const LOCAL_NAME: &str = "video";

const MAX_TAGS: usize = 32;

/// Whether a restriction lists the permitted or the forbidden set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution platform of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Mobile,
    Tv,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceType {
    Purchase,
    Rent,
}

impl PriceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Rent => "rent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Sd,
    Hd,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sd => "sd",
            Self::Hd => "hd",
        }
    }
}

#[derive(Debug)]
struct Price {
    value: f64,
    currency: String,
    price_type: Option<PriceType>,
    resolution: Option<Resolution>,
}

#[derive(Debug)]
struct CountryRestriction {
    access: Access,
    countries: String,
}

#[derive(Debug)]
struct PlatformRestriction {
    access: Access,
    platforms: String,
}

/// One `<video:video>` record.
///
/// Thumbnail, title and description are mandatory; a record missing any
/// of them is dropped. A video must additionally carry a content
/// location or a player location, and a record with neither fails the
/// whole write.
#[derive(Debug, Default)]
pub struct VideoExtension {
    thumbnail_location: Option<String>,
    title: Option<String>,
    description: Option<String>,
    content_location: Option<String>,
    player_location: Option<String>,
    duration: Option<i64>,
    expiration_date: Option<SitemapDate>,
    rating: Option<f64>,
    view_count: Option<i64>,
    publication_date: Option<SitemapDate>,
    tags: Vec<String>,
    category: Option<String>,
    family_friendly: Option<bool>,
    country_restriction: Option<CountryRestriction>,
    platform_restriction: Option<PlatformRestriction>,
    prices: Vec<Price>,
    requires_subscription: Option<bool>,
    uploader: Option<String>,
    uploader_info: Option<String>,
    live: Option<bool>,
}

impl VideoExtension {
    pub fn thumbnail_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.thumbnail_location = Some(location.into());
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn content_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.content_location = Some(location.into());
        self
    }

    pub fn player_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.player_location = Some(location.into());
        self
    }

    /// Set the duration in seconds, clamped into `[0, 28800]`.
    pub fn duration(&mut self, seconds: i64) -> &mut Self {
        self.duration = Some(value::clamp_duration(seconds));
        self
    }

    pub fn expiration_date(&mut self, date: impl Into<SitemapDate>) -> &mut Self {
        self.expiration_date = Some(date.into());
        self
    }

    /// Set the star rating, clamped into `[0.0, 5.0]`.
    pub fn rating(&mut self, rating: f64) -> &mut Self {
        self.rating = Some(value::clamp_rating(rating));
        self
    }

    /// Set the view count; negative counts are clamped to zero.
    pub fn view_count(&mut self, count: i64) -> &mut Self {
        self.view_count = Some(value::clamp_view_count(count));
        self
    }

    pub fn publication_date(&mut self, date: impl Into<SitemapDate>) -> &mut Self {
        self.publication_date = Some(date.into());
        self
    }

    /// Set the tags; at most 32 are kept.
    pub fn tags(&mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.tags = tags.into_iter().map(Into::into).take(MAX_TAGS).collect();
        self
    }

    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.category = Some(category.into());
        self
    }

    pub fn family_friendly(&mut self, family_friendly: bool) -> &mut Self {
        self.family_friendly = Some(family_friendly);
        self
    }

    /// Restrict the video to (or from) a set of ISO 3166 country codes.
    /// Codes are uppercased; anything that is not exactly two letters is
    /// dropped, and the restriction is kept only when at least one code
    /// remains.
    pub fn access_restriction(
        &mut self,
        access: Access,
        countries: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> &mut Self {
        let countries: Vec<String> = countries
            .into_iter()
            .map(|code| code.as_ref().to_uppercase())
            .filter(|code| {
                let valid = code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic());
                if !valid {
                    log::warn!("dropping malformed country code: {code}");
                }
                valid
            })
            .collect();
        self.country_restriction = if countries.is_empty() {
            None
        } else {
            Some(CountryRestriction {
                access,
                countries: countries.join(" "),
            })
        };
        self
    }

    pub fn platform_restriction(
        &mut self,
        access: Access,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> &mut Self {
        let platforms: Vec<&str> = platforms.into_iter().map(Platform::as_str).collect();
        self.platform_restriction = if platforms.is_empty() {
            None
        } else {
            Some(PlatformRestriction {
                access,
                platforms: platforms.join(" "),
            })
        };
        self
    }

    pub fn price(
        &mut self,
        value: f64,
        currency: impl Into<String>,
        price_type: Option<PriceType>,
        resolution: Option<Resolution>,
    ) -> &mut Self {
        self.prices.push(Price {
            value,
            currency: currency.into(),
            price_type,
            resolution,
        });
        self
    }

    pub fn requires_subscription(&mut self, requires: bool) -> &mut Self {
        self.requires_subscription = Some(requires);
        self
    }

    pub fn uploader(&mut self, uploader: impl Into<String>) -> &mut Self {
        self.uploader = Some(uploader.into());
        self
    }

    pub fn uploader_info(&mut self, info: impl Into<String>) -> &mut Self {
        self.uploader_info = Some(info.into());
        self
    }

    pub fn live(&mut self, live: bool) -> &mut Self {
        self.live = Some(live);
        self
    }

    pub(crate) fn render<W: Write>(&self, xml: &mut ScopedWriter<'_, W>) -> Result<(), SitemapError> {
        let (Some(thumbnail), Some(title), Some(description)) = (
            &self.thumbnail_location,
            &self.title,
            &self.description,
        ) else {
            log::info!("skipping video missing thumbnail, title or description");
            return Ok(());
        };
        xml.start(LOCAL_NAME)?;
        xml.element("thumbnail_loc", thumbnail)?;
        xml.element("title", title)?;
        xml.element("description", description)?;
        match (&self.content_location, &self.player_location) {
            (Some(content), _) => xml.element("content_loc", content)?,
            (None, Some(player)) => xml.element("player_loc", player)?,
            (None, None) => return Err(SitemapError::MissingField("content_loc or player_loc")),
        }
        if let Some(duration) = self.duration {
            xml.element("duration", &duration.to_string())?;
        }
        if let Some(expiration) = &self.expiration_date {
            xml.element("expiration_date", &expiration.to_string())?;
        }
        if let Some(rating) = self.rating {
            xml.element("rating", &value::format_decimal(rating))?;
        }
        if let Some(count) = self.view_count {
            xml.element("view_count", &count.to_string())?;
        }
        if let Some(publication) = &self.publication_date {
            xml.element("publication_date", &publication.to_string())?;
        }
        for tag in &self.tags {
            xml.element("tag", tag)?;
        }
        if let Some(category) = &self.category {
            xml.element("category", category)?;
        }
        if let Some(family_friendly) = self.family_friendly {
            xml.element("family_friendly", value::yes_no(family_friendly))?;
        }
        if let Some(restriction) = &self.country_restriction {
            xml.start("restriction")?;
            xml.attribute("relationship", restriction.access.as_str())?;
            xml.text(&restriction.countries)?;
            xml.end()?;
        }
        for price in &self.prices {
            xml.start("price")?;
            xml.attribute("currency", &price.currency)?;
            if let Some(price_type) = price.price_type {
                xml.attribute("type", price_type.as_str())?;
            }
            if let Some(resolution) = price.resolution {
                xml.attribute("resolution", resolution.as_str())?;
            }
            xml.text(&value::format_decimal(price.value))?;
            xml.end()?;
        }
        if let Some(requires) = self.requires_subscription {
            xml.element("requires_subscription", value::yes_no(requires))?;
        }
        if let Some(uploader) = &self.uploader {
            xml.start("uploader")?;
            if let Some(info) = &self.uploader_info {
                xml.attribute("info", info)?;
            }
            xml.text(uploader)?;
            xml.end()?;
        }
        if let Some(restriction) = &self.platform_restriction {
            xml.start("platform")?;
            xml.attribute("relationship", restriction.access.as_str())?;
            xml.text(&restriction.platforms)?;
            xml.end()?;
        }
        if let Some(live) = self.live {
            xml.element("live", value::yes_no(live))?;
        }
        xml.end()
    }
}

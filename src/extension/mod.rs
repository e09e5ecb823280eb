//! Pluggable, namespaced url extensions.
//!
//! Every url entry can carry extension fragments defined by external
//! sub-specifications (image, video, news, alternate-language sitemaps).
//! Each capability is identified by a stable [`ExtensionKind`] tag and
//! registered in an [`ExtensionRegistry`] together with its namespace,
//! preferred prefix, local element name and record factory. The registry
//! is built once from the active provider set and read-only afterwards;
//! reconfiguration means building a new registry.

mod alternate;
mod image;
mod locale;
mod news;
mod video;

pub use alternate::{AlternateLanguageExtension, Hreflang};
pub use image::ImageExtension;
pub use locale::Locale;
pub use news::{AccessRestriction, Genre, NewsExtension};
pub use video::{Access, Platform, PriceType, Resolution, VideoExtension};

use crate::builder::xml::ScopedWriter;
use crate::error::SitemapError;
use std::io::Write;

/// Stable capability tag for the supported extension types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Image,
    Video,
    News,
    AlternateLanguage,
}

/// The registered wire identity of one extension capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionDescriptor<'r> {
    pub kind: ExtensionKind,
    pub namespace: &'r str,
    /// The negotiated prefix: every descriptor sharing a namespace
    /// reports the same one.
    pub prefix: &'r str,
    pub local_name: &'r str,
}

/// One configured extension record attached to a url entry.
///
/// Records are single-use: created through the enclosing url entry,
/// configured through the variant's fluent setters, rendered exactly
/// once when the entry is flushed.
#[derive(Debug)]
pub enum ExtensionData {
    Image(ImageExtension),
    Video(VideoExtension),
    News(NewsExtension),
    AlternateLanguage(AlternateLanguageExtension),
}

impl ExtensionData {
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Self::Image(_) => ExtensionKind::Image,
            Self::Video(_) => ExtensionKind::Video,
            Self::News(_) => ExtensionKind::News,
            Self::AlternateLanguage(_) => ExtensionKind::AlternateLanguage,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageExtension> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_video_mut(&mut self) -> Option<&mut VideoExtension> {
        match self {
            Self::Video(video) => Some(video),
            _ => None,
        }
    }

    pub fn as_news_mut(&mut self) -> Option<&mut NewsExtension> {
        match self {
            Self::News(news) => Some(news),
            _ => None,
        }
    }

    pub fn as_alternate_mut(&mut self) -> Option<&mut AlternateLanguageExtension> {
        match self {
            Self::AlternateLanguage(alternate) => Some(alternate),
            _ => None,
        }
    }

    /// Render the full namespaced fragment, or nothing when the record
    /// is missing mandatory fields.
    pub(crate) fn render<W: Write>(&self, xml: &mut ScopedWriter<'_, W>) -> Result<(), SitemapError> {
        match self {
            Self::Image(image) => image.render(xml),
            Self::Video(video) => video.render(xml),
            Self::News(news) => news.render(xml),
            Self::AlternateLanguage(alternate) => alternate.render(xml),
        }
    }
}

struct Provider {
    kind: ExtensionKind,
    namespace: String,
    requested_prefix: String,
    negotiated_prefix: String,
    local_name: String,
    factory: fn() -> ExtensionData,
}

/// The immutable set of registered extension providers.
#[derive(Default)]
pub struct ExtensionRegistry {
    providers: Vec<Provider>,
}

impl ExtensionRegistry {
    /// A registry with no providers at all; every extension lookup on a
    /// url entry returns the not-registered outcome.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the four standard extension namespaces.
    pub fn with_defaults() -> Self {
        Self::builder()
            .register(
                ExtensionKind::Image,
                image::NAMESPACE,
                image::PREFIX,
                image::LOCAL_NAME,
                || ExtensionData::Image(ImageExtension::default()),
            )
            .register(
                ExtensionKind::Video,
                video::NAMESPACE,
                video::PREFIX,
                video::LOCAL_NAME,
                || ExtensionData::Video(VideoExtension::default()),
            )
            .register(
                ExtensionKind::News,
                news::NAMESPACE,
                news::PREFIX,
                news::LOCAL_NAME,
                || ExtensionData::News(NewsExtension::default()),
            )
            .register(
                ExtensionKind::AlternateLanguage,
                alternate::NAMESPACE,
                alternate::PREFIX,
                alternate::LOCAL_NAME,
                || ExtensionData::AlternateLanguage(AlternateLanguageExtension::default()),
            )
            .build()
    }

    pub fn builder() -> ExtensionRegistryBuilder {
        ExtensionRegistryBuilder {
            providers: Vec::new(),
        }
    }

    /// The descriptor for a capability, with the negotiated prefix, or
    /// `None` when no provider is registered for it.
    pub fn descriptor(&self, kind: ExtensionKind) -> Option<ExtensionDescriptor<'_>> {
        self.providers
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| ExtensionDescriptor {
                kind: p.kind,
                namespace: &p.namespace,
                prefix: &p.negotiated_prefix,
                local_name: &p.local_name,
            })
    }

    /// A fresh record for a capability, or `None` when not registered.
    pub fn new_extension(&self, kind: ExtensionKind) -> Option<ExtensionData> {
        self.providers
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| (p.factory)())
    }

    /// The negotiated prefix for a namespace.
    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.providers
            .iter()
            .find(|p| p.namespace == namespace)
            .map(|p| p.negotiated_prefix.as_str())
    }

    /// All `(prefix, namespace)` pairs in registration order, one per
    /// namespace. These become the root element's declarations.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.providers
            .iter()
            .enumerate()
            .filter(|(i, p)| !self.providers[..*i].iter().any(|q| q.namespace == p.namespace))
            .map(|(_, p)| (p.negotiated_prefix.as_str(), p.namespace.as_str()))
    }
}

pub struct ExtensionRegistryBuilder {
    providers: Vec<Provider>,
}

impl ExtensionRegistryBuilder {
    /// Register a provider. The first registration for a capability
    /// wins; the first registration for a namespace decides the prefix
    /// used by every later registrant of the same namespace.
    pub fn register(
        mut self,
        kind: ExtensionKind,
        namespace: &str,
        prefix: &str,
        local_name: &str,
        factory: fn() -> ExtensionData,
    ) -> Self {
        if self.providers.iter().any(|p| p.kind == kind) {
            return self;
        }
        self.providers.push(Provider {
            kind,
            namespace: namespace.to_string(),
            requested_prefix: prefix.to_string(),
            negotiated_prefix: String::new(),
            local_name: local_name.to_string(),
            factory,
        });
        self
    }

    pub fn build(mut self) -> ExtensionRegistry {
        // Prefix negotiation: the first registrant of a namespace wins.
        for i in 0..self.providers.len() {
            let designated = self.providers[..i]
                .iter()
                .find(|p| p.namespace == self.providers[i].namespace)
                .map(|p| p.negotiated_prefix.clone())
                .unwrap_or_else(|| self.providers[i].requested_prefix.clone());
            self.providers[i].negotiated_prefix = designated;
        }
        ExtensionRegistry {
            providers: self.providers,
        }
    }
}

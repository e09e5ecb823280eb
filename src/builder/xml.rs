//! Streaming XML emission.
//!
//! [`XmlWriter`] is a thin stateful facade over `quick_xml::Writer`:
//! element starts are deferred so attributes can still be attached, and
//! an element that is closed while still pending collapses to the empty
//! form (`<a/>`). [`ScopedWriter`] narrows that facade to a single
//! namespace for extension rendering.

use crate::error::SitemapError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{self, Write};

/// Incremental XML writer over any byte sink.
pub struct XmlWriter<W: Write> {
    writer: Writer<W>,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: Writer::new(out),
            pending: None,
            open: Vec::new(),
        }
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), SitemapError> {
        self.writer
            .write_event(event)
            .map_err(|e| SitemapError::Write(io::Error::other(e)))
    }

    /// Write the `<?xml version="1.0" encoding="UTF-8"?>` prolog.
    pub fn declaration(&mut self) -> Result<(), SitemapError> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    /// Open an element. The start tag stays pending until content is
    /// written, so attributes can still be attached.
    pub fn start(&mut self, qname: &str) -> Result<(), SitemapError> {
        self.commit()?;
        self.pending = Some(BytesStart::new(qname.to_string()));
        Ok(())
    }

    /// Attach an attribute to the pending start tag.
    ///
    /// Must directly follow [`XmlWriter::start`]. Misuse is a
    /// programming error: it asserts in debug builds and drops the
    /// attribute in release builds.
    pub fn attribute(&mut self, name: &str, value: &str) -> Result<(), SitemapError> {
        debug_assert!(self.pending.is_some(), "attribute written outside a start tag");
        if let Some(pending) = self.pending.as_mut() {
            pending.push_attribute((name, value));
        }
        Ok(())
    }

    /// Write escaped character data.
    pub fn text(&mut self, value: &str) -> Result<(), SitemapError> {
        self.commit()?;
        self.emit(Event::Text(BytesText::new(value)))
    }

    /// Close the innermost element. A still-pending start tag collapses
    /// to the empty-element form.
    ///
    /// Calling this with no element open is a programming error: it
    /// asserts in debug builds and is a no-op in release builds.
    pub fn end(&mut self) -> Result<(), SitemapError> {
        if let Some(pending) = self.pending.take() {
            return self.emit(Event::Empty(pending));
        }
        debug_assert!(!self.open.is_empty(), "no element open");
        match self.open.pop() {
            Some(qname) => self.emit(Event::End(BytesEnd::new(qname))),
            None => Ok(()),
        }
    }

    /// Write `<qname>text</qname>`.
    pub fn element(&mut self, qname: &str, text: &str) -> Result<(), SitemapError> {
        self.start(qname)?;
        self.text(text)?;
        self.end()
    }

    /// Force the pending start tag out. Used for document roots, which
    /// must render `<root></root>` rather than `<root/>` when empty.
    pub fn commit(&mut self) -> Result<(), SitemapError> {
        if let Some(pending) = self.pending.take() {
            let qname = String::from_utf8_lossy(pending.name().as_ref()).into_owned();
            self.emit(Event::Start(pending))?;
            self.open.push(qname);
        }
        Ok(())
    }

    /// Flush the underlying sink, surfacing the raw I/O error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.get_mut().flush()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// An [`XmlWriter`] view bound to exactly one namespace.
///
/// Every element written through this writer is qualified with the bound
/// prefix; attributes pass through unqualified. There is deliberately no
/// way to reach document-level operations (prolog, flush, namespace
/// declarations) from here; the document lifecycle belongs to the
/// enclosing builder, and an extension only ever gets this sandbox.
pub struct ScopedWriter<'a, W: Write> {
    xml: &'a mut XmlWriter<W>,
    prefix: &'a str,
    namespace: &'a str,
}

impl<'a, W: Write> ScopedWriter<'a, W> {
    pub(crate) fn new(xml: &'a mut XmlWriter<W>, prefix: &'a str, namespace: &'a str) -> Self {
        Self {
            xml,
            prefix,
            namespace,
        }
    }

    /// The namespace this writer is bound to.
    pub fn namespace(&self) -> &str {
        self.namespace
    }

    pub fn start(&mut self, local: &str) -> Result<(), SitemapError> {
        let qname = self.qualify(local);
        self.xml.start(&qname)
    }

    /// Like [`ScopedWriter::start`], but with an explicit namespace that
    /// must match the bound one.
    pub fn start_ns(&mut self, namespace: &str, local: &str) -> Result<(), SitemapError> {
        self.check_namespace(namespace)?;
        self.start(local)
    }

    pub fn attribute(&mut self, name: &str, value: &str) -> Result<(), SitemapError> {
        self.xml.attribute(name, value)
    }

    pub fn text(&mut self, value: &str) -> Result<(), SitemapError> {
        self.xml.text(value)
    }

    pub fn end(&mut self) -> Result<(), SitemapError> {
        self.xml.end()
    }

    /// Write `<prefix:local>text</prefix:local>`.
    pub fn element(&mut self, local: &str, text: &str) -> Result<(), SitemapError> {
        let qname = self.qualify(local);
        self.xml.element(&qname, text)
    }

    fn qualify(&self, local: &str) -> String {
        if self.prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{local}", self.prefix)
        }
    }

    fn check_namespace(&self, namespace: &str) -> Result<(), SitemapError> {
        if namespace == self.namespace {
            Ok(())
        } else {
            Err(SitemapError::ForeignNamespace {
                given: namespace.to_string(),
                bound: self.namespace.to_string(),
            })
        }
    }
}

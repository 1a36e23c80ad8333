//! Streaming element extraction.
//!
//! [`ElementReader`] walks a map extract incrementally and yields one
//! top-level element at a time, so memory stays bounded by the largest
//! single element rather than the document size. The event buffer is
//! reused between events and each [`RawElement`] is moved out to the
//! caller; nothing of a consumed element is retained.
//!
//! The reader is forward-only and exhausted after EOF. Callers needing a
//! second pass reopen the source.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;

/// Kind of top-level element in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"node" => Some(ElementKind::Node),
            b"way" => Some(ElementKind::Way),
            b"relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }
}

/// One top-level element as read from the source: string attributes plus
/// `tag` and `nd` children in document order.
#[derive(Debug, Clone)]
pub struct RawElement {
    pub kind: ElementKind,
    pub attrs: HashMap<String, String>,
    /// Raw (key, value) pairs from child `tag` markers.
    pub tags: Vec<(String, String)>,
    /// Referenced node ids from child `nd` markers, in document order.
    pub node_refs: Vec<String>,
}

impl RawElement {
    fn new(kind: ElementKind, attrs: HashMap<String, String>) -> Self {
        RawElement {
            kind,
            attrs,
            tags: Vec::new(),
            node_refs: Vec::new(),
        }
    }
}

/// Lazy, forward-only iterator over the top-level elements of a map
/// extract, restricted to a requested set of kinds.
pub struct ElementReader<R: BufRead> {
    reader: Reader<R>,
    kinds: Vec<ElementKind>,
    buf: Vec<u8>,
    current: Option<RawElement>,
    done: bool,
}

impl ElementReader<BufReader<File>> {
    /// Open a file and stream elements of the requested kinds from it.
    pub fn from_path<P: AsRef<Path>>(path: P, kinds: &[ElementKind]) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), kinds))
    }
}

impl<R: BufRead> ElementReader<R> {
    /// Stream elements of the requested kinds from any buffered reader.
    pub fn from_reader(source: R, kinds: &[ElementKind]) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        ElementReader {
            reader,
            kinds: kinds.to_vec(),
            buf: Vec::new(),
            current: None,
            done: false,
        }
    }
}

fn read_attrs(event: &BytesStart<'_>) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in event.attributes().with_checks(false) {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn attr_value(event: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in event.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Record a `tag` or `nd` child on the element being accumulated, if any.
fn record_child(current: &mut Option<RawElement>, event: &BytesStart<'_>) -> Result<()> {
    let Some(current) = current.as_mut() else {
        return Ok(());
    };
    match event.name().as_ref() {
        b"nd" => {
            if let Some(reference) = attr_value(event, b"ref")? {
                current.node_refs.push(reference);
            }
        }
        b"tag" => {
            let key = attr_value(event, b"k")?;
            let value = attr_value(event, b"v")?;
            if let (Some(key), Some(value)) = (key, value) {
                current.tags.push((key, value));
            }
        }
        _ => {}
    }
    Ok(())
}

impl<R: BufRead> Iterator for ElementReader<R> {
    type Item = Result<RawElement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            };
            match event {
                Event::Eof => {
                    self.done = true;
                    return None;
                }
                Event::Start(e) => match ElementKind::from_tag(e.name().as_ref()) {
                    Some(kind) if self.kinds.contains(&kind) => match read_attrs(&e) {
                        Ok(attrs) => self.current = Some(RawElement::new(kind, attrs)),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    },
                    // Entering an unwanted container; its children are
                    // skipped without accumulating anything.
                    Some(_) => self.current = None,
                    None => {
                        if let Err(err) = record_child(&mut self.current, &e) {
                            self.done = true;
                            return Some(Err(err));
                        }
                    }
                },
                Event::Empty(e) => match ElementKind::from_tag(e.name().as_ref()) {
                    Some(kind) if self.kinds.contains(&kind) => match read_attrs(&e) {
                        Ok(attrs) => return Some(Ok(RawElement::new(kind, attrs))),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    },
                    Some(_) => {}
                    None => {
                        if let Err(err) = record_child(&mut self.current, &e) {
                            self.done = true;
                            return Some(Err(err));
                        }
                    }
                },
                Event::End(e) => {
                    if ElementKind::from_tag(e.name().as_ref()).is_some() {
                        if let Some(element) = self.current.take() {
                            if self.kinds.contains(&element.kind) {
                                return Some(Ok(element));
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

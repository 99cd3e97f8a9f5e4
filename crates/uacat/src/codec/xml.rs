// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML encoding support.
//!
//! Values write their *content* into an element opened by the caller, so the
//! same value can appear as `<Range>..</Range>` at document level and as
//! `<EURange>..</EURange>` inside a parent structure. Fields are child
//! elements named in PascalCase; an absent element decodes to the field's
//! default. Array elements that are null carry `xsi:nil="true"`.

use std::str::FromStr;

use roxmltree::Node;

use super::{CodecError, CodecResult};
use crate::config::DecodingLimits;

/// Namespace of the UA types schema, written on document roots.
pub const UA_TYPES_NAMESPACE: &str = "http://opcfoundation.org/UA/2008/02/Types.xsd";
/// Namespace of the `xsi:nil` attribute.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// A value with an XML representation.
pub trait XmlEncodable: Sized {
    /// Element name used when the value appears as an array element.
    const XML_TYPE_NAME: &'static str;

    /// Write the content of the enclosing element.
    fn encode_xml(&self, writer: &mut XmlWriter) -> CodecResult<()>;

    /// Read the value from the content of `node`.
    fn decode_xml(node: Node<'_, '_>, decoder: &mut XmlDecoder) -> CodecResult<Self>;

    /// Null values are omitted as fields and written as `xsi:nil` in arrays.
    fn xml_is_null(&self) -> bool {
        false
    }
}

/// String-backed XML output.
#[derive(Debug, Default, Clone)]
pub struct XmlWriter {
    out: String,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn start(&mut self, name: &str) {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push('>');
    }

    pub fn start_with_namespace(&mut self, name: &str, namespace: &str) {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(" xmlns=\"");
        escape_into(&mut self.out, namespace);
        self.out.push_str("\">");
    }

    pub fn end(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    /// `<name xsi:nil="true" .../>`
    pub fn nil(&mut self, name: &str) {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push_str(" xsi:nil=\"true\" xmlns:xsi=\"");
        self.out.push_str(XSI_NAMESPACE);
        self.out.push_str("\"/>");
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) {
        escape_into(&mut self.out, text);
    }

    /// Pre-formed markup, copied verbatim.
    pub fn raw(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    /// `<name>text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) {
        self.start(name);
        self.text(text);
        self.end(name);
    }

    /// Write `value` as a child element; null values are skipped.
    pub fn field<T: XmlEncodable>(&mut self, name: &str, value: &T) -> CodecResult<()> {
        if value.xml_is_null() {
            return Ok(());
        }
        self.element(name, value)
    }

    /// Write `value` as a child element, null or not.
    pub fn element<T: XmlEncodable>(&mut self, name: &str, value: &T) -> CodecResult<()> {
        self.start(name);
        value.encode_xml(self)?;
        self.end(name);
        Ok(())
    }

    /// Write each element of a list as `<T::XML_TYPE_NAME>`.
    pub fn list<T: XmlEncodable>(&mut self, elements: &[T]) -> CodecResult<()> {
        for element in elements {
            if element.xml_is_null() {
                self.nil(T::XML_TYPE_NAME);
            } else {
                self.element(T::XML_TYPE_NAME, element)?;
            }
        }
        Ok(())
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}

/// Decoding state: limits and the current nesting depth.
#[derive(Debug, Clone)]
pub struct XmlDecoder {
    limits: DecodingLimits,
    depth: usize,
}

impl XmlDecoder {
    pub fn new(limits: DecodingLimits) -> Self {
        Self { limits, depth: 0 }
    }

    pub fn limits(&self) -> &DecodingLimits {
        &self.limits
    }

    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CodecResult<T>) -> CodecResult<T> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(CodecError::DepthExceeded {
                limit: self.limits.max_nesting_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// First child element with the given local name.
    pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
        node.children()
            .find(|child| child.is_element() && child.tag_name().name() == name)
    }

    /// All child elements, in document order.
    pub fn elements<'a, 'input>(
        node: Node<'a, 'input>,
    ) -> impl Iterator<Item = Node<'a, 'input>> {
        node.children().filter(Node::is_element)
    }

    pub fn first_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        Self::elements(node).next()
    }

    pub fn is_nil(node: Node<'_, '_>) -> bool {
        node.attribute((XSI_NAMESPACE, "nil")) == Some("true")
    }

    /// Text content of `node`, trimmed; empty when there is none.
    pub fn text<'a>(node: Node<'a, '_>) -> &'a str {
        node.text().map(str::trim).unwrap_or("")
    }

    /// Parse the text content with `FromStr`.
    pub fn parse_text<T: FromStr>(node: Node<'_, '_>, what: &str) -> CodecResult<T> {
        let text = Self::text(node);
        text.parse().map_err(|_| {
            CodecError::InvalidData(format!(
                "cannot parse {what} from <{}> text {text:?}",
                node.tag_name().name()
            ))
        })
    }

    /// Decode a child element, defaulting when it is absent.
    pub fn field<T: XmlEncodable + Default>(
        &mut self,
        node: Node<'_, '_>,
        name: &str,
    ) -> CodecResult<T> {
        match Self::child(node, name) {
            Some(child) => self.value(child),
            None => Ok(T::default()),
        }
    }

    /// Decode a child element that must be present.
    pub fn required<T: XmlEncodable>(&mut self, node: Node<'_, '_>, name: &str) -> CodecResult<T> {
        let child =
            Self::child(node, name).ok_or_else(|| CodecError::MissingElement(name.to_string()))?;
        T::decode_xml(child, self)
    }

    /// Decode `node` itself, honouring `xsi:nil`.
    pub fn value<T: XmlEncodable + Default>(&mut self, node: Node<'_, '_>) -> CodecResult<T> {
        if Self::is_nil(node) {
            return Ok(T::default());
        }
        T::decode_xml(node, self)
    }

    /// Decode every child element of `node` as a list element.
    pub fn list<T: XmlEncodable + Default>(&mut self, node: Node<'_, '_>) -> CodecResult<Vec<T>> {
        let count = Self::elements(node).count();
        if count > self.limits.max_array_length {
            return Err(CodecError::LimitExceeded {
                what: "array length",
                actual: count,
                limit: self.limits.max_array_length,
            });
        }
        let mut out = Vec::with_capacity(count);
        for element in Self::elements(node) {
            out.push(self.value(element)?);
        }
        Ok(out)
    }

    /// Source text of `node` exactly as it appeared in the document.
    pub fn source_text<'a>(node: Node<'a, '_>) -> &'a str {
        &node.document().input_text()[node.range()]
    }

    /// Source text of `node` that parses on its own: namespace bindings
    /// inherited from ancestors are declared on the copied start tag.
    pub fn detached_source_text(node: Node<'_, '_>) -> String {
        let text = Self::source_text(node);
        let Some(parent) = node.parent_element() else {
            return text.to_owned();
        };
        let name_end = text
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c.is_whitespace() || c == '/' || c == '>')
            .map_or(text.len(), |(i, _)| i);
        let own = declared_prefixes(&text[name_end..]);

        let mut inherited: Vec<Option<&str>> = Vec::new();
        for namespace in parent.namespaces() {
            let prefix = namespace.name();
            if prefix != Some("xml") && !own.contains(&prefix) && !inherited.contains(&prefix) {
                inherited.push(prefix);
            }
        }

        let mut out = String::with_capacity(text.len() + 64 * inherited.len());
        out.push_str(&text[..name_end]);
        for prefix in inherited {
            let Some(uri) = parent.lookup_namespace_uri(prefix) else {
                continue;
            };
            match prefix {
                Some(prefix) => {
                    out.push_str(" xmlns:");
                    out.push_str(prefix);
                }
                None => out.push_str(" xmlns"),
            }
            out.push_str("=\"");
            escape_into(&mut out, uri);
            out.push('"');
        }
        out.push_str(&text[name_end..]);
        out
    }

    /// Source text of all children of `node`.
    pub fn inner_source_text<'a>(node: Node<'a, '_>) -> &'a str {
        match (node.first_child(), node.last_child()) {
            (Some(first), Some(last)) => {
                &node.document().input_text()[first.range().start..last.range().end]
            }
            _ => "",
        }
    }
}

/// Prefixes (`None` for the default namespace) declared by the attributes
/// of a start tag, read up to its closing `>`.
fn declared_prefixes(attributes: &str) -> Vec<Option<&str>> {
    let mut prefixes = Vec::new();
    let mut quote = None;
    let mut name_start = None;
    for (i, c) in attributes.char_indices() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '>' => break,
            '=' => {
                if let Some(start) = name_start.take() {
                    let name: &str = attributes[start..i].trim_end();
                    if name == "xmlns" {
                        prefixes.push(None);
                    } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                        prefixes.push(Some(prefix));
                    }
                }
            }
            c if c.is_whitespace() || c == '/' => {}
            _ => {
                if name_start.is_none() {
                    name_start = Some(i);
                }
            }
        }
    }
    prefixes
}

/// Parse `xml` and decode its root element as `T`.
pub fn decode_xml<T: XmlEncodable>(xml: &str, limits: &DecodingLimits) -> CodecResult<T> {
    if xml.len() > limits.max_message_size {
        return Err(CodecError::LimitExceeded {
            what: "XML document size",
            actual: xml.len(),
            limit: limits.max_message_size,
        });
    }
    let document = roxmltree::Document::parse(xml)?;
    let mut decoder = XmlDecoder::new(*limits);
    T::decode_xml(document.root_element(), &mut decoder)
}

/// Encode `value` as a document whose root is `T::XML_TYPE_NAME`.
pub fn encode_xml<T: XmlEncodable>(value: &T) -> CodecResult<String> {
    encode_xml_named(value, T::XML_TYPE_NAME)
}

/// Encode `value` as a document rooted at `root`.
pub fn encode_xml_named<T: XmlEncodable>(value: &T, root: &str) -> CodecResult<String> {
    let mut writer = XmlWriter::new();
    writer.start_with_namespace(root, UA_TYPES_NAMESPACE);
    value.encode_xml(&mut writer)?;
    writer.end(root);
    Ok(writer.into_string())
}

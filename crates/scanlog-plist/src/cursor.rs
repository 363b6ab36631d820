//! Streaming cursor over the raw XML token stream.
//!
//! The domain readers in [`crate::parser`] never touch quick-xml directly;
//! they compose three primitives exposed here: advance to the next child
//! start element, read the text of the current element, and skip the
//! remainder of the current element's subtree. The cursor makes one forward
//! pass with no lookahead and no backtracking.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A start element the cursor stopped on.
pub(crate) struct StartTag {
    pub name: String,
    attributes: Vec<(String, String)>,
}

impl StartTag {
    fn from_event(e: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self { name, attributes })
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

pub(crate) struct Cursor<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Cursor<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        // Self-closing elements like <integer/> must behave as a start/end
        // pair so the readers see one uniform token shape.
        reader.config_mut().expand_empty_elements = true;
        Self { reader }
    }

    /// Advance to the next start element within the current element.
    ///
    /// Returns `None` once the current element's end tag is consumed instead.
    /// Text, comments, processing instructions, the XML declaration and
    /// DOCTYPE are passed over. EOF here means the document is structurally
    /// incomplete and is always [`Error::PrematureEnd`].
    pub fn next_start(&mut self) -> Result<Option<StartTag>> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => return Ok(Some(StartTag::from_event(&e)?)),
                Ok(Event::End(_)) => return Ok(None),
                Ok(Event::Eof) => return Err(Error::PrematureEnd),
                Ok(_) => {}
                Err(e) => return Err(self.syntax_error(e)),
            }
        }
    }

    /// Read the text content of the current element and consume its end tag.
    ///
    /// A nested start element where character data was required is a shape
    /// violation.
    pub fn element_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.reader.read_event() {
                Ok(Event::Text(t)) => match t.unescape() {
                    Ok(chunk) => text.push_str(&chunk),
                    Err(e) => return Err(self.syntax_error(e)),
                },
                Ok(Event::CData(t)) => text.push_str(&String::from_utf8_lossy(t.as_ref())),
                Ok(Event::End(_)) => return Ok(text),
                Ok(Event::Start(e)) => {
                    return Err(Error::unexpected_shape(
                        "character data",
                        Some(&String::from_utf8_lossy(e.name().as_ref())),
                    ));
                }
                Ok(Event::Eof) => return Err(Error::PrematureEnd),
                Ok(_) => {}
                Err(e) => return Err(self.syntax_error(e)),
            }
        }
    }

    /// Consume the remainder of the current element's subtree, end tag
    /// included, without interpreting it.
    pub fn skip_current(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(_)) => depth += 1,
                Ok(Event::End(_)) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Ok(Event::Eof) => return Err(Error::PrematureEnd),
                Ok(_) => {}
                Err(e) => return Err(self.syntax_error(e)),
            }
        }
    }

    fn syntax_error(&self, e: quick_xml::Error) -> Error {
        Error::MalformedRoot {
            message: e.to_string(),
            position: Some(self.reader.error_position()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_start_descends_and_returns_none_at_end() {
        let mut cursor = Cursor::new("<a><b/><c/></a>");
        assert_eq!(cursor.next_start().unwrap().unwrap().name, "a");
        assert_eq!(cursor.next_start().unwrap().unwrap().name, "b");
        // <b/> expands to start+end; its end closes it immediately.
        assert!(cursor.next_start().unwrap().is_none());
        assert_eq!(cursor.next_start().unwrap().unwrap().name, "c");
        assert!(cursor.next_start().unwrap().is_none());
        assert!(cursor.next_start().unwrap().is_none());
    }

    #[test]
    fn test_empty_input_is_premature_end() {
        let mut cursor = Cursor::new("");
        assert!(matches!(cursor.next_start(), Err(Error::PrematureEnd)));
    }

    #[test]
    fn test_element_text_unescapes() {
        let mut cursor = Cursor::new("<s>a &amp; b</s>");
        cursor.next_start().unwrap();
        assert_eq!(cursor.element_text().unwrap(), "a & b");
    }

    #[test]
    fn test_element_text_rejects_nested_element() {
        let mut cursor = Cursor::new("<s>text<b/></s>");
        cursor.next_start().unwrap();
        assert!(matches!(
            cursor.element_text(),
            Err(Error::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn test_skip_current_consumes_subtree() {
        let mut cursor = Cursor::new("<a><junk><deep>x</deep></junk><b/></a>");
        cursor.next_start().unwrap(); // a
        cursor.next_start().unwrap(); // junk
        cursor.skip_current().unwrap();
        assert_eq!(cursor.next_start().unwrap().unwrap().name, "b");
    }

    #[test]
    fn test_attributes() {
        let mut cursor = Cursor::new(r#"<plist version="1.0"><dict/></plist>"#);
        let tag = cursor.next_start().unwrap().unwrap();
        assert_eq!(tag.attribute("version"), Some("1.0"));
        assert_eq!(tag.attribute("missing"), None);
    }

    #[test]
    fn test_truncated_document_is_premature_end() {
        let mut cursor = Cursor::new("<a><b>");
        cursor.next_start().unwrap();
        cursor.next_start().unwrap();
        assert!(matches!(cursor.next_start(), Err(Error::PrematureEnd)));
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::core::SepaError;

pub type XmlResult = Result<String, SepaError>;

fn xml_io(e: std::io::Error) -> SepaError {
    SepaError::Xml(format!("XML write error: {e}"))
}

/// Thin wrapper over `quick_xml::Writer` producing an indented UTF-8 document.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// Start a document with `<?xml version="1.0" encoding="UTF-8"?>` and
    /// two-space indentation.
    pub fn new() -> Result<Self, SepaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> XmlResult {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| SepaError::Xml(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SepaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, SepaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// `<name>text</name>` on one line; an empty text gives `<name></name>`.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, SepaError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub fn text_element_with_attrs(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, SepaError> {
        self.start_element_with_attrs(name, attrs)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write `text` inside a chain of wrapper elements, e.g.
    /// `["Id", "OrgId", "Othr", "Id"]` → `<Id><OrgId><Othr><Id>text</Id>…`.
    pub fn nested_text_element(
        &mut self,
        path: &[&str],
        text: &str,
    ) -> Result<&mut Self, SepaError> {
        let Some((leaf, wrappers)) = path.split_last() else {
            return Ok(self);
        };
        for name in wrappers {
            self.start_element(name)?;
        }
        self.text_element(leaf, text)?;
        for name in wrappers.iter().rev() {
            self.end_element(name)?;
        }
        Ok(self)
    }

    /// Write an amount with its `Ccy` attribute.
    pub fn amount_element(
        &mut self,
        name: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<&mut Self, SepaError> {
        self.text_element_with_attrs(name, &format_amount(amount), &[("Ccy", currency)])
    }
}

/// Format an amount with exactly two decimals, `.` separator, no grouping.
pub fn format_amount(amount: Decimal) -> String {
    let mut d = amount.round_dp(2);
    d.rescale(2);
    d.to_string()
}

/// `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_date_time(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

//! Small helpers over `quick_xml` shared by the XPDL records

use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::XpdlError;

/// Something that serializes itself as one XPDL element.
pub trait ToXml {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), XpdlError>;
}

/// Serialize a single element without indentation.
pub fn to_xml_string<T: ToXml>(value: &T) -> Result<String, XpdlError> {
    let mut writer = Writer::new(Vec::new());
    value.write_xml(&mut writer)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Attribute list in which absent values are left out.
pub(crate) fn attrs<'a>(pairs: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, &'a str)> {
    pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| (*key, v)))
        .collect()
}

fn start<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    elem
}

pub(crate) fn write_empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), XpdlError> {
    writer.write_event(Event::Empty(start(name, attrs)))?;
    Ok(())
}

pub(crate) fn write_start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), XpdlError> {
    writer.write_event(Event::Start(start(name, attrs)))?;
    Ok(())
}

pub(crate) fn write_end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), XpdlError> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(crate) fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), XpdlError> {
    write_start(writer, name, &[])?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    write_end(writer, name)
}

/// Collect the unescaped attributes of an element.
pub(crate) fn read_attrs(elem: &BytesStart<'_>) -> Result<Vec<(String, String)>, XpdlError> {
    let mut out = Vec::new();
    for attr in elem.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value: Cow<'_, str> = attr.unescape_value()?;
        out.push((key, value.into_owned()));
    }
    Ok(out)
}

// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Serialize a [`Testsuites`] document.

use crate::error::SerializeError;
use crate::junit::{JunitOptions, Property, Testcase, TestcaseStatus, Testsuite, Testsuites};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::io::{self, Write};
use std::time::Duration;

const TESTSUITES_TAG: &str = "testsuites";
const TESTSUITE_TAG: &str = "testsuite";
const TESTCASE_TAG: &str = "testcase";
const PROPERTIES_TAG: &str = "properties";
const PROPERTY_TAG: &str = "property";
const FAILURE_TAG: &str = "failure";
const ERROR_TAG: &str = "error";
const SKIPPED_TAG: &str = "skipped";
const SYSTEM_OUT_TAG: &str = "system-out";

impl Testsuites {
    /// Write the document to `writer`
    ///
    /// The output is tab-indented and ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns `SerializeError` if the destination cannot be written.
    pub fn serialize(
        &self,
        writer: impl io::Write,
        options: &JunitOptions,
    ) -> Result<(), SerializeError> {
        let mut writer = Writer::new_with_indent(writer, b'\t', 1);

        if options.xml_header {
            let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
            writer.write_event(Event::Decl(decl))?;
        }
        serialize_testsuites(self, &mut writer)?;

        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Render the document as a string
    ///
    /// # Errors
    ///
    /// Returns `SerializeError` if the XML writer fails.
    pub fn to_xml_string(&self, options: &JunitOptions) -> Result<String, SerializeError> {
        let mut buf = Vec::new();
        self.serialize(&mut buf, options)?;
        Ok(String::from_utf8(buf)?)
    }
}

fn serialize_testsuites(
    document: &Testsuites,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    // Destructure so a new field cannot be silently skipped.
    let Testsuites {
        tests,
        failures,
        errors,
        skipped,
        time,
        suites,
    } = document;

    let mut tag = BytesStart::new(TESTSUITES_TAG);
    tag.push_attribute(("tests", tests.to_string().as_str()));
    tag.push_attribute(("failures", failures.to_string().as_str()));
    tag.push_attribute(("errors", errors.to_string().as_str()));
    tag.push_attribute(("skipped", skipped.to_string().as_str()));
    tag.push_attribute(("time", serialize_time(*time).as_str()));

    if suites.is_empty() {
        writer.write_event(Event::Empty(tag))?;
        return Ok(());
    }

    writer.write_event(Event::Start(tag))?;
    for suite in suites {
        serialize_testsuite(suite, writer)?;
    }
    serialize_end_tag(TESTSUITES_TAG, writer)
}

fn serialize_testsuite(
    suite: &Testsuite,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let Testsuite {
        name,
        tests,
        failures,
        errors,
        skipped,
        time,
        properties,
        testcases,
        system_out,
    } = suite;

    let mut tag = BytesStart::new(TESTSUITE_TAG);
    push_text_attribute(&mut tag, "name", name);
    tag.push_attribute(("tests", tests.to_string().as_str()));
    tag.push_attribute(("failures", failures.to_string().as_str()));
    tag.push_attribute(("errors", errors.to_string().as_str()));
    tag.push_attribute(("skipped", skipped.to_string().as_str()));
    tag.push_attribute(("time", serialize_time(*time).as_str()));

    if properties.is_empty() && testcases.is_empty() && system_out.is_none() {
        writer.write_event(Event::Empty(tag))?;
        return Ok(());
    }

    writer.write_event(Event::Start(tag))?;

    if !properties.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(PROPERTIES_TAG)))?;
        for property in properties {
            serialize_property(property, writer)?;
        }
        serialize_end_tag(PROPERTIES_TAG, writer)?;
    }

    for testcase in testcases {
        serialize_testcase(testcase, writer)?;
    }

    if let Some(system_out) = system_out {
        serialize_text_element(SYSTEM_OUT_TAG, system_out, writer)?;
    }

    serialize_end_tag(TESTSUITE_TAG, writer)
}

fn serialize_property(
    property: &Property,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let mut tag = BytesStart::new(PROPERTY_TAG);
    push_text_attribute(&mut tag, "name", &property.name);
    push_text_attribute(&mut tag, "value", &property.value);
    writer.write_event(Event::Empty(tag))?;
    Ok(())
}

fn serialize_testcase(
    testcase: &Testcase,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let Testcase {
        name,
        classname,
        time,
        status,
        system_out,
    } = testcase;

    let mut tag = BytesStart::new(TESTCASE_TAG);
    push_text_attribute(&mut tag, "name", name);
    push_text_attribute(&mut tag, "classname", classname);
    tag.push_attribute(("time", serialize_time(*time).as_str()));

    if *status == TestcaseStatus::Success && system_out.is_none() {
        writer.write_event(Event::Empty(tag))?;
        return Ok(());
    }

    writer.write_event(Event::Start(tag))?;
    match status {
        TestcaseStatus::Success => {}
        TestcaseStatus::Failure { message, text } => {
            serialize_status(FAILURE_TAG, message, text.as_deref(), writer)?;
        }
        TestcaseStatus::Error { message, text } => {
            serialize_status(ERROR_TAG, message, text.as_deref(), writer)?;
        }
        TestcaseStatus::Skipped { message } => {
            serialize_status(SKIPPED_TAG, message, None, writer)?;
        }
    }
    if let Some(system_out) = system_out {
        serialize_text_element(SYSTEM_OUT_TAG, system_out, writer)?;
    }
    serialize_end_tag(TESTCASE_TAG, writer)
}

fn serialize_status(
    tag_name: &'static str,
    message: &str,
    text: Option<&str>,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let mut tag = BytesStart::new(tag_name);
    push_text_attribute(&mut tag, "message", message);

    match text {
        Some(text) => {
            writer.write_event(Event::Start(tag))?;
            writer.write_event(Event::Text(BytesText::new(&xml_chars(text))))?;
            serialize_end_tag(tag_name, writer)
        }
        None => {
            writer.write_event(Event::Empty(tag))?;
            Ok(())
        }
    }
}

fn serialize_text_element(
    tag_name: &'static str,
    text: &str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.write_event(Event::Start(BytesStart::new(tag_name)))?;
    writer.write_event(Event::Text(BytesText::new(&xml_chars(text))))?;
    serialize_end_tag(tag_name, writer)
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}

/// Push an attribute whose value is free text
///
/// Tabs and line breaks are written as character references so readers
/// do not normalize them to spaces.
fn push_text_attribute(tag: &mut BytesStart<'_>, key: &str, value: &str) {
    let clean = xml_chars(value);
    let value = escape(&*clean)
        .replace('\t', "&#x9;")
        .replace('\n', "&#xA;")
        .replace('\r', "&#xD;");
    tag.push_attribute((key.as_bytes(), value.as_bytes()));
}

/// Replace characters XML 1.0 cannot carry with U+FFFD
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

// Seconds with 3 decimal places.
fn serialize_time(time: Duration) -> String {
    format!("{:.3}", time.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn render(document: &Testsuites, options: &JunitOptions) -> String {
        document.to_xml_string(options).expect("in-memory write")
    }

    fn suite(name: &str, testcases: Vec<Testcase>) -> Testsuite {
        Testsuite {
            name: name.to_string(),
            tests: testcases.len(),
            failures: 0,
            errors: 0,
            skipped: 0,
            time: Duration::from_millis(160),
            properties: vec![],
            testcases,
            system_out: None,
        }
    }

    fn case(name: &str, status: TestcaseStatus) -> Testcase {
        Testcase {
            name: name.to_string(),
            classname: "package/name".to_string(),
            time: Duration::from_millis(60),
            status,
            system_out: None,
        }
    }

    fn document(suites: Vec<Testsuite>) -> Testsuites {
        Testsuites {
            tests: suites.iter().map(|s| s.tests).sum(),
            failures: 0,
            errors: 0,
            skipped: 0,
            time: suites.iter().map(|s| s.time).sum(),
            suites,
        }
    }

    #[test]
    fn test_empty_document() {
        let xml = render(&document(vec![]), &JunitOptions::default());
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <testsuites tests=\"0\" failures=\"0\" errors=\"0\" skipped=\"0\" time=\"0.000\"/>\n"
        );
    }

    #[test]
    fn test_header_can_be_omitted() {
        let xml = render(
            &document(vec![]),
            &JunitOptions::default().without_xml_header(),
        );
        assert!(xml.starts_with("<testsuites "));
        assert!(xml.ends_with("/>\n"));
    }

    #[test]
    fn test_passing_suite_layout() {
        let doc = document(vec![suite(
            "package/name",
            vec![case("TestZ", TestcaseStatus::Success)],
        )]);
        let xml = render(&doc, &JunitOptions::default().without_xml_header());
        assert_eq!(
            xml,
            "<testsuites tests=\"1\" failures=\"0\" errors=\"0\" skipped=\"0\" time=\"0.160\">\n\
             \t<testsuite name=\"package/name\" tests=\"1\" failures=\"0\" errors=\"0\" skipped=\"0\" time=\"0.160\">\n\
             \t\t<testcase name=\"TestZ\" classname=\"package/name\" time=\"0.060\"/>\n\
             \t</testsuite>\n\
             </testsuites>\n"
        );
    }

    #[test]
    fn test_status_elements_and_output() {
        let mut passed = case("TestLoud", TestcaseStatus::Success);
        passed.system_out = Some("hello".to_string());
        let mut s = suite(
            "package/name",
            vec![
                case(
                    "TestOne",
                    TestcaseStatus::Failure {
                        message: "Failed".to_string(),
                        text: Some("\tfile_test.go:11: Error message\n\t\terror".to_string()),
                    },
                ),
                case(
                    "TestTwo",
                    TestcaseStatus::Skipped {
                        message: "skip me".to_string(),
                    },
                ),
                passed,
            ],
        );
        s.properties = vec![Property::new("go.version", "1.22")];
        s.system_out = Some("exit status 1".to_string());

        let xml = render(&document(vec![s]), &JunitOptions::default().without_xml_header());
        assert_eq!(
            xml,
            "<testsuites tests=\"3\" failures=\"0\" errors=\"0\" skipped=\"0\" time=\"0.160\">\n\
             \t<testsuite name=\"package/name\" tests=\"3\" failures=\"0\" errors=\"0\" skipped=\"0\" time=\"0.160\">\n\
             \t\t<properties>\n\
             \t\t\t<property name=\"go.version\" value=\"1.22\"/>\n\
             \t\t</properties>\n\
             \t\t<testcase name=\"TestOne\" classname=\"package/name\" time=\"0.060\">\n\
             \t\t\t<failure message=\"Failed\">\tfile_test.go:11: Error message\n\t\terror</failure>\n\
             \t\t</testcase>\n\
             \t\t<testcase name=\"TestTwo\" classname=\"package/name\" time=\"0.060\">\n\
             \t\t\t<skipped message=\"skip me\"/>\n\
             \t\t</testcase>\n\
             \t\t<testcase name=\"TestLoud\" classname=\"package/name\" time=\"0.060\">\n\
             \t\t\t<system-out>hello</system-out>\n\
             \t\t</testcase>\n\
             \t\t<system-out>exit status 1</system-out>\n\
             \t</testsuite>\n\
             </testsuites>\n"
        );
    }

    #[test]
    fn test_markup_is_escaped() {
        let doc = document(vec![suite(
            "package/name",
            vec![case(
                "TestEscape/<a&b>",
                TestcaseStatus::Error {
                    message: "build failed".to_string(),
                    text: Some("x < y && y > z".to_string()),
                },
            )],
        )]);
        let xml = render(&doc, &JunitOptions::default());
        assert!(xml.contains("name=\"TestEscape/&lt;a&amp;b&gt;\""));
        assert!(xml.contains(">x &lt; y &amp;&amp; y &gt; z</error>"));
    }

    #[test]
    fn test_control_characters_are_replaced() {
        let doc = document(vec![suite(
            "package/name",
            vec![case(
                "TestColor",
                TestcaseStatus::Failure {
                    message: "Failed".to_string(),
                    text: Some("\x1b[31mred\x1b[0m \x00nul".to_string()),
                },
            )],
        )]);
        let xml = render(&doc, &JunitOptions::default());
        assert!(xml.contains(">\u{FFFD}[31mred\u{FFFD}[0m \u{FFFD}nul</failure>"));
        assert!(!xml.chars().any(|c| c != '\t' && c != '\n' && c.is_control()));
    }

    #[test]
    fn test_attribute_whitespace_uses_character_references() {
        let doc = document(vec![suite(
            "package/name",
            vec![case(
                "TestSkip",
                TestcaseStatus::Skipped {
                    message: "\tfirst line\r\nsecond \x07line".to_string(),
                },
            )],
        )]);
        let xml = render(&doc, &JunitOptions::default());
        assert!(xml.contains(
            "<skipped message=\"&#x9;first line&#xD;&#xA;second \u{FFFD}line\"/>"
        ));
    }

    #[test]
    fn test_xml_chars_borrows_clean_text() {
        assert!(matches!(xml_chars("plain\ttext\n"), Cow::Borrowed(_)));
        assert_eq!(xml_chars("a\u{1}b\u{FFFE}c"), "a\u{FFFD}b\u{FFFD}c");
    }

    #[test]
    fn test_time_has_three_decimals() {
        assert_eq!(serialize_time(Duration::ZERO), "0.000");
        assert_eq!(serialize_time(Duration::from_millis(4200)), "4.200");
        assert_eq!(serialize_time(Duration::from_millis(1)), "0.001");
    }
}

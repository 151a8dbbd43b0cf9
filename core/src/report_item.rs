use std::fmt;

use nessusfile_common::severity::Severity;
use roxmltree::Node;

use crate::element::Element;
use crate::error::{NessusError, Result};

/// A single finding: one plugin's result against one host.
///
/// The owning host is not recorded here; callers that need it walk from the
/// host (see [`crate::scan_file::ScanFile::merge_report_items`]).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ReportItem<'a, 'input: 'a> {
    element: Element<'a, 'input>,
}

impl<'a, 'input: 'a> ReportItem<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self {
            element: Element::new(node),
        }
    }

    pub fn element(&self) -> &Element<'a, 'input> {
        &self.element
    }

    pub fn plugin_id(&self) -> Result<u32> {
        parse_numeric(&self.element, "pluginID")
    }

    pub fn port(&self) -> Result<u16> {
        parse_numeric(&self.element, "port")
    }

    pub fn plugin_name(&self) -> Result<&'a str> {
        self.element.attribute("pluginName")
    }

    pub fn plugin_family(&self) -> Result<&'a str> {
        self.element.attribute("pluginFamily")
    }

    pub fn protocol(&self) -> Result<&'a str> {
        self.element.attribute("protocol")
    }

    pub fn service_name(&self) -> Result<&'a str> {
        self.element.attribute("svc_name")
    }

    /// Raw ordinal string as recorded by the scanner ("0".."4").
    pub fn severity(&self) -> Result<&'a str> {
        self.element.attribute("severity")
    }

    pub fn severity_level(&self) -> Result<Severity> {
        let raw = self.severity()?;
        raw.parse().map_err(|_| NessusError::InvalidSeverity {
            value: raw.to_string(),
        })
    }

    pub fn description(&self) -> Option<&'a str> {
        self.element.query_text("description")
    }

    pub fn plugin_output(&self) -> Option<&'a str> {
        self.element.query_text("plugin_output")
    }

    pub fn plugin_type(&self) -> Option<&'a str> {
        self.element.query_text("plugin_type")
    }

    pub fn solution(&self) -> Option<&'a str> {
        self.element.query_text("solution")
    }

    pub fn synopsis(&self) -> Option<&'a str> {
        self.element.query_text("synopsis")
    }
}

fn parse_numeric<T>(element: &Element<'_, '_>, field: &'static str) -> Result<T>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    let value = element.attribute(field)?;
    value.trim().parse::<T>().map_err(|source| NessusError::NotNumeric {
        field: field_label(field),
        value: value.to_string(),
        source,
    })
}

fn field_label(attribute: &'static str) -> &'static str {
    match attribute {
        "pluginID" => "plugin_id",
        other => other,
    }
}

// Reads raw attributes so a malformed item can still be printed.
impl fmt::Display for ReportItem<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ReportItem {{plugin_id={}, plugin_name='{}'}}>",
            self.element.optional_attribute("pluginID").unwrap_or("?"),
            self.element.optional_attribute("pluginName").unwrap_or("")
        )
    }
}

impl fmt::Debug for ReportItem<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

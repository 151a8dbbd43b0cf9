//! # Scanned Hosts
//!
//! A [`Host`] wraps one `ReportHost` element. Its properties live under a
//! `HostProperties` block as `<tag name="...">value</tag>` entries, and each
//! `ReportItem` child is one finding against the host.

use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

use roxmltree::Node;

use crate::element::Element;
use crate::error::{NessusError, Result};
use crate::report_item::ReportItem;

pub const HOST_IP: &str = "host-ip";
pub const HOST_FQDN: &str = "host-fqdn";

/// One `name`/value tag recorded against a host.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HostProperty<'a, 'input: 'a> {
    element: Element<'a, 'input>,
}

impl<'a, 'input: 'a> HostProperty<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self {
            element: Element::new(node),
        }
    }

    pub fn name(&self) -> Result<&'a str> {
        self.element.attribute("name")
    }

    pub fn value(&self) -> Option<&'a str> {
        self.element.query_text(".")
    }
}

impl fmt::Display for HostProperty<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<HostProperty {{name='{}', value='{}'}}>",
            self.element.optional_attribute("name").unwrap_or(""),
            self.value().unwrap_or("")
        )
    }
}

impl fmt::Debug for HostProperty<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Host<'a, 'input: 'a> {
    element: Element<'a, 'input>,
}

impl<'a, 'input: 'a> Host<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self {
            element: Element::new(node),
        }
    }

    pub fn element(&self) -> &Element<'a, 'input> {
        &self.element
    }

    /// The `name` the scanner filed the host under, usually its address or FQDN.
    pub fn name(&self) -> Result<&'a str> {
        self.element.attribute("name")
    }

    pub fn properties_list(&self) -> Vec<HostProperty<'a, 'input>> {
        self.element
            .nodes("./HostProperties/tag")
            .map(HostProperty::new)
            .collect()
    }

    /// Folds [`Host::properties_list`] into a map.
    ///
    /// Tags sharing a name collapse to the last one in document order; use
    /// [`Host::property_values`] to see every value.
    pub fn properties(&self) -> Result<HashMap<&'a str, Option<&'a str>>> {
        let mut properties = HashMap::new();
        for property in self.properties_list() {
            properties.insert(property.name()?, property.value());
        }
        Ok(properties)
    }

    /// Every value recorded under `name`, in document order.
    pub fn property_values(&self, name: &str) -> Vec<Option<&'a str>> {
        self.properties_list()
            .into_iter()
            .filter(|property| property.name().is_ok_and(|found| found == name))
            .map(|property| property.value())
            .collect()
    }

    pub fn report_items(&self) -> Vec<ReportItem<'a, 'input>> {
        self.element
            .nodes("./ReportItem")
            .map(ReportItem::new)
            .collect()
    }

    pub fn ip_address(&self) -> Result<IpAddr> {
        let value = self.required_property(HOST_IP)?;
        value
            .parse::<IpAddr>()
            .map_err(|source| NessusError::InvalidAddress {
                value: value.to_string(),
                source,
            })
    }

    pub fn fqdn(&self) -> Result<&'a str> {
        self.required_property(HOST_FQDN)
    }

    fn required_property(&self, name: &str) -> Result<&'a str> {
        match self.properties()?.get(name) {
            None => Err(NessusError::PropertyNotFound {
                name: name.to_string(),
            }),
            Some(None) => Err(NessusError::EmptyProperty {
                name: name.to_string(),
            }),
            Some(Some(value)) => Ok(*value),
        }
    }
}

impl fmt::Display for Host<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Host {{name='{}'}}>",
            self.element.optional_attribute("name").unwrap_or("")
        )
    }
}

impl fmt::Debug for Host<'_, '_> {
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

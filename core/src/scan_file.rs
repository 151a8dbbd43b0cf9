//! # Scan File
//!
//! Root of the model. A [`ScanSource`] owns the raw report text; parsing it
//! yields a [`ScanFile`], which owns the document tree. Every [`Host`] and
//! [`ReportItem`] handed out afterwards borrows from that tree, so none of them
//! can outlive it.
//!
//! ```no_run
//! use nessusfile_core::ScanSource;
//!
//! let source = ScanSource::load("scan.nessus")?;
//! let scan = source.parse()?;
//! for host in scan.hosts() {
//!     println!("{} has {} findings", host.name()?, host.report_items().len());
//! }
//! # Ok::<(), nessusfile_core::NessusError>(())
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use roxmltree::{Document, ParsingOptions};
use tracing::{debug, trace};

use crate::element::Element;
use crate::error::{NessusError, Result};
use crate::host::Host;
use crate::report_item::ReportItem;

const HOSTS_PATH: &str = "//Report/ReportHost";
const REPORT_PATH: &str = "//Report";
const PREFERENCES_PATH: &str =
    "/NessusClientData_v2/Policy/Preferences/ServerPreferences/preference";

/// Raw report text together with where it came from.
#[derive(Debug, Clone)]
pub struct ScanSource {
    path: Option<PathBuf>,
    text: String,
}

impl ScanSource {
    /// Reads the report at `path`. The text is not parsed until [`ScanSource::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| NessusError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), bytes = text.len(), "read scan file");

        Ok(Self {
            path: Some(path.to_path_buf()),
            text,
        })
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parse(&self) -> Result<ScanFile<'_>> {
        ScanFile::parse(&self.text)
    }
}

/// The findings recorded for one plugin across every host of a scan.
#[derive(Debug, Clone)]
pub struct PluginRecord<'a, 'input: 'a> {
    /// Name carried by the first report item seen for the plugin.
    pub plugin_name: &'a str,
    pub report_items: Vec<(Host<'a, 'input>, ReportItem<'a, 'input>)>,
}

impl<'a, 'input: 'a> PluginRecord<'a, 'input> {
    pub fn hosts(&self) -> impl Iterator<Item = Host<'a, 'input>> + '_ {
        self.report_items.iter().map(|(host, _)| *host)
    }
}

/// A parsed scan report. Read-only.
pub struct ScanFile<'input> {
    document: Document<'input>,
}

impl<'input> ScanFile<'input> {
    /// Parses report text. Malformed XML fails with [`NessusError::NotWellFormed`].
    pub fn parse(text: &'input str) -> Result<Self> {
        let mut options = ParsingOptions::default();
        // exports from older scanner versions carry a DOCTYPE
        options.allow_dtd = true;

        let document = Document::parse_with_options(text, options)?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document<'input> {
        &self.document
    }

    fn root(&self) -> Element<'_, 'input> {
        Element::new(self.document.root())
    }

    /// Every `ReportHost` under a `Report`, in document order. Walks the tree on each call.
    pub fn hosts(&self) -> Vec<Host<'_, 'input>> {
        self.root().nodes(HOSTS_PATH).map(Host::new).collect()
    }

    pub fn find_host(&self, name: &str) -> Option<Host<'_, 'input>> {
        self.hosts()
            .into_iter()
            .find(|host| host.name().is_ok_and(|found| found == name))
    }

    /// The `name` attribute of the first `Report` element.
    pub fn report_name(&self) -> Option<&str> {
        self.root()
            .nodes(REPORT_PATH)
            .next()
            .and_then(|report| report.attribute("name"))
    }

    /// Groups every report item of the scan by plugin id.
    ///
    /// Pairs are kept in host-then-item document order. Each record takes its
    /// `plugin_name` from its first pair; names of later items are not checked.
    pub fn merge_report_items(&self) -> Result<BTreeMap<u32, PluginRecord<'_, 'input>>> {
        let mut grouped: BTreeMap<u32, Vec<(Host<'_, 'input>, ReportItem<'_, 'input>)>> =
            BTreeMap::new();

        for host in self.hosts() {
            let report_items = host.report_items();
            trace!(host = %host, items = report_items.len(), "merging host");

            for report_item in report_items {
                grouped
                    .entry(report_item.plugin_id()?)
                    .or_default()
                    .push((host, report_item));
            }
        }

        let mut records = BTreeMap::new();
        for (plugin_id, report_items) in grouped {
            // entries only exist after their first push
            let plugin_name = report_items[0].1.plugin_name()?;
            records.insert(
                plugin_id,
                PluginRecord {
                    plugin_name,
                    report_items,
                },
            );
        }

        debug!(plugins = records.len(), "merged report items");
        Ok(records)
    }

    /// Server preferences of the scan policy, by name.
    ///
    /// A name may repeat; its values are collected in document order. A
    /// preference without a `value` still registers its name.
    pub fn preferences(&self) -> Result<BTreeMap<&str, Vec<&str>>> {
        let mut preferences: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for node in self.root().nodes(PREFERENCES_PATH) {
            let preference = Element::new(node);
            let name = preference.require_text("name")?.trim();
            let values = preferences.entry(name).or_default();

            if let Some(value) = preference.query_text("value") {
                values.push(value.trim());
            }
        }

        Ok(preferences)
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

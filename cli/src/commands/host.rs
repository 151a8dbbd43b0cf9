use std::path::Path;

use anyhow::Context;
use colored::*;
use nessusfile_common::{config::Config, severity::Severity};
use nessusfile_core::ReportItem;

use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

pub fn host(path: &Path, name: &str, min_severity: Severity, cfg: &Config) -> anyhow::Result<()> {
    let source = super::load(path)?;
    let scan = source.parse().context("failed to parse scan report")?;
    let Some(host) = scan.find_host(name) else {
        anyhow::bail!("no host named '{name}' in {}", path.display());
    };

    print::header(&format!("host {name}"), cfg.quiet);
    if cfg.quiet < 2 {
        print::as_tree_one_level(vec![format::ip_to_detail(&host), format::fqdn_to_detail(&host)]);
    }

    let mut shown: usize = 0;
    for item in host.report_items() {
        let severity = item.severity_level().ok();
        if !format::meets_threshold(severity, min_severity) {
            continue;
        }
        print_item(&item, severity, cfg)?;
        shown += 1;
    }

    if shown == 0 {
        print::no_results("findings");
    }
    Ok(())
}

fn print_item(item: &ReportItem<'_, '_>, severity: Option<Severity>, cfg: &Config) -> anyhow::Result<()> {
    let line: String = format!(
        "{} {} {}",
        format::item_severity_tag(severity),
        item.plugin_id()?.to_string().color(colors::ACCENT),
        item.plugin_name()?.color(colors::PRIMARY)
    );
    print::print_status(line);

    if cfg.quiet > 0 {
        return Ok(());
    }

    let mut details: Vec<Detail> = vec![(String::from("Port"), format::port_to_string(item)?.normal())];
    details.push((String::from("Family"), item.plugin_family()?.normal()));
    if let Some(synopsis) = item.synopsis() {
        details.push((String::from("Synopsis"), synopsis.trim().normal()));
    }
    if let Some(solution) = item.solution() {
        details.push((String::from("Solution"), solution.trim().normal()));
    }
    print::as_tree_one_level(details);
    Ok(())
}

use std::path::Path;

use anyhow::Context;
use colored::*;
use nessusfile_common::{config::Config, severity::Severity};
use nessusfile_core::PluginRecord;

use crate::nprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

pub fn plugins(path: &Path, min_severity: Severity, cfg: &Config) -> anyhow::Result<()> {
    let source = super::load(path)?;
    let scan = source.parse().context("failed to parse scan report")?;
    let merged = scan.merge_report_items()?;

    let mut records: Vec<(u32, Severity, PluginRecord<'_, '_>)> = Vec::with_capacity(merged.len());
    for (plugin_id, record) in merged {
        let items: Vec<_> = record.report_items.iter().map(|(_, item)| *item).collect();
        let severity = format::highest_severity(&items).unwrap_or(Severity::Info);
        if severity >= min_severity {
            records.push((plugin_id, severity, record));
        }
    }

    if records.is_empty() {
        print::header("zero plugins matched", cfg.quiet);
        print::no_results("plugins");
        return Ok(());
    }

    // most severe first, then by plugin id
    records.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    print::header("plugins", cfg.quiet);
    for (idx, (plugin_id, severity, record)) in records.iter().enumerate() {
        let title: String = format!("{} {}", plugin_id.to_string().color(colors::ACCENT), record.plugin_name);
        print::tree_head(idx, &title);
        if cfg.quiet < 2 {
            print_record(record, *severity)?;
        }
        if idx + 1 != records.len() && cfg.quiet < 2 {
            nprint!();
        }
    }

    if cfg.quiet == 0 {
        let count: ColoredString = format!("{} plugins", records.len()).bold().green();
        print::fat_separator();
        print::centerln(&format!("Findings grouped into {count}"));
    }
    Ok(())
}

fn print_record(record: &PluginRecord<'_, '_>, severity: Severity) -> anyhow::Result<()> {
    let mut names: Vec<&str> = Vec::new();
    for host in record.hosts() {
        let name = host.name()?;
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let family: &str = match record.report_items.first() {
        Some((_, item)) => item.plugin_family()?,
        None => "",
    };

    let details: Vec<Detail> = vec![
        (String::from("Severity"), format::severity_tag(severity)),
        (String::from("Family"), family.normal()),
        (String::from("Findings"), record.report_items.len().to_string().normal()),
        (String::from("Hosts"), names.join(", ").normal()),
    ];
    print::as_tree_one_level(details);
    Ok(())
}

use std::path::Path;

use anyhow::Context;
use colored::*;
use nessusfile_common::config::Config;
use nessusfile_core::Host;

use crate::nprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

pub fn hosts(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let source = super::load(path)?;
    let scan = source.parse().context("failed to parse scan report")?;
    let hosts = scan.hosts();

    if hosts.is_empty() {
        print::header("zero hosts in report", cfg.quiet);
        print::no_results("hosts");
        return Ok(());
    }

    print::header(scan.report_name().unwrap_or("hosts"), cfg.quiet);
    for (idx, host) in hosts.iter().enumerate() {
        if cfg.quiet < 2 {
            print_host_tree(host, idx)?;
        } else {
            nprint!(host.name()?);
        }
        if idx + 1 != hosts.len() && cfg.quiet < 2 {
            nprint!();
        }
    }

    if cfg.quiet == 0 {
        let count: ColoredString = format!("{} hosts", hosts.len()).bold().green();
        let summary: ColoredString = format!("Report contains {count}").color(colors::TEXT_DEFAULT);
        print::fat_separator();
        print::centerln(&summary.to_string());
    }
    Ok(())
}

fn print_host_tree(host: &Host<'_, '_>, idx: usize) -> anyhow::Result<()> {
    print::tree_head(idx, host.name()?);

    let items = host.report_items();
    let mut details: Vec<Detail> = vec![format::ip_to_detail(host), format::fqdn_to_detail(host)];
    details.push((String::from("Findings"), items.len().to_string().normal()));

    if let Some(severity) = format::highest_severity(&items) {
        details.push((String::from("Highest"), format::severity_tag(severity)));
    }

    print::as_tree_one_level(details);
    Ok(())
}

use crate::terminal::colors;
use colored::*;
use nessusfile_common::severity::Severity;
use nessusfile_core::{Host, NessusError, ReportItem};
use std::net::IpAddr;

pub type Detail = (String, ColoredString);

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => colors::SEVERITY_INFO,
        Severity::Low => colors::SEVERITY_LOW,
        Severity::Medium => colors::SEVERITY_MEDIUM,
        Severity::High => colors::SEVERITY_HIGH,
        Severity::Critical => colors::SEVERITY_CRITICAL,
    }
}

pub fn severity_tag(severity: Severity) -> ColoredString {
    format!("{:<8}", severity.label())
        .color(severity_color(severity))
        .bold()
}

/// Tag for a finding whose severity may fall outside the known levels.
pub fn item_severity_tag(severity: Option<Severity>) -> ColoredString {
    match severity {
        Some(severity) => severity_tag(severity),
        None => format!("{:<8}", "Unknown").dimmed().bold(),
    }
}

/// Whether a finding clears `min_severity`; unreadable severities only pass
/// the lowest threshold.
pub fn meets_threshold(severity: Option<Severity>, min_severity: Severity) -> bool {
    match severity {
        Some(severity) => severity >= min_severity,
        None => min_severity == Severity::Info,
    }
}

fn unavailable(err: &NessusError) -> ColoredString {
    match err {
        NessusError::PropertyNotFound { .. } | NessusError::EmptyProperty { .. } => {
            "unknown".dimmed()
        }
        other => other.to_string().red(),
    }
}

pub fn ip_to_detail(host: &Host<'_, '_>) -> Detail {
    match host.ip_address() {
        Ok(IpAddr::V4(ipv4_addr)) => (
            String::from("IPv4"),
            ipv4_addr.to_string().color(colors::IPV4_ADDR),
        ),
        Ok(IpAddr::V6(ipv6_addr)) => (
            String::from("IPv6"),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
        Err(err) => (String::from("IP"), unavailable(&err)),
    }
}

pub fn fqdn_to_detail(host: &Host<'_, '_>) -> Detail {
    let value = match host.fqdn() {
        Ok(fqdn) => fqdn.color(colors::FQDN),
        Err(err) => unavailable(&err),
    };
    (String::from("FQDN"), value)
}

/// Highest severity among `items`; items with an unreadable severity are skipped.
pub fn highest_severity(items: &[ReportItem<'_, '_>]) -> Option<Severity> {
    items
        .iter()
        .filter_map(|item| item.severity_level().ok())
        .max()
}

pub fn port_to_string(item: &ReportItem<'_, '_>) -> anyhow::Result<String> {
    Ok(format!(
        "{}/{} ({})",
        item.port()?,
        item.protocol()?,
        item.service_name()?
    ))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

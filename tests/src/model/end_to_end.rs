#![cfg(test)]
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use nessusfile_common::severity::Severity;
use nessusfile_core::{NessusError, ScanSource};

use crate::fixtures::{fixture, MINIMAL, MULTI_HOST, TRUNCATED};

/// Loads the smallest useful report and walks every level of the model.
#[test]
fn minimal_report_round_trip() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MINIMAL))?;
    let scan = source.parse()?;

    assert_eq!(scan.report_name(), Some("minimal"));

    let hosts = scan.hosts();
    assert_eq!(hosts.len(), 1, "expected exactly one host");

    let host = hosts[0];
    assert_eq!(host.name()?, "10.0.0.1");
    assert_eq!(host.fqdn()?, "h.example.com");
    assert_eq!(host.ip_address()?, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    let items = host.report_items();
    assert_eq!(items.len(), 1, "expected exactly one report item");

    let item = items[0];
    assert_eq!(item.plugin_id()?, 19506);
    assert_eq!(item.plugin_name()?, "Nessus Scan Information");
    assert_eq!(item.port()?, 0);
    assert_eq!(item.protocol()?, "tcp");
    assert_eq!(item.service_name()?, "general");
    assert_eq!(item.severity()?, "0");
    assert_eq!(item.severity_level()?, Severity::Info);
    assert_eq!(item.plugin_family()?, "Settings");
    assert_eq!(item.plugin_type(), Some("summary"));
    assert!(item
        .plugin_output()
        .is_some_and(|output| output.contains("Scanner IP : 10.0.0.250")));

    Ok(())
}

#[test]
fn host_count_matches_report_hosts() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;

    let expected = source.text().matches("<ReportHost ").count();
    let names: Vec<&str> = scan
        .hosts()
        .iter()
        .map(|host| host.name())
        .collect::<Result<_, _>>()?;

    assert_eq!(names.len(), expected);
    assert_eq!(names, vec!["192.168.1.1", "192.168.1.20", "fe80::1"]);
    Ok(())
}

#[test]
fn duplicate_properties_collapse_last_wins() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;
    let host = scan.find_host("192.168.1.1").expect("gateway host present");

    let list = host.properties_list();
    let properties = host.properties()?;

    assert!(list.len() >= properties.len());
    assert_eq!(list.len(), 4);
    assert_eq!(properties.len(), 3);
    assert_eq!(properties["mac-address"], Some("66:77:88:99:aa:bb"));
    assert_eq!(
        host.property_values("mac-address"),
        vec![Some("00:11:22:33:44:55"), Some("66:77:88:99:aa:bb")]
    );
    Ok(())
}

#[test]
fn field_errors_surface_at_the_accessor() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;
    let host = scan.find_host("192.168.1.20").expect("second host present");

    assert!(matches!(
        host.ip_address(),
        Err(NessusError::InvalidAddress { .. })
    ));
    assert!(matches!(
        host.fqdn(),
        Err(NessusError::PropertyNotFound { .. })
    ));

    let items = host.report_items();
    let message = items[1].port().unwrap_err().to_string();
    assert!(message.contains("'general'"));
    assert!(message.contains("numeric"));

    // the rest of the item is still readable
    assert_eq!(items[1].plugin_id()?, 20007);
    assert_eq!(items[0].port()?, 8080);
    Ok(())
}

#[test]
fn ipv6_host_address() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;
    let host = scan.find_host("fe80::1").expect("ipv6 host present");

    assert_eq!(
        host.ip_address()?,
        IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))
    );
    assert!(host.report_items().is_empty());
    Ok(())
}

#[test]
fn truncated_report_is_not_well_formed() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(TRUNCATED))?;

    assert!(matches!(
        source.parse(),
        Err(NessusError::NotWellFormed(_))
    ));
    Ok(())
}

#[test]
fn missing_report_fails_to_load() {
    let result = ScanSource::load(fixture("does_not_exist.nessus"));
    assert!(matches!(result, Err(NessusError::Read { .. })));
}

#![cfg(test)]
use nessusfile_core::ScanSource;

use crate::fixtures::{fixture, MINIMAL, MULTI_HOST};

#[test]
fn shared_plugin_merges_across_hosts() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;
    let merged = scan.merge_report_items()?;

    let plugin_ids: Vec<u32> = merged.keys().copied().collect();
    assert_eq!(plugin_ids, vec![1234, 10267, 20007]);

    let foo = &merged[&1234];
    assert_eq!(foo.plugin_name, "Foo");
    assert_eq!(foo.report_items.len(), 2);

    let hosts: Vec<&str> = foo
        .hosts()
        .map(|host| host.name())
        .collect::<Result<_, _>>()?;
    assert_eq!(hosts, vec!["192.168.1.1", "192.168.1.20"]);

    assert_eq!(merged[&10267].report_items.len(), 1);
    Ok(())
}

#[test]
fn merged_pairs_point_back_at_their_host() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;

    for (plugin_id, record) in scan.merge_report_items()? {
        for (host, item) in &record.report_items {
            assert_eq!(item.plugin_id()?, plugin_id);
            assert!(host.report_items().contains(item));
        }
    }
    Ok(())
}

#[test]
fn single_item_report_yields_single_record() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MINIMAL))?;
    let scan = source.parse()?;
    let merged = scan.merge_report_items()?;

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[&19506].plugin_name, "Nessus Scan Information");
    Ok(())
}

#[test]
fn preferences_keep_every_value() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MULTI_HOST))?;
    let scan = source.parse()?;
    let preferences = scan.preferences()?;

    assert_eq!(preferences["max_hosts"], vec!["10", "20"]);
    assert_eq!(preferences["safe_checks"], vec!["yes"]);
    assert!(preferences["plugin_set"].is_empty());
    assert_eq!(preferences.len(), 3);
    Ok(())
}

#[test]
fn report_without_policy_has_no_preferences() -> anyhow::Result<()> {
    let source = ScanSource::load(fixture(MINIMAL))?;
    let scan = source.parse()?;

    assert!(scan.preferences()?.is_empty());
    Ok(())
}

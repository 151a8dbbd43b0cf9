use std::path::Path;

use anyhow::Context;
use nessusfile_common::config::Config;

use crate::terminal::print;

pub fn preferences(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let source = super::load(path)?;
    let scan = source.parse().context("failed to parse scan report")?;
    let preferences = scan.preferences()?;

    print::header("server preferences", cfg.quiet);
    if preferences.is_empty() {
        print::no_results("preferences");
        return Ok(());
    }

    print::set_key_width(preferences.keys().copied());
    for (name, values) in &preferences {
        print::aligned_line(name, values.join(", "));
    }
    Ok(())
}

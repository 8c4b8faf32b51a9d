use anyhow::Result;
use tzcal_core::zones;

use super::Context;

pub fn run(ctx: &Context, filter: Option<&str>) -> Result<()> {
    let matches = matching(filter);

    if matches.is_empty() {
        println!("{}", ctx.theme.muted("No matching timezones"));
        return Ok(());
    }

    let width = matches.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (label, zone_id) in matches {
        if label == zone_id {
            println!("{}", label);
        } else {
            println!("{:width$}  {}", label, ctx.theme.muted(zone_id), width = width);
        }
    }

    Ok(())
}

/// Entries whose label or zone id contains `filter`, ignoring case.
fn matching(filter: Option<&str>) -> Vec<(&'static str, &'static str)> {
    let needle = filter.map(str::to_lowercase).unwrap_or_default();

    zones::entries()
        .iter()
        .filter(|(label, zone_id)| {
            label.to_lowercase().contains(&needle) || zone_id.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filter_lists_everything() {
        assert_eq!(matching(None).len(), zones::entries().len());
    }

    #[test]
    fn filter_matches_labels_and_zone_ids() {
        assert!(matching(Some("tokyo")).contains(&("Japan/Tokyo", "Asia/Tokyo")));
        assert!(matching(Some("asia/kolkata")).iter().any(|(label, _)| *label == "India/Delhi"));
        assert!(matching(Some("atlantis")).is_empty());
    }
}

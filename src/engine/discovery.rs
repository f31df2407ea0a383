use std::path::{MAIN_SEPARATOR, Path};

use anyhow::{Context, Result, anyhow};
use glob::{Pattern, glob};
use itertools::Itertools;
use tracing::debug;

use crate::engine::identity::derive_id;

/// A discovered unit that has not been loaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub location: String,
}

/// Recursive glob for unit files under `root`.
pub fn unit_pattern(root: &str, suffix: &str) -> String {
    format!(
        "{}{sep}**{sep}*{}",
        Pattern::escape(root.trim_end_matches(MAIN_SEPARATOR)),
        Pattern::escape(suffix),
        sep = MAIN_SEPARATOR
    )
}

/// Finds every unit file under `root`, in forward application order.
///
/// An empty directory is not an error.
pub fn discover(root: &Path, suffix: &str) -> Result<Vec<Candidate>> {
    let root = root
        .to_str()
        .ok_or_else(|| anyhow!("Directory '{}' is not valid UTF-8", root.display()))?;
    let pattern = unit_pattern(root, suffix);
    debug!("Discovering migration units with pattern '{}'", pattern);

    let mut locations = Vec::new();
    for entry in glob(&pattern).context(format!("Invalid unit pattern '{}'", pattern))? {
        let path = entry.context("Failed to read migration directory")?;
        if !path.is_file() {
            continue;
        }
        let location = path
            .into_os_string()
            .into_string()
            .map_err(|p| anyhow!("Migration unit path {:?} is not valid UTF-8", p))?;
        locations.push(location);
    }

    Ok(order_candidates(locations, suffix))
}

/// Sorts locations byte-wise and derives their ids, dropping locations that
/// do not yield one.
pub fn order_candidates(mut locations: Vec<String>, suffix: &str) -> Vec<Candidate> {
    locations.sort();
    locations.dedup();

    locations
        .into_iter()
        .filter_map(|location| {
            let id = derive_id(&location, suffix);
            if id.is_empty() {
                debug!("Skipping '{}': no migration id", location);
                return None;
            }
            Some(Candidate { id, location })
        })
        .collect()
}

/// Ids shared by more than one candidate, each reported once.
pub fn find_duplicates(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.id.as_str())
        .duplicates()
        .sorted()
        .map(str::to_string)
        .collect()
}

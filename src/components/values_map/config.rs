use std::collections::HashSet;
use std::fmt;

use log::{info, warn};

use super::types::MapConfig;

const VALUES_MAP_JSON: &str = include_str!("../../../data/values_map.json");

/// A non-fatal problem found in the map configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigIssue {
	DuplicateId(String),
	DanglingReference { line: String, id: String },
}

impl fmt::Display for ConfigIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DuplicateId(id) => write!(f, "node id `{id}` is declared more than once"),
			Self::DanglingReference { line, id } => {
				write!(f, "connection `{line}` references undeclared node `{id}`")
			}
		}
	}
}

pub fn parse(src: &str) -> Result<MapConfig, serde_json::Error> {
	serde_json::from_str(src)
}

/// Parse the embedded map and log anything the renderer will have to skip.
pub fn load() -> Result<MapConfig, serde_json::Error> {
	let config = parse(VALUES_MAP_JSON)?;
	for issue in issues(&config) {
		warn!("values map: {issue}");
	}
	info!(
		"values map loaded: {} values, {} activities, {} connections",
		config.values.len(),
		config.activities.len(),
		config.connections.len()
	);
	Ok(config)
}

pub fn issues(config: &MapConfig) -> Vec<ConfigIssue> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();
	for id in config.node_ids() {
		if !seen.insert(id) {
			out.push(ConfigIssue::DuplicateId(id.to_string()));
		}
	}
	for conn in &config.connections {
		for id in [&conn.from, &conn.to] {
			if !seen.contains(id.as_str()) {
				out.push(ConfigIssue::DanglingReference {
					line: conn.line_id(),
					id: id.clone(),
				});
			}
		}
	}
	out
}

use serde::Deserialize;

/// Always-visible node that gets highlighted when a linked activity is selected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ValueNode {
	pub id: String,
	pub label: String,
	#[serde(default)]
	pub definition: String,
	pub x: f64,
	pub y: f64,
}

/// Selectable node; at most one is selected across the whole map.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ActivityNode {
	pub id: String,
	#[serde(alias = "title")]
	pub label: String,
	pub location: String,
	#[serde(default)]
	pub description: Option<String>,
	pub duration: String,
	pub x: f64,
	pub y: f64,
}

/// A relationship between two node ids. Drawn as one line regardless of direction.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Connection {
	pub from: String,
	pub to: String,
	#[serde(default)]
	pub text: Option<String>,
}

impl Connection {
	pub fn line_id(&self) -> String {
		format!("{}-{}", self.from, self.to)
	}

	pub fn touches(&self, id: &str) -> bool {
		self.from == id || self.to == id
	}

	pub fn links(&self, a: &str, b: &str) -> bool {
		(self.from == a && self.to == b) || (self.from == b && self.to == a)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MapConfig {
	#[serde(default)]
	pub values: Vec<ValueNode>,
	#[serde(default)]
	pub activities: Vec<ActivityNode>,
	#[serde(default)]
	pub connections: Vec<Connection>,
}

impl MapConfig {
	pub fn node_ids(&self) -> impl Iterator<Item = &str> {
		self.values
			.iter()
			.map(|v| v.id.as_str())
			.chain(self.activities.iter().map(|a| a.id.as_str()))
	}

	pub fn is_declared(&self, id: &str) -> bool {
		self.node_ids().any(|n| n == id)
	}

	/// Grid rows of every node, used to size the canvas.
	pub fn grid_rows(&self) -> Vec<f64> {
		self.values
			.iter()
			.map(|v| v.y)
			.chain(self.activities.iter().map(|a| a.y))
			.collect()
	}

	/// Declared node ids referenced by at least one connection, deduplicated in
	/// first-reference order. These are the elements the renderer waits for.
	pub fn watched_ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = Vec::new();
		for id in self
			.connections
			.iter()
			.flat_map(|c| [c.from.as_str(), c.to.as_str()])
		{
			if self.is_declared(id) && !ids.iter().any(|known| known == id) {
				ids.push(id.to_string());
			}
		}
		ids
	}
}

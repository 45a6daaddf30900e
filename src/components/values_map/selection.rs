use super::types::Connection;

/// Toggle-select: picking the current selection clears it, anything else replaces it.
pub fn toggle(current: Option<&str>, id: &str) -> Option<String> {
	if current == Some(id) {
		None
	} else {
		Some(id.to_string())
	}
}

/// True iff a connection links the selected activity to `value_id`, in either direction.
pub fn is_value_highlighted(
	connections: &[Connection],
	selected_activity: Option<&str>,
	value_id: &str,
) -> bool {
	selected_activity.is_some_and(|activity| connections.iter().any(|c| c.links(activity, value_id)))
}

/// Renderer-private line state: one selected line (its callout is shown) and
/// one hovered line, tracked independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineSelection {
	selected: Option<String>,
	hovered: Option<String>,
}

impl LineSelection {
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn is_selected(&self, line_id: &str) -> bool {
		self.selected() == Some(line_id)
	}

	pub fn is_hovered(&self, line_id: &str) -> bool {
		self.hovered() == Some(line_id)
	}

	pub fn toggle_selected(&mut self, line_id: &str) {
		self.selected = toggle(self.selected(), line_id);
	}

	pub fn hover(&mut self, line_id: &str) {
		self.hovered = Some(line_id.to_string());
	}

	pub fn unhover(&mut self, line_id: &str) {
		if self.is_hovered(line_id) {
			self.hovered = None;
		}
	}

	/// Pointer landed outside every line.
	pub fn clear(&mut self) {
		self.selected = None;
		self.hovered = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn conn(from: &str, to: &str) -> Connection {
		Connection {
			from: from.into(),
			to: to.into(),
			text: None,
		}
	}

	#[test]
	fn activity_selection_is_single_and_toggles() {
		let mut selected: Option<String> = None;
		let clicks = ["a1", "a2", "a2", "a1", "a3", "a1", "a1"];
		let expected = [Some("a1"), Some("a2"), None, Some("a1"), Some("a3"), Some("a1"), None];
		for (click, want) in clicks.iter().zip(expected) {
			selected = toggle(selected.as_deref(), click);
			assert_eq!(selected.as_deref(), want);
		}
	}

	#[test]
	fn value_highlight_follows_links_in_either_direction() {
		let connections = [conn("a1", "v1"), conn("v2", "a1"), conn("a2", "v3")];
		assert!(is_value_highlighted(&connections, Some("a1"), "v1"));
		assert!(is_value_highlighted(&connections, Some("a1"), "v2"));
		assert!(!is_value_highlighted(&connections, Some("a1"), "v3"));
		assert!(!is_value_highlighted(&connections, None, "v1"));
		assert!(!is_value_highlighted(&[], Some("a1"), "v1"));
	}

	#[test]
	fn line_toggle_select_and_switch() {
		let mut lines = LineSelection::default();
		lines.toggle_selected("a1-v1");
		assert!(lines.is_selected("a1-v1"));
		lines.toggle_selected("a1-v1");
		assert_eq!(lines.selected(), None);
		lines.toggle_selected("a1-v1");
		lines.toggle_selected("a2-v2");
		assert!(!lines.is_selected("a1-v1"));
		assert!(lines.is_selected("a2-v2"));
	}

	#[test]
	fn clear_drops_selection_and_hover() {
		let mut lines = LineSelection::default();
		lines.toggle_selected("a1-v1");
		lines.hover("a2-v2");
		lines.clear();
		assert_eq!(lines, LineSelection::default());
	}

	#[test]
	fn unhover_ignores_stale_leave_events() {
		let mut lines = LineSelection::default();
		lines.hover("a1-v1");
		lines.hover("a2-v2");
		lines.unhover("a1-v1");
		assert_eq!(lines.hovered(), Some("a2-v2"));
		lines.unhover("a2-v2");
		assert_eq!(lines.hovered(), None);
	}
}

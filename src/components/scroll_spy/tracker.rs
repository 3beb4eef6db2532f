//! Active-section bookkeeping, independent of the DOM.

/// Which registered section was most recently seen crossing into view.
///
/// Last event wins: when several sections intersect in the same batch, the
/// one reported last becomes active. Sections leaving the band never clear
/// the active id.
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
	ids: Vec<String>,
	active: Option<String>,
}

impl SectionTracker {
	pub fn new<I, S>(ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			ids: ids.into_iter().map(Into::into).collect(),
			active: None,
		}
	}

	/// Record one visibility crossing. Returns `true` if the active id changed.
	pub fn record(&mut self, id: &str, intersecting: bool) -> bool {
		if !intersecting || !self.is_registered(id) {
			return false;
		}
		if self.active.as_deref() == Some(id) {
			return false;
		}
		self.active = Some(id.to_string());
		true
	}

	pub fn active(&self) -> Option<&str> {
		self.active.as_deref()
	}

	pub fn ids(&self) -> &[String] {
		&self.ids
	}

	pub fn is_registered(&self, id: &str) -> bool {
		self.ids.iter().any(|known| known == id)
	}

	/// Forget every section; later events are ignored.
	pub fn clear(&mut self) {
		self.ids.clear();
		self.active = None;
	}
}

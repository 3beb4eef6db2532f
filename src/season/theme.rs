//! Theme records and the ordered catalog they are loaded into.
//!
//! The catalog is parsed once from JSON and never mutated afterwards. Entries
//! that cannot be turned into a valid [`Theme`] are dropped with a warning so
//! that a typo in the configuration can only ever switch an effect off.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Catalog compiled into the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/themes.json");

/// Visual effect a theme switches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
	/// Falling snow over the page background.
	Snow,
}

/// Configuration names accepted for each effect.
const EFFECT_NAMES: &[(&str, Effect)] = &[("snow", Effect::Snow), ("SnowBackground", Effect::Snow)];

impl Effect {
	/// Canonical configuration name.
	pub fn as_str(self) -> &'static str {
		match self {
			Effect::Snow => "snow",
		}
	}
}

impl FromStr for Effect {
	type Err = ThemeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		EFFECT_NAMES
			.iter()
			.find(|(name, _)| *name == s.trim())
			.map(|&(_, effect)| effect)
			.ok_or_else(|| ThemeError::UnknownEffect(s.to_string()))
	}
}

impl fmt::Display for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A named, time-boxed seasonal campaign.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Unique identifier within the catalog.
	pub id: String,
	/// Display name.
	pub name: String,
	/// First instant of the window (inclusive, local wall-clock).
	pub start: NaiveDateTime,
	/// Last instant of the window (inclusive, local wall-clock).
	pub end: NaiveDateTime,
	pub enabled: bool,
	pub effect: Effect,
}

impl Theme {
	/// Whether `now` falls inside the window. Both bounds are inclusive.
	pub fn contains(&self, now: NaiveDateTime) -> bool {
		self.start <= now && now <= self.end
	}
}

/// Reasons a single catalog entry is rejected.
#[derive(Debug, Error)]
pub enum ThemeError {
	#[error("entry is not a theme object: {0}")]
	Malformed(#[source] serde_json::Error),
	#[error("missing field `{0}`")]
	MissingField(&'static str),
	#[error("field `{field}` is not a date or date-time: {value:?}")]
	InvalidInstant { field: &'static str, value: String },
	#[error("window ends before it starts ({start} > {end})")]
	InvertedWindow {
		start: NaiveDateTime,
		end: NaiveDateTime,
	},
	#[error("unknown effect {0:?}")]
	UnknownEffect(String),
	#[error("duplicate theme id {0:?}")]
	DuplicateId(String),
}

/// Failure to read the catalog document as a whole.
#[derive(Debug, Error)]
pub enum CatalogError {
	#[error("theme catalog is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct CatalogDocument {
	#[serde(default)]
	themes: Vec<serde_json::Value>,
}

/// One entry as written in the configuration, before validation.
#[derive(Deserialize)]
struct ThemeEntry {
	id: Option<String>,
	name: Option<String>,
	start: Option<String>,
	end: Option<String>,
	#[serde(default)]
	enabled: bool,
	effect: Option<String>,
}

/// Which end of the window a date-only value describes.
#[derive(Clone, Copy)]
enum Bound {
	Start,
	End,
}

/// Parse a catalog instant into local wall-clock time.
///
/// A bare date expands to the first second of the day for `start` and the
/// last second for `end`, keeping both bounds inclusive.
fn parse_instant(field: &'static str, value: &str, bound: Bound) -> Result<NaiveDateTime, ThemeError> {
	let value = value.trim();
	for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
		if let Ok(instant) = NaiveDateTime::parse_from_str(value, format) {
			return Ok(instant);
		}
	}
	if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
		let time = match bound {
			Bound::Start => NaiveTime::MIN,
			Bound::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
		};
		return Ok(date.and_time(time));
	}
	if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
		return Ok(instant.with_timezone(&Local).naive_local());
	}
	Err(ThemeError::InvalidInstant {
		field,
		value: value.to_string(),
	})
}

impl TryFrom<ThemeEntry> for Theme {
	type Error = ThemeError;

	fn try_from(entry: ThemeEntry) -> Result<Self, Self::Error> {
		let id = entry.id.ok_or(ThemeError::MissingField("id"))?;
		let start = entry.start.ok_or(ThemeError::MissingField("start"))?;
		let end = entry.end.ok_or(ThemeError::MissingField("end"))?;
		let effect = entry.effect.ok_or(ThemeError::MissingField("effect"))?;

		let start = parse_instant("start", &start, Bound::Start)?;
		let end = parse_instant("end", &end, Bound::End)?;
		if start > end {
			return Err(ThemeError::InvertedWindow { start, end });
		}

		Ok(Theme {
			name: entry.name.unwrap_or_else(|| id.clone()),
			id,
			start,
			end,
			enabled: entry.enabled,
			effect: effect.parse()?,
		})
	}
}

/// Ordered, read-only list of themes.
///
/// Order matters: when enabled windows overlap, the earlier entry wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeCatalog {
	themes: Vec<Theme>,
}

impl ThemeCatalog {
	/// Build a catalog from already-validated themes, keeping their order.
	pub fn new(themes: Vec<Theme>) -> Self {
		Self { themes }
	}

	/// Parse a catalog document, dropping entries that fail validation.
	pub fn from_json(json: &str) -> Result<Self, CatalogError> {
		let document: CatalogDocument = serde_json::from_str(json)?;
		let mut seen = HashSet::new();
		let mut themes = Vec::with_capacity(document.themes.len());

		for (index, value) in document.themes.into_iter().enumerate() {
			let parsed = serde_json::from_value::<ThemeEntry>(value)
				.map_err(ThemeError::Malformed)
				.and_then(Theme::try_from)
				.and_then(|theme| {
					if seen.insert(theme.id.clone()) {
						Ok(theme)
					} else {
						Err(ThemeError::DuplicateId(theme.id))
					}
				});
			match parsed {
				Ok(theme) => themes.push(theme),
				Err(e) => warn!("season: ignoring theme entry #{}: {}", index, e),
			}
		}

		Ok(Self { themes })
	}

	/// The catalog shipped with the site. Empty if the bundled file is broken.
	pub fn bundled() -> Self {
		match Self::from_json(BUNDLED_CATALOG) {
			Ok(catalog) => {
				info!("season: loaded {} bundled themes", catalog.len());
				catalog
			}
			Err(e) => {
				warn!("season: {}", e);
				Self::default()
			}
		}
	}

	pub fn themes(&self) -> &[Theme] {
		&self.themes
	}

	pub fn len(&self) -> usize {
		self.themes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.themes.is_empty()
	}

	/// Catalog for a page that may carry its own override document.
	///
	/// Without an override the bundled catalog is used. An override that does
	/// not parse yields an empty catalog, so a broken edit switches effects off.
	pub fn resolve(page_override: Option<&str>) -> Self {
		let Some(json) = page_override else {
			return Self::bundled();
		};
		match Self::from_json(json) {
			Ok(catalog) => {
				info!("season: loaded {} themes from page", catalog.len());
				catalog
			}
			Err(e) => {
				warn!("season: {}; all themes disabled", e);
				Self::default()
			}
		}
	}
}

//! Page-level settings read from the host document.

use serde::Deserialize;

use crate::components::snow::SnowStyle;

/// Named snow configurations selectable from the page.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnowPreset {
	#[default]
	Flurry,
	Blizzard,
}

impl SnowPreset {
	pub fn style(self) -> SnowStyle {
		match self {
			SnowPreset::Flurry => SnowStyle::flurry(),
			SnowPreset::Blizzard => SnowStyle::blizzard(),
		}
	}
}

/// Site settings. Every field is optional in the JSON.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
	/// Show the season status overlay.
	pub show_season_status: bool,
	pub snow: SnowPreset,
}

impl SiteConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
	}

	#[test]
	fn reads_all_fields() {
		let config =
			SiteConfig::from_json(r#"{"show_season_status": true, "snow": "blizzard"}"#).unwrap();
		assert!(config.show_season_status);
		assert_eq!(config.snow, SnowPreset::Blizzard);
		assert_eq!(config.snow.style(), SnowStyle::blizzard());
	}

	#[test]
	fn unknown_preset_is_an_error() {
		assert!(SiteConfig::from_json(r#"{"snow": "hail"}"#).is_err());
	}
}

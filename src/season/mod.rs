//! Seasonal theme selection.
//!
//! Themes are time-boxed campaigns loaded from a static catalog. The gate
//! answers "which theme is live now?" as a pure function of the catalog and
//! a [`Clock`]; callers that need to notice the calendar moving on hold a
//! [`ScheduledCheck`] and re-ask periodically.

mod clock;
mod gate;
mod schedule;
mod theme;

pub use clock::Clock;
pub use gate::{EffectGate, days_remaining, legacy_cutoff_active, legacy_snow_cutoff};
pub use schedule::ScheduledCheck;
pub use theme::{CatalogError, Effect, Theme, ThemeCatalog, ThemeError};

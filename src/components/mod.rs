//! Page components: the seasonal snow layer, scroll-spy navigation and the
//! season status overlay.

pub mod nav;
pub mod scroll_spy;
pub mod season_status;
pub mod snow;

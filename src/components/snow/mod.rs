//! Seasonal falling-snow background.
//!
//! Renders an ambient snowfall on a transparent canvas behind the page while
//! the seasonal gate reports a snow theme live:
//! - Fixed-size flake pool sized from the container area
//! - Sinusoidal sway on top of per-flake drift
//! - Respawn above the top edge, horizontal wraparound
//! - Container and window resize tracking without reallocating the pool
//!
//! # Example
//!
//! ```ignore
//! use portfolio_season::components::snow::SnowBackground;
//! use portfolio_season::season::ThemeCatalog;
//!
//! view! { <SnowBackground catalog=ThemeCatalog::bundled() /> }
//! ```

mod component;
pub mod field;
pub mod render;
pub mod style;
mod surface;

pub use component::SnowBackground;
pub use field::{Flake, SnowField, pool_size};
pub use style::{Color, SnowStyle};
pub use surface::{SnowRenderer, measure_container};

//! Lookup and IO tools backing the content stages
//!
//! The wiki and weather clients sit behind `async_trait` seams so the
//! pipeline can be exercised with fakes. Both absorb transport failures
//! into deterministic fallback content rather than surfacing them.

pub mod export;
pub mod geo;
pub mod weather;
pub mod wiki;

pub use weather::{OpenMeteoClient, WeatherApi};
pub use wiki::{SearchHit, WikiApi, WikiClient, WikiPage};

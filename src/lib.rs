#![warn(clippy::pedantic)]

//! Smoke check for a running MoneyMinder deployment: the landing page must
//! render and the demo account must be able to log in through the API.

pub mod api;
pub mod check;
pub mod error;
pub mod origin;

pub use check::{BRAND, SmokeCheck, Step};
pub use error::SmokeError;
pub use origin::Origin;

//! Mock weather lookup.
//!
//! Every non-empty city gets the same canned report; nothing is fetched or
//! stored.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/weather` | Lookup form |
//! | POST | `/weather` | Render the form with a report for `city` |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::WeatherService;

//! Static option selection page.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/selection` | Fixed option list, echoing `?selected=` back |

pub mod dtos;
pub mod handlers;
pub mod routes;

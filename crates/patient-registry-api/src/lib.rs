//! HTTP surface for the patient registry.
//!
//! Exposes the registry's CRUD and sort operations as JSON endpoints:
//!
//! | Method   | Path                  | Behavior                         |
//! |----------|-----------------------|----------------------------------|
//! | `GET`    | `/`                   | liveness message                 |
//! | `GET`    | `/patients`           | full collection                  |
//! | `GET`    | `/view/:patient_id`   | single record or 404             |
//! | `GET`    | `/sort`               | ordered records, 400 on bad args |
//! | `POST`   | `/create`             | 201, 409 on duplicate id         |
//! | `PUT`    | `/edit/:patient_id`   | 200, 404 if absent               |
//! | `DELETE` | `/delete/:patient_id` | 200, 404 if absent               |

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{app_router, AppState};

//! Shared contracts between the admin frontend and the gifting platform API.
//!
//! Records mirror the API's JSON shape (`camelCase`, ids in `_id`). Forms,
//! validation and derived-state rules live next to the records so they can be
//! tested without a browser.

pub mod domain;
pub mod shared;
pub mod system;

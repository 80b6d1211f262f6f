//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisting data.
//! They are private to the infrastructure layer and handle the evolution
//! of the storage format over time.
//!
//! ### UssdSession Version History
//! - **1.0.0**: `user_data` as JSON text
//! - **1.1.0**: `user_data` as an object, added `updated_at`

mod ussd_session;

pub use ussd_session::{UssdSessionV1_0_0, UssdSessionV1_1_0, create_ussd_session_migrator};

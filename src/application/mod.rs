// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Composition root: wires the store into the services
// - Boundary between a front end and the services
// - Translates AppError into ErrorResponse

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;

//! Game Catalogue SDK - envelope types shared by the catalogue handler
//!
//! This crate holds the parts of a request's life that do not touch storage
//! or rendering: decoding the gateway event, reading form bodies, the error
//! taxonomy and the response envelope.

pub mod error;
pub mod request;
pub mod response;

pub mod prelude {
    //! Common imports for catalogue handlers
    pub use crate::error::HandlerError;
    pub use crate::request::{FormData, GatewayEvent, Request};
    pub use crate::response::Response;
}

// Re-export key types at crate root
pub use error::HandlerError;
pub use request::{EnvelopeKind, FormData, GatewayEvent, Request};
pub use response::{GatewayResponse, Response};

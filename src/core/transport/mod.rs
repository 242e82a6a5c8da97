//! HTTP transport seam
//!
//! The dispatcher talks to the network only through [`HttpTransport`]. Credential injection is a
//! decorator around a transport, see [`AuthenticatedTransport`].

mod auth;
mod reqwest_transport;
mod types;


pub use auth::{AuthenticatedTransport, Credential};
pub use reqwest_transport::ReqwestTransport;
pub use types::{
    ErrorResponse, HttpRequest, HttpResponse, HttpTransport, TransportError, TransportErrorKind,
};

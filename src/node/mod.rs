//! DocuProx node surface: schema, credential type and the executable node

pub mod credentials;
pub mod description;
pub mod executor;

pub use credentials::DocuProxApiCredential;
pub use description::{NodeDescription, NodeProperty, Operation, Resource, node_description};
pub use executor::DocuProxNode;

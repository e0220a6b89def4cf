//! Typed resource model for Resource Manager
//!
//! Defines the closed set of connection resources, the validation
//! boundary for user-supplied definitions, and the mapping from a
//! resource to its INI settings.

pub mod definition;
pub mod error;
pub mod resource;

pub use definition::ResourceDefinition;
pub use error::{Error, Result};
pub use resource::{
    DbResource, DbTlsOptions, LdapEncryption, LdapResource, Resource, ResourceKind,
};

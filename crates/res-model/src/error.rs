//! Error types for res-model

use crate::resource::ResourceKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid resource type {given:?}: expected one of {expected}")]
    InvalidResourceType { given: String, expected: String },

    #[error("missing field {field:?} for {kind} resource")]
    MissingField {
        kind: ResourceKind,
        field: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid_resource_type(given: &str) -> Self {
        let expected = ResourceKind::ALL
            .iter()
            .map(|kind| format!("{:?}", kind.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidResourceType {
            given: given.to_string(),
            expected,
        }
    }
}

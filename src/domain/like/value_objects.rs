use serde::{Deserialize, Serialize};
use validator::Validate;

/// Opaque visitor identity derived from connection metadata.
///
/// Must be non-empty and of bounded length; no further normalization is done,
/// the resolver hands us whatever the transport knew about the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct VisitorId {
    #[validate(length(min = 1, max = 128))]
    pub value: String,
}

impl VisitorId {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let id = Self {
            value: value.trim().to_string(),
        };
        id.validate()?;
        Ok(id)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

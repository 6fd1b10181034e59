//! Planet payload validation

use super::validation::{required, ValidationError};

/// Validated planet create/update payload.
///
/// Both fields must be present and non-blank; no climate vocabulary is
/// enforced.
#[derive(Debug, Clone)]
pub struct PlanetDraft {
    name: String,
    climate: String,
}

impl PlanetDraft {
    pub fn new(name: Option<String>, climate: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name)?,
            climate: required("climate", climate)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn climate(&self) -> &str {
        &self.climate
    }
}

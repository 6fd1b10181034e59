//! Person payload validation

use super::validation::{required, ValidationError};

/// Validated person create/update payload.
///
/// `planet_id` must be present in the request; whether the planet actually
/// exists is checked at write time, inside the same transaction as the
/// write.
#[derive(Debug, Clone)]
pub struct PersonDraft {
    name: String,
    gender: String,
    planet_id: i64,
}

impl PersonDraft {
    pub fn new(
        name: Option<String>,
        gender: Option<String>,
        planet_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name)?,
            gender: required("gender", gender)?,
            planet_id: planet_id.ok_or(ValidationError::Missing { field: "planet_id" })?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn planet_id(&self) -> i64 {
        self.planet_id
    }
}

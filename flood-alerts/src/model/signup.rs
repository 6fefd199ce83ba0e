use crate::AppError;

/// The form as submitted. Absent and empty fields are both possible.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct SignupForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub station: Option<String>,
}

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Signup {
    pub name: String,
    pub phone: String,
    pub station: String,
}

impl SignupForm {
    /// Values are passed through untouched: no trimming, no phone formatting.
    pub fn validate(&self) -> Result<Signup, AppError> {
        Ok(Signup {
            name: required(&self.name, "name")?,
            phone: required(&self.phone, "phone")?,
            station: required(&self.station, "station")?,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, AppError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(AppError::Validation(field))
}

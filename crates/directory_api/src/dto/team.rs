//! Team request/response DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use directory_core::TeamId;
use directory_db::TeamRow;

/// Request to create a team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(custom(function = not_blank))]
    pub name: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Team response body
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub team_id: TeamId,
    pub name: String,
}

impl From<TeamRow> for TeamResponse {
    fn from(row: TeamRow) -> Self {
        Self {
            team_id: row.team_id,
            name: row.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_team_name_fails_validation() {
        let request = CreateTeamRequest {
            name: String::new(),
        };
        assert!(request.validate().is_err());
    }
}

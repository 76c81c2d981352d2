//! Item update form
//!
//! Every field arrives optional so that a missing field and a present-but-bad
//! field produce distinct messages. Converting into repository changes only
//! succeeds once the form validates, so invalid prices or blank names never
//! reach the database.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use directory_core::ItemId;
use directory_db::{ItemChanges, ItemRow};

/// Form for updating an item
#[derive(Debug, Deserialize, Validate)]
pub struct ItemUpdateForm {
    #[validate(required(message = "is required"))]
    pub id: Option<i64>,

    #[validate(
        required(message = "is required"),
        custom(function = not_blank)
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "is required"),
        range(min = 1000, max = 1_000_000, message = "must be between 1000 and 1000000")
    )]
    pub price: Option<i32>,

    /// No constraint: any quantity is accepted, a missing one means zero
    pub quantity: Option<i32>,
}

impl ItemUpdateForm {
    /// Validates the form and converts it into repository changes
    pub fn into_changes(self) -> Result<(ItemId, ItemChanges), ValidationErrors> {
        self.validate()?;

        match (self.id, self.name, self.price) {
            (Some(id), Some(name), Some(price)) => Ok((
                ItemId::new(id),
                ItemChanges {
                    name,
                    price,
                    quantity: self.quantity.unwrap_or(0),
                },
            )),
            // validate() already rejected any missing required field
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("id", ValidationError::new("required"));
                Err(errors)
            }
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Item response body
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item_id: ItemId,
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

impl From<ItemRow> for ItemResponse {
    fn from(row: ItemRow) -> Self {
        Self {
            item_id: row.item_id,
            name: row.name,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ItemUpdateForm {
        ItemUpdateForm {
            id: Some(1),
            name: Some("itemA".to_string()),
            price: Some(10_000),
            quantity: Some(2),
        }
    }

    #[test]
    fn valid_form_converts_to_changes() {
        let (id, changes) = valid_form().into_changes().unwrap();
        assert_eq!(id, ItemId::new(1));
        assert_eq!(changes.name, "itemA");
        assert_eq!(changes.price, 10_000);
        assert_eq!(changes.quantity, 2);
    }

    #[test]
    fn missing_id_is_rejected() {
        let form = ItemUpdateForm {
            id: None,
            ..valid_form()
        };
        let errors = form.into_changes().unwrap_err();
        assert!(errors.field_errors().contains_key("id"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = ItemUpdateForm {
            name: Some("   ".to_string()),
            ..valid_form()
        };
        let errors = form.into_changes().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn price_below_lower_bound_is_rejected() {
        let form = ItemUpdateForm {
            price: Some(999),
            ..valid_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let low = ItemUpdateForm {
            price: Some(1000),
            ..valid_form()
        };
        assert!(low.validate().is_ok());

        let high = ItemUpdateForm {
            price: Some(1_000_000),
            ..valid_form()
        };
        assert!(high.validate().is_ok());

        let over = ItemUpdateForm {
            price: Some(1_000_001),
            ..valid_form()
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn quantity_has_no_constraint() {
        let form = ItemUpdateForm {
            quantity: None,
            ..valid_form()
        };
        let (_, changes) = form.into_changes().unwrap();
        assert_eq!(changes.quantity, 0);

        let negative = ItemUpdateForm {
            quantity: Some(-5),
            ..valid_form()
        };
        assert!(negative.into_changes().is_ok());
    }
}

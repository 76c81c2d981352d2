//! Test data builders
//!
//! Builders with defaults so tests name only the fields they care about.

use directory_core::TeamId;
use directory_db::{NewItem, NewMember};

/// Builder for member test data
pub struct TestMemberBuilder {
    username: String,
    age: i32,
    team_id: Option<TeamId>,
}

impl Default for TestMemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMemberBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            username: "member1".to_string(),
            age: 0,
            team_id: None,
        }
    }

    /// Sets the username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the age
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    /// Assigns the member to a team
    pub fn in_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Builds the insert data
    pub fn build(self) -> NewMember {
        NewMember {
            username: self.username,
            age: self.age,
            team_id: self.team_id,
        }
    }
}

/// Builder for item test data
pub struct TestItemBuilder {
    name: String,
    price: i32,
    quantity: i32,
}

impl Default for TestItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestItemBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            name: "itemA".to_string(),
            price: 10_000,
            quantity: 10,
        }
    }

    /// Sets the item name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the price
    pub fn with_price(mut self, price: i32) -> Self {
        self.price = price;
        self
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Builds the insert data
    pub fn build(self) -> NewItem {
        NewItem {
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_builder_defaults() {
        let member = TestMemberBuilder::new().build();
        assert_eq!(member.username, "member1");
        assert_eq!(member.age, 0);
        assert!(member.team_id.is_none());
    }

    #[test]
    fn member_builder_overrides() {
        let member = TestMemberBuilder::new()
            .with_username("AAA")
            .with_age(30)
            .in_team(TeamId::new(7))
            .build();
        assert_eq!(member.username, "AAA");
        assert_eq!(member.age, 30);
        assert_eq!(member.team_id, Some(TeamId::new(7)));
    }
}

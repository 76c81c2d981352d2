//! Pre-built test data
//!
//! Deterministic data sets for the repository contract tests. Each method
//! returns fresh values, so tests can insert them without coordinating.

use directory_core::TeamId;
use directory_db::{NewItem, NewMember, NewTeam};

use crate::builders::TestItemBuilder;

/// Fixture data for members
pub struct MemberFixtures;

impl MemberFixtures {
    /// Two members with distinct usernames and ages 10 / 20
    pub fn pair() -> Vec<NewMember> {
        vec![
            NewMember::with_age("AAA", 10),
            NewMember::with_age("BBB", 20),
        ]
    }

    /// Five members all aged 10, usernames member1..member5
    pub fn paging_set() -> Vec<NewMember> {
        (1..=5)
            .map(|n| NewMember::with_age(format!("member{n}"), 10))
            .collect()
    }

    /// Five members with the ages used by the bulk-update contract
    pub fn bulk_update_set() -> Vec<NewMember> {
        [10, 19, 20, 21, 40]
            .into_iter()
            .enumerate()
            .map(|(n, age)| NewMember::with_age(format!("member{}", n + 1), age))
            .collect()
    }

    /// Two members m1 / m2 sharing the given team, both age 0
    pub fn team_pair(team_id: TeamId) -> Vec<NewMember> {
        vec![
            NewMember::named("m1").in_team(team_id),
            NewMember::named("m2").in_team(team_id),
        ]
    }
}

/// Fixture data for teams
pub struct TeamFixtures;

impl TeamFixtures {
    /// The canonical first team
    pub fn team_a() -> NewTeam {
        NewTeam::named("teamA")
    }

    /// The canonical second team
    pub fn team_b() -> NewTeam {
        NewTeam::named("teamB")
    }
}

/// Fixture data for items
pub struct ItemFixtures;

impl ItemFixtures {
    /// An item whose price sits inside the allowed form range
    pub fn priced_item() -> NewItem {
        TestItemBuilder::new().build()
    }
}

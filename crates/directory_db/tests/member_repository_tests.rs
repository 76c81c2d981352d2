//! Repository contract tests against a containerized Postgres
//!
//! Each test starts an isolated database, so there is no shared state to
//! clear. They need a local Docker daemon; run with `cargo test -- --ignored`.

use directory_core::PageRequest;
use directory_db::{
    DatabaseError, ItemChanges, ItemRepository, MemberOrder, MemberProbe, MemberRepository,
    MemberSearch, MemberSortField, MemberSpec, NewMember, TeamRepository,
};
use test_utils::{
    create_isolated_test_database, ItemFixtures, MemberFixtures, TeamFixtures, TestDatabase,
    TestMemberBuilder,
};

async fn database() -> TestDatabase {
    create_isolated_test_database()
        .await
        .expect("failed to start test database")
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn basic_crud_roundtrip() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    let member1 = members.insert(NewMember::named("member1")).await.unwrap();
    let member2 = members.insert(NewMember::named("member2")).await.unwrap();

    let found = members
        .find_by_id(member1.member_id)
        .await
        .unwrap()
        .expect("member1 should exist");
    assert_eq!(found, member1);

    let all = members.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(members.count().await.unwrap(), 2);

    assert_eq!(members.delete(member1.member_id).await.unwrap(), 1);
    assert_eq!(members.delete(member2.member_id).await.unwrap(), 1);
    assert_eq!(members.count().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn delete_all_drops_count_to_zero() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    for member in MemberFixtures::paging_set() {
        members.insert(member).await.unwrap();
    }
    assert_eq!(members.count().await.unwrap(), 5);

    assert_eq!(members.delete_all().await.unwrap(), 5);
    assert_eq!(members.count().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn username_and_age_threshold_is_strict() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    members.insert(NewMember::with_age("AAA", 10)).await.unwrap();
    members.insert(NewMember::with_age("AAA", 20)).await.unwrap();
    members.insert(NewMember::with_age("BBB", 20)).await.unwrap();

    let result = members
        .find_by_username_and_age_greater_than("AAA", 15)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "AAA");
    assert_eq!(result[0].age, 20);

    // Strictly greater: a member exactly at the threshold is excluded.
    let at_threshold = members
        .find_by_username_and_age_greater_than("AAA", 20)
        .await
        .unwrap();
    assert!(at_threshold.is_empty());
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn exact_match_query_binds_both_fields() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    for member in MemberFixtures::pair() {
        members.insert(member).await.unwrap();
    }

    let result = members.find_user("AAA", 10).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "AAA");

    assert!(members.find_user("AAA", 20).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn username_list_and_in_list_queries() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    for member in MemberFixtures::pair() {
        members.insert(member).await.unwrap();
    }

    let usernames = members.list_usernames().await.unwrap();
    assert_eq!(usernames, ["AAA", "BBB"]);

    let found = members
        .find_by_usernames(&["AAA".to_string(), "BBB".to_string()])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let partial = members
        .find_by_usernames(&["AAA".to_string(), "CCC".to_string()])
        .await
        .unwrap();
    assert_eq!(partial.len(), 1);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn summary_projection_joins_team_name() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());
    let teams = TeamRepository::new(db.pool().clone());

    let team_a = teams.insert(TeamFixtures::team_a()).await.unwrap();
    members
        .insert(
            TestMemberBuilder::new()
                .with_username("AAA")
                .with_age(10)
                .in_team(team_a.team_id)
                .build(),
        )
        .await
        .unwrap();
    members
        .insert(TestMemberBuilder::new().with_username("BBB").build())
        .await
        .unwrap();

    let summaries = members.find_summaries().await.unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].username, "AAA");
    assert_eq!(summaries[0].team_name.as_deref(), Some("teamA"));
    assert_eq!(summaries[1].team_name, None);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn single_result_contract() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    // No match: the list variant returns an empty vector, the single
    // variant returns None.
    assert!(members.find_by_username("ghost").await.unwrap().is_empty());
    assert!(members.find_one_by_username("ghost").await.unwrap().is_none());

    members.insert(NewMember::named("AAA")).await.unwrap();
    assert!(members.find_one_by_username("AAA").await.unwrap().is_some());

    // Two rows under the same username make the single variant fail.
    members.insert(NewMember::named("AAA")).await.unwrap();
    let error = members.find_one_by_username("AAA").await.unwrap_err();
    assert!(matches!(
        error,
        DatabaseError::NonUniqueResult { count: 2, .. }
    ));
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn paging_reports_totals_and_navigation() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    for member in MemberFixtures::paging_set() {
        members.insert(member).await.unwrap();
    }

    let request = PageRequest::of(0, 3);
    let order = MemberOrder::desc(MemberSortField::Username);
    let page = members.find_by_age(10, &request, order).await.unwrap();

    assert_eq!(page.content().len(), 3);
    assert_eq!(page.total_elements(), 5);
    assert_eq!(page.number(), 0);
    assert_eq!(page.total_pages(), 2);
    assert!(page.is_first());
    assert!(page.has_next());

    let names: Vec<_> = page.content().iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, ["member5", "member4", "member3"]);

    // Converting content to a projection keeps the totals.
    let dto_page = page.map(|m| (m.member_id, m.username));
    assert_eq!(dto_page.total_elements(), 5);
    assert_eq!(dto_page.content().len(), 3);

    let last = members
        .find_by_age(10, &PageRequest::of(1, 3), order)
        .await
        .unwrap();
    assert_eq!(last.content().len(), 2);
    assert!(!last.has_next());
    assert!(last.is_last());
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn bulk_update_counts_and_is_visible_on_reread() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    for member in MemberFixtures::bulk_update_set() {
        members.insert(member).await.unwrap();
    }

    let affected = members.increment_age_where_at_least(20).await.unwrap();
    assert_eq!(affected, 3);

    // Statement-level update: a re-read observes the new ages.
    let member5 = members
        .find_one_by_username("member5")
        .await
        .unwrap()
        .expect("member5 should exist");
    assert_eq!(member5.age, 41);

    let member2 = members
        .find_one_by_username("member2")
        .await
        .unwrap()
        .expect("member2 should exist");
    assert_eq!(member2.age, 19);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn eager_join_and_on_demand_fetch_agree() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());
    let teams = TeamRepository::new(db.pool().clone());

    let team_a = teams.insert(TeamFixtures::team_a()).await.unwrap();
    let team_b = teams.insert(TeamFixtures::team_b()).await.unwrap();
    members
        .insert(NewMember::with_age("member1", 10).in_team(team_a.team_id))
        .await
        .unwrap();
    members
        .insert(NewMember::with_age("member2", 10).in_team(team_b.team_id))
        .await
        .unwrap();

    // Eager: one statement brings the team names along.
    let with_teams = members.find_all_with_team().await.unwrap();
    assert_eq!(with_teams.len(), 2);
    assert_eq!(with_teams[0].team_name.as_deref(), Some("teamA"));
    assert_eq!(with_teams[1].team_name.as_deref(), Some("teamB"));

    let by_name = members.find_with_team_by_username("member1").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].team_name.as_deref(), Some("teamA"));

    // On demand: fetch the team where it is needed.
    let member1 = members
        .find_one_by_username("member1")
        .await
        .unwrap()
        .expect("member1 should exist");
    let team = members.team_of(&member1).await.unwrap().expect("has a team");
    assert_eq!(team.name, "teamA");

    let loner = members.insert(NewMember::named("member3")).await.unwrap();
    assert!(members.team_of(&loner).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn for_update_runs_inside_a_transaction() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());

    members
        .insert(
            TestMemberBuilder::new()
                .with_username("member1")
                .with_age(10)
                .build(),
        )
        .await
        .unwrap();

    let mut tx = db.pool().begin().await.unwrap();
    let locked = members
        .find_by_username_for_update(&mut tx, "member1")
        .await
        .unwrap();
    assert_eq!(locked.len(), 1);
    tx.rollback().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn composed_specification_selects_one_of_two() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());
    let teams = TeamRepository::new(db.pool().clone());

    let team_a = teams.insert(TeamFixtures::team_a()).await.unwrap();
    for member in MemberFixtures::team_pair(team_a.team_id) {
        members.insert(member).await.unwrap();
    }

    let spec = MemberSpec::username("m1").and(MemberSpec::team_name("teamA"));
    let result = members.find_all_matching(&spec).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "m1");

    let either = MemberSpec::username("m1").or(MemberSpec::username("m2"));
    assert_eq!(members.find_all_matching(&either).await.unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn probe_ignores_unset_fields() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());
    let teams = TeamRepository::new(db.pool().clone());

    let team_a = teams.insert(TeamFixtures::team_a()).await.unwrap();
    for member in MemberFixtures::team_pair(team_a.team_id) {
        members.insert(member).await.unwrap();
    }

    // Age is unset, so only the username condition applies.
    let probe = MemberProbe::default().with_username("m1");
    let result = members.find_by_example(&probe).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "m1");

    // A fully-unset probe matches everything.
    let all = members.find_by_example(&MemberProbe::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    // Setting the age makes it a condition again.
    let miss = MemberProbe::default().with_username("m1").with_age(99);
    assert!(members.find_by_example(&miss).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn team_back_reference_is_an_explicit_query() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());
    let teams = TeamRepository::new(db.pool().clone());

    let team_a = teams.insert(TeamFixtures::team_a()).await.unwrap();
    let team_b = teams.insert(TeamFixtures::team_b()).await.unwrap();
    members
        .insert(NewMember::named("m1").in_team(team_a.team_id))
        .await
        .unwrap();
    members
        .insert(NewMember::named("m2").in_team(team_a.team_id))
        .await
        .unwrap();

    assert_eq!(teams.count().await.unwrap(), 2);
    assert_eq!(teams.members_of(team_a.team_id).await.unwrap().len(), 2);
    assert!(teams.members_of(team_b.team_id).await.unwrap().is_empty());

    // Deleting a referenced team violates the foreign key.
    let error = teams.delete(team_a.team_id).await.unwrap_err();
    assert!(error.is_constraint_violation());

    assert_eq!(teams.delete(team_b.team_id).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn item_update_applies_validated_changes() {
    let db = database().await;
    let items = ItemRepository::new(db.pool().clone());

    let item = items.insert(ItemFixtures::priced_item()).await.unwrap();

    let affected = items
        .update(
            item.item_id,
            ItemChanges {
                name: "itemB".to_string(),
                price: 20_000,
                quantity: 5,
            },
        )
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let updated = items
        .find_by_id(item.item_id)
        .await
        .unwrap()
        .expect("item should exist");
    assert_eq!(updated.name, "itemB");
    assert_eq!(updated.price, 20_000);
    assert_eq!(updated.quantity, 5);
}

#[tokio::test]
#[ignore = "requires a local Docker daemon"]
async fn search_queries_beside_the_repository() {
    let db = database().await;
    let members = MemberRepository::new(db.pool().clone());
    let teams = TeamRepository::new(db.pool().clone());
    let search = MemberSearch::new(db.pool().clone());

    let team_a = teams.insert(TeamFixtures::team_a()).await.unwrap();
    teams.insert(TeamFixtures::team_b()).await.unwrap();
    members
        .insert(NewMember::named("alice").in_team(team_a.team_id))
        .await
        .unwrap();
    members
        .insert(NewMember::named("malice").in_team(team_a.team_id))
        .await
        .unwrap();
    members.insert(NewMember::named("bob")).await.unwrap();

    let hits = search.by_username_fragment("ALIC").await.unwrap();
    assert_eq!(hits.len(), 2);

    let counts = search.team_headcounts().await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].team_name, "teamA");
    assert_eq!(counts[0].member_count, 2);
    assert_eq!(counts[1].team_name, "teamB");
    assert_eq!(counts[1].member_count, 0);
}

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use santa::db::*;
use santa::error::SantaError;
use santa::model::*;
use santa::ops::draw_ops::AssignmentStatus;
use santa::ops::wishlist_ops::GiftDraft;
use santa::ops::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

fn setup() -> (SqliteStore, Family, Vec<Participant>) {
    let store = SqliteStore::open_in_memory().unwrap();
    let family = family_ops::create_family(&store, &mut rng(), "Perez", None, Some(30)).unwrap();
    let people = ["Ana", "Luis", "Marta"]
        .iter()
        .map(|n| participant_ops::add_participant(&store, &family.code, n).unwrap())
        .collect();
    (store, family, people)
}

// ==========================================================================
// FAMILY OPS TESTS
// ==========================================================================

#[test]
fn create_family_generates_code_from_name() {
    let store = MemoryStore::new();
    let date = NaiveDate::from_ymd_opt(2024, 12, 24);
    let family = family_ops::create_family(&store, &mut rng(), "  Perez  ", date, Some(50)).unwrap();

    assert_eq!(family.name, "Perez");
    assert!(family.code.as_str().starts_with("PER"));
    assert_eq!(family.code.as_str().len(), 6);
    assert_eq!(family.event_date, date);
    assert_eq!(family.max_budget, Some(50));
    assert!(store.family_exists(&family.code).unwrap());
}

#[test]
fn create_family_rejects_blank_name() {
    let store = MemoryStore::new();
    let result = family_ops::create_family(&store, &mut rng(), "   ", None, None);
    assert!(matches!(result, Err(SantaError::BlankField { .. })));
}

#[test]
fn create_family_rejects_non_positive_budget() {
    let store = MemoryStore::new();
    for budget in [0, -5] {
        let result = family_ops::create_family(&store, &mut rng(), "Perez", None, Some(budget));
        assert!(matches!(result, Err(SantaError::NonPositive { .. })));
    }
}

#[test]
fn create_family_avoids_taken_codes() {
    let store = MemoryStore::new();
    let first = family_ops::create_family(&store, &mut rng(), "Perez", None, None).unwrap();
    // Same seed would produce the same first candidate.
    let second = family_ops::create_family(&store, &mut rng(), "Perez", None, None).unwrap();
    assert_ne!(first.code, second.code);
}

#[test]
fn create_family_gives_up_when_codes_run_out() {
    let store = MemoryStore::new();
    for n in 100..=999 {
        let code = FamilyCode::parse(&format!("ABC{}", n)).unwrap();
        store.insert_family(&Family::create(code, "Abc".into())).unwrap();
    }
    let result = family_ops::create_family(&store, &mut rng(), "Abc", None, None);
    assert!(matches!(
        result,
        Err(SantaError::CodeSpaceExhausted { attempts }) if attempts == family_ops::MAX_CODE_ATTEMPTS
    ));
}

#[test]
fn get_family_unknown_code_is_not_found() {
    let store = MemoryStore::new();
    let result = family_ops::get_family(&store, &FamilyCode::parse("NOPE12").unwrap());
    assert!(matches!(result, Err(SantaError::NotFound { .. })));
}

#[test]
fn update_family_changes_only_given_fields() {
    let (store, family, _) = setup();
    let date = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();

    let updated = family_ops::update_family(&store, &family.code, None, Some(Some(date)), None).unwrap();
    assert_eq!(updated.name, "Perez");
    assert_eq!(updated.event_date, Some(date));
    assert_eq!(updated.max_budget, Some(30));
    assert!(updated.updated_at.is_some());

    let cleared = family_ops::update_family(&store, &family.code, Some("Perez Garcia"), None, Some(None)).unwrap();
    assert_eq!(cleared.name, "Perez Garcia");
    assert_eq!(cleared.event_date, Some(date));
    assert!(cleared.max_budget.is_none());
}

#[test]
fn delete_family_twice_is_not_found() {
    let (store, family, _) = setup();
    family_ops::delete_family(&store, &family.code).unwrap();
    assert!(matches!(
        family_ops::delete_family(&store, &family.code),
        Err(SantaError::NotFound { .. })
    ));
}

// ==========================================================================
// PARTICIPANT OPS TESTS
// ==========================================================================

#[test]
fn add_participant_trims_name() {
    let (store, family, _) = setup();
    let p = participant_ops::add_participant(&store, &family.code, "  Carlos ").unwrap();
    assert_eq!(p.name, "Carlos");
}

#[test]
fn add_participant_rejects_blank_and_duplicate_names() {
    let (store, family, _) = setup();
    assert!(matches!(
        participant_ops::add_participant(&store, &family.code, "  "),
        Err(SantaError::BlankField { .. })
    ));
    assert!(matches!(
        participant_ops::add_participant(&store, &family.code, "ana"),
        Err(SantaError::AlreadyExists { .. })
    ));
}

#[test]
fn add_participant_to_unknown_family_is_not_found() {
    let store = MemoryStore::new();
    let result = participant_ops::add_participant(&store, &FamilyCode::parse("NOPE12").unwrap(), "Ana");
    assert!(matches!(result, Err(SantaError::NotFound { .. })));
}

#[test]
fn rename_participant_checks_other_names() {
    let (store, family, people) = setup();
    let renamed = participant_ops::rename_participant(&store, &family.code, &people[0].id, "Ana Maria").unwrap();
    assert_eq!(renamed.id, people[0].id);
    assert_eq!(renamed.name, "Ana Maria");

    // Changing case of your own name is fine, taking someone else's is not.
    participant_ops::rename_participant(&store, &family.code, &people[0].id, "ANA MARIA").unwrap();
    assert!(matches!(
        participant_ops::rename_participant(&store, &family.code, &people[0].id, "luis"),
        Err(SantaError::AlreadyExists { .. })
    ));
}

#[test]
fn remove_participant_returns_removed() {
    let (store, family, people) = setup();
    let removed = participant_ops::remove_participant(&store, &family.code, &people[1].id).unwrap();
    assert_eq!(removed.name, "Luis");
    assert_eq!(participant_ops::list_participants(&store, &family.code).unwrap().len(), 2);
    assert!(matches!(
        participant_ops::remove_participant(&store, &family.code, &people[1].id),
        Err(SantaError::NotFound { .. })
    ));
}

// ==========================================================================
// DRAW OPS TESTS
// ==========================================================================

#[test]
fn draw_covers_every_participant() {
    let (store, family, people) = setup();
    let set = draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    assert!(set.covers_exactly(&people));
    assert_eq!(draw_ops::assignment_status(&store, &family.code).unwrap(), AssignmentStatus::Valid);
}

#[test]
fn draw_needs_two_participants() {
    let store = MemoryStore::new();
    let family = family_ops::create_family(&store, &mut rng(), "Solo", None, None).unwrap();
    participant_ops::add_participant(&store, &family.code, "Ana").unwrap();

    let result = draw_ops::draw(&store, &family.code, &mut rng());
    assert!(matches!(result, Err(SantaError::InsufficientParticipants { count: 1 })));
    assert!(store.get_assignments(&family.code).unwrap().is_none());
}

#[test]
fn ensure_assignments_reuses_existing_draw() {
    let (store, family, _) = setup();
    let first = draw_ops::ensure_assignments(&store, &family.code, false, &mut rng()).unwrap();
    let again = draw_ops::ensure_assignments(&store, &family.code, false, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(first.assignments, again.assignments);
}

#[test]
fn regenerate_replaces_stored_draw() {
    let (store, family, people) = setup();
    draw_ops::draw(&store, &family.code, &mut rng()).unwrap();

    let newcomer = participant_ops::add_participant(&store, &family.code, "Carlos").unwrap();
    let redrawn = draw_ops::ensure_assignments(&store, &family.code, true, &mut rng()).unwrap();

    let mut everyone = people.clone();
    everyone.push(newcomer);
    assert!(redrawn.covers_exactly(&everyone));
    let stored = draw_ops::get_assignments(&store, &family.code).unwrap();
    assert_eq!(stored.assignments, redrawn.assignments);
}

#[test]
fn lookup_before_draw_is_missing() {
    let (store, family, people) = setup();
    assert_eq!(draw_ops::assignment_status(&store, &family.code).unwrap(), AssignmentStatus::Missing);
    let err = draw_ops::secret_friend(&store, &family.code, &people[0].id).unwrap_err();
    assert!(matches!(err, SantaError::AssignmentSetMissing { .. }));
    assert!(err.needs_redraw());
}

#[test]
fn secret_friend_is_never_self() {
    let (store, family, people) = setup();
    draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    for p in &people {
        let friend = draw_ops::secret_friend(&store, &family.code, &p.id).unwrap();
        assert_ne!(friend.id, p.id);
    }
}

#[test]
fn secret_friend_matches_stored_assignment() {
    let (store, family, people) = setup();
    let set = draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    let assignment = draw_ops::assignment_for(&store, &family.code, &people[2].id).unwrap();
    assert_eq!(set.find_by_giver(&people[2].id), Some(&assignment));

    let friend = draw_ops::secret_friend(&store, &family.code, &people[2].id).unwrap();
    assert_eq!(friend.id, assignment.receiver_id);
}

#[test]
fn participant_added_after_draw_is_not_in_set() {
    let (store, family, _) = setup();
    draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    let late = participant_ops::add_participant(&store, &family.code, "Carlos").unwrap();

    assert_eq!(draw_ops::assignment_status(&store, &family.code).unwrap(), AssignmentStatus::Stale);
    let err = draw_ops::secret_friend(&store, &family.code, &late.id).unwrap_err();
    assert!(matches!(err, SantaError::ParticipantNotInSet { .. }));
}

#[test]
fn removed_receiver_is_reported() {
    let (store, family, people) = setup();
    let set = draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    let giver = &people[0];
    let receiver_id = set.find_by_giver(&giver.id).unwrap().receiver_id.clone();
    participant_ops::remove_participant(&store, &family.code, &receiver_id).unwrap();

    let err = draw_ops::secret_friend(&store, &family.code, &giver.id).unwrap_err();
    assert!(matches!(err, SantaError::ReceiverRemoved { .. }));
    assert_eq!(draw_ops::assignment_status(&store, &family.code).unwrap(), AssignmentStatus::Stale);
}

#[test]
fn unknown_giver_is_not_found() {
    let (store, family, _) = setup();
    draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    let result = draw_ops::secret_friend(&store, &family.code, &Id::new("ghost"));
    assert!(matches!(result, Err(SantaError::NotFound { .. })));
}

#[test]
fn clear_assignments_resets_status() {
    let (store, family, _) = setup();
    draw_ops::draw(&store, &family.code, &mut rng()).unwrap();
    draw_ops::clear_assignments(&store, &family.code).unwrap();
    assert_eq!(draw_ops::assignment_status(&store, &family.code).unwrap(), AssignmentStatus::Missing);
}

// ==========================================================================
// WISH LIST OPS TESTS
// ==========================================================================

#[test]
fn wishlist_is_empty_until_saved() {
    let (store, family, people) = setup();
    let list = wishlist_ops::get_wishlist(&store, &family.code, &people[0].id).unwrap();
    assert!(list.gifts.is_empty());
    assert_eq!(list.owner_id, people[0].id);
}

#[test]
fn save_wishlist_overwrites_previous_list() {
    let (store, family, people) = setup();
    let owner = &people[0].id;
    wishlist_ops::save_wishlist(&store, &family.code, owner, &[GiftDraft::named("Book"), GiftDraft::named("Mug")]).unwrap();

    let scarf = GiftDraft {
        name: " Scarf ".into(),
        link: Some("  ".into()),
        image: Some(" https://img.example/scarf.png ".into()),
    };
    wishlist_ops::save_wishlist(&store, &family.code, owner, &[scarf]).unwrap();

    let list = wishlist_ops::get_wishlist(&store, &family.code, owner).unwrap();
    assert_eq!(list.gifts.len(), 1);
    assert_eq!(list.gifts[0].name, "Scarf");
    assert!(list.gifts[0].link.is_none());
    assert_eq!(list.gifts[0].image.as_deref(), Some("https://img.example/scarf.png"));
}

#[test]
fn save_wishlist_rejects_blank_gift_and_keeps_old_list() {
    let (store, family, people) = setup();
    let owner = &people[0].id;
    wishlist_ops::save_wishlist(&store, &family.code, owner, &[GiftDraft::named("Book")]).unwrap();

    let result = wishlist_ops::save_wishlist(&store, &family.code, owner, &[GiftDraft::named("Mug"), GiftDraft::named(" ")]);
    assert!(matches!(result, Err(SantaError::BlankField { .. })));
    let list = wishlist_ops::get_wishlist(&store, &family.code, owner).unwrap();
    assert_eq!(list.gifts[0].name, "Book");
}

#[test]
fn wishlist_for_unknown_participant_is_not_found() {
    let (store, family, _) = setup();
    let result = wishlist_ops::save_wishlist(&store, &family.code, &Id::new("ghost"), &[]);
    assert!(matches!(result, Err(SantaError::NotFound { .. })));
}

#[test]
fn add_and_remove_gift() {
    let (store, family, people) = setup();
    let owner = &people[1].id;
    wishlist_ops::add_gift(&store, &family.code, owner, &GiftDraft::named("Book")).unwrap();
    let list = wishlist_ops::add_gift(&store, &family.code, owner, &GiftDraft::named("Mug")).unwrap();
    assert_eq!(list.gifts.len(), 2);

    let book_id = list.gifts[0].id.clone();
    let list = wishlist_ops::remove_gift(&store, &family.code, owner, &book_id).unwrap();
    let names: Vec<&str> = list.gifts.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Mug"]);

    assert!(matches!(
        wishlist_ops::remove_gift(&store, &family.code, owner, &book_id),
        Err(SantaError::NotFound { .. })
    ));
}

#[test]
fn renaming_keeps_wishlist() {
    let (store, family, people) = setup();
    wishlist_ops::add_gift(&store, &family.code, &people[0].id, &GiftDraft::named("Book")).unwrap();
    participant_ops::rename_participant(&store, &family.code, &people[0].id, "Anita").unwrap();
    let list = wishlist_ops::get_wishlist(&store, &family.code, &people[0].id).unwrap();
    assert_eq!(list.gifts.len(), 1);
}

#[test]
fn recipient_wishlist_shows_friends_gifts() {
    let (store, family, people) = setup();
    for p in &people {
        wishlist_ops::add_gift(&store, &family.code, &p.id, &GiftDraft::named(&format!("Gift for {}", p.name))).unwrap();
    }
    draw_ops::draw(&store, &family.code, &mut rng()).unwrap();

    let (friend, list) = wishlist_ops::recipient_wishlist(&store, &family.code, &people[0].id).unwrap();
    assert_ne!(friend.id, people[0].id);
    assert_eq!(list.owner_id, friend.id);
    assert_eq!(list.gifts[0].name, format!("Gift for {}", friend.name));
}

#[test]
fn recipient_wishlist_before_draw_is_missing() {
    let (store, family, people) = setup();
    let result = wishlist_ops::recipient_wishlist(&store, &family.code, &people[0].id);
    assert!(matches!(result, Err(SantaError::AssignmentSetMissing { .. })));
}

use chrono::NaiveDate;
use roulette_pay_core::db::open_db_in_memory;
use roulette_pay_core::{
    divide, EventGroup, EventRepository, Member, ModelValidationError, Payment, RepoError,
    SqliteEventRepository,
};
use uuid::Uuid;

fn sample_event() -> EventGroup {
    let mut event = EventGroup::new("Ski trip");
    let members = vec![Member::new("Aki"), Member::new("Ben"), Member::new("Chie")];
    let ids = members.iter().map(|member| member.id).collect::<Vec<_>>();
    event.members = members;
    let shares = divide(1000, &ids, ids[2]).unwrap();
    event.payments.push(
        Payment::new(
            1000,
            " lift tickets ",
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            shares,
        )
        .unwrap(),
    );
    event
}

#[test]
fn save_and_get_roundtrip_preserves_order_and_shares() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEventRepository::new(&mut conn);
    let event = sample_event();

    repo.save_event(&event).unwrap();
    let loaded = repo.get_event(event.id).unwrap().unwrap();

    assert_eq!(loaded, event);
    assert_eq!(loaded.payments[0].memo, "lift tickets");
    let amounts = loaded.payments[0]
        .shares
        .iter()
        .map(|share| share.amount)
        .collect::<Vec<_>>();
    assert_eq!(amounts, vec![333, 333, 334]);
}

#[test]
fn save_replaces_existing_aggregate() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEventRepository::new(&mut conn);
    let mut event = sample_event();
    repo.save_event(&event).unwrap();

    event.name = "Ski trip 2026".to_string();
    event.members.remove(0);
    event.payments.clear();
    repo.save_event(&event).unwrap();

    let loaded = repo.get_event(event.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Ski trip 2026");
    assert_eq!(loaded.members.len(), 2);
    assert!(loaded.payments.is_empty());
    assert_eq!(repo.load_events().unwrap().len(), 1);
}

#[test]
fn load_events_keeps_creation_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEventRepository::new(&mut conn);
    let names = ["first", "second", "third"];
    for name in names {
        repo.save_event(&EventGroup::new(name)).unwrap();
    }

    let loaded = repo
        .load_events()
        .unwrap()
        .into_iter()
        .map(|event| event.name)
        .collect::<Vec<_>>();
    assert_eq!(loaded, names);
}

#[test]
fn get_missing_event_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&mut conn);
    assert!(repo.get_event(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn delete_cascades_and_reports_missing() {
    let mut conn = open_db_in_memory().unwrap();
    let event = sample_event();
    {
        let mut repo = SqliteEventRepository::new(&mut conn);
        repo.save_event(&event).unwrap();
        repo.delete_event(event.id).unwrap();
        assert!(repo.get_event(event.id).unwrap().is_none());

        let err = repo.delete_event(event.id).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id == event.id));
    }

    let leftover_shares: i64 = conn
        .query_row("SELECT COUNT(*) FROM payment_shares;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(leftover_shares, 0);
}

#[test]
fn save_rejects_unbalanced_payment() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEventRepository::new(&mut conn);
    let mut event = sample_event();
    event.payments[0].shares[0].amount += 1;

    let err = repo.save_event(&event).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::ShareSumMismatch {
            total: 1000,
            sum: 1001
        })
    ));
    assert!(repo.get_event(event.id).unwrap().is_none());
}

#[test]
fn corrupted_rows_are_reported_not_masked() {
    let mut conn = open_db_in_memory().unwrap();
    let event = sample_event();
    SqliteEventRepository::new(&mut conn)
        .save_event(&event)
        .unwrap();

    conn.execute("UPDATE payments SET paid_on = 'yesterday';", [])
        .unwrap();
    let repo = SqliteEventRepository::new(&mut conn);
    let err = repo.get_event(event.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

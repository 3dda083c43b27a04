use chrono::NaiveDate;
use roulette_pay_core::{divide, EventGroup, Member, Payment, SpinConfig};
use serde_json::{json, Value};

#[test]
fn payment_serializes_with_camel_case_and_iso_date() {
    let members = vec![Member::new("a"), Member::new("b")];
    let ids = members.iter().map(|member| member.id).collect::<Vec<_>>();
    let payment = Payment::new(
        101,
        "taxi",
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        divide(101, &ids, ids[1]).unwrap(),
    )
    .unwrap();

    let value = serde_json::to_value(&payment).unwrap();
    assert_eq!(value["totalAmount"], json!(101));
    assert_eq!(value["date"], json!("2026-03-09"));
    assert_eq!(value["memo"], json!("taxi"));
    assert_eq!(value["shares"][1]["memberId"], json!(ids[1].to_string()));
    assert_eq!(value["shares"][1]["amount"], json!(51));
    assert!(value.get("total_amount").is_none());
}

#[test]
fn event_group_roundtrips_through_json() {
    let mut event = EventGroup::new("Weekend");
    event.members = vec![Member::new("a"), Member::new("b")];
    let ids = event.members.iter().map(|member| member.id).collect::<Vec<_>>();
    event.payments.push(
        Payment::new(
            10,
            "",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            divide(10, &ids, ids[0]).unwrap(),
        )
        .unwrap(),
    );

    let text = serde_json::to_string(&event).unwrap();
    let decoded: EventGroup = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, event);
    decoded.validate().unwrap();
}

#[test]
fn spin_config_fills_missing_fields_with_defaults() {
    let config: SpinConfig = serde_json::from_value(json!({ "slices_per_member": 4 })).unwrap();
    assert_eq!(config.slices_per_member, 4);
    assert_eq!(config.spin_duration_ms, SpinConfig::default().spin_duration_ms);
    config.validate().unwrap();

    let empty: SpinConfig = serde_json::from_value(Value::Object(Default::default())).unwrap();
    assert_eq!(empty, SpinConfig::default());
}

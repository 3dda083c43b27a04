//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose wheel, division and event use-cases to Dart via FRB.
//! - Flatten core errors into `ok + message` envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids cross the boundary as hyphenated UUID strings.
//! - Angles are radians; amounts are whole currency units.

pub mod selection;

use log::warn;
use roulette_pay_core::db::open_db;
use roulette_pay_core::{
    core_version as core_version_inner, decode, divide, init_logging as init_logging_inner,
    parse_amount, ping as ping_inner, resolve, EventGroup, EventService, EventServiceError,
    EventServiceResult, Member, MemberStatistics, PaymentShare, RandomRotation, RotationSource,
    SelectionOutcome, SliceLayout, SpinConfig, SqliteEventRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const EVENT_DB_FILE_NAME: &str = "roulette_pay.sqlite3";
static EVENT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One painted wheel slice.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSliceItem {
    pub index: u32,
    /// Index into the participant list passed in.
    pub owner: u32,
    pub start_angle: f64,
    pub sweep: f64,
    /// Participant name when this slice carries the label, else `None`.
    pub label: Option<String>,
    /// Color slot in a 10-entry palette.
    pub palette_index: u32,
}

/// Wheel layout envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayoutResponse {
    pub ok: bool,
    pub slices: Vec<WheelSliceItem>,
    pub message: String,
}

/// Lays out the wheel for the given candidates.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Slices are returned in angular order starting at 3 o'clock.
#[flutter_rust_bridge::frb(sync)]
pub fn wheel_layout(participant_names: Vec<String>, slices_per_member: u32) -> WheelLayoutResponse {
    match SliceLayout::new(participant_names.len(), slices_per_member) {
        Ok(layout) => {
            let slices = layout
                .slices()
                .map(|slice| WheelSliceItem {
                    index: slice.index as u32,
                    owner: slice.owner as u32,
                    start_angle: slice.start_angle,
                    sweep: slice.sweep,
                    label: slice
                        .labeled
                        .then(|| participant_names[slice.owner].clone()),
                    palette_index: layout.palette_index(slice.owner) as u32,
                })
                .collect::<Vec<_>>();
            WheelLayoutResponse {
                ok: true,
                message: format!("{} slice(s).", slices.len()),
                slices,
            }
        }
        Err(err) => WheelLayoutResponse {
            ok: false,
            slices: Vec::new(),
            message: format!("wheel_layout failed: {err}"),
        },
    }
}

/// Wheel angle envelope for one animation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelFrameResponse {
    pub ok: bool,
    pub angle: f64,
    pub is_final: bool,
    pub message: String,
}

/// Computes the wheel angle at `elapsed_fraction` of a spin.
///
/// # FFI contract
/// - Fraction is clamped into `[0, 1]`.
/// - At fraction `1` the angle is exactly `start_angle + rotation_magnitude`.
/// - `slices_per_member` is validated like `wheel_layout`.
#[flutter_rust_bridge::frb(sync)]
pub fn wheel_frame(
    participant_names: Vec<String>,
    slices_per_member: u32,
    start_angle: f64,
    rotation_magnitude: f64,
    elapsed_fraction: f64,
) -> WheelFrameResponse {
    match resolve(
        &participant_names,
        slices_per_member,
        start_angle,
        rotation_magnitude,
        elapsed_fraction,
    ) {
        Ok((angle, is_final)) => WheelFrameResponse {
            ok: true,
            angle,
            is_final,
            message: String::new(),
        },
        Err(err) => WheelFrameResponse {
            ok: false,
            angle: start_angle,
            is_final: false,
            message: format!("wheel_frame failed: {err}"),
        },
    }
}

/// Draws the rotation magnitude for the next spin.
///
/// # FFI contract
/// - Uses default spin settings; result lies in `[8, 14)` full turns.
#[flutter_rust_bridge::frb(sync)]
pub fn wheel_next_rotation() -> f64 {
    RandomRotation::from_config(&SpinConfig::default()).next_magnitude()
}

/// Winner envelope for a stopped wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelDecodeResponse {
    pub ok: bool,
    /// Index into the candidate list the wheel was laid out with.
    pub winner_index: Option<u32>,
    pub message: String,
}

/// Decodes the participant under the pointer for a final wheel angle.
#[flutter_rust_bridge::frb(sync)]
pub fn wheel_decode_winner(
    final_angle: f64,
    participant_count: u32,
    slices_per_member: u32,
) -> WheelDecodeResponse {
    match decode(final_angle, participant_count as usize, slices_per_member) {
        Ok(index) => WheelDecodeResponse {
            ok: true,
            winner_index: Some(index as u32),
            message: String::new(),
        },
        Err(err) => WheelDecodeResponse {
            ok: false,
            winner_index: None,
            message: format!("wheel_decode_winner failed: {err}"),
        },
    }
}

/// One payer's share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareItem {
    pub member_id: String,
    pub amount: u64,
}

/// Division envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionResponse {
    pub ok: bool,
    /// Shares in winner order; the last one carries the remainder.
    pub shares: Vec<ShareItem>,
    pub message: String,
}

/// Splits `amount_text` among winners in confirmation order.
///
/// # FFI contract
/// - `amount_text` must be a positive integer, surrounding spaces allowed.
/// - The last winner receives the remainder.
#[flutter_rust_bridge::frb(sync)]
pub fn divide_amount(amount_text: String, winner_ids: Vec<String>) -> DivisionResponse {
    let result = (|| -> Result<Vec<ShareItem>, String> {
        let total = parse_amount(&amount_text).map_err(|err| err.to_string())?;
        let ids = winner_ids
            .iter()
            .map(|raw| parse_id(raw, "winner_id"))
            .collect::<Result<Vec<_>, _>>()?;
        let recipient = *ids.last().ok_or("at least one winner is required")?;
        let shares = divide(total, &ids, recipient).map_err(|err| err.to_string())?;
        Ok(shares.iter().map(to_share_item).collect())
    })();

    match result {
        Ok(shares) => DivisionResponse {
            ok: true,
            shares,
            message: "Divided.".to_string(),
        },
        Err(message) => DivisionResponse {
            ok: false,
            shares: Vec::new(),
            message: format!("divide_amount failed: {message}"),
        },
    }
}

/// Generic action response envelope for event commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventActionResponse {
    pub ok: bool,
    /// Id of the created or affected record.
    pub id: Option<String>,
    pub message: String,
}

impl EventActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("event=ffi_action module=ffi status=error");
        Self {
            ok: false,
            id: None,
            message,
        }
    }
}

/// Event row for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummaryItem {
    pub event_id: String,
    pub name: String,
    pub member_names: Vec<String>,
    pub member_ids: Vec<String>,
    pub payment_count: u32,
    pub grand_total: u64,
}

/// Event list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub items: Vec<EventSummaryItem>,
    pub message: String,
}

/// Creates an empty event.
#[flutter_rust_bridge::frb(sync)]
pub fn event_create(name: String) -> EventActionResponse {
    match with_event_service(|service| service.create_event(name)) {
        Ok(event) => EventActionResponse::success("Event created.", event.id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_create failed: {err}")),
    }
}

/// Deletes an event with its members and payments.
#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(event_id: String) -> EventActionResponse {
    let result = parse_id(&event_id, "event_id")
        .and_then(|id| with_event_service(|service| service.delete_event(id)).map(|()| id));
    match result {
        Ok(id) => EventActionResponse::success("Event deleted.", id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_delete failed: {err}")),
    }
}

/// Appends a member to an event.
#[flutter_rust_bridge::frb(sync)]
pub fn event_add_member(event_id: String, name: String) -> EventActionResponse {
    let result = parse_id(&event_id, "event_id")
        .and_then(|id| with_event_service(|service| service.add_member(id, name)));
    match result {
        Ok(member) => EventActionResponse::success("Member added.", member.id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_add_member failed: {err}")),
    }
}

/// Removes a member; earlier payments keep their shares.
#[flutter_rust_bridge::frb(sync)]
pub fn event_remove_member(event_id: String, member_id: String) -> EventActionResponse {
    let result = parse_id(&event_id, "event_id").and_then(|event| {
        let member = parse_id(&member_id, "member_id")?;
        with_event_service(|service| service.remove_member(event, member)).map(|()| member)
    });
    match result {
        Ok(id) => EventActionResponse::success("Member removed.", id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_remove_member failed: {err}")),
    }
}

/// Lists all events in creation order.
#[flutter_rust_bridge::frb(sync)]
pub fn event_list() -> EventListResponse {
    match with_event_service(|service| service.list_events()) {
        Ok(events) => {
            let items = events.iter().map(to_event_summary).collect::<Vec<_>>();
            EventListResponse {
                ok: true,
                message: format!("Found {} event(s).", items.len()),
                items,
            }
        }
        Err(err) => EventListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("event_list failed: {err}"),
        },
    }
}

/// Records a payment for winners confirmed by the wheel, dated today.
///
/// # FFI contract
/// - `winner_ids` are in confirmation order; the last one gets the remainder.
/// - Every winner must be a current member of the event.
#[flutter_rust_bridge::frb(sync)]
pub fn event_record_payment(
    event_id: String,
    winner_ids: Vec<String>,
    amount_text: String,
    memo: String,
) -> EventActionResponse {
    let result = parse_id(&event_id, "event_id").and_then(|event_id| {
        let ids = winner_ids
            .iter()
            .map(|raw| parse_id(raw, "winner_id"))
            .collect::<Result<Vec<_>, _>>()?;
        with_event_service(|service| {
            let event = service.get_event(event_id)?;
            let winners = ids
                .iter()
                .map(|id| {
                    event
                        .member(*id)
                        .cloned()
                        .ok_or(EventServiceError::MemberNotFound(*id))
                })
                .collect::<EventServiceResult<Vec<Member>>>()?;
            let outcome = SelectionOutcome::new(winners)?;
            service.record_payment(event_id, &outcome, &amount_text, &memo)
        })
    });
    match result {
        Ok(payment) => EventActionResponse::success("Payment recorded.", payment.id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_record_payment failed: {err}")),
    }
}

/// Member row of an event detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberItem {
    pub member_id: String,
    pub name: String,
}

/// Payment row of an event detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentItem {
    pub payment_id: String,
    pub total_amount: u64,
    pub memo: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    pub shares: Vec<ShareItem>,
}

/// Full event with members, payments and shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub event_id: String,
    pub name: String,
    pub members: Vec<MemberItem>,
    pub payments: Vec<PaymentItem>,
}

/// Event detail envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetailResponse {
    pub ok: bool,
    pub event: Option<EventDetail>,
    pub message: String,
}

/// Loads one event with its payment history.
#[flutter_rust_bridge::frb(sync)]
pub fn event_get(event_id: String) -> EventDetailResponse {
    let result = parse_id(&event_id, "event_id")
        .and_then(|id| with_event_service(|service| service.get_event(id)));
    match result {
        Ok(event) => EventDetailResponse {
            ok: true,
            event: Some(to_event_detail(&event)),
            message: String::new(),
        },
        Err(err) => EventDetailResponse {
            ok: false,
            event: None,
            message: format!("event_get failed: {err}"),
        },
    }
}

/// Deletes one payment from an event.
#[flutter_rust_bridge::frb(sync)]
pub fn event_delete_payment(event_id: String, payment_id: String) -> EventActionResponse {
    let result = parse_id(&event_id, "event_id").and_then(|event| {
        let payment = parse_id(&payment_id, "payment_id")?;
        with_event_service(|service| service.delete_payment(event, payment)).map(|()| payment)
    });
    match result {
        Ok(id) => EventActionResponse::success("Payment deleted.", id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_delete_payment failed: {err}")),
    }
}

/// Totals for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStatisticsItem {
    pub member_id: String,
    pub name: String,
    pub total_paid: u64,
    pub payment_count: u32,
}

/// Statistics envelope for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStatisticsResponse {
    pub ok: bool,
    /// One row per current member, in member order.
    pub members: Vec<MemberStatisticsItem>,
    /// Members with a non-zero total, highest first.
    pub ranking: Vec<MemberStatisticsItem>,
    pub grand_total: u64,
    pub payment_count: u32,
    pub message: String,
}

/// Per-member totals, ranking and grand total of one event.
#[flutter_rust_bridge::frb(sync)]
pub fn event_statistics(event_id: String) -> EventStatisticsResponse {
    let result = parse_id(&event_id, "event_id")
        .and_then(|id| with_event_service(|service| service.statistics(id)));
    match result {
        Ok(stats) => EventStatisticsResponse {
            ok: true,
            members: stats.members.iter().map(to_statistics_item).collect(),
            ranking: stats.ranking.iter().map(to_statistics_item).collect(),
            grand_total: stats.grand_total,
            payment_count: stats.payment_count as u32,
            message: String::new(),
        },
        Err(err) => EventStatisticsResponse {
            ok: false,
            members: Vec::new(),
            ranking: Vec::new(),
            grand_total: 0,
            payment_count: 0,
            message: format!("event_statistics failed: {err}"),
        },
    }
}

/// Randomly picked payers envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerPickResponse {
    pub ok: bool,
    /// Picked member ids; the last one receives any remainder.
    pub winner_ids: Vec<String>,
    pub message: String,
}

/// Picks `count` distinct payers without the wheel.
///
/// # FFI contract
/// - Ids can be passed to `event_record_payment` unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn event_pick_random_payers(event_id: String, count: u32) -> PayerPickResponse {
    let result = parse_id(&event_id, "event_id").and_then(|id| {
        with_event_service(|service| {
            service.pick_random_payers(id, count as usize, &mut rand::thread_rng())
        })
    });
    match result {
        Ok(outcome) => PayerPickResponse {
            ok: true,
            winner_ids: outcome
                .winner_ids()
                .iter()
                .map(|id| id.to_string())
                .collect(),
            message: "Payers picked.".to_string(),
        },
        Err(err) => PayerPickResponse {
            ok: false,
            winner_ids: Vec::new(),
            message: format!("event_pick_random_payers failed: {err}"),
        },
    }
}

fn resolve_event_db_path() -> PathBuf {
    EVENT_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ROULETTE_PAY_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(EVENT_DB_FILE_NAME)
        })
        .clone()
}

fn with_event_service<T>(
    f: impl FnOnce(&mut EventService<SqliteEventRepository<'_>>) -> EventServiceResult<T>,
) -> Result<T, String> {
    let db_path = resolve_event_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("event DB open failed: {err}"))?;
    let mut service = EventService::new(SqliteEventRepository::new(&mut conn));
    f(&mut service).map_err(|err| err.to_string())
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid {field} `{}`", raw.trim()))
}

fn to_event_detail(event: &EventGroup) -> EventDetail {
    EventDetail {
        event_id: event.id.to_string(),
        name: event.name.clone(),
        members: event
            .members
            .iter()
            .map(|member| MemberItem {
                member_id: member.id.to_string(),
                name: member.name.clone(),
            })
            .collect(),
        payments: event
            .payments
            .iter()
            .map(|payment| PaymentItem {
                payment_id: payment.id.to_string(),
                total_amount: payment.total_amount,
                memo: payment.memo.clone(),
                date: payment.date.to_string(),
                shares: payment.shares.iter().map(to_share_item).collect(),
            })
            .collect(),
    }
}

fn to_share_item(share: &PaymentShare) -> ShareItem {
    ShareItem {
        member_id: share.member_id.to_string(),
        amount: share.amount,
    }
}

fn to_statistics_item(row: &MemberStatistics) -> MemberStatisticsItem {
    MemberStatisticsItem {
        member_id: row.member_id.to_string(),
        name: row.name.clone(),
        total_paid: row.total_paid,
        payment_count: row.payment_count,
    }
}

fn to_event_summary(event: &EventGroup) -> EventSummaryItem {
    EventSummaryItem {
        event_id: event.id.to_string(),
        name: event.name.clone(),
        member_names: event.members.iter().map(|member| member.name.clone()).collect(),
        member_ids: event.members.iter().map(|member| member.id.to_string()).collect(),
        payment_count: event.payments.len() as u32,
        grand_total: event.total_spent(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, divide_amount, event_add_member, event_create, event_delete,
        event_delete_payment, event_get, event_list, event_pick_random_payers,
        event_record_payment, event_remove_member, event_statistics, init_logging, ping,
        wheel_decode_winner, wheel_frame, wheel_layout, wheel_next_rotation,
    };
    use roulette_pay_core::db::open_db;
    use std::f64::consts::PI;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("m{index}")).collect()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn wheel_layout_labels_first_slice_of_each_member() {
        let response = wheel_layout(names(3), 2);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.slices.len(), 6);
        let labels = response
            .slices
            .iter()
            .map(|slice| slice.label.as_deref())
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec![Some("m0"), Some("m1"), Some("m2"), None, None, None]
        );
        assert_eq!(response.slices[4].owner, 1);
        assert_eq!(response.slices[4].palette_index, 1);
    }

    #[test]
    fn wheel_layout_rejects_single_member() {
        let response = wheel_layout(names(1), 1);
        assert!(!response.ok);
        assert!(response.slices.is_empty());
    }

    #[test]
    fn wheel_frame_ends_exactly_on_target() {
        let response = wheel_frame(names(4), 1, 1.0, 16.0 * PI, 1.0);
        assert!(response.ok);
        assert!(response.is_final);
        assert_eq!(response.angle, 1.0 + 16.0 * PI);

        let halfway = wheel_frame(names(4), 3, 0.0, 16.0 * PI, 0.5);
        assert!(!halfway.is_final);
        assert!(halfway.angle > 8.0 * PI);
    }

    #[test]
    fn wheel_frame_rejects_slice_density_out_of_range() {
        let response = wheel_frame(names(4), 6, 1.0, 16.0 * PI, 0.5);
        assert!(!response.ok);
        assert_eq!(response.angle, 1.0);
        assert!(response.message.contains("slices per participant"));
    }

    #[test]
    fn wheel_next_rotation_stays_in_default_range() {
        for _ in 0..32 {
            let magnitude = wheel_next_rotation();
            assert!((16.0 * PI..28.0 * PI).contains(&magnitude));
        }
    }

    #[test]
    fn wheel_decode_winner_matches_pointer() {
        let response = wheel_decode_winner(0.0, 4, 1);
        assert_eq!(response.winner_index, Some(3));

        let invalid = wheel_decode_winner(f64::NAN, 4, 1);
        assert!(!invalid.ok);
        assert!(wheel_decode_winner(0.0, 4, 6).winner_index.is_none());
    }

    #[test]
    fn divide_amount_gives_remainder_to_last_winner() {
        let ids = (0..3)
            .map(|_| uuid::Uuid::new_v4().to_string())
            .collect::<Vec<_>>();
        let response = divide_amount(" 1000 ".to_string(), ids.clone());
        assert!(response.ok, "{}", response.message);
        let amounts = response
            .shares
            .iter()
            .map(|share| share.amount)
            .collect::<Vec<_>>();
        assert_eq!(amounts, vec![333, 333, 334]);
        assert_eq!(response.shares[2].member_id, ids[2]);

        assert!(!divide_amount("0".to_string(), ids.clone()).ok);
        assert!(!divide_amount("1,000".to_string(), ids).ok);
        assert!(!divide_amount("10".to_string(), Vec::new()).ok);
    }

    #[test]
    fn event_flow_records_payment() {
        let name = unique_token("event-flow");
        let created = event_create(name.clone());
        assert!(created.ok, "{}", created.message);
        let event_id = created.id.expect("event create should return id");

        let member_ids = ["a", "b", "c"]
            .iter()
            .map(|member| {
                let response = event_add_member(event_id.clone(), member.to_string());
                assert!(response.ok, "{}", response.message);
                response.id.expect("member add should return id")
            })
            .collect::<Vec<_>>();

        let recorded = event_record_payment(
            event_id.clone(),
            vec![member_ids[2].clone(), member_ids[0].clone()],
            "1001".to_string(),
            "dinner".to_string(),
        );
        assert!(recorded.ok, "{}", recorded.message);
        let payment_id = recorded.id.expect("payment should return id");

        let conn = open_db(super::resolve_event_db_path()).expect("open db");
        let amount: i64 = conn
            .query_row(
                "SELECT amount FROM payment_shares WHERE payment_uuid = ?1 AND member_uuid = ?2",
                [payment_id.as_str(), member_ids[0].as_str()],
                |row| row.get(0),
            )
            .expect("query share row");
        assert_eq!(amount, 501);

        let listed = event_list();
        assert!(listed.ok, "{}", listed.message);
        let item = listed
            .items
            .iter()
            .find(|item| item.event_id == event_id)
            .expect("created event should be listed");
        assert_eq!(item.name, name);
        assert_eq!(item.member_ids, member_ids);
        assert_eq!(item.grand_total, 1001);

        let removed = event_remove_member(event_id.clone(), member_ids[1].clone());
        assert!(removed.ok, "{}", removed.message);
        assert!(event_delete(event_id.clone()).ok);
        assert!(!event_delete(event_id).ok);
    }

    #[test]
    fn event_detail_statistics_and_payment_deletion() {
        let created = event_create(unique_token("event-detail"));
        let event_id = created.id.expect("event create should return id");
        let a = event_add_member(event_id.clone(), "a".to_string())
            .id
            .expect("member id");
        let b = event_add_member(event_id.clone(), "b".to_string())
            .id
            .expect("member id");

        let hotel = event_record_payment(
            event_id.clone(),
            vec![a.clone(), b.clone()],
            "1001".to_string(),
            "hotel".to_string(),
        );
        let taxi = event_record_payment(
            event_id.clone(),
            vec![b.clone()],
            "300".to_string(),
            "taxi".to_string(),
        );
        let taxi_id = taxi.id.expect("payment id");
        assert!(hotel.ok, "{}", hotel.message);

        let detail = event_get(event_id.clone()).event.expect("event detail");
        assert_eq!(detail.members.len(), 2);
        assert_eq!(detail.members[1].member_id, b);
        assert_eq!(detail.payments.len(), 2);
        assert_eq!(detail.payments[0].memo, "hotel");
        assert_eq!(detail.payments[0].date.len(), "2026-01-01".len());
        assert_eq!(detail.payments[0].shares[1].amount, 501);

        let stats = event_statistics(event_id.clone());
        assert!(stats.ok, "{}", stats.message);
        assert_eq!(stats.grand_total, 1301);
        assert_eq!(stats.payment_count, 2);
        assert_eq!(stats.members[1].total_paid, 801);
        assert_eq!(stats.ranking[0].member_id, b);

        let deleted = event_delete_payment(event_id.clone(), taxi_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!event_delete_payment(event_id.clone(), taxi_id).ok);
        let stats = event_statistics(event_id.clone());
        assert_eq!(stats.grand_total, 1001);
        assert_eq!(stats.members[1].payment_count, 1);

        assert!(!event_get(uuid::Uuid::new_v4().to_string()).ok);
    }

    #[test]
    fn event_pick_random_payers_returns_distinct_members() {
        let created = event_create(unique_token("event-random"));
        let event_id = created.id.expect("event create should return id");
        for name in ["a", "b", "c"] {
            event_add_member(event_id.clone(), name.to_string());
        }

        let picked = event_pick_random_payers(event_id.clone(), 2);
        assert!(picked.ok, "{}", picked.message);
        assert_eq!(picked.winner_ids.len(), 2);
        assert_ne!(picked.winner_ids[0], picked.winner_ids[1]);

        let recorded = event_record_payment(
            event_id.clone(),
            picked.winner_ids.clone(),
            "101".to_string(),
            String::new(),
        );
        assert!(recorded.ok, "{}", recorded.message);
        assert!(!event_pick_random_payers(event_id, 4).ok);
    }

    #[test]
    fn event_record_payment_rejects_unknown_member() {
        let created = event_create(unique_token("event-stranger"));
        let event_id = created.id.expect("event create should return id");
        let response = event_record_payment(
            event_id,
            vec![uuid::Uuid::new_v4().to_string()],
            "100".to_string(),
            String::new(),
        );
        assert!(!response.ok);
        assert!(response.message.contains("member not found"));
    }

    #[test]
    fn event_commands_reject_malformed_ids() {
        let response = event_add_member("not-a-uuid".to_string(), "a".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid event_id"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}

//! FFI selection sessions.
//!
//! # Responsibility
//! - Hold live `SelectionSession`s in a process-wide table keyed by session id.
//! - Forward host events (spin, frame, confirm, retry, cancel, reset).
//! - Record a payment from a completed session's outcome.
//!
//! # Invariants
//! - Responses carry the session's current state, also when the event is
//!   rejected.
//! - A session leaves the table once its payment is recorded or it is closed.

use super::{parse_id, with_event_service, EventActionResponse};
use log::info;
use roulette_pay_core::{
    EngineResult, RandomRotation, RotationSource, SelectionSession, SelectionState, SpinConfig,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;
use uuid::Uuid;

static SELECTION_SESSIONS: OnceLock<Mutex<HashMap<String, ActiveSelection>>> = OnceLock::new();

struct ActiveSelection {
    event_id: Uuid,
    session: SelectionSession,
    rotation: Box<dyn RotationSource + Send>,
}

/// Snapshot of one selection session.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResponse {
    pub ok: bool,
    pub session_id: Option<String>,
    /// `idle|awaiting_spin|spinning|result_pending|all_rounds_complete`.
    pub state: String,
    /// 1-based round while a selection is in progress.
    pub round: Option<u32>,
    pub target_count: u32,
    /// Wheel angle to draw, in radians.
    pub angle: f64,
    /// Winner waiting for confirm or retry.
    pub pending_winner_id: Option<String>,
    /// Confirmed winners in confirmation order.
    pub winner_ids: Vec<String>,
    /// Members still on the wheel, in wheel order.
    pub candidate_ids: Vec<String>,
    pub message: String,
}

impl SelectionResponse {
    fn snapshot(session_id: &str, active: &ActiveSelection) -> Self {
        let session = &active.session;
        let (angle, pending_winner_id) = match session.state() {
            SelectionState::Spinning { driver, .. } => (driver.state().current_angle(), None),
            SelectionState::ResultPending { winner, .. } => {
                (session.wheel_angle(), Some(winner.id.to_string()))
            }
            _ => (session.wheel_angle(), None),
        };
        Self {
            ok: true,
            session_id: Some(session_id.to_string()),
            state: session.state().name().to_string(),
            round: session.state().round().map(|round| round as u32),
            target_count: session.target_count() as u32,
            angle,
            pending_winner_id,
            winner_ids: session
                .winners()
                .iter()
                .map(|member| member.id.to_string())
                .collect(),
            candidate_ids: session
                .candidate_pool()
                .iter()
                .map(|member| member.id.to_string())
                .collect(),
            message: String::new(),
        }
    }

    fn failure(session_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            session_id,
            state: String::new(),
            round: None,
            target_count: 0,
            angle: 0.0,
            pending_winner_id: None,
            winner_ids: Vec::new(),
            candidate_ids: Vec::new(),
            message: message.into(),
        }
    }
}

/// Opens a selection over the event's current members and starts round 1.
///
/// # FFI contract
/// - `seed` makes spins reproducible; `None` draws from OS entropy.
/// - Returns the new `session_id` used by every other `selection_*` call.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_start(
    event_id: String,
    target_count: u32,
    slices_per_member: u32,
    seed: Option<u64>,
) -> SelectionResponse {
    let config = SpinConfig::with_slices(slices_per_member);
    let started = parse_id(&event_id, "event_id").and_then(|id| {
        let mut session = with_event_service(|service| service.start_selection(id, config))?;
        session
            .start(target_count as usize)
            .map_err(|err| err.to_string())?;
        Ok((id, session))
    });
    let (event_id, session) = match started {
        Ok(started) => started,
        Err(err) => {
            return SelectionResponse::failure(None, format!("selection_start failed: {err}"))
        }
    };

    let rotation: Box<dyn RotationSource + Send> = match seed {
        Some(seed) => Box::new(RandomRotation::seeded(seed, &config)),
        None => Box::new(RandomRotation::from_entropy(&config)),
    };
    let session_id = Uuid::new_v4().to_string();
    let active = ActiveSelection {
        event_id,
        session,
        rotation,
    };
    let response = SelectionResponse::snapshot(&session_id, &active);

    match selection_table() {
        Ok(mut table) => {
            table.insert(session_id, active);
            info!(
                "event=ffi_selection_open module=ffi status=ok open_sessions={}",
                table.len()
            );
            response
        }
        Err(err) => SelectionResponse::failure(None, format!("selection_start failed: {err}")),
    }
}

/// Spins the current round.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_spin(session_id: String) -> SelectionResponse {
    apply_event(&session_id, "selection_spin", |active| {
        active.session.spin(&mut *active.rotation)
    })
}

/// Feeds one animation frame, `elapsed_ms` after the spin started.
///
/// # FFI contract
/// - The first frame at or past the spin duration moves to `result_pending`.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_frame(session_id: String, elapsed_ms: u64) -> SelectionResponse {
    apply_event(&session_id, "selection_frame", |active| {
        active
            .session
            .frame(Duration::from_millis(elapsed_ms))
            .map(|_| ())
    })
}

/// Accepts the pending winner.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_confirm(session_id: String) -> SelectionResponse {
    apply_event(&session_id, "selection_confirm", |active| {
        active.session.confirm()
    })
}

/// Discards the pending winner and spins the same pool again.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_retry(session_id: String) -> SelectionResponse {
    apply_event(&session_id, "selection_retry", |active| {
        active.session.retry(&mut *active.rotation)
    })
}

/// Abandons a running spin; the round stays open.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_cancel(session_id: String) -> SelectionResponse {
    apply_event(&session_id, "selection_cancel", |active| {
        active.session.cancel_spin()
    })
}

/// Drops all progress; the session returns to `idle`.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_reset(session_id: String) -> SelectionResponse {
    apply_event(&session_id, "selection_reset", |active| {
        active.session.reset();
        Ok(())
    })
}

/// Forgets a session. Returns `false` for unknown ids.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_close(session_id: String) -> bool {
    selection_table()
        .map(|mut table| table.remove(&session_id).is_some())
        .unwrap_or(false)
}

/// Records a payment, dated today, for a completed selection and closes it.
///
/// # FFI contract
/// - The last confirmed winner receives the remainder.
/// - On failure the session stays open so the host can fix the amount.
#[flutter_rust_bridge::frb(sync)]
pub fn selection_record_payment(
    session_id: String,
    amount_text: String,
    memo: String,
) -> EventActionResponse {
    let prepared = selection_table().and_then(|table| {
        let active = table
            .get(&session_id)
            .ok_or_else(|| format!("unknown session `{session_id}`"))?;
        let outcome = active.session.outcome().map_err(|err| err.to_string())?;
        Ok((active.event_id, outcome))
    });
    let result = prepared.and_then(|(event_id, outcome)| {
        with_event_service(|service| {
            service.record_payment(event_id, &outcome, &amount_text, &memo)
        })
    });

    match result {
        Ok(payment) => {
            selection_close(session_id);
            EventActionResponse::success("Payment recorded.", payment.id.to_string())
        }
        Err(err) => {
            EventActionResponse::failure(format!("selection_record_payment failed: {err}"))
        }
    }
}

fn apply_event(
    session_id: &str,
    call: &str,
    event: impl FnOnce(&mut ActiveSelection) -> EngineResult<()>,
) -> SelectionResponse {
    let mut table = match selection_table() {
        Ok(table) => table,
        Err(err) => {
            return SelectionResponse::failure(
                Some(session_id.to_string()),
                format!("{call} failed: {err}"),
            )
        }
    };
    let Some(active) = table.get_mut(session_id) else {
        return SelectionResponse::failure(
            Some(session_id.to_string()),
            format!("{call} failed: unknown session `{session_id}`"),
        );
    };

    let result = event(active);
    let mut response = SelectionResponse::snapshot(session_id, active);
    if let Err(err) = result {
        response.ok = false;
        response.message = format!("{call} failed: {err}");
    }
    response
}

fn selection_table() -> Result<MutexGuard<'static, HashMap<String, ActiveSelection>>, String> {
    SELECTION_SESSIONS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .map_err(|_| "selection table is poisoned".to_string())
}

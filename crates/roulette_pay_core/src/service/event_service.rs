//! Event use-case service.
//!
//! # Responsibility
//! - Create and delete events, add and remove members.
//! - Open selection sessions over an event's members.
//! - Turn a finished selection plus an amount into a persisted payment.
//!
//! # Invariants
//! - Names are trimmed and must not be blank.
//! - Every recorded payment comes from `division::shares::divide`, with the
//!   last confirmed winner as remainder recipient.
//! - Service APIs never bypass repository validation.

use crate::config::SpinConfig;
use crate::division::amount::parse_amount;
use crate::division::shares::divide;
use crate::error::EngineError;
use crate::model::event_group::{EventGroup, EventId};
use crate::model::member::{Member, MemberId};
use crate::model::payment::{Payment, PaymentId};
use crate::model::validation::ModelValidationError;
use crate::repo::event_repo::{EventRepository, RepoError};
use crate::selection::outcome::SelectionOutcome;
use crate::selection::random::select_random_members;
use crate::selection::session::SelectionSession;
use crate::service::statistics::{summarize, EventStatistics};
use chrono::{NaiveDate, Utc};
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from event use-cases.
#[derive(Debug)]
pub enum EventServiceError {
    /// Event or member name is blank after trim.
    InvalidName,
    EventNotFound(EventId),
    MemberNotFound(MemberId),
    PaymentNotFound(PaymentId),
    /// Selection or division rejected the request.
    Engine(EngineError),
    /// Built record failed validation.
    Validation(ModelValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::PaymentNotFound(id) => write!(f, "payment not found: {id}"),
            Self::Engine(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EventNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<EngineError> for EventServiceError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ModelValidationError> for EventServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type EventServiceResult<T> = Result<T, EventServiceError>;

/// Event service facade over a repository implementation.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists an empty event.
    pub fn create_event(&mut self, name: impl Into<String>) -> EventServiceResult<EventGroup> {
        let event = EventGroup::new(normalize_name(name.into())?);
        self.repo.save_event(&event)?;
        info!("event=event_create module=service status=ok");
        Ok(event)
    }

    /// All events in creation order.
    pub fn list_events(&self) -> EventServiceResult<Vec<EventGroup>> {
        Ok(self.repo.load_events()?)
    }

    pub fn get_event(&self, event_id: EventId) -> EventServiceResult<EventGroup> {
        self.repo
            .get_event(event_id)?
            .ok_or(EventServiceError::EventNotFound(event_id))
    }

    pub fn delete_event(&mut self, event_id: EventId) -> EventServiceResult<()> {
        Ok(self.repo.delete_event(event_id)?)
    }

    /// Appends a member to the event's wheel order.
    pub fn add_member(
        &mut self,
        event_id: EventId,
        name: impl Into<String>,
    ) -> EventServiceResult<Member> {
        let mut event = self.get_event(event_id)?;
        let member = Member::new(normalize_name(name.into())?);
        event.members.push(member.clone());
        self.repo.save_event(&event)?;
        info!(
            "event=member_add module=service status=ok members={}",
            event.members.len()
        );
        Ok(member)
    }

    /// Removes a member; payment history that mentions it is kept.
    pub fn remove_member(
        &mut self,
        event_id: EventId,
        member_id: MemberId,
    ) -> EventServiceResult<()> {
        let mut event = self.get_event(event_id)?;
        let before = event.members.len();
        event.members.retain(|member| member.id != member_id);
        if event.members.len() == before {
            return Err(EventServiceError::MemberNotFound(member_id));
        }
        self.repo.save_event(&event)?;
        Ok(())
    }

    /// Opens an idle selection session over the event's current members.
    pub fn start_selection(
        &self,
        event_id: EventId,
        config: SpinConfig,
    ) -> EventServiceResult<SelectionSession> {
        let event = self.get_event(event_id)?;
        Ok(SelectionSession::new(event.members, config)?)
    }

    /// Picks `count` payers at random without spinning the wheel.
    ///
    /// The returned outcome can be passed to `record_payment` like a wheel
    /// result; its last entry receives the remainder.
    pub fn pick_random_payers<G: Rng + ?Sized>(
        &self,
        event_id: EventId,
        count: usize,
        rng: &mut G,
    ) -> EventServiceResult<SelectionOutcome> {
        let event = self.get_event(event_id)?;
        let picked = select_random_members(&event.members, count, rng)?;
        info!("event=random_pick module=service status=ok count={count}");
        Ok(SelectionOutcome::new(picked)?)
    }

    /// Records a payment dated today (UTC).
    pub fn record_payment(
        &mut self,
        event_id: EventId,
        outcome: &SelectionOutcome,
        amount_text: &str,
        memo: &str,
    ) -> EventServiceResult<Payment> {
        self.record_payment_on(event_id, outcome, amount_text, memo, Utc::now().date_naive())
    }

    /// Validates the amount, divides it among the winners and persists.
    ///
    /// # Contract
    /// - Amount text must parse as a positive integer.
    /// - Every winner must still be a member of the event.
    /// - The last winner of `outcome` receives the remainder.
    pub fn record_payment_on(
        &mut self,
        event_id: EventId,
        outcome: &SelectionOutcome,
        amount_text: &str,
        memo: &str,
        date: NaiveDate,
    ) -> EventServiceResult<Payment> {
        let total_amount = parse_amount(amount_text)?;
        let mut event = self.get_event(event_id)?;
        if let Some(stranger) = outcome
            .winners()
            .iter()
            .find(|winner| event.member(winner.id).is_none())
        {
            return Err(EventServiceError::MemberNotFound(stranger.id));
        }

        let shares = divide(
            total_amount,
            &outcome.winner_ids(),
            outcome.remainder_recipient().id,
        )?;
        let payment = Payment::new(total_amount, memo, date, shares)?;
        event.payments.push(payment.clone());
        self.repo.save_event(&event)?;
        info!(
            "event=payment_record module=service status=ok payers={} payments={}",
            payment.shares.len(),
            event.payments.len()
        );
        Ok(payment)
    }

    pub fn delete_payment(
        &mut self,
        event_id: EventId,
        payment_id: PaymentId,
    ) -> EventServiceResult<()> {
        let mut event = self.get_event(event_id)?;
        if event.payment(payment_id).is_none() {
            return Err(EventServiceError::PaymentNotFound(payment_id));
        }
        event.payments.retain(|payment| payment.id != payment_id);
        self.repo.save_event(&event)?;
        info!(
            "event=payment_delete module=service status=ok payments={}",
            event.payments.len()
        );
        Ok(())
    }

    /// Per-member totals and ranking for one event.
    pub fn statistics(&self, event_id: EventId) -> EventServiceResult<EventStatistics> {
        Ok(summarize(&self.get_event(event_id)?))
    }
}

fn normalize_name(raw: String) -> EventServiceResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EventServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}

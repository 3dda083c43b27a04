//! Event store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist whole `EventGroup` aggregates: members, payments and shares.
//! - Expose the load-all / get / save / delete contract used by services.
//!
//! # Invariants
//! - `save_event` validates the aggregate and replaces it atomically.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Concurrent writers are not coordinated; the last save wins.

use crate::db::DbError;
use crate::model::event_group::{EventGroup, EventId};
use crate::model::member::Member;
use crate::model::payment::{Payment, PaymentShare};
use crate::model::validation::ModelValidationError;
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound(EventId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for event aggregates.
pub trait EventRepository {
    /// Loads every event in creation order.
    fn load_events(&self) -> RepoResult<Vec<EventGroup>>;
    /// Loads one event, or `None` when absent.
    fn get_event(&self, id: EventId) -> RepoResult<Option<EventGroup>>;
    /// Inserts or fully replaces one event.
    fn save_event(&mut self, event: &EventGroup) -> RepoResult<()>;
    /// Deletes one event with all members and payments.
    fn delete_event(&mut self, id: EventId) -> RepoResult<()>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a migrated connection from `db::open_db*`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn load_events(&self) -> RepoResult<Vec<EventGroup>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, name FROM events ORDER BY created_at ASC, rowid ASC;")?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(load_aggregate(self.conn, row)?);
        }
        Ok(events)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<EventGroup>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, name FROM events WHERE uuid = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(load_aggregate(self.conn, row)?));
        }
        Ok(None)
    }

    fn save_event(&mut self, event: &EventGroup) -> RepoResult<()> {
        event.validate()?;

        let tx = self.conn.transaction()?;
        write_aggregate(&tx, event)?;
        tx.commit()?;

        info!(
            "event=event_save module=repo status=ok members={} payments={}",
            event.members.len(),
            event.payments.len()
        );
        Ok(())
    }

    fn delete_event(&mut self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        info!("event=event_delete module=repo status=ok");
        Ok(())
    }
}

fn write_aggregate(tx: &Transaction<'_>, event: &EventGroup) -> RepoResult<()> {
    let event_uuid = event.id.to_string();
    tx.execute(
        "INSERT INTO events (uuid, name) VALUES (?1, ?2)
         ON CONFLICT(uuid) DO UPDATE SET
            name = excluded.name,
            updated_at = (strftime('%s', 'now') * 1000);",
        params![event_uuid, event.name.trim()],
    )?;

    tx.execute("DELETE FROM members WHERE event_uuid = ?1;", [&event_uuid])?;
    for (position, member) in event.members.iter().enumerate() {
        tx.execute(
            "INSERT INTO members (event_uuid, uuid, name, position) VALUES (?1, ?2, ?3, ?4);",
            params![
                event_uuid,
                member.id.to_string(),
                member.name.trim(),
                position as i64
            ],
        )?;
    }

    tx.execute("DELETE FROM payments WHERE event_uuid = ?1;", [&event_uuid])?;
    for (position, payment) in event.payments.iter().enumerate() {
        let payment_uuid = payment.id.to_string();
        tx.execute(
            "INSERT INTO payments (uuid, event_uuid, total_amount, memo, paid_on, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                payment_uuid,
                event_uuid,
                amount_to_db(payment.total_amount)?,
                payment.memo.as_str(),
                payment.date.format(DATE_FORMAT).to_string(),
                position as i64
            ],
        )?;
        for (share_position, share) in payment.shares.iter().enumerate() {
            tx.execute(
                "INSERT INTO payment_shares (payment_uuid, member_uuid, amount, position)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    payment_uuid,
                    share.member_id.to_string(),
                    amount_to_db(share.amount)?,
                    share_position as i64
                ],
            )?;
        }
    }
    Ok(())
}

fn load_aggregate(conn: &Connection, row: &Row<'_>) -> RepoResult<EventGroup> {
    let uuid_text: String = row.get("uuid")?;
    let event = EventGroup {
        id: parse_uuid(&uuid_text, "events.uuid")?,
        name: row.get("name")?,
        members: load_members(conn, &uuid_text)?,
        payments: load_payments(conn, &uuid_text)?,
    };
    event.validate()?;
    Ok(event)
}

fn load_members(conn: &Connection, event_uuid: &str) -> RepoResult<Vec<Member>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, name FROM members WHERE event_uuid = ?1 ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([event_uuid])?;
    let mut members = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        members.push(Member {
            id: parse_uuid(&uuid_text, "members.uuid")?,
            name: row.get("name")?,
        });
    }
    Ok(members)
}

fn load_payments(conn: &Connection, event_uuid: &str) -> RepoResult<Vec<Payment>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, total_amount, memo, paid_on
         FROM payments
         WHERE event_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([event_uuid])?;
    let mut payments = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        let date_text: String = row.get("paid_on")?;
        let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!("invalid date `{date_text}` in payments.paid_on"))
        })?;
        payments.push(Payment {
            id: parse_uuid(&uuid_text, "payments.uuid")?,
            total_amount: amount_from_db(row.get("total_amount")?, "payments.total_amount")?,
            memo: row.get("memo")?,
            date,
            shares: load_shares(conn, &uuid_text)?,
        });
    }
    Ok(payments)
}

fn load_shares(conn: &Connection, payment_uuid: &str) -> RepoResult<Vec<PaymentShare>> {
    let mut stmt = conn.prepare(
        "SELECT member_uuid, amount
         FROM payment_shares
         WHERE payment_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([payment_uuid])?;
    let mut shares = Vec::new();
    while let Some(row) = rows.next()? {
        let member_text: String = row.get("member_uuid")?;
        shares.push(PaymentShare {
            member_id: parse_uuid(&member_text, "payment_shares.member_uuid")?,
            amount: amount_from_db(row.get("amount")?, "payment_shares.amount")?,
        });
    }
    Ok(shares)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn amount_to_db(amount: u64) -> RepoResult<i64> {
    i64::try_from(amount)
        .map_err(|_| RepoError::InvalidData(format!("amount {amount} exceeds storage range")))
}

fn amount_from_db(value: i64, column: &str) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative amount `{value}` in {column}")))
}

//! Lifecycle engine for request status transitions
//!
//! Every state change goes through here. Guards reject transitions the phase
//! flow does not allow; multi-row changes run inside one transaction so a
//! request and its dependent records never disagree.

use chrono::{DateTime, Duration, Utc};

use crate::core::error::{DeskError, Result};
use crate::core::store::{queries, trunc_to_micros, Store};
use crate::entities::{
    Appeal, AppealStatus, Denial, FulfillmentInput, FulfillmentPackage, Note, Request,
    RequestIntake, RequestStatus,
};

/// Attempts at drawing a fresh tracking number before a collision is reported
const TRACKING_ATTEMPTS: u32 = 5;

/// Lifecycle engine over a request store
pub struct LifecycleEngine {
    store: Store,
    response_window: Duration,
}

impl LifecycleEngine {
    /// Create an engine; new requests fall due `response_days` after
    /// submission
    pub fn new(store: Store, response_days: i64) -> Self {
        Self {
            store,
            response_window: Duration::days(response_days),
        }
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Register a new request. The deadline is fixed here and never
    /// recomputed.
    pub fn submit(&mut self, intake: RequestIntake, now: DateTime<Utc>) -> Result<Request> {
        // Tracking suffixes are random draws; on a collision, draw again
        let mut attempts = 1;
        loop {
            let request = Request::new(intake.clone(), now, self.response_window);
            match queries::insert_request(self.store.conn(), &request) {
                Ok(()) => return Ok(request),
                Err(e) if e.is_conflict_on("tracking_number") && attempts < TRACKING_ATTEMPTS => {
                    attempts += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Assign a processing officer; the request moves to `processing`
    pub fn assign(&mut self, key: &str, assignee: &str) -> Result<Request> {
        let request = self.store.find_request(key)?;
        ensure_status(
            &request,
            "assign",
            &[RequestStatus::Submitted, RequestStatus::Processing],
        )?;
        queries::set_assignment(
            self.store.conn(),
            &request.request_id,
            assignee,
            RequestStatus::Processing,
        )?;
        queries::get_request(self.store.conn(), &request.request_id)
    }

    /// Attach an internal note. Allowed in any status, including closed.
    pub fn add_note(
        &mut self,
        key: &str,
        author: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Note> {
        let request = self.store.find_request(key)?;
        let note = Note::new(
            request.request_id,
            author.to_string(),
            content.to_string(),
            now,
        );
        queries::insert_note(self.store.conn(), &note)?;
        Ok(note)
    }

    /// Release records and resolve the request as fulfilled
    pub fn fulfill(
        &mut self,
        key: &str,
        input: FulfillmentInput,
        now: DateTime<Utc>,
    ) -> Result<(Request, FulfillmentPackage)> {
        let request = self.store.find_request(key)?;
        ensure_status(
            &request,
            "fulfill",
            &[RequestStatus::Submitted, RequestStatus::Processing],
        )?;
        let package = FulfillmentPackage::new(
            request.request_id.clone(),
            input.documents,
            input.redactions,
            input.exemptions_cited,
            input.response_letter,
            input.fulfilled_by,
            now,
        );
        self.store.with_tx(|tx| {
            queries::insert_fulfillment(tx, &package)?;
            queries::set_fulfilled(tx, &package.request_id, package.created_at)?;
            Ok(())
        })?;
        let request = queries::get_request(self.store.conn(), &request.request_id)?;
        Ok((request, package))
    }

    /// Deny the request, citing exemptions
    pub fn deny(
        &mut self,
        key: &str,
        reason: &str,
        exemptions: Vec<String>,
        denied_by: &str,
        now: DateTime<Utc>,
    ) -> Result<(Request, Denial)> {
        let request = self.store.find_request(key)?;
        ensure_status(
            &request,
            "deny",
            &[RequestStatus::Submitted, RequestStatus::Processing],
        )?;
        let denial = Denial::new(
            request.request_id.clone(),
            reason.to_string(),
            exemptions,
            denied_by.to_string(),
            now,
        );
        self.store.with_tx(|tx| {
            queries::insert_denial(tx, &denial)?;
            queries::set_status(tx, &denial.request_id, RequestStatus::Denied)?;
            Ok(())
        })?;
        let request = queries::get_request(self.store.conn(), &request.request_id)?;
        Ok((request, denial))
    }

    /// File an appeal against a denial; the request moves to `appealed`
    pub fn appeal(
        &mut self,
        key: &str,
        appellant: &str,
        grounds: &str,
        now: DateTime<Utc>,
    ) -> Result<Appeal> {
        let request = self.store.find_request(key)?;
        if request.status != RequestStatus::Denied {
            return Err(DeskError::InvalidState(
                "Only denied requests can be appealed".to_string(),
            ));
        }
        let appeal = Appeal::new(
            request.request_id,
            appellant.to_string(),
            grounds.to_string(),
            now,
        );
        self.store.with_tx(|tx| {
            queries::insert_appeal(tx, &appeal)?;
            queries::set_status(tx, &appeal.request_id, RequestStatus::Appealed)?;
            Ok(())
        })?;
        Ok(appeal)
    }

    /// Decide a pending appeal. A decision of exactly `granted` reopens the
    /// parent request for processing; any other decision leaves it appealed.
    pub fn decide_appeal(
        &mut self,
        key: &str,
        decision: &str,
        now: DateTime<Utc>,
    ) -> Result<Appeal> {
        let now = trunc_to_micros(now);
        let appeal = queries::find_appeal(self.store.conn(), key)?;
        if !appeal.status.is_pending() {
            return Err(DeskError::InvalidState(format!(
                "Appeal {} has already been decided",
                appeal.appeal_id
            )));
        }
        self.store.with_tx(|tx| {
            queries::set_appeal_decision(tx, &appeal.appeal_id, decision, now)?;
            if AppealStatus::from(decision).is_granted() {
                queries::set_status(tx, &appeal.request_id, RequestStatus::Processing)?;
            }
            Ok(())
        })?;
        queries::get_appeal(self.store.conn(), &appeal.appeal_id)
    }

    /// Administratively close the request, optionally recording the reason as
    /// a note
    pub fn close(
        &mut self,
        key: &str,
        reason: Option<&str>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Request> {
        let request = self.store.find_request(key)?;
        ensure_status(
            &request,
            "close",
            &[
                RequestStatus::Submitted,
                RequestStatus::Processing,
                RequestStatus::Denied,
                RequestStatus::Appealed,
            ],
        )?;
        let pending =
            queries::pending_appeals_for_request(self.store.conn(), &request.request_id)?;
        if !pending.is_empty() {
            return Err(DeskError::InvalidState(
                "Cannot close a request with a pending appeal".to_string(),
            ));
        }
        let note = reason.map(|reason| {
            Note::new(
                request.request_id.clone(),
                actor.to_string(),
                reason.to_string(),
                now,
            )
        });
        self.store.with_tx(|tx| {
            queries::set_status(tx, &request.request_id, RequestStatus::Closed)?;
            if let Some(ref note) = note {
                queries::insert_note(tx, note)?;
            }
            Ok(())
        })?;
        queries::get_request(self.store.conn(), &request.request_id)
    }
}

fn ensure_status(request: &Request, action: &str, allowed: &[RequestStatus]) -> Result<()> {
    if !allowed.contains(&request.status) {
        return Err(DeskError::InvalidState(format!(
            "Cannot {} a {} request",
            action, request.status
        )));
    }
    Ok(())
}

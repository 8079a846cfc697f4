//! Row-level reads and writes for the request store
//!
//! Free functions over a `rusqlite::Connection` so the same query code runs
//! against the plain connection and inside `Store::with_tx` transactions.

use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

use super::codec::{decode_list, encode_list};
use super::{decode_ts, decode_ts_opt, encode_ts, map_constraint};
use crate::core::error::{DeskError, Result};
use crate::core::identity::{RecordId, TrackingNumber};
use crate::entities::{Appeal, AppealStatus, Denial, FulfillmentPackage, Note, Request, RequestStatus};

/// Listing filter; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub agency: Option<String>,
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub(crate) fn insert_request(conn: &Connection, request: &Request) -> Result<()> {
    let request_id = request.request_id.to_string();
    let tracking_number = request.tracking_number.to_string();
    conn.execute(
        "INSERT INTO requests (request_id, tracking_number, requester_name, requester_email, \
         agency, subject, description, fee_waived, status, submitted_at, due_at, fulfilled_at, \
         assigned_to) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            request_id,
            tracking_number,
            request.requester_name,
            request.requester_email,
            request.agency,
            request.subject,
            request.description,
            request.fee_waived,
            request.status.to_string(),
            encode_ts(request.submitted_at),
            encode_ts(request.due_at),
            request.fulfilled_at.map(encode_ts),
            request.assigned_to,
        ],
    )
    .map_err(|e| {
        map_constraint(
            e,
            &[
                ("tracking_number", &tracking_number),
                ("request_id", &request_id),
            ],
        )
    })?;
    Ok(())
}

pub(crate) fn get_request(conn: &Connection, id: &RecordId) -> Result<Request> {
    conn.query_row(
        "SELECT request_id, tracking_number, requester_name, requester_email, agency, subject, \
         description, fee_waived, status, submitted_at, due_at, fulfilled_at, assigned_to \
         FROM requests WHERE request_id = ?1",
        params![id.to_string()],
        row_to_request,
    )
    .optional()?
    .ok_or_else(|| DeskError::RequestNotFound(id.to_string()))
}

/// Look up by record id or tracking number, whichever the key parses as
pub(crate) fn find_request(conn: &Connection, key: &str) -> Result<Request> {
    if let Ok(id) = RecordId::parse(key) {
        return get_request(conn, &id);
    }
    conn.query_row(
        "SELECT request_id, tracking_number, requester_name, requester_email, agency, subject, \
         description, fee_waived, status, submitted_at, due_at, fulfilled_at, assigned_to \
         FROM requests WHERE tracking_number = ?1",
        params![key],
        row_to_request,
    )
    .optional()?
    .ok_or_else(|| DeskError::RequestNotFound(key.to_string()))
}

pub(crate) fn set_assignment(
    conn: &Connection,
    id: &RecordId,
    assignee: &str,
    status: RequestStatus,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE requests SET assigned_to = ?1, status = ?2 WHERE request_id = ?3",
        params![assignee, status.to_string(), id.to_string()],
    )?;
    if changed == 0 {
        return Err(DeskError::RequestNotFound(id.to_string()));
    }
    Ok(())
}

pub(crate) fn set_status(conn: &Connection, id: &RecordId, status: RequestStatus) -> Result<()> {
    let changed = conn.execute(
        "UPDATE requests SET status = ?1 WHERE request_id = ?2",
        params![status.to_string(), id.to_string()],
    )?;
    if changed == 0 {
        return Err(DeskError::RequestNotFound(id.to_string()));
    }
    Ok(())
}

/// Mark fulfilled; the status and the completion stamp move together
pub(crate) fn set_fulfilled(
    conn: &Connection,
    id: &RecordId,
    fulfilled_at: DateTime<Utc>,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE requests SET status = ?1, fulfilled_at = ?2 WHERE request_id = ?3",
        params![
            RequestStatus::Fulfilled.to_string(),
            encode_ts(fulfilled_at),
            id.to_string()
        ],
    )?;
    if changed == 0 {
        return Err(DeskError::RequestNotFound(id.to_string()));
    }
    Ok(())
}

pub(crate) fn list_requests(conn: &Connection, filter: &RequestFilter) -> Result<Vec<Request>> {
    let mut sql = String::from(
        "SELECT request_id, tracking_number, requester_name, requester_email, agency, subject, \
         description, fee_waived, status, submitted_at, due_at, fulfilled_at, assigned_to \
         FROM requests WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![];

    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        params_vec.push(Box::new(status.to_string()));
    }

    if let Some(ref agency) = filter.agency {
        sql.push_str(" AND agency = ?");
        params_vec.push(Box::new(agency.clone()));
    }

    sql.push_str(" ORDER BY submitted_at DESC");

    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), row_to_request)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Unresolved requests past their deadline, most overdue first
pub(crate) fn overdue_requests(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<Request>> {
    let mut stmt = conn.prepare(
        "SELECT request_id, tracking_number, requester_name, requester_email, agency, subject, \
         description, fee_waived, status, submitted_at, due_at, fulfilled_at, assigned_to \
         FROM requests \
         WHERE due_at < ?1 AND status NOT IN ('fulfilled', 'denied', 'closed') \
         ORDER BY due_at ASC",
    )?;
    let rows = stmt.query_map(params![encode_ts(now)], row_to_request)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn count_requests(conn: &Connection, agency: Option<&str>) -> Result<i64> {
    let count = match agency {
        Some(agency) => conn.query_row(
            "SELECT COUNT(*) FROM requests WHERE agency = ?1",
            params![agency],
            |row| row.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM requests", [], |row| row.get(0))?,
    };
    Ok(count)
}

/// Request counts grouped by status; statuses with no rows are absent
pub(crate) fn status_counts(
    conn: &Connection,
    agency: Option<&str>,
) -> Result<Vec<(RequestStatus, i64)>> {
    let mut sql = String::from("SELECT status, COUNT(*) FROM requests WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![];

    if let Some(agency) = agency {
        sql.push_str(" AND agency = ?");
        params_vec.push(Box::new(agency.to_string()));
    }

    sql.push_str(" GROUP BY status");

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| {
        let status = decode_status(0, &row.get::<_, String>(0)?)?;
        Ok((status, row.get::<_, i64>(1)?))
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

// ---------------------------------------------------------------------------
// Fulfillments
// ---------------------------------------------------------------------------

pub(crate) fn insert_fulfillment(conn: &Connection, package: &FulfillmentPackage) -> Result<()> {
    conn.execute(
        "INSERT INTO fulfillments (package_id, request_id, documents, redactions, \
         exemptions_cited, response_letter, created_at, fulfilled_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            package.package_id.to_string(),
            package.request_id.to_string(),
            encode_list(&package.documents)?,
            encode_list(&package.redactions)?,
            encode_list(&package.exemptions_cited)?,
            package.response_letter,
            encode_ts(package.created_at),
            package.fulfilled_by,
        ],
    )?;
    Ok(())
}

pub(crate) fn fulfillment_for_request(
    conn: &Connection,
    request_id: &RecordId,
) -> Result<Option<FulfillmentPackage>> {
    Ok(conn
        .query_row(
            "SELECT package_id, request_id, documents, redactions, exemptions_cited, \
             response_letter, created_at, fulfilled_by \
             FROM fulfillments WHERE request_id = ?1",
            params![request_id.to_string()],
            row_to_fulfillment,
        )
        .optional()?)
}

// ---------------------------------------------------------------------------
// Denials
// ---------------------------------------------------------------------------

pub(crate) fn insert_denial(conn: &Connection, denial: &Denial) -> Result<()> {
    conn.execute(
        "INSERT INTO denials (denial_id, request_id, reason, exemptions, denied_by, denied_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            denial.denial_id.to_string(),
            denial.request_id.to_string(),
            denial.reason,
            encode_list(&denial.exemptions)?,
            denial.denied_by,
            encode_ts(denial.denied_at),
        ],
    )?;
    Ok(())
}

/// Latest denial decision for a request
pub(crate) fn denial_for_request(
    conn: &Connection,
    request_id: &RecordId,
) -> Result<Option<Denial>> {
    Ok(conn
        .query_row(
            "SELECT denial_id, request_id, reason, exemptions, denied_by, denied_at \
             FROM denials WHERE request_id = ?1 ORDER BY denied_at DESC LIMIT 1",
            params![request_id.to_string()],
            row_to_denial,
        )
        .optional()?)
}

// ---------------------------------------------------------------------------
// Appeals
// ---------------------------------------------------------------------------

pub(crate) fn insert_appeal(conn: &Connection, appeal: &Appeal) -> Result<()> {
    conn.execute(
        "INSERT INTO appeals (appeal_id, request_id, grounds, appellant, submitted_at, status, \
         decision, decided_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            appeal.appeal_id.to_string(),
            appeal.request_id.to_string(),
            appeal.grounds,
            appeal.appellant,
            encode_ts(appeal.submitted_at),
            appeal.status.to_string(),
            appeal.decision,
            appeal.decided_at.map(encode_ts),
        ],
    )?;
    Ok(())
}

pub(crate) fn get_appeal(conn: &Connection, id: &RecordId) -> Result<Appeal> {
    conn.query_row(
        "SELECT appeal_id, request_id, grounds, appellant, submitted_at, status, decision, \
         decided_at FROM appeals WHERE appeal_id = ?1",
        params![id.to_string()],
        row_to_appeal,
    )
    .optional()?
    .ok_or_else(|| DeskError::AppealNotFound(id.to_string()))
}

/// Look up an appeal by its record id key
pub(crate) fn find_appeal(conn: &Connection, key: &str) -> Result<Appeal> {
    match RecordId::parse(key) {
        Ok(id) => get_appeal(conn, &id),
        Err(_) => Err(DeskError::AppealNotFound(key.to_string())),
    }
}

/// Record the decision; the appeal's status and decision text carry the same
/// value, stamped at decision time
pub(crate) fn set_appeal_decision(
    conn: &Connection,
    id: &RecordId,
    decision: &str,
    decided_at: DateTime<Utc>,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE appeals SET status = ?1, decision = ?1, decided_at = ?2 WHERE appeal_id = ?3",
        params![decision, encode_ts(decided_at), id.to_string()],
    )?;
    if changed == 0 {
        return Err(DeskError::AppealNotFound(id.to_string()));
    }
    Ok(())
}

pub(crate) fn appeals_for_request(conn: &Connection, request_id: &RecordId) -> Result<Vec<Appeal>> {
    let mut stmt = conn.prepare(
        "SELECT appeal_id, request_id, grounds, appellant, submitted_at, status, decision, \
         decided_at FROM appeals WHERE request_id = ?1 ORDER BY submitted_at",
    )?;
    let rows = stmt.query_map(params![request_id.to_string()], row_to_appeal)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn pending_appeals_for_request(
    conn: &Connection,
    request_id: &RecordId,
) -> Result<Vec<Appeal>> {
    let mut stmt = conn.prepare(
        "SELECT appeal_id, request_id, grounds, appellant, submitted_at, status, decision, \
         decided_at FROM appeals WHERE request_id = ?1 AND status = 'pending' \
         ORDER BY submitted_at",
    )?;
    let rows = stmt.query_map(params![request_id.to_string()], row_to_appeal)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

pub(crate) fn insert_note(conn: &Connection, note: &Note) -> Result<()> {
    conn.execute(
        "INSERT INTO notes (note_id, request_id, author, content, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            note.note_id.to_string(),
            note.request_id.to_string(),
            note.author,
            note.content,
            encode_ts(note.created_at),
        ],
    )?;
    Ok(())
}

pub(crate) fn notes_for_request(conn: &Connection, request_id: &RecordId) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT note_id, request_id, author, content, created_at \
         FROM notes WHERE request_id = ?1 ORDER BY created_at",
    )?;
    let rows = stmt.query_map(params![request_id.to_string()], row_to_note)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn decode_id(idx: usize, raw: &str) -> rusqlite::Result<RecordId> {
    RecordId::parse(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decode_tracking(idx: usize, raw: &str) -> rusqlite::Result<TrackingNumber> {
    TrackingNumber::parse(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decode_status(idx: usize, raw: &str) -> rusqlite::Result<RequestStatus> {
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

fn row_to_request(row: &Row<'_>) -> rusqlite::Result<Request> {
    Ok(Request {
        request_id: decode_id(0, &row.get::<_, String>(0)?)?,
        tracking_number: decode_tracking(1, &row.get::<_, String>(1)?)?,
        requester_name: row.get(2)?,
        requester_email: row.get(3)?,
        agency: row.get(4)?,
        subject: row.get(5)?,
        description: row.get(6)?,
        fee_waived: row.get(7)?,
        status: decode_status(8, &row.get::<_, String>(8)?)?,
        submitted_at: decode_ts(9, row.get(9)?)?,
        due_at: decode_ts(10, row.get(10)?)?,
        fulfilled_at: decode_ts_opt(11, row.get(11)?)?,
        assigned_to: row.get(12)?,
    })
}

fn row_to_fulfillment(row: &Row<'_>) -> rusqlite::Result<FulfillmentPackage> {
    Ok(FulfillmentPackage {
        package_id: decode_id(0, &row.get::<_, String>(0)?)?,
        request_id: decode_id(1, &row.get::<_, String>(1)?)?,
        documents: decode_list(2, &row.get::<_, String>(2)?)?,
        redactions: decode_list(3, &row.get::<_, String>(3)?)?,
        exemptions_cited: decode_list(4, &row.get::<_, String>(4)?)?,
        response_letter: row.get(5)?,
        created_at: decode_ts(6, row.get(6)?)?,
        fulfilled_by: row.get(7)?,
    })
}

fn row_to_denial(row: &Row<'_>) -> rusqlite::Result<Denial> {
    Ok(Denial {
        denial_id: decode_id(0, &row.get::<_, String>(0)?)?,
        request_id: decode_id(1, &row.get::<_, String>(1)?)?,
        reason: row.get(2)?,
        exemptions: decode_list(3, &row.get::<_, String>(3)?)?,
        denied_by: row.get(4)?,
        denied_at: decode_ts(5, row.get(5)?)?,
    })
}

fn row_to_appeal(row: &Row<'_>) -> rusqlite::Result<Appeal> {
    Ok(Appeal {
        appeal_id: decode_id(0, &row.get::<_, String>(0)?)?,
        request_id: decode_id(1, &row.get::<_, String>(1)?)?,
        grounds: row.get(2)?,
        appellant: row.get(3)?,
        submitted_at: decode_ts(4, row.get(4)?)?,
        status: AppealStatus::from(row.get::<_, String>(5)?),
        decision: row.get(6)?,
        decided_at: decode_ts_opt(7, row.get(7)?)?,
    })
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        note_id: decode_id(0, &row.get::<_, String>(0)?)?,
        request_id: decode_id(1, &row.get::<_, String>(1)?)?,
        author: row.get(2)?,
        content: row.get(3)?,
        created_at: decode_ts(4, row.get(4)?)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::core::store::{trunc_to_micros, Store};
    use crate::entities::RequestIntake;

    fn intake(agency: &str) -> RequestIntake {
        RequestIntake {
            requester_name: "John Doe".to_string(),
            requester_email: "john@example.com".to_string(),
            agency: agency.to_string(),
            subject: "Air Quality Reports".to_string(),
            description: "Request for annual air quality data.".to_string(),
            fee_waived: false,
        }
    }

    fn store_with(requests: &[Request]) -> Store {
        let store = Store::open_in_memory().unwrap();
        for request in requests {
            insert_request(store.conn(), request).unwrap();
        }
        store
    }

    #[test]
    fn test_insert_and_get_roundtrip() {
        let request = Request::new(intake("EPA"), Utc::now(), Duration::days(20));
        let store = store_with(std::slice::from_ref(&request));

        let loaded = get_request(store.conn(), &request.request_id).unwrap();
        assert_eq!(loaded.request_id, request.request_id);
        assert_eq!(loaded.tracking_number, request.tracking_number);
        assert_eq!(loaded.agency, "EPA");
        assert_eq!(loaded.status, RequestStatus::Submitted);
        assert_eq!(loaded.submitted_at, request.submitted_at);
        assert_eq!(loaded.due_at, request.due_at);
        assert!(loaded.fulfilled_at.is_none());
        assert!(loaded.assigned_to.is_none());
    }

    #[test]
    fn test_find_by_tracking_number() {
        let request = Request::new(intake("EPA"), Utc::now(), Duration::days(20));
        let store = store_with(std::slice::from_ref(&request));

        let by_tracking = find_request(store.conn(), &request.tracking_number.to_string()).unwrap();
        assert_eq!(by_tracking.request_id, request.request_id);

        let by_id = find_request(store.conn(), &request.request_id.to_string()).unwrap();
        assert_eq!(by_id.tracking_number, request.tracking_number);
    }

    #[test]
    fn test_missing_request_error_names_the_key() {
        let store = store_with(&[]);
        let err = find_request(store.conn(), "FOIA-2026-ABCDEF").unwrap_err();
        assert_eq!(err.to_string(), "Request FOIA-2026-ABCDEF not found");
    }

    #[test]
    fn test_duplicate_tracking_number_is_a_conflict() {
        let first = Request::new(intake("EPA"), Utc::now(), Duration::days(20));
        let store = store_with(std::slice::from_ref(&first));

        let mut second = Request::new(intake("DOJ"), Utc::now(), Duration::days(20));
        second.tracking_number = first.tracking_number.clone();

        let err = insert_request(store.conn(), &second).unwrap_err();
        assert!(err.is_conflict_on("tracking_number"));
    }

    #[test]
    fn test_list_filters_by_status_and_agency() {
        let now = Utc::now();
        let epa = Request::new(intake("EPA"), now - Duration::hours(2), Duration::days(20));
        let doj = Request::new(intake("DOJ"), now - Duration::hours(1), Duration::days(20));
        let store = store_with(&[epa.clone(), doj.clone()]);
        set_status(store.conn(), &doj.request_id, RequestStatus::Processing).unwrap();

        let all = list_requests(store.conn(), &RequestFilter::default()).unwrap();
        assert_eq!(all.len(), 2);
        // Newest submission first
        assert_eq!(all[0].request_id, doj.request_id);

        let processing = list_requests(
            store.conn(),
            &RequestFilter {
                status: Some(RequestStatus::Processing),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(processing.len(), 1);
        assert_eq!(processing[0].request_id, doj.request_id);

        let epa_only = list_requests(
            store.conn(),
            &RequestFilter {
                agency: Some("EPA".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(epa_only.len(), 1);
        assert_eq!(epa_only[0].request_id, epa.request_id);

        let limited = list_requests(
            store.conn(),
            &RequestFilter {
                limit: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_overdue_scan_excludes_resolved_and_future() {
        let now = Utc::now();
        let overdue_old = Request::new(intake("EPA"), now - Duration::days(40), Duration::days(20));
        let overdue_new = Request::new(intake("DOJ"), now - Duration::days(25), Duration::days(20));
        let not_due = Request::new(intake("FBI"), now, Duration::days(20));
        let resolved = Request::new(intake("EPA"), now - Duration::days(40), Duration::days(20));
        let store = store_with(&[
            overdue_old.clone(),
            overdue_new.clone(),
            not_due,
            resolved.clone(),
        ]);
        set_status(store.conn(), &resolved.request_id, RequestStatus::Denied).unwrap();

        let overdue = overdue_requests(store.conn(), now).unwrap();
        assert_eq!(overdue.len(), 2);
        // Most overdue first
        assert_eq!(overdue[0].request_id, overdue_old.request_id);
        assert_eq!(overdue[1].request_id, overdue_new.request_id);
    }

    #[test]
    fn test_overdue_scan_keeps_appealed_requests() {
        let now = Utc::now();
        let appealed = Request::new(intake("EPA"), now - Duration::days(40), Duration::days(20));
        let store = store_with(std::slice::from_ref(&appealed));
        set_status(store.conn(), &appealed.request_id, RequestStatus::Appealed).unwrap();

        let overdue = overdue_requests(store.conn(), now).unwrap();
        assert_eq!(overdue.len(), 1);
    }

    #[test]
    fn test_due_boundary_is_exclusive() {
        let now = Utc::now();
        let request = Request::new(intake("EPA"), now, Duration::zero());
        let store = store_with(std::slice::from_ref(&request));

        // due_at == now is not yet overdue
        assert!(overdue_requests(store.conn(), now).unwrap().is_empty());
        let later = now + Duration::microseconds(1);
        assert_eq!(overdue_requests(store.conn(), later).unwrap().len(), 1);
    }

    #[test]
    fn test_status_counts_by_agency() {
        let now = Utc::now();
        let a = Request::new(intake("DOJ"), now, Duration::days(20));
        let b = Request::new(intake("DOJ"), now, Duration::days(20));
        let c = Request::new(intake("EPA"), now, Duration::days(20));
        let store = store_with(&[a, b.clone(), c]);
        set_status(store.conn(), &b.request_id, RequestStatus::Processing).unwrap();

        assert_eq!(count_requests(store.conn(), None).unwrap(), 3);
        assert_eq!(count_requests(store.conn(), Some("DOJ")).unwrap(), 2);

        let counts = status_counts(store.conn(), Some("DOJ")).unwrap();
        assert_eq!(counts.len(), 2);
        assert!(counts.contains(&(RequestStatus::Submitted, 1)));
        assert!(counts.contains(&(RequestStatus::Processing, 1)));
    }

    #[test]
    fn test_fulfillment_roundtrip() {
        let request = Request::new(intake("EPA"), Utc::now(), Duration::days(20));
        let store = store_with(std::slice::from_ref(&request));

        let package = FulfillmentPackage::new(
            request.request_id.clone(),
            vec!["doc1.pdf".to_string(), "doc2.pdf".to_string()],
            vec![],
            vec!["Exemption 6".to_string()],
            "Records enclosed.".to_string(),
            "Officer Smith".to_string(),
            Utc::now(),
        );
        insert_fulfillment(store.conn(), &package).unwrap();

        let loaded = fulfillment_for_request(store.conn(), &request.request_id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.package_id, package.package_id);
        assert_eq!(loaded.documents, vec!["doc1.pdf", "doc2.pdf"]);
        assert!(loaded.redactions.is_empty());
        assert_eq!(loaded.exemptions_cited, vec!["Exemption 6"]);
        assert_eq!(loaded.fulfilled_by, "Officer Smith");

        let other = Request::new(intake("DOJ"), Utc::now(), Duration::days(20));
        insert_request(store.conn(), &other).unwrap();
        assert!(fulfillment_for_request(store.conn(), &other.request_id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_appeal_decision_updates_all_three_fields() {
        let request = Request::new(intake("EPA"), Utc::now(), Duration::days(20));
        let store = store_with(std::slice::from_ref(&request));

        let appeal = Appeal::new(
            request.request_id.clone(),
            "John Doe".to_string(),
            "The request is specific enough.".to_string(),
            Utc::now(),
        );
        insert_appeal(store.conn(), &appeal).unwrap();
        assert_eq!(
            pending_appeals_for_request(store.conn(), &request.request_id)
                .unwrap()
                .len(),
            1
        );

        let decided_at = trunc_to_micros(Utc::now());
        set_appeal_decision(store.conn(), &appeal.appeal_id, "granted", decided_at).unwrap();

        let loaded = get_appeal(store.conn(), &appeal.appeal_id).unwrap();
        assert_eq!(loaded.status, AppealStatus::Granted);
        assert_eq!(loaded.decision.as_deref(), Some("granted"));
        assert_eq!(loaded.decided_at, Some(decided_at));
        assert!(pending_appeals_for_request(store.conn(), &request.request_id)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_appeal_error_names_the_id() {
        let store = store_with(&[]);
        let id = RecordId::new(crate::core::identity::RecordPrefix::Apl);
        let err = get_appeal(store.conn(), &id).unwrap_err();
        assert_eq!(err.to_string(), format!("Appeal {} not found", id));
    }

    #[test]
    fn test_notes_come_back_in_creation_order() {
        let request = Request::new(intake("EPA"), Utc::now(), Duration::days(20));
        let store = store_with(std::slice::from_ref(&request));

        let base = Utc::now();
        for (i, content) in ["first", "second", "third"].iter().enumerate() {
            let note = Note::new(
                request.request_id.clone(),
                "Officer A".to_string(),
                content.to_string(),
                base + Duration::seconds(i as i64),
            );
            insert_note(store.conn(), &note).unwrap();
        }

        let notes = notes_for_request(store.conn(), &request.request_id).unwrap();
        let contents: Vec<&str> = notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_note_for_unknown_request_violates_foreign_key() {
        let store = store_with(&[]);
        let note = Note::new(
            RecordId::new(crate::core::identity::RecordPrefix::Req),
            "Officer A".to_string(),
            "orphan".to_string(),
            Utc::now(),
        );
        assert!(insert_note(store.conn(), &note).is_err());
    }
}

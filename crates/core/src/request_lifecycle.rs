//! Service request status ids and lifecycle rules.
//!
//! The ids match the seed data in `20260301000003_create_service_requests.sql`.
//! Status only moves forward (`pending -> assigned -> completed`), except that
//! `pending` and `assigned` requests may be cancelled.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

pub type RequestStatusId = i16;

pub const STATUS_ID_PENDING: RequestStatusId = 1;
pub const STATUS_ID_ASSIGNED: RequestStatusId = 2;
pub const STATUS_ID_COMPLETED: RequestStatusId = 3;
pub const STATUS_ID_CANCELLED: RequestStatusId = 4;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ASSIGNED: &str = "assigned";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Upper bound for a finalized job price.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/* --------------------------------------------------------------------------
Lookups
-------------------------------------------------------------------------- */

/// Resolve a status id to its seed name.
pub fn status_name(id: RequestStatusId) -> Option<&'static str> {
    match id {
        STATUS_ID_PENDING => Some(STATUS_PENDING),
        STATUS_ID_ASSIGNED => Some(STATUS_ASSIGNED),
        STATUS_ID_COMPLETED => Some(STATUS_COMPLETED),
        STATUS_ID_CANCELLED => Some(STATUS_CANCELLED),
        _ => None,
    }
}

/// Resolve a seed name (as used in `?status=` filters) to its id.
pub fn status_id_from_name(name: &str) -> Result<RequestStatusId, CoreError> {
    match name {
        STATUS_PENDING => Ok(STATUS_ID_PENDING),
        STATUS_ASSIGNED => Ok(STATUS_ID_ASSIGNED),
        STATUS_COMPLETED => Ok(STATUS_ID_COMPLETED),
        STATUS_CANCELLED => Ok(STATUS_ID_CANCELLED),
        other => Err(CoreError::Validation(format!(
            "Unknown request status: '{other}'. Valid statuses: {STATUS_PENDING}, \
             {STATUS_ASSIGNED}, {STATUS_COMPLETED}, {STATUS_CANCELLED}"
        ))),
    }
}

/* --------------------------------------------------------------------------
Transitions
-------------------------------------------------------------------------- */

/// Whether `from -> to` is a legal lifecycle step.
pub fn can_transition(from: RequestStatusId, to: RequestStatusId) -> bool {
    matches!(
        (from, to),
        (STATUS_ID_PENDING, STATUS_ID_ASSIGNED)
            | (STATUS_ID_ASSIGNED, STATUS_ID_COMPLETED)
            | (STATUS_ID_PENDING, STATUS_ID_CANCELLED)
            | (STATUS_ID_ASSIGNED, STATUS_ID_CANCELLED)
    )
}

/// Like [`can_transition`], but produces a `Conflict` naming both states.
pub fn validate_transition(from: RequestStatusId, to: RequestStatusId) -> Result<(), CoreError> {
    if can_transition(from, to) {
        return Ok(());
    }
    Err(CoreError::Conflict(format!(
        "Cannot move a service request from '{}' to '{}'",
        status_name(from).unwrap_or("unknown"),
        status_name(to).unwrap_or("unknown"),
    )))
}

/* --------------------------------------------------------------------------
Pricing
-------------------------------------------------------------------------- */

/// Validate a price a serviceman finalizes before payment.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Amount must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Completion requires an agreed price.
pub fn validate_completable(price_finalized: bool) -> Result<(), CoreError> {
    if !price_finalized {
        return Err(CoreError::Conflict(
            "The price must be finalized before the job can be completed".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RequestStatusId; 4] = [
        STATUS_ID_PENDING,
        STATUS_ID_ASSIGNED,
        STATUS_ID_COMPLETED,
        STATUS_ID_CANCELLED,
    ];

    // -- names --

    #[test]
    fn names_and_ids_agree() {
        for id in ALL {
            let name = status_name(id).unwrap();
            assert_eq!(status_id_from_name(name).unwrap(), id);
        }
    }

    #[test]
    fn unknown_status_name_rejected() {
        let msg = status_id_from_name("open").unwrap_err().to_string();
        assert!(msg.contains("Unknown request status"));
        assert_eq!(status_name(0), None);
    }

    // -- transitions --

    #[test]
    fn assigned_only_reachable_from_pending() {
        for from in ALL {
            assert_eq!(
                can_transition(from, STATUS_ID_ASSIGNED),
                from == STATUS_ID_PENDING,
                "from {from}"
            );
        }
    }

    #[test]
    fn status_never_moves_backwards() {
        assert!(!can_transition(STATUS_ID_ASSIGNED, STATUS_ID_PENDING));
        assert!(!can_transition(STATUS_ID_COMPLETED, STATUS_ID_ASSIGNED));
        assert!(!can_transition(STATUS_ID_CANCELLED, STATUS_ID_PENDING));
    }

    #[test]
    fn pending_cannot_skip_to_completed() {
        assert!(!can_transition(STATUS_ID_PENDING, STATUS_ID_COMPLETED));
    }

    #[test]
    fn terminal_states_are_not_cancellable() {
        assert!(can_transition(STATUS_ID_PENDING, STATUS_ID_CANCELLED));
        assert!(can_transition(STATUS_ID_ASSIGNED, STATUS_ID_CANCELLED));
        assert!(!can_transition(STATUS_ID_COMPLETED, STATUS_ID_CANCELLED));
        assert!(!can_transition(STATUS_ID_CANCELLED, STATUS_ID_CANCELLED));
    }

    #[test]
    fn invalid_transition_names_both_states() {
        let msg = validate_transition(STATUS_ID_COMPLETED, STATUS_ID_CANCELLED)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("'completed'"));
        assert!(msg.contains("'cancelled'"));
    }

    // -- pricing --

    #[test]
    fn amount_bounds() {
        assert!(validate_amount(49.99).is_ok());
        assert!(validate_amount(MAX_AMOUNT).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(MAX_AMOUNT + 1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
    }

    #[test]
    fn completion_requires_finalized_price() {
        assert!(validate_completable(true).is_ok());
        assert!(validate_completable(false).is_err());
    }
}

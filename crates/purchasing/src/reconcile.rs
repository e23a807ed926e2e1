//! Reconciliation commit: turning a completed receiving session into
//! ledger entries on the purchase order.

use chrono::{DateTime, NaiveDate, Utc};

use stitchworks_core::{DomainError, DomainResult, IdGenerator};
use stitchworks_sizes::SizeVector;

use crate::order::{LineItemId, PurchaseOrder, PurchaseOrderStatus, ReceiptId, ReceiptRecord};
use crate::receiving::ReceivingSession;

/// What the committer does with a receipt that would push a size bucket
/// past its ordered quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverReceiptPolicy {
    /// Refuse the whole commit.
    #[default]
    Reject,
    /// Record the overage; per-bucket remaining clamps at zero.
    Allow,
}

/// Apply a completed receiving session and return the updated purchase
/// order.
///
/// All-or-nothing: every validation runs before the first mutation. Each
/// line with a non-zero working vector gets one immutable [`ReceiptRecord`]
/// appended to its ledger; all-zero lines are left completely untouched, so
/// the ledger never carries noise entries. Afterwards the order's status is
/// rederived and its delivery fields stamped.
pub fn commit(
    session: &ReceivingSession<'_>,
    received_by: &str,
    received_date: NaiveDate,
    policy: OverReceiptPolicy,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> DomainResult<PurchaseOrder> {
    let order = session.order();

    if order.status() == PurchaseOrderStatus::Cancelled {
        return Err(DomainError::invariant(
            "cannot receive against a cancelled purchase order",
        ));
    }

    let received_by = received_by.trim();
    if received_by.is_empty() {
        return Err(DomainError::empty_receipt("receiver identity is blank"));
    }
    if session.total_receiving() == 0 {
        return Err(DomainError::empty_receipt("no quantities staged"));
    }

    for (line_id, working, _) in session.staged() {
        if working.is_zero() {
            continue;
        }
        let line = order
            .line_item(line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))?;
        let held = line.received_sizes();
        for (size, quantity) in working.iter() {
            if quantity == 0 {
                continue;
            }
            let ordered = line.sizes_ordered().get(size);
            let would_hold = held.get(size).saturating_add(quantity);
            if would_hold > ordered {
                match policy {
                    OverReceiptPolicy::Reject => {
                        return Err(DomainError::OverReceipt {
                            line_item: line_id.as_str().to_string(),
                            size: size.label().to_string(),
                            ordered,
                            would_hold,
                        });
                    }
                    OverReceiptPolicy::Allow => {
                        tracing::warn!(
                            "Over-receipt allowed on line {} ({}): ordered {}, holding {}",
                            line_id,
                            size,
                            ordered,
                            would_hold
                        );
                    }
                }
            }
        }
    }

    let mut updated = order.clone();
    for (line_id, working, assigned_to) in session.staged() {
        if working.is_zero() {
            continue;
        }
        let record = ReceiptRecord {
            id: ReceiptId::generate(ids),
            sizes: *working,
            received_date,
            received_by: received_by.to_string(),
            assigned_to: assigned_to.cloned(),
        };
        updated
            .line_item_mut(line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))?
            .apply_receipt(record);
    }

    updated.finish_receiving(received_by, received_date, now);
    tracing::debug!(
        "Received {} units against {} by {}",
        session.total_receiving(),
        updated.po_number(),
        received_by
    );
    Ok(updated)
}

/// One-call receiving: stage `working_vectors` on a fresh session, then
/// commit with the default policy.
pub fn receive(
    order: &PurchaseOrder,
    working_vectors: &[(LineItemId, SizeVector)],
    received_by: &str,
    received_date: NaiveDate,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> DomainResult<PurchaseOrder> {
    let mut session = ReceivingSession::for_order(order);
    for (line_id, sizes) in working_vectors {
        session.set_sizes(line_id, *sizes)?;
    }
    commit(
        &session,
        received_by,
        received_date,
        OverReceiptPolicy::default(),
        ids,
        now,
    )
}

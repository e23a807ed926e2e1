//! Receiving sessions: the staging area for one receiving action.

use stitchworks_core::{DomainError, DomainResult, Entity};
use stitchworks_orders::SourceOrderId;
use stitchworks_sizes::{Size, SizeVector};

use crate::order::{AssignedOrder, LineItemId, PurchaseOrder};

/// One line's staged state: the quantities about to be received and an
/// optional target order.
#[derive(Debug, Clone)]
struct LineDraft {
    line_id: LineItemId,
    working: SizeVector,
    assigned_to: Option<AssignedOrder>,
}

/// Transient working set for one receiving action across every line of a
/// purchase order.
///
/// The session never touches the order it was opened for; staged
/// quantities only land once [`commit`](crate::reconcile::commit) turns
/// them into ledger entries. Staging accepts any non-negative quantity —
/// whether over-receipt passes is the committer's policy decision, not a
/// staging error.
#[derive(Debug, Clone)]
pub struct ReceivingSession<'a> {
    order: &'a PurchaseOrder,
    drafts: Vec<LineDraft>,
}

impl<'a> ReceivingSession<'a> {
    /// Open a session with an all-zero working vector for every line.
    pub fn for_order(order: &'a PurchaseOrder) -> Self {
        let drafts = order
            .line_items()
            .iter()
            .map(|line| LineDraft {
                line_id: line.id().clone(),
                working: SizeVector::new(),
                assigned_to: None,
            })
            .collect();
        Self { order, drafts }
    }

    pub fn order(&self) -> &'a PurchaseOrder {
        self.order
    }

    fn draft(&self, line_id: &LineItemId) -> DomainResult<&LineDraft> {
        self.drafts
            .iter()
            .find(|draft| draft.line_id == *line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))
    }

    fn draft_mut(&mut self, line_id: &LineItemId) -> DomainResult<&mut LineDraft> {
        self.drafts
            .iter_mut()
            .find(|draft| draft.line_id == *line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))
    }

    /// Stage a quantity of one size on one line.
    pub fn set_size(
        &mut self,
        line_id: &LineItemId,
        size: Size,
        quantity: u32,
    ) -> DomainResult<()> {
        self.draft_mut(line_id)?.working.set(size, quantity);
        Ok(())
    }

    /// Replace one line's whole working vector.
    pub fn set_sizes(&mut self, line_id: &LineItemId, sizes: SizeVector) -> DomainResult<()> {
        self.draft_mut(line_id)?.working = sizes;
        Ok(())
    }

    pub fn staged_sizes(&self, line_id: &LineItemId) -> DomainResult<SizeVector> {
        Ok(self.draft(line_id)?.working)
    }

    pub fn assignment(&self, line_id: &LineItemId) -> DomainResult<Option<&AssignedOrder>> {
        Ok(self.draft(line_id)?.assigned_to.as_ref())
    }

    /// Remaining-to-receive for one size on one line, always computed from
    /// the receipt ledger.
    pub fn remaining(&self, line_id: &LineItemId, size: Size) -> DomainResult<u32> {
        let line = self
            .order
            .line_item(line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))?;
        Ok(line.remaining(size))
    }

    /// Stage everything still outstanding on one line in one step.
    pub fn fill_all_remaining(&mut self, line_id: &LineItemId) -> DomainResult<()> {
        let remaining = self
            .order
            .line_item(line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))?
            .remaining_sizes();
        self.draft_mut(line_id)?.working = remaining;
        Ok(())
    }

    /// Stage one associated order's frozen contribution verbatim and mark
    /// the line as received for that order.
    ///
    /// Lets staff attribute an entire incoming shipment to the order that
    /// originally requested it; overwrites any prior manual edits to the
    /// line's working vector.
    pub fn quick_fill_from_order(
        &mut self,
        line_id: &LineItemId,
        order_id: &SourceOrderId,
    ) -> DomainResult<()> {
        let associated = self
            .order
            .line_item(line_id)
            .ok_or_else(|| DomainError::unknown_line(line_id.as_str()))?
            .associated_orders()
            .iter()
            .find(|reference| reference.order_id == *order_id)
            .ok_or_else(|| DomainError::unknown_associated_order(order_id.as_str()))?;

        let sizes = associated.sizes;
        let assignment = associated.assignment();
        let draft = self.draft_mut(line_id)?;
        draft.working = sizes;
        draft.assigned_to = Some(assignment);
        Ok(())
    }

    /// Set or clear a line's target order without touching quantities.
    ///
    /// Informational only: the assignment is never validated against the
    /// target order's own remaining need.
    pub fn assign_to(
        &mut self,
        line_id: &LineItemId,
        assigned_to: Option<AssignedOrder>,
    ) -> DomainResult<()> {
        self.draft_mut(line_id)?.assigned_to = assigned_to;
        Ok(())
    }

    /// Total staged quantity across all lines and sizes. Commit requires
    /// this to be positive.
    pub fn total_receiving(&self) -> u32 {
        self.drafts
            .iter()
            .fold(0u32, |acc, draft| acc.saturating_add(draft.working.total()))
    }

    /// Staged lines in order, for the committer.
    pub(crate) fn staged(
        &self,
    ) -> impl Iterator<Item = (&LineItemId, &SizeVector, Option<&AssignedOrder>)> {
        self.drafts
            .iter()
            .map(|draft| (&draft.line_id, &draft.working, draft.assigned_to.as_ref()))
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stitchworks_core::{DomainError, DomainResult, Entity, IdGenerator, Money};
use stitchworks_orders::{OrderKind, SourceLineItem, SourceOrder, SourceOrderId};
use stitchworks_sizes::{Size, SizeVector};

use crate::consolidate::ConsolidationRequest;

/// Purchase order identifier, minted with the `po` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(String);

/// Consolidated line item identifier, minted with the `poli` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

/// Receipt ledger entry identifier, minted with the `rcv` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

/// Supplier identifier, assigned by the caller's supplier directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

/// Supplier style identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(String);

macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

impl_string_id!(PurchaseOrderId);
impl_string_id!(LineItemId);
impl_string_id!(ReceiptId);
impl_string_id!(SupplierId);
impl_string_id!(StyleId);

impl PurchaseOrderId {
    pub const PREFIX: &'static str = "po";

    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next(Self::PREFIX))
    }
}

impl LineItemId {
    pub const PREFIX: &'static str = "poli";

    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next(Self::PREFIX))
    }
}

impl ReceiptId {
    pub const PREFIX: &'static str = "rcv";

    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next(Self::PREFIX))
    }
}

impl StyleId {
    /// Sentinel for style names that yield no usable token.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Derive a style id as the first whitespace-delimited token of the
    /// style name ("Gildan G500" becomes "Gildan").
    ///
    /// Styles sharing a first word collide; the heuristic lives behind this
    /// one function so a real supplier SKU lookup can replace it.
    pub fn derive(style_name: &str) -> Self {
        match style_name.split_whitespace().next() {
            Some(token) => Self(token.to_string()),
            None => Self(Self::UNKNOWN.to_string()),
        }
    }
}

/// Human-facing purchase order numbers carry this prefix.
const PO_NUMBER_PREFIX: &str = "PO";

/// Purchase order status lifecycle.
///
/// `Cancelled` is terminal and user-set; every other transition is derived
/// from received versus ordered totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurchaseOrderStatus {
    Draft,
    Ordered,
    PartiallyReceived,
    Received,
    Cancelled,
}

/// Recompute status from aggregate ordered/received totals.
///
/// `Cancelled` never changes. Full coverage moves to `Received`, a partial
/// delivery moves to `PartiallyReceived`, and a zero-quantity pass keeps the
/// prior status: receiving never regresses an order.
pub fn derive_status(
    prior: PurchaseOrderStatus,
    total_ordered: u32,
    total_received: u32,
) -> PurchaseOrderStatus {
    if prior == PurchaseOrderStatus::Cancelled {
        return PurchaseOrderStatus::Cancelled;
    }
    if total_ordered > 0 && total_received >= total_ordered {
        PurchaseOrderStatus::Received
    } else if total_received > 0 && total_received < total_ordered {
        PurchaseOrderStatus::PartiallyReceived
    } else {
        prior
    }
}

/// Frozen snapshot of one source order's contribution to a consolidated
/// line item.
///
/// Written once at consolidation time and never touched by receiving, so a
/// purchase order always shows exactly which customer asked for what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedOrderRef {
    pub kind: OrderKind,
    pub order_id: SourceOrderId,
    pub display_number: String,
    pub customer_name: String,
    pub sizes: SizeVector,
}

impl AssociatedOrderRef {
    /// Snapshot one contributing line of `order`.
    pub fn snapshot(order: &SourceOrder, item: &SourceLineItem) -> Self {
        Self {
            kind: order.kind,
            order_id: order.id.clone(),
            display_number: order.display_number.clone(),
            customer_name: order.customer_name.clone(),
            sizes: item.sizes,
        }
    }

    /// The shorthand written into a receipt attributed to this order.
    pub fn assignment(&self) -> AssignedOrder {
        AssignedOrder {
            kind: self.kind,
            order_id: self.order_id.clone(),
            display_number: self.display_number.clone(),
        }
    }
}

/// Target order a receipt was set aside for.
///
/// Informational only: quantities are never validated against the target
/// order's own remaining need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedOrder {
    pub kind: OrderKind,
    pub order_id: SourceOrderId,
    pub display_number: String,
}

/// One immutable ledger entry for a single physical delivery event against
/// a line item. Corrections append further records; history is never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub id: ReceiptId,
    pub sizes: SizeVector,
    pub received_date: NaiveDate,
    pub received_by: String,
    pub assigned_to: Option<AssignedOrder>,
}

/// One consolidated, supplier-facing line on a purchase order.
///
/// Fields are private: quantity and money bookkeeping only moves through
/// the crate's consolidation and receiving paths, which keep
/// `quantity_ordered` equal to the sum of `sizes_ordered` and
/// `quantity_received` equal to the sum of the receipt ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLineItem {
    id: LineItemId,
    supplier_id: SupplierId,
    style_id: StyleId,
    style_name: String,
    brand_name: String,
    color_name: String,
    color_code: Option<String>,
    sizes_ordered: SizeVector,
    quantity_ordered: u32,
    quantity_received: u32,
    unit_cost: Money,
    line_total: Money,
    associated_orders: Vec<AssociatedOrderRef>,
    received_items: Vec<ReceiptRecord>,
}

impl PurchaseOrderLineItem {
    /// Open an empty consolidated line from the first contributing source
    /// line. Quantities start at zero; every contributor (the first one
    /// included) is merged in through [`merge_contribution`](Self::merge_contribution).
    pub(crate) fn open(
        ids: &dyn IdGenerator,
        supplier_id: SupplierId,
        first: &SourceLineItem,
    ) -> Self {
        Self {
            id: LineItemId::generate(ids),
            supplier_id,
            style_id: StyleId::derive(&first.style_name),
            style_name: first.style_name.trim().to_string(),
            brand_name: first.brand_name.clone(),
            color_name: first.color_name.trim().to_string(),
            color_code: first.color_code.clone(),
            sizes_ordered: SizeVector::new(),
            quantity_ordered: 0,
            quantity_received: 0,
            unit_cost: first.unit_price,
            line_total: Money::ZERO,
            associated_orders: Vec::new(),
            received_items: Vec::new(),
        }
    }

    /// Fold one contributor's sizes into the ordered totals and reprice the
    /// line.
    pub(crate) fn merge_contribution(&mut self, sizes: &SizeVector) {
        self.sizes_ordered = self.sizes_ordered.add(sizes);
        self.quantity_ordered = self.sizes_ordered.total();
        self.line_total = self.unit_cost.times(self.quantity_ordered);
    }

    pub(crate) fn link_order(&mut self, order: AssociatedOrderRef) {
        self.associated_orders.push(order);
    }

    /// Append one receipt to the ledger and bump the running received total.
    pub(crate) fn apply_receipt(&mut self, record: ReceiptRecord) {
        self.quantity_received = self.quantity_received.saturating_add(record.sizes.total());
        self.received_items.push(record);
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn style_id(&self) -> &StyleId {
        &self.style_id
    }

    pub fn style_name(&self) -> &str {
        &self.style_name
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    pub fn color_name(&self) -> &str {
        &self.color_name
    }

    pub fn color_code(&self) -> Option<&str> {
        self.color_code.as_deref()
    }

    pub fn sizes_ordered(&self) -> &SizeVector {
        &self.sizes_ordered
    }

    pub fn quantity_ordered(&self) -> u32 {
        self.quantity_ordered
    }

    pub fn quantity_received(&self) -> u32 {
        self.quantity_received
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }

    pub fn associated_orders(&self) -> &[AssociatedOrderRef] {
        &self.associated_orders
    }

    pub fn received_items(&self) -> &[ReceiptRecord] {
        &self.received_items
    }

    /// Quantities received so far, folded from the receipt ledger rather
    /// than read from a cache.
    pub fn received_sizes(&self) -> SizeVector {
        self.received_items
            .iter()
            .fold(SizeVector::new(), |acc, receipt| acc.add(&receipt.sizes))
    }

    /// Ordered minus received, clamped at zero per bucket.
    pub fn remaining_sizes(&self) -> SizeVector {
        self.sizes_ordered.subtract(&self.received_sizes())
    }

    pub fn remaining(&self, size: Size) -> u32 {
        self.remaining_sizes().get(size)
    }
}

impl Entity for PurchaseOrderLineItem {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The consolidated, supplier-addressed purchase order.
///
/// Created once by consolidation, then mutated only through the lifecycle
/// operations here and the receiving commit. Associated order snapshots and
/// receipt records are never deleted; besides them, only notes, tracking,
/// dates and the derived totals ever change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    id: PurchaseOrderId,
    po_number: String,
    supplier_id: SupplierId,
    status: PurchaseOrderStatus,
    order_date: NaiveDate,
    expected_delivery_date: Option<NaiveDate>,
    actual_delivery_date: Option<NaiveDate>,
    line_items: Vec<PurchaseOrderLineItem>,
    subtotal: Money,
    shipping: Money,
    tax: Money,
    total: Money,
    notes: Option<String>,
    tracking: Option<String>,
    received_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub(crate) fn new_draft(
        ids: &dyn IdGenerator,
        request: ConsolidationRequest,
        line_items: Vec<PurchaseOrderLineItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let subtotal: Money = line_items.iter().map(|line| line.line_total()).sum();
        let total = subtotal + request.shipping + request.tax;
        Self {
            id: PurchaseOrderId::generate(ids),
            po_number: ids.next(PO_NUMBER_PREFIX),
            supplier_id: request.supplier_id,
            status: PurchaseOrderStatus::Draft,
            order_date: request.order_date,
            expected_delivery_date: request.expected_delivery_date,
            actual_delivery_date: None,
            line_items,
            subtotal,
            shipping: request.shipping,
            tax: request.tax,
            total,
            notes: request.notes,
            tracking: request.tracking,
            received_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn po_number(&self) -> &str {
        &self.po_number
    }

    pub fn supplier_id(&self) -> &SupplierId {
        &self.supplier_id
    }

    pub fn status(&self) -> PurchaseOrderStatus {
        self.status
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn expected_delivery_date(&self) -> Option<NaiveDate> {
        self.expected_delivery_date
    }

    pub fn actual_delivery_date(&self) -> Option<NaiveDate> {
        self.actual_delivery_date
    }

    pub fn line_items(&self) -> &[PurchaseOrderLineItem] {
        &self.line_items
    }

    pub fn line_item(&self, id: &LineItemId) -> Option<&PurchaseOrderLineItem> {
        self.line_items.iter().find(|line| line.id == *id)
    }

    pub(crate) fn line_item_mut(&mut self, id: &LineItemId) -> Option<&mut PurchaseOrderLineItem> {
        self.line_items.iter_mut().find(|line| line.id == *id)
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn shipping(&self) -> Money {
        self.shipping
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn tracking(&self) -> Option<&str> {
        self.tracking.as_deref()
    }

    pub fn received_by(&self) -> Option<&str> {
        self.received_by.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn total_ordered(&self) -> u32 {
        self.line_items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity_ordered()))
    }

    pub fn total_received(&self) -> u32 {
        self.line_items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity_received()))
    }

    pub fn is_fully_received(&self) -> bool {
        let ordered = self.total_ordered();
        ordered > 0 && self.total_received() >= ordered
    }

    /// Move a draft to `ordered` once it has been dispatched to the
    /// supplier.
    pub fn mark_ordered(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != PurchaseOrderStatus::Draft {
            return Err(DomainError::invariant(
                "only draft purchase orders can be marked ordered",
            ));
        }
        self.status = PurchaseOrderStatus::Ordered;
        self.updated_at = now;
        Ok(())
    }

    /// Cancel the order. Fully received orders cannot be cancelled;
    /// cancelling an already-cancelled order is a no-op.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            PurchaseOrderStatus::Cancelled => Ok(()),
            PurchaseOrderStatus::Received => Err(DomainError::invariant(
                "a fully received purchase order cannot be cancelled",
            )),
            _ => {
                self.status = PurchaseOrderStatus::Cancelled;
                self.updated_at = now;
                Ok(())
            }
        }
    }

    pub fn set_notes(&mut self, notes: Option<String>, now: DateTime<Utc>) {
        self.notes = notes;
        self.updated_at = now;
    }

    pub fn set_tracking(&mut self, tracking: Option<String>, now: DateTime<Utc>) {
        self.tracking = tracking;
        self.updated_at = now;
    }

    pub fn set_expected_delivery(&mut self, date: Option<NaiveDate>, now: DateTime<Utc>) {
        self.expected_delivery_date = date;
        self.updated_at = now;
    }

    /// Close out one receiving commit: rederive status and stamp the
    /// delivery fields.
    pub(crate) fn finish_receiving(
        &mut self,
        received_by: &str,
        received_date: NaiveDate,
        now: DateTime<Utc>,
    ) {
        self.status = derive_status(self.status, self.total_ordered(), self.total_received());
        self.actual_delivery_date = Some(received_date);
        self.received_by = Some(received_by.to_string());
        self.updated_at = now;
    }
}

impl Entity for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

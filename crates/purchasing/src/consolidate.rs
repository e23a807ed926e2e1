//! Order consolidation: merging selected quotes and jobs into one
//! supplier-facing draft purchase order.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use stitchworks_core::{DomainError, DomainResult, IdGenerator, Money};
use stitchworks_orders::{SourceLineItem, SourceOrder};

use crate::order::{AssociatedOrderRef, PurchaseOrder, PurchaseOrderLineItem, SupplierId};

/// Everything one consolidation call needs besides the selected orders.
#[derive(Debug, Clone)]
pub struct ConsolidationRequest {
    pub supplier_id: SupplierId,
    pub order_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub shipping: Money,
    pub tax: Money,
    pub notes: Option<String>,
    pub tracking: Option<String>,
}

/// Grouping key deciding which source lines merge into one PO line:
/// style and color, trimmed, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConsolidationKey {
    style: String,
    color: String,
}

impl ConsolidationKey {
    fn of(item: &SourceLineItem) -> Self {
        Self {
            style: item.style_name.trim().to_string(),
            color: item.color_name.trim().to_string(),
        }
    }
}

/// Merge the selected source orders into one draft purchase order.
///
/// Lines group by consolidation key in first-seen order. Every contributing
/// source line adds its size vector to the consolidated totals and leaves
/// one frozen [`AssociatedOrderRef`] snapshot — one per contribution, even
/// when the same customer appears across a quote and a job. The line's
/// descriptive fields and unit cost come from its first contributor.
///
/// Returns [`DomainError::EmptySelection`] when the selection holds no
/// orders or no order lines at all.
pub fn consolidate(
    orders: &[SourceOrder],
    request: ConsolidationRequest,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> DomainResult<PurchaseOrder> {
    if orders.is_empty() {
        return Err(DomainError::EmptySelection);
    }

    let mut slots: HashMap<ConsolidationKey, usize> = HashMap::new();
    let mut lines: Vec<PurchaseOrderLineItem> = Vec::new();

    for order in orders {
        for item in &order.line_items {
            let slot = *slots.entry(ConsolidationKey::of(item)).or_insert_with(|| {
                lines.push(PurchaseOrderLineItem::open(
                    ids,
                    request.supplier_id.clone(),
                    item,
                ));
                lines.len() - 1
            });
            lines[slot].merge_contribution(&item.sizes);
            lines[slot].link_order(AssociatedOrderRef::snapshot(order, item));
        }
    }

    if lines.is_empty() {
        return Err(DomainError::EmptySelection);
    }

    let order = PurchaseOrder::new_draft(ids, request, lines, now);
    tracing::debug!(
        "Consolidated {} source orders into {} ({} lines, {} units)",
        orders.len(),
        order.po_number(),
        order.line_items().len(),
        order.total_ordered()
    );
    Ok(order)
}

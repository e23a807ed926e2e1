use serde::{Deserialize, Serialize};

use stitchworks_core::{Entity, Money};
use stitchworks_sizes::SizeVector;

/// Whether a source order is still a quote or already a committed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Quote,
    Job,
}

/// Source order identifier, assigned by whichever system created the
/// quote or job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceOrderId(String);

impl SourceOrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SourceOrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One garment request on a quote or job: a style/color pair and the
/// quantities per size.
///
/// The requested quantity is always the sum of the size vector, so it is
/// exposed as [`quantity`](Self::quantity) rather than stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLineItem {
    pub style_name: String,
    pub brand_name: String,
    pub color_name: String,
    pub color_code: Option<String>,
    pub sizes: SizeVector,
    pub unit_price: Money,
}

impl SourceLineItem {
    pub fn quantity(&self) -> u32 {
        self.sizes.total()
    }
}

/// A customer quote or job selected for consolidation.
///
/// Consolidation only reads these; source orders are owned by the caller and
/// never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOrder {
    pub kind: OrderKind,
    pub id: SourceOrderId,
    pub display_number: String,
    pub customer_name: String,
    pub line_items: Vec<SourceLineItem>,
}

impl Entity for SourceOrder {
    type Id = SourceOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchworks_sizes::Size;

    fn test_line() -> SourceLineItem {
        SourceLineItem {
            style_name: "Gildan G500".to_string(),
            brand_name: "Gildan".to_string(),
            color_name: "Black".to_string(),
            color_code: Some("#000000".to_string()),
            sizes: SizeVector::new().with(Size::M, 10).with(Size::L, 10),
            unit_price: Money::from_cents(500),
        }
    }

    #[test]
    fn quantity_is_the_sum_of_the_size_vector() {
        assert_eq!(test_line().quantity(), 20);
    }

    #[test]
    fn order_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderKind::Quote).unwrap(), r#""quote""#);
        assert_eq!(serde_json::to_string(&OrderKind::Job).unwrap(), r#""job""#);
    }

    #[test]
    fn source_order_round_trips_through_json() {
        let order = SourceOrder {
            kind: OrderKind::Job,
            id: SourceOrderId::new("job-104"),
            display_number: "J-104".to_string(),
            customer_name: "Riverside Little League".to_string(),
            line_items: vec![test_line()],
        };

        let json = serde_json::to_string(&order).unwrap();
        let back: SourceOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
        assert_eq!(back.id().as_str(), "job-104");
    }
}

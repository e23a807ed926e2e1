//! Quantity-by-size vectors over the fixed run.

use core::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stitchworks_core::ValueObject;

use crate::size::Size;

/// Non-negative quantities for every bucket of the size run.
///
/// All operations are pure and total: subtraction clamps at zero per bucket
/// and totals saturate instead of wrapping.
///
/// Serialized as a label-keyed map with zero buckets omitted, e.g.
/// `{"M": 10, "L": 15}`; labels outside the run and duplicate labels are
/// rejected on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizeVector([u32; Size::COUNT]);

impl SizeVector {
    /// The all-zero vector.
    pub const fn new() -> Self {
        Self([0; Size::COUNT])
    }

    /// Builder-style setter for literals:
    /// `SizeVector::new().with(Size::M, 10).with(Size::L, 10)`.
    pub fn with(mut self, size: Size, quantity: u32) -> Self {
        self.set(size, quantity);
        self
    }

    pub fn get(&self, size: Size) -> u32 {
        self.0[size.index()]
    }

    pub fn set(&mut self, size: Size, quantity: u32) {
        self.0[size.index()] = quantity;
    }

    /// Element-wise sum, saturating per bucket.
    pub fn add(&self, other: &SizeVector) -> SizeVector {
        let mut out = SizeVector::new();
        for size in Size::ALL {
            out.set(size, self.get(size).saturating_add(other.get(size)));
        }
        out
    }

    /// Element-wise difference, clamped at zero per bucket — never negative.
    pub fn subtract(&self, other: &SizeVector) -> SizeVector {
        let mut out = SizeVector::new();
        for size in Size::ALL {
            out.set(size, self.get(size).saturating_sub(other.get(size)));
        }
        out
    }

    /// Scalar total across all buckets.
    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, qty| acc.saturating_add(*qty))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|qty| *qty == 0)
    }

    /// Buckets in run order.
    pub fn iter(&self) -> impl Iterator<Item = (Size, u32)> + '_ {
        Size::ALL.into_iter().map(move |size| (size, self.get(size)))
    }
}

impl ValueObject for SizeVector {}

impl Serialize for SizeVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let count = self.iter().filter(|(_, qty)| *qty > 0).count();
        let mut map = serializer.serialize_map(Some(count))?;
        for (size, qty) in self.iter() {
            if qty > 0 {
                map.serialize_entry(size.label(), &qty)?;
            }
        }
        map.end()
    }
}

struct SizeVectorVisitor;

impl<'de> Visitor<'de> for SizeVectorVisitor {
    type Value = SizeVector;

    fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter.write_str("a map of size labels to non-negative quantities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SizeVector, A::Error> {
        let mut vector = SizeVector::new();
        let mut seen = [false; Size::COUNT];
        while let Some((label, qty)) = access.next_entry::<String, u32>()? {
            let size = Size::from_str(&label).map_err(de::Error::custom)?;
            if seen[size.index()] {
                return Err(de::Error::custom(format!("duplicate size label `{label}`")));
            }
            seen[size.index()] = true;
            vector.set(size, qty);
        }
        Ok(vector)
    }
}

impl<'de> Deserialize<'de> for SizeVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SizeVectorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_element_wise() {
        let a = SizeVector::new().with(Size::M, 10).with(Size::L, 10);
        let b = SizeVector::new().with(Size::L, 5).with(Size::Xl, 5);
        let sum = a.add(&b);
        assert_eq!(sum.get(Size::M), 10);
        assert_eq!(sum.get(Size::L), 15);
        assert_eq!(sum.get(Size::Xl), 5);
        assert_eq!(sum.total(), 30);
    }

    #[test]
    fn subtract_clamps_at_zero() {
        let ordered = SizeVector::new().with(Size::M, 10);
        let received = SizeVector::new().with(Size::M, 12).with(Size::S, 3);
        let remaining = ordered.subtract(&received);
        assert_eq!(remaining.get(Size::M), 0);
        assert_eq!(remaining.get(Size::S), 0);
        assert!(remaining.is_zero());
    }

    #[test]
    fn zero_vector_is_zero() {
        assert!(SizeVector::new().is_zero());
        assert!(!SizeVector::new().with(Size::Xs, 1).is_zero());
        assert_eq!(SizeVector::new().total(), 0);
    }

    #[test]
    fn serializes_non_zero_buckets_in_run_order() {
        let v = SizeVector::new()
            .with(Size::Xl, 5)
            .with(Size::M, 10)
            .with(Size::L, 15);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"M":10,"L":15,"XL":5}"#);
    }

    #[test]
    fn omitted_buckets_deserialize_to_zero() {
        let v: SizeVector = serde_json::from_str(r#"{"2XL":7}"#).unwrap();
        assert_eq!(v.get(Size::Xxl), 7);
        assert_eq!(v.get(Size::Xs), 0);
        assert_eq!(v.total(), 7);

        let empty: SizeVector = serde_json::from_str("{}").unwrap();
        assert!(empty.is_zero());
    }

    #[test]
    fn unknown_labels_are_rejected_at_construction() {
        let err = serde_json::from_str::<SizeVector>(r#"{"XXS":1}"#).unwrap_err();
        assert!(err.to_string().contains("unknown size label"));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = serde_json::from_str::<SizeVector>(r#"{"M":1,"M":2}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate size label"));
    }

    #[test]
    fn negative_quantities_are_rejected() {
        assert!(serde_json::from_str::<SizeVector>(r#"{"M":-1}"#).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn vectors() -> impl Strategy<Value = SizeVector> {
            prop::array::uniform7(0u32..1_000).prop_map(SizeVector)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            #[test]
            fn add_commutes(a in vectors(), b in vectors()) {
                prop_assert_eq!(a.add(&b), b.add(&a));
            }

            #[test]
            fn totals_are_linear_under_add(a in vectors(), b in vectors()) {
                prop_assert_eq!(a.add(&b).total(), a.total() + b.total());
            }

            #[test]
            fn subtract_never_goes_negative(a in vectors(), b in vectors()) {
                let diff = a.subtract(&b);
                for size in Size::ALL {
                    prop_assert_eq!(diff.get(size), a.get(size).saturating_sub(b.get(size)));
                }
            }

            #[test]
            fn subtracting_self_zeroes(a in vectors()) {
                prop_assert!(a.subtract(&a).is_zero());
            }

            #[test]
            fn serde_round_trips(a in vectors()) {
                let json = serde_json::to_string(&a).unwrap();
                let back: SizeVector = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(a, back);
            }
        }
    }
}

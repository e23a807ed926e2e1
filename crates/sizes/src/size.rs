//! The fixed garment size run.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stitchworks_core::DomainError;

/// One size bucket in the fixed run XS…3XL.
///
/// The run is closed: a quantity keyed by any other label is rejected when a
/// vector is built (deserialization included), never later at use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2XL")]
    Xxl,
    #[serde(rename = "3XL")]
    Xxxl,
}

impl Size {
    /// Every size in run order.
    pub const ALL: [Size; 7] = [
        Size::Xs,
        Size::S,
        Size::M,
        Size::L,
        Size::Xl,
        Size::Xxl,
        Size::Xxxl,
    ];

    /// Number of buckets in the run.
    pub const COUNT: usize = Self::ALL.len();

    /// Label as printed on the garment tag.
    pub const fn label(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
            Size::Xxl => "2XL",
            Size::Xxxl => "3XL",
        }
    }

    /// Position within the run (and within `SizeVector` storage).
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XS" => Ok(Size::Xs),
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            "XL" => Ok(Size::Xl),
            "2XL" => Ok(Size::Xxl),
            "3XL" => Ok(Size::Xxxl),
            other => Err(DomainError::unknown_size(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for size in Size::ALL {
            assert_eq!(size.label().parse::<Size>().unwrap(), size);
        }
    }

    #[test]
    fn labels_outside_the_run_are_rejected() {
        for label in ["XXS", "4XL", "xl", "medium", ""] {
            let err = label.parse::<Size>().unwrap_err();
            assert_eq!(err, DomainError::unknown_size(label));
        }
    }

    #[test]
    fn serde_uses_the_tag_labels() {
        assert_eq!(serde_json::to_string(&Size::Xxl).unwrap(), "\"2XL\"");
        let back: Size = serde_json::from_str("\"3XL\"").unwrap();
        assert_eq!(back, Size::Xxxl);
    }

    #[test]
    fn run_order_is_smallest_first() {
        let mut sorted = Size::ALL;
        sorted.sort();
        assert_eq!(sorted, Size::ALL);
    }
}

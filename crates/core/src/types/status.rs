//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Stage of an order line in the fulfillment pipeline.
///
/// The pipeline is linear with no backward transitions:
///
/// ```text
/// Pending Confirmation -> Preparing Food -> Out for Delivery -> Delivered
/// ```
///
/// There is no cancelled stage; cancellation removes the line from the
/// pipeline instead of parking it in a state. The wire names (with spaces)
/// match the persisted snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Placed but not yet accepted by the kitchen.
    #[default]
    #[serde(rename = "Pending Confirmation")]
    PendingConfirmation,
    /// Accepted; the kitchen is on it.
    #[serde(rename = "Preparing Food")]
    PreparingFood,
    /// Handed to the courier.
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    /// Terminal stage.
    #[serde(rename = "Delivered")]
    Delivered,
}

impl OrderStatus {
    /// Every status, in pipeline order.
    pub const ALL: [Self; 4] = [
        Self::PendingConfirmation,
        Self::PreparingFood,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// The stage that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::PendingConfirmation => Some(Self::PreparingFood),
            Self::PreparingFood => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Whether the kitchen has accepted the line (anything past pending).
    ///
    /// Revenue reporting counts exactly these lines.
    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        !matches!(self, Self::PendingConfirmation)
    }

    /// Delivered lines never transition again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// The wire/display name, e.g. `"Pending Confirmation"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingConfirmation => "Pending Confirmation",
            Self::PreparingFood => "Preparing Food",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending Confirmation" => Ok(Self::PendingConfirmation),
            "Preparing Food" => Ok(Self::PreparingFood),
            "Out for Delivery" => Ok(Self::OutForDelivery),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_is_linear() {
        assert_eq!(
            OrderStatus::PendingConfirmation.next(),
            Some(OrderStatus::PreparingFood)
        );
        assert_eq!(
            OrderStatus::PreparingFood.next(),
            Some(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            OrderStatus::OutForDelivery.next(),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_confirmed_set_excludes_pending() {
        assert!(!OrderStatus::PendingConfirmation.is_confirmed());
        assert!(OrderStatus::PreparingFood.is_confirmed());
        assert!(OrderStatus::OutForDelivery.is_confirmed());
        assert!(OrderStatus::Delivered.is_confirmed());
    }

    #[test]
    fn test_only_delivered_is_terminal() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![OrderStatus::Delivered]);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);

            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::PendingConfirmation);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("Cancelled".parse::<OrderStatus>().is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"Cancelled\"").is_err());
    }
}

//! Presentation records for resolved results
//!
//! Pure mapping from a [`ResolvedResult`] to what a result card shows. No I/O.

use serde::Serialize;

use crate::types::{ResolvedResult, Verdict};

pub const ACTION_ADD_TO_CART: &str = "Add to Cart";
pub const ACTION_MAKE_OFFER: &str = "Make Offer";

/// Stagger before the first alternative is revealed (seconds)
const FIRST_ALTERNATIVE_DELAY: f32 = 0.1;
/// Extra stagger per following alternative (seconds)
const ALTERNATIVE_DELAY_STEP: f32 = 0.05;

/// Display data for one result card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub domain: String,
    pub verdict: Verdict,
    pub status_label: &'static str,
    pub action_label: &'static str,
    /// Shown only while the domain is available
    pub price_label: Option<String>,
    /// Primary call-to-action styling
    pub highlighted: bool,
    pub reveal_delay_secs: f32,
}

impl ResultCard {
    pub fn from_result(result: &ResolvedResult) -> Self {
        let candidate = &result.candidate;
        let (status_label, action_label, price_label) = match result.verdict {
            Verdict::Available => (
                "Available",
                ACTION_ADD_TO_CART,
                Some(candidate.price_label.clone()),
            ),
            Verdict::Taken => ("Taken", ACTION_MAKE_OFFER, None),
        };

        Self {
            domain: candidate.domain.clone(),
            verdict: result.verdict,
            status_label,
            action_label,
            price_label,
            highlighted: result.is_available() && candidate.is_primary,
            reveal_delay_secs: reveal_delay(candidate.sequence_index),
        }
    }
}

impl std::fmt::Display for ResultCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.verdict.is_available() { "✅" } else { "❌" };
        write!(f, "{} {:<28} {:<10}", marker, self.domain, self.status_label)?;
        write!(f, " {:<16}", self.price_label.as_deref().unwrap_or(""))?;
        if self.highlighted {
            write!(f, " [{}]", self.action_label)
        } else {
            write!(f, " {}", self.action_label)
        }
    }
}

/// Reveal stagger for the card at `sequence_index`
pub fn reveal_delay(sequence_index: usize) -> f32 {
    match sequence_index {
        0 => 0.0,
        n => FIRST_ALTERNATIVE_DELAY + ALTERNATIVE_DELAY_STEP * (n - 1) as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, VerdictSource};

    fn result(domain: &str, index: usize, verdict: Verdict) -> ResolvedResult {
        ResolvedResult::new(
            Candidate {
                domain: domain.to_string(),
                tld: ".com".to_string(),
                price_label: "₹1,179/Year".to_string(),
                is_primary: index == 0,
                sequence_index: index,
            },
            verdict,
            VerdictSource::Dns,
        )
    }

    #[test]
    fn test_available_card() {
        let card = ResultCard::from_result(&result("mystartup.com", 0, Verdict::Available));
        assert_eq!(card.status_label, "Available");
        assert_eq!(card.action_label, "Add to Cart");
        assert_eq!(card.price_label.as_deref(), Some("₹1,179/Year"));
        assert!(card.highlighted);
    }

    #[test]
    fn test_taken_card_hides_price() {
        let card = ResultCard::from_result(&result("mystartup.com", 0, Verdict::Taken));
        assert_eq!(card.status_label, "Taken");
        assert_eq!(card.action_label, "Make Offer");
        assert_eq!(card.price_label, None);
        assert!(!card.highlighted);
    }

    #[test]
    fn test_alternatives_are_not_highlighted() {
        let card = ResultCard::from_result(&result("mystartup.in", 1, Verdict::Available));
        assert!(!card.highlighted);
    }

    #[test]
    fn test_reveal_delay() {
        assert_eq!(reveal_delay(0), 0.0);
        assert!((reveal_delay(1) - 0.1).abs() < 1e-6);
        assert!((reveal_delay(3) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_display_line() {
        let line = ResultCard::from_result(&result("mystartup.com", 0, Verdict::Available)).to_string();
        assert!(line.contains("mystartup.com"));
        assert!(line.contains("[Add to Cart]"));
    }

    #[test]
    fn test_taken_display_line() {
        let card = ResultCard::from_result(&result("mystartup.com", 0, Verdict::Taken));
        assert_eq!(card.verdict, Verdict::Taken);

        let line = card.to_string();
        assert!(line.starts_with("❌"));
        assert!(line.contains("Make Offer"));
        assert!(!line.contains('['));
    }
}

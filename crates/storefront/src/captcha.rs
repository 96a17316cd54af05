//! Arithmetic captcha for the signup form.

use rand::Rng;

/// A single-digit addition challenge.
///
/// Deliberately trivial: the point is to stop blind form submission, not
/// bots with a parser. Wrong answers get a fresh challenge from the form,
/// never a retry of the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captcha {
    left: u8,
    right: u8,
}

impl Captcha {
    /// Generate a fresh challenge with operands in `1..=9`.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        Self {
            left: rng.random_range(1..=9),
            right: rng.random_range(1..=9),
        }
    }

    /// Fixed challenge, for fixtures and previews.
    #[must_use]
    pub const fn with_operands(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    /// The question shown next to the answer field.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("What is {} + {}?", self.left, self.right)
    }

    /// Check a free-text answer.
    #[must_use]
    pub fn verify(&self, answer: &str) -> bool {
        answer
            .trim()
            .parse::<u16>()
            .is_ok_and(|got| got == u16::from(self.left) + u16::from(self.right))
    }
}

impl Default for Captcha {
    fn default() -> Self {
        Self::generate()
    }
}

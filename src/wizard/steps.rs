//! The seven wizard steps and the cursor moving between them.

use super::WizardError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PropertyDetails = 1,
    Assessment = 2,
    Strategy = 3,
    Scope = 4,
    Priorities = 5,
    ActionPlan = 6,
    FinalReview = 7,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::PropertyDetails,
        WizardStep::Assessment,
        WizardStep::Strategy,
        WizardStep::Scope,
        WizardStep::Priorities,
        WizardStep::ActionPlan,
        WizardStep::FinalReview,
    ];

    pub const FIRST: WizardStep = WizardStep::PropertyDetails;
    pub const LAST: WizardStep = WizardStep::FinalReview;
    pub const COUNT: u8 = 7;

    pub fn from_number(number: u8) -> Result<Self, WizardError> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.number() == number)
            .ok_or(WizardError::OutOfRange(number))
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardStep::PropertyDetails => "Property Details",
            WizardStep::Assessment => "Condition Assessment",
            WizardStep::Strategy => "Strategy & Goals",
            WizardStep::Scope => "Scope Building",
            WizardStep::Priorities => "Priority Analysis",
            WizardStep::ActionPlan => "Action Plan",
            WizardStep::FinalReview => "Final Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::PropertyDetails => "Basic property information",
            WizardStep::Assessment => "Room-by-room condition evaluation",
            WizardStep::Strategy => "Investment strategy and budget",
            WizardStep::Scope => "Select renovation items",
            WizardStep::Priorities => "Prioritize by ROI and urgency",
            WizardStep::ActionPlan => "Phased timeline and schedule",
            WizardStep::FinalReview => "Review and save the project",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    pub fn is_final(self) -> bool {
        self == Self::LAST
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Current step plus the set of steps whose payload has been accepted.
///
/// Only already-visited steps (at or before the current one) can be
/// jumped to; moving forward goes through [`WizardCursor::advance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardCursor {
    current: WizardStep,
    completed: BTreeSet<WizardStep>,
}

impl Default for WizardCursor {
    fn default() -> Self {
        Self {
            current: WizardStep::FIRST,
            completed: BTreeSet::new(),
        }
    }
}

impl WizardCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted step numbers.
    pub fn from_parts(current: u8, completed: &[u8]) -> Result<Self, WizardError> {
        let current = WizardStep::from_number(current)?;
        let completed = completed
            .iter()
            .map(|n| WizardStep::from_number(*n))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { current, completed })
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Move forward one step; no-op on the last step.
    pub fn advance(&mut self) -> bool {
        match self.current.next() {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Move back one step; no-op on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.current.previous() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn jump_to(&mut self, number: u8) -> Result<WizardStep, WizardError> {
        let target = WizardStep::from_number(number)?;
        if target > self.current {
            return Err(WizardError::StepLocked {
                requested: number,
                current: self.current.number(),
            });
        }
        self.current = target;
        Ok(target)
    }

    pub fn mark_completed(&mut self, step: WizardStep) {
        self.completed.insert(step);
    }

    pub fn is_completed(&self, step: WizardStep) -> bool {
        self.completed.contains(&step)
    }

    pub fn completed_steps(&self) -> Vec<u8> {
        self.completed.iter().map(|s| s.number()).collect()
    }

    /// Steps before the current one count as completed.
    pub fn status_of(&self, step: WizardStep) -> StepStatus {
        if step == self.current {
            StepStatus::Current
        } else if step < self.current {
            StepStatus::Completed
        } else {
            StepStatus::Pending
        }
    }

    /// `current / 7 × 100`
    pub fn progress(&self) -> f64 {
        f64::from(self.current.number()) / f64::from(WizardStep::COUNT) * 100.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers_and_names() {
        assert_eq!(WizardStep::from_number(4).unwrap(), WizardStep::Scope);
        assert_eq!(WizardStep::Scope.name(), "Scope Building");
        assert_eq!(WizardStep::from_number(0), Err(WizardError::OutOfRange(0)));
        assert_eq!(WizardStep::from_number(8), Err(WizardError::OutOfRange(8)));
        assert_eq!(WizardStep::FIRST.previous(), None);
        assert_eq!(WizardStep::LAST.next(), None);
    }

    #[test]
    fn test_advance_and_retreat_saturate() {
        let mut cursor = WizardCursor::new();
        assert!(!cursor.retreat());
        assert_eq!(cursor.current(), WizardStep::FIRST);

        for _ in 0..10 {
            cursor.advance();
        }
        assert_eq!(cursor.current(), WizardStep::LAST);
        assert!(!cursor.advance());
        assert!(cursor.retreat());
        assert_eq!(cursor.current(), WizardStep::ActionPlan);
    }

    #[test]
    fn test_jump_only_backwards_or_current() {
        let mut cursor = WizardCursor::new();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.jump_to(3).unwrap(), WizardStep::Strategy);
        assert_eq!(
            cursor.jump_to(4),
            Err(WizardError::StepLocked {
                requested: 4,
                current: 3
            })
        );
        assert_eq!(cursor.jump_to(1).unwrap(), WizardStep::PropertyDetails);
        assert_eq!(cursor.jump_to(0), Err(WizardError::OutOfRange(0)));
    }

    #[test]
    fn test_status_and_progress() {
        let mut cursor = WizardCursor::new();
        cursor.advance();
        assert_eq!(cursor.status_of(WizardStep::PropertyDetails), StepStatus::Completed);
        assert_eq!(cursor.status_of(WizardStep::Assessment), StepStatus::Current);
        assert_eq!(cursor.status_of(WizardStep::Strategy), StepStatus::Pending);
        assert!((cursor.progress() - 200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_parts_rejects_bad_steps() {
        assert!(WizardCursor::from_parts(3, &[1, 2]).is_ok());
        assert!(WizardCursor::from_parts(9, &[]).is_err());
        assert!(WizardCursor::from_parts(2, &[12]).is_err());
    }
}

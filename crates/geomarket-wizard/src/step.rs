//! Wizard step derivation.

use geomarket_core::models::OrderMode;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::draft::OrderDraft;

/// The six wizard steps, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    SelectFamily = 1,
    SelectProducts = 2,
    BrowseImagery = 3,
    Configure = 4,
    Schedule = 5,
    Review = 6,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::SelectFamily,
        WizardStep::SelectProducts,
        WizardStep::BrowseImagery,
        WizardStep::Configure,
        WizardStep::Schedule,
        WizardStep::Review,
    ];

    /// First step whose requirements the draft does not yet meet.
    ///
    /// Configuration never blocks, so step 4 is never returned. A future
    /// order needs a name and both dates; a historical one only a name.
    pub fn derive(draft: &OrderDraft) -> Self {
        if draft.family.is_none() {
            return WizardStep::SelectFamily;
        }

        let products_chosen =
            draft.any_available || (draft.product_type.is_some() && draft.tier.is_some());
        let Some(mode) = draft.order_mode.filter(|_| products_chosen) else {
            return WizardStep::SelectProducts;
        };

        if draft.selected_scenes.is_empty() {
            return WizardStep::BrowseImagery;
        }

        let schedule = &draft.schedule;
        let scheduled = match mode {
            OrderMode::Historical => schedule.has_name(),
            OrderMode::Future => {
                schedule.has_name() && schedule.start_date.is_some() && schedule.end_date.is_some()
            }
        };
        if !scheduled {
            return WizardStep::Schedule;
        }

        WizardStep::Review
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// Short stepper label
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::SelectFamily => "Template",
            WizardStep::SelectProducts => "Products",
            WizardStep::BrowseImagery => "Browse",
            WizardStep::Configure => "Configure",
            WizardStep::Schedule => "Schedule",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_labels() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(WizardStep::BrowseImagery.to_string(), "3. Browse");
    }

    #[test]
    fn test_from_number() {
        assert_eq!(WizardStep::from_number(5), Some(WizardStep::Schedule));
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(7), None);
    }

    #[test]
    fn test_empty_draft_is_step_one() {
        assert_eq!(WizardStep::derive(&OrderDraft::default()), WizardStep::SelectFamily);
    }
}

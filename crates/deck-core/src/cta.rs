//! Call-to-action capsules: threshold policy and one-way reveal latch

use serde::{Deserialize, Serialize};

use crate::sequence::SequenceMapper;

/// Delay between the two steps of a capsule reveal, in milliseconds
pub const REVEAL_STEP_MS: u64 = 400;

/// Underlying-page threshold formula:
/// `max(minimum, max(page_count - end_offset, floor(page_count * fraction)))`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdRule {
    pub minimum: u32,
    pub end_offset: u32,
    pub fraction: f64,
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self {
            minimum: 15,
            end_offset: 5,
            fraction: 0.80,
        }
    }
}

impl ThresholdRule {
    pub fn new(minimum: u32, end_offset: u32, fraction: f64) -> Self {
        Self {
            minimum,
            end_offset,
            fraction,
        }
    }

    /// Threshold in underlying page space
    pub fn underlying_page(&self, page_count: u32) -> u32 {
        let from_end = page_count.saturating_sub(self.end_offset);
        let by_fraction = (page_count as f64 * self.fraction).floor().max(0.0) as u32;
        self.minimum.max(from_end.max(by_fraction))
    }
}

/// Tunable policy deciding when the capsules appear
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CallToActionPolicy {
    pub enabled: bool,
    /// Documents shorter than this never show capsules
    pub min_pages: u32,
    pub donate: ThresholdRule,
    pub form: ThresholdRule,
}

impl Default for CallToActionPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_pages: 10,
            donate: ThresholdRule::new(15, 5, 0.80),
            form: ThresholdRule::new(16, 4, 0.85),
        }
    }
}

/// Reveal thresholds in sequence space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CtaThresholds {
    pub donate: u32,
    pub form: u32,
}

impl CallToActionPolicy {
    /// Thresholds for the mapped document, or `None` when capsules are off
    pub fn thresholds(&self, mapper: &SequenceMapper) -> Option<CtaThresholds> {
        let page_count = mapper.page_count();
        if !self.enabled || page_count < self.min_pages {
            return None;
        }

        Some(CtaThresholds {
            donate: mapper
                .sequence_position_for_underlying_page(self.donate.underlying_page(page_count)),
            form: mapper.sequence_position_for_underlying_page(self.form.underlying_page(page_count)),
        })
    }
}

/// Capsule layout stage. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsuleStage {
    #[default]
    Single,
    RevealingDonate,
    Dual,
    RevealingForm,
    Triple,
}

impl CapsuleStage {
    /// Coarse name: both reveal stages read as "transitioning"
    pub fn as_str(&self) -> &'static str {
        match self {
            CapsuleStage::Single => "single",
            CapsuleStage::RevealingDonate | CapsuleStage::RevealingForm => "transitioning",
            CapsuleStage::Dual => "dual",
            CapsuleStage::Triple => "triple",
        }
    }
}

/// Timed step of a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LatchStep {
    DonateReveal,
    DonateSettled,
    FormReveal,
    FormSettled,
}

/// One-way latch driving capsule visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapsuleLatch {
    stage: CapsuleStage,
    donate_visible: bool,
    form_visible: bool,
}

impl CapsuleLatch {
    pub fn stage(&self) -> CapsuleStage {
        self.stage
    }

    pub fn donate_visible(&self) -> bool {
        self.donate_visible
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    /// Compare the current position against the thresholds.
    ///
    /// Starts a reveal when a threshold is crossed at a resting stage and
    /// returns the first step to schedule.
    pub fn observe(&mut self, position: u32, thresholds: Option<CtaThresholds>) -> Option<LatchStep> {
        let thresholds = thresholds?;
        match self.stage {
            CapsuleStage::Single if position >= thresholds.donate => {
                self.stage = CapsuleStage::RevealingDonate;
                Some(LatchStep::DonateReveal)
            }
            CapsuleStage::Dual if position >= thresholds.form => {
                self.stage = CapsuleStage::RevealingForm;
                Some(LatchStep::FormReveal)
            }
            _ => None,
        }
    }

    /// Apply a fired step, returning the follow-up step if any.
    ///
    /// Steps that do not match the current stage are ignored.
    pub fn apply(&mut self, step: LatchStep) -> Option<LatchStep> {
        match (self.stage, step) {
            (CapsuleStage::RevealingDonate, LatchStep::DonateReveal) => {
                self.donate_visible = true;
                Some(LatchStep::DonateSettled)
            }
            (CapsuleStage::RevealingDonate, LatchStep::DonateSettled) if self.donate_visible => {
                self.stage = CapsuleStage::Dual;
                None
            }
            (CapsuleStage::RevealingForm, LatchStep::FormReveal) => {
                self.form_visible = true;
                Some(LatchStep::FormSettled)
            }
            (CapsuleStage::RevealingForm, LatchStep::FormSettled) if self.form_visible => {
                self.stage = CapsuleStage::Triple;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insertion::Insertion;

    fn mapper(page_count: u32, anchors: &[u32]) -> SequenceMapper {
        let insertions = anchors
            .iter()
            .map(|&after| Insertion {
                id: None,
                after_page: after,
                before_page: after + 1,
                url: "https://example.com".to_string(),
                title_lines: vec!["t".to_string()],
            })
            .collect();
        SequenceMapper::new(page_count, insertions)
    }

    #[test]
    fn test_threshold_rule_formula() {
        let donate = ThresholdRule::new(15, 5, 0.80);
        assert_eq!(donate.underlying_page(10), 15);
        assert_eq!(donate.underlying_page(20), 16);
        assert_eq!(donate.underlying_page(40), 35);

        let form = ThresholdRule::new(16, 4, 0.85);
        assert_eq!(form.underlying_page(20), 17);
        assert_eq!(form.underlying_page(40), 36);
    }

    #[test]
    fn test_thresholds_disabled_for_short_documents() {
        let policy = CallToActionPolicy::default();
        assert!(policy.thresholds(&mapper(9, &[])).is_none());
        assert!(policy.thresholds(&mapper(10, &[])).is_some());
    }

    #[test]
    fn test_thresholds_use_forward_mapping() {
        let policy = CallToActionPolicy::default();
        let thresholds = policy.thresholds(&mapper(20, &[1, 5])).unwrap();
        assert_eq!(thresholds.donate, 18);
        assert_eq!(thresholds.form, 19);
    }

    #[test]
    fn test_huge_configured_minimum_saturates() {
        let policy = CallToActionPolicy {
            donate: ThresholdRule::new(u32::MAX, 5, 0.80),
            ..Default::default()
        };
        let thresholds = policy.thresholds(&mapper(20, &[1, 5])).unwrap();
        assert_eq!(thresholds.donate, u32::MAX);
        assert_eq!(thresholds.form, 19);
    }

    #[test]
    fn test_latch_full_progression() {
        let thresholds = Some(CtaThresholds { donate: 5, form: 7 });
        let mut latch = CapsuleLatch::default();

        assert_eq!(latch.observe(4, thresholds), None);
        assert_eq!(latch.observe(5, thresholds), Some(LatchStep::DonateReveal));
        assert_eq!(latch.stage().as_str(), "transitioning");
        assert_eq!(latch.apply(LatchStep::DonateReveal), Some(LatchStep::DonateSettled));
        assert!(latch.donate_visible());
        assert_eq!(latch.apply(LatchStep::DonateSettled), None);
        assert_eq!(latch.stage(), CapsuleStage::Dual);

        assert_eq!(latch.observe(8, thresholds), Some(LatchStep::FormReveal));
        latch.apply(LatchStep::FormReveal);
        latch.apply(LatchStep::FormSettled);
        assert_eq!(latch.stage(), CapsuleStage::Triple);
        assert!(latch.form_visible());
    }

    #[test]
    fn test_latch_never_moves_backward() {
        let thresholds = Some(CtaThresholds { donate: 5, form: 7 });
        let mut latch = CapsuleLatch::default();
        latch.observe(6, thresholds);
        latch.apply(LatchStep::DonateReveal);
        latch.apply(LatchStep::DonateSettled);

        assert_eq!(latch.observe(1, thresholds), None);
        assert_eq!(latch.stage(), CapsuleStage::Dual);
        assert!(latch.donate_visible());
    }

    #[test]
    fn test_latch_ignores_mismatched_steps() {
        let mut latch = CapsuleLatch::default();
        assert_eq!(latch.apply(LatchStep::DonateSettled), None);
        assert_eq!(latch.apply(LatchStep::FormReveal), None);
        assert_eq!(latch.stage(), CapsuleStage::Single);
        assert!(!latch.form_visible());
    }

    #[test]
    fn test_latch_inert_without_thresholds() {
        let mut latch = CapsuleLatch::default();
        assert_eq!(latch.observe(100, None), None);
    }
}

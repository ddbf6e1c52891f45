//! Application eligibility, decided from the match tier alone

use crate::processing::tier::MatchTier;

/// Lowest tier that unlocks the "apply" action.
pub const MINIMUM_APPLY_TIER: MatchTier = MatchTier::Alta;

/// Whether a student may apply to a posting annotated with `tier`.
pub fn can_apply(tier: MatchTier) -> bool {
    tier >= MINIMUM_APPLY_TIER
}

//! Break scheduling rules

use crate::state::BreakConfig;

/// Decide whether a break follows the level at `current_level` (zero-based)
///
/// Breaks fall after every `frequency`-th completed level, never after the
/// first level.
pub fn should_take_break(current_level: usize, config: &BreakConfig) -> bool {
    if !config.enabled || config.frequency == 0 || current_level == 0 {
        return false;
    }
    (current_level + 1) % config.frequency as usize == 0
}

/// Number of levels until the next break, counting the current one
///
/// Returns `None` when breaks are disabled. Otherwise the result is in
/// `1..=frequency`.
pub fn levels_until_break(current_level: usize, config: &BreakConfig) -> Option<u32> {
    if !config.enabled || config.frequency == 0 {
        return None;
    }
    let frequency = config.frequency as usize;
    let next_break_level = (current_level + 1).div_ceil(frequency) * frequency;
    u32::try_from(next_break_level - current_level).ok()
}

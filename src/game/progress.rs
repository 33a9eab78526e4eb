/// Character shown for positions whose letter has not been guessed yet
pub const PLACEHOLDER: char = '*';

/// Builds and updates the partially revealed form of a target word.
pub struct ProgressMask;

impl ProgressMask {
    /// One placeholder per character of `target`, nothing revealed
    pub fn initial(target: &str) -> String {
        target.chars().map(|_| PLACEHOLDER).collect()
    }

    /// Reveal every occurrence of `letter` in `target`.
    ///
    /// Positions that do not match keep their value from `progress`, so
    /// letters revealed by earlier guesses stay revealed.
    pub fn apply_guess(target: &str, progress: &str, letter: char) -> String {
        target
            .chars()
            .zip(progress.chars())
            .map(|(t, p)| if t == letter { t } else { p })
            .collect()
    }

    /// True once no placeholder remains and the progress spells the target
    pub fn is_revealed(target: &str, progress: &str) -> bool {
        progress == target
    }
}

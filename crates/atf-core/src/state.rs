use atf_types::Direction;

/// Direction memory carried across navigation calls.
///
/// When OCR cannot place the cursor the navigator repeats `last_direction`,
/// so a run of unreadable frames keeps walking the same way instead of
/// oscillating. Starts at `Down` and is shared by the league selection and
/// every team selection that follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub last_direction: Direction,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }
}

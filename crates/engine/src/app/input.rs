/// Logical actions the loop tracks as held/released, independent of physical key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,
    Dismiss,
    Quit,
}

const ACTION_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Interact => 4,
            InputAction::Dismiss => 5,
            InputAction::Quit => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_tracked_independently() {
        let mut states = ActionStates::default();
        states.set(InputAction::Interact, true);
        states.set(InputAction::MoveLeft, true);
        states.set(InputAction::MoveLeft, false);

        assert!(states.is_down(InputAction::Interact));
        assert!(!states.is_down(InputAction::MoveLeft));
        assert!(!states.is_down(InputAction::Quit));
    }
}

// Game action definitions

/// Represents all in-game actions the player state machine reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Melee attack (left mouse)
    PrimaryAttack,
    /// Basic ability (right mouse)
    SecondaryAbility,
    /// Weapon-specific special ability
    SpecialAbility,
    /// Dodge roll (shares the jump binding)
    Dodge,
    /// Pick up items and gather resource nodes
    Interact,
}

impl Action {
    /// Attack-family actions in the order the Ready state checks them.
    /// The first pressed entry wins.
    pub const READY_PRIORITY: [Action; 4] = [
        Action::PrimaryAttack,
        Action::SecondaryAbility,
        Action::SpecialAbility,
        Action::Dodge,
    ];

    /// All actions
    pub const ALL: [Action; 5] = [
        Action::PrimaryAttack,
        Action::SecondaryAbility,
        Action::SpecialAbility,
        Action::Dodge,
        Action::Interact,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Dodge, Action::Dodge);
        assert_ne!(Action::Dodge, Action::Interact);
    }

    #[test]
    fn test_ready_priority_order() {
        assert_eq!(Action::READY_PRIORITY[0], Action::PrimaryAttack);
        assert_eq!(Action::READY_PRIORITY[3], Action::Dodge);
        assert!(!Action::READY_PRIORITY.contains(&Action::Interact));
    }

    #[test]
    fn test_all_actions_unique() {
        let mut seen = std::collections::HashSet::new();
        for action in Action::ALL {
            assert!(seen.insert(action), "Duplicate action {action:?}");
        }
    }
}

// Ability execution handles and the per-tenure ownership of a cast

use log::debug;

use crate::config::ControllerConfig;
use crate::game::world::PlayerWorld;

/// Which ability slot a cast came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Secondary ability, lights the weapon's ability visual while active
    Basic,
    /// Weapon-specific special, leaves its effect lingering after completion
    Specialized,
}

/// Opaque token for an in-flight ability effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbilityHandle(pub u64);

/// Spawned effect object (projectile, aura...) belonging to a cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(pub u64);

/// A started ability: the handle to poll plus whatever it spawned.
///
/// Not `Clone`: a cast belongs to exactly one tenure and is
/// handed back to the ability subsystem by value when cancelled.
#[derive(Debug, PartialEq, Eq)]
pub struct AbilityCast {
    pub handle: AbilityHandle,
    pub effect: Option<EffectId>,
}

/// The cast owned by one BasicAbility / SpecializedAbility tenure.
///
/// Created on enter; released either by natural completion
/// ([`poll`](AbilityTenure::poll)) or by [`release`](AbilityTenure::release)
/// when the state is superseded first.
#[derive(Debug, PartialEq, Eq)]
pub struct AbilityTenure {
    kind: AbilityKind,
    cast: Option<AbilityCast>,
}

impl AbilityTenure {
    /// Run the entry effects and start the cast
    pub fn begin<W: PlayerWorld + ?Sized>(kind: AbilityKind, world: &mut W) -> Self {
        world.rotate_to_aim();
        if kind == AbilityKind::Basic {
            world.set_ability_visual(true);
        }
        let cast = world.start_ability(kind);
        debug!("Started {:?} ability cast {:?}", kind, cast.handle);

        Self {
            kind,
            cast: Some(cast),
        }
    }

    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    /// Handle of the cast still owned by this tenure
    pub fn handle(&self) -> Option<AbilityHandle> {
        self.cast.as_ref().map(|cast| cast.handle)
    }

    /// Poll the cast. Returns true on the tick it completes, after running
    /// the completion cleanup; false while it is still running.
    pub fn poll<W: PlayerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        config: &ControllerConfig,
    ) -> bool {
        let complete = self
            .cast
            .as_ref()
            .is_some_and(|cast| world.is_complete(cast));
        if !complete {
            return false;
        }

        if let Some(cast) = self.cast.take() {
            debug!("{:?} ability cast {:?} completed", self.kind, cast.handle);
            match self.kind {
                AbilityKind::Basic => world.set_ability_visual(false),
                AbilityKind::Specialized => {
                    if let Some(effect) = cast.effect {
                        world.destroy_effect_after(effect, config.effect_linger);
                    }
                }
            }
        }
        true
    }

    /// Cancel a cast that has not completed yet. No-op after completion.
    pub fn release<W: PlayerWorld + ?Sized>(&mut self, world: &mut W) {
        if let Some(cast) = self.cast.take() {
            debug!("Cancelling {:?} ability cast {:?}", self.kind, cast.handle);
            if self.kind == AbilityKind::Basic {
                world.set_ability_visual(false);
            }
            world.cancel(cast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::testing::{Call, FakeWorld};

    #[test]
    fn test_begin_basic_lights_visual_and_starts_cast() {
        let mut world = FakeWorld::new();
        let tenure = AbilityTenure::begin(AbilityKind::Basic, &mut world);

        assert_eq!(tenure.kind(), AbilityKind::Basic);
        assert!(tenure.handle().is_some());
        assert_eq!(
            world.calls,
            vec![
                Call::RotateToAim,
                Call::AbilityVisual(true),
                Call::StartAbility(AbilityKind::Basic),
            ]
        );
    }

    #[test]
    fn test_begin_specialized_has_no_visual() {
        let mut world = FakeWorld::new();
        AbilityTenure::begin(AbilityKind::Specialized, &mut world);
        assert!(!world.calls.contains(&Call::AbilityVisual(true)));
    }

    #[test]
    fn test_poll_is_idempotent_until_complete() {
        let mut world = FakeWorld::new();
        let config = ControllerConfig::default();
        let mut tenure = AbilityTenure::begin(AbilityKind::Basic, &mut world);
        world.calls.clear();

        for _ in 0..5 {
            assert!(!tenure.poll(&mut world, &config));
        }
        assert!(world.calls.is_empty());

        world.complete_casts = true;
        assert!(tenure.poll(&mut world, &config));
        assert_eq!(world.calls, vec![Call::AbilityVisual(false)]);
        assert!(tenure.handle().is_none());
    }

    #[test]
    fn test_specialized_completion_schedules_effect_destruction() {
        let mut world = FakeWorld::new();
        let config = ControllerConfig::default();
        let mut tenure = AbilityTenure::begin(AbilityKind::Specialized, &mut world);
        let effect = world.last_effect.expect("fake spawns an effect");

        world.complete_casts = true;
        assert!(tenure.poll(&mut world, &config));
        assert!(world
            .calls
            .contains(&Call::DestroyEffectAfter(effect, config.effect_linger)));
    }

    #[test]
    fn test_release_cancels_only_once() {
        let mut world = FakeWorld::new();
        let mut tenure = AbilityTenure::begin(AbilityKind::Basic, &mut world);
        let handle = tenure.handle().expect("cast in flight");

        tenure.release(&mut world);
        tenure.release(&mut world);

        let cancels = world
            .calls
            .iter()
            .filter(|call| **call == Call::Cancel(handle))
            .count();
        assert_eq!(cancels, 1);
        assert!(world.calls.contains(&Call::AbilityVisual(false)));
    }

    #[test]
    fn test_release_after_completion_does_nothing() {
        let mut world = FakeWorld::new();
        let config = ControllerConfig::default();
        let mut tenure = AbilityTenure::begin(AbilityKind::Specialized, &mut world);
        world.complete_casts = true;
        tenure.poll(&mut world, &config);
        world.calls.clear();

        tenure.release(&mut world);
        assert!(world.calls.is_empty());
    }
}

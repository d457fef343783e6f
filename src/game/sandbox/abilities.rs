// Sandbox ability subsystem: timed casts and their spawned effects

use std::collections::HashMap;

use log::debug;

use crate::core::Timer;
use crate::game::characters::{AbilityCast, AbilityHandle, AbilityKind, EffectId};

/// How long each kind of cast runs before it reports complete
#[derive(Debug, Clone, Copy)]
pub struct AbilityTimings {
    pub basic: f32,
    pub specialized: f32,
}

impl Default for AbilityTimings {
    fn default() -> Self {
        Self {
            basic: 0.5,
            specialized: 1.2,
        }
    }
}

impl AbilityTimings {
    fn lifetime(&self, kind: AbilityKind) -> f32 {
        match kind {
            AbilityKind::Basic => self.basic,
            AbilityKind::Specialized => self.specialized,
        }
    }
}

#[derive(Debug)]
struct ActiveCast {
    kind: AbilityKind,
    effect: EffectId,
    timer: Timer,
}

/// Runs casts on its own clock. The character only polls.
#[derive(Debug, Default)]
pub struct AbilityRunner {
    timings: AbilityTimings,
    casts: HashMap<AbilityHandle, ActiveCast>,
    /// Spawned effects, with an optional countdown until they are destroyed
    effects: HashMap<EffectId, Option<Timer>>,
    next_id: u64,
    melee_count: u32,
}

impl AbilityRunner {
    pub fn new(timings: AbilityTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn melee_attack(&mut self) {
        self.melee_count += 1;
        debug!("Melee swing #{}", self.melee_count);
    }

    /// Start a cast and spawn its effect
    pub fn start(&mut self, kind: AbilityKind) -> AbilityCast {
        self.next_id += 1;
        let handle = AbilityHandle(self.next_id);
        let effect = EffectId(self.next_id);

        self.casts.insert(
            handle,
            ActiveCast {
                kind,
                effect,
                timer: Timer::new(self.timings.lifetime(kind)),
            },
        );
        self.effects.insert(effect, None);

        AbilityCast {
            handle,
            effect: Some(effect),
        }
    }

    /// Unknown handles (finished and pruned, or cancelled) count as complete
    pub fn is_complete(&self, cast: &AbilityCast) -> bool {
        self.casts
            .get(&cast.handle)
            .map_or(true, |active| active.timer.is_done())
    }

    /// Stop a cast and despawn its effect immediately
    pub fn cancel(&mut self, cast: AbilityCast) {
        if self.casts.remove(&cast.handle).is_some() {
            debug!("Cast {:?} cancelled", cast.handle);
        }
        if let Some(effect) = cast.effect {
            self.effects.remove(&effect);
        }
    }

    /// Schedule an effect for removal after `delay` seconds
    pub fn destroy_effect_after(&mut self, effect: EffectId, delay: f32) {
        if let Some(countdown) = self.effects.get_mut(&effect) {
            *countdown = Some(Timer::new(delay));
        }
    }

    /// Advance casts and effect countdowns
    pub fn update(&mut self, dt: f32) {
        for active in self.casts.values_mut() {
            active.timer.tick(dt);
        }

        self.effects.retain(|effect, countdown| match countdown {
            Some(timer) => {
                let expired = timer.tick(dt);
                if expired {
                    debug!("Effect {:?} destroyed", effect);
                }
                !expired
            }
            None => true,
        });
    }

    /// Drop casts that finished and have been observed. Basic effects end
    /// with their cast; specialized effects wait for `destroy_effect_after`.
    pub fn prune_completed(&mut self) {
        let effects = &mut self.effects;
        self.casts.retain(|_, active| {
            if !active.timer.is_done() {
                return true;
            }
            if active.kind == AbilityKind::Basic {
                effects.remove(&active.effect);
            }
            false
        });
    }

    pub fn melee_count(&self) -> u32 {
        self.melee_count
    }

    pub fn active_casts(&self) -> usize {
        self.casts.len()
    }

    pub fn live_effects(&self) -> usize {
        self.effects.len()
    }

    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.effects.contains_key(&effect)
    }
}

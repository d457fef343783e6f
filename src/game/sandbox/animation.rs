// Sandbox animator: clip playback with one-shot follow-ups

use std::collections::HashMap;

use crate::game::world::AnimationId;

/// Playback rate bounds applied to every clip
const MIN_FPS: f32 = 1.0;
const MAX_FPS: f32 = 240.0;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub id: AnimationId,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
    /// Clip the animator moves to when a one-shot clip ends
    pub then: Option<AnimationId>,
}

impl AnimationClip {
    /// Create a looping animation. A clip always has at least one frame and
    /// its rate is clamped to `MIN_FPS..=MAX_FPS`.
    pub fn looping(id: AnimationId, frame_count: usize, fps: f32) -> Self {
        let fps = if fps.is_nan() {
            MIN_FPS
        } else {
            fps.clamp(MIN_FPS, MAX_FPS)
        };
        Self {
            id,
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping: true,
            then: None,
        }
    }

    /// Create a one-shot animation that holds its last frame when done
    pub fn one_shot(id: AnimationId, frame_count: usize, fps: f32) -> Self {
        Self {
            looping: false,
            ..Self::looping(id, frame_count, fps)
        }
    }

    /// Transition to `next` once this one-shot clip ends
    pub fn then(mut self, next: AnimationId) -> Self {
        self.then = Some(next);
        self
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Manages animation playback for the sandbox character
#[derive(Debug)]
pub struct AnimationPlayer {
    clips: HashMap<AnimationId, AnimationClip>,
    current: AnimationId,
    current_frame: usize,
    frame_timer: f32,
    playing: bool,
    playback_speed: f32,
    /// Value of the `GatherTool` animator parameter
    gather_tool: Option<i32>,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::with_standard_animations()
    }
}

impl AnimationPlayer {
    /// Create a player with no clips, sitting in Idle
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            current: AnimationId::Idle,
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            playback_speed: 1.0,
            gather_tool: None,
        }
    }

    /// Create an animation player with the standard character clips
    pub fn with_standard_animations() -> Self {
        let mut player = Self::new();

        player.add_clip(AnimationClip::looping(AnimationId::Idle, 8, 10.0));
        player.add_clip(
            AnimationClip::one_shot(AnimationId::Roll, 6, 10.0).then(AnimationId::Idle),
        );
        player.add_clip(
            AnimationClip::one_shot(AnimationId::Attack, 4, 10.0).then(AnimationId::Idle),
        );
        player.add_clip(
            AnimationClip::one_shot(AnimationId::Ability, 5, 10.0).then(AnimationId::AbilityFinish),
        );
        player.add_clip(
            AnimationClip::one_shot(AnimationId::AbilityFinish, 3, 10.0).then(AnimationId::Idle),
        );
        player.add_clip(AnimationClip::looping(AnimationId::Gather, 8, 8.0));
        // Die holds its last frame forever
        player.add_clip(AnimationClip::one_shot(AnimationId::Die, 8, 10.0));

        player
    }

    /// Add an animation clip
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.id, clip);
    }

    /// Play a clip; no-op if it is already the current one
    pub fn play(&mut self, id: AnimationId) {
        if self.current != id {
            self.play_from_start(id);
        }
    }

    /// Play a clip from the beginning, even if it's the same
    pub fn play_from_start(&mut self, id: AnimationId) {
        self.current = id;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Set playback speed (1.0 = normal, 2.0 = double speed)
    pub fn set_playback_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.playback_speed = speed.max(0.0);
        }
    }

    /// Set the `GatherTool` parameter that picks the gather swing
    pub fn set_gather_tool(&mut self, tool_index: i32) {
        self.gather_tool = Some(tool_index);
    }

    pub fn gather_tool(&self) -> Option<i32> {
        self.gather_tool
    }

    /// Update the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.clips.get(&self.current) else {
            return;
        };
        let (frame_duration, frame_count, looping, then) =
            (clip.frame_duration, clip.frame_count, clip.looping, clip.then);

        self.frame_timer += dt * self.playback_speed;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.current_frame += 1;

            if self.current_frame >= frame_count {
                if looping {
                    self.current_frame = 0;
                } else if let Some(next) = then {
                    // Leftover time is dropped; the follow-up starts fresh
                    self.play_from_start(next);
                    return;
                } else {
                    // Stay on last frame
                    self.current_frame = frame_count - 1;
                    self.playing = false;
                    return;
                }
            }
        }
    }

    /// The active animator state
    pub fn current(&self) -> AnimationId {
        self.current
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if a one-shot clip without follow-up has finished
    pub fn is_finished(&self) -> bool {
        match self.clips.get(&self.current) {
            Some(clip) => !clip.looping && !self.playing,
            None => true,
        }
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.clips.get(&self.current)
    }
}

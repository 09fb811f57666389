use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MotionLevel {
    Full,
    Reduced,
    None,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransitionPreset {
    None,
    Fade,
    SlideInRight,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MotionTransition {
    pub preset: TransitionPreset,
    pub duration_ms: u16,
    pub easing: Easing,
}

impl Default for MotionTransition {
    fn default() -> Self {
        Self {
            preset: TransitionPreset::SlideInRight,
            duration_ms: 300,
            easing: Easing::EaseOut,
        }
    }
}

impl MotionTransition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(mut self, preset: TransitionPreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u16) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Enter and exit transitions of a notification. The exit plays the enter
/// slide in reverse.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MotionConfig {
    pub level: MotionLevel,
    pub enter: MotionTransition,
    pub exit: MotionTransition,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            level: MotionLevel::Full,
            enter: MotionTransition::default(),
            exit: MotionTransition::new().easing(Easing::EaseIn),
        }
    }
}

impl MotionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: MotionLevel) -> Self {
        self.level = level;
        self
    }

    pub fn enter(mut self, enter: MotionTransition) -> Self {
        self.enter = enter;
        self
    }

    pub fn exit(mut self, exit: MotionTransition) -> Self {
        self.exit = exit;
        self
    }

    /// How long an element lingers in its leaving phase before removal.
    /// Only full motion plays an exit transition.
    pub fn exit_duration(&self) -> Duration {
        match (self.level, self.exit.preset) {
            (MotionLevel::Full, TransitionPreset::None) => Duration::ZERO,
            (MotionLevel::Full, _) => Duration::from_millis(u64::from(self.exit.duration_ms)),
            (MotionLevel::Reduced | MotionLevel::None, _) => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_duration_follows_motion_level() {
        let full = MotionConfig::default();
        assert_eq!(full.exit_duration(), Duration::from_millis(300));
        assert_eq!(
            full.level(MotionLevel::Reduced).exit_duration(),
            Duration::ZERO
        );
        assert_eq!(full.level(MotionLevel::None).exit_duration(), Duration::ZERO);
        assert_eq!(
            full.exit(MotionTransition::new().preset(TransitionPreset::None))
                .exit_duration(),
            Duration::ZERO
        );
    }
}

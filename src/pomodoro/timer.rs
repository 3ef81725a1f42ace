//! Pomodoro countdown

pub const MIN_MINUTES: u32 = 10;
pub const MAX_MINUTES: u32 = 60;
pub const DEFAULT_MINUTES: u32 = 25;

/// Clamp a stored or slider duration into the allowed range
pub fn clamp_duration_minutes(minutes: i64) -> u32 {
    minutes.clamp(i64::from(MIN_MINUTES), i64::from(MAX_MINUTES)) as u32
}

pub fn seconds_to_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn can_reset_timer(running: bool, remaining: u32, total: u32) -> bool {
    !running && (remaining < total || remaining == 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TomatoSprite {
    Neutral,
    Ticking(usize),
    Vibrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoxIcon {
    Empty,
    HalfTop,
    HalfBottom,
}

impl FoxIcon {
    pub fn key(self) -> &'static str {
        match self {
            FoxIcon::Empty => "empty",
            FoxIcon::HalfTop => "half_top",
            FoxIcon::HalfBottom => "half_bottom",
        }
    }
}

/// What a one second tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Ticked,
    Completed,
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    duration_minutes: u32,
    total_seconds: u32,
    remaining_seconds: u32,
    running: bool,
    paused: bool,
    done: bool,
    tomato: TomatoSprite,
    fox_icon: FoxIcon,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}

impl PomodoroTimer {
    pub fn new(minutes: u32) -> Self {
        let minutes = clamp_duration_minutes(i64::from(minutes));
        Self {
            duration_minutes: minutes,
            total_seconds: minutes * 60,
            remaining_seconds: minutes * 60,
            running: false,
            paused: false,
            done: false,
            tomato: TomatoSprite::Neutral,
            fox_icon: FoxIcon::Empty,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn tomato(&self) -> TomatoSprite {
        self.tomato
    }

    pub fn fox_icon(&self) -> FoxIcon {
        self.fox_icon
    }

    pub fn display_text(&self) -> String {
        if self.done {
            "DONE!".to_string()
        } else {
            seconds_to_clock(self.remaining_seconds)
        }
    }

    pub fn start_label(&self) -> &'static str {
        if self.running {
            "Pause"
        } else if self.paused {
            "Resume"
        } else {
            "Start"
        }
    }

    /// The duration slider is locked once a round has begun
    pub fn slider_enabled(&self) -> bool {
        !self.running && !self.paused
    }

    pub fn can_reset(&self) -> bool {
        can_reset_timer(self.running, self.remaining_seconds, self.total_seconds)
    }

    /// Start, pause or resume. Callers silence the alert afterwards.
    pub fn toggle(&mut self) {
        if self.running {
            self.running = false;
            self.paused = true;
            self.tomato = TomatoSprite::Neutral;
            self.fox_icon = FoxIcon::Empty;
            tracing::debug!("Pomodoro paused at {}s", self.remaining_seconds);
            return;
        }

        if self.remaining_seconds == 0 || self.remaining_seconds > 60 * 60 {
            let minutes = clamp_duration_minutes(i64::from(self.total_seconds / 60));
            self.remaining_seconds = minutes * 60;
            self.total_seconds = self.remaining_seconds;
        }
        self.running = true;
        self.paused = false;
        self.done = false;
        self.tomato = TomatoSprite::Ticking(0);
        self.fox_icon = FoxIcon::HalfTop;
        tracing::info!("Pomodoro started, {}s to go", self.remaining_seconds);
    }

    /// Back to a full, stopped round. Callers silence the alert afterwards.
    pub fn reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.done = false;
        self.total_seconds = self.duration_minutes * 60;
        self.remaining_seconds = self.total_seconds;
        self.tomato = TomatoSprite::Neutral;
        self.fox_icon = FoxIcon::Empty;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.complete();
            return TickOutcome::Completed;
        }

        let frame = match self.tomato {
            TomatoSprite::Ticking(i) => i ^ 1,
            _ => 0,
        };
        self.tomato = TomatoSprite::Ticking(frame);
        self.fox_icon = if self.fox_icon == FoxIcon::HalfTop {
            FoxIcon::HalfBottom
        } else {
            FoxIcon::HalfTop
        };
        TickOutcome::Ticked
    }

    fn complete(&mut self) {
        self.running = false;
        self.paused = false;
        self.done = true;
        self.tomato = TomatoSprite::Vibrate;
        self.fox_icon = FoxIcon::Empty;
        tracing::info!("Pomodoro complete");
    }

    /// Slider moved. Ignored while a round is running.
    pub fn set_duration(&mut self, minutes: i64) {
        if self.running {
            return;
        }
        self.duration_minutes = clamp_duration_minutes(minutes);
        self.total_seconds = self.duration_minutes * 60;
        self.remaining_seconds = self.total_seconds;
        self.done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_duration() {
        assert_eq!(clamp_duration_minutes(0), 10);
        assert_eq!(clamp_duration_minutes(-5), 10);
        assert_eq!(clamp_duration_minutes(25), 25);
        assert_eq!(clamp_duration_minutes(90), 60);
    }

    #[test]
    fn test_can_reset_rules() {
        assert!(!can_reset_timer(false, 1500, 1500));
        assert!(can_reset_timer(false, 1000, 1500));
        assert!(!can_reset_timer(true, 1000, 1500));
        assert!(can_reset_timer(false, 0, 0));
    }

    #[test]
    fn test_fresh_timer() {
        let timer = PomodoroTimer::default();
        assert_eq!(timer.display_text(), "25:00");
        assert_eq!(timer.start_label(), "Start");
        assert!(!timer.can_reset());
        assert_eq!(timer.tomato(), TomatoSprite::Neutral);
        assert_eq!(timer.fox_icon(), FoxIcon::Empty);
    }

    #[test]
    fn test_tick_animates_and_counts_down() {
        let mut timer = PomodoroTimer::new(10);
        assert_eq!(timer.tick(), TickOutcome::Idle);

        timer.toggle();
        assert_eq!(timer.start_label(), "Pause");
        assert_eq!(timer.fox_icon(), FoxIcon::HalfTop);

        assert_eq!(timer.tick(), TickOutcome::Ticked);
        assert_eq!(timer.display_text(), "09:59");
        assert_eq!(timer.tomato(), TomatoSprite::Ticking(1));
        assert_eq!(timer.fox_icon(), FoxIcon::HalfBottom);

        timer.tick();
        assert_eq!(timer.tomato(), TomatoSprite::Ticking(0));
        assert_eq!(timer.fox_icon(), FoxIcon::HalfTop);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = PomodoroTimer::new(10);
        timer.toggle();
        timer.tick();
        timer.toggle();
        assert_eq!(timer.start_label(), "Resume");
        assert!(timer.can_reset());
        assert!(!timer.slider_enabled());
        assert_eq!(timer.tick(), TickOutcome::Idle);

        timer.toggle();
        assert_eq!(timer.remaining_seconds(), 599);
    }

    #[test]
    fn test_completion() {
        let mut timer = PomodoroTimer::new(10);
        timer.toggle();
        let mut outcome = TickOutcome::Idle;
        for _ in 0..600 {
            outcome = timer.tick();
        }
        assert_eq!(outcome, TickOutcome::Completed);
        assert_eq!(timer.display_text(), "DONE!");
        assert_eq!(timer.tomato(), TomatoSprite::Vibrate);
        assert_eq!(timer.fox_icon(), FoxIcon::Empty);
        assert_eq!(timer.start_label(), "Start");
        assert!(timer.can_reset());

        // Starting again re-arms a full round
        timer.toggle();
        assert_eq!(timer.remaining_seconds(), 600);
    }

    #[test]
    fn test_set_duration_ignored_while_running() {
        let mut timer = PomodoroTimer::new(25);
        timer.toggle();
        timer.set_duration(40);
        assert_eq!(timer.duration_minutes(), 25);

        timer.reset();
        timer.set_duration(40);
        assert_eq!(timer.display_text(), "40:00");
        timer.set_duration(3);
        assert_eq!(timer.duration_minutes(), 10);
    }

    #[test]
    fn test_reset_restores_duration() {
        let mut timer = PomodoroTimer::new(15);
        timer.toggle();
        timer.tick();
        timer.reset();
        assert_eq!(timer.display_text(), "15:00");
        assert_eq!(timer.start_label(), "Start");
        assert!(!timer.can_reset());
    }
}

//! Pet behaviour state machine
//!
//! The fox is driven by a handful of timers: a frame animation timer, a
//! once-a-second walk decision timer, a long state change timer (walk <-> sleep)
//! and a single pending continuation for short chained transitions. All of them
//! live here as plain deadlines on a millisecond clock, so the UI only has to
//! call [`PetBrain::advance`] with the current time and render the result.

use crate::pet::onboarding;
use crate::system::screen::ScreenArea;
use rand::seq::SliceRandom;
use rand::Rng;

/// Milliseconds on the caller's monotonic clock
pub type Millis = u64;

pub const WALK_SPEED: i32 = 2;
const ANIMATION_FRAMES: usize = 2;
const WALK_FRAME_MS: Millis = 150;
const SLOW_FRAME_MS: Millis = 300;
const WALK_LOGIC_MS: Millis = 1000;
const FLOOR_GAP: i32 = 10;
const INITIAL_RIGHT_GAP: i32 = 80;
const RESET_RIGHT_GAP: i32 = 50;
const MAX_WALK_STRETCH: u32 = 15;
/// A gap this large between two `advance` calls means the machine was asleep
const STALL_MS: Millis = 10_000;

const GREETING_TO_QUESTION_MS: Millis = 1200;
const QUESTION_TO_RATING_MS: Millis = 2000;
const RESPONSE_TO_LIFECYCLE_MS: Millis = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetState {
    Intro,
    Walking,
    Pausing,
    Turning,
    Wondering,
    Wagging,
    IdlingBeforeSleep,
    Sleeping,
    WakingUp,
    Shock,
    PostTrauma,
    Recovering,
}

/// Which image the pet window should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetSprite {
    Idle(usize),
    WalkLeft(usize),
    WalkRight(usize),
    PostureLeft,
    PostureRight,
    ShockLeft,
    ShockRight,
    PostTraumaLeft(usize),
    PostTraumaRight(usize),
    Sleep,
}

/// Side effects the UI has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetEffect {
    ShowBubble { text: String, word_wrap: bool },
    HideBubble,
    RequestRating { question: String },
    LifecycleStarted,
}

/// What a walk decision tick asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    Wag,
    Pause,
    Wonder,
    Turn,
}

/// Pick the next walk action from a uniform draw in `[0, 1)`.
pub fn walk_decision(r: f64, walked_for: u32) -> Option<WalkAction> {
    if r < 0.04 {
        Some(WalkAction::Wag)
    } else if r < 0.09 {
        Some(WalkAction::Pause)
    } else if r < 0.14 {
        Some(WalkAction::Wonder)
    } else if r < 0.22 || walked_for > MAX_WALK_STRETCH {
        Some(WalkAction::Turn)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeating {
    period: Millis,
    next_due: Millis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Continuation {
    AskQuestion,
    OpenRating(String),
    StartLifecycle,
    EnterSleeping,
    EnterWalking,
    ResumeWalking,
    CompleteTurn,
    WonderStep,
    Recover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    Animation,
    WalkLogic,
    StateChange,
    Pending,
}

pub struct PetBrain {
    state: PetState,
    direction: Direction,
    frame_index: usize,
    x: i32,
    y: i32,
    size: (i32, i32),
    area: ScreenArea,
    walk_direction_duration: u32,
    wonder_count: u32,
    turn_target: Direction,
    dragging: bool,
    awaiting_rating: bool,
    animation: Option<Repeating>,
    walk_logic: Option<Repeating>,
    state_change: Option<Millis>,
    pending: Option<(Millis, Continuation)>,
    now: Millis,
    effects: Vec<PetEffect>,
}

impl PetBrain {
    pub fn new(size: (u32, u32), area: ScreenArea, rng: &mut impl Rng) -> Self {
        let size = (size.0 as i32, size.1 as i32);
        let mut brain = Self {
            state: PetState::Intro,
            direction: Direction::random(rng),
            frame_index: 0,
            x: area.width - size.0 - INITIAL_RIGHT_GAP,
            y: 0,
            size,
            area,
            walk_direction_duration: 0,
            wonder_count: 0,
            turn_target: Direction::Right,
            dragging: false,
            awaiting_rating: false,
            animation: None,
            walk_logic: None,
            state_change: None,
            pending: None,
            now: 0,
            effects: Vec::new(),
        };
        brain.update_position();
        brain
    }

    pub fn state(&self) -> PetState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_awaiting_rating(&self) -> bool {
        self.awaiting_rating
    }

    pub fn size(&self) -> (i32, i32) {
        self.size
    }

    /// Absolute top-left corner of the pet window
    pub fn position(&self) -> (i32, i32) {
        (self.area.x + self.x, self.area.y + self.y)
    }

    pub fn sprite(&self) -> PetSprite {
        let right = self.direction == Direction::Right;
        let posture = if right {
            PetSprite::PostureRight
        } else {
            PetSprite::PostureLeft
        };

        match self.state {
            PetState::Intro | PetState::Wagging => PetSprite::Idle(self.frame_index),
            PetState::Walking => {
                if right {
                    PetSprite::WalkRight(self.frame_index)
                } else {
                    PetSprite::WalkLeft(self.frame_index)
                }
            }
            PetState::Sleeping => PetSprite::Sleep,
            PetState::Shock => {
                if right {
                    PetSprite::ShockRight
                } else {
                    PetSprite::ShockLeft
                }
            }
            PetState::PostTrauma => {
                if right {
                    PetSprite::PostTraumaRight(self.frame_index)
                } else {
                    PetSprite::PostTraumaLeft(self.frame_index)
                }
            }
            PetState::Pausing
            | PetState::Turning
            | PetState::Wondering
            | PetState::IdlingBeforeSleep
            | PetState::WakingUp
            | PetState::Recovering => posture,
        }
    }

    /// Earliest instant at which `advance` has work to do
    pub fn next_wakeup(&self) -> Option<Millis> {
        self.next_due().map(|(at, _)| at)
    }

    /// Begin the greeting / question / rating sequence.
    pub fn start(&mut self, now: Millis, hour: u32) -> Vec<PetEffect> {
        self.now = now;
        self.state = PetState::Intro;
        self.frame_index = 0;
        self.animation = Some(Repeating {
            period: SLOW_FRAME_MS,
            next_due: now + SLOW_FRAME_MS,
        });
        self.show_bubble(onboarding::greeting_for_hour(hour), true);
        self.pending = Some((now + GREETING_TO_QUESTION_MS, Continuation::AskQuestion));
        self.take_effects()
    }

    /// Fire every timer that has come due by `now`, in order.
    pub fn advance(&mut self, now: Millis, rng: &mut impl Rng) -> Vec<PetEffect> {
        if now > self.now + STALL_MS {
            self.shift_deadlines(now - self.now);
        }

        while let Some((at, due)) = self.next_due() {
            if at > now {
                break;
            }
            self.now = self.now.max(at);
            match due {
                Due::Animation => {
                    if let Some(timer) = self.animation.as_mut() {
                        timer.next_due = at + timer.period;
                    }
                    self.on_animation_frame(rng);
                }
                Due::WalkLogic => {
                    if let Some(timer) = self.walk_logic.as_mut() {
                        timer.next_due = at + timer.period;
                    }
                    self.on_walk_logic(rng);
                }
                Due::StateChange => {
                    self.state_change = None;
                    self.switch_state(rng);
                }
                Due::Pending => {
                    if let Some((_, step)) = self.pending.take() {
                        self.run_continuation(step, rng);
                    }
                }
            }
        }

        self.now = self.now.max(now);
        self.take_effects()
    }

    /// Answer from the rating dialog; `None` means it was dismissed.
    pub fn rated(&mut self, rating: Option<u8>, now: Millis, rng: &mut impl Rng) -> Vec<PetEffect> {
        if !self.awaiting_rating {
            tracing::debug!("Ignoring rating {:?}, none was requested", rating);
            return Vec::new();
        }
        self.awaiting_rating = false;
        self.now = self.now.max(now);

        match rating {
            Some(value) => {
                let responses = onboarding::responses_for(value);
                let text = responses.choose(rng).copied().unwrap_or_default();
                self.show_bubble(text, true);
                self.pending = Some((
                    self.now + RESPONSE_TO_LIFECYCLE_MS,
                    Continuation::StartLifecycle,
                ));
            }
            None => self.start_main_lifecycle(rng),
        }
        self.take_effects()
    }

    /// Mouse pressed on the pet. Returns whether a drag started.
    pub fn grab(&mut self, now: Millis) -> bool {
        if self.state == PetState::Intro || self.dragging {
            return false;
        }
        self.now = self.now.max(now);
        self.dragging = true;
        self.state_change = None;
        self.walk_logic = None;
        self.animation = None;
        self.pending = None;
        self.state = PetState::Shock;
        tracing::debug!("Pet grabbed");
        true
    }

    /// Mouse released after a drag; `x` is where the window was dropped.
    pub fn release(&mut self, now: Millis, x: i32, rng: &mut impl Rng) {
        if !self.dragging {
            return;
        }
        self.now = self.now.max(now);
        self.dragging = false;
        self.x = x - self.area.x;
        self.y = self.floor();
        self.state = PetState::PostTrauma;
        self.frame_index = 0;
        self.start_animation(SLOW_FRAME_MS);
        self.schedule(rng.gen_range(2000..=3000), Continuation::Recover);
    }

    /// The monitor layout changed.
    pub fn update_area(&mut self, area: ScreenArea) {
        if area != self.area {
            tracing::info!("Screen area changed to {:?}", area);
            self.area = area;
            self.update_position();
        }
    }

    fn floor(&self) -> i32 {
        self.area.height - self.size.1 - FLOOR_GAP
    }

    fn right_edge(&self) -> i32 {
        self.area.width - self.size.0
    }

    fn update_position(&mut self) {
        if !(0..=self.right_edge()).contains(&self.x) {
            self.x = self.area.width - self.size.0 - RESET_RIGHT_GAP;
        }
        self.y = self.floor();
    }

    fn shift_deadlines(&mut self, gap: Millis) {
        tracing::debug!("Clock jumped by {}ms, shifting pet timers", gap);
        if let Some(timer) = self.animation.as_mut() {
            timer.next_due += gap;
        }
        if let Some(timer) = self.walk_logic.as_mut() {
            timer.next_due += gap;
        }
        if let Some(at) = self.state_change.as_mut() {
            *at += gap;
        }
        if let Some((at, _)) = self.pending.as_mut() {
            *at += gap;
        }
        self.now += gap;
    }

    fn next_due(&self) -> Option<(Millis, Due)> {
        let mut candidates: Vec<(Millis, Due)> = Vec::with_capacity(4);
        if let Some(timer) = self.animation {
            candidates.push((timer.next_due, Due::Animation));
        }
        if let Some(timer) = self.walk_logic {
            candidates.push((timer.next_due, Due::WalkLogic));
        }
        // A sleep/wake switch only applies to a walking or sleeping fox; in any
        // other state it waits until walking resumes.
        if let Some(at) = self.state_change {
            if matches!(self.state, PetState::Walking | PetState::Sleeping) {
                candidates.push((at.max(self.now), Due::StateChange));
            }
        }
        if let Some((at, _)) = &self.pending {
            candidates.push((*at, Due::Pending));
        }
        candidates.into_iter().min_by_key(|(at, _)| *at)
    }

    fn take_effects(&mut self) -> Vec<PetEffect> {
        std::mem::take(&mut self.effects)
    }

    fn show_bubble(&mut self, text: &str, word_wrap: bool) {
        self.effects.push(PetEffect::ShowBubble {
            text: text.to_string(),
            word_wrap,
        });
    }

    fn schedule(&mut self, delay: Millis, step: Continuation) {
        self.pending = Some((self.now + delay, step));
    }

    fn start_animation(&mut self, period: Millis) {
        self.animation = Some(Repeating {
            period,
            next_due: self.now + period,
        });
    }

    fn start_walk_logic(&mut self) {
        self.walk_logic = Some(Repeating {
            period: WALK_LOGIC_MS,
            next_due: self.now + WALK_LOGIC_MS,
        });
    }

    fn stop_walking_timers(&mut self) {
        self.walk_logic = None;
        self.animation = None;
    }

    fn advance_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % ANIMATION_FRAMES;
    }

    fn on_animation_frame(&mut self, rng: &mut impl Rng) {
        if self.dragging {
            return;
        }
        match self.state {
            PetState::Walking => {
                if self.x >= self.right_edge() && self.direction == Direction::Right {
                    self.initiate_turn(Some(Direction::Left), rng);
                    return;
                }
                if self.x <= 0 && self.direction == Direction::Left {
                    self.initiate_turn(Some(Direction::Right), rng);
                    return;
                }
                self.x += WALK_SPEED * self.direction.sign();
                self.advance_frame();
            }
            PetState::PostTrauma | PetState::Intro | PetState::Wagging => self.advance_frame(),
            _ => {}
        }
    }

    fn on_walk_logic(&mut self, rng: &mut impl Rng) {
        if self.state != PetState::Walking {
            return;
        }
        self.walk_direction_duration += 1;
        let r: f64 = rng.gen();
        match walk_decision(r, self.walk_direction_duration) {
            Some(WalkAction::Wag) => self.initiate_wagging(rng),
            Some(WalkAction::Pause) => self.initiate_pause(rng),
            Some(WalkAction::Wonder) => self.initiate_wondering(rng),
            Some(WalkAction::Turn) => self.initiate_turn(None, rng),
            None => {}
        }
    }

    fn switch_state(&mut self, rng: &mut impl Rng) {
        match self.state {
            PetState::Walking => {
                self.state = PetState::IdlingBeforeSleep;
                self.stop_walking_timers();
                self.schedule(rng.gen_range(700..=1200), Continuation::EnterSleeping);
            }
            PetState::Sleeping => {
                self.state = PetState::WakingUp;
                self.schedule(rng.gen_range(700..=1200), Continuation::EnterWalking);
            }
            _ => {}
        }
    }

    fn run_continuation(&mut self, step: Continuation, rng: &mut impl Rng) {
        match step {
            Continuation::AskQuestion => {
                let question = onboarding::QUESTIONS
                    .choose(rng)
                    .copied()
                    .unwrap_or(onboarding::QUESTIONS[0]);
                self.show_bubble(question, false);
                self.schedule(
                    QUESTION_TO_RATING_MS,
                    Continuation::OpenRating(question.to_string()),
                );
            }
            Continuation::OpenRating(question) => {
                self.effects.push(PetEffect::HideBubble);
                self.effects.push(PetEffect::RequestRating { question });
                self.awaiting_rating = true;
            }
            Continuation::StartLifecycle => self.start_main_lifecycle(rng),
            Continuation::EnterSleeping => self.enter_sleeping(rng),
            Continuation::EnterWalking => self.enter_walking(rng),
            Continuation::ResumeWalking => self.resume_walking(),
            Continuation::CompleteTurn => {
                self.direction = self.turn_target;
                self.schedule(rng.gen_range(300..=500), Continuation::ResumeWalking);
            }
            Continuation::WonderStep => self.perform_wonder_step(rng),
            Continuation::Recover => {
                self.state = PetState::Recovering;
                self.animation = None;
                self.schedule(rng.gen_range(500..=1000), Continuation::StartLifecycle);
            }
        }
    }

    fn start_main_lifecycle(&mut self, rng: &mut impl Rng) {
        self.effects.push(PetEffect::HideBubble);
        self.effects.push(PetEffect::LifecycleStarted);
        self.enter_walking(rng);
    }

    fn enter_walking(&mut self, rng: &mut impl Rng) {
        self.state = PetState::Walking;
        self.start_animation(WALK_FRAME_MS);
        self.state_change = Some(self.now + rng.gen_range(30..=40) * 1000);
        self.walk_direction_duration = 0;
        self.start_walk_logic();
    }

    fn enter_sleeping(&mut self, rng: &mut impl Rng) {
        self.state = PetState::Sleeping;
        self.animation = None;
        self.state_change = Some(self.now + rng.gen_range(10..=20) * 1000);
    }

    fn resume_walking(&mut self) {
        self.state = PetState::Walking;
        self.start_animation(WALK_FRAME_MS);
        self.walk_direction_duration = 0;
        self.start_walk_logic();
    }

    fn initiate_pause(&mut self, rng: &mut impl Rng) {
        if self.state != PetState::Walking {
            return;
        }
        self.state = PetState::Pausing;
        self.stop_walking_timers();
        self.schedule(rng.gen_range(1500..=3000), Continuation::ResumeWalking);
    }

    fn initiate_turn(&mut self, target: Option<Direction>, rng: &mut impl Rng) {
        if self.state != PetState::Walking {
            return;
        }
        self.state = PetState::Turning;
        self.stop_walking_timers();
        self.turn_target = target.unwrap_or_else(|| self.direction.flipped());
        self.schedule(rng.gen_range(300..=500), Continuation::CompleteTurn);
    }

    fn initiate_wondering(&mut self, rng: &mut impl Rng) {
        if self.state != PetState::Walking {
            return;
        }
        self.state = PetState::Wondering;
        self.stop_walking_timers();
        self.wonder_count = rng.gen_range(1..=3);
        self.perform_wonder_step(rng);
    }

    fn perform_wonder_step(&mut self, rng: &mut impl Rng) {
        self.wonder_count = self.wonder_count.saturating_sub(1);
        self.direction = self.direction.flipped();
        if self.wonder_count > 0 {
            self.schedule(rng.gen_range(600..=1000), Continuation::WonderStep);
        } else {
            self.schedule(rng.gen_range(500..=800), Continuation::ResumeWalking);
        }
    }

    fn initiate_wagging(&mut self, rng: &mut impl Rng) {
        if self.state != PetState::Walking {
            return;
        }
        self.state = PetState::Wagging;
        self.walk_logic = None;
        self.start_animation(SLOW_FRAME_MS);
        self.schedule(rng.gen_range(1500..=3000), Continuation::ResumeWalking);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const AREA: ScreenArea = ScreenArea {
        x: 0,
        y: 0,
        width: 1920,
        height: 1040,
    };

    fn brain() -> (PetBrain, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let brain = PetBrain::new((100, 80), AREA, &mut rng);
        (brain, rng)
    }

    /// Step the clock in small increments like the UI loop does.
    fn run(brain: &mut PetBrain, rng: &mut StdRng, from: Millis, to: Millis) -> Vec<PetEffect> {
        let mut effects = Vec::new();
        let mut t = from;
        while t < to {
            t = (t + 10).min(to);
            effects.extend(brain.advance(t, rng));
        }
        effects
    }

    /// Run the intro and dismiss the rating so the fox is walking at `now`.
    fn walking_brain() -> (PetBrain, StdRng, Millis) {
        let (mut brain, mut rng) = brain();
        brain.start(0, 10);
        run(&mut brain, &mut rng, 0, 3200);
        brain.rated(None, 3200, &mut rng);
        (brain, rng, 3200)
    }

    #[test]
    fn test_initial_position() {
        let (brain, _) = brain();
        assert_eq!(brain.position(), (1920 - 100 - 80, 1040 - 80 - 10));
        assert_eq!(brain.state(), PetState::Intro);
    }

    #[test]
    fn test_intro_sequence() {
        let (mut brain, mut rng) = brain();
        let effects = brain.start(0, 9);
        assert_eq!(
            effects,
            vec![PetEffect::ShowBubble {
                text: "Good morning!".to_string(),
                word_wrap: true
            }]
        );

        assert!(run(&mut brain, &mut rng, 0, 1190).is_empty());

        let effects = run(&mut brain, &mut rng, 1190, 1200);
        match &effects[..] {
            [PetEffect::ShowBubble { text, word_wrap: false }] => {
                assert!(onboarding::QUESTIONS.contains(&text.as_str()));
            }
            other => panic!("unexpected effects {:?}", other),
        }

        let effects = run(&mut brain, &mut rng, 1200, 3200);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], PetEffect::HideBubble);
        assert!(matches!(effects[1], PetEffect::RequestRating { .. }));
        assert!(brain.is_awaiting_rating());
        assert_eq!(brain.state(), PetState::Intro);
    }

    #[test]
    fn test_grab_ignored_during_intro() {
        let (mut brain, _) = brain();
        brain.start(0, 20);
        assert!(!brain.grab(10));
        assert_eq!(brain.state(), PetState::Intro);
    }

    #[test]
    fn test_rating_response_then_lifecycle() {
        let (mut brain, mut rng) = brain();
        brain.start(0, 15);
        run(&mut brain, &mut rng, 0, 3200);

        let effects = brain.rated(Some(5), 3200, &mut rng);
        match &effects[..] {
            [PetEffect::ShowBubble { text, .. }] => {
                assert!(onboarding::responses_for(5).contains(&text.as_str()));
            }
            other => panic!("unexpected effects {:?}", other),
        }

        let effects = run(&mut brain, &mut rng, 3200, 6200);
        assert!(effects.contains(&PetEffect::LifecycleStarted));
        assert_eq!(brain.state(), PetState::Walking);
    }

    #[test]
    fn test_dismissed_rating_starts_lifecycle_at_once() {
        let (mut brain, mut rng) = brain();
        brain.start(0, 22);
        run(&mut brain, &mut rng, 0, 3200);

        let effects = brain.rated(None, 3200, &mut rng);
        assert_eq!(effects, vec![PetEffect::HideBubble, PetEffect::LifecycleStarted]);
        assert_eq!(brain.state(), PetState::Walking);

        // A second answer is not expected any more
        assert!(brain.rated(Some(3), 3300, &mut rng).is_empty());
    }

    #[test]
    fn test_walking_moves_two_pixels_per_frame() {
        let (mut brain, mut rng, now) = walking_brain();
        let (x0, _) = brain.position();
        brain.advance(now + WALK_FRAME_MS, &mut rng);
        let (x1, _) = brain.position();
        assert_eq!(x1 - x0, WALK_SPEED * brain.direction().sign());
    }

    #[test]
    fn test_turns_at_right_edge() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.x = brain.right_edge();
        brain.direction = Direction::Right;

        brain.advance(now + WALK_FRAME_MS, &mut rng);
        assert_eq!(brain.state(), PetState::Turning);
        assert_eq!(brain.sprite(), PetSprite::PostureRight);

        run(&mut brain, &mut rng, now + WALK_FRAME_MS, now + WALK_FRAME_MS + 500);
        assert_eq!(brain.direction(), Direction::Left);

        run(&mut brain, &mut rng, now + WALK_FRAME_MS + 500, now + WALK_FRAME_MS + 1000);
        assert_eq!(brain.state(), PetState::Walking);
    }

    #[test]
    fn test_turns_at_left_edge() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.x = 0;
        brain.direction = Direction::Left;

        brain.advance(now + WALK_FRAME_MS, &mut rng);
        assert_eq!(brain.state(), PetState::Turning);
        assert_eq!(brain.turn_target, Direction::Right);
    }

    #[test]
    fn test_grab_cancels_every_timer() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.initiate_pause(&mut rng);
        assert_eq!(brain.state(), PetState::Pausing);

        assert!(brain.grab(now));
        assert_eq!(brain.state(), PetState::Shock);
        assert!(brain.next_wakeup().is_none());
        assert!(matches!(brain.sprite(), PetSprite::ShockLeft | PetSprite::ShockRight));

        // Nothing resumes the walk behind the user's back
        run(&mut brain, &mut rng, now, now + 5000);
        assert_eq!(brain.state(), PetState::Shock);
    }

    #[test]
    fn test_release_trauma_and_recovery() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.grab(now);
        brain.release(now + 100, 300, &mut rng);

        assert_eq!(brain.state(), PetState::PostTrauma);
        assert_eq!(brain.position(), (300, 1040 - 80 - 10));

        run(&mut brain, &mut rng, now + 100, now + 3100);
        assert_eq!(brain.state(), PetState::Recovering);

        let effects = run(&mut brain, &mut rng, now + 3100, now + 4100);
        assert!(effects.contains(&PetEffect::LifecycleStarted));
        assert_eq!(brain.state(), PetState::Walking);
    }

    #[test]
    fn test_release_without_grab_is_ignored() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.release(now, 10, &mut rng);
        assert_eq!(brain.state(), PetState::Walking);
    }

    #[test]
    fn test_sleep_cycle() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.state_change = Some(now + 1);

        brain.advance(now + 20, &mut rng);
        assert_eq!(brain.state(), PetState::IdlingBeforeSleep);

        run(&mut brain, &mut rng, now + 20, now + 1300);
        assert_eq!(brain.state(), PetState::Sleeping);
        assert_eq!(brain.sprite(), PetSprite::Sleep);

        run(&mut brain, &mut rng, now + 1300, now + 22_600);
        assert_ne!(brain.state(), PetState::Sleeping);
    }

    #[test]
    fn test_sleep_waits_for_walk_to_resume() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.state_change = Some(now + 50);
        brain.initiate_pause(&mut rng);

        let mut seen = vec![brain.state()];
        let mut t = now;
        while t < now + 3500 {
            t += 10;
            brain.advance(t, &mut rng);
            if seen.last() != Some(&brain.state()) {
                seen.push(brain.state());
            }
        }

        assert_eq!(seen[0], PetState::Pausing);
        assert_eq!(seen[1], PetState::IdlingBeforeSleep);
    }

    #[test]
    fn test_wondering_flips_direction_per_step() {
        let (mut brain, mut rng, now) = walking_brain();
        let before = brain.direction();
        brain.initiate_wondering(&mut rng);
        let flips = brain.wonder_count + 1;

        let mut t = now;
        while brain.state() != PetState::Walking && t < now + 4000 {
            t += 10;
            brain.advance(t, &mut rng);
        }
        assert_eq!(brain.state(), PetState::Walking);
        let expected = if flips % 2 == 1 { before.flipped() } else { before };
        assert_eq!(brain.direction(), expected);
    }

    #[test]
    fn test_wagging_animates_idle_frames() {
        let (mut brain, mut rng, now) = walking_brain();
        brain.initiate_wagging(&mut rng);
        assert_eq!(brain.state(), PetState::Wagging);
        assert!(brain.walk_logic.is_none());
        brain.advance(now + SLOW_FRAME_MS, &mut rng);
        assert!(matches!(brain.sprite(), PetSprite::Idle(_)));
    }

    #[test]
    fn test_walk_decision_thresholds() {
        assert_eq!(walk_decision(0.0, 0), Some(WalkAction::Wag));
        assert_eq!(walk_decision(0.05, 0), Some(WalkAction::Pause));
        assert_eq!(walk_decision(0.10, 0), Some(WalkAction::Wonder));
        assert_eq!(walk_decision(0.20, 0), Some(WalkAction::Turn));
        assert_eq!(walk_decision(0.50, 3), None);
        assert_eq!(walk_decision(0.50, 16), Some(WalkAction::Turn));
    }

    #[test]
    fn test_update_area_resets_offscreen_x() {
        let (mut brain, _) = brain();
        brain.x = 5000;
        brain.update_area(ScreenArea {
            x: 0,
            y: 0,
            width: 1280,
            height: 700,
        });
        assert_eq!(brain.position(), (1280 - 100 - 50, 700 - 80 - 10));
    }

    #[test]
    fn test_clock_jump_does_not_replay_timers() {
        let (mut brain, mut rng, now) = walking_brain();
        let before = brain.position();
        brain.advance(now + 60_000, &mut rng);
        assert_eq!(brain.state(), PetState::Walking);
        assert_eq!(brain.position(), before);
    }

    #[test]
    fn test_sprite_follows_direction() {
        let (mut brain, _, _) = walking_brain();
        brain.direction = Direction::Right;
        assert!(matches!(brain.sprite(), PetSprite::WalkRight(_)));
        brain.direction = Direction::Left;
        assert!(matches!(brain.sprite(), PetSprite::WalkLeft(_)));
    }
}

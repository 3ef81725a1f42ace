//! Greeting dialogue shown when the fox first appears

/// Questions asked right after the greeting
pub const QUESTIONS: [&str; 3] = [
    "How's your day going?",
    "How are you doing?",
    "How's your day been?",
];

/// Rating buttons, worst to best
pub const EMOTICONS: [&str; 5] = ["😭", "😞", "😑", "😊", "😁"];

/// Rating selected when the dialog opens
pub const DEFAULT_RATING: u8 = 3;

const RESPONSES_1: &[&str] = &[
    "I know it's hard right now, but keep going!",
    "A bad day doesn't mean a bad life. You've got this!",
    "I'm always here for you!",
    "Take a deep breath, you got this!",
];

const RESPONSES_2: &[&str] = &[
    "Don't worry, you have me by your side.",
    "Let's find something to make you smile!",
    "It may be hard but you've got this!",
];

const RESPONSES_3: &[&str] = &[
    "Let's make the rest of the day a great one!",
    "Keep it up, you're doing well!",
    "Not bad, let's see how we can make it better!",
];

const RESPONSES_4: &[&str] = &[
    "That's great to hear! Let's keep it up.",
    "Awesome! You're doing great.",
    "Let's celebrate your day!",
];

const RESPONSES_5: &[&str] = &[
    "Wow, how amazing! I'm happy for you.",
    "That's fantastic!",
    "Let's celebrate!",
    "I'm so glad to hear that! Keep shining!",
];

/// Canned replies for a 1..=5 rating. Out of range values are clamped.
pub fn responses_for(rating: u8) -> &'static [&'static str] {
    match rating.clamp(1, 5) {
        1 => RESPONSES_1,
        2 => RESPONSES_2,
        3 => RESPONSES_3,
        4 => RESPONSES_4,
        _ => RESPONSES_5,
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning!",
        12..=17 => "Good afternoon!",
        _ => "Good evening!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(4), "Good evening!");
        assert_eq!(greeting_for_hour(5), "Good morning!");
        assert_eq!(greeting_for_hour(11), "Good morning!");
        assert_eq!(greeting_for_hour(12), "Good afternoon!");
        assert_eq!(greeting_for_hour(17), "Good afternoon!");
        assert_eq!(greeting_for_hour(18), "Good evening!");
        assert_eq!(greeting_for_hour(0), "Good evening!");
    }

    #[test]
    fn test_every_rating_has_responses() {
        for rating in 1..=5 {
            let responses = responses_for(rating);
            assert!((3..=4).contains(&responses.len()));
        }
        assert_eq!(responses_for(0), responses_for(1));
        assert_eq!(responses_for(9), responses_for(5));
    }

    #[test]
    fn test_default_rating_is_neutral() {
        assert_eq!(EMOTICONS[(DEFAULT_RATING - 1) as usize], "😑");
    }
}

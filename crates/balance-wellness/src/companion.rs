use std::fmt;

use balance_core::mood::Mood;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Energy below which an unmatched entry is answered as `Tired`.
const LOW_ENERGY_BELOW: u8 = 30;

/// Theme a companion reply is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Stressed,
    Tired,
    Overwhelmed,
    Happy,
    Calm,
    Progress,
    Stuck,
    Default,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stressed => "stressed",
            Category::Tired => "tired",
            Category::Overwhelmed => "overwhelmed",
            Category::Happy => "happy",
            Category::Calm => "calm",
            Category::Progress => "progress",
            Category::Stuck => "stuck",
            Category::Default => "default",
        }
    }

    pub fn messages(&self) -> &'static [&'static str; 4] {
        match self {
            Category::Stressed => &[
                "It sounds like you've been carrying a lot today.",
                "You don't need to solve everything at once.",
                "Sometimes the weight we carry deserves to be set down, even briefly.",
                "Taking a breath between tasks isn't weakness—it's wisdom.",
            ],
            Category::Tired => &[
                "It's okay to rest.",
                "Your body is telling you something important.",
                "Rest isn't giving up. It's recharging.",
                "Even small steps forward still count as progress.",
            ],
            Category::Overwhelmed => &[
                "One thing at a time is enough.",
                "You don't need to have all the answers right now.",
                "Breaking things down into smaller pieces can help.",
                "It's okay to ask for help or to pause.",
            ],
            Category::Happy => &[
                "It's beautiful to see you recognizing these moments.",
                "Hold onto this feeling—you've earned it.",
                "Your joy matters, and so do you.",
                "This lightness you're feeling? That's real progress.",
            ],
            Category::Calm => &[
                "This peaceful moment is worth honoring.",
                "You're finding your center, and that's powerful.",
                "Balance isn't constant, but you're here for it now.",
                "May this calm stay with you through what comes next.",
            ],
            Category::Progress => &[
                "Even small progress matters.",
                "Look how far you've already come.",
                "You're moving forward, even when it feels slow.",
                "Every step, no matter how small, is still a step.",
            ],
            Category::Stuck => &[
                "Being stuck doesn't mean you're failing.",
                "Sometimes pausing helps us see the path forward.",
                "This feeling is temporary, even when it doesn't feel that way.",
                "You've navigated uncertainty before. You can do it again.",
            ],
            Category::Default => &[
                "Thank you for sharing this with me.",
                "Your thoughts and feelings matter.",
                "I'm here with you in this moment.",
                "Whatever you're feeling right now is valid.",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword phrases per category, in matching priority order.
const KEYWORDS: [(Category, &[&str]); 7] = [
    (
        Category::Stressed,
        &["stress", "stressed", "pressure", "anxious", "anxiety", "worried", "worry"],
    ),
    (
        Category::Tired,
        &["tired", "exhausted", "drained", "fatigue", "sleepy", "weary", "worn"],
    ),
    (
        Category::Overwhelmed,
        &["overwhelmed", "too much", "can't handle", "drowning", "swamped", "buried"],
    ),
    (
        Category::Happy,
        &["happy", "joy", "excited", "wonderful", "amazing", "great", "fantastic", "good"],
    ),
    (
        Category::Calm,
        &["calm", "peaceful", "relaxed", "serene", "tranquil", "quiet", "still"],
    ),
    (
        Category::Progress,
        &["progress", "achievement", "accomplished", "finished", "completed", "done"],
    ),
    (
        Category::Stuck,
        &["stuck", "blocked", "lost", "confused", "unsure", "don't know", "uncertain"],
    ),
];

/// Resolve the reply category for a journal entry.
///
/// The category with the most keyword phrases found in the text wins; ties go
/// to the earlier category. Without any match the mood and energy decide.
pub fn classify(text: &str, mood: Mood, energy: u8) -> Category {
    let text = text.to_lowercase();

    let mut best: Option<(Category, usize)> = None;
    for (category, phrases) in KEYWORDS {
        let hits = phrases.iter().filter(|p| text.contains(*p)).count();
        if hits > best.map_or(0, |(_, most)| most) {
            best = Some((category, hits));
        }
    }

    if let Some((category, hits)) = best {
        debug!(%category, hits, "companion keyword match");
        return category;
    }

    if energy < LOW_ENERGY_BELOW {
        Category::Tired
    } else {
        match mood {
            Mood::Stressed => Category::Stressed,
            Mood::Happy => Category::Happy,
            Mood::Calm => Category::Calm,
            Mood::Tired => Category::Default,
        }
    }
}

/// Pick one of the resolved category's messages using `rng`.
pub fn respond<R: Rng + ?Sized>(text: &str, mood: Mood, energy: u8, rng: &mut R) -> &'static str {
    let messages = classify(text, mood, energy).messages();
    messages.choose(rng).copied().unwrap_or(messages[0])
}

/// Companion with its own random source; seed it for reproducible replies.
#[derive(Debug, Clone)]
pub struct Companion {
    rng: StdRng,
}

impl Companion {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reply(&mut self, text: &str, mood: Mood, energy: u8) -> &'static str {
        respond(text, mood, energy, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_count_beats_mood() {
        assert_eq!(
            classify("I feel so stressed and anxious", Mood::Calm, 80),
            Category::Stressed
        );
    }

    #[test]
    fn stressed_reply_comes_from_stressed_messages() {
        let mut rng = StdRng::seed_from_u64(7);
        let reply = respond("I feel so stressed and anxious", Mood::Calm, 80, &mut rng);
        assert!(Category::Stressed.messages().contains(&reply));
    }

    #[test]
    fn empty_text_falls_back_to_mood() {
        assert_eq!(classify("", Mood::Happy, 90), Category::Happy);
        assert_eq!(classify("", Mood::Stressed, 50), Category::Stressed);
        assert_eq!(classify("", Mood::Calm, 50), Category::Calm);
        assert_eq!(classify("", Mood::Tired, 50), Category::Default);
    }

    #[test]
    fn low_energy_wins_over_mood() {
        assert_eq!(classify("", Mood::Happy, 29), Category::Tired);
        assert_eq!(classify("", Mood::Happy, 30), Category::Happy);
    }

    #[test]
    fn ties_go_to_the_earlier_category() {
        // one stressed phrase ("worried"), one happy phrase ("great")
        assert_eq!(classify("Worried but great", Mood::Calm, 50), Category::Stressed);
        // one calm phrase ("quiet"), one stuck phrase ("lost")
        assert_eq!(classify("quiet and lost", Mood::Happy, 50), Category::Calm);
    }

    #[test]
    fn matching_is_case_insensitive_and_phrase_based() {
        assert_eq!(
            classify("There is TOO MUCH on my plate, I'm swamped", Mood::Calm, 50),
            Category::Overwhelmed
        );
        assert_eq!(
            classify("I don't know where to go, totally stuck", Mood::Calm, 50),
            Category::Stuck
        );
    }

    #[test]
    fn seeded_companions_agree() {
        let mut a = Companion::seeded(42);
        let mut b = Companion::seeded(42);
        for text in ["done and finished", "so tired", "", "blocked"] {
            assert_eq!(a.reply(text, Mood::Calm, 50), b.reply(text, Mood::Calm, 50));
        }
    }
}

use rand::seq::SliceRandom;

use crate::journal_entry::JournalEntry;

pub const FALLBACK_PROMPT: &str = "What's on your mind today?";

pub const PROMPTS: [&str; 20] = [
    "What made you smile today?",
    "What's something new you learned this week?",
    "Describe a challenge you overcame recently.",
    "What are you grateful for right now?",
    "What's a goal you're working towards?",
    "Describe your ideal day.",
    "What was the most interesting conversation you had recently?",
    "Write about a small joy in your life.",
    "What's something you've always wanted to try?",
    "Reflect on a mistake and what you learned from it.",
    "What's something you're proud of?",
    "What's your favorite memory from the past year?",
    "What's something that made you laugh recently?",
    "Write about a person who has positively impacted your life.",
    "What are three things you did well today?",
    "What's a place you'd like to visit and why?",
    "Describe something beautiful you saw recently.",
    "What's a skill you'd like to develop?",
    "What advice would you give to your younger self?",
    "What are you looking forward to in the coming months?",
];

pub const MOTIVATION: [&str; 10] = [
    "OMG! Your writing is so tuff!!!",
    "Okayyy Shakespeare, where'd you learn to write like that?",
    "Keep up the amazing work!!!",
    "Your journal entries are so fire 🔥🔥🔥",
    "Your future self will thank you for these words!",
    "\"Fill your paper with the breathings of your heart.\" - LeBron James",
    "You're a true wordsmith! 💯💯💯",
    "You showed up for yourself today - that's what matters!",
    "RAHHHHHHH U DA GOAT!!!",
    "The vibes of your journal entry today are emmaculate 👌",
];

pub fn random_prompt() -> &'static str {
    PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_PROMPT)
}

/// A prompt different from `current`, so "new prompt" always changes it.
pub fn random_prompt_except(current: &str) -> &'static str {
    let others: Vec<&'static str> = PROMPTS.iter().copied().filter(|p| *p != current).collect();
    others
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_PROMPT)
}

pub fn random_motivation() -> &'static str {
    MOTIVATION
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Keep up the amazing work!!!")
}

/// A past entry to revisit in the recap view.
pub fn random_entry(entries: &[JournalEntry]) -> Option<&JournalEntry> {
    entries.choose(&mut rand::thread_rng())
}

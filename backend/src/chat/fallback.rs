use common_types::Emotion;
use rand::seq::SliceRandom;

use super::persona::Persona;

const COMPANION_HAPPY: &[&str] = &[
    "😊 I love hearing that you're feeling good! What's been bringing you joy today?",
    "😊 That's wonderful! Moments like this are worth savouring. Want to tell me more about it?",
    "😊 Your happiness is contagious! What would make today even better?",
];

const COMPANION_SAD: &[&str] = &[
    "💙 I'm really sorry you're feeling this way. It's okay to be sad, and I'm here to listen whenever you want to share.",
    "💙 That sounds really heavy. You don't have to carry it alone. Would you like to talk about what's on your mind?",
    "💙 Sadness can feel overwhelming, but it won't last forever. Be gentle with yourself today.",
];

const COMPANION_ANXIOUS: &[&str] = &[
    "🌿 Let's take a slow breath together. In for four, hold for four, out for four. You're safe right now.",
    "🌿 Anxiety can make everything feel urgent. What's one small thing you can control in this moment?",
    "🌿 I hear you. Try noticing five things you can see around you. I'm right here with you.",
];

const COMPANION_ANGRY: &[&str] = &[
    "🫶 It's completely valid to feel angry. Would it help to talk through what happened?",
    "🫶 Anger often tells us something matters to us. What do you think it's pointing to?",
    "🫶 That sounds really frustrating. Taking a short walk or a few deep breaths might help you reset.",
];

const COMPANION_NEUTRAL: &[&str] = &[
    "💛 Thanks for checking in. How has your day been so far?",
    "💛 I'm here for you. Is there anything on your mind you'd like to talk about?",
    "💛 It's good to hear from you. What would feel supportive right now?",
];

const COMPANION_STRESSED: &[&str] = &[
    "🌱 It sounds like you have a lot on your plate. Let's break it down into one small next step.",
    "🌱 Stress is your body asking for care. When did you last take a real break?",
    "🌱 You're doing more than enough. What's one thing you could set down for today?",
];

const KINTSUGI_HAPPY: &[&str] = &[
    "✨ This joy is part of your story too. Hold onto it and let it shine like gold in the cracks.",
    "✨ I'm so glad to hear this. Moments like these are the gold that binds us together.",
    "✨ What a beautiful moment. Let it remind you how far you've come.",
];

const KINTSUGI_SAD: &[&str] = &[
    "✨ Even broken pieces can be mended with gold. Your sadness is real, and so is your ability to heal.",
    "✨ In Kintsugi, the cracks are what make a piece unique. Your feelings are part of your story, not the end of it.",
    "✨ It's okay to feel broken right now. Healing takes time, and every piece of you is worth mending.",
];

const KINTSUGI_ANXIOUS: &[&str] = &[
    "✨ Mending takes patience, one piece at a time. Let's focus on just this moment together.",
    "✨ Your worries don't define you. Breathe slowly, and let each breath be a thread of gold.",
    "✨ Even the most delicate bowl can be made whole again. You are stronger than this anxious moment.",
];

const KINTSUGI_ANGRY: &[&str] = &[
    "✨ Anger can crack us open, and that's where the gold goes in. What is this feeling trying to protect?",
    "✨ It's okay to feel this fire. Let's find a way to turn it into something that helps you heal.",
    "✨ Strong feelings show what matters to you. Let's give them space without letting them break you.",
];

const KINTSUGI_NEUTRAL: &[&str] = &[
    "✨ Every day adds a new line to your story. What would you like to reflect on today?",
    "✨ I'm here with you. Is there anything you'd like to explore together?",
    "✨ Thank you for sharing this moment with me. How are you really feeling?",
];

const KINTSUGI_STRESSED: &[&str] = &[
    "✨ Pressure can make us feel like we might crack. Remember, even cracks can become beautiful.",
    "✨ You don't have to hold everything together at once. Let's set one piece down for now.",
    "✨ Gold fills cracks slowly and carefully. Give yourself that same patience today.",
];

/// Every canned reply declared for the persona and emotion
#[must_use]
pub const fn fallback_candidates(persona: Persona, emotion: Emotion) -> &'static [&'static str] {
    match (persona, emotion) {
        (Persona::Companion, Emotion::Happy) => COMPANION_HAPPY,
        (Persona::Companion, Emotion::Sad) => COMPANION_SAD,
        (Persona::Companion, Emotion::Anxious) => COMPANION_ANXIOUS,
        (Persona::Companion, Emotion::Angry) => COMPANION_ANGRY,
        (Persona::Companion, Emotion::Neutral) => COMPANION_NEUTRAL,
        (Persona::Companion, Emotion::Stressed) => COMPANION_STRESSED,
        (Persona::Kintsugi, Emotion::Happy) => KINTSUGI_HAPPY,
        (Persona::Kintsugi, Emotion::Sad) => KINTSUGI_SAD,
        (Persona::Kintsugi, Emotion::Anxious) => KINTSUGI_ANXIOUS,
        (Persona::Kintsugi, Emotion::Angry) => KINTSUGI_ANGRY,
        (Persona::Kintsugi, Emotion::Neutral) => KINTSUGI_NEUTRAL,
        (Persona::Kintsugi, Emotion::Stressed) => KINTSUGI_STRESSED,
    }
}

/// Picks one canned reply at random
#[must_use]
pub fn fallback_reply(persona: Persona, emotion: Emotion) -> &'static str {
    let candidates = fallback_candidates(persona, emotion);
    candidates
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(candidates[0])
}

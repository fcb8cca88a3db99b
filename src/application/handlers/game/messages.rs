//! Texts the game posts and sends.

use crate::domain::foundation::PlayerId;

pub const GAME_ALREADY_EXISTS: &str = "Can't start game -- game already exists";
pub const THANKS_FOR_PLAYING: &str = "Thanks for Playing!";

/// How a player is addressed in public messages.
pub fn mention(player: &PlayerId) -> String {
    format!("@{}", player)
}

pub fn players_added(players: &[PlayerId]) -> String {
    let mentions: Vec<String> = players.iter().map(mention).collect();
    format!("{} have been added to the game", mentions.join(", "))
}

pub fn round_prompt(setter: &PlayerId, prefix: &str) -> String {
    format!(
        "{}, please set your question! e.g.\n{}question What would be a perfect vacation?",
        mention(setter),
        prefix
    )
}

pub fn answer_request(setter: &PlayerId, question: &str) -> String {
    format!("What answer do you think {} would give to '{}'?", setter, question)
}

/// The setter's private numbered list.
pub fn selection_request(question: &str, options: &[String]) -> String {
    let mut text = format!("Select the answer for {} that is most 'you'\n\n", question);
    for (i, option) in options.iter().enumerate() {
        text.push_str(&format!("{} - {}\n\n", i + 1, option));
    }
    text.push_str(&format!(
        "Please respond with a number between 1 and {}",
        options.len()
    ));
    text
}

pub fn vote_prompt(display_index: usize, answer: &str) -> String {
    format!("[{}]: \"{}\"", display_index, answer)
}

pub fn reveal(answer: &str, author: &PlayerId) -> String {
    format!(
        "The correct answer was {}\nThis answer was given by {}",
        answer, author
    )
}

pub fn scoring_pending(prefix: &str) -> String {
    format!(
        "Scoring is not yet implemented.\nUse {p}nextround to start the next round, or {p}endgame to stop",
        p = prefix
    )
}

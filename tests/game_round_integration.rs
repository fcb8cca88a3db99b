//! Integration tests for a full Say Anything round.
//!
//! Drives the dispatcher the way a chat platform would and checks what
//! players see:
//! 1. `!startgame` creates the game and hands the first round to the first player
//! 2. The setter's question is sent privately to everyone else
//! 3. The last answer sends the setter a shuffled selection list
//! 4. The setter's pick posts one vote prompt per answer
//! 5. The round completes only once every player has voted
//!
//! Uses the recording chat gateway and scripted shuffles so every ordering
//! is known in advance.

use std::sync::Arc;

use say_anything::adapters::{InMemoryEventBus, RecordingChatGateway, RngShuffler, ScriptedShuffler};
use say_anything::application::{
    ChannelMessage, GameDispatcher, GamePorts, PrivateMessage, SessionSettings, VoteReaction,
};
use say_anything::domain::foundation::{ChannelId, PlayerId, PromptHandle};
use say_anything::domain::game::{Game, GameRules, RoundPhase, RoundCompleted};
use say_anything::ports::Shuffler;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Table {
    dispatcher: GameDispatcher,
    chat: RecordingChatGateway,
    bus: Arc<InMemoryEventBus>,
}

impl Table {
    fn new(shuffler: impl Shuffler + 'static) -> Self {
        let chat = RecordingChatGateway::new();
        let bus = Arc::new(InMemoryEventBus::new());
        let ports = GamePorts::new(Arc::new(chat.clone()), Arc::new(shuffler), bus.clone());
        Self {
            dispatcher: GameDispatcher::new(SessionSettings::default(), ports),
            chat,
            bus,
        }
    }

    async fn say(&self, author: &str, content: &str) {
        let mentions = content
            .split_whitespace()
            .filter_map(|t| t.strip_prefix('@'))
            .map(player)
            .collect();
        let message = ChannelMessage::new(general(), player(author), content).with_mentions(mentions);
        self.dispatcher.handle_channel_message(&message).await.unwrap();
    }

    async fn dm(&self, author: &str, content: &str) {
        self.dispatcher
            .handle_private_message(&PrivateMessage::new(player(author), content))
            .await
            .unwrap();
    }

    async fn vote(&self, voter: &str, prompt: &PromptHandle, high: bool) {
        let reaction = VoteReaction::new(general(), player(voter), prompt.clone(), high);
        self.dispatcher.handle_reaction(&reaction).await.unwrap();
    }

    async fn game(&self) -> Game {
        self.dispatcher.game_snapshot(&general()).await.unwrap()
    }

    /// Prompts posted since the last `clear`, keyed by answer text.
    fn prompt_for(&self, answer: &str) -> PromptHandle {
        self.chat
            .prompts_in(&general())
            .into_iter()
            .find(|(_, text, _)| text.ends_with(&format!("\"{}\"", answer)))
            .map(|(_, _, handle)| handle)
            .unwrap()
    }
}

fn player(id: &str) -> PlayerId {
    PlayerId::new(id).unwrap()
}

fn general() -> ChannelId {
    ChannelId::new("general").unwrap()
}

// =============================================================================
// End-to-end round
// =============================================================================

#[tokio::test]
async fn three_player_round_end_to_end() {
    // First shuffle (selection list) reverses, second (ballot) keeps order.
    let table = Table::new(ScriptedShuffler::new(vec![vec![1, 0], vec![0, 1]]));

    table.say("alice", "!startgame @alice @bob @carol").await;
    let game = table.game().await;
    assert_eq!(game.roster(), &[player("alice"), player("bob"), player("carol")]);
    assert_eq!(game.setter(), Some(&player("alice")));

    table.say("alice", "!question favorite food").await;
    assert_eq!(
        table.chat.notifications_to(&player("bob")),
        vec!["What answer do you think alice would give to 'favorite food'?".to_string()]
    );

    table.dm("bob", "pizza").await;
    table.dm("carol", "tacos").await;

    let selection = table.chat.notifications_to(&player("alice"));
    assert_eq!(
        selection,
        vec!["Select the answer for favorite food that is most 'you'\n\n\
              1 - tacos\n\n\
              2 - pizza\n\n\
              Please respond with a number between 1 and 2"
            .to_string()]
    );

    // Entry 2 of the private list is bob's answer.
    table.dm("alice", "2").await;
    let game = table.game().await;
    let round = game.round().unwrap();
    assert_eq!(round.chosen_answerer(), Some(&player("bob")));
    assert!(round.selection_pool().is_none());
    assert_eq!(round.vote_target_count(), 2);
    for id in ["alice", "bob", "carol"] {
        assert_eq!(round.credit_of(&player(id)), Some(0));
    }

    let prompts = table.chat.prompts_in(&general());
    assert_eq!(prompts[0].1, "[1]: \"pizza\"");
    assert_eq!(prompts[1].1, "[2]: \"tacos\"");

    table.vote("bob", &table.prompt_for("tacos"), true).await;
    table.vote("carol", &table.prompt_for("pizza"), true).await;

    // alice has not voted yet
    let game = table.game().await;
    assert_eq!(game.phase(), RoundPhase::Voting);
    assert_eq!(game.setter(), Some(&player("alice")));
    assert!(!table.bus.has_event("game.round_completed.v1"));

    table.vote("alice", &table.prompt_for("pizza"), true).await;

    let game = table.game().await;
    assert!(game.setter().is_none());
    for id in ["alice", "bob", "carol"] {
        assert_eq!(game.score_of(&player(id)), Some(0));
    }

    let posts = table.chat.announcements_in(&general());
    let n = posts.len();
    assert_eq!(posts[n - 2], "The correct answer was pizza\nThis answer was given by bob");
    assert_eq!(
        posts[n - 1],
        "Scoring is not yet implemented.\nUse !nextround to start the next round, or !endgame to stop"
    );

    let completed: RoundCompleted = table.bus.events_of_type("game.round_completed.v1")[0]
        .payload_as()
        .unwrap();
    assert_eq!(completed.author, player("bob"));
    assert_eq!(completed.question, "favorite food");
}

#[tokio::test]
async fn late_answers_are_dropped_once_selection_opens() {
    let table = Table::new(ScriptedShuffler::identity());
    table.say("alice", "!startgame @alice @bob @carol").await;
    table.say("alice", "!question favorite food").await;
    table.dm("bob", "pizza").await;
    table.dm("carol", "tacos").await;

    table.dm("bob", "actually sushi").await;

    let game = table.game().await;
    assert_eq!(game.round().unwrap().answer_of(&player("bob")), Some("pizza"));
    assert_eq!(table.chat.acknowledgements_for(&player("bob")), 1);
}

#[tokio::test]
async fn low_confidence_votes_need_two_reactions() {
    let table = Table::new(ScriptedShuffler::identity());
    table.say("alice", "!startgame @alice @bob").await;
    table.say("alice", "!question best movie").await;
    table.dm("bob", "Alien").await;
    table.dm("alice", "1").await;
    let prompt = table.prompt_for("Alien");

    table.vote("alice", &prompt, false).await;
    table.vote("bob", &prompt, true).await;
    assert_eq!(table.game().await.phase(), RoundPhase::Voting);

    table.vote("alice", &prompt, false).await;
    assert_eq!(table.game().await.phase(), RoundPhase::Idle);
}

#[tokio::test]
async fn unknown_prompt_and_stranger_votes_change_nothing() {
    let table = Table::new(ScriptedShuffler::identity());
    table.say("alice", "!startgame @alice @bob").await;
    table.say("alice", "!question best movie").await;
    table.dm("bob", "Alien").await;
    table.dm("alice", "1").await;

    table.vote("bob", &PromptHandle::from_string("not-a-prompt"), true).await;
    table.vote("mallory", &table.prompt_for("Alien"), true).await;

    let game = table.game().await;
    let round = game.round().unwrap();
    assert_eq!(round.credit_of(&player("bob")), Some(0));
    assert!(round.credit_of(&player("mallory")).is_none());
}

// =============================================================================
// Rotation
// =============================================================================

async fn play_round(table: &Table, setter: &str, others: &[&str]) {
    table.chat.clear();
    table.say(setter, "!question anything").await;
    for (i, other) in others.iter().enumerate() {
        table.dm(other, &format!("answer {}", i)).await;
    }
    table.dm(setter, "1").await;
    let prompt = table.chat.prompts_in(&general())[0].2.clone();
    table.vote(setter, &prompt, true).await;
    for other in others {
        table.vote(other, &prompt, true).await;
    }
}

#[tokio::test]
async fn setters_rotate_in_join_order_with_wraparound() {
    let table = Table::new(ScriptedShuffler::identity());
    table.say("alice", "!startgame @alice @bob @carol").await;

    let names = ["alice", "bob", "carol"];
    let mut setters = Vec::new();
    for round in 0..6 {
        let game = table.game().await;
        let setter = game.setter().unwrap().clone();
        setters.push(setter.as_str().to_string());

        let others: Vec<&str> = names.iter().copied().filter(|n| *n != setter.as_str()).collect();
        play_round(&table, setter.as_str(), &others).await;
        assert!(table.game().await.setter().is_none(), "round {} did not complete", round);

        table.say("bob", "!nextround").await;
    }

    assert_eq!(setters, vec!["alice", "bob", "carol", "alice", "bob", "carol"]);
}

#[tokio::test]
async fn nextround_during_a_round_is_ignored() {
    let table = Table::new(ScriptedShuffler::identity());
    table.say("alice", "!startgame @alice @bob").await;
    table.say("bob", "!nextround").await;

    let game = table.game().await;
    assert_eq!(game.setter(), Some(&player("alice")));
    assert_eq!(game.rounds_started(), 1);
}

#[tokio::test]
async fn players_added_mid_game_vote_in_the_next_round() {
    let table = Table::new(ScriptedShuffler::identity());
    table.say("alice", "!startgame @alice @bob").await;
    table.say("alice", "!addplayers @carol").await;

    let posts = table.chat.announcements_in(&general());
    assert!(posts.contains(&"@carol have been added to the game".to_string()));
    let game = table.game().await;
    assert_eq!(game.setter(), Some(&player("alice")));
    assert_eq!(game.rounds_started(), 1);
}

// =============================================================================
// Shuffle independence
// =============================================================================

#[test]
fn selection_and_ballot_orders_are_independent() {
    let names = ["setter", "p1", "p2", "p3", "p4"];
    let mut differing = 0;

    for seed in 0..20u64 {
        let shuffler = RngShuffler::seeded(seed);
        let mut game = Game::new(general(), GameRules::default());
        game.add_players(names.iter().map(|n| player(n)));
        game.start_round().unwrap();
        game.ask_question(&player("setter"), "q").unwrap();
        for (i, name) in names.iter().enumerate().skip(1) {
            game.submit_answer(&player(name), &format!("answer {}", i)).unwrap();
        }

        let request = game.open_selection(&shuffler).unwrap();
        let ballot = game.draw_ballot(1, &shuffler).unwrap();
        let public: Vec<String> = ballot.entries.iter().map(|e| e.text.clone()).collect();

        let mut sorted_private = request.options.clone();
        let mut sorted_public = public.clone();
        sorted_private.sort();
        sorted_public.sort();
        assert_eq!(sorted_private, sorted_public);

        if public != request.options {
            differing += 1;
        }
    }

    assert!(differing > 0, "ballot always matched the private list");
}

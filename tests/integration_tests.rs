// Integration tests for the wordle-game application
// These tests verify that all modules work together correctly

use proptest::prelude::*;
use std::io::Cursor;
use wordle_game::cli::CliInterface;
use wordle_game::*;

fn word(s: &str) -> Word {
    Word::new(s).unwrap()
}

fn play_keys(game: &mut Game, tokens: &[&str]) -> Vec<KeyOutcome> {
    tokens
        .iter()
        .filter_map(|t| Key::parse(t))
        .map(|k| game.handle_key(k))
        .collect()
}

#[test]
fn test_words_scenario_wins() {
    let mut game = Game::new(word("WORDS"));
    let outcomes = play_keys(&mut game, &["w", "o", "r", "d", "s", "Enter"]);
    match outcomes.last().unwrap() {
        KeyOutcome::Submitted(submission) => {
            assert_eq!(submission.classifications, [Classification::Correct; 5]);
            assert_eq!(submission.status, GameStatus::Won);
        }
        other => panic!("Expected submission, got {other:?}"),
    }
    assert_eq!(game.status(), GameStatus::Won);
}

#[test]
fn test_speed_against_abide_duplicate_letters() {
    use Classification::{Absent, Present};

    let mut game = Game::new(word("ABIDE"));
    play_keys(&mut game, &["S", "P", "E", "E", "D", "ENTER"]);
    let row: Vec<Option<Classification>> = game
        .board()
        .row(0)
        .cells()
        .iter()
        .map(|c| c.classification)
        .collect();
    assert_eq!(
        row,
        vec![
            Some(Absent),
            Some(Absent),
            Some(Present),
            Some(Absent),
            Some(Present)
        ]
    );
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_sixth_key_in_row_is_rejected_without_mutation() {
    let mut game = Game::new(word("WORDS"));
    play_keys(&mut game, &["A", "B", "C", "D", "E"]);
    let before = game.board().clone();
    let outcomes = play_keys(&mut game, &["F"]);
    assert_eq!(outcomes, vec![KeyOutcome::Rejected(Rejection::RowFull)]);
    assert_eq!(game.board(), &before);
    assert_eq!(game.active_column(), 5);
    assert_eq!(current_word(game.board().row(0)), "ABCDE");
}

#[test]
fn test_unrecognized_keys_ignored() {
    for token in ["Shift", "Tab", "ArrowLeft", "1", " ", "F5"] {
        assert_eq!(Key::parse(token), None, "{token} should be ignored");
    }
}

#[test]
fn test_lost_only_after_sixth_submission() {
    let mut game = Game::new(word("WORDS"));
    let misses = ["CRANE", "SLATE", "ABIDE", "SPEED", "EAGLE", "FRAME"];
    for (i, guess) in misses.iter().enumerate() {
        assert_eq!(game.status(), GameStatus::InProgress, "lost too early at {i}");
        for c in guess.chars() {
            game.add_letter(c).unwrap();
        }
        game.submit_guess().unwrap();
    }
    assert_eq!(game.status(), GameStatus::Lost);
    assert!(game.board().rows().iter().all(Row::is_scored));
    assert_eq!(
        game.handle_key(Key::Letter('A')),
        KeyOutcome::Ignored,
        "keys after the end must not touch the board"
    );
}

#[test]
fn test_event_log_records_rejections_newest_first() {
    let mut game = Game::new(word("WORDS"));
    game.handle_key(Key::Backspace);
    game.handle_key(Key::Enter);
    let errors: Vec<&str> = game
        .log()
        .entries()
        .filter(|e| e.severity == Severity::Error)
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(
        errors,
        vec![
            "Guess must be exactly 5 letters (0 entered)",
            "Nothing to delete"
        ]
    );
}

#[test]
fn test_event_log_stays_bounded_over_a_game() {
    let mut game = Game::new(word("WORDS"));
    for _ in 0..10 {
        play_keys(&mut game, &["A", "B", "C", "D", "E", "F", "BACKSPACE", "E", "ENTER"]);
    }
    assert!(game.log().len() <= event_log::EVENT_LOG_CAPACITY);
}

#[test]
fn test_full_session_through_cli_interface() {
    let input = "crane\nslate\nwords\nnew\nw o r d s enter\nexit\n";
    let mut picker = SecretPicker::fixed(word("WORDS"));
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut picker, &mut interface);
    assert_eq!(summary, SessionSummary { won: 2, lost: 0 });
}

#[test]
fn test_daily_session_walks_the_wordbank() {
    let wordbank = load_wordbank_from_str("crane\nslate\nwords");
    let date = chrono::NaiveDate::from_ymd_opt(1970, 1, 3).unwrap();
    // Day 2 selects WORDS, the next game wraps to CRANE.
    let mut picker = SecretPicker::daily(wordbank, date).unwrap();
    let input = "words\nnew\ncrane\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let summary = game_loop(&mut picker, &mut interface);
    assert_eq!(summary, SessionSummary { won: 2, lost: 0 });
}

#[test]
fn test_custom_wordbank_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let wordbank_path = std::env::temp_dir().join("wordle_game_test_wordbank.txt");
    {
        let mut file = File::create(&wordbank_path).unwrap();
        writeln!(file, "apple").unwrap();
        writeln!(file, "grape").unwrap();
        writeln!(file, "kiwi").unwrap();
    }

    let wordbank = load_wordbank_from_file(&wordbank_path).unwrap();
    assert_eq!(wordbank, vec![word("APPLE"), word("GRAPE")]);

    let mut picker = SecretPicker::fixed(wordbank[1]);
    let mut interface = CliInterface::new(Cursor::new("apple\ngrape\n"));
    let summary = game_loop(&mut picker, &mut interface);
    assert_eq!(summary.won, 1);

    std::fs::remove_file(&wordbank_path).unwrap();
}

fn word_strategy() -> impl Strategy<Value = Word> {
    // A small alphabet makes repeated letters common.
    "[A-F]{5}".prop_map(|s| Word::new(&s).unwrap())
}

fn count(word: &Word, letter: char) -> usize {
    word.letters().filter(|&c| c == letter).count()
}

proptest! {
    #[test]
    fn prop_correct_count_matches_exact_positions(guess in word_strategy(), secret in word_strategy()) {
        let result = score_guess(&guess, &secret);
        let exact = (0..WORD_LENGTH).filter(|&i| guess.letter(i) == secret.letter(i)).count();
        let correct = result.iter().filter(|&&c| c == Classification::Correct).count();
        prop_assert_eq!(correct, exact);
        for i in 0..WORD_LENGTH {
            prop_assert_eq!(
                result[i] == Classification::Correct,
                guess.letter(i) == secret.letter(i)
            );
        }
    }

    #[test]
    fn prop_credit_per_letter_capped(guess in word_strategy(), secret in word_strategy()) {
        let result = score_guess(&guess, &secret);
        for letter in 'A'..='F' {
            let credited = (0..WORD_LENGTH)
                .filter(|&i| guess.letter(i) == letter && result[i] != Classification::Absent)
                .count();
            prop_assert_eq!(credited, count(&guess, letter).min(count(&secret, letter)));
        }
    }

    #[test]
    fn prop_self_guess_all_correct(secret in word_strategy()) {
        prop_assert_eq!(score_guess(&secret, &secret), [Classification::Correct; WORD_LENGTH]);
    }

    #[test]
    fn prop_guard_rejections_leave_game_unchanged(letters in "[A-Z]{0,5}") {
        let mut game = Game::new(Word::new("WORDS").unwrap());
        for c in letters.chars() {
            game.add_letter(c).unwrap();
        }
        let board = game.board().clone();
        let (row, column) = (game.active_row(), game.active_column());

        let rejected = if letters.len() == WORD_LENGTH {
            game.add_letter('Q').is_err()
        } else if letters.is_empty() {
            game.delete_letter().is_err() && game.submit_guess().is_err()
        } else {
            game.submit_guess().is_err()
        };

        prop_assert!(rejected);
        prop_assert_eq!(game.board(), &board);
        prop_assert_eq!((game.active_row(), game.active_column()), (row, column));
        prop_assert_eq!(game.status(), GameStatus::InProgress);
    }
}

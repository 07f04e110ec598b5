use super::mock::*;
use libtash::system::line::LineBuffer;
use libtash::system::tokenizer::ARGS_MAX;
use libtash::system::{Control, ShellResult, execute_line};
use rand::Rng;
use rand::seq::SliceRandom;

fn run(text: &[u8]) -> (Recorder, ShellResult) {
    let mut recorder = Recorder::new();
    let mut line = LineBuffer::from_bytes(text).unwrap();
    let status = execute_line(&mut line, &mut recorder, &mut Control::new());
    (recorder, status)
}

#[test]
fn test_quoted_argument() {
    let (recorder, _) = run(br#"echo "a b" c"#);
    assert_eq!(recorder.calls, calls(&[&["echo", "a b", "c"]]));
}

#[test]
fn test_escaped_quote() {
    let (recorder, _) = run(br#"echo a\"b"#);
    assert_eq!(recorder.calls, calls(&[&["echo", "a\"b"]]));
}

#[test]
fn test_semicolon_dispatches_in_order() {
    let (recorder, _) = run(b"echo 1; echo 2");
    assert_eq!(recorder.calls, calls(&[&["echo", "1"], &["echo", "2"]]));
}

#[test]
fn test_comment_ends_line() {
    let (recorder, _) = run(b"echo hidden # rest ignored; reboot");
    assert_eq!(recorder.calls, calls(&[&["echo", "hidden"]]));
}

#[test]
fn test_unclosed_quote_dispatches_nothing() {
    let (recorder, status) = run(br#"echo "oops"#);
    assert!(recorder.calls.is_empty());
    assert_eq!(status, ShellResult::Ok);
}

#[test]
fn test_blank_and_comment_lines_are_skipped() {
    for text in [&b""[..], b"    ", b"# just a comment", b";;;", b" ; # x"] {
        let (recorder, status) = run(text);
        assert!(recorder.calls.is_empty(), "dispatched for {:?}", text);
        assert_eq!(status, ShellResult::Ok);
    }
}

#[test]
fn test_status_of_last_command_is_returned() {
    let mut recorder = Recorder::with_status(ShellResult::Failed(-2));
    let mut line = LineBuffer::from_bytes(b"mount; ls").unwrap();

    let status = execute_line(&mut line, &mut recorder, &mut Control::new());

    assert_eq!(status, ShellResult::Failed(-2));
    assert_eq!(recorder.calls.len(), 2);
}

#[test]
fn test_stop_request_is_visible_to_caller() {
    let mut recorder = Recorder::new();
    let mut control = Control::new();
    let mut line = LineBuffer::from_bytes(b"exit; echo after").unwrap();

    execute_line(&mut line, &mut recorder, &mut control);

    assert!(!control.is_running());
    // The rest of the line still runs; the session checks the flag per line.
    assert_eq!(recorder.calls, calls(&[&["exit"], &["echo", "after"]]));
}

#[test]
fn test_consumed_buffer_yields_no_commands() {
    let mut recorder = Recorder::new();
    let mut line = LineBuffer::from_bytes(&[0u8; 32]).unwrap();

    execute_line(&mut line, &mut recorder, &mut Control::new());
    execute_line(&mut line, &mut recorder, &mut Control::new());

    assert!(recorder.calls.is_empty());
}

#[test]
fn test_line_feed_separates_commands() {
    let (recorder, _) = run(b"ifconfig\nping \"host name\"");
    assert_eq!(
        recorder.calls,
        calls(&[&["ifconfig"], &["ping", "host name"]])
    );
}

#[test]
fn test_unclosed_quote_only_drops_its_own_command() {
    let (recorder, _) = run(br#"date; echo "oops"#);
    assert_eq!(recorder.calls, calls(&[&["date"]]));
}

#[test]
fn test_full_argument_vector_ends_line() {
    let mut text = String::from("cmd");
    for _ in 0..ARGS_MAX - 1 {
        text.push_str(" a");
    }
    text.push_str("; reboot");

    let (recorder, _) = run(text.as_bytes());

    assert_eq!(recorder.calls.len(), 1);
    assert_eq!(recorder.calls[0].len(), ARGS_MAX);
    assert_eq!(recorder.calls[0][ARGS_MAX - 1], "a");
}

#[test]
fn test_whitespace_split_matches_words() {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-_./=";
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let word_count = rng.gen_range(1..=12);
        let words: Vec<String> = (0..word_count)
            .map(|_| {
                let len = rng.gen_range(1..=6);
                (0..len)
                    .map(|_| *ALPHABET.choose(&mut rng).unwrap() as char)
                    .collect()
            })
            .collect();

        let mut text = " ".repeat(rng.gen_range(0..=2));
        for word in &words {
            text.push_str(word);
            text.push_str(&" ".repeat(rng.gen_range(1..=3)));
        }

        let (recorder, _) = run(text.as_bytes());
        assert_eq!(recorder.calls, vec![words], "input {:?}", text);
    }
}

use blinko_capture::api::DEFAULT_TIMEOUT;
use blinko_capture::cli::{Args, Command};
use clap::Parser;

#[test]
fn given_no_subcommand_when_parsing_then_popup_flow() {
    // Arrange
    let args = vec!["blinko"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.command, None);
    assert_eq!(parsed.timeout, DEFAULT_TIMEOUT.as_secs());
    assert_eq!(parsed.store, None);
}

#[test]
fn given_save_with_tags_when_parsing_then_tags_keep_order() {
    // Arrange
    let args = vec!["blinko", "save", "hello", "-t", "work", "--tag", "idea"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(
        parsed.command,
        Some(Command::Save {
            body: "hello".into(),
            tags: vec!["work".into(), "idea".into()],
        })
    );
}

#[test]
fn given_save_with_only_tags_when_parsing_then_body_is_empty() {
    // Arrange
    let args = vec!["blinko", "save", "-t", "idea"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(
        parsed.command,
        Some(Command::Save {
            body: String::new(),
            tags: vec!["idea".into()],
        })
    );
}

#[test]
fn given_settings_flags_when_parsing_then_both_captured() {
    // Arrange
    let args = vec![
        "blinko",
        "settings",
        "--instance",
        "https://blinko.example.com",
        "--token",
        "abc",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Some(Command::Settings { instance, token }) => {
            assert_eq!(instance.as_deref(), Some("https://blinko.example.com"));
            assert_eq!(token.as_deref(), Some("abc"));
        }
        other => panic!("Expected Settings command, got {:?}", other),
    }
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_applied() {
    // Arrange
    let args = vec!["blinko", "status", "--store", "/tmp/x.json", "-vv", "--timeout", "3"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.command, Some(Command::Status));
    assert_eq!(parsed.verbose, 2);
    assert_eq!(parsed.timeout, 3);
    assert_eq!(parsed.store.unwrap().to_str(), Some("/tmp/x.json"));
}

#[test]
fn given_setup_snippet_when_parsing_then_captured_verbatim() {
    let parsed = Args::try_parse_from(vec!["blinko", "setup", "--snippet", "Bearer x"]).unwrap();

    assert_eq!(
        parsed.command,
        Some(Command::Setup {
            snippet: Some("Bearer x".into())
        })
    );
}

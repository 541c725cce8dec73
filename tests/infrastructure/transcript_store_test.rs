use parley::infrastructure::transcript::parse_jsonl;

#[test]
fn parses_one_line_per_utterance() {
    let text = concat!(
        r#"{"speaker_id":"u1","text":"Hello","start_ts":0,"stop_ts":900}"#,
        "\n",
        r#"{"speaker_id":"u2","text":"Hi","start_ts":1000,"stop_ts":1800}"#,
        "\n",
    );

    let lines = parse_jsonl(text);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].speaker_id, "u1");
    assert_eq!(lines[1].text, "Hi");
}

#[test]
fn skips_blank_and_malformed_lines() {
    let text = concat!(
        r#"{"speaker_id":"u1","text":"Hello","start_ts":0,"stop_ts":900}"#,
        "\n\n",
        "not json at all\n",
        r#"{"speaker_id":"u2","text":"Still here","start_ts":2000,"stop_ts":2500}"#,
        "\n",
    );

    let lines = parse_jsonl(text);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].speaker_id, "u2");
}

#[test]
fn empty_artifact_yields_no_lines() {
    assert!(parse_jsonl("").is_empty());
    assert!(parse_jsonl("\n\n").is_empty());
}

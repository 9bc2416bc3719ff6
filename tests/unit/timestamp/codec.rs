use super::*;

#[test]
fn sort_key_is_third_field() {
    assert_eq!(sort_key("IDR022.T.202401010025.png"), "202401010025");
    assert_eq!(sort_key("IDR022.T.202401010025"), "202401010025");
}

#[test]
fn sort_key_falls_back_to_identifier() {
    assert_eq!(sort_key("IDR022.png"), "IDR022.png");
    assert_eq!(sort_key(""), "");
}

#[test]
fn sort_key_order_matches_chronological_order() {
    let stamps = [
        "199912312359",
        "200001010000",
        "202401010005",
        "202401010025",
        "202402010000",
        "202412311355",
    ];
    for pair in stamps.windows(2) {
        let a = format!("IDR022.T.{}.png", pair[0]);
        let b = format!("IDR022.T.{}.png", pair[1]);
        let ta = parse_capture_time(&a, "UTC").unwrap().utc;
        let tb = parse_capture_time(&b, "UTC").unwrap().utc;
        assert_eq!(sort_key(&a).cmp(sort_key(&b)), ta.cmp(&tb));
    }
}

#[test]
fn parsed_note_has_utc_and_local_time() {
    // 00:25 UTC on 1 Jan is 11:25 AEDT in Melbourne (UTC+11 in summer).
    let note = CaptureNote::from_identifier("IDR022.T.202401010025.png", "Australia/Melbourne");
    assert!(!note.is_degraded());
    assert_eq!(
        note.to_string(),
        "UTC Time: 2024-01-01 00:25 UTC; Local Time (Australia/Melbourne): 2024-01-01 11:25 AEDT"
    );
    assert!(note.file_contents().ends_with('\n'));
}

#[test]
fn malformed_stamp_degrades_with_identifier_and_reason() {
    let note = CaptureNote::from_identifier("IDR022.T.2024XX010025.png", "Australia/Melbourne");
    let CaptureNote::Degraded { identifier, reason } = &note else {
        panic!("expected degraded note");
    };
    assert_eq!(identifier, "IDR022.T.2024XX010025.png");
    assert!(reason.contains("timestamp error"));
    assert!(
        note.file_contents()
            .starts_with("Last file: IDR022.T.2024XX010025.png\nError parsing timestamp: ")
    );
}

#[test]
fn missing_stamp_field_is_an_error() {
    assert!(parse_capture_time("IDR022.png", "UTC").is_err());
}

#[test]
fn unknown_timezone_is_an_error_not_a_panic() {
    let err = parse_capture_time("IDR022.T.202401010025.png", "Mars/Olympus").unwrap_err();
    assert!(err.to_string().contains("unknown timezone"));
    assert!(CaptureNote::from_identifier("IDR022.T.202401010025.png", "Mars/Olympus").is_degraded());
}

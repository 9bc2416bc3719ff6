use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "radarloop_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn artifact(name: &str, bytes: &[u8]) -> Artifact {
    Artifact {
        name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

#[test]
fn deliver_sends_artifacts_then_note() {
    let mut sink = InMemorySink::new();
    let report = deliver(
        &mut sink,
        "/radar",
        &[artifact("image_1.png", b"1"), artifact("radar_animated.gif", b"g")],
        Some(("radar_last_update.txt", "note\n")),
    );

    assert_eq!(report, DeliveryReport { delivered: 3, failed: 0 });
    assert_eq!(sink.destination.as_deref(), Some("/radar"));
    assert_eq!(
        sink.order,
        vec!["image_1.png", "radar_animated.gif", "radar_last_update.txt"]
    );
    assert_eq!(sink.text("radar_last_update.txt"), Some("note\n"));
}

#[test]
fn one_failed_file_does_not_stop_the_rest() {
    let mut sink = InMemorySink::new();
    sink.fail_on("image_1.png");
    let report = deliver(
        &mut sink,
        "/radar",
        &[artifact("image_1.png", b"1"), artifact("image_2.png", b"2")],
        Some(("note.txt", "n\n")),
    );

    assert_eq!(report, DeliveryReport { delivered: 2, failed: 1 });
    assert!(!sink.files.contains_key("image_1.png"));
    assert!(sink.files.contains_key("image_2.png"));
    assert!(sink.files.contains_key("note.txt"));
}

#[test]
fn nothing_to_deliver_skips_the_sink() {
    let mut sink = InMemorySink::new();
    let report = deliver(&mut sink, "/radar", &[], Some(("note.txt", "n\n")));
    assert_eq!(report, DeliveryReport::default());
    assert!(sink.destination.is_none());
    assert!(sink.files.is_empty());
}

#[test]
fn dir_sink_writes_under_remote_path() {
    let root = temp_dir("dir_sink");
    let mut sink = DirSink::new(&root);
    assert_eq!(sink.root(), root.as_path());

    let report = deliver(
        &mut sink,
        "/share/radar/",
        &[artifact("image_1.png", b"png")],
        Some(("radar_last_update.txt", "t\n")),
    );
    assert_eq!(report.failed, 0);
    assert_eq!(
        std::fs::read(root.join("share/radar/image_1.png")).unwrap(),
        b"png"
    );
    assert_eq!(
        std::fs::read_to_string(root.join("share/radar/radar_last_update.txt")).unwrap(),
        "t\n"
    );

    std::fs::remove_dir_all(&root).ok();
}

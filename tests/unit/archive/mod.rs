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

#[test]
fn in_memory_lists_in_insertion_order() {
    let mut archive = InMemoryArchive::new();
    archive.insert("radar", "b.png", vec![2]);
    archive.insert("radar", "a.png", vec![1]);

    assert_eq!(archive.list("radar").unwrap(), vec!["b.png", "a.png"]);
    assert_eq!(archive.fetch("radar", "a.png").unwrap(), vec![1]);
    assert!(archive.list("missing").unwrap().is_empty());
}

#[test]
fn in_memory_failures_are_archive_errors() {
    let mut archive = InMemoryArchive::new();
    archive.insert("radar", "a.png", vec![1]);
    archive.fail_fetch("a.png");
    archive.fail_listing("layers");

    assert_eq!(archive.list("radar").unwrap(), vec!["a.png"]);
    assert!(matches!(
        archive.fetch("radar", "a.png"),
        Err(RadarError::Archive(_))
    ));
    assert!(matches!(archive.list("layers"), Err(RadarError::Archive(_))));
    assert!(archive.fetch("radar", "nope.png").is_err());
}

#[test]
fn dir_archive_lists_files_sorted_and_fetches() {
    let root = temp_dir("dir_archive");
    let radar = root.join("anon/gen/radar");
    std::fs::create_dir_all(radar.join("subdir")).unwrap();
    std::fs::write(radar.join("IDR022.T.202401010005.png"), b"b").unwrap();
    std::fs::write(radar.join("IDR022.T.202401010000.png"), b"a").unwrap();

    let archive = DirArchive::new(&root);
    assert_eq!(
        archive.list("/anon/gen/radar/").unwrap(),
        vec!["IDR022.T.202401010000.png", "IDR022.T.202401010005.png"]
    );
    assert_eq!(
        archive
            .fetch("anon/gen/radar", "IDR022.T.202401010005.png")
            .unwrap(),
        b"b"
    );
    assert!(archive.fetch("anon/gen/radar", "missing.png").is_err());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn dir_archive_missing_directory_is_listing_error() {
    let archive = DirArchive::new(temp_dir("dir_archive_missing"));
    assert!(matches!(
        archive.list("anon/gen/radar"),
        Err(RadarError::Archive(_))
    ));
}

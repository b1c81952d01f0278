use super::*;

fn record() -> DownloadRecord {
    let mut selected = BTreeMap::new();
    selected.insert(Category::Body, "LD_ASSETS/body/tshirtwhite_skin1.png".to_owned());
    selected.insert(Category::Glasses, String::new());
    DownloadRecord { selected }
}

#[test]
fn record_serializes_categories_as_lowercase_keys() {
    let v = serde_json::to_value(record()).unwrap();
    assert_eq!(v["selected"]["body"], "LD_ASSETS/body/tshirtwhite_skin1.png");
    assert_eq!(v["selected"]["glasses"], "");
}

#[test]
fn in_memory_log_stamps_records() {
    let log = InMemoryDownloadLog::new();
    log.append(&record()).unwrap();
    log.append(&record()).unwrap();
    let records = log.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].record, record());
    assert!(records[0].created_at_ms > 0);
    assert!(records[1].created_at_ms >= records[0].created_at_ms);
}

#[test]
fn firestore_commit_uses_a_server_timestamp_transform() {
    let log = FirestoreLog::new("cfb-pfp", Some("k3y".to_owned()), 1_000).unwrap();

    let url = log.commit_url().unwrap();
    assert!(
        url.as_str()
            .starts_with("https://firestore.googleapis.com/v1/projects/cfb-pfp/databases/")
    );
    assert!(url.as_str().ends_with("documents:commit?key=k3y"));

    let body = log.commit_body(&record(), "abc");
    let write = &body["writes"][0];
    assert_eq!(
        write["update"]["name"],
        "projects/cfb-pfp/databases/(default)/documents/downloads/abc"
    );
    assert_eq!(
        write["update"]["fields"]["selected"]["mapValue"]["fields"]["body"]["stringValue"],
        "LD_ASSETS/body/tshirtwhite_skin1.png"
    );
    assert_eq!(write["updateTransforms"][0]["fieldPath"], "createdAt");
    assert_eq!(write["updateTransforms"][0]["setToServerValue"], "REQUEST_TIME");
}

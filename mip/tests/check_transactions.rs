mod common;

use common::{digest, fold, reference_path, request, spawn_authority};

use mip::Blake3Hasher;

#[tokio::test]
async fn included_transaction_is_valid() {
    let path = reference_path();
    let root = fold("2", &path);
    let addr = spawn_authority(path).await;

    let report = request(addr, &root, &["2"]).check::<Blake3Hasher>().await;
    assert_eq!(report.valid().collect::<Vec<_>>(), vec!["2"]);
    assert!(report.all_valid());
}

#[tokio::test]
async fn mismatch_is_invalid_not_an_error() {
    let path = reference_path();
    let root = fold("2", &path);
    let addr = spawn_authority(path).await;

    let report = request(addr, &root, &["2", "0000000020"])
        .check::<Blake3Hasher>()
        .await;
    assert_eq!(report.len(), 2);
    assert_eq!(report.valid().collect::<Vec<_>>(), vec!["2"]);
    assert_eq!(report.invalid().collect::<Vec<_>>(), vec!["0000000020"]);
    assert_eq!(report.errored().count(), 0);
}

#[tokio::test]
async fn reference_scenario_comes_out_invalid() {
    // Root is the digest of "01234567", which the canned path of the reference deployment
    // does not fold to for transaction "2".
    let addr = spawn_authority(reference_path()).await;

    let report = request(addr, &digest("01234567"), &["2"])
        .check::<Blake3Hasher>()
        .await;
    assert_eq!(report.invalid().collect::<Vec<_>>(), vec!["2"]);
}

#[tokio::test]
async fn empty_path_is_valid_iff_leaf_equals_root() {
    let addr = spawn_authority(mip::SiblingPath::default()).await;

    let report = request(addr, &digest("solo"), &["solo", "other"])
        .check::<Blake3Hasher>()
        .await;
    assert_eq!(report.valid().collect::<Vec<_>>(), vec!["solo"]);
    assert_eq!(report.invalid().collect::<Vec<_>>(), vec!["other"]);
}

#[tokio::test]
async fn duplicates_are_checked_independently() {
    let path = reference_path();
    let root = fold("2", &path);
    let addr = spawn_authority(path).await;

    let report = request(addr, &root, &["2", "2", "2"]).check::<Blake3Hasher>().await;
    assert_eq!(report.len(), 3);
    assert_eq!(report.valid().count(), 3);
}

#[tokio::test]
async fn report_preserves_submission_order() {
    let path = reference_path();
    let root = fold("b", &path);
    let addr = spawn_authority(path).await;

    let report = request(addr, &root, &["a", "b", "c"]).check::<Blake3Hasher>().await;
    let order: Vec<_> = report.entries().map(|(tx, _)| tx).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn unreachable_authority_fills_the_error_bucket() {
    // Bind and immediately drop, so the port is known dead.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let report = request(addr, &digest("root"), &["a", "b", "a"])
        .check::<Blake3Hasher>()
        .await;
    assert_eq!(report.len(), 3);
    assert_eq!(report.errored().count(), 3);
    for (_, error) in report.errored() {
        assert!(matches!(error, mip::Error::Connection(_)));
    }
}

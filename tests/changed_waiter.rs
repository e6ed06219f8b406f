use std::time::Duration;

use statecell::cell::StateCell;

#[tokio::test]
async fn changed_returns_immediately_when_already_newer() {
    let cell = StateCell::new(0);
    cell.replace(1).unwrap();
    assert_eq!(cell.changed(0).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn changed_wakes_on_commit_from_other_thread() {
    let cell = StateCell::new(0);
    let writer = cell.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        writer.replace(42).unwrap();
    });

    let revision = tokio::time::timeout(Duration::from_secs(5), cell.changed(0))
        .await
        .expect("changed() did not resolve");
    assert_eq!(revision, 1);
    assert_eq!(*cell.read(), 42);
    handle.join().unwrap();
}

#[tokio::test]
async fn changed_waits_past_given_revision() {
    let cell = StateCell::new(0);
    cell.replace(1).unwrap();

    let waiter = {
        let cell = cell.clone();
        tokio::spawn(async move { cell.changed(1).await })
    };
    tokio::task::yield_now().await;
    cell.replace(2).unwrap();

    let revision = tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("waiter timed out")
        .unwrap();
    assert_eq!(revision, 2);
}

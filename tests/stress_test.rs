//! Randomized and property-based checks of the queue invariants
//!
//! - Enqueue order is queue order
//! - Invalid input never reaches the queue
//! - At most one item is Downloading at any time
//! - Every item ends in a terminal state once a run is over

mod common;

use common::{queue_with, settings, Behavior, ScriptedExtractor};
use proptest::prelude::*;
use rand::Rng;
use std::time::Duration;
use tempfile::tempdir;
use vidqueue::extractor::QualityPreset;
use vidqueue::queue::ItemStatus;
use vidqueue::utils::CancelMode;
use vidqueue::VidQueueError;

fn preset_strategy() -> impl Strategy<Value = QualityPreset> {
    prop::sample::select(QualityPreset::ALL.to_vec())
}

proptest! {
    #[test]
    fn enqueue_preserves_insertion_order(
        entries in prop::collection::vec(("[a-z0-9]{1,12}", preset_strategy()), 0..20)
    ) {
        let (queue, _rx) = queue_with(
            ScriptedExtractor::new(),
            settings(std::env::temp_dir(), CancelMode::InterruptCurrent),
        );

        let mut ids = Vec::new();
        for (slug, preset) in &entries {
            ids.push(queue.enqueue(&format!("https://example.com/{}", slug), *preset).unwrap());
        }

        let items = queue.items();
        prop_assert_eq!(items.iter().map(|i| i.id.clone()).collect::<Vec<_>>(), ids);
        for (item, (slug, preset)) in items.iter().zip(&entries) {
            prop_assert_eq!(&item.url, &format!("https://example.com/{}", slug));
            prop_assert_eq!(item.preset, *preset);
            prop_assert_eq!(item.status, ItemStatus::Queued);
        }
    }

    #[test]
    fn non_urls_are_rejected(raw in "[a-zA-Z0-9 ._-]{0,30}") {
        let (queue, _rx) = queue_with(
            ScriptedExtractor::new(),
            settings(std::env::temp_dir(), CancelMode::InterruptCurrent),
        );

        let result = queue.enqueue(&raw, QualityPreset::BestVideoAudio);
        prop_assert!(matches!(result, Err(VidQueueError::InvalidInput(_))));
        prop_assert!(queue.items().is_empty());
    }

    #[test]
    fn batch_with_one_bad_entry_adds_nothing(
        good in prop::collection::vec("[a-z]{1,8}", 0..6),
        bad in "[a-z]{1,8}",
        at in 0usize..6,
    ) {
        let (queue, _rx) = queue_with(
            ScriptedExtractor::new(),
            settings(std::env::temp_dir(), CancelMode::InterruptCurrent),
        );

        let mut urls: Vec<String> = good.iter().map(|g| format!("https://example.com/{}", g)).collect();
        urls.insert(at.min(urls.len()), bad);

        prop_assert!(queue.enqueue_many(&urls, QualityPreset::Res720pMp4).is_err());
        prop_assert!(queue.items().is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn random_runs_keep_one_download_at_a_time() {
    let mut rng = rand::thread_rng();

    for round in 0..5 {
        let dir = tempdir().unwrap();
        let extractor = ScriptedExtractor::new();
        let (queue, _rx) = queue_with(
            extractor.clone(),
            settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
        );

        let count = rng.gen_range(3..12);
        for n in 0..count {
            let url = format!("https://example.com/{}/{}", round, n);
            let behavior = match rng.gen_range(0..4) {
                0 => Behavior::Fail(format!("broken {}", n)),
                1 => Behavior::Succeed,
                _ => Behavior::Slow(Duration::from_millis(rng.gen_range(1..10))),
            };
            extractor.script(&url, behavior);
            queue.enqueue(&url, QualityPreset::ALL[n % 4]).unwrap();
        }

        let handle = queue.start().unwrap();
        let cancel_after = rng.gen_bool(0.4).then(|| rng.gen_range(0..count * 5));

        let mut ticks = 0;
        while !handle.is_finished() {
            let downloading = queue
                .items()
                .iter()
                .filter(|item| item.status == ItemStatus::Downloading)
                .count();
            assert!(downloading <= 1, "{} items downloading at once", downloading);

            if cancel_after == Some(ticks) {
                queue.cancel();
            }
            ticks += 1;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        handle.await.unwrap();

        assert!(extractor.max_active() <= 1);
        assert!(!queue.is_running());
        assert!(queue.items().iter().all(|item| item.status.is_terminal()));
    }
}

#[tokio::test]
async fn start_while_running_does_not_spawn_a_second_worker() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let (queue, _rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    for n in 0..4 {
        let url = format!("https://example.com/{}", n);
        extractor.script(&url, Behavior::Slow(Duration::from_millis(5)));
        queue.enqueue(&url, QualityPreset::BestVideoAudio).unwrap();
    }

    let handle = queue.start().unwrap();
    for _ in 0..10 {
        assert!(queue.start().is_none());
    }
    handle.await.unwrap();

    assert_eq!(extractor.calls().len(), 4);
    assert_eq!(extractor.max_active(), 1);
}

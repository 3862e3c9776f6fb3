//! End-to-end queue runs against a scripted extractor

mod common;

use common::{drain, queue_with, settings, wait_for_start, Behavior, ScriptedExtractor};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::sync::Notify;
use vidqueue::extractor::QualityPreset;
use vidqueue::queue::{ItemStatus, QueueEvent};
use vidqueue::utils::CancelMode;
use vidqueue::VidQueueError;

#[tokio::test]
async fn video_and_audio_items_both_finish() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let (queue, mut rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    queue
        .enqueue("https://example.com/video1", QualityPreset::BestVideoAudio)
        .unwrap();
    queue
        .enqueue("https://example.com/video2", QualityPreset::AudioOnlyMp3)
        .unwrap();

    queue.start().unwrap().await.unwrap();

    let items = queue.items();
    assert_eq!(items[0].status, ItemStatus::Done);
    assert_eq!(items[1].status, ItemStatus::Done);
    assert_eq!(
        items[1].output_path.as_deref(),
        Some(dir.path().join("video.mp3").as_path())
    );

    let calls = extractor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].format_selector, "best");
    assert_eq!(calls[1].format_selector, "bestaudio/best");
    assert_eq!(calls[1].preset, QualityPreset::AudioOnlyMp3);
    assert_eq!(calls[0].output_dir, dir.path());

    let events = drain(&mut rx);
    assert_eq!(
        events.last(),
        Some(&QueueEvent::QueueFinished { stopped: false })
    );
    let completed = events
        .iter()
        .filter(|e| matches!(e, QueueEvent::Completed { .. }))
        .count();
    assert_eq!(completed, 2);
}

#[tokio::test]
async fn invalid_url_is_never_queued() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let (queue, mut rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    let result = queue.enqueue("not-a-url", QualityPreset::BestVideoAudio);

    assert!(matches!(result, Err(VidQueueError::InvalidInput(_))));
    assert!(queue.items().is_empty());
    assert!(drain(&mut rx).is_empty());
    assert!(queue.start().is_none());
    assert!(extractor.calls().is_empty());
}

#[tokio::test]
async fn failed_item_does_not_stop_the_queue() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    extractor.script(
        "https://example.com/private",
        Behavior::Fail("Private video".to_string()),
    );
    let (queue, mut rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    queue
        .enqueue_many(
            ["https://example.com/private", "https://example.com/public"],
            QualityPreset::Res720pMp4,
        )
        .unwrap();
    queue.start().unwrap().await.unwrap();

    let items = queue.items();
    assert_eq!(items[0].status, ItemStatus::Failed);
    assert_eq!(
        items[0].error_message.as_deref(),
        Some("Download failed: Private video")
    );
    assert_eq!(items[1].status, ItemStatus::Done);
    assert_eq!(
        extractor.called_urls(),
        vec!["https://example.com/private", "https://example.com/public"]
    );

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        QueueEvent::Failed { position: 1, error, .. } if error.contains("Private video")
    )));
    assert_eq!(
        events.last(),
        Some(&QueueEvent::QueueFinished { stopped: false })
    );
}

#[tokio::test]
async fn cancel_before_start_never_calls_the_extractor() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let (queue, _rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    for n in 0..3 {
        queue
            .enqueue(&format!("https://example.com/{}", n), QualityPreset::BestVideoAudio)
            .unwrap();
    }

    assert_eq!(queue.cancel(), 3);
    assert!(queue.start().is_none());
    assert!(queue
        .items()
        .iter()
        .all(|item| item.status == ItemStatus::Canceled));
    assert!(extractor.calls().is_empty());
}

#[tokio::test]
async fn interrupting_cancel_stops_the_active_item() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    extractor.script("https://example.com/long", Behavior::UntilCanceled);
    let (queue, mut rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    queue
        .enqueue_many(
            ["https://example.com/long", "https://example.com/next"],
            QualityPreset::BestVideoAudio,
        )
        .unwrap();
    let handle = queue.start().unwrap();

    assert_eq!(wait_for_start(&mut rx).await, 1);
    assert_eq!(queue.cancel(), 1);
    handle.await.unwrap();

    let items = queue.items();
    assert_eq!(items[0].status, ItemStatus::Canceled);
    assert_eq!(items[1].status, ItemStatus::Canceled);
    assert!(items[0].error_message.is_none());
    assert_eq!(extractor.called_urls(), vec!["https://example.com/long"]);
    assert!(!queue.is_running());

    let events = drain(&mut rx);
    assert_eq!(
        events.last(),
        Some(&QueueEvent::QueueFinished { stopped: true })
    );
}

#[tokio::test]
async fn finish_current_lets_the_active_item_complete() {
    let dir = tempdir().unwrap();
    let gate = Arc::new(Notify::new());
    let extractor = ScriptedExtractor::new();
    extractor.script("https://example.com/long", Behavior::Gated(gate.clone()));
    let (queue, mut rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::FinishCurrent),
    );

    queue
        .enqueue_many(
            ["https://example.com/long", "https://example.com/next"],
            QualityPreset::BestVideoAudio,
        )
        .unwrap();
    let handle = queue.start().unwrap();

    wait_for_start(&mut rx).await;
    assert_eq!(queue.cancel(), 1);
    assert_eq!(queue.items()[0].status, ItemStatus::Downloading);

    gate.notify_one();
    handle.await.unwrap();

    let items = queue.items();
    assert_eq!(items[0].status, ItemStatus::Done);
    assert_eq!(items[1].status, ItemStatus::Canceled);
    assert_eq!(extractor.called_urls(), vec!["https://example.com/long"]);
    assert_eq!(
        drain(&mut rx).last(),
        Some(&QueueEvent::QueueFinished { stopped: true })
    );
}

#[tokio::test]
async fn maintenance_is_refused_while_running() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    extractor.script("https://example.com/long", Behavior::UntilCanceled);
    let (queue, mut rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    let ids = queue
        .enqueue_many(
            ["https://example.com/long", "https://example.com/next"],
            QualityPreset::BestVideoAudio,
        )
        .unwrap();
    let handle = queue.start().unwrap();
    wait_for_start(&mut rx).await;

    assert!(matches!(
        queue.remove(&ids[1]),
        Err(VidQueueError::QueueRunning(_))
    ));
    assert!(matches!(
        queue.set_preset(&ids[1], QualityPreset::AudioOnlyMp3),
        Err(VidQueueError::QueueRunning(_))
    ));
    assert!(matches!(
        queue.clear_finished(),
        Err(VidQueueError::QueueRunning(_))
    ));

    // Enqueueing is still allowed and the new item joins this run
    queue
        .enqueue("https://example.com/late", QualityPreset::BestVideoAudio)
        .unwrap();
    assert_eq!(queue.items().len(), 3);

    queue.cancel();
    handle.await.unwrap();
    assert!(queue
        .items()
        .iter()
        .all(|item| item.status == ItemStatus::Canceled));
}

#[tokio::test]
async fn preset_change_applies_to_the_next_run() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let (queue, _rx) = queue_with(
        extractor.clone(),
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    let id = queue
        .enqueue("https://example.com/a", QualityPreset::BestVideoAudio)
        .unwrap();
    queue.set_preset(&id, QualityPreset::Res1080pMp4).unwrap();
    queue.start().unwrap().await.unwrap();

    assert_eq!(extractor.calls()[0].preset, QualityPreset::Res1080pMp4);
    assert!(matches!(
        queue.set_preset(&id, QualityPreset::Res720pMp4),
        Err(VidQueueError::OperationFailed(_))
    ));
}

#[tokio::test]
async fn missing_cookie_file_is_dropped_with_a_warning() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let mut config = settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent);
    config.cookie_file = Some(dir.path().join("missing-cookies.txt"));
    let (queue, mut rx) = queue_with(extractor.clone(), config);

    queue
        .enqueue("https://example.com/a", QualityPreset::BestVideoAudio)
        .unwrap();
    queue.start().unwrap().await.unwrap();

    assert_eq!(queue.items()[0].status, ItemStatus::Done);
    assert!(extractor.calls()[0].cookie_file.is_none());
    assert!(drain(&mut rx).iter().any(|e| matches!(
        e,
        QueueEvent::Message { text, .. } if text.starts_with("Cookie file not found")
    )));
}

#[tokio::test]
async fn existing_cookie_file_is_passed_on() {
    let dir = tempdir().unwrap();
    let cookies = dir.path().join("cookies.txt");
    std::fs::write(&cookies, "# Netscape HTTP Cookie File\n").unwrap();

    let extractor = ScriptedExtractor::new();
    let mut config = settings(dir.path().join("out"), CancelMode::InterruptCurrent);
    config.cookie_file = Some(cookies.clone());
    let (queue, _rx) = queue_with(extractor.clone(), config);

    queue
        .enqueue("https://example.com/a", QualityPreset::BestVideoAudio)
        .unwrap();
    queue.start().unwrap().await.unwrap();

    assert_eq!(extractor.calls()[0].cookie_file, Some(cookies));
    assert!(dir.path().join("out").is_dir());
}

#[tokio::test]
async fn progress_is_tracked_per_item() {
    let dir = tempdir().unwrap();
    let extractor = ScriptedExtractor::new();
    let (queue, mut rx) = queue_with(
        extractor,
        settings(dir.path().to_path_buf(), CancelMode::InterruptCurrent),
    );

    queue
        .enqueue("https://example.com/a", QualityPreset::BestVideoAudio)
        .unwrap();
    queue.start().unwrap().await.unwrap();

    let percents: Vec<Option<f64>> = drain(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            QueueEvent::Progress { percent, .. } => Some(percent),
            _ => None,
        })
        .collect();
    assert_eq!(percents, vec![Some(50.0), Some(100.0)]);
    assert_eq!(queue.overall_progress(), 1.0);
}

//! Audio playback controller tests

mod common;

use common::{clip_b64, drain_tasks, ManualAudioEngine};
use pinkfox_stage::{AudioEngine, AudioPlaybackController, PlaybackOutcome, StageError};
use std::sync::Arc;

fn controller() -> (AudioPlaybackController, Arc<ManualAudioEngine>) {
    let engine = Arc::new(ManualAudioEngine::default());
    let engine_dyn: Arc<dyn AudioEngine> = Arc::clone(&engine) as _;
    (
        AudioPlaybackController::new(engine_dyn),
        engine,
    )
}

#[tokio::test]
async fn empty_audio_fails_fast_without_touching_the_engine() {
    let (controller, engine) = controller();

    assert!(matches!(controller.play(""), Err(StageError::EmptyAudio)));
    assert!(matches!(controller.play("   "), Err(StageError::EmptyAudio)));
    assert_eq!(engine.begin_calls(), 0);
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn undecodable_base64_resolves_failed_without_an_engine_clip() {
    let (controller, engine) = controller();

    let completion = controller.play("%%%not-base64%%%").unwrap();
    let outcome = completion.await.unwrap();
    assert!(matches!(outcome, PlaybackOutcome::Failed(_)));
    assert_eq!(engine.begin_calls(), 0);
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn valid_clip_reaches_the_engine_decoded() {
    let (controller, engine) = controller();

    let completion = controller.play(&clip_b64()).unwrap();
    assert_eq!(engine.begin_calls(), 1);
    assert_eq!(
        engine.current_clip().unwrap().as_ref(),
        b"pinkfox-test-clip"
    );
    assert!(controller.is_playing());

    engine.finish_current(PlaybackOutcome::Ended);
    assert_eq!(completion.await.unwrap(), PlaybackOutcome::Ended);
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn engine_failure_resolves_the_completion() {
    let (controller, engine) = controller();

    let completion = controller.play(&clip_b64()).unwrap();
    engine.finish_current(PlaybackOutcome::Failed("decode error".to_string()));

    assert_eq!(
        completion.await.unwrap(),
        PlaybackOutcome::Failed("decode error".to_string())
    );
    assert!(!controller.is_playing());
}

#[tokio::test]
async fn second_play_without_cancel_is_busy() {
    let (controller, _engine) = controller();

    let _completion = controller.play(&clip_b64()).unwrap();
    assert!(matches!(
        controller.play(&clip_b64()),
        Err(StageError::PlaybackBusy)
    ));
}

#[tokio::test]
async fn play_after_natural_finish_is_allowed() {
    let (controller, engine) = controller();

    let completion = controller.play(&clip_b64()).unwrap();
    engine.finish_current(PlaybackOutcome::Ended);
    assert_eq!(completion.await.unwrap(), PlaybackOutcome::Ended);

    assert!(controller.play(&clip_b64()).is_ok());
    assert_eq!(engine.begin_calls(), 2);
}

#[tokio::test]
async fn cancel_stops_the_engine_and_resolves_cancelled() {
    let (controller, engine) = controller();

    let completion = controller.play(&clip_b64()).unwrap();
    controller.cancel();

    assert!(engine.stop_requested());
    assert!(!controller.is_playing());

    // The engine releases the clip without reporting an outcome
    engine.release_current();
    assert_eq!(
        completion.await.unwrap(),
        PlaybackOutcome::Failed("playback cancelled".to_string())
    );
}

#[tokio::test]
async fn cancel_when_idle_is_a_no_op() {
    let (controller, engine) = controller();
    controller.cancel();
    controller.cancel();
    assert_eq!(engine.begin_calls(), 0);

    // Still usable afterwards
    let _completion = controller.play(&clip_b64()).unwrap();
    assert_eq!(engine.begin_calls(), 1);
    drain_tasks().await;
}

#[tokio::test]
async fn play_is_allowed_again_after_cancel() {
    let (controller, engine) = controller();

    let _first = controller.play(&clip_b64()).unwrap();
    controller.cancel();

    let _second = controller.play(&clip_b64()).unwrap();
    assert_eq!(engine.begin_calls(), 2);
}

//! End-to-end persistence: a quiz session running over the real backends.

use bloomly_core::profile::Trait;
use bloomly_core::question::{QuestionBank, WeightTable};
use bloomly_core::session::{QuizSession, SubmitOutcome};
use bloomly_core::storage;
use bloomly_store::{FileStore, MemoryStore};

const FULL_PASS: [&str; 8] = [
    "Morning",
    "7–8",
    "Daily",
    "Yes, I love it",
    "Creative (art, writing, music)",
    "Often",
    "With others",
    "Rewards and goals",
];

async fn run_full_pass<S: bloomly_core::storage::KeyValueStore>(
    mut session: QuizSession<S>,
) -> bloomly_core::profile::Stats {
    let mut outcome = SubmitOutcome::Next { step: 0 };
    for answer in FULL_PASS {
        outcome = session.submit_answer(answer).await;
    }
    match outcome {
        SubmitOutcome::Completed(stats) => stats,
        other => panic!("expected completion, got {other:?}"),
    }
}

#[tokio::test]
async fn memory_store_full_pass() {
    let store = MemoryStore::new();
    let session =
        QuizSession::resume(&store, QuestionBank::builtin(), WeightTable::builtin()).await;

    let stats = run_full_pass(session).await;
    assert_eq!(stats.discipline, 75);
    assert_eq!(stats.dominant, Some(Trait::Discipline));

    // The profile is durable, the transient answer sequence is not.
    let saved = storage::load_profile(&store).await.expect("saved profile");
    assert_eq!(saved.stats, stats);
    assert!(saved.saved_at.is_some());
    assert!(storage::load_answers(&store).await.is_empty());
}

#[tokio::test]
async fn file_store_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("bloomly");

    {
        let store = FileStore::new(&data_dir);
        let mut session =
            QuizSession::resume(&store, QuestionBank::builtin(), WeightTable::builtin()).await;
        for answer in &FULL_PASS[..3] {
            session.submit_answer(*answer).await;
        }
    }

    // A new store over the same directory picks up the partial pass.
    let store = FileStore::new(&data_dir);
    let session =
        QuizSession::resume(&store, QuestionBank::builtin(), WeightTable::builtin()).await;
    assert_eq!(session.step(), 3);
    assert_eq!(session.current_question().unwrap().id, "q4");

    let stats = run_full_pass(session).await;
    assert_eq!(stats.discipline, 75);

    // And the finished profile is visible to yet another instance.
    let store = FileStore::new(&data_dir);
    let reloaded = storage::load_stats(&store).await.expect("saved profile");
    assert_eq!(reloaded, stats);
}

#[tokio::test]
async fn file_store_second_pass_blends() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());

    let session =
        QuizSession::resume(&store, QuestionBank::builtin(), WeightTable::builtin()).await;
    let first = run_full_pass(session).await;

    let session =
        QuizSession::resume(&store, QuestionBank::builtin(), WeightTable::builtin()).await;
    let second = run_full_pass(session).await;

    // Identical passes are a fixed point of the blend.
    assert_eq!(second.scores(), first.scores());
}

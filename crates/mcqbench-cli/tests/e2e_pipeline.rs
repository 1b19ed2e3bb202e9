//! End-to-end pipeline tests: dataset file → engine → report, driven by the
//! mock provider.

use std::collections::HashMap;
use std::path::PathBuf;

use mcqbench_core::dataset::{load_questions, DatasetOptions};
use mcqbench_core::engine::{EvalEngine, EvalEngineConfig, NoopReporter};
use mcqbench_core::model::{AnswerLetter, Verdict};
use mcqbench_core::prompt::{ANSWER_INSTRUCTION, REASONING_INSTRUCTION};
use mcqbench_providers::mock::MockProvider;

fn write_dataset(dir: &tempfile::TempDir, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join("questions.csv");
    std::fs::write(&path, bytes).unwrap();
    path
}

fn engine() -> EvalEngine {
    EvalEngine::new(EvalEngineConfig {
        model: "mock-model".into(),
        ..Default::default()
    })
}

#[tokio::test]
async fn e2e_three_question_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(
        &dir,
        b"question,topic,subtopic,answer\n\
          Q1,Math,Algebra,A\n\
          Q2,History,WWII,B\n\
          Q3,Math,Algebra,A\n",
    );

    let questions = load_questions(&path, &DatasetOptions::default()).unwrap();
    assert_eq!(questions.len(), 3);

    let provider = MockProvider::with_fixed_response("A");
    let report = engine()
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap();

    assert_eq!(provider.call_count(), 3);
    assert!((report.overall_accuracy - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.topic_accuracy["Math"], 1.0);
    assert_eq!(report.topic_accuracy["History"], 0.0);
    assert_eq!(report.subtopic_accuracy["Algebra"], 1.0);
    assert_eq!(report.subtopic_accuracy["WWII"], 0.0);

    let summary = report.summary();
    assert!(summary.contains("Overall Accuracy: 66.67%"));
    assert!(summary.contains("  • History: 0.00%"));
    assert!(summary.contains("  • Math: 100.00%"));
    // Topics are listed alphabetically.
    assert!(summary.find("History").unwrap() < summary.find("Math").unwrap());
}

#[tokio::test]
async fn e2e_reasoning_prompts_follow_topic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(
        &dir,
        b"question,topic,subtopic,answer\n\
          What accelerates a falling apple?,Physics,Mechanics,C\n\
          Who signed the Magna Carta?,History,Medieval,D\n\
          What is the pH of pure water?,Chemistry,Acids,B\n",
    );

    let questions = load_questions(&path, &DatasetOptions::default()).unwrap();
    let provider = MockProvider::with_fixed_response("C");
    engine()
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts.iter().all(|p| p.contains(ANSWER_INSTRUCTION)));
    assert!(prompts[0].ends_with(REASONING_INSTRUCTION));
    assert!(!prompts[1].contains(REASONING_INSTRUCTION));
    assert!(prompts[2].ends_with(REASONING_INSTRUCTION));
}

#[tokio::test]
async fn e2e_topic_filter_and_cap() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = String::from("question,topic,subtopic,answer\n");
    for i in 0..10 {
        let topic = if i % 2 == 0 { "Math" } else { "Biology" };
        csv.push_str(&format!("Question {i},{topic},Sub{i},A\n"));
    }
    let path = write_dataset(&dir, csv.as_bytes());

    let options = DatasetOptions::default()
        .with_topics(["Biology"])
        .with_max_samples(3);
    let questions = load_questions(&path, &options).unwrap();
    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|q| q.topic == "Biology"));
    assert_eq!(questions[0].question, "Question 1");
    assert_eq!(questions[2].question, "Question 5");

    let provider = MockProvider::with_fixed_response("a");
    let report = engine()
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap();
    assert_eq!(report.overall_accuracy, 1.0);
    assert_eq!(report.topic_accuracy.len(), 1);
}

#[tokio::test]
async fn e2e_latin1_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = b"question,topic,subtopic,answer\n".to_vec();
    for _ in 0..10 {
        // "Qu\xe9 es la energ\xeda cin\xe9tica?" in Windows-1252
        bytes.extend_from_slice(
            b"\"Qu\xe9 es la energ\xeda cin\xe9tica? A) Movimiento B) Calor C) Luz D) Masa\",F\xedsica,Energ\xeda,A\n",
        );
    }
    let path = write_dataset(&dir, &bytes);

    let questions = load_questions(&path, &DatasetOptions::default()).unwrap();
    assert_eq!(questions.len(), 10);
    assert!(questions.iter().all(|q| !q.question.contains('\u{FFFD}')));

    let provider = MockProvider::with_fixed_response("A");
    let report = engine()
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap();
    assert_eq!(report.overall_accuracy, 1.0);
}

#[tokio::test]
async fn e2e_mixed_responses() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(
        &dir,
        b"question,topic,subtopic,answer\n\
          Capital of France?,Geography,Europe,B\n\
          Largest ocean?,Geography,Oceans,D\n\
          Speed unit?,Physics,Units,A\n",
    );
    let questions = load_questions(&path, &DatasetOptions::default()).unwrap();

    let mut responses = HashMap::new();
    responses.insert("Capital of France".to_string(), " b) Paris".to_string());
    responses.insert("Largest ocean".to_string(), "Pacific, so D".to_string());
    responses.insert("Speed unit".to_string(), "A".to_string());
    let provider = MockProvider::new(responses).with_metadata();

    let report = engine()
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap();

    assert_eq!(report.outcomes[0].verdict, Verdict::Letter(AnswerLetter::B));
    assert_eq!(report.outcomes[1].verdict, Verdict::Unrecognized);
    assert_eq!(report.outcomes[1].expected, AnswerLetter::D);
    assert!(!report.outcomes[1].correct);
    assert_eq!(report.unrecognized, 1);
    assert_eq!(report.topic_accuracy["Geography"], 0.5);
    assert_eq!(report.topic_accuracy["Physics"], 1.0);
}

#[tokio::test]
async fn e2e_provider_failure_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(
        &dir,
        b"question,topic,subtopic,answer\n\
          First,Math,Algebra,A\n\
          Poisoned second,Math,Algebra,A\n\
          Third,Math,Algebra,A\n",
    );
    let questions = load_questions(&path, &DatasetOptions::default()).unwrap();

    let provider = MockProvider::with_fixed_response("A").failing_on("Poisoned");
    let err = engine()
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("question 2/3"));
    assert!(message.contains("mock/mock-model"));
    assert!(message.contains("HTTP 500"));
    // The third question is never attempted.
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn e2e_system_prompt_is_forwarded() {
    let provider = MockProvider::with_fixed_response("A");
    let engine = EvalEngine::new(EvalEngineConfig {
        model: "mock-model".into(),
        system_prompt: Some("You are a careful examiner.".into()),
        max_tokens: 16,
        ..Default::default()
    });

    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, b"question,topic,subtopic,answer\nQ,Art,Painting,A\n");
    let questions = load_questions(&path, &DatasetOptions::default()).unwrap();
    engine
        .evaluate(&questions, &provider, &NoopReporter)
        .await
        .unwrap();

    let request = provider.last_request().unwrap();
    assert_eq!(
        request.system_prompt.as_deref(),
        Some("You are a careful examiner.")
    );
    assert_eq!(request.max_tokens, 16);
    assert_eq!(request.model, "mock-model");
}

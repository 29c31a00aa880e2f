//! Session grading orchestrator.
//!
//! Grades whole answer sheets against an exercise set, and drives recorded
//! read-aloud answers through a speech recognizer before scoring them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::error::GradingError;
use crate::model::{AnswerSheet, Exercise, ExerciseSet};
use crate::results::{GradedSession, QuestionResult};
use crate::scoring::score_response_opt;
use crate::statistics::summarize;
use crate::traits::{Playback, Recording, SpeechRecognizer, SpeechSynthesizer, SynthesisRequest};

/// Grade one response to one exercise.
pub fn grade_answer(exercise: &Exercise, response: Option<&str>) -> QuestionResult {
    QuestionResult {
        exercise_id: exercise.id.clone(),
        kind: exercise.kind,
        reference: exercise.text.clone(),
        response: response.map(str::to_string),
        result: score_response_opt(Some(&exercise.text), response),
    }
}

/// Grade an answer sheet against an exercise set.
///
/// Every exercise in the set gets a result, in set order. Exercises with no
/// answer are scored as empty responses.
pub fn grade_session(
    set: &ExerciseSet,
    sheet: &AnswerSheet,
) -> std::result::Result<GradedSession, GradingError> {
    let mut responses: HashMap<&str, Option<&str>> = HashMap::new();
    for answer in &sheet.answers {
        if set.exercise(&answer.exercise_id).is_none() {
            return Err(GradingError::UnknownExercise(answer.exercise_id.clone()));
        }
        if responses
            .insert(answer.exercise_id.as_str(), answer.response.as_deref())
            .is_some()
        {
            return Err(GradingError::DuplicateAnswer(answer.exercise_id.clone()));
        }
    }

    let questions: Vec<QuestionResult> = set
        .exercises
        .iter()
        .map(|exercise| {
            let response = responses.get(exercise.id.as_str()).copied().flatten();
            grade_answer(exercise, response)
        })
        .collect();

    let summary = summarize(&questions);
    tracing::info!(
        student = sheet.student_name(),
        exercise_set = %set.id,
        questions = summary.question_count,
        overall = summary.overall_score.value(),
        "graded session"
    );

    Ok(GradedSession {
        student: sheet.student_name().to_string(),
        questions,
        summary,
    })
}

/// Transcribe a recording and grade the transcript.
pub async fn grade_recording(
    recognizer: &dyn SpeechRecognizer,
    exercise: &Exercise,
    recording: &Recording,
) -> Result<QuestionResult> {
    let transcript = recognizer.recognize(recording).await?;
    tracing::debug!(
        recognizer = recognizer.name(),
        exercise = %exercise.id,
        confidence = ?transcript.confidence,
        "recognized recording"
    );
    Ok(grade_answer(exercise, Some(&transcript.text)))
}

/// Transcribe and grade many recordings with bounded concurrency.
///
/// Results come back in input order. A failed recognition fails the batch.
pub async fn grade_recordings(
    recognizer: Arc<dyn SpeechRecognizer>,
    items: Vec<(Exercise, Recording)>,
    parallelism: usize,
) -> Result<Vec<QuestionResult>> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let semaphore = Arc::new(Semaphore::new(parallelism));
    let mut futures = FuturesUnordered::new();

    for (index, (exercise, recording)) in items.into_iter().enumerate() {
        let recognizer = Arc::clone(&recognizer);
        let semaphore = Arc::clone(&semaphore);
        futures.push(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
            let result = grade_recording(recognizer.as_ref(), &exercise, &recording).await;
            result.map(|r| (index, r))
        });
    }

    let mut graded = Vec::with_capacity(futures.len());
    while let Some(outcome) = futures.next().await {
        graded.push(outcome?);
    }
    graded.sort_by_key(|(index, _)| *index);

    Ok(graded.into_iter().map(|(_, result)| result).collect())
}

/// Synthesize the audio prompt for a dictation exercise.
pub async fn dictation_prompt(
    synthesizer: &dyn SpeechSynthesizer,
    exercise: &Exercise,
    rate: f64,
) -> Result<Playback> {
    anyhow::ensure!(rate > 0.0, "speaking rate must be positive");
    let request = SynthesisRequest {
        text: exercise.text.clone(),
        language: "en-US".to_string(),
        rate,
    };
    synthesizer.synthesize(&request).await
}

/// Exercise IDs in `set` that have no answer on `sheet`.
pub fn unanswered<'a>(set: &'a ExerciseSet, sheet: &AnswerSheet) -> Vec<&'a str> {
    let answered: HashSet<&str> = sheet
        .answers
        .iter()
        .filter(|a| a.response.as_deref().is_some_and(|r| !r.trim().is_empty()))
        .map(|a| a.exercise_id.as_str())
        .collect();
    set.exercises
        .iter()
        .map(|e| e.id.as_str())
        .filter(|id| !answered.contains(id))
        .collect()
}

// src/session/quiz.rs

use serde::Serialize;

use crate::{
    error::AppError,
    models::{
        question::{PublicQuestion, QuizQuestion},
        topic::Topic,
    },
};

/// Notice shown to the learner when question generation fails.
pub const GENERATION_FAILED_NOTICE: &str =
    "퀴즈 생성 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizPhase {
    TopicSelect,
    Loading,
    InProgress,
    Completed,
}

/// Issued by `select_topic`; must be handed back to `finish_loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub topic: Topic,
    generation: u64,
}

/// What happened to a generation result handed to `finish_loading`.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Questions installed, first question active.
    Ready,
    /// Generation failed; back at topic selection with a notice.
    Failed(AppError),
    /// The quiz was reset (or reloaded) in the meantime; result dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The current question was already answered; nothing changed.
    AlreadyRevealed,
}

/// Quiz state machine: TopicSelect -> Loading -> InProgress -> Completed.
#[derive(Debug, Default)]
pub struct QuizSession {
    topic: Option<Topic>,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    score: usize,
    revealed: bool,
    selected_answer: Option<usize>,
    completed: bool,
    loading: bool,
    notice: Option<String>,
    generation: u64,
    /// Generation whose gateway call has not returned yet. Survives `reset`.
    in_flight: Option<u64>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        if self.loading {
            QuizPhase::Loading
        } else if self.completed {
            QuizPhase::Completed
        } else if !self.questions.is_empty() {
            QuizPhase::InProgress
        } else {
            QuizPhase::TopicSelect
        }
    }

    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// True while a question request is outstanding, even if the quiz was reset.
    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase() {
            QuizPhase::InProgress => self.questions.get(self.current_index),
            _ => None,
        }
    }

    /// Starts loading questions for `topic`. Prior questions and score are
    /// cleared immediately.
    ///
    /// Only one question request may be outstanding per session: after a
    /// reset the next topic is refused until the abandoned request returns.
    pub fn select_topic(&mut self, topic: Topic) -> Result<LoadTicket, AppError> {
        if self.phase() != QuizPhase::TopicSelect {
            return Err(AppError::Conflict(
                "A quiz is already running; reset it before choosing a new topic".to_string(),
            ));
        }
        if self.in_flight.is_some() {
            return Err(AppError::Conflict(
                "Previous questions are still being generated; try again shortly".to_string(),
            ));
        }

        self.clear();
        self.topic = Some(topic);
        self.loading = true;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        tracing::debug!("Quiz loading topic {} (generation {})", topic.key(), self.generation);

        Ok(LoadTicket {
            topic,
            generation: self.generation,
        })
    }

    /// Applies the gateway result for `ticket`.
    pub fn finish_loading(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<QuizQuestion>, AppError>,
    ) -> LoadOutcome {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }
        if !self.loading || ticket.generation != self.generation {
            tracing::warn!(
                "Discarding stale quiz result for topic {} (generation {})",
                ticket.topic.key(),
                ticket.generation
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(questions) if !questions.is_empty() => {
                self.questions = questions;
                self.current_index = 0;
                self.score = 0;
                tracing::debug!("Quiz ready with {} questions", self.questions.len());
                LoadOutcome::Ready
            }
            Ok(_) => self.fail(AppError::Generation("No questions were generated".to_string())),
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: AppError) -> LoadOutcome {
        tracing::warn!("Quiz generation failed: {}", err);
        self.topic = None;
        self.notice = Some(GENERATION_FAILED_NOTICE.to_string());
        LoadOutcome::Failed(err)
    }

    /// Answers the active question. A second call before `advance` is a no-op.
    pub fn submit_answer(&mut self, index: usize) -> Result<AnswerOutcome, AppError> {
        let question = self
            .current_question()
            .ok_or_else(|| AppError::Conflict("No question is active".to_string()))?;

        if self.revealed {
            return Ok(AnswerOutcome::AlreadyRevealed);
        }
        if index >= question.options.len() {
            return Err(AppError::BadRequest(format!(
                "Answer index {} is out of range",
                index
            )));
        }

        let correct = question.is_correct(index);
        self.selected_answer = Some(index);
        self.revealed = true;
        if correct {
            self.score += 1;
            Ok(AnswerOutcome::Correct)
        } else {
            Ok(AnswerOutcome::Incorrect)
        }
    }

    /// Moves past a revealed question. Returns `false` (no-op) while the
    /// active question is still unanswered.
    pub fn advance(&mut self) -> Result<bool, AppError> {
        if self.phase() != QuizPhase::InProgress {
            return Err(AppError::Conflict("No question is active".to_string()));
        }
        if !self.revealed {
            return Ok(false);
        }

        self.revealed = false;
        self.selected_answer = None;
        if self.current_index + 1 >= self.questions.len() {
            self.completed = true;
            tracing::debug!("Quiz completed with score {}/{}", self.score, self.questions.len());
        } else {
            self.current_index += 1;
        }
        Ok(true)
    }

    /// Returns to topic selection from any phase. An in-flight load is
    /// invalidated and its result will be dropped.
    pub fn reset(&mut self) {
        self.clear();
        self.topic = None;
        self.generation += 1;
    }

    fn clear(&mut self) {
        self.questions.clear();
        self.current_index = 0;
        self.score = 0;
        self.revealed = false;
        self.selected_answer = None;
        self.completed = false;
        self.loading = false;
        self.notice = None;
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let current = self.current_question().map(|question| {
            if self.revealed {
                PublicQuestion::revealed(question, self.selected_answer)
            } else {
                PublicQuestion::hidden(question)
            }
        });

        QuizSnapshot {
            phase: self.phase(),
            generating: self.is_generating(),
            topic: self.topic,
            total: self.questions.len(),
            current_index: self.current_index,
            score: self.score,
            revealed: self.revealed,
            selected_answer: self.selected_answer,
            current,
            notice: self.notice.clone(),
        }
    }
}

/// Serializable view of the quiz for the front-end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSnapshot {
    pub phase: QuizPhase,
    pub generating: bool,
    pub topic: Option<Topic>,
    pub total: usize,
    pub current_index: usize,
    pub score: usize,
    pub revealed: bool,
    pub selected_answer: Option<usize>,
    pub current: Option<PublicQuestion>,
    pub notice: Option<String>,
}

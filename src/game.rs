//! Turn-by-turn game flow.
//!
//! A [`Session`] is plain data owned by the caller. [`Engine::start`] opens a
//! game and [`Engine::answer`] consumes one answer, returning the updated
//! session together with either the next question or a final [`Verdict`].
//! The only source of non-determinism is the pick among perfectly tied
//! candidates, which draws from the caller's `Rng`.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::answer::{AnswerState, parse_answer};
use crate::catalog::Entity;
use crate::catalog::keys::VIVANT;
use crate::engine::Engine;
use crate::error::{GameError, GameResult};
use crate::propagate::propagate;
use crate::questions::QuestionPayload;
use crate::score::{Ranked, Scorer, detect_perfect_ties};
use crate::select::QuestionSelector;

/// Per-game state threaded through every turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub answers: AnswerState,
    /// Every question presented so far, answered or not.
    pub asked: BTreeSet<String>,
    pub last_answer_unknown: bool,
}

impl Session {
    pub fn question_count(&self) -> usize {
        self.asked.len()
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    PerfectTie,
    MaxQuestionsReached,
    GapSufficient,
    EarlyConfidence,
    NoQuestionAvailable,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PerfectTie => "perfect tie",
            Self::MaxQuestionsReached => "max questions reached",
            Self::GapSufficient => "gap sufficient",
            Self::EarlyConfidence => "early confidence",
            Self::NoQuestionAvailable => "no question available",
        };
        f.write_str(s)
    }
}

/// Scores and counters behind a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictDebug {
    pub gap: f64,
    pub best_score: f64,
    pub second_score: Option<f64>,
    /// Entities that went into the ranking.
    pub candidates_count: usize,
    pub questions_asked: usize,
    pub max_questions: usize,
}

/// The engine's final answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub prediction: String,
    /// Top alternates, or every tied entity for a perfect tie.
    pub candidates: Vec<String>,
    pub reason: StopReason,
    pub debug: VerdictDebug,
}

impl Verdict {
    /// Player-facing note for verdicts that need one.
    pub fn message(&self) -> Option<String> {
        match self.reason {
            StopReason::PerfectTie => Some(format!(
                "Impossible de choisir entre : {}. Ces mots sont trop similaires.",
                self.candidates.join(", ")
            )),
            _ => None,
        }
    }
}

/// Outcome of a turn as seen by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    Ask(QuestionPayload),
    Done(Verdict),
}

/// Internal outcome of the termination cascade.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Ask { key: String, tiebreaker: bool },
    Stop(Verdict),
}

impl Engine {
    /// Open a new game with its first question.
    pub fn start(&self) -> GameResult<(Session, QuestionPayload)> {
        let catalog = self.catalog();
        if catalog.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let first = if catalog.schema().contains(VIVANT) {
            VIVANT
        } else {
            catalog
                .question_pool()
                .first()
                .map(String::as_str)
                .ok_or(GameError::NoQuestions)?
        };

        let mut session = Session::default();
        session.asked.insert(first.to_string());
        tracing::debug!(question = first, "game started");
        let payload = QuestionPayload::new(first, 1, self.config().total_questions(), false);
        Ok((session, payload))
    }

    /// Apply one answer and decide what happens next.
    ///
    /// A `question_id` the catalog does not know is ignored. A token outside
    /// the answer vocabulary counts as "unknown": the question stays asked but
    /// nothing is recorded.
    pub fn answer<R: Rng + ?Sized>(
        &self,
        mut session: Session,
        question_id: Option<&str>,
        raw: &Value,
        rng: &mut R,
    ) -> GameResult<(Session, Turn)> {
        let schema = self.catalog().schema();
        let question_id = question_id.filter(|id| schema.contains(id));
        let parsed = parse_answer(raw);
        session.last_answer_unknown = parsed.is_none();

        if let Some(id) = question_id {
            session.asked.insert(id.to_string());
            if let Some(answer) = parsed {
                session.answers.set(id, answer);
            }
        }
        propagate(schema, &mut session.answers);

        let turn = match self.decide(&session, rng)? {
            Decision::Ask { key, tiebreaker } => {
                session.asked.insert(key.clone());
                let total = if tiebreaker {
                    self.config().max_questions()
                } else {
                    self.config().total_questions()
                };
                let payload =
                    QuestionPayload::new(&key, session.question_count(), total, tiebreaker);
                tracing::debug!(
                    question = %payload.id,
                    number = payload.number,
                    tiebreaker,
                    "next question"
                );
                Turn::Ask(payload)
            }
            Decision::Stop(verdict) => {
                tracing::debug!(
                    prediction = %verdict.prediction,
                    reason = %verdict.reason,
                    gap = verdict.debug.gap,
                    "game over"
                );
                Turn::Done(verdict)
            }
        };
        Ok((session, turn))
    }

    /// Run the termination cascade for an already-propagated session.
    pub fn decide<R: Rng + ?Sized>(&self, session: &Session, rng: &mut R) -> GameResult<Decision> {
        let config = self.config();
        let scorer = Scorer::new(self.catalog());
        let answers = &session.answers;

        let candidates = scorer.structural_candidates(
            answers,
            config.structural_margin,
            config.min_filtered_candidates,
        );
        let candidates_count = candidates.len();
        let ranked = scorer.rank(answers, candidates);
        let Some(best) = ranked.first() else {
            return Err(GameError::EmptyCatalog);
        };

        let count = session.question_count();
        let total = config.total_questions();
        let cap = config.max_questions();
        let second = ranked.get(1).map(|r| r.score);
        let gap = second.unwrap_or(best.score + 999.0) - best.score;
        let debug = VerdictDebug {
            gap,
            best_score: best.score,
            second_score: second,
            candidates_count,
            questions_asked: count,
            max_questions: cap,
        };
        let stop = |reason: StopReason| {
            Decision::Stop(Verdict {
                prediction: best.name().to_string(),
                candidates: names(ranked.iter().take(config.alternates)),
                reason,
                debug: debug.clone(),
            })
        };

        if count >= config.tie_min_questions {
            let ties = detect_perfect_ties(&ranked, config.tie_epsilon);
            if let Some(pick) = ties.choose(rng) {
                return Ok(Decision::Stop(Verdict {
                    prediction: pick.name().to_string(),
                    candidates: names(ties.iter().copied()),
                    reason: StopReason::PerfectTie,
                    debug: debug.clone(),
                }));
            }
        }

        let focus: Vec<&Entity> = ranked
            .iter()
            .take(config.focus_size)
            .map(|r| r.entity)
            .collect();
        let selector = QuestionSelector::new(self.catalog());
        let next =
            || selector.choose_next(answers, &session.asked, &focus, session.last_answer_unknown);

        if count >= total {
            if count < cap && gap < config.tiebreak_gap {
                if let Some(key) = next() {
                    return Ok(Decision::Ask {
                        key,
                        tiebreaker: true,
                    });
                }
            }
            let reason = if count >= cap {
                StopReason::MaxQuestionsReached
            } else if gap >= config.tiebreak_gap {
                StopReason::GapSufficient
            } else {
                StopReason::NoQuestionAvailable
            };
            return Ok(stop(reason));
        }

        if count >= config.early_stop_min_questions && gap > config.early_stop_gap {
            return Ok(stop(StopReason::EarlyConfidence));
        }

        Ok(match next() {
            Some(key) => Decision::Ask {
                key,
                tiebreaker: false,
            },
            None => stop(StopReason::NoQuestionAvailable),
        })
    }
}

fn names<'r, 'a: 'r>(ranked: impl Iterator<Item = &'r Ranked<'a>>) -> Vec<String> {
    ranked.map(|r| r.name().to_string()).collect()
}

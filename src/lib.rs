// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # guesswork
//!
//! An adaptive "guess the word" engine. Words are described by sparse
//! numeric attributes; each turn the engine scores every word against the
//! player's yes/no answers and asks the attribute that best splits the
//! current front-runners, until one word stands out.
//!
//! ## Architecture
//!
//! - **Catalog** (`catalog`): raw JSON records → schema, specs, importances, entities
//! - **Propagation** (`propagate`): logical implications between answers
//! - **Scoring** (`score`): logistic answer model, loss ranking, information gain
//! - **Selection** (`select`): ordered rule table picking the next question
//! - **Game** (`game`): sessions, turns, termination and tie-breaks
//!
//! ## Library usage
//!
//! ```no_run
//! use guesswork::config::GameConfig;
//! use guesswork::engine::Engine;
//! use guesswork::game::Turn;
//!
//! let engine = Engine::from_path("data/words.json".as_ref(), GameConfig::default()).unwrap();
//! let mut rng = rand::thread_rng();
//! let (session, question) = engine.start().unwrap();
//! let (_session, turn) = engine
//!     .answer(session, Some(&question.id), &"oui".into(), &mut rng)
//!     .unwrap();
//! if let Turn::Ask(next) = turn {
//!     println!("{}", next.text);
//! }
//! ```

pub mod answer;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod game;
pub mod propagate;
pub mod questions;
pub mod score;
pub mod select;

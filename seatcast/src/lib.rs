// BSD 3-Clause License
//
// Copyright (c) 2025, Seatcast Contributors
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Rajya Sabha seat forecasting from Maharashtra assembly strength.
//!
//! The crate turns a historical table of (year, party) election rows into
//! a fitted binary classifier and descriptive statistics:
//!
//! - [`clean`] normalizes raw rows into the canonical table (one-shot).
//! - [`data`] loads and persists that table as CSV.
//! - [`features`] derives the fixed feature layout used for both training
//!   and prediction, including the recency decay.
//! - [`algorithms`] holds the classifiers (logistic regression and a
//!   random forest) behind the [`algorithms::Classifier`] trait.
//! - [`model`] fits a [`model::TrainedModel`] and answers predictions for
//!   the next election cycle.
//! - [`request`] validates incoming prediction requests before any model
//!   call.
//! - [`stats`] computes party summaries and dataset counts.

pub mod algorithms;
pub mod clean;
pub mod data;
pub mod errors;
pub mod features;
pub mod losses;
pub mod model;
pub mod optimizers;
pub mod request;
pub mod scalers;
pub mod stats;

pub use data::{CandidateType, ElectionRecord, RawRecord};
pub use features::Standing;
pub use model::{ModelKind, Prediction, TrainedModel};

//! Submit workflow: validate, upload, render.
//!
//! `idle → validating → rejected → idle`, or
//! `idle → validating → in-flight → (success | http-error | network-error) → idle`.
//! Every submission gets a fresh [`RequestId`]; only the newest one may render
//! its outcome or clear the loading flag.

use crate::client::{Classifier, ImageUpload};
use crate::error::{ClassifyError, FailureKind};
use crate::messages::{Language, RenderedResult};
use crate::{Prediction, SelectedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// What the result area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultView {
    #[default]
    Empty,
    MissingFile,
    Prediction(Prediction),
    ServerError,
    Unreachable,
}

impl ResultView {
    pub fn render(&self, language: Language) -> RenderedResult {
        match self {
            ResultView::Empty => RenderedResult::default(),
            ResultView::MissingFile => RenderedResult::plain(language.missing_file()),
            ResultView::Prediction(p) => {
                RenderedResult::prediction(language, &p.prediction, &p.confidence)
            }
            ResultView::ServerError => RenderedResult::plain(language.server_error()),
            ResultView::Unreachable => RenderedResult::plain(language.unreachable()),
        }
    }
}

impl From<Result<Prediction, ClassifyError>> for ResultView {
    fn from(outcome: Result<Prediction, ClassifyError>) -> Self {
        match outcome {
            Ok(prediction) => ResultView::Prediction(prediction),
            Err(err) => match err.kind() {
                FailureKind::Server => ResultView::ServerError,
                FailureKind::Connectivity => ResultView::Unreachable,
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct Submission {
    last_issued: u64,
    in_flight: Option<RequestId>,
    result: ResultView,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a submission. Returns `None` when nothing is selected, in which
    /// case the guidance message is shown and no request may be made.
    pub fn submit(&mut self, file: Option<&SelectedFile>) -> Option<RequestId> {
        let Some(file) = file else {
            tracing::info!("Submit without a selected image");
            self.result = ResultView::MissingFile;
            return None;
        };
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        if let Some(previous) = self.in_flight.replace(id) {
            tracing::debug!("Request {previous:?} superseded by {id:?}");
        }
        self.result = ResultView::Empty;
        tracing::info!("Submitting {} as {id:?}", file.name);
        Some(id)
    }

    /// Concludes a request. Outcomes of superseded requests are dropped.
    /// Returns true when the outcome was rendered.
    pub fn finish(&mut self, id: RequestId, outcome: Result<Prediction, ClassifyError>) -> bool {
        if self.in_flight != Some(id) {
            tracing::debug!("Ignoring outcome of stale request {id:?}");
            return false;
        }
        self.in_flight = None;
        if let Err(err) = &outcome {
            match err.kind() {
                FailureKind::Server => tracing::warn!("Classification rejected: {err}"),
                FailureKind::Connectivity => tracing::error!("Classification failed: {err}"),
            }
        }
        self.result = ResultView::from(outcome);
        true
    }

    /// Runs one submission to completion on the calling thread.
    pub fn run<C>(&mut self, classifier: &C, file: Option<&SelectedFile>) -> &ResultView
    where
        C: Classifier + ?Sized,
    {
        if let (Some(id), Some(file)) = (self.submit(file), file) {
            let outcome =
                ImageUpload::from_file(file).and_then(|upload| classifier.classify(&upload));
            self.finish(id, outcome);
        }
        &self.result
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn result(&self) -> &ResultView {
        &self.result
    }
}

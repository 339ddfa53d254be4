//! Background jobs for the two slow steps (file decode, upload) and the
//! connection check. Results come back to the UI thread over a channel.

use eframe::egui;
use petlens_core::{
    ClassifyError, Classifier, DataUrl, DecodeTicket, HttpClassifier, ImageUpload, Prediction,
    RequestId, SelectedFile,
};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

pub(crate) enum WorkerEvent {
    Decoded {
        ticket: DecodeTicket,
        result: anyhow::Result<DataUrl>,
    },
    Classified {
        id: RequestId,
        outcome: Result<Prediction, ClassifyError>,
    },
    Health(Result<String, ClassifyError>),
}

/// Sends a job's event exactly once. If the job unwinds before replying, the
/// drop sends the fallback instead so the UI never waits forever.
struct ReplyGuard {
    tx: Sender<WorkerEvent>,
    ctx: egui::Context,
    fallback: Option<WorkerEvent>,
}

impl ReplyGuard {
    fn new(ctx: &egui::Context, tx: Sender<WorkerEvent>, fallback: WorkerEvent) -> Self {
        Self {
            tx,
            ctx: ctx.clone(),
            fallback: Some(fallback),
        }
    }

    fn send(mut self, event: WorkerEvent) {
        self.fallback = None;
        self.deliver(event);
    }

    fn deliver(&self, event: WorkerEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("UI closed before a background job finished");
        }
        self.ctx.request_repaint();
    }
}

impl Drop for ReplyGuard {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            tracing::warn!("Background job stopped before replying");
            self.deliver(fallback);
        }
    }
}

fn stopped() -> ClassifyError {
    ClassifyError::Transport("background job stopped unexpectedly".into())
}

/// Runs `job` on its own thread and delivers its event through a [`ReplyGuard`].
fn spawn_guarded<F>(ctx: &egui::Context, tx: Sender<WorkerEvent>, fallback: WorkerEvent, job: F)
where
    F: FnOnce() -> WorkerEvent + Send + 'static,
{
    let guard = ReplyGuard::new(ctx, tx, fallback);
    thread::spawn(move || {
        let event = job();
        guard.send(event);
    });
}

pub(crate) fn spawn_decode(
    ctx: &egui::Context,
    tx: Sender<WorkerEvent>,
    ticket: DecodeTicket,
    file: SelectedFile,
) {
    let fallback = WorkerEvent::Decoded {
        ticket,
        result: Err(stopped().into()),
    };
    spawn_guarded(ctx, tx, fallback, move || WorkerEvent::Decoded {
        ticket,
        result: DataUrl::read(&file.path),
    });
}

pub(crate) fn spawn_classify(
    ctx: &egui::Context,
    tx: Sender<WorkerEvent>,
    classifier: Arc<dyn Classifier>,
    id: RequestId,
    file: SelectedFile,
) {
    let fallback = WorkerEvent::Classified {
        id,
        outcome: Err(stopped()),
    };
    spawn_guarded(ctx, tx, fallback, move || {
        let outcome =
            ImageUpload::from_file(&file).and_then(|upload| classifier.classify(&upload));
        WorkerEvent::Classified { id, outcome }
    });
}

pub(crate) fn spawn_health_check(
    ctx: &egui::Context,
    tx: Sender<WorkerEvent>,
    classifier: Arc<HttpClassifier>,
) {
    let fallback = WorkerEvent::Health(Err(stopped()));
    spawn_guarded(ctx, tx, fallback, move || {
        WorkerEvent::Health(classifier.check_health())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use petlens_core::Submission;
    use std::sync::mpsc;

    struct PanickingClassifier;

    impl Classifier for PanickingClassifier {
        fn classify(&self, _upload: &ImageUpload) -> Result<Prediction, ClassifyError> {
            panic!("classifier blew up");
        }
    }

    #[test]
    fn panicking_job_still_concludes_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();
        let file = SelectedFile::new(&path);

        let mut submission = Submission::new();
        let id = submission.submit(Some(&file)).unwrap();
        let (tx, rx) = mpsc::channel();
        spawn_classify(
            &egui::Context::default(),
            tx,
            Arc::new(PanickingClassifier),
            id,
            file,
        );

        let event = rx.recv().unwrap();
        let WorkerEvent::Classified { id: got, outcome } = event else {
            panic!("expected a classification event");
        };
        assert!(submission.finish(got, outcome));
        assert!(!submission.is_loading());
        assert_eq!(submission.result(), &petlens_core::ResultView::Unreachable);
    }

    #[test]
    fn panicking_health_job_still_replies() {
        let (tx, rx) = mpsc::channel();
        spawn_guarded(
            &egui::Context::default(),
            tx,
            WorkerEvent::Health(Err(stopped())),
            || panic!("health check blew up"),
        );

        match rx.recv().unwrap() {
            WorkerEvent::Health(Err(ClassifyError::Transport(msg))) => {
                assert!(msg.contains("stopped"));
            }
            _ => panic!("expected a failed health event"),
        }
        assert!(rx.recv().is_err());
    }

    #[test]
    fn finished_job_replies_once() {
        let (tx, rx) = mpsc::channel();
        spawn_guarded(
            &egui::Context::default(),
            tx,
            WorkerEvent::Health(Err(stopped())),
            || WorkerEvent::Health(Ok("Bem-vindo".into())),
        );

        assert!(matches!(rx.recv().unwrap(), WorkerEvent::Health(Ok(m)) if m == "Bem-vindo"));
        assert!(rx.recv().is_err());
    }
}

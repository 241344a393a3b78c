use std::sync::mpsc;
use std::thread;

use crate::cancel::CancelFlag;
use crate::engine::{ToggleEngine, ToggleEvent};
use crate::error::{Error, Result};
use crate::result::{ToggleRequest, ToggleResult};

/// Messages sent from the background thread to the caller.
#[derive(Debug)]
pub enum WorkerMessage {
    Event(ToggleEvent),
    Finished(ToggleResult),
}

/// Run one toggle on a background thread.
///
/// The receiver yields every event in order and then exactly one
/// `Finished`, also when the run was cancelled.
pub fn spawn(request: ToggleRequest, cancel: CancelFlag) -> mpsc::Receiver<WorkerMessage> {
    let (tx, rx) = mpsc::channel::<WorkerMessage>();

    thread::spawn(move || {
        let engine = ToggleEngine::new();
        let result = engine.run(&request, &cancel, &mut |event: &ToggleEvent| {
            let _ = tx.send(WorkerMessage::Event(event.clone()));
        });
        let _ = tx.send(WorkerMessage::Finished(result));
    });

    rx
}

/// Drain `rx`, handing each event to `on_event`, and return the final result.
pub fn wait(
    rx: mpsc::Receiver<WorkerMessage>,
    mut on_event: impl FnMut(&ToggleEvent),
) -> Result<ToggleResult> {
    for msg in rx {
        match msg {
            WorkerMessage::Event(event) => on_event(&event),
            WorkerMessage::Finished(result) => return Ok(result),
        }
    }
    Err(Error::Worker("channel closed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ToggleMode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn streams_events_then_result() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Xamarin.Foo.xml"), "").unwrap();
        fs::write(tmp.path().join("Xamarin.Bar.xml"), "").unwrap();

        let rx = spawn(
            ToggleRequest::new(tmp.path(), ToggleMode::Disable),
            CancelFlag::new(),
        );
        let mut events = Vec::new();
        let result = wait(rx, |e| events.push(e.clone())).unwrap();

        assert_eq!(result.renamed_count, 2);
        assert_eq!(events.len(), 3);
        assert!(tmp.path().join("Xamarin.Foo.xml.disabled").is_file());
    }

    #[test]
    fn pre_cancelled_run_still_reports() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Xamarin.Foo.xml"), "").unwrap();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let rx = spawn(ToggleRequest::new(tmp.path(), ToggleMode::Disable), cancel);
        let result = wait(rx, |_| {}).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.renamed_count, 0);
        assert!(tmp.path().join("Xamarin.Foo.xml").is_file());
    }

    #[test]
    fn missing_root_comes_back_as_result() {
        let tmp = TempDir::new().unwrap();
        let rx = spawn(
            ToggleRequest::new(tmp.path().join("gone"), ToggleMode::Enable),
            CancelFlag::new(),
        );
        let result = wait(rx, |_| {}).unwrap();
        assert_eq!(result.failures.len(), 1);
    }
}

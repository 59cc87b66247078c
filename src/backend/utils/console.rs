// src/backend/utils/console.rs
//
// Routes `tracing` events to the canister debug console, one event per `ic_cdk::println!` line.

use std::io::{self, Write};
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::writer::MakeWriter;

/// Writer factory for the canister console.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanisterConsole;

impl<'a> MakeWriter<'a> for CanisterConsole {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::default()
    }
}

/// Buffers one formatted event and prints it on flush or drop.
#[derive(Debug, Default)]
pub struct ConsoleLine {
    buf: Vec<u8>,
}

impl ConsoleLine {
    fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        self.buf.clear();
        (!line.is_empty()).then_some(line)
    }
}

impl Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(line) = self.take_line() {
            print_line(&line);
        }
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        if let Some(line) = self.take_line() {
            print_line(&line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn print_line(line: &str) {
    ic_cdk::println!("{}", line);
}

// Host builds (tests, tooling) have no canister console.
#[cfg(not(target_arch = "wasm32"))]
fn print_line(line: &str) {
    eprintln!("{}", line);
}

/// Plain-text `fmt` subscriber writing through `make_writer`.
/// No timestamps: the replica stamps every console line itself.
pub fn console_subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_max_level(Level::INFO)
        .with_target(false)
        .without_time()
        .finish()
}

/// Installs the console subscriber as the global default. Called from `init` and `post_upgrade`.
pub fn init_console_logging() {
    if let Err(e) = tracing::subscriber::set_global_default(console_subscriber(CanisterConsole)) {
        tracing::warn!(error = %e, "console logging was already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyInfo, PlanRecord};
    use crate::storage::{KeyValueStorage, MemoryStorage, RecordStore};
    use std::sync::{Arc, Mutex};

    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_output(run: impl FnOnce()) -> String {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let subscriber = console_subscriber(move || Capture(sink.clone()));
        tracing::subscriber::with_default(subscriber, run);
        let bytes = captured.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn corrupt_record_fallback_is_logged() {
        let output = captured_output(|| {
            let mut store: RecordStore<EmergencyInfo, MemoryStorage> = RecordStore::new(MemoryStorage::new());
            store
                .storage_mut()
                .set_item(EmergencyInfo::PRIMARY_KEY, "garbage")
                .unwrap();
            assert_eq!(store.get(), EmergencyInfo::defaults());
        });
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("could not load record, using defaults"), "{output}");
        assert!(output.contains("emergencyInfo"), "{output}");
    }

    #[test]
    fn rejected_import_is_logged() {
        let output = captured_output(|| {
            let mut store: RecordStore<EmergencyInfo, MemoryStorage> = RecordStore::new(MemoryStorage::new());
            assert!(!store.import_data(r#"{"foo": 1}"#));
        });
        assert!(output.contains("import rejected"), "{output}");
        assert!(output.contains("missing key `contacts`"), "{output}");
    }

    #[test]
    fn console_line_trims_trailing_newline() {
        let mut line = ConsoleLine::default();
        line.write_all(b" WARN record save failed\n").unwrap();
        assert_eq!(line.take_line().as_deref(), Some(" WARN record save failed"));
        assert_eq!(line.take_line(), None);
    }
}

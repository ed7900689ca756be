use pingora_resp::{self as resp, Context, Diagnostic, Level, Logger, Method, Request};
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Clone)]
struct Captured {
    level: Level,
    file: &'static str,
    line: u32,
    timestamp: u64,
    message: String,
}

struct TestLogger(Arc<Mutex<Vec<Captured>>>);

impl Logger for TestLogger {
    fn log(&self, level: Level, d: &Diagnostic) {
        self.0.lock().unwrap().push(Captured {
            level,
            file: d.location.file(),
            line: d.location.line(),
            timestamp: d.timestamp,
            message: d.message.clone(),
        });
    }
}

/// One capturing logger for the whole test binary, installed on first use.
fn entries() -> Arc<Mutex<Vec<Captured>>> {
    static SHARED: OnceLock<Arc<Mutex<Vec<Captured>>>> = OnceLock::new();
    SHARED
        .get_or_init(|| {
            let shared = Arc::new(Mutex::new(Vec::new()));
            resp::set_logger(TestLogger(shared.clone()));
            shared
        })
        .clone()
}

/// Entries whose message contains `marker`; tests share one logger.
fn matching(marker: &str) -> Vec<Captured> {
    entries()
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.message.contains(marker))
        .cloned()
        .collect()
}

#[test]
fn log_reports_caller_location() {
    entries();
    let err = std::io::Error::other("marker-log-1");
    let line = line!() + 1;
    let b = resp::log(&err);
    assert!(!b.is_aborted());

    let got = matching("marker-log-1");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].level, Level::Error);
    assert!(got[0].file.ends_with("diagnostics.rs"));
    assert_eq!(got[0].line, line);
    assert!(got[0].timestamp > 0);
}

#[test]
fn builder_log_reports_caller_location() {
    entries();
    let line = line!() + 1;
    let b = resp::with_code(7).log("marker-log-2");
    assert_eq!(b.code(), 7);

    let got = matching("marker-log-2");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].line, line);
    assert_eq!(got[0].message, "marker-log-2");
}

#[test]
fn with_message_log_prints_and_sets_message() {
    entries();
    let mut ctx = Context::new(Request::new(Method::GET, "/"));
    let err = std::io::Error::other("this is test error");
    let line = line!() + 1;
    let b = resp::with_message_log(&format_args!("marker-log-3 {}", err)).internal_error(&mut ctx);
    assert!(b.try_error(&Some(&err)));

    let got = matching("marker-log-3");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].message, "marker-log-3 this is test error");
    assert_eq!(got[0].line, line);

    let body = ctx.response().and_then(|r| r.json_body()).unwrap();
    assert_eq!(body["msg"], "marker-log-3 this is test error");
}

#[test]
fn with_message_log_skips_absent_values() {
    entries();
    let b = resp::with_message_log(&None::<std::io::Error>);
    assert_eq!(b.message(), "");
    let ok: Result<&str, String> = Ok("marker-log-4");
    let b = resp::with_message_log(&ok);
    assert_eq!(b.message(), "");
    assert!(!b.try_error(&ok));

    assert!(matching("marker-log-4").is_empty());
    assert!(matching("<nil>").is_empty());
}

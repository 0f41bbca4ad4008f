//! Shared helpers for predictor tests.

use std::io;
use std::sync::{Arc, Mutex};

use bpsim_core::bru::BranchPredictor;
use bpsim_core::bru::perceptron::PerceptronPredictor;
use bpsim_core::config::PerceptronConfig;

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory sink for formatted log lines.
#[derive(Debug, Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber at `TRACE` level and returns everything it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    {
        let _guard = tracing_subscriber::util::SubscriberInitExt::set_default(subscriber);
        f();
    }
    let bytes = buffer.0.lock().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Reference configuration: 8 perceptrons, 7 history bits, 8-bit weights, threshold 15.
pub fn reference_config() -> PerceptronConfig {
    PerceptronConfig::default()
}

/// Builds a perceptron with the reference configuration.
pub fn default_perceptron() -> PerceptronPredictor {
    init_tracing();
    PerceptronPredictor::new(&reference_config()).expect("reference config is valid")
}

/// Builds a perceptron that trains on every branch (threshold above any reachable sum).
pub fn always_training_perceptron() -> PerceptronPredictor {
    PerceptronPredictor::new(&PerceptronConfig {
        training_threshold: u32::MAX,
        ..reference_config()
    })
    .expect("config is valid")
}

/// Train a predictor by feeding `n` iterations of the same branch outcome.
pub fn train<P: BranchPredictor>(bp: &mut P, pc: u64, taken: bool, n: usize) {
    for _ in 0..n {
        bp.update_branch(pc, taken);
    }
}

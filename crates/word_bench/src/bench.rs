//! Set/get micro-benchmark driven through the script runtime
//!
//! Both paths run the same loop inside QuickJS: the `Word` path copies a
//! payload in with `setBytes` and back out with `getBytes`, the baseline
//! does the same with a plain `Uint8Array` (`set` + `slice`).

use std::time::{Duration, Instant};

use word_core::CAPACITY;
use word_script::{ScriptError, ScriptRuntime};

use crate::samples::SampleWindow;
use crate::settings::BenchSettings;

const HARNESS: &str = r#"
var benchWordHandle = null;
var benchPayload = null;
var benchZeros = null;
var benchPlain = null;

function benchSetup(size) {
    benchWordHandle = new Word();
    benchPayload = new Uint8Array(size);
    for (let i = 0; i < size; i++) benchPayload[i] = i & 0xff;
    benchZeros = new Uint8Array(size);
    benchPlain = new Uint8Array(size);
}

function benchWarmup(n) {
    for (let i = 0; i < n; i++) {
        benchWordHandle.setBytes(benchZeros);
        benchWordHandle.getBytes();
    }
}

function benchWord(n) {
    for (let i = 0; i < n; i++) {
        benchWordHandle.setBytes(benchPayload);
        benchWordHandle.getBytes();
    }
}

function benchBaseline(n) {
    for (let i = 0; i < n; i++) {
        benchPlain.set(benchPayload);
        benchPlain.slice();
    }
}
"#;

/// Timing for one path.
pub struct Measurement {
    pub label: &'static str,
    pub rounds: u32,
    pub size: u32,
    pub elapsed: Duration,
    pub window: SampleWindow,
}

impl Measurement {
    /// Copy-in plus copy-out throughput in MB/s.
    pub fn bandwidth_mb_s(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        f64::from(self.rounds) * f64::from(self.size) * 2.0 / secs / 1e6
    }

    /// Mean nanoseconds per set+get pair.
    pub fn latency_ns(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / f64::from(self.rounds) * 1e9
    }

    fn log(&self) {
        let (min, max) = self.window.min_max();
        tracing::info!(
            "{:<9} bandwidth: {:>10.2} MB/s | latency: {:>8.2} ns/op (batch min {} ns, avg {} ns, max {} ns)",
            self.label,
            self.bandwidth_mb_s(),
            self.latency_ns(),
            min.as_nanos(),
            self.window.average().as_nanos(),
            max.as_nanos(),
        );
    }
}

pub struct Report {
    pub word: Measurement,
    pub baseline: Measurement,
    /// Bytes the Word held after its last timed round
    pub word_stored: usize,
}

impl Report {
    pub fn bandwidth_speedup(&self) -> f64 {
        ratio(self.word.bandwidth_mb_s(), self.baseline.bandwidth_mb_s())
    }

    pub fn latency_speedup(&self) -> f64 {
        ratio(self.baseline.latency_ns(), self.word.latency_ns())
    }

    pub fn log(&self) {
        tracing::info!("Results -------------------------------------------------");
        self.word.log();
        self.baseline.log();
        tracing::info!(
            "Word kept {} of {} payload bytes",
            self.word_stored,
            self.word.size,
        );
        tracing::info!(
            "Speed-up: {:.1}x bandwidth | {:.1}x latency",
            self.bandwidth_speedup(),
            self.latency_speedup(),
        );
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Split `rounds` into `batches` near-equal chunks; earlier chunks absorb
/// the remainder.
pub fn batch_sizes(rounds: u32, batches: u32) -> impl Iterator<Item = u32> {
    let batches = batches.max(1);
    let base = rounds / batches;
    let extra = rounds % batches;
    (0..batches)
        .map(move |i| base + u32::from(i < extra))
        .filter(|&n| n > 0)
}

pub fn run(runtime: &ScriptRuntime, settings: &BenchSettings) -> Result<Report, ScriptError> {
    runtime.execute(HARNESS)?;
    runtime.call::<_, ()>("benchSetup", (settings.size,))?;

    if settings.size as usize > CAPACITY {
        tracing::info!(
            size = settings.size,
            capacity = CAPACITY,
            "payload exceeds Word capacity; Word path truncates"
        );
    }

    runtime.call::<_, ()>("benchWarmup", (settings.warmup,))?;
    tracing::debug!(iterations = settings.warmup, "warm-up complete");

    tracing::info!("Starting Word benchmark ...");
    let word = measure(runtime, "benchWord", "Word", settings)?;

    let word_stored = runtime.word_bytes("benchWordHandle")?.len();

    tracing::info!("Starting Uint8Array baseline ...");
    let baseline = measure(runtime, "benchBaseline", "Uint8Array", settings)?;

    Ok(Report {
        word,
        baseline,
        word_stored,
    })
}

fn measure(
    runtime: &ScriptRuntime,
    function: &str,
    label: &'static str,
    settings: &BenchSettings,
) -> Result<Measurement, ScriptError> {
    let mut window = SampleWindow::new(settings.batches as usize);
    let mut elapsed = Duration::ZERO;

    for ops in batch_sizes(settings.rounds, settings.batches) {
        let start = Instant::now();
        runtime.call::<_, ()>(function, (ops,))?;
        let spent = start.elapsed();

        elapsed += spent;
        window.record_batch(spent, ops);
    }

    Ok(Measurement {
        label,
        rounds: settings.rounds,
        size: settings.size,
        elapsed,
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> BenchSettings {
        BenchSettings {
            rounds: 200,
            size: 64,
            warmup: 10,
            batches: 8,
        }
    }

    #[test]
    fn test_batch_sizes_cover_all_rounds() {
        let sizes: Vec<u32> = batch_sizes(10, 3).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(batch_sizes(1_000_000, 100).sum::<u32>(), 1_000_000);
    }

    #[test]
    fn test_batch_sizes_skip_empty_batches() {
        let sizes: Vec<u32> = batch_sizes(2, 5).collect();
        assert_eq!(sizes, vec![1, 1]);
    }

    #[test]
    fn test_measurement_math() {
        let m = Measurement {
            label: "test",
            rounds: 1_000,
            size: 64,
            elapsed: Duration::from_millis(1),
            window: SampleWindow::new(1),
        };
        // 1000 * 64 * 2 bytes in 1ms = 128 MB/s
        assert!((m.bandwidth_mb_s() - 128.0).abs() < 1e-9);
        assert!((m.latency_ns() - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_produces_report() {
        let runtime = ScriptRuntime::new().unwrap();
        let report = run(&runtime, &tiny()).unwrap();
        assert_eq!(report.word.rounds, 200);
        assert_eq!(report.word.window.len(), 8);
        assert_eq!(report.baseline.window.len(), 8);
        assert!(report.word.elapsed > Duration::ZERO);
        assert_eq!(report.word_stored, 64);
    }

    #[test]
    fn test_oversized_payload_is_truncated_on_word_path() {
        let runtime = ScriptRuntime::new().unwrap();
        let settings = BenchSettings { size: 100, ..tiny() };
        let report = run(&runtime, &settings).unwrap();
        assert_eq!(report.word_stored, 64);

        let short = BenchSettings { size: 10, ..tiny() };
        let report = run(&ScriptRuntime::new().unwrap(), &short).unwrap();
        assert_eq!(report.word_stored, 10);
    }
}

//! Partitioned nonce search across worker threads.
//!
//! Worker `i` of `n` walks nonces `i, i + n, i + 2n, ...`, running the
//! same digest-then-test sequence as the sequential search. The only
//! shared state is one atomic stop flag, the attempt counter, and the
//! channel carrying the winning candidate. First found wins: the result
//! always verifies, but with more than one worker it is not necessarily
//! the smallest satisfying nonce.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crate::difficulty::meets_difficulty;
use crate::engine::{Candidates, Solution};
use crate::error::Error;
use crate::params::DIGEST_BITS;

/// How often the coordinator wakes to check for cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Cooperative abort signal for an in-progress search.
///
/// Clones share one flag; any holder may cancel. Workers poll it once per
/// candidate, so abort latency is bounded by a single digest computation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every worker holding a clone of this token to stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Periodic report handed to the progress observer.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Digests computed so far, summed across workers.
    pub attempts: u64,
    /// Time since the search started.
    pub elapsed: Duration,
}

type ProgressFn = Box<dyn Fn(Progress) + Send>;

/// A configurable multi-worker search for one challenge.
///
/// ```no_run
/// use hashcash_core::{CancelToken, Search};
///
/// let solution = Search::new("service", 20)
///     .workers(4)
///     .run(&CancelToken::new())
///     .unwrap();
/// ```
pub struct Search {
    prefix: String,
    difficulty: u32,
    workers: usize,
    report_interval: Duration,
    on_progress: Option<ProgressFn>,
}

impl Search {
    pub fn new(prefix: impl Into<String>, difficulty: u32) -> Self {
        Self {
            prefix: prefix.into(),
            difficulty,
            workers: 1,
            report_interval: Duration::from_secs(5),
            on_progress: None,
        }
    }

    /// Number of worker threads. A single worker reproduces the
    /// deterministic smallest-nonce search.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Observer invoked with the cumulative attempt count every
    /// `interval` while the search runs.
    pub fn on_progress(
        mut self,
        interval: Duration,
        observer: impl Fn(Progress) + Send + 'static,
    ) -> Self {
        self.report_interval = interval;
        self.on_progress = Some(Box::new(observer));
        self
    }

    /// Run until a worker finds a satisfying nonce or `cancel` fires.
    pub fn run(&self, cancel: &CancelToken) -> Result<Solution, Error> {
        if self.difficulty > DIGEST_BITS {
            return Err(Error::DifficultyOutOfRange {
                difficulty: self.difficulty,
                limit: DIGEST_BITS,
            });
        }

        let start = Instant::now();
        let stop = Arc::new(AtomicBool::new(false));
        let attempts = Arc::new(AtomicU64::new(0));
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            let prefix = self.prefix.as_str();
            let difficulty = self.difficulty;
            let stride = self.workers as u64;

            for worker in 0..self.workers {
                let tx = tx.clone();
                let stop = Arc::clone(&stop);
                let attempts = Arc::clone(&attempts);
                let cancel = cancel.clone();
                scope.spawn(move || {
                    for candidate in Candidates::with_offset(prefix, worker as u64, stride) {
                        if stop.load(Ordering::Relaxed) || cancel.is_cancelled() {
                            return;
                        }
                        attempts.fetch_add(1, Ordering::Relaxed);
                        // difficulty was range-checked before spawning
                        if meets_difficulty(&candidate.digest, difficulty).unwrap_or(false) {
                            stop.store(true, Ordering::Relaxed);
                            let _ = tx.send(candidate);
                            return;
                        }
                    }
                });
            }
            drop(tx);

            let mut last_report = Instant::now();
            loop {
                match rx.recv_timeout(CANCEL_POLL) {
                    Ok(candidate) => {
                        stop.store(true, Ordering::Relaxed);
                        return Ok(Solution {
                            nonce: candidate.nonce,
                            digest: candidate.digest,
                            attempts: attempts.load(Ordering::Relaxed),
                            elapsed: start.elapsed(),
                        });
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if cancel.is_cancelled() {
                            stop.store(true, Ordering::Relaxed);
                            return Err(Error::Cancelled);
                        }
                        if let Some(observer) = &self.on_progress {
                            if last_report.elapsed() >= self.report_interval {
                                observer(Progress {
                                    attempts: attempts.load(Ordering::Relaxed),
                                    elapsed: start.elapsed(),
                                });
                                last_report = Instant::now();
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // every worker exited without sending a result,
                        // which only happens on cancellation
                        return Err(Error::Cancelled);
                    }
                }
            }
        })
    }
}

// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checking many strings in parallel.
//!
//! A producer thread feeds candidate strings into a bounded queue. Every thread of a
//! rayon pool runs one worker with its own [`RunSource`], taking strings from the queue,
//! shaping and checking them, and sending the outcome back. The calling thread collects
//! the outcomes and raises the stop flag once time is up; producer and workers check the
//! flag between strings.
//!
//! With a collision limit, the sweep keeps the colliding strings that come first in
//! enumeration order, whichever worker finds them first. Once enough are known, strings
//! past the last of them are skipped, but every earlier string is still checked.

use anyhow::{bail, Context, Result};
use collidoscope::source::RunSource;
use collidoscope::{Collision, CollisionEngine, GlyphPlacement};
use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Strings queued per worker.
const QUEUE_DEPTH: usize = 64;

/// How often the collector checks the time limit while no outcome arrives.
const TICK: Duration = Duration::from_millis(100);

/// Outcomes between two progress reports.
const PROGRESS_INTERVAL: u64 = 10_000;

/// How a sweep runs.
#[derive(Clone, Debug)]
pub struct SweepOptions {
    /// Number of worker threads.
    pub threads: usize,
    /// Keep only the first this many colliding strings, and stop once they are known.
    pub max_collisions: Option<usize>,
    /// Stop after this much time.
    pub time_limit: Option<Duration>,
    /// List every collision of a colliding string, not just the first.
    pub exhaustive: bool,
}

/// Why a sweep ended before checking every string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Enough colliding strings were found.
    MaxCollisions,
    /// The time limit passed.
    TimeLimit,
}

/// A string whose run has collisions.
#[derive(Clone, Debug)]
pub struct Finding {
    /// Position of the string in the enumeration.
    pub sequence: u64,
    /// The string.
    pub text: String,
    /// The shaped run.
    pub run: Vec<GlyphPlacement>,
    /// Its collisions.
    pub collisions: Vec<Collision>,
}

/// What a sweep found.
#[derive(Debug, Default)]
pub struct SweepSummary {
    /// Strings that were shaped and checked, successfully or not.
    pub checked: u64,
    /// Strings that could not be shaped or checked.
    pub failed: u64,
    /// Colliding strings, in enumeration order.
    ///
    /// With a collision limit, these are the first colliding strings of the enumeration.
    pub findings: Vec<Finding>,
    /// Set if the sweep was cut short.
    pub stopped: Option<StopReason>,
}

enum Outcome {
    Clean,
    Collided(Finding),
    Failed { text: String, reason: String },
}

/// Check every string of `strings`, using one source from `make_source` per worker.
pub fn sweep<S, F>(
    strings: impl Iterator<Item = String> + Send,
    engine: &CollisionEngine,
    options: &SweepOptions,
    make_source: F,
) -> Result<SweepSummary>
where
    S: RunSource,
    F: Fn() -> Result<S, S::Error> + Sync,
{
    let threads = options.threads.max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("collidoscope-worker-{index}"))
        .build()
        .context("cannot start worker threads")?;

    let stop = AtomicBool::new(false);
    // Strings after this one in the enumeration are not needed anymore.
    let horizon = AtomicU64::new(u64::MAX);
    let broken = AtomicUsize::new(0);
    let (task_sender, task_receiver) = crossbeam_channel::bounded(threads * QUEUE_DEPTH);
    let (result_sender, result_receiver) = crossbeam_channel::unbounded();
    let start = Instant::now();

    let summary = std::thread::scope(|scope| {
        let stop = &stop;
        let horizon = &horizon;
        let broken = &broken;
        let make_source = &make_source;

        scope.spawn(move || {
            for (sequence, text) in (0_u64..).zip(strings) {
                if stop.load(Ordering::Relaxed) || sequence > horizon.load(Ordering::Relaxed) {
                    break;
                }
                // The queue is closed once every worker has quit.
                if task_sender.send((sequence, text)).is_err() {
                    break;
                }
            }
        });

        scope.spawn(move || {
            pool.scope(|pool_scope| {
                pool_scope.spawn_broadcast(|_, context| {
                    let mut source = match make_source() {
                        Ok(source) => source,
                        Err(err) => {
                            warn!("worker {} cannot shape: {err}", context.index());
                            broken.fetch_add(1, Ordering::Relaxed);
                            return;
                        }
                    };
                    while !stop.load(Ordering::Relaxed) {
                        let Ok((sequence, text)) = task_receiver.recv() else {
                            break;
                        };
                        if sequence > horizon.load(Ordering::Relaxed) {
                            continue;
                        }
                        let outcome = check(&mut source, engine, sequence, text, options);
                        if result_sender.send(outcome).is_err() {
                            break;
                        }
                    }
                });
            });
            // Dropping the last result sender here tells the collector the sweep is over.
        });

        collect(&result_receiver, stop, horizon, options, start)
    });

    if broken.load(Ordering::Relaxed) == threads {
        bail!("no worker could set up shaping");
    }

    info!(
        "checked {} strings in {:.1?}, {} collide, {} failed",
        summary.checked,
        start.elapsed(),
        summary.findings.len(),
        summary.failed
    );
    Ok(summary)
}

fn check<S: RunSource>(
    source: &mut S,
    engine: &CollisionEngine,
    sequence: u64,
    text: String,
    options: &SweepOptions,
) -> Outcome {
    let run = match source.shape(&text) {
        Ok(run) => run,
        Err(err) => {
            return Outcome::Failed {
                text,
                reason: err.to_string(),
            }
        }
    };
    let collisions = if options.exhaustive {
        engine.all_collisions(&run)
    } else {
        engine.has_collisions(&run)
    };
    match collisions {
        Ok(collisions) if collisions.is_empty() => Outcome::Clean,
        Ok(collisions) => Outcome::Collided(Finding {
            sequence,
            text,
            run,
            collisions,
        }),
        Err(err) => Outcome::Failed {
            text,
            reason: err.to_string(),
        },
    }
}

fn collect(
    results: &crossbeam_channel::Receiver<Outcome>,
    stop: &AtomicBool,
    horizon: &AtomicU64,
    options: &SweepOptions,
    start: Instant,
) -> SweepSummary {
    let mut summary = SweepSummary::default();

    loop {
        if summary.stopped != Some(StopReason::TimeLimit)
            && options
                .time_limit
                .is_some_and(|limit| start.elapsed() >= limit)
        {
            info!("stopping: time limit reached");
            summary.stopped = Some(StopReason::TimeLimit);
            stop.store(true, Ordering::Relaxed);
        }

        let outcome = match results.recv_timeout(TICK) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        summary.checked += 1;
        match outcome {
            Outcome::Clean => {}
            Outcome::Collided(finding) => {
                debug!("{} collides: {:?}", finding.text, finding.collisions);
                summary.findings.push(finding);
                if let Some(max) = options.max_collisions {
                    if summary.findings.len() >= max {
                        keep_first(&mut summary.findings, max);
                        match summary.findings.last() {
                            Some(last) => {
                                horizon.fetch_min(last.sequence, Ordering::Relaxed);
                            }
                            None => stop.store(true, Ordering::Relaxed),
                        }
                        if summary.stopped.is_none() {
                            info!("stopping: {max} colliding strings found");
                            summary.stopped = Some(StopReason::MaxCollisions);
                        }
                    }
                }
            }
            Outcome::Failed { text, reason } => {
                warn!("cannot check {text:?}: {reason}");
                summary.failed += 1;
            }
        }
        if summary.checked % PROGRESS_INTERVAL == 0 {
            debug!("{} strings checked", summary.checked);
        }
    }

    keep_first(
        &mut summary.findings,
        options.max_collisions.unwrap_or(usize::MAX),
    );
    summary
}

/// Keep the `max` findings that come first in the enumeration, in order.
fn keep_first(findings: &mut Vec<Finding>, max: usize) {
    findings.sort_by_key(|finding| finding.sequence);
    findings.truncate(max);
}

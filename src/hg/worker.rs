//! Background command worker
//!
//! A fixed pool of threads pulls [`CommandRequest`]s off a queue, runs them
//! through a [`CommandExecutor`], and posts each [`Completion`] to a result
//! channel. The UI thread drains that channel on its tick and never blocks
//! on a subprocess.
//!
//! Dropping the worker closes the queue without waiting. A thread that is
//! still running a command finishes it in the background, fails to post the
//! result and exits.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::HgError;
use super::executor::{CommandExecutor, CommandRequest};

/// Identifies one submitted command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Result of a background command, tagged with what the submitter asked for
#[derive(Debug)]
pub struct Completion<T> {
    pub ticket: Ticket,
    pub tag: T,
    pub result: Result<String, HgError>,
}

struct Job<T> {
    ticket: Ticket,
    tag: T,
    request: CommandRequest,
}

/// Tickets queued or running, and the subset whose result is unwanted
#[derive(Default)]
struct TicketBook {
    in_flight: HashSet<Ticket>,
    cancelled: HashSet<Ticket>,
}

impl TicketBook {
    /// Forget a finished ticket; true when its result should be dropped
    fn finish(&mut self, ticket: Ticket) -> bool {
        self.in_flight.remove(&ticket);
        self.cancelled.remove(&ticket)
    }
}

/// Thread pool running commands off the UI thread
pub struct CommandWorker<T: Send + 'static> {
    jobs: Sender<Job<T>>,
    results: Receiver<Completion<T>>,
    tickets: Arc<Mutex<TicketBook>>,
    next_ticket: AtomicU64,
}

impl<T: Send + 'static> CommandWorker<T> {
    /// Spawn `size` worker threads (at least one)
    pub fn new(executor: Arc<dyn CommandExecutor>, size: usize) -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job<T>>();
        let (result_tx, result_rx) = mpsc::channel::<Completion<T>>();
        let job_rx = Arc::new(Mutex::new(job_rx));
        let tickets = Arc::new(Mutex::new(TicketBook::default()));

        for i in 0..size.max(1) {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let executor = Arc::clone(&executor);
            let tickets = Arc::clone(&tickets);
            // Detached: the pool never joins its threads
            thread::Builder::new()
                .name(format!("hgcomb-worker-{i}"))
                .spawn(move || worker_loop(job_rx, result_tx, executor, tickets))?;
        }

        Ok(Self {
            jobs: job_tx,
            results: result_rx,
            tickets,
            next_ticket: AtomicU64::new(1),
        })
    }

    /// Queue a command; returns immediately
    pub fn submit(&self, tag: T, request: CommandRequest) -> Ticket {
        let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(?ticket, command = %request.command_line, "queueing command");
        if let Ok(mut tickets) = self.tickets.lock() {
            tickets.in_flight.insert(ticket);
        }
        // Only fails when every worker thread is gone
        if self.jobs.send(Job { ticket, tag, request }).is_err() {
            tracing::error!(?ticket, "worker pool is down, command dropped");
            if let Ok(mut tickets) = self.tickets.lock() {
                tickets.finish(ticket);
            }
        }
        ticket
    }

    /// Discard the completion of `ticket`
    ///
    /// The process itself runs to completion; its result is never delivered.
    /// Tickets that already finished are ignored.
    pub fn cancel(&self, ticket: Ticket) {
        if let Ok(mut tickets) = self.tickets.lock()
            && tickets.in_flight.contains(&ticket)
        {
            tickets.cancelled.insert(ticket);
        }
    }

    /// Next finished command, if any
    pub fn poll(&self) -> Option<Completion<T>> {
        self.results.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished command
    pub fn wait(&self, timeout: Duration) -> Option<Completion<T>> {
        match self.results.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn worker_loop<T>(
    jobs: Arc<Mutex<Receiver<Job<T>>>>,
    results: Sender<Completion<T>>,
    executor: Arc<dyn CommandExecutor>,
    tickets: Arc<Mutex<TicketBook>>,
) {
    loop {
        // Hold the lock only while receiving, never while executing
        let job = match jobs.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => return,
        };
        let Ok(job) = job else {
            return;
        };

        let result = executor.execute(&job.request);

        let was_cancelled = tickets
            .lock()
            .map(|mut book| book.finish(job.ticket))
            .unwrap_or(false);
        if was_cancelled {
            tracing::debug!(ticket = ?job.ticket, "dropping cancelled completion");
            continue;
        }

        let completion = Completion {
            ticket: job.ticket,
            tag: job.tag,
            result,
        };
        if results.send(completion).is_err() {
            return;
        }
    }
}

use crate::ports::DnsExchange;
use crate::use_cases::resolve_one::resolve_one;
use futures::future::join_all;
use shoal_dns_domain::{DomainError, RecordKind, Resolution, ResolverConfig};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Concurrent batch resolver.
///
/// A fixed pool of workers is fed round-robin by a single dispatcher; each
/// query takes its server rotation window from a shared dispatch counter so
/// load spreads over the whole server pool instead of hammering the first
/// entry. Soft failures are skipped silently; the first hard error cancels
/// further dispatch and becomes the batch outcome.
pub struct Resolver {
    record: RecordKind,
    retries: usize,
    workers: usize,
    exchange: Arc<dyn DnsExchange>,
}

impl Resolver {
    pub fn new(
        record: RecordKind,
        retries: usize,
        workers: usize,
        exchange: Arc<dyn DnsExchange>,
    ) -> Result<Self, DomainError> {
        if workers == 0 {
            return Err(DomainError::NoWorkers);
        }

        Ok(Self {
            record,
            retries,
            workers,
            exchange,
        })
    }

    pub fn from_config(
        config: &ResolverConfig,
        exchange: Arc<dyn DnsExchange>,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        Self::new(config.record, config.retries, config.workers, exchange)
    }

    pub fn record(&self) -> RecordKind {
        self.record
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Resolves `domains` against `servers`, streaming non-empty resolutions
    /// over `out` in completion order.
    ///
    /// Returns `Ok(())` once every domain has been dispatched and every
    /// worker has drained, or the first hard error observed. The `out`
    /// sender and all its clones are dropped on every exit path, so the
    /// consumer's receive loop always terminates.
    pub async fn resolve_batch(
        &self,
        domains: &[String],
        servers: &[String],
        out: mpsc::Sender<Resolution>,
        cancel: CancellationToken,
    ) -> Result<(), DomainError> {
        if domains.is_empty() {
            return Err(DomainError::NoDomains);
        }
        if servers.is_empty() {
            return Err(DomainError::NoServers);
        }

        let worker_count = effective_workers(self.workers, domains.len());
        debug!(
            domains = domains.len(),
            servers = servers.len(),
            workers = worker_count,
            record = %self.record,
            "starting batch resolution"
        );

        // Child of the caller's token: cancelling it fast-exits the pool
        // without touching the caller's own token.
        let stop = cancel.child_token();
        let counter = Arc::new(AtomicUsize::new(0));
        let servers: Arc<[String]> = Arc::from(servers.to_vec());
        let (err_tx, mut err_rx) = mpsc::channel::<DomainError>(worker_count);

        let mut inputs = Vec::with_capacity(worker_count);
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let (tx, rx) = mpsc::channel::<Arc<str>>(1);
            inputs.push(tx);
            handles.push(tokio::spawn(worker_loop(
                WorkerContext {
                    id,
                    record: self.record,
                    retries: self.retries,
                    exchange: Arc::clone(&self.exchange),
                    servers: Arc::clone(&servers),
                    counter: Arc::clone(&counter),
                    stop: stop.clone(),
                    out: out.clone(),
                    errors: err_tx.clone(),
                },
                rx,
            )));
        }
        // The workers now own the only live clones; dropping ours lets both
        // channels close as soon as the pool winds down.
        drop(out);
        drop(err_tx);

        let mut dispatch_error = None;
        'dispatch: for (k, domain) in domains.iter().enumerate() {
            let input = &inputs[k % worker_count];
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    dispatch_error = Some(DomainError::Cancelled);
                    break 'dispatch;
                }
                received = err_rx.recv() => {
                    match received {
                        Some(err) => dispatch_error = Some(err),
                        // Every worker is gone; nothing left to feed.
                        None => {}
                    }
                    break 'dispatch;
                }
                sent = input.send(Arc::from(domain.as_str())) => {
                    if sent.is_err() {
                        // The worker bailed out (output consumer dropped the
                        // stream); stop dispatching.
                        break 'dispatch;
                    }
                }
            }
        }

        // Close every input channel and join the whole pool before
        // returning, so a hard error never leaves detached workers behind.
        drop(inputs);
        if dispatch_error.is_some() {
            stop.cancel();
        }
        join_all(handles).await;

        match dispatch_error {
            Some(err) => Err(err),
            // A hard error that raced past the final dispatch check is still
            // the batch outcome, not silently lost.
            None => match err_rx.recv().await {
                Some(err) => Err(err),
                None => Ok(()),
            },
        }
    }
}

struct WorkerContext {
    id: usize,
    record: RecordKind,
    retries: usize,
    exchange: Arc<dyn DnsExchange>,
    servers: Arc<[String]>,
    counter: Arc<AtomicUsize>,
    stop: CancellationToken,
    out: mpsc::Sender<Resolution>,
    errors: mpsc::Sender<DomainError>,
}

async fn worker_loop(ctx: WorkerContext, mut input: mpsc::Receiver<Arc<str>>) {
    loop {
        let domain = tokio::select! {
            _ = ctx.stop.cancelled() => break,
            received = input.recv() => match received {
                Some(domain) => domain,
                None => break,
            },
        };

        let offset = ctx.counter.fetch_add(1, Ordering::Relaxed);
        let window = rotation_window(&ctx.servers, offset, ctx.retries);

        let resolved = resolve_one(
            ctx.exchange.as_ref(),
            ctx.record,
            &domain,
            ctx.retries,
            &window,
            &ctx.stop,
        )
        .await;

        match resolved {
            Ok(destinations) => {
                if destinations.is_empty() {
                    debug!(worker = ctx.id, domain = %domain, "empty resolution dropped");
                    continue;
                }
                let resolution = Resolution::new(domain, destinations);
                tokio::select! {
                    _ = ctx.stop.cancelled() => break,
                    sent = ctx.out.send(resolution) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
            Err(DomainError::NoResponse) => {
                debug!(worker = ctx.id, domain = %domain, "no response after retries, skipped");
            }
            Err(DomainError::Cancelled) => break,
            Err(err) => {
                warn!(worker = ctx.id, domain = %domain, error = %err, "hard resolution error");
                // Sized to the pool, so this never blocks; anything past
                // capacity is already redundant.
                let _ = ctx.errors.try_send(err);
            }
        }
    }
}

/// Clamp so no worker ever waits on an input channel that receives nothing.
fn effective_workers(configured: usize, domain_count: usize) -> usize {
    configured.min(domain_count)
}

/// Ordered server window for one query: `retries + 1` endpoints taken at
/// `(offset + i) % n`, so consecutive queries start on consecutive servers.
fn rotation_window(servers: &[String], offset: usize, retries: usize) -> SmallVec<[String; 4]> {
    (0..=retries)
        .map(|i| servers[offset.wrapping_add(i) % servers.len()].clone())
        .collect()
}

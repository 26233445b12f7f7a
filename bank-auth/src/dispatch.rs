//! Delivery of completion events onto the context the presentation layer
//! lives on.

use tokio::sync::mpsc;

/// A unit of work to run on the presentation context
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Posts jobs to a designated execution context
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, job: Job);
}

/// Runs every job right away on the calling task
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateDispatcher;

impl Dispatcher for ImmediateDispatcher {
    fn dispatch(&self, job: Job) {
        job();
    }
}

/// Sends jobs over a channel to whoever owns the matching [`DispatchQueue`]
#[derive(Clone)]
pub struct ChannelDispatcher {
    tx: mpsc::UnboundedSender<Job>,
}

/// Receiving end of a [`ChannelDispatcher`], drained by the presentation loop
pub struct DispatchQueue {
    rx: mpsc::UnboundedReceiver<Job>,
}

/// Create a connected dispatcher/queue pair
pub fn channel() -> (ChannelDispatcher, DispatchQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelDispatcher { tx }, DispatchQueue { rx })
}

impl Dispatcher for ChannelDispatcher {
    fn dispatch(&self, job: Job) {
        if self.tx.send(job).is_err() {
            log::error!("Dispatch queue closed, completion event dropped");
        }
    }
}

impl DispatchQueue {
    /// Wait for the next job and run it. Returns false once every
    /// dispatcher is gone and the queue is empty.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run all jobs that are already queued without waiting
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}

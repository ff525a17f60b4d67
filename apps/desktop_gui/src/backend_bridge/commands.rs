//! Backend commands queued from UI to backend worker.

use client_core::FetchRequest;

#[derive(Debug)]
pub enum BackendCommand {
    Fetch(FetchRequest),
}

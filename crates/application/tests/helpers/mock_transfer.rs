#![allow(dead_code)]

use async_trait::async_trait;
use shoal_dns_application::ports::{TransferBatch, ZoneTransferSession};
use shoal_dns_domain::DomainError;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Scripted `ZoneTransferSession`: either fails to open, or lazily streams a
/// fixed sequence of batches.
pub struct MockTransferSession {
    fail_open: Option<DomainError>,
    batches: Mutex<Vec<TransferBatch>>,
    opened_with: Mutex<Option<(String, String)>>,
}

impl MockTransferSession {
    pub fn streaming(batches: Vec<TransferBatch>) -> Self {
        Self {
            fail_open: None,
            batches: Mutex::new(batches),
            opened_with: Mutex::new(None),
        }
    }

    pub fn refusing(err: DomainError) -> Self {
        Self {
            fail_open: Some(err),
            batches: Mutex::new(Vec::new()),
            opened_with: Mutex::new(None),
        }
    }

    /// `(zone, endpoint)` of the last `open` call.
    pub fn opened_with(&self) -> Option<(String, String)> {
        self.opened_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneTransferSession for MockTransferSession {
    async fn open(
        &self,
        zone: &str,
        endpoint: &str,
    ) -> Result<mpsc::Receiver<TransferBatch>, DomainError> {
        *self.opened_with.lock().unwrap() = Some((zone.to_string(), endpoint.to_string()));

        if let Some(err) = &self.fail_open {
            return Err(err.clone());
        }

        let batches: Vec<TransferBatch> = self.batches.lock().unwrap().drain(..).collect();
        let (tx, rx) = mpsc::channel(2);
        tokio::spawn(async move {
            for batch in batches {
                if tx.send(batch).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch orchestration.
//
// Records run strictly one after another: each finishes (published or
// failed) before the next starts. A failed item is recorded with its message
// and the run moves on, so the output always has one entry per input, in
// input order.

use laurea_core::error::LaureaError;
use laurea_core::{BatchItemResult, StudentRecord};
use tracing::{info, instrument, warn};

use crate::pipeline::CertificateGenerator;

impl CertificateGenerator {
    /// Generate and publish every record in order. Never fails as a whole.
    #[instrument(skip(self, records), fields(total = records.len()))]
    pub async fn generate_bulk_certificates(
        &self,
        records: &[StudentRecord],
    ) -> Vec<BatchItemResult> {
        let mut results = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let outcome = match self.item_timeout {
                Some(limit) => tokio::time::timeout(limit, self.generate_certificate(record))
                    .await
                    .unwrap_or_else(|_| {
                        Err(LaureaError::Timeout(format!(
                            "timed out after {}s",
                            limit.as_secs_f32()
                        )))
                    }),
                None => self.generate_certificate(record).await,
            };

            let item = match outcome {
                Ok(published) => BatchItemResult::published(&record.student_name, published),
                Err(err) => {
                    warn!(index, student = %record.student_name, error = %err, "batch item failed");
                    BatchItemResult::failed(&record.student_name, err.message())
                }
            };
            results.push(item);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(succeeded, failed = results.len() - succeeded, "batch finished");
        results
    }
}

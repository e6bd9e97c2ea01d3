// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles shared by the pipeline and batch tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use laurea_core::error::{LaureaError, Result};
use laurea_publish::ContentStore;

#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub message: String,
    pub bytes: Vec<u8>,
}

/// In-memory store that records every call and can be told to fail or stall
/// for one student.
#[derive(Debug, Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<Call>>,
    fail_for: Option<String>,
    stall_for: Option<String>,
}

impl RecordingStore {
    pub fn failing_for(student: &str) -> Self {
        Self {
            fail_for: Some(student.to_owned()),
            ..Default::default()
        }
    }

    pub fn stalling_for(student: &str) -> Self {
        Self {
            stall_for: Some(student.to_owned()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

/// Commit messages end with the student name.
fn targets(message: &str, student: &Option<String>) -> bool {
    student
        .as_deref()
        .is_some_and(|s| message.ends_with(&format!("para {s}")))
}

#[async_trait]
impl ContentStore for RecordingStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn publish(&self, bytes: &[u8], path: &str, message: &str) -> Result<String> {
        if targets(message, &self.stall_for) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        if targets(message, &self.fail_for) {
            let student = self.fail_for.as_deref().unwrap_or_default();
            return Err(LaureaError::Publication(format!(
                "simulated remote failure for {student}"
            )));
        }
        self.calls.lock().unwrap().push(Call {
            path: path.to_owned(),
            message: message.to_owned(),
            bytes: bytes.to_vec(),
        });
        Ok(format!("memory://{path}"))
    }
}

/// `certificado_[A-Za-z0-9_-]+_[0-9]+\.pdf`
pub fn is_assigned_name(name: &str) -> bool {
    let Some(inner) = name
        .strip_prefix("certificado_")
        .and_then(|s| s.strip_suffix(".pdf"))
    else {
        return false;
    };
    let Some((student, millis)) = inner.rsplit_once('_') else {
        return false;
    };
    !student.is_empty()
        && student
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
}

/// `SUID-[0-9A-Z]+-[0-9A-Z]{5}`
pub fn is_certificate_id(id: &str) -> bool {
    let upper_alnum = |s: &str| s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
    match id.split('-').collect::<Vec<_>>().as_slice() {
        ["SUID", stamp, suffix] => {
            !stamp.is_empty() && upper_alnum(stamp) && suffix.len() == 5 && upper_alnum(suffix)
        }
        _ => false,
    }
}

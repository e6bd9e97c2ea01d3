// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Certificate identity — the printed certificate ID and the artifact file name.
//
// Both are derived from one generation timestamp. The file name is unique per
// student per millisecond only: two generations for the same student inside
// the same millisecond produce the same name and collide in the store. The
// certificate ID adds 5 random base-36 digits, which makes a collision
// unlikely but not impossible.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// Fixed prefix of every certificate ID.
pub const CERTIFICATE_ID_PREFIX: &str = "SUID";

/// Number of base-36 digits in the random part of a certificate ID.
const RANDOM_DIGITS: u32 = 5;

/// Source of the generation timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of the random certificate-ID suffix.
pub trait RandomSource: Send + Sync {
    fn next_u64(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Randomness drawn from UUIDv4 generation (OS-seeded).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRandom;

impl RandomSource for UuidRandom {
    fn next_u64(&self) -> u64 {
        let bits = Uuid::new_v4().as_u128();
        ((bits >> 64) as u64) ^ (bits as u64)
    }
}

/// A clock frozen at one instant. Used to make generation reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A random source that always yields the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u64);

impl RandomSource for FixedRandom {
    fn next_u64(&self) -> u64 {
        self.0
    }
}

/// Identifiers assigned to one certificate, computed once before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// `SUID-<TIMESTAMP36>-<RANDOM36>`, upper-case.
    pub certificate_id: String,
    /// `certificado_<sanitized student>_<millis>.pdf`.
    pub assigned_name: String,
    pub issued_at: DateTime<Utc>,
}

impl Identity {
    /// Draw a fresh identity for `student_name` from the given sources.
    pub fn issue(student_name: &str, clock: &dyn Clock, random: &dyn RandomSource) -> Self {
        let issued_at = clock.now();
        let millis = u64::try_from(issued_at.timestamp_millis()).unwrap_or(0);
        let identity = Self {
            certificate_id: certificate_id(millis, random.next_u64()),
            assigned_name: assigned_name(student_name, millis),
            issued_at,
        };
        debug!(
            certificate_id = %identity.certificate_id,
            assigned_name = %identity.assigned_name,
            "identity issued"
        );
        identity
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`, one for one.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Artifact file name for a student at a generation timestamp.
pub fn assigned_name(student_name: &str, millis: u64) -> String {
    format!("certificado_{}_{}.pdf", sanitize_name(student_name), millis)
}

/// Certificate ID from a millisecond timestamp and a random draw.
pub fn certificate_id(millis: u64, random: u64) -> String {
    let suffix = random % 36u64.pow(RANDOM_DIGITS);
    let suffix = format!("{:0>width$}", to_base36(suffix), width = RANDOM_DIGITS as usize);
    format!("{CERTIFICATE_ID_PREFIX}-{}-{}", to_base36(millis), suffix).to_uppercase()
}

/// Lowercase base-36 rendering of `value`.
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

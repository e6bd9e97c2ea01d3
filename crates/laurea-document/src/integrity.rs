// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact integrity — SHA-256 fingerprints of encoded certificates.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of an encoded artifact.
///
/// Recorded on every artifact and logged on publication, so an uploaded file
/// can be matched back to the run that produced it.
pub fn hash_bytes(artifact: &[u8]) -> String {
    hex::encode(Sha256::digest(artifact))
}

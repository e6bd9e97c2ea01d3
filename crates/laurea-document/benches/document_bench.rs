// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the laurea-document crate: composing a full
// certificate and encoding it to PDF bytes.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use laurea_core::config::Institution;
use laurea_core::{CertificateRequest, PageSetup};
use laurea_document::{Composer, PageCanvas, PdfEncoder, Theme};

fn bench_compose_and_encode(c: &mut Criterion) {
    let theme = Theme::SUID;
    let institution = Institution::default();
    let record = CertificateRequest::default().into_record(chrono::Utc::now());
    let encoder = PdfEncoder::default();

    c.bench_function("compose (A4 landscape)", |b| {
        b.iter(|| {
            let mut page = PageCanvas::new(&PageSetup::default());
            Composer::new(&theme, &institution)
                .compose(&mut page, black_box(&record), "SUID-LOYW3V28-00007")
                .unwrap();
            black_box(page);
        });
    });

    let mut page = PageCanvas::new(&PageSetup::default());
    Composer::new(&theme, &institution)
        .compose(&mut page, &record, "SUID-LOYW3V28-00007")
        .unwrap();

    c.bench_function("encode (A4 landscape)", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&page)).unwrap()));
    });
}

criterion_group!(benches, bench_compose_and_encode);
criterion_main!(benches);

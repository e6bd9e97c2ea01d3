// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-certificate pipeline.
//
// identity → composition → encoding → publication, one step at a time. The
// identity is issued first because the certificate ID is printed in the
// footer. Composition errors return before any encoding work starts; the
// caller only sees a result once the artifact has been published.

use std::sync::Arc;
use std::time::Duration;

use laurea_core::config::Institution;
use laurea_core::error::{LaureaError, Result};
use laurea_core::{
    AppConfig, CertificateRequest, Clock, EncodedArtifact, Identity, PageSetup, PublicationResult,
    RandomSource, StudentRecord, SystemClock, UuidRandom,
};
use laurea_document::integrity::hash_bytes;
use laurea_document::{Composer, PageCanvas, PdfEncoder, Theme};
use laurea_publish::ContentStore;
use tracing::{debug, info, instrument};

/// Repository directory every certificate is published under.
pub const ARTIFACT_DIRECTORY: &str = "certificados";

/// Generates and publishes certificates.
///
/// Holds only read-only configuration and shared handles, so one generator
/// can serve any number of calls.
#[derive(Clone)]
pub struct CertificateGenerator {
    theme: Theme,
    institution: Institution,
    page: PageSetup,
    store: Arc<dyn ContentStore>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    pub(crate) item_timeout: Option<Duration>,
}

impl CertificateGenerator {
    /// Generator with the default theme, institution and page, the system
    /// clock and UUID randomness.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            theme: Theme::default(),
            institution: Institution::default(),
            page: PageSetup::default(),
            store,
            clock: Arc::new(SystemClock),
            random: Arc::new(UuidRandom),
            item_timeout: None,
        }
    }

    /// Build from application configuration, including the content store.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let store = laurea_publish::from_config(&config.store)?;
        info!(store = store.name(), "certificate generator ready");
        Ok(Self::new(store)
            .with_page_setup(config.page)
            .with_institution(config.institution.clone())
            .with_item_timeout(config.batch.item_timeout_secs.map(Duration::from_secs)))
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_institution(mut self, institution: Institution) -> Self {
        self.institution = institution;
        self
    }

    pub fn with_page_setup(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Per-item limit applied by the batch runner.
    pub fn with_item_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.item_timeout = timeout;
        self
    }

    /// Issue a fresh identity for `record`.
    pub fn issue_identity(&self, record: &StudentRecord) -> Identity {
        Identity::issue(
            &record.student_name,
            self.clock.as_ref(),
            self.random.as_ref(),
        )
    }

    /// Lay out one certificate without encoding it.
    pub fn compose(&self, record: &StudentRecord, certificate_id: &str) -> Result<PageCanvas> {
        let mut page = PageCanvas::new(&self.page);
        Composer::new(&self.theme, &self.institution).compose(&mut page, record, certificate_id)?;
        Ok(page)
    }

    /// Compose and encode one certificate.
    #[instrument(skip(self, record), fields(student = %record.student_name))]
    pub async fn render_artifact(&self, record: &StudentRecord) -> Result<EncodedArtifact> {
        let identity = self.issue_identity(record);
        let page = self.compose(record, &identity.certificate_id)?;

        let encoder = PdfEncoder::new(format!("Certificado {}", identity.certificate_id));
        let bytes = tokio::task::spawn_blocking(move || encoder.encode(&page))
            .await
            .map_err(|e| LaureaError::Encoding(format!("encoder task failed: {e}")))??;
        if bytes.is_empty() {
            return Err(LaureaError::Encoding("encoder produced no bytes".into()));
        }

        let sha256 = hash_bytes(&bytes);
        debug!(
            bytes = bytes.len(),
            sha256 = %sha256,
            certificate_id = %identity.certificate_id,
            "artifact rendered"
        );
        Ok(EncodedArtifact {
            bytes,
            assigned_name: identity.assigned_name,
            certificate_id: identity.certificate_id,
            sha256,
        })
    }

    /// Generate one certificate and publish it.
    #[instrument(skip(self, record), fields(student = %record.student_name))]
    pub async fn generate_certificate(&self, record: &StudentRecord) -> Result<PublicationResult> {
        let artifact = self.render_artifact(record).await?;
        let path = format!("{ARTIFACT_DIRECTORY}/{}", artifact.assigned_name);
        let message = format!("add: certificado para {}", record.student_name);

        let locator = self.store.publish(&artifact.bytes, &path, &message).await?;
        info!(
            %locator,
            assigned_name = %artifact.assigned_name,
            certificate_id = %artifact.certificate_id,
            sha256 = %artifact.sha256,
            "certificate published"
        );

        Ok(PublicationResult {
            success: true,
            locator,
            assigned_name: artifact.assigned_name,
        })
    }

    /// Fill the request's missing fields with defaults, then generate.
    pub async fn create_certificate(
        &self,
        request: CertificateRequest,
    ) -> Result<PublicationResult> {
        let record = request.into_record(self.clock.now());
        self.generate_certificate(&record).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use laurea_core::identity::{FixedClock, FixedRandom};
    use laurea_core::{DEFAULT_STUDENT_NAME, StudentRecord};
    use laurea_document::Directive;

    use super::*;
    use crate::testing::{RecordingStore, is_assigned_name, is_certificate_id};

    fn fixed(generator: CertificateGenerator) -> CertificateGenerator {
        let at = chrono::Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        generator
            .with_clock(Arc::new(FixedClock(at)))
            .with_random(Arc::new(FixedRandom(123_456)))
    }

    #[tokio::test]
    async fn publishes_under_certificados_with_commit_message() {
        let store = Arc::new(RecordingStore::default());
        let generator = CertificateGenerator::new(store.clone());

        let result = generator
            .generate_certificate(&StudentRecord::new("Ana Li", "Redes"))
            .await
            .unwrap();

        assert!(result.success);
        assert!(is_assigned_name(&result.assigned_name), "{}", result.assigned_name);
        let calls = store.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, format!("certificados/{}", result.assigned_name));
        assert_eq!(calls[0].message, "add: certificado para Ana Li");
        assert!(calls[0].bytes.starts_with(b"%PDF"));
        assert_eq!(result.locator, format!("memory://{}", calls[0].path));
    }

    #[tokio::test]
    async fn assigned_name_is_sanitized() {
        let store = Arc::new(RecordingStore::default());
        let generator = fixed(CertificateGenerator::new(store));
        let millis = chrono::Utc
            .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
            .unwrap()
            .timestamp_millis();

        let result = generator
            .generate_certificate(&StudentRecord::new("Ana Li.", "Redes"))
            .await
            .unwrap();

        assert_eq!(result.assigned_name, format!("certificado_Ana_Li__{millis}.pdf"));
    }

    #[tokio::test]
    async fn certificate_id_is_printed_in_the_footer() {
        let generator = fixed(CertificateGenerator::new(Arc::new(RecordingStore::default())));
        let record = StudentRecord::new("Ana", "Redes");
        let identity = generator.issue_identity(&record);
        assert!(is_certificate_id(&identity.certificate_id));

        let page = generator.compose(&record, &identity.certificate_id).unwrap();
        let footer_line = format!("Certificación ID: {}", identity.certificate_id);
        assert!(
            page.directives()
                .iter()
                .any(|d| d.text() == Some(footer_line.as_str()))
        );

        let artifact = generator.render_artifact(&record).await.unwrap();
        assert_eq!(artifact.certificate_id, identity.certificate_id);
        assert_eq!(artifact.sha256.len(), 64);
    }

    #[test]
    fn fixed_sources_give_identical_layouts() {
        let a = fixed(CertificateGenerator::new(Arc::new(RecordingStore::default())));
        let b = fixed(CertificateGenerator::new(Arc::new(RecordingStore::default())));
        let record = StudentRecord::new("Ana", "Redes");

        let id_a = a.issue_identity(&record);
        let id_b = b.issue_identity(&record);
        assert_eq!(id_a, id_b);

        let page_a: Vec<Directive> = a
            .compose(&record, &id_a.certificate_id)
            .unwrap()
            .into_directives();
        let page_b: Vec<Directive> = b
            .compose(&record, &id_b.certificate_id)
            .unwrap()
            .into_directives();
        assert_eq!(page_a, page_b);
    }

    #[tokio::test]
    async fn fixed_sources_give_identical_bytes() {
        let a = fixed(CertificateGenerator::new(Arc::new(RecordingStore::default())));
        let b = fixed(CertificateGenerator::new(Arc::new(RecordingStore::default())));
        let mut record = StudentRecord::new("José Núñez", "Redes");
        record.duration = Some("40 horas".into());

        let first = a.render_artifact(&record).await.unwrap();
        let second = b.render_artifact(&record).await.unwrap();

        assert_eq!(first.certificate_id, second.certificate_id);
        assert_eq!(first.assigned_name, second.assigned_name);
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.sha256, second.sha256);
    }

    #[tokio::test]
    async fn composition_error_never_reaches_the_store() {
        let store = Arc::new(RecordingStore::default());
        let generator = CertificateGenerator::new(store.clone());

        let err = generator
            .generate_certificate(&StudentRecord::new("", "Redes"))
            .await
            .unwrap_err();

        assert!(matches!(err, LaureaError::Composition(_)));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn publication_error_propagates() {
        let store = Arc::new(RecordingStore::failing_for("Bea"));
        let generator = CertificateGenerator::new(store);

        let err = generator
            .generate_certificate(&StudentRecord::new("Bea", "Redes"))
            .await
            .unwrap_err();

        assert!(matches!(err, LaureaError::Publication(_)));
        assert_eq!(err.message(), "simulated remote failure for Bea");
    }

    #[tokio::test]
    async fn create_certificate_fills_defaults() {
        let store = Arc::new(RecordingStore::default());
        let generator = fixed(CertificateGenerator::new(store.clone()));

        generator
            .create_certificate(CertificateRequest::default())
            .await
            .unwrap();

        let calls = store.calls();
        assert_eq!(
            calls[0].message,
            format!("add: certificado para {DEFAULT_STUDENT_NAME}")
        );
        assert!(calls[0].path.contains("certificado_Juan_Carlos_P_rez_"));
    }

    #[tokio::test]
    async fn from_config_uses_filesystem_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            store: laurea_core::config::StoreConfig::Filesystem {
                root: dir.path().to_path_buf(),
            },
            ..Default::default()
        };
        let generator = CertificateGenerator::from_config(&config).unwrap();

        let result = generator
            .generate_certificate(&StudentRecord::new("Ana", "Redes"))
            .await
            .unwrap();

        assert!(result.locator.starts_with("file://"));
        let written = dir.path().join(ARTIFACT_DIRECTORY).join(&result.assigned_name);
        assert!(std::fs::read(written).unwrap().starts_with(b"%PDF"));
    }
}

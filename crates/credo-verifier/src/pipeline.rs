use std::sync::Arc;
use std::time::Duration;

use credo_canon::{canonicalize, ContextMap, DigestAlgorithm};
use credo_core::{codes, CredentialDocument, VerificationResult, VerifierConfig};
use credo_crypto::SuiteRegistry;
use credo_resolver::KeyResolver;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::VerifyError;
use crate::extractor::extract_proof;
use crate::status::{CredentialStatus, StatusChecker};
use crate::validator::validate_structure;

/// Per-call knobs. A `None` timeout lets the pipeline run unbounded.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub timeout: Option<Duration>,
}

impl VerifyOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Pipeline stages, in execution order. Used for tracing and for
/// naming where a deadline was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Validation,
    Extraction,
    Canonicalization,
    KeyResolution,
    SignatureCheck,
    StatusCheck,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Validation => "validation",
            Stage::Extraction => "proof extraction",
            Stage::Canonicalization => "canonicalization",
            Stage::KeyResolution => "key resolution",
            Stage::SignatureCheck => "signature check",
            Stage::StatusCheck => "status check",
        }
    }
}

/// The Linked-Data-Proof verification pipeline.
///
/// One instance is cheap to share across tasks: the suite registry and
/// term context are read-only after construction, and the resolver's
/// cache is concurrent.
pub struct LdpVerifier {
    suites: Arc<SuiteRegistry>,
    resolver: Arc<KeyResolver>,
    digest: DigestAlgorithm,
    context: Arc<ContextMap>,
    status_checker: Option<Arc<dyn StatusChecker>>,
}

impl LdpVerifier {
    /// A verifier with the built-in suites, SHA-256 digests, and the
    /// v1 credentials term context.
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            suites: Arc::new(SuiteRegistry::with_defaults()),
            resolver,
            digest: DigestAlgorithm::Sha256,
            context: Arc::new(ContextMap::credentials_v1()),
            status_checker: None,
        }
    }

    pub fn builder(resolver: Arc<KeyResolver>) -> LdpVerifierBuilder {
        LdpVerifierBuilder {
            resolver,
            suites: None,
            config: VerifierConfig::default(),
            context: None,
            status_checker: None,
        }
    }

    /// Verify a serialized credential. A string that does not parse as
    /// JSON is a malformed credential, not a panic.
    pub async fn verify(&self, credential: &str) -> VerificationResult {
        match serde_json::from_str::<Value>(credential) {
            Ok(value) => self.verify_json(&value).await,
            Err(e) => VerificationResult::failure(
                codes::MALFORMED_CREDENTIAL,
                format!("credential is not valid JSON: {e}"),
            ),
        }
    }

    pub async fn verify_json(&self, credential: &Value) -> VerificationResult {
        self.verify_with_options(credential, &VerifyOptions::default())
            .await
    }

    /// Run the pipeline, reporting every failure as a result with a
    /// stable error code. This method does not return `Err` and does
    /// not panic on any input.
    pub async fn verify_with_options(
        &self,
        credential: &Value,
        options: &VerifyOptions,
    ) -> VerificationResult {
        match self.run(credential, options).await {
            Ok(result) => {
                info!(
                    status = result.verification_status,
                    code = %result.verification_error_code,
                    "verification finished"
                );
                result
            }
            Err(err) => {
                let code = err.error_code();
                warn!(code, error = %err, "verification failed");
                VerificationResult::failure(code, err.to_string())
            }
        }
    }

    async fn run(
        &self,
        credential: &Value,
        options: &VerifyOptions,
    ) -> Result<VerificationResult, VerifyError> {
        let deadline = options.timeout.map(|t| Instant::now() + t);

        debug!(stage = Stage::Validation.as_str(), "starting");
        let document = CredentialDocument::new(credential.clone())?;
        let outcome = validate_structure(&document)?;
        debug!(expired = outcome.expired, "structure validated");

        check_deadline(deadline, Stage::Extraction)?;
        let (unsigned, proof) = extract_proof(credential)?;
        debug!(suite = %proof.proof_type, "proof extracted");

        check_deadline(deadline, Stage::Canonicalization)?;
        let canonical = canonicalize(&unsigned, &self.context)?;
        let digest = self.digest.digest(&canonical);
        debug!(
            algorithm = self.digest.name(),
            bytes = canonical.len(),
            "document digested"
        );

        check_deadline(deadline, Stage::KeyResolution)?;
        let key = self
            .resolve_key(&proof.verification_method, deadline)
            .await?;
        debug!(key = %key.id, algorithm = %key.algorithm, "key resolved");

        check_deadline(deadline, Stage::SignatureCheck)?;
        let suite = self.suites.resolve(&proof.proof_type)?;
        if !suite.verify(&digest, &proof, &key)? {
            return Ok(VerificationResult::mismatch());
        }

        if let Some(status) = document.credential_status() {
            if let Some(checker) = &self.status_checker {
                check_deadline(deadline, Stage::StatusCheck)?;
                match checker.check(status).await? {
                    CredentialStatus::Active => {}
                    CredentialStatus::Revoked => {
                        return Ok(VerificationResult::failure(
                            codes::REVOKED,
                            "credential has been revoked",
                        ))
                    }
                    CredentialStatus::Suspended => {
                        return Ok(VerificationResult::failure(
                            codes::REVOKED,
                            "credential has been suspended",
                        ))
                    }
                }
            }
        }

        if outcome.expired {
            return Ok(VerificationResult::success_with(
                "VC is expired",
                codes::VC_EXPIRED,
            ));
        }
        Ok(VerificationResult::success())
    }

    // The resolver is the only stage that suspends on a collaborator,
    // so the timeout wraps just this call.
    async fn resolve_key(
        &self,
        verification_method: &str,
        deadline: Option<Instant>,
    ) -> Result<Arc<credo_crypto::PublicKeyMaterial>, VerifyError> {
        match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                tokio::time::timeout(remaining, self.resolver.resolve(verification_method))
                    .await
                    .map_err(|_| VerifyError::DeadlineExceeded {
                        stage: Stage::KeyResolution.as_str(),
                    })?
                    .map_err(Into::into)
            }
            None => self
                .resolver
                .resolve(verification_method)
                .await
                .map_err(Into::into),
        }
    }
}

fn check_deadline(deadline: Option<Instant>, stage: Stage) -> Result<(), VerifyError> {
    match deadline {
        Some(deadline) if Instant::now() >= deadline => Err(VerifyError::DeadlineExceeded {
            stage: stage.as_str(),
        }),
        _ => Ok(()),
    }
}

pub struct LdpVerifierBuilder {
    resolver: Arc<KeyResolver>,
    suites: Option<Arc<SuiteRegistry>>,
    config: VerifierConfig,
    context: Option<Arc<ContextMap>>,
    status_checker: Option<Arc<dyn StatusChecker>>,
}

impl LdpVerifierBuilder {
    pub fn suites(mut self, suites: Arc<SuiteRegistry>) -> Self {
        self.suites = Some(suites);
        self
    }

    pub fn config(mut self, config: VerifierConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(mut self, context: Arc<ContextMap>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn status_checker(mut self, checker: Arc<dyn StatusChecker>) -> Self {
        self.status_checker = Some(checker);
        self
    }

    /// Fails only when the configured digest algorithm name is
    /// unknown.
    pub fn build(self) -> Result<LdpVerifier, VerifyError> {
        let digest = DigestAlgorithm::from_name(&self.config.digest_algorithm)?;
        let context = self.context.unwrap_or_else(|| {
            Arc::new(ContextMap::credentials_v1().lenient(self.config.lenient_context))
        });
        Ok(LdpVerifier {
            suites: self
                .suites
                .unwrap_or_else(|| Arc::new(SuiteRegistry::with_defaults())),
            resolver: self.resolver,
            digest,
            context,
            status_checker: self.status_checker,
        })
    }
}

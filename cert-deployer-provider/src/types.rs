use serde::{Deserialize, Serialize};

// ============ Provider Types ============

/// Identifies which CDN provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderType {
    /// BytePlus CDN. Requires feature `byteplus-cdn`.
    #[cfg(feature = "byteplus-cdn")]
    ByteplusCdn,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "byteplus-cdn")]
            Self::ByteplusCdn => write!(f, "byteplus-cdn"),
        }
    }
}

// ============ Deployment Types ============

/// Result of a successful certificate deployment.
///
/// Deliberately empty: reaching `Ok` is the whole signal. Kept as a struct so
/// fields can be added without breaking the `Deployer` contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployResult {}

/// Result of a certificate upload to a provider's certificate store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Provider-assigned certificate identifier, opaque to this crate.
    pub cert_id: String,
    /// Display name of the stored certificate, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_name: Option<String>,
}

/// A single accelerated domain entry in a certificate configuration report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertConfigDomain {
    /// Accelerated domain name (e.g., `"img.example.com"`).
    pub domain: String,
}

impl CertConfigDomain {
    /// Convenience constructor, mostly for tests and fakes.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

/// Provider-reported certificate configuration state for one certificate.
///
/// The provider partitions the domains eligible for a certificate into three
/// disjoint sets (disjointness is the provider's invariant, not checked here):
///
/// - [`cert_not_config`](Self::cert_not_config) — eligible domains with no
///   certificate bound at all;
/// - [`other_cert_config`](Self::other_cert_config) — domains currently bound
///   to a *different* certificate;
/// - [`specified_cert_config`](Self::specified_cert_config) — domains already
///   bound to exactly this certificate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertConfigState {
    /// Eligible domains without any certificate configured.
    pub cert_not_config: Vec<CertConfigDomain>,
    /// Domains bound to a different certificate.
    pub other_cert_config: Vec<CertConfigDomain>,
    /// Domains already bound to this exact certificate.
    pub specified_cert_config: Vec<CertConfigDomain>,
}

// ============ Certificate Store Types ============

/// Summary of a certificate already present in the provider's store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertSummary {
    /// Provider-assigned certificate identifier.
    pub cert_id: String,
    /// Display name / description of the stored certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Hex-encoded SHA-256 fingerprint of the leaf certificate, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint_sha256: Option<String>,
}

/// One page of a certificate store listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertInfoPage {
    /// Total number of certificates across all pages.
    pub total: u32,
    /// Certificates in the current page.
    pub certs: Vec<CertSummary>,
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a provider.
///
/// Used to dynamically build credential forms in UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"accessKey"`).
    pub key: String,
    /// Human-readable label (e.g., `"Access Key"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Provider-specific feature support flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeatures {
    /// Whether the deployer resolves wildcard domain patterns (`*.example.com`)
    /// against provider-reported configuration state.
    pub wildcard_domains: bool,
}

/// Provider-specific API limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLimits {
    /// Maximum page size for certificate store listings.
    pub max_page_size_certs: u32,
}

/// Static metadata describing a deployment provider.
///
/// Contains the provider's identity, required credential fields, and feature
/// flags. Useful for building dynamic UIs or validating configuration.
///
/// Obtain via [`Deployer::metadata()`](crate::Deployer::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Credential fields required to authenticate with this provider.
    pub required_fields: Vec<ProviderCredentialField>,
    /// Feature flags for this provider.
    pub features: ProviderFeatures,
    /// API limits for this provider.
    pub limits: ProviderLimits,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
///
/// Returned when credential fields are missing, empty, or have an invalid format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field has an invalid format.
    InvalidFormat {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Type-safe credential container for all supported deployment providers.
///
/// Each variant holds the authentication fields required by that provider.
/// Pass this to [`create_deployer()`](crate::create_deployer) or
/// [`create_uploader()`](crate::create_uploader) to instantiate a provider.
///
/// # Serialization
///
/// Serialized as a tagged enum with `"provider"` as the tag and `"credentials"`
/// as the content:
///
/// ```json
/// { "provider": "byteplus-cdn", "credentials": { "access_key": "...", "secret_key": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// BytePlus credentials. Requires feature `byteplus-cdn`.
    #[cfg(feature = "byteplus-cdn")]
    #[serde(rename = "byteplus-cdn")]
    ByteplusCdn {
        /// BytePlus Access Key.
        access_key: String,
        /// BytePlus Secret Key.
        secret_key: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// Useful for deserializing credentials stored in a flat key-value format.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        match provider {
            #[cfg(feature = "byteplus-cdn")]
            ProviderType::ByteplusCdn => Ok(Self::ByteplusCdn {
                access_key: Self::get_required_field(provider, map, "accessKey", "Access Key")?,
                secret_key: Self::get_required_field(provider, map, "secretKey", "Secret Key")?,
            }),
            #[allow(unreachable_patterns)]
            _ => Err(CredentialValidationError::InvalidFormat {
                provider: provider.clone(),
                field: "provider".to_string(),
                label: "Provider".to_string(),
                reason: format!(
                    "Provider '{provider}' is not supported or its feature is not enabled."
                ),
            }),
        }
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                provider: provider.clone(),
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> std::collections::HashMap<String, String> {
        match self {
            #[cfg(feature = "byteplus-cdn")]
            Self::ByteplusCdn {
                access_key,
                secret_key,
            } => [
                ("accessKey".to_string(), access_key.clone()),
                ("secretKey".to_string(), secret_key.clone()),
            ]
            .into(),
        }
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "byteplus-cdn")]
            Self::ByteplusCdn { .. } => ProviderType::ByteplusCdn,
        }
    }
}

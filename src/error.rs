//! Application error types using thiserror
//!
//! Error hierarchy:
//! - BomError: Issues with reading, interpreting or rewriting the BOM
//! - ConfigError: Issues with the configuration file or CLI values
//! - RegistryError: Issues with Maven repository communication
//! - ResolveError: Invalid operator input during upgrade resolution
//! - IoError: External command and output failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// BOM related errors
    #[error(transparent)]
    Bom(#[from] BomError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Repository related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Upgrade selection errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to the BOM document
#[derive(Error, Debug)]
pub enum BomError {
    /// BOM file not found
    #[error("BOM file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read BOM file
    #[error("failed to read BOM file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write BOM file
    #[error("failed to write BOM file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a usable pom
    #[error("failed to parse BOM {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A property reference chain loops back on itself
    #[error("property '{property}' refers to itself: {chain}")]
    PropertyCycle { property: String, chain: String },

    /// A property to rewrite is not declared in the document
    #[error("property '{property}' not found in {path}")]
    PropertyNotFound { property: String, path: PathBuf },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Invalid upgrade policy name
    #[error(
        "invalid upgrade policy '{value}': expected 'any', 'same-major-version' or 'same-minor-version'"
    )]
    InvalidPolicy { value: String },

    /// Invalid version range expression
    #[error("invalid version range '{value}': {message}")]
    InvalidVersionRange { value: String, message: String },

    /// Invalid `Project=RANGE` prohibition
    #[error("invalid prohibition '{value}': expected format like 'Spring Framework=[6.0.0,)'")]
    InvalidProhibition { value: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors related to Maven repository communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Artifact not found in repository
    #[error("artifact '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from repository
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors raised while the operator picks upgrades
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Selection is not a number
    #[error("invalid selection '{input}' for {project}: expected a number")]
    InvalidSelection { project: String, input: String },

    /// Selection does not match a listed candidate
    #[error("selection {selection} for {project} is out of range 1-{count}")]
    SelectionOutOfRange {
        project: String,
        selection: usize,
        count: usize,
    },

    /// Prompt could not be read
    #[error("failed to read selection: {source}")]
    PromptFailed {
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by external commands
#[derive(Error, Debug)]
pub enum IoError {
    /// External command exited unsuccessfully
    #[error("command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Results could not be written
    #[error("failed to write output: {source}")]
    WriteFailed {
        #[source]
        source: std::io::Error,
    },
}

impl BomError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        BomError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BomError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BomError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BomError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new PropertyCycle error from the visited chain
    pub fn property_cycle(property: impl Into<String>, chain: &[String]) -> Self {
        let property = property.into();
        let mut chain = chain.to_vec();
        chain.push(property.clone());
        BomError::PropertyCycle {
            property,
            chain: chain.join(" -> "),
        }
    }

    /// Creates a new PropertyNotFound error
    pub fn property_not_found(property: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        BomError::PropertyNotFound {
            property: property.into(),
            path: path.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// True for a missing artifact, which is expected in secondary repositories
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

impl IoError {
    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        IoError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a new WriteFailed error
    pub fn write_failed(source: std::io::Error) -> Self {
        IoError::WriteFailed { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_error_not_found() {
        let err = BomError::not_found("/path/to/pom.xml");
        let msg = format!("{}", err);
        assert!(msg.contains("BOM file not found"));
        assert!(msg.contains("pom.xml"));
    }

    #[test]
    fn test_bom_error_property_cycle() {
        let err = BomError::property_cycle("a.version", &["a.version".into(), "b.version".into()]);
        let msg = format!("{}", err);
        assert!(msg.contains("'a.version' refers to itself"));
        assert!(msg.contains("a.version -> b.version -> a.version"));
    }

    #[test]
    fn test_bom_error_property_not_found() {
        let err = BomError::property_not_found("netty.version", "/tmp/pom.xml");
        let msg = format!("{}", err);
        assert!(msg.contains("property 'netty.version' not found"));
    }

    #[test]
    fn test_config_error_invalid_range() {
        let err = ConfigError::InvalidVersionRange {
            value: "[2.0,1.0]".to_string(),
            message: "lower bound is greater than upper bound".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid version range"));
        assert!(msg.contains("[2.0,1.0]"));
    }

    #[test]
    fn test_config_error_invalid_policy() {
        let err = ConfigError::InvalidPolicy {
            value: "newest".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid upgrade policy 'newest'"));
    }

    #[test]
    fn test_config_error_toml_parse() {
        let err = ConfigError::toml_parse_error("/home/u/.bomr.toml", "invalid key");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse TOML"));
        assert!(msg.contains("invalid key"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("io.netty:netty-codec", "Maven Central");
        let msg = format!("{}", err);
        assert!(msg.contains("artifact 'io.netty:netty-codec' not found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("a:b", "https://repo", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("https://repo");
        assert!(format!("{}", err).contains("rate limit exceeded"));
    }

    #[test]
    fn test_resolve_error_invalid_selection() {
        let err = ResolveError::InvalidSelection {
            project: "Netty".to_string(),
            input: "two".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("invalid selection 'two' for Netty"));
    }

    #[test]
    fn test_resolve_error_out_of_range() {
        let err = ResolveError::SelectionOutOfRange {
            project: "Netty".to_string(),
            selection: 5,
            count: 2,
        };
        assert!(format!("{}", err).contains("out of range 1-2"));
    }

    #[test]
    fn test_io_error_command_failed() {
        let err = IoError::command_failed("git commit", "nothing to commit");
        let msg = format!("{}", err);
        assert!(msg.contains("command 'git commit' failed"));
    }

    #[test]
    fn test_io_error_write_failed() {
        let source = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let app_err: AppError = IoError::write_failed(source).into();
        assert!(format!("{}", app_err).contains("failed to write output: pipe closed"));
    }

    #[test]
    fn test_app_error_from_bom_error() {
        let app_err: AppError = BomError::not_found("/path").into();
        assert!(format!("{}", app_err).contains("BOM file not found"));
    }

    #[test]
    fn test_app_error_from_resolve_error() {
        let app_err: AppError = ResolveError::InvalidSelection {
            project: "X".into(),
            input: "?".into(),
        }
        .into();
        assert!(matches!(app_err, AppError::Resolve(_)));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = BomError::not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}

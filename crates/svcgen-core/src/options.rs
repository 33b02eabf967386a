//! Generator options.
//!
//! Options arrive as a comma-joined `key=value` string, either as the plugin
//! request parameter or as extra positional arguments of the directory-scan
//! mode. Parsing is best-effort: malformed fragments are skipped and a
//! boolean that does not parse falls back to the key's default.
//!
//! # Examples
//!
//! ```
//! use svcgen_core::GeneratorOptions;
//!
//! let options = GeneratorOptions::parse("enablePython=false,javaInterfacesPath=gen/java");
//! assert!(!options.enable_python);
//! assert!(options.enable_java);
//! assert_eq!(options.java_interfaces_path.as_deref(), Some("gen/java"));
//!
//! // Unparseable booleans keep their default
//! let options = GeneratorOptions::parse("enableJava=maybe");
//! assert!(options.enable_java);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Master switch for every Java artifact.
pub const ENABLE_JAVA: &str = "enableJava";
/// Switch for contract artifacts.
pub const ENABLE_JAVA_INTERFACES: &str = "enableJavaInterfaces";
/// Switch for default-implementation artifacts.
pub const ENABLE_JAVA_DEFAULT_IMPL: &str = "enableJavaDefaultImpl";
/// Switch for registration metadata artifacts.
pub const ENABLE_JAVA_META_INF: &str = "enableJavaMetaInf";
/// Switch for the scripting-language binding.
pub const ENABLE_PYTHON: &str = "enablePython";
/// Root prefix for contract artifact paths.
pub const JAVA_INTERFACES_PATH: &str = "javaInterfacesPath";
/// Root prefix for default-implementation artifact paths.
pub const JAVA_INTERFACES_IMPL_PATH: &str = "javaInterfacesImplPath";
/// Root prefix placed before the service registry directory.
pub const JAVA_META_INF_PATH: &str = "javaMetaInfPath";
/// Root prefix for scripting-language artifact paths.
pub const PYTHON_PATH: &str = "pythonPath";

/// Parsed generator options.
///
/// Path overrides only influence artifact paths, never artifact content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorOptions {
    /// Generate Java artifacts at all
    pub enable_java: bool,
    /// Generate contract artifacts
    pub enable_java_interfaces: bool,
    /// Generate default-implementation artifacts
    pub enable_java_default_impl: bool,
    /// Generate registration metadata
    pub enable_java_meta_inf: bool,
    /// Generate the scripting-language binding
    pub enable_python: bool,
    /// Root prefix for contracts
    pub java_interfaces_path: Option<String>,
    /// Root prefix for default implementations
    pub java_interfaces_impl_path: Option<String>,
    /// Root prefix for registration metadata
    pub java_meta_inf_path: Option<String>,
    /// Root prefix for the scripting-language binding
    pub python_path: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            enable_java: true,
            enable_java_interfaces: true,
            enable_java_default_impl: true,
            enable_java_meta_inf: true,
            enable_python: true,
            java_interfaces_path: None,
            java_interfaces_impl_path: None,
            java_meta_inf_path: None,
            python_path: None,
        }
    }
}

impl GeneratorOptions {
    /// Parses a comma-joined `key=value` option string.
    ///
    /// Fragments without `=` or with an empty key are ignored; when a key
    /// repeats, the last occurrence wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::GeneratorOptions;
    ///
    /// let options = GeneratorOptions::parse("enableJava=false,,=x,enableJava=TRUE");
    /// assert!(options.enable_java);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from_pairs(split_pairs(raw))
    }

    /// Parses command-line style arguments such as `--enablePython=false`.
    ///
    /// Each argument may itself hold a comma-joined list.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_core::GeneratorOptions;
    ///
    /// let options = GeneratorOptions::from_args(["--enablePython=false", "pythonPath=py"]);
    /// assert!(!options.enable_python);
    /// assert_eq!(options.python_path.as_deref(), Some("py"));
    /// ```
    #[must_use]
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pairs: Vec<(String, String)> = args
            .into_iter()
            .flat_map(|arg| {
                let arg = arg.as_ref();
                split_pairs(arg.strip_prefix("--").unwrap_or(arg))
            })
            .collect();
        Self::from_pairs(pairs)
    }

    fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.apply(&key, value);
        }
        options
    }

    fn apply(&mut self, key: &str, value: String) {
        let defaults = Self::default();
        match key {
            ENABLE_JAVA => self.enable_java = parse_bool(key, &value, defaults.enable_java),
            ENABLE_JAVA_INTERFACES => {
                self.enable_java_interfaces =
                    parse_bool(key, &value, defaults.enable_java_interfaces);
            }
            ENABLE_JAVA_DEFAULT_IMPL => {
                self.enable_java_default_impl =
                    parse_bool(key, &value, defaults.enable_java_default_impl);
            }
            ENABLE_JAVA_META_INF => {
                self.enable_java_meta_inf = parse_bool(key, &value, defaults.enable_java_meta_inf);
            }
            ENABLE_PYTHON => self.enable_python = parse_bool(key, &value, defaults.enable_python),
            JAVA_INTERFACES_PATH => self.java_interfaces_path = non_empty(value),
            JAVA_INTERFACES_IMPL_PATH => self.java_interfaces_impl_path = non_empty(value),
            JAVA_META_INF_PATH => self.java_meta_inf_path = non_empty(value),
            PYTHON_PATH => self.python_path = non_empty(value),
            other => debug!("Ignoring unknown generator option '{other}'"),
        }
    }

    /// Returns `true` if contract artifacts should be generated.
    #[must_use]
    pub const fn java_interfaces_enabled(&self) -> bool {
        self.enable_java && self.enable_java_interfaces
    }

    /// Returns `true` if default-implementation artifacts should be generated.
    #[must_use]
    pub const fn java_default_impl_enabled(&self) -> bool {
        self.enable_java && self.enable_java_default_impl
    }

    /// Returns `true` if registration metadata should be generated.
    #[must_use]
    pub const fn java_meta_inf_enabled(&self) -> bool {
        self.enable_java && self.enable_java_meta_inf
    }
}

fn split_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter_map(|fragment| {
            let (key, value) = fragment.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}

fn parse_bool(key: &str, value: &str, default: bool) -> bool {
    if value.eq_ignore_ascii_case("true") {
        true
    } else if value.eq_ignore_ascii_case("false") {
        false
    } else {
        warn!("Option '{key}' expects true or false, got '{value}'; using default {default}");
        default
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

//! Naming conventions of generated artifacts.
//!
//! Pure string helpers shared by the generators: contract and
//! implementation class names, stub class names, case conversions and
//! artifact path construction.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::CallMode;
//! use svcgen_codegen::naming::{contract_name, default_impl_name, to_snake_case};
//!
//! assert_eq!(contract_name("Search", CallMode::Sync), "SearchService");
//! assert_eq!(contract_name("Search", CallMode::Async), "AsyncSearchService");
//! assert_eq!(default_impl_name("Search", CallMode::Async), "SearchDefaultAsyncImpl");
//! assert_eq!(to_snake_case("HTTPGateway"), "http_gateway");
//! ```

use crate::shape::CallMode;

/// Runtime package providing the base class, retry policy and stub storage.
pub const RUNTIME_PACKAGE: &str = "com.exactpro.th2.service";

/// Fully-qualified name of the mapping type used for routing properties.
pub const PROPERTIES_TYPE: &str = "java.util.Map<java.lang.String, java.lang.String>";

/// Fully-qualified name of the callback sink type, without type arguments.
pub const STREAM_OBSERVER: &str = "io.grpc.stub.StreamObserver";

/// Fully-qualified name of the lazy sequence type, without type arguments.
pub const ITERATOR: &str = "java.util.Iterator";

/// Directory holding service registration metadata.
pub const SERVICE_REGISTRY_DIR: &str = "META-INF/services";

/// Returns the contract (interface) name of a service for a call mode.
#[must_use]
pub fn contract_name(service: &str, mode: CallMode) -> String {
    match mode {
        CallMode::Sync => format!("{service}Service"),
        CallMode::Async => format!("Async{service}Service"),
    }
}

/// Returns the default implementation class name of a service for a call mode.
#[must_use]
pub fn default_impl_name(service: &str, mode: CallMode) -> String {
    match mode {
        CallMode::Sync => format!("{service}DefaultBlockingImpl"),
        CallMode::Async => format!("{service}DefaultAsyncImpl"),
    }
}

/// Returns the fully-qualified name of the transport class generated for a service.
#[must_use]
pub fn grpc_class_name(namespace: &str, service: &str) -> String {
    qualify(namespace, &format!("{service}Grpc"))
}

/// Returns the fully-qualified stub class name of a service for a call mode.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::CallMode;
/// use svcgen_codegen::naming::stub_class_name;
///
/// assert_eq!(
///     stub_class_name("com.acme", "Search", CallMode::Sync),
///     "com.acme.SearchGrpc.SearchBlockingStub"
/// );
/// assert_eq!(stub_class_name("", "Search", CallMode::Async), "SearchGrpc.SearchStub");
/// ```
#[must_use]
pub fn stub_class_name(namespace: &str, service: &str, mode: CallMode) -> String {
    let grpc = grpc_class_name(namespace, service);
    match mode {
        CallMode::Sync => format!("{grpc}.{service}BlockingStub"),
        CallMode::Async => format!("{grpc}.{service}Stub"),
    }
}

/// Returns the factory method on the transport class that creates a stub.
#[must_use]
pub const fn stub_factory(mode: CallMode) -> &'static str {
    match mode {
        CallMode::Sync => "newBlockingStub",
        CallMode::Async => "newStub",
    }
}

/// Joins a namespace and a simple name, omitting the separator for the
/// empty namespace.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::qualify;
///
/// assert_eq!(qualify("com.acme", "Query"), "com.acme.Query");
/// assert_eq!(qualify("", "Query"), "Query");
/// ```
#[must_use]
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// Lowercases the first character of a schema method name.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::lower_first;
///
/// assert_eq!(lower_first("FindAll"), "findAll");
/// assert_eq!(lower_first("x"), "x");
/// assert_eq!(lower_first(""), "");
/// ```
#[must_use]
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts an UpperCamel or lowerCamel identifier to snake_case.
///
/// Runs of capitals are treated as one word, so acronyms stay together.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("SearchService"), "search_service");
/// assert_eq!(to_snake_case("HTTPGateway"), "http_gateway");
/// assert_eq!(to_snake_case("getURL"), "get_url");
/// assert_eq!(to_snake_case("Check2Fa"), "check2_fa");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }

    result
}

/// Converts a file base name to UpperCamelCase the way outer container
/// names are derived.
///
/// Separators are dropped and the following letter is capitalized; a
/// letter following a digit is capitalized too.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::to_upper_camel;
///
/// assert_eq!(to_upper_camel("search_service"), "SearchService");
/// assert_eq!(to_upper_camel("event-store"), "EventStore");
/// assert_eq!(to_upper_camel("v2api"), "V2Api");
/// ```
#[must_use]
pub fn to_upper_camel(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = true;

    for ch in name.chars() {
        if ch.is_ascii_lowercase() {
            if capitalize_next {
                result.push(ch.to_ascii_uppercase());
            } else {
                result.push(ch);
            }
            capitalize_next = false;
        } else if ch.is_ascii_uppercase() {
            result.push(ch);
            capitalize_next = false;
        } else if ch.is_ascii_digit() {
            result.push(ch);
            capitalize_next = true;
        } else {
            capitalize_next = true;
        }
    }

    result
}

/// Splits a schema file name into its directory and its base name without
/// extension.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::split_file_name;
///
/// assert_eq!(split_file_name("acme/search/v1/search.proto"), ("acme/search/v1", "search"));
/// assert_eq!(split_file_name("search.proto"), ("", "search"));
/// assert_eq!(split_file_name("Makefile"), ("", "Makefile"));
/// ```
#[must_use]
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    let (dir, base) = file_name.rsplit_once('/').unwrap_or(("", file_name));
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };
    (dir, stem)
}

/// Joins path segments with `/`, skipping empty segments and trimming
/// surplus separators at the joints.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::join_path;
///
/// assert_eq!(join_path(&["gen/java/", "com/acme", "Search.java"]), "gen/java/com/acme/Search.java");
/// assert_eq!(join_path(&["", "", "Search.java"]), "Search.java");
/// ```
#[must_use]
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the path of a Java source file for a class in a namespace.
///
/// # Examples
///
/// ```
/// use svcgen_codegen::naming::java_source_path;
///
/// assert_eq!(
///     java_source_path(Some("src/gen"), "com.acme", "SearchService"),
///     "src/gen/com/acme/SearchService.java"
/// );
/// assert_eq!(java_source_path(None, "", "SearchService"), "SearchService.java");
/// ```
#[must_use]
pub fn java_source_path(root: Option<&str>, namespace: &str, class_name: &str) -> String {
    let package_dir = namespace.replace('.', "/");
    let file_name = format!("{class_name}.java");
    join_path(&[root.unwrap_or_default(), &package_dir, &file_name])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_simple() {
        assert_eq!(to_snake_case("Search"), "search");
        assert_eq!(to_snake_case("search"), "search");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_snake_case_acronyms() {
        assert_eq!(to_snake_case("HTTPGateway"), "http_gateway");
        assert_eq!(to_snake_case("ACT"), "act");
        assert_eq!(to_snake_case("MyACTService"), "my_act_service");
    }

    #[test]
    fn test_snake_case_keeps_existing_underscores() {
        assert_eq!(to_snake_case("Legacy_Service"), "legacy_service");
    }

    #[test]
    fn test_upper_camel_edge_cases() {
        assert_eq!(to_upper_camel(""), "");
        assert_eq!(to_upper_camel("__x"), "X");
        assert_eq!(to_upper_camel("AlreadyCamel"), "AlreadyCamel");
    }

    #[test]
    fn test_split_file_name_hidden_file() {
        assert_eq!(split_file_name("dir/.hidden"), ("dir", ".hidden"));
        assert_eq!(split_file_name("a/b.c.proto"), ("a", "b.c"));
    }

    #[test]
    fn test_stub_names_per_mode() {
        assert_eq!(
            stub_class_name("x.y", "Echo", CallMode::Async),
            "x.y.EchoGrpc.EchoStub"
        );
        assert_eq!(stub_factory(CallMode::Sync), "newBlockingStub");
        assert_eq!(stub_factory(CallMode::Async), "newStub");
    }

    #[test]
    fn test_default_impl_names() {
        assert_eq!(default_impl_name("Echo", CallMode::Sync), "EchoDefaultBlockingImpl");
        assert_eq!(default_impl_name("Echo", CallMode::Async), "EchoDefaultAsyncImpl");
    }
}

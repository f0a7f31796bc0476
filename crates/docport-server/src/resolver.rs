//! Document resolution.
//!
//! [`DocResolver`] turns `(product, version, docs path)` into the raw markdown
//! of a documentation page:
//!
//! 1. look up the product in the [`ProductRegistry`],
//! 2. resolve the version with a [`VersionResolver`],
//! 3. read `content/<product>/<version>/<content_dir>/<path>.mdx`,
//!    falling back to `<path>/index.mdx`,
//! 4. split front matter from the body.
//!
//! Every failure is logged once at error level and returned as a [`DocError`].

use std::fmt;
use std::sync::Arc;

use docport_config::{ProductConfig, ProductRegistry};
use docport_meta::{FrontMatter, Metadata};
use docport_storage::{Storage, join_segments};
use docport_versions::VersionResolver;
use serde::Serialize;

use crate::error::DocError;

/// Top-level directory of all documentation sources.
const CONTENT_ROOT: &str = "content";

/// Markdown source file extension.
const MDX_EXTENSION: &str = ".mdx";

/// Directory index file name.
const INDEX_FILE: &str = "index.mdx";

/// Successfully resolved document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocPayload {
    /// Product slug.
    pub product: String,
    /// Resolved version.
    pub version: String,
    /// Markdown body without front matter.
    pub markdown_source: String,
    /// Repository path of the source file (e.g. `content/vault/v1.15.x/docs/index.mdx`).
    pub github_file: String,
    /// Front matter metadata.
    pub metadata: Metadata,
}

/// Split a `/`-separated docs path into segments, dropping empty ones.
///
/// `"a//b/"` becomes `["a", "b"]`; `""` becomes no segments (the docs root).
#[must_use]
pub fn split_docs_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Candidate location of a document, as ordered path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    segments: Vec<String>,
}

impl ContentPath {
    /// `content/<product>/<version>/<content_dir>`.
    fn base(product: &str, version: &str, product_config: &ProductConfig) -> Vec<String> {
        vec![
            CONTENT_ROOT.to_owned(),
            product.to_owned(),
            version.to_owned(),
            product_config.content_dir.clone(),
        ]
    }

    /// File candidate: last docs segment with `.mdx` appended (unless present).
    ///
    /// Returns `None` for an empty docs path, which only has an index candidate.
    fn file(
        product: &str,
        version: &str,
        product_config: &ProductConfig,
        docs_path: &[&str],
    ) -> Option<Self> {
        let (last, parents) = docs_path.split_last()?;
        let mut segments = Self::base(product, version, product_config);
        segments.extend(parents.iter().map(|s| (*s).to_owned()));
        if last.ends_with(MDX_EXTENSION) {
            segments.push((*last).to_owned());
        } else {
            segments.push(format!("{last}{MDX_EXTENSION}"));
        }
        Some(Self { segments })
    }

    /// Directory candidate: docs path treated as a directory holding `index.mdx`.
    fn index(
        product: &str,
        version: &str,
        product_config: &ProductConfig,
        docs_path: &[&str],
    ) -> Self {
        let mut segments = Self::base(product, version, product_config);
        if let Some((last, parents)) = docs_path.split_last() {
            segments.extend(parents.iter().map(|s| (*s).to_owned()));
            let dir = last.strip_suffix(MDX_EXTENSION).unwrap_or(last);
            if !dir.is_empty() {
                segments.push(dir.to_owned());
            }
        }
        segments.push(INDEX_FILE.to_owned());
        Self { segments }
    }

    /// Candidates in lookup order: file first, then directory index.
    ///
    /// Empty segments are skipped, so segment lists built by hand behave like
    /// those from [`split_docs_path`].
    pub fn candidates(
        product: &str,
        version: &str,
        product_config: &ProductConfig,
        docs_path: &[String],
    ) -> Vec<Self> {
        let docs_path: Vec<&str> = docs_path
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();

        Self::file(product, version, product_config, &docs_path)
            .into_iter()
            .chain(std::iter::once(Self::index(
                product,
                version,
                product_config,
                &docs_path,
            )))
            .collect()
    }

    /// Path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_segments(&self.segments))
    }
}

/// Resolves documentation requests to markdown sources.
///
/// Holds the immutable product registry and the three collaborators. It has
/// no mutable state, so a single instance serves all requests concurrently.
pub struct DocResolver {
    products: ProductRegistry,
    versions: Arc<dyn VersionResolver>,
    storage: Arc<dyn Storage>,
    front_matter: Arc<dyn FrontMatter>,
}

impl DocResolver {
    /// Create a resolver.
    ///
    /// # Arguments
    ///
    /// * `products` - Product registry
    /// * `versions` - Version resolver
    /// * `storage` - Content reader
    /// * `front_matter` - Front matter parser
    #[must_use]
    pub fn new(
        products: ProductRegistry,
        versions: Arc<dyn VersionResolver>,
        storage: Arc<dyn Storage>,
        front_matter: Arc<dyn FrontMatter>,
    ) -> Self {
        Self {
            products,
            versions,
            storage,
            front_matter,
        }
    }

    /// Resolve a document.
    ///
    /// Failures are logged once at error level with the diagnostic message;
    /// the success path doesn't log at error level.
    ///
    /// # Arguments
    ///
    /// * `product` - Product slug
    /// * `version` - Requested version (or `latest`)
    /// * `docs_path` - Docs path segments (empty segments are ignored)
    pub fn resolve(
        &self,
        product: &str,
        version: &str,
        docs_path: &[String],
    ) -> Result<DocPayload, DocError> {
        self.try_resolve(product, version, docs_path)
            .inspect_err(|err| {
                tracing::error!(product = %product, version = %version, "{err}");
            })
    }

    fn try_resolve(
        &self,
        product: &str,
        version: &str,
        docs_path: &[String],
    ) -> Result<DocPayload, DocError> {
        let product_config = self
            .products
            .get(product)
            .ok_or_else(|| DocError::UnknownProduct(product.to_owned()))?;

        let version = self.versions.resolve(product, version)?;

        let candidates = ContentPath::candidates(product, &version, product_config, docs_path);
        let (path, raw) = self.read_first(&candidates)?;

        let document = self.front_matter.parse(&raw)?;

        Ok(DocPayload {
            product: product.to_owned(),
            version,
            markdown_source: document.markdown_source,
            github_file: path.to_string(),
            metadata: document.metadata,
        })
    }

    /// Read candidates in order and return the first readable one.
    fn read_first<'a>(
        &self,
        candidates: &'a [ContentPath],
    ) -> Result<(&'a ContentPath, String), DocError> {
        for candidate in candidates {
            match self.storage.read(candidate.segments()) {
                Ok(raw) => return Ok((candidate, raw)),
                Err(e) => {
                    tracing::debug!(path = %candidate, error = %e, "Content candidate not readable");
                }
            }
        }

        Err(DocError::ContentNotFound {
            candidates: candidates.iter().map(ToString::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use docport_meta::{FrontMatterError, ParsedDocument, YamlFrontMatter};
    use docport_storage::{MockStorage, StorageErrorKind};
    use docport_versions::{IndexResolver, VersionEntry, VersionError, VersionIndex};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_logs::capture_error_logs;

    const SLUG: &str = "terraform-plugin-framework";
    const VERSION: &str = "v1.13.x";

    /// Version resolver returning a fixed result.
    struct FixedVersion(Result<String, VersionError>);

    impl VersionResolver for FixedVersion {
        fn resolve(&self, _product: &str, _version: &str) -> Result<String, VersionError> {
            self.0.clone()
        }
    }

    /// Front matter parser that always fails.
    struct FailingParser;

    impl FrontMatter for FailingParser {
        fn parse(&self, _raw: &str) -> Result<ParsedDocument, FrontMatterError> {
            Err(FrontMatterError::Parse(
                "Failed to parse Markdown front-matter".to_owned(),
            ))
        }
    }

    /// Run `f` with error-level events captured; returns its result and the log lines.
    fn with_error_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let (guard, logs) = capture_error_logs();
        let result = f();
        drop(guard);
        (result, logs.lines())
    }

    fn registry() -> ProductRegistry {
        ProductRegistry::default()
            .with_product("terraform-enterprise", ProductConfig::new("docs", true))
            .with_product(SLUG, ProductConfig::new("docs", true))
    }

    fn resolver_with(
        versions: impl VersionResolver + 'static,
        storage: Arc<MockStorage>,
        front_matter: impl FrontMatter + 'static,
    ) -> DocResolver {
        DocResolver::new(registry(), Arc::new(versions), storage, Arc::new(front_matter))
    }

    fn resolver(storage: Arc<MockStorage>) -> DocResolver {
        resolver_with(
            FixedVersion(Ok(VERSION.to_owned())),
            storage,
            YamlFrontMatter,
        )
    }

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_unknown_product_is_logged_with_slug() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver(Arc::clone(&storage));

        let (result, logs) =
            with_error_logs(|| resolver.resolve("fake product", "", &segments(&[""])));

        assert!(matches!(result, Err(DocError::UnknownProduct(ref s)) if s == "fake product"));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("Product, fake product, not found"));
        assert!(storage.reads().is_empty());
    }

    #[test]
    fn test_unresolvable_version_is_logged_with_resolver_message() {
        let version = "lorem ipsum dolor sit amet";
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver_with(
            FixedVersion(Err(VersionError::NotFound {
                product: SLUG.to_owned(),
                version: version.to_owned(),
            })),
            Arc::clone(&storage),
            YamlFrontMatter,
        );

        let (result, logs) = with_error_logs(|| resolver.resolve(SLUG, version, &segments(&[""])));

        assert!(matches!(result, Err(DocError::Version(_))));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains(&format!(
            "Product, {SLUG}, has no \"{version}\" version"
        )));
        assert!(storage.reads().is_empty());
    }

    #[test]
    fn test_missing_content_is_logged() {
        let storage = Arc::new(MockStorage::new());
        let resolver = resolver(Arc::clone(&storage));

        let (result, logs) =
            with_error_logs(|| resolver.resolve(SLUG, VERSION, &segments(&["docs", "example"])));

        assert!(matches!(result, Err(DocError::ContentNotFound { .. })));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].to_lowercase().contains("no content found"));
        assert_eq!(
            storage.reads(),
            vec![
                "content/terraform-plugin-framework/v1.13.x/docs/docs/example.mdx",
                "content/terraform-plugin-framework/v1.13.x/docs/docs/example/index.mdx",
            ]
        );
    }

    #[test]
    fn test_invalid_front_matter_is_logged() {
        let storage = Arc::new(
            MockStorage::new().with_content(
                "content/terraform-plugin-framework/v1.13.x/docs/index.mdx",
                "[[test]",
            ),
        );
        let resolver = resolver_with(
            FixedVersion(Ok(VERSION.to_owned())),
            storage,
            FailingParser,
        );

        let (result, logs) = with_error_logs(|| resolver.resolve(SLUG, VERSION, &segments(&[""])));

        assert!(matches!(result, Err(DocError::FrontMatter(_))));
        assert_eq!(logs.len(), 1);
        assert!(logs[0].to_lowercase().contains("failed to parse markdown"));
    }

    #[test]
    fn test_unterminated_front_matter_with_yaml_parser() {
        let storage = Arc::new(MockStorage::new().with_content(
            "content/terraform-plugin-framework/v1.13.x/docs/intro.mdx",
            "---\ntitle: Intro\n# Intro",
        ));
        let resolver = resolver(storage);

        let (result, logs) = with_error_logs(|| resolver.resolve(SLUG, VERSION, &segments(&["intro"])));

        assert!(matches!(result, Err(DocError::FrontMatter(_))));
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_primary_path_success() {
        let storage = Arc::new(MockStorage::new().with_content(
            "content/terraform-plugin-framework/v1.13.x/docs/plugin/framework/internals/rpcs.mdx",
            "# Hello World",
        ));
        let resolver = resolver(Arc::clone(&storage));

        let (result, logs) = with_error_logs(|| {
            resolver.resolve(
                SLUG,
                VERSION,
                &segments(&["plugin", "framework", "internals", "rpcs"]),
            )
        });

        let payload = result.unwrap();
        assert!(logs.is_empty());
        assert_eq!(payload.product, SLUG);
        assert_eq!(payload.version, VERSION);
        assert_eq!(payload.markdown_source, "# Hello World");
        assert_eq!(
            payload.github_file,
            "content/terraform-plugin-framework/v1.13.x/docs/plugin/framework/internals/rpcs.mdx"
        );
        // First success wins: the fallback is never tried.
        assert_eq!(storage.reads().len(), 1);
    }

    #[test]
    fn test_primary_path_does_not_double_mdx_suffix() {
        let storage = Arc::new(MockStorage::new().with_content(
            "content/terraform-plugin-framework/v1.13.x/docs/plugin/framework/internals/rpcs.mdx",
            "# Hello World",
        ));
        let resolver = resolver(storage);

        let (result, logs) = with_error_logs(|| {
            resolver.resolve(
                SLUG,
                VERSION,
                &segments(&["plugin", "framework", "internals", "rpcs.mdx"]),
            )
        });

        assert!(logs.is_empty());
        assert_eq!(
            result.unwrap().github_file,
            "content/terraform-plugin-framework/v1.13.x/docs/plugin/framework/internals/rpcs.mdx"
        );
    }

    #[test]
    fn test_fallback_to_index_path() {
        let storage = Arc::new(MockStorage::new().with_content(
            "content/terraform-enterprise/v1.13.x/docs/docs/example/index.mdx",
            "# Hello World",
        ));
        let resolver = resolver(Arc::clone(&storage));

        let (result, logs) = with_error_logs(|| {
            resolver.resolve(
                "terraform-enterprise",
                VERSION,
                &segments(&["docs", "example"]),
            )
        });

        assert!(logs.is_empty());
        assert_eq!(
            result.unwrap().github_file,
            "content/terraform-enterprise/v1.13.x/docs/docs/example/index.mdx"
        );
        assert_eq!(
            storage.reads(),
            vec![
                "content/terraform-enterprise/v1.13.x/docs/docs/example.mdx",
                "content/terraform-enterprise/v1.13.x/docs/docs/example/index.mdx",
            ]
        );
    }

    #[test]
    fn test_fallback_after_primary_read_error() {
        let storage = Arc::new(
            MockStorage::new()
                .with_error(
                    "content/terraform-plugin-framework/v1.13.x/docs/guide.mdx",
                    StorageErrorKind::PermissionDenied,
                )
                .with_content(
                    "content/terraform-plugin-framework/v1.13.x/docs/guide/index.mdx",
                    "# Guide",
                ),
        );
        let resolver = resolver(storage);

        let payload = resolver
            .resolve(SLUG, VERSION, &segments(&["guide"]))
            .unwrap();

        assert_eq!(
            payload.github_file,
            "content/terraform-plugin-framework/v1.13.x/docs/guide/index.mdx"
        );
    }

    #[test]
    fn test_primary_preferred_over_index() {
        let storage = Arc::new(
            MockStorage::new()
                .with_content("content/terraform-plugin-framework/v1.13.x/docs/guide.mdx", "file")
                .with_content(
                    "content/terraform-plugin-framework/v1.13.x/docs/guide/index.mdx",
                    "index",
                ),
        );
        let resolver = resolver(storage);

        let payload = resolver
            .resolve(SLUG, VERSION, &segments(&["guide"]))
            .unwrap();

        assert_eq!(payload.markdown_source, "file");
    }

    #[test]
    fn test_front_matter_is_split_from_body() {
        let storage = Arc::new(MockStorage::new().with_content(
            "content/terraform-plugin-framework/v1.13.x/docs/intro.mdx",
            "---\npage_title: Intro\n---\n# Intro\n",
        ));
        let resolver = resolver(storage);

        let payload = resolver
            .resolve(SLUG, VERSION, &segments(&["intro"]))
            .unwrap();

        assert_eq!(payload.markdown_source, "# Intro\n");
        assert_eq!(
            payload.metadata.get("page_title"),
            Some(&serde_json::json!("Intro"))
        );
    }

    #[test]
    fn test_resolved_version_is_used() {
        let index = VersionIndex::new().with_product(SLUG, [VersionEntry::new(VERSION, true)]);
        let storage = Arc::new(MockStorage::new().with_content(
            "content/terraform-plugin-framework/v1.13.x/docs/intro.mdx",
            "# Intro",
        ));
        let resolver = resolver_with(IndexResolver::new(index), storage, YamlFrontMatter);

        let payload = resolver
            .resolve(SLUG, "latest", &segments(&["intro"]))
            .unwrap();

        assert_eq!(payload.version, VERSION);
        assert_eq!(
            payload.github_file,
            "content/terraform-plugin-framework/v1.13.x/docs/intro.mdx"
        );
    }

    #[test]
    fn test_payload_serialization() {
        let payload = DocPayload {
            product: SLUG.to_owned(),
            version: VERSION.to_owned(),
            markdown_source: "# Hello".to_owned(),
            github_file: "content/x.mdx".to_owned(),
            metadata: Metadata::new(),
        };

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["product"], SLUG);
        assert_eq!(json["version"], VERSION);
        assert_eq!(json["markdownSource"], "# Hello");
        assert_eq!(json["githubFile"], "content/x.mdx");
        assert_eq!(json["metadata"], serde_json::json!({}));
    }

    // ContentPath

    fn candidate_strings(docs_path: &[&str]) -> Vec<String> {
        ContentPath::candidates(
            "vault",
            "v1.15.x",
            &ProductConfig::new("docs", true),
            &segments(docs_path),
        )
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    #[test]
    fn test_candidates_plain_path() {
        assert_eq!(
            candidate_strings(&["secrets", "kv"]),
            vec![
                "content/vault/v1.15.x/docs/secrets/kv.mdx",
                "content/vault/v1.15.x/docs/secrets/kv/index.mdx",
            ]
        );
    }

    #[test]
    fn test_candidates_with_mdx_suffix() {
        assert_eq!(
            candidate_strings(&["secrets", "kv.mdx"]),
            vec![
                "content/vault/v1.15.x/docs/secrets/kv.mdx",
                "content/vault/v1.15.x/docs/secrets/kv/index.mdx",
            ]
        );
    }

    #[test]
    fn test_candidates_empty_path() {
        assert_eq!(
            candidate_strings(&[]),
            vec!["content/vault/v1.15.x/docs/index.mdx"]
        );
        assert_eq!(
            candidate_strings(&[""]),
            vec!["content/vault/v1.15.x/docs/index.mdx"]
        );
    }

    #[test]
    fn test_split_docs_path() {
        assert_eq!(
            split_docs_path("plugin/framework/internals/rpcs"),
            vec!["plugin", "framework", "internals", "rpcs"]
        );
        assert_eq!(split_docs_path("/a//b/"), vec!["a", "b"]);
        assert!(split_docs_path("").is_empty());
    }

    #[test]
    fn test_candidates_skip_empty_segments() {
        assert_eq!(
            candidate_strings(&["secrets", "", "kv"])[0],
            "content/vault/v1.15.x/docs/secrets/kv.mdx"
        );
    }
}

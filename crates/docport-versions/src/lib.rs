//! Version index and version resolution for docport.
//!
//! Every documentation product publishes content per version under
//! `content/<product>/<version>/`. The [`VersionIndex`] lists the versions
//! that exist for each product (loaded from a `versionMetadata.json` file), and
//! [`IndexResolver`] validates requested version strings against it,
//! expanding the `latest` alias to the concrete latest version.
//!
//! # Example
//!
//! ```ignore
//! use docport_versions::{IndexResolver, VersionIndex, VersionResolver};
//!
//! let index = VersionIndex::load(Path::new("versionMetadata.json"))?;
//! let resolver = IndexResolver::new(index);
//! assert_eq!(resolver.resolve("vault", "latest")?, "v1.15.x");
//! ```

mod index;
mod resolver;

pub use index::{IndexError, VersionEntry, VersionIndex};
pub use resolver::{IndexResolver, LATEST, VersionError, VersionResolver};

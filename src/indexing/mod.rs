pub mod extractor;
pub mod resolver;
pub mod walker;

pub use extractor::DeclarationExtractor;
pub use resolver::{MethodResolver, ResolverOptions, TypeMethods};
pub use walker::{DiscoveryStats, PackageWalker, WalkerOptions};

//! Flag resolution.
//!
//! Turns a [`PluginSpec`] into a [`BuildConfiguration`] by asking the
//! package-discovery utility for three kinds of flags, one query at a
//! time:
//!
//! 1. `--cflags`, appended after the static compile flags
//! 2. `--libs-only-l`, which becomes the library list as-is
//! 3. `--libs-only-L`, which becomes the link flag list as-is
//!
//! By default a missing utility or an unknown dependency degrades to
//! "no flags of this kind" and the build carries on. [`FlagResolver::resolve_strict`]
//! reports those cases instead.

pub mod errors;
pub mod query;

pub use errors::ResolveError;
pub use query::{FlagSwitch, PackageQuery, PkgConfig, QueryOutput};

use tracing::debug;

use crate::core::{BuildConfiguration, PluginSpec};
use crate::util::flags::split_flags;

/// Resolves the build configuration of one plugin.
#[derive(Debug, Clone)]
pub struct FlagResolver<Q> {
    spec: PluginSpec,
    query: Q,
}

impl<Q: PackageQuery> FlagResolver<Q> {
    pub fn new(spec: PluginSpec, query: Q) -> Self {
        FlagResolver { spec, query }
    }

    pub fn spec(&self) -> &PluginSpec {
        &self.spec
    }

    /// Resolve, treating every failed query as empty output.
    pub fn resolve(&self) -> BuildConfiguration {
        let cflags = self.lenient_flags(FlagSwitch::Cflags);
        let libs = self.lenient_flags(FlagSwitch::LibsOnlyLowerL);
        let link_flags = self.lenient_flags(FlagSwitch::LibsOnlyUpperL);

        self.assemble(cflags, libs, link_flags)
    }

    /// Resolve, failing on the first query that cannot be run or exits
    /// non-zero.
    pub fn resolve_strict(&self) -> Result<BuildConfiguration, ResolveError> {
        let cflags = self.strict_flags(FlagSwitch::Cflags)?;
        let libs = self.strict_flags(FlagSwitch::LibsOnlyLowerL)?;
        let link_flags = self.strict_flags(FlagSwitch::LibsOnlyUpperL)?;

        Ok(self.assemble(cflags, libs, link_flags))
    }

    fn assemble(
        &self,
        cflags: Vec<String>,
        libs: Vec<String>,
        link_flags: Vec<String>,
    ) -> BuildConfiguration {
        let mut compile_flags = self.spec.cflags().to_vec();
        compile_flags.extend(cflags);

        BuildConfiguration::new(
            self.spec.name(),
            compile_flags,
            link_flags,
            libs,
            self.spec.sources().to_vec(),
        )
    }

    fn lenient_flags(&self, switch: FlagSwitch) -> Vec<String> {
        let dependency = self.spec.dependency();
        match self.query.query_flags(dependency, switch) {
            Ok(flags) => flags,
            Err(err) => {
                debug!("`--{} {}` unavailable: {}", switch, dependency, err);
                Vec::new()
            }
        }
    }

    fn strict_flags(&self, switch: FlagSwitch) -> Result<Vec<String>, ResolveError> {
        let dependency = self.spec.dependency();
        let output = self.query.query(dependency, switch)?;
        if !output.success() {
            return Err(ResolveError::Failed {
                dependency: dependency.to_string(),
                switch,
                status: output.status,
                stderr: output.stderr,
            });
        }
        Ok(split_flags(&output.stdout))
    }
}

/// Resolve the MongoDB stats pusher against the system `pkg-config`.
pub fn resolve() -> BuildConfiguration {
    FlagResolver::new(PluginSpec::mongodb_stats_pusher(), PkgConfig::from_env()).resolve()
}

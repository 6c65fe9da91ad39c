//! The resolved build configuration handed to the build orchestrator.

use serde::Serialize;

/// Flags and sources for one plugin build.
///
/// Built once by the resolver and read-only afterwards. Every list keeps
/// the order it was produced in, duplicates included, since linker search
/// path order can change symbol resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    name: String,
    compile_flags: Vec<String>,
    link_flags: Vec<String>,
    libs: Vec<String>,
    sources: Vec<String>,
}

impl BuildConfiguration {
    pub fn new(
        name: impl Into<String>,
        compile_flags: Vec<String>,
        link_flags: Vec<String>,
        libs: Vec<String>,
        sources: Vec<String>,
    ) -> Self {
        BuildConfiguration {
            name: name.into(),
            compile_flags,
            link_flags,
            libs,
            sources,
        }
    }

    /// Plugin identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Static flags followed by the discovered `--cflags`.
    pub fn compile_flags(&self) -> &[String] {
        &self.compile_flags
    }

    /// Discovered `--libs-only-L` search paths.
    pub fn link_flags(&self) -> &[String] {
        &self.link_flags
    }

    /// Discovered `--libs-only-l` library names.
    pub fn libs(&self) -> &[String] {
        &self.libs
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Look up one list by section.
    pub fn section(&self, section: Section) -> &[String] {
        match section {
            Section::Compile => self.compile_flags(),
            Section::Link => self.link_flags(),
            Section::Libs => self.libs(),
            Section::Sources => self.sources(),
        }
    }
}

/// One of the four lists in a [`BuildConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Compile,
    Link,
    Libs,
    Sources,
}

//! Supported native platforms and the load order derived from them.
//!
//! The same table drives both the generated dispatch code and
//! [`candidates_for`], so the order a generated loader tries files in can be
//! checked without running JavaScript.

use crate::loader::params::LoaderTemplateParams;
use nativegen_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host operating system, as reported by `process.platform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    /// `android`
    Android,
    /// `win32`
    Windows,
    /// `darwin`
    Darwin,
    /// `freebsd`
    FreeBsd,
    /// `linux`
    Linux,
}

impl Os {
    /// Dispatch order in generated loaders.
    pub const ALL: [Self; 5] = [
        Self::Android,
        Self::Windows,
        Self::Darwin,
        Self::FreeBsd,
        Self::Linux,
    ];

    /// Returns the `process.platform` value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Windows => "win32",
            Self::Darwin => "darwin",
            Self::FreeBsd => "freebsd",
            Self::Linux => "linux",
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Windows => "Windows",
            Self::Darwin => "macOS",
            Self::FreeBsd => "FreeBSD",
            Self::Linux => "Linux",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture, as reported by `process.arch`.
///
/// `Universal` is never reported by a host; it names the fat macOS binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    /// `x64`
    X64,
    /// `ia32`
    Ia32,
    /// `arm64`
    Arm64,
    /// `arm`
    Arm,
    /// `riscv64`
    Riscv64,
    /// `ppc64`
    Ppc64,
    /// `s390x`
    S390x,
    /// `loong64`
    Loong64,
    /// macOS universal binary
    Universal,
}

impl Arch {
    /// Returns the `process.arch` value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Ia32 => "ia32",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::Riscv64 => "riscv64",
            Self::Ppc64 => "ppc64",
            Self::S390x => "s390x",
            Self::Loong64 => "loong64",
            Self::Universal => "universal",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// C library / ABI suffix of a platform triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Abi {
    /// glibc
    Gnu,
    /// musl libc
    Musl,
    /// Microsoft toolchain
    Msvc,
    /// Android ARM EABI
    Eabi,
    /// glibc, hard-float ARM
    GnuEabihf,
    /// musl, hard-float ARM
    MuslEabihf,
}

impl Abi {
    /// Returns the triple suffix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gnu => "gnu",
            Self::Musl => "musl",
            Self::Msvc => "msvc",
            Self::Eabi => "eabi",
            Self::GnuEabihf => "gnueabihf",
            Self::MuslEabihf => "musleabihf",
        }
    }

    /// Returns `true` for musl-based ABIs.
    #[must_use]
    pub const fn is_musl(&self) -> bool {
        matches!(self, Self::Musl | Self::MuslEabihf)
    }
}

/// One prebuilt native binary target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system
    pub os: Os,
    /// CPU architecture
    pub arch: Arch,
    /// ABI suffix, if the triple carries one
    pub abi: Option<Abi>,
}

impl Platform {
    /// Every supported platform, in dispatch order.
    pub const ALL: &'static [Self] = &[
        Self::new(Os::Android, Arch::Arm64, None),
        Self::new(Os::Android, Arch::Arm, Some(Abi::Eabi)),
        Self::new(Os::Windows, Arch::X64, Some(Abi::Msvc)),
        Self::new(Os::Windows, Arch::Ia32, Some(Abi::Msvc)),
        Self::new(Os::Windows, Arch::Arm64, Some(Abi::Msvc)),
        Self::new(Os::Darwin, Arch::Universal, None),
        Self::new(Os::Darwin, Arch::X64, None),
        Self::new(Os::Darwin, Arch::Arm64, None),
        Self::new(Os::FreeBsd, Arch::X64, None),
        Self::new(Os::FreeBsd, Arch::Arm64, None),
        Self::new(Os::Linux, Arch::X64, Some(Abi::Gnu)),
        Self::new(Os::Linux, Arch::X64, Some(Abi::Musl)),
        Self::new(Os::Linux, Arch::Arm64, Some(Abi::Gnu)),
        Self::new(Os::Linux, Arch::Arm64, Some(Abi::Musl)),
        Self::new(Os::Linux, Arch::Arm, Some(Abi::GnuEabihf)),
        Self::new(Os::Linux, Arch::Arm, Some(Abi::MuslEabihf)),
        Self::new(Os::Linux, Arch::Riscv64, Some(Abi::Gnu)),
        Self::new(Os::Linux, Arch::Riscv64, Some(Abi::Musl)),
        Self::new(Os::Linux, Arch::Ppc64, Some(Abi::Gnu)),
        Self::new(Os::Linux, Arch::S390x, Some(Abi::Gnu)),
        Self::new(Os::Linux, Arch::Loong64, Some(Abi::Gnu)),
    ];

    /// Creates a platform entry.
    #[must_use]
    pub const fn new(os: Os, arch: Arch, abi: Option<Abi>) -> Self {
        Self { os, arch, abi }
    }

    /// Returns the triple used in file and package names.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_codegen::loader::{Abi, Arch, Os, Platform};
    ///
    /// assert_eq!(Platform::new(Os::Linux, Arch::X64, Some(Abi::Musl)).triple(), "linux-x64-musl");
    /// assert_eq!(Platform::new(Os::Darwin, Arch::Universal, None).triple(), "darwin-universal");
    /// ```
    #[must_use]
    pub fn triple(&self) -> String {
        match self.abi {
            Some(abi) => format!("{}-{}-{}", self.os, self.arch, abi.as_str()),
            None => format!("{}-{}", self.os, self.arch),
        }
    }

    /// Returns `true` if this entry requires a musl host.
    #[must_use]
    pub fn is_musl(&self) -> bool {
        self.abi.is_some_and(|abi| abi.is_musl())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.triple())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|platform| platform.triple() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unsupported platform triple: {s}")))
    }
}

/// Where a load attempt looks for the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// File next to the loader script
    LocalFile,
    /// Installed npm package
    Package,
}

/// One `require` attempt made by a generated loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCandidate {
    /// Module specifier passed to `require`
    pub specifier: String,
    /// Kind of location
    pub source: CandidateSource,
}

impl LoadCandidate {
    fn local(specifier: String) -> Self {
        Self {
            specifier,
            source: CandidateSource::LocalFile,
        }
    }

    fn package(specifier: String) -> Self {
        Self {
            specifier,
            source: CandidateSource::Package,
        }
    }
}

/// Local file then package attempts for one platform.
#[must_use]
pub fn platform_candidates(params: &LoaderTemplateParams, platform: &Platform) -> [LoadCandidate; 2] {
    let triple = platform.triple();
    [
        LoadCandidate::local(format!("./{}.{triple}.node", params.binary_name)),
        LoadCandidate::package(format!("{}-{triple}", params.package_name)),
    ]
}

/// WebAssembly fallback attempts, tried after every native candidate.
///
/// With the force-WASI variable set both are tried even when a native
/// binary loaded, and a loaded wasm build replaces it.
#[must_use]
pub fn wasi_candidates(params: &LoaderTemplateParams) -> [LoadCandidate; 2] {
    [
        LoadCandidate::local(format!("./{}.wasi.cjs", params.binary_name)),
        LoadCandidate::package(format!("{}-wasm32-wasi", params.package_name)),
    ]
}

/// Platforms sharing one OS and architecture.
///
/// Only Linux splits an architecture into glibc and musl variants; every
/// other OS fills `default` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArchBranch {
    pub(crate) arch: Arch,
    pub(crate) default: Option<Platform>,
    pub(crate) musl: Option<Platform>,
}

impl ArchBranch {
    /// Picks the variant a host loads. The musl probe only matters when both
    /// variants are enabled.
    pub(crate) const fn select(&self, musl: bool) -> Option<Platform> {
        match (self.default, self.musl) {
            (Some(default), Some(musl_variant)) => {
                if musl {
                    Some(musl_variant)
                } else {
                    Some(default)
                }
            }
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }
}

/// The enabled macOS universal binary, tried before any architecture.
pub(crate) fn universal_platform(params: &LoaderTemplateParams, os: Os) -> Option<Platform> {
    params
        .platforms
        .iter()
        .copied()
        .find(|platform| os == Os::Darwin && platform.os == os && platform.arch == Arch::Universal)
}

/// Architecture branches for one OS, in table order.
pub(crate) fn arch_branches(params: &LoaderTemplateParams, os: Os) -> Vec<ArchBranch> {
    let mut branches: Vec<ArchBranch> = Vec::new();

    for platform in params
        .platforms
        .iter()
        .filter(|platform| platform.os == os && platform.arch != Arch::Universal)
    {
        let index = match branches.iter().position(|b| b.arch == platform.arch) {
            Some(index) => index,
            None => {
                branches.push(ArchBranch {
                    arch: platform.arch,
                    default: None,
                    musl: None,
                });
                branches.len() - 1
            }
        };

        let branch = &mut branches[index];
        if platform.is_musl() {
            branch.musl = Some(*platform);
        } else {
            branch.default = Some(*platform);
        }
    }

    branches
}

/// Native attempts a generated loader makes on the given host, in order.
///
/// macOS hosts try the universal binary before the architecture-specific
/// one. On Linux `musl` selects between the glibc and musl variants when
/// both exist. An unsupported host yields no candidates.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::loader::{Arch, LoaderTemplateParams, Os, candidates_for};
/// use nativegen_core::{BinaryName, PackageName};
///
/// let params = LoaderTemplateParams::new(
///     BinaryName::new("addon").unwrap(),
///     PackageName::new("@scope/addon").unwrap(),
/// );
///
/// let specifiers: Vec<String> = candidates_for(&params, Os::Darwin, Arch::Arm64, false)
///     .into_iter()
///     .map(|c| c.specifier)
///     .collect();
///
/// assert_eq!(specifiers, [
///     "./addon.darwin-universal.node",
///     "@scope/addon-darwin-universal",
///     "./addon.darwin-arm64.node",
///     "@scope/addon-darwin-arm64",
/// ]);
/// ```
#[must_use]
pub fn candidates_for(
    params: &LoaderTemplateParams,
    os: Os,
    arch: Arch,
    musl: bool,
) -> Vec<LoadCandidate> {
    let mut candidates = Vec::new();

    if let Some(universal) = universal_platform(params, os) {
        candidates.extend(platform_candidates(params, &universal));
    }

    let selected = arch_branches(params, os)
        .into_iter()
        .find(|branch| branch.arch == arch)
        .and_then(|branch| branch.select(musl));
    if let Some(platform) = selected {
        candidates.extend(platform_candidates(params, &platform));
    }

    candidates
}

/// Every attempt on the given host when nothing loads: native candidates,
/// then the WebAssembly fallbacks.
///
/// The generated loader's aggregate error lists one cause per entry, in
/// this order.
#[must_use]
pub fn load_plan(params: &LoaderTemplateParams, os: Os, arch: Arch, musl: bool) -> Vec<LoadCandidate> {
    let mut plan = candidates_for(params, os, arch, musl);
    plan.extend(wasi_candidates(params));
    plan
}

//! Package catalog
//!
//! The ordered list of standard library packages rebuilt against libstd.so.
//!
//! The order is a topological sort authored by hand: packages with no
//! dependency on other cataloged packages come first and every later tier
//! depends only on earlier entries. Nothing here verifies that. A wrong order
//! is a data bug and shows up as a build failure of the dependent package.
//!
//! Packages known not to build in shared mode stay in the table as excluded
//! entries with a reason instead of being dropped.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::CatalogError;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Import path, e.g. `crypto/sha256`
    pub id: String,
    /// Why the package is skipped, if it is
    pub exclusion: Option<String>,
}

impl Package {
    /// An entry that is built
    pub fn enabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exclusion: None,
        }
    }

    /// An entry that is kept for reference but never built
    pub fn excluded(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exclusion: Some(reason.into()),
        }
    }

    /// Whether the package is built
    pub fn is_enabled(&self) -> bool {
        self.exclusion.is_none()
    }
}

/// A named group of packages sharing a dependency level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    /// Human-readable tier name
    pub name: String,
    /// Entries in build order
    pub packages: Vec<Package>,
}

/// Ordered, immutable package catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tiers: Vec<Tier>,
}

impl Catalog {
    /// Build a catalog from tiers, preserving their order
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// The built-in catalog of Go standard library packages
    pub fn standard() -> Self {
        let tiers = STANDARD
            .iter()
            .map(|(name, slots)| Tier {
                name: (*name).to_string(),
                packages: slots.iter().copied().map(Slot::to_package).collect(),
            })
            .collect();
        Self { tiers }
    }

    /// A single-tier catalog of enabled packages
    pub fn from_packages<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(vec![Tier {
            name: "packages".to_string(),
            packages: ids.into_iter().map(Package::enabled).collect(),
        }])
    }

    /// Parse a catalog from TOML
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Ok(file.into())
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Tiers in build order
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Identifiers to build, in catalog order
    pub fn packages(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries()
            .filter(|p| p.is_enabled())
            .map(|p| p.id.as_str())
    }

    /// Excluded identifiers with their reasons
    pub fn excluded(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries()
            .filter_map(|p| p.exclusion.as_deref().map(|r| (p.id.as_str(), r)))
    }

    /// Number of packages to build
    pub fn len(&self) -> usize {
        self.packages().count()
    }

    /// Whether there is nothing to build
    pub fn is_empty(&self) -> bool {
        self.packages().next().is_none()
    }

    fn entries(&self) -> impl Iterator<Item = &Package> + '_ {
        self.tiers.iter().flat_map(|t| t.packages.iter())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tier in &self.tiers {
            writeln!(f, "# {}", tier.name)?;
            for package in &tier.packages {
                match &package.exclusion {
                    None => writeln!(f, "  {}", package.id)?,
                    Some(reason) => writeln!(f, "  {} (excluded: {reason})", package.id)?,
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "tier", default)]
    tiers: Vec<TierSpec>,
}

#[derive(Debug, Deserialize)]
struct TierSpec {
    #[serde(default)]
    name: String,
    #[serde(default)]
    packages: Vec<EntrySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntrySpec {
    Id(String),
    Detailed {
        id: String,
        #[serde(default)]
        exclude: Option<String>,
    },
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        let tiers = file
            .tiers
            .into_iter()
            .map(|tier| Tier {
                name: tier.name,
                packages: tier
                    .packages
                    .into_iter()
                    .map(|entry| match entry {
                        EntrySpec::Id(id) => Package::enabled(id),
                        EntrySpec::Detailed { id, exclude } => Package {
                            id,
                            exclusion: exclude,
                        },
                    })
                    .collect(),
            })
            .collect();
        Self { tiers }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    id: &'static str,
    excluded: Option<&'static str>,
}

impl Slot {
    fn to_package(self) -> Package {
        Package {
            id: self.id.to_string(),
            exclusion: self.excluded.map(str::to_string),
        }
    }
}

const fn pkg(id: &'static str) -> Slot {
    Slot { id, excluded: None }
}

const fn skip(id: &'static str, reason: &'static str) -> Slot {
    Slot {
        id,
        excluded: Some(reason),
    }
}

const WINDOWS_ONLY: &str = "windows only";
const NEEDS_TLS: &str = "depends on crypto/tls";
const NEEDS_HTTP: &str = "depends on net/http";

#[rustfmt::skip]
const STANDARD: &[(&str, &[Slot])] = &[
    ("L0 packages", &[
        pkg("unsafe"),
        pkg("runtime/internal/sys"),
        pkg("runtime/internal/atomic"),
        pkg("runtime"),
        pkg("sync/atomic"),
        pkg("internal/race"),
        pkg("sync"),
        pkg("errors"),
        pkg("io"),
    ]),
    ("L1 packages", &[
        pkg("unicode/utf8"),
        pkg("unicode/utf16"),
        pkg("sort"),
        pkg("math"),
        pkg("math/cmplx"),
        pkg("math/rand"),
        pkg("strconv"),
    ]),
    ("L2 packages", &[
        pkg("unicode"),
        pkg("strings"),
        pkg("bytes"),
        pkg("path"),
        pkg("bufio"),
    ]),
    ("L3 packages", &[
        pkg("crypto/subtle"),
        pkg("reflect"),
        pkg("encoding/base32"),
        pkg("encoding/base64"),
        pkg("encoding/binary"),
        pkg("hash"),
        pkg("hash/adler32"),
        pkg("hash/crc32"),
        pkg("hash/crc64"),
        pkg("hash/fnv"),
        pkg("crypto"),
        pkg("crypto/cipher"),
        pkg("image/color"),
        pkg("image"),
        pkg("image/color/palette"),
    ]),
    ("Operating system access", &[
        pkg("internal/syscall/windows/sysdll"),
        pkg("syscall"),
        pkg("internal/syscall/unix"),
        skip("internal/syscall/windows", WINDOWS_ONLY),
        skip("internal/syscall/windows/registry", WINDOWS_ONLY),
        pkg("time"),
        pkg("os"),
        pkg("path/filepath"),
        pkg("io/ioutil"),
        pkg("os/signal"),
        pkg("fmt"),
        pkg("log"),
        pkg("context"),
        pkg("os/exec"),
    ]),
    ("Low level testing dependencies", &[
        pkg("regexp/syntax"),
        pkg("regexp"),
        pkg("text/tabwriter"),
        pkg("runtime/debug"),
        pkg("runtime/pprof"),
        pkg("runtime/trace"),
        pkg("flag"),
        pkg("testing"),
        pkg("testing/iotest"),
        pkg("testing/quick"),
        pkg("internal/testenv"),
    ]),
    ("Go parser", &[
        pkg("go/token"),
        pkg("go/scanner"),
        pkg("go/ast"),
        pkg("go/parser"),
        pkg("go/printer"),
        pkg("text/template/parse"),
        pkg("net/url"),
        pkg("text/template"),
        pkg("go/doc"),
        pkg("go/format"),
    ]),
    ("Go type checking", &[
        pkg("math/big"),
        pkg("go/constant"),
        pkg("go/build"),
        pkg("container/heap"),
        pkg("go/types"),
        pkg("text/scanner"),
        pkg("compress/flate"),
        pkg("compress/zlib"),
        pkg("debug/dwarf"),
        pkg("debug/elf"),
        pkg("go/internal/gcimporter"),
        pkg("go/internal/gccgoimporter"),
        pkg("go/importer"),
    ]),
    ("One of a kind", &[
        pkg("archive/tar"),
        pkg("archive/zip"),
        pkg("compress/bzip2"),
        pkg("compress/gzip"),
        pkg("compress/lzw"),
        pkg("container/list"),
        pkg("database/sql/driver"),
        pkg("database/sql"),
        pkg("debug/gosym"),
        pkg("debug/macho"),
        pkg("debug/pe"),
        pkg("debug/plan9obj"),
        pkg("encoding"),
        pkg("encoding/ascii85"),
        pkg("encoding/asn1"),
        pkg("encoding/csv"),
        pkg("encoding/gob"),
        pkg("encoding/hex"),
        pkg("encoding/json"),
        pkg("encoding/pem"),
        pkg("encoding/xml"),
        pkg("html"),
        pkg("image/internal/imageutil"),
        pkg("image/draw"),
        pkg("image/gif"),
        pkg("image/jpeg"),
        pkg("image/png"),
        pkg("index/suffixarray"),
        pkg("internal/singleflight"),
        pkg("internal/trace"),
        pkg("mime"),
        pkg("mime/quotedprintable"),
        pkg("net/internal/socktest"),
        pkg("html/template"),
    ]),
    ("CGO related", &[
        pkg("runtime/cgo"),
        pkg("runtime/race"),
        skip("runtime/msan", "requires the memory sanitizer"),
        pkg("os/user"),
    ]),
    ("Basic networking", &[
        pkg("internal/nettrace"),
        pkg("net"),
    ]),
    ("Uses of networking", &[
        pkg("net/textproto"),
        pkg("net/mail"),
        // linker panic, still attempted
        pkg("log/syslog"),
    ]),
    ("Core crypto", &[
        pkg("crypto/aes"),
        pkg("crypto/des"),
        pkg("crypto/hmac"),
        pkg("crypto/md5"),
        pkg("crypto/rc4"),
        pkg("crypto/sha1"),
        pkg("crypto/sha256"),
        pkg("crypto/sha512"),
    ]),
    ("Crypto random", &[
        pkg("crypto/rand"),
    ]),
    ("Mathematical crypto", &[
        pkg("crypto/rsa"),
        pkg("crypto/elliptic"),
        // linker panic, still attempted
        pkg("crypto/ecdsa"),
        pkg("crypto/dsa"),
    ]),
    ("SSL/TLS", &[
        pkg("crypto/x509/pkix"),
        skip("crypto/x509", "fails in shared linking mode"),
        skip("crypto/tls", "depends on crypto/x509"),
    ]),
    ("net + crypto", &[
        pkg("mime/multipart"),
        skip("net/smtp", NEEDS_TLS),
    ]),
    ("HTTP", &[
        pkg("net/http/httptrace"),
        pkg("net/http/internal"),
        // import path of the HTTP package; there is no top-level "http"
        skip("net/http", NEEDS_TLS),
    ]),
    ("HTTP users", &[
        skip("expvar", NEEDS_HTTP),
        skip("net/http/cgi", NEEDS_HTTP),
        skip("net/http/cookiejar", NEEDS_HTTP),
        skip("net/http/fcgi", NEEDS_HTTP),
        skip("net/http/httptest", NEEDS_HTTP),
        skip("net/http/httputil", NEEDS_HTTP),
        skip("net/http/pprof", NEEDS_HTTP),
        skip("net/rpc", NEEDS_HTTP),
        skip("net/rpc/jsonrpc", NEEDS_HTTP),
    ]),
];

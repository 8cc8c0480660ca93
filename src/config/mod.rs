// Configuration module
// Fixed deployment constants and the resolved runtime configuration

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Port the server listens on. Not configurable.
pub const PORT: u16 = 8000;

/// Document root, relative to the invocation directory. Not configurable.
pub const DOCUMENT_ROOT: &str = "build/web";

/// Resolved server configuration, immutable for the process lifetime.
///
/// The document root is carried as an explicit value handed to the handler
/// at construction. The server never changes its working directory.
#[derive(Debug)]
pub struct ServerConfig {
    document_root: PathBuf,
}

impl ServerConfig {
    /// Resolve the fixed document root against the invocation directory.
    ///
    /// Fails if the directory does not exist, which is fatal at startup.
    pub fn resolve() -> io::Result<Self> {
        Self::with_root(Path::new(DOCUMENT_ROOT))
    }

    /// Build a configuration over an explicit root directory.
    ///
    /// The root is canonicalized so that later containment checks compare
    /// canonical paths on both sides.
    pub fn with_root(root: &Path) -> io::Result<Self> {
        let document_root = root.canonicalize()?;
        Ok(Self { document_root })
    }

    /// Absolute, canonical path of the directory being served.
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Listen on all interfaces on the fixed port.
    pub fn socket_addr() -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT))
    }
}

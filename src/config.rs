//! Node bootstrap configuration for the posemesh SDK.

#[cfg(not(target_family = "wasm"))]
use std::path::{Path, PathBuf};

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PeerList};

/// File name for persisted node key material under the platform
/// application-support directory.
pub const PRIVATE_KEY_FILE_NAME: &str = "posemesh_private_key.dat";

/// Parameters needed to bootstrap a node: known bootstrap and relay peer
/// addresses, the node private key (or where it is stored on disk), and the
/// roles this node offers to the mesh.
///
/// Plain value object; it owns no handles and performs no I/O. On wasm
/// targets the node cannot act as infrastructure, so the role flags and the
/// key path do not exist there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    #[cfg(not(target_family = "wasm"))]
    serve_as_bootstrap: bool,
    #[cfg(not(target_family = "wasm"))]
    serve_as_relay: bool,
    bootstraps: Vec<String>,
    relays: Vec<String>,
    private_key: Vec<u8>,
    #[cfg(not(target_family = "wasm"))]
    private_key_path: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock configuration for a freshly installed node. Resolves the
    /// private key path through the built-in platform lookup where one
    /// exists.
    pub fn create_default() -> Self {
        #[cfg(not(target_family = "wasm"))]
        let config = Self::create_default_with(crate::platform::app_support_dir);
        #[cfg(target_family = "wasm")]
        let config = Self::default();
        config
    }

    /// Same as [`create_default`](Self::create_default) but with an injected
    /// application-support-directory resolver, so callers and tests control
    /// where the key file convention points.
    #[cfg(not(target_family = "wasm"))]
    pub fn create_default_with<F>(app_support_dir: F) -> Self
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        // TODO: populate well-known bootstraps and relays once they are published
        let mut config = Self::default();
        if let Some(dir) = app_support_dir().filter(|dir| !dir.as_os_str().is_empty()) {
            config.private_key_path = dir.join(PRIVATE_KEY_FILE_NAME);
        }
        config
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn serve_as_bootstrap(&self) -> bool {
        self.serve_as_bootstrap
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn set_serve_as_bootstrap(&mut self, serve_as_bootstrap: bool) {
        self.serve_as_bootstrap = serve_as_bootstrap;
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn serve_as_relay(&self) -> bool {
        self.serve_as_relay
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn set_serve_as_relay(&mut self, serve_as_relay: bool) {
        self.serve_as_relay = serve_as_relay;
    }

    pub fn bootstraps(&self) -> &[String] {
        &self.bootstraps
    }

    /// Replaces the bootstrap list. The input is validated as a whole before
    /// anything is committed; on error the stored list is untouched.
    pub fn set_bootstraps(&mut self, bootstraps: Vec<String>) -> Result<(), ConfigError> {
        if let Err(e) = validate_peer_list(PeerList::Bootstraps, &bootstraps) {
            error!("set_bootstraps(): {}", e);
            return Err(e);
        }
        self.bootstraps = bootstraps;
        Ok(())
    }

    /// Accepts the `;`-joined form consumers use to transport a peer list as
    /// a single string.
    pub fn set_bootstraps_joined(&mut self, joined: &str) -> Result<(), ConfigError> {
        self.set_bootstraps(split_joined(joined))
    }

    pub fn bootstraps_joined(&self) -> String {
        self.bootstraps.join(";")
    }

    pub fn relays(&self) -> &[String] {
        &self.relays
    }

    /// Replaces the relay list. Same contract as
    /// [`set_bootstraps`](Self::set_bootstraps), independent storage.
    pub fn set_relays(&mut self, relays: Vec<String>) -> Result<(), ConfigError> {
        if let Err(e) = validate_peer_list(PeerList::Relays, &relays) {
            error!("set_relays(): {}", e);
            return Err(e);
        }
        self.relays = relays;
        Ok(())
    }

    pub fn set_relays_joined(&mut self, joined: &str) -> Result<(), ConfigError> {
        self.set_relays(split_joined(joined))
    }

    pub fn relays_joined(&self) -> String {
        self.relays.join(";")
    }

    /// Raw key material, opaque to the configuration.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn set_private_key(&mut self, private_key: Vec<u8>) {
        self.private_key = private_key;
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn private_key_path(&self) -> &Path {
        &self.private_key_path
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn set_private_key_path(&mut self, private_key_path: PathBuf) {
        self.private_key_path = private_key_path;
    }
}

impl PartialEq for Config {
    /// Role flags (where present) and both peer lists, order sensitive. The
    /// private key and its path are deliberately left out so configs that
    /// differ only in locally stored key material compare equal.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        #[cfg(not(target_family = "wasm"))]
        {
            if self.serve_as_bootstrap != other.serve_as_bootstrap {
                return false;
            }
            if self.serve_as_relay != other.serve_as_relay {
                return false;
            }
        }
        self.bootstraps == other.bootstraps && self.relays == other.relays
    }
}

impl Eq for Config {}

/// Shared validation for both peer lists: no entry may contain the reserved
/// `;` delimiter and no entry may repeat an earlier one. Runs over the whole
/// input so a failed call commits nothing.
fn validate_peer_list(list: PeerList, entries: &[String]) -> Result<(), ConfigError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.contains(';') {
            return Err(ConfigError::IllegalCharacter { list, index });
        }
    }
    for first in 0..entries.len() {
        for duplicate in first + 1..entries.len() {
            if entries[first] == entries[duplicate] {
                return Err(ConfigError::DuplicateEntry {
                    list,
                    first,
                    duplicate,
                });
            }
        }
    }
    Ok(())
}

fn split_joined(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(';').map(str::to_string).collect()
}

// Decoded documents go through the same validation as the mutators, so a
// config read from disk cannot hold a list the setters would reject.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[cfg(not(target_family = "wasm"))]
    serve_as_bootstrap: bool,
    #[cfg(not(target_family = "wasm"))]
    serve_as_relay: bool,
    bootstraps: Vec<String>,
    relays: Vec<String>,
    private_key: Vec<u8>,
    #[cfg(not(target_family = "wasm"))]
    private_key_path: PathBuf,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let mut config = Config::default();
        #[cfg(not(target_family = "wasm"))]
        {
            config.serve_as_bootstrap = raw.serve_as_bootstrap;
            config.serve_as_relay = raw.serve_as_relay;
            config.private_key_path = raw.private_key_path;
        }
        config.set_bootstraps(raw.bootstraps)?;
        config.set_relays(raw.relays)?;
        config.set_private_key(raw.private_key);
        Ok(config)
    }
}

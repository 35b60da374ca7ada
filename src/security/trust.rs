use crate::constants::{DATA_DIR_PERMS, HASH_BLOCK_SIZE, TRUST_DB_FILE_NAME, TRUST_DB_FILE_PERMS};
use crate::utils::path::{absolutize, app_data_dir_from};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Outcome of checking a file against the trust database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustStatus {
    /// Contents match the hash recorded when the file was trusted
    Trusted,
    /// Never trusted, changed since, or unreadable
    Untrusted,
    /// The file does not exist
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("file does not exist: {0}")]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize trust database: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TrustError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Location of the trust database
///
/// `$XDG_DATA_HOME/lazyworktree/trusted.json` when the variable is set and
/// non-empty, `~/.local/share/lazyworktree/trusted.json` otherwise.
#[must_use]
pub fn trust_db_path() -> PathBuf {
    trust_db_path_from(std::env::var_os("XDG_DATA_HOME"), dirs::home_dir())
}

/// [`trust_db_path`] with the environment supplied by the caller
#[must_use]
pub fn trust_db_path_from(xdg_data_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    app_data_dir_from(xdg_data_home, home).join(TRUST_DB_FILE_NAME)
}

/// Lowercase hex sha256 of a file, read in fixed-size blocks
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_BLOCK_SIZE];

    loop {
        match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Persistent map of absolute path to trusted content hash.
///
/// The map is read from disk on first access and rewritten in full after
/// every change. Keys are lexical absolute paths; symlinks are not resolved.
///
/// Mutations are serialized by `persist_lock`, held from the map update until
/// the new database has replaced the old one. Readers only take the map lock.
#[derive(Debug)]
pub struct TrustStore {
    db_path: PathBuf,
    hashes: OnceCell<RwLock<BTreeMap<String, String>>>,
    persist_lock: Mutex<()>,
}

impl Default for TrustStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustStore {
    /// Store backed by the default database location
    #[must_use]
    pub fn new() -> Self {
        Self::with_db_path(trust_db_path())
    }

    #[must_use]
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            hashes: OnceCell::new(),
            persist_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn hashes(&self) -> &RwLock<BTreeMap<String, String>> {
        self.hashes.get_or_init(|| RwLock::new(load_database(&self.db_path)))
    }

    /// Compare a file's current contents with its recorded hash
    pub fn check_trust(&self, path: impl AsRef<Path>) -> TrustStatus {
        let Ok(resolved) = absolutize(path.as_ref()) else {
            return TrustStatus::NotFound;
        };

        match fs::metadata(&resolved) {
            Err(e) if e.kind() == ErrorKind::NotFound => return TrustStatus::NotFound,
            _ => {}
        }

        let current = match hash_file(&resolved) {
            Ok(hash) => hash,
            Err(e) => {
                log::warn!("Failed to hash {}: {}", resolved.display(), e);
                return TrustStatus::Untrusted;
            }
        };

        let key = resolved.to_string_lossy();
        let hashes = self.hashes().read();
        match hashes.get(key.as_ref()) {
            Some(stored) if *stored == current => TrustStatus::Trusted,
            _ => TrustStatus::Untrusted,
        }
    }

    /// Record the file's current hash as trusted and persist the database
    pub fn trust_file(&self, path: impl AsRef<Path>) -> Result<(), TrustError> {
        let path = path.as_ref();
        let resolved = absolutize(path).map_err(|e| TrustError::io(path, e))?;

        match fs::metadata(&resolved) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(TrustError::NotFound(resolved)),
            Err(e) => return Err(TrustError::io(&resolved, e)),
            Ok(_) => {}
        }

        let hash = hash_file(&resolved).map_err(|e| TrustError::io(&resolved, e))?;
        let key = resolved.to_string_lossy().into_owned();

        let _persisting = self.persist_lock.lock();
        let (previous, snapshot) = {
            let mut hashes = self.hashes().write();
            let previous = hashes.insert(key.clone(), hash);
            (previous, hashes.clone())
        };

        if let Err(e) = self.persist(&snapshot) {
            let mut hashes = self.hashes().write();
            match previous {
                Some(old) => hashes.insert(key, old),
                None => hashes.remove(&key),
            };
            return Err(e);
        }

        log::info!("Trusted {}", resolved.display());
        Ok(())
    }

    /// Copy of the current mapping
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.hashes().read().clone()
    }

    fn persist(&self, snapshot: &BTreeMap<String, String>) -> Result<(), TrustError> {
        let data = serde_json::to_string_pretty(snapshot)?;

        let dir = match self.db_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        create_data_dir(dir).map_err(|e| TrustError::io(dir, e))?;

        write_database(&self.db_path, dir, data.as_bytes()).map_err(|e| TrustError::io(&self.db_path, e))
    }
}

fn load_database(path: &Path) -> BTreeMap<String, String> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Failed to read trust database {}: {}", path.display(), e);
            }
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&data).unwrap_or_else(|e| {
        log::warn!("Trust database {} is corrupt, starting empty: {}", path.display(), e);
        BTreeMap::new()
    })
}

#[cfg(unix)]
fn create_data_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(DATA_DIR_PERMS).create(dir)
}

#[cfg(not(unix))]
fn create_data_dir(dir: &Path) -> io::Result<()> {
    let _ = DATA_DIR_PERMS;
    fs::create_dir_all(dir)
}

/// Write `data` to a fresh file in `dir` and rename it over `path`
fn write_database(path: &Path, dir: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = tempfile::Builder::new().prefix(".trusted-").suffix(".json").tempfile_in(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(TRUST_DB_FILE_PERMS))?;
    }
    #[cfg(not(unix))]
    let _ = TRUST_DB_FILE_PERMS;

    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

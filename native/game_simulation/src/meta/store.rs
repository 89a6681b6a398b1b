//! Path: native/game_simulation/src/meta/store.rs
//! Summary: 永続化境界（文字列キー → JSON 文字列の KV ストア）と、壊れた記録を既定値で読む補助

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed for `{key}`: {source}")]
    Io {
        key:    String,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key:    String,
        #[source]
        source: serde_json::Error,
    },
}

/// ホストが用意する永続ストア。値は JSON 文字列
pub trait KvStore {
    /// 読めない・存在しないキーは `None`
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// テスト・ヘッドレス用のメモリ上ストア
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// ディレクトリ配下に 1 キー 1 ファイル（`<key>.json`）で保存する
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("failed to read `{}` from {}: {}", key, self.dir.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { key: key.to_string(), source };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path(key), value).map_err(io_err)
    }
}

/// 記録を読む。欠損は黙って既定値、壊れた JSON は警告して既定値
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("corrupt record `{}` ({}); using default", key, e);
            T::default()
        }
    }
}

pub fn save<T: Serialize + ?Sized>(store: &mut dyn KvStore, key: &str, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)
        .map_err(|source| StoreError::Serialize { key: key.to_string(), source })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_and_missing_records_fall_back() {
        let mut store = MemoryStore::new();
        let missing: Vec<u32> = load_or_default(&store, "nothing");
        assert!(missing.is_empty());

        store.set("scores", "{not json").unwrap();
        let corrupt: Vec<u32> = load_or_default(&store, "scores");
        assert!(corrupt.is_empty());

        // 壊れた後も書き込みは通る
        save(&mut store, "scores", &vec![3u32, 1]).unwrap();
        let fixed: Vec<u32> = load_or_default(&store, "scores");
        assert_eq!(fixed, vec![3, 1]);
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("survivor_store_test_{}", std::process::id()));
        let mut store = FileStore::new(&dir);
        assert!(store.get("souls").is_none());
        save(&mut store, "souls", &42u32).unwrap();
        let reopened = FileStore::new(&dir);
        assert_eq!(load_or_default::<u32>(&reopened, "souls"), 42);
        let _ = fs::remove_dir_all(&dir);
    }
}

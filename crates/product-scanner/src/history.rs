//! 스캔 히스토리 저장소
//!
//! [`HistoryStore`]는 용량이 제한된 최신순 스캔 기록입니다. 모든 변경은
//! [`KeyValueStore`]의 `"scanHistory"` 키에 JSON 배열로 즉시 기록되며,
//! 시작 시 다시 읽어 복원합니다.
//!
//! # 저장소 구현
//!
//! - [`FileKeyValueStore`]: JSON 파일 하나에 키-값 맵을 저장
//! - [`MemoryKeyValueStore`]: 프로세스 메모리 (히스토리 비활성화, 테스트)
//!
//! 한 세션이 저장소를 소유하며, 프로세스 간 잠금은 제공하지 않습니다.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use greenscan_core::metrics as m;

use crate::error::ProductScannerError;
use crate::types::{ClassifiedScan, NormalizedProduct, SustainabilityAssessment};

/// 히스토리 저장 키
pub const HISTORY_KEY: &str = "scanHistory";

/// 히스토리 기본 용량
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// 스캔 기록 한 건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 기록 ID (UUID v4)
    pub id: Uuid,
    /// 스캔 이벤트와 분류 결과
    pub scan: ClassifiedScan,
    /// 조회된 제품 (없을 수 있음)
    pub product: Option<NormalizedProduct>,
    /// 지속가능성 평가 (제품이 있을 때만)
    pub assessment: Option<SustainabilityAssessment>,
    /// 기록 시각
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// 현재 시각으로 새 기록을 생성합니다.
    pub fn new(
        scan: ClassifiedScan,
        product: Option<NormalizedProduct>,
        assessment: Option<SustainabilityAssessment>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            scan,
            product,
            assessment,
            timestamp: Utc::now(),
        }
    }
}

/// 문자열 키-값 저장소 추상화
pub trait KeyValueStore: Send + Sync {
    /// 키의 값을 읽습니다. 없으면 `None`.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, ProductScannerError>> + Send;

    /// 키에 값을 기록합니다.
    fn set(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), ProductScannerError>> + Send;

    /// 키를 삭제합니다. 없는 키는 무시합니다.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), ProductScannerError>> + Send;
}

/// 메모리 키-값 저장소
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ProductScannerError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ProductScannerError> {
        self.entries.lock().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ProductScannerError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// JSON 파일 키-값 저장소
///
/// 파일 전체가 `{ "key": "value", ... }` 객체입니다. 쓰기는 임시 파일에 기록한 뒤
/// rename으로 교체합니다. 파일이 없으면 빈 저장소로 취급합니다.
/// 읽기는 손상된 파일을 [`ProductScannerError::StorageCorrupt`]로 보고하고,
/// 쓰기는 손상된 파일을 빈 맵으로 보고 덮어씁니다.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    // read-modify-write 직렬화
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// 파일 경로로 저장소를 생성합니다. 파일은 첫 쓰기 때 만들어집니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// 저장 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, ProductScannerError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ProductScannerError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| ProductScannerError::StorageCorrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// 쓰기용 읽기. 손상된 파일은 경고 후 빈 맵으로 대체합니다.
    async fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, ProductScannerError> {
        match self.read_map().await {
            Err(ProductScannerError::StorageCorrupt { path, reason }) => {
                warn!(%path, %reason, "corrupt key-value file, overwriting");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), ProductScannerError> {
        let io_err = |source| ProductScannerError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(map).map_err(|e| {
            ProductScannerError::StorageWrite {
                key: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, content).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ProductScannerError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ProductScannerError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map_for_write().await?;
        map.insert(key.to_owned(), value);
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), ProductScannerError> {
        let _guard = self.lock.lock().await;
        match self.read_map().await {
            Ok(mut map) => {
                if map.remove(key).is_some() {
                    self.write_map(&map).await?;
                }
                Ok(())
            }
            Err(ProductScannerError::StorageCorrupt { path, reason }) => {
                warn!(%path, %reason, "corrupt key-value file, resetting");
                self.write_map(&BTreeMap::new()).await
            }
            Err(e) => Err(e),
        }
    }
}

/// 용량 제한 최신순 스캔 히스토리
pub struct HistoryStore<K> {
    store: K,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// 저장소에서 히스토리를 복원합니다.
    ///
    /// 저장된 값이나 저장소 파일이 손상되었으면 경고를 남기고 빈 히스토리로
    /// 시작합니다. 다음 쓰기가 손상된 내용을 덮어씁니다.
    /// 용량보다 많은 항목은 가장 오래된 것부터 버립니다.
    pub async fn open(store: K, capacity: usize) -> Result<Self, ProductScannerError> {
        if capacity == 0 {
            return Err(ProductScannerError::Config {
                field: "history_capacity".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        let payload = match store.get(HISTORY_KEY).await {
            Ok(payload) => payload,
            Err(ProductScannerError::StorageCorrupt { path, reason }) => {
                warn!(%path, %reason, "corrupt history storage, starting empty");
                None
            }
            Err(e) => return Err(e),
        };
        let mut entries = match payload {
            Some(payload) => match serde_json::from_str::<Vec<HistoryEntry>>(&payload) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(key = HISTORY_KEY, error = %e, "corrupt scan history, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        entries.truncate(capacity);

        debug!(entries = entries.len(), capacity, "scan history loaded");
        gauge!(m::HISTORY_ENTRIES).set(entries.len() as f64);

        Ok(Self {
            store,
            capacity,
            entries,
        })
    }

    /// 기록을 맨 앞에 추가하고 용량을 넘는 가장 오래된 기록을 제거합니다.
    pub async fn add(&mut self, entry: HistoryEntry) -> Result<(), ProductScannerError> {
        let mut updated = Vec::with_capacity(self.capacity);
        updated.push(entry);
        updated.extend(self.entries.iter().cloned());

        let evicted = updated.len().saturating_sub(self.capacity);
        updated.truncate(self.capacity);

        self.persist(&updated).await?;
        self.entries = updated;

        if evicted > 0 {
            counter!(m::HISTORY_EVICTIONS_TOTAL).increment(evicted as u64);
        }
        gauge!(m::HISTORY_ENTRIES).set(self.entries.len() as f64);
        Ok(())
    }

    /// 최신순 기록
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// ID로 기록을 찾습니다.
    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 모든 기록을 삭제합니다.
    pub async fn clear(&mut self) -> Result<(), ProductScannerError> {
        self.store.remove(HISTORY_KEY).await?;
        self.entries.clear();
        gauge!(m::HISTORY_ENTRIES).set(0.0);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 내부 저장소
    pub fn store(&self) -> &K {
        &self.store
    }

    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), ProductScannerError> {
        let payload =
            serde_json::to_string(entries).map_err(|e| ProductScannerError::StorageWrite {
                key: HISTORY_KEY.to_owned(),
                reason: e.to_string(),
            })?;
        self.store.set(HISTORY_KEY, payload).await
    }
}

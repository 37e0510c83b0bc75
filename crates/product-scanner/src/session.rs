//! 스캔 세션 -- 분류, 조회, 평가, 기록의 전체 흐름
//!
//! [`ScanSession`]은 애플리케이션 시작 시 한 번 생성되어 오케스트레이터와
//! 히스토리 저장소를 소유합니다. 전역 상태 없이 필요한 곳에 참조로 전달합니다.
//!
//! ```text
//! ScanEvent --> classify --> (유효한 바코드) --> LookupOrchestrator --> assess
//!                   |                                  |                 |
//!                   +----------------------------------+-----------------+
//!                                                      |
//!                                                 HistoryStore
//! ```

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use greenscan_core::event::ScanEvent;
use greenscan_core::metrics as m;

use crate::classifier::classify;
use crate::error::ProductScannerError;
use crate::history::{HistoryEntry, HistoryStore, KeyValueStore};
use crate::lookup::{LookupOrchestrator, ProductSource};
use crate::scoring::assess;
use crate::types::{ClassifiedScan, NormalizedProduct, OutboundAction, SustainabilityAssessment};

/// 조회 단계 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupStatus {
    /// 제품을 찾음
    Found {
        /// 제품을 돌려준 미러
        source: String,
    },
    /// 모든 미러에서 찾지 못함
    NotFound {
        /// 시도한 미러 수
        mirrors_tried: usize,
    },
    /// 제품 바코드가 아니라 조회하지 않음
    Skipped,
}

/// 스캔 한 건의 처리 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// 히스토리 기록 ID
    pub entry_id: Uuid,
    /// 스캔 이벤트와 분류 결과
    pub scan: ClassifiedScan,
    /// 조회 결과
    pub lookup: LookupStatus,
    /// 조회된 제품
    pub product: Option<NormalizedProduct>,
    /// 지속가능성 평가
    pub assessment: Option<SustainabilityAssessment>,
    /// 콘텐츠 유형에 따른 외부 동작
    pub action: Option<OutboundAction>,
}

/// 스캔 세션
pub struct ScanSession<S, K> {
    orchestrator: LookupOrchestrator<S>,
    history: HistoryStore<K>,
    current: Option<ScanReport>,
}

impl<S: ProductSource, K: KeyValueStore> ScanSession<S, K> {
    /// 오케스트레이터와 히스토리 저장소로 세션을 생성합니다.
    pub fn new(orchestrator: LookupOrchestrator<S>, history: HistoryStore<K>) -> Self {
        Self {
            orchestrator,
            history,
            current: None,
        }
    }

    /// 스캔 이벤트를 처리합니다.
    ///
    /// 1. 코드를 분류합니다.
    /// 2. 유효한 제품 바코드면 미러에서 조회하고 평가합니다.
    ///    어디서도 찾지 못하면 `LookupStatus::NotFound`로 보고합니다 (에러 아님).
    /// 3. 결과를 히스토리에 기록하고 현재 스캔으로 보관합니다.
    ///
    /// # Errors
    ///
    /// 히스토리 저장 실패 등 조회 외 단계의 실패만 에러로 반환합니다.
    pub async fn process(&mut self, event: ScanEvent) -> Result<ScanReport, ProductScannerError> {
        let classification = classify(&event.code);
        counter!(
            m::SCANS_TOTAL,
            m::LABEL_CONTENT_TYPE => classification.content_type.as_str()
        )
        .increment(1);

        debug!(
            code = %classification.code,
            format = %event.format_label(),
            code_type = %classification.code_type,
            content_type = %classification.content_type,
            valid = classification.is_valid,
            "scan classified"
        );

        let (lookup, product, assessment) = if classification.is_valid {
            match self.orchestrator.lookup(&classification.code).await {
                Ok(hit) => {
                    let assessment = assess(Some(&hit.product));
                    counter!(
                        m::ASSESSMENTS_TOTAL,
                        m::LABEL_RATING => assessment.rating.as_label()
                    )
                    .increment(1);
                    (
                        LookupStatus::Found { source: hit.source },
                        Some(hit.product),
                        Some(assessment),
                    )
                }
                Err(ProductScannerError::NotFoundAnywhere { mirrors_tried, .. }) => {
                    (LookupStatus::NotFound { mirrors_tried }, None, None)
                }
                Err(e) => return Err(e),
            }
        } else {
            counter!(m::SCANS_INVALID_TOTAL).increment(1);
            (LookupStatus::Skipped, None, None)
        };

        let action = classification.action();
        let scan = ClassifiedScan {
            event,
            classification,
        };

        let entry = HistoryEntry::new(scan.clone(), product.clone(), assessment.clone());
        let entry_id = entry.id;
        self.history.add(entry).await?;

        let report = ScanReport {
            entry_id,
            scan,
            lookup,
            product,
            assessment,
            action,
        };
        info!(
            code = %report.scan.classification.code,
            lookup = ?report.lookup,
            score = report.assessment.as_ref().map(|a| a.score),
            "scan processed"
        );

        self.current = Some(report.clone());
        Ok(report)
    }

    /// 현재 스캔 결과
    pub fn current(&self) -> Option<&ScanReport> {
        self.current.as_ref()
    }

    /// 현재 스캔/제품/평가를 비웁니다. 히스토리는 유지됩니다.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// 스캔 히스토리 (최신순)
    pub fn history(&self) -> &HistoryStore<K> {
        &self.history
    }

    /// 스캔 히스토리를 모두 삭제합니다.
    pub async fn clear_history(&mut self) -> Result<(), ProductScannerError> {
        self.history.clear().await
    }

    /// 조회 오케스트레이터
    pub fn orchestrator(&self) -> &LookupOrchestrator<S> {
        &self.orchestrator
    }
}

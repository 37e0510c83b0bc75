//! 제품 조회 오케스트레이터
//!
//! 설정된 미러를 순서대로 조회하여 처음으로 제품을 돌려준 미러의 결과를
//! 정규화해 반환합니다. 남은 미러는 조회하지 않습니다.
//!
//! # 아키텍처
//!
//! ```text
//! ┌────────────────────┐
//! │ LookupOrchestrator │
//! └─────────┬──────────┘
//!           │ (순차, 미러당 한 번의 await)
//!           ▼
//!   ┌───────────────┐
//!   │ ProductSource │ (trait)
//!   └───────────────┘
//!        │      │
//!        ▼      ▼
//!  ┌────────┐ ┌──────┐
//!  │ Mirror │ │ Mock │
//!  │ Client │ └──────┘
//!  └───┬────┘
//!      ▼
//!  Open Food Facts
//! ```
//!
//! 미러 단위 실패(`SourceUnavailable`)는 로그와 메트릭으로만 남기고 다음 미러로 넘어갑니다.
//! 호출자에게는 성공 또는 `NotFoundAnywhere`만 전달됩니다.

pub mod http;

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, warn};

use greenscan_core::metrics as m;

use crate::error::ProductScannerError;
use crate::normalizer::{ProviderResponse, normalize};
use crate::types::NormalizedProduct;

pub use http::MirrorClient;

/// 제품 데이터 소스 추상화
///
/// 하나의 미러(또는 테스트용 가짜 소스)를 나타냅니다.
///
/// # 구현체
///
/// - [`MirrorClient`]: `reqwest` 기반 HTTP 클라이언트
/// - `MockSource`: 미리 정한 응답을 돌려주는 테스트용 소스 (테스트에서만 사용 가능)
pub trait ProductSource: Send + Sync {
    /// 소스 이름 (로그/메트릭 레이블)
    fn name(&self) -> &str;

    /// 바코드로 제공자 응답을 가져옵니다.
    ///
    /// # Errors
    ///
    /// 전송 실패, 2xx가 아닌 상태, 본문 디코딩 실패는
    /// `ProductScannerError::SourceUnavailable`로 반환합니다.
    fn fetch(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<ProviderResponse, ProductScannerError>> + Send;
}

/// 조회 성공 결과
#[derive(Debug, Clone, PartialEq)]
pub struct LookupHit {
    /// 정규화된 제품
    pub product: NormalizedProduct,
    /// 제품을 돌려준 소스 이름
    pub source: String,
}

/// 미러 순차 조회 오케스트레이터
pub struct LookupOrchestrator<S> {
    sources: Vec<S>,
}

impl<S: ProductSource> LookupOrchestrator<S> {
    /// 조회 순서대로 나열된 소스로 오케스트레이터를 생성합니다.
    ///
    /// 소스가 하나도 없으면 설정 에러입니다.
    pub fn new(sources: Vec<S>) -> Result<Self, ProductScannerError> {
        if sources.is_empty() {
            return Err(ProductScannerError::Config {
                field: "mirrors".to_owned(),
                reason: "at least one product source is required".to_owned(),
            });
        }
        Ok(Self { sources })
    }

    /// 소스 이름 목록 (조회 순서)
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// 소스 목록을 반환합니다.
    pub fn sources(&self) -> &[S] {
        &self.sources
    }

    /// 바코드로 제품을 조회합니다.
    ///
    /// 첫 번째로 일치한 소스의 결과를 정규화하여 즉시 반환합니다.
    /// 모든 소스가 실패하거나 제품이 없으면 `NotFoundAnywhere`입니다.
    pub async fn lookup(&self, barcode: &str) -> Result<LookupHit, ProductScannerError> {
        let started = Instant::now();
        let result = self.lookup_inner(barcode).await;
        histogram!(m::LOOKUP_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        let outcome = if result.is_ok() { "found" } else { "not_found" };
        counter!(m::LOOKUPS_TOTAL, m::LABEL_RESULT => outcome).increment(1);

        result
    }

    async fn lookup_inner(&self, barcode: &str) -> Result<LookupHit, ProductScannerError> {
        for source in &self.sources {
            let response = match source.fetch(barcode).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        barcode = %barcode,
                        mirror = %source.name(),
                        error = %e,
                        "mirror lookup failed, trying next"
                    );
                    counter!(
                        m::LOOKUP_SOURCE_FAILURES_TOTAL,
                        m::LABEL_MIRROR => source.name().to_owned()
                    )
                    .increment(1);
                    continue;
                }
            };

            if !response.is_match() {
                debug!(
                    barcode = %barcode,
                    mirror = %source.name(),
                    status = response.status,
                    status_verbose = response.status_verbose.as_deref().unwrap_or(""),
                    "product not on mirror, trying next"
                );
                continue;
            }

            let product = normalize(response.product.as_ref(), barcode)?;
            info!(
                barcode = %barcode,
                mirror = %source.name(),
                name = %product.name,
                "product found"
            );
            return Ok(LookupHit {
                product,
                source: source.name().to_owned(),
            });
        }

        info!(
            barcode = %barcode,
            mirrors_tried = self.sources.len(),
            "product not found on any mirror"
        );
        Err(ProductScannerError::NotFoundAnywhere {
            barcode: barcode.to_owned(),
            mirrors_tried: self.sources.len(),
        })
    }
}

/// 테스트용 소스
///
/// 미리 정한 응답을 돌려주고 호출 횟수를 기록합니다.
#[cfg(test)]
pub struct MockSource {
    name: String,
    response: MockResponse,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
#[derive(Clone)]
pub enum MockResponse {
    /// 전송 실패
    Unavailable,
    /// `status: 0`
    Missing,
    /// `status: 1`과 제품 레코드
    Product(crate::normalizer::ProviderProduct),
}

#[cfg(test)]
impl MockSource {
    pub fn new(name: &str, response: MockResponse) -> Self {
        Self {
            name: name.to_owned(),
            response,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// fetch 호출 횟수
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::Relaxed)
    }
}

#[cfg(test)]
impl ProductSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _barcode: &str) -> Result<ProviderResponse, ProductScannerError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        match &self.response {
            MockResponse::Unavailable => Err(ProductScannerError::SourceUnavailable {
                source_name: self.name.clone(),
                reason: "mock transport error".to_owned(),
            }),
            MockResponse::Missing => Ok(ProviderResponse {
                status: 0,
                status_verbose: Some("product not found".to_owned()),
                product: None,
            }),
            MockResponse::Product(product) => Ok(ProviderResponse {
                status: 1,
                status_verbose: Some("product found".to_owned()),
                product: Some(product.clone()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::ProviderProduct;

    fn coca_cola() -> ProviderProduct {
        ProviderProduct {
            product_name: Some("Coca-Cola".to_owned()),
            packaging: Some("plastic bottle".to_owned()),
            ..ProviderProduct::default()
        }
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let result = LookupOrchestrator::<MockSource>::new(Vec::new());
        assert!(matches!(
            result,
            Err(ProductScannerError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn first_matching_source_wins() {
        let orchestrator = LookupOrchestrator::new(vec![
            MockSource::new("world", MockResponse::Product(coca_cola())),
            MockSource::new("uk", MockResponse::Unavailable),
        ])
        .unwrap();

        let hit = orchestrator.lookup("5449000000996").await.unwrap();
        assert_eq!(hit.source, "world");
        assert_eq!(hit.product.name, "Coca-Cola");
        assert_eq!(orchestrator.sources()[1].calls(), 0);
    }

    #[tokio::test]
    async fn failing_sources_are_skipped() {
        let orchestrator = LookupOrchestrator::new(vec![
            MockSource::new("world", MockResponse::Unavailable),
            MockSource::new("uk", MockResponse::Unavailable),
            MockSource::new("us", MockResponse::Product(coca_cola())),
        ])
        .unwrap();

        let hit = orchestrator.lookup("5449000000996").await.unwrap();
        assert_eq!(hit.source, "us");
        assert_eq!(hit.product.barcode, "5449000000996");
        for source in orchestrator.sources() {
            assert_eq!(source.calls(), 1);
        }
    }

    #[tokio::test]
    async fn status_zero_moves_to_next_source() {
        let orchestrator = LookupOrchestrator::new(vec![
            MockSource::new("world", MockResponse::Missing),
            MockSource::new("uk", MockResponse::Product(coca_cola())),
            MockSource::new("us", MockResponse::Product(coca_cola())),
        ])
        .unwrap();

        let hit = orchestrator.lookup("5449000000996").await.unwrap();
        assert_eq!(hit.source, "uk");
        assert_eq!(orchestrator.sources()[2].calls(), 0);
    }

    #[tokio::test]
    async fn all_sources_failing_is_not_found_anywhere() {
        let orchestrator = LookupOrchestrator::new(vec![
            MockSource::new("world", MockResponse::Unavailable),
            MockSource::new("uk", MockResponse::Missing),
            MockSource::new("us", MockResponse::Unavailable),
        ])
        .unwrap();

        let err = orchestrator.lookup("00000000").await.unwrap_err();
        match err {
            ProductScannerError::NotFoundAnywhere {
                barcode,
                mirrors_tried,
            } => {
                assert_eq!(barcode, "00000000");
                assert_eq!(mirrors_tried, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn source_names_in_order() {
        let orchestrator = LookupOrchestrator::new(vec![
            MockSource::new("world", MockResponse::Missing),
            MockSource::new("us", MockResponse::Missing),
        ])
        .unwrap();
        assert_eq!(orchestrator.source_names(), vec!["world", "us"]);
    }
}

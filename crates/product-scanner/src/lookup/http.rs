//! HTTP 미러 클라이언트
//!
//! `GET <base>/api/v0/product/<barcode>.json`을 요청하고 JSON 본문을
//! [`ProviderResponse`]로 디코딩합니다. 재시도와 캐시는 하지 않습니다.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ScannerConfig;
use crate::error::ProductScannerError;
use crate::lookup::ProductSource;
use crate::normalizer::ProviderResponse;

/// 제품 API 경로 세그먼트
const PRODUCT_PATH: [&str; 3] = ["api", "v0", "product"];

/// 단일 미러에 대한 `reqwest` 클라이언트
#[derive(Debug, Clone)]
pub struct MirrorClient {
    name: String,
    base_url: Url,
    client: Client,
}

impl MirrorClient {
    /// 미러 클라이언트를 생성합니다.
    ///
    /// `base_url`은 http 또는 https URL이어야 합니다.
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        client: Client,
    ) -> Result<Self, ProductScannerError> {
        let name = name.into();
        let base_url = Url::parse(base_url).map_err(|e| ProductScannerError::Config {
            field: "mirrors.base_url".to_owned(),
            reason: format!("mirror '{name}': invalid url: {e}"),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ProductScannerError::Config {
                field: "mirrors.base_url".to_owned(),
                reason: format!("mirror '{name}': base url must be http(s)"),
            });
        }

        Ok(Self {
            name,
            base_url,
            client,
        })
    }

    /// 스캐너 설정의 모든 미러에 대해 클라이언트를 생성합니다.
    ///
    /// 하나의 `reqwest::Client`(연결 풀)를 공유하며, User-Agent와
    /// 타임아웃(0이면 전송 계층 기본값)을 적용합니다.
    pub fn from_config(config: &ScannerConfig) -> Result<Vec<Self>, ProductScannerError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder.build().map_err(|e| ProductScannerError::Config {
            field: "lookup".to_owned(),
            reason: format!("failed to build http client: {e}"),
        })?;

        config
            .mirrors
            .iter()
            .map(|mirror| Self::new(mirror.name.clone(), &mirror.base_url, client.clone()))
            .collect()
    }

    /// 미러 기본 URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 바코드에 대한 제품 URL을 만듭니다.
    ///
    /// 바코드는 하나의 경로 세그먼트로 퍼센트 인코딩됩니다.
    pub fn product_url(&self, barcode: &str) -> Result<Url, ProductScannerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProductScannerError::Config {
                field: "mirrors.base_url".to_owned(),
                reason: format!("mirror '{}': base url cannot have a path", self.name),
            })?
            .pop_if_empty()
            .extend(PRODUCT_PATH)
            .push(&format!("{barcode}.json"));
        Ok(url)
    }

    fn unavailable(&self, reason: String) -> ProductScannerError {
        ProductScannerError::SourceUnavailable {
            source_name: self.name.clone(),
            reason,
        }
    }
}

impl ProductSource for MirrorClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, barcode: &str) -> Result<ProviderResponse, ProductScannerError> {
        let url = self.product_url(barcode)?;
        debug!(mirror = %self.name, url = %url, "requesting product");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.unavailable(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP {status}")));
        }

        resp.json::<ProviderResponse>()
            .await
            .map_err(|e| self.unavailable(format!("invalid response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> MirrorClient {
        MirrorClient::new("test", base, Client::new()).unwrap()
    }

    #[test]
    fn product_url_appends_api_path() {
        let url = client("https://world.openfoodfacts.org")
            .product_url("5449000000996")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://world.openfoodfacts.org/api/v0/product/5449000000996.json"
        );
    }

    #[test]
    fn product_url_handles_trailing_slash_and_prefix() {
        let url = client("http://127.0.0.1:8080/off/")
            .product_url("12345678")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/off/api/v0/product/12345678.json"
        );
    }

    #[test]
    fn barcode_is_a_single_encoded_segment() {
        let url = client("https://world.openfoodfacts.org")
            .product_url("../../admin?x=1")
            .unwrap();
        assert!(url.path().starts_with("/api/v0/product/"));
        assert!(!url.path().contains("/admin"));
        assert!(url.query().is_none());
    }

    #[test]
    fn rejects_non_http_base() {
        let err = MirrorClient::new("ftp", "ftp://example.org", Client::new()).unwrap_err();
        assert!(matches!(err, ProductScannerError::Config { .. }));
        let err = MirrorClient::new("bad", "not a url", Client::new()).unwrap_err();
        assert!(matches!(err, ProductScannerError::Config { .. }));
    }

    #[test]
    fn from_config_builds_all_mirrors() {
        let config = ScannerConfig::default();
        let clients = MirrorClient::from_config(&config).unwrap();
        let names: Vec<_> = clients.iter().map(|c| c.name().to_owned()).collect();
        assert_eq!(names, vec!["world", "uk", "us"]);
    }
}

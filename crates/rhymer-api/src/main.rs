//! rhymer-api サーバーエントリーポイント

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rhymer_api::ApiError;
use rhymer_api::api::AppState;
use rhymer_api::api::run_server;
use rhymer_api::config::{Config, ENV_API_KEY};
use rhymer_api::service::RhymerApiServiceFull;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // .env があれば読み込む（存在しなくてもよい）
  let _ = dotenvy::dotenv();

  // ロギングの初期化
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with(tracing_subscriber::fmt::layer())
    .init();

  // 設定の読み込み
  let config = Config::from_env()?;
  tracing::info!(
    model = %config.rhymer.generative.model,
    bind_addr = %config.bind_addr,
    "設定を読み込みました"
  );

  if !config.has_api_key() {
    tracing::warn!(
      env = ENV_API_KEY,
      "API キーが設定されていません。全リクエストでフォールバックの韻検出を使用します"
    );
  }

  // サービスの初期化
  let service = Arc::new(RhymerApiServiceFull::new(&config)?);
  tracing::info!("韻解析サービスを初期化しました");

  // アプリケーション状態の作成
  let state = AppState::new(config, service);

  // サーバー起動
  run_server(state).await
}

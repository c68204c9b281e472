//! HTTPハンドラー定義

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;
use tracing::debug;

use crate::errors::ApiError;
use crate::models::{HealthResponse, ProcessRequest, ProcessResponse};

use super::state::AppState;

/// POST /api/process エンドポイント
///
/// 歌詞中の韻を踏む語をハイライトした HTML を返す。
///
/// # Request Body
/// ```json
/// { "lyrics": "解析対象の歌詞" }
/// ```
///
/// # Response
/// - 200 OK: `{"success": true, "highlighted_html": "..."}`
/// - 400 Bad Request: 歌詞が空・欠落・null
/// - 500 Internal Server Error: ボディが JSON オブジェクトとして読めない、または内部エラー（詳細は返さない）
pub async fn post_process(
  State(state): State<AppState>,
  payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
  let Json(body) = payload?;
  let lyrics = ProcessRequest::from_json(body)?.into_lyrics()?;

  debug!(lyrics_len = lyrics.len(), "歌詞処理リクエストを受信");

  // 上流サービスの失敗はサービス内部でフォールバックに切り替わる
  let response = state.service.process(lyrics).await?;

  Ok(Json(response))
}

/// ヘルスチェックエンドポイント
///
/// サーバーが稼働しているかを確認する。上流サービスの状態には依存しない。
pub async fn health_check() -> Json<HealthResponse> {
  Json(HealthResponse::healthy())
}

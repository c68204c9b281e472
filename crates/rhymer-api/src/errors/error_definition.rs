//! APIエラー定義

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// rhymer クレートのエラー型をインポート
use rhymer::errors::RhymerError;

/// 歌詞が空または欠落している場合のメッセージ
pub const NO_LYRICS_MESSAGE: &str = "No lyrics provided";

/// 内部エラー時に返す固定メッセージ（詳細はログにのみ出力する）
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process lyrics";

/// エラーの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// 入力値が無効
  InvalidInput,
  /// 内部エラー
  Internal,
  /// 設定エラー
  Config,
}

impl ApiErrorKind {
  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidInput => "invalid_input",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::InvalidInput => StatusCode::BAD_REQUEST,
      Self::Internal | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// APIエラー
#[derive(Debug, Error)]
pub enum ApiError {
  /// 入力値が無効
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// 内部エラー
  #[error("internal error: {0}")]
  Internal(String),

  /// 設定エラー
  #[error("config error: {0}")]
  Config(String),
}

impl ApiError {
  /// エラーの種類を取得
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// クライアントに返すメッセージ
  ///
  /// サーバー側のエラーは内容を隠し、固定メッセージを返す。
  #[must_use]
  pub fn public_message(&self) -> &str {
    match self {
      Self::InvalidInput(message) => message,
      Self::Internal(_) | Self::Config(_) => PROCESSING_FAILED_MESSAGE,
    }
  }

  /// 歌詞未指定エラーを作成
  #[must_use]
  pub fn no_lyrics() -> Self {
    Self::InvalidInput(NO_LYRICS_MESSAGE.to_string())
  }

  /// 内部エラーを作成
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// 設定エラーを作成
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

/// エラーレスポンスのJSON構造
#[derive(Serialize)]
struct ErrorResponse<'a> {
  error: &'a str,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();

    if status.is_server_error() {
      tracing::error!(code = self.code(), error = %self, "request failed");
    } else {
      tracing::debug!(code = self.code(), error = %self, "request rejected");
    }

    (status, Json(ErrorResponse { error: self.public_message() })).into_response()
  }
}

/// RhymerError から ApiError への変換
///
/// ドメイン層のエラーを API 層のエラーにマッピングする。
impl From<RhymerError> for ApiError {
  fn from(err: RhymerError) -> Self {
    match err {
      RhymerError::Config(err) => ApiError::config(err.to_string()),
      RhymerError::Generative(err) => ApiError::internal(format!("generative error: {err}")),
      // #[non_exhaustive] な enum のため、将来追加されるバリアントに対応
      _ => ApiError::internal(format!("unknown error: {err}")),
    }
  }
}

/// axum の JSON 抽出エラーを API エラーに変換
///
/// 解釈できないボディ（不正な JSON、Content-Type 欠落など）は
/// 歌詞未指定とは区別し、内部エラーとして固定メッセージを返す。
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::internal(format!("unreadable request body: {}", rejection.body_text()))
  }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;

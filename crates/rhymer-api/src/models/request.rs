//! リクエストモデル定義

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ApiError, Result};

/// 歌詞処理リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct ProcessRequest {
  /// 解析対象の歌詞（欠落・null の場合は None）
  #[serde(default)]
  pub lyrics: Option<String>,
}

impl ProcessRequest {
  /// JSON 値からリクエストを組み立てる
  ///
  /// serde は構造体を配列からも位置指定で読み込めるため、
  /// オブジェクト以外は先に弾く。
  ///
  /// # Errors
  /// オブジェクトでない場合、または `lyrics` が文字列・null 以外の場合は内部エラー
  pub fn from_json(value: Value) -> Result<Self> {
    if !value.is_object() {
      return Err(ApiError::internal("request body is not a JSON object"));
    }

    serde_json::from_value(value)
      .map_err(|e| ApiError::internal(format!("unreadable request body: {e}")))
  }

  /// 歌詞を取り出す
  ///
  /// # Errors
  /// 欠落または空文字列の場合は `No lyrics provided` エラー
  pub fn into_lyrics(self) -> Result<String> {
    match self.lyrics {
      Some(lyrics) if !lyrics.is_empty() => Ok(lyrics),
      _ => Err(ApiError::no_lyrics()),
    }
  }
}

//! API設定の定数定義

/// デフォルトのバインドアドレス
///
/// フロントエンドから参照される標準ポート 8000 で全インターフェースに公開する。
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// API キーを保持する環境変数名
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";

/// バインドアドレスの環境変数名
pub const ENV_BIND_ADDR: &str = "RHYMER_BIND_ADDR";

/// モデル識別子の環境変数名
pub const ENV_MODEL: &str = "RHYMER_MODEL";

/// API ベース URL の環境変数名
pub const ENV_API_BASE: &str = "RHYMER_API_BASE";

/// 上流リクエストのタイムアウト（秒）の環境変数名
///
/// 未設定の場合は HTTP クライアントの既定値に任せる。
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "RHYMER_UPSTREAM_TIMEOUT_SECS";

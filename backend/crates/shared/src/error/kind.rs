//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every DDCursor crate.

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアント側で発生するエラーの分類を定義します。
/// 表示メッセージの選択とログレベルの判定に使用します。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Locked;
/// assert_eq!(kind.as_str(), "Locked");
/// assert!(kind.is_user_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力値が不正 (フォーマット違反など)
    InvalidInput,
    /// 認証失敗
    Unauthorized,
    /// 一時的にロックされている
    Locked,
    /// 別の操作が進行中
    Busy,
    /// 対象が見つからない
    NotFound,
    /// 設定が不足または不正
    Configuration,
    /// 外部サービスへの通信失敗
    Unavailable,
    /// 内部エラー
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidInput.as_str(), "Invalid Input");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Locked => "Locked",
            ErrorKind::Busy => "Busy",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Configuration => "Configuration Error",
            ErrorKind::Unavailable => "Service Unavailable",
            ErrorKind::Internal => "Internal Error",
        }
    }

    /// システム側のエラーかどうかを判定
    ///
    /// ユーザーの操作では解決できないエラーは `true` を返します。
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_system_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::Configuration | ErrorKind::Unavailable | ErrorKind::Internal
        )
    }

    /// ユーザー側のエラーかどうかを判定
    #[inline]
    pub const fn is_user_error(&self) -> bool {
        !self.is_system_error()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(ErrorKind::Unauthorized.as_str(), "Unauthorized");
        assert_eq!(ErrorKind::NotFound.as_str(), "Not Found");
        assert_eq!(ErrorKind::Unavailable.as_str(), "Service Unavailable");
    }

    #[test]
    fn test_is_system_error() {
        assert!(!ErrorKind::InvalidInput.is_system_error());
        assert!(!ErrorKind::Locked.is_system_error());
        assert!(ErrorKind::Configuration.is_system_error());
        assert!(ErrorKind::Unavailable.is_system_error());
        assert!(ErrorKind::Internal.is_system_error());
    }

    #[test]
    fn test_is_user_error() {
        assert!(ErrorKind::Unauthorized.is_user_error());
        assert!(ErrorKind::Busy.is_user_error());
        assert!(!ErrorKind::Internal.is_user_error());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::InvalidInput).unwrap();
        assert_eq!(json, r#""INVALID_INPUT""#);
    }
}

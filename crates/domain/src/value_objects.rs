//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: プリミティブ型をラップし、型安全性を確保
//! - **バリデーション**: 生成時に検証し、不正な値の存在を型レベルで排除
//! - **不変性**: 一度作成したら変更不可
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`GivenName`] | `String` | ユーザーの名（PII、Debug マスク） |
//! | [`FamilyName`] | `String` | ユーザーの姓（PII、Debug マスク） |
//! | [`MessageBody`] | `String` | チャットメッセージ本文 |

define_validated_string! {
    /// 名（値オブジェクト）
    ///
    /// ユーザーの名を表現する。
    /// PII（個人識別情報）のため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct GivenName {
        label: "名",
        max_length: 100,
        pii: true,
    }
}

define_validated_string! {
    /// 姓（値オブジェクト）
    ///
    /// ユーザーの姓を表現する。
    /// PII（個人識別情報）のため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct FamilyName {
        label: "姓",
        max_length: 100,
        pii: true,
    }
}

define_validated_string! {
    /// メッセージ本文（値オブジェクト）
    ///
    /// チャットメッセージの本文を表現する。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 2000 文字
    pub struct MessageBody {
        label: "メッセージ本文",
        max_length: 2000,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // GivenName / FamilyName のテスト

    #[test]
    fn test_名は正常な値を受け入れて前後の空白を除去する() {
        let name = GivenName::new("  太郎  ").unwrap();
        assert_eq!(name.as_str(), "太郎");
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("   ", "空白のみ")]
    #[case(&"あ".repeat(101), "100文字超過")]
    fn test_名は不正な値を拒否する(#[case] input: &str, #[case] _reason: &str) {
        assert!(GivenName::new(input).is_err());
    }

    #[test]
    fn test_姓と名のdebug出力はマスクされる() {
        let given = GivenName::new("太郎").unwrap();
        let family = FamilyName::new("山田").unwrap();

        assert!(format!("{:?}", given).contains("[REDACTED]"));
        assert!(format!("{:?}", family).contains("[REDACTED]"));
    }

    // MessageBody のテスト

    #[test]
    fn test_メッセージ本文は正常な値を受け入れる() {
        let body = MessageBody::new("こんにちは").unwrap();
        assert_eq!(body.as_str(), "こんにちは");
        assert_eq!(body.to_string(), "こんにちは");
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case(&"あ".repeat(2001), "2000文字超過")]
    fn test_メッセージ本文は不正な値を拒否する(
        #[case] input: &str,
        #[case] _reason: &str,
    ) {
        assert!(MessageBody::new(input).is_err());
    }

    #[test]
    fn test_into_stringは所有権を持つ文字列を返す() {
        let body = MessageBody::new("テスト").unwrap();
        assert_eq!(body.into_string(), "テスト");
    }
}

//! # Phone Decryption Flows
//!
//! Client request → session resolver → detached-IV decryption, with the
//! resolver standing in for the platform's code exchange.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use pg_02_phone_decryption::{
        PhoneDecryptionApi, PhoneDecryptionService, PhoneError, SessionError, SessionInfo,
        SessionKeyResolver,
    };
    use shared_crypto::CryptoError;

    const AES128_KEY: &str = "ZGVmZ2hpamtsbW5vcHFycw==";
    const AES256_KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";
    const IV: &str = "yMnKy8zNzs/Q0dLT1NXW1w==";
    const AES128_DATA: &str = "5m5hidf6LQ+HYPYHSqU/fiNdYgUwqzWaAc3HhcLjJa8MlJv2uJVzbs3PUWX9Xt9unQM/GSW+CoCvjzeNnp267g93idSj4IFEGXU8/OcplNDi/Lmqja8yR4h8s9XgTyzuo4DXH1Yvgorb4r1jsyxTMR3+7Q8M+ZYH6TGRgCW5zcmjaL6Bnx8WTOBWjd/1yfxT";
    const AES256_DATA: &str = "h8eWBBMNqiooFc+d8vK3DRb0Nf6bjwW7z0/G0kz/bf9BBkjii1LdVMsq494kT5BC9J9iCYVMVlhEyw4ow6lFe3hjSNt+RaZp2EuSSum02KzxFEQzFN96+zMIBhYMqXYqPdde/68eNMfQVtI/YFJEJwBWcVrSBXn0ampvld3QOu9y0drklCZaCkc9j5GQfA8S";

    /// In-memory code exchange
    struct MockSessionResolver {
        sessions: HashMap<String, SessionInfo>,
    }

    impl MockSessionResolver {
        fn new() -> Self {
            let mut sessions = HashMap::new();
            for (code, key) in [("code-128", AES128_KEY), ("code-256", AES256_KEY)] {
                sessions.insert(
                    code.to_string(),
                    SessionInfo {
                        openid: format!("openid-{code}"),
                        session_key: key.to_string(),
                    },
                );
            }
            Self { sessions }
        }
    }

    #[async_trait::async_trait]
    impl SessionKeyResolver for MockSessionResolver {
        async fn resolve_session(&self, code: &str) -> Result<SessionInfo, SessionError> {
            tokio::task::yield_now().await;
            self.sessions
                .get(code)
                .cloned()
                .ok_or_else(|| SessionError::Platform {
                    code: 40029,
                    message: "invalid code".into(),
                })
        }
    }

    fn request(data: &str, code: &str) -> Vec<u8> {
        serde_json::json!({ "encryptedData": data, "iv": IV, "code": code })
            .to_string()
            .into_bytes()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_both_key_sizes() {
        let service = Arc::new(PhoneDecryptionService::new(MockSessionResolver::new()));

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = Arc::clone(&service);
            let (data, code) = if i % 2 == 0 {
                (AES128_DATA, "code-128")
            } else {
                (AES256_DATA, "code-256")
            };
            handles.push(tokio::spawn(async move {
                service.parse_phone_encrypted_data(&request(data, code)).await
            }));
        }

        for handle in handles {
            let (info, session) = handle.await.unwrap().unwrap();
            assert_eq!(info.pure_phone_number, "13800138000");
            assert_eq!(info.watermark.unwrap().appid, "wx-test-app");
            assert!(session.openid.starts_with("openid-code-"));
        }
    }

    #[tokio::test]
    async fn test_unknown_code() {
        let service = PhoneDecryptionService::new(MockSessionResolver::new());
        let err = service
            .parse_phone_encrypted_data(&request(AES128_DATA, "nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "session_error");
    }

    #[tokio::test]
    async fn test_session_key_mismatch() {
        // AES-256 ciphertext opened with the AES-128 session.
        let service = PhoneDecryptionService::new(MockSessionResolver::new());
        let err = service
            .parse_phone_encrypted_data(&request(AES256_DATA, "code-128"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PhoneError::Crypto(CryptoError::InvalidPadding) | PhoneError::InvalidRecord(_)
        ));
    }

    #[test]
    fn test_direct_decrypt() {
        let service = PhoneDecryptionService::new(MockSessionResolver::new());
        let info = service
            .decrypt_phone_number(AES256_KEY, AES256_DATA, IV)
            .unwrap();
        assert_eq!(info.phone_number, "+86 13800138000");
    }
}

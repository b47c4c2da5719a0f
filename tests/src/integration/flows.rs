//! # Integration Test Flows
//!
//! A simulated platform seals callbacks with the shared-crypto primitives
//! and the push receiver handles them end to end.
//!
//! ## Flows Tested:
//!
//! 1. **Platform → Receiver**: XML with CDATA sections, signed over the ciphertext
//! 2. **Receiver → Platform**: reply envelope opens and verifies on the platform side
//! 3. **Shared service**: one receiver serving many threads
//! 4. **Metrics**: counters move at the receiver boundary

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use pg_01_push_receiver::{
        build_frame, parse_frame, Credentials, ErrorKind, HandlerError, InboundAuthParams,
        PushBaseInfo, PushReceiverApi, PushReceiverService, ReceiverConfig, WireFormat,
    };
    use push_telemetry::{
        encode_metrics, register_metrics, ENVELOPES_OPENED, PUSH_MESSAGES, SIGNATURE_FAILURES,
    };
    use shared_crypto::{
        message_signature, open, plain_signature, seal, verify_message_signature, SecretKey,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const TOKEN: &str = "01234567800123456780012345678001";
    const KEY_SEED: &str = "0123456780012345678001234567800123456780012";
    const ACCOUNT: &str = "test-app-id";

    /// The platform side of the protocol, built only from public primitives.
    struct PlatformSimulator {
        key: SecretKey,
    }

    impl PlatformSimulator {
        fn new() -> Self {
            Self {
                key: SecretKey::from_key_seed(KEY_SEED).unwrap(),
            }
        }

        fn push(&self, payload: &str, timestamp: &str, nonce: &str) -> (InboundAuthParams, Vec<u8>) {
            let frame = build_frame(payload.as_bytes(), ACCOUNT).unwrap();
            let encrypt = seal(&self.key, &frame).unwrap();
            let params = InboundAuthParams {
                signature: plain_signature(TOKEN, timestamp, nonce),
                msg_signature: message_signature(TOKEN, timestamp, nonce, &encrypt),
                timestamp: timestamp.to_string(),
                nonce: nonce.to_string(),
                encrypt_type: "aes".to_string(),
            };
            let body = format!(
                "<xml><ToUserName><![CDATA[gh_123]]></ToUserName>\
                 <Encrypt><![CDATA[{encrypt}]]></Encrypt></xml>"
            );
            (params, body.into_bytes())
        }

        /// Verify and open a reply the way the platform would.
        fn receive_reply(&self, reply: &[u8]) -> (Vec<u8>, String) {
            let text = String::from_utf8(reply.to_vec()).unwrap();
            let field = |name: &str| -> String {
                let open_tag = format!("<{name}>");
                let close_tag = format!("</{name}>");
                let start = text.find(&open_tag).unwrap() + open_tag.len();
                let end = text.find(&close_tag).unwrap();
                text[start..end].to_string()
            };

            let encrypt = field("Encrypt");
            assert!(verify_message_signature(
                TOKEN,
                &field("TimeStamp"),
                &field("Nonce"),
                &encrypt,
                &field("MsgSignature"),
            ));

            let frame = parse_frame(&open(&self.key, &encrypt).unwrap()).unwrap();
            (frame.payload, frame.account_id)
        }
    }

    fn event_payload(event: &str) -> String {
        format!(
            "<xml><ToUserName><![CDATA[gh_123]]></ToUserName>\
             <FromUserName><![CDATA[user-1]]></FromUserName>\
             <CreateTime>1700000000</CreateTime>\
             <MsgType><![CDATA[event]]></MsgType>\
             <Event><![CDATA[{event}]]></Event></xml>"
        )
    }

    fn echo_service() -> PushReceiverService<
        impl Fn(&str, &PushBaseInfo, &[u8]) -> Result<Vec<u8>, HandlerError> + Send + Sync,
    > {
        let config =
            ReceiverConfig::new(Credentials::new(TOKEN, KEY_SEED, ACCOUNT).unwrap(), WireFormat::Xml);
        PushReceiverService::new(
            config,
            |account: &str, info: &PushBaseInfo, _: &[u8]| -> Result<Vec<u8>, HandlerError> {
                Ok(format!("{account}:{}", info.event).into_bytes())
            },
        )
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_platform_push_and_reply() {
        let platform = PlatformSimulator::new();
        let service = echo_service();

        let (params, body) = platform.push(&event_payload("subscribe"), "1700000000", "1885092304");
        let reply = service.handle_push(&params, &body).unwrap();

        let (payload, account) = platform.receive_reply(&reply);
        assert_eq!(payload, b"test-app-id:subscribe");
        assert_eq!(account, ACCOUNT);
    }

    #[test]
    fn test_reply_account_and_payload_round_trip() {
        let service = echo_service();
        let envelope = service.encrypt_response(ACCOUNT, b"test response").unwrap();
        let frame = service.decrypt_message(&envelope.encrypt).unwrap();
        assert_eq!(frame.payload, b"test response");
        assert_eq!(frame.account_id, ACCOUNT);
        assert_eq!(envelope.nonce.len(), 9);
    }

    #[test]
    fn test_reference_signature() {
        assert_eq!(
            message_signature(TOKEN, "1234567890", "test-nonce", ""),
            "397ca6f506904f29a36f440544ca817ea89384c0"
        );
    }

    #[test]
    fn test_forged_push_never_reaches_handler() {
        let platform = PlatformSimulator::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config =
            ReceiverConfig::new(Credentials::new(TOKEN, KEY_SEED, ACCOUNT).unwrap(), WireFormat::Xml);
        let service = PushReceiverService::new(
            config,
            move |_: &str, _: &PushBaseInfo, _: &[u8]| -> Result<Vec<u8>, HandlerError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            },
        );

        let (mut params, body) = platform.push(&event_payload("subscribe"), "1700000000", "1885092304");
        params.timestamp = "1700000060".to_string();
        let err = service.handle_push(&params, &body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);

        // A different key produces a well-formed but foreign envelope.
        let foreign = SecretKey::generate();
        let encrypt = seal(&foreign, &build_frame(b"<xml/>", ACCOUNT).unwrap()).unwrap();
        let params = InboundAuthParams {
            msg_signature: message_signature("other-token", "1700000000", "1", &encrypt),
            timestamp: "1700000000".to_string(),
            nonce: "1".to_string(),
            encrypt_type: "aes".to_string(),
            ..Default::default()
        };
        let body = format!("<xml><Encrypt>{encrypt}</Encrypt></xml>");
        let err = service.handle_push(&params, body.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMismatch);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_plain_mode_passthrough() {
        let service = echo_service();
        let params = InboundAuthParams {
            signature: plain_signature(TOKEN, "1700000000", "42"),
            timestamp: "1700000000".to_string(),
            nonce: "42".to_string(),
            ..Default::default()
        };
        let reply = service
            .handle_push(&params, event_payload("unsubscribe").as_bytes())
            .unwrap();
        assert_eq!(reply, b":unsubscribe");
    }

    #[test]
    fn test_shared_service_across_threads() {
        let platform = Arc::new(PlatformSimulator::new());
        let service = Arc::new(echo_service());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let platform = Arc::clone(&platform);
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for j in 0..25 {
                        let event = format!("event-{i}-{j}");
                        let (params, body) =
                            platform.push(&event_payload(&event), "1700000000", &j.to_string());
                        let reply = service.handle_push(&params, &body).unwrap();
                        let (payload, _) = platform.receive_reply(&reply);
                        assert_eq!(payload, format!("{ACCOUNT}:{event}").into_bytes());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_metrics_recorded_at_boundary() {
        register_metrics().unwrap();
        let platform = PlatformSimulator::new();
        let service = echo_service();

        let opened_before = ENVELOPES_OPENED.get();
        let (params, body) = platform.push(&event_payload("scan"), "1700000000", "7");
        service.handle_push(&params, &body).unwrap();
        assert!(ENVELOPES_OPENED.get() >= opened_before + 1.0);

        let failures_before = SIGNATURE_FAILURES.get();
        let rejected = PUSH_MESSAGES.with_label_values(&["secure", "signature_mismatch"]);
        let rejected_before = rejected.get();
        let mut forged = params.clone();
        forged.msg_signature = "0".repeat(40);
        assert!(service.handle_push(&forged, &body).is_err());
        assert!(SIGNATURE_FAILURES.get() >= failures_before + 1.0);
        assert!(rejected.get() >= rejected_before + 1.0);

        let text = encode_metrics().unwrap();
        assert!(text.contains("pg_push_messages_total"));
        assert!(text.contains(r#"outcome="signature_mismatch""#));
    }
}

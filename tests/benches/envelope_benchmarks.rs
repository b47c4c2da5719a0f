//! # Push-Gateway Envelope Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | shared-crypto | sign / verify, seal / open |
//! | pg-01 | frame build + parse, full secure dispatch |
//! | pg-02 | phone record decrypt |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pg_01_push_receiver::{
    build_frame, parse_frame, Credentials, HandlerError, InboundAuthParams, PushBaseInfo,
    PushReceiverApi, PushReceiverService, ReceiverConfig, WireFormat,
};
use pg_02_phone_decryption::{
    PhoneDecryptionApi, PhoneDecryptionService, SessionError, SessionInfo, SessionKeyResolver,
};
use shared_crypto::{message_signature, open, seal, verify_message_signature, SecretKey};
use std::time::Duration;

const TOKEN: &str = "01234567800123456780012345678001";
const KEY_SEED: &str = "0123456780012345678001234567800123456780012";
const ACCOUNT: &str = "test-app-id";

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto-signatures");
    let encrypt = "A".repeat(512);
    let signature = message_signature(TOKEN, "1700000000", "1885092304", &encrypt);

    group.bench_function("sign", |b| {
        b.iter(|| message_signature(black_box(TOKEN), "1700000000", "1885092304", &encrypt))
    });
    group.bench_function("verify", |b| {
        b.iter(|| {
            verify_message_signature(TOKEN, "1700000000", "1885092304", &encrypt, black_box(&signature))
        })
    });
    group.finish();
}

fn bench_seal_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto-envelope");
    group.measurement_time(Duration::from_secs(5));
    let key = SecretKey::from_key_seed(KEY_SEED).unwrap();

    for size in [64usize, 1024, 16 * 1024] {
        let payload = vec![0x5a; size];
        let sealed = seal(&key, &payload).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("seal", size), &payload, |b, p| {
            b.iter(|| seal(&key, black_box(p)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("open", size), &sealed, |b, s| {
            b.iter(|| open(&key, black_box(s)).unwrap())
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let payload = vec![b'x'; 1024];
    let frame = build_frame(&payload, ACCOUNT).unwrap();

    c.bench_function("pg-01-frame-build", |b| {
        b.iter(|| build_frame(black_box(&payload), ACCOUNT).unwrap())
    });
    c.bench_function("pg-01-frame-parse", |b| {
        b.iter(|| parse_frame(black_box(&frame)).unwrap())
    });
}

fn bench_secure_dispatch(c: &mut Criterion) {
    let config =
        ReceiverConfig::new(Credentials::new(TOKEN, KEY_SEED, ACCOUNT).unwrap(), WireFormat::Xml);
    let service = PushReceiverService::new(
        config,
        |_: &str, _: &PushBaseInfo, _: &[u8]| -> Result<Vec<u8>, HandlerError> { Ok(Vec::new()) },
    );

    let payload = "<xml><ToUserName><![CDATA[gh_123]]></ToUserName>\
        <MsgType><![CDATA[event]]></MsgType><Event><![CDATA[subscribe]]></Event></xml>";
    let inbound = service.encrypt_response(ACCOUNT, payload.as_bytes()).unwrap();
    let params = InboundAuthParams {
        msg_signature: inbound.msg_signature.clone(),
        timestamp: inbound.timestamp.to_string(),
        nonce: inbound.nonce.clone(),
        encrypt_type: "aes".to_string(),
        ..Default::default()
    };
    let body = service.codec().encode_envelope(&inbound).unwrap();

    c.bench_function("pg-01-secure-dispatch", |b| {
        b.iter(|| service.handle_push(&params, black_box(&body)).unwrap())
    });
}

struct NoSessions;

#[async_trait::async_trait]
impl SessionKeyResolver for NoSessions {
    async fn resolve_session(&self, _code: &str) -> Result<SessionInfo, SessionError> {
        Err(SessionError::Unavailable("benchmark".into()))
    }
}

fn bench_phone_decrypt(c: &mut Criterion) {
    let service = PhoneDecryptionService::new(NoSessions);
    let key = "ZGVmZ2hpamtsbW5vcHFycw==";
    let iv = "yMnKy8zNzs/Q0dLT1NXW1w==";
    let data = "5m5hidf6LQ+HYPYHSqU/fiNdYgUwqzWaAc3HhcLjJa8MlJv2uJVzbs3PUWX9Xt9unQM/GSW+CoCvjzeNnp267g93idSj4IFEGXU8/OcplNDi/Lmqja8yR4h8s9XgTyzuo4DXH1Yvgorb4r1jsyxTMR3+7Q8M+ZYH6TGRgCW5zcmjaL6Bnx8WTOBWjd/1yfxT";

    c.bench_function("pg-02-phone-decrypt", |b| {
        b.iter(|| service.decrypt_phone_number(key, black_box(data), iv).unwrap())
    });
}

criterion_group!(
    benches,
    bench_signatures,
    bench_seal_open,
    bench_frame,
    bench_secure_dispatch,
    bench_phone_decrypt
);
criterion_main!(benches);

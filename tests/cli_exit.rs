//! The CLI binary must exit on its own once the interview is settled, even
//! while stdin is still open and nobody is typing.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Generous bound: one 1s listen plus startup and the save.
const EXIT_TIMEOUT: Duration = Duration::from_secs(20);

#[tokio::test]
async fn binary_exits_after_name_times_out_with_stdin_open() {
    let out = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_kyc-voice"))
        .env("KYC_LISTEN_TIMEOUT_SECS", "1")
        .env("KYC_MAX_RETRIES", "0")
        .env("KYC_OUTPUT_DIR", out.path())
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .unwrap();

    // Confirm the start, then go silent without closing stdin.
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"\n").await.unwrap();
    stdin.flush().await.unwrap();

    let status = timeout(EXIT_TIMEOUT, child.wait())
        .await
        .expect("binary still running after the interview ended")
        .unwrap();
    assert!(status.success(), "exit status {status:?}");
    drop(stdin);

    let saved: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(saved.len(), 1);

    let content = std::fs::read_to_string(saved[0].path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["verification_status"], "error");
    assert_eq!(json["failure"]["field"], "name");
    assert_eq!(json["failure"]["cause"], "timeout");
}

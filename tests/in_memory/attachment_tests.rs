//! Report attachments written through the filesystem blob store.

use std::sync::Arc;

use camino::Utf8Path;
use rstest::rstest;
use teamboard::config::TeamboardConfig;
use teamboard::member::adapters::memory::InMemoryMemberRepository;
use teamboard::storage::{adapters::filesystem::FilesystemBlobStore, domain::BlobPath};
use teamboard::task::services::{AttachmentUpload, ErrorKind, ReportSubmission};

use super::helpers::{board_with, caller, seed_team};

const CONFIG_JSON: &str = r#"{
    "storage": {
        "bucket": "proofs",
        "public_base_url": "https://files.example.test/public/"
    }
}"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attachment_lands_in_configured_bucket() -> Result<(), eyre::Report> {
    let root = tempfile::tempdir()?;
    let root_path = Utf8Path::from_path(root.path())
        .ok_or_else(|| eyre::eyre!("temporary directory is not UTF-8"))?;
    let config = TeamboardConfig::from_json_str(CONFIG_JSON)?;
    let blobs = Arc::new(FilesystemBlobStore::open(
        root_path,
        config.storage.bucket.clone(),
        config.storage.public_base_url.clone(),
    )?);
    let members = Arc::new(InMemoryMemberRepository::new());
    let team = seed_team(&members, &["Alice"]).await?;
    let board = board_with(Arc::clone(&members), Arc::clone(&blobs));
    let alice = caller(&team, 0)?;

    let task = board.create_task(alice, "Write docs", None).await?;
    board.claim_task(alice, task.id()).await?;
    let report = board
        .submit_report(
            alice,
            task.id(),
            ReportSubmission::new("Draft", "First chapter written")
                .with_attachment(AttachmentUpload::new("chapter-1.md", b"# Chapter 1".to_vec())),
        )
        .await?;

    let attachment = report
        .attachment()
        .ok_or_else(|| eyre::eyre!("report should carry an attachment"))?;
    let prefix = format!("{}/{}/", config.bucket_url(), task.id());
    let relative = attachment
        .url
        .strip_prefix(&format!("{}/", config.bucket_url()))
        .ok_or_else(|| eyre::eyre!("unexpected attachment URL {}", attachment.url))?;
    eyre::ensure!(
        attachment.url.starts_with(&prefix),
        "attachment URL {} is not task scoped",
        attachment.url
    );
    eyre::ensure!(
        attachment.url.ends_with("-chapter-1.md"),
        "attachment URL {} lost the file name",
        attachment.url
    );
    eyre::ensure!(attachment.sha256.len() == 64, "digest should be hex SHA-256");

    let stored = blobs.read(&BlobPath::new(relative)?).await?;
    eyre::ensure!(stored == b"# Chapter 1".to_vec(), "stored bytes differ");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unusable_file_name_rejects_report() -> Result<(), eyre::Report> {
    let root = tempfile::tempdir()?;
    let root_path = Utf8Path::from_path(root.path())
        .ok_or_else(|| eyre::eyre!("temporary directory is not UTF-8"))?;
    let blobs = Arc::new(FilesystemBlobStore::open(
        root_path,
        "proofs",
        "https://files.example.test/public",
    )?);
    let members = Arc::new(InMemoryMemberRepository::new());
    let team = seed_team(&members, &["Alice"]).await?;
    let board = board_with(members, blobs);
    let alice = caller(&team, 0)?;

    let task = board.create_task(alice, "Write docs", None).await?;
    board.claim_task(alice, task.id()).await?;
    let result = board
        .submit_report(
            alice,
            task.id(),
            ReportSubmission::new("Draft", "Escaping the bucket")
                .with_attachment(AttachmentUpload::new("../secrets.txt", b"x".to_vec())),
        )
        .await;

    let err = result
        .err()
        .ok_or_else(|| eyre::eyre!("upload with a path in its name should fail"))?;
    eyre::ensure!(err.kind() == ErrorKind::InvalidInput, "unexpected kind {}", err.kind());
    let entries = board.board(alice).await?;
    let entry = entries
        .first()
        .ok_or_else(|| eyre::eyre!("board should list the task"))?;
    eyre::ensure!(entry.reports.is_empty(), "no report may be written");
    Ok(())
}

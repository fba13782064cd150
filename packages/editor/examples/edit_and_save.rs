//! Example: Open a document, edit it on the rich surface, save to disk

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::json;
use tempfile::tempdir;

use vellum_editor::{
    Codec, CodecError, EditorSession, FileInfo, FsContentStore, LogNotifier, NullLifecycleHook,
    OperationKind, RichChange, StructuredValue,
};

/// Codec standing in for a real markdown parser: the tree is a JSON line
/// list, printed back one line per entry.
struct LineCodec;

impl Codec for LineCodec {
    fn decode(&self, text: &str) -> Result<StructuredValue, CodecError> {
        let lines: Vec<&str> = text.lines().collect();
        Ok(json!({ "document": { "lines": lines } }))
    }

    fn encode(&self, value: &StructuredValue) -> Result<String, CodecError> {
        let lines = value
            .get("document")
            .and_then(|doc| doc.get("lines"))
            .and_then(|lines| lines.as_array())
            .ok_or_else(|| CodecError::Encode("value has no document lines".to_string()))?;

        let mut out = String::new();
        for line in lines {
            out.push_str(line.as_str().unwrap_or_default());
            out.push('\n');
        }
        Ok(out)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("notes.md");
    std::fs::write(&path, "# Notes\n")?;

    let initial = std::fs::read_to_string(&path)?;
    let mut session = EditorSession::new(
        initial,
        FileInfo::new("notes.md", &path, Utc::now()),
        Arc::new(LineCodec),
        Arc::new(FsContentStore::new(&path)),
        Arc::new(LogNotifier),
        Box::new(NullLifecycleHook),
    );

    // Open the rich surface and apply an edit through it
    session.open_rich_editor()?;
    session.edit_rich(
        RichChange::new(
            json!({ "document": { "lines": ["# Notes", "a first paragraph"] } }),
            vec![OperationKind::InsertText],
        ),
        Instant::now(),
    )?;

    // Sleep until the throttled dirty check is due, then fire it
    if let Some(deadline) = session.next_deadline() {
        tokio::time::sleep_until(deadline.into()).await;
        session.tick(Instant::now());
    }
    println!("dirty after edit: {}", session.document().is_dirty());

    session.save().await?;
    println!("saved: {}", std::fs::read_to_string(&path)?.escape_debug());

    session.close();
    Ok(())
}

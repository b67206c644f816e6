//! Subcommand implementations.
//!
//! Each command borrows the store and writes its output to `out`, so the same
//! code runs against a SQLite file from `main` and an in-memory medium in the
//! tests below.

use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;

use codeflow_assist::Assistant;
use codeflow_core::clock::Clock;
use codeflow_core::console::{ConsoleEvent, ConsoleLog};
use codeflow_core::id::ScriptId;
use codeflow_core::script::Script;
use codeflow_sim::{Run, SimulatorConfig};
use codeflow_storage::{BlobStore, ScriptStore};

use crate::error::CliError;

/// Reads script source from a file, or from stdin when `path` is `-`.
pub fn read_source(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io("<stdin>", e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

fn find<B: BlobStore, C: Clock>(
    store: &mut ScriptStore<B, C>,
    raw_id: &str,
) -> Result<Script, CliError> {
    let id = ScriptId::parse(raw_id)?;
    store
        .get(&id)?
        .ok_or_else(|| CliError::NotFound(id.to_string()))
}

pub fn list<B: BlobStore, C: Clock, W: Write>(
    store: &mut ScriptStore<B, C>,
    out: &mut W,
) -> Result<(), CliError> {
    for script in store.list()? {
        writeln!(out, "{}\t{}\t{}", script.id, script.name, script.updated_at)?;
    }
    Ok(())
}

/// Prints the script as pretty JSON.
pub fn show<B: BlobStore, C: Clock, W: Write>(
    store: &mut ScriptStore<B, C>,
    id: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let script = find(store, id)?;
    let json = serde_json::to_string_pretty(&script)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize script: {}\"}}", e));
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Creates a script and prints its id.
pub fn add<B: BlobStore, C: Clock, W: Write>(
    store: &mut ScriptStore<B, C>,
    name: &str,
    content: Option<&str>,
    out: &mut W,
) -> Result<(), CliError> {
    let script = store.add(name, content)?;
    writeln!(out, "{}\t{}", script.id, script.name)?;
    Ok(())
}

/// Replaces the source of an existing script.
///
/// Unlike the store, the CLI reports an unknown id instead of silently
/// succeeding.
pub fn edit<B: BlobStore, C: Clock>(
    store: &mut ScriptStore<B, C>,
    id: &str,
    content: &str,
) -> Result<(), CliError> {
    let script = find(store, id)?;
    store.update_content(&script.id, content)?;
    Ok(())
}

pub fn delete<B: BlobStore, C: Clock>(
    store: &mut ScriptStore<B, C>,
    id: &str,
) -> Result<(), CliError> {
    let script = find(store, id)?;
    store.delete(&script.id)?;
    Ok(())
}

/// Writes the source to `output`, or to `out` when no path is given.
pub fn export<B: BlobStore, C: Clock, W: Write>(
    store: &mut ScriptStore<B, C>,
    id: &str,
    output: Option<&Path>,
    out: &mut W,
) -> Result<(), CliError> {
    let script = find(store, id)?;
    match output {
        Some(path) => {
            std::fs::write(path, &script.content)
                .map_err(|e| CliError::io(path.display().to_string(), e))?;
            writeln!(out, "wrote {}", path.display())?;
        }
        None => out.write_all(script.content.as_bytes())?,
    }
    Ok(())
}

/// Options for `run`.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Replay every tick at once instead of waiting.
    pub instant: bool,
    pub tick: Duration,
}

/// Simulates running a script.
///
/// Real-timer mode prints each line as it is emitted. Instant mode prints the
/// whole log at once with line numbers.
pub async fn run<B: BlobStore, C: Clock, W: Write>(
    store: &mut ScriptStore<B, C>,
    id: &str,
    options: RunOptions,
    out: &mut W,
) -> Result<(), CliError> {
    let script = find(store, id)?;
    // Each invocation is its own session; there is no shared simulator.
    let run = Run::standalone(&script, &SimulatorConfig::default().with_tick(options.tick));

    if options.instant {
        let mut log = ConsoleLog::new();
        log.extend(run.replay());
        out.write_all(log.render_numbered().as_bytes())?;
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<ConsoleEvent>();
    let printer = async {
        while let Some(event) = rx.recv().await {
            writeln!(out, "{}", event.text)?;
            out.flush()?;
        }
        Ok::<(), io::Error>(())
    };
    let (_, printed) = tokio::join!(run.stream(tx), printer);
    printed?;
    Ok(())
}

/// Generates a script and prints it. With `name`, also stores it.
pub async fn generate<A: Assistant, B: BlobStore, C: Clock, W: Write>(
    assistant: &A,
    store: &mut ScriptStore<B, C>,
    prompt: &str,
    name: Option<&str>,
    out: &mut W,
) -> Result<(), CliError> {
    let generated = assistant.generate_script(prompt).await?;
    if let Some(name) = name {
        let script = store.add(name, Some(&generated.script))?;
        tracing::info!(id = %script.id, name = %script.name, "stored generated script");
    }
    writeln!(out, "{}", generated.script)?;
    Ok(())
}

/// What `explain` should look at.
#[derive(Debug, Clone, Copy)]
pub enum ExplainSource<'a> {
    Script(&'a str),
    Snippet(&'a str),
}

pub async fn explain<A: Assistant, B: BlobStore, C: Clock, W: Write>(
    assistant: &A,
    store: &mut ScriptStore<B, C>,
    source: ExplainSource<'_>,
    out: &mut W,
) -> Result<(), CliError> {
    let snippet = match source {
        ExplainSource::Script(id) => find(store, id)?.content,
        ExplainSource::Snippet(text) => text.to_string(),
    };
    let explanation = assistant.explain_snippet(&snippet).await?;
    writeln!(out, "{}", explanation.explanation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeflow_assist::{AssistError, Explanation, GeneratedScript};
    use codeflow_core::clock::FixedClock;
    use codeflow_storage::InMemoryBlobStore;

    struct EchoAssistant;

    impl Assistant for EchoAssistant {
        async fn generate_script(&self, prompt: &str) -> Result<GeneratedScript, AssistError> {
            if prompt.is_empty() {
                return Err(AssistError::EmptyInput { field: "prompt" });
            }
            Ok(GeneratedScript {
                script: format!("print('{prompt}')"),
            })
        }

        async fn explain_snippet(&self, code_snippet: &str) -> Result<Explanation, AssistError> {
            Ok(Explanation {
                explanation: format!("about: {code_snippet}"),
            })
        }
    }

    fn store() -> ScriptStore<InMemoryBlobStore, FixedClock> {
        ScriptStore::with_clock(InMemoryBlobStore::new(), FixedClock::new(1_000))
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    fn instant() -> RunOptions {
        RunOptions {
            instant: true,
            tick: Duration::ZERO,
        }
    }

    #[test]
    fn list_prints_seeded_defaults() {
        let mut store = store();
        let mut out = Vec::new();
        list(&mut store, &mut out).unwrap();
        assert_eq!(
            text(out),
            "default\tmain.py\t1000\ndefault-shell\tsetup_env.py\t1000\n"
        );
    }

    #[test]
    fn add_then_show() {
        let mut store = store();
        let mut out = Vec::new();
        add(&mut store, "tool", Some("print(1)"), &mut out).unwrap();
        let line = text(out);
        let id = line.split('\t').next().unwrap().to_string();
        assert!(line.ends_with("\ttool.py\n"));

        let mut out = Vec::new();
        show(&mut store, &id, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["content"], "print(1)");
        assert_eq!(json["updatedAt"], 1000);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = store();
        let err = edit(&mut store, "missing", "x").unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
        assert_eq!(err.exit_code(), 1);

        let err = delete(&mut store, "a/b").unwrap_err();
        assert!(matches!(err, CliError::InvalidId(_)));
    }

    #[test]
    fn edit_and_delete_existing() {
        let mut store = store();
        edit(&mut store, "default", "print('new')").unwrap();
        let mut out = Vec::new();
        export(&mut store, "default", None, &mut out).unwrap();
        assert_eq!(text(out), "print('new')");

        delete(&mut store, "default-shell").unwrap();
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        // The deleted default is backfilled on the next listing.
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.py");
        let mut store = store();
        let mut out = Vec::new();
        export(&mut store, "default", Some(&path), &mut out).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("asyncio.run(main())"));
        assert!(text(out).starts_with("wrote "));
    }

    #[test]
    fn missing_source_file_is_io_error() {
        let err = read_source("/definitely/not/here.py").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn instant_run_prints_numbered_log() {
        let mut store = store();
        edit(&mut store, "default", "print(\"hi\")").unwrap();
        let mut out = Vec::new();
        run(&mut store, "default", instant(), &mut out).await.unwrap();
        let printed = text(out);
        assert!(printed.starts_with("[1] > python3 main.py\n"));
        assert!(printed.ends_with("[5] hi\n"));
    }

    #[tokio::test]
    async fn streamed_run_prints_plain_lines() {
        let mut store = store();
        edit(&mut store, "default", "").unwrap();
        let mut out = Vec::new();
        let options = RunOptions {
            instant: false,
            tick: Duration::ZERO,
        };
        run(&mut store, "default", options, &mut out).await.unwrap();
        let printed = text(out);
        let lines: Vec<_> = printed.lines().collect();
        assert_eq!(lines.first(), Some(&"> python3 main.py"));
        assert_eq!(lines.last(), Some(&"(script is empty)"));
    }

    #[tokio::test]
    async fn streamed_run_prints_output_and_tracebacks() {
        let mut store = store();
        edit(&mut store, "default", "print('ok')\npirnt('bad')").unwrap();
        let mut out = Vec::new();
        let options = RunOptions {
            instant: false,
            tick: Duration::from_millis(1),
        };
        run(&mut store, "default", options, &mut out).await.unwrap();
        let printed = text(out);
        assert!(printed.contains("\nok\n"));
        assert!(printed.contains("NameError"));
        assert!(printed.contains("main.py"));
    }

    #[tokio::test]
    async fn generate_with_name_stores_script() {
        let mut store = store();
        let mut out = Vec::new();
        generate(&EchoAssistant, &mut store, "hey", Some("gen"), &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "print('hey')\n");
        let first = store.list().unwrap().remove(0);
        assert_eq!(first.name, "gen.py");
        assert_eq!(first.content, "print('hey')");
    }

    #[tokio::test]
    async fn assistant_failure_exits_two() {
        let mut store = store();
        let mut out = Vec::new();
        let err = generate(&EchoAssistant, &mut store, "", None, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn explain_script_or_snippet() {
        let mut store = store();
        edit(&mut store, "default", "print(2)").unwrap();

        let mut out = Vec::new();
        explain(&EchoAssistant, &mut store, ExplainSource::Script("default"), &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "about: print(2)\n");

        let mut out = Vec::new();
        explain(&EchoAssistant, &mut store, ExplainSource::Snippet("x = 1"), &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "about: x = 1\n");
    }
}

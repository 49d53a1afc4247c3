use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, warn};

use crate::cli::config::Settings;
use crate::dom::document::Document;
use crate::dom::dom_model::{ElementId, ElementLocator};
use crate::matcher::signature::{shape_fingerprint, shape_signature};
use crate::matcher::structural::is_structurally_equal;
use crate::picker::machine::Picker;
use crate::report::console::format_console_report;
use crate::report::report_model::SuiteReport;
use crate::script::runner::ScriptRunner;
use crate::script::script_model::SessionScript;
use crate::trace::logger::TraceLogger;
use crate::wiring::listeners::ListenerRegistry;

// ============================================================================
// run subcommand
// ============================================================================

/// Replay scripts against fresh copies of the document and return whether
/// all of them passed.
pub fn cmd_run(
    settings: &Settings,
    document_path: &str,
    script_path: &str,
    format: &str,
    output: Option<&str>,
) -> Result<bool> {
    let document = load_document(document_path, &settings.host_id)?;
    let scripts = load_scripts(script_path)?;

    if scripts.is_empty() {
        warn!(path = script_path, "no session scripts found");
        return Ok(true);
    }

    info!(count = scripts.len(), document = document_path, "replaying scripts");

    let start = std::time::Instant::now();
    let mut results = Vec::new();
    for script in &scripts {
        let tracer = match &settings.trace_path {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        };
        let mut picker =
            Picker::new(document.clone(), ListenerRegistry::new()).with_tracer(tracer);
        results.push(ScriptRunner::run(script, &mut picker));
        debug!(script = %script.name, "final document:\n{}", picker.tree().render_outline());
    }
    let duration = start.elapsed().as_millis();

    let suite_name = Path::new(script_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scripts");
    let report = SuiteReport::from_results(suite_name, results).with_duration(duration);
    let all_passed = report.all_passed();

    let output_content = match format {
        "json" => serde_json::to_string_pretty(&report).context("serializing report")?,
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &output_content)
            .with_context(|| format!("writing report to {}", path))?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(settings: &Settings, document_path: &str) -> Result<()> {
    let document = load_document(document_path, &settings.host_id)?;
    print!("{}", format_inspection(&document));
    Ok(())
}

/// Tree dump with one shape fingerprint per element, followed by the shapes
/// that occur more than once.
pub fn format_inspection(document: &Document) -> String {
    let mut out = String::new();
    let mut shapes: BTreeMap<String, (usize, String)> = BTreeMap::new();

    for (el, depth) in document.walk() {
        let fingerprint = shape_fingerprint(document, el);
        let locator = document
            .locator_of(el)
            .map(|l| l.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{}{} {} shape={}\n",
            "  ".repeat(depth),
            locator,
            document.describe(el),
            fingerprint
        ));

        let entry = shapes
            .entry(fingerprint)
            .or_insert_with(|| (0, shape_signature(document, el)));
        entry.0 += 1;
    }

    let repeated: Vec<_> = shapes.iter().filter(|(_, (n, _))| *n > 1).collect();
    if !repeated.is_empty() {
        out.push_str("\nRepeated shapes:\n");
        for (fingerprint, (count, signature)) in repeated {
            out.push_str(&format!("  {} x{}  {}\n", fingerprint, count, signature));
        }
    }
    out
}

// ============================================================================
// match subcommand
// ============================================================================

/// Compare two elements and return whether they are structurally equal.
pub fn cmd_match(settings: &Settings, document_path: &str, a: &str, b: &str) -> Result<bool> {
    let document = load_document(document_path, &settings.host_id)?;
    let el_a = resolve_arg(&document, a)?;
    let el_b = resolve_arg(&document, b)?;

    let equal = is_structurally_equal(&document, el_a, el_b);
    println!("{}  {}", a, shape_signature(&document, el_a));
    println!("{}  {}", b, shape_signature(&document, el_b));
    println!("structurally equal: {}", equal);
    Ok(equal)
}

// ============================================================================
// Helpers
// ============================================================================

pub fn load_document(path: &str, host_id: &str) -> Result<Document> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading document {}", path))?;
    let document = Document::from_yaml_str(&content)
        .with_context(|| format!("parsing document {}", path))?;
    Ok(document.with_host_id(host_id))
}

/// Load session scripts from a single YAML file or a directory of YAML files.
pub fn load_scripts(path: &str) -> Result<Vec<SessionScript>> {
    let metadata = std::fs::metadata(path).with_context(|| format!("reading {}", path))?;
    if metadata.is_dir() {
        let mut scripts = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let p = entry?.path();
            if p.extension().is_some_and(|e| e == "yaml" || e == "yml") {
                scripts.push(parse_script(&p)?);
            }
        }
        // Sort by name for deterministic order
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    } else {
        Ok(vec![parse_script(Path::new(path))?])
    }
}

fn parse_script(path: &Path) -> Result<SessionScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("parsing script {}", path.display()))
}

fn resolve_arg(document: &Document, raw: &str) -> Result<ElementId> {
    let locator: ElementLocator = raw.parse()?;
    document
        .resolve(&locator)
        .ok_or_else(|| anyhow!("no element matches locator '{}'", raw))
}

use oledconv::{BlockOutput, ConversionContext, FunctionDescriptor};
use serde_json::json;

/// Machine-readable summary of one conversion. `text` is embedded only when
/// the result is not written to a file.
pub fn json_report(
    out: &BlockOutput,
    context: &ConversionContext,
    output_file: Option<&str>,
) -> serde_json::Value {
    let mut report = json!({
        "mode": out.mode,
        "label": out.mode_label(),
        "font_size": context.font_size,
        "converted": out.converted,
    });
    match output_file {
        Some(path) => report["output_file"] = json!(path),
        None => report["text"] = json!(out.text),
    }
    report
}

/// Render the descriptor table as aligned old -> new signature pairs.
pub fn function_table(functions: &[FunctionDescriptor]) -> String {
    let width = functions
        .iter()
        .map(|d| d.old_signature().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (idx, d) in functions.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{:<width$}  ->  {}",
            d.old_signature(),
            d.new_signature()
        ));
    }
    out
}

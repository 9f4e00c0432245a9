use crate::AnalysisContext;
use crate::diagnostics::diagnostic::Diagnostic;

/// Render a diagnostic for host pretty printing: a severity/code header,
/// then the offending line in a numbered gutter with the span underlined.
///
/// warning[TCW01001]: Exception 'IOException' may escape and is neither caught nor declared
///   --> test.cs:3:5
///  3 |     Read();
///    |     ^^^^
///
/// A diagnostic without a location renders as the header alone.
pub fn render(ctx: &AnalysisContext, d: &Diagnostic) -> String {
    let mut out = format!("{}[{}]: {}", d.severity, d.code.as_str(), d.message);
    let Some(loc) = d.location.as_ref() else {
        return out;
    };

    let line_text = ctx.line_text(loc.line);
    let gutter = loc.line.to_string();
    let blank = " ".repeat(gutter.len());

    out.push_str(&format!("\n {}--> {}:{}:{}", blank, loc.file, loc.line, loc.column));
    out.push_str(&format!("\n {} | {}", gutter, line_text));

    // Underline stays within the quoted line even for multi-line spans
    let offset = loc.column.saturating_sub(1).min(line_text.len());
    let available = line_text.len() - offset;
    let width = loc.length.clamp(1, available.max(1));
    out.push_str(&format!(
        "\n {} | {}{}",
        blank,
        " ".repeat(offset),
        "^".repeat(width)
    ));
    out
}
